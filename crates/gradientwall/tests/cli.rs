use std::process::Command;

#[test]
fn help_lists_gradient_flags() {
    let output = Command::new(env!("CARGO_BIN_EXE_gradientwall"))
        .arg("--help")
        .output()
        .expect("failed to run gradientwall --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--config"));
    assert!(stdout.contains("--size"));
    assert!(stdout.contains("--brush-size"));
    assert!(stdout.contains("--color1"));
}

#[test]
fn rejects_malformed_size() {
    let output = Command::new(env!("CARGO_BIN_EXE_gradientwall"))
        .args(["--size", "not-a-size"])
        .output()
        .expect("failed to run gradientwall");

    assert!(!output.status.success());
}
