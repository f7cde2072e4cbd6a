use std::borrow::Cow;

use anyhow::Result;
use wgpu::naga::ShaderStage;

/// Fragment source for the simulation pass (field advection/decay/injection).
pub(crate) const FLUID_FRAGMENT_GLSL: &str = include_str!("../shaders/fluid.frag");

/// Fragment source for the composite pass (palette mapping).
pub(crate) const DISPLAY_FRAGMENT_GLSL: &str = include_str!("../shaders/display.frag");

/// Compiles the static full-screen triangle vertex shader.
pub(crate) fn compile_vertex_shader(device: &wgpu::Device) -> Result<wgpu::ShaderModule> {
    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("fullscreen triangle vertex"),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Borrowed(VERTEX_SHADER_GLSL),
            stage: ShaderStage::Vertex,
            defines: &[],
        },
    }))
}

/// Compiles one of the embedded fragment shaders through naga's GLSL frontend.
pub(crate) fn compile_fragment_shader(
    device: &wgpu::Device,
    source: &'static str,
    label: &str,
) -> Result<wgpu::ShaderModule> {
    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Borrowed(source),
            stage: ShaderStage::Fragment,
            defines: &[],
        },
    }))
}

/// Minimal full-screen triangle vertex shader shared by both passes.
const VERTEX_SHADER_GLSL: &str = r"#version 450
layout(location = 0) out vec2 v_uv;

const vec2 positions[3] = vec2[3](
    vec2(-1.0, -3.0),
    vec2(3.0, 1.0),
    vec2(-1.0, 1.0)
);

void main() {
    uint vertex_index = uint(gl_VertexIndex);
    vec2 pos = positions[vertex_index];
    v_uv = pos * 0.5 + vec2(0.5, 0.5);
    gl_Position = vec4(pos, 0.0, 1.0);
}
";
