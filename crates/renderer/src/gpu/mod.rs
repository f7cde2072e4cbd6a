//! GPU orchestration for the fluid gradient.
//!
//! - `context` owns wgpu instance/device/surface wiring and rebuilds
//!   swapchain state when the window resizes.
//! - `targets` manages the ping-ponged pair of half-float fluid surfaces
//!   and the tagged-slot abstraction behind the read/write role swap.
//! - `pipeline` compiles the embedded GLSL into the two render pipelines
//!   (simulation and composite) over shared bind group layouts.
//! - `uniforms` mirrors the shaders' std140 blocks and is written through
//!   the queue once per pass per frame.
//! - `state` glues everything together and exposes the `GpuState` API used
//!   by `window`.

mod context;
mod pipeline;
mod state;
mod targets;
mod uniforms;

pub(crate) use state::GpuState;
