//! Renderer crate for the pointer-driven fluid gradient.
//!
//! The crate glues a `winit` window, a two-pass `wgpu` pipeline, and a
//! ping-ponged pair of half-float render targets into a continuously
//! animated background. The overall flow is:
//!
//! ```text
//!   CLI / gradientwall
//!          │ RendererConfig
//!          ▼
//!   GradientRenderer::run ──▶ winit event loop ──▶ GpuState::render()
//!          ▲                        │                    │
//!          │             PointerTracker::sample    simulate ─▶ composite ─▶ swap
//! ```
//!
//! Each tick the simulation pass advances the decaying fluid field (reading
//! last frame's slot, writing the other), the composite pass maps the field
//! onto the four-colour palette, and the slots swap roles. Pointer movement
//! feeds the simulation as a `(current, previous)` position tuple that is
//! zeroed after 500 ms of rest or on cursor leave.

mod compile;
mod gpu;
mod input;
mod runtime;
mod types;
mod window;

use anyhow::Result;

pub use input::{PointerTracker, IDLE_TIMEOUT};
pub use runtime::{FrameClock, FrameScheduler, TimeSample};
pub use types::{hex_to_rgb, GradientConfig, RendererConfig, ResolvedGradient};

/// One fluid-gradient instance: validated configuration plus the render loop.
///
/// The lifecycle is two-phase: [`new`] validates the configuration without
/// touching the GPU, and [`run`] builds the GPU state and drives the loop
/// until the window closes. Instances own all their resources, so several
/// can be constructed without collision.
///
/// [`new`]: GradientRenderer::new
/// [`run`]: GradientRenderer::run
pub struct GradientRenderer {
    config: RendererConfig,
    gradient: ResolvedGradient,
}

impl GradientRenderer {
    /// Validates the configuration and captures it for a later [`run`].
    ///
    /// Fails on unparseable palette colours or out-of-range knobs; GPU
    /// resources are not allocated yet.
    ///
    /// [`run`]: GradientRenderer::run
    pub fn new(config: RendererConfig) -> Result<Self> {
        let gradient = config.gradient.resolve()?;
        Ok(Self { config, gradient })
    }

    /// Opens the window, allocates the GPU pipeline and fluid targets, and
    /// runs the frame loop until the window closes.
    ///
    /// Adapter, device, target, or shader failures surface here as errors;
    /// there is no degraded rendering path. Dropping the renderer after
    /// `run` returns releases all resources.
    pub fn run(&mut self) -> Result<()> {
        window::run(&self.config, &self.gradient)
    }
}
