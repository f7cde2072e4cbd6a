use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use tracing::{error, warn};
use winit::dpi::PhysicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::gpu::GpuState;
use crate::input::PointerTracker;
use crate::runtime::FrameScheduler;
use crate::types::{RendererConfig, ResolvedGradient};

/// Opens the window and drives the per-tick loop until it closes.
///
/// One tick per `RedrawRequested`: resolve the pointer tuple, simulate,
/// composite, swap, count. Redraws are re-requested from `AboutToWait`, so
/// with an uncapped scheduler the Fifo swapchain paces the loop at the
/// display's refresh rate.
pub(crate) fn run(config: &RendererConfig, gradient: &ResolvedGradient) -> Result<()> {
    let event_loop = EventLoop::new().map_err(|err| anyhow!("failed to create event loop: {err}"))?;
    let (width, height) = config.surface_size;
    let window = WindowBuilder::new()
        .with_title(&config.window_title)
        .with_inner_size(PhysicalSize::new(width.max(1), height.max(1)))
        .build(&event_loop)
        .map_err(|err| anyhow!("failed to create window: {err}"))?;
    let window = Arc::new(window);

    let mut gpu = GpuState::new(window.as_ref(), window.inner_size(), gradient)
        .context("failed to initialise GPU state")?;
    let mut pointer = PointerTracker::new();
    let mut scheduler = FrameScheduler::new(config.target_fps);

    window.request_redraw();

    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { window_id, event } if window_id == window.id() => match event {
                WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                    elwt.exit();
                }
                WindowEvent::CursorMoved { position, .. } => {
                    let surface_height = gpu.size().height.max(1) as f32;
                    pointer.pointer_moved(
                        position.x as f32,
                        position.y as f32,
                        surface_height,
                        Instant::now(),
                    );
                }
                WindowEvent::CursorLeft { .. } => {
                    pointer.pointer_left();
                }
                WindowEvent::Resized(new_size) => {
                    gpu.resize(new_size);
                }
                WindowEvent::RedrawRequested => {
                    let mouse = pointer.sample(Instant::now());
                    match gpu.render(mouse) {
                        Ok(()) => scheduler.mark_rendered(Instant::now()),
                        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                            gpu.recover_surface();
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            error!("surface out of memory; shutting down");
                            elwt.exit();
                        }
                        Err(err) => {
                            warn!(error = ?err, "surface error; retrying next frame");
                        }
                    }
                }
                _ => {}
            },
            Event::AboutToWait => {
                let now = Instant::now();
                if scheduler.ready_for_frame(now) {
                    window.request_redraw();
                    elwt.set_control_flow(ControlFlow::Wait);
                } else if let Some(deadline) = scheduler.next_deadline() {
                    elwt.set_control_flow(ControlFlow::WaitUntil(deadline));
                } else {
                    elwt.set_control_flow(ControlFlow::Wait);
                }
            }
            _ => {}
        })
        .map_err(|err| anyhow!("window event loop error: {err}"))
}
