use std::time::{Duration, Instant};

use anyhow::Result;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use tracing::debug;
use winit::dpi::PhysicalSize;

use crate::runtime::FrameClock;
use crate::types::ResolvedGradient;

use super::context::GpuContext;
use super::pipeline::{PassPipelines, PipelineLayouts};
use super::targets::FluidTargets;
use super::uniforms::{CompositeUniforms, SimulationUniforms};

/// Owns every GPU resource of one gradient instance and drives a frame.
///
/// Multiple instances can coexist; nothing here is global. Dropping the
/// state releases the ping-pong targets, pipelines, and device.
pub(crate) struct GpuState {
    context: GpuContext,
    layouts: PipelineLayouts,
    passes: PassPipelines,
    targets: FluidTargets,
    simulation_uniforms: SimulationUniforms,
    composite_uniforms: CompositeUniforms,
    simulation_buffer: wgpu::Buffer,
    composite_buffer: wgpu::Buffer,
    simulation_bind_group: wgpu::BindGroup,
    composite_bind_group: wgpu::BindGroup,
    clock: FrameClock,
    last_fps_update: Instant,
    frames_since_last_update: u32,
}

impl GpuState {
    pub(crate) fn new<T>(
        target: &T,
        initial_size: PhysicalSize<u32>,
        gradient: &ResolvedGradient,
    ) -> Result<Self>
    where
        T: HasDisplayHandle + HasWindowHandle,
    {
        let context = GpuContext::new(target, initial_size)?;
        let layouts = PipelineLayouts::new(&context.device)?;
        let passes = PassPipelines::new(&context.device, &layouts, context.surface_format)?;
        let targets = FluidTargets::new(&context.device, &layouts.fluid_layout, context.size);

        let simulation_uniforms =
            SimulationUniforms::new(context.size.width, context.size.height, gradient);
        let composite_uniforms =
            CompositeUniforms::new(context.size.width, context.size.height, gradient);

        let simulation_buffer = context.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("simulation uniforms"),
            size: std::mem::size_of::<SimulationUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let composite_buffer = context.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("composite uniforms"),
            size: std::mem::size_of::<CompositeUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let simulation_bind_group = context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("simulation uniform bind group"),
                layout: &layouts.uniform_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: simulation_buffer.as_entire_binding(),
                }],
            });
        let composite_bind_group = context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("composite uniform bind group"),
                layout: &layouts.uniform_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: composite_buffer.as_entire_binding(),
                }],
            });

        Ok(Self {
            context,
            layouts,
            passes,
            targets,
            simulation_uniforms,
            composite_uniforms,
            simulation_buffer,
            composite_buffer,
            simulation_bind_group,
            composite_bind_group,
            clock: FrameClock::default(),
            last_fps_update: Instant::now(),
            frames_since_last_update: 0,
        })
    }

    pub(crate) fn size(&self) -> PhysicalSize<u32> {
        self.context.size
    }

    /// Applies a viewport change: swapchain, both fluid targets, and both
    /// passes' resolution uniforms move together before the next tick, and
    /// the frame counter restarts so stale history is never sampled.
    /// Idempotent for unchanged dimensions.
    pub(crate) fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 || new_size == self.context.size {
            return;
        }
        self.context.resize(new_size);
        self.targets
            .resize(&self.context.device, &self.layouts.fluid_layout, new_size);
        self.simulation_uniforms
            .set_resolution(new_size.width as f32, new_size.height as f32);
        self.composite_uniforms
            .set_resolution(new_size.width as f32, new_size.height as f32);
        self.clock.reset_frames();
        debug!(
            width = new_size.width,
            height = new_size.height,
            "resized fluid targets; frame counter reset"
        );
    }

    pub(crate) fn recover_surface(&mut self) {
        self.context.recover_surface();
    }

    /// Renders one tick: simulation into the current write slot (sampling
    /// the other), composite onto the swapchain, then swap and count.
    pub(crate) fn render(&mut self, mouse: [f32; 4]) -> Result<(), wgpu::SurfaceError> {
        let frame = self.context.surface.get_current_texture()?;

        let now = Instant::now();
        self.frames_since_last_update += 1;
        let since_fps_update = now.saturating_duration_since(self.last_fps_update);
        if since_fps_update >= Duration::from_secs(1) {
            let fps = self.frames_since_last_update as f32 / since_fps_update.as_secs_f32();
            self.frames_since_last_update = 0;
            self.last_fps_update = now;
            debug!(
                fps = fps.round(),
                frame_count = self.clock.frame(),
                current_slot = self.targets_slot(),
                "render stats"
            );
        }

        let sample = self.clock.sample(now);
        self.simulation_uniforms
            .set_tick(sample.seconds, sample.frame_index, mouse);
        self.composite_uniforms.set_time(sample.seconds);
        self.context.queue.write_buffer(
            &self.simulation_buffer,
            0,
            bytemuck::bytes_of(&self.simulation_uniforms),
        );
        self.context.queue.write_buffer(
            &self.composite_buffer,
            0,
            bytemuck::bytes_of(&self.composite_uniforms),
        );

        let surface_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("frame encoder"),
                });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("simulation pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: self.targets.write_view(),
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.passes.simulation);
            pass.set_bind_group(0, &self.simulation_bind_group, &[]);
            pass.set_bind_group(1, self.targets.read_bind_group(), &[]);
            pass.draw(0..3, 0..1);
        }

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("composite pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            pass.set_pipeline(&self.passes.composite);
            pass.set_bind_group(0, &self.composite_bind_group, &[]);
            pass.set_bind_group(1, self.targets.composite_bind_group(), &[]);
            pass.draw(0..3, 0..1);
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        // Strict phase order: simulate -> composite -> swap -> count.
        self.targets.swap();
        self.clock.advance();
        Ok(())
    }

    fn targets_slot(&self) -> usize {
        debug_assert_eq!(self.targets.size(), self.context.size);
        self.targets.current_slot()
    }
}
