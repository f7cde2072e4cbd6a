use bytemuck::{Pod, Zeroable};

use crate::types::ResolvedGradient;

/// Uniform block for the simulation pass.
///
/// Layout must match `SimulationParams` in `shaders/fluid.frag` (std140):
/// vec2 + float + int pack into one 16-byte row, the mouse tuple takes the
/// next, and the five knobs plus padding fill two more.
#[repr(C, align(16))]
#[derive(Clone, Copy)]
pub(crate) struct SimulationUniforms {
    i_resolution: [f32; 2],
    i_time: f32,
    i_frame: i32,
    i_mouse: [f32; 4],
    u_brush_size: f32,
    u_brush_strength: f32,
    u_fluid_decay: f32,
    u_trail_length: f32,
    u_stop_decay: f32,
    _padding: [f32; 3],
}

unsafe impl Zeroable for SimulationUniforms {}
unsafe impl Pod for SimulationUniforms {}

impl SimulationUniforms {
    pub fn new(width: u32, height: u32, gradient: &ResolvedGradient) -> Self {
        Self {
            i_resolution: [width as f32, height as f32],
            i_time: 0.0,
            i_frame: 0,
            i_mouse: [0.0; 4],
            u_brush_size: gradient.brush_size,
            u_brush_strength: gradient.brush_strength,
            u_fluid_decay: gradient.fluid_decay,
            u_trail_length: gradient.trail_length,
            u_stop_decay: gradient.stop_decay,
            _padding: [0.0; 3],
        }
    }

    pub fn set_resolution(&mut self, width: f32, height: f32) {
        self.i_resolution = [width, height];
    }

    pub fn set_tick(&mut self, seconds: f32, frame_index: u32, mouse: [f32; 4]) {
        self.i_time = seconds;
        self.i_frame = frame_index.min(i32::MAX as u32) as i32;
        self.i_mouse = mouse;
    }
}

/// Uniform block for the composite pass; must match `CompositeParams` in
/// `shaders/display.frag`. Palette colours ride in vec4 slots to sidestep
/// std140 vec3 padding rules.
#[repr(C, align(16))]
#[derive(Clone, Copy)]
pub(crate) struct CompositeUniforms {
    i_resolution: [f32; 2],
    i_time: f32,
    u_distortion_amount: f32,
    u_colors: [[f32; 4]; 4],
    u_color_intensity: f32,
    u_softness: f32,
    _padding: [f32; 2],
}

unsafe impl Zeroable for CompositeUniforms {}
unsafe impl Pod for CompositeUniforms {}

impl CompositeUniforms {
    pub fn new(width: u32, height: u32, gradient: &ResolvedGradient) -> Self {
        let mut colors = [[0.0; 4]; 4];
        for (slot, rgb) in colors.iter_mut().zip(gradient.palette.iter()) {
            *slot = [rgb[0], rgb[1], rgb[2], 1.0];
        }
        Self {
            i_resolution: [width as f32, height as f32],
            i_time: 0.0,
            u_distortion_amount: gradient.distortion_amount,
            u_colors: colors,
            u_color_intensity: gradient.color_intensity,
            u_softness: gradient.softness,
            _padding: [0.0; 2],
        }
    }

    pub fn set_resolution(&mut self, width: f32, height: f32) {
        self.i_resolution = [width, height];
    }

    pub fn set_time(&mut self, seconds: f32) {
        self.i_time = seconds;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GradientConfig;

    fn gradient() -> ResolvedGradient {
        GradientConfig::default().resolve().unwrap()
    }

    #[test]
    fn uniform_blocks_are_std140_sized() {
        assert_eq!(std::mem::size_of::<SimulationUniforms>(), 64);
        assert_eq!(std::mem::size_of::<CompositeUniforms>(), 96);
    }

    #[test]
    fn simulation_uniforms_carry_the_knobs() {
        let uniforms = SimulationUniforms::new(800, 600, &gradient());
        let bytes = bytemuck::bytes_of(&uniforms);
        // Resolution occupies the first two floats.
        assert_eq!(&bytes[0..4], 800.0_f32.to_ne_bytes());
        assert_eq!(&bytes[4..8], 600.0_f32.to_ne_bytes());
        // Brush size sits right after the mouse tuple.
        assert_eq!(&bytes[32..36], 25.0_f32.to_ne_bytes());
    }

    #[test]
    fn frame_index_saturates_into_signed_range() {
        let mut uniforms = SimulationUniforms::new(1, 1, &gradient());
        uniforms.set_tick(0.0, u32::MAX, [0.0; 4]);
        assert_eq!(uniforms.i_frame, i32::MAX);
    }

    #[test]
    fn composite_palette_is_opaque() {
        let uniforms = CompositeUniforms::new(800, 600, &gradient());
        for color in uniforms.u_colors {
            assert_eq!(color[3], 1.0);
        }
    }
}
