use winit::dpi::PhysicalSize;

/// Storage format for the fluid field. Half-float precision is required:
/// the simulation accumulates small per-frame decay terms and 8-bit storage
/// would visibly band.
pub(crate) const FLUID_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// Two tagged slots alternating between read and write roles across frames.
///
/// Exactly one slot is `current` at any time; `swap` exchanges the labels in
/// O(1) without touching the payload. Keeping the index explicit makes the
/// ping-pong invariant checkable without a GPU.
#[derive(Debug)]
pub(crate) struct PingPong<T> {
    slots: [T; 2],
    current: usize,
}

impl<T> PingPong<T> {
    pub fn new(first: T, second: T) -> Self {
        Self {
            slots: [first, second],
            current: 0,
        }
    }

    pub fn current(&self) -> &T {
        &self.slots[self.current]
    }

    pub fn previous(&self) -> &T {
        &self.slots[1 - self.current]
    }

    pub fn swap(&mut self) {
        self.current = 1 - self.current;
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn replace(&mut self, first: T, second: T) {
        self.slots = [first, second];
    }
}

/// One offscreen fluid surface plus the bind group that exposes it to a pass.
pub(crate) struct FluidTarget {
    _texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub bind_group: wgpu::BindGroup,
}

impl FluidTarget {
    fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        size: PhysicalSize<u32>,
        label: &str,
    ) -> Self {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: size.width.max(1),
                height: size.height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: FLUID_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        });
        Self {
            _texture: texture,
            view,
            bind_group,
        }
    }
}

/// The ping-ponged pair of fluid surfaces.
///
/// Per tick the simulation writes the `current` slot while sampling the
/// `previous` one, the composite samples `current`, and then the labels swap.
/// Resizing is a hard reset: both textures are reallocated (zero-initialised
/// by wgpu), discarding prior contents outright.
pub(crate) struct FluidTargets {
    pair: PingPong<FluidTarget>,
    sampler: wgpu::Sampler,
    size: PhysicalSize<u32>,
}

impl FluidTargets {
    pub fn new(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        size: PhysicalSize<u32>,
    ) -> Self {
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("fluid sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let first = FluidTarget::new(device, layout, &sampler, size, "fluid target 0");
        let second = FluidTarget::new(device, layout, &sampler, size, "fluid target 1");
        Self {
            pair: PingPong::new(first, second),
            sampler,
            size,
        }
    }

    /// Reallocates both slots at the new size. Idempotent for unchanged
    /// dimensions.
    pub fn resize(
        &mut self,
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        new_size: PhysicalSize<u32>,
    ) {
        if new_size == self.size {
            return;
        }
        let first = FluidTarget::new(device, layout, &self.sampler, new_size, "fluid target 0");
        let second = FluidTarget::new(device, layout, &self.sampler, new_size, "fluid target 1");
        self.pair.replace(first, second);
        self.size = new_size;
    }

    pub fn swap(&mut self) {
        self.pair.swap();
    }

    /// Attachment view for the simulation pass (the slot being written).
    pub fn write_view(&self) -> &wgpu::TextureView {
        &self.pair.current().view
    }

    /// Bind group sampling last frame's field (read-only this frame).
    pub fn read_bind_group(&self) -> &wgpu::BindGroup {
        &self.pair.previous().bind_group
    }

    /// Bind group sampling the slot the simulation just wrote.
    pub fn composite_bind_group(&self) -> &wgpu::BindGroup {
        &self.pair.current().bind_group
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    pub fn current_slot(&self) -> usize {
        self.pair.current_index()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_one_slot_is_current() {
        let pair = PingPong::new('a', 'b');
        assert_eq!(*pair.current(), 'a');
        assert_eq!(*pair.previous(), 'b');
        assert_ne!(pair.current(), pair.previous());
    }

    #[test]
    fn swap_twice_restores_roles() {
        let mut pair = PingPong::new(0u32, 1u32);
        let original = pair.current_index();
        pair.swap();
        assert_ne!(pair.current_index(), original);
        assert_eq!(*pair.current(), 1);
        pair.swap();
        assert_eq!(pair.current_index(), original);
        assert_eq!(*pair.current(), 0);
    }

    #[test]
    fn swap_exchanges_read_and_write_roles() {
        let mut pair = PingPong::new("written", "history");
        assert_eq!(*pair.current(), "written");
        pair.swap();
        // Last frame's write target becomes this frame's history.
        assert_eq!(*pair.previous(), "written");
        assert_eq!(*pair.current(), "history");
    }

    #[test]
    fn replace_keeps_current_label_valid() {
        let mut pair = PingPong::new(1, 2);
        pair.swap();
        pair.replace(10, 20);
        assert!(pair.current_index() < 2);
        assert_ne!(pair.current(), pair.previous());
    }
}
