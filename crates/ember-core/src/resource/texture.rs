// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! An updatable 2D texture, the concrete resource kind exercising the full
//! lifecycle contract end to end.

use crate::renderer::api::{
    AddressMode, PixelFormat, SamplerDescriptor, SamplerId, TextureCreateFlags, TextureDescriptor,
    TextureId,
};
use crate::renderer::{BackendContext, RenderSettings};
use crate::resource::handle::{GpuResource, ResourceHandle};
use crate::resource::queue::RenderQueue;

/// A 2D texture whose content can be refreshed at runtime.
///
/// Construction stores only the logical parameters and enqueues a deferred
/// init, so callers on arbitrary threads never block on backend object
/// creation. Staged texel data is uploaded whenever the backend state is
/// (re)built, which is what a deferred-update entry triggers each frame.
pub struct DynamicTexture2D {
    width: u32,
    height: u32,
    format: PixelFormat,
    resolve_target: bool,
    label: String,
    pixels: Option<Vec<u8>>,
    texture: Option<TextureId>,
    sampler: Option<SamplerId>,
}

impl DynamicTexture2D {
    /// Creates the logical texture and enqueues its backend initialization.
    ///
    /// Returns `None` (after logging a warning, and without enqueuing
    /// anything) when either dimension is zero; the backend is never asked to
    /// allocate invalid dimensions.
    pub fn create(
        queue: &RenderQueue,
        width: u32,
        height: u32,
        format: PixelFormat,
        resolve_target: bool,
    ) -> Option<ResourceHandle<Self>> {
        if width == 0 || height == 0 {
            log::warn!("rejecting dynamic texture request with invalid dimensions {width}x{height}");
            return None;
        }
        let handle = ResourceHandle::new(Self {
            width,
            height,
            format,
            resolve_target,
            label: format!("dynamic texture {width}x{height}"),
            pixels: None,
            texture: None,
            sampler: None,
        });
        queue.begin_init(&handle);
        Some(handle)
    }

    /// The logical width in texels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// The logical height in texels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The logical texel format.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// The backend texture, present while backend state exists.
    pub fn texture_id(&self) -> Option<TextureId> {
        self.texture
    }

    /// The backend sampler, present while backend state exists.
    pub fn sampler_id(&self) -> Option<SamplerId> {
        self.sampler
    }

    /// The byte size of one full copy of the texture content.
    pub fn expected_bytes(&self) -> usize {
        self.width as usize * self.height as usize * self.format.bytes_per_texel() as usize
    }

    /// Stages texel data to upload on the next init or update cycle.
    pub fn set_texels<T: bytemuck::Pod>(&mut self, texels: &[T]) {
        self.pixels = Some(bytemuck::cast_slice(texels).to_vec());
    }

    fn creation_flags(&self, settings: &RenderSettings) -> TextureCreateFlags {
        let mut flags = TextureCreateFlags::EMPTY;
        if self.resolve_target {
            // Resolve targets ignore gamma; the sRGB request does not apply.
            flags |= TextureCreateFlags::RESOLVE_TARGET;
        } else if self.format.is_srgb() && !settings.emulate_constrained_rendering {
            flags |= TextureCreateFlags::SRGB;
        }
        if self.resolve_target || self.format.requires_linear_layout() {
            flags |= TextureCreateFlags::NO_TILING;
        }
        flags
    }
}

impl GpuResource for DynamicTexture2D {
    fn init_backend_state(&mut self, context: &BackendContext) {
        let settings = context.settings();

        let descriptor = TextureDescriptor {
            label: Some(self.label.clone()),
            width: self.width,
            height: self.height,
            format: self.format,
            mip_count: 1,
            flags: self.creation_flags(settings),
        };
        match context.backend().create_texture_2d(&descriptor) {
            Ok(id) => {
                self.texture = Some(id);
                if let Some(pixels) = &self.pixels {
                    if let Err(error) = context.backend().write_texture(id, pixels) {
                        log::error!("failed to upload texels for {}: {error}", self.label);
                    }
                }
            }
            Err(error) => {
                log::error!("failed to create backend texture for {}: {error}", self.label);
            }
        }

        let sampler = SamplerDescriptor {
            label: Some(self.label.clone()),
            address_u: AddressMode::Repeat,
            address_v: AddressMode::Repeat,
            address_w: AddressMode::Repeat,
            filter: settings.texture_filter,
        };
        match context.backend().create_sampler(&sampler) {
            Ok(id) => self.sampler = Some(id),
            Err(error) => {
                log::error!("failed to create sampler for {}: {error}", self.label);
            }
        }
    }

    fn release_backend_state(&mut self, context: &BackendContext) {
        if let Some(id) = self.texture.take() {
            if let Err(error) = context.backend().destroy_texture(id) {
                log::error!("failed to destroy backend texture for {}: {error}", self.label);
            }
        }
        if let Some(id) = self.sampler.take() {
            if let Err(error) = context.backend().destroy_sampler(id) {
                log::error!("failed to destroy sampler for {}: {error}", self.label);
            }
        }
    }

    fn describe(&self) -> String {
        format!("{} ({:?})", self.label, self.format)
    }
}
