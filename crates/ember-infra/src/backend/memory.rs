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

//! A CPU-resident reference backend.
//!
//! Resources live in id-keyed tables in host memory, with per-entry byte
//! accounting so memory statistics stay exact across create/destroy cycles.
//! The capability profile is fixed at construction from a [`FeatureTier`],
//! which is how one implementation stands in for the baseline, advanced, and
//! tile-based hardware tiers.

use ember_core::renderer::api::*;
use ember_core::renderer::error::ResourceError;
use ember_core::renderer::traits::RenderBackend;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Mutex;

/// The hardware tier a [`MemoryBackend`] emulates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureTier {
    /// The always-available baseline profile.
    Baseline,
    /// The advanced profile: depth sampling, vertex fetch, the full set.
    Advanced,
    /// The tile-based mobile profile.
    Tiled,
}

impl FeatureTier {
    /// The backend kind this tier reports.
    pub fn backend_kind(&self) -> BackendKind {
        match self {
            FeatureTier::Baseline => BackendKind::Baseline,
            FeatureTier::Advanced => BackendKind::Advanced,
            FeatureTier::Tiled => BackendKind::Tiled,
        }
    }

    /// The capability flags this tier reports.
    pub fn capabilities(&self) -> DeviceCapabilities {
        match self {
            FeatureTier::Baseline => DeviceCapabilities {
                fp_filtering: true,
                instancing: true,
                ..DeviceCapabilities::NONE
            },
            FeatureTier::Advanced => DeviceCapabilities {
                depth_textures: true,
                hardware_shadow_compare: true,
                fetch4: true,
                vertex_texture_fetch: true,
                fp_filtering: true,
                instancing: true,
            },
            FeatureTier::Tiled => DeviceCapabilities {
                depth_textures: true,
                hardware_shadow_compare: true,
                ..DeviceCapabilities::NONE
            },
        }
    }
}

#[derive(Debug)]
struct TextureEntry {
    data: Vec<u8>,
    // Tracked separately so accounting survives content rewrites.
    size_bytes: u64,
}

#[derive(Debug)]
#[allow(dead_code)]
struct SamplerEntry {
    descriptor: SamplerDescriptor,
}

/// The in-memory reference backend.
#[derive(Debug)]
pub struct MemoryBackend {
    tier: FeatureTier,
    textures: Mutex<HashMap<TextureId, TextureEntry>>,
    samplers: Mutex<HashMap<SamplerId, SamplerEntry>>,
    next_texture_id: AtomicUsize,
    next_sampler_id: AtomicUsize,
    allocated_bytes: AtomicU64,
}

impl MemoryBackend {
    /// Creates a reference backend emulating the given tier.
    pub fn new(tier: FeatureTier) -> Self {
        Self {
            tier,
            textures: Mutex::new(HashMap::new()),
            samplers: Mutex::new(HashMap::new()),
            next_texture_id: AtomicUsize::new(1),
            next_sampler_id: AtomicUsize::new(1),
            allocated_bytes: AtomicU64::new(0),
        }
    }

    /// Reads back the current content of a texture, for tests and tooling.
    pub fn texture_data(&self, id: TextureId) -> Option<Vec<u8>> {
        self.textures
            .lock()
            .unwrap()
            .get(&id)
            .map(|entry| entry.data.clone())
    }
}

impl RenderBackend for MemoryBackend {
    fn kind(&self) -> BackendKind {
        self.tier.backend_kind()
    }

    fn capabilities(&self) -> DeviceCapabilities {
        self.tier.capabilities()
    }

    fn adapter_info(&self) -> AdapterInfo {
        AdapterInfo {
            name: format!("ember reference rasterizer ({:?} tier)", self.tier),
            kind: self.tier.backend_kind(),
        }
    }

    fn create_texture_2d(
        &self,
        descriptor: &TextureDescriptor,
    ) -> Result<TextureId, ResourceError> {
        if descriptor.width == 0 || descriptor.height == 0 {
            return Err(ResourceError::InvalidDimensions {
                width: descriptor.width,
                height: descriptor.height,
            });
        }
        let size_bytes = descriptor.base_mip_bytes() as u64;
        let id = TextureId(self.next_texture_id.fetch_add(1, Ordering::SeqCst));
        self.textures.lock().unwrap().insert(
            id,
            TextureEntry {
                data: vec![0; size_bytes as usize],
                size_bytes,
            },
        );
        self.allocated_bytes.fetch_add(size_bytes, Ordering::SeqCst);
        log::trace!(
            "allocated texture {} ({}x{}, {size_bytes} bytes)",
            id.0,
            descriptor.width,
            descriptor.height
        );
        Ok(id)
    }

    fn destroy_texture(&self, id: TextureId) -> Result<(), ResourceError> {
        match self.textures.lock().unwrap().remove(&id) {
            Some(entry) => {
                self.allocated_bytes
                    .fetch_sub(entry.size_bytes, Ordering::SeqCst);
                Ok(())
            }
            None => Err(ResourceError::TextureNotFound { id }),
        }
    }

    fn write_texture(&self, id: TextureId, data: &[u8]) -> Result<(), ResourceError> {
        let mut textures = self.textures.lock().unwrap();
        let entry = textures
            .get_mut(&id)
            .ok_or(ResourceError::TextureNotFound { id })?;
        if data.len() != entry.data.len() {
            return Err(ResourceError::PayloadSizeMismatch {
                expected: entry.data.len(),
                actual: data.len(),
            });
        }
        entry.data.copy_from_slice(data);
        Ok(())
    }

    fn create_sampler(&self, descriptor: &SamplerDescriptor) -> Result<SamplerId, ResourceError> {
        let id = SamplerId(self.next_sampler_id.fetch_add(1, Ordering::SeqCst));
        self.samplers.lock().unwrap().insert(
            id,
            SamplerEntry {
                descriptor: descriptor.clone(),
            },
        );
        Ok(id)
    }

    fn destroy_sampler(&self, id: SamplerId) -> Result<(), ResourceError> {
        match self.samplers.lock().unwrap().remove(&id) {
            Some(_) => Ok(()),
            None => Err(ResourceError::SamplerNotFound { id }),
        }
    }

    fn texture_memory_stats(&self) -> TextureMemoryStats {
        TextureMemoryStats {
            allocated_bytes: self.allocated_bytes.load(Ordering::SeqCst),
            texture_count: self.textures.lock().unwrap().len() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba_descriptor(width: u32, height: u32) -> TextureDescriptor {
        TextureDescriptor {
            label: None,
            width,
            height,
            format: PixelFormat::Rgba8Unorm,
            mip_count: 1,
            flags: TextureCreateFlags::EMPTY,
        }
    }

    #[test]
    fn accounting_follows_create_and_destroy() {
        let backend = MemoryBackend::new(FeatureTier::Baseline);
        let a = backend.create_texture_2d(&rgba_descriptor(8, 8)).unwrap();
        let b = backend.create_texture_2d(&rgba_descriptor(4, 4)).unwrap();

        let stats = backend.texture_memory_stats();
        assert_eq!(stats.texture_count, 2);
        assert_eq!(stats.allocated_bytes, (8 * 8 + 4 * 4) * 4);

        backend.destroy_texture(a).unwrap();
        let stats = backend.texture_memory_stats();
        assert_eq!(stats.texture_count, 1);
        assert_eq!(stats.allocated_bytes, 4 * 4 * 4);

        backend.destroy_texture(b).unwrap();
        assert_eq!(backend.texture_memory_stats(), TextureMemoryStats::default());
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let backend = MemoryBackend::new(FeatureTier::Baseline);
        assert!(matches!(
            backend.create_texture_2d(&rgba_descriptor(0, 8)),
            Err(ResourceError::InvalidDimensions { width: 0, height: 8 })
        ));
    }

    #[test]
    fn writes_round_trip_and_validate_payload_size() {
        let backend = MemoryBackend::new(FeatureTier::Advanced);
        let id = backend.create_texture_2d(&rgba_descriptor(2, 1)).unwrap();

        let texels = [1u8, 2, 3, 4, 5, 6, 7, 8];
        backend.write_texture(id, &texels).unwrap();
        assert_eq!(backend.texture_data(id).unwrap(), texels);

        assert!(matches!(
            backend.write_texture(id, &[0u8; 3]),
            Err(ResourceError::PayloadSizeMismatch {
                expected: 8,
                actual: 3
            })
        ));
    }

    #[test]
    fn stale_ids_are_reported() {
        let backend = MemoryBackend::new(FeatureTier::Baseline);
        let id = backend.create_texture_2d(&rgba_descriptor(2, 2)).unwrap();
        backend.destroy_texture(id).unwrap();

        assert!(matches!(
            backend.destroy_texture(id),
            Err(ResourceError::TextureNotFound { .. })
        ));
        assert!(matches!(
            backend.write_texture(id, &[0u8; 16]),
            Err(ResourceError::TextureNotFound { .. })
        ));
    }

    #[test]
    fn tiers_report_their_capability_profiles() {
        assert!(!FeatureTier::Baseline
            .capabilities()
            .supports_advanced_tier());
        assert!(FeatureTier::Advanced.capabilities().supports_advanced_tier());

        let tiled = FeatureTier::Tiled.capabilities();
        assert!(tiled.depth_textures);
        assert!(!tiled.supports_advanced_tier());

        assert_eq!(
            MemoryBackend::new(FeatureTier::Tiled).kind(),
            BackendKind::Tiled
        );
    }

    #[test]
    fn samplers_are_tracked_by_id() {
        let backend = MemoryBackend::new(FeatureTier::Baseline);
        let descriptor = SamplerDescriptor {
            label: None,
            address_u: AddressMode::Repeat,
            address_v: AddressMode::Repeat,
            address_w: AddressMode::Repeat,
            filter: FilterMode::Linear,
        };
        let id = backend.create_sampler(&descriptor).unwrap();
        backend.destroy_sampler(id).unwrap();
        assert!(matches!(
            backend.destroy_sampler(id),
            Err(ResourceError::SamplerNotFound { .. })
        ));
    }
}
