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

//! The standard factory mapping selected backend kinds to concrete instances.

use crate::backend::memory::{FeatureTier, MemoryBackend};
use crate::backend::null::NullBackend;
use ember_core::renderer::api::BackendKind;
use ember_core::renderer::error::SelectionError;
use ember_core::renderer::traits::{BackendFactory, RenderBackend};
use std::sync::Arc;

/// The default in-tree backend factory.
///
/// The null kind maps to [`NullBackend`]; the three hardware tiers map to
/// [`MemoryBackend`] instances with the matching capability profile. Hosts
/// with real graphics-API backends supply their own [`BackendFactory`]
/// instead.
#[derive(Debug, Default)]
pub struct StandardBackendFactory;

impl StandardBackendFactory {
    /// Creates the standard factory.
    pub fn new() -> Self {
        Self
    }
}

impl BackendFactory for StandardBackendFactory {
    fn create(&self, kind: BackendKind) -> Result<Arc<dyn RenderBackend>, SelectionError> {
        log::debug!("constructing {kind:?} backend");
        match kind {
            BackendKind::Null => Ok(Arc::new(NullBackend::new())),
            BackendKind::Baseline => Ok(Arc::new(MemoryBackend::new(FeatureTier::Baseline))),
            BackendKind::Advanced => Ok(Arc::new(MemoryBackend::new(FeatureTier::Advanced))),
            BackendKind::Tiled => Ok(Arc::new(MemoryBackend::new(FeatureTier::Tiled))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::renderer::api::{
        BackendConfig, DeviceCapabilities, PixelFormat, RenderSettings,
    };
    use ember_core::renderer::selection::select_and_create;
    use ember_core::resource::{DynamicTexture2D, RenderDevice};
    use std::sync::Arc as StdArc;

    fn config_probing(tier: FeatureTier) -> BackendConfig {
        BackendConfig::with_probe(StdArc::new(move || tier.capabilities()))
    }

    #[test]
    fn every_kind_constructs() {
        let factory = StandardBackendFactory::new();
        for kind in [
            BackendKind::Null,
            BackendKind::Baseline,
            BackendKind::Advanced,
            BackendKind::Tiled,
        ] {
            let backend = factory.create(kind).unwrap();
            assert_eq!(backend.kind(), kind);
        }
    }

    #[test]
    fn forced_null_yields_the_null_backend_regardless_of_other_flags() {
        let mut config = config_probing(FeatureTier::Advanced);
        config.force_null = true;
        config.force_advanced = true;
        config.allow_advanced = true;

        let context = select_and_create(
            &StandardBackendFactory::new(),
            &config,
            RenderSettings::default(),
        )
        .unwrap();
        assert!(context.uses_null_backend());
        assert_eq!(*context.capabilities(), DeviceCapabilities::NONE);
    }

    #[test]
    fn conflicting_force_flags_never_pick_a_backend() {
        let mut config = config_probing(FeatureTier::Advanced);
        config.force_baseline = true;
        config.force_advanced = true;

        let result = select_and_create(
            &StandardBackendFactory::new(),
            &config,
            RenderSettings::default(),
        );
        assert!(matches!(result, Err(SelectionError::ConflictingForceFlags)));
    }

    #[test]
    fn capability_flags_flow_from_the_selected_tier() {
        let mut config = config_probing(FeatureTier::Advanced);
        config.allow_advanced = true;

        let context = select_and_create(
            &StandardBackendFactory::new(),
            &config,
            RenderSettings::default(),
        )
        .unwrap();
        assert_eq!(context.kind(), BackendKind::Advanced);
        assert!(context.capabilities().supports_advanced_tier());
        assert!(context.capabilities().hardware_shadow_compare);
    }

    #[test]
    fn baseline_probe_degrades_a_forced_advanced_request() {
        let mut config = config_probing(FeatureTier::Baseline);
        config.force_advanced = true;

        let context = select_and_create(
            &StandardBackendFactory::new(),
            &config,
            RenderSettings::default(),
        )
        .unwrap();
        assert_eq!(context.kind(), BackendKind::Baseline);
    }

    #[test]
    fn dynamic_texture_reaches_the_reference_backend_end_to_end() {
        let mut device = RenderDevice::new(RenderSettings::default());
        device
            .init(&StandardBackendFactory::new(), &config_probing(FeatureTier::Baseline))
            .unwrap();
        let queue = device.queue();

        let handle = DynamicTexture2D::create(&queue, 64, 64, PixelFormat::Rgba8Unorm, false)
            .expect("valid dimensions");
        handle.lock().set_texels(&vec![0xA5u8; 64 * 64 * 4]);
        device.drain();

        assert!(handle.is_initialized());
        assert_eq!(handle.lock().width(), 64);
        assert_eq!(handle.lock().height(), 64);

        let context = device.context().unwrap().clone();
        let stats = context.backend().texture_memory_stats();
        assert_eq!(stats.texture_count, 1);
        assert_eq!(stats.allocated_bytes, 64 * 64 * 4);

        let generation = {
            let queue = queue.clone();
            let flush_handle = handle.clone();
            let producer = std::thread::spawn(move || queue.release_and_flush(&flush_handle));
            while !producer.is_finished() {
                device.pump(std::time::Duration::from_millis(5));
            }
            producer.join().unwrap()
        };
        assert!(generation >= 2);
        assert!(!handle.is_initialized());
        assert_eq!(context.backend().texture_memory_stats().texture_count, 0);

        device.shutdown();
    }

    #[test]
    fn invalid_texture_requests_never_reach_the_backend() {
        let mut device = RenderDevice::new(RenderSettings::default());
        device
            .init(&StandardBackendFactory::new(), &config_probing(FeatureTier::Baseline))
            .unwrap();
        let queue = device.queue();

        assert!(DynamicTexture2D::create(&queue, 0, 0, PixelFormat::Rgba8Unorm, false).is_none());
        assert_eq!(device.drain(), 0);

        let stats = device.context().unwrap().backend().texture_memory_stats();
        assert_eq!(stats.texture_count, 0);
    }
}
