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

//! The null backend: every operation succeeds trivially and no resources are
//! actually created. Used by headless server processes and automated or
//! offline tooling that must run the full resource lifecycle without a GPU.

use ember_core::renderer::api::*;
use ember_core::renderer::error::ResourceError;
use ember_core::renderer::traits::RenderBackend;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A backend that accepts every request and stores nothing.
///
/// IDs are still handed out uniquely so callers can exercise their own
/// bookkeeping against it.
#[derive(Debug, Default)]
pub struct NullBackend {
    next_texture_id: AtomicUsize,
    next_sampler_id: AtomicUsize,
}

impl NullBackend {
    /// Creates a null backend. This constructor can never fail; the null
    /// backend is the fallback of last resort.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderBackend for NullBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Null
    }

    fn capabilities(&self) -> DeviceCapabilities {
        DeviceCapabilities::NONE
    }

    fn adapter_info(&self) -> AdapterInfo {
        AdapterInfo {
            name: "ember null backend".to_string(),
            kind: BackendKind::Null,
        }
    }

    fn create_texture_2d(
        &self,
        _descriptor: &TextureDescriptor,
    ) -> Result<TextureId, ResourceError> {
        Ok(TextureId(self.next_texture_id.fetch_add(1, Ordering::SeqCst)))
    }

    fn destroy_texture(&self, _id: TextureId) -> Result<(), ResourceError> {
        Ok(())
    }

    fn write_texture(&self, _id: TextureId, _data: &[u8]) -> Result<(), ResourceError> {
        Ok(())
    }

    fn create_sampler(&self, _descriptor: &SamplerDescriptor) -> Result<SamplerId, ResourceError> {
        Ok(SamplerId(self.next_sampler_id.fetch_add(1, Ordering::SeqCst)))
    }

    fn destroy_sampler(&self, _id: SamplerId) -> Result<(), ResourceError> {
        Ok(())
    }

    fn texture_memory_stats(&self) -> TextureMemoryStats {
        TextureMemoryStats::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_operation_trivially_succeeds() {
        let backend = NullBackend::new();
        let descriptor = TextureDescriptor {
            label: None,
            width: 16,
            height: 16,
            format: PixelFormat::Rgba8Unorm,
            mip_count: 1,
            flags: TextureCreateFlags::EMPTY,
        };

        let first = backend.create_texture_2d(&descriptor).unwrap();
        let second = backend.create_texture_2d(&descriptor).unwrap();
        assert_ne!(first, second);

        backend.write_texture(first, &[0u8; 4]).unwrap();
        backend.destroy_texture(first).unwrap();
        // Destroying twice is still fine: nothing is tracked.
        backend.destroy_texture(first).unwrap();

        assert_eq!(backend.texture_memory_stats(), TextureMemoryStats::default());
    }
}
