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

//! Self-contained test doubles shared by the resource-module tests.

use crate::renderer::api::*;
use crate::renderer::error::{ResourceError, SelectionError};
use crate::renderer::traits::{BackendFactory, RenderBackend};
use crate::renderer::BackendContext;
use crate::resource::handle::{AnyResourceCell, GpuResource, LifecycleState};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A resource that records every lifecycle hook invocation into a shared log.
pub(crate) struct ProbeResource {
    name: String,
    events: Arc<Mutex<Vec<String>>>,
}

impl ProbeResource {
    pub(crate) fn new(name: impl Into<String>, events: &Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            name: name.into(),
            events: events.clone(),
        }
    }

    pub(crate) fn event_log() -> Arc<Mutex<Vec<String>>> {
        Arc::new(Mutex::new(Vec::new()))
    }

    fn record(&self, hook: &str) {
        self.events.lock().unwrap().push(format!("{}:{hook}", self.name));
    }
}

impl GpuResource for ProbeResource {
    fn init_shared_state(&mut self, _context: &BackendContext) {
        self.record("init_shared");
    }

    fn init_backend_state(&mut self, _context: &BackendContext) {
        self.record("init_backend");
    }

    fn release_backend_state(&mut self, _context: &BackendContext) {
        self.record("release_backend");
    }

    fn release_shared_state(&mut self, _context: &BackendContext) {
        self.record("release_shared");
    }

    fn describe(&self) -> String {
        format!("probe resource '{}'", self.name)
    }
}

/// A bare erased cell for registry and deferred-set tests.
#[derive(Default)]
pub(crate) struct StubCell {
    lifecycle: LifecycleState,
}

impl AnyResourceCell for StubCell {
    fn lifecycle(&self) -> &LifecycleState {
        &self.lifecycle
    }

    fn init_state(&self, _context: &BackendContext) {}

    fn release_state(&self, _context: &BackendContext) {}

    fn describe(&self) -> String {
        "stub cell".to_string()
    }
}

/// A backend that hands out IDs and records every operation it was asked for.
#[derive(Debug)]
pub(crate) struct RecordingBackend {
    kind: BackendKind,
    pub(crate) ops: Mutex<Vec<String>>,
    next_texture: AtomicUsize,
    next_sampler: AtomicUsize,
}

impl RecordingBackend {
    pub(crate) fn new(kind: BackendKind) -> Self {
        Self {
            kind,
            ops: Mutex::new(Vec::new()),
            next_texture: AtomicUsize::new(1),
            next_sampler: AtomicUsize::new(1),
        }
    }

    fn record(&self, op: String) {
        self.ops.lock().unwrap().push(op);
    }
}

impl RenderBackend for RecordingBackend {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn capabilities(&self) -> DeviceCapabilities {
        DeviceCapabilities::NONE
    }

    fn adapter_info(&self) -> AdapterInfo {
        AdapterInfo {
            name: "recording backend".to_string(),
            kind: self.kind,
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
        let id = TextureId(self.next_texture.fetch_add(1, Ordering::SeqCst));
        self.record(format!(
            "create_texture {}x{} {:?}",
            descriptor.width, descriptor.height, descriptor.flags
        ));
        Ok(id)
    }

    fn destroy_texture(&self, id: TextureId) -> Result<(), ResourceError> {
        self.record(format!("destroy_texture {}", id.0));
        Ok(())
    }

    fn write_texture(&self, id: TextureId, data: &[u8]) -> Result<(), ResourceError> {
        self.record(format!("write_texture {} ({} bytes)", id.0, data.len()));
        Ok(())
    }

    fn create_sampler(&self, descriptor: &SamplerDescriptor) -> Result<SamplerId, ResourceError> {
        let id = SamplerId(self.next_sampler.fetch_add(1, Ordering::SeqCst));
        self.record(format!("create_sampler {:?}", descriptor.filter));
        Ok(id)
    }

    fn destroy_sampler(&self, id: SamplerId) -> Result<(), ResourceError> {
        self.record(format!("destroy_sampler {}", id.0));
        Ok(())
    }

    fn texture_memory_stats(&self) -> TextureMemoryStats {
        TextureMemoryStats::default()
    }
}

/// A factory producing [`RecordingBackend`]s of whatever kind is asked for.
pub(crate) struct RecordingFactory {
    pub(crate) last_backend: Mutex<Option<Arc<RecordingBackend>>>,
}

impl RecordingFactory {
    pub(crate) fn new() -> Self {
        Self {
            last_backend: Mutex::new(None),
        }
    }
}

impl BackendFactory for RecordingFactory {
    fn create(&self, kind: BackendKind) -> Result<Arc<dyn RenderBackend>, SelectionError> {
        let backend = Arc::new(RecordingBackend::new(kind));
        *self.last_backend.lock().unwrap() = Some(backend.clone());
        Ok(backend)
    }
}
