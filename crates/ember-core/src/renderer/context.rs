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

//! The context bundling the active backend with its selection outputs.

use crate::renderer::api::{BackendKind, DeviceCapabilities, RenderSettings};
use crate::renderer::traits::RenderBackend;
use std::sync::Arc;

/// The active backend plus the read-only outputs of its selection.
///
/// Exactly one context exists per device lifetime. It is constructed by the
/// selection entry point and shared (`Arc`) with every resource whose
/// lifecycle hooks execute against the backend; there is no hidden global
/// handle.
#[derive(Debug)]
pub struct BackendContext {
    backend: Arc<dyn RenderBackend>,
    kind: BackendKind,
    capabilities: DeviceCapabilities,
    settings: RenderSettings,
}

impl BackendContext {
    /// Wraps a constructed backend, capturing its kind and capabilities.
    pub fn new(backend: Arc<dyn RenderBackend>, settings: RenderSettings) -> Self {
        let kind = backend.kind();
        let capabilities = backend.capabilities();
        Self {
            backend,
            kind,
            capabilities,
            settings,
        }
    }

    /// The active backend.
    pub fn backend(&self) -> &dyn RenderBackend {
        self.backend.as_ref()
    }

    /// The kind of the active backend.
    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    /// The capability flags fixed at selection time.
    pub fn capabilities(&self) -> &DeviceCapabilities {
        &self.capabilities
    }

    /// The global render settings the device was created with.
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Whether the active backend is the null backend.
    pub fn uses_null_backend(&self) -> bool {
        self.kind == BackendKind::Null
    }

    /// Whether the active backend is the tile-based backend.
    pub fn uses_tiled_backend(&self) -> bool {
        self.kind == BackendKind::Tiled
    }
}
