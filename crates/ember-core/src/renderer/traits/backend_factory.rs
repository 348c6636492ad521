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

use crate::renderer::api::BackendKind;
use crate::renderer::error::SelectionError;
use crate::renderer::traits::RenderBackend;
use std::sync::Arc;

/// A factory for constructing concrete backend instances.
///
/// The selection *policy* (which kind to pick for a given configuration) is a
/// pure function in [`crate::renderer::selection`]; this trait covers only the
/// instantiation of the chosen kind. A concrete implementation lives in
/// `ember-infra`.
pub trait BackendFactory {
    /// Constructs a backend of the given kind.
    ///
    /// The null backend must always construct successfully; a process cannot
    /// proceed without at least that fallback.
    ///
    /// # Errors
    ///
    /// [`SelectionError::BackendUnavailable`] if the kind cannot be built on
    /// this platform.
    fn create(&self, kind: BackendKind) -> Result<Arc<dyn RenderBackend>, SelectionError>;
}
