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

use crate::renderer::api::*;
use crate::renderer::error::ResourceError;
use std::fmt::Debug;

/// The abstraction boundary over a concrete native graphics API.
///
/// Exactly one backend instance is active per device lifetime. All methods
/// are called from the device-owning thread only; implementations do not need
/// to support concurrent mutation, though they must be `Send + Sync` so the
/// instance can be shared with executing resources.
pub trait RenderBackend: Send + Sync + Debug + 'static {
    /// The abstract kind of this backend.
    fn kind(&self) -> BackendKind;

    /// The feature capabilities this backend was constructed with.
    ///
    /// These become the read-only capability flags of the device context.
    fn capabilities(&self) -> DeviceCapabilities;

    /// Standardized information about the backing implementation.
    fn adapter_info(&self) -> AdapterInfo;

    /// Creates a 2D texture.
    /// ## Arguments
    /// * `descriptor` - The dimensions, format, and creation flags of the texture.
    /// ## Returns
    /// The ID of the created texture.
    /// ## Errors
    /// * `ResourceError` - If the descriptor is invalid.
    fn create_texture_2d(&self, descriptor: &TextureDescriptor)
        -> Result<TextureId, ResourceError>;

    /// Destroys a texture.
    /// ## Errors
    /// * `ResourceError` - If the ID does not refer to a live texture.
    fn destroy_texture(&self, id: TextureId) -> Result<(), ResourceError>;

    /// Writes texel data into the base mip level of a texture.
    /// ## Arguments
    /// * `id` - The texture to write to.
    /// * `data` - One full copy of the base mip level.
    /// ## Errors
    /// * `ResourceError` - If the ID is stale or the payload size is wrong.
    fn write_texture(&self, id: TextureId, data: &[u8]) -> Result<(), ResourceError>;

    /// Creates a sampler.
    fn create_sampler(&self, descriptor: &SamplerDescriptor) -> Result<SamplerId, ResourceError>;

    /// Destroys a sampler.
    /// ## Errors
    /// * `ResourceError` - If the ID does not refer to a live sampler.
    fn destroy_sampler(&self, id: SamplerId) -> Result<(), ResourceError>;

    /// Retrieves texture memory statistics for this backend.
    fn texture_memory_stats(&self) -> TextureMemoryStats;
}
