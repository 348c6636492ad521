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

//! The render-resource lifecycle: handles, the deferred command queue, the
//! device-side executor, and the per-frame deferred-update registry.
//!
//! A resource's logical construction can happen on any thread; its
//! backend-resident state is created, refreshed, and torn down only on the
//! single thread that owns the [`RenderDevice`]. Producers drive those
//! transitions through the [`RenderQueue`], never directly.

mod deferred;
mod device;
mod handle;
mod queue;
mod registry;
mod texture;

#[cfg(test)]
pub(crate) mod testing;

pub use self::device::RenderDevice;
pub use self::handle::{GpuResource, ResourceHandle};
pub use self::queue::RenderQueue;
pub use self::texture::DynamicTexture2D;
