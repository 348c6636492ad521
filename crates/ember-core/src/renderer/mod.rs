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

//! Provides the public, backend-agnostic rendering contracts.
//!
//! This module defines the "common language" for backend interaction. It
//! contains the abstract traits (like [`RenderBackend`]), data structures
//! (like [`TextureDescriptor`](api::TextureDescriptor)), the selection policy,
//! and the error types that form the stable, public-facing API.
//!
//! The 'what' is defined here; the 'how' is handled by a concrete backend
//! implementation in the `ember-infra` crate which implements these traits.
//! The resource lifecycle in [`crate::resource`] then drives the traits
//! without knowing the specifics of the underlying graphics API.

pub mod api;
pub mod context;
pub mod error;
pub mod selection;
pub mod traits;

// Re-export the most important traits and types for easier use.
pub use self::api::*;
pub use self::context::BackendContext;
pub use self::error::{ResourceError, SelectionError};
pub use self::selection::{resolve_backend_kind, select_and_create};
pub use self::traits::{BackendFactory, RenderBackend};
