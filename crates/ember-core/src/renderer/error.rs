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

//! Defines the hierarchy of error types for the rendering subsystem.

use crate::renderer::api::common::BackendKind;
use crate::renderer::api::texture::{SamplerId, TextureId};
use std::fmt;

/// An error raised while selecting or constructing a graphics backend.
///
/// Selection errors are configuration errors: they are fatal to the process,
/// surfaced with a descriptive message, and never retried.
#[derive(Debug)]
pub enum SelectionError {
    /// Two mutually-exclusive backend force flags were both set.
    ///
    /// The factory must never silently pick one of the two.
    ConflictingForceFlags,
    /// The selected backend kind could not be constructed.
    BackendUnavailable {
        /// The backend kind that failed to construct.
        kind: BackendKind,
        /// A human-readable reason from the factory.
        reason: String,
    },
}

impl fmt::Display for SelectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionError::ConflictingForceFlags => {
                write!(
                    f,
                    "both the baseline and the advanced backend were forced; \
                     the two force flags are mutually exclusive"
                )
            }
            SelectionError::BackendUnavailable { kind, reason } => {
                write!(f, "the {kind:?} backend could not be constructed: {reason}")
            }
        }
    }
}

impl std::error::Error for SelectionError {}

/// An error related to the creation or mutation of a backend resource.
#[derive(Debug)]
pub enum ResourceError {
    /// A texture was requested with a zero width or height.
    InvalidDimensions {
        /// The requested width in texels.
        width: u32,
        /// The requested height in texels.
        height: u32,
    },
    /// The referenced texture does not exist on this backend.
    TextureNotFound {
        /// The ID that failed to resolve.
        id: TextureId,
    },
    /// The referenced sampler does not exist on this backend.
    SamplerNotFound {
        /// The ID that failed to resolve.
        id: SamplerId,
    },
    /// A payload did not match the size the resource was created with.
    PayloadSizeMismatch {
        /// The number of bytes the resource expects.
        expected: usize,
        /// The number of bytes the caller supplied.
        actual: usize,
    },
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::InvalidDimensions { width, height } => {
                write!(f, "invalid texture dimensions {width}x{height}")
            }
            ResourceError::TextureNotFound { id } => {
                write!(f, "texture not found for ID: {id:?}")
            }
            ResourceError::SamplerNotFound { id } => {
                write!(f, "sampler not found for ID: {id:?}")
            }
            ResourceError::PayloadSizeMismatch { expected, actual } => {
                write!(
                    f,
                    "texel payload of {actual} bytes does not match the expected {expected} bytes"
                )
            }
        }
    }
}

impl std::error::Error for ResourceError {}
