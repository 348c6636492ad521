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

//! Defines data structures related to backend texture and sampler resources.

use crate::ember_bitflags;
use crate::renderer::api::common::PixelFormat;

/// Defines how texture coordinates are handled when sampling outside the `[0, 1]` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressMode {
    /// Coordinates wrap around. `1.1` becomes `0.1`.
    Repeat,
    /// Coordinates are clamped to the edge. `1.1` becomes `1.0`.
    ClampToEdge,
    /// Coordinates wrap around, mirroring at each integer boundary.
    MirrorRepeat,
}

/// Defines the filtering mode for texture sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterMode {
    /// Point sampling. Returns the value of the nearest texel.
    Nearest,
    /// Linear interpolation between the four nearest texels.
    Linear,
    /// Linear interpolation with anisotropic refinement.
    AnisotropicLinear,
}

ember_bitflags! {
    /// A set of flags describing how a texture must be created.
    pub struct TextureCreateFlags: u32 {
        /// Texture is encoded in sRGB gamma space.
        const SRGB = 1 << 0;
        /// Texture can be used as a resolve target.
        const RESOLVE_TARGET = 1 << 1;
        /// Texture is a depth-stencil format that can be sampled.
        const DEPTH_STENCIL = 1 << 2;
        /// Texture will be created without a packed mip tail.
        const NO_MIP_TAIL = 1 << 3;
        /// Texture will be created with an un-tiled memory layout.
        const NO_TILING = 1 << 4;
        /// Texture will only be written to or resolved once.
        const WRITE_ONCE = 1 << 5;
    }
}

/// A descriptor used to create a 2D texture through a render backend.
#[derive(Debug, Clone)]
pub struct TextureDescriptor {
    /// An optional debug label.
    pub label: Option<String>,
    /// The width of the texture in texels. Must be strictly positive.
    pub width: u32,
    /// The height of the texture in texels. Must be strictly positive.
    pub height: u32,
    /// The format of the texels in the texture.
    pub format: PixelFormat,
    /// The number of mip levels, or 1 for an unmipped texture.
    pub mip_count: u32,
    /// Creation flags derived from the logical request.
    pub flags: TextureCreateFlags,
}

impl TextureDescriptor {
    /// The number of bytes one full copy of the base mip level occupies.
    pub fn base_mip_bytes(&self) -> usize {
        self.width as usize * self.height as usize * self.format.bytes_per_texel() as usize
    }
}

/// A descriptor used to create a sampler through a render backend.
#[derive(Debug, Clone)]
pub struct SamplerDescriptor {
    /// An optional debug label.
    pub label: Option<String>,
    /// The address mode for the U texture coordinate.
    pub address_u: AddressMode,
    /// The address mode for the V texture coordinate.
    pub address_v: AddressMode,
    /// The address mode for the W texture coordinate.
    pub address_w: AddressMode,
    /// The filter mode for minification and magnification.
    pub filter: FilterMode,
}

/// An opaque handle to a backend texture resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub usize);

/// An opaque handle to a backend sampler resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SamplerId(pub usize);
