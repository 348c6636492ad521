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

//! Provides common, backend-agnostic enums and data structures for the rendering API.

/// The abstract kind of a render backend.
///
/// Exactly one backend is active per device lifetime; the kind is fixed at
/// selection time and never changes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    /// A backend on which every operation trivially succeeds and no real
    /// resources are created. Used for headless servers and offline tooling.
    Null,
    /// The baseline backend that is available on every supported platform.
    Baseline,
    /// The preferred backend tier, requiring a successful capability probe.
    Advanced,
    /// The tile-based backend used on mobile-class platforms.
    Tiled,
}

/// The feature capabilities reported by a backend or a runtime probe.
///
/// These are read-only outputs of backend selection; renderer policy reads
/// them but never writes them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceCapabilities {
    /// Depth-stencil textures can be created and sampled.
    pub depth_textures: bool,
    /// Sampling a depth texture yields hardware shadow-comparison values.
    pub hardware_shadow_compare: bool,
    /// A single depth lookup retrieves four neighboring texels.
    pub fetch4: bool,
    /// Textures can be fetched from the vertex stage.
    pub vertex_texture_fetch: bool,
    /// Floating-point texture formats support filtering.
    pub fp_filtering: bool,
    /// The backend supports hardware vertex instancing.
    pub instancing: bool,
}

impl DeviceCapabilities {
    /// A capability set with every feature disabled.
    pub const NONE: Self = Self {
        depth_textures: false,
        hardware_shadow_compare: false,
        fetch4: false,
        vertex_texture_fetch: false,
        fp_filtering: false,
        instancing: false,
    };

    /// Whether these capabilities satisfy the requirements of the advanced
    /// backend tier (depth sampling plus vertex texture fetch).
    pub const fn supports_advanced_tier(&self) -> bool {
        self.depth_textures && self.vertex_texture_fetch
    }
}

/// Defines the memory format of texels in a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// One 8-bit unsigned normalized component.
    R8Unorm,
    /// Two 8-bit unsigned normalized components.
    Rg8Unorm,
    /// Four 8-bit unsigned normalized components (RGBA).
    Rgba8Unorm,
    /// Four 8-bit unsigned normalized components (RGBA) in the sRGB color space.
    Rgba8UnormSrgb,
    /// Four 8-bit unsigned normalized components (BGRA). A common swapchain format.
    Bgra8Unorm,
    /// Four 8-bit unsigned normalized components (BGRA) in the sRGB color space.
    Bgra8UnormSrgb,
    /// Four 16-bit float components.
    Rgba16Float,
    /// One 32-bit float component.
    R32Float,
    /// A 24-bit unsigned normalized depth format with an 8-bit stencil component.
    Depth24Stencil8,
}

impl PixelFormat {
    /// Returns the size in bytes of a single texel for this format.
    pub const fn bytes_per_texel(&self) -> u32 {
        match self {
            PixelFormat::R8Unorm => 1,
            PixelFormat::Rg8Unorm => 2,
            PixelFormat::Rgba8Unorm => 4,
            PixelFormat::Rgba8UnormSrgb => 4,
            PixelFormat::Bgra8Unorm => 4,
            PixelFormat::Bgra8UnormSrgb => 4,
            PixelFormat::Rgba16Float => 8,
            PixelFormat::R32Float => 4,
            PixelFormat::Depth24Stencil8 => 4,
        }
    }

    /// Whether the format carries sRGB gamma semantics.
    pub const fn is_srgb(&self) -> bool {
        matches!(
            self,
            PixelFormat::Rgba8UnormSrgb | PixelFormat::Bgra8UnormSrgb
        )
    }

    /// Whether the format is a depth or depth-stencil format.
    pub const fn is_depth(&self) -> bool {
        matches!(self, PixelFormat::Depth24Stencil8)
    }

    /// Whether the format must be laid out linearly (cannot use a tiled
    /// memory layout on backends that tile by default).
    pub const fn requires_linear_layout(&self) -> bool {
        matches!(self, PixelFormat::Rgba16Float | PixelFormat::R32Float)
    }
}

/// Provides standardized, backend-agnostic information about the active backend.
#[derive(Debug, Clone)]
pub struct AdapterInfo {
    /// The name of the adapter or implementation (e.g. "ember reference rasterizer").
    pub name: String,
    /// The backend kind this adapter belongs to.
    pub kind: BackendKind,
}

/// A snapshot of the texture memory a backend has allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextureMemoryStats {
    /// Bytes currently allocated to live textures.
    pub allocated_bytes: u64,
    /// Number of live texture objects.
    pub texture_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_per_texel_matches_format_width() {
        assert_eq!(PixelFormat::R8Unorm.bytes_per_texel(), 1);
        assert_eq!(PixelFormat::Rgba8UnormSrgb.bytes_per_texel(), 4);
        assert_eq!(PixelFormat::Rgba16Float.bytes_per_texel(), 8);
    }

    #[test]
    fn srgb_classification() {
        assert!(PixelFormat::Rgba8UnormSrgb.is_srgb());
        assert!(PixelFormat::Bgra8UnormSrgb.is_srgb());
        assert!(!PixelFormat::Rgba8Unorm.is_srgb());
        assert!(!PixelFormat::R32Float.is_srgb());
    }

    #[test]
    fn float_formats_require_linear_layout() {
        assert!(PixelFormat::Rgba16Float.requires_linear_layout());
        assert!(PixelFormat::R32Float.requires_linear_layout());
        assert!(!PixelFormat::Rgba8Unorm.requires_linear_layout());
    }

    #[test]
    fn advanced_tier_requires_depth_and_vertex_fetch() {
        let mut caps = DeviceCapabilities::NONE;
        assert!(!caps.supports_advanced_tier());
        caps.depth_textures = true;
        assert!(!caps.supports_advanced_tier());
        caps.vertex_texture_fetch = true;
        assert!(caps.supports_advanced_tier());
    }
}
