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

//! Global settings for the rendering system.

use crate::renderer::api::texture::FilterMode;

/// A collection of global settings that affect resource creation.
#[derive(Debug, Clone)]
pub struct RenderSettings {
    /// The filter mode applied to samplers built from level-of-detail settings.
    pub texture_filter: FilterMode,
    /// If `true`, sRGB texture creation is suppressed to emulate platforms
    /// with constrained render formats.
    pub emulate_constrained_rendering: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            texture_filter: FilterMode::Linear,
            emulate_constrained_rendering: false,
        }
    }
}
