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

//! Configuration consumed once at backend-selection time.

use crate::renderer::api::common::DeviceCapabilities;
use std::fmt;
use std::sync::Arc;

/// A callback probing the runtime capabilities of the preferred backend tier.
///
/// Probing can be arbitrarily expensive (driver queries, device enumeration),
/// so it is invoked at most once per selection and only when the policy needs
/// its answer.
pub type CapabilityProbe = Arc<dyn Fn() -> DeviceCapabilities + Send + Sync>;

/// Configuration for backend selection.
///
/// The flags typically originate from process command-line switches or a
/// config file; this layer treats them purely as opaque booleans and performs
/// no parsing of its own.
#[derive(Clone)]
pub struct BackendConfig {
    /// Force the null backend regardless of any other flag.
    pub force_null: bool,
    /// The process is a headless server; implies the null backend.
    pub headless_server: bool,
    /// Force the baseline backend.
    pub force_baseline: bool,
    /// Force the advanced backend tier.
    pub force_advanced: bool,
    /// Allow the advanced tier when the capability probe supports it.
    pub allow_advanced: bool,
    /// The platform requests the tile-based backend.
    pub prefer_tiled: bool,
    /// The runtime capability probe for the advanced tier.
    pub probe: CapabilityProbe,
}

impl BackendConfig {
    /// Creates a config with every flag cleared and the given probe.
    pub fn with_probe(probe: CapabilityProbe) -> Self {
        Self {
            force_null: false,
            headless_server: false,
            force_baseline: false,
            force_advanced: false,
            allow_advanced: false,
            prefer_tiled: false,
            probe,
        }
    }
}

impl Default for BackendConfig {
    /// A default config: nothing forced, advanced tier allowed when probed,
    /// and a probe that reports no capabilities.
    fn default() -> Self {
        let mut config = Self::with_probe(Arc::new(|| DeviceCapabilities::NONE));
        config.allow_advanced = true;
        config
    }
}

impl fmt::Debug for BackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendConfig")
            .field("force_null", &self.force_null)
            .field("headless_server", &self.headless_server)
            .field("force_baseline", &self.force_baseline)
            .field("force_advanced", &self.force_advanced)
            .field("allow_advanced", &self.allow_advanced)
            .field("prefer_tiled", &self.prefer_tiled)
            .field("probe", &"<capability probe>")
            .finish()
    }
}
