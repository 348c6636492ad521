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

//! Backend selection: the policy mapping a configuration to a backend kind,
//! and the combined select-and-construct entry point.

use crate::renderer::api::{BackendConfig, BackendKind, RenderSettings};
use crate::renderer::context::BackendContext;
use crate::renderer::error::SelectionError;
use crate::renderer::traits::BackendFactory;

/// Resolves which backend kind a configuration selects.
///
/// The policy, in priority order:
/// 1. A forced null backend or a headless server process selects [`BackendKind::Null`].
/// 2. Forcing both concrete backends at once is a configuration error.
/// 3. A tile-based platform request selects [`BackendKind::Tiled`].
/// 4. A forced baseline selects [`BackendKind::Baseline`] without probing.
/// 5. If the capability probe supports the advanced tier and the tier is
///    forced or allowed, select [`BackendKind::Advanced`]. A forced advanced
///    tier that the probe rejects degrades to the baseline with a warning
///    rather than failing.
/// 6. Otherwise, the baseline.
///
/// # Errors
///
/// [`SelectionError::ConflictingForceFlags`] when both concrete force flags
/// are set; this is never resolved silently in favor of either.
pub fn resolve_backend_kind(config: &BackendConfig) -> Result<BackendKind, SelectionError> {
    if config.force_null || config.headless_server {
        return Ok(BackendKind::Null);
    }
    if config.force_baseline && config.force_advanced {
        return Err(SelectionError::ConflictingForceFlags);
    }
    if config.prefer_tiled {
        return Ok(BackendKind::Tiled);
    }
    if config.force_baseline {
        return Ok(BackendKind::Baseline);
    }

    let probed = (config.probe)();
    if probed.supports_advanced_tier() {
        if config.force_advanced || config.allow_advanced {
            return Ok(BackendKind::Advanced);
        }
    } else if config.force_advanced {
        log::warn!(
            "the advanced backend was forced but the capability probe reports it unsupported; \
             falling back to the baseline backend"
        );
    }
    Ok(BackendKind::Baseline)
}

/// Resolves the backend kind for `config`, constructs it through `factory`,
/// and wraps it in a ready [`BackendContext`].
///
/// # Errors
///
/// Any [`SelectionError`] from the policy or the factory. Selection errors
/// are fatal to the caller; a process cannot proceed without a backend.
pub fn select_and_create(
    factory: &dyn BackendFactory,
    config: &BackendConfig,
    settings: RenderSettings,
) -> Result<BackendContext, SelectionError> {
    let kind = resolve_backend_kind(config)?;
    let backend = factory.create(kind)?;
    log::info!(
        "selected {:?} render backend ({})",
        kind,
        backend.adapter_info().name
    );
    Ok(BackendContext::new(backend, settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::api::{CapabilityProbe, DeviceCapabilities};
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn probe_reporting(caps: DeviceCapabilities) -> CapabilityProbe {
        Arc::new(move || caps)
    }

    fn advanced_caps() -> DeviceCapabilities {
        DeviceCapabilities {
            depth_textures: true,
            vertex_texture_fetch: true,
            ..DeviceCapabilities::NONE
        }
    }

    #[test]
    fn force_null_wins_over_everything() {
        let mut config = BackendConfig::with_probe(probe_reporting(advanced_caps()));
        config.force_null = true;
        config.force_baseline = true;
        config.force_advanced = true;
        config.prefer_tiled = true;
        assert_eq!(resolve_backend_kind(&config).unwrap(), BackendKind::Null);
    }

    #[test]
    fn headless_server_selects_null() {
        let mut config = BackendConfig::with_probe(probe_reporting(advanced_caps()));
        config.headless_server = true;
        assert_eq!(resolve_backend_kind(&config).unwrap(), BackendKind::Null);
    }

    #[test]
    fn conflicting_force_flags_fail_fast() {
        let mut config = BackendConfig::with_probe(probe_reporting(advanced_caps()));
        config.force_baseline = true;
        config.force_advanced = true;
        assert!(matches!(
            resolve_backend_kind(&config),
            Err(SelectionError::ConflictingForceFlags)
        ));
    }

    #[test]
    fn tiled_platform_request_selects_tiled() {
        let mut config = BackendConfig::with_probe(probe_reporting(advanced_caps()));
        config.prefer_tiled = true;
        config.allow_advanced = true;
        assert_eq!(resolve_backend_kind(&config).unwrap(), BackendKind::Tiled);
    }

    #[test]
    fn probe_gated_advanced_selection() {
        let mut config = BackendConfig::with_probe(probe_reporting(advanced_caps()));
        config.allow_advanced = true;
        assert_eq!(
            resolve_backend_kind(&config).unwrap(),
            BackendKind::Advanced
        );

        // Supported but neither forced nor allowed: stay on the baseline.
        config.allow_advanced = false;
        assert_eq!(
            resolve_backend_kind(&config).unwrap(),
            BackendKind::Baseline
        );
    }

    #[test]
    fn forced_baseline_skips_the_probe() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_in_probe = calls.clone();
        let mut config = BackendConfig::with_probe(Arc::new(move || {
            calls_in_probe.fetch_add(1, Ordering::SeqCst);
            advanced_caps()
        }));
        config.force_baseline = true;
        config.allow_advanced = true;
        assert_eq!(
            resolve_backend_kind(&config).unwrap(),
            BackendKind::Baseline
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn forced_but_unsupported_advanced_degrades_to_baseline() {
        let mut config = BackendConfig::with_probe(probe_reporting(DeviceCapabilities::NONE));
        config.force_advanced = true;
        assert_eq!(
            resolve_backend_kind(&config).unwrap(),
            BackendKind::Baseline
        );
    }

    #[test]
    fn unsupported_probe_falls_back_to_baseline() {
        let mut config = BackendConfig::with_probe(probe_reporting(DeviceCapabilities::NONE));
        config.allow_advanced = true;
        assert_eq!(
            resolve_backend_kind(&config).unwrap(),
            BackendKind::Baseline
        );
    }
}
