use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::{
    foundation::{
        core::{BackendKind, Device},
        error::{ProbeError, RendeviceError, RendeviceResult},
    },
    inventory::provider::DeviceProvider,
};

/// What a fixture host reports when a backend is probed.
///
/// An entry carries either `error` or `devices`, never both.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged, deny_unknown_fields)]
pub enum BackendFixture {
    /// Switching to the backend fails with this reason.
    Failure {
        /// Reason surfaced as the probe error.
        error: String,
    },
    /// Switching succeeds and these devices are listed.
    Devices {
        /// Devices in host enumeration order.
        #[serde(default)]
        devices: Vec<Device>,
    },
}

/// Device inventory described by JSON, standing in for a live render host.
///
/// ```json
/// {
///   "backends": {
///     "CUDA": {
///       "devices": [
///         { "name": "RTX 4090", "type": "CUDA" },
///         { "name": "CPU", "type": "CPU" }
///       ]
///     },
///     "OPTIX": { "error": "driver not loaded" }
///   }
/// }
/// ```
///
/// Backends that are not listed enumerate as empty. Activation flags are stored per backend and
/// persist across probes, like preferences of a long-lived host process.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct FixtureInventory {
    #[serde(default)]
    backends: BTreeMap<BackendKind, BackendFixture>,
    #[serde(skip)]
    active: Option<BackendKind>,
    #[serde(skip)]
    probe_count: usize,
}

impl FixtureInventory {
    /// Empty inventory: every probe succeeds with no devices.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register devices listed when `kind` is probed.
    pub fn with_devices(mut self, kind: BackendKind, devices: Vec<Device>) -> Self {
        self.backends
            .insert(kind, BackendFixture::Devices { devices });
        self
    }

    /// Make probes of `kind` fail with `reason`.
    pub fn with_failure(mut self, kind: BackendKind, reason: impl Into<String>) -> Self {
        self.backends.insert(
            kind,
            BackendFixture::Failure {
                error: reason.into(),
            },
        );
        self
    }

    /// Parse an inventory from JSON text.
    pub fn from_json_str(s: &str) -> RendeviceResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read an inventory JSON file.
    pub fn load(path: &Path) -> RendeviceResult<Self> {
        let f = File::open(path)
            .with_context(|| format!("open inventory '{}'", path.display()))?;
        serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            RendeviceError::serde(format!("parse inventory '{}': {e}", path.display()))
        })
    }

    /// Devices listed for the active backend (empty before the first successful probe).
    pub fn devices(&self) -> &[Device] {
        self.active
            .map(|k| self.devices_for(k))
            .unwrap_or_default()
    }

    /// Devices registered for `kind`, regardless of which backend is active.
    pub fn devices_for(&self, kind: BackendKind) -> &[Device] {
        match self.backends.get(&kind) {
            Some(BackendFixture::Devices { devices }) => devices,
            _ => &[],
        }
    }

    /// Number of probes served so far.
    pub fn probe_count(&self) -> usize {
        self.probe_count
    }
}

impl DeviceProvider for FixtureInventory {
    fn probe(&mut self, kind: BackendKind) -> Result<Vec<Device>, ProbeError> {
        self.probe_count += 1;
        match self.backends.get(&kind) {
            Some(BackendFixture::Failure { error }) => {
                Err(ProbeError::unavailable(error.clone()))
            }
            Some(BackendFixture::Devices { devices }) => {
                self.active = Some(kind);
                tracing::debug!(backend = %kind, devices = devices.len(), "fixture enumerated");
                Ok(devices.clone())
            }
            None => {
                self.active = Some(kind);
                Ok(Vec::new())
            }
        }
    }

    fn set_enabled(&mut self, index: usize, enabled: bool) -> RendeviceResult<()> {
        let kind = self
            .active
            .ok_or_else(|| RendeviceError::inventory("set_enabled before any successful probe"))?;
        let device = match self.backends.get_mut(&kind) {
            Some(BackendFixture::Devices { devices }) => devices.get_mut(index),
            _ => None,
        }
        .ok_or_else(|| {
            RendeviceError::inventory(format!("no device {index} listed for backend {kind}"))
        })?;
        device.enabled = enabled;
        Ok(())
    }

    fn active_backend(&self) -> Option<BackendKind> {
        self.active
    }
}

#[cfg(test)]
#[path = "../../tests/unit/inventory/fixture.rs"]
mod tests;
