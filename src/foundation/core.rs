use std::{fmt, str::FromStr};

use crate::foundation::error::{RendeviceError, RendeviceResult};

/// Compute acceleration technology a render host can target.
///
/// Serialized with the host's upper-case tokens (`"CUDA"`, `"OPTIX"`, ...).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum BackendKind {
    /// NVIDIA CUDA.
    Cuda,
    /// NVIDIA OptiX (RTX hardware ray tracing).
    Optix,
    /// AMD HIP.
    Hip,
    /// Apple Metal.
    Metal,
    /// Intel oneAPI.
    OneApi,
    /// OpenCL (legacy hosts).
    OpenCl,
}

impl BackendKind {
    /// Every backend kind, in declaration order.
    pub const ALL: [BackendKind; 6] = [
        BackendKind::Cuda,
        BackendKind::Optix,
        BackendKind::Hip,
        BackendKind::Metal,
        BackendKind::OneApi,
        BackendKind::OpenCl,
    ];

    /// Host token for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            BackendKind::Cuda => "CUDA",
            BackendKind::Optix => "OPTIX",
            BackendKind::Hip => "HIP",
            BackendKind::Metal => "METAL",
            BackendKind::OneApi => "ONEAPI",
            BackendKind::OpenCl => "OPENCL",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendKind {
    type Err = RendeviceError;

    fn from_str(s: &str) -> RendeviceResult<Self> {
        let token = s.trim();
        BackendKind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(token))
            .ok_or_else(|| {
                RendeviceError::invalid_config(format!("unknown backend kind '{token}'"))
            })
    }
}

/// Type reported by an enumerated device.
///
/// Hosts list the CPU next to accelerators, so a device is not always backed by a
/// [`BackendKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DeviceKind {
    /// Host CPU.
    Cpu,
    /// Accelerator belonging to a compute backend.
    Backend(BackendKind),
}

impl DeviceKind {
    /// Backend this device belongs to, if it is an accelerator.
    pub fn backend(self) -> Option<BackendKind> {
        match self {
            DeviceKind::Cpu => None,
            DeviceKind::Backend(k) => Some(k),
        }
    }
}

impl From<BackendKind> for DeviceKind {
    fn from(kind: BackendKind) -> Self {
        DeviceKind::Backend(kind)
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceKind::Cpu => f.write_str("CPU"),
            DeviceKind::Backend(k) => fmt::Display::fmt(k, f),
        }
    }
}

impl FromStr for DeviceKind {
    type Err = RendeviceError;

    fn from_str(s: &str) -> RendeviceResult<Self> {
        if s.trim().eq_ignore_ascii_case("CPU") {
            return Ok(DeviceKind::Cpu);
        }
        s.parse::<BackendKind>().map(DeviceKind::Backend)
    }
}

impl TryFrom<String> for DeviceKind {
    type Error = RendeviceError;

    fn try_from(s: String) -> RendeviceResult<Self> {
        s.parse()
    }
}

impl From<DeviceKind> for String {
    fn from(kind: DeviceKind) -> Self {
        kind.to_string()
    }
}

/// One enumerable hardware unit.
///
/// Owned by a [`DeviceProvider`](crate::DeviceProvider); selection only reads devices and asks
/// the provider to flip `enabled`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Device {
    /// Display name. Not guaranteed to be unique.
    pub name: String,
    /// Reported device type.
    #[serde(rename = "type")]
    pub kind: DeviceKind,
    /// Activation flag as persisted by the host.
    #[serde(default, alias = "use")]
    pub enabled: bool,
    /// Opaque host identifier (may be empty).
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
}

impl Device {
    /// Disabled device with an empty host id.
    pub fn new(name: impl Into<String>, kind: impl Into<DeviceKind>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            enabled: false,
            id: String::new(),
        }
    }

    /// Host CPU device.
    pub fn cpu(name: impl Into<String>) -> Self {
        Self::new(name, DeviceKind::Cpu)
    }

    /// Builder-style override of `enabled`.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Builder-style override of `id`.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Whether this device belongs to `kind`.
    pub fn is_kind(&self, kind: BackendKind) -> bool {
        self.kind == DeviceKind::Backend(kind)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
