use crate::foundation::{
    core::{BackendKind, Device, DeviceKind},
    error::{RendeviceError, RendeviceResult},
};

/// Rule deciding which enumerated devices count as "backend available".
///
/// Closures `Fn(BackendKind, &Device) -> bool` implement this trait, so one-off policies do not
/// need a named type.
pub trait Acceptance {
    /// Whether `device`, enumerated while `probed` was active, counts toward that backend.
    fn accepts(&self, probed: BackendKind, device: &Device) -> bool;

    /// Reject policies that can never accept anything.
    fn validate(&self) -> RendeviceResult<()> {
        Ok(())
    }
}

impl<F> Acceptance for F
where
    F: Fn(BackendKind, &Device) -> bool,
{
    fn accepts(&self, probed: BackendKind, device: &Device) -> bool {
        self(probed, device)
    }
}

/// Configurable acceptance policy.
///
/// JSON: `{ "mode": "exact" }` or `{ "mode": "any_of", "kinds": ["CUDA", "OPTIX", "OPENCL"] }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AcceptancePolicy {
    /// Only devices whose type equals the probed backend.
    #[default]
    Exact,
    /// Any accelerator whose type is in `kinds`, whichever backend is probed.
    AnyOf {
        /// Backend kinds grouped under one logical "GPU".
        kinds: Vec<BackendKind>,
    },
}

impl AcceptancePolicy {
    /// The CUDA/OptiX/OpenCL grouping some hosts treat as "GPU".
    pub fn gpu_umbrella() -> Self {
        AcceptancePolicy::AnyOf {
            kinds: vec![BackendKind::Cuda, BackendKind::Optix, BackendKind::OpenCl],
        }
    }
}

impl Acceptance for AcceptancePolicy {
    fn accepts(&self, probed: BackendKind, device: &Device) -> bool {
        match (self, device.kind) {
            (_, DeviceKind::Cpu) => false,
            (AcceptancePolicy::Exact, DeviceKind::Backend(k)) => k == probed,
            (AcceptancePolicy::AnyOf { kinds }, DeviceKind::Backend(k)) => kinds.contains(&k),
        }
    }

    fn validate(&self) -> RendeviceResult<()> {
        match self {
            AcceptancePolicy::Exact => Ok(()),
            AcceptancePolicy::AnyOf { kinds } if kinds.is_empty() => Err(
                RendeviceError::invalid_config("acceptance policy any_of needs at least one kind"),
            ),
            AcceptancePolicy::AnyOf { .. } => Ok(()),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/select/acceptance.rs"]
mod tests;
