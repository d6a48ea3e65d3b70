use crate::foundation::{
    core::{BackendKind, Device},
    error::{ProbeError, RendeviceResult},
};

/// Device enumeration provider with the activation sink folded in.
///
/// This is the seam to the render host: switching the host's active compute backend and
/// listing devices are side effects of [`DeviceProvider::probe`], and the state they touch is
/// reported back through [`DeviceProvider::active_backend`] rather than living in a global.
///
/// Index contract: `index` in [`DeviceProvider::set_enabled`] refers to a position in the list
/// returned by the most recent successful `probe`.
pub trait DeviceProvider {
    /// Make `kind` the active compute backend and enumerate the host's devices.
    ///
    /// May rescan hardware. The returned list can contain devices of other kinds (the CPU in
    /// particular); filtering is the caller's job.
    fn probe(&mut self, kind: BackendKind) -> Result<Vec<Device>, ProbeError>;

    /// Persist the activation flag of one device of the last probe.
    fn set_enabled(&mut self, index: usize, enabled: bool) -> RendeviceResult<()>;

    /// Backend most recently made active by a successful probe.
    fn active_backend(&self) -> Option<BackendKind>;
}
