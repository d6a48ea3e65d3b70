//! rendevice configures the GPU compute backend of a render host before a job runs.
//!
//! Given a priority-ordered list of candidate backends (CUDA, OptiX, HIP, Metal, oneAPI,
//! OpenCL) and a provider that enumerates the host's devices, it decides which backend to
//! activate, which devices to enable, and what the job should do when no accelerator exists.
//!
//! # Flow
//!
//! 1. **Configure**: [`RendeviceConfig`] holds candidates, the [`AcceptancePolicy`], the
//!    [`Fallback`] and the [`RenderSettings`].
//! 2. **Select**: [`BackendSelector::select`] probes each candidate through a
//!    [`DeviceProvider`], records failures, and enables the devices of the first backend that
//!    has any. The result is a [`SelectionResult`].
//! 3. **Plan**: [`JobSetup::plan`] derives the render device mode (CPU or GPU), the render
//!    settings and the worker-namespaced output path.
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **No hidden host state**: the active backend is owned by the provider and reported
//!   through [`DeviceProvider::active_backend`].
//! - **Probe failures are data**: they show up in [`SelectionResult::attempts`]; only invalid
//!   configuration is an error.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod config;
mod foundation;
mod inventory;
mod job;
mod select;

pub use config::{Denoiser, Fallback, RenderSettings, RendeviceConfig};
pub use foundation::core::{BackendKind, Device, DeviceKind};
pub use foundation::error::{ProbeError, RendeviceError, RendeviceResult};
pub use inventory::fixture::{BackendFixture, FixtureInventory};
pub use inventory::provider::DeviceProvider;
pub use job::{JobSetup, RenderDevice, configure_job, worker_id_from_args, worker_output_path};
pub use select::acceptance::{Acceptance, AcceptancePolicy};
pub use select::result::{ProbeAttempt, ProbeOutcome, SelectionResult, SelectionStatus};
pub use select::selector::{BackendSelector, select_backend};
