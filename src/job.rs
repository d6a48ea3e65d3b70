use crate::{
    config::{Fallback, RenderSettings, RendeviceConfig},
    foundation::{
        core::BackendKind,
        error::{RendeviceError, RendeviceResult},
    },
    inventory::provider::DeviceProvider,
    select::result::{SelectionResult, SelectionStatus},
};

/// Render device mode the host is switched to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RenderDevice {
    /// CPU path tracing.
    Cpu,
    /// Accelerated rendering on the selected compute backend.
    Gpu,
}

/// Effects a caller applies to the render host before starting the job.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct JobSetup {
    /// Render device mode.
    pub device: RenderDevice,
    /// Compute backend to keep active; `None` on the CPU path.
    pub compute_backend: Option<BackendKind>,
    /// Names of the devices that were enabled.
    pub enabled_devices: Vec<String>,
    /// Render settings to assign.
    pub settings: RenderSettings,
    /// Worker this job belongs to.
    pub worker_id: u32,
    /// Output path namespaced by worker.
    pub output_path: String,
}

impl JobSetup {
    /// Turn a selection outcome into host effects, honouring the configured fallback.
    ///
    /// [`Fallback::Abort`] turns `NoHardwareFound` into [`RendeviceError::NoAcceleration`].
    pub fn plan(
        result: &SelectionResult,
        config: &RendeviceConfig,
        worker_id: u32,
    ) -> RendeviceResult<Self> {
        let (device, compute_backend) = match (result.status, config.fallback) {
            (SelectionStatus::Selected, _) => (RenderDevice::Gpu, result.chosen_kind),
            (SelectionStatus::NoHardwareFound, Fallback::Cpu) => {
                tracing::warn!("GPU acceleration not available, rendering will use CPU");
                (RenderDevice::Cpu, None)
            }
            (SelectionStatus::NoHardwareFound, Fallback::Abort) => {
                return Err(RendeviceError::NoAcceleration);
            }
        };

        Ok(Self {
            device,
            compute_backend,
            enabled_devices: result
                .activated_devices
                .iter()
                .map(|d| d.name.clone())
                .collect(),
            settings: config.render.clone(),
            worker_id,
            output_path: worker_output_path(&config.render.output_base, worker_id),
        })
    }

    /// Operator-facing summary of the planned job.
    pub fn summary_lines(&self) -> Vec<String> {
        let device = match (self.device, self.compute_backend) {
            (RenderDevice::Gpu, Some(kind)) => format!("GPU ({kind})"),
            (RenderDevice::Gpu, None) => "GPU".to_string(),
            (RenderDevice::Cpu, _) => "CPU".to_string(),
        };
        let denoising = if self.settings.use_denoising {
            format!("on ({})", self.settings.denoiser.as_str())
        } else {
            "off".to_string()
        };
        let [w, h] = self.settings.resolution;

        vec![
            format!("configured render job for worker {}", self.worker_id),
            format!("device: {device}"),
            format!("enabled devices: {}", self.enabled_devices.len()),
            format!("samples: {}", self.settings.samples),
            format!("denoising: {denoising}"),
            format!("tile size: {}", self.settings.tile_size),
            format!("resolution: {w}x{h}"),
            format!("output path: {}", self.output_path),
        ]
    }
}

/// Namespace `base` by worker so concurrent workers never write the same files.
///
/// `"/out/render"` and `"/out/render_"` both become `"/out/render_gpu3_"` for worker 3.
pub fn worker_output_path(base: &str, worker_id: u32) -> String {
    let mut path = base.to_string();
    if !path.ends_with('_') {
        path.push('_');
    }
    path.push_str(&format!("gpu{worker_id}_"));
    path
}

/// Worker id from loosely passed script arguments: the last argument if it is all digits,
/// otherwise `0`.
pub fn worker_id_from_args<I, S>(args: I) -> u32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter()
        .last()
        .and_then(|last| {
            let last = last.as_ref();
            if !last.is_empty() && last.bytes().all(|b| b.is_ascii_digit()) {
                last.parse().ok()
            } else {
                None
            }
        })
        .unwrap_or(0)
}

/// Select a backend with the configured policy, then plan the job for `worker_id`.
#[tracing::instrument(skip(config, provider))]
pub fn configure_job<P: DeviceProvider + ?Sized>(
    config: &RendeviceConfig,
    provider: &mut P,
    worker_id: u32,
) -> RendeviceResult<(SelectionResult, JobSetup)> {
    let result = config.selector()?.select(provider)?;
    let job = JobSetup::plan(&result, config, worker_id)?;
    tracing::info!(device = ?job.device, output = %job.output_path, "render job configured");
    Ok((result, job))
}

#[cfg(test)]
#[path = "../tests/unit/job.rs"]
mod tests;
