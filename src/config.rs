use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::{
    foundation::{
        core::BackendKind,
        error::{RendeviceError, RendeviceResult},
    },
    select::{acceptance::AcceptancePolicy, selector::BackendSelector},
};

/// What a caller does when no candidate backend has an accepted device.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fallback {
    /// Render on the CPU.
    #[default]
    Cpu,
    /// Fail the job with [`RendeviceError::NoAcceleration`].
    Abort,
}

/// Denoiser applied after sampling.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Denoiser {
    /// Intel Open Image Denoise (runs everywhere).
    #[default]
    Oidn,
    /// OptiX AI denoiser (NVIDIA only).
    Optix,
}

impl Denoiser {
    /// Host token for this denoiser.
    pub fn as_str(self) -> &'static str {
        match self {
            Denoiser::Oidn => "OIDN",
            Denoiser::Optix => "OPTIX",
        }
    }
}

/// Render settings applied unconditionally once the device mode is known.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Path-tracing samples per pixel.
    pub samples: u32,
    /// Whether denoising is enabled.
    pub use_denoising: bool,
    /// Denoiser used when `use_denoising` is set.
    pub denoiser: Denoiser,
    /// Square tile edge in pixels (hosts without tiling ignore it).
    pub tile_size: u32,
    /// Output resolution `[width, height]`.
    pub resolution: [u32; 2],
    /// Output path prefix; worker jobs append their suffix to it.
    pub output_base: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            samples: 128,
            use_denoising: true,
            denoiser: Denoiser::Oidn,
            tile_size: 256,
            resolution: [1920, 1080],
            output_base: "/tmp/render_".to_string(),
        }
    }
}

impl RenderSettings {
    /// Reject settings no host can render with.
    pub fn validate(&self) -> RendeviceResult<()> {
        if self.samples == 0 {
            return Err(RendeviceError::invalid_config("samples must be > 0"));
        }
        if self.tile_size == 0 {
            return Err(RendeviceError::invalid_config("tile_size must be > 0"));
        }
        if self.resolution[0] == 0 || self.resolution[1] == 0 {
            return Err(RendeviceError::invalid_config(
                "resolution width/height must be > 0",
            ));
        }
        if self.output_base.trim().is_empty() {
            return Err(RendeviceError::invalid_config(
                "output_base must not be empty",
            ));
        }
        Ok(())
    }
}

/// Full configuration surface: candidates, acceptance, fallback and render settings.
///
/// Every field has a default, so `{}` is a valid config file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RendeviceConfig {
    /// Candidate backends in priority order.
    pub candidates: Vec<BackendKind>,
    /// Which devices count as "backend available".
    pub acceptance: AcceptancePolicy,
    /// Behaviour when nothing is accepted.
    pub fallback: Fallback,
    /// Render settings for the job.
    pub render: RenderSettings,
}

impl Default for RendeviceConfig {
    fn default() -> Self {
        Self {
            candidates: vec![BackendKind::Cuda, BackendKind::Optix, BackendKind::OpenCl],
            acceptance: AcceptancePolicy::Exact,
            fallback: Fallback::Cpu,
            render: RenderSettings::default(),
        }
    }
}

impl RendeviceConfig {
    /// Parse a config from JSON text and validate it.
    pub fn from_json_str(s: &str) -> RendeviceResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a config file.
    pub fn load(path: &Path) -> RendeviceResult<Self> {
        let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            RendeviceError::serde(format!("parse config '{}': {e}", path.display()))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check render settings and the selector configuration.
    pub fn validate(&self) -> RendeviceResult<()> {
        self.render.validate()?;
        self.selector().map(|_| ())
    }

    /// Selector for the configured candidates and acceptance policy.
    pub fn selector(&self) -> RendeviceResult<BackendSelector> {
        BackendSelector::new(self.candidates.iter().copied(), self.acceptance.clone())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
