use super::*;
use crate::{
    foundation::core::Device, inventory::fixture::FixtureInventory,
    select::result::ProbeAttempt,
};

#[test]
fn output_path_gets_single_separator_and_worker_suffix() {
    assert_eq!(worker_output_path("/out/render", 3), "/out/render_gpu3_");
    assert_eq!(worker_output_path("/out/render_", 3), "/out/render_gpu3_");
    assert_eq!(worker_output_path("", 0), "_gpu0_");
}

#[test]
fn worker_id_comes_from_last_numeric_argument() {
    assert_eq!(worker_id_from_args(["blender", "-b", "--", "2"]), 2);
    assert_eq!(worker_id_from_args(["blender", "-b", "scene.blend"]), 0);
    assert_eq!(worker_id_from_args(["7", "--fast"]), 0);
    assert_eq!(worker_id_from_args(["-1"]), 0);
    assert_eq!(worker_id_from_args(["99999999999999999999"]), 0);
    assert_eq!(worker_id_from_args(Vec::<String>::new()), 0);
}

#[test]
fn selected_backend_plans_gpu_job() {
    let result = SelectionResult::selected(
        BackendKind::Cuda,
        vec![Device::new("RTX 4090", BackendKind::Cuda).with_enabled(true)],
        vec![],
    );
    let config = RendeviceConfig::default();

    let job = JobSetup::plan(&result, &config, 1).unwrap();

    assert_eq!(job.device, RenderDevice::Gpu);
    assert_eq!(job.compute_backend, Some(BackendKind::Cuda));
    assert_eq!(job.enabled_devices, vec!["RTX 4090"]);
    assert_eq!(job.output_path, "/tmp/render_gpu1_");
    assert_eq!(
        job.summary_lines(),
        vec![
            "configured render job for worker 1",
            "device: GPU (CUDA)",
            "enabled devices: 1",
            "samples: 128",
            "denoising: on (OIDN)",
            "tile size: 256",
            "resolution: 1920x1080",
            "output path: /tmp/render_gpu1_",
        ]
    );
}

#[test]
fn no_hardware_falls_back_to_cpu_or_aborts() {
    let result = SelectionResult::no_hardware(vec![ProbeAttempt {
        kind: BackendKind::Cuda,
        outcome: crate::ProbeOutcome::Empty { enumerated: 0 },
    }]);

    let mut config = RendeviceConfig::default();
    let job = JobSetup::plan(&result, &config, 0).unwrap();
    assert_eq!(job.device, RenderDevice::Cpu);
    assert_eq!(job.compute_backend, None);
    assert!(job.enabled_devices.is_empty());
    assert!(job.summary_lines().contains(&"device: CPU".to_string()));

    config.fallback = Fallback::Abort;
    let err = JobSetup::plan(&result, &config, 0).unwrap_err();
    assert!(matches!(err, RendeviceError::NoAcceleration));
}

#[test]
fn configure_job_runs_selection_then_planning() {
    let mut inv = FixtureInventory::new()
        .with_failure(BackendKind::Cuda, "no driver")
        .with_devices(
            BackendKind::Optix,
            vec![Device::new("RTX A5000", BackendKind::Optix)],
        );
    let mut config = RendeviceConfig::default();
    config.render.use_denoising = false;
    config.render.output_base = "/renders/shot010".to_string();

    let (result, job) = configure_job(&config, &mut inv, 4).unwrap();

    assert_eq!(result.chosen_kind, Some(BackendKind::Optix));
    assert_eq!(result.probe_failures().count(), 1);
    assert_eq!(job.compute_backend, Some(BackendKind::Optix));
    assert_eq!(job.output_path, "/renders/shot010_gpu4_");
    assert!(job.summary_lines().contains(&"denoising: off".to_string()));
}

#[test]
fn configure_job_rejects_invalid_config_before_probing() {
    let mut inv = FixtureInventory::new();
    let config = RendeviceConfig {
        candidates: vec![],
        ..RendeviceConfig::default()
    };

    let err = configure_job(&config, &mut inv, 0).unwrap_err();
    assert!(err.is_configuration());
    assert_eq!(inv.probe_count(), 0);
}
