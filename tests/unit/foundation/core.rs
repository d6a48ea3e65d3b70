use super::*;

#[test]
fn backend_kind_parses_case_insensitively() {
    assert_eq!("cuda".parse::<BackendKind>().unwrap(), BackendKind::Cuda);
    assert_eq!(" OptiX ".parse::<BackendKind>().unwrap(), BackendKind::Optix);
    assert_eq!("oneapi".parse::<BackendKind>().unwrap(), BackendKind::OneApi);
    assert!("vulkan".parse::<BackendKind>().unwrap_err().is_configuration());
}

#[test]
fn backend_kind_serde_uses_host_tokens() {
    for kind in BackendKind::ALL {
        let json = serde_json::to_string(&kind).unwrap();
        assert_eq!(json, format!("\"{}\"", kind.as_str()));
    }
    let kinds: Vec<BackendKind> = serde_json::from_str(r#"["CUDA","OPENCL","ONEAPI"]"#).unwrap();
    assert_eq!(
        kinds,
        vec![BackendKind::Cuda, BackendKind::OpenCl, BackendKind::OneApi]
    );
}

#[test]
fn device_kind_accepts_cpu_and_backends() {
    assert_eq!("CPU".parse::<DeviceKind>().unwrap(), DeviceKind::Cpu);
    assert_eq!(
        "hip".parse::<DeviceKind>().unwrap(),
        DeviceKind::Backend(BackendKind::Hip)
    );
    assert_eq!(DeviceKind::Cpu.backend(), None);
    assert_eq!(
        DeviceKind::from(BackendKind::Metal).backend(),
        Some(BackendKind::Metal)
    );
    assert_eq!(DeviceKind::Cpu.to_string(), "CPU");
}

#[test]
fn device_json_uses_type_and_use_alias() {
    let d: Device = serde_json::from_str(r#"{ "name": "RTX 4090", "type": "CUDA", "use": true }"#)
        .unwrap();
    assert_eq!(d.name, "RTX 4090");
    assert!(d.is_kind(BackendKind::Cuda));
    assert!(d.enabled);
    assert!(d.id.is_empty());

    let d: Device = serde_json::from_str(r#"{ "name": "Threadripper", "type": "CPU" }"#).unwrap();
    assert_eq!(d.kind, DeviceKind::Cpu);
    assert!(!d.enabled);

    assert!(serde_json::from_str::<Device>(r#"{ "name": "x", "type": "TPU" }"#).is_err());
}

#[test]
fn device_builders() {
    let d = Device::new("A100", BackendKind::Cuda)
        .with_enabled(true)
        .with_id("CUDA_0");
    assert!(d.enabled);
    assert_eq!(d.id, "CUDA_0");
    assert!(!Device::cpu("cpu").is_kind(BackendKind::Cuda));

    let json = serde_json::to_value(&d).unwrap();
    assert_eq!(json["type"], "CUDA");
    assert_eq!(json["enabled"], true);
}
