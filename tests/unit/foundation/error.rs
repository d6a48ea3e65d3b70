use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        RendeviceError::invalid_config("x")
            .to_string()
            .contains("invalid configuration:")
    );
    assert!(
        RendeviceError::inventory("x")
            .to_string()
            .contains("inventory error:")
    );
    assert!(
        RendeviceError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(
        ProbeError::unavailable("no driver")
            .to_string()
            .contains("backend unavailable: no driver")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = RendeviceError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));

    let probe = ProbeError::from(anyhow::anyhow!("enumeration timed out"));
    assert!(probe.to_string().contains("enumeration timed out"));
}

#[test]
fn only_invalid_configuration_is_configuration() {
    assert!(RendeviceError::invalid_config("empty").is_configuration());
    assert!(!RendeviceError::NoAcceleration.is_configuration());
    assert!(!RendeviceError::inventory("x").is_configuration());
}

#[test]
fn serde_json_errors_convert() {
    let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err = RendeviceError::from(err);
    assert!(matches!(err, RendeviceError::Serde(_)));
}
