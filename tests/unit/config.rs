use super::*;

#[test]
fn defaults() {
    let cfg = ForgeConfig::default();
    assert_eq!(cfg.device_scale, 1.0);
    assert!(cfg.load_system_fonts);
    assert_eq!(cfg.fonts_dir, None);
    assert_eq!(cfg.resize_debounce(), Duration::from_millis(180));
    cfg.validate().unwrap();
}

#[test]
fn empty_object_is_default() {
    let cfg = ForgeConfig::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, ForgeConfig::default());
}

#[test]
fn partial_override() {
    let cfg = ForgeConfig::from_reader(
        r#"{ "device_scale": 2.0, "load_system_fonts": false, "resize_debounce_ms": 50 }"#
            .as_bytes(),
    )
    .unwrap();
    assert_eq!(cfg.device_scale, 2.0);
    assert!(!cfg.load_system_fonts);
    assert_eq!(cfg.resize_debounce(), Duration::from_millis(50));
}

#[test]
fn rejects_bad_scale_and_unknown_fields() {
    for json in [
        r#"{ "device_scale": 0.0 }"#,
        r#"{ "device_scale": -1.0 }"#,
        r#"{ "device_scale": 9.0 }"#,
        r#"{ "dpr": 2.0 }"#,
        "not json",
    ] {
        assert!(
            matches!(
                ForgeConfig::from_reader(json.as_bytes()),
                Err(ForgeError::Validation(_))
            ),
            "{json}"
        );
    }
}

#[test]
fn rejects_missing_fonts_dir() {
    let cfg = ForgeConfig {
        fonts_dir: Some(PathBuf::from("/definitely/not/a/fonts/dir")),
        ..ForgeConfig::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn missing_file_is_validation_error() {
    let err = ForgeConfig::from_path("/nonexistent/nameforge.json").unwrap_err();
    assert!(matches!(err, ForgeError::Validation(_)));
}
