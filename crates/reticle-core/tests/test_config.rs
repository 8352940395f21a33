use reticle_core::LocatorConfig;

#[test]
fn test_empty_json_gives_defaults() {
    let config: LocatorConfig = serde_json::from_str("{}").unwrap();

    assert!(!config.use_histogram);
    assert!(config.use_arc_approximation);
    assert!(!config.stretch_intensity);
    assert_eq!(config.blur, 0);
    assert!(!config.invert);
    assert_eq!(config.mask_radius, None);
    assert!(!config.use_adaptive_threshold);
    assert!(!config.use_legacy_search);
    assert_eq!(config.search_step, 2);
    assert_eq!(config.search_n, 20);
    assert_eq!(config.search_width, 10);
    assert_eq!(config.blocksize, 20);
    assert_eq!(config.blocksize_step, 5);
    assert!((config.convexity_threshold - 0.85).abs() < 1e-9);
    assert!((config.centrality_tolerance - 0.75).abs() < 1e-9);
}

#[test]
fn test_partial_json_overrides() {
    let config: LocatorConfig =
        serde_json::from_str(r#"{"blur": 2, "use_adaptive_threshold": true, "blocksize": 31}"#)
            .unwrap();

    assert_eq!(config.blur, 2);
    assert!(config.use_adaptive_threshold);
    assert_eq!(config.blocksize, 31);
    assert!(config.use_arc_approximation);
}

#[test]
fn test_roundtrip() {
    let config = LocatorConfig {
        use_histogram: true,
        mask_radius: Some(1.5),
        ..LocatorConfig::default()
    };

    let json = serde_json::to_string(&config).unwrap();
    let back: LocatorConfig = serde_json::from_str(&json).unwrap();

    assert!(back.use_histogram);
    assert_eq!(back.mask_radius, Some(1.5));
}
