use std::fs;
use std::path::PathBuf;

use cisterns_tools::PrepConfig;

#[test]
fn loads_partial_config_over_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("cisterns-prep.toml");
    fs::write(
        &path,
        r#"
src_root = "/mnt/cq500"
area_threshold_cm2 = 2.5

[label]
font_size = 30.0
"#,
    )
    .unwrap();

    let cfg = PrepConfig::from_path(&path).expect("load config");
    assert_eq!(cfg.src_root, PathBuf::from("/mnt/cq500"));
    assert_eq!(cfg.area_threshold_cm2, 2.5);
    assert_eq!(cfg.font_size, 30.0);
    assert_eq!(cfg.folder_prefix, "CQ500-CT-");
    assert_eq!(
        cfg.ground_truth_path(),
        PathBuf::from("data/cisterns-data/ground-truth.csv")
    );
}

#[test]
fn missing_or_invalid_file_yields_none() {
    let tmp = tempfile::tempdir().unwrap();
    assert!(PrepConfig::from_path(&tmp.path().join("absent.toml")).is_none());

    let bad = tmp.path().join("bad.toml");
    fs::write(&bad, "src_root = [1, 2").unwrap();
    assert!(PrepConfig::from_path(&bad).is_none());
}
