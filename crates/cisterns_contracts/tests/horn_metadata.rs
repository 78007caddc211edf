use std::fs;
use std::path::{Path, PathBuf};

use cisterns_contracts::{
    classify_metadata, read_area_cm2, AreaThresholdClassifier, MetadataError, SideClassification,
    SideClassifier, COMPRESSION_THRESHOLD_CM2,
};
use tempfile::tempdir;

fn write_plist(dir: &Path, name: &str, area_entry: &str) -> PathBuf {
    let body = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>DataSummary</key>
    <dict>
        {area_entry}
        <key>Mean</key>
        <real>41.2</real>
    </dict>
</dict>
</plist>
"#
    );
    let path = dir.join(name);
    fs::write(&path, body).expect("write plist");
    path
}

#[test]
fn reads_real_integer_and_string_areas() {
    let tmp = tempdir().unwrap();
    let real = write_plist(tmp.path(), "real.xml", "<key>AreaCM2</key><real>1.5</real>");
    let int = write_plist(tmp.path(), "int.xml", "<key>AreaCM2</key><integer>4</integer>");
    let text = write_plist(tmp.path(), "str.xml", "<key>AreaCM2</key><string> 2.25 </string>");

    assert_eq!(read_area_cm2(&real).unwrap(), 1.5);
    assert_eq!(read_area_cm2(&int).unwrap(), 4.0);
    assert_eq!(read_area_cm2(&text).unwrap(), 2.25);
}

#[test]
fn boundary_values_classify_around_threshold() {
    let tmp = tempdir().unwrap();
    let exact = write_plist(tmp.path(), "exact.xml", "<key>AreaCM2</key><real>3.0</real>");
    let below = write_plist(tmp.path(), "below.xml", "<key>AreaCM2</key><real>2.9999</real>");

    let classifier = AreaThresholdClassifier::default();
    assert_eq!(classifier.classify(&exact), SideClassification::Normal);
    assert_eq!(classifier.classify(&below), SideClassification::Compressed);
}

#[test]
fn missing_and_malformed_metadata_are_absent() {
    let tmp = tempdir().unwrap();
    let missing = tmp.path().join("right-horn.xml");
    let no_field = write_plist(tmp.path(), "no_field.xml", "");
    let bad_type = write_plist(
        tmp.path(),
        "bad_type.xml",
        "<key>AreaCM2</key><string>n/a</string>",
    );
    let garbage = tmp.path().join("garbage.xml");
    fs::write(&garbage, b"not a plist at all").unwrap();

    assert!(matches!(
        read_area_cm2(&missing),
        Err(MetadataError::NotFound { .. })
    ));
    assert!(matches!(
        read_area_cm2(&no_field),
        Err(MetadataError::MissingField { field: "AreaCM2", .. })
    ));
    assert!(matches!(
        read_area_cm2(&bad_type),
        Err(MetadataError::NotNumeric { .. })
    ));
    assert!(matches!(
        read_area_cm2(&garbage),
        Err(MetadataError::Parse { .. })
    ));

    for path in [&missing, &no_field, &bad_type, &garbage] {
        assert_eq!(
            classify_metadata(path, COMPRESSION_THRESHOLD_CM2),
            SideClassification::Absent,
            "{}",
            path.display()
        );
    }
}

#[test]
fn directory_in_place_of_metadata_is_absent() {
    let tmp = tempdir().unwrap();
    let dir = tmp.path().join("left-horn.xml");
    fs::create_dir(&dir).unwrap();
    assert_eq!(
        AreaThresholdClassifier::default().classify(&dir),
        SideClassification::Absent
    );
}

#[test]
fn classification_is_stable_across_calls() {
    let tmp = tempdir().unwrap();
    let path = write_plist(tmp.path(), "r.xml", "<key>AreaCM2</key><real>7.1</real>");
    let classifier = AreaThresholdClassifier::default();
    let first = classifier.classify(&path);
    for _ in 0..3 {
        assert_eq!(classifier.classify(&path), first);
    }
    assert_eq!(first, SideClassification::Normal);
}
