mod common;

use std::path::Path;

use cisterns_contracts::{AreaThresholdClassifier, SideClassification, SideClassifier};
use cisterns_tools::dataset::labeled_image_path;
use cisterns_tools::{copy_range, label_range};
use common::Fixture;

#[test]
fn skips_ids_that_were_never_copied() {
    let fx = Fixture::new();
    fx.entry_with_image(1);
    fx.entry_with_image(2);
    copy_range(&fx.cfg, 1..=1).expect("copy");

    let report = label_range(&fx.cfg, &AreaThresholdClassifier::default(), 1..=3).expect("label");
    assert_eq!(report.written, 1);
    assert_eq!(report.missing_image, 1);
    assert_eq!(report.missing_folder, 1);
    assert!(labeled_image_path(&fx.cfg, 1).is_file());
    assert!(!labeled_image_path(&fx.cfg, 2).exists());
}

#[test]
fn labeled_png_keeps_size_and_drops_alpha() {
    let mut fx = Fixture::new();
    fx.cfg.image_filename = "segment.png".to_string();
    fx.entry_with_image(3);
    fx.horn(3, "left-horn.xml", 4.2);
    copy_range(&fx.cfg, 3..=3).expect("copy");

    label_range(&fx.cfg, &AreaThresholdClassifier::default(), 3..=3).expect("label");
    let out = image::open(labeled_image_path(&fx.cfg, 3)).expect("open");
    assert_eq!((out.width(), out.height()), (96, 64));
    assert_eq!(out.color(), image::ColorType::Rgb8);
    // The whole 96x64 image sits under the translucent box.
    let before = image::open(fx.cfg.dest_root.join("3/segment.png")).unwrap().to_rgb8();
    let after = out.to_rgb8();
    assert!(after.get_pixel(0, 0)[2] < before.get_pixel(0, 0)[2]);
}

/// Counts calls so tests can see the classifier is consulted per side.
struct Counting(std::cell::Cell<usize>);

impl SideClassifier for Counting {
    fn classify(&self, _: &Path) -> SideClassification {
        self.0.set(self.0.get() + 1);
        SideClassification::Normal
    }
}

#[test]
fn injected_classifier_is_used_for_both_sides() {
    let fx = Fixture::new();
    fx.entry_with_image(0);
    copy_range(&fx.cfg, 0..=0).expect("copy");
    let counting = Counting(std::cell::Cell::new(0));
    label_range(&fx.cfg, &counting, 0..=0).expect("label");
    assert_eq!(counting.0.get(), 2);
}
