use std::ops::RangeInclusive;

use cisterns_contracts::AreaThresholdClassifier;

use crate::config::PrepConfig;
use crate::copy::copy_range;
use crate::error::PrepResult;
use crate::ground_truth::write_range;
use crate::label::label_range;
use crate::report::{Stage, StageReport};

/// Run `stages` in order over the same id range with one shared classifier.
pub fn run_stages(
    cfg: &PrepConfig,
    stages: &[Stage],
    ids: RangeInclusive<u32>,
) -> PrepResult<Vec<StageReport>> {
    let classifier = AreaThresholdClassifier::new(cfg.area_threshold_cm2);
    stages
        .iter()
        .map(|stage| match stage {
            Stage::Copy => copy_range(cfg, ids.clone()),
            Stage::GroundTruth => write_range(cfg, &classifier, ids.clone()),
            Stage::Label => label_range(cfg, &classifier, ids.clone()),
        })
        .collect()
}

/// copy, then ground-truth, then label.
pub fn run_all(cfg: &PrepConfig, ids: RangeInclusive<u32>) -> PrepResult<Vec<StageReport>> {
    run_stages(cfg, &Stage::ALL, ids)
}
