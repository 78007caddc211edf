use std::fmt;

/// Pipeline stages, in the order `all` runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Copy,
    GroundTruth,
    Label,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Copy, Stage::GroundTruth, Stage::Label];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Copy => "copy",
            Stage::GroundTruth => "ground-truth",
            Stage::Label => "label",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-stage counts. Skips are expected gaps, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub stage: Stage,
    pub written: usize,
    pub missing_folder: usize,
    /// Source image (copy) or previously copied image (label) not found.
    pub missing_image: usize,
}

impl StageReport {
    pub fn new(stage: Stage) -> Self {
        Self {
            stage,
            written: 0,
            missing_folder: 0,
            missing_image: 0,
        }
    }

    pub fn skipped(&self) -> usize {
        self.missing_folder + self.missing_image
    }
}

impl fmt::Display for StageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} complete: written {}, skipped {} (no folder {}, no image {})",
            self.stage,
            self.written,
            self.skipped(),
            self.missing_folder,
            self.missing_image
        )
    }
}
