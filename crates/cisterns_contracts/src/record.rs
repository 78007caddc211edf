use thiserror::Error;

use crate::horn::{Side, SideClassification, UnknownClassification};

/// Header row of the ground-truth table.
pub const HEADER: &str = "id,right-horn,left-horn";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroundTruthRecord {
    pub id: u32,
    pub right: SideClassification,
    pub left: SideClassification,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("expected 3 columns, found {0}")]
    ColumnCount(usize),
    #[error("invalid id {0:?}")]
    InvalidId(String),
    #[error(transparent)]
    Classification(#[from] UnknownClassification),
}

impl GroundTruthRecord {
    pub fn new(id: u32, right: SideClassification, left: SideClassification) -> Self {
        Self { id, right, left }
    }

    pub fn side(&self, side: Side) -> SideClassification {
        match side {
            Side::Right => self.right,
            Side::Left => self.left,
        }
    }

    /// Row without a line terminator, e.g. `5,compressed,absent`.
    pub fn to_csv_row(&self) -> String {
        format!("{},{},{}", self.id, self.right, self.left)
    }

    pub fn parse_csv_row(line: &str) -> Result<Self, RecordError> {
        let cols: Vec<&str> = line.trim_end_matches(['\r', '\n']).split(',').collect();
        let [id, right, left] = cols.as_slice() else {
            return Err(RecordError::ColumnCount(cols.len()));
        };
        let id = id
            .trim()
            .parse()
            .map_err(|_| RecordError::InvalidId(id.to_string()))?;
        Ok(Self {
            id,
            right: right.parse()?,
            left: left.parse()?,
        })
    }

    /// Two-line overlay text: `right-horn: <r>\nleft-horn: <l>`.
    pub fn label_text(&self) -> String {
        Side::ALL
            .iter()
            .map(|side| format!("{}: {}", side.label(), self.side(*side)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_row_matches_header_order() {
        let rec = GroundTruthRecord::new(
            5,
            SideClassification::Compressed,
            SideClassification::Absent,
        );
        assert_eq!(rec.to_csv_row(), "5,compressed,absent");
        assert_eq!(GroundTruthRecord::parse_csv_row("5,compressed,absent\r\n"), Ok(rec));
    }

    #[test]
    fn rejects_malformed_rows() {
        assert_eq!(
            GroundTruthRecord::parse_csv_row("5,normal"),
            Err(RecordError::ColumnCount(2))
        );
        assert!(matches!(
            GroundTruthRecord::parse_csv_row("x,normal,normal"),
            Err(RecordError::InvalidId(_))
        ));
        assert!(matches!(
            GroundTruthRecord::parse_csv_row("1,normal,2.4"),
            Err(RecordError::Classification(_))
        ));
    }

    #[test]
    fn label_text_lists_right_then_left() {
        let rec = GroundTruthRecord::new(
            0,
            SideClassification::Normal,
            SideClassification::Compressed,
        );
        assert_eq!(rec.label_text(), "right-horn: normal\nleft-horn: compressed");
    }
}
