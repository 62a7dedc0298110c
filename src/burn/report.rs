//! Structured reporting for the burn-in export.
//!
//! The export is best-effort: per-item failures become warnings here
//! instead of aborting the batch, and the caller decides what to do with
//! them. There is no logging side effect.

use std::fmt;
use uuid::Uuid;

/// What happened during a burn-in export.
#[derive(Clone, Debug, Default)]
pub struct BurnReport {
    /// Non-fatal problems encountered while drawing.
    pub warnings: Vec<BurnWarning>,

    /// Number of distinct pages that received at least one mark.
    pub pages_touched: usize,

    /// Number of filled rectangles drawn.
    pub rects_drawn: usize,

    /// Number of comment markers drawn.
    pub markers_drawn: usize,

    /// Number of annotations skipped entirely.
    pub skipped: usize,
}

impl BurnReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, warning: BurnWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if nothing was skipped or warned about.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

impl fmt::Display for BurnReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Burn-in: {} rect(s) and {} marker(s) drawn on {} page(s)",
            self.rects_drawn, self.markers_drawn, self.pages_touched
        )?;
        if !self.warnings.is_empty() {
            writeln!(f, "{} annotation(s) skipped:", self.skipped)?;
            for warning in &self.warnings {
                writeln!(f, "  {}", warning)?;
            }
        }
        Ok(())
    }
}

/// A non-fatal problem during burn-in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BurnWarning {
    /// An annotation referenced a page outside the document's range; the
    /// annotation was skipped and the rest of the export completed.
    PageOutOfRange {
        annotation: Uuid,
        page: u32,
        page_count: usize,
    },
}

impl fmt::Display for BurnWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BurnWarning::PageOutOfRange {
                annotation,
                page,
                page_count,
            } => write!(
                f,
                "annotation {} targets page {} but the document has {} page(s)",
                annotation, page, page_count
            ),
        }
    }
}
