use super::error::{MsaPlotError, MsaResult};
use std::ops::Range;

/// Half-open range of alignment columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeqWindow {
    pub start: usize,
    pub end: usize,
}

impl SeqWindow {
    pub fn new(start: usize, end: usize) -> MsaResult<Self> {
        if start >= end {
            return Err(MsaPlotError::Validation(format!(
                "invalid window: start {} >= end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn from_string(encoding: &str) -> MsaResult<Self> {
        let error_msg = || MsaPlotError::Validation(format!("invalid window encoding: {}", encoding));
        let (start, end) = encoding.split_once('-').ok_or_else(error_msg)?;
        let start: usize = start.trim().parse().map_err(|_| error_msg())?;
        let end: usize = end.trim().parse().map_err(|_| error_msg())?;
        Self::new(start, end)
    }

    pub fn full(num_cols: usize) -> MsaResult<Self> {
        Self::new(0, num_cols)
    }

    /// Builds the window from optional bounds; a missing bound defaults to the alignment edge.
    pub fn resolve(start: Option<usize>, end: Option<usize>, num_cols: usize) -> MsaResult<Self> {
        let window = Self::new(start.unwrap_or(0), end.unwrap_or(num_cols))?;
        if window.end > num_cols {
            return Err(MsaPlotError::Validation(format!(
                "invalid window: end {} exceeds alignment length {}",
                window.end, num_cols
            )));
        }
        Ok(window)
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn columns(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn intersect(&self, start: usize, end: usize) -> Option<(usize, usize)> {
        let start = start.max(self.start);
        let end = end.min(self.end);
        (start < end).then_some((start, end))
    }

    /// Splits the window into consecutive line groups of at most `wrap` columns.
    pub fn chunks(&self, wrap: Option<usize>) -> Vec<SeqWindow> {
        let step = wrap.unwrap_or(self.len()).max(1);
        (self.start..self.end)
            .step_by(step)
            .map(|start| SeqWindow {
                start,
                end: (start + step).min(self.end),
            })
            .collect()
    }
}
