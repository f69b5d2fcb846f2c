use super::request::PanelKind;
use thiserror::Error;

pub type MsaResult<T> = std::result::Result<T, MsaPlotError>;

#[derive(Debug, Error, PartialEq)]
pub enum MsaPlotError {
    /// Malformed request shape: ragged rows, bad window, mismatched counts
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Missing required data: {field} must be a non-empty list for the {panel} panel")]
    MissingData {
        field: &'static str,
        panel: PanelKind,
    },

    #[error("Unknown panel kind {0:?}. Options are: msa, consensus, logo, annotation")]
    UnknownPanelKind(String),

    #[error("Unknown plot type {0:?}. Options are: msa, consensus, logo, annotation, complex")]
    UnknownPlotType(String),

    #[error("Rendering failed: {0}")]
    Render(String),
}

impl MsaPlotError {
    pub fn validation(message: impl Into<String>) -> Self {
        MsaPlotError::Validation(message.into())
    }
}
