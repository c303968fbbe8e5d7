use super::report::ReportExport;

/// Session history of exported reports, newest last.
pub trait ReportHistory: Send + Sync {
    fn record(&self, report: &ReportExport) -> Result<(), HistoryError>;

    /// Most recent reports, newest first, at most `limit` entries.
    fn recent(&self, limit: usize) -> Result<Vec<ReportExport>, HistoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("history storage unavailable: {0}")]
    Unavailable(String),
    #[error("history entry could not be encoded: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("history file error: {0}")]
    Io(#[from] std::io::Error),
}
