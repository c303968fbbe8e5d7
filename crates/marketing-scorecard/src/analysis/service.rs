use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use super::augment::{augment_report, InsightAugmenter, NoopAugmenter};
use super::history::{HistoryError, ReportHistory};
use super::pipeline::{AnalysisError, MarketingAnalyzer};
use super::profile::{BusinessInput, QuickInput};
use super::report::{QuickAssessment, Report, ReportExport};

pub const DEFAULT_AUGMENT_TIMEOUT: Duration = Duration::from_secs(5);

/// Service composing the analyzer, the optional augmenter and session history.
pub struct AnalysisService<H> {
    analyzer: Arc<MarketingAnalyzer>,
    history: Arc<H>,
    augmenter: Arc<dyn InsightAugmenter>,
    augment_timeout: Duration,
}

impl<H> AnalysisService<H>
where
    H: ReportHistory + 'static,
{
    pub fn new(history: Arc<H>) -> Self {
        Self {
            analyzer: Arc::new(MarketingAnalyzer::new()),
            history,
            augmenter: Arc::new(NoopAugmenter),
            augment_timeout: DEFAULT_AUGMENT_TIMEOUT,
        }
    }

    pub fn with_augmenter(mut self, augmenter: Arc<dyn InsightAugmenter>, timeout: Duration) -> Self {
        self.augmenter = augmenter;
        self.augment_timeout = timeout;
        self
    }

    pub fn with_analyzer(mut self, analyzer: MarketingAnalyzer) -> Self {
        self.analyzer = Arc::new(analyzer);
        self
    }

    /// Run the full pipeline, optionally augment the narrative, and record the export.
    ///
    /// The history write runs on the blocking pool. A failure is logged and does not
    /// discard the report.
    pub async fn analyze(
        &self,
        input: BusinessInput,
        augment: bool,
    ) -> Result<Report, AnalysisServiceError> {
        let report = self.analyzer.analyze(input)?;

        let report = if augment {
            augment_report(report, self.augmenter.clone(), self.augment_timeout).await
        } else {
            report
        };

        let history = self.history.clone();
        let export = report.export();
        match tokio::task::spawn_blocking(move || history.record(&export)).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => warn!(
                business = report.profile.business_name(),
                error = %err,
                "failed to record report in history"
            ),
            Err(err) => warn!(
                business = report.profile.business_name(),
                error = %err,
                "history write task aborted"
            ),
        }

        Ok(report)
    }

    pub fn quick(&self, input: QuickInput) -> Result<QuickAssessment, AnalysisServiceError> {
        Ok(self.analyzer.quick(input)?)
    }

    pub fn history(&self, limit: usize) -> Result<Vec<ReportExport>, AnalysisServiceError> {
        Ok(self.history.recent(limit)?)
    }
}

/// Error raised by the analysis service.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisServiceError {
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    #[error(transparent)]
    History(#[from] HistoryError),
}
