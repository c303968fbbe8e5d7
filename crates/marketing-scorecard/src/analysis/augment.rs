use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use super::report::{Narrative, Report};

/// External collaborator able to turn a finished report into narrative prose.
///
/// Implementations may block on network calls; the pipeline runs them on a blocking
/// task under a timeout and never lets their outcome touch scores or recommendations.
///
/// The timeout abandons a slow call, it does not cancel it: the blocking thread stays
/// busy until `enrich` returns. Implementations must bound their own I/O (connect and
/// read timeouts) so abandoned calls cannot pile up on the blocking pool.
pub trait InsightAugmenter: Send + Sync {
    fn provider(&self) -> &str;

    fn enrich(&self, report: &Report) -> Result<String, AugmentationError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AugmentationError {
    #[error("no insight provider is configured")]
    NotConfigured,
    #[error("insight provider `{provider}` failed: {message}")]
    Provider { provider: String, message: String },
    #[error("insight provider returned no text")]
    EmptyResponse,
    #[error("insight provider timed out after {0:?}")]
    TimedOut(Duration),
    #[error("insight task aborted: {0}")]
    TaskFailed(String),
}

/// Offline augmenter; every request resolves to an unavailable narrative.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAugmenter;

impl InsightAugmenter for NoopAugmenter {
    fn provider(&self) -> &str {
        "none"
    }

    fn enrich(&self, _report: &Report) -> Result<String, AugmentationError> {
        Err(AugmentationError::NotConfigured)
    }
}

/// Run the augmenter against a completed report and attach the resulting narrative.
///
/// Scorecard and plan are returned untouched whatever the augmenter does.
pub async fn augment_report(
    report: Report,
    augmenter: Arc<dyn InsightAugmenter>,
    timeout: Duration,
) -> Report {
    let provider = augmenter.provider().to_string();
    let snapshot = report.clone();
    let task = tokio::task::spawn_blocking(move || augmenter.enrich(&snapshot));

    let outcome = match tokio::time::timeout(timeout, task).await {
        Ok(Ok(result)) => result,
        Ok(Err(join_error)) => Err(AugmentationError::TaskFailed(join_error.to_string())),
        Err(_) => Err(AugmentationError::TimedOut(timeout)),
    };

    let narrative = match outcome {
        Ok(text) if text.trim().is_empty() => unavailable(&provider, AugmentationError::EmptyResponse),
        Ok(text) => {
            info!(provider = %provider, "report narrative augmented");
            Narrative::Augmented { provider, text }
        }
        Err(err) => unavailable(&provider, err),
    };

    report.with_narrative(narrative)
}

fn unavailable(provider: &str, err: AugmentationError) -> Narrative {
    warn!(provider = %provider, error = %err, "insight augmentation unavailable");
    Narrative::Unavailable {
        reason: err.to_string(),
    }
}
