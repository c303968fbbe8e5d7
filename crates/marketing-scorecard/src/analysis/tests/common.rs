use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::ThreadId;
use std::time::Duration;

use axum::response::Response;
use serde_json::Value;

use crate::analysis::{
    analysis_router, AnalysisService, AugmentationError, BusinessInput, BusinessProfile, Dimension,
    DimensionScore, HistoryError, InsightAugmenter, Report, ReportExport, ReportHistory, Scorecard,
};

/// No website, no social presence, thin budget, nothing else supplied.
pub(super) fn scenario_a_input() -> BusinessInput {
    BusinessInput {
        business_name: "Joe's Pizza Shop".to_string(),
        industry: "Restaurant".to_string(),
        monthly_revenue: Some(15_000.0),
        marketing_budget: Some(500.0),
        ..BusinessInput::default()
    }
}

/// Established consultancy with a secure custom domain and two social handles.
pub(super) fn scenario_b_input() -> BusinessInput {
    let mut social_media = BTreeMap::new();
    social_media.insert("linkedin".to_string(), "northwindconsulting".to_string());
    social_media.insert("twitter".to_string(), "@nwc_advisory".to_string());

    BusinessInput {
        business_name: "Northwind Consulting".to_string(),
        industry: "Professional Services".to_string(),
        website: Some("https://www.northwindconsulting.com".to_string()),
        social_media,
        monthly_revenue: Some(50_000.0),
        marketing_budget: Some(5_000.0),
        target_audience: Some("Small business owners".to_string()),
        channels: vec![
            "LinkedIn".to_string(),
            "Content".to_string(),
            "Email".to_string(),
        ],
        competitors: Vec::new(),
    }
}

/// Secure custom domain, no social accounts, email and print only, spending 15% of revenue.
pub(super) fn direct_mail_input() -> BusinessInput {
    BusinessInput {
        business_name: "Harbor Print Co".to_string(),
        industry: "Printing".to_string(),
        website: Some("https://harborprint.com".to_string()),
        monthly_revenue: Some(10_000.0),
        marketing_budget: Some(1_500.0),
        channels: vec!["Email".to_string(), "Flyers".to_string()],
        ..BusinessInput::default()
    }
}

pub(super) fn profile(input: BusinessInput) -> BusinessProfile {
    BusinessProfile::build(input).expect("fixture input is valid")
}

pub(super) fn uniform_scorecard(score: u8) -> Scorecard {
    Scorecard::aggregate(Dimension::ALL.map(|dimension| DimensionScore::new(dimension, score)))
}

#[derive(Default, Clone)]
pub(super) struct MemoryHistory {
    pub(super) entries: Arc<Mutex<Vec<ReportExport>>>,
}

impl MemoryHistory {
    pub(super) fn len(&self) -> usize {
        self.entries.lock().expect("history mutex poisoned").len()
    }
}

impl ReportHistory for MemoryHistory {
    fn record(&self, report: &ReportExport) -> Result<(), HistoryError> {
        self.entries
            .lock()
            .expect("history mutex poisoned")
            .push(report.clone());
        Ok(())
    }

    fn recent(&self, limit: usize) -> Result<Vec<ReportExport>, HistoryError> {
        let guard = self.entries.lock().expect("history mutex poisoned");
        Ok(guard.iter().rev().take(limit).cloned().collect())
    }
}

pub(super) struct UnavailableHistory;

impl ReportHistory for UnavailableHistory {
    fn record(&self, _report: &ReportExport) -> Result<(), HistoryError> {
        Err(HistoryError::Unavailable("disk offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<ReportExport>, HistoryError> {
        Err(HistoryError::Unavailable("disk offline".to_string()))
    }
}

/// Remembers which thread performed each write.
#[derive(Default)]
pub(super) struct ThreadRecordingHistory {
    pub(super) writers: Mutex<Vec<ThreadId>>,
}

impl ReportHistory for ThreadRecordingHistory {
    fn record(&self, _report: &ReportExport) -> Result<(), HistoryError> {
        self.writers
            .lock()
            .expect("history mutex poisoned")
            .push(std::thread::current().id());
        Ok(())
    }

    fn recent(&self, _limit: usize) -> Result<Vec<ReportExport>, HistoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct StaticAugmenter(pub(super) &'static str);

impl InsightAugmenter for StaticAugmenter {
    fn provider(&self) -> &str {
        "static"
    }

    fn enrich(&self, report: &Report) -> Result<String, AugmentationError> {
        Ok(format!(
            "{} for {}",
            self.0,
            report.profile.business_name()
        ))
    }
}

pub(super) struct FailingAugmenter;

impl InsightAugmenter for FailingAugmenter {
    fn provider(&self) -> &str {
        "failing"
    }

    fn enrich(&self, _report: &Report) -> Result<String, AugmentationError> {
        Err(AugmentationError::Provider {
            provider: "failing".to_string(),
            message: "quota exceeded".to_string(),
        })
    }
}

pub(super) struct SlowAugmenter(pub(super) Duration);

impl InsightAugmenter for SlowAugmenter {
    fn provider(&self) -> &str {
        "slow"
    }

    fn enrich(&self, _report: &Report) -> Result<String, AugmentationError> {
        std::thread::sleep(self.0);
        Ok("too late to matter".to_string())
    }
}

pub(super) fn build_service() -> (AnalysisService<MemoryHistory>, Arc<MemoryHistory>) {
    let history = Arc::new(MemoryHistory::default());
    let service = AnalysisService::new(history.clone());
    (service, history)
}

pub(super) fn analysis_router_with_service(
    service: AnalysisService<MemoryHistory>,
) -> axum::Router {
    analysis_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

/// Sleeps, then marks itself finished.
pub(super) struct TrackedSlowAugmenter {
    pub(super) delay: Duration,
    pub(super) finished: Arc<AtomicBool>,
}

impl InsightAugmenter for TrackedSlowAugmenter {
    fn provider(&self) -> &str {
        "tracked"
    }

    fn enrich(&self, _report: &Report) -> Result<String, AugmentationError> {
        std::thread::sleep(self.delay);
        self.finished.store(true, Ordering::SeqCst);
        Ok("finished".to_string())
    }
}
