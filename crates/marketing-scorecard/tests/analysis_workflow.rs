//! Integration specifications for the marketing analysis workflow.
//!
//! Scenarios exercise the public analyzer, batch importer and HTTP router end to end without
//! reaching into private modules.

mod common {
    use std::sync::{Arc, Mutex};

    use marketing_scorecard::analysis::{
        AnalysisService, BusinessInput, HistoryError, ReportExport, ReportHistory,
    };

    pub(super) fn bellas_boutique() -> BusinessInput {
        BusinessInput {
            business_name: "Bella's Boutique".to_string(),
            industry: "Retail".to_string(),
            website: Some("bellasboutique.wixsite.com/shop".to_string()),
            social_media: [("instagram".to_string(), "bellas_boutique".to_string())]
                .into_iter()
                .collect(),
            monthly_revenue: Some(25_000.0),
            marketing_budget: Some(1_500.0),
            target_audience: Some("Women aged 25-45 interested in affordable fashion".to_string()),
            channels: vec!["Instagram".to_string(), "Word of mouth".to_string()],
            competitors: vec!["Main Street Apparel".to_string()],
        }
    }

    #[derive(Default)]
    pub(super) struct RecordingHistory {
        entries: Mutex<Vec<ReportExport>>,
    }

    impl ReportHistory for RecordingHistory {
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

    pub(super) fn service() -> Arc<AnalysisService<RecordingHistory>> {
        Arc::new(AnalysisService::new(Arc::new(RecordingHistory::default())))
    }
}

use axum::body::Body;
use axum::http::{Request, StatusCode};
use marketing_scorecard::analysis::{
    analysis_router, BatchImporter, DeficitFlag, Dimension, MarketingAnalyzer, Narrative,
    RatingBand, RecommendationId, ReportExport, Tier,
};
use tower::ServiceExt;

#[test]
fn builder_hosted_boutique_is_led_by_social_strategy() {
    let report = MarketingAnalyzer::new()
        .analyze(common::bellas_boutique())
        .expect("analysis succeeds");

    let website = report.scorecard.dimension(Dimension::WebsiteQuality);
    assert_eq!(website.score, 50);
    assert_eq!(website.flags, vec![DeficitFlag::BuilderSubdomain]);

    assert_eq!(report.scorecard.rating(), RatingBand::Poor);
    let first = &report.plan.recommendations[0];
    assert_eq!(first.id, RecommendationId::SocialStrategy);
    assert_eq!(first.tier, Tier::Immediate);
    assert!(report
        .plan
        .recommendations
        .iter()
        .any(|r| r.id == RecommendationId::WebsiteBuild));
}

#[test]
fn export_round_trips_through_json() {
    let report = MarketingAnalyzer::new()
        .analyze(common::bellas_boutique())
        .expect("analysis succeeds");
    let export = report.export();

    let encoded = serde_json::to_string(&export).expect("export serializes");
    let decoded: ReportExport = serde_json::from_str(&encoded).expect("export deserializes");

    assert_eq!(decoded.schema_version, 1);
    assert_eq!(decoded.business_name, "Bella's Boutique");
    assert_eq!(decoded.recommendations, export.recommendations);
    assert_eq!(decoded.narrative, Narrative::NotRequested);
}

#[test]
fn batch_rows_feed_the_analyzer() {
    let csv = "name,industry,website,social_media,monthly_revenue,marketing_budget,target_audience,channels,competitors\n\
Joe's Pizza Shop,Restaurant,,,15000,500,,,\n\
Bella's Boutique,Retail,bellasboutique.wixsite.com,instagram:bellas_boutique,25000,1500,Women aged 25-45 interested in affordable fashion,Instagram;Word of mouth,\n\
,Retail,,,,,,,\n";

    let inputs = BatchImporter::from_reader(csv.as_bytes()).expect("batch parses");
    assert_eq!(inputs.len(), 3);

    let analyzer = MarketingAnalyzer::new();
    let outcomes: Vec<_> = inputs
        .into_iter()
        .map(|input| analyzer.analyze(input))
        .collect();

    assert_eq!(
        outcomes[0].as_ref().map(|r| r.scorecard.rating()).ok(),
        Some(RatingBand::Critical)
    );
    assert!(outcomes[1].is_ok());
    assert!(outcomes[2].is_err(), "blank business name is rejected");
}

#[tokio::test]
async fn router_serves_analysis_and_history() {
    let service = common::service();
    let router = analysis_router(service.clone());

    let body = serde_json::to_vec(&common::bellas_boutique()).expect("input serializes");
    let response = router
        .clone()
        .oneshot(
            Request::post("/api/v1/analysis")
                .header("content-type", "application/json")
                .body(Body::from(body))
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let response = router
        .oneshot(
            Request::get("/api/v1/analysis/history?limit=5")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    let history: Vec<ReportExport> = serde_json::from_slice(&bytes).expect("history payload");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].business_name, "Bella's Boutique");
}
