use crate::cli::ServeArgs;
use crate::infra::{AppState, JsonFileHistory};
use crate::routes::with_analysis_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use marketing_scorecard::analysis::{AnalysisService, NoopAugmenter};
use marketing_scorecard::config::AppConfig;
use marketing_scorecard::error::AppError;
use marketing_scorecard::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let history = Arc::new(JsonFileHistory::new(config.history.path.clone()));
    let analysis_service = Arc::new(
        AnalysisService::new(history)
            .with_augmenter(Arc::new(NoopAugmenter), config.augmentation.timeout),
    );

    let app = with_analysis_routes(analysis_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        history = %config.history.path.display(),
        "marketing scorecard service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
