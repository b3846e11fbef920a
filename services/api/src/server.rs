use crate::cli::ServeArgs;
use crate::infra::{default_exporter, AppState};
use crate::routes::app;
use axum_prometheus::PrometheusMetricLayer;
use love_notes::config::AppConfig;
use love_notes::error::AppError;
use love_notes::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let exporter = default_exporter();
    let export_format = exporter.format();
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        exporter,
    };

    let app = app(app_state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        export_format = export_format.label(),
        "love notes service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
