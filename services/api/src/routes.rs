use crate::infra::{deserialize_optional_date, AppState};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{Local, NaiveDate};
use love_notes::error::AppError;
use love_notes::letter::{CharBudget, LetterFields, LetterView};
use love_notes::score::ScoreReading;
use love_notes::theme::{Theme, THEME_STORAGE_KEY};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ScoreRequest {
    pub(crate) name_a: String,
    pub(crate) name_b: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LetterRequest {
    #[serde(flatten)]
    pub(crate) fields: LetterFields,
    /// Overrides the server's local date when `date` is blank.
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

impl LetterRequest {
    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct LetterTextResponse {
    pub(crate) text: String,
    pub(crate) view: LetterView,
    pub(crate) char_budget: CharBudget,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ThemeRequest {
    pub(crate) stored: Option<String>,
    pub(crate) prefers_dark: bool,
}

#[derive(Debug, Serialize)]
pub(crate) struct ThemeResponse {
    pub(crate) theme: Theme,
    pub(crate) toggled: Theme,
    pub(crate) aria_pressed: bool,
    pub(crate) storage_key: &'static str,
}

pub(crate) fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/score", post(score_endpoint))
        .route("/api/v1/letter/text", post(letter_text_endpoint))
        .route("/api/v1/letter/export", post(letter_export_endpoint))
        .route("/api/v1/theme", post(theme_endpoint))
        .layer(Extension(state))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn score_endpoint(
    Json(payload): Json<ScoreRequest>,
) -> Result<Json<ScoreReading>, AppError> {
    let reading = ScoreReading::for_names(&payload.name_a, &payload.name_b)?;
    debug!(score = reading.score.value(), tier = reading.tier.label(), "scored name pair");
    Ok(Json(reading))
}

pub(crate) async fn letter_text_endpoint(
    Json(payload): Json<LetterRequest>,
) -> Json<LetterTextResponse> {
    let view = payload.fields.view_on(payload.today());
    Json(LetterTextResponse {
        text: view.text(),
        view,
        char_budget: payload.fields.char_budget(),
    })
}

pub(crate) async fn letter_export_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<LetterRequest>,
) -> Result<Response, AppError> {
    let export = state
        .exporter
        .export(&payload.fields, payload.today())
        .await?;

    let content_type = HeaderValue::from_str(export.image.format.mime().as_ref())
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        export.file_name
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    info!(file_name = %export.file_name, "letter export served");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.image.bytes,
    )
        .into_response())
}

pub(crate) async fn theme_endpoint(Json(payload): Json<ThemeRequest>) -> Json<ThemeResponse> {
    let theme = Theme::resolve(payload.stored.as_deref(), payload.prefers_dark);
    Json(ThemeResponse {
        theme,
        toggled: theme.toggled(),
        aria_pressed: theme.is_dark(),
        storage_key: THEME_STORAGE_KEY,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::test_state;
    use axum::body::Body;
    use axum::http::Request;
    use love_notes::letter::{
        ExportError, ImageFormat, LetterExporter, LetterRenderer, RenderedImage,
    };
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn read_json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds")
    }

    #[tokio::test]
    async fn score_endpoint_returns_reading() {
        let request = ScoreRequest {
            name_a: " Alice ".to_string(),
            name_b: "BOB".to_string(),
        };

        let Json(body) = score_endpoint(Json(request)).await.expect("valid names");

        assert_eq!(body.score.value(), 49);
        assert_eq!(body.message, "Take it slow — interesting dynamics ⚖️");
    }

    #[tokio::test]
    async fn score_route_rejects_blank_names() {
        let router = app(test_state(true));

        let response = router
            .oneshot(post_json("/api/v1/score", json!({ "name_a": "Alice" })))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let payload = read_json_body(response).await;
        assert_eq!(payload["score"], "invalid");
        assert_eq!(payload["message"], "Please enter both names.");
    }

    #[tokio::test]
    async fn letter_text_route_applies_placeholders() {
        let router = app(test_state(true));

        let response = router
            .oneshot(post_json(
                "/api/v1/letter/text",
                json!({ "body": "Hello", "today": "2026-02-14" }),
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        let payload = read_json_body(response).await;
        assert_eq!(
            payload["text"],
            "February 14, 2026\n\nMy Dearest [Recipient],\n\nHello\nWith all my love,\n[Your Name]"
        );
        assert_eq!(payload["char_budget"]["used"], 5);
        assert_eq!(payload["char_budget"]["level"], "normal");
    }

    #[tokio::test]
    async fn letter_text_keeps_explicit_date() {
        let request = LetterRequest {
            fields: LetterFields {
                recipient: "Sam".to_string(),
                sender: "Jo".to_string(),
                date: Some("Spring".to_string()),
                body: "Hi".to_string(),
            },
            today: None,
        };

        let Json(body) = letter_text_endpoint(Json(request)).await;

        assert_eq!(body.text, "Spring\n\nSam\n\nHi\nWith all my love,\nJo");
    }

    #[tokio::test]
    async fn export_route_serves_attachment() {
        let router = app(test_state(true));

        let response = router
            .oneshot(post_json(
                "/api/v1/letter/export",
                json!({ "recipient": "Sam", "body": "Hi", "today": "2026-02-14" }),
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            HeaderValue::from_static("image/svg+xml")
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            HeaderValue::from_static("attachment; filename=\"Sam.svg\"")
        );
        let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .expect("read body");
        assert!(body.starts_with(b"<svg"));
    }

    #[derive(Debug)]
    struct PngRenderer;

    #[async_trait::async_trait]
    impl LetterRenderer for PngRenderer {
        fn format(&self) -> ImageFormat {
            ImageFormat::Png
        }

        async fn render(&self, _view: &LetterView) -> Result<RenderedImage, ExportError> {
            Ok(RenderedImage {
                format: ImageFormat::Png,
                bytes: b"\x89PNG\r\n\x1a\n".to_vec(),
            })
        }
    }

    #[tokio::test]
    async fn export_content_type_follows_rendered_format() {
        let state = AppState {
            exporter: LetterExporter::new(Arc::new(PngRenderer)),
            ..test_state(true)
        };
        let router = app(state);

        let response = router
            .oneshot(post_json(
                "/api/v1/letter/export",
                json!({ "recipient": "notes.svg", "today": "2026-02-14" }),
            ))
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            HeaderValue::from_static("image/png")
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            HeaderValue::from_static("attachment; filename=\"notes.svg.png\"")
        );
    }

    #[tokio::test]
    async fn export_route_rejects_malformed_today() {
        let router = app(test_state(true));

        let response = router
            .oneshot(post_json(
                "/api/v1/letter/export",
                json!({ "today": "Valentine's Day" }),
            ))
            .await
            .expect("route executes");

        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn theme_route_resolves_preference() {
        let router = app(test_state(true));

        let response = router
            .oneshot(post_json("/api/v1/theme", json!({ "prefers_dark": true })))
            .await
            .expect("route executes");

        let payload = read_json_body(response).await;
        assert_eq!(payload["theme"], "dark");
        assert_eq!(payload["toggled"], "light");
        assert_eq!(payload["aria_pressed"], true);
        assert_eq!(payload["storage_key"], "theme");
    }

    #[tokio::test]
    async fn readiness_reports_initializing_until_bound() {
        let router = app(test_state(false));

        let response = router
            .oneshot(
                Request::get("/ready")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("route executes");

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let payload = read_json_body(response).await;
        assert_eq!(payload["status"], "initializing");
    }
}
