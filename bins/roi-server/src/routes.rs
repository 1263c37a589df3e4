//! Axum router and HTTP handlers.

use axum::extract::{RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use roi_core::constants::{
    ANNUAL_PAYABLES_SPEND, DAYS_TO_PROCESS, MANUAL_INTERVENTION_PCT, NON_PO_INVOICE_VOLUME,
    PO_INVOICE_VOLUME,
};
use roi_core::error::{LeadError, RoiError};
use roi_core::report::{touchless_benchmark_line, SavingsReport};
use roi_core::traits::SavingsCalculator;
use roi_core::types::Currency;
use roi_session::{decode, deliver, encode, share_url, LeadForm, LeadSubmission};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::AppState;

// ── Error helper ─────────────────────────────────────────────────────────────

struct ApiError(RoiError);

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            RoiError::Lead(LeadError::MissingEmail | LeadError::InvalidEmail(_)) => {
                StatusCode::BAD_REQUEST
            }
            RoiError::Lead(LeadError::AlreadySubmitting) => StatusCode::CONFLICT,
            RoiError::Lead(LeadError::Rejected(_) | LeadError::Unreachable(_)) => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "error": self.0.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

impl From<LeadError> for ApiError {
    fn from(e: LeadError) -> Self {
        ApiError(e.into())
    }
}

type ApiResult<T> = Result<Json<T>, ApiError>;

// ── Router ───────────────────────────────────────────────────────────────────

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/calculate", get(calculate))
        .route("/api/share", get(share))
        .route("/api/benchmarks", get(benchmarks))
        .route("/api/currencies", get(currencies))
        .route("/api/status", get(status))
        .route("/api/lead", post(lead))
        .layer(cors)
        .with_state(state)
}

// ── /api/calculate ───────────────────────────────────────────────────────────

/// `GET /api/calculate?<query>` — normalized inputs, metrics and display strings.
async fn calculate(State(s): State<AppState>, RawQuery(query): RawQuery) -> Json<Value> {
    let inputs = decode(query.as_deref().unwrap_or(""));
    let metrics = s.engine.derive(&inputs);

    Json(json!({
        "inputs":  inputs,
        "query":   encode(&inputs),
        "metrics": metrics,
        "report":  SavingsReport::new(&inputs, &metrics),
    }))
}

// ── /api/share ───────────────────────────────────────────────────────────────

/// `GET /api/share?<query>` — absolute share link on the public page URL.
async fn share(State(s): State<AppState>, RawQuery(query): RawQuery) -> Json<Value> {
    let inputs = decode(query.as_deref().unwrap_or(""));
    let url = share_url(&s.config.public_url, &inputs);
    Json(json!({ "url": url.as_str() }))
}

// ── /api/benchmarks, /api/currencies ─────────────────────────────────────────

async fn benchmarks(State(s): State<AppState>) -> Json<Value> {
    let b = s.engine.benchmarks();
    Json(json!({
        "benchmarks": b,
        "touchlessBenchmark": touchless_benchmark_line(b.touchless_rate.average, b.touchless_rate.best),
        "domains": {
            "po":     PO_INVOICE_VOLUME,
            "npo":    NON_PO_INVOICE_VOLUME,
            "days":   DAYS_TO_PROCESS,
            "manual": MANUAL_INTERVENTION_PCT,
            "spend":  ANNUAL_PAYABLES_SPEND,
        },
    }))
}

async fn currencies() -> Json<Value> {
    let list: Vec<Value> = Currency::ALL
        .iter()
        .map(|c| json!({ "code": c.code(), "symbol": c.symbol(), "name": c.name() }))
        .collect();
    Json(Value::Array(list))
}

// ── /api/status ──────────────────────────────────────────────────────────────

async fn status(State(s): State<AppState>) -> Json<Value> {
    Json(json!({
        "status":     "ok",
        "version":    env!("CARGO_PKG_VERSION"),
        "public_url": s.config.public_url.as_str(),
    }))
}

// ── /api/lead ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct LeadRequest {
    #[serde(flatten)]
    form: LeadForm,
    /// Calculator query string the report is requested for.
    #[serde(default)]
    query: String,
}

/// `POST /api/lead` — validate the form and deliver it with a calculator snapshot.
async fn lead(State(s): State<AppState>, Json(req): Json<LeadRequest>) -> ApiResult<Value> {
    req.form.validate()?;

    let inputs = decode(&req.query);
    let metrics = s.engine.derive(&inputs);
    let submission = LeadSubmission::new(&req.form, &inputs, &metrics);

    if let Err(e) = deliver(s.sink.as_ref(), &submission, s.config.lead_submit_delay).await {
        warn!(error = %e, email = %submission.email, "Lead delivery failed");
        return Err(e.into());
    }
    info!(email = %submission.email, "Lead delivered");

    let report = SavingsReport::new(&inputs, &metrics);
    Ok(Json(json!({
        "status": "submitted",
        "estimated_savings": report.payment_savings,
    })))
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use roi_calc::SavingsEngine;
    use roi_core::report::ALREADY_OPTIMIZED;
    use roi_session::LeadSink;
    use tower::ServiceExt;
    use url::Url;

    use super::*;
    use crate::config::Config;

    #[derive(Default)]
    struct CountingSink {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl LeadSink for CountingSink {
        async fn submit(&self, _lead: &LeadSubmission) -> Result<(), LeadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    struct DownSink;

    #[async_trait]
    impl LeadSink for DownSink {
        async fn submit(&self, _lead: &LeadSubmission) -> Result<(), LeadError> {
            Err(LeadError::Unreachable("crm offline".into()))
        }
    }

    fn state(sink: Arc<dyn LeadSink>) -> AppState {
        AppState {
            config: Arc::new(Config {
                bind_addr: "127.0.0.1:0".into(),
                public_url: Url::parse("https://ap.example.com/roi-calculator").unwrap(),
                lead_submit_delay: Duration::ZERO,
            }),
            engine: SavingsEngine::new(),
            sink,
        }
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn post_lead(app: Router, body: Value) -> (StatusCode, Value) {
        let req = Request::builder()
            .method(Method::POST)
            .uri("/api/lead")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn app() -> Router {
        router(state(Arc::new(CountingSink::default())))
    }

    #[tokio::test]
    async fn calculate_defaults() {
        let (status, body) = get_json(app(), "/api/calculate").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["query"],
            "c=USD&po=100000&npo=50000&days=10&manual=35&spend=100000000"
        );
        assert_eq!(body["inputs"]["currency"], "USD");
        assert_eq!(body["report"]["poCycleTime"], "3.3 – 7 days");
        assert_eq!(body["report"]["paymentSavings"], "$99,750 – $187,500");
    }

    #[tokio::test]
    async fn calculate_normalizes_query() {
        let (_, body) = get_json(app(), "/api/calculate?c=EUR&days=0.2&po=abc").await;
        assert_eq!(body["inputs"]["currentDaysToProcess"], 1.0);
        assert_eq!(body["inputs"]["poInvoiceVolume"], 100_000);
        assert_eq!(body["report"]["poCycleTime"], ALREADY_OPTIMIZED);
        assert!(body["query"].as_str().unwrap().starts_with("c=EUR&"));
    }

    #[tokio::test]
    async fn share_uses_public_url() {
        let (_, body) = get_json(app(), "/api/share?manual=50&c=GBP").await;
        assert_eq!(
            body["url"],
            "https://ap.example.com/roi-calculator?c=GBP&po=100000&npo=50000&days=10&manual=50&spend=100000000"
        );
    }

    #[tokio::test]
    async fn benchmarks_and_currencies() {
        let (_, body) = get_json(app(), "/api/benchmarks").await;
        assert_eq!(body["benchmarks"]["poCycleTime"]["average"], 6.7);
        assert_eq!(body["touchlessBenchmark"], "66.7% – 93.7%");
        assert_eq!(body["domains"]["spend"]["max"], 2_000_000_000i64);

        let (_, body) = get_json(app(), "/api/currencies").await;
        let list = body.as_array().unwrap();
        assert_eq!(list.len(), 9);
        assert_eq!(list[0]["code"], "USD");
        assert_eq!(list[8]["symbol"], "kr");
    }

    #[tokio::test]
    async fn status_reports_ok() {
        let (status, body) = get_json(app(), "/api/status").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn lead_is_delivered() {
        let sink = Arc::new(CountingSink::default());
        let app = router(state(sink.clone()));
        let (status, body) = post_lead(
            app,
            json!({ "email": "ap@acme.test", "company": "Acme", "query": "spend=200000000" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "submitted");
        assert_eq!(body["estimated_savings"], "$199,500 – $375,000");
        assert_eq!(sink.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn lead_without_email_is_rejected() {
        let sink = Arc::new(CountingSink::default());
        let app = router(state(sink.clone()));
        let (status, body) = post_lead(app, json!({ "email": " ", "name": "Sam" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "work email is required");
        assert_eq!(sink.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn lead_without_email_key_is_bad_request() {
        let sink = Arc::new(CountingSink::default());
        let app = router(state(sink.clone()));
        let (status, body) = post_lead(app, json!({ "name": "Sam", "company": "Acme" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "work email is required");
        assert_eq!(sink.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn lead_sink_failure_is_bad_gateway() {
        let app = router(state(Arc::new(DownSink)));
        let (status, body) = post_lead(app, json!({ "email": "ap@acme.test" })).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body["error"].as_str().unwrap().contains("crm offline"));
    }
}
