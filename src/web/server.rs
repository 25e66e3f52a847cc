use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::cors::CorsLayer;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;

use crate::catalog::source::{CatalogFile, RecordSource};
use crate::catalog::store::SpeciesCatalog;
use crate::cli::{load_catalog, ServeArgs};
use crate::core::record::SpeciesRecord;
use crate::core::region::{BarcodeRegion, RegionPrototypes};
use crate::core::sequence::normalize;
use crate::matching::classifier::classify;
use crate::matching::engine::{list_samples, search, AnalysisError};
use crate::utils::validation::check_sequence_length;

/// Request body limit; comfortably above a maximum-length sequence in JSON
pub const MAX_BODY_SIZE: usize = 1024 * 1024; // 1MB
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const MAX_CONCURRENT_REQUESTS: usize = 100;
pub const RATE_LIMIT_PER_SECOND: u64 = 10;
pub const RATE_LIMIT_BURST: u32 = 50;

/// Shared application state
pub struct AppState {
    /// Fixed at startup
    pub prototypes: RegionPrototypes,
    /// Queried on every request
    pub records: Arc<dyn RecordSource>,
}

impl AppState {
    pub fn new(prototypes: RegionPrototypes, records: Arc<dyn RecordSource>) -> Self {
        Self {
            prototypes,
            records,
        }
    }

    /// Serve a catalog held in memory
    pub fn from_catalog(catalog: SpeciesCatalog) -> Self {
        let prototypes = catalog.prototypes.clone();
        Self::new(prototypes, Arc::new(catalog))
    }
}

#[derive(Deserialize)]
struct AnalyzeRequest {
    sequence: String,
}

/// Enhanced error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_type: String,
    pub details: Option<String>,
}

/// Create a safe error response that prevents information disclosure
/// while logging detailed errors server-side for debugging
pub fn create_safe_error_response(
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> ErrorResponse {
    if let Some(internal_msg) = internal_error {
        tracing::error!("Internal error ({}): {}", error_type, internal_msg);
    }

    ErrorResponse {
        error: user_message.to_string(),
        error_type: error_type.to_string(),
        details: None,
    }
}

fn error_reply(
    status: StatusCode,
    error_type: &str,
    user_message: &str,
    internal_error: Option<&str>,
) -> Response {
    (
        status,
        Json(create_safe_error_response(
            error_type,
            user_message,
            internal_error,
        )),
    )
        .into_response()
}

fn catalog_unavailable(internal_error: &str) -> Response {
    error_reply(
        StatusCode::SERVICE_UNAVAILABLE,
        "catalog_unavailable",
        "Reference catalog is temporarily unavailable",
        Some(internal_error),
    )
}

/// Run the web server
///
/// # Errors
///
/// Returns an error if the tokio runtime cannot be created or the server fails to start.
pub fn run(args: ServeArgs) -> anyhow::Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move { run_server(args).await })
}

/// Routes and every middleware layer except rate limiting.
///
/// The rate limiter keys on the peer address, which only exists when served
/// with connect info; this router can be driven in-process.
pub fn build_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(greeting_handler))
        .route("/api/analyze", post(analyze_handler))
        .route("/api/samples", get(samples_handler))
        .route("/api/catalog", get(catalog_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                // Security headers for browser protection
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-content-type-options"),
                    HeaderValue::from_static("nosniff"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("x-frame-options"),
                    HeaderValue::from_static("DENY"),
                ))
                .layer(SetResponseHeaderLayer::if_not_present(
                    HeaderName::from_static("referrer-policy"),
                    HeaderValue::from_static("strict-origin-when-cross-origin"),
                ))
                // Browser front-ends are served from other origins
                .layer(CorsLayer::permissive())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    REQUEST_TIMEOUT,
                ))
                .layer(ConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
                .layer(DefaultBodyLimit::max(MAX_BODY_SIZE)),
        )
}

/// Create the application router with all routes and middleware configured.
///
/// # Errors
///
/// Returns an error if the rate limiter configuration is rejected.
pub fn create_router(state: Arc<AppState>) -> anyhow::Result<Router> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(RATE_LIMIT_PER_SECOND)
        .burst_size(RATE_LIMIT_BURST)
        .finish()
        .ok_or_else(|| anyhow::anyhow!("Invalid rate limit configuration"))?;

    Ok(build_app(state).layer(GovernorLayer {
        config: Arc::new(governor_conf),
    }))
}

async fn run_server(args: ServeArgs) -> anyhow::Result<()> {
    let catalog = load_catalog(args.catalog.as_deref())?;

    let state = match (&args.catalog, args.live) {
        (Some(path), true) => {
            tracing::info!(path = %path.display(), "Catalog file is re-read on every request");
            AppState::new(catalog.prototypes, Arc::new(CatalogFile::new(path)))
        }
        _ => AppState::from_catalog(catalog),
    };

    let app = create_router(Arc::new(state))?;

    let addr = format!("{}:{}", args.address, args.port);
    tracing::info!("Starting barcode-solver web server at http://{addr}");

    if args.open {
        if let Err(e) = open::that(format!("http://{addr}")) {
            tracing::warn!("Could not open browser: {e}");
        }
    }

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Fetch a record snapshot off the async runtime
async fn fetch_records(
    source: Arc<dyn RecordSource>,
    region: Option<BarcodeRegion>,
) -> Result<Vec<SpeciesRecord>, String> {
    match tokio::task::spawn_blocking(move || source.snapshot(region)).await {
        Ok(Ok(records)) => Ok(records),
        Ok(Err(e)) => Err(e.to_string()),
        Err(e) => Err(format!("snapshot task failed: {e}")),
    }
}

async fn greeting_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "Hello": "World!" }))
}

/// Identify the species for one raw sequence
async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let raw = match body {
        Ok(Json(request)) => request.sequence,
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            return error_reply(
                StatusCode::PAYLOAD_TOO_LARGE,
                "sequence_too_long",
                "Request body is too large",
                None,
            )
        }
        Err(rejection) => {
            tracing::debug!("Rejected analyze request: {}", rejection.body_text());
            return error_reply(
                StatusCode::BAD_REQUEST,
                "no_sequence",
                "No sequence provided",
                None,
            );
        }
    };

    if let Err(e) = check_sequence_length(&raw) {
        return error_reply(
            StatusCode::PAYLOAD_TOO_LARGE,
            "sequence_too_long",
            &e.to_string(),
            None,
        );
    }

    let seq = match normalize(&raw) {
        Ok(seq) => seq,
        Err(e) => {
            let e = AnalysisError::from(e);
            tracing::debug!("Invalid sequence: {e}");
            return error_reply(
                StatusCode::BAD_REQUEST,
                "invalid_sequence",
                &e.to_string(),
                None,
            );
        }
    };

    let region = classify(&seq, &state.prototypes);
    let result = match region {
        Some(region) => match fetch_records(state.records.clone(), Some(region)).await {
            Ok(candidates) => search(&seq, Some(region), &candidates),
            Err(e) => return catalog_unavailable(&e),
        },
        None => None,
    };

    match result {
        Some(result) => {
            tracing::info!(
                species = %result.species_id,
                region = %result.barcode_region,
                score = result.confidence_score,
                "Identified sequence"
            );
            Json(result).into_response()
        }
        None => {
            let e = AnalysisError::NoMatch { region };
            tracing::debug!("{e}");
            error_reply(StatusCode::BAD_REQUEST, "no_match", &e.to_string(), None)
        }
    }
}

/// One representative sequence per common name
async fn samples_handler(State(state): State<Arc<AppState>>) -> Response {
    match fetch_records(state.records.clone(), None).await {
        Ok(records) => Json(list_samples(&records)).into_response(),
        Err(e) => catalog_unavailable(&e),
    }
}

async fn catalog_handler(State(state): State<Arc<AppState>>) -> Response {
    let records = match fetch_records(state.records.clone(), None).await {
        Ok(records) => records,
        Err(e) => return catalog_unavailable(&e),
    };

    let regions: Vec<serde_json::Value> = state
        .prototypes
        .iter()
        .map(|(region, prototype)| {
            serde_json::json!({
                "region": region,
                "prototype": prototype,
            })
        })
        .collect();

    let summaries: Vec<serde_json::Value> = records
        .iter()
        .map(|r| {
            serde_json::json!({
                "id": r.id.0,
                "species": r.species,
                "common_name": r.common_name,
                "regions": r.barcodes.keys().collect::<Vec<_>>(),
                "authenticity": r.authenticity_weight(),
            })
        })
        .collect();

    Json(serde_json::json!({
        "count": summaries.len(),
        "regions": regions,
        "records": summaries,
    }))
    .into_response()
}
