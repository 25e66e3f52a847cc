//! Resource limit tests
//!
//! Oversized or abusive input must be rejected quickly and without taking
//! the service down for other clients.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use barcode_solver::parsing::fasta::parse_query_text;
use barcode_solver::parsing::ParseError;
use barcode_solver::utils::validation::{
    check_record_limit, check_sequence_length, ValidationError, MAX_QUERIES, MAX_RECORDS,
    MAX_SEQUENCE_LENGTH,
};
use barcode_solver::web::server::{build_app, AppState, MAX_BODY_SIZE, MAX_CONCURRENT_REQUESTS};
use barcode_solver::SpeciesCatalog;
use tokio::time::timeout;
use tower::ServiceExt;

const GINSENG_ITS: &str = "CGTAACAAGGTTTCCGTAGGTGAACCTGCGGAAGGATCATTGTCGAAACCTGCATAGCAGAA";

fn analyze_request(sequence: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({ "sequence": sequence }).to_string(),
        ))
        .unwrap()
}

/// Sequence length limit is enforced on the raw text, whitespace included
#[test]
fn test_sequence_length_limit() {
    assert!(check_sequence_length(&"A".repeat(MAX_SEQUENCE_LENGTH)).is_ok());
    assert_eq!(
        check_sequence_length(&"A".repeat(MAX_SEQUENCE_LENGTH + 1)),
        Err(ValidationError::SequenceTooLong(MAX_SEQUENCE_LENGTH + 1))
    );

    let padded = format!("{}{}", "A".repeat(MAX_SEQUENCE_LENGTH), " ".repeat(10));
    assert!(check_sequence_length(&padded).is_err());
}

/// Record limit applies to catalog size
#[test]
fn test_record_limit() {
    assert!(check_record_limit(MAX_RECORDS).is_ok());
    assert_eq!(
        check_record_limit(MAX_RECORDS + 1),
        Err(ValidationError::TooManyRecords(MAX_RECORDS + 1))
    );
}

/// FASTA input with too many records is refused rather than buffered
#[test]
fn test_query_count_limit() {
    let mut fasta = String::new();
    for i in 0..=MAX_QUERIES {
        fasta.push_str(&format!(">q{i}\nACGT\n"));
    }

    assert!(matches!(
        parse_query_text(&fasta),
        Err(ParseError::Limit(ValidationError::TooManyQueries))
    ));
}

/// A maximum-length sequence fits within the request body limit
#[test]
fn test_body_limit_accommodates_max_sequence() {
    let body = serde_json::json!({ "sequence": "A".repeat(MAX_SEQUENCE_LENGTH) }).to_string();
    assert!(body.len() < MAX_BODY_SIZE);
}

/// Oversized requests are rejected well inside the request timeout
#[tokio::test]
async fn test_oversized_request_rejected_quickly() {
    let app = build_app(Arc::new(AppState::from_catalog(
        SpeciesCatalog::load_embedded().unwrap(),
    )));

    let start = Instant::now();
    let response = timeout(
        Duration::from_secs(5),
        app.oneshot(analyze_request(&"ACGT".repeat(MAX_BODY_SIZE / 2))),
    )
    .await
    .expect("request should not hang")
    .unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(start.elapsed() < Duration::from_secs(5));
}

/// A worst-case valid sequence is analyzed without timing out
#[tokio::test]
async fn test_max_length_sequence_completes() {
    let app = build_app(Arc::new(AppState::from_catalog(
        SpeciesCatalog::load_embedded().unwrap(),
    )));

    let sequence = "ACGT".repeat(MAX_SEQUENCE_LENGTH / 4);
    let response = timeout(Duration::from_secs(10), app.oneshot(analyze_request(&sequence)))
        .await
        .expect("analysis should finish promptly")
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

/// Concurrent requests up to the concurrency limit are all served
#[tokio::test]
async fn test_concurrent_requests_served() {
    let app = build_app(Arc::new(AppState::from_catalog(
        SpeciesCatalog::load_embedded().unwrap(),
    )));

    let mut handles = Vec::new();
    for _ in 0..MAX_CONCURRENT_REQUESTS / 2 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            app.oneshot(analyze_request(GINSENG_ITS)).await.unwrap().status()
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }
}

/// Rejected requests do not affect later ones
#[tokio::test]
async fn test_recovery_after_bad_requests() {
    let app = build_app(Arc::new(AppState::from_catalog(
        SpeciesCatalog::load_embedded().unwrap(),
    )));

    for bad in ["xyz123", "", "\u{0}\u{0}\u{0}", "ÄÖÜ"] {
        let status = app.clone().oneshot(analyze_request(bad)).await.unwrap().status();
        assert_eq!(status, StatusCode::BAD_REQUEST, "input {bad:?}");
    }

    let status = app.oneshot(analyze_request(GINSENG_ITS)).await.unwrap().status();
    assert_eq!(status, StatusCode::OK);
}
