//! HTTP API for sequence identification.
//!
//! A small JSON service built on Axum. Every request analyzes against a fresh
//! record snapshot, so a live catalog file picks up edits without a restart.
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8000
//! barcode-solver serve
//!
//! # Custom port and auto-open browser
//! barcode-solver serve --port 3000 --open
//!
//! # Serve a catalog file, re-reading it on every request
//! barcode-solver serve --catalog my_plants.json --live
//! ```
//!
//! ## API Endpoints
//!
//! - `GET /` - Liveness greeting
//! - `POST /api/analyze` - Identify the species for `{"sequence": "..."}`
//! - `GET /api/samples` - One example sequence per common name
//! - `GET /api/catalog` - Region prototypes and a summary of every record

pub mod server;
