//! Receipts web server module
//!
//! Upload form, batch generation and archive downloads over HTTP.
//! Run with `receipts serve` or `receipts-server`.

pub mod handlers;
pub mod server;

pub use server::{init_tracing, router, run_api_server, ApiConfig, AppState};
