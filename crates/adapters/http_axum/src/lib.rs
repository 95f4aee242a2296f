//! # switchboard-adapter-http-axum
//!
//! HTTP adapter for switchboard. Exposes the inbound webhook (`POST /event`),
//! a device listing (`GET /devices`) and a health check (`GET /health`).
//!
//! The webhook always answers `200` with a complete per-step decision map:
//! errors inside a run degrade to the fail-safe all-suppressed plan rather
//! than an HTTP failure, because the host automation platform executes each
//! downstream step unless explicitly told to skip it.
//!
//! ## Dependency rule
//! Depends on `switchboard-app` and `switchboard-domain` only.

pub mod api;
pub mod router;
pub mod state;
