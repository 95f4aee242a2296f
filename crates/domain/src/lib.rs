//! # switchboard-domain
//!
//! Pure domain model for the switchboard webhook dispatch engine.
//!
//! ## Responsibilities
//! - Foundational types: errors, timestamps
//! - Define **CanonicalRequest** (the normalized inbound event)
//! - Define **DeviceDescriptor** (vendor identity + addressing for a device id)
//! - Define **OutboundStep** decisions (the fixed set of downstream automation
//!   steps, each fired with a payload or explicitly suppressed per run)
//! - Define the **TraceBuffer** (append-only debug trace, flushed at most once)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.

pub mod device;
pub mod error;
pub mod request;
pub mod step;
pub mod time;
pub mod trace;
