//! # switchboard-app
//!
//! Application layer for the switchboard dispatch engine.
//!
//! ## Responsibilities
//! - Define the port trait ([`ports::VendorAdapter`]) implemented by the
//!   vendor adapter crates
//! - Hold the read-only [`registry::DeviceRegistry`]
//! - Compute the per-run exclusivity decision ([`resolver`])
//! - Orchestrate a full run ([`engine::DispatchEngine`]): parse, resolve,
//!   build payloads, assemble the plan, flush the trace
//!
//! ## Dependency rule
//! Depends on `switchboard-domain` only. Adapters depend on this crate, not
//! the other way around.

pub mod engine;
pub mod ports;
pub mod registry;
pub mod resolver;
