//! Common error types used across the workspace.
//!
//! Every error here feeds the fail-safe suppression policy: a run that hits
//! any of these produces a fully-suppressed dispatch plan and surfaces the
//! failure through the debug trace, never as an aborted run.

/// The inbound webhook payload could not be normalized.
#[derive(Debug, thiserror::Error)]
pub enum MalformedEventError {
    /// A mandatory field (`id`, `action`) is absent.
    #[error("missing required field \"{0}\"")]
    MissingField(&'static str),

    /// A field is present but carries the wrong JSON type.
    #[error("field \"{field}\" is not a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    /// A field value could not be parsed into its target representation.
    #[error("field \"{field}\" could not be parsed from {value:?}")]
    Unparseable { field: &'static str, value: String },

    /// The event body is not valid JSON at all.
    #[error("event body is not valid JSON")]
    InvalidJson(#[from] serde_json::Error),
}

/// The requested device id does not resolve to any registered descriptor.
#[derive(Debug, thiserror::Error)]
#[error("Unknown device: \"{id}\"")]
pub struct UnknownDeviceError {
    /// The device id as it appeared on the wire.
    pub id: String,
}

/// An action string that no vendor recognizes.
///
/// Never fatal: adapters degrade to their default ("off") policy instead.
/// Kept as a typed error so the degradation shows up in the debug trace.
#[derive(Debug, thiserror::Error)]
#[error("unsupported action \"{action}\", degrading to \"off\"")]
pub struct UnsupportedActionError {
    /// The action string after case-folding.
    pub action: String,
}

/// Static configuration is inconsistent.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Two registry entries share the same device id.
    #[error("device \"{0}\" is defined more than once")]
    DuplicateDevice(String),

    /// A descriptor's addressing data does not match its vendor.
    #[error("device \"{id}\": {reason}")]
    InvalidDevice { id: String, reason: &'static str },

    /// A `related_ids` entry points at a device that is not registered.
    #[error("device \"{id}\" relates to unregistered device \"{related}\"")]
    UnknownRelatedDevice { id: String, related: String },
}
