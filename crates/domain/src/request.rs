//! Canonical request — the normalized form of one inbound webhook event.
//!
//! The host automation platform delivers a loosely-typed JSON object with
//! recognized fields `id` (required), `action` (required), `color` and
//! `brightness` (both optional and orthogonal to the action). Parsing
//! normalizes that into an immutable [`CanonicalRequest`]; one is created per
//! inbound event and discarded at the end of the run.

use serde::Serialize;

use crate::error::{MalformedEventError, UnsupportedActionError};
use crate::trace::TraceBuffer;

/// The requested power polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerAction {
    On,
    Off,
}

impl PowerAction {
    /// Case-fold and match the literal `"on"`/`"off"` strings.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedActionError`] for any other string. Callers
    /// degrade to [`PowerAction::Off`] — the shared default policy of every
    /// vendor adapter — rather than failing the run.
    pub fn parse(raw: &str) -> Result<Self, UnsupportedActionError> {
        match raw.trim().to_lowercase().as_str() {
            "on" => Ok(Self::On),
            "off" => Ok(Self::Off),
            other => Err(UnsupportedActionError {
                action: other.to_string(),
            }),
        }
    }

    /// The opposite polarity.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::On => Self::Off,
            Self::Off => Self::On,
        }
    }
}

impl std::fmt::Display for PowerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::On => f.write_str("on"),
            Self::Off => f.write_str("off"),
        }
    }
}

/// An RGB triple as it appeared on the wire.
///
/// Components are deliberately **not** clamped to `[0, 255]`: out-of-range
/// values pass through to the vendor APIs unchanged. Brightness, by contrast,
/// is clamped — the asymmetry is long-standing observed behavior and is
/// preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: i64,
    pub g: i64,
    pub b: i64,
}

impl Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        [self.r, self.g, self.b].serialize(serializer)
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

/// The canonical internal request, immutable after parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalRequest {
    /// Device identifier, matched exactly against the registry.
    #[serde(rename = "id")]
    pub device_id: String,
    /// Requested polarity, always present after normalization.
    pub action: PowerAction,
    /// Optional color, passed through unclamped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgb>,
    /// Optional brightness, clamped to `[0.0, 1.0]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f64>,
}

impl CanonicalRequest {
    /// Parse and normalize a raw webhook payload.
    ///
    /// Unrecognized action strings degrade to `"off"` with a trace line; this
    /// mirrors the default policy shared by every vendor adapter and is kept
    /// as-is rather than tightened into a hard failure.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedEventError`] when the body is not JSON, when `id`
    /// or `action` is absent or not a string, or when a present `color` or
    /// `brightness` value cannot be parsed.
    pub fn parse(raw: &str, trace: &mut TraceBuffer) -> Result<Self, MalformedEventError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;

        let device_id = required_string(&value, "id")?;
        let action_raw = required_string(&value, "action")?;
        let action = PowerAction::parse(&action_raw).unwrap_or_else(|err| {
            trace.append(err.to_string());
            PowerAction::Off
        });

        let color = match value.get("color") {
            None | Some(serde_json::Value::Null) => None,
            Some(v) => Some(parse_color(v)?),
        };
        let brightness = match value.get("brightness") {
            None | Some(serde_json::Value::Null) => None,
            Some(v) => Some(parse_brightness(v)?),
        };

        Ok(Self {
            device_id,
            action,
            color,
            brightness,
        })
    }
}

fn required_string(
    value: &serde_json::Value,
    field: &'static str,
) -> Result<String, MalformedEventError> {
    match value.get(field) {
        None | Some(serde_json::Value::Null) => Err(MalformedEventError::MissingField(field)),
        Some(serde_json::Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(MalformedEventError::WrongType {
            field,
            expected: "string",
        }),
    }
}

/// Accept either a 3-element numeric array or a comma-separated string of
/// three base-10 integers. Both wire formats are observed downstream and must
/// produce identical payloads.
fn parse_color(value: &serde_json::Value) -> Result<Rgb, MalformedEventError> {
    match value {
        serde_json::Value::Array(items) => {
            let [r, g, b] = items.as_slice() else {
                return Err(MalformedEventError::Unparseable {
                    field: "color",
                    value: value.to_string(),
                });
            };
            match (r.as_i64(), g.as_i64(), b.as_i64()) {
                (Some(r), Some(g), Some(b)) => Ok(Rgb { r, g, b }),
                _ => Err(MalformedEventError::Unparseable {
                    field: "color",
                    value: value.to_string(),
                }),
            }
        }
        serde_json::Value::String(s) => {
            let parts: Vec<&str> = s.split(',').map(str::trim).collect();
            let [r, g, b] = parts.as_slice() else {
                return Err(MalformedEventError::Unparseable {
                    field: "color",
                    value: s.clone(),
                });
            };
            let parse = |part: &str| {
                part.parse::<i64>()
                    .map_err(|_| MalformedEventError::Unparseable {
                        field: "color",
                        value: s.clone(),
                    })
            };
            Ok(Rgb {
                r: parse(r)?,
                g: parse(g)?,
                b: parse(b)?,
            })
        }
        _ => Err(MalformedEventError::WrongType {
            field: "color",
            expected: "array or string",
        }),
    }
}

/// Accept a number or a numeric string; clamp to `[0.0, 1.0]` after parsing.
fn parse_brightness(value: &serde_json::Value) -> Result<f64, MalformedEventError> {
    let parsed = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => {
            return Err(MalformedEventError::WrongType {
                field: "brightness",
                expected: "number or string",
            });
        }
    };
    match parsed {
        Some(b) if b.is_finite() => Ok(b.clamp(0.0, 1.0)),
        _ => Err(MalformedEventError::Unparseable {
            field: "brightness",
            value: value.to_string(),
        }),
    }
}
