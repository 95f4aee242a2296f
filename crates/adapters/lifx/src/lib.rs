//! # switchboard-adapter-lifx
//!
//! LIFX vendor adapter. Builds a single PUT set-state request against the
//! LIFX HTTP API, addressed by a `label:` selector, carrying power plus the
//! optional color and brightness fields.
//!
//! ## Dependency rule
//! Depends on `switchboard-app` (port trait) and `switchboard-domain` only.

use switchboard_app::ports::VendorAdapter;
use switchboard_domain::device::{DeviceDescriptor, Vendor, VendorAddress};
use switchboard_domain::request::CanonicalRequest;
use switchboard_domain::step::{HttpMethod, OutboundRequest, StepId};
use switchboard_domain::trace::TraceBuffer;

const API_BASE: &str = "https://api.lifx.com/v1/lights";

/// Adapter for LIFX lights.
pub struct LifxAdapter {
    api_key: String,
}

impl LifxAdapter {
    /// Create an adapter holding the LIFX API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

impl VendorAdapter for LifxAdapter {
    fn vendor(&self) -> Vendor {
        Vendor::Lifx
    }

    fn build(
        &self,
        request: &CanonicalRequest,
        device: &DeviceDescriptor,
        candidates: &[StepId],
        trace: &mut TraceBuffer,
    ) -> Vec<(StepId, OutboundRequest)> {
        if !candidates.contains(&StepId::LifxSetState) {
            return vec![];
        }
        let VendorAddress::Label { label } = &device.address else {
            trace.append(format!(
                "Device \"{}\" has no LIFX label, suppressing",
                device.id
            ));
            return vec![];
        };

        // Power is always set; color passes through unclamped, brightness
        // arrives already clamped from the parser.
        let mut body = serde_json::json!({
            "power": request.action.to_string(),
        });
        if let Some(color) = request.color {
            body["color"] = serde_json::json!(format!("rgb:{color}"));
        }
        if let Some(brightness) = request.brightness {
            body["brightness"] = serde_json::json!(brightness);
        }

        vec![(
            StepId::LifxSetState,
            OutboundRequest {
                method: HttpMethod::Put,
                url: format!("{API_BASE}/label:{label}/state"),
                headers: vec![(
                    "Authorization".to_string(),
                    format!("Bearer {}", self.api_key),
                )],
                body,
            },
        )]
    }
}
