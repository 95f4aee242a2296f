//! # switchboard-adapter-wyze
//!
//! Wyze vendor adapter. Unlike the other adapters it builds no vendor wire
//! shape of its own: it forwards the canonical request verbatim to a
//! downstream webhook integration, one POST per surviving plug-toggle step.
//! Its real responsibility is honoring the resolver's plug-step computation,
//! where "all plugs" is a device id of its own, distinct from the individual
//! plug ids.
//!
//! ## Dependency rule
//! Depends on `switchboard-app` (port trait) and `switchboard-domain` only.

use switchboard_app::ports::VendorAdapter;
use switchboard_domain::device::{DeviceDescriptor, Vendor, VendorAddress};
use switchboard_domain::request::CanonicalRequest;
use switchboard_domain::step::{HttpMethod, OutboundRequest, StepId};
use switchboard_domain::trace::TraceBuffer;

/// Adapter for Wyze plugs behind the downstream webhook integration.
pub struct WyzeAdapter {
    webhook_url: String,
}

impl WyzeAdapter {
    /// Create an adapter forwarding to the given webhook base URL.
    pub fn new(webhook_url: impl Into<String>) -> Self {
        Self {
            webhook_url: webhook_url.into(),
        }
    }
}

impl VendorAdapter for WyzeAdapter {
    fn vendor(&self) -> Vendor {
        Vendor::Wyze
    }

    fn build(
        &self,
        request: &CanonicalRequest,
        device: &DeviceDescriptor,
        candidates: &[StepId],
        trace: &mut TraceBuffer,
    ) -> Vec<(StepId, OutboundRequest)> {
        let VendorAddress::PlugSlot { .. } = &device.address else {
            trace.append(format!(
                "Device \"{}\" has no Wyze plug slot, suppressing",
                device.id
            ));
            return vec![];
        };

        // The canonical request is forwarded verbatim; the step identity is
        // carried in the URL so the downstream integration knows which plug
        // toggle the host fired.
        let body = match serde_json::to_value(request) {
            Ok(body) => body,
            Err(err) => {
                trace.append(format!("Could not encode forward payload: {err}"));
                return vec![];
            }
        };
        let base = self.webhook_url.trim_end_matches('/');

        candidates
            .iter()
            .filter(|step| step.vendor() == Some(Vendor::Wyze))
            .map(|step| {
                (
                    *step,
                    OutboundRequest {
                        method: HttpMethod::Post,
                        url: format!("{base}/{step}"),
                        headers: vec![(
                            "Content-Type".to_string(),
                            "application/json".to_string(),
                        )],
                        body: body.clone(),
                    },
                )
            })
            .collect()
    }
}
