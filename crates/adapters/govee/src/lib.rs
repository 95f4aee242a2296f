//! # switchboard-adapter-govee
//!
//! Govee vendor adapter. Builds up to three independent control payloads —
//! one per populated field among power, color and brightness — each addressed
//! by the device's MAC and model and carrying its own `cmd.name`/`cmd.value`
//! pair. A payload whose source field is absent stays suppressed; nothing is
//! ever sent empty.
//!
//! ## Dependency rule
//! Depends on `switchboard-app` (port trait) and `switchboard-domain` only.

use switchboard_app::ports::VendorAdapter;
use switchboard_domain::device::{DeviceDescriptor, Vendor, VendorAddress};
use switchboard_domain::request::CanonicalRequest;
use switchboard_domain::step::{HttpMethod, OutboundRequest, StepId};
use switchboard_domain::trace::TraceBuffer;

const CONTROL_URL: &str = "https://developer-api.govee.com/v1/devices/control";

/// Adapter for Govee devices.
pub struct GoveeAdapter {
    api_key: String,
}

impl GoveeAdapter {
    /// Create an adapter holding the Govee API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// The `cmd.value` for one step, or `None` when its source field is
    /// absent from the request.
    fn command_value(request: &CanonicalRequest, step: StepId) -> Option<serde_json::Value> {
        match step {
            StepId::GoveeTurn => Some(serde_json::json!(request.action.to_string())),
            StepId::GoveeColor => request.color.map(|color| {
                serde_json::json!({ "r": color.r, "g": color.g, "b": color.b })
            }),
            // Brightness arrives clamped to [0.0, 1.0]; Govee wants an
            // integer 0-100, truncated.
            #[allow(clippy::cast_possible_truncation)]
            StepId::GoveeBrightness => request
                .brightness
                .map(|brightness| serde_json::json!((brightness * 100.0) as i64)),
            _ => None,
        }
    }

    fn command_name(step: StepId) -> &'static str {
        match step {
            StepId::GoveeColor => "color",
            StepId::GoveeBrightness => "brightness",
            _ => "turn",
        }
    }
}

impl VendorAdapter for GoveeAdapter {
    fn vendor(&self) -> Vendor {
        Vendor::Govee
    }

    fn build(
        &self,
        request: &CanonicalRequest,
        device: &DeviceDescriptor,
        candidates: &[StepId],
        trace: &mut TraceBuffer,
    ) -> Vec<(StepId, OutboundRequest)> {
        let VendorAddress::Mac { mac, model } = &device.address else {
            trace.append(format!(
                "Device \"{}\" has no Govee MAC/model, suppressing",
                device.id
            ));
            return vec![];
        };

        candidates
            .iter()
            .filter(|step| step.vendor() == Some(Vendor::Govee))
            .filter_map(|step| {
                let value = Self::command_value(request, *step)?;
                let body = serde_json::json!({
                    "device": mac,
                    "model": model,
                    "cmd": {
                        "name": Self::command_name(*step),
                        "value": value,
                    },
                });
                Some((
                    *step,
                    OutboundRequest {
                        method: HttpMethod::Put,
                        url: CONTROL_URL.to_string(),
                        headers: vec![
                            ("Govee-API-Key".to_string(), self.api_key.clone()),
                            ("Content-Type".to_string(), "application/json".to_string()),
                        ],
                        body,
                    },
                ))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use switchboard_domain::request::{PowerAction, Rgb};

    use super::*;

    const GOVEE_STEPS: [StepId; 3] = [StepId::GoveeTurn, StepId::GoveeColor, StepId::GoveeBrightness];

    fn device() -> DeviceDescriptor {
        DeviceDescriptor {
            id: "strip_staircase".to_string(),
            vendor: Vendor::Govee,
            address: VendorAddress::Mac {
                mac: "AA:BB:CC:DD:EE:FF".to_string(),
                model: "H6159".to_string(),
            },
            related_ids: BTreeSet::new(),
        }
    }

    fn request(action: PowerAction, color: Option<Rgb>, brightness: Option<f64>) -> CanonicalRequest {
        CanonicalRequest {
            device_id: "strip_staircase".to_string(),
            action,
            color,
            brightness,
        }
    }

    fn build(request: &CanonicalRequest) -> Vec<(StepId, OutboundRequest)> {
        let mut trace = TraceBuffer::new(true);
        GoveeAdapter::new("govee-key").build(request, &device(), &GOVEE_STEPS, &mut trace)
    }

    #[test]
    fn should_build_turn_payload_only_when_no_optional_fields() {
        let built = build(&request(PowerAction::On, None, None));
        let steps: Vec<StepId> = built.iter().map(|(step, _)| *step).collect();
        assert_eq!(steps, vec![StepId::GoveeTurn]);
        assert_eq!(built[0].1.body["cmd"]["name"], "turn");
        assert_eq!(built[0].1.body["cmd"]["value"], "on");
    }

    #[test]
    fn should_address_every_payload_by_mac_and_model() {
        let built = build(&request(PowerAction::On, Some(Rgb { r: 1, g: 2, b: 3 }), Some(0.5)));
        assert_eq!(built.len(), 3);
        for (_, outbound) in &built {
            assert_eq!(outbound.body["device"], "AA:BB:CC:DD:EE:FF");
            assert_eq!(outbound.body["model"], "H6159");
            assert_eq!(outbound.url, CONTROL_URL);
            assert_eq!(outbound.method, HttpMethod::Put);
        }
    }

    #[test]
    fn should_carry_api_key_header() {
        let built = build(&request(PowerAction::Off, None, None));
        assert!(built[0]
            .1
            .headers
            .contains(&("Govee-API-Key".to_string(), "govee-key".to_string())));
    }

    #[test]
    fn should_build_color_payload_as_rgb_object() {
        let built = build(&request(PowerAction::On, Some(Rgb { r: 10, g: 20, b: 30 }), None));
        let color = built
            .iter()
            .find(|(step, _)| *step == StepId::GoveeColor)
            .map(|(_, outbound)| outbound)
            .unwrap();
        assert_eq!(
            color.body["cmd"]["value"],
            serde_json::json!({"r": 10, "g": 20, "b": 30})
        );
    }

    #[test]
    fn should_convert_full_brightness_to_one_hundred() {
        let built = build(&request(PowerAction::On, None, Some(1.0)));
        let brightness = built
            .iter()
            .find(|(step, _)| *step == StepId::GoveeBrightness)
            .map(|(_, outbound)| outbound)
            .unwrap();
        assert_eq!(brightness.body["cmd"]["value"], 100);
    }

    #[test]
    fn should_convert_zero_brightness_to_zero() {
        let built = build(&request(PowerAction::Off, None, Some(0.0)));
        let brightness = built
            .iter()
            .find(|(step, _)| *step == StepId::GoveeBrightness)
            .map(|(_, outbound)| outbound)
            .unwrap();
        assert_eq!(brightness.body["cmd"]["value"], 0);
    }

    #[test]
    fn should_truncate_brightness_conversion() {
        let built = build(&request(PowerAction::On, None, Some(0.499)));
        let brightness = built
            .iter()
            .find(|(step, _)| *step == StepId::GoveeBrightness)
            .map(|(_, outbound)| outbound)
            .unwrap();
        assert_eq!(brightness.body["cmd"]["value"], 49);
    }

    #[test]
    fn should_leave_color_step_suppressed_when_color_is_absent() {
        let built = build(&request(PowerAction::On, None, Some(0.5)));
        let steps: Vec<StepId> = built.iter().map(|(step, _)| *step).collect();
        assert_eq!(steps, vec![StepId::GoveeTurn, StepId::GoveeBrightness]);
    }

    #[test]
    fn should_respect_the_candidate_list() {
        let mut trace = TraceBuffer::new(true);
        let built = GoveeAdapter::new("k").build(
            &request(PowerAction::On, Some(Rgb { r: 1, g: 2, b: 3 }), Some(1.0)),
            &device(),
            &[StepId::GoveeTurn],
            &mut trace,
        );
        let steps: Vec<StepId> = built.iter().map(|(step, _)| *step).collect();
        assert_eq!(steps, vec![StepId::GoveeTurn]);
    }

    #[test]
    fn should_suppress_and_trace_when_addressing_is_not_a_mac() {
        let mut trace = TraceBuffer::new(true);
        let mut bad_device = device();
        bad_device.address = VendorAddress::Label {
            label: "nope".to_string(),
        };
        let built = GoveeAdapter::new("k").build(
            &request(PowerAction::On, None, None),
            &bad_device,
            &GOVEE_STEPS,
            &mut trace,
        );
        assert!(built.is_empty());
        assert_eq!(trace.lines().len(), 1);
    }
}
