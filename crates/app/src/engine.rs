//! Dispatch engine — runs one inbound event to a complete plan.
//!
//! A run is synchronous and independent: parse the event, resolve the device,
//! compute the candidate step set, let the device's vendor adapter build
//! payloads, and flush the trace. The engine never surfaces an error to the
//! host platform — every failure path degrades to the fail-safe
//! all-suppressed plan with the failure recorded in the trace.

use serde::Serialize;
use uuid::Uuid;

use switchboard_domain::device::Vendor;
use switchboard_domain::error::UnknownDeviceError;
use switchboard_domain::request::CanonicalRequest;
use switchboard_domain::step::{DispatchPlan, HttpMethod, OutboundRequest, StepId};
use switchboard_domain::trace::TraceBuffer;

use crate::ports::VendorAdapter;
use crate::registry::DeviceRegistry;
use crate::resolver;

/// Debug email settings, resolved at configuration time.
#[derive(Debug, Clone, Default)]
pub struct DebugOptions {
    /// Whether the trace flushes into the debug email step.
    pub enabled: bool,
    /// Recipient handed to the host's email step.
    pub recipient: String,
}

/// The result of one run: a complete decision for every step.
#[derive(Debug, Serialize)]
pub struct RunOutcome {
    /// Identifier tying the response to the log span.
    pub run_id: Uuid,
    /// Fired/suppressed decision per step.
    #[serde(rename = "steps")]
    pub plan: DispatchPlan,
}

/// Orchestrates a single run per inbound event.
///
/// Generic over the adapter types to avoid dynamic dispatch; the vendor
/// lookup itself is an exhaustive match over [`Vendor`].
pub struct DispatchEngine<L, G, W> {
    registry: DeviceRegistry,
    lifx: L,
    govee: G,
    wyze: W,
    debug: DebugOptions,
}

impl<L, G, W> DispatchEngine<L, G, W>
where
    L: VendorAdapter,
    G: VendorAdapter,
    W: VendorAdapter,
{
    /// Wire an engine from its registry, adapters and debug settings.
    pub fn new(registry: DeviceRegistry, lifx: L, govee: G, wyze: W, debug: DebugOptions) -> Self {
        Self {
            registry,
            lifx,
            govee,
            wyze,
            debug,
        }
    }

    /// The registered devices, for the listing endpoint.
    #[must_use]
    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    /// Process one raw webhook payload into a complete plan.
    ///
    /// Infallible by design: the host always receives a decision for every
    /// step, so errors end the run early with everything still suppressed.
    pub fn handle_event(&self, raw: &str) -> RunOutcome {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("dispatch_run", %run_id);
        let _enter = span.enter();

        let mut plan = DispatchPlan::all_suppressed();
        let mut trace = TraceBuffer::new(self.debug.enabled);

        self.execute(raw, &mut plan, &mut trace);

        if let Some(body) = trace.flush() {
            plan.fire(StepId::DebugEmail, self.email_request(run_id, body));
        }

        tracing::info!(fired = plan.fired().count(), "run complete");
        RunOutcome { run_id, plan }
    }

    fn execute(&self, raw: &str, plan: &mut DispatchPlan, trace: &mut TraceBuffer) {
        let request = match CanonicalRequest::parse(raw, trace) {
            Ok(request) => request,
            Err(err) => {
                trace.append(format!("Malformed event: {err}"));
                tracing::warn!(error = %err, "malformed event, suppressing all steps");
                return;
            }
        };

        let Some(device) = self.registry.resolve(&request.device_id) else {
            let err = UnknownDeviceError {
                id: request.device_id,
            };
            trace.append(err.to_string());
            tracing::warn!(error = %err, "unknown device, suppressing all steps");
            return;
        };

        trace.append(format!(
            "Dispatching \"{}\" ({}) action={}",
            device.id, device.vendor, request.action
        ));
        if !device.related_ids.is_empty() {
            let related: Vec<&str> = device.related_ids.iter().map(String::as_str).collect();
            trace.append(format!("Mutually excluded with: {}", related.join(", ")));
        }

        let candidates = resolver::candidate_steps(request.action, device);
        let built = match device.vendor {
            Vendor::Lifx => self.lifx.build(&request, device, &candidates, trace),
            Vendor::Govee => self.govee.build(&request, device, &candidates, trace),
            Vendor::Wyze => self.wyze.build(&request, device, &candidates, trace),
        };

        for (step, outbound) in built {
            if candidates.contains(&step) {
                trace.append(format!("Firing step {step}"));
                plan.fire(step, outbound);
            } else {
                // Suppression wins over firing when the rules disagree.
                trace.append(format!(
                    "Adapter proposed non-candidate step {step}; keeping it suppressed"
                ));
                tracing::warn!(%step, "adapter proposed a non-candidate step");
            }
        }
    }

    fn email_request(&self, run_id: Uuid, body: String) -> OutboundRequest {
        OutboundRequest {
            method: HttpMethod::Post,
            url: format!("mailto:{}", self.debug.recipient),
            headers: vec![],
            body: serde_json::json!({
                "subject": format!("switchboard run {run_id}"),
                "html": body,
            }),
        }
    }
}
