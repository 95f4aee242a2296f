//! Port traits — the seam between the dispatch engine and vendor adapters.

use switchboard_domain::device::{DeviceDescriptor, Vendor};
use switchboard_domain::request::CanonicalRequest;
use switchboard_domain::step::{OutboundRequest, StepId};
use switchboard_domain::trace::TraceBuffer;

/// Translates a canonical request into one vendor's wire payloads.
///
/// The trait is synchronous: adapters build payloads, they never deliver
/// them. An adapter is responsible only for its own vendor's wire shape and
/// must not fire or suppress steps belonging to other vendors — it receives
/// the resolver's candidate steps and returns payloads for the subset it can
/// actually populate. Any candidate it declines stays suppressed.
pub trait VendorAdapter {
    /// The vendor family this adapter handles.
    fn vendor(&self) -> Vendor;

    /// Build payloads for the candidate steps this adapter can populate.
    fn build(
        &self,
        request: &CanonicalRequest,
        device: &DeviceDescriptor,
        candidates: &[StepId],
        trace: &mut TraceBuffer,
    ) -> Vec<(StepId, OutboundRequest)>;
}
