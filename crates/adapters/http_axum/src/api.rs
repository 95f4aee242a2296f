//! API handlers for the webhook and the device listing.

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::routing::{get, post};
use serde::Serialize;

use switchboard_app::engine::RunOutcome;
use switchboard_app::ports::VendorAdapter;
use switchboard_domain::device::Vendor;

use crate::state::AppState;

/// Routes owned by this module.
pub fn routes<L, G, W>() -> Router<AppState<L, G, W>>
where
    L: VendorAdapter + Send + Sync + 'static,
    G: VendorAdapter + Send + Sync + 'static,
    W: VendorAdapter + Send + Sync + 'static,
{
    Router::new()
        .route("/event", post(handle_event))
        .route("/devices", get(list_devices))
}

/// One entry of the device listing.
#[derive(Debug, Serialize)]
pub struct DeviceSummary {
    pub id: String,
    pub vendor: Vendor,
}

/// `POST /event` — run the dispatch engine over the raw webhook body.
///
/// Always `200`: the response is the host platform's instruction sheet, and
/// the fail-safe outcome for a bad event is a fully-suppressed plan, not an
/// HTTP error.
async fn handle_event<L, G, W>(
    State(state): State<AppState<L, G, W>>,
    body: String,
) -> Json<RunOutcome>
where
    L: VendorAdapter + Send + Sync + 'static,
    G: VendorAdapter + Send + Sync + 'static,
    W: VendorAdapter + Send + Sync + 'static,
{
    Json(state.engine.handle_event(&body))
}

/// `GET /devices` — list the registered device ids and vendors.
async fn list_devices<L, G, W>(State(state): State<AppState<L, G, W>>) -> Json<Vec<DeviceSummary>>
where
    L: VendorAdapter + Send + Sync + 'static,
    G: VendorAdapter + Send + Sync + 'static,
    W: VendorAdapter + Send + Sync + 'static,
{
    let mut devices: Vec<DeviceSummary> = state
        .engine
        .registry()
        .iter()
        .map(|descriptor| DeviceSummary {
            id: descriptor.id.clone(),
            vendor: descriptor.vendor,
        })
        .collect();
    devices.sort_by(|a, b| a.id.cmp(&b.id));
    Json(devices)
}
