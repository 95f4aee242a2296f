//! Outbound steps — the fixed set of downstream automation steps.
//!
//! The host platform wires every downstream HTTP/email action as an
//! unconditional step; it executes each one unless told to skip. A run must
//! therefore assign **every** step exactly one decision: fired with a
//! concrete payload, or explicitly suppressed. The decisions live in a
//! [`DispatchPlan`] constructed fresh per run — never in shared mutable
//! state — and the plan starts fully suppressed so that only a specific,
//! matched rule ever promotes a step to fired.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::device::{PlugSlot, Vendor};
use crate::request::PowerAction;

/// Identifier of one downstream automation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    /// LIFX single set-state request (power, optional color/brightness).
    LifxSetState,
    /// Govee `turn` command.
    GoveeTurn,
    /// Govee `color` command.
    GoveeColor,
    /// Govee `brightness` command.
    GoveeBrightness,
    /// Wyze plug 1, turn on.
    WyzePlug1On,
    /// Wyze plug 1, turn off.
    WyzePlug1Off,
    /// Wyze plug 2, turn on.
    WyzePlug2On,
    /// Wyze plug 2, turn off.
    WyzePlug2Off,
    /// The debug email send step.
    DebugEmail,
}

impl StepId {
    /// Every step the host platform knows about, in plan order.
    pub const ALL: [Self; 9] = [
        Self::LifxSetState,
        Self::GoveeTurn,
        Self::GoveeColor,
        Self::GoveeBrightness,
        Self::WyzePlug1On,
        Self::WyzePlug1Off,
        Self::WyzePlug2On,
        Self::WyzePlug2Off,
        Self::DebugEmail,
    ];

    /// The vendor this step belongs to, if any.
    #[must_use]
    pub fn vendor(self) -> Option<Vendor> {
        match self {
            Self::LifxSetState => Some(Vendor::Lifx),
            Self::GoveeTurn | Self::GoveeColor | Self::GoveeBrightness => Some(Vendor::Govee),
            Self::WyzePlug1On | Self::WyzePlug1Off | Self::WyzePlug2On | Self::WyzePlug2Off => {
                Some(Vendor::Wyze)
            }
            Self::DebugEmail => None,
        }
    }

    /// The fixed polarity of this step, if it has one.
    ///
    /// Plug-toggle steps are hardwired to one polarity; all other steps carry
    /// the polarity inside their payload instead.
    #[must_use]
    pub fn polarity(self) -> Option<PowerAction> {
        match self {
            Self::WyzePlug1On | Self::WyzePlug2On => Some(PowerAction::On),
            Self::WyzePlug1Off | Self::WyzePlug2Off => Some(PowerAction::Off),
            Self::LifxSetState
            | Self::GoveeTurn
            | Self::GoveeColor
            | Self::GoveeBrightness
            | Self::DebugEmail => None,
        }
    }

    /// The individual plug this step toggles, if it is a plug step.
    #[must_use]
    pub fn plug_slot(self) -> Option<PlugSlot> {
        match self {
            Self::WyzePlug1On | Self::WyzePlug1Off => Some(PlugSlot::Plug1),
            Self::WyzePlug2On | Self::WyzePlug2Off => Some(PlugSlot::Plug2),
            Self::LifxSetState
            | Self::GoveeTurn
            | Self::GoveeColor
            | Self::GoveeBrightness
            | Self::DebugEmail => None,
        }
    }
}

impl std::fmt::Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::LifxSetState => "lifx_set_state",
            Self::GoveeTurn => "govee_turn",
            Self::GoveeColor => "govee_color",
            Self::GoveeBrightness => "govee_brightness",
            Self::WyzePlug1On => "wyze_plug1_on",
            Self::WyzePlug1Off => "wyze_plug1_off",
            Self::WyzePlug2On => "wyze_plug2_on",
            Self::WyzePlug2Off => "wyze_plug2_off",
            Self::DebugEmail => "debug_email",
        };
        f.write_str(name)
    }
}

/// HTTP method of an outbound request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

/// Everything the host platform needs to execute one fired step: the body,
/// the addressing, the method and any headers. The core's responsibility
/// ends at producing these values — delivery, retries and timeouts belong to
/// the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundRequest {
    pub method: HttpMethod,
    pub url: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<(String, String)>,
    pub body: serde_json::Value,
}

/// Decision for one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StepDecision {
    Fired { request: OutboundRequest },
    Suppressed,
}

impl StepDecision {
    /// Whether the step fires this run.
    #[must_use]
    pub fn is_fired(&self) -> bool {
        matches!(self, Self::Fired { .. })
    }
}

/// Per-run decision map over the full fixed step set.
///
/// Invariant: every [`StepId`] is present from construction onward, so the
/// host never sees an unassigned step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DispatchPlan {
    steps: BTreeMap<StepId, StepDecision>,
}

impl DispatchPlan {
    /// The conservative starting point: every step suppressed.
    #[must_use]
    pub fn all_suppressed() -> Self {
        Self {
            steps: StepId::ALL
                .into_iter()
                .map(|id| (id, StepDecision::Suppressed))
                .collect(),
        }
    }

    /// Promote one step to fired with its payload.
    pub fn fire(&mut self, id: StepId, request: OutboundRequest) {
        self.steps.insert(id, StepDecision::Fired { request });
    }

    /// The decision for one step.
    #[must_use]
    pub fn decision(&self, id: StepId) -> &StepDecision {
        // Guaranteed present: the map is populated over StepId::ALL at
        // construction and keys are never removed.
        &self.steps[&id]
    }

    /// Iterate over the fired steps and their payloads.
    pub fn fired(&self) -> impl Iterator<Item = (StepId, &OutboundRequest)> {
        self.steps.iter().filter_map(|(id, decision)| match decision {
            StepDecision::Fired { request } => Some((*id, request)),
            StepDecision::Suppressed => None,
        })
    }

    /// Whether the whole run was suppressed (the fail-safe outcome).
    #[must_use]
    pub fn is_all_suppressed(&self) -> bool {
        self.steps
            .values()
            .all(|decision| !decision.is_fired())
    }
}
