//! Exclusivity resolver — computes which steps may fire for one run.
//!
//! The host platform executes every downstream step unconditionally unless
//! told to skip, so the resolver's job is to turn that fixed, non-branching
//! pipeline into a conditionally-executed set. It is a stateless computation
//! repeated from scratch each run:
//!
//! 1. start from the full step set with everything suppressed;
//! 2. suppress the whole opposite-polarity group platform-wide, independent
//!    of which device fires;
//! 3. within the matching group, suppress every device-specific step that
//!    does not correspond to the requested device; the "all plugs" group has
//!    an empty exclusion list, so both same-polarity plug steps survive;
//! 4. whatever is left unmarked is the candidate fired set.
//!
//! Suppression always wins over firing: a step only survives when every rule
//! matches, and anything ambiguous resolves to the empty set (suppress all).

use switchboard_domain::device::{DeviceDescriptor, PlugSlot};
use switchboard_domain::request::PowerAction;
use switchboard_domain::step::StepId;

/// Compute the candidate fired set for this run.
///
/// The debug email step is never a candidate here; the trace flush decides
/// it separately at the end of the run.
#[must_use]
pub fn candidate_steps(action: PowerAction, device: &DeviceDescriptor) -> Vec<StepId> {
    StepId::ALL
        .into_iter()
        .filter(|step| survives(*step, action, device))
        .collect()
}

fn survives(step: StepId, action: PowerAction, device: &DeviceDescriptor) -> bool {
    // Steps of other vendors never correspond to the requested device.
    // DebugEmail has no vendor and is excluded by the same check.
    if step.vendor() != Some(device.vendor) {
        return false;
    }

    // Opposite-polarity steps are skipped platform-wide, not just for the
    // requested device.
    if step.polarity() == Some(action.opposite()) {
        return false;
    }

    // Device-specific exclusion within the matching group.
    if let Some(step_slot) = step.plug_slot() {
        return match device.plug_slot() {
            Some(PlugSlot::All) => true,
            Some(device_slot) => step_slot == device_slot,
            // A Wyze descriptor without a plug slot cannot be matched to a
            // unique step; resolve conservatively.
            None => false,
        };
    }

    true
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use switchboard_domain::device::{Vendor, VendorAddress};

    use super::*;

    fn lifx_light() -> DeviceDescriptor {
        DeviceDescriptor {
            id: "light_back_deck".to_string(),
            vendor: Vendor::Lifx,
            address: VendorAddress::Label {
                label: "Back Deck".to_string(),
            },
            related_ids: BTreeSet::new(),
        }
    }

    fn govee_strip() -> DeviceDescriptor {
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

    fn plug(slot: PlugSlot, id: &str) -> DeviceDescriptor {
        DeviceDescriptor {
            id: id.to_string(),
            vendor: Vendor::Wyze,
            address: VendorAddress::PlugSlot { slot },
            related_ids: BTreeSet::new(),
        }
    }

    #[test]
    fn should_leave_only_the_lifx_step_for_a_lifx_device() {
        let steps = candidate_steps(PowerAction::On, &lifx_light());
        assert_eq!(steps, vec![StepId::LifxSetState]);
    }

    #[test]
    fn should_leave_all_three_govee_steps_for_a_govee_device() {
        let steps = candidate_steps(PowerAction::On, &govee_strip());
        assert_eq!(
            steps,
            vec![StepId::GoveeTurn, StepId::GoveeColor, StepId::GoveeBrightness]
        );
    }

    #[test]
    fn should_fire_plug1_on_and_suppress_everything_else() {
        let steps = candidate_steps(PowerAction::On, &plug(PlugSlot::Plug1, "plug_front_porch1"));
        assert_eq!(steps, vec![StepId::WyzePlug1On]);
    }

    #[test]
    fn should_suppress_sibling_plug_same_polarity_step() {
        let steps = candidate_steps(PowerAction::On, &plug(PlugSlot::Plug2, "plug_front_porch2"));
        assert!(!steps.contains(&StepId::WyzePlug1On));
        assert_eq!(steps, vec![StepId::WyzePlug2On]);
    }

    #[test]
    fn should_suppress_entire_opposite_polarity_group_on_an_on_event() {
        for device in [
            plug(PlugSlot::Plug1, "plug_front_porch1"),
            plug(PlugSlot::All, "plugs_front_porch"),
        ] {
            let steps = candidate_steps(PowerAction::On, &device);
            assert!(!steps.contains(&StepId::WyzePlug1Off));
            assert!(!steps.contains(&StepId::WyzePlug2Off));
        }
    }

    #[test]
    fn should_suppress_entire_on_group_on_an_off_event() {
        let steps = candidate_steps(PowerAction::Off, &plug(PlugSlot::Plug1, "plug_front_porch1"));
        assert!(!steps.contains(&StepId::WyzePlug1On));
        assert!(!steps.contains(&StepId::WyzePlug2On));
        assert_eq!(steps, vec![StepId::WyzePlug1Off]);
    }

    #[test]
    fn should_keep_both_same_polarity_plug_steps_for_the_all_plugs_group() {
        let steps = candidate_steps(PowerAction::On, &plug(PlugSlot::All, "plugs_front_porch"));
        assert_eq!(steps, vec![StepId::WyzePlug1On, StepId::WyzePlug2On]);
    }

    #[test]
    fn should_never_propose_the_debug_email_step() {
        for device in [
            lifx_light(),
            govee_strip(),
            plug(PlugSlot::All, "plugs_front_porch"),
        ] {
            for action in [PowerAction::On, PowerAction::Off] {
                assert!(!candidate_steps(action, &device).contains(&StepId::DebugEmail));
            }
        }
    }

    #[test]
    fn should_suppress_exactly_one_polarity_group_for_every_known_device() {
        for device in [
            plug(PlugSlot::Plug1, "p1"),
            plug(PlugSlot::Plug2, "p2"),
            plug(PlugSlot::All, "all"),
        ] {
            for action in [PowerAction::On, PowerAction::Off] {
                let steps = candidate_steps(action, &device);
                let opposite = action.opposite();
                assert!(
                    steps.iter().all(|s| s.polarity() != Some(opposite)),
                    "no opposite-polarity step may survive"
                );
                assert!(!steps.is_empty(), "a known device must keep a candidate");
            }
        }
    }
}
