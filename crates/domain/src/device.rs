//! Device descriptor — static mapping from a device id to vendor identity
//! and vendor-specific addressing.
//!
//! Descriptors are process-wide static configuration, read-only at run time.
//! Dispatch over the vendor is a tagged variant rather than stored function
//! references, so every match site is checked exhaustively at compile time.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// The vendor family that handles a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vendor {
    Lifx,
    Govee,
    Wyze,
}

impl std::fmt::Display for Vendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lifx => f.write_str("lifx"),
            Self::Govee => f.write_str("govee"),
            Self::Wyze => f.write_str("wyze"),
        }
    }
}

/// Which plug-toggle steps a Wyze device id denotes.
///
/// "All plugs" is itself a valid device id, distinct from the individual
/// plug ids; it maps to every plug step of the matching polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlugSlot {
    Plug1,
    Plug2,
    All,
}

/// Vendor-specific addressing data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VendorAddress {
    /// LIFX lights are addressed by label selector.
    Label { label: String },
    /// Govee devices are addressed by MAC and model.
    Mac { mac: String, model: String },
    /// Wyze plugs are addressed by slot within the plug group.
    PlugSlot { slot: PlugSlot },
}

/// Static record describing one registered device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    /// Human-chosen device id, matched exactly.
    pub id: String,
    /// Vendor family handling this device.
    pub vendor: Vendor,
    /// Vendor-specific addressing data.
    pub address: VendorAddress,
    /// Devices whose automation steps are mutually excluded with this one.
    #[serde(default)]
    pub related_ids: BTreeSet<String>,
}

impl DeviceDescriptor {
    /// Check that the addressing data matches the declared vendor.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidDevice`] on a vendor/address mismatch.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let matches = matches!(
            (self.vendor, &self.address),
            (Vendor::Lifx, VendorAddress::Label { .. })
                | (Vendor::Govee, VendorAddress::Mac { .. })
                | (Vendor::Wyze, VendorAddress::PlugSlot { .. })
        );
        if matches {
            Ok(())
        } else {
            Err(ConfigError::InvalidDevice {
                id: self.id.clone(),
                reason: "addressing data does not match vendor",
            })
        }
    }

    /// The plug slot, when this is a Wyze device.
    #[must_use]
    pub fn plug_slot(&self) -> Option<PlugSlot> {
        match self.address {
            VendorAddress::PlugSlot { slot } => Some(slot),
            VendorAddress::Label { .. } | VendorAddress::Mac { .. } => None,
        }
    }
}
