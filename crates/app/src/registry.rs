//! Device registry — exact-match lookup from device id to descriptor.
//!
//! Built once from static configuration and read-only afterwards; it is the
//! only resource shared between runs, so no locking is needed.

use std::collections::HashMap;

use switchboard_domain::device::DeviceDescriptor;
use switchboard_domain::error::ConfigError;

/// Read-only map of registered devices.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: HashMap<String, DeviceDescriptor>,
}

impl DeviceRegistry {
    /// Build a registry from configuration entries.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an id is defined more than once, when a
    /// descriptor's addressing does not match its vendor, or when a
    /// `related_ids` entry points at an unregistered device.
    pub fn from_descriptors(
        descriptors: impl IntoIterator<Item = DeviceDescriptor>,
    ) -> Result<Self, ConfigError> {
        let mut devices = HashMap::new();
        for descriptor in descriptors {
            descriptor.validate()?;
            if devices.contains_key(&descriptor.id) {
                return Err(ConfigError::DuplicateDevice(descriptor.id));
            }
            devices.insert(descriptor.id.clone(), descriptor);
        }

        for descriptor in devices.values() {
            for related in &descriptor.related_ids {
                if !devices.contains_key(related) {
                    return Err(ConfigError::UnknownRelatedDevice {
                        id: descriptor.id.clone(),
                        related: related.clone(),
                    });
                }
            }
        }

        Ok(Self { devices })
    }

    /// Exact-match lookup. No fuzzy matching.
    #[must_use]
    pub fn resolve(&self, device_id: &str) -> Option<&DeviceDescriptor> {
        self.devices.get(device_id)
    }

    /// Iterate over every registered descriptor.
    pub fn iter(&self) -> impl Iterator<Item = &DeviceDescriptor> {
        self.devices.values()
    }

    /// Number of registered devices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// Whether no devices are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}
