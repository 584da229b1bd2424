//! Devices a problem is bound to.

use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::xml::{indent, make_name_safe, push_attr};

/// Maximum number of devices a profile may describe.
pub const MAX_DEVICES: usize = 1;

/// Name of the device that runs the reference (CPU) implementation.
pub const REFERENCE_DEVICE: &str = "cpu";

/// A compute device.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    pub num_compute_units: u32,
    pub clock_frequency_mhz: u32,
    pub flops_per_clock: u32,
}

impl Device {
    pub fn new(
        name: impl Into<String>,
        num_compute_units: u32,
        clock_frequency_mhz: u32,
        flops_per_clock: u32,
    ) -> Self {
        Self {
            name: name.into(),
            num_compute_units,
            clock_frequency_mhz,
            flops_per_clock,
        }
    }

    /// The reference device.
    pub fn reference() -> Self {
        Self::new(REFERENCE_DEVICE, 1, 0, 0)
    }

    /// Peak throughput in GFLOP/s.
    pub fn peak_gflops(&self) -> f64 {
        self.num_compute_units as f64 * self.clock_frequency_mhz as f64 * self.flops_per_clock as f64
            / 1000.0
    }
}

/// The set of devices a problem targets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeviceProfile {
    devices: Vec<Device>,
}

impl DeviceProfile {
    pub fn new(devices: impl IntoIterator<Item = Device>) -> Self {
        Self {
            devices: devices.into_iter().collect(),
        }
    }

    /// Profile holding only the reference device.
    pub fn reference() -> Self {
        Self::new([Device::reference()])
    }

    #[inline]
    pub fn num_devices(&self) -> usize {
        self.devices.len()
    }

    #[inline]
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// Device names joined with `_`, used to name generated libraries.
    pub fn lib_string(&self) -> String {
        self.devices
            .iter()
            .map(|device| make_name_safe(&device.name))
            .collect::<Vec<_>>()
            .join("_")
    }

    /// Renders the profile as a `<DP ... />` element.
    pub fn to_string_xml(&self, indent_level: usize) -> String {
        let mut state = indent(indent_level);
        state.push_str("<DP");
        push_attr(&mut state, "n", self.num_devices());
        for (i, device) in self.devices.iter().enumerate() {
            push_attr(&mut state, &alloc::format!("d{i}"), make_name_safe(&device.name));
            push_attr(&mut state, &alloc::format!("CU{i}"), device.num_compute_units);
            push_attr(&mut state, &alloc::format!("MHz{i}"), device.clock_frequency_mhz);
            push_attr(&mut state, &alloc::format!("FPC{i}"), device.flops_per_clock);
        }
        state.push_str(" />\n");
        state
    }
}

impl Ord for DeviceProfile {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.num_devices(), self.devices()).cmp(&(other.num_devices(), other.devices()))
    }
}

impl PartialOrd for DeviceProfile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
