//! Configuration for problem validation.

use crate::tensor::MAX_DEVICES;

/// Options controlling [`Problem::validate_with`](super::Problem::validate_with).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Largest device count a profile may hold.
    pub max_devices: usize,
    /// Whether matched dimensions must agree in size.
    pub check_sizes: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_devices: MAX_DEVICES,
            check_sizes: true,
        }
    }
}

impl ValidationConfig {
    /// Creates a config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the largest accepted device count.
    pub fn with_max_devices(mut self, max_devices: usize) -> Self {
        self.max_devices = max_devices;
        self
    }

    /// Enables or disables dimension size matching.
    pub fn with_size_checks(mut self, enabled: bool) -> Self {
        self.check_sizes = enabled;
        self
    }

    /// Creates a config that checks index structure only.
    ///
    /// Suited to problems whose sizes are bound when kernels are enqueued.
    pub fn relaxed() -> Self {
        Self {
            max_devices: MAX_DEVICES,
            check_sizes: false,
        }
    }
}
