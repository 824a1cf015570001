//! ofwscan library
//!
//! Hardware discovery from an OpenFirmware device tree exposed as a
//! pseudo-filesystem (`/proc/device-tree` on Linux).

pub mod collectors;
pub mod config;
pub mod data;
pub mod error;
pub mod utils;

pub use collectors::{DeviceTree, ScanStrategy};
pub use config::{Config, ScanConfig};
pub use data::{HardwareNode, HwClass};
pub use error::{OfwscanError, Result};
pub use utils::file::WordSize;

/// Scan the device tree described by `config` into `system`.
///
/// Hardware is attached under the `core` child of `system`. Returns `false`
/// when the device tree does not exist.
pub fn scan_device_tree(system: &mut HardwareNode, config: &ScanConfig) -> bool {
    collectors::platform::scan(&DeviceTree::from_config(config), system)
}

/// Build a fresh hardware tree from the device tree described by `config`
pub fn collect_hardware_tree(config: &ScanConfig) -> Result<HardwareNode> {
    let mut system = HardwareNode::new("system", HwClass::Other);
    if !scan_device_tree(&mut system, config) {
        return Err(OfwscanError::Detection(format!(
            "no device tree at {}",
            config.root.display()
        )));
    }
    Ok(system)
}
