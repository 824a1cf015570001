//! Platform detection and the top-level device tree scan

use crate::collectors::devtree::DeviceTree;
use crate::collectors::{cpu, firmware, memory, models};
use crate::data::{HardwareNode, HwClass};

const POWERNV_COMPATIBLE: &str = "ibm,powernv";
const SERIAL_ROTATION: usize = 13;

/// How the rest of the tree is laid out, decided once from the root node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStrategy {
    /// OPAL firmware on a bare-metal POWER host; memory comes from VPD
    PowerNv,
    /// Classic Open Firmware (Apple, CHRP); memory comes from SPD data
    OpenFirmware,
}

impl ScanStrategy {
    pub fn detect(dt: &DeviceTree) -> Self {
        if dt.string("compatible").starts_with(POWERNV_COMPATIBLE) {
            ScanStrategy::PowerNv
        } else {
            ScanStrategy::OpenFirmware
        }
    }

    /// Fill in system-level identity for this platform
    fn describe_system(self, dt: &DeviceTree, system: &mut HardwareNode) {
        match self {
            ScanStrategy::PowerNv => {
                system.vendor = dt.string_or("vendor", "IBM");
                system.product = dt.string("model-name");
            }
            ScanStrategy::OpenFirmware => {
                system.vendor = dt.string_or("copyright", &system.vendor);
                models::apply_model_name(system);
            }
        }
    }

    fn scan_core(self, dt: &DeviceTree, core: &mut HardwareNode) {
        core.add_hint("icon", "board");
        scan_root(dt, core);
        match self {
            ScanStrategy::PowerNv => {
                memory::scan_vpd_dimms(dt, core);
                cpu::scan_cpus(dt, core);
            }
            ScanStrategy::OpenFirmware => {
                firmware::scan_firmware(dt, core);
                memory::scan_memory_controllers(dt, core);
                cpu::scan_cpus(dt, core);
            }
        }
    }

    fn tag_system(self, system: &mut HardwareNode) {
        if self == ScanStrategy::PowerNv {
            system.add_capability("powernv", "Non-virtualized");
            system.add_capability("opal", "OPAL firmware");
        }
    }
}

/// Bus clock of the whole tree
pub fn scan_root(dt: &DeviceTree, core: &mut HardwareNode) {
    core.clock = dt.long("clock-frequency");
}

/// Undo the byte order some firmware stores serial numbers in: when the
/// serial has an embedded NUL, the part after the first 13 characters
/// belongs in front. Serials without NUL come back unchanged.
///
/// Each half is also split on any interior NUL and its non-empty pieces
/// are joined with single spaces, so the result never contains NUL.
pub fn fix_serial_number(serial: &str) -> String {
    if !serial.contains('\0') {
        return serial.to_string();
    }

    let split = serial
        .char_indices()
        .nth(SERIAL_ROTATION)
        .map_or(serial.len(), |(i, _)| i);
    let (head, tail) = serial.split_at(split);

    let clean = |s: &str| -> String {
        s.split('\0')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    };

    [clean(tail), clean(head)]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Describe the machine behind `dt` under `system`.
///
/// Hardware lands under the `core` child, which is created if missing.
/// Returns `false` only when there is no device tree at all.
pub fn scan(dt: &DeviceTree, system: &mut HardwareNode) -> bool {
    if !dt.is_present() {
        log::debug!("no device tree at {}", dt.root().display());
        return false;
    }

    if system.child("core").is_none() {
        system.add_child(HardwareNode::new("core", HwClass::Bus));
    }

    system.product = dt.string_or("model", &system.product);
    system.add_hint("icon", "motherboard");

    system.serial = dt.string_or("serial-number", &system.serial);
    if system.serial.is_empty() {
        system.serial = dt.string("system-id");
    }
    system.serial = fix_serial_number(&system.serial);

    let strategy = ScanStrategy::detect(dt);
    log::debug!("device tree at {}: {:?}", dt.root().display(), strategy);

    strategy.describe_system(dt, system);
    if let Some(core) = system.child_mut("core") {
        strategy.scan_core(dt, core);
    }
    strategy.tag_system(system);

    true
}
