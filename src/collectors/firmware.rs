//! BootROM and OpenPROM firmware nodes

use crate::collectors::devtree::DeviceTree;
use crate::data::{HardwareNode, HwClass};

const BOOTROM: &str = "rom/boot-rom";
const OPENPROM: &str = "openprom";

/// Attach firmware nodes for `rom/boot-rom` and `openprom` when present
pub fn scan_firmware(dt: &DeviceTree, core: &mut HardwareNode) {
    if dt.exists(BOOTROM) {
        core.add_child(collect_bootrom(dt));
    }
    if dt.exists(OPENPROM) {
        core.add_child(collect_openprom(dt));
    }
}

fn collect_bootrom(dt: &DeviceTree) -> HardwareNode {
    let mut bootrom = HardwareNode::new("firmware", HwClass::Memory);
    bootrom.product = dt.string("rom/boot-rom/model");
    bootrom.description = "BootROM".to_string();
    bootrom.version = dt.string("rom/boot-rom/BootROM-version");

    let upgrade = dt.string("rom/boot-rom/write-characteristic");
    if !upgrade.is_empty() {
        bootrom.add_capability("upgrade", "");
        bootrom.add_capability(&upgrade, "");
    }

    let mut reg = dt.stream("rom/boot-rom/reg");
    if reg.is_open() {
        let (base, size) = match reg.next_word(dt.word()) {
            Some(base) => (base, reg.next_word(dt.word()).unwrap_or(0)),
            None => (0, 0),
        };
        bootrom.phys_id = base;
        bootrom.size = size;
    }

    bootrom.claim();
    log::debug!(
        "bootrom {:?} version {:?} at {:#x}",
        bootrom.product,
        bootrom.version,
        bootrom.phys_id
    );
    bootrom
}

fn collect_openprom(dt: &DeviceTree) -> HardwareNode {
    let mut openprom = HardwareNode::new("firmware", HwClass::Memory);
    openprom.product = dt.string("openprom/model");

    if dt.exists("openprom/supports-bootinfo") {
        openprom.add_capability("bootinfo", "");
    }

    openprom.logical_name = dt.root().display().to_string();
    openprom.claim();
    log::debug!("openprom {:?}", openprom.product);
    openprom
}
