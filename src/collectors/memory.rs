//! Memory controller and DIMM discovery

use crate::collectors::devtree::{join, DeviceTree};
use crate::collectors::spd::{read_dimm_info, SpdInfo};
use crate::data::{HardwareNode, HwClass};
use crate::utils::file::strip;
use crate::utils::parsing::{mib_to_bytes, parse_leading_decimal};

const VPD: &str = "vpd";
const DIMM_PREFIX: &str = "ms-dimm@";

/// Scan Open Firmware memory controllers: `memory`, then `memory@0`,
/// `memory@1`, ... until a controller without `slot-names`.
/// Each controller gets its own `memory` node under `core`.
pub fn scan_memory_controllers(dt: &DeviceTree, core: &mut HardwareNode) {
    let mut index: Option<u32> = None;

    loop {
        let base = match index {
            Some(i) => format!("memory@{}", i),
            None => "memory".to_string(),
        };

        let slot_names = dt.strings(&join(&base, "slot-names"), dt.word().bytes());
        if slot_names.is_empty() {
            if index.is_none() {
                index = Some(0);
                continue;
            }
            break;
        }

        log::debug!("{}: {} memory slots", base, slot_names.len());
        let memory = core.add_child(HardwareNode::new("memory", HwClass::Memory));
        scan_memory_banks(dt, &base, &slot_names, memory);

        index = Some(index.map_or(0, |i| i + 1));
    }
}

fn scan_memory_banks(dt: &DeviceTree, base: &str, slot_names: &[String], memory: &mut HardwareNode) {
    let dimm_types = dt.strings(&join(base, "dimm-types"), 0);
    let dimm_speeds = dt.strings(&join(base, "dimm-speeds"), 0);
    let mut dimm_info = dt.stream(&join(base, "dimm-info"));
    let mut reg = dt.stream(&join(base, "reg"));

    if !reg.is_open() {
        log::debug!("{}: no reg property, skipping banks", base);
        return;
    }

    for (i, slot) in slot_names.iter().enumerate() {
        let mut bank = HardwareNode::new("bank", HwClass::Memory);

        let (_base, size) = match reg.next_u64() {
            Some(addr) => (addr, reg.next_u64().unwrap_or(0)),
            None => (0, 0),
        };

        if let Some(spd) = read_dimm_info(&mut dimm_info) {
            if size > 0 {
                match SpdInfo::decode(&spd) {
                    Some(info) => info.apply(&mut bank),
                    None => log::debug!("{}: unrecognized SPD data", slot),
                }
            }
        }

        if size > 0 {
            bank.add_hint("icon", "memory");
        }
        bank.description = dimm_types
            .get(i)
            .cloned()
            .unwrap_or_else(|| "Memory bank".to_string());
        bank.slot = slot.clone();
        if let Some(speed) = dimm_speeds.get(i) {
            bank.product = strip(speed).to_string();
        }
        bank.size = size;

        log::debug!("bank {:?}: {} bytes", bank.slot, bank.size);
        memory.add_child(bank);
    }
}

/// Scan OPAL vital product data: one bank per `vpd/ms-dimm@*` entry, all
/// under a single `memory` node.
pub fn scan_vpd_dimms(dt: &DeviceTree, core: &mut HardwareNode) {
    for name in dt.subdirs(VPD) {
        if !name.starts_with(DIMM_PREFIX) {
            continue;
        }

        let bank = collect_vpd_dimm(dt, &join(VPD, &name));
        if core.child("memory").is_none() {
            core.add_child(HardwareNode::new("memory", HwClass::Memory));
        }
        if let Some(memory) = core.child_mut("memory") {
            memory.add_child(bank);
        }
    }
}

fn collect_vpd_dimm(dt: &DeviceTree, base: &str) -> HardwareNode {
    let prop = |name: &str| join(base, name);

    let mut bank = HardwareNode::new("bank", HwClass::Memory);
    bank.serial = dt.string(&prop("serial-number"));
    bank.product = format!(
        "{} FRU#{}",
        dt.string(&prop("part-number")),
        dt.string(&prop("fru-number"))
    );
    bank.description = dt.string(&prop("description"));
    bank.slot = dt.string(&prop("ibm,loc-code"));

    match parse_leading_decimal(&dt.string(&prop("size"))) {
        Ok(mib) => bank.size = mib_to_bytes(mib),
        Err(err) => log::debug!("{}: {}", base, err),
    }
    bank.add_hint("icon", "memory");

    log::debug!("dimm {:?} at {:?}: {} bytes", bank.product, bank.slot, bank.size);
    bank
}
