//! Processor and cache discovery under `/cpus`
//!
//! Both loops stop at the first entry of the wrong `device_type` instead of
//! skipping it, so anything sorted after a stray sibling is not reported.

use crate::collectors::devtree::{join, DeviceTree};
use crate::data::{HardwareNode, HwClass};
use crate::utils::file::strip;
use crate::utils::parsing::format_cpu_version;

const CPUS: &str = "cpus";

/// Attach one processor node per CPU entry, in directory order
pub fn scan_cpus(dt: &DeviceTree, core: &mut HardwareNode) {
    let mut current = 0;

    for name in dt.subdirs(CPUS) {
        let base = join(CPUS, &name);

        if dt.exists(&join(&base, "device_type"))
            && strip(&dt.string(&join(&base, "device_type"))) != "cpu"
        {
            log::debug!("{} is not a cpu, stopping cpu scan", base);
            break;
        }

        let cpu = collect_cpu(dt, &base, current);
        current += 1;
        core.add_child(cpu);
    }
}

fn collect_cpu(dt: &DeviceTree, base: &str, index: usize) -> HardwareNode {
    let prop = |name: &str| join(base, name);

    let mut cpu = HardwareNode::new("cpu", HwClass::Processor);
    cpu.product = dt.string(&prop("name"));
    cpu.description = "CPU".to_string();
    cpu.claim();
    cpu.bus_info = format!("cpu@{}", index);
    cpu.size = dt.long(&prop("clock-frequency"));
    cpu.clock = dt.long(&prop("bus-frequency"));

    if dt.exists(&prop("altivec")) {
        cpu.add_capability("altivec", "");
    }

    let version = dt.long(&prop("cpu-version"));
    if version != 0 {
        cpu.version = format_cpu_version(version);
    }

    if dt.exists(&prop("state")) && strip(&dt.string(&prop("state"))) != "running" {
        cpu.disable();
    }

    if dt.exists(&prop("performance-monitor")) {
        cpu.add_capability("performance-monitor", "");
    }

    if dt.exists(&prop("d-cache-size")) {
        let mut l1 = HardwareNode::new("cache", HwClass::Memory);
        l1.claim();
        l1.description = "L1 Cache".to_string();
        l1.size = dt.long(&prop("d-cache-size"));
        if l1.size > 0 {
            cpu.add_child(l1);
        }
    }

    scan_caches(dt, base, &mut cpu);

    log::debug!(
        "{} {:?} at {} Hz{}",
        cpu.bus_info,
        cpu.product,
        cpu.size,
        if cpu.enabled { "" } else { " (disabled)" }
    );
    cpu
}

fn scan_caches(dt: &DeviceTree, cpu_base: &str, cpu: &mut HardwareNode) {
    for name in dt.subdirs(cpu_base) {
        let base = join(cpu_base, &name);
        let prop = |name: &str| join(&base, name);

        let kind = dt.string(&prop("device_type"));
        let kind = strip(&kind);
        if kind != "cache" && kind != "l2-cache" {
            log::debug!("{} is not a cache, stopping cache scan", base);
            break;
        }

        let mut cache = HardwareNode::new("cache", HwClass::Memory);
        cache.claim();
        cache.description = "L2 Cache".to_string();
        cache.size = dt.long(&prop("d-cache-size"));
        cache.clock = dt.long(&prop("clock-frequency"));

        if dt.exists(&prop("cache-unified")) {
            cache.description.push_str(" (unified)");
        } else {
            let mut icache = cache.clone();
            cache.description.push_str(" (data)");
            icache.description.push_str(" (instruction)");
            icache.size = dt.long(&prop("i-cache-size"));

            if icache.size > 0 {
                cpu.add_child(icache);
            }
        }

        if cache.size > 0 {
            cpu.add_child(cache);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collectors::testutil::TreeBuilder;

    fn scan(tree: &TreeBuilder) -> HardwareNode {
        let mut core = HardwareNode::new("core", HwClass::Bus);
        scan_cpus(&tree.device_tree(), &mut core);
        core
    }

    #[test]
    fn test_single_cpu() {
        let tree = TreeBuilder::new();
        tree.string("cpus/PowerPC,970@0/device_type", "cpu")
            .string("cpus/PowerPC,970@0/name", "PowerPC,970")
            .word32("cpus/PowerPC,970@0/clock-frequency", 2_000_000_000)
            .word32("cpus/PowerPC,970@0/bus-frequency", 1_000_000_000)
            .word32("cpus/PowerPC,970@0/cpu-version", 0x0039_0202)
            .flag("cpus/PowerPC,970@0/altivec")
            .flag("cpus/PowerPC,970@0/performance-monitor")
            .string("cpus/PowerPC,970@0/state", "running");

        let core = scan(&tree);
        assert_eq!(core.children().len(), 1);
        let cpu = &core.children()[0];
        assert_eq!(cpu.class, HwClass::Processor);
        assert_eq!(cpu.product, "PowerPC,970");
        assert_eq!(cpu.description, "CPU");
        assert_eq!(cpu.bus_info, "cpu@0");
        assert_eq!(cpu.size, 2_000_000_000);
        assert_eq!(cpu.clock, 1_000_000_000);
        assert_eq!(cpu.version, "39.2.2");
        assert!(cpu.has_capability("altivec"));
        assert!(cpu.has_capability("performance-monitor"));
        assert!(cpu.enabled);
        assert!(cpu.claimed);
    }

    #[test]
    fn test_stopped_cpu_is_disabled_but_listed() {
        let tree = TreeBuilder::new();
        tree.string("cpus/cpu@0/device_type", "cpu")
            .string("cpus/cpu@0/state", "running ")
            .string("cpus/cpu@1/device_type", "cpu")
            .string("cpus/cpu@1/state", "stopped");

        let core = scan(&tree);
        let cpus: Vec<&HardwareNode> = core.children_with_id("cpu").collect();
        assert_eq!(cpus.len(), 2);
        assert!(cpus[0].enabled);
        assert!(!cpus[1].enabled);
        assert_eq!(cpus[1].bus_info, "cpu@1");
    }

    #[test]
    fn test_non_cpu_sibling_stops_scan() {
        let tree = TreeBuilder::new();
        tree.string("cpus/a@0/device_type", "cpu")
            .string("cpus/b@0/device_type", "gpu")
            .string("cpus/c@0/device_type", "cpu");

        let core = scan(&tree);
        assert_eq!(core.children().len(), 1);
        assert_eq!(core.children()[0].bus_info, "cpu@0");
    }

    #[test]
    fn test_missing_device_type_counts_as_cpu() {
        let tree = TreeBuilder::new();
        tree.string("cpus/cpu@0/name", "PowerPC,G4");

        let core = scan(&tree);
        assert_eq!(core.children().len(), 1);
        assert_eq!(core.children()[0].version, "");
    }

    #[test]
    fn test_l1_cache_only_when_sized() {
        let tree = TreeBuilder::new();
        tree.string("cpus/cpu@0/device_type", "cpu")
            .word32("cpus/cpu@0/d-cache-size", 32768)
            .string("cpus/cpu@1/device_type", "cpu")
            .word32("cpus/cpu@1/d-cache-size", 0);

        let core = scan(&tree);
        let l1 = &core.children()[0].children()[0];
        assert_eq!(l1.description, "L1 Cache");
        assert_eq!(l1.size, 32768);
        assert!(core.children()[1].children().is_empty());
    }

    #[test]
    fn test_split_l2_cache() {
        let tree = TreeBuilder::new();
        tree.string("cpus/cpu@0/device_type", "cpu")
            .string("cpus/cpu@0/l2-cache/device_type", "cache")
            .word32("cpus/cpu@0/l2-cache/d-cache-size", 262144)
            .word32("cpus/cpu@0/l2-cache/i-cache-size", 131072)
            .word32("cpus/cpu@0/l2-cache/clock-frequency", 500_000_000);

        let core = scan(&tree);
        let caches = core.children()[0].children();
        assert_eq!(caches.len(), 2);
        assert_eq!(caches[0].description, "L2 Cache (instruction)");
        assert_eq!(caches[0].size, 131072);
        assert_eq!(caches[1].description, "L2 Cache (data)");
        assert_eq!(caches[1].size, 262144);
        assert_eq!(caches[1].clock, 500_000_000);
    }

    #[test]
    fn test_unified_l2_cache() {
        let tree = TreeBuilder::new();
        tree.string("cpus/cpu@0/device_type", "cpu")
            .string("cpus/cpu@0/l2-cache/device_type", "l2-cache")
            .flag("cpus/cpu@0/l2-cache/cache-unified")
            .word32("cpus/cpu@0/l2-cache/d-cache-size", 524288)
            .word32("cpus/cpu@0/l2-cache/i-cache-size", 524288);

        let core = scan(&tree);
        let caches = core.children()[0].children();
        assert_eq!(caches.len(), 1);
        assert_eq!(caches[0].description, "L2 Cache (unified)");
    }

    #[test]
    fn test_non_cache_child_stops_cache_scan() {
        let tree = TreeBuilder::new();
        tree.string("cpus/cpu@0/device_type", "cpu")
            .string("cpus/cpu@0/a-cache/device_type", "cache")
            .flag("cpus/cpu@0/a-cache/cache-unified")
            .word32("cpus/cpu@0/a-cache/d-cache-size", 1024)
            .string("cpus/cpu@0/b-thermal/device_type", "sensor")
            .string("cpus/cpu@0/c-cache/device_type", "cache")
            .flag("cpus/cpu@0/c-cache/cache-unified")
            .word32("cpus/cpu@0/c-cache/d-cache-size", 2048);

        let core = scan(&tree);
        let caches = core.children()[0].children();
        assert_eq!(caches.len(), 1);
        assert_eq!(caches[0].size, 1024);
    }

    #[test]
    fn test_missing_cpus_directory() {
        let tree = TreeBuilder::new();
        tree.dir("memory");
        assert!(scan(&tree).children().is_empty());
    }
}
