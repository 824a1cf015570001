//! Hardware tree structures

use std::collections::BTreeMap;

/// Broad class of a hardware node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwClass {
    Bus,
    Processor,
    Memory,
    Other,
}

/// One physical or logical device in the hardware tree.
///
/// `id` is the class name used for child lookup (`core`, `cpu`, `cache`,
/// `memory`, `bank`, `firmware`). Children are owned and kept in the order
/// they were attached.
#[derive(Debug, Clone, PartialEq)]
pub struct HardwareNode {
    pub id: String,
    pub class: HwClass,
    pub description: String,
    pub product: String,
    pub vendor: String,
    pub version: String,
    pub serial: String,
    pub slot: String,
    pub bus_info: String,
    pub logical_name: String,
    pub phys_id: u64,
    /// Bytes for memory, Hz for processors
    pub size: u64,
    pub clock: u64,
    pub enabled: bool,
    pub claimed: bool,
    capabilities: Vec<(String, String)>,
    config: BTreeMap<String, String>,
    hints: BTreeMap<String, String>,
    children: Vec<HardwareNode>,
}

impl HardwareNode {
    pub fn new(id: &str, class: HwClass) -> Self {
        HardwareNode {
            id: id.to_string(),
            class,
            description: String::new(),
            product: String::new(),
            vendor: String::new(),
            version: String::new(),
            serial: String::new(),
            slot: String::new(),
            bus_info: String::new(),
            logical_name: String::new(),
            phys_id: 0,
            size: 0,
            clock: 0,
            enabled: true,
            claimed: false,
            capabilities: Vec::new(),
            config: BTreeMap::new(),
            hints: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Attach `child` as the last child and return a handle to it
    pub fn add_child(&mut self, child: HardwareNode) -> &mut HardwareNode {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    pub fn children(&self) -> &[HardwareNode] {
        &self.children
    }

    /// First direct child with the given id
    pub fn child(&self, id: &str) -> Option<&HardwareNode> {
        self.children.iter().find(|c| c.id == id)
    }

    pub fn child_mut(&mut self, id: &str) -> Option<&mut HardwareNode> {
        self.children.iter_mut().find(|c| c.id == id)
    }

    /// Direct children with the given id, in attachment order
    pub fn children_with_id<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a HardwareNode> {
        self.children.iter().filter(move |c| c.id == id)
    }

    /// Add a capability tag; re-adding an existing tag is a no-op
    pub fn add_capability(&mut self, tag: &str, description: &str) {
        if tag.is_empty() || self.has_capability(tag) {
            return;
        }
        self.capabilities
            .push((tag.to_string(), description.to_string()));
    }

    pub fn has_capability(&self, tag: &str) -> bool {
        self.capabilities.iter().any(|(t, _)| t == tag)
    }

    pub fn capabilities(&self) -> &[(String, String)] {
        &self.capabilities
    }

    pub fn set_config(&mut self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }

    pub fn config(&self, key: &str) -> Option<&str> {
        self.config.get(key).map(String::as_str)
    }

    pub fn add_hint(&mut self, key: &str, value: &str) {
        self.hints.insert(key.to_string(), value.to_string());
    }

    pub fn hint(&self, key: &str) -> Option<&str> {
        self.hints.get(key).map(String::as_str)
    }

    /// Mark the node as interpreted so generic scanners leave it alone
    pub fn claim(&mut self) {
        self.claimed = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }
}
