//! Collectors that turn device tree nodes into hardware nodes

pub mod cpu;
pub mod devtree;
pub mod firmware;
pub mod memory;
pub mod models;
pub mod platform;
pub mod spd;

#[cfg(test)]
pub(crate) mod testutil;

pub use devtree::DeviceTree;
pub use platform::ScanStrategy;
