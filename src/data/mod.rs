//! Data structures produced by the collectors

pub mod hardware;

pub use hardware::{HardwareNode, HwClass};
