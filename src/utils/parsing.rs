//! String parsing utilities

use crate::error::{OfwscanError, Result};

/// Parse the leading decimal digits of a property value ("512", "512 MB")
pub fn parse_leading_decimal(value: &str) -> Result<u64> {
    let trimmed = value.trim_start();
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());

    trimmed[..digits_end]
        .parse()
        .map_err(|_| OfwscanError::Parse(format!("Invalid decimal value: {:?}", value)))
}

/// Convert mebibytes to bytes
pub fn mib_to_bytes(mib: u64) -> u64 {
    mib.saturating_mul(1024 * 1024)
}

/// Render a packed `cpu-version` word as `<vendor hex>.<major>.<minor>`
pub fn format_cpu_version(version: u64) -> String {
    let minor = version & 0x00ff;
    let major = (version & 0xff00) >> 8;
    format!("{:x}.{}.{}", (version & 0xffff_0000) >> 16, major, minor)
}
