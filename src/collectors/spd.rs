//! Serial Presence Detect decoding for DDR2 and DDR3 modules

use crate::data::HardwareNode;
use crate::utils::file::{strip, PropertyStream};

/// Size of one module's raw SPD buffer
pub const DIMM_INFO_SIZE: usize = 0x100;

/// Bytes common to every SPD layout, read before the generation is known
pub const SPD_HEADER_SIZE: usize = 0x80;

pub type DimmInfoBuffer = [u8; DIMM_INFO_SIZE];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DramGeneration {
    Ddr2,
    Ddr3,
}

/// Byte offsets of the identification fields for one generation
struct SpdLayout {
    mfg_location: usize,
    revision: (usize, usize),
    year: usize,
    week: usize,
    part_number: usize,
    spd_revision: usize,
}

const DDR3_LAYOUT: SpdLayout = SpdLayout {
    mfg_location: 0x77,
    revision: (0x92, 0x93),
    year: 0x78,
    week: 0x79,
    part_number: 0x80,
    spd_revision: 0x01,
};

const DDR2_LAYOUT: SpdLayout = SpdLayout {
    mfg_location: 0x48,
    revision: (0x5b, 0x5c),
    year: 0x5d,
    week: 0x5e,
    part_number: 0x49,
    spd_revision: 0x3e,
};

const PART_NUMBER_LEN: usize = 18;

impl DramGeneration {
    /// Classify a module from the first bytes of its SPD data
    pub fn classify(header: &[u8]) -> Option<Self> {
        let (b0, b2) = match (header.first(), header.get(2)) {
            (Some(b0), Some(b2)) => (*b0, *b2),
            _ => return None,
        };

        if b2 >= 9 {
            Some(DramGeneration::Ddr3)
        } else if b0 < 15 {
            Some(DramGeneration::Ddr2)
        } else {
            None
        }
    }

    /// Number of SPD bytes this module carries, capped at the buffer size
    pub fn spd_length(self, header: &[u8]) -> usize {
        let total = match self {
            // bits 4-6 of byte 0 give the used size beyond the header
            DramGeneration::Ddr3 => {
                let shift = ((header[0] & 0x70) >> 4) as u32;
                SPD_HEADER_SIZE + (64usize << shift)
            }
            // byte 1 is log2 of the total size
            DramGeneration::Ddr2 => 1usize
                .checked_shl(header[1] as u32)
                .unwrap_or(DIMM_INFO_SIZE),
        };
        total.clamp(SPD_HEADER_SIZE, DIMM_INFO_SIZE)
    }

    fn layout(self) -> &'static SpdLayout {
        match self {
            DramGeneration::Ddr3 => &DDR3_LAYOUT,
            DramGeneration::Ddr2 => &DDR2_LAYOUT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDetection {
    None,
    Parity,
    Ecc,
}

impl ErrorDetection {
    fn from_spd(generation: DramGeneration, spd: &DimmInfoBuffer) -> Option<Self> {
        match generation {
            DramGeneration::Ddr3 => match (spd[0x08] >> 3) & 0x3 {
                0 => Some(ErrorDetection::None),
                1 => Some(ErrorDetection::Ecc),
                _ => None,
            },
            DramGeneration::Ddr2 => match spd[0x0b] & 0x3 {
                0 => Some(ErrorDetection::None),
                1 => Some(ErrorDetection::Parity),
                _ => Some(ErrorDetection::Ecc),
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorDetection::None => "none",
            ErrorDetection::Parity => "parity",
            ErrorDetection::Ecc => "ecc",
        }
    }
}

/// Identification fields decoded from one module
#[derive(Debug, Clone, PartialEq)]
pub struct SpdInfo {
    pub generation: DramGeneration,
    pub error_detection: Option<ErrorDetection>,
    pub part_number: String,
    /// `REV1REV2,YEAR WEEK,MFGLOC` in hex
    pub version: String,
    pub spd_revision: (u8, u8),
}

impl SpdInfo {
    pub fn decode(spd: &DimmInfoBuffer) -> Option<Self> {
        let generation = DramGeneration::classify(spd)?;
        let layout = generation.layout();

        let version = format!(
            "{:02X}{:02X},{:02X} {:02X},{:02X}",
            spd[layout.revision.0],
            spd[layout.revision.1],
            spd[layout.year],
            spd[layout.week],
            spd[layout.mfg_location]
        );
        let part_number = String::from_utf8_lossy(
            &spd[layout.part_number..layout.part_number + PART_NUMBER_LEN],
        )
        .into_owned();
        let rev = spd[layout.spd_revision];

        Some(SpdInfo {
            generation,
            error_detection: ErrorDetection::from_spd(generation, spd),
            part_number,
            version,
            spd_revision: (rev >> 4, rev & 0x0f),
        })
    }

    /// Capability tag naming the SPD format revision
    pub fn spd_capability(&self) -> String {
        format!("spd-{}.{}", self.spd_revision.0, self.spd_revision.1)
    }

    /// Part number without its space or NUL padding
    pub fn serial(&self) -> String {
        strip(&self.part_number).replace('\0', "")
    }

    /// Merge the decoded fields into a memory bank node
    pub fn apply(&self, bank: &mut HardwareNode) {
        if let Some(scheme) = self.error_detection {
            if scheme != ErrorDetection::None {
                bank.add_capability(scheme.as_str(), "");
            }
            bank.set_config("errordetection", scheme.as_str());
        }
        bank.serial = self.serial();
        bank.version = self.version.clone();
        bank.add_capability(&self.spd_capability(), "");
    }
}

/// Consume one module's SPD data from a `dimm-info` stream.
///
/// The header is always consumed; the remainder only for recognized
/// generations. Returns `None` when the header is short.
pub fn read_dimm_info(stream: &mut PropertyStream) -> Option<DimmInfoBuffer> {
    let mut spd: DimmInfoBuffer = [0; DIMM_INFO_SIZE];
    if stream.read_into(&mut spd[..SPD_HEADER_SIZE]) != SPD_HEADER_SIZE {
        return None;
    }

    if let Some(generation) = DramGeneration::classify(&spd) {
        let total = generation.spd_length(&spd);
        stream.read_into(&mut spd[SPD_HEADER_SIZE..total]);
    }
    Some(spd)
}
