//! Narrow Mach-O and ELF header decoders.
//!
//! Fixed-offset field extraction only: no load commands, no sections, no
//! program headers. Undersized buffers yield `None` ("not applicable"),
//! which callers must keep distinct from an invalid header.

use serde::{Deserialize, Serialize};

/// Minimum buffer length for Mach-O header decoding.
pub const MACHO_MIN_LEN: usize = 32;
/// Minimum buffer length for ELF header decoding.
pub const ELF_MIN_LEN: usize = 64;

/// Mach-O architecture labels keyed by magic value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MachArch {
    Intel64,
    Intel32,
    Arm64,
    Arm32,
}

impl MachArch {
    fn from_magic(magic: u32) -> Option<Self> {
        match magic {
            0xFEEDFACF => Some(MachArch::Intel64),
            0xFEEDFACE => Some(MachArch::Intel32),
            0xCFFAEDFE => Some(MachArch::Arm64),
            0xCEFAEDFE => Some(MachArch::Arm32),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MachArch::Intel64 => "64-bit Intel",
            MachArch::Intel32 => "32-bit Intel",
            MachArch::Arm64 => "64-bit ARM (ARM64)",
            MachArch::Arm32 => "32-bit ARM",
        }
    }
}

/// Decoded Mach-O header summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachHeader {
    /// Magic value as read (little-endian u32 at offset 0), hex formatted.
    pub magic_hex: String,
    /// Architecture label, "Unknown" when the magic is unrecognized.
    pub architecture: String,
    /// Raw cpu type field (little-endian u32 at offset 4), uninterpreted.
    pub cpu_type: u32,
    /// True iff the magic matched a known architecture.
    pub valid: bool,
}

/// Decode a Mach-O header. `None` for buffers under 32 bytes.
pub fn analyze_macho(data: &[u8]) -> Option<MachHeader> {
    if data.len() < MACHO_MIN_LEN {
        return None;
    }
    let magic = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let cpu_type = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
    let arch = MachArch::from_magic(magic);
    Some(MachHeader {
        magic_hex: format!("0x{:x}", magic),
        architecture: arch.map(|a| a.label()).unwrap_or("Unknown").to_string(),
        cpu_type,
        valid: arch.is_some(),
    })
}

/// ELF word class from the e_ident class byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElfClass {
    Elf32,
    Elf64,
    Unknown,
}

/// ELF declared byte order from the e_ident data byte. Declared only:
/// the byte is not cross-checked against the header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElfData {
    Little,
    Big,
    Unknown,
}

/// Decoded ELF header summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElfHeader {
    pub class: ElfClass,
    pub data: ElfData,
    pub os_abi: u8,
    pub elf_type: u16,
    pub machine: u16,
    pub version: u32,
    pub entry_point: u64,
}

/// Decode an ELF header. `None` for buffers under 64 bytes.
///
/// Fixed fields honor the declared endianness byte; when it is neither
/// little nor big, little-endian is assumed. The entry point width follows
/// the declared word class (u32 at offset 24 for ELF32, u64 for ELF64).
pub fn analyze_elf(data: &[u8]) -> Option<ElfHeader> {
    if data.len() < ELF_MIN_LEN {
        return None;
    }

    let class = match data[4] {
        1 => ElfClass::Elf32,
        2 => ElfClass::Elf64,
        _ => ElfClass::Unknown,
    };
    let endianness = match data[5] {
        1 => ElfData::Little,
        2 => ElfData::Big,
        _ => ElfData::Unknown,
    };

    let read_u16 = |off: usize| {
        let b = [data[off], data[off + 1]];
        match endianness {
            ElfData::Big => u16::from_be_bytes(b),
            _ => u16::from_le_bytes(b),
        }
    };
    let read_u32 = |off: usize| {
        let b = [data[off], data[off + 1], data[off + 2], data[off + 3]];
        match endianness {
            ElfData::Big => u32::from_be_bytes(b),
            _ => u32::from_le_bytes(b),
        }
    };
    let read_u64 = |off: usize| {
        let mut b = [0u8; 8];
        b.copy_from_slice(&data[off..off + 8]);
        match endianness {
            ElfData::Big => u64::from_be_bytes(b),
            _ => u64::from_le_bytes(b),
        }
    };

    let entry_point = match class {
        ElfClass::Elf64 => read_u64(24),
        _ => u64::from(read_u32(24)),
    };

    Some(ElfHeader {
        class,
        data: endianness,
        os_abi: data[7],
        elf_type: read_u16(16),
        machine: read_u16(18),
        version: read_u32(20),
        entry_point,
    })
}

/// Format-specific header record attached to a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum HeaderInfo {
    MachO(MachHeader),
    Elf(ElfHeader),
}
