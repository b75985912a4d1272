//! Format signatures and magic numbers.
//!
//! Maps leading magic bytes to a file-type descriptor via a fixed priority
//! table of hex prefixes. Matching is prefix-based against the hex encoding
//! of the first four bytes; the first matching entry wins. Unrecognized
//! buffers yield an explicit unknown descriptor carrying the caller's
//! extension hint, never an error.

use serde::{Deserialize, Serialize};

/// Coarse class of an identified file type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignatureClass {
    Archive,
    Executable,
    Image,
    Audio,
    Document,
    Compressed,
    Unknown,
}

/// Known file kinds, one variant per magic-table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileKind {
    Zip,
    Elf,
    Mp3,
    Jpeg,
    Png,
    Gif,
    Pdf,
    JavaClass,
    MachO64,
    MachO32,
    /// Mach-O 64-bit with byte-swapped magic (`cffaedfe`).
    MachO64Swapped,
    /// Mach-O 32-bit with byte-swapped magic (`cefaedfe`).
    MachO32Swapped,
    Gzip,
    Rar,
    Bzip2,
    Unknown,
}

impl FileKind {
    /// Human-readable type name.
    pub fn name(&self) -> &'static str {
        match self {
            FileKind::Zip => "ZIP/APK/JAR",
            FileKind::Elf => "ELF Binary",
            FileKind::Mp3 => "MP3 Audio",
            FileKind::Jpeg => "JPEG Image",
            FileKind::Png => "PNG Image",
            FileKind::Gif => "GIF Image",
            FileKind::Pdf => "PDF Document",
            FileKind::JavaClass => "Java Class",
            FileKind::MachO64 => "Mach-O 64-bit",
            FileKind::MachO32 => "Mach-O 32-bit",
            FileKind::MachO64Swapped => "Mach-O 64-bit (LE)",
            FileKind::MachO32Swapped => "Mach-O 32-bit (LE)",
            FileKind::Gzip => "GZIP Compressed",
            FileKind::Rar => "RAR Archive",
            FileKind::Bzip2 => "Bzip2 Archive",
            FileKind::Unknown => "Unknown",
        }
    }

    /// Coarse class for this kind.
    pub fn class(&self) -> SignatureClass {
        match self {
            FileKind::Zip | FileKind::Rar | FileKind::Bzip2 => SignatureClass::Archive,
            FileKind::Elf
            | FileKind::JavaClass
            | FileKind::MachO64
            | FileKind::MachO32
            | FileKind::MachO64Swapped
            | FileKind::MachO32Swapped => SignatureClass::Executable,
            FileKind::Jpeg | FileKind::Png | FileKind::Gif => SignatureClass::Image,
            FileKind::Mp3 => SignatureClass::Audio,
            FileKind::Pdf => SignatureClass::Document,
            FileKind::Gzip => SignatureClass::Compressed,
            FileKind::Unknown => SignatureClass::Unknown,
        }
    }

    /// Whether this kind is a Mach-O flavor (triggers the Mach-O header
    /// analyzer).
    pub fn is_macho(&self) -> bool {
        matches!(
            self,
            FileKind::MachO64
                | FileKind::MachO32
                | FileKind::MachO64Swapped
                | FileKind::MachO32Swapped
        )
    }
}

/// Priority table of hex-encoded magic prefixes. Order matters: longer or
/// more specific prefixes must precede shorter ones that would shadow them.
const MAGIC_TABLE: &[(&str, FileKind)] = &[
    ("504b0304", FileKind::Zip),
    ("7f454c46", FileKind::Elf),
    ("fffb", FileKind::Mp3),
    ("ffd8ffe0", FileKind::Jpeg),
    ("89504e47", FileKind::Png),
    ("47494638", FileKind::Gif),
    ("25504446", FileKind::Pdf),
    ("cafebabe", FileKind::JavaClass),
    ("feedfacf", FileKind::MachO64),
    ("feedface", FileKind::MachO32),
    ("cffaedfe", FileKind::MachO64Swapped),
    ("cefaedfe", FileKind::MachO32Swapped),
    ("1f8b08", FileKind::Gzip),
    ("526172", FileKind::Rar),
    ("425a68", FileKind::Bzip2),
];

/// Identified signature descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureInfo {
    /// Matched kind, `FileKind::Unknown` when no prefix matched.
    pub kind: FileKind,
    /// Human-readable name; for unknowns this carries the extension hint,
    /// e.g. `"so File"`.
    pub name: String,
    /// Coarse class.
    pub class: SignatureClass,
    /// Hex encoding of the leading bytes that were examined.
    pub magic_hex: String,
}

/// Identify a buffer from its leading magic bytes.
///
/// `extension_hint` is the original file extension (without dot), used only
/// to label unknown buffers.
pub fn identify(data: &[u8], extension_hint: Option<&str>) -> SignatureInfo {
    let head = &data[..data.len().min(4)];
    let magic_hex = hex::encode(head);

    for (prefix, kind) in MAGIC_TABLE {
        if magic_hex.starts_with(prefix) {
            return SignatureInfo {
                kind: *kind,
                name: kind.name().to_string(),
                class: kind.class(),
                magic_hex,
            };
        }
    }

    let name = match extension_hint {
        Some(ext) if !ext.is_empty() => format!("{} File", ext),
        _ => "Unknown".to_string(),
    };
    SignatureInfo {
        kind: FileKind::Unknown,
        name,
        class: SignatureClass::Unknown,
        magic_hex,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zip_magic_identified_regardless_of_extension() {
        let data = [0x50, 0x4B, 0x03, 0x04, 0xAA, 0xBB];
        let sig = identify(&data, Some("dylib"));
        assert_eq!(sig.kind, FileKind::Zip);
        assert_eq!(sig.class, SignatureClass::Archive);
        assert_eq!(sig.name, "ZIP/APK/JAR");
        assert_eq!(sig.magic_hex, "504b0304");
    }

    #[test]
    fn elf_and_macho_magics() {
        let elf = identify(&[0x7F, b'E', b'L', b'F'], None);
        assert_eq!(elf.kind, FileKind::Elf);
        assert_eq!(elf.class, SignatureClass::Executable);

        let macho64 = identify(&[0xFE, 0xED, 0xFA, 0xCF], None);
        assert_eq!(macho64.kind, FileKind::MachO64);
        assert!(macho64.kind.is_macho());

        // Byte-swapped magics map to distinct kinds
        let swapped64 = identify(&[0xCF, 0xFA, 0xED, 0xFE], None);
        let swapped32 = identify(&[0xCE, 0xFA, 0xED, 0xFE], None);
        assert_eq!(swapped64.kind, FileKind::MachO64Swapped);
        assert_eq!(swapped32.kind, FileKind::MachO32Swapped);
        assert_ne!(swapped64.name, swapped32.name);
    }

    #[test]
    fn short_prefix_matches() {
        // gzip magic is three bytes; fourth byte is arbitrary
        let sig = identify(&[0x1F, 0x8B, 0x08, 0x00], None);
        assert_eq!(sig.kind, FileKind::Gzip);
        // MP3 frame sync is two bytes
        let sig = identify(&[0xFF, 0xFB, 0x90, 0x00], None);
        assert_eq!(sig.kind, FileKind::Mp3);
    }

    #[test]
    fn unknown_falls_back_to_extension_hint() {
        let sig = identify(&[0x00, 0x01, 0x02, 0x03], Some("so"));
        assert_eq!(sig.kind, FileKind::Unknown);
        assert_eq!(sig.name, "so File");
        assert_eq!(sig.class, SignatureClass::Unknown);

        let sig = identify(&[0x00, 0x01, 0x02, 0x03], None);
        assert_eq!(sig.name, "Unknown");
    }

    #[test]
    fn plain_b_byte_is_not_bzip2() {
        let sig = identify(b"Ball", None);
        assert_eq!(sig.kind, FileKind::Unknown);
        let sig = identify(b"BZh9", None);
        assert_eq!(sig.kind, FileKind::Bzip2);
    }
}
