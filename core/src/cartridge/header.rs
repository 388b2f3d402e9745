//! Cartridge header parsing (the fixed fields at $0100-$014F).

use crate::error::GbError;

/// The minimum ROM image size that contains a complete header.
const MIN_HEADER_LEN: usize = 0x150;

/// Which mapper family a cartridge type byte ($0147) selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MbcKind {
    Flat,
    Mbc1,
    Mbc2,
    Mbc5,
}

impl MbcKind {
    fn from_byte(b: u8) -> Result<Self, GbError> {
        match b {
            0x00 => Ok(MbcKind::Flat),
            0x01..=0x03 => Ok(MbcKind::Mbc1),
            0x05..=0x06 => Ok(MbcKind::Mbc2),
            0x19..=0x1E => Ok(MbcKind::Mbc5),
            other => Err(GbError::BadRom(format!(
                "unsupported cartridge type byte ${other:02X}"
            ))),
        }
    }
}

/// ROM size byte ($0148), mapped to a bank count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RomSize(pub(crate) u8);

impl RomSize {
    pub fn banks(self) -> usize {
        match self.0 {
            n @ 0..=8 => 2 * (1usize << n),
            0x52 => 72,
            0x53 => 80,
            0x54 => 96,
            _ => 2,
        }
    }

    pub fn bytes(self) -> usize {
        16 * 1024 * self.banks()
    }
}

/// RAM size byte ($0149), mapped to a bank count of 8 KiB banks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RamSize(pub(crate) u8);

impl RamSize {
    pub fn banks(self) -> usize {
        match self.0 {
            0x02 => 1,
            0x03 => 4,
            0x04 => 16,
            0x05 => 8,
            _ => 0,
        }
    }

    pub fn bytes(self) -> usize {
        self.banks() * 8 * 1024
    }
}

pub struct Header {
    pub title: String,
    pub mbc: MbcKind,
    pub rom_size: RomSize,
    pub ram_size: RamSize,
}

/// Parse the header out of a full ROM image. Returns [`GbError::BadRom`] if
/// the image is too short or names a mapper this core does not support.
pub fn parse(rom: &[u8]) -> Result<Header, GbError> {
    if rom.len() < MIN_HEADER_LEN {
        return Err(GbError::BadRom(format!(
            "ROM is only {} bytes, header requires at least {MIN_HEADER_LEN}",
            rom.len()
        )));
    }

    let title = rom[0x134..0x144]
        .iter()
        .copied()
        .take_while(|&b| b != 0)
        .filter(|&b| b.is_ascii_graphic() || b == b' ')
        .map(|b| b as char)
        .collect();

    let mbc = MbcKind::from_byte(rom[0x147])?;
    let rom_size = RomSize(rom[0x148]);
    let ram_size = RamSize(rom[0x149]);

    if rom_size.bytes() > rom.len() {
        return Err(GbError::BadRom(format!(
            "header declares {} bytes of ROM, image only has {}",
            rom_size.bytes(),
            rom.len()
        )));
    }

    Ok(Header {
        title,
        mbc,
        rom_size,
        ram_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_rom(mbc_byte: u8, rom_byte: u8, ram_byte: u8) -> Vec<u8> {
        let mut rom = vec![0u8; 0x8000];
        rom[0x134..0x144].copy_from_slice(b"TESTGAME\0\0\0\0\0\0\0\0");
        rom[0x147] = mbc_byte;
        rom[0x148] = rom_byte;
        rom[0x149] = ram_byte;
        rom
    }

    #[test]
    fn rejects_truncated_rom() {
        let rom = vec![0u8; 0x100];
        assert!(matches!(parse(&rom), Err(GbError::BadRom(_))));
    }

    #[test]
    fn rejects_unsupported_mbc() {
        let rom = blank_rom(0x11, 0x00, 0x00); // MBC3
        assert!(matches!(parse(&rom), Err(GbError::BadRom(_))));
    }

    #[test]
    fn parses_flat_rom_header() {
        let rom = blank_rom(0x00, 0x00, 0x00);
        let h = parse(&rom).unwrap();
        assert_eq!(h.title, "TESTGAME");
        assert_eq!(h.mbc, MbcKind::Flat);
        assert_eq!(h.rom_size.banks(), 2);
    }

    #[test]
    fn rom_size_banks_table() {
        assert_eq!(RomSize(0).banks(), 2);
        assert_eq!(RomSize(1).banks(), 4);
        assert_eq!(RomSize(5).banks(), 64);
    }

    #[test]
    fn ram_size_bytes_table() {
        assert_eq!(RamSize(0x02).bytes(), 8 * 1024);
        assert_eq!(RamSize(0x03).bytes(), 32 * 1024);
        assert_eq!(RamSize(0x00).bytes(), 0);
    }
}
