//! Cartridge ROM/RAM and its bank-switching mapper.
//!
//! A [`Cartridge`] owns the ROM image (and any battery/volatile RAM) and
//! exposes the two pure functions the rest of the core needs: `read` and
//! `write` over `0x0000..=0xBFFF`. Which mapper variant handles those calls
//! is picked once, at construction, from the cartridge type byte at $0147.

mod flat;
mod header;
mod mbc1;
mod mbc2;
mod mbc5;

pub use header::{Header, MbcKind, RamSize, RomSize};

use crate::error::GbError;
use flat::Flat;
use mbc1::Mbc1;
use mbc2::Mbc2;
use mbc5::Mbc5;

enum Mapper {
    Flat(Flat),
    Mbc1(Mbc1),
    Mbc2(Mbc2),
    Mbc5(Mbc5),
}

pub struct Cartridge {
    pub header: Header,
    mapper: Mapper,
}

impl Cartridge {
    /// Parse the header and construct the matching mapper over `rom`.
    pub fn new(rom: Vec<u8>) -> Result<Self, GbError> {
        let header = header::parse(&rom)?;
        let mapper = match header.mbc {
            MbcKind::Flat => Mapper::Flat(Flat::new(rom)),
            MbcKind::Mbc1 => Mapper::Mbc1(Mbc1::new(rom, header.rom_size, header.ram_size)),
            MbcKind::Mbc2 => Mapper::Mbc2(Mbc2::new(rom, header.rom_size)),
            MbcKind::Mbc5 => Mapper::Mbc5(Mbc5::new(rom, header.rom_size, header.ram_size)),
        };
        Ok(Self { header, mapper })
    }

    /// Read from cartridge space. `addr` must be in `0x0000..=0xBFFF`.
    pub fn read(&self, addr: u16) -> u8 {
        match &self.mapper {
            Mapper::Flat(m) => m.read(addr),
            Mapper::Mbc1(m) => m.read(addr),
            Mapper::Mbc2(m) => m.read(addr),
            Mapper::Mbc5(m) => m.read(addr),
        }
    }

    /// Write to cartridge space. `addr` must be in `0x0000..=0xBFFF`.
    pub fn write(&mut self, addr: u16, v: u8) {
        match &mut self.mapper {
            Mapper::Flat(m) => m.write(addr, v),
            Mapper::Mbc1(m) => m.write(addr, v),
            Mapper::Mbc2(m) => m.write(addr, v),
            Mapper::Mbc5(m) => m.write(addr, v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rom_with_header(mbc_byte: u8, rom_byte: u8, ram_byte: u8) -> Vec<u8> {
        let mut rom = vec![0u8; 0x8000];
        rom[0x134..0x144].copy_from_slice(b"TEST\0\0\0\0\0\0\0\0\0\0\0\0");
        rom[0x147] = mbc_byte;
        rom[0x148] = rom_byte;
        rom[0x149] = ram_byte;
        rom
    }

    #[test]
    fn picks_flat_mapper_for_rom_only() {
        let cart = Cartridge::new(rom_with_header(0x00, 0x00, 0x00)).unwrap();
        assert_eq!(cart.header.mbc, MbcKind::Flat);
        assert_eq!(cart.read(0xA000), 0xFF);
    }

    #[test]
    fn picks_mbc1_mapper() {
        let cart = Cartridge::new(rom_with_header(0x01, 0x00, 0x00)).unwrap();
        assert_eq!(cart.header.mbc, MbcKind::Mbc1);
    }

    #[test]
    fn rejects_bad_header() {
        assert!(Cartridge::new(vec![0u8; 16]).is_err());
    }
}
