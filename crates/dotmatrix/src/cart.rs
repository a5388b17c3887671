//! Cartridge header parsing.
//!
//! The header lives at 0x100–0x14F of a ROM image. Only the fields the
//! front end reports are extracted; bank switching itself belongs to a
//! mapper implementation, not here.

use std::fmt;

use anyhow::{bail, Result};

/// Memory bank controller families distinguishable from the header's
/// cartridge-type byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mbc {
    None,
    Mbc1,
    Mbc2,
    Mbc3,
    Mbc5,
    Mmm01,
}

impl fmt::Display for Mbc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mbc::None => "ROM",
            Mbc::Mbc1 => "MBC1",
            Mbc::Mbc2 => "MBC2",
            Mbc::Mbc3 => "MBC3",
            Mbc::Mbc5 => "MBC5",
            Mbc::Mmm01 => "MMM01",
        };
        f.write_str(name)
    }
}

/// Parsed cartridge header fields.
#[derive(Clone, Debug)]
pub struct CartridgeHeader {
    pub title: String,
    pub mbc: Mbc,
    pub has_ram: bool,
    pub has_timer: bool,
    pub rom_banks: u16,
    pub ram_banks: u8,
    pub cgb: bool,
    pub sgb: bool,
}

impl CartridgeHeader {
    /// Extract the header from a ROM image.
    ///
    /// Rejects images too small to contain a header and type/size codes the
    /// front end does not know about (battery-backed variants fold into
    /// their base mapper).
    pub fn parse(rom: &[u8]) -> Result<Self> {
        if rom.len() < 0x150 {
            bail!("cartridge image too small ({} bytes)", rom.len());
        }

        let title = rom[0x134..0x13F]
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| b as char)
            .collect::<String>();

        let (mbc, has_ram, has_timer) = match rom[0x147] {
            0x00 => (Mbc::None, false, false),
            0x01 => (Mbc::Mbc1, false, false),
            0x02 | 0x03 => (Mbc::Mbc1, true, false),
            0x05 | 0x06 => (Mbc::Mbc2, false, false),
            0x08 | 0x09 => (Mbc::None, true, false),
            0x0B => (Mbc::Mmm01, false, false),
            0x0C | 0x0D => (Mbc::Mmm01, true, false),
            0x0F => (Mbc::Mbc3, false, true),
            0x10 => (Mbc::Mbc3, true, true),
            0x11 => (Mbc::Mbc3, false, false),
            0x12 | 0x13 => (Mbc::Mbc3, true, false),
            0x19 => (Mbc::Mbc5, false, false),
            0x1A | 0x1B => (Mbc::Mbc5, true, false),
            other => bail!("unsupported cartridge type 0x{:02X}", other),
        };

        let ram_banks = match rom[0x149] {
            0x00 => 0,
            0x02 => 1,
            0x03 => 4,
            0x04 => 16,
            0x05 => 8,
            other => bail!("unrecognized RAM size code 0x{:02X}", other),
        };

        let rom_size = rom[0x148];
        if rom_size > 0x08 {
            bail!("unrecognized ROM size code 0x{:02X}", rom_size);
        }
        let rom_banks = 1u16 << (1 + rom_size);

        Ok(Self {
            title,
            mbc,
            has_ram,
            has_timer,
            rom_banks,
            ram_banks,
            cgb: rom[0x143] == 0x80 || rom[0x143] == 0xC0,
            sgb: rom[0x146] == 0x03,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rom_with_header(cart_type: u8, rom_size: u8, ram_size: u8) -> Vec<u8> {
        let mut rom = vec![0u8; 0x150];
        rom[0x134..0x138].copy_from_slice(b"TEST");
        rom[0x147] = cart_type;
        rom[0x148] = rom_size;
        rom[0x149] = ram_size;
        rom
    }

    #[test]
    fn parses_title_and_mbc1_with_ram() {
        let rom = rom_with_header(0x03, 0x01, 0x03);
        let header = CartridgeHeader::parse(&rom).unwrap();

        assert_eq!(header.title, "TEST");
        assert_eq!(header.mbc, Mbc::Mbc1);
        assert!(header.has_ram);
        assert!(!header.has_timer);
        assert_eq!(header.rom_banks, 8);
        assert_eq!(header.ram_banks, 4);
    }

    #[test]
    fn mbc3_timer_variants() {
        let header = CartridgeHeader::parse(&rom_with_header(0x0F, 0x00, 0x00)).unwrap();
        assert_eq!(header.mbc, Mbc::Mbc3);
        assert!(header.has_timer);
        assert!(!header.has_ram);

        let header = CartridgeHeader::parse(&rom_with_header(0x10, 0x00, 0x02)).unwrap();
        assert!(header.has_timer);
        assert!(header.has_ram);
        assert_eq!(header.ram_banks, 1);
    }

    #[test]
    fn minimum_rom_size_is_two_banks() {
        let header = CartridgeHeader::parse(&rom_with_header(0x00, 0x00, 0x00)).unwrap();
        assert_eq!(header.mbc, Mbc::None);
        assert_eq!(header.rom_banks, 2);
    }

    #[test]
    fn rejects_short_images() {
        assert!(CartridgeHeader::parse(&[0u8; 0x14F]).is_err());
    }

    #[test]
    fn rejects_unknown_type_and_size_codes() {
        assert!(CartridgeHeader::parse(&rom_with_header(0x42, 0x00, 0x00)).is_err());
        assert!(CartridgeHeader::parse(&rom_with_header(0x00, 0x09, 0x00)).is_err());
        assert!(CartridgeHeader::parse(&rom_with_header(0x00, 0x00, 0x01)).is_err());
    }
}
