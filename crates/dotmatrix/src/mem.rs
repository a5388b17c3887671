//! Range-based memory map: the bus-side collaborator of the CPU core.
//!
//! The CPU forwards addresses untouched; this module owns the policy for
//! what lives where. Unmapped addresses follow the open-bus convention:
//! reads return 0xFF and writes are dropped.

use bitflags::bitflags;
use dotmatrix_cpu::Bus;

bitflags! {
    /// Access permissions for a memory segment.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Permissions: u8 {
        const READ = 1;
        const WRITE = 2;
    }
}

/// Value observed when reading an address no segment claims.
pub const OPEN_BUS: u8 = 0xFF;

/// A named address range with backing storage.
pub struct MemorySegment {
    name: String,
    begin: u16,
    end: u16,
    perms: Permissions,
    bytes: Vec<u8>,
}

impl MemorySegment {
    /// `begin..=end` is inclusive on both sides.
    pub fn new(name: &str, begin: u16, end: u16, perms: Permissions) -> Self {
        Self {
            name: name.to_string(),
            begin,
            end,
            perms,
            bytes: vec![0; (end as usize - begin as usize) + 1],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn contains(&self, addr: u16) -> bool {
        (self.begin..=self.end).contains(&addr)
    }

    fn read8(&self, addr: u16) -> u8 {
        if !self.perms.contains(Permissions::READ) {
            return OPEN_BUS;
        }
        self.bytes[(addr - self.begin) as usize]
    }

    fn write8(&mut self, addr: u16, value: u8) {
        if !self.perms.contains(Permissions::WRITE) {
            log::trace!(
                "dropped write to read-only segment {} at 0x{:04X}",
                self.name,
                addr
            );
            return;
        }
        self.bytes[(addr - self.begin) as usize] = value;
    }
}

/// Ordered segment router; the first segment containing an address wins.
pub struct MemoryMap {
    segments: Vec<MemorySegment>,
}

impl MemoryMap {
    /// A map with a single read-write RAM segment spanning the full 16-bit
    /// address space, enough to run flat program images.
    pub fn new() -> Self {
        let mut map = Self::empty();
        map.add_segment(MemorySegment::new(
            "RAM",
            0x0000,
            0xFFFF,
            Permissions::READ | Permissions::WRITE,
        ));
        map
    }

    pub fn empty() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub fn add_segment(&mut self, segment: MemorySegment) {
        self.segments.push(segment);
    }

    fn segment_at(&mut self, addr: u16) -> Option<&mut MemorySegment> {
        self.segments.iter_mut().find(|s| s.contains(addr))
    }

    /// Bulk-copy `bytes` into the map starting at `base`, e.g. to place a
    /// ROM image. Bypasses segment permissions (this is the loader, not the
    /// CPU); bytes that land beyond 0xFFFF or on no segment are dropped.
    pub fn load(&mut self, base: u16, bytes: &[u8]) {
        for (i, &value) in bytes.iter().enumerate() {
            let addr = base as usize + i;
            if addr > 0xFFFF {
                break;
            }
            let addr = addr as u16;
            if let Some(segment) = self.segment_at(addr) {
                let offset = (addr - segment.begin) as usize;
                segment.bytes[offset] = value;
            }
        }
    }
}

impl Default for MemoryMap {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for MemoryMap {
    fn read8(&mut self, addr: u16) -> u8 {
        match self.segment_at(addr) {
            Some(segment) => segment.read8(addr),
            None => {
                log::trace!("open-bus read at 0x{:04X}", addr);
                OPEN_BUS
            }
        }
    }

    fn write8(&mut self, addr: u16, value: u8) {
        match self.segment_at(addr) {
            Some(segment) => segment.write8(addr, value),
            None => log::trace!("dropped write to unmapped 0x{:04X}", addr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_map_round_trips_bytes() {
        let mut map = MemoryMap::new();
        map.write8(0xC000, 0xAB);
        assert_eq!(map.read8(0xC000), 0xAB);
    }

    #[test]
    fn halfword_access_is_little_endian() {
        let mut map = MemoryMap::new();
        map.write16(0xC000, 0x1234);
        assert_eq!(map.read8(0xC000), 0x34);
        assert_eq!(map.read8(0xC001), 0x12);
        assert_eq!(map.read16(0xC000), 0x1234);
    }

    #[test]
    fn unmapped_addresses_read_open_bus_and_drop_writes() {
        let mut map = MemoryMap::empty();
        map.add_segment(MemorySegment::new(
            "WRAM",
            0xC000,
            0xDFFF,
            Permissions::READ | Permissions::WRITE,
        ));

        map.write8(0x0000, 0x55);
        assert_eq!(map.read8(0x0000), OPEN_BUS);

        map.write8(0xC000, 0x55);
        assert_eq!(map.read8(0xC000), 0x55);
    }

    #[test]
    fn read_only_segments_swallow_writes() {
        let mut map = MemoryMap::empty();
        map.add_segment(MemorySegment::new("ROM", 0x0000, 0x3FFF, Permissions::READ));

        map.load(0x0000, &[0x11, 0x22]);
        map.write8(0x0000, 0x99);

        assert_eq!(map.read8(0x0000), 0x11);
        assert_eq!(map.read8(0x0001), 0x22);
    }

    #[test]
    fn routing_picks_the_containing_segment() {
        let mut map = MemoryMap::empty();
        map.add_segment(MemorySegment::new("LO", 0x0000, 0x7FFF, Permissions::READ));
        map.add_segment(MemorySegment::new(
            "HI",
            0x8000,
            0xFFFF,
            Permissions::READ | Permissions::WRITE,
        ));

        map.write8(0x8000, 0x42);
        assert_eq!(map.read8(0x8000), 0x42);
        assert_eq!(map.read8(0x7FFF), 0x00);
    }
}
