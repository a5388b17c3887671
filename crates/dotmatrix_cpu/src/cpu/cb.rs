use super::{Bus, Cpu, Flag};

impl Cpu {
    /// Execute a CB-prefixed instruction (rotates, shifts and bit ops).
    ///
    /// Bits 7-6 select the group and bits 2-0 the operand; the rotate/shift
    /// group is split further on bits 5-3. Unlike the base table the
    /// extended table is fully populated, so there is no illegal-instruction
    /// case here.
    pub(super) fn exec_cb<B: Bus>(&mut self, bus: &mut B) {
        let cb = self.fetch8(bus);
        let id = cb & 0x07;

        if cb & 0xC0 == 0x40 {
            // BIT b, r: the operand is read but never written back, and C is
            // left alone.
            let bit = (cb >> 3) & 0x07;
            let value = self.read_reg8(bus, id);
            self.set_flag(Flag::Z, value & (1 << bit) == 0);
            self.set_flag(Flag::N, false);
            self.set_flag(Flag::H, true);
        } else if cb & 0xC0 == 0x80 {
            // RES b, r: no flags.
            let bit = (cb >> 3) & 0x07;
            let value = self.read_reg8(bus, id) & !(1 << bit);
            self.write_reg8(bus, id, value);
        } else if cb & 0xC0 == 0xC0 {
            // SET b, r: no flags.
            let bit = (cb >> 3) & 0x07;
            let value = self.read_reg8(bus, id) | (1 << bit);
            self.write_reg8(bus, id, value);
        } else {
            // Rotates and shifts. These compute Z from the result; the
            // accumulator-only forms in the base table do not.
            let value = self.read_reg8(bus, id);
            let result = match (cb >> 3) & 0x07 {
                0 => self.rotate_left(value, false), // RLC
                1 => self.rotate_right(value, false), // RRC
                2 => self.rotate_left(value, true),  // RL
                3 => self.rotate_right(value, true), // RR
                4 => self.shift_left(value),         // SLA
                5 => self.shift_right(value, true),  // SRA
                6 => self.swap(value),               // SWAP
                _ => self.shift_right(value, false), // SRL
            };
            self.write_reg8(bus, id, result);
        }
    }
}
