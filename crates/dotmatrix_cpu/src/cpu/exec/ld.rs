use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// LD r, r' across the 0x40–0x7F matrix.
    ///
    /// Destination in bits 5-3, source in bits 2-0; identifier 6 on either
    /// side is the (HL) memory operand.
    pub(super) fn exec_ld_r_r<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let dst = (opcode >> 3) & 0x07;
        let src = opcode & 0x07;
        let value = self.read_reg8(bus, src);
        self.write_reg8(bus, dst, value);
    }

    /// LD r, n (and LD (HL), n via identifier 6).
    pub(super) fn exec_ld_r_d8<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let dst = (opcode >> 3) & 0x07;
        let value = self.fetch8(bus);
        self.write_reg8(bus, dst, value);
    }

    /// A transfers through the BC/DE pointers.
    pub(super) fn exec_ld_indirect<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        match opcode {
            0x02 => {
                let addr = self.regs.bc();
                self.store8_cycled(bus, addr, self.regs.a);
            }
            0x12 => {
                let addr = self.regs.de();
                self.store8_cycled(bus, addr, self.regs.a);
            }
            0x0A => {
                let addr = self.regs.bc();
                self.regs.a = self.load8_cycled(bus, addr);
            }
            0x1A => {
                let addr = self.regs.de();
                self.regs.a = self.load8_cycled(bus, addr);
            }
            _ => unreachable!(),
        }
    }

    /// A transfers through HL with post-increment/decrement of HL.
    pub(super) fn exec_ld_hl_inc_dec<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let addr = self.regs.hl();
        match opcode {
            0x22 => {
                self.store8_cycled(bus, addr, self.regs.a);
                self.regs.set_hl(addr.wrapping_add(1));
            }
            0x32 => {
                self.store8_cycled(bus, addr, self.regs.a);
                self.regs.set_hl(addr.wrapping_sub(1));
            }
            0x2A => {
                self.regs.a = self.load8_cycled(bus, addr);
                self.regs.set_hl(addr.wrapping_add(1));
            }
            0x3A => {
                self.regs.a = self.load8_cycled(bus, addr);
                self.regs.set_hl(addr.wrapping_sub(1));
            }
            _ => unreachable!(),
        }
    }

    /// LD (nn), A / LD A, (nn) with a 16-bit immediate address.
    pub(super) fn exec_ld_a16<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let addr = self.fetch16(bus);
        if opcode == 0xEA {
            self.store8_cycled(bus, addr, self.regs.a);
        } else {
            self.regs.a = self.load8_cycled(bus, addr);
        }
    }

    /// LDH: A transfers in the 0xFF00 high page, indexed by an immediate
    /// byte (0xE0/0xF0) or by C (0xE2/0xF2).
    pub(super) fn exec_ldh<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let offset = if opcode & 0x0F == 0x00 {
            self.fetch8(bus) as u16
        } else {
            self.regs.c as u16
        };
        let addr = 0xFF00u16.wrapping_add(offset);

        if opcode & 0xF0 == 0xE0 {
            self.store8_cycled(bus, addr, self.regs.a);
        } else {
            self.regs.a = self.load8_cycled(bus, addr);
        }
    }

    /// LD rr, nn over BC/DE/HL/SP.
    pub(super) fn exec_ld_rr_d16<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let id = (opcode >> 4) & 0x03;
        let value = self.fetch16(bus);
        self.regs.write_pair(id, value, false);
    }

    /// LD (nn), SP.
    pub(super) fn exec_ld_a16_sp<B: Bus>(&mut self, bus: &mut B) {
        let addr = self.fetch16(bus);
        let sp = self.regs.sp;
        self.store16_cycled(bus, addr, sp);
    }

    pub(super) fn exec_ld_sp_hl(&mut self) {
        self.regs.sp = self.regs.hl();
    }

    /// LD HL, SP+e8: flags follow the unsigned low-byte rule of
    /// `alu_add16_signed`.
    pub(super) fn exec_ld_hl_sp_e8<B: Bus>(&mut self, bus: &mut B) {
        let imm = self.fetch8(bus);
        let base = self.regs.sp;
        let result = self.alu_add16_signed(base, imm);
        self.regs.set_hl(result);
    }
}
