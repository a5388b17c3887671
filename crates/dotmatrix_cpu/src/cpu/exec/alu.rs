use crate::cpu::{Bus, Cpu, Flag};

impl Cpu {
    /// 8-bit ALU over a register operand: operation in bits 5-3, source in
    /// bits 2-0.
    pub(super) fn exec_alu_r<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        debug_assert!((0x80..=0xBF).contains(&opcode));
        let operation = (opcode >> 3) & 0x07;
        let src = opcode & 0x07;
        let value = self.read_reg8(bus, src);
        self.alu_dispatch(operation, value);
    }

    /// 8-bit ALU over an immediate operand. The operation field lines up
    /// with the register forms (0xC6 + op*8).
    pub(super) fn exec_alu_d8<B: Bus>(&mut self, bus: &mut B, opcode: u8) {
        let value = self.fetch8(bus);
        let operation = (opcode >> 3) & 0x07;
        self.alu_dispatch(operation, value);
    }

    fn alu_dispatch(&mut self, operation: u8, value: u8) {
        match operation {
            0 => self.alu_add(value, false),
            1 => self.alu_add(value, true),
            2 => self.alu_sub(value, false),
            3 => self.alu_sub(value, true),
            4 => self.alu_and(value),
            5 => self.alu_xor(value),
            6 => self.alu_or(value),
            _ => self.alu_cp(value),
        }
    }

    /// ADD HL, rr over BC/DE/HL/SP.
    pub(super) fn exec_add_hl_rr(&mut self, opcode: u8) {
        let id = (opcode >> 4) & 0x03;
        let value = self.regs.read_pair(id, false);
        self.alu_add16_hl(value);
    }

    /// ADD SP, e8.
    pub(super) fn exec_add_sp_e8<B: Bus>(&mut self, bus: &mut B) {
        let imm = self.fetch8(bus);
        let result = self.alu_add16_signed(self.regs.sp, imm);
        self.regs.sp = result;
    }

    /// Accumulator-only rotates. These share the CB rotate helpers but
    /// always force Z to zero, unlike their CB-prefixed counterparts.
    pub(super) fn exec_rotate_a(&mut self, opcode: u8) {
        debug_assert!(matches!(opcode, 0x07 | 0x0F | 0x17 | 0x1F));
        let a = self.regs.a;
        self.regs.a = match opcode {
            0x07 => self.rotate_left(a, false),
            0x17 => self.rotate_left(a, true),
            0x0F => self.rotate_right(a, false),
            _ => self.rotate_right(a, true),
        };
        self.set_flag(Flag::Z, false);
    }

    pub(super) fn exec_cpl(&mut self) {
        self.regs.a = !self.regs.a;
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, true);
    }

    pub(super) fn exec_scf(&mut self) {
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, true);
    }

    pub(super) fn exec_ccf(&mut self) {
        let carry = self.get_flag(Flag::C);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::C, !carry);
    }
}
