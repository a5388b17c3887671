use super::{Cpu, Flag};

impl Cpu {
    /// Core 8-bit ADD/ADC operation on A.
    ///
    /// `use_carry` selects between ADD (false) and ADC (true). The half
    /// carry is the carry out of bit 3 of the low-nibble sum, carry-in
    /// included.
    pub(super) fn alu_add(&mut self, value: u8, use_carry: bool) {
        let a = self.regs.a;
        let carry_in = if use_carry && self.get_flag(Flag::C) {
            1u8
        } else {
            0
        };

        let half = (a & 0x0F) + (value & 0x0F) + carry_in;
        let full = (a as u16) + (value as u16) + (carry_in as u16);
        let result = full as u8;

        self.regs.a = result;

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, (half & 0x10) != 0);
        self.set_flag(Flag::C, full > 0xFF);
    }

    /// Core 8-bit SUB/SBC operation on A.
    ///
    /// `use_carry` selects between SUB (false) and SBC (true). H is the
    /// borrow into bit 4, C the overall borrow.
    pub(super) fn alu_sub(&mut self, value: u8, use_carry: bool) {
        let a = self.regs.a;
        let carry_in = if use_carry && self.get_flag(Flag::C) {
            1i16
        } else {
            0
        };

        let half = (a & 0x0F) as i16 - (value & 0x0F) as i16 - carry_in;
        let full = a as i16 - value as i16 - carry_in;
        let result = full as u8;

        self.regs.a = result;

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, half < 0);
        self.set_flag(Flag::C, full < 0);
    }

    #[inline]
    pub(super) fn alu_and(&mut self, value: u8) {
        let result = self.regs.a & value;
        self.regs.a = result;

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::H, true);
        // N and C are already cleared.
    }

    #[inline]
    pub(super) fn alu_or(&mut self, value: u8) {
        let result = self.regs.a | value;
        self.regs.a = result;

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
    }

    #[inline]
    pub(super) fn alu_xor(&mut self, value: u8) {
        let result = self.regs.a ^ value;
        self.regs.a = result;

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
    }

    /// Compare A with `value`, setting flags as if `A - value` was performed.
    /// A itself is not modified.
    #[inline]
    pub(super) fn alu_cp(&mut self, value: u8) {
        let a = self.regs.a;
        let half = (a & 0x0F) as i16 - (value & 0x0F) as i16;
        let full = a as i16 - value as i16;
        let result = full as u8;

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, half < 0);
        self.set_flag(Flag::C, full < 0);
    }

    /// Decimal adjust accumulator after BCD addition or subtraction.
    ///
    /// After an addition (N=0) the corrections come from the nibble
    /// magnitudes and the H/C flags, and C is rewritten by the high
    /// correction. After a subtraction (N=1) the corrections are driven by
    /// H/C alone and C is preserved: A has already wrapped, so a nibble
    /// magnitude test would be meaningless there. H is always cleared.
    pub(super) fn alu_daa(&mut self) {
        let mut a = self.regs.a as u16;

        if self.get_flag(Flag::N) {
            if self.get_flag(Flag::H) {
                a = (a + 0xFA) & 0xFF;
            }
            if self.get_flag(Flag::C) {
                a = (a + 0xA0) & 0xFF;
            }
        } else {
            if (a & 0x0F) > 0x09 || self.get_flag(Flag::H) {
                a += 0x06;
            }
            if (a & 0x1F0) > 0x90 || self.get_flag(Flag::C) {
                a += 0x60;
                self.set_flag(Flag::C, true);
            } else {
                self.set_flag(Flag::C, false);
            }
        }

        let a = (a & 0xFF) as u8;
        self.set_flag(Flag::H, false);
        self.set_flag(Flag::Z, a == 0);
        self.regs.a = a;
    }

    /// 8-bit increment helper used by INC r and INC (HL).
    ///
    /// Updates Z, N, H while leaving C unchanged.
    #[inline]
    pub(super) fn alu_inc8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_add(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, (value & 0x0F) + 1 > 0x0F);
        result
    }

    /// 8-bit decrement helper used by DEC r and DEC (HL).
    ///
    /// Updates Z, N, H while leaving C unchanged.
    #[inline]
    pub(super) fn alu_dec8(&mut self, value: u8) -> u8 {
        let result = value.wrapping_sub(1);
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::N, true);
        self.set_flag(Flag::H, (value & 0x0F) == 0);
        result
    }

    /// 16-bit add helper for `ADD HL,rr`.
    ///
    /// Z is unaffected; N is cleared; H is the carry out of bit 11 and C the
    /// carry out of bit 15.
    #[inline]
    pub(super) fn alu_add16_hl(&mut self, value: u16) {
        let hl = self.regs.hl();
        let result = hl.wrapping_add(value);

        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, (hl & 0x0FFF) + (value & 0x0FFF) > 0x0FFF);
        self.set_flag(Flag::C, (hl as u32) + (value as u32) > 0xFFFF);

        self.regs.set_hl(result);
    }

    /// 16-bit add helper for ADD SP,e8 and LD HL,SP+e8.
    ///
    /// The result uses the sign-extended immediate, but H and C come from
    /// adding the unsigned byte to the unsigned low byte of the base and
    /// inspecting bits 4 and 8 of that sum. Z and N are cleared
    /// unconditionally.
    #[inline]
    pub(super) fn alu_add16_signed(&mut self, base: u16, imm8: u8) -> u16 {
        let offset = imm8 as i8 as i16 as u16;
        self.set_flag(Flag::Z, false);
        self.set_flag(Flag::N, false);
        self.set_flag(Flag::H, (base & 0x000F) + (offset & 0x000F) > 0x000F);
        self.set_flag(Flag::C, (base & 0x00FF) + (offset & 0x00FF) > 0x00FF);
        base.wrapping_add(offset)
    }

    /// Rotate left helper shared by RLCA/RLA and the CB-prefixed RLC/RL.
    ///
    /// Z is computed from the result; the accumulator-only opcodes overwrite
    /// it with zero afterwards.
    pub(super) fn rotate_left(&mut self, value: u8, through_carry: bool) -> u8 {
        let carry_in = if through_carry {
            self.get_flag(Flag::C) as u8
        } else {
            value >> 7
        };
        let result = (value << 1) | carry_in;

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::C, (value & 0x80) != 0);
        result
    }

    /// Rotate right helper shared by RRCA/RRA and the CB-prefixed RRC/RR.
    pub(super) fn rotate_right(&mut self, value: u8, through_carry: bool) -> u8 {
        let carry_in = if through_carry {
            (self.get_flag(Flag::C) as u8) << 7
        } else {
            (value & 0x01) << 7
        };
        let result = (value >> 1) | carry_in;

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::C, (value & 0x01) != 0);
        result
    }

    /// SLA: shift left, bit 7 to carry, bit 0 cleared.
    pub(super) fn shift_left(&mut self, value: u8) -> u8 {
        let result = value << 1;

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::C, (value & 0x80) != 0);
        result
    }

    /// SRA keeps the sign bit on the way down; SRL clears it.
    pub(super) fn shift_right(&mut self, value: u8, keep_sign: bool) -> u8 {
        let top = if keep_sign { value & 0x80 } else { 0 };
        let result = (value >> 1) | top;

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        self.set_flag(Flag::C, (value & 0x01) != 0);
        result
    }

    /// SWAP exchanges the nibbles and clears N, H and C.
    pub(super) fn swap(&mut self, value: u8) -> u8 {
        let result = (value << 4) | (value >> 4);

        self.clear_flags();
        self.set_flag(Flag::Z, result == 0);
        result
    }
}
