mod alu;
mod control;
mod incdec;
mod ld;
mod stack;
mod system;

use super::{Bus, Cpu, StepError};

impl Cpu {
    /// Classify and execute a single fetched opcode.
    ///
    /// The base opcode space is organised in ranges, not as a flat 256-entry
    /// table: each test below is a mask-and-compare against fixed bit fields,
    /// and the handlers re-derive register/condition identifiers from those
    /// same fields. The tests are mutually exclusive; a byte that matches
    /// none of them is one of the eleven opcode holes and fails the step.
    pub(super) fn exec_opcode<B: Bus>(&mut self, bus: &mut B, opcode: u8) -> Result<(), StepError> {
        // 8-bit loads
        if opcode & 0xC0 == 0x40 && opcode != 0x76 {
            // LD r, r' (0x76 in the middle of the matrix is HALT)
            self.exec_ld_r_r(bus, opcode);
        } else if opcode & 0xC7 == 0x06 {
            // LD r, n / LD (HL), n
            self.exec_ld_r_d8(bus, opcode);
        } else if matches!(opcode, 0x02 | 0x12 | 0x0A | 0x1A) {
            // LD (BC/DE), A / LD A, (BC/DE)
            self.exec_ld_indirect(bus, opcode);
        } else if matches!(opcode, 0x22 | 0x32 | 0x2A | 0x3A) {
            // LD (HL±), A / LD A, (HL±)
            self.exec_ld_hl_inc_dec(bus, opcode);
        } else if matches!(opcode, 0xEA | 0xFA) {
            // LD (nn), A / LD A, (nn)
            self.exec_ld_a16(bus, opcode);
        } else if matches!(opcode, 0xE0 | 0xF0 | 0xE2 | 0xF2) {
            // LDH over 0xFF00 + n or 0xFF00 + C
            self.exec_ldh(bus, opcode);
        }
        // 8-bit ALU
        else if opcode & 0xC0 == 0x80 {
            // ADD/ADC/SUB/SBC/AND/XOR/OR/CP A, r
            self.exec_alu_r(bus, opcode);
        } else if opcode & 0xC7 == 0xC6 {
            // ADD/ADC/SUB/SBC/AND/XOR/OR/CP A, n
            self.exec_alu_d8(bus, opcode);
        } else if opcode & 0xC7 == 0x04 {
            // INC r
            self.exec_inc8(bus, opcode);
        } else if opcode & 0xC7 == 0x05 {
            // DEC r
            self.exec_dec8(bus, opcode);
        } else if opcode == 0x27 {
            self.alu_daa();
        } else if opcode == 0x2F {
            self.exec_cpl();
        } else if opcode == 0x37 {
            self.exec_scf();
        } else if opcode == 0x3F {
            self.exec_ccf();
        }
        // 16-bit loads
        else if opcode & 0xCF == 0x01 {
            // LD rr, nn
            self.exec_ld_rr_d16(bus, opcode);
        } else if opcode == 0x08 {
            self.exec_ld_a16_sp(bus);
        } else if opcode == 0xF9 {
            self.exec_ld_sp_hl();
        } else if opcode == 0xF8 {
            self.exec_ld_hl_sp_e8(bus);
        } else if opcode & 0xCF == 0xC5 {
            self.exec_push_rr(bus, opcode);
        } else if opcode & 0xCF == 0xC1 {
            self.exec_pop_rr(bus, opcode);
        }
        // 16-bit ALU
        else if opcode & 0xCF == 0x09 {
            self.exec_add_hl_rr(opcode);
        } else if opcode == 0xE8 {
            self.exec_add_sp_e8(bus);
        } else if opcode & 0xCF == 0x03 {
            self.exec_inc16(opcode);
        } else if opcode & 0xCF == 0x0B {
            self.exec_dec16(opcode);
        }
        // Control flow
        else if opcode == 0xC3 {
            self.exec_jp_a16(bus);
        } else if opcode & 0xE7 == 0xC2 {
            self.exec_jp_cc(bus, opcode);
        } else if opcode == 0xE9 {
            self.exec_jp_hl();
        } else if opcode == 0x18 {
            self.exec_jr(bus);
        } else if opcode & 0xE7 == 0x20 {
            self.exec_jr_cc(bus, opcode);
        } else if opcode == 0xCD {
            self.exec_call_a16(bus);
        } else if opcode & 0xE7 == 0xC4 {
            self.exec_call_cc(bus, opcode);
        } else if opcode == 0xC9 {
            self.exec_ret(bus);
        } else if opcode & 0xE7 == 0xC0 {
            self.exec_ret_cc(bus, opcode);
        } else if opcode == 0xD9 {
            self.exec_reti(bus);
        } else if opcode & 0xC7 == 0xC7 {
            self.exec_rst(bus, opcode);
        }
        // Rotates, shifts and the CB-prefixed extended block
        else if matches!(opcode, 0x07 | 0x0F | 0x17 | 0x1F) {
            self.exec_rotate_a(opcode);
        } else if opcode == 0xCB {
            self.exec_cb(bus);
        }
        // Misc & system
        else if opcode == 0x00 {
            // NOP
        } else if opcode == 0x76 {
            self.exec_halt();
        } else if opcode == 0xF3 {
            self.exec_di();
        } else if opcode == 0xFB {
            self.exec_ei();
        } else if opcode == 0x10 {
            self.exec_stop(bus)?;
        }
        // Opcode holes: 0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED,
        // 0xF4, 0xFC, 0xFD.
        else {
            let addr = self.regs.pc.wrapping_sub(1);
            log::error!(
                "illegal opcode 0x{:02X} at PC=0x{:04X} (SP=0x{:04X} AF=0x{:04X} BC=0x{:04X} DE=0x{:04X} HL=0x{:04X})",
                opcode,
                addr,
                self.regs.sp,
                self.regs.af(),
                self.regs.bc(),
                self.regs.de(),
                self.regs.hl(),
            );
            return Err(StepError::IllegalInstruction {
                opcode,
                cb: false,
                addr,
            });
        }

        Ok(())
    }
}
