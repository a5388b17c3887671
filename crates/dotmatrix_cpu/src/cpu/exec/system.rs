use crate::cpu::{Bus, Cpu, Status, StepError};

impl Cpu {
    /// HALT suspends fetch/decode until an external wake moves the status
    /// back to Running.
    pub(super) fn exec_halt(&mut self) {
        self.status = Status::Halted;
    }

    pub(super) fn exec_di(&mut self) {
        self.interrupts = false;
    }

    /// EI takes effect immediately. Real hardware delays the enable by one
    /// instruction; see `interrupts_enabled` for the caveat.
    pub(super) fn exec_ei(&mut self) {
        self.interrupts = true;
    }

    /// STOP is a two-byte instruction: 0x10 followed by 0x00. Any other
    /// second byte is an illegal encoding and fails the step.
    pub(super) fn exec_stop<B: Bus>(&mut self, bus: &mut B) -> Result<(), StepError> {
        let addr = self.regs.pc;
        let padding = self.fetch8(bus);
        if padding != 0x00 {
            log::error!(
                "illegal STOP padding byte 0x{:02X} at 0x{:04X}",
                padding,
                addr
            );
            return Err(StepError::IllegalInstruction {
                opcode: padding,
                cb: false,
                addr,
            });
        }

        self.status = Status::Stopped;
        Ok(())
    }
}
