use super::{Bus, Cpu, Status, StepError};

impl Cpu {
    /// Execute a single instruction and return the T-cycles it consumed.
    ///
    /// A halted or stopped CPU makes no progress: the step is a no-op that
    /// returns zero cycles, and it is up to the embedding system (interrupt
    /// controller, joypad) to move the status back to Running.
    ///
    /// Decode happens fully before any register or memory mutation, so on
    /// `StepError` the engine is rolled back to its pre-step state and the
    /// failed step has no observable effect.
    pub fn step<B: Bus>(&mut self, bus: &mut B) -> Result<u64, StepError> {
        if self.status != Status::Running {
            return Ok(0);
        }

        let pc = self.regs.pc;
        let cycles = self.cycles;

        let opcode = self.fetch8(bus);
        match self.exec_opcode(bus, opcode) {
            Ok(()) => Ok(self.cycles - cycles),
            Err(err) => {
                // Only the opcode/padding fetches ran; undo them so the
                // caller observes the pre-step state.
                self.regs.pc = pc;
                self.cycles = cycles;
                Err(err)
            }
        }
    }
}
