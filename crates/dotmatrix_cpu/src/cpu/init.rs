use super::{Cpu, Registers, Status};

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu {
    pub fn new() -> Self {
        let mut cpu = Self {
            regs: Registers::default(),
            status: Status::Running,
            interrupts: false,
            cycles: 0,
        };
        cpu.reset();
        cpu
    }

    /// Reset the CPU to the state it has when a cartridge gains control.
    ///
    /// pc=0x0100 / sp=0xFFFE follow the DMG hand-off convention. Flags, the
    /// cycle counter and the interrupt switch start cleared; the general
    /// registers are left alone so test harnesses can pre-load them.
    pub fn reset(&mut self) {
        self.regs.pc = 0x0100;
        self.regs.sp = 0xFFFE;
        self.regs.f = 0;

        self.status = Status::Running;
        self.interrupts = false;
        self.cycles = 0;
    }
}
