pub mod cpu;
pub mod insn;

pub use cpu::{Bus, Cpu, Flag, Registers, Status, StepError};
pub use insn::{Immediate, Instruction};
