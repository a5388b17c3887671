pub mod cart;
pub mod mem;

use anyhow::{bail, Result};
use typed_builder::TypedBuilder;

use dotmatrix_cpu::{Cpu, Status};

use crate::cart::CartridgeHeader;
use crate::mem::MemoryMap;

/// Options for a trace run.
#[derive(TypedBuilder)]
pub struct RunConfig {
    /// Print a disassembly and register dump before every step.
    #[builder(default = false)]
    pub trace: bool,
    /// Stop after this many instructions even if the CPU is still running.
    #[builder(default = 1_000_000)]
    pub max_steps: u64,
}

/// Load a ROM image into a fresh memory map and drive the CPU until it
/// leaves the Running state, faults, or exhausts the step budget.
pub fn run(config: RunConfig, rom: &[u8]) -> Result<()> {
    let header = CartridgeHeader::parse(rom)?;
    log::info!(
        "loaded \"{}\": {} ({} ROM banks, {} RAM banks{}{})",
        header.title,
        header.mbc,
        header.rom_banks,
        header.ram_banks,
        if header.has_timer { ", timer" } else { "" },
        if header.cgb { ", CGB" } else { "" },
    );

    let mut bus = MemoryMap::new();
    bus.load(0x0000, rom);

    let mut cpu = Cpu::new();
    cpu.reset();

    let mut steps = 0u64;
    while cpu.status() == Status::Running {
        if steps >= config.max_steps {
            log::info!(
                "step budget of {} exhausted at PC=0x{:04X}",
                config.max_steps,
                cpu.pc()
            );
            break;
        }

        if config.trace {
            trace_state(&mut cpu, &mut bus);
        }

        match cpu.step(&mut bus) {
            Ok(_) => steps += 1,
            Err(err) => bail!("CPU fault after {} steps: {}", steps, err),
        }
    }

    log::info!(
        "done: {:?} after {} steps, {} cycles",
        cpu.status(),
        steps,
        cpu.cycles()
    );
    Ok(())
}

/// One trace record: address, raw bytes and mnemonic of the next
/// instruction, followed by the register dump and cycle count.
fn trace_state(cpu: &mut Cpu, bus: &mut MemoryMap) {
    let insn = cpu.decode_next(bus);
    let bytes = insn
        .bytecode()
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ");

    println!("{:04X}: {:<11} {}", cpu.pc(), bytes, insn);
    println!("{}", cpu.regs);
    println!("CYCLES: {}", cpu.cycles());
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotmatrix_cpu::Bus;

    fn rom_with_program(program: &[u8]) -> Vec<u8> {
        let mut rom = vec![0u8; 0x8000];
        rom[0x134..0x139].copy_from_slice(b"DRIVE");
        rom[0x147] = 0x00;
        rom[0x148] = 0x01;
        rom[0x149] = 0x00;
        rom[0x150..0x150 + program.len()].copy_from_slice(program);
        // Entry at 0x100 jumps over the header to the program.
        rom[0x100] = 0xC3;
        rom[0x101] = 0x50;
        rom[0x102] = 0x01;
        rom
    }

    #[test]
    fn run_executes_until_stop() {
        // LD A, 0x2A; LD (0xC000), A; STOP
        let rom = rom_with_program(&[0x3E, 0x2A, 0xEA, 0x00, 0xC0, 0x10, 0x00]);
        let config = RunConfig::builder().build();
        run(config, &rom).unwrap();
    }

    #[test]
    fn run_reports_cpu_faults() {
        // Jump straight into an opcode hole.
        let rom = rom_with_program(&[0xD3]);
        let config = RunConfig::builder().build();
        let err = run(config, &rom).unwrap_err();
        assert!(err.to_string().contains("CPU fault"));
    }

    #[test]
    fn run_respects_step_budget() {
        // JR -2: an infinite loop the budget has to break.
        let rom = rom_with_program(&[0x18, 0xFE]);
        let config = RunConfig::builder().max_steps(100).build();
        run(config, &rom).unwrap();
    }

    #[test]
    fn loaded_rom_is_visible_through_the_bus() {
        let rom = rom_with_program(&[0x00]);
        let mut bus = MemoryMap::new();
        bus.load(0x0000, &rom);
        assert_eq!(bus.read8(0x0100), 0xC3);
        assert_eq!(bus.read16(0x0101), 0x0150);
    }
}
