use anyhow::{Context, Result};

use dotmatrix::RunConfig;

fn main() -> Result<()> {
    env_logger::init();

    let mut trace = false;
    let mut max_steps: u64 = 1_000_000;
    let mut rom_path = String::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--trace" => trace = true,
            "--steps" => {
                let value = args.next().unwrap_or_default();
                max_steps = value
                    .parse()
                    .with_context(|| format!("invalid --steps value '{}'", value))?;
            }
            _ => rom_path = arg,
        }
    }

    if rom_path.is_empty() {
        eprintln!("Usage: dotmatrix [--trace] [--steps N] <rom.gb>");
        std::process::exit(1);
    }

    log::info!("loading ROM '{}'", rom_path);
    let rom = std::fs::read(&rom_path).with_context(|| format!("failed to read '{}'", rom_path))?;

    let config = RunConfig::builder().trace(trace).max_steps(max_steps).build();
    dotmatrix::run(config, &rom)
}
