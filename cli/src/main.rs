//! ksh - run the konstruct shell on a host
//!
//! Boots the storage layer the way the kernel does (seed the in-memory tree,
//! mount the boot medium) with an ISO image file standing in for the boot
//! device, then reads commands from `-c` or from stdin.

mod shell;

use anyhow::{Context, Result};
use clap::Parser;
use konstruct_core::bootdev::{BootDevice, BootParams, MemoryDisk, SectorDevice};
use konstruct_core::seed::seed_example_tree;
use konstruct_core::Filesystem;
use shell::{Outcome, Shell};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Command-line flags of the host shell
#[derive(Debug, Parser)]
#[command(name = "ksh", version, about = "konstruct storage shell")]
struct Args {
    /// Disk image mounted as the boot device
    #[arg(long)]
    image: Option<PathBuf>,

    /// BIOS drive number of the boot device (decimal or 0x-prefixed hex)
    #[arg(long, default_value = "0xE0", value_parser = parse_drive)]
    drive: u8,

    /// Start with an empty tree instead of the example files
    #[arg(long)]
    no_seed: bool,

    /// Run a command and exit; may be given more than once
    #[arg(short = 'c', value_name = "COMMAND")]
    commands: Vec<String>,
}

fn parse_drive(s: &str) -> std::result::Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid drive number '{}': {}", s, e))
}

fn boot(args: &Args) -> Result<Filesystem> {
    let mut fs = Filesystem::new();
    if !args.no_seed {
        seed_example_tree(&mut fs)
            .map_err(anyhow::Error::msg)
            .context("creating example files")?;
    }

    let Some(path) = &args.image else {
        log::info!("no boot image given, running on the in-memory tree only");
        return Ok(fs);
    };

    let image = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let params = BootParams {
        drive_number: args.drive,
        partition_start: 0,
        partition_length: 0,
    };
    let info = BootDevice::detect(&params);
    let device = SectorDevice::new(info, MemoryDisk::new(image, info.sector_size()).read_only());

    // The kernel keeps running without its boot filesystem, so does the shell
    if let Err(err) = fs.mount_boot_device(device) {
        log::warn!("failed to mount boot device ({}): {}", err.code(), err);
        eprintln!("Failed to mount boot device: {}", err);
    }
    Ok(fs)
}

fn run_script(shell: &mut Shell, commands: &[String]) -> Result<()> {
    let mut stdout = io::stdout().lock();
    for line in commands {
        match shell.execute(line) {
            Outcome::Continue(output) => stdout.write_all(output.as_bytes())?,
            Outcome::Exit => break,
        }
    }
    Ok(())
}

fn run_interactive(shell: &mut Shell) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut line = String::new();

    loop {
        write!(stdout, "{}> ", shell.prompt())?;
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            writeln!(stdout)?;
            return Ok(());
        }

        match shell.execute(line.trim_end_matches(['\r', '\n'])) {
            Outcome::Continue(output) => stdout.write_all(output.as_bytes())?,
            Outcome::Exit => return Ok(()),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut shell = Shell::new(boot(&args)?);
    if args.commands.is_empty() {
        run_interactive(&mut shell)
    } else {
        run_script(&mut shell, &args.commands)
    }
}
