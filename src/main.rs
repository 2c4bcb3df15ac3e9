//! Headless demo binary: load an iNES ROM, run the bus for a fixed number of
//! frames, and print CPU/PPU state after each one. No window — the
//! pixel-presentation layer is a host concern outside the core (see lib.rs).

use std::process::ExitCode;

use arness::Bus;
use arness::Cartridge;
use clap::Parser;
use tracing::info;

/// Run the Arness core headlessly against an iNES ROM image.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to an iNES (.nes) ROM image.
    rom: String,

    /// Number of PPU frames to run before exiting.
    #[arg(short, long, default_value_t = 60)]
    frames: u32,

    /// Override the reset vector (e.g. 0xC000 for nestest's automated mode).
    #[arg(long, value_parser = parse_hex_u16)]
    pc: Option<u16>,
}

fn parse_hex_u16(s: &str) -> Result<u16, std::num::ParseIntError> {
    u16::from_str_radix(s.trim_start_matches("0x").trim_start_matches("0X"), 16)
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let cartridge = match Cartridge::from_ines_file(&args.rom) {
        Ok(cart) => cart,
        Err(err) => {
            eprintln!("failed to load {}: {err}", args.rom);
            return ExitCode::FAILURE;
        }
    };
    info!(
        mapper = cartridge.mapper_id(),
        prg_bytes = cartridge.prg_rom_len(),
        chr_bytes = cartridge.chr_len(),
        "rom loaded"
    );

    let mut bus = Bus::new();
    bus.attach_cartridge(cartridge);
    bus.reset();
    if let Some(pc) = args.pc {
        bus.cpu.pc = pc;
    }

    bus.ppu.set_on_frame_completed(|| {});

    for frame in 1..=args.frames {
        while !bus.ppu.frame_completed {
            bus.clock();
        }
        bus.ppu.frame_completed = false;

        println!(
            "frame {frame:>4}  pc={:#06x} a={:#04x} x={:#04x} y={:#04x} sp={:#04x} status={:#04x}  scanline={} cycle={}",
            bus.cpu.pc,
            bus.cpu.a,
            bus.cpu.x,
            bus.cpu.y,
            bus.cpu.sp,
            bus.cpu.status,
            bus.ppu.scanline,
            bus.ppu.cycle,
        );

        if bus.cpu.jammed {
            println!("CPU jammed at pc={:#06x}; stopping", bus.cpu.pc);
            break;
        }
    }

    ExitCode::SUCCESS
}
