//! Nestest conformance: replays the canonical `nestest.nes` automated-mode
//! execution and checks the CPU's packed status byte against a known-good
//! reference trace at every opcode-load boundary (§8 scenario 5).
//!
//! `nestest.nes` and its reference log (`nestest.log`, in the widely used
//! Nintendulator trace format) are copyrighted/third-party test assets not
//! vendored into this workspace. Drop them at `tests/data/nestest.nes` and
//! `tests/data/nestest.log` to run this test; otherwise it's skipped with an
//! explanatory message, documenting the harness shape without requiring the
//! binary to be present in the repo.

use std::fs;
use std::path::Path;

use arness::cartridge::Cartridge;
use arness::Bus;

const ROM_PATH: &str = "tests/data/nestest.nes";
const LOG_PATH: &str = "tests/data/nestest.log";

/// One parsed line of a Nintendulator-format nestest trace: program counter
/// and packed status byte, the two fields §8 scenario 5 requires to match
/// byte-for-byte. (The log's `CYC:` field isn't checked here: it assumes the
/// reference implementation's reset sequence burns 7 cycles before the first
/// instruction, which this core's instant `reset()` does not model.)
struct GoldLine {
    pc: u16,
    status: u8,
}

/// Parse `"C000  4C F5 C5  JMP $C5F5  ...  P:24 SP:FD ... CYC:  7"`-style
/// lines into the fields this test checks.
fn parse_gold_line(line: &str) -> GoldLine {
    let pc = u16::from_str_radix(&line[0..4], 16).expect("PC field");
    let status_idx = line.find("P:").expect("P: field") + 2;
    let status = u8::from_str_radix(&line[status_idx..status_idx + 2], 16).expect("status field");
    GoldLine { pc, status }
}

#[test]
fn nestest_matches_reference_trace() {
    if !Path::new(ROM_PATH).exists() || !Path::new(LOG_PATH).exists() {
        eprintln!(
            "skipping nestest conformance: {ROM_PATH} / {LOG_PATH} not present in this workspace"
        );
        return;
    }

    let rom_bytes = fs::read(ROM_PATH).expect("read nestest.nes");
    let cartridge = Cartridge::from_ines_bytes(&rom_bytes).expect("parse nestest.nes");

    let gold_log: Vec<GoldLine> = fs::read_to_string(LOG_PATH)
        .expect("read nestest.log")
        .lines()
        .map(parse_gold_line)
        .collect();

    let mut bus = Bus::new();
    bus.attach_cartridge(cartridge);
    bus.reset();
    // Nestest's automated (non-interactive) mode starts execution at $C000
    // rather than the cartridge's documented reset vector, with I already
    // set in the status byte (P:24 on the reference log's first line).
    bus.cpu.pc = 0xC000;
    bus.cpu.status = 0x24;

    // Drive the CPU one opcode at a time over the bus's real 3:1 PPU/CPU
    // schedule. `clock()` fetches, decodes, *and* fully executes an
    // instruction in the single call where `remaining_cycles` hits zero, so
    // the opcode-load-boundary state (PC pointing at the not-yet-consumed
    // opcode byte, status as of before this instruction's effects) must be
    // read right before that call, not after it.
    for (i, gold) in gold_log.iter().enumerate() {
        loop {
            let about_to_dispatch = bus.system_clock() % 3 == 0 && bus.cpu.remaining_cycles == 0;
            if about_to_dispatch {
                assert_eq!(
                    bus.cpu.pc, gold.pc,
                    "line {}: PC mismatch (want {:04X}, got {:04X})",
                    i + 1,
                    gold.pc,
                    bus.cpu.pc
                );
                assert_eq!(
                    bus.cpu.status, gold.status,
                    "line {}: status byte mismatch (want {:02X}, got {:02X})",
                    i + 1,
                    gold.status,
                    bus.cpu.status
                );
                bus.clock();
                break;
            }
            bus.clock();
        }
        while bus.cpu.remaining_cycles > 0 {
            bus.clock();
        }
    }
}
