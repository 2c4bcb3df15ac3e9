#![doc = r#"
Arness: a cycle-accurate core for a 1985-era 8-bit home console built around
a MOS 6502-family CPU and an NTSC picture-processing unit.

This crate is the execution pipeline only: CPU decode/execute, PPU timing,
and the cartridge/mapper fabric that remaps the CPU and PPU address spaces.
Presentation, input, audio, and save-states are host concerns layered on top
of the callbacks `Ppu` exposes.

Modules:
- `bus`: routes CPU reads/writes across work RAM, the PPU register window,
  and the cartridge; schedules the PPU/CPU clock at the 3:1 ratio.
- `cartridge`: iNES v1 loader; constructs a `Mapper` and owns PRG/CHR memory.
- `cpu`: the 6502 core (`Cpu`), its opcode dispatch table, addressing modes,
  and instruction semantics.
- `error`: `RomError` (fatal, load-time) and `BusError` (recoverable, bus
  access) taxonomies.
- `mapper`: the `Mapper` trait and the NROM (mapper 0) implementation.
- `ppu`: dot/scanline timing, palette RAM, and per-pixel/per-frame hooks.

In tests, shared iNES builders are available under `crate::test_utils`.
"#]

pub mod bus;
pub mod cartridge;
pub mod cpu;
pub mod error;
pub mod mapper;
pub mod ppu;

pub use bus::Bus;
pub use cartridge::Cartridge;
pub use cpu::Cpu;
pub use ppu::Ppu;

#[cfg(test)]
pub mod test_utils;
