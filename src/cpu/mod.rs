/*!
6502 CPU core: `clock()`-per-dot execution over a 256-entry opcode table.

Module layout:

    regs.rs        - status flag bit masks / `Flag` enum
    state.rs       - register file, stack/PC helpers, reset/IRQ/NMI, the
                     `on_opcode_loaded` tracing hook
    addressing.rs  - `AddrMode` and effective-address resolution
    table.rs       - `Mnemonic` and the compile-time opcode table
    execute.rs     - instruction semantics, one function per mnemonic

`mod.rs` is the only place that ties the pieces into the instruction
pipeline via `Cpu::clock()`: fetch and dispatch when `remaining_cycles`
is zero, otherwise just burn a cycle.
*/

mod addressing;
mod execute;
mod regs;
mod state;
mod table;

pub use addressing::AddrMode;
pub use regs::Flag;
pub use state::Cpu;
pub use table::Mnemonic;

use tracing::trace;

use crate::bus::Bus;
use table::TABLE;

impl Cpu {
    /// Advance one wall cycle: fetch+dispatch a new instruction when no
    /// cycles are owed, otherwise just decrement the pending count. A
    /// no-op once `jammed` is latched.
    pub fn clock(&mut self, bus: &mut Bus) {
        if self.jammed {
            return;
        }

        if self.remaining_cycles == 0 {
            let pc_before_fetch = self.pc;
            let opcode = self.fetch_pc_byte(bus);
            self.opcode = opcode;

            if let Some(hook) = self.on_opcode_loaded.as_mut() {
                hook(opcode, pc_before_fetch);
            }

            let entry = TABLE[opcode as usize];
            trace!(pc = pc_before_fetch, opcode, mnemonic = ?entry.mnemonic, "dispatch");
            self.extra_cycles = 0;

            let addr_bit = self.resolve_address(bus, entry.mode);
            self.fetch_operand(bus, entry.mode);
            let exec_bit = self.execute(bus, entry.mnemonic, entry.mode);

            let page_cross_penalty = addr_bit & exec_bit;
            let total = entry.cycles + page_cross_penalty + self.extra_cycles;

            self.remaining_cycles = total.saturating_sub(1);
        } else {
            self.remaining_cycles -= 1;
        }
    }
}
