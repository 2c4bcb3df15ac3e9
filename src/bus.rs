/*!
Bus: routes CPU reads/writes across work RAM, the PPU register window, and
the cartridge, and schedules the PPU/CPU clock at the 3:1 ratio.

Address map (CPU):
- `$0000-$07FF`: 2 KiB internal work RAM
- `$0800-$1FFF`: mirrors of `$0000-$07FF` (mask with `& 0x07FF`)
- `$2000-$3FFF`: PPU register window, mirrored every 8 bytes (`& 0x2007`)
- `$4000-$4017`: reserved (controllers/APU are out of scope; reads return 0)
- `$4020-$5FFF`: expansion area, unclaimed
- `$6000-$FFFF`: cartridge (PRG RAM / PRG ROM via the mapper)

The cartridge is offered every address first; only what it doesn't claim
falls through to the Bus's own decoder. This keeps mapper address claims
fully general even though only NROM is implemented.

`Cpu` is owned by value and temporarily taken out of the struct (via
`mem::take`) for the duration of `clock()`/`reset()`, since those need
`&mut Bus` passed back into the CPU for memory access. The cartridge is
`Rc<RefCell<_>>` because it's also read by the PPU during its own `clock()`.
*/

use std::cell::RefCell;
use std::mem;
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::cartridge::Cartridge;
use crate::cpu::Cpu;
use crate::error::BusError;
use crate::ppu::Ppu;

pub struct Bus {
    ram: [u8; 0x0800],
    pub cpu: Cpu,
    pub ppu: Ppu,
    cartridge: Option<Rc<RefCell<Cartridge>>>,
    system_clock: u64,
}

impl Default for Bus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus {
    pub fn new() -> Self {
        Self {
            ram: [0; 0x0800],
            cpu: Cpu::new(),
            ppu: Ppu::new(),
            cartridge: None,
            system_clock: 0,
        }
    }

    /// Install a cartridge, sharing ownership with the PPU.
    pub fn attach_cartridge(&mut self, cartridge: Cartridge) {
        info!(mapper = cartridge.mapper_id(), "cartridge attached");
        let shared = Rc::new(RefCell::new(cartridge));
        self.cartridge = Some(shared.clone());
        self.ppu.attach_cartridge(shared);
    }

    pub fn detach_cartridge(&mut self) {
        self.cartridge = None;
        self.ppu.detach_cartridge();
    }

    /// `reset()`: zero `system_clock`, reset the CPU (which loads `PC` from
    /// the reset vector via this same Bus).
    pub fn reset(&mut self) {
        self.system_clock = 0;
        let mut cpu = mem::take(&mut self.cpu);
        cpu.reset(self);
        self.cpu = cpu;
        info!(pc = self.cpu.pc, "bus reset");
    }

    /// Advance one system tick: the PPU clocks every tick, the CPU clocks
    /// every third tick. PPU ticks strictly before CPU on ratio-3 ticks.
    pub fn clock(&mut self) {
        let _span = tracing::trace_span!("bus", tick = self.system_clock).entered();
        let was_completed = self.ppu.frame_completed;
        self.ppu.clock();
        if self.ppu.frame_completed && !was_completed {
            debug!(tick = self.system_clock, "ppu frame completed");
        }
        if self.system_clock % 3 == 0 {
            let mut cpu = mem::take(&mut self.cpu);
            cpu.clock(self);
            self.cpu = cpu;
        }
        self.system_clock += 1;
    }

    pub fn system_clock(&self) -> u64 {
        self.system_clock
    }

    /// Checked CPU read: cartridge first, then RAM mirror / PPU register
    /// window; anything else is an unmapped access.
    pub fn try_read(&mut self, addr: u16) -> Result<u8, BusError> {
        if let Some(cart) = &self.cartridge {
            if let Some(value) = cart.borrow_mut().cpu_read(addr) {
                return Ok(value);
            }
        }
        match addr {
            0x0000..=0x1FFF => Ok(self.ram[(addr & 0x07FF) as usize]),
            0x2000..=0x3FFF => Ok(self.ppu.read(0x2000 | (addr & 0x0007) as u16)),
            0x4016..=0x4017 => Ok(0), // controller window, out of scope
            _ => Err(BusError::UnmappedRead(addr)),
        }
    }

    pub fn try_write(&mut self, addr: u16, data: u8) -> Result<(), BusError> {
        if let Some(cart) = &self.cartridge {
            if cart.borrow_mut().cpu_write(addr, data) {
                return Ok(());
            }
        }
        match addr {
            0x0000..=0x1FFF => {
                self.ram[(addr & 0x07FF) as usize] = data;
                Ok(())
            }
            0x2000..=0x3FFF => {
                self.ppu.write(0x2000 | (addr & 0x0007) as u16, data);
                Ok(())
            }
            0x4016..=0x4017 => Ok(()), // controller window, writes discarded
            _ => Err(BusError::UnmappedWrite(addr)),
        }
    }

    /// Unchecked read for the CPU hot path: logs and substitutes 0 on an
    /// unmapped access instead of propagating a `Result`.
    pub fn read(&mut self, addr: u16) -> u8 {
        match self.try_read(addr) {
            Ok(value) => value,
            Err(err) => {
                warn!(%err, "bus read fell through to unmapped space");
                0
            }
        }
    }

    pub fn write(&mut self, addr: u16, data: u8) {
        if let Err(err) = self.try_write(addr, data) {
            warn!(%err, "bus write fell through to unmapped space");
        }
    }
}
