/*!
PPU: dot/scanline timing, palette RAM, and the CHR-backed PPU bus.

This is deliberately not a full rendering pipeline. Sprite evaluation,
background pattern fetches, and scroll registers are out of scope (§4.2);
what's modeled is the timing state machine, the palette LUT, and the
palette-RAM-backed `getColor` lookup a host needs to turn a `(palette, pixel)`
pair into an RGB triple, plus the per-dot and per-frame callback hooks a host
render loop attaches to.
*/

use crate::cartridge::Cartridge;
use std::rc::Rc;
use std::cell::RefCell;

/// Fixed 64-entry NTSC NES palette (RGB8), transcribed verbatim from the
/// reference palette table. Entries 0x0D-0x0F, 0x1D-0x1F, 0x2E-0x2F, 0x3E-0x3F
/// are black.
pub const PALETTE: [(u8, u8, u8); 64] = [
    (84, 84, 84), (0, 30, 116), (8, 16, 144), (48, 0, 136),
    (68, 0, 100), (92, 0, 48), (84, 4, 0), (60, 24, 0),
    (32, 42, 0), (8, 58, 0), (0, 64, 0), (0, 60, 0),
    (0, 50, 60), (0, 0, 0), (0, 0, 0), (0, 0, 0),
    (152, 150, 152), (8, 76, 196), (48, 50, 236), (92, 30, 228),
    (136, 20, 176), (160, 20, 100), (152, 34, 32), (120, 60, 0),
    (84, 90, 0), (40, 114, 0), (8, 124, 0), (0, 118, 40),
    (0, 102, 120), (0, 0, 0), (0, 0, 0), (0, 0, 0),
    (236, 238, 236), (76, 154, 236), (120, 124, 236), (176, 98, 236),
    (228, 84, 236), (236, 88, 180), (236, 106, 100), (212, 136, 32),
    (160, 170, 0), (116, 196, 0), (76, 208, 32), (56, 204, 108),
    (56, 180, 204), (60, 60, 60), (0, 0, 0), (0, 0, 0),
    (236, 238, 236), (168, 204, 236), (188, 188, 236), (212, 178, 236),
    (236, 174, 236), (236, 174, 212), (236, 180, 176), (228, 196, 144),
    (204, 210, 120), (180, 222, 120), (168, 226, 144), (152, 226, 180),
    (160, 214, 228), (160, 162, 160), (0, 0, 0), (0, 0, 0),
];

type PixelHook = Box<dyn FnMut(u16, i16)>;
type FrameHook = Box<dyn FnMut()>;

pub struct Ppu {
    pub cycle: u16,
    pub scanline: i16,
    pub frame_completed: bool,
    palette_ram: [u8; 32],
    cartridge: Option<Rc<RefCell<Cartridge>>>,
    on_ppu_clocked: Option<PixelHook>,
    on_frame_completed: Option<FrameHook>,
}

impl Default for Ppu {
    fn default() -> Self {
        Self::new()
    }
}

impl Ppu {
    pub fn new() -> Self {
        Self {
            cycle: 0,
            scanline: 0,
            frame_completed: false,
            palette_ram: [0; 32],
            cartridge: None,
            on_ppu_clocked: None,
            on_frame_completed: None,
        }
    }

    pub fn attach_cartridge(&mut self, cartridge: Rc<RefCell<Cartridge>>) {
        self.cartridge = Some(cartridge);
    }

    pub fn detach_cartridge(&mut self) {
        self.cartridge = None;
    }

    pub fn set_on_ppu_clocked<F: FnMut(u16, i16) + 'static>(&mut self, f: F) {
        self.on_ppu_clocked = Some(Box::new(f));
    }

    pub fn set_on_frame_completed<F: FnMut() + 'static>(&mut self, f: F) {
        self.on_frame_completed = Some(Box::new(f));
    }

    pub fn clear_hooks(&mut self) {
        self.on_ppu_clocked = None;
        self.on_frame_completed = None;
    }

    /// PPU-side bus read: masks to 14 bits, defers CHR space to the
    /// cartridge, and serves palette RAM ($3F00..=$3FFF) internally.
    pub fn read(&self, addr: u16) -> u8 {
        let addr = addr & 0x3FFF;
        if addr >= 0x3F00 {
            return self.read_palette(addr);
        }
        match &self.cartridge {
            Some(cart) => cart.borrow().ppu_read(addr).unwrap_or(0),
            None => 0,
        }
    }

    pub fn write(&mut self, addr: u16, data: u8) {
        let addr = addr & 0x3FFF;
        if addr >= 0x3F00 {
            self.write_palette(addr, data);
            return;
        }
        if let Some(cart) = &self.cartridge {
            cart.borrow_mut().ppu_write(addr, data);
        }
    }

    fn read_palette(&self, addr: u16) -> u8 {
        self.palette_ram[Self::palette_index(addr)]
    }

    fn write_palette(&mut self, addr: u16, data: u8) {
        let idx = Self::palette_index(addr);
        self.palette_ram[idx] = data;
    }

    /// Palette RAM mirrors every 32 bytes; entries 0x10/0x14/0x18/0x1C mirror
    /// the corresponding background-transparent entries at 0x00/0x04/0x08/0x0C.
    fn palette_index(addr: u16) -> usize {
        let mut idx = (addr - 0x3F00) as usize & 0x1F;
        if idx & 0x13 == 0x10 {
            idx &= !0x10;
        }
        idx
    }

    /// `getColor(palette, pixel)` per §4.2: look up the palette-RAM entry,
    /// mask to the 64-entry LUT, and resolve the RGB triple.
    pub fn get_color(&self, palette: u8, pixel: u8) -> (u8, u8, u8) {
        let addr = 0x3F00u16 + (palette as u16) * 4 + pixel as u16;
        let entry = self.read(addr) & 0x3F;
        PALETTE[entry as usize]
    }

    /// Advance one PPU dot. `cycle` runs 0..=340 then wraps and increments
    /// `scanline`; `scanline` runs -1..=260 then wraps back to -1 and latches
    /// `frame_completed`, firing `on_frame_completed` exactly once on that
    /// transition. The per-dot hook observes cycle/scanline after this dot's
    /// advance, matching the reference timing loop.
    pub fn clock(&mut self) {
        self.cycle += 1;
        if self.cycle > 340 {
            self.cycle = 0;
            self.scanline += 1;
            if self.scanline > 260 {
                self.scanline = -1;
                self.frame_completed = true;
                if let Some(hook) = self.on_frame_completed.as_mut() {
                    hook();
                }
            }
        }

        if let Some(hook) = self.on_ppu_clocked.as_mut() {
            hook(self.cycle, self.scanline);
        }
    }

    pub fn reset(&mut self) {
        self.cycle = 0;
        self.scanline = 0;
        self.frame_completed = false;
        self.palette_ram = [0; 32];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_and_scanline_stay_in_bounds() {
        let mut ppu = Ppu::new();
        for _ in 0..(342 * 262) {
            ppu.clock();
            assert!(ppu.cycle <= 340);
            assert!(ppu.scanline >= -1 && ppu.scanline <= 260);
        }
    }

    #[test]
    fn wraps_cycle_into_next_scanline() {
        let mut ppu = Ppu::new();
        ppu.cycle = 340;
        ppu.scanline = 5;
        ppu.clock();
        assert_eq!(ppu.cycle, 0);
        assert_eq!(ppu.scanline, 6);
    }

    #[test]
    fn wraps_scanline_into_next_frame_and_latches_completion() {
        let mut ppu = Ppu::new();
        ppu.cycle = 340;
        ppu.scanline = 260;
        assert!(!ppu.frame_completed);
        ppu.clock();
        assert_eq!(ppu.cycle, 0);
        assert_eq!(ppu.scanline, -1);
        assert!(ppu.frame_completed);
    }

    #[test]
    fn on_ppu_clocked_hook_fires_every_dot() {
        let mut ppu = Ppu::new();
        let count = Rc::new(RefCell::new(0u32));
        let count_clone = count.clone();
        ppu.set_on_ppu_clocked(move |_, _| *count_clone.borrow_mut() += 1);
        for _ in 0..10 {
            ppu.clock();
        }
        assert_eq!(*count.borrow(), 10);
    }

    #[test]
    fn on_frame_completed_fires_once_per_frame() {
        let mut ppu = Ppu::new();
        let count = Rc::new(RefCell::new(0u32));
        let count_clone = count.clone();
        ppu.set_on_frame_completed(move || *count_clone.borrow_mut() += 1);
        for _ in 0..(341 * 262) {
            ppu.clock();
        }
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn palette_ram_write_read_roundtrip() {
        let mut ppu = Ppu::new();
        ppu.write(0x3F00, 0x20);
        assert_eq!(ppu.read(0x3F00), 0x20);
    }

    #[test]
    fn palette_background_mirrors_alias() {
        let mut ppu = Ppu::new();
        ppu.write(0x3F00, 0x0F);
        assert_eq!(ppu.read(0x3F10), 0x0F);
    }

    #[test]
    fn get_color_masks_to_64_entry_table() {
        let mut ppu = Ppu::new();
        ppu.write(0x3F01, 0x3D);
        assert_eq!(ppu.get_color(0, 1), PALETTE[0x3D]);
    }

    #[test]
    fn palette_table_has_black_at_reserved_slots() {
        for idx in [0x0D, 0x0E, 0x0F, 0x1D, 0x1E, 0x1F, 0x2E, 0x2F, 0x3E, 0x3F] {
            assert_eq!(PALETTE[idx], (0, 0, 0));
        }
    }
}
