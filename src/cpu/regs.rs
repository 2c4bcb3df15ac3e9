/*!
Processor status flag bit positions.

6502 status register bit layout:
```
Bit: 7 6 5 4 3 2 1 0
     N V U B D I Z C
```
`U` (bit 5) has no physical flip-flop on real hardware; it reads back set
whenever the status byte is reconstructed and is otherwise along for the
ride. `D` exists in the ISA but this hardware's ALU ignores it (decimal
mode is out of scope per the core's non-goals).
*/

pub const CARRY: u8 = 0b0000_0001;
pub const ZERO: u8 = 0b0000_0010;
pub const IRQ_DISABLE: u8 = 0b0000_0100;
pub const DECIMAL: u8 = 0b0000_1000;
pub const BREAK: u8 = 0b0001_0000;
pub const UNUSED: u8 = 0b0010_0000;
pub const OVERFLOW: u8 = 0b0100_0000;
pub const NEGATIVE: u8 = 0b1000_0000;

/// Named processor flags, for call sites that read better with a symbol
/// than a raw mask constant.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Flag {
    C = CARRY as isize,
    Z = ZERO as isize,
    I = IRQ_DISABLE as isize,
    D = DECIMAL as isize,
    B = BREAK as isize,
    U = UNUSED as isize,
    V = OVERFLOW as isize,
    N = NEGATIVE as isize,
}

impl Flag {
    #[inline]
    pub const fn mask(self) -> u8 {
        self as u8
    }
}
