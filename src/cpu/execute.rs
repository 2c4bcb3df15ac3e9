/*!
Instruction semantics: one function per `Mnemonic`, dispatched from
`Cpu::clock()` after addressing-mode resolution. Returns the 1/0
"read-category / page-cross-eligible" bit; the caller ANDs it with the
addressing mode's own bit to decide whether to charge the extra cycle.

The combo read-modify-write opcodes (`SLO`/`RLA`/`SRE`/`RRA`/`DCP`/`ISC`)
are literally the composition of their two component operations applied to
the same effective address, matching real silicon's internal micro-ops.
*/

use crate::bus::Bus;
use crate::cpu::regs::{BREAK, Flag, UNUSED};
use crate::cpu::addressing::AddrMode;
use crate::cpu::state::Cpu;
use crate::cpu::table::Mnemonic;

impl Cpu {
    /// Execute `mnemonic` against the already-resolved `abs_addr`/`fetched`.
    /// Returns 1 if this instruction is in the read-category eligible for
    /// the indexed-addressing page-cross penalty.
    pub(crate) fn execute(&mut self, bus: &mut Bus, mnemonic: Mnemonic, mode: AddrMode) -> u8 {
        use Mnemonic::*;
        match mnemonic {
            Adc => {
                self.adc(self.fetched);
                1
            }
            Sbc => {
                self.adc(self.fetched ^ 0xFF);
                1
            }
            And => {
                self.a &= self.fetched;
                self.update_zn(self.a);
                1
            }
            Ora => {
                self.a |= self.fetched;
                self.update_zn(self.a);
                1
            }
            Eor => {
                self.a ^= self.fetched;
                self.update_zn(self.a);
                1
            }
            Bit => {
                let result = self.a & self.fetched;
                self.set_flag(Flag::Z, result == 0);
                self.set_flag(Flag::V, self.fetched & 0x40 != 0);
                self.set_flag(Flag::N, self.fetched & 0x80 != 0);
                0
            }
            Cmp => {
                self.compare(self.a, self.fetched);
                1
            }
            Cpx => {
                self.compare(self.x, self.fetched);
                0
            }
            Cpy => {
                self.compare(self.y, self.fetched);
                0
            }
            Asl => {
                let result = self.rmw(bus, mode, |cpu, v| {
                    cpu.set_flag(Flag::C, v & 0x80 != 0);
                    v << 1
                });
                self.update_zn(result);
                0
            }
            Lsr => {
                let result = self.rmw(bus, mode, |cpu, v| {
                    cpu.set_flag(Flag::C, v & 0x01 != 0);
                    v >> 1
                });
                self.update_zn(result);
                0
            }
            Rol => {
                let result = self.rmw(bus, mode, |cpu, v| {
                    let carry_in = cpu.get_flag(Flag::C) as u8;
                    cpu.set_flag(Flag::C, v & 0x80 != 0);
                    (v << 1) | carry_in
                });
                self.update_zn(result);
                0
            }
            Ror => {
                let result = self.rmw(bus, mode, |cpu, v| {
                    let carry_in = (cpu.get_flag(Flag::C) as u8) << 7;
                    cpu.set_flag(Flag::C, v & 0x01 != 0);
                    (v >> 1) | carry_in
                });
                self.update_zn(result);
                0
            }
            Inc => {
                let result = self.rmw(bus, mode, |_, v| v.wrapping_add(1));
                self.update_zn(result);
                0
            }
            Dec => {
                let result = self.rmw(bus, mode, |_, v| v.wrapping_sub(1));
                self.update_zn(result);
                0
            }
            Inx => {
                self.x = self.x.wrapping_add(1);
                self.update_zn(self.x);
                0
            }
            Iny => {
                self.y = self.y.wrapping_add(1);
                self.update_zn(self.y);
                0
            }
            Dex => {
                self.x = self.x.wrapping_sub(1);
                self.update_zn(self.x);
                0
            }
            Dey => {
                self.y = self.y.wrapping_sub(1);
                self.update_zn(self.y);
                0
            }
            Lda => {
                self.a = self.fetched;
                self.update_zn(self.a);
                1
            }
            Ldx => {
                self.x = self.fetched;
                self.update_zn(self.x);
                1
            }
            Ldy => {
                self.y = self.fetched;
                self.update_zn(self.y);
                1
            }
            Sta => {
                bus.write(self.abs_addr, self.a);
                0
            }
            Stx => {
                bus.write(self.abs_addr, self.x);
                0
            }
            Sty => {
                bus.write(self.abs_addr, self.y);
                0
            }
            Tax => {
                self.x = self.a;
                self.update_zn(self.x);
                0
            }
            Tay => {
                self.y = self.a;
                self.update_zn(self.y);
                0
            }
            Txa => {
                self.a = self.x;
                self.update_zn(self.a);
                0
            }
            Tya => {
                self.a = self.y;
                self.update_zn(self.a);
                0
            }
            Tsx => {
                self.x = self.sp;
                self.update_zn(self.x);
                0
            }
            Txs => {
                self.sp = self.x;
                0
            }
            Pha => {
                self.push(bus, self.a);
                0
            }
            Pla => {
                self.a = self.pop(bus);
                self.update_zn(self.a);
                0
            }
            Php => {
                let pushed = self.status | BREAK | UNUSED;
                self.push(bus, pushed);
                0
            }
            Plp => {
                let prior_break = self.status & BREAK;
                let popped = self.pop(bus);
                self.status = (popped & !BREAK) | UNUSED | prior_break;
                0
            }
            Clc => {
                self.set_flag(Flag::C, false);
                0
            }
            Sec => {
                self.set_flag(Flag::C, true);
                0
            }
            Cli => {
                self.set_flag(Flag::I, false);
                0
            }
            Sei => {
                self.set_flag(Flag::I, true);
                0
            }
            Clv => {
                self.set_flag(Flag::V, false);
                0
            }
            Cld => {
                self.set_flag(Flag::D, false);
                0
            }
            Sed => {
                self.set_flag(Flag::D, true);
                0
            }
            Jmp => {
                self.pc = self.abs_addr;
                0
            }
            Jsr => {
                let ret = self.pc.wrapping_sub(1);
                self.push_word(bus, ret);
                self.pc = self.abs_addr;
                0
            }
            Rts => {
                let ret = self.pop_word(bus);
                self.pc = ret.wrapping_add(1);
                0
            }
            Brk => {
                self.pc = self.pc.wrapping_add(1);
                self.push_word(bus, self.pc);
                let pushed = self.status | BREAK | UNUSED;
                self.push(bus, pushed);
                let lo = bus.read(0xFFFE) as u16;
                let hi = bus.read(0xFFFF) as u16;
                self.pc = (hi << 8) | lo;
                0
            }
            Rti => {
                let popped = self.pop(bus);
                self.status = (popped & !BREAK) | UNUSED;
                self.pc = self.pop_word(bus);
                0
            }
            Bcc => self.branch(bus, !self.get_flag(Flag::C)),
            Bcs => self.branch(bus, self.get_flag(Flag::C)),
            Beq => self.branch(bus, self.get_flag(Flag::Z)),
            Bne => self.branch(bus, !self.get_flag(Flag::Z)),
            Bmi => self.branch(bus, self.get_flag(Flag::N)),
            Bpl => self.branch(bus, !self.get_flag(Flag::N)),
            Bvc => self.branch(bus, !self.get_flag(Flag::V)),
            Bvs => self.branch(bus, self.get_flag(Flag::V)),
            Nop => 1,
            Lax => {
                self.a = self.fetched;
                self.x = self.fetched;
                self.update_zn(self.a);
                1
            }
            Sax => {
                bus.write(self.abs_addr, self.a & self.x);
                0
            }
            Dcp => {
                let result = self.rmw(bus, mode, |_, v| v.wrapping_sub(1));
                self.compare(self.a, result);
                0
            }
            Isc => {
                let result = self.rmw(bus, mode, |_, v| v.wrapping_add(1));
                self.adc(result ^ 0xFF);
                0
            }
            Slo => {
                let result = self.rmw(bus, mode, |cpu, v| {
                    cpu.set_flag(Flag::C, v & 0x80 != 0);
                    v << 1
                });
                self.a |= result;
                self.update_zn(self.a);
                0
            }
            Rla => {
                let result = self.rmw(bus, mode, |cpu, v| {
                    let carry_in = cpu.get_flag(Flag::C) as u8;
                    cpu.set_flag(Flag::C, v & 0x80 != 0);
                    (v << 1) | carry_in
                });
                self.a &= result;
                self.update_zn(self.a);
                0
            }
            Sre => {
                let result = self.rmw(bus, mode, |cpu, v| {
                    cpu.set_flag(Flag::C, v & 0x01 != 0);
                    v >> 1
                });
                self.a ^= result;
                self.update_zn(self.a);
                0
            }
            Rra => {
                let result = self.rmw(bus, mode, |cpu, v| {
                    let carry_in = (cpu.get_flag(Flag::C) as u8) << 7;
                    cpu.set_flag(Flag::C, v & 0x01 != 0);
                    (v >> 1) | carry_in
                });
                self.adc(result);
                0
            }
            Jam => {
                self.jammed = true;
                0
            }
        }
    }

    /// `A = A + operand + C` per the documented flag formulas; `SBC` is the
    /// same computation with its operand pre-complemented by the caller.
    fn adc(&mut self, operand: u8) {
        let carry_in = self.get_flag(Flag::C) as u16;
        let sum = self.a as u16 + operand as u16 + carry_in;
        let result = sum as u8;
        let overflow = (!(self.a ^ operand) & (self.a ^ result) & 0x80) != 0;
        self.set_flag(Flag::C, sum > 0xFF);
        self.set_flag(Flag::V, overflow);
        self.a = result;
        self.update_zn(self.a);
    }

    fn compare(&mut self, reg: u8, operand: u8) {
        let result = reg.wrapping_sub(operand);
        self.set_flag(Flag::C, reg >= operand);
        self.set_flag(Flag::Z, reg == operand);
        self.set_flag(Flag::N, result & 0x80 != 0);
    }

    /// Read-modify-write: operates on `A` when `mode` is `Acc`, otherwise on
    /// `mem[abs_addr]`, writing the transformed value back to the same place.
    fn rmw(&mut self, bus: &mut Bus, mode: AddrMode, f: impl FnOnce(&mut Cpu, u8) -> u8) -> u8 {
        if mode == AddrMode::Acc {
            let value = self.a;
            let result = f(self, value);
            self.a = result;
            result
        } else {
            let value = self.fetched;
            let result = f(self, value);
            bus.write(self.abs_addr, result);
            result
        }
    }

    /// `+1` cycle if the branch is taken, another `+1` if the target lands
    /// on a different page than `PC`. Always returns 0 (branches aren't
    /// eligible for the indexed page-cross AND rule).
    fn branch(&mut self, _bus: &mut Bus, condition: bool) -> u8 {
        if condition {
            self.extra_cycles = self.extra_cycles.saturating_add(1);
            let target = self.pc.wrapping_add(self.rel_addr);
            if target & 0xFF00 != self.pc & 0xFF00 {
                self.extra_cycles = self.extra_cycles.saturating_add(1);
            }
            self.pc = target;
        }
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cartridge::Cartridge;
    use crate::test_utils::build_nrom_with_prg;

    fn setup(prg: &[u8]) -> (Cpu, Bus) {
        let rom = build_nrom_with_prg(prg, 1, 1, None);
        let cart = Cartridge::from_ines_bytes(&rom).expect("parse");
        let mut bus = Bus::new();
        bus.attach_cartridge(cart);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        (cpu, bus)
    }

    #[test]
    fn adc_sets_carry_zero_overflow_negative() {
        let (mut cpu, mut bus) = setup(&[0xEA]);
        cpu.a = 0x50;
        cpu.fetched = 0x50;
        cpu.execute(&mut bus, Mnemonic::Adc, AddrMode::Imm);
        assert_eq!(cpu.a, 0xA0);
        assert!(cpu.get_flag(Flag::V));
        assert!(cpu.get_flag(Flag::N));
        assert!(!cpu.get_flag(Flag::C));
    }

    #[test]
    fn sbc_complements_operand_and_borrows() {
        let (mut cpu, mut bus) = setup(&[0xEA]);
        cpu.a = 0x00;
        cpu.fetched = 0x01;
        cpu.set_flag(Flag::C, true); // no borrow going in
        cpu.execute(&mut bus, Mnemonic::Sbc, AddrMode::Imm);
        assert_eq!(cpu.a, 0xFF);
        assert!(!cpu.get_flag(Flag::C)); // borrow occurred
        assert!(cpu.get_flag(Flag::N));
    }

    #[test]
    fn cmp_sets_carry_when_register_greater_or_equal() {
        let (mut cpu, mut bus) = setup(&[0xEA]);
        cpu.a = 0x10;
        cpu.fetched = 0x10;
        cpu.execute(&mut bus, Mnemonic::Cmp, AddrMode::Imm);
        assert!(cpu.get_flag(Flag::C));
        assert!(cpu.get_flag(Flag::Z));
    }

    #[test]
    fn asl_acc_shifts_and_sets_carry() {
        let (mut cpu, mut bus) = setup(&[0xEA]);
        cpu.a = 0x80;
        cpu.execute(&mut bus, Mnemonic::Asl, AddrMode::Acc);
        assert_eq!(cpu.a, 0x00);
        assert!(cpu.get_flag(Flag::C));
        assert!(cpu.get_flag(Flag::Z));
    }

    #[test]
    fn asl_mem_writes_back_to_abs_addr() {
        let (mut cpu, mut bus) = setup(&[0xEA]);
        cpu.abs_addr = 0x0010;
        cpu.fetched = 0x41;
        bus.write(0x0010, 0x41);
        cpu.execute(&mut bus, Mnemonic::Asl, AddrMode::Zp0);
        assert_eq!(bus.read(0x0010), 0x82);
    }

    #[test]
    fn jsr_pushes_return_minus_one_and_jumps() {
        let (mut cpu, mut bus) = setup(&[0xEA]);
        cpu.pc = 0x8003;
        cpu.abs_addr = 0x9000;
        cpu.execute(&mut bus, Mnemonic::Jsr, AddrMode::Abs);
        assert_eq!(cpu.pc, 0x9000);
        let ret = cpu.pop_word(&mut bus);
        assert_eq!(ret, 0x8002);
    }

    #[test]
    fn rts_pops_and_adds_one() {
        let (mut cpu, mut bus) = setup(&[0xEA]);
        cpu.push_word(&mut bus, 0x8002);
        cpu.execute(&mut bus, Mnemonic::Rts, AddrMode::Imp);
        assert_eq!(cpu.pc, 0x8003);
    }

    #[test]
    fn brk_pushes_break_set_but_does_not_mutate_interrupt_disable() {
        let (mut cpu, mut bus) = setup(&[0xEA]);
        cpu.pc = 0x8000;
        cpu.status = 0x00;
        bus.write(0xFFFE, 0x00);
        bus.write(0xFFFF, 0x90);
        cpu.execute(&mut bus, Mnemonic::Brk, AddrMode::Imp);
        assert_eq!(cpu.pc, 0x9000);
        // BRK never sets I in the live register; only the pushed byte gets
        // B (and U) forced.
        assert!(!cpu.get_flag(Flag::I));
        let pushed_status = cpu.pop(&mut bus);
        let pc_pushed = cpu.pop_word(&mut bus);
        assert_eq!(pc_pushed, 0x8001);
        assert_eq!(pushed_status & BREAK, BREAK);
        assert_eq!(pushed_status & UNUSED, UNUSED);
        assert_eq!(pushed_status & Flag::I.mask(), 0);
    }

    #[test]
    fn php_forces_break_and_unused_without_mutating_register_status() {
        let (mut cpu, mut bus) = setup(&[0xEA]);
        cpu.status = 0x00;
        cpu.execute(&mut bus, Mnemonic::Php, AddrMode::Imp);
        let pushed = cpu.pop(&mut bus);
        assert_eq!(pushed & BREAK, BREAK);
        assert_eq!(pushed & UNUSED, UNUSED);
    }

    #[test]
    fn plp_preserves_prior_break_bit_not_the_popped_one() {
        let (mut cpu, mut bus) = setup(&[0xEA]);
        cpu.status |= BREAK;
        cpu.push(&mut bus, 0x00); // popped byte has B clear
        cpu.execute(&mut bus, Mnemonic::Plp, AddrMode::Imp);
        assert_eq!(cpu.status & BREAK, BREAK);
        assert_eq!(cpu.status & UNUSED, UNUSED);
    }

    #[test]
    fn branch_taken_and_page_cross_add_extra_cycles() {
        let (mut cpu, mut bus) = setup(&[0xEA]);
        cpu.pc = 0x80FE;
        cpu.rel_addr = 0x0004; // target 0x8102, crosses page
        cpu.extra_cycles = 0;
        cpu.execute(&mut bus, Mnemonic::Bcc, AddrMode::Rel);
        assert_eq!(cpu.pc, 0x8102);
        assert_eq!(cpu.extra_cycles, 2);
    }

    #[test]
    fn branch_not_taken_adds_no_cycles() {
        let (mut cpu, mut bus) = setup(&[0xEA]);
        cpu.pc = 0x8000;
        cpu.rel_addr = 0x0004;
        cpu.set_flag(Flag::C, true);
        cpu.execute(&mut bus, Mnemonic::Bcc, AddrMode::Rel);
        assert_eq!(cpu.pc, 0x8000);
        assert_eq!(cpu.extra_cycles, 0);
    }

    #[test]
    fn lax_loads_both_a_and_x() {
        let (mut cpu, mut bus) = setup(&[0xEA]);
        cpu.fetched = 0x42;
        cpu.execute(&mut bus, Mnemonic::Lax, AddrMode::Imm);
        assert_eq!(cpu.a, 0x42);
        assert_eq!(cpu.x, 0x42);
    }

    #[test]
    fn sax_writes_a_and_x() {
        let (mut cpu, mut bus) = setup(&[0xEA]);
        cpu.a = 0xF0;
        cpu.x = 0x0F;
        cpu.abs_addr = 0x0020;
        cpu.execute(&mut bus, Mnemonic::Sax, AddrMode::Zp0);
        assert_eq!(bus.read(0x0020), 0x00);
    }

    #[test]
    fn jam_sets_jammed_flag() {
        let (mut cpu, mut bus) = setup(&[0xEA]);
        cpu.execute(&mut bus, Mnemonic::Jam, AddrMode::Imp);
        assert!(cpu.jammed);
    }
}
