/*!
Opcode dispatch table: 256 `OpEntry` records (mnemonic, addressing mode,
baseline cycle count) indexed by opcode byte.

Built at compile time by `build_table()`, which starts from an all-`JAM`
array and fills in every documented opcode plus the undocumented set this
core supports (NOP variants, `LAX`/`SAX`, and the `DCP`/`ISC`/`SLO`/`RLA`/
`SRE`/`RRA` read-modify-write combos). Any slot `build_table` doesn't touch
stays `JAM`, satisfying the requirement that all 256 entries be populated.
*/

use crate::cpu::addressing::AddrMode;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mnemonic {
    Adc, And, Asl, Bcc, Bcs, Beq, Bit, Bmi, Bne, Bpl, Brk, Bvc, Bvs,
    Clc, Cld, Cli, Clv, Cmp, Cpx, Cpy, Dec, Dex, Dey, Eor, Inc, Inx, Iny,
    Jmp, Jsr, Lda, Ldx, Ldy, Lsr, Nop, Ora, Pha, Php, Pla, Plp, Rol, Ror,
    Rti, Rts, Sbc, Sec, Sed, Sei, Sta, Stx, Sty, Tax, Tay, Tsx, Txa, Txs, Tya,
    // Undocumented.
    Lax, Sax, Dcp, Isc, Slo, Rla, Sre, Rra, Jam,
}

#[derive(Clone, Copy, Debug)]
pub struct OpEntry {
    pub mnemonic: Mnemonic,
    pub mode: AddrMode,
    pub cycles: u8,
}

const fn op(mnemonic: Mnemonic, mode: AddrMode, cycles: u8) -> OpEntry {
    OpEntry { mnemonic, mode, cycles }
}

const JAM_ENTRY: OpEntry = op(Mnemonic::Jam, AddrMode::Imp, 2);

pub const TABLE: [OpEntry; 256] = build_table();

const fn build_table() -> [OpEntry; 256] {
    use AddrMode::*;
    use Mnemonic::*;

    let mut t = [JAM_ENTRY; 256];

    t[0x00] = op(Brk, Imp, 7);
    t[0x01] = op(Ora, Izx, 6);
    t[0x04] = op(Nop, Zp0, 3);
    t[0x05] = op(Ora, Zp0, 3);
    t[0x06] = op(Asl, Zp0, 5);
    t[0x08] = op(Php, Imp, 3);
    t[0x09] = op(Ora, Imm, 2);
    t[0x0A] = op(Asl, Acc, 2);
    t[0x0C] = op(Nop, Abs, 4);
    t[0x0D] = op(Ora, Abs, 4);
    t[0x0E] = op(Asl, Abs, 6);

    t[0x10] = op(Bpl, Rel, 2);
    t[0x11] = op(Ora, Izy, 5);
    t[0x14] = op(Nop, Zpx, 4);
    t[0x15] = op(Ora, Zpx, 4);
    t[0x16] = op(Asl, Zpx, 6);
    t[0x18] = op(Clc, Imp, 2);
    t[0x19] = op(Ora, Aby, 4);
    t[0x1A] = op(Nop, Imp, 2);
    t[0x1C] = op(Nop, Abx, 4);
    t[0x1D] = op(Ora, Abx, 4);
    t[0x1E] = op(Asl, Abx, 7);

    t[0x20] = op(Jsr, Abs, 6);
    t[0x21] = op(And, Izx, 6);
    t[0x24] = op(Bit, Zp0, 3);
    t[0x25] = op(And, Zp0, 3);
    t[0x26] = op(Rol, Zp0, 5);
    t[0x28] = op(Plp, Imp, 4);
    t[0x29] = op(And, Imm, 2);
    t[0x2A] = op(Rol, Acc, 2);
    t[0x2C] = op(Bit, Abs, 4);
    t[0x2D] = op(And, Abs, 4);
    t[0x2E] = op(Rol, Abs, 6);

    t[0x30] = op(Bmi, Rel, 2);
    t[0x31] = op(And, Izy, 5);
    t[0x34] = op(Nop, Zpx, 4);
    t[0x35] = op(And, Zpx, 4);
    t[0x36] = op(Rol, Zpx, 6);
    t[0x38] = op(Sec, Imp, 2);
    t[0x39] = op(And, Aby, 4);
    t[0x3A] = op(Nop, Imp, 2);
    t[0x3C] = op(Nop, Abx, 4);
    t[0x3D] = op(And, Abx, 4);
    t[0x3E] = op(Rol, Abx, 7);

    t[0x40] = op(Rti, Imp, 6);
    t[0x41] = op(Eor, Izx, 6);
    t[0x44] = op(Nop, Zp0, 3);
    t[0x45] = op(Eor, Zp0, 3);
    t[0x46] = op(Lsr, Zp0, 5);
    t[0x48] = op(Pha, Imp, 3);
    t[0x49] = op(Eor, Imm, 2);
    t[0x4A] = op(Lsr, Acc, 2);
    t[0x4C] = op(Jmp, Abs, 3);
    t[0x4D] = op(Eor, Abs, 4);
    t[0x4E] = op(Lsr, Abs, 6);

    t[0x50] = op(Bvc, Rel, 2);
    t[0x51] = op(Eor, Izy, 5);
    t[0x54] = op(Nop, Zpx, 4);
    t[0x55] = op(Eor, Zpx, 4);
    t[0x56] = op(Lsr, Zpx, 6);
    t[0x58] = op(Cli, Imp, 2);
    t[0x59] = op(Eor, Aby, 4);
    t[0x5A] = op(Nop, Imp, 2);
    t[0x5C] = op(Nop, Abx, 4);
    t[0x5D] = op(Eor, Abx, 4);
    t[0x5E] = op(Lsr, Abx, 7);

    t[0x60] = op(Rts, Imp, 6);
    t[0x61] = op(Adc, Izx, 6);
    t[0x64] = op(Nop, Zp0, 3);
    t[0x65] = op(Adc, Zp0, 3);
    t[0x66] = op(Ror, Zp0, 5);
    t[0x68] = op(Pla, Imp, 4);
    t[0x69] = op(Adc, Imm, 2);
    t[0x6A] = op(Ror, Acc, 2);
    t[0x6C] = op(Jmp, Ind, 5);
    t[0x6D] = op(Adc, Abs, 4);
    t[0x6E] = op(Ror, Abs, 6);

    t[0x70] = op(Bvs, Rel, 2);
    t[0x71] = op(Adc, Izy, 5);
    t[0x74] = op(Nop, Zpx, 4);
    t[0x75] = op(Adc, Zpx, 4);
    t[0x76] = op(Ror, Zpx, 6);
    t[0x78] = op(Sei, Imp, 2);
    t[0x79] = op(Adc, Aby, 4);
    t[0x7A] = op(Nop, Imp, 2);
    t[0x7C] = op(Nop, Abx, 4);
    t[0x7D] = op(Adc, Abx, 4);
    t[0x7E] = op(Ror, Abx, 7);

    t[0x80] = op(Nop, Imm, 2);
    t[0x81] = op(Sta, Izx, 6);
    t[0x82] = op(Nop, Imm, 2);
    t[0x83] = op(Sax, Izx, 6);
    t[0x84] = op(Sty, Zp0, 3);
    t[0x85] = op(Sta, Zp0, 3);
    t[0x86] = op(Stx, Zp0, 3);
    t[0x87] = op(Sax, Zp0, 3);
    t[0x88] = op(Dey, Imp, 2);
    t[0x89] = op(Nop, Imm, 2);
    t[0x8A] = op(Txa, Imp, 2);
    t[0x8C] = op(Sty, Abs, 4);
    t[0x8D] = op(Sta, Abs, 4);
    t[0x8E] = op(Stx, Abs, 4);
    t[0x8F] = op(Sax, Abs, 4);

    t[0x90] = op(Bcc, Rel, 2);
    t[0x91] = op(Sta, Izy, 6);
    t[0x94] = op(Sty, Zpx, 4);
    t[0x95] = op(Sta, Zpx, 4);
    t[0x96] = op(Stx, Zpy, 4);
    t[0x97] = op(Sax, Zpy, 4);
    t[0x98] = op(Tya, Imp, 2);
    t[0x99] = op(Sta, Aby, 5);
    t[0x9A] = op(Txs, Imp, 2);
    t[0x9D] = op(Sta, Abx, 5);

    t[0xA0] = op(Ldy, Imm, 2);
    t[0xA1] = op(Lda, Izx, 6);
    t[0xA2] = op(Ldx, Imm, 2);
    t[0xA3] = op(Lax, Izx, 6);
    t[0xA4] = op(Ldy, Zp0, 3);
    t[0xA5] = op(Lda, Zp0, 3);
    t[0xA6] = op(Ldx, Zp0, 3);
    t[0xA7] = op(Lax, Zp0, 3);
    t[0xA8] = op(Tay, Imp, 2);
    t[0xA9] = op(Lda, Imm, 2);
    t[0xAA] = op(Tax, Imp, 2);
    t[0xAC] = op(Ldy, Abs, 4);
    t[0xAD] = op(Lda, Abs, 4);
    t[0xAE] = op(Ldx, Abs, 4);
    t[0xAF] = op(Lax, Abs, 4);

    t[0xB0] = op(Bcs, Rel, 2);
    t[0xB1] = op(Lda, Izy, 5);
    t[0xB3] = op(Lax, Izy, 5);
    t[0xB4] = op(Ldy, Zpx, 4);
    t[0xB5] = op(Lda, Zpx, 4);
    t[0xB6] = op(Ldx, Zpy, 4);
    t[0xB7] = op(Lax, Zpy, 4);
    t[0xB8] = op(Clv, Imp, 2);
    t[0xB9] = op(Lda, Aby, 4);
    t[0xBA] = op(Tsx, Imp, 2);
    t[0xBC] = op(Ldy, Abx, 4);
    t[0xBD] = op(Lda, Abx, 4);
    t[0xBE] = op(Ldx, Aby, 4);
    t[0xBF] = op(Lax, Aby, 4);

    t[0xC0] = op(Cpy, Imm, 2);
    t[0xC1] = op(Cmp, Izx, 6);
    t[0xC2] = op(Nop, Imm, 2);
    t[0xC3] = op(Dcp, Izx, 8);
    t[0xC4] = op(Cpy, Zp0, 3);
    t[0xC5] = op(Cmp, Zp0, 3);
    t[0xC6] = op(Dec, Zp0, 5);
    t[0xC7] = op(Dcp, Zp0, 5);
    t[0xC8] = op(Iny, Imp, 2);
    t[0xC9] = op(Cmp, Imm, 2);
    t[0xCA] = op(Dex, Imp, 2);
    t[0xCC] = op(Cpy, Abs, 4);
    t[0xCD] = op(Cmp, Abs, 4);
    t[0xCE] = op(Dec, Abs, 6);
    t[0xCF] = op(Dcp, Abs, 6);

    t[0xD0] = op(Bne, Rel, 2);
    t[0xD1] = op(Cmp, Izy, 5);
    t[0xD3] = op(Dcp, Izy, 8);
    t[0xD4] = op(Nop, Zpx, 4);
    t[0xD5] = op(Cmp, Zpx, 4);
    t[0xD6] = op(Dec, Zpx, 6);
    t[0xD7] = op(Dcp, Zpx, 6);
    t[0xD8] = op(Cld, Imp, 2);
    t[0xD9] = op(Cmp, Aby, 4);
    t[0xDA] = op(Nop, Imp, 2);
    t[0xDB] = op(Dcp, Aby, 7);
    t[0xDC] = op(Nop, Abx, 4);
    t[0xDD] = op(Cmp, Abx, 4);
    t[0xDE] = op(Dec, Abx, 7);
    t[0xDF] = op(Dcp, Abx, 7);

    t[0xE0] = op(Cpx, Imm, 2);
    t[0xE1] = op(Sbc, Izx, 6);
    t[0xE2] = op(Nop, Imm, 2);
    t[0xE3] = op(Isc, Izx, 8);
    t[0xE4] = op(Cpx, Zp0, 3);
    t[0xE5] = op(Sbc, Zp0, 3);
    t[0xE6] = op(Inc, Zp0, 5);
    t[0xE7] = op(Isc, Zp0, 5);
    t[0xE8] = op(Inx, Imp, 2);
    t[0xE9] = op(Sbc, Imm, 2);
    t[0xEA] = op(Nop, Imp, 2);
    t[0xEB] = op(Sbc, Imm, 2);
    t[0xEC] = op(Cpx, Abs, 4);
    t[0xED] = op(Sbc, Abs, 4);
    t[0xEE] = op(Inc, Abs, 6);
    t[0xEF] = op(Isc, Abs, 6);

    t[0xF0] = op(Beq, Rel, 2);
    t[0xF1] = op(Sbc, Izy, 5);
    t[0xF3] = op(Isc, Izy, 8);
    t[0xF4] = op(Nop, Zpx, 4);
    t[0xF5] = op(Sbc, Zpx, 4);
    t[0xF6] = op(Inc, Zpx, 6);
    t[0xF7] = op(Isc, Zpx, 6);
    t[0xF8] = op(Sed, Imp, 2);
    t[0xF9] = op(Sbc, Aby, 4);
    t[0xFA] = op(Nop, Imp, 2);
    t[0xFB] = op(Isc, Aby, 7);
    t[0xFC] = op(Nop, Abx, 4);
    t[0xFD] = op(Sbc, Abx, 4);
    t[0xFE] = op(Inc, Abx, 7);
    t[0xFF] = op(Isc, Abx, 7);

    // Shift/rotate + logical/arithmetic combos (SLO/RLA/SRE/RRA).
    t[0x03] = op(Slo, Izx, 8);
    t[0x07] = op(Slo, Zp0, 5);
    t[0x0F] = op(Slo, Abs, 6);
    t[0x13] = op(Slo, Izy, 8);
    t[0x17] = op(Slo, Zpx, 6);
    t[0x1B] = op(Slo, Aby, 7);
    t[0x1F] = op(Slo, Abx, 7);

    t[0x23] = op(Rla, Izx, 8);
    t[0x27] = op(Rla, Zp0, 5);
    t[0x2F] = op(Rla, Abs, 6);
    t[0x33] = op(Rla, Izy, 8);
    t[0x37] = op(Rla, Zpx, 6);
    t[0x3B] = op(Rla, Aby, 7);
    t[0x3F] = op(Rla, Abx, 7);

    t[0x43] = op(Sre, Izx, 8);
    t[0x47] = op(Sre, Zp0, 5);
    t[0x4F] = op(Sre, Abs, 6);
    t[0x53] = op(Sre, Izy, 8);
    t[0x57] = op(Sre, Zpx, 6);
    t[0x5B] = op(Sre, Aby, 7);
    t[0x5F] = op(Sre, Abx, 7);

    t[0x63] = op(Rra, Izx, 8);
    t[0x67] = op(Rra, Zp0, 5);
    t[0x6F] = op(Rra, Abs, 6);
    t[0x73] = op(Rra, Izy, 8);
    t[0x77] = op(Rra, Zpx, 6);
    t[0x7B] = op(Rra, Aby, 7);
    t[0x7F] = op(Rra, Abx, 7);

    // Required JAM set (everything else left by the initial fill).
    t[0x02] = JAM_ENTRY;
    t[0x12] = JAM_ENTRY;
    t[0x22] = JAM_ENTRY;
    t[0x32] = JAM_ENTRY;
    t[0x42] = JAM_ENTRY;
    t[0x52] = JAM_ENTRY;
    t[0x62] = JAM_ENTRY;
    t[0x72] = JAM_ENTRY;
    t[0x92] = JAM_ENTRY;
    t[0xB2] = JAM_ENTRY;
    t[0xD2] = JAM_ENTRY;
    t[0xF2] = JAM_ENTRY;

    t
}
