/*!
Error types for the emulator core.

`RomError` covers failures while parsing an iNES image (fatal at load time).
`BusError` covers unmapped CPU bus accesses surfaced through the checked
Bus accessors; the unchecked accessors used by the hot `clock()` path log
and substitute a default value instead of propagating a `Result`.
*/

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RomError {
    #[error("rom image too small to contain an iNES header")]
    TooSmall,

    #[error("invalid iNES header magic (expected \"NES\\x1A\")")]
    BadMagic,

    #[error("NES 2.0 headers are not supported")]
    UnsupportedNes20,

    #[error("rom image truncated: missing {0}-byte trainer")]
    TruncatedTrainer(usize),

    #[error("rom image truncated: missing {0} bytes of PRG ROM")]
    TruncatedPrg(usize),

    #[error("rom image truncated: missing {0} bytes of CHR ROM")]
    TruncatedChr(usize),

    #[error("unsupported mapper id {0}; only mapper 0 (NROM) is implemented")]
    UnsupportedMapper(u16),
}

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum BusError {
    #[error("unmapped CPU read at ${0:04X}")]
    UnmappedRead(u16),

    #[error("unmapped CPU write at ${0:04X}")]
    UnmappedWrite(u16),
}
