//! Error types surfaced to hosts embedding this core.

use std::fmt;

/// Failures that can occur while loading a cartridge image or while running
/// the emulated machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GbError {
    /// The ROM image is too small to contain a header, or a header field
    /// names a configuration this core does not know how to emulate.
    BadRom(String),
    /// An opcode reached the dispatcher with no defined micro-op sequence.
    /// The SM83 instruction set has no illegal opcodes in the traditional
    /// sense (every byte decodes to something), so this indicates a bug in
    /// the decode tables rather than a malformed program.
    UndefinedOpcode(u8),
    /// An internal invariant was violated (e.g. a bus master read during a
    /// cycle phase that should never issue one). Reaching this is always a
    /// core bug.
    InternalError(String),
}

impl fmt::Display for GbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GbError::BadRom(s) => write!(f, "bad ROM: {s}"),
            GbError::UndefinedOpcode(op) => write!(f, "undefined opcode: ${op:02X}"),
            GbError::InternalError(s) => write!(f, "internal error: {s}"),
        }
    }
}

impl std::error::Error for GbError {}

pub type Result<T> = std::result::Result<T, GbError>;
