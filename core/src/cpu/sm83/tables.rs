//! Micro-op vocabulary shared by the per-cycle dispatcher in [`super`].
//!
//! Each M-cycle of an SM83 instruction is described, conceptually, by up to
//! five independent decisions: what drives the address bus, what happens to
//! the data bus, whether the 16-bit incrementer/decrementer (IDU) is used,
//! whether the ALU combines two operands this cycle, and any other bookkeeping
//! (flag latch, IME edge, prefix handling). These correspond to the five
//! enums below. The dispatcher does not consult a declarative 512-entry table
//! built from them (SM83 does not have a build step to generate one from);
//! instead each instruction group implements its cycles directly and tags
//! the interesting ones with these enums for documentation and for the few
//! helpers (`apply_idu`, `apply_alu`) that are genuinely shared logic.

/// What is driving the address bus this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AddrSelector {
    Pc,
    Sp,
    Hl,
    Bc,
    De,
    Hram(u8),
    Immediate16,
    None,
}

/// What the data bus is doing this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataOp {
    Read,
    Write,
    None,
}

/// Whether/how the 16-bit incrementer-decrementer is used this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IduOp {
    Inc,
    Dec,
    None,
}

/// Whether the ALU is combining operands into the flags/accumulator this cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Adc,
    Sub,
    Sbc,
    And,
    Xor,
    Or,
    Cp,
    Inc,
    Dec,
    Daa,
    Cpl,
    Scf,
    Ccf,
    None,
}

/// Catch-all bookkeeping that doesn't fit the other four categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MiscOp {
    SetImePending,
    ClearIme,
    EnterHalt,
    EnterStop,
    LatchPrefixCb,
    None,
}

/// Number of M-cycles each primary opcode takes, ignoring the extra cycle
/// taken by conditional branches (JR/JP/CALL/RET) when the condition is
/// true — the dispatcher adds that cycle dynamically.
pub const BASE_CYCLES: [u8; 256] = [
    1, 3, 2, 2, 1, 1, 2, 1, 5, 2, 2, 2, 1, 1, 2, 1, // 0x0_
    1, 3, 2, 2, 1, 1, 2, 1, 3, 2, 2, 2, 1, 1, 2, 1, // 0x1_
    2, 3, 2, 2, 1, 1, 2, 1, 2, 2, 2, 2, 1, 1, 2, 1, // 0x2_
    2, 3, 2, 2, 3, 3, 3, 1, 2, 2, 2, 2, 1, 1, 2, 1, // 0x3_
    1, 1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, 1, 2, 1, // 0x4_
    1, 1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, 1, 2, 1, // 0x5_
    1, 1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, 1, 2, 1, // 0x6_
    2, 2, 2, 2, 2, 2, 1, 2, 1, 1, 1, 1, 1, 1, 2, 1, // 0x7_
    1, 1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, 1, 2, 1, // 0x8_
    1, 1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, 1, 2, 1, // 0x9_
    1, 1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, 1, 2, 1, // 0xA_
    1, 1, 1, 1, 1, 1, 2, 1, 1, 1, 1, 1, 1, 1, 2, 1, // 0xB_
    2, 3, 3, 4, 3, 4, 2, 4, 2, 4, 3, 2, 3, 6, 2, 4, // 0xC_
    2, 3, 3, 0, 3, 4, 2, 4, 2, 4, 3, 0, 3, 0, 2, 4, // 0xD_
    3, 3, 2, 0, 0, 4, 2, 4, 4, 1, 4, 0, 0, 0, 2, 4, // 0xE_
    3, 3, 2, 1, 0, 4, 2, 4, 3, 2, 4, 1, 0, 0, 2, 4, // 0xF_
];

/// Every CB-prefixed opcode takes 2 M-cycles, except the `(HL)` variants of
/// RES/SET/BIT-family ops at column 6/E, which take 3 (BIT (HL) takes 3;
/// RES/SET (HL) take 4, handled as a special case in the dispatcher).
pub const BASE_CYCLES_CB: [u8; 256] = {
    let mut t = [2u8; 256];
    let mut op = 0usize;
    while op < 256 {
        if op & 0x07 == 0x06 {
            t[op] = if (op >> 6) == 1 { 3 } else { 4 };
        }
        op += 1;
    }
    t
};
