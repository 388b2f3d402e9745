mod alu;
mod bit;
mod branch;
mod load_store;
mod stack;

pub mod tables;

use crate::core::{
    Bus, BusMaster,
    bus::InterruptState,
    component::{BusMasterComponent, Component},
};
use crate::cpu::{
    Cpu,
    state::{CpuStateTrait, Sm83State},
};

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flag {
    Z = 0x80,
    N = 0x40,
    H = 0x20,
    C = 0x10,
}

/// 8-bit register index in instruction-encoding order: the `(HL)` slot
/// (index 6) is never read through `r8`/`r8_set` — every dispatch site that
/// decodes a register field checks for 6 and substitutes a memory access.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum R8 {
    B = 0,
    C = 1,
    D = 2,
    E = 3,
    H = 4,
    L = 5,
    A = 7,
}

impl R8 {
    pub fn from_bits(bits: u8) -> Option<R8> {
        match bits & 7 {
            0 => Some(R8::B),
            1 => Some(R8::C),
            2 => Some(R8::D),
            3 => Some(R8::E),
            4 => Some(R8::H),
            5 => Some(R8::L),
            7 => Some(R8::A),
            _ => None, // 6 == (HL), handled by caller
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum R16 {
    Bc,
    De,
    Hl,
    Sp,
}

pub(crate) type GbBus = dyn Bus<Address = u16, Data = u8>;

#[derive(Clone, Debug)]
pub(crate) enum ExecState {
    /// About to read the opcode at PC.
    Fetch,
    /// Mid-instruction: (opcode, next cycle index to run).
    Execute(u8, u8),
    /// Mid-CB-prefixed instruction: (cb opcode, next cycle index).
    ExecuteCb(u8, u8),
    /// Halted by HALT; woken by any enabled+requested interrupt regardless
    /// of IME (the halt bug that can duplicate the following opcode when
    /// IME is clear is explicitly not modeled).
    Halted,
    /// Stopped by STOP; frozen until a joypad line transition, reported by
    /// the bus via `is_halted_for`.
    Stopped,
    /// $CB was just fetched; the next tick reads the real CB opcode.
    PrefixCb,
    /// Interrupt dispatch sequence, cycle index 0-4.
    Interrupt(u8),
}

pub struct Sm83 {
    pub a: u8,
    pub f: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,

    pub ime: bool,
    pub(crate) ime_pending: bool,

    pub(crate) state: ExecState,
    pub(crate) z: u8, // latched low byte of a 16-bit operand being assembled
    pub(crate) w: u8, // latched high byte
    pub(crate) int_vector: u8,
}

impl Default for Sm83 {
    fn default() -> Self {
        Self::new()
    }
}

impl Sm83 {
    pub fn new() -> Self {
        Self {
            a: 0x01,
            f: 0xB0,
            b: 0x00,
            c: 0x13,
            d: 0x00,
            e: 0xD8,
            h: 0x01,
            l: 0x4D,
            sp: 0xFFFE,
            pc: 0x0100,
            ime: false,
            ime_pending: false,
            state: ExecState::Execute(0x00, 1), // post-boot-ROM state: mid-NOP, as if just fetched
            z: 0,
            w: 0,
            int_vector: 0,
        }
    }

    pub fn af(&self) -> u16 {
        ((self.a as u16) << 8) | (self.f & 0xF0) as u16
    }
    pub fn set_af(&mut self, v: u16) {
        self.a = (v >> 8) as u8;
        self.f = (v as u8) & 0xF0;
    }
    pub fn bc(&self) -> u16 {
        ((self.b as u16) << 8) | self.c as u16
    }
    pub fn set_bc(&mut self, v: u16) {
        self.b = (v >> 8) as u8;
        self.c = v as u8;
    }
    pub fn de(&self) -> u16 {
        ((self.d as u16) << 8) | self.e as u16
    }
    pub fn set_de(&mut self, v: u16) {
        self.d = (v >> 8) as u8;
        self.e = v as u8;
    }
    pub fn hl(&self) -> u16 {
        ((self.h as u16) << 8) | self.l as u16
    }
    pub fn set_hl(&mut self, v: u16) {
        self.h = (v >> 8) as u8;
        self.l = v as u8;
    }

    pub fn flag(&self, f: Flag) -> bool {
        self.f & (f as u8) != 0
    }
    pub fn set_flag(&mut self, f: Flag, v: bool) {
        if v {
            self.f |= f as u8;
        } else {
            self.f &= !(f as u8);
        }
        self.f &= 0xF0;
    }

    pub(crate) fn r8(&self, r: R8) -> u8 {
        match r {
            R8::B => self.b,
            R8::C => self.c,
            R8::D => self.d,
            R8::E => self.e,
            R8::H => self.h,
            R8::L => self.l,
            R8::A => self.a,
        }
    }

    pub(crate) fn r8_set(&mut self, r: R8, v: u8) {
        match r {
            R8::B => self.b = v,
            R8::C => self.c = v,
            R8::D => self.d = v,
            R8::E => self.e = v,
            R8::H => self.h = v,
            R8::L => self.l = v,
            R8::A => self.a = v,
        }
    }

    pub(crate) fn r16(&self, r: R16) -> u16 {
        match r {
            R16::Bc => self.bc(),
            R16::De => self.de(),
            R16::Hl => self.hl(),
            R16::Sp => self.sp,
        }
    }

    pub(crate) fn r16_set(&mut self, r: R16, v: u16) {
        match r {
            R16::Bc => self.set_bc(v),
            R16::De => self.set_de(v),
            R16::Hl => self.set_hl(v),
            R16::Sp => self.sp = v,
        }
    }

    fn fetch_opcode(&mut self, bus: &mut GbBus, master: BusMaster) -> u8 {
        let op = bus.read(master, self.pc);
        self.pc = self.pc.wrapping_add(1);
        op
    }

    /// One M-cycle of the shared fetch/dispatch loop. Returns true at an
    /// instruction boundary (the cycle right before the next Fetch starts).
    pub(crate) fn execute_cycle(&mut self, bus: &mut GbBus, master: BusMaster) {
        match self.state.clone() {
            ExecState::Fetch => {
                let ints = bus.check_interrupts(master);
                if self.ime && ints.has_pending() {
                    self.state = ExecState::Interrupt(0);
                    return;
                }
                let opcode = self.fetch_opcode(bus, master);
                // the IME-enable delay of EI takes effect only after the
                // instruction following EI has been fetched
                if self.ime_pending {
                    self.ime = true;
                    self.ime_pending = false;
                }
                if opcode == 0xCB {
                    self.state = ExecState::PrefixCb;
                } else if opcode == 0x76 {
                    self.state = ExecState::Halted;
                } else if opcode == 0x10 {
                    let _ = self.fetch_opcode(bus, master); // STOP's stray operand byte
                    self.state = ExecState::Stopped;
                } else if tables::BASE_CYCLES[opcode as usize] <= 1 {
                    // Single-M-cycle instructions have no further bus work;
                    // the opcode fetch above is their only cycle.
                    self.dispatch(opcode, 0, bus, master);
                } else {
                    // Multi-cycle instructions: cycle 0's bus transaction
                    // belongs to the next M-cycle, not this fetch.
                    self.state = ExecState::Execute(opcode, 0);
                }
            }
            ExecState::Execute(opcode, cycle) => {
                self.dispatch(opcode, cycle, bus, master);
            }
            ExecState::PrefixCb => {
                let cb = self.fetch_opcode(bus, master);
                self.dispatch_cb(cb, 0, bus, master);
            }
            ExecState::ExecuteCb(opcode, cycle) => {
                self.dispatch_cb(opcode, cycle, bus, master);
            }
            ExecState::Halted => {
                let ints = bus.check_interrupts(master);
                if ints.has_pending() {
                    self.state = ExecState::Fetch;
                }
            }
            ExecState::Stopped => {
                if !bus.is_halted_for(master) {
                    self.state = ExecState::Fetch;
                }
            }
            ExecState::Interrupt(cycle) => self.execute_interrupt(cycle, bus, master),
        }
    }

    /// Fixed 5 M-cycle interrupt acknowledge sequence: two internal cycles,
    /// two stack-push cycles (high then low byte of PC), then a final cycle
    /// that re-reads IE/IF (a push landing on $FFFF can retarget the vector)
    /// and jumps.
    fn execute_interrupt(&mut self, cycle: u8, bus: &mut GbBus, master: BusMaster) {
        match cycle {
            0 | 1 => {
                self.state = ExecState::Interrupt(cycle + 1);
            }
            2 => {
                self.sp = self.sp.wrapping_sub(1);
                bus.write(master, self.sp, (self.pc >> 8) as u8);
                self.state = ExecState::Interrupt(3);
            }
            3 => {
                // vector latched just before the low byte write, matching
                // the well-known "interrupt cancelled by IE write mid-push"
                // behavior: if nothing is pending any more we still push PC
                // and resume at $0000.
                let ints = bus.check_interrupts(master);
                self.int_vector = ints.highest_priority().unwrap_or(0);
                self.sp = self.sp.wrapping_sub(1);
                bus.write(master, self.sp, self.pc as u8);
                self.state = ExecState::Interrupt(4);
            }
            _ => {
                self.ime = false;
                let iflags = bus.read(master, 0xFF0F);
                bus.write(master, 0xFF0F, iflags & !(1 << self.int_vector));
                self.pc = 0x0040 + (self.int_vector as u16) * 8;
                self.state = ExecState::Fetch;
            }
        }
    }

    fn finish(&mut self) {
        self.state = ExecState::Fetch;
    }

    fn dispatch(&mut self, opcode: u8, cycle: u8, bus: &mut GbBus, master: BusMaster) {
        match opcode {
            0x00 => self.finish(), // NOP
            0x07 | 0x0F | 0x17 | 0x1F => alu::op_rotate_a(self, opcode),
            0x27 => alu::op_daa(self),
            0x2F => alu::op_cpl(self),
            0x37 => alu::op_scf(self),
            0x3F => alu::op_ccf(self),
            0xF3 => {
                self.ime = false;
                self.ime_pending = false;
                self.finish();
            }
            0xFB => {
                self.ime_pending = true;
                self.finish();
            }

            // 8-bit loads between registers
            op if (op & 0xC0) == 0x40 && op != 0x76 => {
                load_store::op_ld_r_r(self, op, cycle, bus, master)
            }
            // LD r,n
            op if (op & 0xC7) == 0x06 => load_store::op_ld_r_n(self, op, cycle, bus, master),
            // INC r8 / (HL)
            op if (op & 0xC7) == 0x04 => alu::op_inc_r8(self, op, cycle, bus, master),
            // DEC r8 / (HL)
            op if (op & 0xC7) == 0x05 => alu::op_dec_r8(self, op, cycle, bus, master),
            // ALU A,r
            op if (op & 0xC0) == 0x80 => alu::op_alu_a_r(self, op, cycle, bus, master),
            // ALU A,n
            0xC6 | 0xCE | 0xD6 | 0xDE | 0xE6 | 0xEE | 0xF6 | 0xFE => {
                alu::op_alu_a_n(self, opcode, cycle, bus, master)
            }

            // 16-bit loads / arithmetic
            op if (op & 0xCF) == 0x01 => load_store::op_ld_rr_nn(self, op, cycle, bus, master),
            op if (op & 0xCF) == 0x03 => load_store::op_inc_rr(self, op, cycle),
            op if (op & 0xCF) == 0x0B => load_store::op_dec_rr(self, op, cycle),
            op if (op & 0xCF) == 0x09 => alu::op_add_hl_rr(self, op, cycle),
            0x08 => load_store::op_ld_nn_sp(self, cycle, bus, master),
            0xE8 => alu::op_add_sp_e(self, cycle, bus, master),
            0xF8 => alu::op_ld_hl_sp_e(self, cycle, bus, master),
            0xF9 => load_store::op_ld_sp_hl(self, cycle),

            // Indirect loads through BC/DE/HL+/HL-/(nn)/(C)/(n)
            0x02 | 0x12 | 0x22 | 0x32 => load_store::op_ld_indirect_a(self, opcode, cycle, bus, master),
            0x0A | 0x1A | 0x2A | 0x3A => load_store::op_ld_a_indirect(self, opcode, cycle, bus, master),
            0xEA => load_store::op_ld_nn_a(self, cycle, bus, master),
            0xFA => load_store::op_ld_a_nn(self, cycle, bus, master),
            0xE0 => load_store::op_ldh_n_a(self, cycle, bus, master),
            0xF0 => load_store::op_ldh_a_n(self, cycle, bus, master),
            0xE2 => load_store::op_ldh_c_a(self, cycle, bus, master),
            0xF2 => load_store::op_ldh_a_c(self, cycle, bus, master),

            // Stack
            op if (op & 0xCF) == 0xC5 => stack::op_push(self, op, cycle, bus, master),
            op if (op & 0xCF) == 0xC1 => stack::op_pop(self, op, cycle, bus, master),

            // Branches
            0xC3 => branch::op_jp_nn(self, cycle, bus, master),
            0xE9 => branch::op_jp_hl(self),
            op if (op & 0xE7) == 0xC2 => branch::op_jp_cc_nn(self, op, cycle, bus, master),
            0x18 => branch::op_jr_e(self, cycle, bus, master),
            op if (op & 0xE7) == 0x20 => branch::op_jr_cc_e(self, op, cycle, bus, master),
            0xCD => branch::op_call_nn(self, cycle, bus, master),
            op if (op & 0xE7) == 0xC4 => branch::op_call_cc_nn(self, op, cycle, bus, master),
            0xC9 => branch::op_ret(self, cycle, bus, master),
            0xD9 => branch::op_reti(self, cycle, bus, master),
            op if (op & 0xE7) == 0xC0 => branch::op_ret_cc(self, op, cycle, bus, master),
            op if (op & 0xC7) == 0xC7 => stack::op_rst(self, op, cycle, bus, master),

            // 0xCB, 0xD3, 0xDB, 0xDD, 0xE3, 0xE4, 0xEB, 0xEC, 0xED, 0xF4,
            // 0xFC, 0xFD don't exist as valid opcodes on real silicon; in
            // practice they lock up the CPU. We treat them as permanently
            // stalling (matches the "undefined opcode hangs" decision).
            _ => {
                self.state = ExecState::Execute(opcode, cycle);
            }
        }
    }

    fn dispatch_cb(&mut self, opcode: u8, cycle: u8, bus: &mut GbBus, master: BusMaster) {
        bit::dispatch_cb(self, opcode, cycle, bus, master);
    }
}

impl Component for Sm83 {
    fn tick(&mut self) -> bool {
        false
    }
}

impl BusMasterComponent for Sm83 {
    type Bus = GbBus;

    fn tick_with_bus(&mut self, bus: &mut Self::Bus, master: BusMaster) -> bool {
        self.execute_cycle(bus, master);
        matches!(self.state, ExecState::Fetch)
    }
}

impl Cpu for Sm83 {
    fn reset(&mut self) {
        *self = Sm83::new();
    }

    fn signal_interrupt(&mut self, _int: InterruptState) {
        // Interrupts are polled from the bus at Fetch/Halted, not pushed.
    }

    fn is_sleeping(&self) -> bool {
        matches!(self.state, ExecState::Halted | ExecState::Stopped)
    }
}

impl CpuStateTrait for Sm83 {
    type Snapshot = Sm83State;

    fn snapshot(&self) -> Sm83State {
        Sm83State {
            a: self.a,
            f: self.f,
            b: self.b,
            c: self.c,
            d: self.d,
            e: self.e,
            h: self.h,
            l: self.l,
            sp: self.sp,
            pc: self.pc,
            ime: self.ime,
        }
    }
}
