//! The DIV/TIMA/TMA/TAC timer block.
//!
//! Modeled as a free-running 16-bit counter (DIV is just its upper byte);
//! TIMA increments on a falling edge of a TAC-selected counter bit, and a
//! TIMA overflow reloads TMA one T-cycle later through a one-bit delay
//! line, grounded in the reference implementation's falling-edge /
//! delay-line mechanism (timer.go's `StepT`), translated from its
//! pre-shifted 8-bit counter encoding into the spec's literal 16-bit
//! counter with tap bits 9/3/5/7.

use log::trace;

const TAP_BITS: [u8; 4] = [9, 3, 5, 7];

pub struct Timer {
    counter: u16,
    tima: u8,
    tma: u8,
    tac: u8,

    reload_delay: u8, // one-bit delay line: bit 0 set means TIMA reloads next tick
    pending_div_reset: bool,

    pub irq: bool,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    pub fn new() -> Self {
        Self {
            counter: 0xABCC, // DIV = 0xAB after boot ROM on DMG
            tima: 0x00,
            tma: 0x00,
            tac: 0xF8,
            reload_delay: 0,
            pending_div_reset: false,
            irq: false,
        }
    }

    pub fn div(&self) -> u8 {
        (self.counter >> 8) as u8
    }

    pub fn tima(&self) -> u8 {
        self.tima
    }

    pub fn tma(&self) -> u8 {
        self.tma
    }

    pub fn tac(&self) -> u8 {
        0xF8 | (self.tac & 0x07)
    }

    pub fn write_div(&mut self) {
        self.pending_div_reset = true;
    }

    pub fn write_tima(&mut self, v: u8) {
        // A write lands on the same tick the overflow reload would have
        // happened cancels that reload (handled in step() via reload_delay).
        self.tima = v;
        self.reload_delay = 0;
    }

    pub fn write_tma(&mut self, v: u8) {
        self.tma = v;
    }

    pub fn write_tac(&mut self, v: u8) {
        self.tac = v & 0x07;
    }

    fn tap_bit_set(&self) -> bool {
        let bit = TAP_BITS[(self.tac & 3) as usize];
        self.tac & 0x04 != 0 && (self.counter >> bit) & 1 != 0
    }

    /// Advance by one T-cycle.
    pub fn step(&mut self) {
        self.irq = false;

        // A reload delayed from the previous tick fires before anything
        // else happens this tick.
        if self.reload_delay & 1 != 0 {
            self.tima = self.tma;
            self.irq = true;
            trace!("timer: TIMA overflow reload, IRQ");
        }
        self.reload_delay >>= 1;

        let before = self.tap_bit_set();
        if self.pending_div_reset {
            self.counter = 0;
            self.pending_div_reset = false;
        } else {
            self.counter = self.counter.wrapping_add(1);
        }
        let after = self.tap_bit_set();

        if before && !after {
            let (result, overflow) = self.tima.overflowing_add(1);
            self.tima = result;
            if overflow {
                self.reload_delay |= 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tima_increments_on_tap_bit_falling_edge() {
        let mut t = Timer::new();
        t.write_tac(0x05); // enabled, select = 01 -> tap bit 3 (every 16 T-cycles)
        let start = t.tima();
        for _ in 0..16 {
            t.step();
        }
        assert_eq!(t.tima(), start + 1);
    }

    #[test]
    fn tima_overflow_reloads_from_tma_one_cycle_later_and_raises_irq() {
        let mut t = Timer::new();
        t.write_tac(0x05);
        t.write_tma(0x42);
        t.tima = 0xFF;
        // align counter so the next tap-bit falling edge lands cleanly
        t.counter &= !0xF;
        for _ in 0..16 {
            t.step();
        }
        assert_eq!(t.tima(), 0x00);
        assert!(!t.irq);
        t.step();
        assert_eq!(t.tima(), 0x42);
        assert!(t.irq);
    }

    #[test]
    fn div_write_resets_counter_and_can_cause_spurious_tima_increment() {
        let mut t = Timer::new();
        t.write_tac(0x04); // select 00 -> tap bit 9
        t.counter = 1 << 9; // tap bit currently set
        t.write_div();
        t.step();
        // falling edge triggered by the reset-to-zero transition
        assert_eq!(t.tima(), 0x01);
        assert_eq!(t.div(), 0);
    }
}
