//! Shared scaffolding for running the SM83 core against the SingleStepTests
//! JSON vectors: a flat-memory [`TracingBus`] and the JSON test-case shape.

use dmg_core::core::bus::InterruptState;
use dmg_core::core::{Bus, BusMaster};
use serde::{Deserialize, Serialize};

/// A flat 64 KiB memory with no peripherals and no interrupts — enough bus
/// to single-step one instruction in isolation.
pub struct TracingBus {
    pub memory: [u8; 0x10000],
}

impl TracingBus {
    pub fn new() -> Self {
        Self { memory: [0; 0x10000] }
    }
}

impl Default for TracingBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for TracingBus {
    type Address = u16;
    type Data = u8;

    fn read(&mut self, _master: BusMaster, addr: u16) -> u8 {
        self.memory[addr as usize]
    }

    fn write(&mut self, _master: BusMaster, addr: u16, data: u8) {
        self.memory[addr as usize] = data;
    }

    fn is_halted_for(&self, _master: BusMaster) -> bool {
        false
    }

    fn check_interrupts(&self, _target: BusMaster) -> InterruptState {
        InterruptState::default()
    }
}

/// One entry from a SingleStepTests `sm83` JSON vector file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sm83TestCase {
    pub name: String,
    pub initial: Sm83CpuState,
    #[serde(rename = "final")]
    pub final_state: Sm83CpuState,
    pub cycles: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sm83CpuState {
    pub pc: u16,
    pub sp: u16,
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub f: u8,
    pub h: u8,
    pub l: u8,
    pub ime: u8,
    pub ram: Vec<(u16, u8)>,
}
