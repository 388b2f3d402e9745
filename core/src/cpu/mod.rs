use crate::core::component::BusMasterComponent;

/// Generic CPU interface
pub trait Cpu: BusMasterComponent + CpuStateTrait {
    /// Reset to post-power-on state.
    fn reset(&mut self);

    /// Signal a specific interrupt line (implementation-defined).
    fn signal_interrupt(&mut self, int: crate::core::bus::InterruptState);

    /// Query if CPU is halted internally (HALT or STOP instruction).
    fn is_sleeping(&self) -> bool;
}

// Re-export state types
pub mod state;
pub use state::{CpuStateTrait, Sm83State};

pub mod sm83;
pub use sm83::Sm83;
