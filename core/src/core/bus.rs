/// Identifies who is accessing the bus (for CPU/DMA arbitration)
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BusMaster {
    Cpu,
    /// OAM DMA transfer, active while the transfer register is counting down.
    /// The CPU may only access HRAM while this master is driving the bus.
    Dma,
}

/// Generic bus interface supporting halt/arbitration (TSC, RDY, BUSREQ, etc.)
pub trait Bus {
    type Address: Copy + Into<u64>; // u16 for 8-bit, u32 for 16/32-bit
    type Data; // u8 or u16

    fn read(&mut self, master: BusMaster, addr: Self::Address) -> Self::Data;
    fn write(&mut self, master: BusMaster, addr: Self::Address, data: Self::Data);

    /// Check if the bus is halted for this master (TSC/RDY/BUSREQ).
    /// Returns true if the master must pause before the next bus cycle.
    fn is_halted_for(&self, master: BusMaster) -> bool;

    /// Generic interrupt query. CPUs pick what they need.
    fn check_interrupts(&self, target: BusMaster) -> InterruptState;
}

#[derive(Default, Clone, Copy, Debug)]
pub struct InterruptState {
    /// `IE & IF & 0x1F`, the interrupt sources simultaneously enabled and
    /// requested. Bit order: VBlank, LCD STAT, Timer, Serial, Joypad.
    pub pending: u8,
}

impl InterruptState {
    pub fn has_pending(&self) -> bool {
        self.pending != 0
    }

    /// Index (0-4) of the lowest-numbered pending interrupt, priority order
    /// being bit position: VBlank highest, Joypad lowest.
    pub fn highest_priority(&self) -> Option<u8> {
        if self.pending == 0 {
            None
        } else {
            Some(self.pending.trailing_zeros() as u8)
        }
    }
}
