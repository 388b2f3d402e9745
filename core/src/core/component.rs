use crate::core::bus::BusMaster;

/// A clock-driven unit that does not itself need bus access (e.g. a timer
/// or a frame sequencer driven purely by ticks from elsewhere).
pub trait Component {
    /// Advance by one of this component's own clock edges. Returns `true`
    /// on whatever boundary the component defines as significant to its
    /// caller (e.g. "a tick landed on a falling edge").
    fn tick(&mut self) -> bool;

    /// Number of host clock edges per one call to `tick`. 1 for components
    /// clocked every edge; GB components are T-cycle clocked, so this is
    /// almost always 1 here and division into M-cycles happens in callers.
    fn clock_divider(&self) -> u32 {
        1
    }
}

/// A clock-driven unit that also masters the bus (reads/writes memory).
pub trait BusMasterComponent {
    type Bus: ?Sized;

    /// Advance by one tick, performing any bus access this cycle calls for.
    /// Returns `true` at an instruction/operation boundary.
    fn tick_with_bus(&mut self, bus: &mut Self::Bus, master: BusMaster) -> bool;
}
