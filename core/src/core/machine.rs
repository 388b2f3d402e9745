/// Describes a single input button that a machine accepts.
pub struct InputButton {
    /// Machine-defined button identifier, passed to `set_input()`.
    pub id: u8,
    /// Human-readable name for display/configuration (e.g., "P1 Left", "Coin").
    pub name: &'static str,
}

/// Host-facing interface for an emulated system.
///
/// The host (test harness, frontend, fuzzer) drives time forward one
/// T-cycle at a time and pulls frames/audio out as they complete; it never
/// needs to know about PPU modes, fetcher state, or mapper internals.
pub trait Machine {
    /// Native display resolution as (width, height) in pixels.
    fn display_size(&self) -> (u32, u32);

    /// Advance the whole machine by a single T-cycle (the base clock tick
    /// all components share). Returns `true` if this tick completed a
    /// frame (the PPU just left mode 1 for mode 2 at line 0).
    fn step(&mut self) -> bool;

    /// Run until a frame completes, then return. Equivalent to calling
    /// `step()` in a loop and stopping on the first `true`.
    fn run_frame(&mut self) {
        while !self.step() {}
    }

    /// Render the current video state into an RGB24 pixel buffer.
    ///
    /// The buffer must be at least `width * height * 3` bytes (from
    /// `display_size()`). Pixels are stored left-to-right, top-to-bottom,
    /// 3 bytes per pixel (R, G, B).
    fn render_frame(&self, buffer: &mut [u8]);

    /// Handle an input event. `button` is a machine-defined ID from
    /// `input_map()`. `pressed` is true for key-down, false for key-up.
    fn set_input(&mut self, button: u8, pressed: bool);

    /// Get the list of input buttons this machine accepts.
    fn input_map(&self) -> &[InputButton];

    /// Reset the machine to its initial power-on state.
    fn reset(&mut self);
}
