#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Sim(SimEvent),
    App(AppEvent),
}

/// Input that changes the state of the simulation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimEvent {
    /// Pointer press at a pixel position relative to the top left of the surface
    Click { px: i64, py: i64 },

    /// Stop or resume stepping
    TogglePause,

    /// Replace the grid with a random one
    Randomize,

    /// Shorten the step interval
    SpeedUp,

    /// Lengthen the step interval
    SlowDown,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppEvent {
    /// The terminal changed size
    Resize { cols: u16, rows: u16 },

    /// Exit the application
    Exit,
}
