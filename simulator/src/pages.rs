//! Simulator pages.

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Page {
    /// The watchface itself.
    #[default]
    Watchface,

    /// Event log with the current service values.
    Log,
}

impl Page {
    /// Toggle to the other page.
    #[inline]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Watchface => Self::Log,
            Self::Log => Self::Watchface,
        }
    }
}
