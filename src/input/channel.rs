//! Control channels and their input modes.

/// Number of independent control channels the host client drives.
pub const NUM_CHANNELS: usize = 2;

/// One of the host's simultaneous control streams.
///
/// The primary channel is the player's own character; the secondary one is
/// the extra ("dummy") character that can draw and erase independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Channel {
    /// Main controlled character
    #[default]
    Primary,
    /// Secondary (dummy) character
    Secondary,
}

impl Channel {
    /// All channels in index order.
    pub const ALL: [Channel; NUM_CHANNELS] = [Channel::Primary, Channel::Secondary];

    /// Position of this channel in per-channel arrays.
    pub fn index(self) -> usize {
        match self {
            Self::Primary => 0,
            Self::Secondary => 1,
        }
    }
}

/// What a channel is doing this frame, as set by press/release signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Idle
    #[default]
    None,
    /// Drawing a stroke at the channel's position
    Draw,
    /// Erasing strokes under the channel's path
    Erase,
}
