//! Input handling and the per-channel drawing state machine.
//!
//! This module translates press/release signals from the host's input system
//! into drawing and erasing operations. Each control channel runs its own
//! state machine, so both channels can draw or erase in the same frame.

pub mod channel;
pub mod router;

// Re-export commonly used types at module level
pub use channel::{Channel, InputMode, NUM_CHANNELS};
pub use router::{ChannelEvent, ChannelState, ERASE_RADIUS, InputRouter};

#[cfg(test)]
mod tests;
