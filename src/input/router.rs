//! Per-channel draw/erase state machine.

use super::channel::{Channel, InputMode, NUM_CHANNELS};
use crate::draw::{DrawingStyle, MoveOutcome, hit};
use crate::render::Renderer;
use crate::store::ItemStore;
use glam::Vec2;
use log::debug;

/// Radius of the eraser on the first frame of an erase gesture.
pub const ERASE_RADIUS: f32 = 10.0;

/// Mode and erase trail of one channel.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChannelState {
    pub mode: InputMode,
    /// Position seen on the previous erase frame
    pub last_erase_pos: Option<Vec2>,
}

/// What a channel did during one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelEvent {
    Idle,
    /// A new stroke was started
    Started,
    /// The active stroke received a sample (or skipped it as jitter)
    Drawing(MoveOutcome),
    /// The active stroke was finalized
    Finished,
    /// This many strokes were marked for removal
    Erased(usize),
}

/// Translates press/release state into store operations, per channel.
#[derive(Debug, Default)]
pub struct InputRouter {
    channels: [ChannelState; NUM_CHANNELS],
}

impl InputRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self, channel: Channel) -> &ChannelState {
        &self.channels[channel.index()]
    }

    pub fn mode(&self, channel: Channel) -> InputMode {
        self.channels[channel.index()].mode
    }

    /// Sets the mode from an external press/release signal. The transition
    /// takes effect on the channel's next [`update`](Self::update).
    pub fn set_mode(&mut self, channel: Channel, mode: InputMode) {
        self.channels[channel.index()].mode = mode;
    }

    /// Returns every channel to idle. Active strokes are left to the store.
    pub fn reset(&mut self) {
        self.channels = [ChannelState::default(); NUM_CHANNELS];
    }

    /// Advances one channel by a frame, with the channel at `pos`.
    pub fn update(
        &mut self,
        channel: Channel,
        pos: Vec2,
        style: &DrawingStyle,
        store: &mut ItemStore,
        renderer: &mut dyn Renderer,
    ) -> ChannelEvent {
        let state = &mut self.channels[channel.index()];
        match state.mode {
            InputMode::Draw => {
                state.last_erase_pos = None;
                Self::draw(channel, style, pos, store, renderer)
            }
            InputMode::Erase => {
                let finished = Self::finish(channel, style, pos, store, renderer);
                let erased = match state.last_erase_pos {
                    Some(last) => {
                        store.kill_where(|item| hit::line_intersect(item.points(), last, pos))
                    }
                    None => store
                        .kill_where(|item| hit::point_intersect(item.points(), pos, ERASE_RADIUS)),
                };
                state.last_erase_pos = Some(pos);
                if erased > 0 {
                    debug!("{:?} erased {} strokes", channel, erased);
                    ChannelEvent::Erased(erased)
                } else if finished {
                    ChannelEvent::Finished
                } else {
                    ChannelEvent::Erased(0)
                }
            }
            InputMode::None => {
                state.last_erase_pos = None;
                if Self::finish(channel, style, pos, store, renderer) {
                    ChannelEvent::Finished
                } else {
                    ChannelEvent::Idle
                }
            }
        }
    }

    fn draw(
        channel: Channel,
        style: &DrawingStyle,
        pos: Vec2,
        store: &mut ItemStore,
        renderer: &mut dyn Renderer,
    ) -> ChannelEvent {
        let sample = style.sample(pos);
        let Some(key) = store.active(channel) else {
            return match store.add_item(sample, renderer) {
                Some(key) => {
                    store.set_active(channel, Some(key));
                    ChannelEvent::Started
                }
                None => ChannelEvent::Idle,
            };
        };
        let Some(item) = store.get_mut(key) else {
            return ChannelEvent::Idle;
        };
        let outcome = item.move_to(sample, renderer);
        if matches!(outcome, MoveOutcome::Finalized | MoveOutcome::Ignored) {
            // Keep drawing as a fresh stroke from the next frame on.
            store.set_active(channel, None);
        }
        ChannelEvent::Drawing(outcome)
    }

    /// Pen-up for the channel's active stroke, if any. Returns whether a stroke
    /// was finalized.
    fn finish(
        channel: Channel,
        style: &DrawingStyle,
        pos: Vec2,
        store: &mut ItemStore,
        renderer: &mut dyn Renderer,
    ) -> bool {
        let Some(key) = store.active(channel) else {
            return false;
        };
        store.set_active(channel, None);
        match store.get_mut(key) {
            Some(item) if item.is_drawing() => {
                item.pen_up(style.sample(pos), renderer);
                true
            }
            _ => false,
        }
    }
}
