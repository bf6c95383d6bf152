use super::*;
use crate::draw::{BatchKind, DrawingStyle, MoveOutcome};
use crate::render::RecordingRenderer;
use crate::store::ItemStore;
use glam::Vec2;

struct Harness {
    router: InputRouter,
    store: ItemStore,
    renderer: RecordingRenderer,
    style: DrawingStyle,
}

impl Harness {
    fn new(capacity: usize) -> Self {
        let style = DrawingStyle {
            width: 2.0,
            max_items: capacity,
            ..DrawingStyle::default()
        };
        Self {
            router: InputRouter::new(),
            store: ItemStore::new(capacity),
            renderer: RecordingRenderer::new(),
            style,
        }
    }

    fn step(&mut self, channel: Channel, x: f32, y: f32) -> ChannelEvent {
        self.router.update(
            channel,
            Vec2::new(x, y),
            &self.style,
            &mut self.store,
            &mut self.renderer,
        )
    }

    /// Draws a finished horizontal stroke from `x0` to `x1` at height `y`.
    fn stroke(&mut self, channel: Channel, x0: f32, x1: f32, y: f32) {
        self.router.set_mode(channel, InputMode::Draw);
        self.step(channel, x0, y);
        self.step(channel, x1, y);
        self.router.set_mode(channel, InputMode::None);
        self.step(channel, x1, y);
    }
}

#[test]
fn press_starts_stroke_and_release_finishes_it() {
    let mut h = Harness::new(8);
    h.router.set_mode(Channel::Primary, InputMode::Draw);
    assert_eq!(h.step(Channel::Primary, 0.0, 0.0), ChannelEvent::Started);
    let key = h.store.active(Channel::Primary).expect("active stroke");

    assert_eq!(
        h.step(Channel::Primary, 20.0, 0.0),
        ChannelEvent::Drawing(MoveOutcome::Appended)
    );
    assert_eq!(
        h.step(Channel::Primary, 21.0, 0.0),
        ChannelEvent::Drawing(MoveOutcome::Skipped)
    );

    h.router.set_mode(Channel::Primary, InputMode::None);
    assert_eq!(h.step(Channel::Primary, 40.0, 0.0), ChannelEvent::Finished);
    assert!(h.store.active(Channel::Primary).is_none());

    let item = h.store.get(key).expect("stroke stays in the store");
    assert!(!item.is_drawing());
    assert_eq!(item.points().len(), 3);
}

#[test]
fn tap_produces_dot() {
    let mut h = Harness::new(8);
    h.router.set_mode(Channel::Primary, InputMode::Draw);
    h.step(Channel::Primary, 5.0, 5.0);
    let key = h.store.active(Channel::Primary).unwrap();
    h.router.set_mode(Channel::Primary, InputMode::None);
    h.step(Channel::Primary, 5.0, 5.0);

    let handle = h.store.get(key).unwrap().handle();
    assert_eq!(h.renderer.batch_kinds(handle), vec![BatchKind::Dot]);
}

#[test]
fn channels_draw_independently() {
    let mut h = Harness::new(8);
    h.router.set_mode(Channel::Primary, InputMode::Draw);
    h.router.set_mode(Channel::Secondary, InputMode::Draw);
    h.step(Channel::Primary, 0.0, 0.0);
    h.step(Channel::Secondary, 0.0, 100.0);
    h.step(Channel::Primary, 50.0, 0.0);
    h.step(Channel::Secondary, 50.0, 100.0);

    let primary = h.store.active(Channel::Primary).unwrap();
    let secondary = h.store.active(Channel::Secondary).unwrap();
    assert_ne!(primary, secondary);
    assert_eq!(h.store.len(), 2);

    h.router.set_mode(Channel::Secondary, InputMode::None);
    h.step(Channel::Secondary, 60.0, 100.0);
    assert!(h.store.get(primary).unwrap().is_drawing());
    assert!(!h.store.get(secondary).unwrap().is_drawing());
}

#[test]
fn erase_sweep_kills_crossed_strokes() {
    let mut h = Harness::new(8);
    h.stroke(Channel::Primary, 0.0, 100.0, 0.0);
    h.stroke(Channel::Primary, 0.0, 100.0, 50.0);
    assert_eq!(h.store.len(), 2);

    h.router.set_mode(Channel::Secondary, InputMode::Erase);
    // First erase frame is a point test away from both strokes.
    assert_eq!(h.step(Channel::Secondary, 50.0, -30.0), ChannelEvent::Erased(0));
    // Second frame sweeps a segment across the lower stroke only.
    assert_eq!(h.step(Channel::Secondary, 50.0, 20.0), ChannelEvent::Erased(1));

    assert_eq!(h.store.sweep(0.0, 0.0, &mut h.renderer), 1);
    assert_eq!(h.store.len(), 1);
    let (_, survivor) = h.store.iter().next().unwrap();
    assert_eq!(survivor.points()[0].pos.y, 50.0);
}

#[test]
fn first_erase_frame_uses_point_radius() {
    let mut h = Harness::new(8);
    h.stroke(Channel::Primary, 0.0, 100.0, 0.0);
    h.router.set_mode(Channel::Primary, InputMode::Erase);
    assert_eq!(
        h.step(Channel::Primary, 50.0, ERASE_RADIUS + 1.0),
        ChannelEvent::Erased(1)
    );
}

#[test]
fn leaving_erase_forgets_last_position() {
    let mut h = Harness::new(8);
    h.router.set_mode(Channel::Primary, InputMode::Erase);
    h.step(Channel::Primary, 0.0, 0.0);
    assert_eq!(
        h.router.state(Channel::Primary).last_erase_pos,
        Some(Vec2::ZERO)
    );
    h.router.set_mode(Channel::Primary, InputMode::None);
    h.step(Channel::Primary, 0.0, 0.0);
    assert!(h.router.state(Channel::Primary).last_erase_pos.is_none());
}

#[test]
fn switching_from_draw_to_erase_finalizes_stroke() {
    let mut h = Harness::new(8);
    h.router.set_mode(Channel::Primary, InputMode::Draw);
    h.step(Channel::Primary, 0.0, 0.0);
    h.step(Channel::Primary, 40.0, 0.0);
    let key = h.store.active(Channel::Primary).unwrap();

    h.router.set_mode(Channel::Primary, InputMode::Erase);
    h.step(Channel::Primary, 500.0, 500.0);
    assert!(h.store.active(Channel::Primary).is_none());
    assert!(!h.store.get(key).unwrap().is_drawing());
}

#[test]
fn eviction_by_other_channel_clears_active_reference() {
    let mut h = Harness::new(1);
    h.router.set_mode(Channel::Primary, InputMode::Draw);
    h.step(Channel::Primary, 0.0, 0.0);
    let evicted = h.store.active(Channel::Primary).unwrap();

    h.router.set_mode(Channel::Secondary, InputMode::Draw);
    h.step(Channel::Secondary, 100.0, 100.0);
    assert!(h.store.active(Channel::Primary).is_none());
    assert!(h.store.get(evicted).is_none());

    // The primary channel simply starts over on its next frame.
    assert_eq!(h.step(Channel::Primary, 10.0, 0.0), ChannelEvent::Started);
}

#[test]
fn zero_capacity_never_draws() {
    let mut h = Harness::new(0);
    h.router.set_mode(Channel::Primary, InputMode::Draw);
    assert_eq!(h.step(Channel::Primary, 0.0, 0.0), ChannelEvent::Idle);
    assert_eq!(h.step(Channel::Primary, 50.0, 0.0), ChannelEvent::Idle);
    assert!(h.store.is_empty());
}

#[test]
fn reset_returns_channels_to_idle() {
    let mut h = Harness::new(4);
    h.router.set_mode(Channel::Primary, InputMode::Draw);
    h.router.set_mode(Channel::Secondary, InputMode::Erase);
    h.step(Channel::Secondary, 1.0, 1.0);
    h.router.reset();
    for channel in Channel::ALL {
        assert_eq!(*h.router.state(channel), ChannelState::default());
    }
}
