//! Capacity-bounded, oldest-first collection of strokes.
//!
//! Strokes live in a generational arena. A channel's active stroke is held as
//! an [`ItemKey`]; evicting or removing a stroke clears every active key that
//! pointed at it, and a stale key can never resolve to a different stroke
//! because the arena bumps the slot generation on removal.

use crate::draw::{Bounds, Item, Point};
use crate::input::{Channel, NUM_CHANNELS};
use crate::render::Renderer;
use log::debug;
use slotmap::SlotMap;
use std::collections::VecDeque;

slotmap::new_key_type! {
    /// Weak reference to a stroke in an [`ItemStore`].
    pub struct ItemKey;
}

/// Owns all strokes and the per-channel active references.
#[derive(Debug)]
pub struct ItemStore {
    items: SlotMap<ItemKey, Item>,
    /// Insertion order, oldest first
    order: VecDeque<ItemKey>,
    active: [Option<ItemKey>; NUM_CHANNELS],
    capacity: usize,
}

impl ItemStore {
    /// Creates an empty store holding at most `capacity` strokes.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: SlotMap::with_key(),
            order: VecDeque::new(),
            active: [None; NUM_CHANNELS],
            capacity,
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Changes the capacity. Shrinking below the current size clears the
    /// whole store instead of trimming it.
    pub fn set_capacity(&mut self, capacity: usize, renderer: &mut dyn Renderer) {
        if capacity == self.capacity {
            return;
        }
        if capacity < self.len() {
            debug!(
                "Capacity lowered to {} below {} strokes; clearing",
                capacity,
                self.len()
            );
            self.clear(renderer);
        }
        self.capacity = capacity;
    }

    /// Evicts oldest strokes until `count` more fit.
    ///
    /// When nothing fits (capacity 0) or `count` alone fills the capacity, the
    /// store is cleared.
    pub fn make_space_for(&mut self, count: usize, renderer: &mut dyn Renderer) {
        if self.capacity == 0 || count >= self.capacity {
            self.clear(renderer);
            return;
        }
        while self.len() + count > self.capacity {
            self.evict_oldest(renderer);
        }
    }

    /// Starts a new stroke at `start`, evicting the oldest one if needed.
    ///
    /// Returns `None` when the capacity is 0.
    pub fn add_item(&mut self, start: Point, renderer: &mut dyn Renderer) -> Option<ItemKey> {
        self.make_space_for(1, renderer);
        if self.capacity == 0 {
            return None;
        }
        let key = self.items.insert(Item::begin(start, renderer));
        self.order.push_back(key);
        Some(key)
    }

    /// Inserts finished strokes read from a file, oldest first.
    ///
    /// Empty point lists are skipped. Returns how many were inserted. Callers
    /// are expected to pass at most `capacity` lists; surplus would evict
    /// earlier entries of the same batch.
    pub fn insert_loaded(
        &mut self,
        strokes: Vec<Vec<Point>>,
        renderer: &mut dyn Renderer,
    ) -> usize {
        let strokes: Vec<Vec<Point>> = strokes.into_iter().filter(|p| !p.is_empty()).collect();
        if self.capacity == 0 || strokes.is_empty() {
            return 0;
        }
        self.make_space_for(strokes.len().min(self.capacity), renderer);
        let mut inserted = 0;
        for points in strokes {
            let Some(item) = Item::from_points(points, renderer) else {
                continue;
            };
            if self.len() >= self.capacity {
                self.evict_oldest(renderer);
            }
            let key = self.items.insert(item);
            self.order.push_back(key);
            inserted += 1;
        }
        inserted
    }

    pub fn get(&self, key: ItemKey) -> Option<&Item> {
        self.items.get(key)
    }

    pub fn get_mut(&mut self, key: ItemKey) -> Option<&mut Item> {
        self.items.get_mut(key)
    }

    pub fn contains(&self, key: ItemKey) -> bool {
        self.items.contains_key(key)
    }

    /// The channel's active stroke, if it still exists.
    pub fn active(&self, channel: Channel) -> Option<ItemKey> {
        self.active[channel.index()].filter(|key| self.items.contains_key(*key))
    }

    pub fn set_active(&mut self, channel: Channel, key: Option<ItemKey>) {
        self.active[channel.index()] = key;
    }

    /// Whether any channel holds `key` as its active stroke.
    pub fn is_active(&self, key: ItemKey) -> bool {
        self.active.contains(&Some(key))
    }

    /// Strokes in insertion order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = (ItemKey, &Item)> + '_ {
        self.order
            .iter()
            .filter_map(|&key| self.items.get(key).map(|item| (key, item)))
    }

    /// Marks every live stroke matching `hit` as killed. Returns how many were
    /// newly marked.
    pub fn kill_where(&mut self, mut hit: impl FnMut(&Item) -> bool) -> usize {
        let mut killed = 0;
        for item in self.items.values_mut() {
            if !item.is_killed() && hit(item) {
                item.kill();
                killed += 1;
            }
        }
        killed
    }

    /// Ages strokes and removes the dead ones. Called once per frame.
    ///
    /// Active strokes have their age reset; the rest age by `elapsed`. With a
    /// positive `fade_time`, strokes older than it are killed. Killed strokes
    /// are removed at the end. Returns how many were removed.
    pub fn sweep(&mut self, elapsed: f32, fade_time: f32, renderer: &mut dyn Renderer) -> usize {
        for &key in &self.order {
            let active = self.active.contains(&Some(key));
            let Some(item) = self.items.get_mut(key) else {
                continue;
            };
            if active {
                item.reset_age();
                continue;
            }
            item.add_age(elapsed);
            if fade_time > 0.0 && item.age() > fade_time {
                item.kill();
            }
        }

        let dead: Vec<ItemKey> = self
            .order
            .iter()
            .copied()
            .filter(|&key| self.items.get(key).is_none_or(Item::is_killed))
            .collect();
        for &key in &dead {
            self.remove(key, renderer);
        }
        if !dead.is_empty() {
            debug!("Removed {} strokes", dead.len());
        }
        dead.len()
    }

    /// Draws every live stroke whose bounds overlap `viewport`. Returns the
    /// number of draw calls issued.
    pub fn render(&self, viewport: &Bounds, renderer: &mut dyn Renderer) -> usize {
        let mut drawn = 0;
        for (_, item) in self.iter() {
            if item.is_killed() || item.quad_count() == 0 {
                continue;
            }
            if !item.bounds().overlaps(viewport) {
                continue;
            }
            item.draw(renderer);
            drawn += 1;
        }
        drawn
    }

    /// Releases every stroke and clears all active references.
    pub fn clear(&mut self, renderer: &mut dyn Renderer) {
        for (_, item) in self.items.drain() {
            item.release(renderer);
        }
        self.order.clear();
        self.active = [None; NUM_CHANNELS];
    }

    fn evict_oldest(&mut self, renderer: &mut dyn Renderer) {
        if let Some(key) = self.order.front().copied() {
            debug!("Evicting oldest stroke {:?}", key);
            self.remove(key, renderer);
        }
    }

    fn remove(&mut self, key: ItemKey, renderer: &mut dyn Renderer) {
        for slot in &mut self.active {
            if *slot == Some(key) {
                *slot = None;
            }
        }
        self.order.retain(|&k| k != key);
        if let Some(item) = self.items.remove(key) {
            item.release(renderer);
        }
    }
}
