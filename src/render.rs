//! Interface to the host's batched-geometry renderer.
//!
//! Each stroke owns one geometry handle. Tessellated batches are appended to
//! it as the stroke grows, the handle is drawn once per visible frame, and it
//! is released when the stroke leaves the store.

use crate::draw::geometry::{Batch, BatchKind};
use std::collections::HashMap;

/// Opaque id of a geometry resource owned by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GeometryHandle(u64);

impl GeometryHandle {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Operations the annotation engine needs from the host renderer.
pub trait Renderer {
    /// Allocates an empty geometry resource.
    fn create_geometry(&mut self) -> GeometryHandle;

    /// Appends a batch of quads to `handle`.
    fn append(&mut self, handle: GeometryHandle, batch: &Batch);

    /// Draws the first `quad_count` quads stored under `handle`.
    fn draw(&mut self, handle: GeometryHandle, quad_count: usize);

    /// Frees the resource. The handle must not be used afterwards.
    fn release(&mut self, handle: GeometryHandle);
}

/// In-memory renderer that records every call.
///
/// Used for headless runs (the CLI) and tests.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    next_id: u64,
    live: HashMap<GeometryHandle, Vec<Batch>>,
    draw_calls: Vec<(GeometryHandle, usize)>,
    released: usize,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Batches appended to a live handle, in order.
    pub fn batches(&self, handle: GeometryHandle) -> &[Batch] {
        self.live.get(&handle).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Kinds of the batches appended to `handle`, in order.
    pub fn batch_kinds(&self, handle: GeometryHandle) -> Vec<BatchKind> {
        self.batches(handle).iter().map(|b| b.kind).collect()
    }

    pub fn is_live(&self, handle: GeometryHandle) -> bool {
        self.live.contains_key(&handle)
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn released_count(&self) -> usize {
        self.released
    }

    /// Drains the draw calls issued since the last call.
    pub fn take_draw_calls(&mut self) -> Vec<(GeometryHandle, usize)> {
        std::mem::take(&mut self.draw_calls)
    }
}

impl Renderer for RecordingRenderer {
    fn create_geometry(&mut self) -> GeometryHandle {
        let handle = GeometryHandle::new(self.next_id);
        self.next_id += 1;
        self.live.insert(handle, Vec::new());
        handle
    }

    fn append(&mut self, handle: GeometryHandle, batch: &Batch) {
        match self.live.get_mut(&handle) {
            Some(batches) => batches.push(batch.clone()),
            None => log::warn!("append to released geometry {:?}", handle),
        }
    }

    fn draw(&mut self, handle: GeometryHandle, quad_count: usize) {
        self.draw_calls.push((handle, quad_count));
    }

    fn release(&mut self, handle: GeometryHandle) {
        if self.live.remove(&handle).is_some() {
            self.released += 1;
        }
    }
}
