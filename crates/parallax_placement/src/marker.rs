//! Markers and the container they live in.
//!
//! The engine never owns scene objects directly. It talks to a
//! [`MarkerSink`]: clear it at run start, spawn each candidate, move it
//! while resolving conflicts, and despawn it if the candidate is abandoned.
//! [`MarkerCollection`] is the in-memory sink used by tests and the CLI; a
//! host application implements the trait over its own scene graph.

use parallax_shared::Vec3;
use serde::{Deserialize, Serialize};

/// A placed sphere.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// World-space center.
    pub position: Vec3,
    /// Base radius shared by every marker of a run.
    pub radius: f32,
    /// Per-marker scale applied to the base radius.
    pub scale: f32,
}

impl Marker {
    /// Creates a marker with unit scale.
    #[must_use]
    pub const fn new(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            radius,
            scale: 1.0,
        }
    }

    /// Returns this marker with a different scale.
    #[must_use]
    pub const fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Radius after scaling.
    #[inline]
    #[must_use]
    pub fn effective_radius(&self) -> f32 {
        self.radius * self.scale
    }
}

/// Handle to a marker inside a [`MarkerSink`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(usize);

/// Container the engine creates markers in.
pub trait MarkerSink {
    /// Removes every marker.
    fn clear(&mut self);

    /// Creates a marker and returns its handle.
    fn spawn(&mut self, marker: &Marker) -> MarkerId;

    /// Moves an existing marker.
    fn relocate(&mut self, id: MarkerId, position: Vec3);

    /// Removes a marker. Unknown handles are ignored.
    fn despawn(&mut self, id: MarkerId);
}

/// In-memory, named marker container.
///
/// Handles stay valid until the next [`MarkerSink::clear`]. Iteration
/// follows spawn order.
#[derive(Clone, Debug, Default)]
pub struct MarkerCollection {
    name: String,
    slots: Vec<Option<Marker>>,
    live: usize,
}

impl MarkerCollection {
    /// Creates an empty collection.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            slots: Vec::new(),
            live: 0,
        }
    }

    /// Name of the collection.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of live markers.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.live
    }

    /// True when no marker is live.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Looks up a live marker.
    #[must_use]
    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    /// Live markers in spawn order.
    pub fn iter(&self) -> impl Iterator<Item = (MarkerId, &Marker)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|m| (MarkerId(i), m)))
    }

    /// Positions of live markers in spawn order.
    #[must_use]
    pub fn positions(&self) -> Vec<Vec3> {
        self.iter().map(|(_, m)| m.position).collect()
    }
}

impl MarkerSink for MarkerCollection {
    fn clear(&mut self) {
        self.slots.clear();
        self.live = 0;
    }

    fn spawn(&mut self, marker: &Marker) -> MarkerId {
        self.slots.push(Some(*marker));
        self.live += 1;
        MarkerId(self.slots.len() - 1)
    }

    fn relocate(&mut self, id: MarkerId, position: Vec3) {
        if let Some(Some(marker)) = self.slots.get_mut(id.0) {
            marker.position = position;
        }
    }

    fn despawn(&mut self, id: MarkerId) {
        if let Some(slot) = self.slots.get_mut(id.0) {
            if slot.take().is_some() {
                self.live -= 1;
            }
        }
    }
}
