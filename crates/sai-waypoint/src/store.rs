//! The `WaypointStore` catalog and its builder.

use std::sync::Arc;

use rustc_hash::FxHashMap;
use tracing::warn;

use sai_core::{PathId, Position};

use crate::{Waypoint, WaypointError, WaypointPath, WaypointResult};

// ── WaypointStore ─────────────────────────────────────────────────────────────

/// Immutable `PathId → WaypointPath` catalog.
///
/// Wrap in an `Arc` and hand a clone to every controller; lookups hand out
/// `Arc<WaypointPath>` so an escort keeps its path alive independently of
/// the store.
#[derive(Debug, Default)]
pub struct WaypointStore {
    paths: FxHashMap<PathId, Arc<WaypointPath>>,
}

impl WaypointStore {
    /// A store with no paths.  Every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Shared handle to `path`, or `None` if the catalog has no such path.
    #[inline]
    pub fn path(&self, path: PathId) -> Option<Arc<WaypointPath>> {
        self.paths.get(&path).cloned()
    }

    #[inline]
    pub fn contains(&self, path: PathId) -> bool {
        self.paths.contains_key(&path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Iterator over all path ids (unordered).
    pub fn path_ids(&self) -> impl Iterator<Item = PathId> + '_ {
        self.paths.keys().copied()
    }
}

// ── WaypointStoreBuilder ──────────────────────────────────────────────────────

/// Collects raw waypoint rows and freezes them into a [`WaypointStore`].
///
/// Rows may arrive in any order.  On [`build`][Self::build] each path's rows
/// are sorted by point id and assigned dense slots `1..=N`.  A path whose ids
/// are not exactly `1..=N` is still accepted (slots follow sort order) but is
/// reported, since escorts will then see stored ids that differ from their
/// cursor.
#[derive(Debug, Default)]
pub struct WaypointStoreBuilder {
    pending: FxHashMap<PathId, Vec<Waypoint>>,
}

impl WaypointStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one point to `path`.  Point id 0 is reserved.
    pub fn add_point(&mut self, path: PathId, id: u32, position: Position) -> WaypointResult<&mut Self> {
        if id == 0 {
            return Err(WaypointError::ReservedPointId { path });
        }
        self.pending.entry(path).or_default().push(Waypoint::new(id, position));
        Ok(self)
    }

    /// Add a whole path whose points get ids `1..=N` in the given order.
    pub fn add_path<I>(&mut self, path: PathId, positions: I) -> &mut Self
    where
        I: IntoIterator<Item = Position>,
    {
        let points = self.pending.entry(path).or_default();
        let base = points.len() as u32;
        points.extend(
            positions
                .into_iter()
                .enumerate()
                .map(|(i, p)| Waypoint::new(base + i as u32 + 1, p)),
        );
        self
    }

    /// Number of distinct paths collected so far.
    pub fn path_count(&self) -> usize {
        self.pending.len()
    }

    pub fn build(self) -> WaypointStore {
        let mut paths = FxHashMap::default();
        paths.reserve(self.pending.len());

        for (path, mut points) in self.pending {
            points.sort_by_key(|wp| wp.id);

            let sequential = points
                .iter()
                .enumerate()
                .all(|(slot, wp)| wp.id == slot as u32 + 1);
            if !sequential {
                warn!(
                    path = path.raw(),
                    points = points.len(),
                    "waypoint_path_ids_not_sequential"
                );
            }

            paths.insert(path, Arc::new(WaypointPath::new(points)));
        }

        WaypointStore { paths }
    }
}
