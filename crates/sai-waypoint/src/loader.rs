//! CSV waypoint loader.
//!
//! # CSV format
//!
//! One row per waypoint.  Rows for the same path may appear in any order.
//!
//! ```csv
//! path_id,point_id,x,y,z
//! 10,1,-8913.2,-136.5,81.9
//! 10,2,-8901.0,-120.4,82.3
//! 10,3,-8870.7,-109.1,82.1
//! 11,1,1620.0,-4380.2,11.4
//! ```
//!
//! `point_id` starts at 1; 0 is reserved and rejected.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use sai_core::{PathId, Position};

use crate::{WaypointError, WaypointStore, WaypointStoreBuilder};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct WaypointRecord {
    path_id:  u32,
    point_id: u32,
    x:        f32,
    y:        f32,
    z:        f32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load a [`WaypointStore`] from a CSV file.
pub fn load_waypoints_csv(path: &Path) -> Result<WaypointStore, WaypointError> {
    let file = std::fs::File::open(path)
        .map_err(WaypointError::Io)?;
    load_waypoints_reader(file)
}

/// Like [`load_waypoints_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or for catalogs embedded in
/// the binary.
pub fn load_waypoints_reader<R: Read>(reader: R) -> Result<WaypointStore, WaypointError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut builder = WaypointStoreBuilder::new();
    let mut rows = 0usize;

    for result in csv_reader.deserialize::<WaypointRecord>() {
        let row = result.map_err(|e| WaypointError::Parse(e.to_string()))?;
        builder.add_point(
            PathId(row.path_id),
            row.point_id,
            Position::new(row.x, row.y, row.z),
        )?;
        rows += 1;
    }

    debug!(rows, paths = builder.path_count(), "waypoints_loaded");
    Ok(builder.build())
}
