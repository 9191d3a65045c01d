//! Removal of previously derived kinematic columns.

use crate::table::TrackingTable;

/// Final `_`-separated name tokens that mark a derived column.
pub const DERIVED_TOKENS: [&str; 6] = ["vx", "vy", "ax", "ay", "speed", "acceleration"];

/// Whether `name` is a derived column (`Home_11_vx`, `Away_3_speed`, ...).
pub fn is_derived_field(name: &str) -> bool {
    name.rsplit('_')
        .next()
        .map(|last| DERIVED_TOKENS.contains(&last))
        .unwrap_or(false)
}

/// Drop every derived column so velocities can be recomputed from a clean schema.
pub fn remove_derived_fields(mut table: TrackingTable) -> TrackingTable {
    let dropped = table.drop_columns(is_derived_field);
    if !dropped.is_empty() {
        log::debug!("Removed {} derived columns", dropped.len());
    }
    table
}
