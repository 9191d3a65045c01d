//! # Player Schema
//!
//! Maps each tracked player to its position columns.
//!
//! A player is any prefix `p` for which both `p_x` and `p_y` exist. The
//! descriptor is built once per table and then drives column lookups, so the
//! estimator never re-scans field names per player.

use crate::table::TrackingTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const X_SUFFIX: &str = "_x";
pub const Y_SUFFIX: &str = "_y";
pub const VX_SUFFIX: &str = "_vx";
pub const VY_SUFFIX: &str = "_vy";
pub const SPEED_SUFFIX: &str = "_speed";

/// Position and derived column names for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerColumns {
    /// Player identifier, e.g. `Home_11`
    pub player: String,
    pub x: String,
    pub y: String,
}

impl PlayerColumns {
    pub fn new(player: impl Into<String>) -> Self {
        let player = player.into();
        Self {
            x: format!("{player}{X_SUFFIX}"),
            y: format!("{player}{Y_SUFFIX}"),
            player,
        }
    }

    pub fn vx(&self) -> String {
        format!("{}{VX_SUFFIX}", self.player)
    }

    pub fn vy(&self) -> String {
        format!("{}{VY_SUFFIX}", self.player)
    }

    pub fn speed(&self) -> String {
        format!("{}{SPEED_SUFFIX}", self.player)
    }

    /// Team label: the part before the first `_` (`Home`, `Away`).
    pub fn team(&self) -> &str {
        self.player.split('_').next().unwrap_or(&self.player)
    }
}

/// Sorted set of players detected in a table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSchema {
    players: Vec<PlayerColumns>,
}

impl PlayerSchema {
    /// Detect players from column names.
    pub fn from_table(table: &TrackingTable) -> Self {
        Self::from_column_names(table.column_names())
    }

    pub fn from_column_names<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut xs = BTreeSet::new();
        let mut ys = BTreeSet::new();
        for name in names {
            if let Some(prefix) = name.strip_suffix(X_SUFFIX) {
                xs.insert(prefix.to_string());
            } else if let Some(prefix) = name.strip_suffix(Y_SUFFIX) {
                ys.insert(prefix.to_string());
            }
        }

        let players = xs
            .intersection(&ys)
            .filter(|p| !p.is_empty())
            .map(|p| PlayerColumns::new(p.as_str()))
            .collect();
        Self { players }
    }

    /// Keep only players whose team label equals `team`.
    pub fn for_team(&self, team: &str) -> Self {
        Self {
            players: self
                .players
                .iter()
                .filter(|p| p.team() == team)
                .cloned()
                .collect(),
        }
    }

    pub fn players(&self) -> &[PlayerColumns] {
        &self.players
    }

    pub fn player_ids(&self) -> impl Iterator<Item = &str> {
        self.players.iter().map(|p| p.player.as_str())
    }

    pub fn get(&self, player: &str) -> Option<&PlayerColumns> {
        self.players.iter().find(|p| p.player == player)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}
