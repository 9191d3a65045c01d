//! Per-run summary of velocity estimation.

use crate::smoothing::{SmoothOutcome, SmoothingFilter};
use serde::{Deserialize, Serialize};

/// Smoothing outcome for one segment of one player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentReport {
    /// First row of the segment
    pub start: usize,
    /// One past the last row
    pub end: usize,
    pub vx: SmoothOutcome,
    pub vy: SmoothOutcome,
}

impl SegmentReport {
    pub fn is_skipped(&self) -> bool {
        !self.vx.is_applied() || !self.vy.is_applied()
    }
}

/// What happened to one player's trace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerVelocityStats {
    pub player: String,
    /// Rows with both x and y present
    pub valid_positions: usize,
    /// Samples dropped by the speed bound
    pub rejected_samples: usize,
    /// Peak raw speed before rejection (m/s)
    pub max_raw_speed: Option<f64>,
    /// Samples filled by gap repair (vx trace)
    pub filled_samples: usize,
    /// Empty when smoothing is disabled
    pub segments: Vec<SegmentReport>,
}

/// Summary of one estimator run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VelocityReport {
    pub rows: usize,
    pub half_time_row: Option<usize>,
    pub filter: Option<SmoothingFilter>,
    pub max_speed: Option<f64>,
    pub players: Vec<PlayerVelocityStats>,
}

impl VelocityReport {
    pub fn player(&self, player: &str) -> Option<&PlayerVelocityStats> {
        self.players.iter().find(|p| p.player == player)
    }

    pub fn total_rejected(&self) -> usize {
        self.players.iter().map(|p| p.rejected_samples).sum()
    }

    /// Segments that fell back to the unsmoothed signal.
    pub fn skipped_segments(&self) -> usize {
        self.players
            .iter()
            .flat_map(|p| p.segments.iter())
            .filter(|s| s.is_skipped())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applied() -> SmoothOutcome {
        SmoothOutcome::Applied { window: 7, poly_order: Some(1) }
    }

    #[test]
    fn test_aggregates() {
        let report = VelocityReport {
            rows: 100,
            half_time_row: Some(50),
            filter: None,
            max_speed: Some(12.0),
            players: vec![
                PlayerVelocityStats {
                    player: "Home_1".into(),
                    rejected_samples: 3,
                    segments: vec![
                        SegmentReport { start: 0, end: 51, vx: applied(), vy: applied() },
                        SegmentReport {
                            start: 50,
                            end: 100,
                            vx: SmoothOutcome::Skipped,
                            vy: SmoothOutcome::Skipped,
                        },
                    ],
                    ..Default::default()
                },
                PlayerVelocityStats {
                    player: "Away_9".into(),
                    rejected_samples: 2,
                    ..Default::default()
                },
            ],
        };

        assert_eq!(report.total_rejected(), 5);
        assert_eq!(report.skipped_segments(), 1);
        assert_eq!(report.player("Away_9").map(|p| p.rejected_samples), Some(2));
        assert!(report.player("Home_2").is_none());
    }

    #[test]
    fn test_report_json_shape() {
        let report = VelocityReport {
            rows: 2,
            ..Default::default()
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["rows"], 2);
        assert!(json["half_time_row"].is_null());
        assert!(json["players"].as_array().unwrap().is_empty());
    }
}
