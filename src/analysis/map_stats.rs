use crate::data::models::MatchRow;
use crate::error::AppError;
use serde::Serialize;
use std::collections::HashMap;

/// Running totals for one map.
#[derive(Debug, Clone)]
pub struct MapStats {
    pub name: String,
    pub times_played: usize,
    pub rating_total: f64,
    pub adr_total: f64,
    pub kast_total: f64,
    pub kd_ratio_total: f64,
    pub kd_diff_total: i64,
}

impl MapStats {
    pub fn new(name: String) -> Self {
        MapStats {
            name,
            times_played: 0,
            rating_total: 0.0,
            adr_total: 0.0,
            kast_total: 0.0,
            kd_ratio_total: 0.0,
            kd_diff_total: 0,
        }
    }

    fn mean(&self, total: f64) -> f64 {
        total / self.times_played as f64
    }

    fn aggregate(&self) -> MapAggregate {
        MapAggregate {
            map: self.name.clone(),
            matches: self.times_played,
            rating: self.mean(self.rating_total),
            adr: self.mean(self.adr_total),
            kast: self.mean(self.kast_total),
            kd_ratio: self.mean(self.kd_ratio_total),
            kd_diff: self.kd_diff_total,
        }
    }
}

/// Per-map means, plus the summed kill/death differential.
#[derive(Debug, Clone, Serialize)]
pub struct MapAggregate {
    pub map: String,
    pub matches: usize,
    pub rating: f64,
    pub adr: f64,
    pub kast: f64,
    pub kd_ratio: f64,
    pub kd_diff: i64,
}

pub struct MapStatsTracker {
    stats: HashMap<String, MapStats>,
}

impl MapStatsTracker {
    pub fn new() -> Self {
        MapStatsTracker {
            stats: HashMap::new(),
        }
    }

    pub fn add_match(&mut self, row: &MatchRow) {
        let entry = self
            .stats
            .entry(row.map.clone())
            .or_insert_with(|| MapStats::new(row.map.clone()));

        entry.times_played += 1;
        entry.rating_total += row.rating;
        entry.adr_total += row.adr;
        entry.kast_total += row.kast;
        entry.kd_ratio_total += row.kd_ratio();
        entry.kd_diff_total += row.kd_diff();
    }

    /// Aggregates sorted by map name. Errors when no match was recorded.
    pub fn aggregates(&self) -> Result<Vec<MapAggregate>, AppError> {
        if self.stats.is_empty() {
            return Err(AppError::EmptyDataset("per-map aggregates".to_string()));
        }

        let mut aggregates: Vec<MapAggregate> =
            self.stats.values().map(MapStats::aggregate).collect();
        aggregates.sort_by(|a, b| a.map.cmp(&b.map));

        Ok(aggregates)
    }
}

pub fn aggregate_by_map(rows: &[MatchRow]) -> Result<Vec<MapAggregate>, AppError> {
    let mut tracker = MapStatsTracker::new();
    for row in rows {
        tracker.add_match(row);
    }
    tracker.aggregates()
}
