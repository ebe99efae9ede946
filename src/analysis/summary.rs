use crate::data::models::MatchRow;
use crate::error::AppError;
use serde::Serialize;

/// Whole-set figures shown on the stat card.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSummary {
    pub matches: usize,
    pub wins: usize,
    pub win_rate: f64, // percent
    pub rating: f64,
    pub adr: f64,
    pub kd_ratio: f64,
    pub kast: f64,
    pub kd_diff: i64,
    pub best_map: String,
    pub best_rating: f64,
}

impl PlayerSummary {
    pub fn from_rows(rows: &[MatchRow]) -> Result<Self, AppError> {
        if rows.is_empty() {
            return Err(AppError::EmptyDataset("player summary".to_string()));
        }

        let matches = rows.len();
        let wins = rows.iter().filter(|r| r.won).count();
        let mean = |f: fn(&MatchRow) -> f64| rows.iter().map(f).sum::<f64>() / matches as f64;

        // First row wins a tie.
        let best = rows
            .iter()
            .fold(&rows[0], |best, r| if r.rating > best.rating { r } else { best });

        Ok(PlayerSummary {
            matches,
            wins,
            win_rate: win_rate(wins, matches),
            rating: mean(|r| r.rating),
            adr: mean(|r| r.adr),
            kd_ratio: mean(MatchRow::kd_ratio),
            kast: mean(|r| r.kast),
            kd_diff: rows.iter().map(MatchRow::kd_diff).sum(),
            best_map: best.map.clone(),
            best_rating: best.rating,
        })
    }

    pub fn losses(&self) -> usize {
        self.matches - self.wins
    }
}

pub fn win_rate(wins: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (wins as f64 / total as f64) * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(map: &str, kills: u32, deaths: u32, won: bool, rating: f64) -> MatchRow {
        MatchRow {
            map: map.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 7, 26).unwrap(),
            won,
            rating,
            adr: 75.0,
            kills,
            deaths,
            kast: 68.0,
        }
    }

    #[test]
    fn mirage_example() {
        let rows = vec![
            row("Mirage", 20, 15, true, 1.30),
            row("Mirage", 18, 20, false, 0.95),
        ];
        let summary = PlayerSummary::from_rows(&rows).unwrap();

        assert_eq!(summary.matches, 2);
        assert_eq!(summary.wins, 1);
        assert_eq!(summary.losses(), 1);
        assert_eq!(summary.win_rate, 50.0);
        assert!((summary.kd_ratio - 1.117).abs() < 0.001);
        assert_eq!(summary.best_map, "Mirage");
        assert_eq!(summary.best_rating, 1.30);
        assert_eq!(summary.kd_diff, 3);
    }

    #[test]
    fn win_rate_is_wins_over_rows() {
        let rows: Vec<MatchRow> = (0..8)
            .map(|i| row("Dust2", 15, 15, i < 3, 1.0))
            .collect();
        let summary = PlayerSummary::from_rows(&rows).unwrap();
        assert_eq!(summary.win_rate, 3.0 / 8.0 * 100.0);
    }

    #[test]
    fn best_map_is_argmax_rating_first_on_ties() {
        let rows = vec![
            row("Nuke", 15, 15, true, 1.10),
            row("Train", 30, 10, true, 1.62),
            row("Inferno", 28, 12, false, 1.62),
        ];
        let summary = PlayerSummary::from_rows(&rows).unwrap();
        assert_eq!(summary.best_map, "Train");
        assert_eq!(summary.best_rating, 1.62);
    }

    #[test]
    fn empty_table_is_an_error_not_nan() {
        assert!(matches!(
            PlayerSummary::from_rows(&[]),
            Err(AppError::EmptyDataset(_))
        ));
    }
}
