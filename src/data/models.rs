use chrono::NaiveDate;
use serde::Serialize;

/// One map played by the tracked player.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRow {
    pub map: String,
    pub date: NaiveDate,
    pub won: bool,
    pub rating: f64,
    pub adr: f64,
    pub kills: u32,
    pub deaths: u32,
    pub kast: f64, // percentage, 0-100
}

impl MatchRow {
    /// Kills per death. A map with no deaths counts as one death so the
    /// ratio stays finite.
    pub fn kd_ratio(&self) -> f64 {
        self.kills as f64 / self.deaths.max(1) as f64
    }

    pub fn kd_diff(&self) -> i64 {
        self.kills as i64 - self.deaths as i64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesOutcome {
    Win,
    Loss,
}

impl SeriesOutcome {
    /// Series are assumed best-of-three: a score starting with "2" is a win.
    /// Any other format (bo1, bo5) is misclassified.
    pub fn from_result(result: &str) -> Self {
        if result.trim_start().starts_with('2') {
            SeriesOutcome::Win
        } else {
            SeriesOutcome::Loss
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            SeriesOutcome::Win => "green",
            SeriesOutcome::Loss => "red",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesResult {
    pub team: String,
    pub opponent: String,
    pub result: String,
}

impl SeriesResult {
    pub fn outcome(&self) -> SeriesOutcome {
        SeriesOutcome::from_result(&self.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(kills: u32, deaths: u32) -> MatchRow {
        MatchRow {
            map: "Inferno".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 7, 20).unwrap(),
            won: true,
            rating: 1.0,
            adr: 80.0,
            kills,
            deaths,
            kast: 70.0,
        }
    }

    #[test]
    fn kd_ratio_divides_kills_by_deaths() {
        let r = row(20, 15);
        assert!((r.kd_ratio() - 20.0 / 15.0).abs() < 1e-12);
        assert_eq!(r.kd_diff(), 5);
    }

    #[test]
    fn zero_deaths_yields_finite_ratio() {
        let r = row(12, 0);
        assert_eq!(r.kd_ratio(), 12.0);
        assert_eq!(r.kd_diff(), 12);
    }

    #[test]
    fn negative_differential() {
        assert_eq!(row(18, 20).kd_diff(), -2);
    }

    #[test]
    fn best_of_three_results_map_to_outcome() {
        assert_eq!(SeriesOutcome::from_result("2-0"), SeriesOutcome::Win);
        assert_eq!(SeriesOutcome::from_result("2-1"), SeriesOutcome::Win);
        assert_eq!(SeriesOutcome::from_result("0-2"), SeriesOutcome::Loss);
        assert_eq!(SeriesOutcome::from_result("1-2"), SeriesOutcome::Loss);
        assert_eq!(SeriesOutcome::Win.color(), "green");
        assert_eq!(SeriesOutcome::Loss.color(), "red");
    }
}
