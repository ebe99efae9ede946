use crate::analysis::map_stats::{aggregate_by_map, MapAggregate};
use crate::analysis::summary::PlayerSummary;
use crate::config::Config;
use crate::data::loader;
use crate::data::models::{MatchRow, SeriesResult};
use crate::error::AppError;
use crate::render::assets::image_data_uri;
use crate::render::page::render_page;
use crate::render::ticker::{render_ticker, ticker_entries};
use serde::Serialize;

/// Everything one render needs, derived fresh from the input files.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub summary: PlayerSummary,
    pub maps: Vec<MapAggregate>,
    pub series: Vec<SeriesResult>,
    #[serde(skip)]
    pub rows: Vec<MatchRow>,
}

impl Dashboard {
    pub fn from_parts(rows: Vec<MatchRow>, series: Vec<SeriesResult>) -> Result<Self, AppError> {
        let summary = PlayerSummary::from_rows(&rows)?;
        let maps = aggregate_by_map(&rows)?;
        Ok(Dashboard {
            summary,
            maps,
            series,
            rows,
        })
    }

    pub fn load(config: &Config) -> Result<Self, AppError> {
        let rows = loader::load_matches(&config.matches_csv)?;
        let series = loader::load_series(&config.series_csv)?;
        Self::from_parts(rows, series)
    }
}

/// Loads, derives and renders the full page. Nothing is reused between calls.
pub fn build_page(config: &Config) -> Result<String, AppError> {
    let dashboard = Dashboard::load(config)?;
    let photo_src = image_data_uri(&config.photo)?;
    let entries = ticker_entries(&dashboard.series, &config.logo_dir)?;
    let ticker_html = render_ticker(&entries, image_data_uri)?;
    render_page(&dashboard, &config.profile, &photo_src, &ticker_html)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{parse_matches, parse_series};
    use std::path::Path;

    #[test]
    fn derives_summary_and_maps_together() {
        let rows = parse_matches(
            "mapa;data;vitoria;rating;adr;kills;deaths;kast
Mirage;20/07/2025;S;1.30;85.2;20;15;72.5%
Mirage;21/07/2025;N;0.95;70.1;18;20;65%
Nuke;22/07/2025;S;1.05;78.0;17;16;70%
",
            Path::new("partidas.csv"),
        )
        .unwrap();
        let series = parse_series("time,adversario,resultado\nFURIA,MOUZ,2-0\n", Path::new("series.csv")).unwrap();

        let dashboard = Dashboard::from_parts(rows, series).unwrap();
        assert_eq!(dashboard.summary.matches, 3);
        assert_eq!(dashboard.maps.len(), 2);
        assert_eq!(dashboard.series.len(), 1);

        let json = serde_json::to_value(&dashboard).unwrap();
        assert_eq!(json["summary"]["wins"], 2);
        assert_eq!(json["maps"][0]["map"], "Mirage");
        assert!(json.get("rows").is_none());
    }

    #[test]
    fn empty_match_table_fails_before_rendering() {
        assert!(matches!(
            Dashboard::from_parts(Vec::new(), Vec::new()),
            Err(AppError::EmptyDataset(_))
        ));
    }
}
