use super::assets::team_logo_path;
use super::escape_xml;
use crate::data::models::{SeriesOutcome, SeriesResult};
use crate::error::AppError;
use std::path::{Path, PathBuf};

/// A series result with both logos resolved.
#[derive(Debug, Clone)]
pub struct TickerEntry {
    pub team: String,
    pub team_logo: PathBuf,
    pub result: String,
    pub outcome: SeriesOutcome,
    pub opponent: String,
    pub opponent_logo: PathBuf,
}

/// Fails on the first team that has no registered logo.
pub fn ticker_entries(series: &[SeriesResult], logo_dir: &Path) -> Result<Vec<TickerEntry>, AppError> {
    series
        .iter()
        .map(|s| -> Result<TickerEntry, AppError> {
            Ok(TickerEntry {
                team: s.team.clone(),
                team_logo: team_logo_path(logo_dir, &s.team)?,
                result: s.result.clone(),
                outcome: s.outcome(),
                opponent: s.opponent.clone(),
                opponent_logo: team_logo_path(logo_dir, &s.opponent)?,
            })
        })
        .collect()
}

/// Renders one row per entry. `image_src` turns a logo path into something
/// an `<img src>` accepts.
pub fn render_ticker<F>(entries: &[TickerEntry], image_src: F) -> Result<String, AppError>
where
    F: Fn(&Path) -> Result<String, AppError>,
{
    if entries.is_empty() {
        return Ok(r#"<p class="ticker-empty">No series results recorded.</p>"#.to_string());
    }

    let mut html = String::from(r#"<div class="ticker">"#);
    for entry in entries {
        html.push_str(&format!(
            r#"<div class="ticker-row">
<img class="team-logo" src="{team_logo}" alt="{team}"/>
<span class="team-name">{team}</span>
<span class="series-result" style="color:{color}">{result}</span>
<span class="team-name">{opponent}</span>
<img class="team-logo" src="{opponent_logo}" alt="{opponent}"/>
</div>"#,
            team_logo = escape_xml(&image_src(&entry.team_logo)?),
            team = escape_xml(&entry.team),
            color = entry.outcome.color(),
            result = escape_xml(&entry.result),
            opponent = escape_xml(&entry.opponent),
            opponent_logo = escape_xml(&image_src(&entry.opponent_logo)?),
        ));
    }
    html.push_str("</div>");
    Ok(html)
}
