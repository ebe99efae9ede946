use super::charts::map_charts;
use super::escape_xml;
use super::stat_card::render_stat_card;
use crate::config::PlayerProfile;
use crate::dashboard::Dashboard;
use crate::data::models::MatchRow;
use crate::error::AppError;

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0 auto; max-width: 1400px; padding: 1.5rem; color: #262730; }
h1 { font-size: 2rem; }
h2 { margin-top: 2.5rem; border-bottom: 1px solid #e6e6e6; padding-bottom: .4rem; }
.stat-card { max-width: 100%; height: auto; }
.grid { display: grid; grid-template-columns: repeat(2, minmax(0, 1fr)); gap: 1.5rem; }
.full { width: 100%; }
table.raw { border-collapse: collapse; width: 100%; font-size: .9rem; }
table.raw th, table.raw td { border: 1px solid #e6e6e6; padding: .35rem .6rem; text-align: right; }
table.raw th:first-child, table.raw td:first-child { text-align: left; }
.ticker-row { display: flex; align-items: center; gap: 1rem; padding: .5rem 0; border-bottom: 1px solid #f0f0f0; }
.team-logo { width: 48px; height: 48px; object-fit: contain; }
.team-name { min-width: 10rem; }
.series-result { font-weight: bold; font-size: 1.2rem; min-width: 3rem; text-align: center; }
"#;

fn raw_table(rows: &[MatchRow]) -> String {
    let mut html = String::from(
        "<table class=\"raw\"><thead><tr><th>Map</th><th>Date</th><th>Win</th><th>Rating</th>\
<th>ADR</th><th>Kills</th><th>Deaths</th><th>KAST</th><th>K/D</th><th>K - D</th></tr></thead><tbody>",
    );
    for row in rows {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{:.2}</td><td>{:.1}</td><td>{}</td>\
<td>{}</td><td>{:.1}%</td><td>{:.2}</td><td>{}</td></tr>",
            escape_xml(&row.map),
            row.date.format("%d/%m/%Y"),
            if row.won { "S" } else { "N" },
            row.rating,
            row.adr,
            row.kills,
            row.deaths,
            row.kast,
            row.kd_ratio(),
            row.kd_diff(),
        ));
    }
    html.push_str("</tbody></table>");
    html
}

/// Lays the dashboard out: title, stat card, a two-column grid of per-map
/// charts, the differential chart, raw data and the series ticker.
pub fn render_page(
    dashboard: &Dashboard,
    profile: &PlayerProfile,
    photo_src: &str,
    ticker_html: &str,
) -> Result<String, AppError> {
    let charts = map_charts(&dashboard.maps)?;
    let card = render_stat_card(profile, &dashboard.summary, photo_src);
    let title = format!("Dashboard - {} performance", profile.name);

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8"/>
<meta name="viewport" content="width=device-width, initial-scale=1"/>
<title>{title}</title>
<style>{style}</style>
</head>
<body>
<h1>{title}</h1>
<h2>Stat Card</h2>
{card}
<h2>Per-map analysis</h2>
<div class="grid">
<div>{kd_ratio}</div>
<div>{rating}</div>
<div>{adr}</div>
<div>{kast}</div>
</div>
<h2>Kill differential</h2>
<div class="full">{kd_diff}</div>
<h2>Raw data</h2>
{table}
<h2>Series results</h2>
{ticker}
</body>
</html>
"#,
        title = escape_xml(&title),
        style = STYLE,
        card = card,
        kd_ratio = charts.kd_ratio,
        rating = charts.rating,
        adr = charts.adr,
        kast = charts.kast,
        kd_diff = charts.kd_diff,
        table = raw_table(&dashboard.rows),
        ticker = ticker_html,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::models::SeriesResult;
    use chrono::NaiveDate;

    fn row(map: &str, kills: u32, deaths: u32, won: bool) -> MatchRow {
        MatchRow {
            map: map.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 7, 27).unwrap(),
            won,
            rating: 1.07,
            adr: 81.3,
            kills,
            deaths,
            kast: 71.0,
        }
    }

    fn dashboard() -> Dashboard {
        Dashboard::from_parts(
            vec![row("Inferno", 21, 14, true), row("Ancient", 12, 17, false)],
            vec![SeriesResult {
                team: "FURIA".to_string(),
                opponent: "MOUZ".to_string(),
                result: "2-1".to_string(),
            }],
        )
        .unwrap()
    }

    #[test]
    fn page_contains_every_section_in_order() {
        let html = render_page(&dashboard(), &PlayerProfile::default(), "photo.png", "<div>ticker</div>").unwrap();

        let sections = ["Stat Card", "Per-map analysis", "Kill differential", "Raw data", "Series results"];
        let positions: Vec<usize> = sections
            .iter()
            .map(|s| html.find(&format!("<h2>{}</h2>", s)).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));

        assert_eq!(html.matches("<svg").count(), 6);
        assert!(html.contains("<div>ticker</div>"));
    }

    #[test]
    fn raw_table_lists_derived_columns() {
        let html = raw_table(&[row("Inferno", 21, 14, true)]);
        assert!(html.contains("<td>Inferno</td><td>27/07/2025</td><td>S</td>"));
        assert!(html.contains("<td>1.50</td><td>7</td>"));
        assert!(html.contains("<td>71.0%</td>"));
    }
}
