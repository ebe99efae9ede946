use crate::analysis::map_stats::MapAggregate;
use crate::analysis::summary::PlayerSummary;
use crate::data::models::{SeriesOutcome, SeriesResult};
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct MapRow {
    map: String,
    #[tabled(rename = "#")]
    matches: String,
    rating: String,
    adr: String,
    kast: String,
    #[tabled(rename = "k/d")]
    kd_ratio: String,
    #[tabled(rename = "k-d")]
    kd_diff: String,
}

#[derive(Tabled)]
struct SeriesRow {
    team: String,
    result: String,
    opponent: String,
}

fn map_rows(maps: &[MapAggregate]) -> Vec<MapRow> {
    maps.iter()
        .map(|m| MapRow {
            map: m.map.clone(),
            matches: m.matches.to_string(),
            rating: format!("{:.2}", m.rating),
            adr: format!("{:.1}", m.adr),
            kast: format!("{:.1}%", m.kast),
            kd_ratio: format!("{:.2}", m.kd_ratio),
            kd_diff: format!("{:+}", m.kd_diff),
        })
        .collect()
}

pub fn display_summary(player: &str, summary: &PlayerSummary, maps: &[MapAggregate]) {
    println!(
        "\n{}",
        format!("📊 {} - {} maps", player, summary.matches).bold().cyan()
    );
    println!("{}\n", "=".repeat(60).cyan());
    println!(
        "{} {} W / {} L ({:.1}% WR)",
        "📈 Overall:".bold(),
        summary.wins.to_string().green(),
        summary.losses().to_string().red(),
        summary.win_rate
    );
    println!(
        "   Rating {:.2} · ADR {:.1} · K/D {:.2} · KAST {:.1}%",
        summary.rating, summary.adr, summary.kd_ratio, summary.kast
    );
    println!(
        "   {} {} (Rating {:.2})\n",
        "Best map:".bold(),
        summary.best_map.yellow(),
        summary.best_rating
    );

    let mut table = Table::new(map_rows(maps));
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_series(series: &[SeriesResult]) {
    if series.is_empty() {
        return;
    }

    println!("{}", "🏆 SERIES RESULTS".bold().cyan());
    let rows: Vec<SeriesRow> = series
        .iter()
        .map(|s| SeriesRow {
            team: s.team.clone(),
            result: match s.outcome() {
                SeriesOutcome::Win => s.result.green().to_string(),
                SeriesOutcome::Loss => s.result.red().to_string(),
            },
            opponent: s.opponent.clone(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}\n", table);
}

pub fn display_error(error: &str) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}
