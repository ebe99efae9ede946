use super::escape_xml;
use crate::analysis::summary::PlayerSummary;
use crate::config::PlayerProfile;

const WIDTH: f64 = 1000.0;
const HEIGHT: f64 = 600.0;

// Photo box, left column.
const PHOTO_X: f64 = 50.0;
const PHOTO_Y: f64 = 90.0;
const PHOTO_SIZE: f64 = 200.0;

const BIO_X: f64 = 50.0;
const BIO_Y: f64 = 345.0;
const STATS_X: f64 = 550.0;
const STATS_Y: f64 = 130.0;
const LINE_HEIGHT: f64 = 28.0;

pub fn bio_lines(profile: &PlayerProfile) -> Vec<String> {
    vec![
        format!("Nationality: {}", profile.nationality),
        format!("Age: {} years", profile.age),
        format!("Team: {}", profile.team),
        format!("Event: {}", profile.event),
    ]
}

pub fn stat_lines(summary: &PlayerSummary) -> Vec<String> {
    vec![
        format!("Matches: {}", summary.matches),
        format!("Wins: {} ({:.1}%)", summary.wins, summary.win_rate),
        format!("Average rating: {:.2}", summary.rating),
        format!("Average ADR: {:.1}", summary.adr),
        format!("Average K/D ratio: {:.2}", summary.kd_ratio),
        format!(
            "Best map: {} (Rating {:.2})",
            summary.best_map, summary.best_rating
        ),
    ]
}

fn text_block(lines: &[String], x: f64, y: f64, class: &str) -> String {
    let mut out = format!(r#"<text x="{x:.0}" y="{y:.0}" class="{class}">"#);
    for (i, line) in lines.iter().enumerate() {
        let dy = if i == 0 { 0.0 } else { LINE_HEIGHT };
        out.push_str(&format!(
            r#"<tspan x="{x:.0}" dy="{dy:.0}">{}</tspan>"#,
            escape_xml(line)
        ));
    }
    out.push_str("</text>");
    out
}

/// Composes the stat card as a standalone SVG. `photo_src` is any URI an
/// `<image>` element accepts, normally a `data:` URI.
pub fn render_stat_card(profile: &PlayerProfile, summary: &PlayerSummary, photo_src: &str) -> String {
    let mut svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" class="stat-card" viewBox="0 0 {w:.0} {h:.0}" width="{w:.0}" height="{h:.0}">
<style>.card-title{{font:bold 22px sans-serif}}.card-text{{font:17px sans-serif}}.card-footer{{font:14px sans-serif;fill:#808080}}</style>
<rect x="0" y="0" width="{w:.0}" height="{h:.0}" fill="#ffffff"/>
"##,
        w = WIDTH,
        h = HEIGHT,
    );

    svg.push_str(&format!(
        r#"<text x="{x:.0}" y="40" text-anchor="middle" class="card-title">Stat Card - {name}</text>"#,
        x = WIDTH / 2.0,
        name = escape_xml(&profile.name),
    ));

    svg.push_str(&format!(
        r#"<image href="{src}" x="{x:.0}" y="{y:.0}" width="{s:.0}" height="{s:.0}" preserveAspectRatio="xMidYMid meet"/>"#,
        src = escape_xml(photo_src),
        x = PHOTO_X,
        y = PHOTO_Y,
        s = PHOTO_SIZE,
    ));

    svg.push_str(&text_block(&bio_lines(profile), BIO_X, BIO_Y, "card-text"));
    svg.push_str(&text_block(&stat_lines(summary), STATS_X, STATS_Y, "card-text"));

    svg.push_str(&format!(
        r#"<text x="{x:.0}" y="{y:.0}" text-anchor="middle" class="card-footer">Performance based on matches at {event}</text>"#,
        x = WIDTH / 2.0,
        y = HEIGHT - 25.0,
        event = escape_xml(&profile.event),
    ));

    svg.push_str("</svg>");
    svg
}
