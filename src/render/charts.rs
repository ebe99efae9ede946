use super::escape_xml;
use crate::analysis::map_stats::MapAggregate;
use crate::error::AppError;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 400.0;
const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 60.0;
const BAR_FILL: f64 = 0.6; // share of each band covered by its bar
const HEADROOM: f64 = 1.2;
const TICKS: usize = 5;

const POSITIVE_COLOR: &str = "green";
const NEGATIVE_COLOR: &str = "red";

/// Static description of a per-map bar chart.
#[derive(Clone, Copy)]
pub struct ChartSpec {
    pub title: &'static str,
    pub y_label: &'static str,
    pub color: &'static str,
    pub precision: usize,
    pub suffix: &'static str,
    pub value: fn(&MapAggregate) -> f64,
}

pub const KD_RATIO: ChartSpec = ChartSpec {
    title: "K/D Ratio per Map",
    y_label: "K/D Ratio",
    color: "skyblue",
    precision: 2,
    suffix: "",
    value: |m| m.kd_ratio,
};

pub const RATING: ChartSpec = ChartSpec {
    title: "Rating per Map",
    y_label: "Rating",
    color: "lightgreen",
    precision: 2,
    suffix: "",
    value: |m| m.rating,
};

pub const ADR: ChartSpec = ChartSpec {
    title: "ADR per Map",
    y_label: "Average Damage per Round (ADR)",
    color: "orange",
    precision: 1,
    suffix: "",
    value: |m| m.adr,
};

pub const KAST: ChartSpec = ChartSpec {
    title: "KAST (%) per Map",
    y_label: "KAST (%)",
    color: "purple",
    precision: 1,
    suffix: "%",
    value: |m| m.kast,
};

pub const KD_DIFF_TITLE: &str = "Kill Differential (K - D) per Map";

/// All dashboard charts, as inline SVG.
#[derive(Debug, Clone)]
pub struct MapCharts {
    pub kd_ratio: String,
    pub rating: String,
    pub adr: String,
    pub kast: String,
    pub kd_diff: String,
}

pub fn map_charts(aggregates: &[MapAggregate]) -> Result<MapCharts, AppError> {
    Ok(MapCharts {
        kd_ratio: metric_chart(&KD_RATIO, aggregates)?,
        rating: metric_chart(&RATING, aggregates)?,
        adr: metric_chart(&ADR, aggregates)?,
        kast: metric_chart(&KAST, aggregates)?,
        kd_diff: diff_chart(aggregates)?,
    })
}

pub fn metric_chart(spec: &ChartSpec, aggregates: &[MapAggregate]) -> Result<String, AppError> {
    let bars: Vec<(&str, f64)> = aggregates
        .iter()
        .map(|m| (m.map.as_str(), (spec.value)(m)))
        .collect();
    bar_chart(spec, &bars)
}

/// Top of the value axis: 20% above the tallest bar.
pub fn axis_top(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max > 0.0 {
        max * HEADROOM
    } else {
        1.0
    }
}

pub fn format_value(value: f64, precision: usize, suffix: &str) -> String {
    format!("{:.*}{}", precision, value, suffix)
}

pub fn bar_color(diff: i64) -> &'static str {
    if diff >= 0 {
        POSITIVE_COLOR
    } else {
        NEGATIVE_COLOR
    }
}

/// Maps data values onto the SVG plot area.
struct Frame {
    y_min: f64,
    y_max: f64,
    bands: usize,
}

impl Frame {
    fn plot_width() -> f64 {
        WIDTH - MARGIN_LEFT - MARGIN_RIGHT
    }

    fn plot_height() -> f64 {
        HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
    }

    fn y(&self, value: f64) -> f64 {
        let t = (value - self.y_min) / (self.y_max - self.y_min);
        MARGIN_TOP + Self::plot_height() * (1.0 - t)
    }

    fn band_width(&self) -> f64 {
        Self::plot_width() / self.bands as f64
    }

    fn band_center(&self, idx: usize) -> f64 {
        MARGIN_LEFT + self.band_width() * (idx as f64 + 0.5)
    }

    fn bar_width(&self) -> f64 {
        self.band_width() * BAR_FILL
    }

    fn open(&self, title: &str, y_label: &str) -> String {
        let mut out = format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" class="chart" viewBox="0 0 {w:.0} {h:.0}" width="100%">
<style>.chart-title{{font:bold 16px sans-serif}}.axis-label{{font:13px sans-serif}}.tick{{font:11px sans-serif;fill:#555}}.bar-label{{font:12px sans-serif}}</style>
<rect x="0" y="0" width="{w:.0}" height="{h:.0}" fill="#ffffff"/>
<text x="{cx:.0}" y="28" text-anchor="middle" class="chart-title">{title}</text>
"##,
            w = WIDTH,
            h = HEIGHT,
            cx = WIDTH / 2.0,
            title = escape_xml(title),
        );

        let tick_precision = if self.y_max - self.y_min < 5.0 { 2 } else { 0 };
        for i in 0..=TICKS {
            let value = self.y_min + (self.y_max - self.y_min) * i as f64 / TICKS as f64;
            let y = self.y(value);
            out.push_str(&format!(
                r##"<line x1="{x1:.0}" y1="{y:.1}" x2="{x2:.0}" y2="{y:.1}" stroke="#e6e6e6"/><text x="{tx:.0}" y="{ty:.1}" text-anchor="end" class="tick">{v:.prec$}</text>"##,
                x1 = MARGIN_LEFT,
                x2 = WIDTH - MARGIN_RIGHT,
                tx = MARGIN_LEFT - 6.0,
                ty = y + 4.0,
                v = value,
                prec = tick_precision,
            ));
        }

        out.push_str(&format!(
            r#"<text x="{cx:.0}" y="{y:.0}" text-anchor="middle" class="axis-label">Map</text>"#,
            cx = MARGIN_LEFT + Self::plot_width() / 2.0,
            y = HEIGHT - 12.0,
        ));
        out.push_str(&format!(
            r#"<text transform="translate(18 {cy:.0}) rotate(-90)" text-anchor="middle" class="axis-label">{label}</text>"#,
            cy = MARGIN_TOP + Self::plot_height() / 2.0,
            label = escape_xml(y_label),
        ));
        out
    }

    fn category_label(&self, idx: usize, label: &str) -> String {
        format!(
            r#"<text x="{x:.1}" y="{y:.0}" text-anchor="middle" class="tick">{label}</text>"#,
            x = self.band_center(idx),
            y = HEIGHT - MARGIN_BOTTOM + 18.0,
            label = escape_xml(label),
        )
    }
}

fn rect(x: f64, y: f64, width: f64, height: f64, fill: &str) -> String {
    format!(
        r#"<rect x="{x:.1}" y="{y:.1}" width="{width:.1}" height="{height:.1}" fill="{fill}"/>"#
    )
}

fn bar_label(x: f64, y: f64, text: &str) -> String {
    format!(
        r#"<text x="{x:.1}" y="{y:.1}" text-anchor="middle" class="bar-label">{}</text>"#,
        escape_xml(text)
    )
}

/// One bar per entry, y-axis from zero to 1.2x the maximum, each bar
/// labelled with its value.
pub fn bar_chart(spec: &ChartSpec, bars: &[(&str, f64)]) -> Result<String, AppError> {
    if bars.is_empty() {
        return Err(AppError::EmptyDataset(format!("chart '{}'", spec.title)));
    }

    let values: Vec<f64> = bars.iter().map(|(_, v)| *v).collect();
    let frame = Frame {
        y_min: 0.0,
        y_max: axis_top(&values),
        bands: bars.len(),
    };

    let mut svg = frame.open(spec.title, spec.y_label);
    let baseline = frame.y(0.0);
    for (idx, (label, value)) in bars.iter().enumerate() {
        let top = frame.y(value.max(0.0));
        let x = frame.band_center(idx) - frame.bar_width() / 2.0;
        svg.push_str(&rect(x, top, frame.bar_width(), baseline - top, spec.color));
        svg.push_str(&bar_label(
            frame.band_center(idx),
            top - 6.0,
            &format_value(*value, spec.precision, spec.suffix),
        ));
        svg.push_str(&frame.category_label(idx, label));
    }

    svg.push_str("</svg>");
    Ok(svg)
}

/// Summed kill differential per map: green bars at or above zero, red below,
/// with a dashed zero line.
pub fn diff_chart(aggregates: &[MapAggregate]) -> Result<String, AppError> {
    if aggregates.is_empty() {
        return Err(AppError::EmptyDataset(format!("chart '{}'", KD_DIFF_TITLE)));
    }

    let (lo, hi) = diff_axis(aggregates.iter().map(|m| m.kd_diff));
    let frame = Frame {
        y_min: lo,
        y_max: hi,
        bands: aggregates.len(),
    };

    let mut svg = frame.open(KD_DIFF_TITLE, "Kills - Deaths");
    let zero = frame.y(0.0);
    for (idx, m) in aggregates.iter().enumerate() {
        let end = frame.y(m.kd_diff as f64);
        let x = frame.band_center(idx) - frame.bar_width() / 2.0;
        let (top, height, label_y) = if m.kd_diff >= 0 {
            (end, zero - end, end - 6.0)
        } else {
            (zero, end - zero, end + 16.0)
        };
        svg.push_str(&rect(x, top, frame.bar_width(), height, bar_color(m.kd_diff)));
        svg.push_str(&bar_label(frame.band_center(idx), label_y, &m.kd_diff.to_string()));
        svg.push_str(&frame.category_label(idx, &m.map));
    }

    svg.push_str(&format!(
        r#"<line x1="{x1:.0}" y1="{y:.1}" x2="{x2:.0}" y2="{y:.1}" stroke="black" stroke-dasharray="6 4"/>"#,
        x1 = MARGIN_LEFT,
        x2 = WIDTH - MARGIN_RIGHT,
        y = zero,
    ));
    svg.push_str("</svg>");
    Ok(svg)
}

/// Axis bounds for a signed series: always includes zero, with 20% of the
/// data span added beyond each non-zero extreme.
pub fn diff_axis(values: impl Iterator<Item = i64>) -> (f64, f64) {
    let (min, max) = values.fold((0i64, 0i64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let span = (max - min) as f64;
    if span == 0.0 {
        return (0.0, 1.0);
    }
    let pad = span * (HEADROOM - 1.0);
    let lo = if min < 0 { min as f64 - pad } else { 0.0 };
    let hi = if max > 0 { max as f64 + pad } else { 0.0 };
    (lo, hi)
}
