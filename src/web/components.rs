//! Presentation primitives: cards, containers and the small chart kit.
//!
//! Everything returns an HTML fragment as a `String`. Text coming from the
//! API always goes through [`escape`].

use crate::transform::chart_color;

/// Escape text for HTML element content and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Cards
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl Trend {
    fn class(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Neutral => "neutral",
        }
    }

    fn arrow(self) -> &'static str {
        match self {
            Self::Up => "↑ ",
            Self::Down => "↓ ",
            Self::Neutral => "",
        }
    }
}

/// A headline number with an optional description and trend badge.
pub fn stats_card(
    title: &str,
    value: &str,
    description: Option<&str>,
    trend: Option<(Trend, &str)>,
) -> String {
    let description = description
        .map(|d| format!(r#"<div class="description">{}</div>"#, escape(d)))
        .unwrap_or_default();
    let trend = trend
        .map(|(t, text)| {
            format!(
                r#"<div class="trend {}">{}{}</div>"#,
                t.class(),
                t.arrow(),
                escape(text)
            )
        })
        .unwrap_or_default();
    format!(
        r#"<div class="stat-card"><div class="label">{}</div><div class="value">{}</div>{description}{trend}</div>"#,
        escape(title),
        escape(value),
    )
}

/// Titled card wrapping a chart or table.
pub fn chart_container(title: &str, description: Option<&str>, body: &str) -> String {
    let description = description
        .map(|d| format!(r#"<p class="description">{}</p>"#, escape(d)))
        .unwrap_or_default();
    format!(
        r#"<section class="card"><h2>{}</h2>{description}<div class="card-body">{body}</div></section>"#,
        escape(title),
    )
}

/// Red banner for a failed page or action, with an optional retry link.
pub fn error_banner(title: Option<&str>, message: &str, retry_href: Option<&str>) -> String {
    let title = title
        .map(|t| format!("<h3>{}</h3>", escape(t)))
        .unwrap_or_default();
    let retry = retry_href
        .map(|href| format!(r#"<a class="btn btn-outline" href="{}">Retry</a>"#, escape(href)))
        .unwrap_or_default();
    format!(
        r#"<div class="banner error">{title}<p>{}</p>{retry}</div>"#,
        escape(message)
    )
}

pub fn loading(message: &str) -> String {
    format!(
        r#"<div class="loading"><span class="spinner"></span>{}</div>"#,
        escape(message)
    )
}

pub fn empty_state(message: &str) -> String {
    format!(r#"<div class="empty">{}</div>"#, escape(message))
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// One bar of a [`bar_chart`].
#[derive(Debug, Clone)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    /// Text printed next to the bar.
    pub display: String,
    pub color: &'static str,
}

/// Horizontal bars scaled against `max` (or the largest value when `None`).
pub fn bar_chart(bars: &[Bar], max: Option<f64>) -> String {
    if bars.is_empty() {
        return empty_state("No data available");
    }
    let max = max
        .unwrap_or_else(|| bars.iter().map(|b| b.value).fold(0.0, f64::max))
        .max(f64::MIN_POSITIVE);

    let rows: String = bars
        .iter()
        .map(|b| {
            let width = (b.value / max * 100.0).clamp(0.0, 100.0);
            format!(
                r#"<div class="bar-row"><span class="bar-label">{}</span><span class="bar-track"><span class="bar-fill" style="width:{width:.1}%;background:{}"></span></span><span class="bar-value">{}</span></div>"#,
                escape(&b.label),
                b.color,
                escape(&b.display),
            )
        })
        .collect();
    format!(r#"<div class="bar-chart">{rows}</div>"#)
}

/// Single stacked bar of shares with a legend (stands in for a pie chart).
///
/// Each slice gets its share of the total; the legend prints
/// `name: share%` with one decimal.
pub fn share_chart(slices: &[(String, f64)]) -> String {
    let total: f64 = slices.iter().map(|(_, v)| v).sum();
    if slices.is_empty() || total <= 0.0 {
        return empty_state("No data available");
    }

    let mut segments = String::new();
    let mut legend = String::new();
    for (i, (name, value)) in slices.iter().enumerate() {
        let share = value / total * 100.0;
        let color = chart_color(i);
        segments.push_str(&format!(
            r#"<span class="seg" style="width:{share:.2}%;background:{color}" title="{}"></span>"#,
            escape(name)
        ));
        legend.push_str(&format!(
            r#"<li><span class="swatch" style="background:{color}"></span>{}: {share:.1}%</li>"#,
            escape(name)
        ));
    }
    format!(r#"<div class="dist-bar">{segments}</div><ul class="legend">{legend}</ul>"#)
}

/// A named polyline for [`line_chart`].
#[derive(Debug, Clone)]
pub struct Series {
    pub name: &'static str,
    pub color: &'static str,
    pub dashed: bool,
    pub points: Vec<(f64, f64)>,
}

const PLOT_W: f64 = 400.0;
const PLOT_H: f64 = 300.0;
const PAD: f64 = 40.0;

/// Inline SVG line chart over the unit square, for evaluation curves.
pub fn line_chart(series: &[Series], x_label: &str, y_label: &str) -> String {
    if series.iter().all(|s| s.points.is_empty()) {
        return empty_state("No curve data available");
    }

    let to_px = |(x, y): (f64, f64)| {
        (
            PAD + x.clamp(0.0, 1.0) * (PLOT_W - 2.0 * PAD),
            PLOT_H - PAD - y.clamp(0.0, 1.0) * (PLOT_H - 2.0 * PAD),
        )
    };

    let mut svg = format!(
        r#"<svg class="line-chart" viewBox="0 0 {PLOT_W} {PLOT_H}" role="img"><rect x="{PAD}" y="{PAD}" width="{w}" height="{h}" class="plot-area"/>"#,
        w = PLOT_W - 2.0 * PAD,
        h = PLOT_H - 2.0 * PAD,
    );
    for s in series.iter().filter(|s| !s.points.is_empty()) {
        let points: Vec<String> = s
            .points
            .iter()
            .map(|&p| {
                let (x, y) = to_px(p);
                format!("{x:.1},{y:.1}")
            })
            .collect();
        let dash = if s.dashed { r#" stroke-dasharray="5 5""# } else { "" };
        svg.push_str(&format!(
            r#"<polyline fill="none" stroke="{}" stroke-width="2"{dash} points="{}"><title>{}</title></polyline>"#,
            s.color,
            points.join(" "),
            s.name
        ));
    }
    svg.push_str(&format!(
        r#"<text x="{}" y="{}" class="axis-label" text-anchor="middle">{}</text><text x="12" y="{}" class="axis-label" text-anchor="middle" transform="rotate(-90 12 {})">{}</text></svg>"#,
        PLOT_W / 2.0,
        PLOT_H - 8.0,
        escape(x_label),
        PLOT_H / 2.0,
        PLOT_H / 2.0,
        escape(y_label)
    ));

    let legend: String = series
        .iter()
        .map(|s| {
            format!(
                r#"<li><span class="swatch" style="background:{}"></span>{}</li>"#,
                s.color, s.name
            )
        })
        .collect();
    format!(r#"{svg}<ul class="legend">{legend}</ul>"#)
}
