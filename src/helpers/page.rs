//! HTML rendering of the dashboard page.

use chrono::NaiveDate;
use common::{CountStatistics, DecorativeImage};
use compute::ForecastHorizon;
use plotly::Plot;

use super::charts::{BACKGROUND, GOLD, GRID};
use super::dataset::Selection;
use super::format::{rounded_thousands, thousands};

pub const PAGE_TITLE: &str = "Paris Cyclists";
pub const HEADING: &str = "🚲 Cyclists in Paris 🗼🥐";
const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";
const IMAGE_WIDTH: u32 = 300;

/// Everything the page shows, already computed.
pub struct DashboardView {
    pub images: Vec<DecorativeImage>,
    pub selection: Selection,
    /// First and last recorded day, used as date picker limits
    pub bounds: Option<(NaiveDate, NaiveDate)>,
    pub history: Plot,
    pub statistics: CountStatistics,
    pub horizon: ForecastHorizon,
    pub forecast: Plot,
}

/// Minimal escaping for text and attribute values.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
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

/// Makes JSON safe to inline in a `<script>` element.
fn script_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

fn styles() -> String {
    format!(
        r#"body {{ background-color: {bg}; color: #e0e0e0; font-family: sans-serif; margin: 0; padding: 2rem; }}
h1, h2, h3 {{ color: {gold}; }}
label, p {{ color: #e0e0e0; }}
.columns {{ display: flex; gap: 2rem; flex-wrap: wrap; margin-bottom: 1.5rem; }}
.columns > div {{ flex: 1; min-width: 200px; }}
.caption {{ color: #a0a0a0; font-size: 0.85rem; }}
input {{ background-color: {grid}; color: {gold}; border: 1px solid {gold}; padding: 4px; }}
input[type=number] {{ max-width: 4rem; text-align: center; font-weight: 600; }}
button {{ background-color: {grid}; color: {gold}; border: 1px solid {gold}; padding: 4px 12px; }}
.metric {{ background-color: {grid}; border: 1px solid {gold}; border-radius: 10px; padding: 20px; text-align: center; }}
.metric-label {{ color: {gold}; font-size: 1.1rem; font-weight: 600; margin-bottom: 8px; }}
.metric-value {{ color: {gold}; font-size: 2.5rem; font-weight: 800; text-shadow: 0 0 10px rgba(244,208,63,0.4); }}
.chart {{ width: 100%; height: 450px; background-color: {bg}; }}"#,
        bg = BACKGROUND,
        gold = GOLD,
        grid = GRID,
    )
}

fn image_column(image: &DecorativeImage) -> String {
    let img = match &image.url {
        Some(url) => format!(
            r#"<img src="{}" width="{}" alt="{}">"#,
            escape_html(url),
            IMAGE_WIDTH,
            escape_html(&image.caption)
        ),
        None => String::new(),
    };
    format!(
        r#"<div>{}<p class="caption">{}</p></div>"#,
        img,
        escape_html(&image.caption)
    )
}

fn gold_metric(label: &str, value: &str) -> String {
    format!(
        r#"<div class="metric"><div class="metric-label">{}</div><div class="metric-value">{}</div></div>"#,
        escape_html(label),
        escape_html(value)
    )
}

fn date_input(
    name: &str,
    label: &str,
    value: Option<NaiveDate>,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> String {
    let value = value.map(|d| d.to_string()).unwrap_or_default();
    let limits = bounds
        .map(|(min, max)| format!(r#" min="{}" max="{}""#, min, max))
        .unwrap_or_default();
    format!(
        r#"<div><label for="{name}">{label}</label><br><input type="date" id="{name}" name="{name}" value="{value}"{limits}></div>"#
    )
}

fn chart(id: &str, plot: &Plot) -> String {
    format!(
        r#"<div id="{id}" class="chart"></div>
<script>
(function() {{
  var fig = {json};
  Plotly.newPlot("{id}", fig.data, fig.layout, {{responsive: true}});
}})();
</script>"#,
        id = id,
        json = script_json(&plot.to_json()),
    )
}

/// Renders the whole page.
pub fn render_dashboard(view: &DashboardView) -> String {
    let stats = &view.statistics;
    let max = stats.max_daily_count.map(thousands).unwrap_or_else(|| "n/a".to_string());
    let avg = stats.avg_daily_count.map(rounded_thousands).unwrap_or_else(|| "n/a".to_string());

    let images: String = view.images.iter().map(image_column).collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{page_title}</title>
<script src="{plotly}" charset="utf-8"></script>
<style>
{styles}
</style>
</head>
<body>
<h1>{heading}</h1>
<div class="columns">{images}</div>
<form method="get" action="/">
<div class="columns">
{start}
{end}
</div>
{history}
<div class="columns">{total}{max}{avg}</div>
<h2>🔮 SARIMA Predictions</h2>
<div class="columns">
<div id="n-pred-container"><label for="horizon">Number of days to forecast</label><br><input type="number" id="horizon" name="horizon" min="{min_h}" max="{max_h}" step="1" value="{horizon}"> <button type="submit">Update</button></div>
</div>
</form>
{forecast}
</body>
</html>
"#,
        page_title = PAGE_TITLE,
        plotly = PLOTLY_CDN,
        styles = styles(),
        heading = HEADING,
        images = images,
        start = date_input("start_date", "Start Date", view.selection.start, view.bounds),
        end = date_input("end_date", "End Date", view.selection.end, view.bounds),
        history = chart("history-chart", &view.history),
        total = gold_metric("Total Days", &thousands(stats.total_days as i64)),
        max = gold_metric("Max Daily Count", &max),
        avg = gold_metric("Avg Daily Count", &avg),
        min_h = ForecastHorizon::MIN,
        max_h = ForecastHorizon::MAX,
        horizon = view.horizon,
        forecast = chart("forecast-chart", &view.forecast),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotly::Scatter;

    fn plot() -> Plot {
        let mut plot = Plot::new();
        plot.add_trace(Scatter::new(vec!["</script>"], vec![1]));
        plot
    }

    fn view(images: Vec<DecorativeImage>, statistics: CountStatistics) -> DashboardView {
        DashboardView {
            images,
            selection: Selection {
                start: NaiveDate::from_ymd_opt(2024, 1, 1),
                end: NaiveDate::from_ymd_opt(2024, 1, 31),
            },
            bounds: NaiveDate::from_ymd_opt(2023, 6, 1).zip(NaiveDate::from_ymd_opt(2024, 3, 1)),
            history: plot(),
            statistics,
            horizon: ForecastHorizon::clamped(45),
            forecast: plot(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_metrics_are_formatted() {
        let html = render_dashboard(&view(
            vec![],
            CountStatistics {
                total_days: 1234,
                max_daily_count: Some(15321),
                avg_daily_count: Some(4567.6),
            },
        ));

        assert!(html.contains(HEADING));
        assert!(html.contains("Total Days"));
        assert!(html.contains(">1,234<"));
        assert!(html.contains(">15,321<"));
        assert!(html.contains(">4,568<"));
        assert!(html.contains(r#"value="2024-01-01""#));
        assert!(html.contains(r#"min="2023-06-01" max="2024-03-01""#));
        assert!(html.contains(r#"min="1" max="365" step="1" value="45""#));
    }

    #[test]
    fn test_empty_statistics_show_placeholder() {
        let html = render_dashboard(&view(vec![], CountStatistics::empty()));
        assert!(html.contains(">0<"));
        assert_eq!(html.matches(">n/a<").count(), 2);
    }

    #[test]
    fn test_missing_image_keeps_caption() {
        let html = render_dashboard(&view(
            vec![
                DecorativeImage {
                    caption: "Random Cat GIF".to_string(),
                    url: Some("https://cdn.example/cat.gif".to_string()),
                },
                DecorativeImage {
                    caption: "Random Dog GIF".to_string(),
                    url: None,
                },
            ],
            CountStatistics::empty(),
        ));

        assert_eq!(html.matches("<img ").count(), 1);
        assert!(html.contains(r#"<img src="https://cdn.example/cat.gif" width="300""#));
        assert!(html.contains("Random Dog GIF"));
    }

    #[test]
    fn test_chart_json_cannot_close_the_script() {
        let html = render_dashboard(&view(vec![], CountStatistics::empty()));
        assert!(!html.contains(r#""</script>""#));
        assert!(html.contains(r#"<\/script>"#));
    }
}
