//! Server-side chart construction.
//!
//! Charts are built with `plotly` and shipped to the page as JSON, where
//! `Plotly.newPlot` draws them.

use common::Forecast;
use compute::{ComputeError, CounterDataset};
use plotly::common::{Font, Line, Mode, Title};
use plotly::layout::{Axis, Legend};
use plotly::{Layout, Plot, Scatter};

pub const BACKGROUND: &str = "#1a1a1a";
pub const GOLD: &str = "#f4d03f";
pub const GRID: &str = "#2d2d2d";
pub const FORECAST_GREEN: &str = "#72ED20";

fn axis(title: &str) -> Axis {
    Axis::new()
        .title(Title::with_text(title).font(Font::new().color(GOLD).size(16)))
        .tick_font(Font::new().color(GOLD).size(12))
        .grid_color(GRID)
        .zero_line_color(GRID)
        .line_color(GOLD)
}

fn dark_layout(title: &str) -> Layout {
    Layout::new()
        .title(Title::with_text(title).font(Font::new().color(GOLD).size(20)))
        .plot_background_color(BACKGROUND)
        .paper_background_color(BACKGROUND)
        .font(Font::new().color(GOLD))
        .x_axis(axis("Date"))
        .y_axis(axis("Cyclist Count"))
        .height(450)
}

fn date_labels(dataset: &CounterDataset) -> Result<Vec<String>, ComputeError> {
    Ok(dataset.dates()?.iter().map(|d| d.to_string()).collect())
}

/// Line chart of the selected daily counts.
pub fn history_chart(dataset: &CounterDataset) -> Result<Plot, ComputeError> {
    let trace = Scatter::new(date_labels(dataset)?, dataset.counts()?)
        .mode(Mode::Lines)
        .name("Cyclist Count")
        .line(Line::new().color(GOLD).width(4.0));

    let mut plot = Plot::new();
    plot.add_trace(trace);
    plot.set_layout(dark_layout("Cyclist Count Over Time").show_legend(false));
    Ok(plot)
}

/// Observed history followed by the back-transformed forecast.
pub fn forecast_chart(
    observed: &CounterDataset,
    forecast: &Forecast,
) -> Result<Plot, ComputeError> {
    let history = Scatter::new(date_labels(observed)?, observed.counts()?)
        .mode(Mode::Lines)
        .name("Observed data")
        .line(Line::new().color(GOLD).width(3.0));

    let (dates, counts): (Vec<String>, Vec<f64>) = forecast
        .data_points
        .iter()
        .map(|p| (p.date.to_string(), p.count))
        .unzip();
    let predicted = Scatter::new(dates, counts)
        .mode(Mode::Lines)
        .name(&format!("SARIMA forecast ({} days)", forecast.horizon))
        .line(Line::new().color(FORECAST_GREEN).width(3.0));

    let layout = dark_layout("Cyclist Count Over Time").show_legend(true).legend(
        Legend::new()
            .background_color("rgba(0,0,0,0)")
            .font(Font::new().color(GOLD)),
    );

    let mut plot = Plot::new();
    plot.add_trace(history);
    plot.add_trace(predicted);
    plot.set_layout(layout);
    Ok(plot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use common::ForecastPoint;
    use serde_json::Value;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    fn as_json(plot: &Plot) -> Value {
        serde_json::from_str(&plot.to_json()).unwrap()
    }

    #[test]
    fn test_history_chart_has_one_gold_line() {
        let dataset =
            CounterDataset::from_records(vec![(day(1), 1200), (day(2), 3400)]).unwrap();
        let json = as_json(&history_chart(&dataset).unwrap());

        let data = json["data"].as_array().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0]["x"], serde_json::json!(["2024-05-01", "2024-05-02"]));
        assert_eq!(data[0]["y"], serde_json::json!([1200, 3400]));
        assert_eq!(data[0]["line"]["color"], GOLD);
        assert_eq!(json["layout"]["plot_bgcolor"], BACKGROUND);
    }

    #[test]
    fn test_history_chart_of_empty_selection() {
        let json = as_json(&history_chart(&CounterDataset::empty().unwrap()).unwrap());
        assert_eq!(json["data"][0]["x"], serde_json::json!([]));
    }

    #[test]
    fn test_forecast_chart_names_the_horizon() {
        let observed = CounterDataset::from_records(vec![(day(1), 10)]).unwrap();
        let forecast = Forecast {
            horizon: 2,
            data_points: vec![
                ForecastPoint { date: day(2), count: 11.5 },
                ForecastPoint { date: day(3), count: 12.5 },
            ],
        };
        let json = as_json(&forecast_chart(&observed, &forecast).unwrap());

        let data = json["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["name"], "Observed data");
        assert_eq!(data[1]["name"], "SARIMA forecast (2 days)");
        assert_eq!(data[1]["line"]["color"], FORECAST_GREEN);
        assert_eq!(json["layout"]["showlegend"], true);
        assert_eq!(json["layout"]["title"]["text"], "Cyclist Count Over Time");
    }
}
