//! Generic line-chart widget shared by every page.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// One line on a chart.
pub struct Series<'a> {
    pub name: &'a str,
    pub color: Color,
    pub data: &'a [(f64, f64)],
}

impl<'a> Series<'a> {
    pub fn new(name: &'a str, color: Color, data: &'a [(f64, f64)]) -> Self {
        Self { name, color, data }
    }
}

/// Render one or more series into a bordered chart, with axis bounds fitted
/// to the data.
pub fn render_chart(frame: &mut Frame, area: Rect, title: &str, series: &[Series]) {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for s in series {
        for &(x, y) in s.data {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
    }
    if !(x_min.is_finite() && x_max.is_finite() && y_min.is_finite() && y_max.is_finite()) {
        x_min = 0.0;
        x_max = 1.0;
        y_min = -1.0;
        y_max = 1.0;
    }
    // Keep a flat line visible and give peaks breathing room
    let pad = ((y_max - y_min).abs() * 0.05).max(1e-3);
    y_min -= pad;
    y_max += pad;

    let datasets: Vec<Dataset> = series
        .iter()
        .map(|s| {
            Dataset::default()
                .name(s.name)
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(s.color))
                .data(s.data)
        })
        .collect();

    let chart = Chart::new(datasets)
        .block(Block::default().title(format!(" {title} ")).borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .bounds([x_min, x_max])
                .labels(vec![format!("{x_min:.2}"), format!("{x_max:.2}")])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([y_min, y_max])
                .labels(vec![format!("{y_min:.2}"), format!("{y_max:.2}")])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
