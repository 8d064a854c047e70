//! TUI rendering for the lab pages.
//!
//! The layout is the same on every page: a tab bar, a parameter line, a
//! stack of charts, and a help/status bar. Only the chart stack differs.

mod chart;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
    Frame,
};

use chart::{render_chart, Series};

use crate::app::{Lab, Page};

pub fn render(frame: &mut Frame, lab: &Lab) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Length(2), // Parameters
            Constraint::Min(9),    // Charts
            Constraint::Length(1), // Help / status
        ])
        .split(frame.area());

    render_tabs(frame, chunks[0], lab);
    render_params(frame, chunks[1], lab);
    render_page(frame, chunks[2], lab);
    render_help(frame, chunks[3], lab);
}

fn render_tabs(frame: &mut Frame, area: Rect, lab: &Lab) {
    let titles: Vec<Line> = Page::ALL.iter().map(|p| Line::from(p.title())).collect();
    let selected = Page::ALL.iter().position(|p| *p == lab.page).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, area);
}

/// One `name: value` span per adjustable parameter, the selected one
/// highlighted, plus any page-level readout (correlations, rates).
fn render_params(frame: &mut Frame, area: Rect, lab: &Lab) {
    let mut params: Vec<(String, String)> = Vec::new();
    let mut readout = String::new();

    match lab.page {
        Page::Operations => {
            params.push(("op".into(), lab.ops.op.label().into()));
            params.push(("wave 1".into(), lab.ops.first.waveform.label().into()));
            params.push(("f1".into(), format!("{:.0} Hz", lab.ops.first.frequency_hz)));
            params.push(("wave 2".into(), lab.ops.second.waveform.label().into()));
            params.push(("f2".into(), format!("{:.0} Hz", lab.ops.second.frequency_hz)));
        }
        Page::EvenOdd => {
            params.push(("signal".into(), lab.even_odd_source.label().into()));
        }
        Page::Autocorrelation => {
            params.push(("wave".into(), lab.auto.waveform.label().into()));
            params.push(("f".into(), format!("{:.0} Hz", lab.auto.frequency_hz)));
            if let Some(out) = &lab.auto_out {
                readout = format!("lag-0: clean {:.3}", out.clean_autocorr.at_zero());
            }
        }
        Page::CrossCorrelation => {
            params.push(("wave".into(), lab.cross.waveform.label().into()));
            params.push(("f".into(), format!("{:.0} Hz", lab.cross.frequency_hz)));
            if let Some(out) = &lab.cross_out {
                readout = format!("lag-0: {:.3}", out.correlation.at_zero());
            }
        }
        Page::Sampling => {
            params.push(("tone".into(), format!("{:.0} Hz", lab.sampling_tone_hz)));
            if let Some(out) = &lab.sampling_out {
                readout = format!(
                    "f_max {:.1} Hz | under {:.0} Hz r={:.2} | critical {:.0} Hz r={:.2} | over {:.0} Hz r={:.2}",
                    out.max_frequency_hz,
                    out.under.rate_hz,
                    out.under.fidelity,
                    out.critical.rate_hz,
                    out.critical.fidelity,
                    out.over.rate_hz,
                    out.over.fidelity,
                );
            }
        }
        Page::Lti => {
            params.push(("filter".into(), lab.filter_choice.label().into()));
            params.push(("order".into(), lab.filter_order.to_string()));
            params.push(("low/cutoff".into(), format!("{:.0} Hz", lab.filter_low_hz)));
            params.push(("high".into(), format!("{:.0} Hz", lab.filter_high_hz)));
        }
        Page::Qrs => {
            params.push(("noise seed".into(), lab.qrs_seed.to_string()));
            if let Some(out) = &lab.qrs_out {
                readout = format!(
                    "original vs filtered correlation: {:.4}",
                    out.recovered_correlation
                );
            }
        }
    }

    let mut spans: Vec<Span> = Vec::new();
    for (i, (name, value)) in params.iter().enumerate() {
        let style = if i == lab.selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        spans.push(Span::styled(format!(" {name}: {value} "), style));
        spans.push(Span::raw("|"));
    }
    spans.pop();

    let mut lines = vec![Line::from(spans)];
    if !readout.is_empty() {
        lines.push(Line::from(Span::styled(
            format!(" {readout}"),
            Style::default().fg(Color::Magenta),
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_page(frame: &mut Frame, area: Rect, lab: &Lab) {
    match lab.page {
        Page::Operations => render_operations(frame, area, lab),
        Page::EvenOdd => render_even_odd(frame, area, lab),
        Page::Autocorrelation => render_autocorrelation(frame, area, lab),
        Page::CrossCorrelation => render_cross_correlation(frame, area, lab),
        Page::Sampling => render_sampling(frame, area, lab),
        Page::Lti => render_lti(frame, area, lab),
        Page::Qrs => render_qrs(frame, area, lab),
    }
}

fn render_help(frame: &mut Frame, area: Rect, lab: &Lab) {
    let text = if lab.status.is_empty() {
        " [Tab] Page  [Up/Down] Parameter  [Left/Right] Adjust  [Q] Quit".to_string()
    } else {
        format!(" error: {}", lab.status)
    };
    let style = if lab.status.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Red)
    };
    frame.render_widget(Paragraph::new(text).style(style), area);
}

fn rows<const N: usize>(area: Rect) -> [Rect; N] {
    let constraints = vec![Constraint::Ratio(1, N as u32); N];
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);
    std::array::from_fn(|i| chunks[i])
}

fn zip(time: &[f64], values: &[f64]) -> Vec<(f64, f64)> {
    time.iter().zip(values.iter()).map(|(&t, &v)| (t, v)).collect()
}

fn indexed(values: &[f64]) -> Vec<(f64, f64)> {
    values.iter().enumerate().map(|(i, &v)| (i as f64, v)).collect()
}

fn render_operations(frame: &mut Frame, area: Rect, lab: &Lab) {
    let Some(out) = &lab.ops_out else { return };
    let [top, mid, bottom] = rows::<3>(area);

    let first = zip(&out.time, &out.first);
    let second = zip(&out.time, &out.second);
    render_chart(
        frame,
        top,
        "Inputs",
        &[
            Series::new("signal 1", Color::Blue, &first),
            Series::new("signal 2", Color::Red, &second),
        ],
    );

    let combined = zip(&out.time, &out.combined);
    render_chart(
        frame,
        mid,
        lab.ops.op.label(),
        &[Series::new("result", Color::Green, &combined)],
    );

    let spectrum = out.combined_spectrum.points();
    render_chart(
        frame,
        bottom,
        "Result spectrum",
        &[Series::new("|X(f)|", Color::Magenta, &spectrum)],
    );
}

fn render_even_odd(frame: &mut Frame, area: Rect, lab: &Lab) {
    let Some(out) = &lab.even_odd_out else { return };
    let [top, mid, bottom] = rows::<3>(area);

    let original = zip(&out.time, &out.original);
    let even = zip(&out.time, &out.even);
    let odd = zip(&out.time, &out.odd);
    render_chart(frame, top, "Original", &[Series::new("x(t)", Color::Blue, &original)]);
    render_chart(frame, mid, "Even component", &[Series::new("even", Color::Green, &even)]);
    render_chart(frame, bottom, "Odd component", &[Series::new("odd", Color::Red, &odd)]);
}

fn render_autocorrelation(frame: &mut Frame, area: Rect, lab: &Lab) {
    let Some(out) = &lab.auto_out else { return };
    let [top, mid, bottom] = rows::<3>(area);

    let clean = out.clean_series();
    let noisy = out.noisy_series();
    render_chart(
        frame,
        top,
        "Signal",
        &[
            Series::new("noisy", Color::Red, &noisy),
            Series::new("clean", Color::Blue, &clean),
        ],
    );

    let clean_ac = out.clean_autocorr.points();
    let noisy_ac = out.noisy_autocorr.points();
    render_chart(
        frame,
        mid,
        "Autocorrelation",
        &[
            Series::new("noisy", Color::Red, &noisy_ac),
            Series::new("clean", Color::Blue, &clean_ac),
        ],
    );

    let clean_esd = out.clean_esd.points();
    let noisy_esd = out.noisy_esd.points();
    render_chart(
        frame,
        bottom,
        "Energy spectral density",
        &[
            Series::new("noisy", Color::Red, &noisy_esd),
            Series::new("clean", Color::Blue, &clean_esd),
        ],
    );
}

fn render_cross_correlation(frame: &mut Frame, area: Rect, lab: &Lab) {
    let Some(out) = &lab.cross_out else { return };
    let [top, bottom] = rows::<2>(area);

    let clean = out.clean_series();
    let noisy = out.noisy_series();
    render_chart(
        frame,
        top,
        "Signals",
        &[
            Series::new("noisy", Color::Red, &noisy),
            Series::new("clean", Color::Blue, &clean),
        ],
    );

    let correlation = out.correlation.points();
    render_chart(
        frame,
        bottom,
        "Cross-correlation",
        &[Series::new("r(lag)", Color::Green, &correlation)],
    );
}

fn render_sampling(frame: &mut Frame, area: Rect, lab: &Lab) {
    let Some(out) = &lab.sampling_out else { return };
    let [top, mid, bottom] = rows::<3>(area);

    for (chunk, rec, label) in [
        (top, &out.over, "Oversampled"),
        (mid, &out.critical, "Critically sampled"),
        (bottom, &out.under, "Undersampled"),
    ] {
        let data = indexed(&rec.samples);
        let title = format!("{label} ({:.0} Hz, r = {:.2})", rec.rate_hz, rec.fidelity);
        render_chart(frame, chunk, &title, &[Series::new("recon", Color::Cyan, &data)]);
    }
}

fn render_lti(frame: &mut Frame, area: Rect, lab: &Lab) {
    let Some(out) = &lab.lti_out else { return };
    let [top, mid, bottom] = rows::<3>(area);

    // A short window keeps the time view readable
    let window = out.input.len().min(512);
    let input_t = indexed(&out.input[..window]);
    let output_t = indexed(&out.output[..window]);
    render_chart(
        frame,
        top,
        "Time domain",
        &[
            Series::new("input", Color::DarkGray, &input_t),
            Series::new("output", Color::Green, &output_t),
        ],
    );

    let input_s = out.input_spectrum.points();
    render_chart(frame, mid, "Input spectrum", &[Series::new("in", Color::Blue, &input_s)]);

    let output_s = out.output_spectrum.points();
    render_chart(
        frame,
        bottom,
        "Output spectrum",
        &[Series::new("out", Color::Green, &output_s)],
    );
}

fn render_qrs(frame: &mut Frame, area: Rect, lab: &Lab) {
    let Some(out) = &lab.qrs_out else { return };
    let [top, mid, bottom] = rows::<3>(area);

    let cycle = zip(&out.time, &out.cycle);
    let noisy = zip(&out.time, &out.noisy);
    let filtered = zip(&out.time, &out.filtered);
    render_chart(frame, top, "Original ECG cycle", &[Series::new("ecg", Color::Blue, &cycle)]);
    render_chart(frame, mid, "Noisy cycle", &[Series::new("noisy", Color::Red, &noisy)]);
    render_chart(
        frame,
        bottom,
        "Filtered cycle",
        &[Series::new("filtered", Color::Green, &filtered)],
    );
}
