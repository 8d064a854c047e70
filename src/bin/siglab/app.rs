//! Lab application state: the active page, its parameters, and the
//! recomputed outputs. Every keypress that changes a parameter reruns the
//! whole page pipeline; errors land in the status line and the page keeps
//! its last good output.

use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::DefaultTerminal;

use crate::ui;
use siglab_dsp::config::LabConfig;
use siglab_dsp::filter::FilterSpec;
use siglab_dsp::lab::{
    autocorrelation, cross_correlation, even_odd, lti, operations, qrs, sampling,
};
use siglab_dsp::signal::combine::SignalOp;
use siglab_dsp::signal::grid::TimeGrid;
use siglab_dsp::signal::synth::{synthesize, white_noise, WaveParams, Waveform};

/// Sample rate used for the synthesized LTI test signal.
const LTI_SAMPLE_RATE_HZ: f64 = 8000.0;
const LTI_POINTS: usize = 4096;
const LTI_TONE_HZ: f64 = 100.0;

/// Sample rate used for the sampling-page tone.
const SAMPLING_RATE_HZ: f64 = 2000.0;
const SAMPLING_POINTS: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Operations,
    EvenOdd,
    Autocorrelation,
    CrossCorrelation,
    Sampling,
    Lti,
    Qrs,
}

impl Page {
    pub const ALL: [Page; 7] = [
        Page::Operations,
        Page::EvenOdd,
        Page::Autocorrelation,
        Page::CrossCorrelation,
        Page::Sampling,
        Page::Lti,
        Page::Qrs,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Operations => "Operations",
            Page::EvenOdd => "Even/Odd",
            Page::Autocorrelation => "Autocorr",
            Page::CrossCorrelation => "Cross-corr",
            Page::Sampling => "Sampling",
            Page::Lti => "LTI Filter",
            Page::Qrs => "QRS",
        }
    }

    fn index(&self) -> usize {
        Page::ALL.iter().position(|p| p == self).unwrap_or(0)
    }

    fn next(&self) -> Page {
        Page::ALL[(self.index() + 1) % Page::ALL.len()]
    }

    fn prev(&self) -> Page {
        Page::ALL[(self.index() + Page::ALL.len() - 1) % Page::ALL.len()]
    }
}

/// Filter shape selector for the LTI page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterChoice {
    LowPass,
    HighPass,
    BandPass,
}

impl FilterChoice {
    const ALL: [FilterChoice; 3] = [
        FilterChoice::LowPass,
        FilterChoice::HighPass,
        FilterChoice::BandPass,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FilterChoice::LowPass => "lowpass",
            FilterChoice::HighPass => "highpass",
            FilterChoice::BandPass => "bandpass",
        }
    }
}

pub struct Lab {
    pub page: Page,
    /// Index of the highlighted parameter on the active page.
    pub selected: usize,
    pub status: String,
    config: LabConfig,
    should_quit: bool,

    // Page parameters
    pub ops: operations::OperationsParams,
    pub even_odd_source: even_odd::SourceSignal,
    pub auto: autocorrelation::AutocorrelationParams,
    pub cross: cross_correlation::CrossCorrelationParams,
    pub sampling_tone_hz: f64,
    pub filter_choice: FilterChoice,
    pub filter_order: usize,
    pub filter_low_hz: f64,
    pub filter_high_hz: f64,
    pub qrs_seed: u64,

    // Last good outputs, kept across failed recomputes
    pub ops_out: Option<operations::OperationsOutput>,
    pub even_odd_out: Option<even_odd::EvenOddOutput>,
    pub auto_out: Option<autocorrelation::AutocorrelationOutput>,
    pub cross_out: Option<cross_correlation::CrossCorrelationOutput>,
    pub sampling_out: Option<sampling::SamplingOutput>,
    pub lti_out: Option<lti::LtiOutput>,
    pub qrs_out: Option<qrs::QrsOutput>,
}

impl Lab {
    pub fn new() -> Self {
        let mut lab = Self {
            page: Page::Operations,
            selected: 0,
            status: String::new(),
            config: LabConfig::default(),
            should_quit: false,
            ops: operations::OperationsParams::default(),
            even_odd_source: even_odd::SourceSignal::Sine,
            auto: autocorrelation::AutocorrelationParams::default(),
            cross: cross_correlation::CrossCorrelationParams::default(),
            sampling_tone_hz: 50.0,
            filter_choice: FilterChoice::LowPass,
            filter_order: 4,
            filter_low_hz: 300.0,
            filter_high_hz: 1200.0,
            qrs_seed: 1,
            ops_out: None,
            even_odd_out: None,
            auto_out: None,
            cross_out: None,
            sampling_out: None,
            lti_out: None,
            qrs_out: None,
        };
        lab.recompute();
        lab
    }

    /// Run the UI event loop.
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::render(frame, self))?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }
        Ok(())
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.page = self.page.next();
                self.selected = 0;
                self.recompute();
            }
            KeyCode::BackTab => {
                self.page = self.page.prev();
                self.selected = 0;
                self.recompute();
            }
            KeyCode::Up => {
                let count = self.param_count();
                self.selected = (self.selected + count - 1) % count;
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1) % self.param_count();
            }
            KeyCode::Left => {
                self.adjust(-1);
                self.recompute();
            }
            KeyCode::Right => {
                self.adjust(1);
                self.recompute();
            }
            _ => {}
        }
    }

    /// Number of adjustable parameters on the active page.
    pub fn param_count(&self) -> usize {
        match self.page {
            Page::Operations => 5,
            Page::EvenOdd => 1,
            Page::Autocorrelation | Page::CrossCorrelation => 2,
            Page::Sampling => 1,
            Page::Lti => 4,
            Page::Qrs => 1,
        }
    }

    fn adjust(&mut self, delta: i64) {
        match self.page {
            Page::Operations => match self.selected {
                0 => self.ops.op = cycle(&SignalOp::ALL, self.ops.op, delta),
                1 => self.ops.first.waveform = cycle(&Waveform::ALL, self.ops.first.waveform, delta),
                2 => self.ops.first.frequency_hz = step_hz(self.ops.first.frequency_hz, delta),
                3 => {
                    self.ops.second.waveform = cycle(&Waveform::ALL, self.ops.second.waveform, delta)
                }
                _ => self.ops.second.frequency_hz = step_hz(self.ops.second.frequency_hz, delta),
            },
            Page::EvenOdd => {
                self.even_odd_source =
                    cycle(&even_odd::SourceSignal::ALL, self.even_odd_source, delta);
            }
            Page::Autocorrelation => match self.selected {
                0 => self.auto.waveform = cycle(&Waveform::ALL, self.auto.waveform, delta),
                _ => self.auto.frequency_hz = step_hz(self.auto.frequency_hz, delta),
            },
            Page::CrossCorrelation => match self.selected {
                0 => self.cross.waveform = cycle(&Waveform::ALL, self.cross.waveform, delta),
                _ => self.cross.frequency_hz = step_hz(self.cross.frequency_hz, delta),
            },
            Page::Sampling => {
                self.sampling_tone_hz = step_hz(self.sampling_tone_hz, delta);
            }
            Page::Lti => match self.selected {
                0 => self.filter_choice = cycle(&FilterChoice::ALL, self.filter_choice, delta),
                1 => {
                    self.filter_order =
                        (self.filter_order as i64 + delta).clamp(1, 10) as usize
                }
                2 => self.filter_low_hz = (self.filter_low_hz + delta as f64 * 50.0).max(50.0),
                _ => self.filter_high_hz = (self.filter_high_hz + delta as f64 * 50.0).max(100.0),
            },
            Page::Qrs => {
                self.qrs_seed = self.qrs_seed.saturating_add_signed(delta).max(1);
            }
        }
    }

    /// Rerun the active page pipeline from its current parameters.
    fn recompute(&mut self) {
        self.status.clear();
        let result = match self.page {
            Page::Operations => operations::run(&self.ops).map(|o| self.ops_out = Some(o)),
            Page::EvenOdd => {
                self.even_odd_out = Some(even_odd::run(self.even_odd_source));
                Ok(())
            }
            Page::Autocorrelation => {
                autocorrelation::run(&self.auto).map(|o| self.auto_out = Some(o))
            }
            Page::CrossCorrelation => {
                cross_correlation::run(&self.cross).map(|o| self.cross_out = Some(o))
            }
            Page::Sampling => {
                let grid = TimeGrid::from_rate(0.0, SAMPLING_RATE_HZ, SAMPLING_POINTS);
                let tone = synthesize(
                    &WaveParams::new(1.0, self.sampling_tone_hz, 0.0, Waveform::Sine),
                    &grid,
                );
                sampling::run(&tone, SAMPLING_RATE_HZ).map(|o| self.sampling_out = Some(o))
            }
            Page::Lti => {
                let grid = TimeGrid::from_rate(0.0, LTI_SAMPLE_RATE_HZ, LTI_POINTS);
                let tone = synthesize(
                    &WaveParams::new(1.0, LTI_TONE_HZ, 0.0, Waveform::Sine),
                    &grid,
                );
                let hiss = white_noise(tone.len(), 0.3, 11);
                let input: Vec<f64> =
                    tone.iter().zip(hiss.iter()).map(|(&s, &n)| s + n).collect();
                lti::run(&input, &self.filter_spec()).map(|o| self.lti_out = Some(o))
            }
            Page::Qrs => qrs::run_from_file(&self.config.ecg_record(), self.qrs_seed)
                .map(|o| self.qrs_out = Some(o)),
        };

        if let Err(e) = result {
            self.status = e.to_string();
        }
    }

    pub fn filter_spec(&self) -> FilterSpec {
        match self.filter_choice {
            FilterChoice::LowPass => {
                FilterSpec::lowpass(self.filter_low_hz, self.filter_order, LTI_SAMPLE_RATE_HZ)
            }
            FilterChoice::HighPass => {
                FilterSpec::highpass(self.filter_low_hz, self.filter_order, LTI_SAMPLE_RATE_HZ)
            }
            FilterChoice::BandPass => FilterSpec::bandpass(
                self.filter_low_hz,
                self.filter_high_hz,
                self.filter_order,
                LTI_SAMPLE_RATE_HZ,
            ),
        }
    }
}

impl Default for Lab {
    fn default() -> Self {
        Self::new()
    }
}

/// Step a frequency parameter in 1 Hz increments, floored at 1 Hz.
fn step_hz(value: f64, delta: i64) -> f64 {
    (value + delta as f64).max(1.0)
}

/// Cycle through a closed set of variants.
fn cycle<T: Copy + PartialEq>(all: &[T], current: T, delta: i64) -> T {
    let i = all.iter().position(|v| *v == current).unwrap_or(0) as i64;
    let n = all.len() as i64;
    all[((i + delta).rem_euclid(n)) as usize]
}
