use std::path::Path;

use hound::{SampleFormat, WavReader};

use crate::error::{LabError, Result};

/// A decoded, mono, normalized audio signal.
#[derive(Debug, Clone)]
pub struct AudioClip {
    /// Samples in [-1, 1].
    pub samples: Vec<f64>,
    pub sample_rate_hz: f64,
}

impl AudioClip {
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate_hz
    }
}

/// Decode a WAV file to normalized mono f64 samples.
///
/// Integer PCM is scaled by its full-scale value; float PCM is taken as-is.
/// Multi-channel files are mixed down by averaging, matching what the
/// original lab did before analysis.
pub fn load_wav_mono(path: &Path) -> Result<AudioClip> {
    let display = path.display().to_string();
    let reader = WavReader::open(path).map_err(|e| match e {
        hound::Error::IoError(source) => LabError::Io {
            path: display.clone(),
            source,
        },
        other => LabError::Decode {
            path: display.clone(),
            reason: other.to_string(),
        },
    })?;

    let spec = reader.spec();
    let channels = spec.channels as usize;
    if channels == 0 {
        return Err(LabError::Decode {
            path: display,
            reason: "zero channels".into(),
        });
    }

    let interleaved: Vec<f64> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(|v| v as f64))
            .collect::<std::result::Result<_, _>>()
            .map_err(|e| LabError::Decode {
                path: display.clone(),
                reason: e.to_string(),
            })?,
        SampleFormat::Int => {
            let full_scale = (1i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f64 / full_scale))
                .collect::<std::result::Result<_, _>>()
                .map_err(|e| LabError::Decode {
                    path: display.clone(),
                    reason: e.to_string(),
                })?
        }
    };

    if interleaved.is_empty() {
        return Err(LabError::Decode {
            path: display,
            reason: "no audio samples".into(),
        });
    }

    let samples = if channels == 1 {
        interleaved
    } else {
        log::warn!("{display}: {channels} channels mixed down to mono");
        interleaved
            .chunks(channels)
            .map(|frame| frame.iter().sum::<f64>() / frame.len() as f64)
            .collect()
    };

    Ok(AudioClip {
        samples,
        sample_rate_hz: spec.sample_rate as f64,
    })
}
