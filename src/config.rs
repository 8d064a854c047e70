// Purpose - bundled asset locations, resolved once at startup

use std::path::{Path, PathBuf};

/// Where the lab's bundled media lives.
///
/// The original build referenced its sample files by hardcoded relative
/// paths scattered across pages; here every path is derived from a single
/// base directory so a deployment can relocate the assets without touching
/// any page code. `SIGLAB_ASSETS` overrides the default `assets/` next to
/// the working directory.
#[derive(Debug, Clone)]
pub struct LabConfig {
    assets_dir: PathBuf,
}

impl Default for LabConfig {
    fn default() -> Self {
        let assets_dir = std::env::var_os("SIGLAB_ASSETS")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("assets"));
        Self { assets_dir }
    }
}

impl LabConfig {
    pub fn with_assets_dir(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
        }
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    /// Bundled ECG record for the QRS page (PhysioNet-style `.mat`).
    pub fn ecg_record(&self) -> PathBuf {
        self.assets_dir.join("ecg_sample.mat")
    }

    /// Bundled audio clip for the sampling page.
    pub fn demo_audio(&self) -> PathBuf {
        self.assets_dir.join("demo.wav")
    }
}
