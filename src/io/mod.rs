// Purpose - external file interfaces, format decoding

//! Loading of bundled/uploaded media files.
//!
//! The lab only ever reads: decode failures surface as a single
//! user-visible message and abort the current recomputation. Re-selecting
//! a good file is the whole recovery story.

/// Minimal MAT v5 reader for ECG records.
pub mod mat;
/// WAV decoding to normalized mono samples.
pub mod wav;

pub use mat::load_ecg_record;
pub use wav::load_wav_mono;
