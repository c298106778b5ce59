//! Sanity checks on backend output

use super::request::AudioFormat;
use crate::{Result, VoiceoverError};
use log::{debug, warn};
use std::fs;
use std::path::Path;

/// Check that a backend really produced playable audio at `path`
///
/// The file must exist and be non-empty. WAV output is also parsed and must
/// hold at least one sample, which catches engines that write only a header
/// when they fail halfway.
pub fn verify_output(path: &Path, format: &AudioFormat) -> Result<()> {
    let metadata = fs::metadata(path).map_err(|e| {
        VoiceoverError::Backend(format!("No output at {}: {}", path.display(), e))
    })?;

    if metadata.len() == 0 {
        return Err(VoiceoverError::Backend(format!(
            "Empty output at {}",
            path.display()
        )));
    }

    if *format == AudioFormat::Wav {
        let reader = hound::WavReader::open(path)?;
        let spec = reader.spec();
        debug!(
            "WAV output: {} Hz, {} channel(s), {} samples",
            spec.sample_rate,
            spec.channels,
            reader.len()
        );
        if reader.len() == 0 {
            return Err(VoiceoverError::Backend(format!(
                "WAV output at {} has no samples",
                path.display()
            )));
        }
    }

    Ok(())
}

/// Remove whatever a failed attempt left behind (best effort)
pub fn discard_partial(path: &Path) {
    if path.exists() {
        debug!("Discarding partial output {}", path.display());
        if let Err(e) = fs::remove_file(path) {
            warn!("Failed to remove partial output {}: {}", path.display(), e);
        }
    }
}
