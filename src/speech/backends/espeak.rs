//! Linux backend using espeak-ng (or legacy espeak)
//!
//! Writes WAV directly with `-w`, so no audio server is involved. The text
//! goes in on stdin so a leading `-` is never read as an option.
//!
//! Dependencies:
//! - espeak-ng (install with: sudo apt install espeak-ng)

use crate::speech::tools::Toolbox;
use crate::speech::{AudioFormat, Synth};
use crate::{Result, VoiceoverError};
use log::debug;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Executable names, modern first
const ESPEAK_NAMES: &[&str] = &["espeak-ng", "espeak"];

pub struct EspeakSynth {
    toolbox: Toolbox,
}

impl EspeakSynth {
    pub fn new(toolbox: Toolbox) -> Self {
        Self { toolbox }
    }

    /// Find espeak-ng, falling back to espeak
    fn find_espeak(&self) -> Option<PathBuf> {
        self.toolbox.find_any(ESPEAK_NAMES)
    }
}

impl Synth for EspeakSynth {
    fn name(&self) -> &'static str {
        "espeak"
    }

    fn native_format(&self) -> AudioFormat {
        AudioFormat::Wav
    }

    fn is_available(&self) -> bool {
        self.find_espeak().is_some()
    }

    fn synthesize(&self, text: &str, output: &Path) -> Result<()> {
        let espeak = self.find_espeak().ok_or_else(|| {
            VoiceoverError::Backend(
                "espeak-ng not found. Install with: sudo apt install espeak-ng".to_string(),
            )
        })?;
        debug!("Found espeak at: {}", espeak.display());

        let args: [&OsStr; 3] = ["-w".as_ref(), output.as_os_str(), "--stdin".as_ref()];
        self.toolbox.run_with_stdin(&espeak, args, text)
    }

    fn remedy(&self) -> String {
        "espeak-ng or espeak (install with: sudo apt install espeak-ng)".to_string()
    }
}
