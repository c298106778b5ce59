//! Local neural TTS backend using Piper
//!
//! Piper reads text on stdin and writes a WAV file. It needs both the
//! executable and an .onnx voice model; without either the backend is
//! reported unavailable and the chain moves on.

use crate::config::Config;
use crate::speech::tools::Toolbox;
use crate::speech::{AudioFormat, Synth};
use crate::{Result, VoiceoverError};
use log::debug;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

pub struct PiperSynth {
    toolbox: Toolbox,

    /// Executable name or path
    binary: String,

    /// Voice model (.onnx, with its .onnx.json next to it)
    model: PathBuf,
}

impl PiperSynth {
    pub fn new(config: &Config, toolbox: Toolbox) -> Self {
        Self {
            toolbox,
            binary: config.piper_binary(),
            model: config.piper_model(),
        }
    }

    pub fn model(&self) -> &Path {
        &self.model
    }
}

impl Synth for PiperSynth {
    fn name(&self) -> &'static str {
        "piper"
    }

    fn native_format(&self) -> AudioFormat {
        AudioFormat::Wav
    }

    fn is_available(&self) -> bool {
        if !self.model.is_file() {
            debug!("Piper model not found at {}", self.model.display());
            return false;
        }
        self.toolbox.has(&self.binary)
    }

    fn synthesize(&self, text: &str, output: &Path) -> Result<()> {
        let piper = self
            .toolbox
            .find(&self.binary)
            .ok_or_else(|| VoiceoverError::Backend(format!("{} not found", self.binary)))?;

        let args: [&OsStr; 4] = [
            "--model".as_ref(),
            self.model.as_os_str(),
            "--output_file".as_ref(),
            output.as_os_str(),
        ];
        self.toolbox.run_with_stdin(&piper, args, text)
    }

    fn remedy(&self) -> String {
        format!(
            "Piper (install the `{}` binary and a voice model at {})",
            self.binary,
            self.model.display()
        )
    }
}
