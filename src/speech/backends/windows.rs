//! Windows TTS backend using SAPI (System.Speech.Synthesis)
//!
//! Generates a short PowerShell script that points a SpeechSynthesizer at a
//! WAV file, speaks the text into it and exits. Text and path are embedded
//! as single-quoted PowerShell strings.

use crate::speech::tools::Toolbox;
use crate::speech::{AudioFormat, Synth};
use crate::{Result, VoiceoverError};
use log::debug;
use std::path::{Path, PathBuf};

/// PowerShell executable names to try
const POWERSHELL_NAMES: &[&str] = &["powershell", "powershell.exe"];

/// Windows SAPI backend
pub struct SapiSynth {
    toolbox: Toolbox,
}

impl SapiSynth {
    pub fn new(toolbox: Toolbox) -> Self {
        Self { toolbox }
    }

    fn find_powershell(&self) -> Option<PathBuf> {
        self.toolbox.find_any(POWERSHELL_NAMES)
    }

    /// Quote a string for a single-quoted PowerShell literal
    fn escape_text(text: &str) -> String {
        text.replace('\'', "''")
    }

    /// Script that renders `text` into the WAV file at `output`
    fn build_script(text: &str, output: &Path) -> String {
        let out = Self::escape_text(&output.display().to_string());
        let text = Self::escape_text(text);

        format!(
            r#"
Add-Type -AssemblyName System.Speech
$spk = New-Object System.Speech.Synthesis.SpeechSynthesizer
$spk.Rate = 0
$spk.SetOutputToWaveFile('{out}')
$spk.Speak('{text}')
$spk.Dispose()
"#
        )
    }
}

impl Synth for SapiSynth {
    fn name(&self) -> &'static str {
        "sapi"
    }

    fn native_format(&self) -> AudioFormat {
        AudioFormat::Wav
    }

    fn is_available(&self) -> bool {
        self.find_powershell().is_some()
    }

    fn synthesize(&self, text: &str, output: &Path) -> Result<()> {
        let powershell = self.find_powershell().ok_or_else(|| {
            VoiceoverError::Backend("PowerShell not found".to_string())
        })?;
        debug!("Found PowerShell at: {}", powershell.display());

        let script = Self::build_script(text, output);
        self.toolbox.run(
            &powershell,
            ["-NoProfile", "-NonInteractive", "-Command", script.as_str()],
        )
    }

    fn remedy(&self) -> String {
        "Windows PowerShell with System.Speech (SAPI)".to_string()
    }
}
