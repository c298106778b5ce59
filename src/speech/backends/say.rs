//! macOS backend using the built-in `say` command
//!
//! `say` writes AIFF. When MP3 was requested, afconvert's AAC/M4A output is
//! preferred because it ships with the OS; ffmpeg is the second choice.
//! Text is read from stdin (`-f -`).

use crate::speech::convert::{remove_intermediate, Conversion, Converter};
use crate::speech::synth::convert_to_mp3;
use crate::speech::tools::Toolbox;
use crate::speech::{AudioFormat, SynthesisRequest, Synth};
use crate::{Result, VoiceoverError};
use log::info;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

pub struct SaySynth {
    toolbox: Toolbox,
}

impl SaySynth {
    pub fn new(toolbox: Toolbox) -> Self {
        Self { toolbox }
    }
}

impl Synth for SaySynth {
    fn name(&self) -> &'static str {
        "say"
    }

    fn native_format(&self) -> AudioFormat {
        AudioFormat::Aiff
    }

    fn is_available(&self) -> bool {
        self.toolbox.has("say")
    }

    fn synthesize(&self, text: &str, output: &Path) -> Result<()> {
        let say = self
            .toolbox
            .find("say")
            .ok_or_else(|| VoiceoverError::Backend("say not found".to_string()))?;

        let args: [&OsStr; 4] = [
            "-o".as_ref(),
            output.as_os_str(),
            "-f".as_ref(),
            "-".as_ref(),
        ];
        self.toolbox.run_with_stdin(&say, args, text)
    }

    fn remedy(&self) -> String {
        "macOS `say` (built in; check that /usr/bin is on PATH)".to_string()
    }

    fn finish(&self, native: PathBuf, request: &SynthesisRequest, converter: &Converter) -> PathBuf {
        if *request.requested_format() != AudioFormat::Mp3 {
            return native;
        }

        let m4a_path = request.path_for(&AudioFormat::M4a);
        match converter.afconvert_m4a(&native, &m4a_path) {
            Conversion::Converted(path) => {
                info!("Converted to AAC with afconvert");
                remove_intermediate(&native);
                path
            }
            Conversion::Unavailable => convert_to_mp3(native, request, converter),
        }
    }
}
