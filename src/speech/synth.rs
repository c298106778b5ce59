//! Speech synthesizer abstraction and the fallback chain
//!
//! Every backend implements [`Synth`]. The [`SpeechChain`] walks a fixed,
//! ordered list of them: the first backend that is available and produces
//! verified audio wins, everything else is logged and skipped.

use super::audio::{discard_partial, verify_output};
use super::backends::{platform_synth, CloudSynth, PiperSynth};
use super::convert::{remove_intermediate, Conversion, Converter};
use super::request::{AudioFormat, SynthesisRequest};
use super::tools::Toolbox;
use crate::config::Config;
use crate::platform::Platform;
use crate::{Result, VoiceoverError};
use log::{debug, info};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Text-to-speech backend
///
/// Backends write a file in their native container; turning that into the
/// caller's requested format is [`Synth::finish`]'s job.
pub trait Synth: Send {
    /// Short name used in logs and outcomes
    fn name(&self) -> &'static str;

    /// Container this backend writes without any conversion
    fn native_format(&self) -> AudioFormat;

    /// Probe whether the backend's dependency is present
    ///
    /// Checked before every attempt; an unavailable backend is skipped
    /// without calling [`Synth::synthesize`].
    fn is_available(&self) -> bool;

    /// Write `text` as audio to `output`, in [`Synth::native_format`]
    fn synthesize(&self, text: &str, output: &Path) -> Result<()>;

    /// What the user could install or change to make this backend work
    fn remedy(&self) -> String;

    /// Normalize the native file toward the requested format
    ///
    /// Returns the path of the file that is handed back to the caller.
    fn finish(&self, native: PathBuf, request: &SynthesisRequest, converter: &Converter) -> PathBuf {
        convert_to_mp3(native, request, converter)
    }
}

/// Convert `native` to MP3 when MP3 was requested and ffmpeg can do it
///
/// The intermediate is deleted after a successful conversion. Without a
/// converter the native file is returned as-is.
pub fn convert_to_mp3(native: PathBuf, request: &SynthesisRequest, converter: &Converter) -> PathBuf {
    if *request.requested_format() != AudioFormat::Mp3
        || AudioFormat::from_path(&native) == Some(AudioFormat::Mp3)
    {
        return native;
    }

    let mp3_path = request.path_for(&AudioFormat::Mp3);
    match converter.convert_format(&native, &mp3_path) {
        Conversion::Converted(path) => {
            remove_intermediate(&native);
            path
        }
        Conversion::Unavailable => {
            info!("No MP3 converter, keeping {}", native.display());
            native
        }
    }
}

/// What a successful synthesis produced
#[derive(Debug, Clone, Serialize)]
pub struct SynthesisOutcome {
    /// File actually written; its extension may differ from the request
    pub path: PathBuf,

    /// Backend that produced the audio
    pub backend: String,

    /// Container of `path`
    pub format: AudioFormat,
}

/// Ordered fallback chain of speech backends
pub struct SpeechChain {
    synths: Vec<Box<dyn Synth>>,
    converter: Converter,
}

impl SpeechChain {
    pub fn new(synths: Vec<Box<dyn Synth>>, converter: Converter) -> Self {
        Self { synths, converter }
    }

    /// Backend names in priority order
    pub fn backend_names(&self) -> Vec<&'static str> {
        self.synths.iter().map(|synth| synth.name()).collect()
    }

    /// Synthesize `text` toward `desired_path`
    ///
    /// Fails with [`VoiceoverError::EmptyInput`] for blank text and
    /// [`VoiceoverError::DirectoryCreation`] if the output directory cannot
    /// be made, both before any backend runs. Fails with
    /// [`VoiceoverError::NoBackendAvailable`] only after every backend was
    /// skipped or failed.
    pub fn synthesize(&self, text: &str, desired_path: impl AsRef<Path>) -> Result<SynthesisOutcome> {
        let request = SynthesisRequest::new(text, desired_path.as_ref())?;
        request.ensure_output_dir()?;
        debug!(
            "Synthesizing {} chars toward {} ({})",
            request.text().len(),
            request.desired_path().display(),
            request.requested_format()
        );

        for synth in &self.synths {
            let name = synth.name();

            if !synth.is_available() {
                info!("✗ {} backend unavailable", name);
                continue;
            }

            info!("Trying {} backend...", name);
            let format = synth.native_format();
            let native = request.path_for(&format);

            let attempt = synth
                .synthesize(request.text(), &native)
                .and_then(|()| verify_output(&native, &format));

            match attempt {
                Ok(()) => {
                    let path = synth.finish(native, &request, &self.converter);
                    let format = AudioFormat::from_path(&path).unwrap_or(format);
                    info!("✓ {} backend wrote {}", name, path.display());
                    return Ok(SynthesisOutcome {
                        path,
                        backend: name.to_string(),
                        format,
                    });
                }
                Err(e) => {
                    info!("✗ {} backend failed: {}", name, e);
                    discard_partial(&native);
                }
            }
        }

        Err(VoiceoverError::NoBackendAvailable(self.remedies()))
    }

    fn remedies(&self) -> String {
        let mut message = String::from("No TTS backend available. Install or enable one of:");
        for (idx, synth) in self.synths.iter().enumerate() {
            message.push_str(&format!("\n{}. {}", idx + 1, synth.remedy()));
        }
        if self.synths.is_empty() {
            message.push_str("\n(no backends are configured)");
        }
        message
    }
}

/// Build the standard chain for the running platform
///
/// Order: cloud TTS, Piper, then the platform's own speech tool.
pub fn create_chain(config: &Config) -> SpeechChain {
    create_chain_for(config, Platform::current())
}

/// Build the standard chain as if running on `platform`
pub fn create_chain_for(config: &Config, platform: Platform) -> SpeechChain {
    let toolbox = match config.tool_path() {
        Some(path) => Toolbox::with_search_path(path),
        None => Toolbox::system(),
    };

    let mut synths: Vec<Box<dyn Synth>> = vec![
        Box::new(CloudSynth::new(config)),
        Box::new(PiperSynth::new(config, toolbox.clone())),
    ];

    match platform_synth(platform, toolbox.clone()) {
        Some(native) => synths.push(native),
        None => info!("No native speech tool for platform {}", platform),
    }

    SpeechChain::new(synths, Converter::new(toolbox))
}

/// Synthesize with the configured chain and return the written path
///
/// Blank text is rejected before the config file is read. A missing config
/// file means defaults; it is never created here.
pub fn synthesize_speech(text: &str, desired_path: impl AsRef<Path>) -> Result<PathBuf> {
    if text.trim().is_empty() {
        return Err(VoiceoverError::EmptyInput);
    }

    let config = Config::load_or_default()?;
    create_chain(&config)
        .synthesize(text, desired_path)
        .map(|outcome| outcome.path)
}

/// Synthesize to `filename`, or to a timestamped MP3 in the current directory
pub fn synthesize_text(
    chain: &SpeechChain,
    text: &str,
    filename: Option<&Path>,
) -> Result<SynthesisOutcome> {
    match filename {
        Some(path) => chain.synthesize(text, path),
        None => chain.synthesize(text, default_output_name()),
    }
}

/// `sample_tts_<YYYYmmdd_HHMMSS>.mp3`
pub fn default_output_name() -> PathBuf {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("sample_tts_{}.mp3", timestamp))
}
