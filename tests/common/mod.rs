//! Shared fixtures for the speech chain tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use voiceover::config::Config;
use voiceover::speech::{AudioFormat, Synth};
use voiceover::{Result, VoiceoverError};

/// Write a short mono 16-bit WAV
pub fn write_wav(path: &Path) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 22_050,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for i in 0..2_205 {
        writer.write_sample(((i % 64) * 100) as i16).unwrap();
    }
    writer.finalize().unwrap();
}

/// What a [`FakeSynth`] does when asked to synthesize
#[derive(Clone, Copy)]
pub enum Behavior {
    /// Write valid audio in the native format
    Succeed,
    /// Write a partial file, then fail
    FailAfterWriting,
    /// Report success but leave a WAV with no samples
    HeaderOnly,
}

/// In-process backend with a call counter
pub struct FakeSynth {
    pub name: &'static str,
    pub format: AudioFormat,
    pub available: bool,
    pub behavior: Behavior,
    pub calls: Arc<AtomicUsize>,
}

impl FakeSynth {
    pub fn new(name: &'static str, format: AudioFormat, available: bool) -> Self {
        Self {
            name,
            format,
            available,
            behavior: Behavior::Succeed,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn behaving(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl Synth for FakeSynth {
    fn name(&self) -> &'static str {
        self.name
    }

    fn native_format(&self) -> AudioFormat {
        self.format.clone()
    }

    fn is_available(&self) -> bool {
        self.available
    }

    fn synthesize(&self, _text: &str, output: &Path) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            Behavior::Succeed => {
                if self.format == AudioFormat::Wav {
                    write_wav(output);
                } else {
                    std::fs::write(output, b"ID3\x03\x00\x00fake audio")?;
                }
                Ok(())
            }
            Behavior::FailAfterWriting => {
                std::fs::write(output, b"partial")?;
                Err(VoiceoverError::Backend(format!("{} crashed", self.name)))
            }
            Behavior::HeaderOnly => {
                let spec = hound::WavSpec {
                    channels: 1,
                    sample_rate: 22_050,
                    bits_per_sample: 16,
                    sample_format: hound::SampleFormat::Int,
                };
                hound::WavWriter::create(output, spec)?.finalize()?;
                Ok(())
            }
        }
    }

    fn remedy(&self) -> String {
        format!("install {}", self.name)
    }
}

/// Config that keeps every backend away from the real system:
/// cloud off, Piper model missing, tools only from `tools_dir`
pub fn isolated_config(tools_dir: &Path) -> Config {
    let mut config = Config::default();
    config.set("cloud", "enabled", "false");
    config.set(
        "local",
        "model",
        &tools_dir.join("missing-voice.onnx").display().to_string(),
    );
    config.set("tools", "path", &tools_dir.display().to_string());
    config
}

/// Lines written to `calls.log` by the fake tools
pub fn tool_calls(tools_dir: &Path) -> Vec<String> {
    std::fs::read_to_string(tools_dir.join("calls.log"))
        .map(|log| log.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

#[cfg(unix)]
pub mod tools {
    //! Shell-script stand-ins for the external programs

    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Install an executable script named `name` into `dir`
    pub fn install(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        let log = dir.join("calls.log");
        let script = format!(
            "#!/bin/sh\necho {} >> '{}'\n{}\n",
            name,
            log.display(),
            body
        );
        std::fs::write(&path, script).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    /// espeak-style tool: keeps its stdin in `<name>.stdin`, copies `fixture`
    /// to the file named after `-w`
    pub fn espeak(dir: &Path, name: &str, fixture: &Path) -> PathBuf {
        let body = format!(
            "cat > '{}'\nwhile [ $# -gt 0 ]; do\n  if [ \"$1\" = \"-w\" ]; then out=\"$2\"; shift; fi\n  shift\ndone\ncp '{}' \"$out\"",
            dir.join(format!("{}.stdin", name)).display(),
            fixture.display()
        );
        install(dir, name, &body)
    }

    /// `say -o OUT -f -`: drains stdin, copies `fixture` to OUT
    pub fn say(dir: &Path, fixture: &Path) -> PathBuf {
        let body = format!("cat > /dev/null\ncp '{}' \"$2\"", fixture.display());
        install(dir, "say", &body)
    }

    /// Piper-style tool: drains stdin, copies `fixture` to `--output_file`
    pub fn piper(dir: &Path, fixture: &Path) -> PathBuf {
        let body = format!("cat > /dev/null\ncp '{}' \"$4\"", fixture.display());
        install(dir, "piper", &body)
    }

    /// ffmpeg-style tool: copies the input (`-y -i SRC ...`) to the last argument
    pub fn ffmpeg(dir: &Path) -> PathBuf {
        install(dir, "ffmpeg", "for a; do last=$a; done\ncp \"$3\" \"$last\"")
    }

    /// Transcoder that starts writing its output (last argument), then dies
    pub fn truncating(dir: &Path, name: &str) -> PathBuf {
        install(
            dir,
            name,
            "for a; do last=$a; done\nprintf 'ID3partial' > \"$last\"\nexit 1",
        )
    }

    /// Tool that always fails
    pub fn broken(dir: &Path, name: &str) -> PathBuf {
        install(dir, name, "exit 1")
    }
}
