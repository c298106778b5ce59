//! Synthesis requests and audio container formats

use crate::{Result, VoiceoverError};
use log::debug;
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Audio container, identified by file extension
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum AudioFormat {
    Mp3,
    Wav,
    Aiff,
    M4a,
    Other(String),
}

impl AudioFormat {
    /// Parse an extension (without the dot, any case)
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "mp3" => AudioFormat::Mp3,
            "wav" => AudioFormat::Wav,
            "aiff" => AudioFormat::Aiff,
            "m4a" => AudioFormat::M4a,
            other => AudioFormat::Other(other.to_string()),
        }
    }

    /// Format implied by a path, if it has an extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty())
            .map(Self::from_extension)
    }

    /// File extension without the dot
    pub fn extension(&self) -> &str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::Wav => "wav",
            AudioFormat::Aiff => "aiff",
            AudioFormat::M4a => "m4a",
            AudioFormat::Other(ext) => ext,
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl From<AudioFormat> for String {
    fn from(format: AudioFormat) -> Self {
        format.extension().to_string()
    }
}

/// One call's worth of text and where the caller wants the audio
///
/// Blank text is rejected on construction, before any backend or the
/// filesystem is touched.
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    text: String,
    desired_path: PathBuf,
    requested_format: AudioFormat,
}

impl SynthesisRequest {
    pub fn new(text: &str, desired_path: impl Into<PathBuf>) -> Result<Self> {
        if text.trim().is_empty() {
            return Err(VoiceoverError::EmptyInput);
        }

        let desired_path = desired_path.into();
        let requested_format = AudioFormat::from_path(&desired_path).unwrap_or(AudioFormat::Mp3);

        Ok(Self {
            text: text.to_string(),
            desired_path,
            requested_format,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn desired_path(&self) -> &Path {
        &self.desired_path
    }

    pub fn requested_format(&self) -> &AudioFormat {
        &self.requested_format
    }

    /// Where a file of `format` should be written for this request
    ///
    /// The desired path is used verbatim when it already asks for `format`;
    /// otherwise its extension is swapped.
    pub fn path_for(&self, format: &AudioFormat) -> PathBuf {
        if &self.requested_format == format && self.desired_path.extension().is_some() {
            self.desired_path.clone()
        } else {
            self.desired_path.with_extension(format.extension())
        }
    }

    /// Create the output directory and any missing ancestors
    pub fn ensure_output_dir(&self) -> Result<()> {
        let Some(dir) = self.desired_path.parent() else {
            return Ok(());
        };
        if dir.as_os_str().is_empty() || dir.is_dir() {
            return Ok(());
        }

        debug!("Creating output directory {:?}", dir);
        fs::create_dir_all(dir).map_err(|source| VoiceoverError::DirectoryCreation {
            path: dir.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_rejected() {
        assert!(matches!(
            SynthesisRequest::new("", "out/voice.mp3"),
            Err(VoiceoverError::EmptyInput)
        ));
        assert!(matches!(
            SynthesisRequest::new(" \n\t ", "out/voice.mp3"),
            Err(VoiceoverError::EmptyInput)
        ));
    }

    #[test]
    fn test_requested_format_defaults_to_mp3() {
        let request = SynthesisRequest::new("Hello", "out/voice").unwrap();
        assert_eq!(request.requested_format(), &AudioFormat::Mp3);
        assert_eq!(request.path_for(&AudioFormat::Mp3), PathBuf::from("out/voice.mp3"));
    }

    #[test]
    fn test_requested_format_is_case_insensitive() {
        let request = SynthesisRequest::new("Hello", "out/voice.MP3").unwrap();
        assert_eq!(request.requested_format(), &AudioFormat::Mp3);
        // Keeps the caller's spelling when it already matches
        assert_eq!(request.path_for(&AudioFormat::Mp3), PathBuf::from("out/voice.MP3"));
    }

    #[test]
    fn test_path_for_swaps_extension() {
        let request = SynthesisRequest::new("Hello", "out/voice.mp3").unwrap();
        assert_eq!(request.path_for(&AudioFormat::Wav), PathBuf::from("out/voice.wav"));
        assert_eq!(request.path_for(&AudioFormat::Aiff), PathBuf::from("out/voice.aiff"));

        let request = SynthesisRequest::new("Hello", "out/voice.ogg").unwrap();
        assert_eq!(
            request.requested_format(),
            &AudioFormat::Other("ogg".to_string())
        );
        assert_eq!(request.path_for(&AudioFormat::Mp3), PathBuf::from("out/voice.mp3"));
    }

    #[test]
    fn test_ensure_output_dir_creates_ancestors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("voice.mp3");
        let request = SynthesisRequest::new("Hello", &path).unwrap();

        request.ensure_output_dir().unwrap();
        assert!(dir.path().join("a").join("b").is_dir());
    }

    #[test]
    fn test_ensure_output_dir_reports_failure() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").unwrap();

        let request = SynthesisRequest::new("Hello", blocker.join("voice.mp3")).unwrap();
        assert!(matches!(
            request.ensure_output_dir(),
            Err(VoiceoverError::DirectoryCreation { .. })
        ));
    }

    #[test]
    fn test_bare_file_name_needs_no_directory() {
        let request = SynthesisRequest::new("Hello", "voice.mp3").unwrap();
        assert!(request.ensure_output_dir().is_ok());
    }
}
