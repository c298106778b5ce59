//! Audio format conversion through external transcoders
//!
//! Conversion never fails a request: a missing or failing transcoder just
//! means the caller keeps the backend's native file.

use super::audio::discard_partial;
use super::tools::Toolbox;
use log::{debug, warn};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// Output sample rate requested from ffmpeg
pub const SAMPLE_RATE: u32 = 44_100;

/// Output channel count requested from ffmpeg
pub const CHANNELS: u8 = 2;

/// Output audio bitrate requested from ffmpeg
pub const BITRATE: &str = "192k";

/// Outcome of a conversion attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conversion {
    /// The converted file now exists at this path
    Converted(PathBuf),
    /// No converter, or it failed; the source file is untouched
    Unavailable,
}

impl Conversion {
    pub fn is_converted(&self) -> bool {
        matches!(self, Conversion::Converted(_))
    }
}

/// Front end for the general-purpose (ffmpeg) and macOS (afconvert) transcoders
#[derive(Debug, Clone, Default)]
pub struct Converter {
    toolbox: Toolbox,
}

impl Converter {
    pub fn new(toolbox: Toolbox) -> Self {
        Self { toolbox }
    }

    /// Is the general-purpose converter installed?
    pub fn is_available(&self) -> bool {
        self.toolbox.has("ffmpeg")
    }

    /// Transcode `src` into `dst` with ffmpeg; the container follows `dst`'s extension
    pub fn convert_format(&self, src: &Path, dst: &Path) -> Conversion {
        let Some(ffmpeg) = self.toolbox.find("ffmpeg") else {
            debug!("ffmpeg not installed, keeping {}", src.display());
            return Conversion::Unavailable;
        };

        let sample_rate = SAMPLE_RATE.to_string();
        let channels = CHANNELS.to_string();
        let args: [&OsStr; 11] = [
            "-y".as_ref(),
            "-i".as_ref(),
            src.as_os_str(),
            "-vn".as_ref(),
            "-ar".as_ref(),
            sample_rate.as_ref(),
            "-ac".as_ref(),
            channels.as_ref(),
            "-b:a".as_ref(),
            BITRATE.as_ref(),
            dst.as_os_str(),
        ];

        Self::finish(self.toolbox.run(&ffmpeg, args), src, dst)
    }

    /// Transcode `src` into an AAC/M4A container with macOS afconvert
    pub fn afconvert_m4a(&self, src: &Path, dst: &Path) -> Conversion {
        let Some(afconvert) = self.toolbox.find("afconvert") else {
            debug!("afconvert not installed");
            return Conversion::Unavailable;
        };

        let args: [&OsStr; 6] = [
            "-f".as_ref(),
            "m4af".as_ref(),
            "-d".as_ref(),
            "aac".as_ref(),
            src.as_os_str(),
            dst.as_os_str(),
        ];

        Self::finish(self.toolbox.run(&afconvert, args), src, dst)
    }

    fn finish(result: crate::Result<()>, src: &Path, dst: &Path) -> Conversion {
        match result {
            Ok(()) if dst.exists() => {
                debug!("Converted {} -> {}", src.display(), dst.display());
                Conversion::Converted(dst.to_path_buf())
            }
            Ok(()) => {
                warn!("Converter reported success but {} is missing", dst.display());
                discard_partial(dst);
                Conversion::Unavailable
            }
            Err(e) => {
                debug!("Conversion of {} failed: {}", src.display(), e);
                // A transcoder that dies midway may leave a truncated file
                discard_partial(dst);
                Conversion::Unavailable
            }
        }
    }
}

/// Delete an intermediate file after a successful conversion
pub fn remove_intermediate(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        warn!("Failed to remove intermediate {}: {}", path.display(), e);
    }
}
