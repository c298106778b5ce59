//! Speech backends

// Cloud TTS over HTTP
pub mod cloud;

// Local neural engine
pub mod piper;

// Platform-native tools
pub mod espeak;
pub mod say;
pub mod windows;

pub use cloud::CloudSynth;
pub use espeak::EspeakSynth;
pub use piper::PiperSynth;
pub use say::SaySynth;
pub use windows::SapiSynth;

use super::tools::Toolbox;
use super::Synth;
use crate::platform::Platform;

/// The last-resort backend for `platform`, if it has one
pub fn platform_synth(platform: Platform, toolbox: Toolbox) -> Option<Box<dyn Synth>> {
    match platform {
        Platform::MacOs => Some(Box::new(SaySynth::new(toolbox))),
        Platform::Linux => Some(Box::new(EspeakSynth::new(toolbox))),
        Platform::Windows => Some(Box::new(SapiSynth::new(toolbox))),
        Platform::Other => None,
    }
}
