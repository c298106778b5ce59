//! voiceover - narration audio for video scripts
//!
//! Turns a narration script into a speech audio file by walking a fixed
//! fallback chain of text-to-speech backends: cloud TTS, a local Piper
//! engine, then the platform's own speech tool (macOS `say`, Linux
//! espeak-ng/espeak, Windows SAPI).

pub mod config;
pub mod error;
pub mod platform;
pub mod script;
pub mod speech;

pub use error::{Result, VoiceoverError};
pub use speech::{synthesize_speech, SpeechChain, SynthesisOutcome};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "voiceover";
