//! Speech synthesis system

pub mod audio;
pub mod backends;
pub mod convert;
pub mod request;
pub mod synth;
pub mod tools;

pub use convert::{Conversion, Converter};
pub use request::{AudioFormat, SynthesisRequest};
pub use synth::{
    create_chain, create_chain_for, synthesize_speech, synthesize_text, SpeechChain, Synth,
    SynthesisOutcome,
};
pub use tools::Toolbox;
