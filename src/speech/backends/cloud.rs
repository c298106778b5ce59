//! Cloud TTS backend using the Google Translate speech endpoint
//!
//! The endpoint only accepts short inputs, so text is cut into chunks of at
//! most [`MAX_CHUNK_CHARS`] characters. Each chunk comes back as an MP3
//! stream and the streams are concatenated in order, which players handle
//! as one file.

use crate::config::Config;
use crate::speech::{AudioFormat, Synth};
use crate::{Result, VoiceoverError};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::blocking::Client;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Longest text the endpoint accepts per request
pub const MAX_CHUNK_CHARS: usize = 100;

const USER_AGENT: &str = concat!("voiceover/", env!("CARGO_PKG_VERSION"));

/// Sentence or clause boundary: punctuation followed by whitespace, or a line break
static SENTENCE_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.!?;:]+\s+|\n+").expect("Failed to compile sentence regex")
});

/// Cloud text-to-speech over HTTP
pub struct CloudSynth {
    /// `None` when disabled in config or the client could not be built
    client: Option<Client>,

    /// Full URL of the translate_tts endpoint
    endpoint: String,

    /// Language code (tl parameter)
    lang: String,
}

impl CloudSynth {
    pub fn new(config: &Config) -> Self {
        let endpoint = config.cloud_endpoint().unwrap_or_else(|| {
            format!("https://translate.google.{}/translate_tts", config.cloud_tld())
        });

        let client = if config.cloud_enabled() {
            match Client::builder()
                .timeout(config.cloud_timeout())
                .user_agent(USER_AGENT)
                .build()
            {
                Ok(client) => Some(client),
                Err(e) => {
                    warn!("Failed to build HTTP client for cloud TTS: {}", e);
                    None
                }
            }
        } else {
            debug!("Cloud TTS disabled in config");
            None
        };

        Self {
            client,
            endpoint,
            lang: config.cloud_lang(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn fetch_chunk(&self, client: &Client, chunk: &str, idx: usize, total: usize) -> Result<Vec<u8>> {
        let total = total.to_string();
        let idx = idx.to_string();
        let textlen = chunk.chars().count().to_string();

        let response = client
            .get(&self.endpoint)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", self.lang.as_str()),
                ("q", chunk),
                ("total", total.as_str()),
                ("idx", idx.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(VoiceoverError::Backend(format!(
                "Cloud TTS returned {} for chunk {}",
                status, idx
            )));
        }

        let bytes = response.bytes()?;
        if bytes.is_empty() {
            return Err(VoiceoverError::Backend(format!(
                "Cloud TTS returned no audio for chunk {}",
                idx
            )));
        }

        Ok(bytes.to_vec())
    }
}

impl Synth for CloudSynth {
    fn name(&self) -> &'static str {
        "cloud"
    }

    fn native_format(&self) -> AudioFormat {
        AudioFormat::Mp3
    }

    fn is_available(&self) -> bool {
        self.client.is_some()
    }

    fn synthesize(&self, text: &str, output: &Path) -> Result<()> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| VoiceoverError::Backend("Cloud TTS is disabled".to_string()))?;

        let chunks = split_chunks(text, MAX_CHUNK_CHARS);
        debug!("Sending {} chunk(s) to {}", chunks.len(), self.endpoint);

        let mut file = File::create(output)?;
        for (idx, chunk) in chunks.iter().enumerate() {
            let audio = self.fetch_chunk(client, chunk, idx, chunks.len())?;
            file.write_all(&audio)?;
        }
        file.flush()?;

        Ok(())
    }

    fn remedy(&self) -> String {
        format!(
            "Cloud TTS (set `enabled = true` under [cloud] and allow network access to {})",
            self.endpoint
        )
    }
}

/// Split text into request-sized chunks of at most `max_chars` characters
///
/// Whole sentences are kept together when they fit. Longer sentences fall
/// back to word boundaries, and words longer than `max_chars` are cut.
pub fn split_chunks(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);

    let mut units: Vec<String> = Vec::new();
    for sentence in sentences(text) {
        if sentence.chars().count() <= max_chars {
            units.push(sentence.to_string());
            continue;
        }
        for word in sentence.split_whitespace() {
            if word.chars().count() <= max_chars {
                units.push(word.to_string());
            } else {
                let chars: Vec<char> = word.chars().collect();
                units.extend(chars.chunks(max_chars).map(|piece| piece.iter().collect()));
            }
        }
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;
    for unit in units {
        let unit_len = unit.chars().count();
        if current.is_empty() {
            current = unit;
            current_len = unit_len;
        } else if current_len + 1 + unit_len <= max_chars {
            current.push(' ');
            current.push_str(&unit);
            current_len += 1 + unit_len;
        } else {
            chunks.push(std::mem::take(&mut current));
            current = unit;
            current_len = unit_len;
        }
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Sentences with their trailing punctuation, whitespace normalized
fn sentences(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut start = 0;

    let mut push = |piece: &str| {
        let normalized = piece.split_whitespace().collect::<Vec<_>>().join(" ");
        if !normalized.is_empty() {
            out.push(normalized);
        }
    };

    for boundary in SENTENCE_END.find_iter(text) {
        push(&text[start..boundary.end()]);
        start = boundary.end();
    }
    push(&text[start..]);

    out
}
