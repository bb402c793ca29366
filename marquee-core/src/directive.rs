//! Display directives
//!
//! A [`Directive`] is what one inbound message asks the display to show.
//! [`PayloadDecoder`] builds it from a raw body and never fails: anything
//! it cannot understand degrades to plain text and default colours.

use alloc::string::String;

use log::{debug, warn};
use marquee_display::Rgb;
use marquee_protocol::{PayloadError, RawDirective, MAX_PAYLOAD_LEN};

use crate::colour::ColourResolver;
use crate::traits::RandomSource;

pub const DEFAULT_BACKGROUND: Rgb = Rgb::BLACK;
pub const DEFAULT_OUTLINE: Rgb = Rgb::BLACK;
pub const DEFAULT_FOREGROUND: Rgb = Rgb::WHITE;

/// Decoded message
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    /// Text to show; empty means clear the display
    pub text: String,
    /// Percentage for progress mode, always within 0..=100
    pub progress: f32,
    pub background: Rgb,
    pub outline: Rgb,
    pub foreground: Rgb,
}

impl Default for Directive {
    fn default() -> Self {
        Self::plain(String::new())
    }
}

impl Directive {
    /// Text with default colours and zero progress
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            progress: 0.0,
            background: DEFAULT_BACKGROUND,
            outline: DEFAULT_OUTLINE,
            foreground: DEFAULT_FOREGROUND,
        }
    }

    /// Whether this directive only clears the display
    pub fn is_clear(&self) -> bool {
        self.text.is_empty()
    }
}

/// Turns message bodies into directives
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadDecoder {
    resolver: ColourResolver,
}

impl PayloadDecoder {
    pub const fn new(resolver: ColourResolver) -> Self {
        Self { resolver }
    }

    /// Decode a message body
    pub fn decode<R>(&self, body: &[u8], rng: &mut R) -> Directive
    where
        R: RandomSource + ?Sized,
    {
        match RawDirective::parse(body) {
            Ok(raw) => Directive {
                text: raw.text,
                progress: clamp_progress(raw.progress.unwrap_or(0.0)),
                background: self.colour(raw.background, DEFAULT_BACKGROUND, rng),
                outline: self.colour(raw.outline, DEFAULT_OUTLINE, rng),
                foreground: self.colour(raw.foreground, DEFAULT_FOREGROUND, rng),
            },
            Err(PayloadError::TooLarge) => {
                warn!(
                    "payload of {} bytes exceeds {}, showing it as truncated text",
                    body.len(),
                    MAX_PAYLOAD_LEN
                );
                Directive::plain(truncated_text(body, MAX_PAYLOAD_LEN))
            }
            Err(PayloadError::NotStructured) => {
                debug!("payload is not a JSON object, showing it as text");
                Directive::plain(String::from_utf8_lossy(body))
            }
        }
    }

    fn colour<R>(&self, token: Option<String>, default: Rgb, rng: &mut R) -> Rgb
    where
        R: RandomSource + ?Sized,
    {
        match self.resolver.resolve(token.as_deref(), rng) {
            Some(rgb) => rgb,
            None => {
                if let Some(token) = token {
                    debug!("unresolved colour {:?}, using default", token);
                }
                default
            }
        }
    }
}

fn clamp_progress(progress: f32) -> f32 {
    progress.clamp(0.0, 100.0)
}

/// Lossy UTF-8 text of `body`, cut to at most `max_len` bytes on a char boundary
fn truncated_text(body: &[u8], max_len: usize) -> String {
    let mut text = String::from_utf8_lossy(body).into_owned();
    if text.len() > max_len {
        let mut end = max_len;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
    }
    text
}
