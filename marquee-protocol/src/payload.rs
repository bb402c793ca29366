//! Directive payload format
//!
//! A directive body is either free text or a JSON object. For each field a
//! fixed list of synonym keys is checked in order and the first key present
//! wins, even when its value is `null`.
//!
//! ```json
//! {"msg": "Build finished", "msg_colour": "green", "bg_colour": "0,0,64"}
//! {"text": "Backup", "percent": 42, "outline_color": [0, 0, 0]}
//! ```

use alloc::string::{String, ToString};

use serde_json::{Map, Value};

/// Bodies longer than this are never parsed as JSON
pub const MAX_PAYLOAD_LEN: usize = 1024;

/// Message text keys
pub const TEXT_KEYS: [&str; 4] = ["msg", "message", "text", "txt"];

/// Progress value keys
pub const PROGRESS_KEYS: [&str; 3] = ["progress", "percent", "value"];

/// Text colour keys
pub const FOREGROUND_KEYS: [&str; 6] = [
    "msg_colour",
    "text_colour",
    "txt_colour",
    "msg_color",
    "text_color",
    "txt_color",
];

/// Background colour keys
pub const BACKGROUND_KEYS: [&str; 2] = ["bg_colour", "bg_color"];

/// Outline colour keys
pub const OUTLINE_KEYS: [&str; 2] = ["outline_colour", "outline_color"];

/// Reasons a body is not a structured directive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PayloadError {
    /// Body exceeds [`MAX_PAYLOAD_LEN`]
    TooLarge,
    /// Body is not a JSON object
    NotStructured,
}

/// Fields of a structured directive before colour resolution
///
/// Colour fields hold the raw token as text: strings are kept verbatim,
/// arrays and numbers are re-serialised (`[255,0,0]`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawDirective {
    /// Message text; empty when absent or `null`
    pub text: String,
    /// Progress value when present and numeric; out-of-range values,
    /// infinities included, are left for the caller to clamp
    pub progress: Option<f32>,
    pub foreground: Option<String>,
    pub background: Option<String>,
    pub outline: Option<String>,
}

impl RawDirective {
    /// Parse a JSON object body
    pub fn parse(body: &[u8]) -> Result<Self, PayloadError> {
        if body.len() > MAX_PAYLOAD_LEN {
            return Err(PayloadError::TooLarge);
        }

        let value: Value = serde_json::from_slice(body).map_err(|_| PayloadError::NotStructured)?;
        let Value::Object(fields) = value else {
            return Err(PayloadError::NotStructured);
        };

        Ok(Self {
            text: first_present(&fields, &TEXT_KEYS)
                .map(text_of)
                .unwrap_or_default(),
            progress: first_present(&fields, &PROGRESS_KEYS).and_then(number_of),
            foreground: first_present(&fields, &FOREGROUND_KEYS).and_then(token_of),
            background: first_present(&fields, &BACKGROUND_KEYS).and_then(token_of),
            outline: first_present(&fields, &OUTLINE_KEYS).and_then(token_of),
        })
    }
}

fn first_present<'a>(fields: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| fields.get(*key))
}

fn text_of(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn token_of(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn number_of(value: &Value) -> Option<f32> {
    let number = match value {
        Value::Number(n) => n.as_f64()? as f32,
        Value::String(s) => s.trim().parse::<f32>().ok()?,
        _ => return None,
    };
    (!number.is_nan()).then_some(number)
}
