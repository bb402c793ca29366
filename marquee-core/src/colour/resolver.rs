//! Colour token resolver
//!
//! Resolution runs in two phases:
//!
//! 1. Numeric: after stripping brackets and whitespace, a token of exactly
//!    three comma separated integers (decimal or `0x` hex) is an RGB triple.
//!    A triple with any component outside 0..=255 is rejected outright.
//! 2. Names: anything else is read as a phrase. A first part of `0` or
//!    nothing means black; otherwise the phrase is split into lowercase
//!    words and a colour is drawn from the palette (see [`ColourResolver::pick`]).

use alloc::string::String;
use alloc::vec::Vec;

use log::trace;
use marquee_display::Rgb;

use super::palette::{Palette, STANDARD_PALETTE};
use crate::traits::RandomSource;

/// Words that ask for any palette colour when no colour is named
pub const RANDOM_WORDS: [&str; 5] = ["random", "select", "pick", "choose", "any"];

/// Words that turn the named colours into an exclusion list
pub const EXCLUSION_WORDS: [&str; 8] = [
    "not", "no", "ignore", "exclude", "minus", "except", "remove", "nor",
];

const BRACKETS: [char; 6] = ['[', ']', '(', ')', '{', '}'];

/// Outcome of the numeric phase
enum Numeric {
    Colour(Rgb),
    OutOfRange,
    NotNumeric,
}

/// Resolves colour tokens against a palette
#[derive(Debug, Clone, Copy, Default)]
pub struct ColourResolver {
    palette: Palette,
}

impl ColourResolver {
    pub const fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// Resolver over the built-in palette
    pub const fn standard() -> Self {
        Self::new(STANDARD_PALETTE)
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Resolve a token to a colour
    ///
    /// Returns `None` for a missing or empty token, an out-of-range triple,
    /// or a phrase that names no colour and asks for no random pick. The
    /// caller substitutes its own default.
    pub fn resolve<R>(&self, token: Option<&str>, rng: &mut R) -> Option<Rgb>
    where
        R: RandomSource + ?Sized,
    {
        let token = token.filter(|t| !t.is_empty())?;
        let cleaned: String = token
            .chars()
            .filter(|c| !c.is_whitespace() && !BRACKETS.contains(c))
            .collect();

        match parse_triple(&cleaned) {
            Numeric::Colour(rgb) => return Some(rgb),
            Numeric::OutOfRange => {
                trace!("colour {:?} out of range", token);
                return None;
            }
            Numeric::NotNumeric => {}
        }

        let first = cleaned.split(',').next().unwrap_or_default();
        if first.is_empty() || first == "0" {
            return Some(Rgb::BLACK);
        }

        self.pick(&cleaned, rng)
    }

    /// Draw a colour described by a phrase
    ///
    /// The phrase is split into maximal runs of `a`-`z`; every other
    /// character separates words. Palette words are the named colours (with
    /// repeats), everything else is an intent word:
    ///
    /// - no named colour: a random word (`random`, `pick`, ...) draws from the
    ///   whole palette, otherwise there is no colour
    /// - an exclusion word (`not`, `except`, ...): draw from the palette
    ///   entries whose value differs from every named colour
    /// - otherwise draw from the named colours, so naming one twice doubles
    ///   its odds
    pub fn pick<R>(&self, phrase: &str, rng: &mut R) -> Option<Rgb>
    where
        R: RandomSource + ?Sized,
    {
        let mut named: Vec<Rgb> = Vec::new();
        let mut random_intent = false;
        let mut exclusion_intent = false;

        for word in phrase
            .split(|c: char| !c.is_ascii_lowercase())
            .filter(|w| !w.is_empty())
        {
            match self.palette.get(word) {
                Some(rgb) => named.push(rgb),
                None => {
                    random_intent |= RANDOM_WORDS.contains(&word);
                    exclusion_intent |= EXCLUSION_WORDS.contains(&word);
                }
            }
        }

        let candidates: Vec<Rgb> = if named.is_empty() {
            if !random_intent {
                return None;
            }
            self.palette.entries().iter().map(|(_, rgb)| *rgb).collect()
        } else if exclusion_intent {
            self.palette
                .entries()
                .iter()
                .map(|(_, rgb)| *rgb)
                .filter(|rgb| !named.contains(rgb))
                .collect()
        } else {
            named
        };

        draw(&candidates, rng)
    }
}

fn draw<R: RandomSource + ?Sized>(candidates: &[Rgb], rng: &mut R) -> Option<Rgb> {
    if candidates.is_empty() {
        return None;
    }
    let index = usize::from(rng.next_u8()) % candidates.len();
    Some(candidates[index])
}

fn parse_triple(cleaned: &str) -> Numeric {
    let mut parts = cleaned.split(',');
    let (Some(r), Some(g), Some(b), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Numeric::NotNumeric;
    };

    let (Some(r), Some(g), Some(b)) = (parse_int(r), parse_int(g), parse_int(b)) else {
        return Numeric::NotNumeric;
    };

    match (u8::try_from(r), u8::try_from(g), u8::try_from(b)) {
        (Ok(r), Ok(g), Ok(b)) => Numeric::Colour(Rgb::new(r, g, b)),
        _ => Numeric::OutOfRange,
    }
}

fn parse_int(part: &str) -> Option<i64> {
    let hex = part.strip_prefix("0x").or_else(|| part.strip_prefix("0X"));
    match hex {
        Some(digits) if digits.starts_with(['+', '-']) => None,
        Some(digits) => i64::from_str_radix(digits, 16).ok(),
        None => part.parse().ok(),
    }
}
