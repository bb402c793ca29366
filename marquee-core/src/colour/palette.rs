//! Named colour palette

use marquee_display::Rgb;

/// Ordered name to colour mapping
///
/// Several names may share a value (`gray`/`grey`, `cyan`/`aqua`); draws
/// that exclude a colour exclude it by value, so synonyms go together.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    entries: &'static [(&'static str, Rgb)],
}

/// The built-in palette
pub const STANDARD_PALETTE: Palette = Palette::new(&[
    ("red", Rgb::new(255, 0, 0)),
    ("green", Rgb::new(0, 255, 0)),
    ("blue", Rgb::new(0, 0, 255)),
    ("yellow", Rgb::new(255, 255, 0)),
    ("magenta", Rgb::new(255, 0, 255)),
    ("purple", Rgb::new(128, 0, 128)),
    ("cyan", Rgb::new(0, 255, 255)),
    ("orange", Rgb::new(255, 165, 0)),
    ("black", Rgb::new(0, 0, 0)),
    ("none", Rgb::new(0, 0, 0)),
    ("nil", Rgb::new(0, 0, 0)),
    ("null", Rgb::new(0, 0, 0)),
    ("white", Rgb::new(255, 255, 255)),
    ("gray", Rgb::new(128, 128, 128)),
    ("grey", Rgb::new(128, 128, 128)),
    ("pink", Rgb::new(255, 192, 203)),
    ("brown", Rgb::new(165, 42, 42)),
    ("lime", Rgb::new(0, 255, 0)),
    ("navy", Rgb::new(0, 0, 128)),
    ("teal", Rgb::new(0, 128, 128)),
    ("olive", Rgb::new(128, 128, 0)),
    ("maroon", Rgb::new(128, 0, 0)),
    ("aqua", Rgb::new(0, 255, 255)),
    ("silver", Rgb::new(192, 192, 192)),
    ("gold", Rgb::new(255, 215, 0)),
    ("beige", Rgb::new(245, 245, 220)),
    ("violet", Rgb::new(238, 130, 238)),
]);

impl Default for Palette {
    fn default() -> Self {
        STANDARD_PALETTE
    }
}

impl Palette {
    pub const fn new(entries: &'static [(&'static str, Rgb)]) -> Self {
        Self { entries }
    }

    /// Look up a colour by exact (lowercase) name
    pub fn get(&self, name: &str) -> Option<Rgb> {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .map(|(_, rgb)| *rgb)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn entries(&self) -> &'static [(&'static str, Rgb)] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup() {
        assert_eq!(STANDARD_PALETTE.get("teal"), Some(Rgb::new(0, 128, 128)));
        assert_eq!(STANDARD_PALETTE.get("Teal"), None);
        assert_eq!(STANDARD_PALETTE.get("chartreuse"), None);
    }

    #[test]
    fn test_synonyms_share_values() {
        assert_eq!(STANDARD_PALETTE.get("gray"), STANDARD_PALETTE.get("grey"));
        assert_eq!(STANDARD_PALETTE.get("cyan"), STANDARD_PALETTE.get("aqua"));
        assert_eq!(STANDARD_PALETTE.get("green"), STANDARD_PALETTE.get("lime"));
        for name in ["black", "none", "nil", "null"] {
            assert_eq!(STANDARD_PALETTE.get(name), Some(Rgb::BLACK));
        }
    }

    #[test]
    fn test_order_is_stable() {
        assert_eq!(STANDARD_PALETTE.len(), 27);
        assert_eq!(STANDARD_PALETTE.entries()[0].0, "red");
        assert_eq!(STANDARD_PALETTE.entries()[26].0, "violet");
    }
}
