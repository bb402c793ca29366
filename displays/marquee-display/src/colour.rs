//! RGB colour triple

/// 8-bit per channel colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const GREY: Rgb = Rgb::new(128, 128, 128);

    /// Create a colour from its components
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Colour at `hue_deg` on the HSV wheel with full saturation and value
    ///
    /// Hues outside [0, 360) wrap around; NaN maps to red.
    pub fn from_hue(hue_deg: f32) -> Self {
        let mut hue = hue_deg % 360.0;
        if hue < 0.0 {
            hue += 360.0;
        }
        if hue.is_nan() {
            hue = 0.0;
        }

        let sector_f = hue / 60.0;
        let sector = sector_f as u32;
        let rising = sector_f - sector as f32;
        let falling = 1.0 - rising;

        let (r, g, b) = match sector {
            0 => (1.0, rising, 0.0),
            1 => (falling, 1.0, 0.0),
            2 => (0.0, 1.0, rising),
            3 => (0.0, falling, 1.0),
            4 => (rising, 0.0, 1.0),
            _ => (1.0, 0.0, falling),
        };

        Self::new(channel(r), channel(g), channel(b))
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self::new(r, g, b)
    }
}

/// Scale a unit intensity to 0..=255 with rounding
fn channel(unit: f32) -> u8 {
    let scaled = unit * 255.0 + 0.5;
    if scaled <= 0.0 {
        0
    } else if scaled >= 255.0 {
        255
    } else {
        scaled as u8
    }
}
