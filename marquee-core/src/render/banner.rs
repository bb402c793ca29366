//! Outlined banner text

use alloc::string::String;

use marquee_display::{DisplayError, PixelSurface, Rgb, Rotation};

/// Offsets at which the outline copy of the text is drawn
pub const OUTLINE_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Surround `text` with blank runs so it scrolls fully on and off the panel
pub fn padded_message(text: &str, lead_blanks: usize, trail_blanks: usize) -> String {
    let mut message = String::with_capacity(lead_blanks + text.len() + trail_blanks);
    message.extend(core::iter::repeat(' ').take(lead_blanks));
    message.push_str(text);
    message.extend(core::iter::repeat(' ').take(trail_blanks));
    message
}

/// Draw `text` with a one pixel outline
///
/// The outline colour goes down at each neighbouring offset first, then the
/// foreground on top at `(x, y)`.
pub fn draw_outlined<S: PixelSurface + ?Sized>(
    surface: &mut S,
    text: &str,
    x: i32,
    y: i32,
    rotation: Rotation,
    outline: Rgb,
    foreground: Rgb,
) -> Result<(), DisplayError> {
    surface.set_colour(outline);
    for (dx, dy) in OUTLINE_OFFSETS {
        surface.draw_text(text, x + dx, y + dy, rotation)?;
    }

    surface.set_colour(foreground);
    surface.draw_text(text, x, y, rotation)
}
