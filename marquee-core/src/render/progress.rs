//! Progress bar layout
//!
//! Coordinates are laid out for 11-row panels. The rotated layout is the
//! mirror image, with the bar filling from the right-hand edge.

use alloc::format;

use marquee_display::{DisplayError, PixelSurface, Rgb, Rotation};

use super::banner::draw_outlined;
use crate::directive::Directive;

/// Bar colour for a percentage: hue in degrees equal to the clamped value
pub fn bar_colour(progress: f32) -> Rgb {
    Rgb::from_hue(progress.clamp(0.0, 100.0))
}

/// Percent sign pictogram: two 2x2 squares joined by a diagonal
fn draw_percent_icon<S: PixelSurface + ?Sized>(
    surface: &mut S,
    x: i32,
    y: i32,
) -> Result<(), DisplayError> {
    surface.fill_rect(x + 1, y + 1, 2, 2)?;
    surface.line(x + 1, y + 5, x + 6, y)?;
    surface.fill_rect(x + 4, y + 4, 2, 2)
}

/// Draw and commit one progress frame
pub fn draw_progress<S: PixelSurface + ?Sized>(
    surface: &mut S,
    directive: &Directive,
    rotation: Rotation,
) -> Result<(), DisplayError> {
    let (width, _) = surface.dimensions();
    let progress = directive.progress.clamp(0.0, 100.0);
    let label = format!("{:.0}", progress);
    let label_width = surface.measure_text(&format!("{}  ", label));
    let filled = (progress / 100.0 * width as f32) as i32;

    surface.set_colour(directive.background);
    surface.clear()?;

    let (text_x, text_y, label_x, label_y, icon_x) = if rotation.is_rotated() {
        (width - 1, 9, label_width - 4, 9, -1)
    } else {
        (0, 1, width - label_width + 3, 1, width - 6)
    };

    draw_outlined(
        surface,
        &directive.text,
        text_x,
        text_y,
        rotation,
        directive.outline,
        directive.foreground,
    )?;
    draw_outlined(
        surface,
        &label,
        label_x,
        label_y,
        rotation,
        directive.outline,
        directive.foreground,
    )?;
    // Still on the foreground pen
    draw_percent_icon(surface, icon_x, 2)?;

    surface.set_colour(Rgb::GREY);
    if rotation.is_rotated() {
        surface.fill_rect(0, 0, width, 2)?;
    } else {
        surface.fill_rect(0, 9, width, 10)?;
    }

    surface.set_colour(bar_colour(progress));
    if rotation.is_rotated() {
        surface.fill_rect((width - filled).max(0), 0, width, 2)?;
    } else {
        surface.fill_rect(0, 9, filled, 10)?;
    }

    surface.commit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_display::{DrawOp, RecordingSurface};

    fn directive(text: &str, progress: f32) -> Directive {
        let mut d = Directive::plain(text);
        d.progress = progress;
        d
    }

    fn fills(surface: &RecordingSurface) -> alloc::vec::Vec<(i32, i32, i32, i32)> {
        surface
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRect {
                    x,
                    y,
                    width,
                    height,
                } => Some((*x, *y, *width, *height)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_bar_colour_tracks_hue() {
        assert_eq!(bar_colour(0.0), Rgb::new(255, 0, 0));
        assert_eq!(bar_colour(-20.0), Rgb::new(255, 0, 0));
        assert_eq!(bar_colour(100.0), Rgb::new(85, 255, 0));
        assert_eq!(bar_colour(250.0), Rgb::new(85, 255, 0));
    }

    #[test]
    fn test_normal_layout() {
        let mut surface = RecordingSurface::new(53, 11, 6);
        draw_progress(&mut surface, &directive("build", 50.0), Rotation::Normal).unwrap();

        let ops = surface.ops();
        assert_eq!(ops[0], DrawOp::SetColour(Rgb::BLACK));
        assert_eq!(ops[1], DrawOp::Clear);
        assert_eq!(*ops.last().unwrap(), DrawOp::Commit);
        assert_eq!(surface.frames(), 1);

        // "50  " is 4 chars at 6px
        let label = surface.last_text("50").unwrap();
        assert_eq!(
            ops[label],
            DrawOp::Text {
                text: "50".into(),
                x: 53 - 24 + 3,
                y: 1,
                rotation: Rotation::Normal,
            }
        );
        let text = surface.last_text("build").unwrap();
        assert!(matches!(ops[text], DrawOp::Text { x: 0, y: 1, .. }));

        assert_eq!(
            fills(&surface),
            [
                (48, 3, 2, 2),
                (51, 6, 2, 2),
                (0, 9, 53, 10),
                (0, 9, 26, 10),
            ]
        );
        assert!(ops.contains(&DrawOp::Line {
            x0: 48,
            y0: 7,
            x1: 53,
            y1: 2,
        }));
        assert!(ops.contains(&DrawOp::SetColour(Rgb::GREY)));
    }

    #[test]
    fn test_rotated_layout() {
        let mut surface = RecordingSurface::new(53, 11, 6);
        draw_progress(&mut surface, &directive("build", 25.0), Rotation::Rotated180).unwrap();

        let ops = surface.ops();
        let text = surface.last_text("build").unwrap();
        assert!(matches!(ops[text], DrawOp::Text { x: 52, y: 9, .. }));
        let label = surface.last_text("25").unwrap();
        assert!(matches!(ops[label], DrawOp::Text { x: 20, y: 9, .. }));

        // 25% of 53 truncates to 13
        assert_eq!(
            fills(&surface),
            [(0, 3, 2, 2), (3, 6, 2, 2), (0, 0, 53, 2), (40, 0, 53, 2)]
        );
    }

    #[test]
    fn test_full_and_empty_bars() {
        let mut surface = RecordingSurface::new(53, 11, 6);
        draw_progress(&mut surface, &directive("x", 100.0), Rotation::Normal).unwrap();
        assert_eq!(*fills(&surface).last().unwrap(), (0, 9, 53, 10));

        let mut surface = RecordingSurface::new(53, 11, 6);
        draw_progress(&mut surface, &directive("x", 0.0), Rotation::Rotated180).unwrap();
        assert_eq!(*fills(&surface).last().unwrap(), (53, 0, 53, 2));
        assert!(surface.last_text("0").is_some());
    }
}
