// SPDX-License-Identifier: MIT
//
// Terminal rendering of palettes.
//
// Each swatch is a block painted in the color itself (24-bit background)
// with its label drawn in the contrasting text color, followed by the
// color in the session's display format and its WCAG verdict against that
// text color:
//
//    1  ██ #264653 ██  #264653   white  9.52:1 AAA   locked
//
// With color disabled the swatch block is dropped and only the text columns
// remain, so the output stays readable when piped.

use std::io::{self, Write};

use pf_color::{ColorFormat, Rgb, format_color};
use pf_palette::contrast::contrasting_text_color;
use pf_palette::{ContrastResult, PaletteSession, SavedPalette};

/// Write a 24-bit foreground color (SGR 38;2).
fn fg(w: &mut impl Write, c: Rgb) -> io::Result<()> {
    write!(w, "\x1b[38;2;{};{};{}m", c.r, c.g, c.b)
}

/// Write a 24-bit background color (SGR 48;2).
fn bg(w: &mut impl Write, c: Rgb) -> io::Result<()> {
    write!(w, "\x1b[48;2;{};{};{}m", c.r, c.g, c.b)
}

fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[0m")
}

/// Paint `label` on a block of `hex`, in the contrasting text color.
/// Invalid colors are written as plain text.
pub fn swatch(w: &mut impl Write, hex: &str, label: &str) -> io::Result<()> {
    let (Some(back), Some(text)) = (Rgb::from_hex(hex), Rgb::from_hex(contrasting_text_color(hex))) else {
        return write!(w, " {label} ");
    };
    bg(w, back)?;
    fg(w, text)?;
    write!(w, " {label} ")?;
    reset(w)
}

/// Name of a text color for display.
fn text_name(hex: &str) -> &'static str {
    if hex.eq_ignore_ascii_case("#FFFFFF") { "white" } else { "dark" }
}

/// One line per color.
pub fn palette(
    w: &mut impl Write,
    colors: &[String],
    format: ColorFormat,
    is_locked: impl Fn(usize) -> bool,
    color: bool,
) -> io::Result<()> {
    for (i, hex) in colors.iter().enumerate() {
        write!(w, "{:>3}  ", i + 1)?;
        if color {
            swatch(w, hex, hex)?;
            write!(w, "  ")?;
        }
        let text = contrasting_text_color(hex);
        let score = ContrastResult::between(hex, text);
        write!(w, "{:<20} {:<5} {score}", format_color(hex, format), text_name(text))?;
        if is_locked(i) {
            write!(w, "   locked")?;
        }
        writeln!(w)?;
    }
    Ok(())
}

/// The working session: header line plus its palette.
pub fn session(w: &mut impl Write, session: &PaletteSession, color: bool) -> io::Result<()> {
    if session.colors.is_empty() {
        return writeln!(w, "No palette yet. Run `palette-forge generate`.");
    }
    let source = match (session.mood, &session.base_color) {
        (Some(mood), _) => format!("mood {mood}"),
        (None, Some(base)) => format!("{} from {base}", session.strategy),
        (None, None) => session.strategy.to_string(),
    };
    if session.name.is_empty() {
        writeln!(w, "{source}")?;
    } else {
        writeln!(w, "{} ({source})", session.name)?;
    }
    palette(w, &session.colors, session.format, |i| session.is_locked(i), color)
}

/// Library entry summary: short id, favorite star, name, inline swatches.
pub fn saved(w: &mut impl Write, entry: &SavedPalette, color: bool) -> io::Result<()> {
    let short_id: String = entry.id.chars().take(8).collect();
    let star = if entry.is_favorite { '*' } else { ' ' };
    write!(w, "{short_id} {star} {:<24} ", entry.name)?;
    for hex in &entry.colors {
        if color {
            swatch(w, hex, "  ")?;
        } else {
            write!(w, "{hex} ")?;
        }
    }
    if !entry.tags.is_empty() {
        write!(w, "  [{}]", entry.tags.join(", "))?;
    }
    writeln!(w)
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn swatch_uses_truecolor_and_contrasting_text() {
        let out = render(|w| swatch(w, "#000000", "x"));
        assert_eq!(out, "\x1b[48;2;0;0;0m\x1b[38;2;255;255;255m x \x1b[0m");
    }

    #[test]
    fn swatch_on_light_color_uses_dark_text() {
        let out = render(|w| swatch(w, "#FFFFFF", "x"));
        assert!(out.contains("\x1b[38;2;26;26;46m"), "{out:?}");
    }

    #[test]
    fn invalid_swatch_is_plain() {
        assert_eq!(render(|w| swatch(w, "nope", "x")), " x ");
    }

    #[test]
    fn plain_palette_has_no_escapes() {
        let colors = vec!["#000000".to_owned(), "#FFFFFF".to_owned()];
        let out = render(|w| palette(w, &colors, ColorFormat::Rgb, |i| i == 1, false));
        assert!(!out.contains('\x1b'));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("rgb(0, 0, 0)"));
        assert!(lines[0].contains("white"));
        assert!(lines[0].contains("21.00:1 (AAA)"));
        assert!(!lines[0].contains("locked"));
        assert!(lines[1].contains("dark"));
        assert!(lines[1].ends_with("locked"));
    }

    #[test]
    fn empty_session_hint() {
        let out = render(|w| session(w, &PaletteSession::new(), false));
        assert!(out.starts_with("No palette yet"));
    }

    #[test]
    fn session_header_names_source() {
        let mut s = PaletteSession::new();
        s.load_colors(vec!["#3366CC".to_owned()], "");
        s.base_color = Some("#3366CC".to_owned());
        let out = render(|w| session(w, &s, false));
        assert!(out.starts_with("random from #3366CC\n"), "{out}");
    }
}
