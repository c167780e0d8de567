//! Per-character color spans.
//!
//! Every function here is pure: the same text, coloring and phase always
//! produce the same markup. Spans use the host engine's rich-text form
//! `<color=#RRGGBB>...</color>`.

use herald_shared::Coloring;

use crate::style::Color;

/// Turns a text frame into colored markup.
///
/// `phase` is the animator's color phase in `[0, 1)`; colorings that do not
/// animate ignore it.
#[must_use]
pub fn colorize(text: &str, coloring: &Coloring, phase: f32) -> String {
    if text.is_empty() {
        return String::new();
    }

    match coloring {
        Coloring::None => text.to_owned(),
        Coloring::SingleColor { hex } => span(Color::from_hex_or_white(hex), text),
        Coloring::Rainbow => span(Color::from_hue(phase), text),
        Coloring::Gradient { start_hex, end_hex, animate, spread } => {
            let start = Color::from_hex_or_white(start_hex);
            let end = Color::from_hex_or_white(end_hex);
            let count = text.chars().count();
            per_char(text, |i| {
                let t = if *animate {
                    triangle(phase + index_offset(i, *spread))
                } else {
                    static_gradient_t(i, count)
                };
                start.lerp(end, t)
            })
        }
        Coloring::Wave { spread } => {
            per_char(text, |i| Color::from_hue((phase + index_offset(i, *spread)).rem_euclid(1.0)))
        }
        Coloring::StaticRainbow { spread } => {
            per_char(text, |i| Color::from_hue(index_offset(i, *spread).rem_euclid(1.0)))
        }
    }
}

/// `i / spread`, or 0 when the spread cannot divide.
fn index_offset(index: usize, spread: f32) -> f32 {
    if spread.is_finite() && spread > 0.0 {
        index as f32 / spread
    } else {
        0.0
    }
}

fn static_gradient_t(index: usize, count: usize) -> f32 {
    if count <= 1 {
        0.0
    } else {
        index as f32 / (count - 1) as f32
    }
}

/// Maps any phase onto 0 -> 1 -> 0 with period 1.
fn triangle(phase: f32) -> f32 {
    1.0 - ((phase * 2.0).rem_euclid(2.0) - 1.0).abs()
}

fn span(color: Color, text: &str) -> String {
    format!("<color={}>{text}</color>", color.to_hex_rgb())
}

fn per_char(text: &str, color_at: impl Fn(usize) -> Color) -> String {
    // 23 bytes of markup per character.
    let mut out = String::with_capacity(text.len() * 24);
    for (i, ch) in text.chars().enumerate() {
        out.push_str("<color=");
        out.push_str(&color_at(i).to_hex_rgb());
        out.push('>');
        out.push(ch);
        out.push_str("</color>");
    }
    out
}
