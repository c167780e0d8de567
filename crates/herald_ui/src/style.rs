//! Color value type for label spans.
//!
//! Colors are kept as floating point channels while blending and only
//! quantized when written into markup.

/// RGB color with channels in 0-1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red component (0-1).
    pub r: f32,
    /// Green component (0-1).
    pub g: f32,
    /// Blue component (0-1).
    pub b: f32,
}

impl Color {
    /// Solid white.
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Creates a color from RGB values (0-1).
    #[must_use]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Creates a color from a packed `0xRRGGBB` value.
    #[must_use]
    pub const fn hex(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self::rgb(r, g, b)
    }

    /// Parses `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB` (any case).
    #[must_use]
    pub fn from_hex_str(input: &str) -> Option<Self> {
        let digits = input.trim().strip_prefix('#').unwrap_or_else(|| input.trim());
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let packed = u32::from_str_radix(digits, 16).ok()?;
        match digits.len() {
            6 => Some(Self::hex(packed)),
            3 => {
                // #RGB expands each nibble: 0xF -> 0xFF.
                let r = (packed >> 8) & 0xF;
                let g = (packed >> 4) & 0xF;
                let b = packed & 0xF;
                Some(Self::hex(((r * 0x11) << 16) | ((g * 0x11) << 8) | (b * 0x11)))
            }
            _ => None,
        }
    }

    /// Like [`Color::from_hex_str`] but falls back to white.
    #[must_use]
    pub fn from_hex_or_white(input: &str) -> Self {
        Self::from_hex_str(input).unwrap_or(Self::WHITE)
    }

    /// Creates a color from hue, saturation and value, all in 0-1.
    ///
    /// Hue wraps, so `h = 1.0` is the same red as `h = 0.0`.
    #[must_use]
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        let s = s.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);
        if s <= 0.0 {
            return Self::rgb(v, v, v);
        }

        let h = h.rem_euclid(1.0);
        // rem_euclid can round a tiny negative hue up to exactly 1.0.
        let h = if h >= 1.0 { 0.0 } else { h * 6.0 };
        let sector = h.floor();
        let f = h - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));

        match sector as u8 {
            0 => Self::rgb(v, t, p),
            1 => Self::rgb(q, v, p),
            2 => Self::rgb(p, v, t),
            3 => Self::rgb(p, q, v),
            4 => Self::rgb(t, p, v),
            _ => Self::rgb(v, p, q),
        }
    }

    /// Fully saturated, full value hue.
    #[must_use]
    pub fn from_hue(h: f32) -> Self {
        Self::from_hsv(h, 1.0, 1.0)
    }

    /// Linearly interpolates between two colors.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::rgb(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    /// Quantizes to 8-bit channels, rounding to nearest.
    #[must_use]
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// Formats as `#RRGGBB` (uppercase).
    #[must_use]
    pub fn to_hex_rgb(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02X}{g:02X}{b:02X}")
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}
