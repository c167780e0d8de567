//! # Title Profiles
//!
//! The declarative styling configuration an entity publishes for its label.
//!
//! ```text
//! ┌──────────────────────── Profile ────────────────────────┐
//! │ text ─┬─ TextAnimation (Static | Scroll | Marquee | ...) │
//! │       ├─ Coloring      (None | SingleColor | Wave | ...) │
//! │       └─ BracketStyle  ( (x) | [x] | ~x~ | ... )         │
//! │ secondary? ── own text, bracket, shared/own coloring    │
//! │ layout flags ── new line, gap above                     │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Animation and coloring modes are tagged unions: each variant carries only
//! the parameters it uses, so a `Static` profile cannot hold a stray marquee
//! width and a `None` coloring cannot hold a gradient.
//!
//! A profile whose text (and secondary text) is empty is *blank*. Blank
//! profiles are never stored; absence means "cleared".

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_COLOR_SPEED, DEFAULT_FRAME_SECONDS, DEFAULT_MARQUEE_WIDTH, MAX_MARQUEE_WIDTH,
};
use crate::error::{ProfileError, ProfileResult};

/// Delimiters placed around a decorated field.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BracketStyle {
    /// No delimiters.
    None = 0,
    /// `(x)`
    #[default]
    Parentheses = 1,
    /// `[x]`
    SquareBrackets = 2,
    /// `~x~`
    Tilde = 3,
    /// `-x-`
    Dash = 4,
    /// `+x+`
    Plus = 5,
    /// `=x=`
    Equals = 6,
    /// `*x*`
    Asterisk = 7,
    /// `$x$`
    Dollar = 8,
    /// `#x#`
    Hash = 9,
    /// `!x!`
    Exclamation = 10,
    /// `|x|`
    Pipe = 11,
}

impl BracketStyle {
    /// Every style, in wire order.
    pub const ALL: [Self; 12] = [
        Self::None,
        Self::Parentheses,
        Self::SquareBrackets,
        Self::Tilde,
        Self::Dash,
        Self::Plus,
        Self::Equals,
        Self::Asterisk,
        Self::Dollar,
        Self::Hash,
        Self::Exclamation,
        Self::Pipe,
    ];

    /// Converts from the wire byte.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::Parentheses),
            2 => Some(Self::SquareBrackets),
            3 => Some(Self::Tilde),
            4 => Some(Self::Dash),
            5 => Some(Self::Plus),
            6 => Some(Self::Equals),
            7 => Some(Self::Asterisk),
            8 => Some(Self::Dollar),
            9 => Some(Self::Hash),
            10 => Some(Self::Exclamation),
            11 => Some(Self::Pipe),
            _ => None,
        }
    }

    /// Opening and closing delimiter, or `None` for an unwrapped field.
    #[must_use]
    pub const fn delimiters(self) -> Option<(char, char)> {
        match self {
            Self::None => None,
            Self::Parentheses => Some(('(', ')')),
            Self::SquareBrackets => Some(('[', ']')),
            Self::Tilde => Some(('~', '~')),
            Self::Dash => Some(('-', '-')),
            Self::Plus => Some(('+', '+')),
            Self::Equals => Some(('=', '=')),
            Self::Asterisk => Some(('*', '*')),
            Self::Dollar => Some(('$', '$')),
            Self::Hash => Some(('#', '#')),
            Self::Exclamation => Some(('!', '!')),
            Self::Pipe => Some(('|', '|')),
        }
    }

    /// Wraps `inner` in this style's delimiters.
    #[must_use]
    pub fn wrap(self, inner: &str) -> String {
        match self.delimiters() {
            Some((open, close)) => {
                let mut out = String::with_capacity(inner.len() + 2);
                out.push(open);
                out.push_str(inner);
                out.push(close);
                out
            }
            None => inner.to_owned(),
        }
    }
}

/// Wire discriminant of a [`TextAnimation`].
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    /// Full text, never changes.
    Static = 0,
    /// Grows and shrinks from the left.
    Scroll = 1,
    /// Fixed window sliding across padded text.
    Marquee = 2,
    /// Types, holds with a blinking cursor, erases.
    Typewriter = 3,
}

impl AnimationKind {
    /// Converts from the wire byte.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Static),
            1 => Some(Self::Scroll),
            2 => Some(Self::Marquee),
            3 => Some(Self::Typewriter),
            _ => None,
        }
    }
}

/// How the primary text changes over time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum TextAnimation {
    /// No text animation.
    #[default]
    Static,
    /// Bounce between one visible character and the full text.
    Scroll {
        /// Seconds between frames.
        speed: f32,
    },
    /// Slide a `width`-character window across the text.
    Marquee {
        /// Seconds between frames.
        speed: f32,
        /// Visible window, in characters.
        width: i32,
    },
    /// Type, hold, erase.
    Typewriter {
        /// Seconds between typed or erased characters.
        speed: f32,
    },
}

impl TextAnimation {
    /// Scroll at the default frame speed.
    #[must_use]
    pub const fn scroll() -> Self {
        Self::Scroll { speed: DEFAULT_FRAME_SECONDS }
    }

    /// Marquee at the default frame speed and width.
    #[must_use]
    pub const fn marquee() -> Self {
        Self::Marquee { speed: DEFAULT_FRAME_SECONDS, width: DEFAULT_MARQUEE_WIDTH }
    }

    /// Typewriter at the default frame speed.
    #[must_use]
    pub const fn typewriter() -> Self {
        Self::Typewriter { speed: DEFAULT_FRAME_SECONDS }
    }

    /// Returns the wire discriminant.
    #[must_use]
    pub const fn kind(&self) -> AnimationKind {
        match self {
            Self::Static => AnimationKind::Static,
            Self::Scroll { .. } => AnimationKind::Scroll,
            Self::Marquee { .. } => AnimationKind::Marquee,
            Self::Typewriter { .. } => AnimationKind::Typewriter,
        }
    }

    /// Seconds between frame advances, `None` for static text.
    #[must_use]
    pub const fn frame_interval(&self) -> Option<f32> {
        match *self {
            Self::Static => None,
            Self::Scroll { speed } | Self::Marquee { speed, .. } | Self::Typewriter { speed } => {
                Some(speed)
            }
        }
    }

    /// Returns true for [`TextAnimation::Static`].
    #[must_use]
    pub const fn is_static(&self) -> bool {
        matches!(self, Self::Static)
    }
}

/// Wire discriminant of a [`Coloring`].
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColoringKind {
    /// Uncolored.
    None = 0,
    /// One fixed color.
    SingleColor = 1,
    /// Whole string cycling through hues.
    Rainbow = 2,
    /// Per-character blend between two colors.
    Gradient = 3,
    /// Per-character hues flowing over time.
    Wave = 4,
    /// Per-character hues, frozen.
    StaticRainbow = 5,
}

impl ColoringKind {
    /// Converts from the wire byte.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::None),
            1 => Some(Self::SingleColor),
            2 => Some(Self::Rainbow),
            3 => Some(Self::Gradient),
            4 => Some(Self::Wave),
            5 => Some(Self::StaticRainbow),
            _ => None,
        }
    }
}

/// How a decorated field is colored.
///
/// Hex strings are kept as typed by the user; an unparseable value renders
/// as white instead of failing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Coloring {
    /// No color spans.
    #[default]
    None,
    /// The whole field in one color.
    SingleColor {
        /// `#RRGGBB` color.
        hex: String,
    },
    /// The whole field in one hue that cycles with the color phase.
    Rainbow,
    /// A per-character blend from `start_hex` to `end_hex`.
    Gradient {
        /// Color of the first character.
        start_hex: String,
        /// Color of the last character.
        end_hex: String,
        /// Flow the blend back and forth with the color phase.
        animate: bool,
        /// Characters per cycle when animated.
        spread: f32,
    },
    /// Per-character hues that flow with the color phase.
    Wave {
        /// Characters per full hue cycle.
        spread: f32,
    },
    /// Per-character hues independent of the color phase.
    StaticRainbow {
        /// Characters per full hue cycle.
        spread: f32,
    },
}

impl Coloring {
    /// Returns the wire discriminant.
    #[must_use]
    pub const fn kind(&self) -> ColoringKind {
        match self {
            Self::None => ColoringKind::None,
            Self::SingleColor { .. } => ColoringKind::SingleColor,
            Self::Rainbow => ColoringKind::Rainbow,
            Self::Gradient { .. } => ColoringKind::Gradient,
            Self::Wave { .. } => ColoringKind::Wave,
            Self::StaticRainbow { .. } => ColoringKind::StaticRainbow,
        }
    }

    /// Returns true if the output depends on the color phase.
    #[must_use]
    pub const fn is_animated(&self) -> bool {
        match self {
            Self::Rainbow | Self::Wave { .. } => true,
            Self::Gradient { animate, .. } => *animate,
            Self::None | Self::SingleColor { .. } | Self::StaticRainbow { .. } => false,
        }
    }
}

/// A second decorated field shown after the primary one (pronouns, rank).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecondaryField {
    /// Field content.
    pub text: String,
    /// Hidden without clearing the text when false.
    pub enabled: bool,
    /// Delimiters for this field.
    pub bracket: BracketStyle,
    /// Reuse the primary coloring (and its phase) instead of `coloring`.
    pub share_coloring: bool,
    /// Coloring used when `share_coloring` is false.
    pub coloring: Coloring,
}

impl SecondaryField {
    /// Creates an enabled field that shares the primary coloring.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            enabled: true,
            bracket: BracketStyle::default(),
            share_coloring: true,
            coloring: Coloring::None,
        }
    }

    /// Returns true if this field contributes to the rendered label.
    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.enabled && !self.text.is_empty()
    }

    /// Returns true if this field animates its own colors.
    #[must_use]
    pub fn has_own_animated_coloring(&self) -> bool {
        !self.share_coloring && self.coloring.is_animated()
    }
}

/// One entity's complete label styling.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Primary text before decoration.
    pub text: String,
    /// Delimiters around the primary field.
    pub bracket: BracketStyle,
    /// Primary text animation.
    pub animation: TextAnimation,
    /// Primary coloring.
    pub coloring: Coloring,
    /// Color phase advance per second for animated colorings.
    pub color_speed: f32,
    /// Put the decoration on its own line under the base name.
    pub title_on_new_line: bool,
    /// Leave a blank line between base name and decoration.
    pub gap_above_title: bool,
    /// Optional second field.
    pub secondary: Option<SecondaryField>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            text: String::new(),
            bracket: BracketStyle::default(),
            animation: TextAnimation::Static,
            coloring: Coloring::None,
            color_speed: DEFAULT_COLOR_SPEED,
            title_on_new_line: false,
            gap_above_title: false,
            secondary: None,
        }
    }
}

impl Profile {
    /// Creates a static, uncolored profile with default brackets.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), ..Self::default() }
    }

    /// Sets the primary bracket style.
    #[must_use]
    pub fn with_bracket(mut self, bracket: BracketStyle) -> Self {
        self.bracket = bracket;
        self
    }

    /// Sets the text animation.
    #[must_use]
    pub fn with_animation(mut self, animation: TextAnimation) -> Self {
        self.animation = animation;
        self
    }

    /// Sets the primary coloring.
    #[must_use]
    pub fn with_coloring(mut self, coloring: Coloring) -> Self {
        self.coloring = coloring;
        self
    }

    /// Sets the color phase speed.
    #[must_use]
    pub fn with_color_speed(mut self, color_speed: f32) -> Self {
        self.color_speed = color_speed;
        self
    }

    /// Attaches a secondary field.
    #[must_use]
    pub fn with_secondary(mut self, secondary: SecondaryField) -> Self {
        self.secondary = Some(secondary);
        self
    }

    /// Returns true if there is nothing to show: no primary text and no
    /// secondary text. Blank profiles represent "cleared".
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.is_empty() && self.secondary.as_ref().map_or(true, |s| s.text.is_empty())
    }

    /// Returns true if any coloring on this profile depends on the phase.
    #[must_use]
    pub fn has_animated_coloring(&self) -> bool {
        self.coloring.is_animated()
            || self.secondary.as_ref().is_some_and(SecondaryField::has_own_animated_coloring)
    }

    /// Returns true if this profile needs per-tick animator state.
    #[must_use]
    pub fn should_animate(&self) -> bool {
        !self.text.is_empty() && (!self.animation.is_static() || self.has_animated_coloring())
    }

    /// Checks every numeric parameter.
    ///
    /// Non-positive marquee widths and spreads are accepted; the renderer
    /// treats them as fixed frames. Widths above [`MAX_MARQUEE_WIDTH`] are
    /// rejected.
    pub fn validate(&self) -> ProfileResult<()> {
        if let Some(speed) = self.animation.frame_interval() {
            if !speed.is_finite() || speed <= 0.0 {
                return Err(ProfileError::InvalidFrameSpeed(speed));
            }
        }
        if let TextAnimation::Marquee { width, .. } = self.animation {
            if width > MAX_MARQUEE_WIDTH {
                return Err(ProfileError::MarqueeTooWide(width));
            }
        }
        finite("color_speed", self.color_speed)?;
        validate_coloring(&self.coloring)?;
        if let Some(secondary) = &self.secondary {
            validate_coloring(&secondary.coloring)?;
        }
        Ok(())
    }
}

fn validate_coloring(coloring: &Coloring) -> ProfileResult<()> {
    match coloring {
        Coloring::Gradient { spread, .. } => finite("gradient_spread", *spread),
        Coloring::Wave { spread } | Coloring::StaticRainbow { spread } => {
            finite("wave_spread", *spread)
        }
        Coloring::None | Coloring::SingleColor { .. } | Coloring::Rainbow => Ok(()),
    }
}

fn finite(field: &'static str, value: f32) -> ProfileResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ProfileError::NonFinite { field })
    }
}
