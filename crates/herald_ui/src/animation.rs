//! Per-entity animation state machines.
//!
//! ```text
//!  Scroll      0 → 1 → … → len ⇄ … → 1        (bounce, never back to 0)
//!  Marquee     window slides over "␣␣text␣␣"  (wraps)
//!  Typewriter  Typing ──len──► Holding ──hold──► Erasing ──0──► Typing
//!                              (cursor blinks)
//! ```
//!
//! Frame advances are gated by the profile's frame speed; at most one
//! advance happens per tick. The color phase advances every tick for
//! animated colorings and is independent of the frame timer.
//!
//! Indices count Unicode scalar values, never bytes.

use std::collections::BTreeMap;

use herald_shared::{
    EntityId, Profile, TextAnimation, BLINK_INTERVAL_SECONDS, HOLD_DURATION_SECONDS,
    MAX_MARQUEE_WIDTH,
};
use tracing::trace;

/// Cursor appended by the typewriter.
pub const TYPEWRITER_CURSOR: char = '|';

/// Scroll bounce direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Growing toward the full text.
    #[default]
    Forward,
    /// Shrinking toward a single character.
    Backward,
}

/// Typewriter sub-state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypewriterPhase {
    /// Revealing one character per frame.
    #[default]
    Typing,
    /// Full text shown, cursor blinking.
    Holding,
    /// Removing one character per frame.
    Erasing,
}

/// Fixed durations that are not part of a profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatorTiming {
    /// Seconds the typewriter holds the full text.
    pub hold_seconds: f32,
    /// Seconds between cursor blinks while holding.
    pub blink_seconds: f32,
}

impl Default for AnimatorTiming {
    fn default() -> Self {
        Self { hold_seconds: HOLD_DURATION_SECONDS, blink_seconds: BLINK_INTERVAL_SECONDS }
    }
}

/// Runtime cursor for one animating entity.
#[derive(Debug, Clone)]
pub struct AnimatorState {
    chars: Vec<char>,
    animation: TextAnimation,
    color_speed: f32,
    animated_coloring: bool,

    frame_timer: f32,
    frame_index: usize,
    direction: Direction,
    color_phase: f32,

    typewriter: TypewriterPhase,
    hold_timer: f32,
    blink_timer: f32,
    cursor_visible: bool,
}

impl AnimatorState {
    /// Creates a fresh cursor for `profile`.
    #[must_use]
    pub fn new(profile: &Profile) -> Self {
        Self {
            chars: profile.text.chars().collect(),
            animation: profile.animation,
            color_speed: profile.color_speed,
            animated_coloring: profile.has_animated_coloring(),
            frame_timer: 0.0,
            frame_index: 0,
            direction: Direction::Forward,
            color_phase: 0.0,
            typewriter: TypewriterPhase::Typing,
            hold_timer: 0.0,
            blink_timer: 0.0,
            cursor_visible: true,
        }
    }

    /// Points this cursor at a new profile for the same entity.
    ///
    /// The frame cursor restarts only if the text or animation mode changed.
    /// The color phase always survives.
    pub fn retarget(&mut self, profile: &Profile) {
        let text_changed = !self.chars.iter().copied().eq(profile.text.chars());
        let mode_changed = self.animation.kind() != profile.animation.kind();

        if text_changed || mode_changed {
            let phase = self.color_phase;
            *self = Self::new(profile);
            self.color_phase = phase;
        } else {
            self.animation = profile.animation;
            self.color_speed = profile.color_speed;
            self.animated_coloring = profile.has_animated_coloring();
        }
    }

    /// Advances by `dt` seconds.
    pub fn advance(&mut self, dt: f32, timing: &AnimatorTiming) {
        if self.animated_coloring {
            let phase = (self.color_phase + dt * self.color_speed).rem_euclid(1.0);
            self.color_phase = if phase.is_finite() && phase < 1.0 { phase } else { 0.0 };
        }

        let Some(interval) = self.animation.frame_interval() else {
            return;
        };

        if self.typewriter == TypewriterPhase::Holding {
            self.hold(dt, timing);
            return;
        }

        self.frame_timer += dt;
        if self.frame_timer >= interval {
            self.frame_timer = 0.0;
            self.step();
        }
    }

    fn hold(&mut self, dt: f32, timing: &AnimatorTiming) {
        self.hold_timer += dt;
        if self.hold_timer >= timing.hold_seconds {
            self.typewriter = TypewriterPhase::Erasing;
            self.cursor_visible = true;
            self.frame_timer = 0.0;
            return;
        }

        self.blink_timer += dt;
        if self.blink_timer >= timing.blink_seconds {
            self.blink_timer = 0.0;
            self.cursor_visible = !self.cursor_visible;
        }
    }

    fn step(&mut self) {
        let len = self.chars.len();
        match self.animation {
            TextAnimation::Static => {}
            TextAnimation::Scroll { .. } => match self.direction {
                Direction::Forward => {
                    if self.frame_index < len {
                        self.frame_index += 1;
                    }
                    if self.frame_index >= len {
                        self.direction = Direction::Backward;
                    }
                }
                Direction::Backward => {
                    if self.frame_index > 1 {
                        self.frame_index -= 1;
                    }
                    if self.frame_index <= 1 {
                        self.direction = Direction::Forward;
                    }
                }
            },
            TextAnimation::Marquee { width, .. } => {
                if let Ok(width) = usize::try_from(width.min(MAX_MARQUEE_WIDTH)) {
                    if width > 0 {
                        self.frame_index = (self.frame_index + 1) % (len + width);
                    }
                }
            }
            TextAnimation::Typewriter { .. } => match self.typewriter {
                TypewriterPhase::Typing => {
                    self.frame_index = (self.frame_index + 1).min(len);
                    if self.frame_index >= len {
                        self.typewriter = TypewriterPhase::Holding;
                        self.hold_timer = 0.0;
                        self.blink_timer = 0.0;
                        self.cursor_visible = true;
                    }
                }
                TypewriterPhase::Erasing => {
                    self.frame_index = self.frame_index.saturating_sub(1);
                    if self.frame_index == 0 {
                        self.typewriter = TypewriterPhase::Typing;
                    }
                }
                TypewriterPhase::Holding => {}
            },
        }
    }

    /// The text frame to show right now, before coloring and brackets.
    #[must_use]
    pub fn frame(&self) -> String {
        let len = self.chars.len();
        match self.animation {
            TextAnimation::Static => self.chars.iter().collect(),
            TextAnimation::Scroll { .. } => self.chars[..self.frame_index.min(len)].iter().collect(),
            TextAnimation::Marquee { width, .. } => {
                match usize::try_from(width.min(MAX_MARQUEE_WIDTH)) {
                    Ok(width) if width > 0 => marquee_window(&self.chars, width, self.frame_index),
                    _ => self.chars.iter().collect(),
                }
            }
            TextAnimation::Typewriter { .. } => {
                let mut out: String = match self.typewriter {
                    TypewriterPhase::Holding => self.chars.iter().collect(),
                    TypewriterPhase::Typing | TypewriterPhase::Erasing => {
                        self.chars[..self.frame_index.min(len)].iter().collect()
                    }
                };
                if self.typewriter != TypewriterPhase::Holding || self.cursor_visible {
                    out.push(TYPEWRITER_CURSOR);
                }
                out
            }
        }
    }

    /// Current frame index.
    #[must_use]
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// Current scroll direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Current color phase in `[0, 1)`.
    #[must_use]
    pub fn color_phase(&self) -> f32 {
        self.color_phase
    }

    /// Current typewriter sub-state.
    #[must_use]
    pub fn typewriter_phase(&self) -> TypewriterPhase {
        self.typewriter
    }

    /// Whether the typewriter cursor is drawn.
    #[must_use]
    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }
}

/// `width` characters of `spaces(width) + text + spaces(width)` from `start`.
fn marquee_window(chars: &[char], width: usize, start: usize) -> String {
    let padded_len = chars.len() + 2 * width;
    (start..start + width)
        .map(|i| {
            if i < width || i >= padded_len - width {
                ' '
            } else {
                chars[i - width]
            }
        })
        .collect()
}

/// Every animator owned by one peer, keyed by entity.
///
/// An entity has an animator exactly while its current profile needs one.
#[derive(Debug, Default)]
pub struct AnimatorSet {
    states: BTreeMap<EntityId, AnimatorState>,
    timing: AnimatorTiming,
}

impl AnimatorSet {
    /// Creates an empty set with the given timing.
    #[must_use]
    pub fn new(timing: AnimatorTiming) -> Self {
        Self { states: BTreeMap::new(), timing }
    }

    /// Reacts to `entity`'s current profile: creates, retargets or drops its
    /// animator.
    pub fn observe(&mut self, entity: EntityId, profile: Option<&Profile>) {
        match profile.filter(|p| p.should_animate()) {
            Some(profile) => {
                if let Some(state) = self.states.get_mut(&entity) {
                    state.retarget(profile);
                } else {
                    trace!(%entity, "animator created");
                    self.states.insert(entity, AnimatorState::new(profile));
                }
            }
            None => self.remove(entity),
        }
    }

    /// Drops `entity`'s animator, if any.
    pub fn remove(&mut self, entity: EntityId) {
        if self.states.remove(&entity).is_some() {
            trace!(%entity, "animator dropped");
        }
    }

    /// Keeps only the animators for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(EntityId) -> bool) {
        self.states.retain(|entity, _| keep(*entity));
    }

    /// Advances every animator by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        let timing = self.timing;
        for state in self.states.values_mut() {
            state.advance(dt, &timing);
        }
    }

    /// Returns `entity`'s animator.
    #[must_use]
    pub fn get(&self, entity: EntityId) -> Option<&AnimatorState> {
        self.states.get(&entity)
    }

    /// Returns true if `entity` has an animator.
    #[must_use]
    pub fn contains(&self, entity: EntityId) -> bool {
        self.states.contains_key(&entity)
    }

    /// Number of live animators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns true if nothing animates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Timing shared by every animator.
    #[must_use]
    pub fn timing(&self) -> AnimatorTiming {
        self.timing
    }
}

#[cfg(test)]
mod tests {
    use herald_shared::Coloring;

    use super::*;

    const TIMING: AnimatorTiming = AnimatorTiming { hold_seconds: 5.0, blink_seconds: 0.5 };

    fn scroll(text: &str) -> Profile {
        Profile::new(text).with_animation(TextAnimation::Scroll { speed: 0.5 })
    }

    #[test]
    fn test_scroll_bounces_between_one_and_len() {
        let mut state = AnimatorState::new(&scroll("abc"));
        assert_eq!(state.frame(), "");

        let mut seen = Vec::new();
        for _ in 0..8 {
            state.advance(0.5, &TIMING);
            seen.push(state.frame_index());
        }
        assert_eq!(seen, vec![1, 2, 3, 2, 1, 2, 3, 2]);
        assert_eq!(state.frame(), "ab");
    }

    #[test]
    fn test_frame_advance_waits_for_speed() {
        let mut state = AnimatorState::new(&scroll("abc"));
        state.advance(0.25, &TIMING);
        assert_eq!(state.frame_index(), 0);
        state.advance(0.25, &TIMING);
        assert_eq!(state.frame_index(), 1);
    }

    #[test]
    fn test_marquee_window() {
        let profile =
            Profile::new("hey").with_animation(TextAnimation::Marquee { speed: 0.5, width: 2 });
        let mut state = AnimatorState::new(&profile);
        let mut frames = vec![state.frame()];
        for _ in 0..5 {
            state.advance(0.5, &TIMING);
            frames.push(state.frame());
        }
        assert_eq!(frames, vec!["  ", " h", "he", "ey", "y ", "  "]);
    }

    #[test]
    fn test_marquee_non_positive_width_is_fixed() {
        let profile =
            Profile::new("hey").with_animation(TextAnimation::Marquee { speed: 0.5, width: 0 });
        let mut state = AnimatorState::new(&profile);
        state.advance(0.5, &TIMING);
        assert_eq!(state.frame(), "hey");
        assert_eq!(state.frame_index(), 0);
    }

    #[test]
    fn test_marquee_width_is_capped() {
        let profile = Profile::new("hey")
            .with_animation(TextAnimation::Marquee { speed: 0.5, width: i32::MAX });
        let mut state = AnimatorState::new(&profile);
        state.advance(0.5, &TIMING);
        assert_eq!(state.frame_index(), 1);
        assert_eq!(state.frame().chars().count(), MAX_MARQUEE_WIDTH as usize);
    }

    #[test]
    fn test_typewriter_blink_ignores_typing_speed() {
        // Eighth-second steps keep every timer sum exact in f32.
        const DT: f32 = 0.125;

        fn hold_pattern(speed: f32) -> Vec<bool> {
            let profile =
                Profile::new("ab").with_animation(TextAnimation::Typewriter { speed });
            let mut state = AnimatorState::new(&profile);
            for _ in 0..100 {
                if state.typewriter_phase() == TypewriterPhase::Holding {
                    break;
                }
                state.advance(DT, &TIMING);
            }
            assert_eq!(state.typewriter_phase(), TypewriterPhase::Holding);

            let mut pattern = Vec::new();
            for _ in 0..39 {
                state.advance(DT, &TIMING);
                pattern.push(state.cursor_visible());
            }
            assert_eq!(state.typewriter_phase(), TypewriterPhase::Holding);
            state.advance(DT, &TIMING);
            assert_eq!(state.typewriter_phase(), TypewriterPhase::Erasing);
            pattern
        }

        let expected: Vec<bool> = (1..40).map(|tick| (tick / 4) % 2 == 0).collect();
        for speed in [0.125, 0.25, 1.0] {
            assert_eq!(hold_pattern(speed), expected, "typing speed {speed}");
        }
    }

    #[test]
    fn test_typewriter_cycle() {
        let profile =
            Profile::new("ab").with_animation(TextAnimation::Typewriter { speed: 0.5 });
        let mut state = AnimatorState::new(&profile);
        assert_eq!(state.frame(), "|");

        state.advance(0.5, &TIMING);
        assert_eq!(state.frame(), "a|");
        state.advance(0.5, &TIMING);
        assert_eq!(state.typewriter_phase(), TypewriterPhase::Holding);
        assert_eq!(state.frame(), "ab|");

        state.advance(0.5, &TIMING);
        assert!(!state.cursor_visible());
        assert_eq!(state.frame(), "ab");
        state.advance(0.5, &TIMING);
        assert_eq!(state.frame(), "ab|");

        // Eight more half-seconds finish the five second hold.
        for _ in 0..8 {
            state.advance(0.5, &TIMING);
        }
        assert_eq!(state.typewriter_phase(), TypewriterPhase::Erasing);

        state.advance(0.5, &TIMING);
        assert_eq!(state.frame(), "a|");
        state.advance(0.5, &TIMING);
        assert_eq!(state.typewriter_phase(), TypewriterPhase::Typing);
        assert_eq!(state.frame(), "|");
    }

    #[test]
    fn test_color_phase_wraps() {
        let profile = Profile::new("x").with_coloring(Coloring::Rainbow).with_color_speed(0.5);
        let mut state = AnimatorState::new(&profile);
        state.advance(1.5, &TIMING);
        assert!((state.color_phase() - 0.75).abs() < 1e-6);
        state.advance(1.0, &TIMING);
        assert!((state.color_phase() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_retarget_keeps_cursor_when_only_color_changes() {
        let mut state = AnimatorState::new(&scroll("abc").with_coloring(Coloring::Rainbow));
        state.advance(0.5, &TIMING);
        state.advance(0.5, &TIMING);
        let phase = state.color_phase();

        state.retarget(&scroll("abc").with_coloring(Coloring::Wave { spread: 3.0 }));
        assert_eq!(state.frame_index(), 2);

        state.retarget(&scroll("abcd").with_coloring(Coloring::Rainbow));
        assert_eq!(state.frame_index(), 0);
        assert!((state.color_phase() - phase).abs() < f32::EPSILON);
    }

    #[test]
    fn test_set_follows_should_animate() {
        let mut set = AnimatorSet::new(TIMING);
        let a = EntityId(1);

        set.observe(a, Some(&Profile::new("plain")));
        assert!(set.is_empty());

        set.observe(a, Some(&scroll("abc")));
        assert!(set.contains(a));

        set.observe(a, None);
        assert!(!set.contains(a));
    }
}
