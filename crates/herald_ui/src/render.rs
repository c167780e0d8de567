//! Nameplate composition.
//!
//! ```text
//!  "@Name"  +  " " | "\n" | "\n\n"  +  "(primary)"  +  " "  +  "[secondary]"
//!   base        titleOnNewLine/gap      bracketed         optional
//! ```
//!
//! Any missing part is skipped together with its separator; a label with
//! nothing in it renders as the empty string. An animator frame with no
//! characters counts as missing, brackets included.

use herald_shared::{EntityId, Profile};

use crate::animation::AnimatorState;
use crate::colorize::colorize;

/// Read-only view of the host engine's per-entity display fields.
///
/// The engine calls this instead of reaching into host objects directly.
pub trait NameplateHost {
    /// The entity's own display name, without decoration.
    fn base_name(&self, entity: EntityId) -> Option<&str>;

    /// Every entity currently present in the session.
    fn entities(&self) -> Vec<EntityId>;

    /// Returns true if `entity` is still present.
    fn is_present(&self, entity: EntityId) -> bool {
        self.entities().contains(&entity)
    }
}

/// Builds the full label for one entity.
///
/// Without an animator the profile renders at full length with color
/// phase 0.
#[must_use]
pub fn render_label(
    base_name: &str,
    profile: Option<&Profile>,
    animator: Option<&AnimatorState>,
) -> String {
    let decoration = profile.map(|p| decorate(p, animator)).unwrap_or_default();

    let mut out = String::new();
    if !base_name.is_empty() {
        out.push('@');
        out.push_str(base_name);
    }
    if decoration.is_empty() {
        return out;
    }
    if !out.is_empty() {
        match profile {
            Some(p) if p.title_on_new_line => {
                out.push('\n');
                if p.gap_above_title {
                    out.push('\n');
                }
            }
            _ => out.push(' '),
        }
    }
    out.push_str(&decoration);
    out
}

/// Primary and secondary fields, bracketed and colored.
fn decorate(profile: &Profile, animator: Option<&AnimatorState>) -> String {
    let phase = animator.map_or(0.0, AnimatorState::color_phase);
    let mut parts: Vec<String> = Vec::with_capacity(2);

    let frame = animator.map_or_else(|| profile.text.clone(), AnimatorState::frame);
    if !frame.is_empty() {
        parts.push(profile.bracket.wrap(&colorize(&frame, &profile.coloring, phase)));
    }

    if let Some(secondary) = profile.secondary.as_ref().filter(|s| s.is_shown()) {
        let coloring =
            if secondary.share_coloring { &profile.coloring } else { &secondary.coloring };
        parts.push(secondary.bracket.wrap(&colorize(&secondary.text, coloring, phase)));
    }

    parts.join(" ")
}

/// One entity's rendered label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nameplate {
    /// Owning entity.
    pub entity: EntityId,
    /// Final markup.
    pub text: String,
}

impl Nameplate {
    /// Renders `entity`'s label.
    #[must_use]
    pub fn render(
        entity: EntityId,
        base_name: &str,
        profile: Option<&Profile>,
        animator: Option<&AnimatorState>,
    ) -> Self {
        Self { entity, text: render_label(base_name, profile, animator) }
    }

    /// The host hides the label object when this is false.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !self.text.is_empty()
    }
}
