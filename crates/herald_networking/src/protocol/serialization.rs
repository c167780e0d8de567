//! # Message Serialization
//!
//! Strict little-endian codec for replication messages.
//!
//! ## Layout
//!
//! ```text
//! UpdateRequest    [1] [opt profile]
//! UpdateBroadcast  [2] [entity u64] [opt profile]
//! SyncRequest      [3]
//! SyncAll          [4] [count u16] ([entity u64] [profile])*
//!
//! opt profile      [0] | [1] [profile]
//! profile          text, bracket, animation, coloring, color_speed,
//!                  title_on_new_line, gap_above_title, opt secondary
//! animation        [kind u8] then speed f32 (+ width i32 for marquee)
//! coloring         [kind u8] then the variant's own fields
//! string           [len u16] [utf-8]
//! bool             [0 | 1]
//! ```
//!
//! Decoding rejects the whole message on any short read, unknown
//! discriminant, bool byte other than 0/1, invalid profile, or trailing
//! bytes.

use herald_shared::{
    AnimationKind, BracketStyle, Coloring, ColoringKind, EntityId, Profile, SecondaryField,
    TextAnimation,
};

use super::messages::{Message, MessageKind};
use crate::error::{ProtocolError, ProtocolResult};

/// Message serializer - writes messages into a reusable buffer.
pub struct MessageSerializer {
    buffer: Vec<u8>,
}

impl MessageSerializer {
    /// Creates a new serializer with an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self { buffer: Vec::with_capacity(256) }
    }

    /// Resets the serializer for reuse.
    #[inline]
    pub fn reset(&mut self) {
        self.buffer.clear();
    }

    /// Returns the number of bytes written.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if no bytes have been written.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns a slice of the written data.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buffer
    }

    /// Writes a single byte.
    #[inline]
    pub fn write_u8(&mut self, value: u8) {
        self.buffer.push(value);
    }

    /// Writes a u16 in little-endian format.
    #[inline]
    pub fn write_u16(&mut self, value: u16) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes an i32 in little-endian format.
    #[inline]
    pub fn write_i32(&mut self, value: i32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a u64 in little-endian format.
    #[inline]
    pub fn write_u64(&mut self, value: u64) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a f32 in little-endian format.
    #[inline]
    pub fn write_f32(&mut self, value: f32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    /// Writes a bool as one byte.
    #[inline]
    pub fn write_bool(&mut self, value: bool) {
        self.write_u8(u8::from(value));
    }

    /// Writes a u16 length-prefixed UTF-8 string.
    pub fn write_str(&mut self, value: &str) -> ProtocolResult<()> {
        let len = u16::try_from(value.len()).map_err(|_| ProtocolError::StringTooLong(value.len()))?;
        self.write_u16(len);
        self.buffer.extend_from_slice(value.as_bytes());
        Ok(())
    }

    /// Writes an entity id.
    #[inline]
    pub fn write_entity(&mut self, entity: EntityId) {
        self.write_u64(entity.raw());
    }

    fn write_animation(&mut self, animation: &TextAnimation) {
        self.write_u8(animation.kind() as u8);
        match *animation {
            TextAnimation::Static => {}
            TextAnimation::Scroll { speed } | TextAnimation::Typewriter { speed } => {
                self.write_f32(speed);
            }
            TextAnimation::Marquee { speed, width } => {
                self.write_f32(speed);
                self.write_i32(width);
            }
        }
    }

    fn write_coloring(&mut self, coloring: &Coloring) -> ProtocolResult<()> {
        self.write_u8(coloring.kind() as u8);
        match coloring {
            Coloring::None | Coloring::Rainbow => {}
            Coloring::SingleColor { hex } => self.write_str(hex)?,
            Coloring::Gradient { start_hex, end_hex, animate, spread } => {
                self.write_str(start_hex)?;
                self.write_str(end_hex)?;
                self.write_bool(*animate);
                self.write_f32(*spread);
            }
            Coloring::Wave { spread } | Coloring::StaticRainbow { spread } => {
                self.write_f32(*spread);
            }
        }
        Ok(())
    }

    /// Writes a full profile.
    pub fn write_profile(&mut self, profile: &Profile) -> ProtocolResult<()> {
        self.write_str(&profile.text)?;
        self.write_u8(profile.bracket as u8);
        self.write_animation(&profile.animation);
        self.write_coloring(&profile.coloring)?;
        self.write_f32(profile.color_speed);
        self.write_bool(profile.title_on_new_line);
        self.write_bool(profile.gap_above_title);

        match &profile.secondary {
            None => self.write_bool(false),
            Some(secondary) => {
                self.write_bool(true);
                self.write_str(&secondary.text)?;
                self.write_bool(secondary.enabled);
                self.write_u8(secondary.bracket as u8);
                self.write_bool(secondary.share_coloring);
                self.write_coloring(&secondary.coloring)?;
            }
        }
        Ok(())
    }

    /// Writes a present byte, then the profile if there is one.
    pub fn write_optional_profile(&mut self, profile: Option<&Profile>) -> ProtocolResult<()> {
        match profile {
            None => {
                self.write_bool(false);
                Ok(())
            }
            Some(profile) => {
                self.write_bool(true);
                self.write_profile(profile)
            }
        }
    }

    /// Serializes a complete message, replacing the buffer contents.
    pub fn serialize(&mut self, message: &Message) -> ProtocolResult<&[u8]> {
        self.reset();
        self.write_u8(message.kind() as u8);

        match message {
            Message::UpdateRequest(profile) => self.write_optional_profile(profile.as_ref())?,
            Message::UpdateBroadcast { entity, profile } => {
                self.write_entity(*entity);
                self.write_optional_profile(profile.as_ref())?;
            }
            Message::SyncRequest => {}
            Message::SyncAll(entries) => {
                let count = u16::try_from(entries.len())
                    .map_err(|_| ProtocolError::TooManyEntries(entries.len()))?;
                self.write_u16(count);
                for (entity, profile) in entries {
                    self.write_entity(*entity);
                    self.write_profile(profile)?;
                }
            }
        }

        Ok(self.as_slice())
    }
}

impl Default for MessageSerializer {
    fn default() -> Self {
        Self::new()
    }
}

/// Message deserializer - reads one message from a buffer.
pub struct MessageDeserializer<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> MessageDeserializer<'a> {
    /// Creates a new deserializer from a buffer.
    #[must_use]
    pub const fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, position: 0 }
    }

    /// Returns the number of bytes remaining.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.buffer.len().saturating_sub(self.position)
    }

    fn take(&mut self, needed: usize) -> ProtocolResult<&'a [u8]> {
        let remaining = self.remaining();
        if needed > remaining {
            return Err(ProtocolError::Truncated { needed, remaining });
        }
        let slice = &self.buffer[self.position..self.position + needed];
        self.position += needed;
        Ok(slice)
    }

    fn take_array<const N: usize>(&mut self) -> ProtocolResult<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// Reads a single byte.
    #[inline]
    pub fn read_u8(&mut self) -> ProtocolResult<u8> {
        Ok(self.take_array::<1>()?[0])
    }

    /// Reads a u16 in little-endian format.
    #[inline]
    pub fn read_u16(&mut self) -> ProtocolResult<u16> {
        self.take_array().map(u16::from_le_bytes)
    }

    /// Reads an i32 in little-endian format.
    #[inline]
    pub fn read_i32(&mut self) -> ProtocolResult<i32> {
        self.take_array().map(i32::from_le_bytes)
    }

    /// Reads a u64 in little-endian format.
    #[inline]
    pub fn read_u64(&mut self) -> ProtocolResult<u64> {
        self.take_array().map(u64::from_le_bytes)
    }

    /// Reads a f32 in little-endian format.
    #[inline]
    pub fn read_f32(&mut self) -> ProtocolResult<f32> {
        self.take_array().map(f32::from_le_bytes)
    }

    /// Reads a bool, rejecting anything but 0 and 1.
    pub fn read_bool(&mut self) -> ProtocolResult<bool> {
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(ProtocolError::InvalidBool(other)),
        }
    }

    /// Reads a u16 length-prefixed UTF-8 string.
    pub fn read_str(&mut self) -> ProtocolResult<String> {
        let len = usize::from(self.read_u16()?);
        let bytes = self.take(len)?;
        std::str::from_utf8(bytes).map(str::to_owned).map_err(|_| ProtocolError::InvalidUtf8)
    }

    /// Reads an entity id.
    #[inline]
    pub fn read_entity(&mut self) -> ProtocolResult<EntityId> {
        self.read_u64().map(EntityId)
    }

    fn read_bracket(&mut self) -> ProtocolResult<BracketStyle> {
        let value = self.read_u8()?;
        BracketStyle::from_u8(value).ok_or(ProtocolError::InvalidEnum { field: "bracket", value })
    }

    fn read_animation(&mut self) -> ProtocolResult<TextAnimation> {
        let value = self.read_u8()?;
        let kind = AnimationKind::from_u8(value)
            .ok_or(ProtocolError::InvalidEnum { field: "animation", value })?;
        Ok(match kind {
            AnimationKind::Static => TextAnimation::Static,
            AnimationKind::Scroll => TextAnimation::Scroll { speed: self.read_f32()? },
            AnimationKind::Marquee => {
                let speed = self.read_f32()?;
                let width = self.read_i32()?;
                TextAnimation::Marquee { speed, width }
            }
            AnimationKind::Typewriter => TextAnimation::Typewriter { speed: self.read_f32()? },
        })
    }

    fn read_coloring(&mut self) -> ProtocolResult<Coloring> {
        let value = self.read_u8()?;
        let kind = ColoringKind::from_u8(value)
            .ok_or(ProtocolError::InvalidEnum { field: "coloring", value })?;
        Ok(match kind {
            ColoringKind::None => Coloring::None,
            ColoringKind::SingleColor => Coloring::SingleColor { hex: self.read_str()? },
            ColoringKind::Rainbow => Coloring::Rainbow,
            ColoringKind::Gradient => {
                let start_hex = self.read_str()?;
                let end_hex = self.read_str()?;
                let animate = self.read_bool()?;
                let spread = self.read_f32()?;
                Coloring::Gradient { start_hex, end_hex, animate, spread }
            }
            ColoringKind::Wave => Coloring::Wave { spread: self.read_f32()? },
            ColoringKind::StaticRainbow => Coloring::StaticRainbow { spread: self.read_f32()? },
        })
    }

    /// Reads and validates a full profile.
    pub fn read_profile(&mut self) -> ProtocolResult<Profile> {
        let text = self.read_str()?;
        let bracket = self.read_bracket()?;
        let animation = self.read_animation()?;
        let coloring = self.read_coloring()?;
        let color_speed = self.read_f32()?;
        let title_on_new_line = self.read_bool()?;
        let gap_above_title = self.read_bool()?;

        let secondary = if self.read_bool()? {
            Some(SecondaryField {
                text: self.read_str()?,
                enabled: self.read_bool()?,
                bracket: self.read_bracket()?,
                share_coloring: self.read_bool()?,
                coloring: self.read_coloring()?,
            })
        } else {
            None
        };

        let profile = Profile {
            text,
            bracket,
            animation,
            coloring,
            color_speed,
            title_on_new_line,
            gap_above_title,
            secondary,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Reads a present byte and, if set, a profile.
    pub fn read_optional_profile(&mut self) -> ProtocolResult<Option<Profile>> {
        if self.read_bool()? {
            self.read_profile().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Deserializes exactly one message; leftover bytes are an error.
    pub fn deserialize(&mut self) -> ProtocolResult<Message> {
        let tag = self.read_u8()?;
        let kind = MessageKind::from_u8(tag).ok_or(ProtocolError::UnknownTag(tag))?;

        let message = match kind {
            MessageKind::UpdateRequest => Message::UpdateRequest(self.read_optional_profile()?),
            MessageKind::UpdateBroadcast => {
                let entity = self.read_entity()?;
                let profile = self.read_optional_profile()?;
                Message::UpdateBroadcast { entity, profile }
            }
            MessageKind::SyncRequest => Message::SyncRequest,
            MessageKind::SyncAll => {
                let count = self.read_u16()?;
                // Capacity bounded by what the buffer could possibly hold.
                let mut entries = Vec::with_capacity(usize::from(count).min(self.remaining() / 8));
                for _ in 0..count {
                    let entity = self.read_entity()?;
                    let profile = self.read_profile()?;
                    entries.push((entity, profile));
                }
                Message::SyncAll(entries)
            }
        };

        match self.remaining() {
            0 => Ok(message),
            extra => Err(ProtocolError::TrailingBytes(extra)),
        }
    }
}

/// Encodes one message into a fresh buffer.
pub fn encode(message: &Message) -> ProtocolResult<Vec<u8>> {
    let mut serializer = MessageSerializer::new();
    serializer.serialize(message).map(<[u8]>::to_vec)
}

/// Decodes exactly one message.
pub fn decode(bytes: &[u8]) -> ProtocolResult<Message> {
    MessageDeserializer::new(bytes).deserialize()
}
