/// Presentation timestamp in microseconds, host clock domain.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Timestamp at the origin of the clock.
    pub const ZERO: Self = Self(0);

    /// Point halfway between `self` and `later`, `self + (later - self) / 2`.
    ///
    /// Integer division truncates toward zero.
    pub fn midpoint(self, later: Self) -> Self {
        let delta = later.0.saturating_sub(self.0);
        Self(self.0.saturating_add(delta / 2))
    }
}

/// Which eye a frame belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Eye {
    /// Plain 2D frame, not part of a stereo pair.
    #[default]
    Mono,
    /// Left eye of a stereo pair.
    Left,
    /// Right eye of a stereo pair.
    Right,
}

impl Eye {
    /// Numeric eye id used on integer host fields.
    pub fn number(self) -> u8 {
        match self {
            Self::Mono => 0,
            Self::Left => 1,
            Self::Right => 2,
        }
    }
}

/// Eye tag of a frame plus the HoldForPair flag.
///
/// HoldForPair asks the presenter to buffer the frame until its partner eye arrives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct EyeTag {
    /// Eye the frame carries.
    pub eye: Eye,
    /// Presenter must wait for the partner frame before displaying.
    pub hold_for_pair: bool,
}

impl EyeTag {
    /// Bits holding the eye number in the packed form.
    pub const EYE_MASK: u32 = 0x0f;
    /// HoldForPair bit in the packed form.
    pub const HOLD_FOR_PAIR_BIT: u32 = 0x10;

    /// 2D tag.
    pub const fn mono() -> Self {
        Self {
            eye: Eye::Mono,
            hold_for_pair: false,
        }
    }

    /// Left-eye tag as produced by the splitter (held for its partner).
    pub const fn left_held() -> Self {
        Self {
            eye: Eye::Left,
            hold_for_pair: true,
        }
    }

    /// Right-eye tag, displayed as soon as it arrives.
    pub const fn right() -> Self {
        Self {
            eye: Eye::Right,
            hold_for_pair: false,
        }
    }

    /// Return `true` for left or right frames.
    pub fn is_stereo(self) -> bool {
        self.eye != Eye::Mono
    }

    /// Pack into the integer form used by hosts: eye number in the low nibble, flag at `0x10`.
    pub fn to_bits(self) -> u32 {
        let mut bits = u32::from(self.eye.number());
        if self.hold_for_pair {
            bits |= Self::HOLD_FOR_PAIR_BIT;
        }
        bits
    }

    /// Unpack the integer host form; unknown eye numbers read as mono.
    pub fn from_bits(bits: u32) -> Self {
        let eye = match bits & Self::EYE_MASK {
            1 => Eye::Left,
            2 => Eye::Right,
            _ => Eye::Mono,
        };
        Self {
            eye,
            hold_for_pair: bits & Self::HOLD_FOR_PAIR_BIT != 0,
        }
    }
}

/// One 8-bit RGB pixel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Build a pixel from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Same value in all three channels.
    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }
}

/// Integer mean of two samples, rounding down.
pub(crate) fn mean_u8(a: u8, b: u8) -> u8 {
    ((u16::from(a) + u16::from(b)) / 2) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
