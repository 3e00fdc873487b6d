use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::foundation::error::StereoError;

/// Anaglyph filter hue. Each hue owns one or two RGB channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hue {
    /// R.
    Red,
    /// G + B.
    Cyan,
    /// G.
    Green,
    /// R + B.
    Magenta,
    /// B.
    Blue,
    /// R + G.
    Yellow,
}

impl Hue {
    /// Which of `(r, g, b)` belong to the hue.
    pub fn channels(self) -> [bool; 3] {
        match self {
            Self::Red => [true, false, false],
            Self::Cyan => [false, true, true],
            Self::Green => [false, true, false],
            Self::Magenta => [true, false, true],
            Self::Blue => [false, false, true],
            Self::Yellow => [true, true, false],
        }
    }

    /// Lower-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Cyan => "cyan",
            Self::Green => "green",
            Self::Magenta => "magenta",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
        }
    }
}

/// How an anaglyph hue is rendered into the eye image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rendering {
    /// Keep the hue's channels, zero the others.
    FullColor,
    /// Replicate the hue's channel (or the mean of its two channels) into r, g and b.
    Grayscale,
    /// Keep the hue's two channels and rebuild the missing one as their mean.
    Fill,
}

/// Which half of a spatially packed frame holds the eye.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Half {
    /// Left half (side-by-side).
    Left,
    /// Right half (side-by-side).
    Right,
    /// Top half (over-under).
    Top,
    /// Bottom half (over-under).
    Bottom,
}

/// Decomposed view of an [`EncodingMethod`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodKind {
    /// No stereo encoding.
    TwoD,
    /// Colour-channel encoding.
    Anaglyph(Hue, Rendering),
    /// Spatial packing.
    Spatial(Half),
}

/// Stereo encoding of one eye inside a combined frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EncodingMethod {
    /// Plain 2D, nothing to extract.
    TwoD,
    /// Red channel.
    Red,
    /// Green and blue channels.
    Cyan,
    /// Green channel.
    Green,
    /// Red and blue channels.
    Magenta,
    /// Blue channel.
    Blue,
    /// Red and green channels.
    Yellow,
    /// Red channel as grayscale.
    RedGray,
    /// Green and blue channels as grayscale.
    CyanGray,
    /// Green channel as grayscale.
    GreenGray,
    /// Red and blue channels as grayscale.
    MagentaGray,
    /// Blue channel as grayscale.
    BlueGray,
    /// Red and green channels as grayscale.
    YellowGray,
    /// Green and blue channels, red rebuilt from them.
    CyanFill,
    /// Red and blue channels, green rebuilt from them.
    MagentaFill,
    /// Red and green channels, blue rebuilt from them.
    YellowFill,
    /// Left half of a side-by-side frame.
    Left,
    /// Right half of a side-by-side frame.
    Right,
    /// Top half of an over-under frame.
    Top,
    /// Bottom half of an over-under frame.
    Bottom,
}

impl EncodingMethod {
    /// Number of methods (rows in the dispatch table).
    pub const COUNT: usize = 20;

    /// Every method, in table order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::TwoD,
        Self::Red,
        Self::Cyan,
        Self::Green,
        Self::Magenta,
        Self::Blue,
        Self::Yellow,
        Self::RedGray,
        Self::CyanGray,
        Self::GreenGray,
        Self::MagentaGray,
        Self::BlueGray,
        Self::YellowGray,
        Self::CyanFill,
        Self::MagentaFill,
        Self::YellowFill,
        Self::Left,
        Self::Right,
        Self::Top,
        Self::Bottom,
    ];

    /// Row index in the dispatch table.
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Decompose into hue/rendering or spatial half.
    pub fn kind(self) -> MethodKind {
        use Hue::*;
        use Rendering::*;
        match self {
            Self::TwoD => MethodKind::TwoD,
            Self::Red => MethodKind::Anaglyph(Red, FullColor),
            Self::Cyan => MethodKind::Anaglyph(Cyan, FullColor),
            Self::Green => MethodKind::Anaglyph(Green, FullColor),
            Self::Magenta => MethodKind::Anaglyph(Magenta, FullColor),
            Self::Blue => MethodKind::Anaglyph(Blue, FullColor),
            Self::Yellow => MethodKind::Anaglyph(Yellow, FullColor),
            Self::RedGray => MethodKind::Anaglyph(Red, Grayscale),
            Self::CyanGray => MethodKind::Anaglyph(Cyan, Grayscale),
            Self::GreenGray => MethodKind::Anaglyph(Green, Grayscale),
            Self::MagentaGray => MethodKind::Anaglyph(Magenta, Grayscale),
            Self::BlueGray => MethodKind::Anaglyph(Blue, Grayscale),
            Self::YellowGray => MethodKind::Anaglyph(Yellow, Grayscale),
            Self::CyanFill => MethodKind::Anaglyph(Cyan, Fill),
            Self::MagentaFill => MethodKind::Anaglyph(Magenta, Fill),
            Self::YellowFill => MethodKind::Anaglyph(Yellow, Fill),
            Self::Left => MethodKind::Spatial(Half::Left),
            Self::Right => MethodKind::Spatial(Half::Right),
            Self::Top => MethodKind::Spatial(Half::Top),
            Self::Bottom => MethodKind::Spatial(Half::Bottom),
        }
    }

    /// Vocabulary string, e.g. `"cyan-gray"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TwoD => "2d",
            Self::Red => "red",
            Self::Cyan => "cyan",
            Self::Green => "green",
            Self::Magenta => "magenta",
            Self::Blue => "blue",
            Self::Yellow => "yellow",
            Self::RedGray => "red-gray",
            Self::CyanGray => "cyan-gray",
            Self::GreenGray => "green-gray",
            Self::MagentaGray => "magenta-gray",
            Self::BlueGray => "blue-gray",
            Self::YellowGray => "yellow-gray",
            Self::CyanFill => "cyan-fill",
            Self::MagentaFill => "magenta-fill",
            Self::YellowFill => "yellow-fill",
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }

    /// Legacy integer code used by older host configurations.
    pub fn code(self) -> u32 {
        match self {
            Self::TwoD => 0,
            Self::Blue => 1000,
            Self::Cyan => 1001,
            Self::Green => 1002,
            Self::Magenta => 1003,
            Self::Red => 1004,
            Self::Yellow => 1005,
            Self::BlueGray => 1010,
            Self::CyanGray => 1011,
            Self::GreenGray => 1012,
            Self::MagentaGray => 1013,
            Self::RedGray => 1014,
            Self::YellowGray => 1015,
            Self::CyanFill => 1021,
            Self::MagentaFill => 1023,
            Self::YellowFill => 1025,
            Self::Left => 2000,
            Self::Right => 2001,
            Self::Bottom => 2002,
            Self::Top => 2003,
        }
    }

    /// Look a method up by its legacy integer code.
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|m| m.code() == code)
    }

    /// Return `true` for [`EncodingMethod::TwoD`].
    pub fn is_2d(self) -> bool {
        self == Self::TwoD
    }
}

impl fmt::Display for EncodingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncodingMethod {
    type Err = StereoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace("grey", "gray");
        if let Some(m) = Self::ALL.iter().copied().find(|m| m.as_str() == key) {
            return Ok(m);
        }
        if let Some(m) = key.parse::<u32>().ok().and_then(Self::from_code) {
            return Ok(m);
        }
        Err(StereoError::config_fallback("method", s, "default"))
    }
}

impl Serialize for EncodingMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EncodingMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|_| serde::de::Error::custom(format!("unknown encoding method \"{s}\"")))
    }
}

/// Ordered hue pair used to recombine two eyes into one anaglyph frame.
///
/// The first hue is taken from the left eye, the second from the right eye.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PairScheme {
    /// Red / cyan.
    #[default]
    RedCyan,
    /// Cyan / red.
    CyanRed,
    /// Red / green.
    RedGreen,
    /// Green / red.
    GreenRed,
    /// Red / blue.
    RedBlue,
    /// Blue / red.
    BlueRed,
    /// Green / magenta.
    GreenMagenta,
    /// Magenta / green.
    MagentaGreen,
    /// Green / blue.
    GreenBlue,
    /// Blue / green.
    BlueGreen,
    /// Blue / yellow.
    BlueYellow,
    /// Yellow / blue.
    YellowBlue,
}

impl PairScheme {
    /// Number of schemes (rows in the combine table).
    pub const COUNT: usize = 12;

    /// Every scheme, in table order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::RedCyan,
        Self::CyanRed,
        Self::RedGreen,
        Self::GreenRed,
        Self::RedBlue,
        Self::BlueRed,
        Self::GreenMagenta,
        Self::MagentaGreen,
        Self::GreenBlue,
        Self::BlueGreen,
        Self::BlueYellow,
        Self::YellowBlue,
    ];

    /// Row index in the combine table.
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// `(left hue, right hue)`.
    pub const fn hues(self) -> (Hue, Hue) {
        use Hue::*;
        match self {
            Self::RedCyan => (Red, Cyan),
            Self::CyanRed => (Cyan, Red),
            Self::RedGreen => (Red, Green),
            Self::GreenRed => (Green, Red),
            Self::RedBlue => (Red, Blue),
            Self::BlueRed => (Blue, Red),
            Self::GreenMagenta => (Green, Magenta),
            Self::MagentaGreen => (Magenta, Green),
            Self::GreenBlue => (Green, Blue),
            Self::BlueGreen => (Blue, Green),
            Self::BlueYellow => (Blue, Yellow),
            Self::YellowBlue => (Yellow, Blue),
        }
    }

    /// Two-letter vocabulary string, e.g. `"rc"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RedCyan => "rc",
            Self::CyanRed => "cr",
            Self::RedGreen => "rg",
            Self::GreenRed => "gr",
            Self::RedBlue => "rb",
            Self::BlueRed => "br",
            Self::GreenMagenta => "gm",
            Self::MagentaGreen => "mg",
            Self::GreenBlue => "gb",
            Self::BlueGreen => "bg",
            Self::BlueYellow => "by",
            Self::YellowBlue => "yb",
        }
    }
}

impl fmt::Display for PairScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PairScheme {
    type Err = StereoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == key)
            .ok_or_else(|| {
                StereoError::config_fallback("scheme", s, PairScheme::default().as_str())
            })
    }
}

impl Serialize for PairScheme {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PairScheme {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|_| serde::de::Error::custom(format!("unknown pair scheme \"{s}\"")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/method.rs"]
mod tests;
