use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{StereoError, StereoResult};

/// Four-character pixel format code, e.g. `I420`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FourCc(pub [u8; 4]);

impl fmt::Display for FourCc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.0 {
            let c = if b.is_ascii_graphic() { b as char } else { '?' };
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

/// Concrete pixel format of a frame.
///
/// Only the planar YUV formats are understood by the transforms; anything else is carried as
/// [`PixelFormat::Other`] and rejected at classification time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// Planar 4:1:1.
    I411,
    /// Planar 4:2:0.
    I420,
    /// Planar 4:2:0, full range.
    J420,
    /// Planar 4:2:0 with the V plane stored before U.
    Yv12,
    /// Planar 4:2:2.
    I422,
    /// Planar 4:2:2, full range.
    J422,
    /// Planar 4:4:4.
    I444,
    /// Planar 4:4:4, full range.
    J444,
    /// Any other format, identified by its code.
    Other(FourCc),
}

/// Subsampling ratio of one plane relative to the luma plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaneRatio {
    /// Horizontal numerator.
    pub w_num: u32,
    /// Horizontal denominator.
    pub w_den: u32,
    /// Vertical numerator.
    pub h_num: u32,
    /// Vertical denominator.
    pub h_den: u32,
}

impl PlaneRatio {
    const FULL: Self = Self::new(1, 1, 1, 1);

    const fn new(w_num: u32, w_den: u32, h_num: u32, h_den: u32) -> Self {
        Self {
            w_num,
            w_den,
            h_num,
            h_den,
        }
    }
}

const RATIOS_411: [PlaneRatio; 3] = [
    PlaneRatio::FULL,
    PlaneRatio::new(1, 4, 1, 1),
    PlaneRatio::new(1, 4, 1, 1),
];
const RATIOS_420: [PlaneRatio; 3] = [
    PlaneRatio::FULL,
    PlaneRatio::new(1, 2, 1, 2),
    PlaneRatio::new(1, 2, 1, 2),
];
const RATIOS_422: [PlaneRatio; 3] = [
    PlaneRatio::FULL,
    PlaneRatio::new(1, 2, 1, 1),
    PlaneRatio::new(1, 2, 1, 1),
];
const RATIOS_444: [PlaneRatio; 3] = [PlaneRatio::FULL, PlaneRatio::FULL, PlaneRatio::FULL];

impl PixelFormat {
    /// All recognized planar formats.
    pub const PLANAR: [Self; 8] = [
        Self::I411,
        Self::I420,
        Self::J420,
        Self::Yv12,
        Self::I422,
        Self::J422,
        Self::I444,
        Self::J444,
    ];

    /// Four-character code of the format.
    pub fn fourcc(self) -> FourCc {
        match self {
            Self::I411 => FourCc(*b"I411"),
            Self::I420 => FourCc(*b"I420"),
            Self::J420 => FourCc(*b"J420"),
            Self::Yv12 => FourCc(*b"YV12"),
            Self::I422 => FourCc(*b"I422"),
            Self::J422 => FourCc(*b"J422"),
            Self::I444 => FourCc(*b"I444"),
            Self::J444 => FourCc(*b"J444"),
            Self::Other(cc) => cc,
        }
    }

    /// Per-plane subsampling, in storage order. `None` for unknown formats.
    pub fn plane_ratios(self) -> Option<&'static [PlaneRatio]> {
        match self {
            Self::I411 => Some(&RATIOS_411),
            Self::I420 | Self::J420 | Self::Yv12 => Some(&RATIOS_420),
            Self::I422 | Self::J422 => Some(&RATIOS_422),
            Self::I444 | Self::J444 => Some(&RATIOS_444),
            Self::Other(_) => None,
        }
    }

    /// Which stored plane holds Y, U and V.
    pub fn lanes(self) -> PlaneLanes {
        match self {
            Self::Yv12 => PlaneLanes { y: 0, u: 2, v: 1 },
            _ => PlaneLanes::STANDARD,
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.fourcc())
    }
}

impl FromStr for PixelFormat {
    type Err = StereoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        if let Some(known) = Self::PLANAR
            .iter()
            .copied()
            .find(|f| f.fourcc().0 == upper.as_bytes())
        {
            return Ok(known);
        }
        let bytes: [u8; 4] = upper.as_bytes().try_into().map_err(|_| {
            StereoError::validation(format!("pixel format \"{s}\" is not a four-character code"))
        })?;
        Ok(Self::Other(FourCc(bytes)))
    }
}

/// Plane indices of the Y, U and V components.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaneLanes {
    /// Luma plane index.
    pub y: usize,
    /// Blue-difference chroma plane index.
    pub u: usize,
    /// Red-difference chroma plane index.
    pub v: usize,
}

impl PlaneLanes {
    /// Y, U, V stored in that order.
    pub const STANDARD: Self = Self { y: 0, u: 1, v: 2 };
}

/// Chroma subsampling family of a planar YUV format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ChromaFamily {
    /// One chroma pair per 4x1 luma block.
    #[serde(rename = "4:1:1")]
    Yuv411,
    /// One chroma pair per 2x2 luma block.
    #[serde(rename = "4:2:0")]
    Yuv420,
    /// One chroma pair per 2x1 luma block.
    #[serde(rename = "4:2:2")]
    Yuv422,
    /// No chroma subsampling.
    #[serde(rename = "4:4:4")]
    Yuv444,
}

impl ChromaFamily {
    /// All families, in table order.
    pub const ALL: [Self; 4] = [Self::Yuv411, Self::Yuv420, Self::Yuv422, Self::Yuv444];

    /// Column index in the dispatch tables.
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Conventional `J:a:b` notation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Yuv411 => "4:1:1",
            Self::Yuv420 => "4:2:0",
            Self::Yuv422 => "4:2:2",
            Self::Yuv444 => "4:4:4",
        }
    }
}

impl fmt::Display for ChromaFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a concrete pixel format to its chroma family.
pub fn classify_chroma_format(format: PixelFormat) -> StereoResult<ChromaFamily> {
    match format {
        PixelFormat::I411 => Ok(ChromaFamily::Yuv411),
        PixelFormat::I420 | PixelFormat::J420 | PixelFormat::Yv12 => Ok(ChromaFamily::Yuv420),
        PixelFormat::I422 | PixelFormat::J422 => Ok(ChromaFamily::Yuv422),
        PixelFormat::I444 | PixelFormat::J444 => Ok(ChromaFamily::Yuv444),
        PixelFormat::Other(cc) => Err(StereoError::unsupported_chroma(format!(
            "unsupported input chroma ({cc})"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/format.rs"]
mod tests;
