use smallvec::SmallVec;

use crate::foundation::core::{EyeTag, Timestamp};
use crate::foundation::error::{StereoError, StereoResult};
use crate::frame::format::{PixelFormat, PlaneLanes};
use crate::frame::plane::Plane;

/// Non-pixel properties carried alongside a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FrameProps {
    /// Presentation timestamp.
    pub timestamp: Timestamp,
    /// Display even if late.
    pub force: bool,
    /// Frame is progressive rather than interlaced.
    pub progressive: bool,
    /// Number of fields (2 for a full frame).
    pub nb_fields: u32,
    /// Top field is displayed first.
    pub top_field_first: bool,
}

impl Default for FrameProps {
    fn default() -> Self {
        Self {
            timestamp: Timestamp::ZERO,
            force: false,
            progressive: false,
            nb_fields: 2,
            top_field_first: false,
        }
    }
}

/// A planar YUV frame.
///
/// Frames are plain owned values: creating one allocates its planes and dropping it (or handing it
/// back to a [`crate::FrameAllocator`]) releases them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    format: PixelFormat,
    width: u32,
    height: u32,
    planes: SmallVec<[Plane; 4]>,
    /// Eye tag and HoldForPair flag.
    pub eye: EyeTag,
    /// Timestamp and other non-pixel properties.
    pub props: FrameProps,
}

fn lcm(a: u32, b: u32) -> u32 {
    fn gcd(mut a: u32, mut b: u32) -> u32 {
        while b != 0 {
            (a, b) = (b, a % b);
        }
        a
    }
    a / gcd(a, b) * b
}

fn align_up(v: u32, m: u32) -> Option<u32> {
    v.checked_add(m - 1).map(|x| x / m * m)
}

impl Frame {
    /// Allocate a zeroed frame with host-style plane geometry.
    ///
    /// Stored width and height are padded to a multiple of `16 * subsampling` and two extra
    /// subsampled rows are added below the picture; visible extents are the exact picture size
    /// scaled by each plane's ratio.
    pub fn new(format: PixelFormat, width: u32, height: u32) -> StereoResult<Self> {
        let ratios = format.plane_ratios().ok_or_else(|| {
            StereoError::unsupported_chroma(format!("cannot allocate planes for {format}"))
        })?;

        let mut modulo_w = 1;
        let mut modulo_h = 1;
        let mut ratio_h = 1;
        for r in ratios {
            modulo_w = lcm(modulo_w, 16 * r.w_den);
            modulo_h = lcm(modulo_h, 16 * r.h_den);
            ratio_h = ratio_h.max(r.h_den);
        }
        let overflow = || StereoError::allocation(format!("frame {width}x{height} is too large"));
        let width_aligned = align_up(width, modulo_w).ok_or_else(overflow)?;
        let height_aligned = align_up(height, modulo_h)
            .and_then(|h| h.checked_add(2 * ratio_h))
            .ok_or_else(overflow)?;

        let mut planes = SmallVec::new();
        for r in ratios {
            let scale_w = |v: u32| (u64::from(v) * u64::from(r.w_num) / u64::from(r.w_den)) as usize;
            let scale_h = |v: u32| (u64::from(v) * u64::from(r.h_num) / u64::from(r.h_den)) as usize;
            planes.push(Plane::new(
                scale_w(width_aligned),
                scale_w(width),
                scale_h(height_aligned),
                scale_h(height),
            )?);
        }

        Ok(Self {
            format,
            width,
            height,
            planes,
            eye: EyeTag::mono(),
            props: FrameProps::default(),
        })
    }

    /// Assemble a frame from caller-provided planes (e.g. host buffers).
    pub fn from_planes(
        format: PixelFormat,
        width: u32,
        height: u32,
        planes: Vec<Plane>,
    ) -> StereoResult<Self> {
        if let Some(ratios) = format.plane_ratios()
            && ratios.len() != planes.len()
        {
            return Err(StereoError::validation(format!(
                "{format} needs {} planes, got {}",
                ratios.len(),
                planes.len()
            )));
        }
        Ok(Self {
            format,
            width,
            height,
            planes: planes.into_iter().collect(),
            eye: EyeTag::mono(),
            props: FrameProps::default(),
        })
    }

    /// Pixel format.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Visible width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Visible height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Planes in storage order.
    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    /// Plane `i`.
    ///
    /// Panics if the frame has fewer planes.
    pub fn plane(&self, i: usize) -> &Plane {
        &self.planes[i]
    }

    /// Mutable plane `i`.
    pub fn plane_mut(&mut self, i: usize) -> &mut Plane {
        &mut self.planes[i]
    }

    /// Y, U and V planes for `lanes`, borrowed mutably at the same time.
    pub fn yuv_planes_mut(&mut self, lanes: PlaneLanes) -> StereoResult<[&mut Plane; 3]> {
        let count = self.planes.len();
        self.planes
            .get_disjoint_mut([lanes.y, lanes.u, lanes.v])
            .map_err(|_| {
                StereoError::validation(format!(
                    "plane lanes {lanes:?} do not address three distinct planes of {count}"
                ))
            })
    }

    /// Number of planes.
    pub fn plane_count(&self) -> usize {
        self.planes.len()
    }

    /// Y/U/V lane mapping for this frame's format.
    pub fn lanes(&self) -> PlaneLanes {
        self.format.lanes()
    }

    /// Presentation timestamp.
    pub fn timestamp(&self) -> Timestamp {
        self.props.timestamp
    }

    /// Return `true` when both frames have the same format and per-plane visible extents.
    pub fn same_geometry(&self, other: &Frame) -> bool {
        self.format == other.format
            && self.width == other.width
            && self.height == other.height
            && self.planes.len() == other.planes.len()
            && self
                .planes
                .iter()
                .zip(other.planes.iter())
                .all(|(a, b)| a.same_extent(b))
    }

    /// Copy every non-pixel property of `src` onto `self`. The eye tag is left untouched.
    pub fn copy_props_from(&mut self, src: &Frame) {
        self.props = src.props;
    }

    /// Fill the whole visible picture with one YUV value.
    pub fn fill_yuv(&mut self, y: u8, u: u8, v: u8) {
        let lanes = self.lanes();
        self.planes[lanes.y].fill(y);
        self.planes[lanes.u].fill(u);
        self.planes[lanes.v].fill(v);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/picture.rs"]
mod tests;
