use crate::foundation::error::{StereoError, StereoResult};

/// One strided 8-bit sample plane.
///
/// Rows are `pitch` bytes apart; only the first `visible_pitch` bytes of the first
/// `visible_lines` rows carry image data, the rest is padding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Plane {
    pitch: usize,
    visible_pitch: usize,
    lines: usize,
    visible_lines: usize,
    pixels: Vec<u8>,
}

impl Plane {
    /// Allocate a zeroed plane.
    pub fn new(
        pitch: usize,
        visible_pitch: usize,
        lines: usize,
        visible_lines: usize,
    ) -> StereoResult<Self> {
        let len = pitch
            .checked_mul(lines)
            .ok_or_else(|| StereoError::allocation("plane size overflow"))?;
        Self::from_pixels(pitch, visible_pitch, lines, visible_lines, vec![0u8; len])
    }

    /// Wrap existing storage of exactly `pitch * lines` bytes.
    pub fn from_pixels(
        pitch: usize,
        visible_pitch: usize,
        lines: usize,
        visible_lines: usize,
        pixels: Vec<u8>,
    ) -> StereoResult<Self> {
        if visible_pitch > pitch {
            return Err(StereoError::validation(format!(
                "visible pitch {visible_pitch} exceeds pitch {pitch}"
            )));
        }
        if visible_lines > lines {
            return Err(StereoError::validation(format!(
                "visible lines {visible_lines} exceed lines {lines}"
            )));
        }
        if Some(pixels.len()) != pitch.checked_mul(lines) {
            return Err(StereoError::validation(format!(
                "plane storage is {} bytes, expected {pitch}x{lines}",
                pixels.len()
            )));
        }
        Ok(Self {
            pitch,
            visible_pitch,
            lines,
            visible_lines,
            pixels,
        })
    }

    /// Bytes per stored row, padding included.
    pub fn pitch(&self) -> usize {
        self.pitch
    }

    /// Bytes per row that carry image data.
    pub fn visible_pitch(&self) -> usize {
        self.visible_pitch
    }

    /// Stored rows.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Rows that carry image data.
    pub fn visible_lines(&self) -> usize {
        self.visible_lines
    }

    /// Whole backing storage, padding included.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable backing storage, padding included.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Visible part of row `y`.
    ///
    /// Panics if `y` is outside the stored rows.
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.pitch;
        &self.pixels[start..start + self.visible_pitch]
    }

    /// Mutable visible part of row `y`.
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.pitch;
        &mut self.pixels[start..start + self.visible_pitch]
    }

    /// Sample at column `x` of row `y`.
    #[inline]
    pub fn sample(&self, x: usize, y: usize) -> u8 {
        self.pixels[y * self.pitch + x]
    }

    /// Overwrite the sample at column `x` of row `y`.
    #[inline]
    pub fn set_sample(&mut self, x: usize, y: usize, value: u8) {
        self.pixels[y * self.pitch + x] = value;
    }

    /// Visible rows, top to bottom.
    pub fn visible_rows(&self) -> impl Iterator<Item = &[u8]> {
        self.pixels
            .chunks(self.pitch.max(1))
            .take(self.visible_lines)
            .map(|row| &row[..self.visible_pitch])
    }

    /// Set every visible sample to `value`.
    pub fn fill(&mut self, value: u8) {
        for y in 0..self.visible_lines {
            self.row_mut(y).fill(value);
        }
    }

    /// Return `true` when both planes have the same visible extent.
    pub fn same_extent(&self, other: &Plane) -> bool {
        self.visible_pitch == other.visible_pitch && self.visible_lines == other.visible_lines
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/plane.rs"]
mod tests;
