//! Raw planar frame files.
//!
//! A file is a sequence of frames; each frame is its planes in storage order, every plane written
//! as `visible_lines` rows of `visible_pitch` bytes with no padding.

use std::io::{ErrorKind, Read, Write};

use crate::foundation::error::{StereoError, StereoResult};
use crate::frame::format::PixelFormat;
use crate::frame::picture::Frame;
use crate::frame::pool::FrameAllocator;

/// Size in bytes of one tightly packed frame.
pub fn packed_len(format: PixelFormat, width: u32, height: u32) -> StereoResult<usize> {
    let probe = Frame::new(format, width, height)?;
    Ok(probe
        .planes()
        .iter()
        .map(|p| p.visible_pitch() * p.visible_lines())
        .sum())
}

/// Write the visible samples of `frame`.
pub fn write_frame<W: Write>(out: &mut W, frame: &Frame) -> StereoResult<()> {
    for plane in frame.planes() {
        for row in plane.visible_rows() {
            out.write_all(row)
                .map_err(|e| StereoError::io(format!("write frame: {e}")))?;
        }
    }
    Ok(())
}

/// Reads consecutive packed frames of one geometry.
#[derive(Debug)]
pub struct RawFrameReader<R> {
    input: R,
    format: PixelFormat,
    width: u32,
    height: u32,
    frames_read: u64,
}

impl<R: Read> RawFrameReader<R> {
    /// Wrap `input` holding frames of `format` at `width`x`height`.
    pub fn new(input: R, format: PixelFormat, width: u32, height: u32) -> Self {
        Self {
            input,
            format,
            width,
            height,
            frames_read: 0,
        }
    }

    /// Frames returned so far.
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Read the next frame into storage obtained from `allocator`.
    ///
    /// Returns `Ok(None)` at a clean end of input. A frame cut short is an error.
    pub fn next_frame<A: FrameAllocator>(
        &mut self,
        allocator: &mut A,
    ) -> StereoResult<Option<Frame>> {
        if self.width == 0 || self.height == 0 {
            return Err(StereoError::validation(format!(
                "cannot read {}x{} frames",
                self.width, self.height
            )));
        }
        let mut frame = allocator.allocate(self.format, self.width, self.height)?;
        let mut filled = 0usize;
        for i in 0..frame.plane_count() {
            let plane = frame.plane_mut(i);
            for y in 0..plane.visible_lines() {
                let row = plane.row_mut(y);
                match read_full(&mut self.input, row) {
                    Ok(n) if n == row.len() => filled += n,
                    Ok(n) => {
                        allocator.release(frame);
                        if filled + n == 0 {
                            return Ok(None);
                        }
                        return Err(StereoError::io(format!(
                            "frame {} is truncated after {} bytes",
                            self.frames_read,
                            filled + n
                        )));
                    }
                    Err(e) => {
                        allocator.release(frame);
                        return Err(StereoError::io(format!("read frame: {e}")));
                    }
                }
            }
        }
        self.frames_read += 1;
        Ok(Some(frame))
    }
}

/// Fill `buf` as far as the input allows, returning the byte count.
fn read_full<R: Read>(input: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut n = 0;
    while n < buf.len() {
        match input.read(&mut buf[n..]) {
            Ok(0) => break,
            Ok(k) => n += k,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(n)
}

#[cfg(test)]
#[path = "../../tests/unit/io/raw.rs"]
mod tests;
