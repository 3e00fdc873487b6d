use std::collections::HashMap;

use crate::foundation::core::EyeTag;
use crate::foundation::error::StereoResult;
use crate::frame::format::PixelFormat;
use crate::frame::picture::{Frame, FrameProps};

/// Host boundary for creating and releasing frames.
///
/// The splitter and combiner allocate every output through this trait and hand each input frame
/// they consume back through [`FrameAllocator::release`] exactly once.
pub trait FrameAllocator {
    /// Create a frame with the given format and visible size.
    fn allocate(&mut self, format: PixelFormat, width: u32, height: u32) -> StereoResult<Frame>;

    /// Give a frame back to the host.
    fn release(&mut self, frame: Frame);

    /// Create a frame with the same format and size as `like`.
    fn allocate_like(&mut self, like: &Frame) -> StereoResult<Frame> {
        self.allocate(like.format(), like.width(), like.height())
    }
}

/// Allocates fresh frames and drops released ones.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeapAllocator;

impl FrameAllocator for HeapAllocator {
    fn allocate(&mut self, format: PixelFormat, width: u32, height: u32) -> StereoResult<Frame> {
        Frame::new(format, width, height)
    }

    fn release(&mut self, frame: Frame) {
        drop(frame);
    }
}

/// Pool configuration for recycled frames.
#[derive(Debug, Clone, Copy)]
pub struct FramePoolOpts {
    /// Maximum bytes retained across all buckets.
    pub max_pool_bytes: usize,
    /// Maximum number of retained frames per (format, width, height) bucket.
    pub max_frames_per_bucket: usize,
}

impl Default for FramePoolOpts {
    fn default() -> Self {
        Self {
            max_pool_bytes: 64 * 1024 * 1024,
            max_frames_per_bucket: 4,
        }
    }
}

/// Allocation counters of a [`FramePool`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FramePoolStats {
    /// Frames currently retained for reuse.
    pub retained_frames: usize,
    /// Bytes currently retained for reuse.
    pub retained_bytes: usize,
    /// Frames created from scratch.
    pub alloc_frames: u64,
    /// Frames served from the pool.
    pub reused_frames: u64,
    /// Frames handed back through `release`.
    pub released_frames: u64,
    /// Released frames dropped because a cap was reached.
    pub dropped_on_release: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct FrameKey {
    format: PixelFormat,
    width: u32,
    height: u32,
}

impl FrameKey {
    fn of(frame: &Frame) -> Self {
        Self {
            format: frame.format(),
            width: frame.width(),
            height: frame.height(),
        }
    }
}

fn byte_len(frame: &Frame) -> usize {
    frame.planes().iter().map(|p| p.pixels().len()).sum()
}

/// Bounded recycling allocator keyed by `(format, width, height)`.
///
/// Reused frames come back zeroed, mono-tagged and with default properties, so they are
/// indistinguishable from fresh allocations.
#[derive(Debug)]
pub struct FramePool {
    opts: FramePoolOpts,
    stats: FramePoolStats,
    buckets: HashMap<FrameKey, Vec<Frame>>,
}

impl Default for FramePool {
    fn default() -> Self {
        Self::new(FramePoolOpts::default())
    }
}

impl FramePool {
    /// Create an empty pool.
    pub fn new(opts: FramePoolOpts) -> Self {
        Self {
            opts,
            stats: FramePoolStats::default(),
            buckets: HashMap::new(),
        }
    }

    /// Snapshot of the pool counters.
    pub fn stats(&self) -> FramePoolStats {
        self.stats.clone()
    }
}

impl FrameAllocator for FramePool {
    fn allocate(&mut self, format: PixelFormat, width: u32, height: u32) -> StereoResult<Frame> {
        let key = FrameKey {
            format,
            width,
            height,
        };
        if let Some(mut frame) = self.buckets.get_mut(&key).and_then(Vec::pop) {
            self.stats.retained_frames = self.stats.retained_frames.saturating_sub(1);
            self.stats.retained_bytes = self.stats.retained_bytes.saturating_sub(byte_len(&frame));
            self.stats.reused_frames = self.stats.reused_frames.saturating_add(1);
            for i in 0..frame.plane_count() {
                frame.plane_mut(i).pixels_mut().fill(0);
            }
            frame.eye = EyeTag::mono();
            frame.props = FrameProps::default();
            return Ok(frame);
        }

        let frame = Frame::new(format, width, height)?;
        self.stats.alloc_frames = self.stats.alloc_frames.saturating_add(1);
        Ok(frame)
    }

    fn release(&mut self, frame: Frame) {
        self.stats.released_frames = self.stats.released_frames.saturating_add(1);
        if self.opts.max_pool_bytes == 0 || self.opts.max_frames_per_bucket == 0 {
            self.stats.dropped_on_release = self.stats.dropped_on_release.saturating_add(1);
            return;
        }

        let bytes = byte_len(&frame);
        if self.stats.retained_bytes.saturating_add(bytes) > self.opts.max_pool_bytes {
            self.stats.dropped_on_release = self.stats.dropped_on_release.saturating_add(1);
            return;
        }

        let bucket = self.buckets.entry(FrameKey::of(&frame)).or_default();
        if bucket.len() >= self.opts.max_frames_per_bucket {
            self.stats.dropped_on_release = self.stats.dropped_on_release.saturating_add(1);
            return;
        }

        bucket.push(frame);
        self.stats.retained_frames = self.stats.retained_frames.saturating_add(1);
        self.stats.retained_bytes = self.stats.retained_bytes.saturating_add(bytes);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/pool.rs"]
mod tests;
