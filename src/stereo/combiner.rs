//! Rebuilds one anaglyph frame from separate left and right eye frames.

use crate::foundation::core::{Eye, EyeTag};
use crate::foundation::diagnostics::{DiagnosticKind, DiagnosticLog, Severity};
use crate::foundation::error::{StereoError, StereoResult};
use crate::frame::format::classify_chroma_format;
use crate::frame::picture::Frame;
use crate::frame::pool::FrameAllocator;
use crate::stereo::config::CombineConfig;
use crate::transform::catalogue::dispatch_combine;

/// Result of one [`EyeCombiner::push`] call.
#[derive(Debug)]
pub enum CombineOutcome {
    /// A mono frame, handed back untouched.
    PassThrough(Frame),
    /// The anaglyph built from the cached left and right frames.
    Combined(Frame),
    /// The frame was cached; its partner eye has not arrived yet.
    Pending,
}

/// Per-stream recombiner holding the most recent frame of each eye.
#[derive(Debug)]
pub struct EyeCombiner<A: FrameAllocator> {
    config: CombineConfig,
    allocator: A,
    left: Option<Frame>,
    right: Option<Frame>,
    diagnostics: DiagnosticLog,
}

impl<A: FrameAllocator> EyeCombiner<A> {
    /// Create a combiner with empty eye caches.
    pub fn new(config: CombineConfig, allocator: A) -> Self {
        Self {
            config,
            allocator,
            left: None,
            right: None,
            diagnostics: DiagnosticLog::default(),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &CombineConfig {
        &self.config
    }

    /// Cached left eye, if any.
    pub fn cached_left(&self) -> Option<&Frame> {
        self.left.as_ref()
    }

    /// Cached right eye, if any.
    pub fn cached_right(&self) -> Option<&Frame> {
        self.right.as_ref()
    }

    /// Diagnostics recorded so far.
    pub fn diagnostics(&self) -> &DiagnosticLog {
        &self.diagnostics
    }

    /// Frame allocator.
    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    /// Mutable frame allocator, for callers that source input frames from it.
    pub fn allocator_mut(&mut self) -> &mut A {
        &mut self.allocator
    }

    /// Release both cached eyes.
    pub fn reset(&mut self) {
        if let Some(f) = self.left.take() {
            self.allocator.release(f);
        }
        if let Some(f) = self.right.take() {
            self.allocator.release(f);
        }
    }

    /// Release the caches and return the allocator.
    pub fn into_allocator(mut self) -> A {
        self.reset();
        self.allocator
    }

    /// Feed one frame.
    ///
    /// Left and right frames replace the cached frame of their eye, which is released. Once both
    /// eyes are cached every push produces a new combined frame; the caches stay in place until a
    /// newer frame of the same eye arrives.
    #[tracing::instrument(skip(self, frame), fields(eye = ?frame.eye.eye))]
    pub fn push(&mut self, frame: Frame) -> StereoResult<CombineOutcome> {
        let slot = match frame.eye.eye {
            Eye::Mono => return Ok(CombineOutcome::PassThrough(frame)),
            Eye::Left => &mut self.left,
            Eye::Right => &mut self.right,
        };

        if let Err(err) = classify_chroma_format(frame.format()) {
            self.diagnostics.report_once(
                &format!("chroma/{}", frame.format()),
                Severity::Error,
                DiagnosticKind::UnsupportedChromaFormat,
                err.to_string(),
            );
            self.allocator.release(frame);
            return Err(err);
        }

        if let Some(old) = slot.replace(frame) {
            self.allocator.release(old);
        }

        match (&self.left, &self.right) {
            (Some(left), Some(right)) => {
                let out = combine_pair(
                    left,
                    right,
                    &self.config,
                    &mut self.allocator,
                    &mut self.diagnostics,
                )?;
                Ok(CombineOutcome::Combined(out))
            }
            _ => Ok(CombineOutcome::Pending),
        }
    }
}

fn combine_pair<A: FrameAllocator>(
    left: &Frame,
    right: &Frame,
    config: &CombineConfig,
    allocator: &mut A,
    diagnostics: &mut DiagnosticLog,
) -> StereoResult<Frame> {
    if !left.same_geometry(right) {
        let err = StereoError::validation(format!(
            "cannot combine {} {}x{} with {} {}x{}",
            left.format(),
            left.width(),
            left.height(),
            right.format(),
            right.width(),
            right.height()
        ));
        diagnostics.report(Severity::Error, DiagnosticKind::InvalidFrame, err.to_string());
        return Err(err);
    }

    let family = classify_chroma_format(left.format())?;
    let scheme = config.scheme;
    let Some(combine) = dispatch_combine(scheme, family) else {
        let err = StereoError::unsupported_scheme(scheme, family);
        diagnostics.report_once(
            &format!("{scheme}/{family}"),
            Severity::Error,
            DiagnosticKind::UnsupportedCombination,
            err.to_string(),
        );
        return Err(err);
    };

    let mut out = match allocator.allocate_like(left) {
        Ok(frame) => frame,
        Err(err) => {
            diagnostics.report(Severity::Error, DiagnosticKind::AllocationFailure, err.to_string());
            return Err(err);
        }
    };
    if let Err(err) = combine.apply(left, right, &mut out, left.lanes()) {
        allocator.release(out);
        return Err(err);
    }
    out.copy_props_from(left);
    out.eye = EyeTag::mono();
    tracing::debug!(%scheme, %family, ts = out.timestamp().0, "combined pair");
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/stereo/combiner.rs"]
mod tests;
