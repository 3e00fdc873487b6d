//! Turns one combined stereo frame into per-eye frames.

use smallvec::SmallVec;

use crate::foundation::core::{Eye, EyeTag, Timestamp};
use crate::foundation::diagnostics::{DiagnosticKind, DiagnosticLog, Severity};
use crate::foundation::error::{StereoError, StereoResult};
use crate::frame::format::{ChromaFamily, classify_chroma_format};
use crate::frame::picture::Frame;
use crate::frame::pool::FrameAllocator;
use crate::stereo::config::{PairingMode, SplitConfig};
use crate::transform::catalogue::dispatch_split;
use crate::transform::method::EncodingMethod;

/// Result of one [`EyeSplitter::split`] call.
#[derive(Debug)]
pub enum SplitOutcome {
    /// The input, untouched: 2D configuration or an already stereo-tagged frame.
    PassThrough(Frame),
    /// Both eyes derived from one input. The left frame is held for its partner.
    Pair {
        /// Left eye, tagged left with HoldForPair.
        left: Frame,
        /// Right eye, tagged right.
        right: Frame,
    },
    /// One eye in [`PairingMode::Alternating`].
    Single(Frame),
}

impl SplitOutcome {
    /// Frames in presentation order (left before right).
    pub fn into_frames(self) -> SmallVec<[Frame; 2]> {
        let mut out = SmallVec::new();
        match self {
            Self::PassThrough(f) | Self::Single(f) => out.push(f),
            Self::Pair { left, right } => {
                out.push(left);
                out.push(right);
            }
        }
        out
    }
}

/// Stateful per-stream splitter.
///
/// Owns the last seen timestamp used to interpolate right-eye timestamps, so one instance must
/// serve exactly one stream.
#[derive(Debug)]
pub struct EyeSplitter<A: FrameAllocator> {
    config: SplitConfig,
    allocator: A,
    last_timestamp: Timestamp,
    next_eye: Eye,
    diagnostics: DiagnosticLog,
}

impl<A: FrameAllocator> EyeSplitter<A> {
    /// Create a splitter with a zero last timestamp.
    pub fn new(config: SplitConfig, allocator: A) -> Self {
        Self {
            config,
            allocator,
            last_timestamp: Timestamp::ZERO,
            next_eye: Eye::Left,
            diagnostics: DiagnosticLog::default(),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &SplitConfig {
        &self.config
    }

    /// Timestamp of the last successfully split frame.
    pub fn last_timestamp(&self) -> Timestamp {
        self.last_timestamp
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

    /// Consume the splitter and return its allocator.
    pub fn into_allocator(self) -> A {
        self.allocator
    }

    /// Split `input` into eye frames.
    ///
    /// Takes ownership of `input`. Unless it is passed through, the input is handed back to the
    /// allocator exactly once, on success and on every error path alike. On error no output
    /// frame survives.
    #[tracing::instrument(
        skip(self, input),
        fields(format = %input.format(), width = input.width(), height = input.height())
    )]
    pub fn split(&mut self, input: Frame) -> StereoResult<SplitOutcome> {
        if self.config.is_passthrough() || input.eye.is_stereo() {
            tracing::trace!(eye = ?input.eye, "passing frame through");
            return Ok(SplitOutcome::PassThrough(input));
        }

        if input.width() == 0 || input.height() == 0 {
            let err = StereoError::validation(format!(
                "cannot split an empty {}x{} frame",
                input.width(),
                input.height()
            ));
            self.diagnostics
                .report(Severity::Error, DiagnosticKind::InvalidFrame, err.to_string());
            self.allocator.release(input);
            return Err(err);
        }

        let family = match classify_chroma_format(input.format()) {
            Ok(family) => family,
            Err(err) => {
                self.diagnostics.report_once(
                    &format!("chroma/{}", input.format()),
                    Severity::Error,
                    DiagnosticKind::UnsupportedChromaFormat,
                    err.to_string(),
                );
                self.allocator.release(input);
                return Err(err);
            }
        };

        match self.config.pairing {
            PairingMode::Paired => self.split_paired(input, family),
            PairingMode::Alternating => self.split_alternating(input, family),
        }
    }

    fn split_paired(&mut self, input: Frame, family: ChromaFamily) -> StereoResult<SplitOutcome> {
        let current = input.timestamp();
        let mid = self.last_timestamp.midpoint(current);
        let SplitConfig {
            left: left_method,
            right: right_method,
            ..
        } = self.config;

        let mut left = match self.produce(&input, left_method, family) {
            Ok(frame) => frame,
            Err(err) => {
                self.allocator.release(input);
                return Err(err);
            }
        };
        let mut right = match self.produce(&input, right_method, family) {
            Ok(frame) => frame,
            Err(err) => {
                self.allocator.release(left);
                self.allocator.release(input);
                return Err(err);
            }
        };

        left.props.timestamp = current;
        left.eye = EyeTag::left_held();
        right.props.timestamp = mid;
        right.eye = EyeTag::right();

        tracing::debug!(left = current.0, right = mid.0, %family, "split pair");
        self.last_timestamp = current;
        self.allocator.release(input);
        Ok(SplitOutcome::Pair { left, right })
    }

    fn split_alternating(
        &mut self,
        input: Frame,
        family: ChromaFamily,
    ) -> StereoResult<SplitOutcome> {
        let (method, tag) = match self.next_eye {
            Eye::Right => (self.config.right, EyeTag::right()),
            _ => (self.config.left, EyeTag::left_held()),
        };

        let mut out = match self.produce(&input, method, family) {
            Ok(frame) => frame,
            Err(err) => {
                self.allocator.release(input);
                return Err(err);
            }
        };
        out.eye = tag;

        self.next_eye = if tag.eye == Eye::Left {
            Eye::Right
        } else {
            Eye::Left
        };
        self.last_timestamp = input.timestamp();
        self.allocator.release(input);
        Ok(SplitOutcome::Single(out))
    }

    /// Allocate one output frame and derive it from `input` with `method`.
    fn produce(
        &mut self,
        input: &Frame,
        method: EncodingMethod,
        family: ChromaFamily,
    ) -> StereoResult<Frame> {
        let Some(transform) = dispatch_split(method, family) else {
            let err = StereoError::unsupported_method(method, family);
            self.diagnostics.report_once(
                &format!("{method}/{family}"),
                Severity::Error,
                DiagnosticKind::UnsupportedCombination,
                err.to_string(),
            );
            return Err(err);
        };

        let mut out = match self.allocator.allocate_like(input) {
            Ok(frame) => frame,
            Err(err) => {
                self.diagnostics.report(
                    Severity::Error,
                    DiagnosticKind::AllocationFailure,
                    err.to_string(),
                );
                return Err(err);
            }
        };

        if let Err(err) = transform.apply(input, &mut out, input.lanes()) {
            self.allocator.release(out);
            return Err(err);
        }
        out.copy_props_from(input);
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stereo/splitter.rs"]
mod tests;
