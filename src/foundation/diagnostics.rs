use std::collections::{HashSet, VecDeque};

/// Severity of a diagnostic event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Recovered locally; processing continued.
    Warning,
    /// The current frame was dropped.
    Error,
}

/// Category of a diagnostic event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Frame pixel format is not a recognized planar YUV layout.
    UnsupportedChromaFormat,
    /// Method or pair scheme has no implementation for the chroma family.
    UnsupportedCombination,
    /// Output frame allocation failed.
    AllocationFailure,
    /// Unrecognized configuration value replaced by its default.
    ConfigurationFallback,
    /// Bad frame geometry or mismatched frames.
    InvalidFrame,
}

/// One structured diagnostic event.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Diagnostic {
    /// Event severity.
    pub severity: Severity,
    /// Event category.
    pub kind: DiagnosticKind,
    /// Human readable message.
    pub message: String,
}

/// Bounded event history that forwards every recorded event to `tracing`.
///
/// Keys passed to [`DiagnosticLog::report_once`] are remembered for the lifetime of the log, so a
/// recurring per-frame condition is surfaced a single time.
#[derive(Debug)]
pub struct DiagnosticLog {
    events: VecDeque<Diagnostic>,
    capacity: usize,
    reported: HashSet<String>,
    suppressed: u64,
}

impl Default for DiagnosticLog {
    fn default() -> Self {
        Self::with_capacity(64)
    }
}

impl DiagnosticLog {
    /// Create a log keeping at most `capacity` recent events.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            reported: HashSet::new(),
            suppressed: 0,
        }
    }

    /// Record and emit an event.
    pub fn report(&mut self, severity: Severity, kind: DiagnosticKind, message: impl Into<String>) {
        let message = message.into();
        match severity {
            Severity::Warning => tracing::warn!(?kind, "{message}"),
            Severity::Error => tracing::error!(?kind, "{message}"),
        }
        if self.capacity == 0 {
            return;
        }
        if self.events.len() == self.capacity {
            self.events.pop_front();
        }
        self.events.push_back(Diagnostic {
            severity,
            kind,
            message,
        });
    }

    /// Record and emit an event only the first time `key` is seen.
    ///
    /// Returns `true` when the event was emitted.
    pub fn report_once(
        &mut self,
        key: &str,
        severity: Severity,
        kind: DiagnosticKind,
        message: impl Into<String>,
    ) -> bool {
        if self.reported.contains(key) {
            self.suppressed = self.suppressed.saturating_add(1);
            return false;
        }
        self.reported.insert(key.to_owned());
        self.report(severity, kind, message);
        true
    }

    /// Recent events, oldest first.
    pub fn events(&self) -> impl Iterator<Item = &Diagnostic> {
        self.events.iter()
    }

    /// Number of events currently held.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return `true` when no event is held.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Count of events swallowed by [`DiagnosticLog::report_once`].
    pub fn suppressed(&self) -> u64 {
        self.suppressed
    }

    /// Drop the held events; report-once keys are kept.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/diagnostics.rs"]
mod tests;
