//! Splitter and combiner configuration.
//!
//! Values normally arrive as strings from a host configuration. Unrecognized strings never fail
//! a stream: they are replaced by the documented default and reported as a warning.

use serde::{Deserialize, Serialize};

use crate::foundation::diagnostics::{DiagnosticKind, DiagnosticLog, Severity};
use crate::foundation::error::{StereoError, StereoResult};
use crate::transform::method::{EncodingMethod, PairScheme};

/// Default method for the left eye.
pub const DEFAULT_LEFT: EncodingMethod = EncodingMethod::Red;
/// Default method for the right eye.
pub const DEFAULT_RIGHT: EncodingMethod = EncodingMethod::Cyan;

/// How the splitter emits eyes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairingMode {
    /// Every input yields a left and a right frame.
    #[default]
    Paired,
    /// Every input yields one eye, alternating left and right, starting with left.
    Alternating,
}

/// Splitter settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    /// Encoding of the left eye inside the input frame.
    pub left: EncodingMethod,
    /// Encoding of the right eye inside the input frame.
    pub right: EncodingMethod,
    /// Output pairing.
    pub pairing: PairingMode,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            left: DEFAULT_LEFT,
            right: DEFAULT_RIGHT,
            pairing: PairingMode::Paired,
        }
    }
}

fn resolve<T: std::str::FromStr + std::fmt::Display + Copy>(
    key: &str,
    raw: &str,
    fallback: T,
    log: &mut DiagnosticLog,
) -> T {
    match raw.parse() {
        Ok(v) => v,
        Err(_) => {
            let err = StereoError::config_fallback(key, raw, fallback.to_string());
            log.report(
                Severity::Warning,
                DiagnosticKind::ConfigurationFallback,
                err.to_string(),
            );
            fallback
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSplitConfig {
    left: Option<String>,
    right: Option<String>,
    #[serde(default)]
    pairing: PairingMode,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawCombineConfig {
    scheme: Option<String>,
}

fn parse_json<'a, T: Deserialize<'a>>(json: &'a str, what: &str) -> StereoResult<T> {
    serde_json::from_str(json)
        .map_err(|e| StereoError::validation(format!("invalid {what} config JSON: {e}")))
}

impl SplitConfig {
    /// Resolve both eye methods from their vocabulary strings, substituting defaults for
    /// unrecognized values.
    pub fn from_strings(left: &str, right: &str, log: &mut DiagnosticLog) -> Self {
        Self {
            left: resolve("left", left, DEFAULT_LEFT, log),
            right: resolve("right", right, DEFAULT_RIGHT, log),
            pairing: PairingMode::Paired,
        }
    }

    /// Load `{"left": .., "right": .., "pairing": ..}`; absent keys take their default.
    ///
    /// Malformed JSON is an error. Unknown method strings fall back like [`Self::from_strings`].
    pub fn from_json(json: &str, log: &mut DiagnosticLog) -> StereoResult<Self> {
        let raw: RawSplitConfig = parse_json(json, "split")?;
        let left = raw
            .left
            .as_deref()
            .map_or(DEFAULT_LEFT, |s| resolve("left", s, DEFAULT_LEFT, log));
        let right = raw
            .right
            .as_deref()
            .map_or(DEFAULT_RIGHT, |s| resolve("right", s, DEFAULT_RIGHT, log));
        Ok(Self {
            left,
            right,
            pairing: raw.pairing,
        })
    }

    /// Return `true` when either eye is plain 2D and frames pass through untouched.
    pub fn is_passthrough(&self) -> bool {
        self.left.is_2d() || self.right.is_2d()
    }
}

/// Combiner settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombineConfig {
    /// Hue pair: first hue from the left eye, second from the right eye.
    pub scheme: PairScheme,
}

impl CombineConfig {
    /// Resolve the scheme from its vocabulary string, falling back to `rc`.
    pub fn from_str_lenient(scheme: &str, log: &mut DiagnosticLog) -> Self {
        Self {
            scheme: resolve("scheme", scheme, PairScheme::default(), log),
        }
    }

    /// Load `{"scheme": ..}`; an absent or unknown scheme becomes `rc`.
    pub fn from_json(json: &str, log: &mut DiagnosticLog) -> StereoResult<Self> {
        let raw: RawCombineConfig = parse_json(json, "combine")?;
        Ok(match raw.scheme {
            Some(s) => Self::from_str_lenient(&s, log),
            None => Self::default(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stereo/config.rs"]
mod tests;
