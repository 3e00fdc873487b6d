pub(crate) mod core;
pub(crate) mod diagnostics;
pub(crate) mod error;
