//! CLI command implementations.

pub(crate) mod coverage;
pub(crate) mod export;
pub(crate) mod get;
pub(crate) mod labels;
pub(crate) mod load;
