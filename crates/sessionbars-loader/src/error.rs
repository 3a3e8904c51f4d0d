//! Loader errors.

use sessionbars_cache::CacheError;
use sessionbars_types::ConfigurationError;
use thiserror::Error;

/// Errors from loader read paths.
///
/// Loading itself only fails on configuration errors; per-symbol failures
/// are reported in the [`LoadReport`](crate::LoadReport).
#[derive(Error, Debug)]
pub enum LoaderError {
    /// Invalid date, session type, or other caller input.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The cache could not be read.
    #[error(transparent)]
    Cache(#[from] CacheError),
}
