//! Repository factory trait
//!
//! Factories decouple callers from the concrete storage backend behind a
//! repository trait.

/// A trait for database repository factories
///
/// Generic over the repository type and the configuration type.
pub trait RepositoryFactory<R, C> {
    /// Create a new repository instance
    ///
    /// # Arguments
    ///
    /// * `config` - The configuration for the repository
    fn create_repository(&self, config: C) -> R;
}
