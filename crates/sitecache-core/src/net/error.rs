use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid request method: {0:?}")]
    InvalidMethod(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Transport failure reported by a non-HTTP [`NetworkFetch`]
    /// implementation.
    ///
    /// [`NetworkFetch`]: super::NetworkFetch
    #[error("Origin unreachable: {0}")]
    Unreachable(String),
}
