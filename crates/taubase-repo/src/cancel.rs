//! Shared cancellation signal for provider fetches and export writes

use crate::error::RepoError;

/// Cloneable signal; every clone observes the same cancellation.
///
/// Wraps [`tokio_util::sync::CancellationToken`], which works from plain
/// threads as well as async tasks.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    inner: tokio_util::sync::CancellationToken,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.inner.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.is_cancelled()
    }

    /// A token cancelled with this one, that can also be cancelled on its own.
    pub fn child(&self) -> Self {
        CancellationToken {
            inner: self.inner.child_token(),
        }
    }

    /// `Err(Cancelled)` once [`cancel`](Self::cancel) has been called.
    pub fn check(&self) -> Result<(), RepoError> {
        if self.is_cancelled() {
            Err(RepoError::Cancelled)
        } else {
            Ok(())
        }
    }
}
