use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::TspError;

/// Shared flag a caller flips to stop a running solve.
///
/// Solvers poll it at their outer loop (one permutation, one mask, one greedy
/// step) and bail out with [`TspError::Cancelled`].
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    #[inline(always)]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    #[inline(always)]
    pub fn check(&self) -> Result<(), TspError> {
        if self.is_cancelled() {
            Err(TspError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let token = CancelToken::new();
        let handle = token.clone();
        assert!(token.check().is_ok());

        handle.cancel();
        assert!(token.is_cancelled());
        assert_eq!(token.check(), Err(TspError::Cancelled));
    }

    #[test]
    fn starts_clear() {
        assert!(!CancelToken::new().is_cancelled());
    }
}
