//! Error taxonomy for the unnest transform.
//!
//! Only two failures are ever reported. Key collisions are deliberately absent:
//! two paths that render to the same string resolve last-write-wins in
//! [`crate::collect`] and never surface as an error.

use alloc::collections::TryReserveError;

use thiserror::Error;

/// Errors returned by [`crate::unnest`] and [`crate::leaf_count`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnnestError {
    /// The root handed to the transform was a leaf, not a mapping.
    ///
    /// Raised before any traversal starts; there is never a partial result.
    #[error("cannot unnest a leaf value: the root must be a mapping")]
    InvalidRoot,

    /// A fallible reservation for the work stack, the path buffer or the
    /// output failed.
    #[error("ran out of memory while unnesting")]
    ResourceExhausted(#[from] TryReserveError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec::Vec;

    #[test]
    fn test_invalid_root_message() {
        assert_eq!(
            UnnestError::InvalidRoot.to_string(),
            "cannot unnest a leaf value: the root must be a mapping"
        );
    }

    #[test]
    fn test_try_reserve_error_converts() {
        let mut v: Vec<u64> = Vec::new();
        let err = v.try_reserve(usize::MAX).unwrap_err();
        let unnest_err: UnnestError = err.into();
        assert!(matches!(unnest_err, UnnestError::ResourceExhausted(_)));
    }
}
