//! Translation of document store failures into domain errors.

use tracing::error;

use super::Error;
use super::ports::DocumentStoreError;

/// Log a store failure and surface it as an opaque internal error.
///
/// The store message is kept out of the returned error; HTTP adapters redact
/// internal errors anyway, but logs are the only place the detail belongs.
pub(crate) fn map_store_error(err: DocumentStoreError) -> Error {
    error!(kind = err.kind(), error = %err, "document store failure");
    match err {
        DocumentStoreError::Connection { .. } => Error::internal("document store unavailable"),
        DocumentStoreError::Query { .. } => Error::internal("document store error"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(DocumentStoreError::connection("refused"), "document store unavailable")]
    #[case(DocumentStoreError::query("bad filter"), "document store error")]
    fn store_errors_become_internal(#[case] err: DocumentStoreError, #[case] message: &str) {
        let mapped = map_store_error(err);
        assert_eq!(mapped.code(), ErrorCode::InternalError);
        assert_eq!(mapped.message(), message);
    }
}
