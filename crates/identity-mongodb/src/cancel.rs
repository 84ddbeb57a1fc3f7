//! Cancellation plumbing shared by both stores.

use std::future::IntoFuture;

use tokio_util::sync::CancellationToken;

use crate::error::StoreError;

/// Race a driver call against `cancel`.
///
/// The token is polled first so an already-cancelled token never reaches the
/// driver. Dropping the driver future aborts the in-flight request.
pub async fn with_cancel<F, T>(cancel: &CancellationToken, call: F) -> Result<T, StoreError>
where
    F: IntoFuture<Output = mongodb::error::Result<T>>,
{
    let call = call.into_future();
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(StoreError::Cancelled),
        result = call => result.map_err(StoreError::from),
    }
}

/// Fail with [`StoreError::Cancelled`] if `cancel` has fired. Used by the
/// operations that only touch memory.
pub fn ensure_active(cancel: &CancellationToken) -> Result<(), StoreError> {
    if cancel.is_cancelled() {
        return Err(StoreError::Cancelled);
    }
    Ok(())
}
