use crate::errors::StoreError;
use crate::state::{Timestamp, TimestampStore};

/// Write a new value into the store.
pub async fn set(store: &TimestampStore, value: Option<Timestamp>) -> Result<(), StoreError> {
    match value {
        Some(v) => tracing::info!("Handling setTime request: new time value {v}"),
        None => tracing::info!("Handling setTime request without a time value"),
    }

    store.set(value).await
}

/// Read the current value from the store.
pub async fn get(store: &TimestampStore) -> Result<Timestamp, StoreError> {
    tracing::info!("Handling getTime request");

    let value = store.get().await?;
    tracing::debug!(%value, "read stored time");
    Ok(value)
}
