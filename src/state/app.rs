use crate::codec::WireFormat;
use crate::state::store::TimestampStore;

/// Shared state handed to the time routes.
#[derive(Clone)]
pub struct AppState {
    pub store: TimestampStore,
    pub format: WireFormat,
}

impl AppState {
    pub fn new(store: TimestampStore, format: WireFormat) -> Self {
        Self { store, format }
    }
}
