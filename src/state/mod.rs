pub mod app;
pub mod store;
pub mod timestamp;

pub use app::AppState;
pub use store::TimestampStore;
pub use timestamp::Timestamp;
