pub mod controller;
pub mod state;

pub use controller::SyncController;
pub use state::{PendingOperation, SyncSnapshot, SyncState, SyncStatus};
