pub mod events;
pub mod store;

// Re-export the primary session items so code outside can do
// "use crate::session::{SessionStore, AuthEvent};"
pub use events::AuthEvent;
pub use store::SessionStore;
