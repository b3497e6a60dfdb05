pub mod base;
pub mod static_accessor;
pub mod supabase_accessor;

// Re-export from base.rs so we can do "use crate::accessors::*;"
pub use base::*;
