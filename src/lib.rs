//! Library exports for the Active Tracker navigation gate, shared between the
//! binary and tests.

pub mod accessors;
pub mod config;
pub mod models;
pub mod navigation;
pub mod routes;
pub mod session;
pub mod startup;
pub mod state;
pub mod utils;
