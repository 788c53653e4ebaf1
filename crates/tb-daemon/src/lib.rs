//! Library half of `tb-daemon`, split out of `main.rs` the way
//! `mqk-daemon` does so the router can be exercised directly in tests.

pub mod publisher;
pub mod routes;
pub mod state;
