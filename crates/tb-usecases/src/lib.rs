//! Use-case orchestrators (C7): one struct per aggregate family, each
//! wrapping a `TxManager` (and, where relevant, a `BoardCache`) and exposing
//! the operations listed in the RPC surface (§6). Every write path follows
//! the same shape — mutate the aggregate inside a transaction, persist it,
//! enqueue its events to the outbox in the same transaction, commit, then
//! invalidate the owning board's cache entry.

pub mod auth;
pub mod boards;
pub mod columns;
pub mod inputs;
pub mod tasks;

pub use auth::{AuthResult, AuthUseCases, LoginInput, RegisterInput};
pub use boards::BoardUseCases;
pub use columns::{ColumnFull, ColumnUseCases};
pub use tasks::TaskUseCases;
