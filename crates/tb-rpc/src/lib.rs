//! RPC adapter (C8): a per-aggregate async trait service surface — `Boards`,
//! `Columns`, `Tasks`, plus the `Auth` collaborator — consumed directly by
//! tests and, illustratively, by the JSON HTTP binding in `tb-daemon`. No
//! gRPC codegen; the trait itself is the adapter boundary (§4.8).

pub mod auth;
pub mod boards;
pub mod columns;
pub mod dto;
pub mod status;
pub mod tasks;

pub use auth::{Auth, AuthService};
pub use boards::{Boards, BoardsService};
pub use columns::{ColumnFullDto, Columns, ColumnsService};
pub use status::{WireError, WireResult, WireStatus};
pub use tasks::{Tasks, TasksService};
