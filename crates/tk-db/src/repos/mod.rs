//! Repository modules implementing the per-kind operations of the store.
//!
//! Each module implements [`crate::store::Entity`] for its row type and adds
//! methods to `TkService` via `impl TkService` blocks.

pub mod asset;
pub mod asset_type;
pub mod project;
pub mod publish;
pub mod publish_type;
pub mod task;
pub mod task_type;
