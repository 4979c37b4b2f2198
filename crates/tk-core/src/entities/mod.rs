//! Entity value objects for every table in the store.
//!
//! Each struct mirrors one row. Parents are referenced by id only; resolve
//! them on demand through the service rather than holding parent objects.
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema`.

mod asset;
mod asset_type;
mod project;
mod publish;
mod publish_type;
mod task;
mod task_type;

pub use asset::Asset;
pub use asset_type::AssetType;
pub use project::{ENVIRONMENT_KEY, Metadata, Project, ROOT_PATH_KEY};
pub use publish::Publish;
pub use publish_type::PublishType;
pub use task::Task;
pub use task_type::TaskType;
