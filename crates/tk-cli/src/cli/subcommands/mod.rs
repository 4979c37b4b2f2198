mod asset;
mod project;
mod publish;
mod publish_type;
mod task;
mod taxonomy;

pub use asset::AssetCommands;
pub use project::ProjectCommands;
pub use publish::{PublishCommands, TaskPath};
pub use publish_type::PublishTypeCommands;
pub use task::TaskCommands;
pub use taxonomy::TaxonomyCommands;
