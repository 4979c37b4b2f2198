pub mod activate;
pub mod asset;
pub mod asset_type;
pub mod dispatch;
pub mod project;
pub mod publish;
pub mod publish_type;
pub mod shared;
pub mod task;
pub mod task_type;
