pub mod context;
pub mod labels_service;

pub use context::{RepoContext, WriteAccess};
pub use labels_service::LabelsService;
