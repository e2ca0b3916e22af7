//! Service layer - business logic

pub mod encounter;
pub mod oplog;
pub mod resource;


pub use encounter::EncounterService;
pub use oplog::OperationLog;
pub use resource::ResourceService;
