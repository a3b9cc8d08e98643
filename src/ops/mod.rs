pub mod coordinator;
pub mod lifecycle_bridge;
pub mod registry;
pub mod resolver;
