pub mod handler;
pub mod messages;
pub mod registry;

pub use registry::ConnectionRegistry;
