//! CLI command implementations

pub mod graph;
pub mod open;
pub mod render;
pub mod secrets;

pub use graph::GraphArgs;
pub use open::OpenArgs;
pub use render::RenderArgs;
pub use secrets::SecretsArgs;
