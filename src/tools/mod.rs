mod error;
mod handlers;
mod registry;
mod types;

pub use error::ToolError;
pub use registry::{call_tool, tool_descriptors, ToolContext, ToolDescriptor, ToolName};
pub use types::SatelliteInfo;
