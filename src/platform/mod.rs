// Platform-specific code module

pub mod display;
mod fs_usage;
pub mod preconditions;
mod sysinfo_source;

// Re-exports for clean imports
pub use display::{FramebufferSink, PngSink, SinkKind, SpiPins, St7789Sink};
pub use preconditions::{check_display_device, check_preconditions, PreconditionPaths};
pub use sysinfo_source::SysinfoSource;
