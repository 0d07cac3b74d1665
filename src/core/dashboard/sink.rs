use crate::error::Result;
use crate::ui::Frame;

/// Trait for display back ends
///
/// The sink receives upright frames in its native geometry. Implementations
/// are provided in the platform layer.
pub trait DisplaySink: Send {
    fn init(&mut self) -> Result<()>;

    fn clear(&mut self) -> Result<()>;

    fn set_backlight(&mut self, percent: u8) -> Result<()>;

    fn show(&mut self, frame: &Frame) -> Result<()>;
}
