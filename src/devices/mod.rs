//! Hardware collaborators of an application.
//!
//! The control panel driver and the arm client live in their own crates; the
//! runner only needs the few operations declared here.

#[cfg(feature = "console")]
mod console;

#[cfg(feature = "console")]
pub use console::{ConsoleArm, ConsoleDevices, ConsolePanel};

use anyhow::Result;
use std::path::Path;

/// Display device used for status and error rendering.
pub trait Panel: Send {
    fn clear(&mut self) -> Result<()>;

    /// Write `text` centred on `line` (1-based).
    fn center_text_at(&mut self, text: &str, line: usize) -> Result<()>;

    fn display_error(&mut self, message: &str) -> Result<()>;
}

/// Client of the arm node.
pub trait Arm: Send {
    /// Put the arm outputs in high impedance, leaving the motors unpowered.
    fn soft_hi_z(&mut self) -> Result<()>;
}

/// Builds the devices an application runs with.
pub trait DeviceProvider {
    fn open_panel(&self, path: &Path) -> Result<Box<dyn Panel>>;

    fn connect_arm(&self, node_name: &str) -> Result<Box<dyn Arm>>;
}

/// Clear the panel and show `title` on the first line.
pub fn clear_screen(panel: &mut dyn Panel, title: &str) -> Result<()> {
    panel.clear()?;
    panel.center_text_at(title, 1)
}
