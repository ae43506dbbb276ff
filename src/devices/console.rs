//! Devices standing in for the hardware, rendered through the log.

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::{Arm, DeviceProvider, Panel};

/// Text lines of the LCD.
pub const PANEL_LINES: usize = 4;
/// Characters per LCD line.
pub const PANEL_COLUMNS: usize = 20;

/// 4x20 character panel logging its content on each change.
#[derive(Debug)]
pub struct ConsolePanel {
    path: PathBuf,
    lines: [String; PANEL_LINES],
}

impl ConsolePanel {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lines: Default::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lines(&self) -> &[String; PANEL_LINES] {
        &self.lines
    }

    fn write_line(&mut self, line: usize, text: String) -> Result<()> {
        if line == 0 || line > PANEL_LINES {
            bail!("panel line {line} out of range 1..={PANEL_LINES}");
        }
        self.lines[line - 1] = text;
        info!(target: "panel", line, "|{:<width$}|", self.lines[line - 1], width = PANEL_COLUMNS);
        Ok(())
    }
}

fn center(text: &str) -> String {
    let text: String = text.chars().take(PANEL_COLUMNS).collect();
    let pad = (PANEL_COLUMNS - text.chars().count()) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

impl Panel for ConsolePanel {
    fn clear(&mut self) -> Result<()> {
        self.lines = Default::default();
        Ok(())
    }

    fn center_text_at(&mut self, text: &str, line: usize) -> Result<()> {
        self.write_line(line, center(text))
    }

    fn display_error(&mut self, message: &str) -> Result<()> {
        warn!(target: "panel", "error: {message}");
        self.clear()?;
        self.write_line(1, center("** ERROR **"))?;
        let chars: Vec<char> = message.chars().collect();
        for (i, chunk) in chars
            .chunks(PANEL_COLUMNS)
            .take(PANEL_LINES - 1)
            .enumerate()
        {
            self.write_line(i + 2, chunk.iter().collect())?;
        }
        Ok(())
    }
}

/// Arm stand-in recording whether it was put in Hi-Z.
#[derive(Debug, Default)]
pub struct ConsoleArm {
    node_name: String,
    hi_z: bool,
}

impl ConsoleArm {
    pub fn new(node_name: impl Into<String>) -> Self {
        Self {
            node_name: node_name.into(),
            hi_z: false,
        }
    }

    pub fn node_name(&self) -> &str {
        &self.node_name
    }

    pub fn is_hi_z(&self) -> bool {
        self.hi_z
    }
}

impl Arm for ConsoleArm {
    fn soft_hi_z(&mut self) -> Result<()> {
        self.hi_z = true;
        info!(target: "arm", node = %self.node_name, "outputs in high impedance");
        Ok(())
    }
}

/// Provider of console devices, whatever the path and node name.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleDevices;

impl DeviceProvider for ConsoleDevices {
    fn open_panel(&self, path: &Path) -> Result<Box<dyn Panel>> {
        Ok(Box::new(ConsolePanel::new(path)))
    }

    fn connect_arm(&self, node_name: &str) -> Result<Box<dyn Arm>> {
        Ok(Box::new(ConsoleArm::new(node_name)))
    }
}
