//! Export destination for PGN
//!
//! The session never talks to a system clipboard or file directly; the host
//! passes an [`ExportSink`] in. [`NotationClipboard`] is the in-app clipboard
//! used by the ECS integration and tests.

use bevy::prelude::Resource;
use std::io;

/// Somewhere an exported game can be written to
pub trait ExportSink {
    fn write_notation(&mut self, notation: &str) -> io::Result<()>;
}

/// In-memory clipboard holding the last exported game
#[derive(Resource, Debug, Default, Clone)]
pub struct NotationClipboard {
    contents: Option<String>,
}

impl NotationClipboard {
    /// Last exported PGN, if anything was exported yet
    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl ExportSink for NotationClipboard {
    fn write_notation(&mut self, notation: &str) -> io::Result<()> {
        self.contents = Some(notation.to_string());
        Ok(())
    }
}
