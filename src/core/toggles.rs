//! Overlay visibility flags and the commands that flip them

use serde::{Deserialize, Serialize};

/// Which optional overlay items are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayFlags {
    pub show_fps: bool,
    pub show_rpm: bool,
}

impl Default for OverlayFlags {
    fn default() -> Self {
        Self {
            show_fps: true,
            show_rpm: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverlayCommand {
    ToggleFps,
    ToggleRpm,
}

impl OverlayCommand {
    pub const ALL: &'static [OverlayCommand] =
        &[OverlayCommand::ToggleFps, OverlayCommand::ToggleRpm];

    pub fn id(self) -> &'static str {
        match self {
            OverlayCommand::ToggleFps => "toggle-fps-display",
            OverlayCommand::ToggleRpm => "toggle-rpm-display",
        }
    }

    /// Default key binding
    pub fn key(self) -> char {
        match self {
            OverlayCommand::ToggleFps => 'f',
            OverlayCommand::ToggleRpm => 'r',
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            OverlayCommand::ToggleFps => "Toggle display of FPS",
            OverlayCommand::ToggleRpm => "Toggle display of RPMs",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|cmd| cmd.id() == id)
    }
}

impl OverlayFlags {
    pub fn apply(&mut self, command: OverlayCommand) {
        match command {
            OverlayCommand::ToggleFps => self.show_fps = !self.show_fps,
            OverlayCommand::ToggleRpm => self.show_rpm = !self.show_rpm,
        }
    }
}
