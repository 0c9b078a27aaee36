use serde::{Deserialize, Serialize};

/// Global interaction mode. Flat two-state machine, no guards.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Map clicks create waypoints; markers are fixed.
    #[default]
    Placing,
    /// Markers are draggable; map clicks do nothing.
    Dragging,
}

/// Gestures the renderer should enable for the current mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct GestureSet {
    pub click_places: bool,
    pub markers_draggable: bool,
    pub delete_affordance: bool,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Placing => Mode::Dragging,
            Mode::Dragging => Mode::Placing,
        }
    }

    /// Text of the notification shown when this mode is entered.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Placing => "Placing Mode",
            Mode::Dragging => "Dragging Mode",
        }
    }

    pub fn gestures(self, delete_requires_dragging: bool) -> GestureSet {
        let dragging = self == Mode::Dragging;
        GestureSet {
            click_places: !dragging,
            markers_draggable: dragging,
            delete_affordance: dragging || !delete_requires_dragging,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
