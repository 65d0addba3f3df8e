use std::fmt;

/// Discrete commands delivered by the input source.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Command {
    ToggleBorder,
    ToggleAnimation,
    ToggleEditMode,
}

/// Why a pointer-down was not forwarded to the controller.
///
/// `Display` yields the message shown to the user.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ModeRejection {
    NotEditing,
    Animating,
}

impl ModeRejection {
    pub fn message(self) -> &'static str {
        match self {
            ModeRejection::NotEditing => "Turn on edit mode to move points",
            ModeRejection::Animating => "Stop the animation to move points",
        }
    }
}

impl fmt::Display for ModeRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Session flags gating which interactions are allowed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ModeState {
    pub edit_mode: bool,
    pub animating: bool,
    pub show_border: bool,
}

impl Default for ModeState {
    fn default() -> Self {
        Self {
            edit_mode: true,
            animating: false,
            show_border: true,
        }
    }
}

impl ModeState {
    /// Pointer-down is only forwarded while editing and not animating.
    ///
    /// Edit mode is checked first.
    pub fn check_pointer_down(&self) -> Result<(), ModeRejection> {
        if !self.edit_mode {
            Err(ModeRejection::NotEditing)
        } else if self.animating {
            Err(ModeRejection::Animating)
        } else {
            Ok(())
        }
    }

    #[inline]
    pub fn can_drag(&self) -> bool {
        self.check_pointer_down().is_ok()
    }
}
