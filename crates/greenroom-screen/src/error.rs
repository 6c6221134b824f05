//! Screen error types.

use thiserror::Error;

/// Errors from handling a screen event.
///
/// Gateway failures are not errors here: they arrive as reply events and
/// surface as toasts. These variants only cover misuse of the controller
/// itself.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// An event arrived before the screen was shown.
    #[error("screen has not been shown yet")]
    NotShown,

    /// `Shown` was delivered twice.
    #[error("screen was already shown")]
    AlreadyShown,

    /// A destroy was confirmed but the room has no id to destroy.
    #[error("room id is empty, refusing gateway call")]
    MissingRoomId,
}

impl ScreenError {
    /// Returns true if this error indicates driver misuse (a bug), as
    /// opposed to a surfaceable configuration gap.
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::NotShown | Self::AlreadyShown => true,
            Self::MissingRoomId => false,
        }
    }
}
