//! Outbound actions.
//!
//! Commands the controller returns for the driver to execute. The controller
//! performs no I/O itself; every side effect of the screen is one of these.

use std::time::Duration;

use greenroom_core::{Gift, MenuItem};

/// A command for the driver to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenAction {
    /// Mount the chatroom view for this room.
    LaunchRoomView {
        /// Room to display.
        room_id: String,
        /// Owner of the room.
        owner_id: String,
    },

    /// Update the header with room and user identity.
    UpdateHeader {
        /// Room display name.
        room_name: String,
        /// Local user nickname.
        user_name: String,
        /// Local user avatar key.
        avatar: String,
    },

    /// Start the background video loop.
    PlayBackgroundVideo,

    /// Subscribe to gateway room events. The driver must hold the returned
    /// handle and release it on `Unsubscribe`.
    Subscribe,

    /// Show a transient notification.
    ShowToast {
        /// Text to show.
        text: String,
        /// How long to keep it on screen.
        duration: Duration,
    },

    /// Show a modal confirmation alert. The outcome comes back as
    /// `ScreenEvent::ConfirmReply`.
    ShowAlert {
        /// Alert body text.
        content: String,
        /// Whether a cancel affordance is shown.
        show_cancel: bool,
        /// Whether a confirm affordance is shown.
        show_confirm: bool,
    },

    /// Open the participants dialog.
    ShowParticipants,

    /// Open the member context menu.
    ShowUserActions {
        /// Menu entries to display.
        items: Vec<MenuItem>,
    },

    /// Open the gift picker.
    ShowGiftPicker {
        /// Tab titles.
        titles: Vec<String>,
        /// Catalog entries to display.
        gifts: Vec<Gift>,
    },

    /// Issue a gateway call. Completion comes back as
    /// `ScreenEvent::GatewayReply`.
    Gateway(GatewayCommand),

    /// Arm the deferred-exit timer. The driver must cancel it if the screen
    /// is torn down before it fires.
    ScheduleExit {
        /// Delay before `ScreenEvent::ExitTimerFired` is due.
        delay: Duration,
    },

    /// Release the room-events subscription handle.
    Unsubscribe,

    /// Pop the screen from navigation. Terminal.
    PopScreen,

    /// Run the driver-registered hook for a custom menu entry.
    ItemHook {
        /// Hook tag of the entry.
        tag: u32,
    },
}

/// A call against the chatroom gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCommand {
    /// Mute a member in this room.
    Mute {
        /// Target user.
        user_id: String,
    },
    /// Lift a mute on a member.
    Unmute {
        /// Target user.
        user_id: String,
    },
    /// Kick a member out of the room.
    Kick {
        /// Target user.
        user_id: String,
    },
    /// Destroy the room via the REST endpoint (owner path).
    DestroyRoom {
        /// Room to destroy.
        room_id: String,
    },
    /// Tear down the local room session.
    TeardownRoom,
}
