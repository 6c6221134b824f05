//! Inbound events.
//!
//! Everything the controller can receive, from both sides of the screen:
//! UI taps and dialog replies on one side, gateway notifications and call
//! completions on the other.

use std::fmt;

use greenroom_core::{MenuTag, UserProfile};

/// An event delivered to the room screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenEvent {
    /// The screen became visible for the first time.
    Shown,

    /// Back affordance tapped.
    BackTapped,

    /// Members affordance tapped.
    MembersTapped,

    /// An action-bar slot was tapped.
    ActionBarItemTapped {
        /// Tag of the tapped slot.
        tag: u32,
    },

    /// A chat message was tapped. Reserved analytics hook.
    MessageTapped,

    /// A chat message was long-pressed. Reserved analytics hook.
    MessageLongPressed,

    /// The keyboard was raised. Reserved analytics hook.
    KeyboardRaised,

    /// A member was picked from the participants dialog.
    MemberSelected {
        /// The picked member.
        user: UserProfile,
        /// Whether the pick came from the muted-members tab.
        muted_context: bool,
    },

    /// A member context-menu entry was selected.
    MenuItemSelected {
        /// Target of the menu.
        user: UserProfile,
        /// Selected entry.
        tag: MenuTag,
    },

    /// Reply to the most recent confirmation alert.
    ConfirmReply {
        /// Whether the destructive action was confirmed.
        accepted: bool,
    },

    /// Completion of a gateway call.
    GatewayReply {
        /// The operation that completed.
        op: GatewayOp,
        /// Error description, if the call failed. Opaque text.
        error: Option<String>,
    },

    /// The deferred-exit timer fired.
    ExitTimerFired,

    /// A notification pushed by the chatroom gateway.
    Room(RoomEvent),
}

/// A gateway operation the screen awaits a completion for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayOp {
    /// Mute a member.
    Mute {
        /// Target user.
        user_id: String,
    },
    /// Unmute a member.
    Unmute {
        /// Target user.
        user_id: String,
    },
    /// Kick a member.
    Kick {
        /// Target user.
        user_id: String,
    },
    /// Destroy the room (owner path).
    Destroy,
}

/// Notifications pushed by the chatroom gateway.
///
/// Five of these are fatal to the screen (account removed, forbidden, forced
/// logout, kicked, and an error-free leave/destroy result); the rest are
/// toasts or deliberate no-ops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomEvent {
    /// The local account was removed. Fatal.
    AccountRemoved,

    /// The local account was forbidden. Fatal.
    AccountForbidden,

    /// The local session was forcibly logged out. Fatal.
    ForcedLogout {
        /// Gateway-provided detail text.
        detail: String,
    },

    /// The local user was kicked out of the room. Fatal.
    Kicked,

    /// A new chat message arrived. Reserved analytics hook.
    MessageReceived,

    /// A global notification arrived. Reserved analytics hook.
    GlobalNotice,

    /// A user joined the room.
    UserJoined {
        /// The joining user.
        user: UserProfile,
    },

    /// A user left the room.
    UserLeft {
        /// Id of the leaving user.
        user_id: String,
    },

    /// A user was muted.
    UserMuted {
        /// Id of the muted user.
        user_id: String,
    },

    /// A user was unmuted.
    UserUnmuted {
        /// Id of the unmuted user.
        user_id: String,
    },

    /// The room announcement changed.
    AnnouncementUpdated {
        /// New announcement text.
        text: String,
    },

    /// The gateway's socket connection state changed.
    ConnectionStateChanged {
        /// New connection state.
        state: ConnectionState,
    },

    /// The account logged in on another device.
    LoggedInElsewhere {
        /// Description of the other device.
        device: String,
    },

    /// The chat token is about to expire.
    ///
    /// Deliberate no-op: the gateway refreshes and re-enters the room on
    /// reconnect by itself.
    TokenWillExpire,

    /// The chat token expired. Re-authentication requires rebuilding the
    /// whole screen, which is out of this screen's responsibility.
    TokenExpired,

    /// Result of a room-level operation the gateway ran on our behalf.
    OperationResult {
        /// Which operation the result is for.
        kind: RoomOpKind,
        /// Error description, if the operation failed. Opaque text.
        error: Option<String>,
    },
}

/// Kind of a room-level operation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomOpKind {
    /// The local user left the room.
    Leave,
    /// The room was destroyed.
    Destroyed,
    /// A report was submitted.
    Report,
    /// Any other operation; no screen-side handling.
    Other,
}

impl fmt::Display for RoomOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Leave => "leave",
            Self::Destroyed => "destroyed",
            Self::Report => "report",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

/// Gateway socket connection state, passed through for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Connected to the chat service.
    Connected,
    /// Disconnected from the chat service.
    Disconnected,
    /// Reconnecting to the chat service.
    Reconnecting,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Connected => "connected",
            Self::Disconnected => "disconnected",
            Self::Reconnecting => "reconnecting",
        };
        f.write_str(name)
    }
}
