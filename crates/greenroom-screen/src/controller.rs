//! The room screen controller.
//!
//! Composes the room identity, the action bar, and the gift catalog, owns
//! the screen lifecycle, and routes inbound events into outbound commands.
//! Pure state machine: `handle` takes one event and returns the actions it
//! produced; the caller performs all I/O.

use std::collections::HashMap;
use std::time::Duration;

use greenroom_core::{
    ActionBarItem, GIFT_ITEM_TAG, GiftCatalog, MenuTag, RoomInfo, UserProfile, default_action_bar,
    tags_are_unique, user_menu_items,
};

use crate::action::{GatewayCommand, ScreenAction};
use crate::error::ScreenError;
use crate::event::{GatewayOp, RoomEvent, RoomOpKind, ScreenEvent};

/// Delay between a fatal session toast and the deferred exit, so the toast
/// can render before navigation.
const EXIT_DELAY: Duration = Duration::from_secs(1);

/// Default toast duration.
const TOAST_SHORT: Duration = Duration::from_secs(2);

/// Toast duration for gateway errors and member notifications.
const TOAST_LONG: Duration = Duration::from_secs(3);

/// Toast duration for announcement updates.
const TOAST_ANNOUNCEMENT: Duration = Duration::from_secs(5);

/// Screen lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed but not yet displayed.
    Unloaded,
    /// Accepting UI and gateway events.
    Active,
    /// An exit is confirmed, in flight, or scheduled.
    Leaving,
    /// Torn down. Terminal; all further events are no-ops.
    Closed,
}

/// Which destructive confirmation is awaiting a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PendingConfirm {
    DestroyRoom,
    RemoveUser(UserProfile),
}

/// Screen construction parameters.
///
/// `is_owner` is resolved once when the room is joined and passed in
/// explicitly; the screen never consults process-wide session state.
#[derive(Debug, Clone)]
pub struct ScreenConfig {
    /// The room being displayed.
    pub room: RoomInfo,
    /// Whether the local user owns the room.
    pub is_owner: bool,
    /// The load-once gift catalog.
    pub catalog: GiftCatalog,
    /// Bottom action-bar slots. Tags must be unique.
    pub action_bar: Vec<ActionBarItem>,
}

impl ScreenConfig {
    /// Config with the default action bar (a single gift slot).
    pub fn new(room: RoomInfo, is_owner: bool, catalog: GiftCatalog) -> Self {
        Self { room, is_owner, catalog, action_bar: default_action_bar() }
    }
}

/// The room screen state machine.
pub struct RoomScreen {
    config: ScreenConfig,
    phase: Phase,
    pending: Option<PendingConfirm>,
    /// Local id -> nickname directory for toast formatting, maintained from
    /// join events. Falls back to the raw id.
    names: HashMap<String, String>,
}

impl RoomScreen {
    /// Create a controller for the given configuration.
    ///
    /// # Panics
    ///
    /// Debug builds panic when the action bar carries duplicate tags, since
    /// routing switches on them.
    pub fn new(config: ScreenConfig) -> Self {
        debug_assert!(tags_are_unique(&config.action_bar), "action bar tags must be unique");
        Self { config, phase: Phase::Unloaded, pending: None, names: HashMap::new() }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The room being displayed.
    pub fn room(&self) -> &RoomInfo {
        &self.config.room
    }

    /// Whether the local user owns the room.
    pub fn is_owner(&self) -> bool {
        self.config.is_owner
    }

    /// Process one event and return the resulting actions.
    ///
    /// # Errors
    ///
    /// Returns `ScreenError` for lifecycle misuse (`NotShown`,
    /// `AlreadyShown`) or a confirmed destroy without a room id
    /// (`MissingRoomId`). Gateway failures are never errors here.
    pub fn handle(&mut self, event: ScreenEvent) -> Result<Vec<ScreenAction>, ScreenError> {
        match self.phase {
            // Terminal: a timer or stale dialog firing after teardown is a
            // no-op target.
            Phase::Closed => return Ok(Vec::new()),
            Phase::Unloaded => {
                return if matches!(event, ScreenEvent::Shown) {
                    Ok(self.shown())
                } else {
                    Err(ScreenError::NotShown)
                };
            },
            Phase::Active | Phase::Leaving => {},
        }

        match event {
            ScreenEvent::Shown => Err(ScreenError::AlreadyShown),
            ScreenEvent::BackTapped => Ok(self.back()),
            ScreenEvent::MembersTapped => Ok(self.members()),
            ScreenEvent::ActionBarItemTapped { tag } => Ok(self.action_bar_item(tag)),
            // Reserved analytics hooks: must not fail, must not alter state.
            ScreenEvent::MessageTapped
            | ScreenEvent::MessageLongPressed
            | ScreenEvent::KeyboardRaised => Ok(Vec::new()),
            ScreenEvent::MemberSelected { user, muted_context } => {
                Ok(self.member_selected(&user, muted_context))
            },
            ScreenEvent::MenuItemSelected { user, tag } => Ok(self.menu_item(user, tag)),
            ScreenEvent::ConfirmReply { accepted } => self.confirm_reply(accepted),
            ScreenEvent::GatewayReply { op, error } => Ok(self.gateway_reply(&op, error)),
            ScreenEvent::ExitTimerFired => Ok(self.exit_timer_fired()),
            ScreenEvent::Room(room_event) => Ok(self.room_event(room_event)),
        }
    }

    fn set_phase(&mut self, phase: Phase) {
        tracing::debug!(from = ?self.phase, to = ?phase, "phase transition");
        self.phase = phase;
    }

    /// First display: compose child views, bind the events subscription,
    /// start video playback.
    fn shown(&mut self) -> Vec<ScreenAction> {
        self.set_phase(Phase::Active);
        let room = &self.config.room;
        vec![
            ScreenAction::LaunchRoomView {
                room_id: room.room_id.clone(),
                owner_id: room.owner_id.clone(),
            },
            ScreenAction::UpdateHeader {
                room_name: room.name.clone(),
                user_name: room.nickname.clone(),
                avatar: room.avatar.clone(),
            },
            ScreenAction::Subscribe,
            ScreenAction::PlayBackgroundVideo,
        ]
    }

    fn back(&mut self) -> Vec<ScreenAction> {
        if self.phase != Phase::Active {
            return Vec::new();
        }
        if self.config.is_owner {
            self.pending = Some(PendingConfirm::DestroyRoom);
            vec![ScreenAction::ShowAlert {
                content: "Leaving will destroy the room immediately. Are you sure?".to_owned(),
                show_cancel: true,
                show_confirm: true,
            }]
        } else {
            self.close()
        }
    }

    fn members(&self) -> Vec<ScreenAction> {
        if self.phase != Phase::Active {
            return Vec::new();
        }
        vec![ScreenAction::ShowParticipants]
    }

    /// Action-bar router: the gift slot opens the picker, every other tag
    /// (and any tag not present in the configured bar) is a reserved no-op.
    fn action_bar_item(&self, tag: u32) -> Vec<ScreenAction> {
        if self.phase != Phase::Active {
            return Vec::new();
        }
        let Some(item) = self.config.action_bar.iter().find(|item| item.tag == tag) else {
            return Vec::new();
        };
        if item.tag != GIFT_ITEM_TAG {
            return Vec::new();
        }
        vec![ScreenAction::ShowGiftPicker {
            titles: vec!["Gifts".to_owned()],
            gifts: self.config.catalog.gifts().to_vec(),
        }]
    }

    fn member_selected(&mut self, user: &UserProfile, muted_context: bool) -> Vec<ScreenAction> {
        if self.phase != Phase::Active {
            return Vec::new();
        }
        self.remember(user);
        vec![ScreenAction::ShowUserActions { items: user_menu_items(muted_context) }]
    }

    /// Member-action router.
    fn menu_item(&mut self, user: UserProfile, tag: MenuTag) -> Vec<ScreenAction> {
        if self.phase != Phase::Active {
            return Vec::new();
        }
        self.remember(&user);
        match tag {
            MenuTag::Mute => {
                vec![ScreenAction::Gateway(GatewayCommand::Mute { user_id: user.user_id })]
            },
            MenuTag::Unmute => {
                vec![ScreenAction::Gateway(GatewayCommand::Unmute { user_id: user.user_id })]
            },
            MenuTag::Remove => {
                let content = format!("Remove `{}`. Are you sure?", user.display_name());
                self.pending = Some(PendingConfirm::RemoveUser(user));
                vec![ScreenAction::ShowAlert { content, show_cancel: true, show_confirm: true }]
            },
            MenuTag::Custom(hook_tag) => vec![ScreenAction::ItemHook { tag: hook_tag }],
        }
    }

    fn confirm_reply(&mut self, accepted: bool) -> Result<Vec<ScreenAction>, ScreenError> {
        let Some(pending) = self.pending.take() else {
            // Stale reply from a dialog the screen no longer tracks.
            return Ok(Vec::new());
        };
        // A fatal session event may land between the dialog and the reply;
        // once the screen is leaving, a confirmation must not issue calls.
        if !accepted || self.phase != Phase::Active {
            return Ok(Vec::new());
        }
        match pending {
            PendingConfirm::DestroyRoom => {
                if self.config.room.room_id.is_empty() {
                    return Err(ScreenError::MissingRoomId);
                }
                self.set_phase(Phase::Leaving);
                Ok(vec![ScreenAction::Gateway(GatewayCommand::DestroyRoom {
                    room_id: self.config.room.room_id.clone(),
                })])
            },
            PendingConfirm::RemoveUser(user) => {
                Ok(vec![ScreenAction::Gateway(GatewayCommand::Kick { user_id: user.user_id })])
            },
        }
    }

    fn gateway_reply(&mut self, op: &GatewayOp, error: Option<String>) -> Vec<ScreenAction> {
        match op {
            GatewayOp::Destroy => match error {
                // A failed destroy never forces a transition.
                Some(detail) => {
                    self.set_phase(Phase::Active);
                    vec![toast(format!("Destroy room failed: {detail}"), TOAST_SHORT)]
                },
                None => self.close(),
            },
            GatewayOp::Mute { .. } | GatewayOp::Unmute { .. } => match error {
                Some(detail) => vec![toast(detail, TOAST_LONG)],
                // Success leaves the member list stale; refreshing it after a
                // moderation action is a known gap in the original screen.
                None => Vec::new(),
            },
            GatewayOp::Kick { .. } => match error {
                Some(detail) => vec![toast(detail, TOAST_LONG)],
                None => vec![toast("Remove successful!".to_owned(), TOAST_SHORT)],
            },
        }
    }

    fn exit_timer_fired(&mut self) -> Vec<ScreenAction> {
        if self.phase == Phase::Leaving { self.close() } else { Vec::new() }
    }

    /// Gateway notification fan-in.
    fn room_event(&mut self, event: RoomEvent) -> Vec<ScreenAction> {
        match event {
            RoomEvent::AccountRemoved => {
                self.defer_exit("Your account was removed.".to_owned())
            },
            RoomEvent::AccountForbidden => {
                self.defer_exit("Your account was forbidden.".to_owned())
            },
            RoomEvent::ForcedLogout { detail } => {
                self.defer_exit(format!("Forced to log out: {detail}"))
            },
            RoomEvent::Kicked => self.defer_exit("You were removed from the room.".to_owned()),
            RoomEvent::MessageReceived | RoomEvent::GlobalNotice => Vec::new(),
            RoomEvent::UserJoined { user } => {
                self.remember(&user);
                Vec::new()
            },
            RoomEvent::UserLeft { user_id } => {
                vec![toast(format!("{} left.", self.name_of(&user_id)), TOAST_LONG)]
            },
            RoomEvent::UserMuted { user_id } => {
                vec![toast(format!("{} was muted.", self.name_of(&user_id)), TOAST_LONG)]
            },
            RoomEvent::UserUnmuted { user_id } => {
                vec![toast(format!("{} was unmuted.", self.name_of(&user_id)), TOAST_LONG)]
            },
            RoomEvent::AnnouncementUpdated { text } => {
                vec![toast(format!("Room announcement updated: {text}"), TOAST_ANNOUNCEMENT)]
            },
            RoomEvent::ConnectionStateChanged { state } => {
                vec![toast(format!("Connection state changed to {state}."), TOAST_LONG)]
            },
            RoomEvent::LoggedInElsewhere { device } => {
                vec![toast(format!("Logged in on another device: {device}"), TOAST_LONG)]
            },
            // The gateway refreshes the token and re-enters the room on
            // reconnect by itself.
            RoomEvent::TokenWillExpire => Vec::new(),
            RoomEvent::TokenExpired => {
                vec![toast("Chat token expired.".to_owned(), TOAST_LONG)]
            },
            RoomEvent::OperationResult { kind, error } => self.operation_result(kind, error),
        }
    }

    fn operation_result(&mut self, kind: RoomOpKind, error: Option<String>) -> Vec<ScreenAction> {
        if let Some(detail) = error {
            // Errors surface and never transition, regardless of kind.
            return vec![toast(format!("Room operation {kind} failed: {detail}"), TOAST_LONG)];
        }
        match kind {
            // Already left or destroyed: nothing left to wait for, exit
            // without the toast delay.
            RoomOpKind::Leave | RoomOpKind::Destroyed => self.close(),
            RoomOpKind::Report => vec![toast("Report submitted.".to_owned(), TOAST_SHORT)],
            RoomOpKind::Other => Vec::new(),
        }
    }

    /// Fatal session event: toast, then arm the deferred exit so the toast
    /// can render first. Only the first fatal event arms the timer.
    fn defer_exit(&mut self, text: String) -> Vec<ScreenAction> {
        let mut actions = vec![toast(text, TOAST_SHORT)];
        if self.phase == Phase::Active {
            self.set_phase(Phase::Leaving);
            actions.push(ScreenAction::ScheduleExit { delay: EXIT_DELAY });
        }
        actions
    }

    /// Tear the screen down. The subscription is released before navigation
    /// on every exit path.
    fn close(&mut self) -> Vec<ScreenAction> {
        self.set_phase(Phase::Closed);
        vec![
            ScreenAction::Gateway(GatewayCommand::TeardownRoom),
            ScreenAction::Unsubscribe,
            ScreenAction::PopScreen,
        ]
    }

    fn remember(&mut self, user: &UserProfile) {
        if !user.nickname.is_empty() {
            self.names.insert(user.user_id.clone(), user.nickname.clone());
        }
    }

    fn name_of(&self, user_id: &str) -> String {
        self.names.get(user_id).cloned().unwrap_or_else(|| user_id.to_owned())
    }
}

fn toast(text: String, duration: Duration) -> ScreenAction {
    ScreenAction::ShowToast { text, duration }
}
