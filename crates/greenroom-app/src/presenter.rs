//! Presentation seam.
//!
//! The driver renders every screen action through this trait; the demo
//! binary uses the tracing-backed `LogPresenter`.

use std::time::Duration;

use greenroom_core::{Gift, MenuItem};

/// Rendering surface for the room screen.
pub trait Presenter: Send + 'static {
    /// Mount the chatroom view for a room.
    fn launch_room_view(&self, room_id: &str, owner_id: &str);

    /// Update the header with room and user identity.
    fn update_header(&self, room_name: &str, user_name: &str, avatar: &str);

    /// Start the background video loop.
    fn play_background_video(&self);

    /// Show a transient notification.
    fn show_toast(&self, text: &str, duration: Duration);

    /// Show a modal confirmation alert.
    fn show_alert(&self, content: &str, show_cancel: bool, show_confirm: bool);

    /// Open the participants dialog.
    fn show_participants(&self);

    /// Open the member context menu.
    fn show_user_actions(&self, items: &[MenuItem]);

    /// Open the gift picker.
    fn show_gift_picker(&self, titles: &[String], gifts: &[Gift]);

    /// Pop the screen from navigation.
    fn pop_screen(&self);
}

/// Presenter that renders everything through `tracing`.
#[derive(Clone, Default)]
pub struct LogPresenter;

impl LogPresenter {
    /// Create a log presenter.
    pub fn new() -> Self {
        Self
    }
}

impl Presenter for LogPresenter {
    fn launch_room_view(&self, room_id: &str, owner_id: &str) {
        tracing::info!(target: "greenroom::ui", room_id, owner_id, "room view mounted");
    }

    fn update_header(&self, room_name: &str, user_name: &str, avatar: &str) {
        tracing::info!(target: "greenroom::ui", room_name, user_name, avatar, "header updated");
    }

    fn play_background_video(&self) {
        tracing::info!(target: "greenroom::ui", "background video playing");
    }

    fn show_toast(&self, text: &str, duration: Duration) {
        tracing::info!(target: "greenroom::ui", ?duration, "toast: {text}");
    }

    fn show_alert(&self, content: &str, show_cancel: bool, show_confirm: bool) {
        tracing::info!(
            target: "greenroom::ui",
            show_cancel,
            show_confirm,
            "alert: {content} (reply with `confirm` or `cancel`)"
        );
    }

    fn show_participants(&self) {
        tracing::info!(target: "greenroom::ui", "participants dialog opened");
    }

    fn show_user_actions(&self, items: &[MenuItem]) {
        let titles: Vec<&str> = items.iter().map(|item| item.title.as_str()).collect();
        tracing::info!(target: "greenroom::ui", ?titles, "member menu opened");
    }

    fn show_gift_picker(&self, titles: &[String], gifts: &[Gift]) {
        tracing::info!(
            target: "greenroom::ui",
            ?titles,
            count = gifts.len(),
            "gift picker opened"
        );
        for gift in gifts {
            tracing::info!(
                target: "greenroom::ui",
                id = %gift.gift_id,
                price = %gift.gift_price,
                "  {}", gift.gift_name
            );
        }
    }

    fn pop_screen(&self) {
        tracing::info!(target: "greenroom::ui", "screen popped");
    }
}
