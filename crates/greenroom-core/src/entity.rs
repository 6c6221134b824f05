//! Screen-owned entities.
//!
//! All three entity families here are created when the screen loads and
//! discarded when it closes; none of them survive navigation away from the
//! room.

use serde::{Deserialize, Serialize};

/// Tag of the "send gift" slot in the bottom action bar.
///
/// The action-bar router switches on this value.
pub const GIFT_ITEM_TAG: u32 = 0;

/// Identity of the room being displayed, plus the local user's display
/// identity. Immutable for the screen's lifetime once injected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomInfo {
    /// Room identifier used for all gateway calls.
    pub room_id: String,
    /// User id of the room owner.
    pub owner_id: String,
    /// Display name of the room.
    pub name: String,
    /// Nickname of the local user.
    pub nickname: String,
    /// Avatar asset key of the local user.
    pub avatar: String,
}

/// The gateway's user-info surface reduced to what the screen reads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Stable user identifier.
    pub user_id: String,
    /// Display nickname (may be empty).
    #[serde(default)]
    pub nickname: String,
    /// Avatar asset key (may be empty).
    #[serde(default)]
    pub avatar: String,
}

impl UserProfile {
    /// Create a profile from an id and nickname.
    pub fn new(user_id: impl Into<String>, nickname: impl Into<String>) -> Self {
        Self { user_id: user_id.into(), nickname: nickname.into(), avatar: String::new() }
    }

    /// Nickname, falling back to the user id when empty.
    pub fn display_name(&self) -> &str {
        if self.nickname.is_empty() { &self.user_id } else { &self.nickname }
    }
}

/// One slot in the bottom action bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionBarItem {
    /// Routing tag. Must be unique within the bar.
    pub tag: u32,
    /// Asset key for the unselected icon.
    pub icon: String,
    /// Asset key for the selected icon.
    pub selected_icon: String,
    /// Whether the slot carries an unread indicator.
    pub show_badge: bool,
    /// Whether the slot is currently selected.
    pub selected: bool,
}

/// Build the static action bar: a single "send gift" slot.
pub fn default_action_bar() -> Vec<ActionBarItem> {
    vec![ActionBarItem {
        tag: GIFT_ITEM_TAG,
        icon: "sendgift".to_owned(),
        selected_icon: "sendgift".to_owned(),
        show_badge: false,
        selected: false,
    }]
}

/// Check the action-bar invariant: routing switches on tags, so they must be
/// unique within the bar.
pub fn tags_are_unique(items: &[ActionBarItem]) -> bool {
    let mut seen = std::collections::HashSet::new();
    items.iter().all(|item| seen.insert(item.tag))
}

/// Tag of a member context-menu entry.
///
/// `Custom` is the extensibility escape hatch: entries the screen does not
/// hardcode are dispatched back to the driver as an item hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTag {
    /// Mute the target user in this room.
    Mute,
    /// Lift a mute on the target user.
    Unmute,
    /// Kick the target user out of the room.
    Remove,
    /// Driver-defined entry, identified by its hook tag.
    Custom(u32),
}

/// One entry of the member context menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    /// Dispatch tag.
    pub tag: MenuTag,
    /// Human-readable title.
    pub title: String,
}

impl MenuItem {
    fn new(tag: MenuTag, title: &str) -> Self {
        Self { tag, title: title.to_owned() }
    }
}

/// Member context-menu entries for a target user.
///
/// The muted context swaps the mute affordance for an unmute one; the remove
/// affordance is always present.
pub fn user_menu_items(muted_context: bool) -> Vec<MenuItem> {
    if muted_context {
        vec![MenuItem::new(MenuTag::Unmute, "Unmute"), MenuItem::new(MenuTag::Remove, "Remove")]
    } else {
        vec![MenuItem::new(MenuTag::Mute, "Mute"), MenuItem::new(MenuTag::Remove, "Remove")]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_nickname() {
        let user = UserProfile::new("u1", "Alice");
        assert_eq!(user.display_name(), "Alice");
    }

    #[test]
    fn display_name_falls_back_to_id() {
        let user = UserProfile::new("u1", "");
        assert_eq!(user.display_name(), "u1");
    }

    #[test]
    fn default_action_bar_has_gift_slot() {
        let bar = default_action_bar();
        assert_eq!(bar.len(), 1);
        assert_eq!(bar[0].tag, GIFT_ITEM_TAG);
        assert!(!bar[0].show_badge);
        assert!(!bar[0].selected);
    }

    #[test]
    fn default_action_bar_tags_unique() {
        assert!(tags_are_unique(&default_action_bar()));
    }

    #[test]
    fn duplicate_tags_detected() {
        let mut bar = default_action_bar();
        bar.extend(default_action_bar());
        assert!(!tags_are_unique(&bar));
    }

    #[test]
    fn menu_swaps_mute_for_unmute_in_muted_context() {
        let normal = user_menu_items(false);
        assert_eq!(normal[0].tag, MenuTag::Mute);

        let muted = user_menu_items(true);
        assert_eq!(muted[0].tag, MenuTag::Unmute);

        assert!(normal.iter().any(|i| i.tag == MenuTag::Remove));
        assert!(muted.iter().any(|i| i.tag == MenuTag::Remove));
    }
}
