//! Core types for the Greenroom chatroom screen.
//!
//! This crate holds the data the screen itself owns: the room identity, the
//! bottom action bar, member context menus, and the load-once gift catalog.
//! Everything else (messages, membership, connection management) belongs to
//! the chatroom gateway and is only passed through.
//!
//! ## Architecture
//!
//! ```text
//! greenroom-core
//!   ├─ entity      (RoomInfo, UserProfile, action bar, member menus)
//!   ├─ catalog     (typed gift catalog, parse-or-reject per entry)
//!   └─ env         (Environment seam for time and sleeping)
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod entity;
pub mod env;

pub use catalog::{CatalogError, Gift, GiftCatalog};
pub use entity::{
    ActionBarItem, GIFT_ITEM_TAG, MenuItem, MenuTag, RoomInfo, UserProfile, default_action_bar,
    tags_are_unique, user_menu_items,
};
