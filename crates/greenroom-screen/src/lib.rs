//! Room screen state machine.
//!
//! The `RoomScreen` is the screen-level controller for a chatroom: it routes
//! inbound events (UI actions and gateway/session events) into outbound
//! commands against the presenter and the chatroom gateway.
//!
//! Pure state machine: events in, actions out, no direct I/O. The driver
//! (see `greenroom-app`) executes the actions and feeds completions back in
//! as events.
//!
//! ## Lifecycle
//!
//! ```text
//! Unloaded ──Shown──▶ Active ──back/fatal──▶ Leaving ──▶ Closed
//!                       │                                  ▲
//!                       └────── non-owner back ────────────┘
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod action;
mod controller;
mod error;
mod event;

pub use action::{GatewayCommand, ScreenAction};
pub use controller::{Phase, RoomScreen, ScreenConfig};
pub use error::ScreenError;
pub use event::{ConnectionState, GatewayOp, RoomEvent, RoomOpKind, ScreenEvent};
