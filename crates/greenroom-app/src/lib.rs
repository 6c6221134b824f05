//! Production driver for the Greenroom room screen.
//!
//! Wires the sans-IO `RoomScreen` state machine to real collaborators:
//!
//! ```text
//! greenroom-app
//!   ├─ SystemEnv      (production Environment impl)
//!   ├─ RestGateway    (room moderation + destroy over HTTP)
//!   ├─ Presenter      (toast/dialog rendering seam)
//!   └─ ScreenDriver   (event loop, exit timer, subscription handle)
//! ```
//!
//! The driver owns the single event queue; gateway completions, dialog
//! replies, and the deferred-exit timer all come back through it, so the
//! controller runs single-threaded and non-reentrant.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod driver;
mod gateway;
mod presenter;
mod system_env;

pub use driver::ScreenDriver;
pub use gateway::{Gateway, GatewayError, RestGateway, SubscriptionGuard};
pub use presenter::{LogPresenter, Presenter};
pub use system_env::SystemEnv;
