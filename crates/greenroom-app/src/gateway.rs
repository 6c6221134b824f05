//! Chatroom gateway boundary.
//!
//! The `Gateway` trait is the screen's view of the chatroom service:
//! moderation calls, room destruction, local session teardown, and the
//! room-events subscription. Subscriptions are explicit handles released
//! deterministically on every exit path, never implicit deinit-time
//! unregistration.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use thiserror::Error;
use tokio::sync::mpsc::UnboundedSender;

use greenroom_screen::{RoomEvent, ScreenEvent};

/// Errors from gateway calls.
///
/// Always non-fatal to the screen: the controller surfaces them as timed
/// toasts and never retries.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The HTTP request itself failed.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a rejection status.
    #[error("service rejected the call with status {status}")]
    Rejected {
        /// HTTP status code.
        status: u16,
    },
}

/// RAII handle for a room-events subscription.
///
/// Dropping the guard unregisters the listener. The driver holds it from
/// `Subscribe` until `Unsubscribe` (or any early-return failure path), so
/// release is guaranteed on every exit.
pub struct SubscriptionGuard {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl SubscriptionGuard {
    /// Build a guard around a release callback.
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self { release: Some(Box::new(release)) }
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
            tracing::debug!("room events subscription released");
        }
    }
}

/// The chatroom service boundary.
pub trait Gateway: Send + Sync + 'static {
    /// Register a room-events listener. Events are pushed into `events` as
    /// `ScreenEvent::Room` until the returned guard is dropped.
    fn subscribe(&self, events: UnboundedSender<ScreenEvent>) -> SubscriptionGuard;

    /// Mute a member in the room.
    fn mute(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<(), GatewayError>> + Send;

    /// Lift a mute on a member.
    fn unmute(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<(), GatewayError>> + Send;

    /// Kick a member out of the room.
    fn kick(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<(), GatewayError>> + Send;

    /// Destroy the room (owner path).
    fn destroy_room(
        &self,
        room_id: &str,
    ) -> impl std::future::Future<Output = Result<(), GatewayError>> + Send;

    /// Tear down the local room session. Failures are logged, not surfaced.
    fn teardown(&self) -> impl std::future::Future<Output = Result<(), GatewayError>> + Send;
}

type Listeners = Arc<Mutex<HashMap<u64, UnboundedSender<ScreenEvent>>>>;

/// REST-backed gateway.
///
/// Moderation and destruction go over HTTP against the demo chatroom
/// service; room events are pushed in via [`RestGateway::emit`] (in the demo
/// binary, by simulated session events).
pub struct RestGateway {
    client: reqwest::Client,
    base_url: String,
    room_id: String,
    listeners: Listeners,
    next_listener: AtomicU64,
}

impl RestGateway {
    /// Create a gateway for one room.
    pub fn new(base_url: impl Into<String>, room_id: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            room_id: room_id.into(),
            listeners: Arc::new(Mutex::new(HashMap::new())),
            next_listener: AtomicU64::new(0),
        }
    }

    /// Push a room event to every registered listener.
    pub fn emit(&self, event: RoomEvent) {
        let mut listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        listeners.retain(|_, sender| sender.send(ScreenEvent::Room(event.clone())).is_ok());
    }

    fn endpoint(&self, suffix: &str) -> String {
        format!("{}/chatroom/{}{suffix}", self.base_url, self.room_id)
    }

    async fn send_request(request: reqwest::RequestBuilder) -> Result<(), GatewayError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(GatewayError::Rejected { status: status.as_u16() })
        }
    }
}

impl Gateway for RestGateway {
    fn subscribe(&self, events: UnboundedSender<ScreenEvent>) -> SubscriptionGuard {
        let id = self.next_listener.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner).insert(id, events);

        let listeners = Arc::clone(&self.listeners);
        SubscriptionGuard::new(move || {
            listeners.lock().unwrap_or_else(PoisonError::into_inner).remove(&id);
        })
    }

    fn mute(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<(), GatewayError>> + Send {
        let request = self.client.post(self.endpoint(&format!("/mute/{user_id}")));
        Self::send_request(request)
    }

    fn unmute(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<(), GatewayError>> + Send {
        let request = self.client.delete(self.endpoint(&format!("/mute/{user_id}")));
        Self::send_request(request)
    }

    fn kick(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<(), GatewayError>> + Send {
        let request = self.client.delete(self.endpoint(&format!("/members/{user_id}")));
        Self::send_request(request)
    }

    fn destroy_room(
        &self,
        room_id: &str,
    ) -> impl std::future::Future<Output = Result<(), GatewayError>> + Send {
        let request = self.client.delete(format!("{}/chatroom/{room_id}", self.base_url));
        Self::send_request(request)
    }

    fn teardown(&self) -> impl std::future::Future<Output = Result<(), GatewayError>> + Send {
        // The local session has no server-side resource to release; the
        // listener map is cleared when guards drop.
        tracing::debug!(room_id = %self.room_id, "room session torn down");
        std::future::ready(Ok(()))
    }
}
