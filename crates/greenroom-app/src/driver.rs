//! Screen driver.
//!
//! Owns the single event queue and executes controller actions against the
//! gateway and presenter. All handling is sequential: gateway calls are
//! awaited inline and their completions re-enter the queue, so the
//! controller never observes reentrancy.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use greenroom_core::env::Environment;
use greenroom_screen::{GatewayCommand, GatewayOp, RoomScreen, ScreenAction, ScreenEvent};

use crate::gateway::{Gateway, SubscriptionGuard};
use crate::presenter::Presenter;

/// Drives a `RoomScreen` until it pops.
pub struct ScreenDriver<E: Environment, G: Gateway, P: Presenter> {
    screen: RoomScreen,
    env: E,
    gateway: G,
    presenter: P,
    events_tx: UnboundedSender<ScreenEvent>,
    events_rx: UnboundedReceiver<ScreenEvent>,
    subscription: Option<SubscriptionGuard>,
    exit_timer: Option<JoinHandle<()>>,
    item_hooks: HashMap<u32, Box<dyn Fn() + Send>>,
}

impl<E: Environment, G: Gateway, P: Presenter> ScreenDriver<E, G, P> {
    /// Create a driver for the given screen and collaborators.
    ///
    /// `Shown` is enqueued immediately, so it is always the first event the
    /// screen sees regardless of when callers start feeding input.
    pub fn new(env: E, screen: RoomScreen, gateway: G, presenter: P) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        if events_tx.send(ScreenEvent::Shown).is_err() {
            tracing::debug!("event queue closed");
        }
        Self {
            screen,
            env,
            gateway,
            presenter,
            events_tx,
            events_rx,
            subscription: None,
            exit_timer: None,
            item_hooks: HashMap::new(),
        }
    }

    /// A handle for feeding events into the driver (UI input, simulated
    /// session events).
    pub fn sender(&self) -> UnboundedSender<ScreenEvent> {
        self.events_tx.clone()
    }

    /// Register a hook for a custom member-menu entry.
    pub fn on_item_hook(&mut self, tag: u32, hook: impl Fn() + Send + 'static) {
        self.item_hooks.insert(tag, Box::new(hook));
    }

    /// Run the screen to completion.
    ///
    /// Processes events until the screen pops or all senders are gone. The
    /// exit timer and the subscription handle are released on every exit
    /// path.
    pub async fn run(mut self) {
        while let Some(event) = self.events_rx.recv().await {
            match self.screen.handle(event) {
                Ok(actions) => {
                    let mut popped = false;
                    for action in actions {
                        popped |= self.execute(action).await;
                    }
                    if popped {
                        break;
                    }
                },
                Err(error) if error.is_fatal() => {
                    tracing::error!(%error, "screen event rejected");
                },
                Err(error) => {
                    tracing::warn!(%error, "screen event refused");
                    self.presenter.show_toast(&error.to_string(), Duration::from_secs(2));
                },
            }
        }

        self.shutdown();
    }

    /// Execute one action. Returns true when the screen was popped.
    async fn execute(&mut self, action: ScreenAction) -> bool {
        match action {
            ScreenAction::LaunchRoomView { room_id, owner_id } => {
                self.presenter.launch_room_view(&room_id, &owner_id);
            },
            ScreenAction::UpdateHeader { room_name, user_name, avatar } => {
                self.presenter.update_header(&room_name, &user_name, &avatar);
            },
            ScreenAction::PlayBackgroundVideo => self.presenter.play_background_video(),
            ScreenAction::Subscribe => {
                self.subscription = Some(self.gateway.subscribe(self.events_tx.clone()));
            },
            ScreenAction::ShowToast { text, duration } => {
                self.presenter.show_toast(&text, duration);
            },
            ScreenAction::ShowAlert { content, show_cancel, show_confirm } => {
                self.presenter.show_alert(&content, show_cancel, show_confirm);
            },
            ScreenAction::ShowParticipants => self.presenter.show_participants(),
            ScreenAction::ShowUserActions { items } => self.presenter.show_user_actions(&items),
            ScreenAction::ShowGiftPicker { titles, gifts } => {
                self.presenter.show_gift_picker(&titles, &gifts);
            },
            ScreenAction::Gateway(command) => self.gateway_call(command).await,
            ScreenAction::ScheduleExit { delay } => self.arm_exit_timer(delay),
            ScreenAction::Unsubscribe => drop(self.subscription.take()),
            ScreenAction::ItemHook { tag } => match self.item_hooks.get(&tag) {
                Some(hook) => hook(),
                None => tracing::debug!(tag, "no hook registered for menu entry"),
            },
            ScreenAction::PopScreen => {
                self.presenter.pop_screen();
                return true;
            },
        }
        false
    }

    /// Issue a gateway call and feed its completion back into the queue.
    async fn gateway_call(&mut self, command: GatewayCommand) {
        match command {
            GatewayCommand::Mute { user_id } => {
                let error = self.gateway.mute(&user_id).await.err().map(|e| e.to_string());
                self.send(ScreenEvent::GatewayReply { op: GatewayOp::Mute { user_id }, error });
            },
            GatewayCommand::Unmute { user_id } => {
                let error = self.gateway.unmute(&user_id).await.err().map(|e| e.to_string());
                self.send(ScreenEvent::GatewayReply { op: GatewayOp::Unmute { user_id }, error });
            },
            GatewayCommand::Kick { user_id } => {
                let error = self.gateway.kick(&user_id).await.err().map(|e| e.to_string());
                self.send(ScreenEvent::GatewayReply { op: GatewayOp::Kick { user_id }, error });
            },
            GatewayCommand::DestroyRoom { room_id } => {
                let error = self.gateway.destroy_room(&room_id).await.err().map(|e| e.to_string());
                self.send(ScreenEvent::GatewayReply { op: GatewayOp::Destroy, error });
            },
            GatewayCommand::TeardownRoom => {
                if let Err(error) = self.gateway.teardown().await {
                    tracing::warn!(%error, "room teardown failed");
                }
            },
        }
    }

    /// Arm (or re-arm) the deferred-exit timer.
    fn arm_exit_timer(&mut self, delay: Duration) {
        if let Some(handle) = self.exit_timer.take() {
            handle.abort();
        }
        let env = self.env.clone();
        let events = self.events_tx.clone();
        self.exit_timer = Some(tokio::spawn(async move {
            env.sleep(delay).await;
            // The receiver may already be gone; the fired timer is then a
            // no-op target.
            let _ = events.send(ScreenEvent::ExitTimerFired);
        }));
    }

    fn send(&self, event: ScreenEvent) {
        if self.events_tx.send(event).is_err() {
            tracing::debug!("event queue closed");
        }
    }

    fn shutdown(&mut self) {
        if let Some(handle) = self.exit_timer.take() {
            handle.abort();
        }
        drop(self.subscription.take());
    }
}
