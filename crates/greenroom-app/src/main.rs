//! Greenroom demo binary.
//!
//! Runs one room screen against the REST gateway, rendering through the log
//! presenter and reading UI commands from stdin:
//!
//! ```bash
//! greenroom --room-id demo --owner-id alice --nickname alice --owner
//! ```
//!
//! Commands: `back`, `members`, `gift`, `confirm`, `cancel`, and `kicked`
//! (simulates the gateway kicking the local user).

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use greenroom_app::{LogPresenter, RestGateway, ScreenDriver, SystemEnv};
use greenroom_core::{GIFT_ITEM_TAG, GiftCatalog, RoomInfo};
use greenroom_screen::{RoomEvent, RoomScreen, ScreenConfig, ScreenEvent};

/// Greenroom chatroom screen demo
#[derive(Parser, Debug)]
#[command(name = "greenroom")]
#[command(about = "Demo chatroom room screen")]
#[command(version)]
struct Args {
    /// Room to display
    #[arg(long, default_value = "demo-room")]
    room_id: String,

    /// User id of the room owner
    #[arg(long, default_value = "owner")]
    owner_id: String,

    /// Display name of the room
    #[arg(long, default_value = "Greenroom")]
    room_name: String,

    /// Nickname of the local user
    #[arg(long, default_value = "guest")]
    nickname: String,

    /// Avatar asset key of the local user
    #[arg(long, default_value = "avatar_default")]
    avatar: String,

    /// Whether the local user owns the room
    #[arg(long)]
    owner: bool,

    /// Path to the bundled gift catalog
    #[arg(long, default_value = "assets/gifts.json")]
    gifts: std::path::PathBuf,

    /// Base URL of the chatroom REST service
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    base_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    tracing::info!(room_id = %args.room_id, owner = args.owner, "greenroom starting");

    let room = RoomInfo {
        room_id: args.room_id.clone(),
        owner_id: args.owner_id,
        name: args.room_name,
        nickname: args.nickname,
        avatar: args.avatar,
    };
    let catalog = GiftCatalog::load_or_empty(&args.gifts);
    tracing::info!(gifts = catalog.len(), "gift catalog loaded");

    let screen = RoomScreen::new(ScreenConfig::new(room, args.owner, catalog));
    let gateway = RestGateway::new(args.base_url, args.room_id);
    let driver = ScreenDriver::new(SystemEnv::new(), screen, gateway, LogPresenter::new());

    let events = driver.sender();
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let event = match line.trim() {
                "" => continue,
                "back" => ScreenEvent::BackTapped,
                "members" => ScreenEvent::MembersTapped,
                "gift" => ScreenEvent::ActionBarItemTapped { tag: GIFT_ITEM_TAG },
                "confirm" => ScreenEvent::ConfirmReply { accepted: true },
                "cancel" => ScreenEvent::ConfirmReply { accepted: false },
                "kicked" => ScreenEvent::Room(RoomEvent::Kicked),
                other => {
                    tracing::warn!(command = other, "unknown command");
                    continue;
                },
            };
            if events.send(event).is_err() {
                break;
            }
        }
    });

    driver.run().await;
    tracing::info!("greenroom stopped");
}
