//! Lifecycle tests: back-action branches, fatal session events, and the
//! deferred-exit path.

use greenroom_core::{GiftCatalog, RoomInfo};
use greenroom_screen::{
    GatewayCommand, GatewayOp, Phase, RoomEvent, RoomOpKind, RoomScreen, ScreenAction,
    ScreenConfig, ScreenEvent,
};

fn room() -> RoomInfo {
    RoomInfo {
        room_id: "room-1".to_owned(),
        owner_id: "owner-1".to_owned(),
        name: "Demo Room".to_owned(),
        nickname: "me".to_owned(),
        avatar: "avatar-key".to_owned(),
    }
}

fn shown_screen(is_owner: bool) -> RoomScreen {
    let mut screen = RoomScreen::new(ScreenConfig::new(room(), is_owner, GiftCatalog::empty()));
    screen.handle(ScreenEvent::Shown).unwrap();
    screen
}

fn is_gateway(action: &ScreenAction) -> bool {
    matches!(action, ScreenAction::Gateway(_))
}

/// `Unsubscribe` must come before `PopScreen` in a close sequence.
fn assert_close_sequence(actions: &[ScreenAction]) {
    let unsubscribe = actions.iter().position(|a| *a == ScreenAction::Unsubscribe);
    let pop = actions.iter().position(|a| *a == ScreenAction::PopScreen);
    let teardown =
        actions.iter().position(|a| *a == ScreenAction::Gateway(GatewayCommand::TeardownRoom));
    assert!(teardown.is_some(), "close must tear down the room session");
    assert!(
        unsubscribe.is_some() && pop.is_some() && unsubscribe < pop,
        "listener must be unregistered before the screen is popped: {actions:?}"
    );
}

#[test]
fn non_owner_back_exits_without_confirmation() {
    let mut screen = shown_screen(false);
    let actions = screen.handle(ScreenEvent::BackTapped).unwrap();

    assert!(
        !actions.iter().any(|a| matches!(a, ScreenAction::ShowAlert { .. })),
        "non-owner must never see a destroy confirmation"
    );
    let teardowns = actions
        .iter()
        .filter(|a| **a == ScreenAction::Gateway(GatewayCommand::TeardownRoom))
        .count();
    assert_eq!(teardowns, 1, "exit-teardown must be called exactly once");
    assert_close_sequence(&actions);
    assert_eq!(screen.phase(), Phase::Closed);
}

#[test]
fn owner_back_asks_for_confirmation() {
    let mut screen = shown_screen(true);
    let actions = screen.handle(ScreenEvent::BackTapped).unwrap();

    assert_eq!(actions.len(), 1);
    assert!(matches!(
        actions[0],
        ScreenAction::ShowAlert { show_cancel: true, show_confirm: true, .. }
    ));
    assert_eq!(screen.phase(), Phase::Active);
}

#[test]
fn owner_back_declined_stays_active_without_gateway_call() {
    let mut screen = shown_screen(true);
    screen.handle(ScreenEvent::BackTapped).unwrap();

    let actions = screen.handle(ScreenEvent::ConfirmReply { accepted: false }).unwrap();
    assert!(actions.is_empty());
    assert_eq!(screen.phase(), Phase::Active);
}

#[test]
fn owner_back_confirmed_issues_destroy() {
    let mut screen = shown_screen(true);
    screen.handle(ScreenEvent::BackTapped).unwrap();

    let actions = screen.handle(ScreenEvent::ConfirmReply { accepted: true }).unwrap();
    assert_eq!(
        actions,
        vec![ScreenAction::Gateway(GatewayCommand::DestroyRoom { room_id: "room-1".to_owned() })]
    );
    assert_eq!(screen.phase(), Phase::Leaving);
}

#[test]
fn successful_destroy_closes_screen() {
    let mut screen = shown_screen(true);
    screen.handle(ScreenEvent::BackTapped).unwrap();
    screen.handle(ScreenEvent::ConfirmReply { accepted: true }).unwrap();

    let actions = screen
        .handle(ScreenEvent::GatewayReply { op: GatewayOp::Destroy, error: None })
        .unwrap();
    assert_close_sequence(&actions);
    assert_eq!(screen.phase(), Phase::Closed);
}

#[test]
fn failed_destroy_stays_active_with_one_error_toast() {
    let mut screen = shown_screen(true);
    screen.handle(ScreenEvent::BackTapped).unwrap();
    screen.handle(ScreenEvent::ConfirmReply { accepted: true }).unwrap();

    let actions = screen
        .handle(ScreenEvent::GatewayReply {
            op: GatewayOp::Destroy,
            error: Some("forbidden".to_owned()),
        })
        .unwrap();

    let toasts =
        actions.iter().filter(|a| matches!(a, ScreenAction::ShowToast { .. })).count();
    assert_eq!(toasts, 1);
    assert!(!actions.iter().any(is_gateway));
    assert_eq!(screen.phase(), Phase::Active);
}

fn fatal_events() -> Vec<ScreenEvent> {
    vec![
        ScreenEvent::Room(RoomEvent::AccountRemoved),
        ScreenEvent::Room(RoomEvent::AccountForbidden),
        ScreenEvent::Room(RoomEvent::ForcedLogout { detail: "elsewhere".to_owned() }),
        ScreenEvent::Room(RoomEvent::Kicked),
    ]
}

#[test]
fn fatal_session_events_toast_then_schedule_exit() {
    for event in fatal_events() {
        let mut screen = shown_screen(false);
        let actions = screen.handle(event.clone()).unwrap();

        assert!(
            matches!(actions[0], ScreenAction::ShowToast { .. }),
            "fatal event {event:?} must toast first"
        );
        assert!(
            actions.iter().any(|a| matches!(a, ScreenAction::ScheduleExit { .. })),
            "fatal event {event:?} must arm the deferred exit"
        );
        assert_eq!(screen.phase(), Phase::Leaving);

        // The timer firing performs the close, exactly once.
        let close = screen.handle(ScreenEvent::ExitTimerFired).unwrap();
        assert_close_sequence(&close);
        assert_eq!(screen.phase(), Phase::Closed);

        // A second firing is a no-op target.
        assert!(screen.handle(ScreenEvent::ExitTimerFired).unwrap().is_empty());
        assert_eq!(screen.phase(), Phase::Closed);
    }
}

#[test]
fn repeated_fatal_events_arm_exit_once() {
    let mut screen = shown_screen(false);
    let first = screen.handle(ScreenEvent::Room(RoomEvent::Kicked)).unwrap();
    assert!(first.iter().any(|a| matches!(a, ScreenAction::ScheduleExit { .. })));

    let second = screen.handle(ScreenEvent::Room(RoomEvent::AccountRemoved)).unwrap();
    assert!(
        !second.iter().any(|a| matches!(a, ScreenAction::ScheduleExit { .. })),
        "only the first fatal event arms the timer"
    );
}

#[test]
fn leave_result_without_error_exits_immediately() {
    for kind in [RoomOpKind::Leave, RoomOpKind::Destroyed] {
        let mut screen = shown_screen(false);
        let actions = screen
            .handle(ScreenEvent::Room(RoomEvent::OperationResult { kind, error: None }))
            .unwrap();

        assert!(
            !actions.iter().any(|a| matches!(a, ScreenAction::ScheduleExit { .. })),
            "leave/destroyed results exit without the toast delay"
        );
        assert_close_sequence(&actions);
        assert_eq!(screen.phase(), Phase::Closed);
    }
}

#[test]
fn report_result_toasts_without_transition() {
    let mut screen = shown_screen(false);
    let actions = screen
        .handle(ScreenEvent::Room(RoomEvent::OperationResult {
            kind: RoomOpKind::Report,
            error: None,
        }))
        .unwrap();

    assert_eq!(actions.len(), 1);
    assert!(matches!(actions[0], ScreenAction::ShowToast { .. }));
    assert_eq!(screen.phase(), Phase::Active);
}

#[test]
fn operation_errors_toast_without_transition_regardless_of_kind() {
    for kind in [RoomOpKind::Leave, RoomOpKind::Destroyed, RoomOpKind::Report, RoomOpKind::Other] {
        let mut screen = shown_screen(false);
        let actions = screen
            .handle(ScreenEvent::Room(RoomEvent::OperationResult {
                kind,
                error: Some("timeout".to_owned()),
            }))
            .unwrap();

        assert_eq!(actions.len(), 1, "kind {kind}: exactly one error toast");
        assert!(matches!(actions[0], ScreenAction::ShowToast { .. }));
        assert_eq!(screen.phase(), Phase::Active, "kind {kind}: no transition on error");
    }
}

#[test]
fn confirm_accepted_after_fatal_event_issues_no_destroy() {
    let mut screen = shown_screen(true);
    screen.handle(ScreenEvent::BackTapped).unwrap();

    // A fatal session event lands between the dialog and the reply.
    screen.handle(ScreenEvent::Room(RoomEvent::Kicked)).unwrap();
    assert_eq!(screen.phase(), Phase::Leaving);

    let actions = screen.handle(ScreenEvent::ConfirmReply { accepted: true }).unwrap();
    assert!(actions.is_empty(), "a leaving screen must not issue a destroy: {actions:?}");
    assert_eq!(screen.phase(), Phase::Leaving);
}

#[test]
fn events_after_close_are_no_ops() {
    let mut screen = shown_screen(false);
    screen.handle(ScreenEvent::BackTapped).unwrap();
    assert_eq!(screen.phase(), Phase::Closed);

    for event in [
        ScreenEvent::BackTapped,
        ScreenEvent::MembersTapped,
        ScreenEvent::Room(RoomEvent::Kicked),
        ScreenEvent::ExitTimerFired,
        ScreenEvent::ConfirmReply { accepted: true },
    ] {
        assert!(screen.handle(event).unwrap().is_empty());
        assert_eq!(screen.phase(), Phase::Closed);
    }
}
