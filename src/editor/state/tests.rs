// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Spray-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Spray and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use chrono::{TimeZone, Utc};
use rstest::{fixture, rstest};

use super::{wall_name_from_file, Action, EditorState, Mode};
use crate::editor::hit_test::{ImageRect, TapOutcome};
use crate::model::{FootRule, Grade, Hold, HoldType, Point, Route, RouteId, Wall, WallId};

const RECT: ImageRect = ImageRect::new(0.0, 0.0, 200.0, 100.0);

fn wall(id: &str) -> Wall {
    Wall {
        id: WallId::new(id).unwrap(),
        image: format!("/uploads/wall-{id}.png"),
        name: format!("Wall {id}"),
        created_at: Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()),
    }
}

fn route(id: &str, wall_id: &str) -> Route {
    Route {
        id: RouteId::new(id).unwrap(),
        name: format!("Route {id}"),
        setter: "Ada".to_owned(),
        grade: Grade::new(4).unwrap(),
        notes: String::new(),
        foot_rule: FootRule::Any,
        holds: vec![Hold::new(Point::new(20.0, 20.0), HoldType::Start)],
        wall_id: WallId::new(wall_id).unwrap(),
        created_at: None,
        updated_at: None,
    }
}

#[fixture]
fn creating() -> EditorState {
    EditorState::new()
        .apply(Action::LoadWall(wall("w1")))
        .apply(Action::StartRoute)
}

/// Taps at percentage coordinates on a 200x100 box.
fn tap_at(state: EditorState, x: f64, y: f64, now_ms: u64) -> (EditorState, Option<TapOutcome>) {
    state.tap(RECT, x * 2.0, y, now_ms)
}

#[test]
fn picking_an_image_starts_an_unsaved_wall() {
    let state = EditorState::new().apply(Action::PickImage {
        wall_id: WallId::from_millis(1_700_000_000_000),
        file_name: "cave.left.jpg".to_owned(),
        image: "data:image/jpeg;base64,AAA=".to_owned(),
    });

    assert_eq!(state.mode(), Mode::Choose);
    let active = state.wall().unwrap();
    assert_eq!(active.id.as_str(), "1700000000000");
    assert_eq!(active.name, "cave.left");
    assert_eq!(active.created_at, None);
    assert!(state.holds().is_empty());
}

#[rstest]
#[case("board.png", "board")]
#[case("no-extension", "no-extension")]
#[case("archive.tar.gz", "archive.tar")]
#[case(".hidden", ".hidden")]
fn wall_name_drops_last_extension(#[case] file_name: &str, #[case] expected: &str) {
    assert_eq!(wall_name_from_file(file_name), expected);
}

#[rstest]
fn start_route_resets_fields_and_hold_type(creating: EditorState) {
    let state = creating
        .apply(Action::SelectHoldType(HoldType::Foot))
        .apply(Action::SetRouteName("Crimpy".to_owned()))
        .apply(Action::BackToWall)
        .apply(Action::StartRoute);

    assert_eq!(state.mode(), Mode::Create);
    assert_eq!(state.selected_type(), HoldType::Start);
    assert_eq!(state.route().name, "");
    assert_eq!(state.route().grade, Grade::EASIEST);
    assert_eq!(state.route().foot_rule, FootRule::Marked);
}

#[test]
fn start_route_needs_a_wall() {
    let state = EditorState::new().apply(Action::StartRoute);
    assert_eq!(state.mode(), Mode::NoWall);
    assert_eq!(state.rev(), 0);
}

#[rstest]
fn taps_add_and_double_tap_deletes(creating: EditorState) {
    let (state, outcome) = tap_at(creating, 10.0, 10.0, 0);
    assert!(matches!(outcome, Some(TapOutcome::Added(_))));

    let (state, outcome) = tap_at(state, 10.5, 10.5, 1_000);
    assert!(matches!(outcome, Some(TapOutcome::Armed { .. })));
    let (state, outcome) = tap_at(state, 10.5, 10.5, 1_200);
    assert!(matches!(outcome, Some(TapOutcome::Deleted { index: 0, .. })));
    assert!(state.holds().is_empty());
}

#[rstest]
fn single_tap_on_hold_adds_at_tap_point_when_timer_fires(creating: EditorState) {
    let state = creating.apply(Action::SelectHoldType(HoldType::Hand));
    let (state, _) = tap_at(state, 10.0, 10.0, 0);
    let (state, outcome) = tap_at(state, 10.5, 10.5, 1_000);
    let Some(TapOutcome::Armed { token, deadline_ms }) = outcome else {
        panic!("tap on a hold should arm");
    };

    let (state, added) = state.fire_tap_timer(token, deadline_ms);
    assert_eq!(added, Some(Hold::new(Point::new(10.5, 10.5), HoldType::Hand)));
    assert_eq!(state.holds().len(), 2);
    assert_eq!(state.hold_count(HoldType::Hand), 2);
}

#[rstest]
fn taps_outside_create_mode_are_ignored(creating: EditorState) {
    let state = creating.apply(Action::BackToWall);
    let rev = state.rev();
    let (state, outcome) = tap_at(state, 50.0, 50.0, 0);
    assert_eq!(outcome, None);
    assert!(state.holds().is_empty());
    assert_eq!(state.rev(), rev);
}

#[rstest]
fn undo_removes_most_recent_hold(creating: EditorState) {
    let (state, _) = tap_at(creating, 10.0, 10.0, 0);
    let state = state.apply(Action::SelectHoldType(HoldType::Finish));
    let (state, _) = tap_at(state, 60.0, 60.0, 10);
    let state = state.apply(Action::Undo);

    assert_eq!(
        state.holds(),
        &[Hold::new(Point::new(10.0, 10.0), HoldType::Start)]
    );
    let state = state.apply(Action::Undo).apply(Action::Undo);
    assert!(state.holds().is_empty());
}

#[rstest]
fn undo_disarms_pending_tap(creating: EditorState) {
    let (state, _) = tap_at(creating, 10.0, 10.0, 0);
    let (state, outcome) = tap_at(state, 10.0, 10.0, 100);
    let Some(TapOutcome::Armed { token, .. }) = outcome else {
        panic!("tap on a hold should arm");
    };
    let state = state.apply(Action::Undo);
    let (state, added) = state.fire_tap_timer(token, 1_000);
    assert_eq!(added, None);
    assert!(state.holds().is_empty());
}

#[rstest]
fn metadata_edits_only_apply_in_create(creating: EditorState) {
    let state = creating
        .apply(Action::SetRouteName("Slab".to_owned()))
        .apply(Action::SetSetter("Bo".to_owned()))
        .apply(Action::SetGrade(Grade::new(7).unwrap()))
        .apply(Action::SetNotes("no dyno".to_owned()))
        .apply(Action::SetFootRule(FootRule::Any));
    assert_eq!(state.route().name, "Slab");
    assert_eq!(state.route().setter, "Bo");
    assert_eq!(state.route().grade.to_string(), "V7");
    assert_eq!(state.route().notes, "no dyno");
    assert_eq!(state.route().foot_rule, FootRule::Any);

    let viewing = EditorState::new().apply(Action::LoadRoute {
        route: route("r1", "w1"),
        wall: Some(wall("w1")),
    });
    let unchanged = viewing.clone().apply(Action::SetRouteName("x".to_owned()));
    assert_eq!(unchanged, viewing);
}

#[test]
fn loading_a_route_enters_view_and_switches_wall() {
    let state = EditorState::new()
        .apply(Action::LoadWall(wall("w1")))
        .apply(Action::LoadRoute {
            route: route("r1", "w2"),
            wall: Some(wall("w2")),
        });

    assert_eq!(state.mode(), Mode::View);
    assert_eq!(state.wall_id().unwrap().as_str(), "w2");
    assert_eq!(state.route().id.as_ref().unwrap().as_str(), "r1");
    assert_eq!(state.holds().len(), 1);
}

#[test]
fn loading_a_route_of_an_unknown_wall_is_ignored() {
    let before = EditorState::new().apply(Action::LoadWall(wall("w1")));
    let after = before.clone().apply(Action::LoadRoute {
        route: route("r1", "w2"),
        wall: None,
    });
    assert_eq!(after, before);
}

#[rstest]
fn loading_a_route_while_creating_edits_in_place(creating: EditorState) {
    let state = creating.apply(Action::LoadRoute {
        route: route("r1", "w1"),
        wall: None,
    });
    assert_eq!(state.mode(), Mode::Create);
    assert_eq!(state.route().setter, "Ada");
}

#[test]
fn back_from_view_keeps_metadata_but_drops_holds_and_id() {
    let mut saved = route("r1", "w1");
    saved.created_at = Some(Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap());
    let state = EditorState::new()
        .apply(Action::LoadRoute {
            route: saved,
            wall: Some(wall("w1")),
        })
        .apply(Action::BackToWall);

    assert_eq!(state.mode(), Mode::Choose);
    assert!(state.holds().is_empty());
    assert_eq!(state.route().id, None);
    assert_eq!(state.route().created_at, None);
    assert_eq!(state.route().name, "Route r1");
}

#[rstest]
fn back_from_create_resets_route(creating: EditorState) {
    let (state, _) = tap_at(creating, 30.0, 30.0, 0);
    let state = state
        .apply(Action::SetRouteName("Gone".to_owned()))
        .apply(Action::BackToWall);
    assert_eq!(state.mode(), Mode::Choose);
    assert!(state.holds().is_empty());
    assert_eq!(state.route().name, "");
}

#[rstest]
fn reset_returns_to_no_wall(creating: EditorState) {
    let state = creating.apply(Action::Reset);
    assert_eq!(state.mode(), Mode::NoWall);
    assert!(state.wall().is_none());
}

#[rstest]
fn clear_route_keeps_mode_and_wall(creating: EditorState) {
    let (state, _) = tap_at(creating, 30.0, 30.0, 0);
    let state = state
        .apply(Action::SelectHoldType(HoldType::Foot))
        .apply(Action::ClearRoute);
    assert_eq!(state.mode(), Mode::Create);
    assert!(state.holds().is_empty());
    assert_eq!(state.selected_type(), HoldType::Start);
    assert!(state.wall().is_some());
}

#[rstest]
fn rename_trims_and_rejects_empty(creating: EditorState) {
    let state = creating.apply(Action::RenameWall("  North Face  ".to_owned()));
    assert_eq!(state.wall().unwrap().name, "North Face");

    let state = state.apply(Action::RenameWall("   ".to_owned()));
    assert_eq!(state.wall().unwrap().name, "North Face");
}

#[test]
fn saving_adopts_stored_image_and_route_id() {
    let mut stored_wall = wall("w1");
    stored_wall.image = "/uploads/wall-w1.jpeg".to_owned();
    let saved_at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();

    let state = EditorState::new()
        .apply(Action::PickImage {
            wall_id: WallId::new("w1").unwrap(),
            file_name: "w1.jpeg".to_owned(),
            image: "data:image/jpeg;base64,AAA=".to_owned(),
        })
        .apply(Action::StartRoute)
        .apply(Action::WallSaved(stored_wall));

    let draft = state.route().clone();
    let saved = draft.to_route(RouteId::new("r9").unwrap(), WallId::new("w1").unwrap(), saved_at);
    assert_eq!(saved.name, "Untitled Route");
    assert_eq!(saved.created_at, Some(saved_at));

    let state = state.apply(Action::RouteSaved(saved));
    assert_eq!(state.wall().unwrap().image, "/uploads/wall-w1.jpeg");
    assert_eq!(state.route().id.as_ref().unwrap().as_str(), "r9");
    assert_eq!(state.route().created_at, Some(saved_at));
    assert_eq!(state.route().name, "");
    assert_eq!(state.mode(), Mode::Create);
}

#[rstest]
fn rev_only_moves_on_change(creating: EditorState) {
    let rev = creating.rev();
    let same = creating.apply(Action::SelectHoldType(HoldType::Start));
    assert_eq!(same.rev(), rev);
    let changed = same.apply(Action::SelectHoldType(HoldType::Hand));
    assert_eq!(changed.rev(), rev + 1);
}
