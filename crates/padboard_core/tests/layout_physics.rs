use padboard_core::geometry::{
    rects_collide, Rect, Viewport, FORCE_FIELD, MIN_HEIGHT, MIN_WIDTH,
};
use padboard_core::layout::{
    find_spawn_rect, ClusterOffset, DragSession, ResizeDirection, ResizeSession,
};
use uuid::Uuid;

const VP: Viewport = Viewport {
    width: 1000.0,
    height: 800.0,
};

fn solo_drag(rect: Rect, pointer: (f64, f64), targets: Vec<Rect>) -> DragSession {
    DragSession::begin(Uuid::new_v4(), rect, pointer, targets, Vec::new(), VP)
}

#[test]
fn spawn_centers_on_an_empty_board() {
    let rect = find_spawn_rect(250.0, 200.0, &[], VP);
    assert_eq!(rect.left, 375.0);
    assert_eq!(rect.top, 300.0);
    assert_eq!(rect.width(), 250.0);
    assert_eq!(rect.height(), 200.0);
}

#[test]
fn spawn_avoids_an_occupied_center_deterministically() {
    let existing = [Rect::new(400.0, 300.0, 650.0, 500.0)];
    let rect = find_spawn_rect(250.0, 200.0, &existing, VP);

    assert!(!rects_collide(rect, existing[0], FORCE_FIELD));
    assert!(rect.left >= FORCE_FIELD && rect.right <= VP.width - FORCE_FIELD);
    assert!(rect.top >= FORCE_FIELD && rect.bottom <= VP.height - FORCE_FIELD);
    assert_eq!(rect, find_spawn_rect(250.0, 200.0, &existing, VP));
}

#[test]
fn drag_clamps_to_the_viewport_force_field() {
    let start = Rect::from_origin(100.0, 100.0, 250.0, 200.0);
    let session = solo_drag(start, (110.0, 110.0), Vec::new());

    let corner = session.frame((-500.0, -500.0)).anchor;
    assert_eq!(corner.left, FORCE_FIELD);
    assert_eq!(corner.top, FORCE_FIELD);

    let opposite = session.frame((2000.0, 2000.0)).anchor;
    assert_eq!(opposite.left, VP.width - 250.0 - FORCE_FIELD);
    assert_eq!(opposite.top, VP.height - 200.0 - FORCE_FIELD);
}

#[test]
fn small_gap_snaps_to_exactly_one_force_field() {
    let target = Rect::from_origin(400.0, 300.0, 250.0, 200.0);
    let start = Rect::from_origin(700.0, 320.0, 250.0, 200.0);
    let session = solo_drag(start, (710.0, 330.0), vec![target]);

    // Pointer puts the note 20px right of the target: inside the snap
    // threshold but outside the force field, so no push-apart fires.
    let frame = session.frame((680.0, 330.0));
    assert_eq!(frame.anchor.left, target.right + FORCE_FIELD);
    assert_eq!(frame.anchor.top, 320.0);
}

#[test]
fn right_edge_snaps_onto_a_target_to_the_right() {
    let target = Rect::from_origin(400.0, 300.0, 250.0, 200.0);
    let start = Rect::from_origin(100.0, 320.0, 250.0, 200.0);
    let session = solo_drag(start, (110.0, 330.0), vec![target]);

    // 20px between the dragged right edge and the target's left edge: the
    // note lands exactly one force field short of the target.
    let frame = session.frame((140.0, 330.0));
    assert_eq!(frame.anchor.right, target.left - FORCE_FIELD);
    assert_eq!(frame.anchor.top, 320.0);
}

#[test]
fn bottom_edge_snaps_above_a_lower_target() {
    let target = Rect::from_origin(400.0, 300.0, 250.0, 200.0);
    let start = Rect::from_origin(420.0, 60.0, 250.0, 200.0);
    let session = solo_drag(start, (430.0, 70.0), vec![target]);

    // 20px between the dragged bottom edge and the target's top edge.
    let frame = session.frame((430.0, 90.0));
    assert_eq!(frame.anchor.bottom, target.top - FORCE_FIELD);
    assert_eq!(frame.anchor.left, 420.0);
}

#[test]
fn gap_past_the_threshold_does_not_snap() {
    let target = Rect::from_origin(400.0, 300.0, 250.0, 200.0);
    let start = Rect::from_origin(700.0, 320.0, 250.0, 200.0);
    let session = solo_drag(start, (710.0, 330.0), vec![target]);

    // 50px gap: |666 - 700| = 34 >= 32, the note stays where dropped.
    let frame = session.frame((710.0, 330.0));
    assert_eq!(frame.anchor.left, 700.0);
}

#[test]
fn push_apart_resolves_an_overlap_along_the_cheaper_axis() {
    let target = Rect::from_origin(400.0, 300.0, 250.0, 200.0);
    let start = Rect::from_origin(500.0, 350.0, 250.0, 200.0);
    let session = solo_drag(start, (510.0, 360.0), vec![target]);

    let frame = session.frame((510.0, 360.0));
    assert!(!rects_collide(frame.anchor, target, FORCE_FIELD));
    // Equal push magnitudes on both axes: the horizontal axis wins, landing
    // flush against the target's right force field.
    assert_eq!(frame.anchor.left, target.right + FORCE_FIELD);
    assert_eq!(frame.anchor.top, 350.0);
}

#[test]
fn cluster_followers_translate_rigidly() {
    let anchor_rect = Rect::from_origin(100.0, 100.0, 250.0, 200.0);
    let follower_id = Uuid::new_v4();
    let cluster = vec![ClusterOffset {
        id: follower_id,
        dx: 300.0,
        dy: 50.0,
        width: 200.0,
        height: 150.0,
    }];
    let session = DragSession::begin(
        Uuid::new_v4(),
        anchor_rect,
        (110.0, 110.0),
        Vec::new(),
        cluster,
        VP,
    );

    let frame = session.frame((140.0, 120.0));
    assert_eq!(frame.anchor.left, 130.0);
    assert_eq!(frame.anchor.top, 110.0);

    let (id, follower) = frame.followers[0];
    assert_eq!(id, follower_id);
    assert_eq!(follower.left - frame.anchor.left, 300.0);
    assert_eq!(follower.top - frame.anchor.top, 50.0);
    assert_eq!(follower.width(), 200.0);
    assert_eq!(follower.height(), 150.0);
}

#[test]
fn resize_clamps_both_axes_to_minimums() {
    let initial = Rect::from_origin(100.0, 100.0, 250.0, 200.0);
    let session = ResizeSession::begin(
        Uuid::new_v4(),
        initial,
        ResizeDirection::Se,
        (350.0, 300.0),
        VP,
    );

    let rect = session.frame((140.0, 150.0));
    assert_eq!(rect.width(), MIN_WIDTH);
    assert_eq!(rect.height(), MIN_HEIGHT);
    // South-east handle: the origin corner never moves.
    assert_eq!(rect.left, 100.0);
    assert_eq!(rect.top, 100.0);
}

#[test]
fn west_handle_at_minimum_keeps_the_right_edge_fixed() {
    let initial = Rect::from_origin(100.0, 100.0, 250.0, 200.0);
    let session = ResizeSession::begin(
        Uuid::new_v4(),
        initial,
        ResizeDirection::W,
        (100.0, 200.0),
        VP,
    );

    let rect = session.frame((320.0, 200.0));
    assert_eq!(rect.width(), MIN_WIDTH);
    assert_eq!(rect.right, initial.right);
}

#[test]
fn north_handle_moves_the_top_edge_with_the_pointer() {
    let initial = Rect::from_origin(100.0, 100.0, 250.0, 200.0);
    let session = ResizeSession::begin(
        Uuid::new_v4(),
        initial,
        ResizeDirection::N,
        (200.0, 100.0),
        VP,
    );

    let rect = session.frame((200.0, 40.0));
    assert_eq!(rect.top, 40.0);
    assert_eq!(rect.height(), 260.0);
    assert_eq!(rect.bottom, initial.bottom);
}
