use crate::*;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use proptest::prelude::*;

/// A test source: items are their own index, 100px wide unless overridden, with an optional
/// bounded range of available indices.
#[derive(Debug, Default)]
struct Strip {
    low: Option<i64>,
    high: Option<i64>,
    sizes: HashMap<i64, f64>,
    generated: Vec<i64>,
    released: Vec<i64>,
    placed: Vec<(i64, f64, bool)>,
}

impl Strip {
    fn bounded(low: Option<i64>, high: Option<i64>) -> Self {
        Self {
            low,
            high,
            ..Self::default()
        }
    }

    fn size(&self, index: i64) -> f64 {
        self.sizes.get(&index).copied().unwrap_or(100.0)
    }

    fn generated_count(&self, index: i64) -> usize {
        self.generated.iter().filter(|&&i| i == index).count()
    }
}

impl ItemSource for Strip {
    type Item = i64;

    fn generate(&mut self, index: i64) -> Option<i64> {
        self.generated.push(index);
        let below = self.low.is_some_and(|low| index < low);
        let above = self.high.is_some_and(|high| index > high);
        (!below && !above).then_some(index)
    }

    fn measure(&mut self, index: i64, _item: &i64) -> Extent {
        Extent::new(self.size(index), 20.0 + 10.0 * index.unsigned_abs() as f64)
    }

    fn place(&mut self, index: i64, _item: &i64, screen_pos: f64, selected: bool) {
        self.placed.push((index, screen_pos, selected));
    }

    fn release(&mut self, index: i64, _item: i64) {
        self.released.push(index);
    }
}

#[derive(Clone, Default)]
struct Events {
    selected: Arc<Mutex<Vec<i64>>>,
    navigated: Arc<Mutex<Vec<i64>>>,
}

impl Events {
    fn selected(&self) -> Vec<i64> {
        self.selected.lock().unwrap().clone()
    }

    fn navigated(&self) -> Vec<i64> {
        self.navigated.lock().unwrap().clone()
    }
}

fn build_with(strip: Strip, viewport: f64, options: RibbonOptions) -> (Ribbon<Strip>, Events) {
    let events = Events::default();
    let selected = Arc::clone(&events.selected);
    let navigated = Arc::clone(&events.navigated);
    let options = options
        .with_on_selection_changed(Some(move |i| selected.lock().unwrap().push(i)))
        .with_on_navigated(Some(move |i| navigated.lock().unwrap().push(i)));
    let r = Ribbon::new(strip, viewport, options).unwrap();
    (r, events)
}

fn build(strip: Strip, viewport: f64) -> (Ribbon<Strip>, Events) {
    build_with(strip, viewport, RibbonOptions::default())
}

fn drag_to(r: &mut Ribbon<Strip>, delta: f64) {
    r.drag_start(0.0, 0);
    assert!(r.drag_move(delta, 16));
}

fn assert_window_invariants<S: ItemSource>(r: &Ribbon<S>) {
    let window = r.window();
    let indices: Vec<i64> = r.records().map(|rec| rec.index()).collect();
    let expected: Vec<i64> = (window.min_index..=window.max_index).collect();
    assert_eq!(indices, expected, "window must be contiguous");

    let records: Vec<_> = r.records().collect();
    for pair in records.windows(2) {
        let gap = pair[1].anchor_pos() - (pair[0].anchor_pos() + pair[0].extent());
        assert!(
            gap.abs() < 1e-6,
            "records {} and {} are not packed (gap {gap})",
            pair[0].index(),
            pair[1].index()
        );
    }
    for rec in &records {
        assert!((rec.center_pos() - (rec.anchor_pos() + rec.extent() / 2.0)).abs() < 1e-9);
    }
}

#[test]
fn initial_layout_centers_start_index() {
    let (r, events) = build(Strip::default(), 400.0);

    assert_eq!(r.offset(), 200.0);
    let rec = r.record(0).unwrap();
    assert_eq!(rec.anchor_pos(), -50.0);
    assert_eq!(rec.screen_pos(r.offset()), 150.0);
    assert_eq!(r.selected_index(), 0);
    assert_eq!(
        r.window(),
        WindowRange {
            min_index: -2,
            max_index: 2
        }
    );
    assert_eq!(r.phase(), MotionPhase::Idle);
    assert_window_invariants(&r);

    assert!(events.selected().is_empty());
    assert_eq!(events.navigated(), vec![0]);
}

#[test]
fn start_index_option_seeds_elsewhere() {
    let (r, events) = build_with(
        Strip::default(),
        400.0,
        RibbonOptions::new().with_start_index(-7),
    );
    assert_eq!(r.selected_index(), -7);
    assert_eq!(r.window().min_index, -9);
    assert_eq!(r.window().max_index, -5);
    assert_eq!(events.navigated(), vec![-7]);
}

#[test]
fn seed_refusal_fails_construction() {
    let err = Ribbon::new(
        Strip::bounded(Some(1), None),
        400.0,
        RibbonOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err, RibbonError::SeedRefused { index: 0 });
}

#[test]
fn invalid_viewport_is_rejected() {
    let err = Ribbon::new(Strip::default(), f64::NAN, RibbonOptions::default()).unwrap_err();
    assert!(matches!(err, RibbonError::InvalidViewport { .. }));

    let (mut r, _) = build(Strip::default(), 400.0);
    assert!(matches!(
        r.handle_resize(-1.0),
        Err(RibbonError::InvalidViewport { .. })
    ));
    assert_eq!(r.viewport_extent(), 400.0);
}

#[test]
fn refresh_is_idempotent() {
    let (mut r, events) = build(Strip::default(), 400.0);
    drag_to(&mut r, -37.0);
    let _ = r.drag_end();
    let selected_before = events.selected();

    r.refresh();
    let first = r.placed_items();
    r.refresh();
    let second = r.placed_items();

    assert_eq!(first, second);
    assert_eq!(events.selected(), selected_before);
}

#[test]
fn zero_sized_items_do_not_grow_the_window_forever() {
    let source = source_fn(|i: i64| Some(i), |_, _: &i64| Extent::new(0.0, 0.0));
    let mut r = Ribbon::new(source, 400.0, RibbonOptions::default()).unwrap();
    let window = r.window();
    assert!(window.width() > 1);

    r.refresh();
    r.refresh();
    assert_eq!(r.window(), window);

    // Growth stopped at the cap; the side stays frozen until a reset.
    let below = window.min_index - 1;
    assert_eq!(
        r.go_to_index(below),
        Err(RibbonError::IndexUnavailable { index: below })
    );

    r.drag_start(0.0, 0);
    assert!(r.drag_move(-25.0, 16));
    assert_eq!(r.window(), window);
}

#[test]
fn placement_reaches_the_source() {
    let (mut r, _) = build(Strip::default(), 400.0);
    r.source_mut().placed.clear();
    r.refresh();

    let placed = &r.source().placed;
    assert_eq!(placed.len(), 5);
    assert!(placed.contains(&(0, 150.0, true)));
    assert!(placed.contains(&(-2, -50.0, false)));
    assert_eq!(placed.iter().filter(|p| p.2).count(), 1);
}

#[test]
fn drag_moves_offset_and_selection() {
    let (mut r, events) = build(Strip::default(), 400.0);

    r.drag_start(0.0, 0);
    assert_eq!(r.phase(), MotionPhase::Dragging);
    assert!(r.drag_move(-160.0, 10));

    assert_eq!(r.offset(), 40.0);
    assert_eq!(r.selected_index(), 2);
    assert_eq!(events.selected(), vec![2]);
    assert_eq!(
        r.window(),
        WindowRange {
            min_index: 0,
            max_index: 4
        }
    );
    assert!(r.source().released.contains(&-2));
    assert!(r.source().released.contains(&-1));
    assert_window_invariants(&r);
}

#[test]
fn release_velocity_projects_snap_target() {
    let (mut r, _) = build(Strip::default(), 400.0);
    r.drag_start(0.0, 0);
    r.drag_move(-160.0, 10);

    // velocity = -160 / 10 * 0.25 = -4 px/ms; projected = 40 - 400 - 200 = -560.
    assert_eq!(r.drag_end(), Some(4));
    assert_eq!(r.phase(), MotionPhase::Snapping);
    assert_eq!(r.snap_target(), Some((-200.0, Some(4))));
}

#[test]
fn slow_release_snaps_back_to_nearest() {
    let (mut r, _) = build(Strip::default(), 400.0);
    r.drag_start(0.0, 0);
    r.drag_move(-20.0, 1_000);

    // Nearly zero velocity: the nearest center wins, even when it is already selected.
    assert_eq!(r.drag_end(), Some(0));
    assert_eq!(r.snap_target(), Some((200.0, Some(0))));
}

#[test]
fn release_without_movement_is_a_click() {
    let (mut r, _) = build(Strip::default(), 400.0);
    r.drag_start(10.0, 0);
    assert_eq!(r.drag_end(), None);
    assert_eq!(r.phase(), MotionPhase::Idle);
    assert_eq!(r.offset(), 200.0);
}

#[test]
fn drag_moves_at_the_same_timestamp_stay_finite() {
    let (mut r, _) = build(Strip::default(), 400.0);
    r.drag_start(0.0, 5);
    r.drag_move(-10.0, 5);
    r.drag_move(-20.0, 5);
    assert_eq!(r.offset(), 180.0);
    let target = r.drag_end().unwrap();
    let (offset, _) = r.snap_target().unwrap();
    assert!(offset.is_finite());
    assert!(r.window().contains(target));
}

#[test]
fn drag_move_without_gesture_is_ignored() {
    let (mut r, _) = build(Strip::default(), 400.0);
    assert!(!r.drag_move(-100.0, 10));
    assert_eq!(r.offset(), 200.0);
    assert_eq!(r.drag_end(), None);
}

#[test]
fn eviction_drops_fully_offscreen_items_only() {
    let (mut r, _) = build(Strip::default(), 400.0);
    drag_to(&mut r, -51.0);

    // -2 spans [-101, -1]; -1 spans [-1, 99] and stays.
    assert_eq!(r.offset(), 149.0);
    assert_eq!(r.source().released, vec![-2]);
    assert_eq!(
        r.window(),
        WindowRange {
            min_index: -1,
            max_index: 3
        }
    );
    for it in r.placed_items() {
        assert!(it.end() >= 0.0 && it.screen_pos <= 400.0);
    }
    assert_window_invariants(&r);
}

#[test]
fn window_never_empties() {
    let (mut r, _) = build(Strip::bounded(Some(-3), None), 400.0);
    drag_to(&mut r, 5_000.0);

    assert_eq!(
        r.window(),
        WindowRange {
            min_index: -3,
            max_index: -3
        }
    );
    assert_eq!(r.selected_index(), -3);
    assert_window_invariants(&r);
}

#[test]
fn exhausted_side_is_never_asked_again() {
    let (mut r, _) = build(Strip::bounded(Some(-3), None), 400.0);

    for step in 1..=4 {
        r.drag_start(0.0, step * 100);
        r.drag_move(150.0 * step as f64, step * 100 + 16);
        let _ = r.drag_end();
        assert_eq!(r.window().min_index, -3);
    }

    assert_eq!(r.source().generated_count(-4), 1);
    assert!(r.source().generated.iter().all(|&i| i >= -4));
    assert_window_invariants(&r);
}

#[test]
fn snap_settles_within_epsilon_and_not_before() {
    let (mut r, events) = build(Strip::default(), 400.0);
    r.go_to_index(1).unwrap();
    assert_eq!(r.snap_target(), Some((100.0, Some(1))));

    // |d| = 100 halves each tick: 50, 25, 12.5, 6.25, 3.125, then 1.5625 < 3.
    for _ in 0..5 {
        assert!(r.step());
        assert_eq!(r.phase(), MotionPhase::Snapping);
    }
    assert!(!r.step());
    assert_eq!(r.phase(), MotionPhase::Idle);
    assert_eq!(r.offset(), 100.0);
    assert_eq!(r.selected_index(), 1);
    assert_eq!(events.selected(), vec![1]);
    assert_eq!(events.navigated(), vec![0, 1]);

    assert!(!r.step());
    assert_eq!(events.navigated(), vec![0, 1]);
}

#[test]
fn snap_tick_count_is_logarithmic() {
    for distance in [10.0f64, 100.0, 1_000.0, 25_000.0] {
        let (mut r, _) = build(Strip::default(), 400.0);
        r.go_to_offset(200.0 - distance).unwrap();
        let mut ticks = 0u32;
        while r.step() {
            ticks += 1;
        }
        ticks += 1;
        let expected = (distance / 3.0).log2().floor() as u32 + 1;
        assert_eq!(ticks, expected, "distance {distance}");
        assert_eq!(r.offset(), 200.0 - distance);
        assert_window_invariants(&r);
    }
}

#[test]
fn tick_runs_on_a_fixed_period() {
    let (mut r, _) = build(Strip::default(), 400.0);
    r.go_to_index(1).unwrap();

    assert!(r.tick(1_000));
    assert_eq!(r.offset(), 200.0);
    assert!(r.tick(1_032));
    assert_eq!(r.offset(), 200.0);
    assert!(r.tick(1_033));
    assert_eq!(r.offset(), 150.0);
    assert!(!r.tick(1_033 + 33 * 5));
    assert_eq!(r.offset(), 100.0);
    assert!(!r.is_animating());
}

#[test]
fn new_gesture_cancels_running_snap() {
    let (mut r, events) = build(Strip::default(), 400.0);
    r.go_to_index(1).unwrap();
    assert!(r.step());

    r.drag_start(0.0, 0);
    assert_eq!(r.phase(), MotionPhase::Dragging);
    assert!(!r.tick(10_000));
    assert!(!r.step());
    assert_eq!(r.offset(), 150.0);
    assert_eq!(events.navigated(), vec![0]);
}

#[test]
fn go_to_selected_index_is_a_no_op() {
    let (mut r, _) = build(Strip::default(), 400.0);
    r.go_to_index(0).unwrap();
    assert_eq!(r.phase(), MotionPhase::Idle);
}

#[test]
fn navigation_is_rejected_while_dragging() {
    let (mut r, _) = build(Strip::default(), 400.0);
    r.drag_start(0.0, 0);
    assert_eq!(r.go_to_index(1), Err(RibbonError::GestureActive));
    assert_eq!(r.go_to_offset(0.0), Err(RibbonError::GestureActive));
    assert_eq!(r.phase(), MotionPhase::Dragging);
}

#[test]
fn nearby_target_is_reached_by_walking() {
    let (mut r, _) = build_with(
        Strip::bounded(Some(0), None),
        600.0,
        RibbonOptions::new().with_start_index(2),
    );
    assert_eq!(
        r.window(),
        WindowRange {
            min_index: 0,
            max_index: 5
        }
    );
    r.source_mut().generated.clear();

    r.go_to_index(12).unwrap();
    assert_eq!(r.source().generated, (6..=12).collect::<Vec<_>>());
    assert_eq!(r.window().max_index, 12);
    assert_eq!(r.record(12).unwrap().center_pos(), 1_000.0);
    assert_eq!(r.snap_target(), Some((-700.0, Some(12))));
    assert_window_invariants(&r);
}

#[test]
fn jump_beyond_tolerance_generates_only_the_target() {
    let (mut r, events) = build_with(
        Strip::bounded(Some(0), None),
        600.0,
        RibbonOptions::new().with_start_index(2),
    );
    assert_eq!(
        r.window(),
        WindowRange {
            min_index: 0,
            max_index: 5
        }
    );
    r.source_mut().generated.clear();
    r.source_mut().released.clear();

    r.go_to_index(50).unwrap();

    let generated = &r.source().generated;
    assert_eq!(generated.first(), Some(&50));
    assert!(generated.iter().all(|&i| !(6..50).contains(&i) || i >= 47));
    assert_eq!(r.source().generated_count(50), 1);
    assert_eq!(r.source().released, vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(r.record(50).unwrap().anchor_pos(), -50.0);
    assert_eq!(r.selected_index(), 50);
    assert_eq!(events.selected(), vec![50]);
    assert_window_invariants(&r);

    assert!(!r.step());
    assert_eq!(events.navigated(), vec![2, 50]);
}

#[test]
fn jump_tolerance_is_configurable() {
    let (mut r, _) = build_with(
        Strip::bounded(Some(0), None),
        600.0,
        RibbonOptions::new()
            .with_start_index(2)
            .with_jump_tolerance(10.0),
    );
    r.source_mut().generated.clear();
    r.go_to_index(50).unwrap();
    assert_eq!(r.source().generated, (6..=50).collect::<Vec<_>>());
}

#[test]
fn refused_target_leaves_state_untouched() {
    let (mut r, events) = build(Strip::bounded(None, Some(4)), 400.0);
    let before = r.frame_state();

    assert_eq!(
        r.go_to_index(6),
        Err(RibbonError::IndexUnavailable { index: 6 })
    );
    assert_eq!(r.frame_state(), before);
    assert_eq!(r.source().released, vec![4, 3]);
    assert_eq!(events.navigated(), vec![0]);
    assert_window_invariants(&r);

    // The refusal at 5 is remembered.
    let asked = r.source().generated.len();
    assert_eq!(
        r.go_to_index(7),
        Err(RibbonError::IndexUnavailable { index: 7 })
    );
    assert_eq!(r.source().generated.len(), asked);
}

#[test]
fn refused_jump_keeps_the_window() {
    let (mut r, _) = build(Strip::bounded(None, Some(4)), 400.0);
    let before = r.frame_state();
    assert_eq!(
        r.go_to_index(100),
        Err(RibbonError::IndexUnavailable { index: 100 })
    );
    assert_eq!(r.frame_state(), before);
    assert!(r.source().released.is_empty());
}

#[test]
fn wheel_steps_by_a_fraction_of_the_viewport() {
    let (mut r, events) = build(Strip::default(), 400.0);

    r.wheel(1.0).unwrap();
    assert_eq!(r.snap_target(), Some((140.0, None)));
    while r.step() {}
    assert_eq!(r.offset(), 140.0);
    assert_eq!(r.selected_index(), 1);
    assert_eq!(events.navigated(), vec![0, 1]);

    r.wheel(-3.0).unwrap();
    assert_eq!(r.snap_target(), Some((200.0, None)));

    r.wheel(0.0).unwrap();
    assert_eq!(r.snap_target(), Some((200.0, None)));
}

#[test]
fn click_retargets_a_running_snap() {
    let (mut r, _) = build(Strip::default(), 400.0);
    r.click_item(1).unwrap();
    assert_eq!(r.snap_target(), Some((100.0, Some(1))));
    assert!(r.step());
    assert_eq!(r.offset(), 150.0);

    r.click_item(-1).unwrap();
    assert_eq!(r.snap_target(), Some((300.0, Some(-1))));
}

#[test]
fn click_on_selected_item_during_snap_recenters_it() {
    let (mut r, _) = build(Strip::default(), 400.0);
    r.go_to_index(1).unwrap();
    assert!(r.step());
    assert_eq!(r.selected_index(), 0);

    r.click_item(0).unwrap();
    assert_eq!(r.snap_target(), Some((200.0, Some(0))));
}

#[test]
fn clicks_can_be_disabled() {
    let (mut r, _) = build_with(
        Strip::default(),
        400.0,
        RibbonOptions::new().with_click_to_navigate(false),
    );
    r.click_item(1).unwrap();
    assert_eq!(r.phase(), MotionPhase::Idle);
}

#[test]
fn resize_recenters_without_changing_selection() {
    let (mut r, events) = build(Strip::default(), 400.0);
    r.handle_resize(600.0).unwrap();

    assert_eq!(r.offset(), 300.0);
    assert_eq!(r.record(0).unwrap().screen_pos(r.offset()), 250.0);
    assert_eq!(
        r.window(),
        WindowRange {
            min_index: -3,
            max_index: 3
        }
    );

    r.handle_resize(60.0).unwrap();
    assert_eq!(r.offset(), 30.0);
    assert_eq!(r.selected_index(), 0);
    assert!(events.selected().is_empty());
    assert_window_invariants(&r);
}

#[test]
fn depth_is_monotonic_until_reset() {
    let (mut r, _) = build(Strip::default(), 400.0);
    assert_eq!(r.max_depth(), 40.0);

    drag_to(&mut r, -51.0);
    let _ = r.drag_end();
    assert_eq!(r.max_depth(), 50.0);

    drag_to(&mut r, 100.0);
    assert!(!r.window().contains(3));
    assert_eq!(r.max_depth(), 50.0);

    r.reset_to_index(0).unwrap();
    assert_eq!(r.max_depth(), 40.0);
}

#[test]
fn depth_is_not_tracked_without_auto_size() {
    let (r, _) = build_with(
        Strip::default(),
        400.0,
        RibbonOptions::new().with_auto_size(false),
    );
    assert_eq!(r.max_depth(), 0.0);
}

#[test]
fn reset_to_index_recenters_immediately() {
    let (mut r, events) = build(Strip::default(), 400.0);
    r.go_to_index(1).unwrap();

    r.reset_to_index(-30).unwrap();
    assert_eq!(r.phase(), MotionPhase::Idle);
    assert_eq!(r.offset(), 200.0);
    assert_eq!(r.selected_index(), -30);
    assert_eq!(
        r.window(),
        WindowRange {
            min_index: -32,
            max_index: -28
        }
    );
    assert_eq!(events.selected(), vec![-30]);
    assert_eq!(events.navigated(), vec![0, -30]);
}

#[test]
fn remeasure_keeps_selected_item_in_place() {
    let (mut r, _) = build(Strip::default(), 400.0);

    r.source_mut().sizes.insert(1, 150.0);
    assert!(r.remeasure(1));
    assert_eq!(r.record(1).unwrap().extent(), 150.0);
    assert_eq!(r.record(2).unwrap().anchor_pos(), 200.0);
    assert_eq!(r.record(0).unwrap().anchor_pos(), -50.0);

    r.source_mut().sizes.insert(-1, 150.0);
    assert!(r.remeasure(-1));
    assert_eq!(r.record(-1).unwrap().anchor_pos(), -200.0);
    assert_eq!(r.record(-2).unwrap().anchor_pos(), -300.0);
    assert_eq!(r.record(0).unwrap().anchor_pos(), -50.0);
    assert_window_invariants(&r);

    assert!(!r.remeasure(40));
}

#[test]
fn closure_source_drives_a_ribbon() {
    let mut r = Ribbon::new(
        source_fn(
            |i: i64| (i % 7 != 3).then(|| format!("item {i}")),
            |_, s: &String| Extent::new(10.0 * s.len() as f64, 30.0),
        ),
        300.0,
        RibbonOptions::new().with_axis(Axis::Vertical),
    )
    .unwrap();

    assert_eq!(r.item(0).map(String::as_str), Some("item 0"));
    assert_eq!(r.window().max_index, 2);
    assert_eq!(r.go_to_index(3), Err(RibbonError::IndexUnavailable { index: 3 }));
    assert_eq!(r.options().axis, Axis::Vertical);
    assert_window_invariants(&r);
}

#[test]
fn frame_state_reflects_motion() {
    let (mut r, _) = build(Strip::default(), 400.0);
    r.go_to_index(-1).unwrap();
    let frame = r.frame_state();
    assert_eq!(frame.phase, MotionPhase::Snapping);
    assert_eq!(frame.selected_index, 0);
    assert_eq!(frame.viewport_extent, 400.0);
    assert_eq!(frame.max_depth, 40.0);
}

#[test]
fn listeners_registered_later_are_notified() {
    let (mut r, _) = build(Strip::default(), 400.0);
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    r.on_navigated(move |i| sink.lock().unwrap().push(i));

    r.go_to_index(2).unwrap();
    while r.step() {}
    assert_eq!(*seen.lock().unwrap(), vec![2]);
}

fn varied_extent(index: i64) -> f64 {
    40.0 + (index.rem_euclid(9) * 10) as f64
}

proptest! {
    #[test]
    fn window_stays_contiguous_packed_and_covering(
        moves in proptest::collection::vec(-3_000.0f64..3_000.0, 1..24),
        viewport in 50.0f64..900.0,
    ) {
        let mut strip = Strip::default();
        for i in -400..=400 {
            strip.sizes.insert(i, varied_extent(i));
        }
        let (mut r, _) = build(strip, viewport);

        for (n, pos) in moves.into_iter().enumerate() {
            r.drag_start(0.0, n as u64 * 100);
            r.drag_move(pos, n as u64 * 100 + 16);
            assert_window_invariants(&r);

            let placed = r.placed_items();
            let first = placed.first().unwrap();
            let last = placed.last().unwrap();
            prop_assert!(first.screen_pos <= 0.0);
            prop_assert!(last.end() >= viewport);
            for it in &placed {
                prop_assert!(it.end() >= 0.0 && it.screen_pos <= viewport);
            }
            prop_assert_eq!(placed.iter().filter(|it| it.selected).count(), 1);

            let _ = r.drag_end();
            while r.step() {}
            assert_window_invariants(&r);
        }
    }

    #[test]
    fn bounded_window_never_crosses_its_limits(
        moves in proptest::collection::vec(-2_000.0f64..2_000.0, 1..16),
        low in -6i64..=0,
        high in 0i64..=6,
    ) {
        let (mut r, _) = build(Strip::bounded(Some(low), Some(high)), 400.0);
        for (n, pos) in moves.into_iter().enumerate() {
            r.drag_start(0.0, n as u64 * 50);
            r.drag_move(pos, n as u64 * 50 + 10);
            let window = r.window();
            prop_assert!(window.min_index >= low && window.max_index <= high);
            assert_window_invariants(&r);
        }
        prop_assert!(r.source().generated_count(low - 1) <= 1);
        prop_assert!(r.source().generated_count(high + 1) <= 1);
    }
}
