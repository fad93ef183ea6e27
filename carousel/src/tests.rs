use crate::*;
// `proptest::prelude` also exports a `Strategy` trait.
use crate::Strategy;

use proptest::prelude::*;
use std::vec::Vec;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

macro_rules! assert_approx {
    ($a:expr, $b:expr) => {{
        let (a, b) = ($a, $b);
        assert!(approx(a, b), "{a} != {b}");
    }};
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Event {
    Attach(usize),
    Detach(usize),
}

#[derive(Default)]
struct RecordingHost {
    events: Vec<Event>,
    placements: Vec<ItemPlacement>,
}

impl RecordingHost {
    fn take(&mut self) -> (Vec<Event>, Vec<ItemPlacement>) {
        (
            core::mem::take(&mut self.events),
            core::mem::take(&mut self.placements),
        )
    }
}

impl CarouselHost for RecordingHost {
    fn attach(&mut self, index: usize) {
        self.events.push(Event::Attach(index));
    }

    fn detach(&mut self, index: usize) {
        self.events.push(Event::Detach(index));
    }

    fn place(&mut self, placement: &ItemPlacement) {
        self.placements.push(*placement);
    }
}

fn scenario_a_strategy() -> Strategy {
    Strategy::CenterAligned(
        StrategyParams::default().with_fixed_arrangement(Arrangement::fixed(
            100.0, 1, 70.0, 4, 40.0, 4,
        )),
    )
}

fn start_state() -> KeylineState {
    Strategy::StartAligned(StrategyParams::default())
        .keyline_state(100.0, 300.0, 0, 0.0)
        .unwrap()
}

fn measured_layout(direction: LayoutDirection) -> CarouselLayout {
    let mut layout = CarouselLayout::new(CarouselOptions::new(20).with_direction(direction));
    layout.on_first_measure(100.0, 300.0).unwrap();
    layout
}

fn focal_builder() -> KeylineStateBuilder {
    KeylineStateBuilder::new(100.0, 300.0)
}

#[test]
fn builder_rejects_missing_focal() {
    let err = focal_builder()
        .add_keyline(50.0, 0.5, 50.0, false)
        .build()
        .unwrap_err();
    assert_eq!(err, BuildError::NoFocalKeyline);

    let err = focal_builder().build().unwrap_err();
    assert_eq!(err, BuildError::NoFocalKeyline);
}

#[test]
fn builder_rejects_anchor_in_the_middle() {
    let err = focal_builder()
        .add_keyline(50.0, 0.0, 100.0, true)
        .add_anchor_keyline(120.0, 0.6, 40.0)
        .add_keyline(160.0, 0.6, 40.0, false)
        .build()
        .unwrap_err();
    assert_eq!(err, BuildError::MisplacedAnchor { index: 1 });
}

#[test]
fn builder_rejects_split_focal_range() {
    let err = focal_builder()
        .add_keyline(50.0, 0.0, 100.0, true)
        .add_keyline(135.0, 0.3, 70.0, false)
        .add_keyline(220.0, 0.0, 100.0, true)
        .build()
        .unwrap_err();
    assert_eq!(err, BuildError::NonContiguousFocal { index: 1 });
}

#[test]
fn builder_rejects_focal_size_mismatch() {
    let err = focal_builder()
        .add_keyline(50.0, 0.1, 90.0, true)
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        BuildError::FocalSizeMismatch {
            index: 0,
            expected: 100.0,
            found: 90.0,
        }
    );
}

#[test]
fn builder_rejects_masked_focal() {
    let err = focal_builder()
        .add_anchor_keyline(-20.0, 0.6, 40.0)
        .add_keyline(50.0, 0.5, 100.0, true)
        .add_anchor_keyline(120.0, 0.6, 40.0)
        .build()
        .unwrap_err();
    assert_eq!(err, BuildError::FocalMaskNonZero { index: 1, mask: 0.5 });
}

#[test]
fn builder_rejects_sizes_growing_away_from_focal() {
    let err = focal_builder()
        .add_keyline(50.0, 0.0, 100.0, true)
        .add_keyline(120.0, 0.6, 40.0, false)
        .add_keyline(165.0, 0.5, 50.0, false)
        .build()
        .unwrap_err();
    assert_eq!(err, BuildError::NonMonotonicMask { index: 2 });

    let err = focal_builder()
        .add_keyline(-20.0, 0.5, 50.0, false)
        .add_keyline(25.0, 0.6, 40.0, false)
        .add_keyline(95.0, 0.0, 100.0, true)
        .build()
        .unwrap_err();
    assert_eq!(err, BuildError::NonMonotonicMask { index: 0 });
}

#[test]
fn builder_rejects_bad_mask_and_order() {
    let err = focal_builder()
        .add_keyline(50.0, 1.5, 100.0, true)
        .build()
        .unwrap_err();
    assert_eq!(err, BuildError::MaskOutOfRange { index: 0, mask: 1.5 });

    let err = focal_builder()
        .add_keyline(150.0, 0.0, 100.0, true)
        .add_keyline(100.0, 0.3, 70.0, false)
        .build()
        .unwrap_err();
    assert_eq!(err, BuildError::UnsortedKeylines { index: 1 });
}

#[test]
fn builder_rejects_invalid_sizes() {
    let err = KeylineStateBuilder::new(0.0, 300.0)
        .add_keyline(50.0, 0.0, 100.0, true)
        .build()
        .unwrap_err();
    assert_eq!(err, BuildError::InvalidItemSize(0.0));

    let err = KeylineStateBuilder::new(100.0, -1.0)
        .add_keyline(50.0, 0.0, 100.0, true)
        .build()
        .unwrap_err();
    assert_eq!(err, BuildError::InvalidViewportExtent(-1.0));
}

#[test]
fn builder_ignores_empty_keylines() {
    let state = focal_builder()
        .add_keyline(-10.0, 1.0, 0.0, false)
        .add_keyline(50.0, 0.0, 100.0, true)
        .build()
        .unwrap();
    assert_eq!(state.len(), 1);
    assert_eq!(state.first_focal_index(), 0);
}

#[test]
fn builder_computes_locations_padding_and_cutoff() {
    let state = focal_builder()
        .leading_padding(16.0)
        .add_anchor_keyline(-20.0, 0.6, 40.0)
        .add_keyline_range(50.0, 0.0, 100.0, 2, true)
        .add_keyline(235.0, 0.3, 70.0, false)
        .add_anchor_keyline(290.0, 0.6, 40.0)
        .build()
        .unwrap();

    assert_eq!(state.len(), 5);
    assert_eq!(state.first_focal_index(), 1);
    assert_eq!(state.last_focal_index(), 2);
    assert_eq!(state.focal_count(), 2);
    assert_approx!(state.leading_padding(), 16.0);

    let locations: Vec<f32> = state.keylines().iter().map(|k| k.location).collect();
    for (got, want) in locations.iter().zip([-34.0, 66.0, 166.0, 266.0, 366.0]) {
        assert_approx!(*got, want);
    }

    let offsets: Vec<f32> = state.keylines().iter().map(|k| k.offset_location).collect();
    for (got, want) in offsets.iter().zip([-20.0, 50.0, 150.0, 235.0, 290.0]) {
        assert_approx!(*got, want);
    }

    let k = state.keylines();
    assert!(k[0].is_anchor && k[4].is_anchor);
    assert_approx!(k[0].cutoff, 40.0);
    assert_approx!(k[1].cutoff, 0.0);
    assert_approx!(k[3].cutoff, 0.0);
    assert_approx!(k[4].cutoff, 10.0);
}

#[test]
fn center_aligned_fixed_arrangement_is_symmetric() {
    let state = scenario_a_strategy()
        .keyline_state(100.0, 300.0, 0, 0.0)
        .unwrap();
    let keylines = state.keylines();
    assert_eq!(keylines.len(), 11);

    let focal = keylines.iter().filter(|k| k.is_focal).count();
    let anchors = keylines.iter().filter(|k| k.is_anchor).count();
    let medium = keylines
        .iter()
        .filter(|k| !k.is_anchor && approx(k.masked_item_size, 70.0) && approx(k.mask, 0.3))
        .count();
    let small = keylines
        .iter()
        .filter(|k| !k.is_anchor && approx(k.masked_item_size, 40.0) && approx(k.mask, 0.6))
        .count();
    assert_eq!((focal, medium, small, anchors), (1, 4, 4, 2));
    assert!(keylines[0].is_anchor && keylines[10].is_anchor);

    let expected = [
        -140.0, -100.0, -60.0, -5.0, 65.0, 150.0, 235.0, 305.0, 360.0, 400.0, 440.0,
    ];
    for (k, want) in keylines.iter().zip(expected) {
        assert_approx!(k.offset_location, want);
    }
    for i in 0..keylines.len() {
        let mirrored = &keylines[keylines.len() - 1 - i];
        assert_approx!(keylines[i].offset_location + mirrored.offset_location, 300.0);
        assert_approx!(keylines[i].mask, mirrored.mask);
    }
    assert_approx!(state.first_focal_keyline().offset_location, 150.0);
    assert_approx!(state.first_focal_keyline().location, 150.0);
    assert_approx!(keylines[0].location, -350.0);
}

#[test]
fn start_aligned_search_picks_lowest_cost() {
    let strategy = Strategy::StartAligned(StrategyParams::default());
    let a = strategy.arrangement(100.0, 300.0, 0).unwrap();
    assert_eq!((a.large_count, a.medium_count, a.small_count), (2, 1, 1));
    assert_approx!(a.large_size, 99.4);
    assert_approx!(a.medium_size, 61.2);
    assert_approx!(a.small_size, 40.0);
    assert_approx!(a.space(), 300.0);
    assert_approx!(a.cost, 1.8);
    assert!(a.is_valid());
}

#[test]
fn start_aligned_keylines_trail_the_focal_range() {
    let state = start_state();
    let offsets: Vec<f32> = state.keylines().iter().map(|k| k.offset_location).collect();
    for (got, want) in offsets.iter().zip([-20.0, 49.7, 149.1, 229.4, 280.0, 320.0]) {
        assert_approx!(*got, want);
    }
    let locations: Vec<f32> = state.keylines().iter().map(|k| k.location).collect();
    for (got, want) in locations
        .iter()
        .zip([-49.7, 49.7, 149.1, 248.5, 347.9, 447.3])
    {
        assert_approx!(*got, want);
    }
    assert_eq!(state.first_focal_index(), 1);
    assert_eq!(state.last_focal_index(), 2);
    assert_approx!(state.item_size(), 99.4);
}

#[test]
fn strategy_respects_item_count() {
    let strategy = Strategy::StartAligned(StrategyParams::default());
    let a = strategy.arrangement(100.0, 300.0, 2).unwrap();
    assert_eq!((a.large_count, a.medium_count, a.small_count), (2, 0, 0));
    assert_approx!(a.large_size, 150.0);

    let state = strategy.keyline_state(100.0, 300.0, 2, 0.0).unwrap();
    assert_eq!(state.len(), 4);
    assert_eq!(state.focal_count(), 2);
}

#[test]
fn strategy_rejects_degenerate_input() {
    let strategy = Strategy::default();
    assert_eq!(
        strategy.arrangement(100.0, 0.0, 0),
        Err(BuildError::InvalidViewportExtent(0.0))
    );
    assert!(matches!(
        strategy.arrangement(f32::NAN, 300.0, 0),
        Err(BuildError::InvalidItemSize(_))
    ));
    assert_eq!(
        strategy.arrangement(-5.0, 300.0, 0),
        Err(BuildError::InvalidItemSize(-5.0))
    );
}

#[test]
fn reverse_mirrors_and_round_trips() {
    let state = start_state();
    let reversed = state.reverse(300.0);
    let offsets: Vec<f32> = reversed
        .keylines()
        .iter()
        .map(|k| k.offset_location)
        .collect();
    for (got, want) in offsets.iter().zip([-20.0, 20.0, 70.6, 150.9, 250.3, 320.0]) {
        assert_approx!(*got, want);
    }
    assert_eq!(reversed.first_focal_index(), 3);
    assert_eq!(reversed.last_focal_index(), 4);

    let back = reversed.reverse(300.0);
    assert_eq!(back.len(), state.len());
    assert_eq!(back.first_focal_index(), state.first_focal_index());
    for (a, b) in back.keylines().iter().zip(state.keylines()) {
        assert_approx!(a.location, b.location);
        assert_approx!(a.offset_location, b.offset_location);
        assert_eq!(a.is_focal, b.is_focal);
        assert_eq!(a.is_anchor, b.is_anchor);
    }
}

#[test]
fn lerp_requires_matching_shapes() {
    let start = start_state();
    let center = scenario_a_strategy()
        .keyline_state(100.0, 300.0, 0, 0.0)
        .unwrap();
    assert_eq!(
        KeylineState::lerp(&start, &center, 0.5),
        Err(LerpError::KeylineCountMismatch { from: 6, to: 11 })
    );

    let a = focal_builder()
        .add_keyline(50.0, 0.0, 100.0, true)
        .add_keyline(135.0, 0.3, 70.0, false)
        .build()
        .unwrap();
    let b = focal_builder()
        .add_keyline(-35.0, 0.3, 70.0, false)
        .add_keyline(50.0, 0.0, 100.0, true)
        .build()
        .unwrap();
    assert!(matches!(
        KeylineState::lerp(&a, &b, 0.5),
        Err(LerpError::FocalRangeMismatch { .. })
    ));

    let c = focal_builder()
        .add_keyline(50.0, 0.0, 100.0, true)
        .add_anchor_keyline(135.0, 0.3, 70.0)
        .build()
        .unwrap();
    assert_eq!(
        KeylineState::lerp(&a, &c, 0.5),
        Err(LerpError::AnchorMismatch { index: 1 })
    );
}

#[test]
fn lerp_hits_both_endpoints() {
    let strategy = Strategy::StartAligned(StrategyParams::default());
    let from = strategy.keyline_state(100.0, 300.0, 0, 0.0).unwrap();
    let to = strategy.keyline_state(100.0, 320.0, 0, 0.0).unwrap();
    from.check_compatible(&to).unwrap();

    let at_start = KeylineState::lerp(&from, &to, 0.0).unwrap();
    let at_end = KeylineState::lerp(&from, &to, 1.0).unwrap();
    let mid = KeylineState::lerp(&from, &to, 0.5).unwrap();
    for ((s, e), (f, t)) in at_start
        .keylines()
        .iter()
        .zip(at_end.keylines())
        .zip(from.keylines().iter().zip(to.keylines()))
    {
        assert_approx!(s.offset_location, f.offset_location);
        assert_approx!(e.offset_location, t.offset_location);
    }
    assert_approx!(mid.viewport_extent(), 310.0);
    assert_approx!(mid.item_size(), (from.item_size() + to.item_size()) / 2.0);
    assert_eq!(mid.first_focal_index(), from.first_focal_index());
}

#[test]
fn interpolation_is_exact_on_keylines() {
    let state = start_state();
    for k in state.keylines() {
        let s = state.interpolate(k.location);
        assert_approx!(s.offset_location, k.offset_location);
        assert_approx!(s.mask, k.mask);
        assert_approx!(s.masked_item_size, k.masked_item_size);
    }

    let k = state.keylines();
    let mid = state.interpolate((k[0].location + k[1].location) / 2.0);
    assert_approx!(mid.offset_location, (k[0].offset_location + k[1].offset_location) / 2.0);
    assert_approx!(mid.masked_item_size, (40.0 + 99.4) / 2.0);
}

#[test]
fn interpolation_extrapolates_past_the_anchors() {
    let state = start_state();
    let last = *state.last_keyline();
    let s = state.interpolate(last.location + 100.0);
    assert_approx!(s.masked_item_size, last.masked_item_size);
    assert_approx!(s.mask, last.mask);
    assert!(s.offset_location > last.offset_location);
}

#[test]
fn layout_starts_unmeasured() {
    let mut layout = CarouselLayout::new(CarouselOptions::new(20));
    let mut host = RecordingHost::default();
    assert!(!layout.is_measured());
    assert_eq!(layout.scroll_by(100.0, &mut host), 0.0);
    assert!(layout.fill(&mut host).is_empty());
    assert!(host.events.is_empty());
    assert_eq!(layout.offset_for_index(0), None);
    assert_eq!(layout.keyline_state_for_index(0), None);
    assert!(layout.placement_for_index(0).is_none());
    assert!(layout.debug_overlay().is_none());
    assert_eq!(layout.snapshot().item_size, None);
}

#[test]
fn layout_scroll_bounds_clamp() {
    let mut layout = measured_layout(LayoutDirection::LeftToRight);
    let mut host = NoopHost;
    assert_approx!(layout.min_scroll(), 0.0);
    assert_approx!(layout.max_scroll(), 1789.2);

    assert_eq!(layout.scroll_by(-100.0, &mut host), 0.0);
    assert_eq!(layout.scroll_offset(), layout.min_scroll());

    let consumed = layout.scroll_by(5000.0, &mut host);
    assert_approx!(consumed, 1789.2);
    assert_eq!(layout.scroll_offset(), layout.max_scroll());

    let before = layout.scroll_offset();
    assert_eq!(layout.scroll_by(0.0, &mut host), 0.0);
    assert_eq!(layout.scroll_offset(), before);

    let consumed = layout.scroll_by(-5000.0, &mut host);
    assert_approx!(consumed, -1789.2);
    assert_eq!(layout.scroll_offset(), layout.min_scroll());
}

#[test]
fn keyline_state_for_index_translates_against_scroll() {
    let mut layout = measured_layout(LayoutDirection::LeftToRight);
    let canonical = layout.keyline_state().unwrap().clone();
    assert_eq!(layout.keyline_state_for_index(0), Some(canonical.clone()));

    let consumed = layout.scroll_by(500.0, &mut NoopHost);
    assert_approx!(consumed, 500.0);
    let shifted = layout.keyline_state_for_index(0).unwrap();
    for (s, c) in shifted.keylines().iter().zip(canonical.keylines()) {
        assert_approx!(s.location - c.location, -consumed);
        assert_approx!(s.offset_location, c.offset_location);
        assert_approx!(s.mask, c.mask);
    }
    assert_eq!(layout.keyline_state_for_index(20), None);
    assert_eq!(layout.keyline_state(), Some(&canonical));
}

#[test]
fn rtl_keyline_state_translates_with_scroll() {
    let mut layout = measured_layout(LayoutDirection::RightToLeft);
    let canonical = layout.keyline_state().unwrap().clone();
    let consumed = layout.scroll_by(500.0, &mut NoopHost);
    assert_approx!(consumed, 500.0);
    let shifted = layout.keyline_state_for_index(0).unwrap();
    for (s, c) in shifted.keylines().iter().zip(canonical.keylines()) {
        assert_approx!(s.location - c.location, 500.0);
    }
}

#[test]
fn shifted_frame_keeps_placements_in_the_viewport() {
    let mut layout = measured_layout(LayoutDirection::LeftToRight);
    layout.scroll_to_index(7, &mut NoopHost);
    let shifted = layout.keyline_state_for_index(7).unwrap();
    let focal = shifted.first_focal_keyline();
    assert_approx!(focal.location, 49.7 - 695.8);

    let p = layout.placement_for_index(7).unwrap();
    assert_approx!(p.center, focal.offset_location);
    assert_approx!(p.mask, 0.0);
}

#[test]
fn leading_padding_offsets_items_against_keylines() {
    let mut padded =
        CarouselLayout::new(CarouselOptions::new(20).with_leading_padding(16.0));
    padded.on_first_measure(100.0, 300.0).unwrap();
    let plain = measured_layout(LayoutDirection::LeftToRight);

    assert_approx!(padded.min_scroll(), -16.0);
    assert_approx!(padded.max_scroll(), 1789.2 - 16.0);
    assert_approx!(padded.offset_for_index(0).unwrap(), -16.0);
    assert_approx!(padded.scroll_offset(), -16.0);
    assert_eq!(padded.focal_index(), Some(0));
    assert_approx!(padded.placement_for_index(0).unwrap().center, 49.7);

    padded.scroll_to_offset(0.0, &mut NoopHost);
    let moved = padded.placement_for_index(0).unwrap();
    let unpadded = plain.placement_for_index(0).unwrap();
    assert!(moved.center < unpadded.center - 1.0);
    assert!(moved.mask > 0.0);
    assert!(moved.masked_size < unpadded.masked_size);
}

#[test]
fn rtl_leading_padding_mirrors() {
    let mut layout = CarouselLayout::new(
        CarouselOptions::new(20)
            .with_direction(LayoutDirection::RightToLeft)
            .with_leading_padding(16.0),
    );
    layout.on_first_measure(100.0, 300.0).unwrap();
    assert_approx!(layout.min_scroll(), -16.0);
    assert_approx!(layout.max_scroll(), 1789.2 - 16.0);
    assert_approx!(layout.placement_for_index(0).unwrap().center, 250.3);
    assert_eq!(layout.focal_index(), Some(0));
}

#[test]
fn fill_is_idempotent() {
    let mut layout = measured_layout(LayoutDirection::LeftToRight);
    let mut host = RecordingHost::default();

    let first = layout.fill(&mut host);
    let (events, placements) = host.take();
    assert_eq!(first, AttachedRange { start_index: 0, end_index: 5 });
    assert_eq!(
        events,
        (0..5).map(Event::Attach).collect::<Vec<_>>()
    );
    assert_eq!(placements.len(), 5);

    let second = layout.fill(&mut host);
    let (events2, placements2) = host.take();
    assert_eq!(first, second);
    assert!(events2.is_empty());
    assert_eq!(placements, placements2);
    assert_eq!(layout.attached_indices().collect::<Vec<_>>(), (0..5).collect::<Vec<_>>());
    assert!(layout.is_attached(4));
    assert!(!layout.is_attached(5));
}

#[test]
fn fill_places_items_on_keylines() {
    let mut layout = measured_layout(LayoutDirection::LeftToRight);
    let mut host = RecordingHost::default();
    layout.fill(&mut host);

    let expected = [(49.7, 99.4), (149.1, 99.4), (229.4, 61.2), (280.0, 40.0), (320.0, 40.0)];
    for (p, (center, size)) in host.placements.iter().zip(expected) {
        assert_approx!(p.center, center);
        assert_approx!(p.masked_size, size);
        assert_approx!(p.item_size, 99.4);
    }
    assert_approx!(host.placements[0].mask, 0.0);

    host.take();
    layout.scroll_by(49.7, &mut host);
    let p = layout.placement_for_index(0).unwrap();
    assert_approx!(p.center, (-20.0 + 49.7) / 2.0);
    assert_approx!(p.masked_size, (40.0 + 99.4) / 2.0);
}

#[test]
fn scrolling_attaches_and_detaches_in_ascending_order() {
    let mut layout = measured_layout(LayoutDirection::LeftToRight);
    let mut host = RecordingHost::default();
    layout.fill(&mut host);
    host.take();

    layout.scroll_by(298.2, &mut host);
    let (events, placements) = host.take();
    assert_eq!(
        events,
        [
            Event::Detach(0),
            Event::Detach(1),
            Event::Attach(5),
            Event::Attach(6),
            Event::Attach(7),
        ]
    );
    let indexes: Vec<usize> = placements.iter().map(|p| p.index).collect();
    assert_eq!(indexes, (2..8).collect::<Vec<_>>());
    assert_eq!(layout.attached_range(), AttachedRange { start_index: 2, end_index: 8 });

    layout.detach_all(&mut host);
    let (events, _) = host.take();
    assert_eq!(events, (2..8).map(Event::Detach).collect::<Vec<_>>());
    assert!(layout.attached().is_empty());
}

#[test]
fn buffer_widens_the_attached_range() {
    let mut layout =
        CarouselLayout::new(CarouselOptions::new(20).with_buffer(99.4));
    layout.on_first_measure(100.0, 300.0).unwrap();
    layout.scroll_to_index(5, &mut NoopHost);
    let narrow = {
        let mut plain = CarouselLayout::new(CarouselOptions::new(20));
        plain.on_first_measure(100.0, 300.0).unwrap();
        plain.range_for_offset(layout.scroll_offset())
    };
    let wide = layout.attached_range();
    assert_eq!(wide.start_index + 1, narrow.start_index);
    assert_eq!(wide.end_index, narrow.end_index + 1);
}

#[test]
fn rtl_mirrors_placements() {
    let mut layout = measured_layout(LayoutDirection::RightToLeft);
    let mut host = RecordingHost::default();
    assert_approx!(layout.min_scroll(), 0.0);
    assert_approx!(layout.max_scroll(), 1789.2);

    let range = layout.fill(&mut host);
    assert_eq!(range, AttachedRange { start_index: 0, end_index: 5 });
    let p0 = layout.placement_for_index(0).unwrap();
    assert_approx!(p0.center, 250.3);
    assert_approx!(p0.masked_size, 99.4);
    let p2 = layout.placement_for_index(2).unwrap();
    assert_approx!(p2.center, 70.6);

    assert_approx!(layout.offset_for_index(1).unwrap(), 99.4);
    layout.scroll_to_index(1, &mut host);
    assert_approx!(layout.placement_for_index(1).unwrap().center, 250.3);
    assert_eq!(layout.focal_index(), Some(1));
}

#[test]
fn offset_for_index_targets_the_focal_keyline() {
    let mut layout = measured_layout(LayoutDirection::LeftToRight);
    assert_approx!(layout.offset_for_index(0).unwrap(), 0.0);
    assert_approx!(layout.offset_for_index(7).unwrap(), 695.8);
    assert_eq!(layout.offset_for_index(19), Some(layout.max_scroll()));
    assert_eq!(layout.offset_for_index(20), None);

    let applied = layout.scroll_to_index(7, &mut NoopHost).unwrap();
    assert_approx!(applied, 695.8);
    assert_eq!(layout.focal_index(), Some(7));
    let p = layout.placement_for_index(7).unwrap();
    assert_approx!(p.center, 49.7);
    assert_approx!(p.mask, 0.0);
}

#[test]
fn initial_index_is_focused_by_first_measure() {
    let mut layout = CarouselLayout::new(CarouselOptions::new(20).with_initial_index(3));
    layout.on_first_measure(100.0, 300.0).unwrap();
    assert_approx!(layout.scroll_offset(), 298.2);
    assert_eq!(layout.focal_index(), Some(3));
}

#[test]
fn debug_overlay_reports_current_keylines() {
    let mut layout = measured_layout(LayoutDirection::LeftToRight);
    let overlay = layout.debug_overlay().unwrap();
    let state = layout.keyline_state().unwrap().clone();
    assert_eq!(overlay.keylines.len(), state.len());
    let pairs: Vec<(f32, f32)> = overlay.location_mask_pairs().collect();
    for ((loc, mask), k) in pairs.iter().zip(state.keylines()) {
        assert_approx!(*loc, k.location);
        assert_approx!(*mask, k.mask);
    }

    layout.scroll_by(100.0, &mut NoopHost);
    let overlay = layout.debug_overlay().unwrap();
    assert_approx!(overlay.scroll_offset, 100.0);
    assert_approx!(overlay.keylines[0].location, state.keylines()[0].location - 100.0);
    assert!(overlay.keylines[1].is_focal && overlay.keylines[0].is_anchor);
}

#[test]
fn reconfiguration_rebuilds_and_clamps() {
    let mut layout = measured_layout(LayoutDirection::LeftToRight);
    layout.scroll_by(5000.0, &mut NoopHost);

    layout.set_item_count(5).unwrap();
    assert_approx!(layout.max_scroll(), 4.5 * 99.4 - 149.1);
    assert_eq!(layout.scroll_offset(), layout.max_scroll());

    let err = layout.set_viewport_extent(0.0).unwrap_err();
    assert_eq!(err, CarouselError::Build(BuildError::InvalidViewportExtent(0.0)));
    assert_approx!(layout.viewport_extent(), 300.0);

    layout.set_layout_direction(LayoutDirection::RightToLeft).unwrap();
    assert_eq!(layout.keyline_state().unwrap().first_focal_index(), 3);

    layout.set_strategy(scenario_a_strategy()).unwrap();
    assert_eq!(layout.keyline_state().unwrap().len(), 11);
}

#[test]
fn snapshot_restores_scroll_state() {
    let mut layout = measured_layout(LayoutDirection::LeftToRight);
    layout.scroll_by(420.0, &mut NoopHost);
    let snap = layout.snapshot();
    assert_eq!(snap.item_size, Some(100.0));

    let mut restored = CarouselLayout::new(CarouselOptions::new(20));
    restored.restore_snapshot(snap).unwrap();
    assert_approx!(restored.scroll_offset(), 420.0);
    assert_eq!(restored.keyline_state(), layout.keyline_state());
}

#[test]
fn mask_rect_follows_orientation() {
    let p = ItemPlacement {
        index: 0,
        center: 229.4,
        item_size: 99.4,
        masked_size: 61.2,
        mask: 0.384,
        cutoff: 0.0,
    };
    let h = p.mask_rect(Orientation::Horizontal, 50.0);
    assert_approx!(h.left, 19.1);
    assert_approx!(h.width(), 61.2);
    assert_approx!(h.height(), 50.0);
    let v = p.mask_rect(Orientation::Vertical, 50.0);
    assert_approx!(v.top, 19.1);
    assert_approx!(v.height(), 61.2);
    assert_approx!(p.masked_start(), 229.4 - 30.6);
}

proptest! {
    #[test]
    fn interpolation_is_continuous(x in -200.0f32..700.0) {
        let state = start_state();
        let a = state.interpolate(x);
        let b = state.interpolate(x + 0.01);
        prop_assert!((a.mask - b.mask).abs() < 1e-3);
        prop_assert!((a.masked_item_size - b.masked_item_size).abs() < 0.05);
        prop_assert!((a.offset_location - b.offset_location).abs() < 0.05);
    }

    #[test]
    fn strategies_always_build_valid_states(
        item in 20.0f32..400.0,
        extent in 50.0f32..2000.0,
        count in 1usize..50,
        center in any::<bool>(),
    ) {
        let params = StrategyParams::default();
        let strategy = if center {
            Strategy::CenterAligned(params)
        } else {
            Strategy::StartAligned(params)
        };
        let state = strategy.keyline_state(item, extent, count, 0.0);
        prop_assert!(state.is_ok(), "{:?}", state);
        let state = state.unwrap();
        let keylines = state.keylines();
        prop_assert!(state.focal_count() >= 1);
        prop_assert!(keylines[0].is_anchor);
        prop_assert!(keylines[keylines.len() - 1].is_anchor);
        for w in keylines.windows(2) {
            prop_assert!(w[0].location < w[1].location);
        }
        for k in keylines {
            prop_assert!(k.masked_item_size <= state.item_size() * (1.0 + 1e-4));
            prop_assert!((0.0..=1.0).contains(&k.mask));
        }

        let tolerance = state.item_size() * 1e-4;
        for i in 0..state.first_focal_index() {
            prop_assert!(
                keylines[i].masked_item_size <= keylines[i + 1].masked_item_size + tolerance
            );
        }
        for i in state.last_focal_index() + 1..keylines.len() {
            prop_assert!(
                keylines[i].masked_item_size <= keylines[i - 1].masked_item_size + tolerance
            );
        }

        let arrangement = strategy.arrangement(item, extent, count).unwrap();
        let even_sides =
            arrangement.small_count % 2 == 0 && arrangement.medium_count % 2 == 0;
        if center && even_sides {
            let n = keylines.len();
            for (i, k) in keylines.iter().enumerate() {
                let mirror = &keylines[n - 1 - i];
                prop_assert!(
                    (k.offset_location + mirror.offset_location - extent).abs() < 1e-2,
                    "{} + {} != {}", k.offset_location, mirror.offset_location, extent
                );
                prop_assert!((k.masked_item_size - mirror.masked_item_size).abs() < 1e-3);
            }
        }
        let reversed = state.reverse(extent).reverse(extent);
        for (a, b) in reversed.keylines().iter().zip(keylines) {
            prop_assert!((a.location - b.location).abs() < 1e-2);
        }
    }
}
