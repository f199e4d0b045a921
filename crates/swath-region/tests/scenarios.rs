//! End-to-end scenarios over the public `Region` API.

use swath_region::{Point, PoissonDisk, Region};
use swath_test_utils::fixtures::{picture, single, two_rooms, walled};
use swath_test_utils::{assert_padding_clear, assert_subset, seeded};

// ── Morphology ──────────────────────────────────────────────────

#[test]
fn single_cell_growth_shapes() {
    let mut plus = single(10, 10, 5, 5);
    plus.expand();
    assert_eq!(plus.size(), 5);

    let mut square = single(10, 10, 5, 5);
    square.expand8way();
    assert_eq!(square.size(), 9);
}

#[test]
fn full_grid_retracts_to_interior() {
    let mut r = Region::filled(8, 8);
    r.retract();
    assert_eq!(r.size(), 36);
    assert_eq!(
        r.to_string(),
        "........\n.######.\n.######.\n.######.\n.######.\n.######.\n.######.\n........\n"
    );
}

#[test]
fn thinning_a_room_keeps_it_in_place() {
    let rooms = two_rooms();
    let mut thin = rooms.clone();
    thin.thin_fully();
    assert_subset(&thin, &rooms);
    assert!(!thin.is_empty());
}

#[test]
fn picture_connect_lines() {
    let stairs = picture(&[
        "#....",
        ".#...",
        "..#..",
    ]);
    let mut joined = stairs.clone();
    joined.connect_lines();
    assert_eq!(joined.to_string(), "##...\n.##..\n..#..\n");
}

// ── Flood ───────────────────────────────────────────────────────

#[test]
fn flood_does_not_cross_wall() {
    let bounds = walled(21, 9);
    let mut r = single(21, 9, 0, 0);
    r.flood_n(&bounds, 1000);
    assert_eq!(r.size(), 10 * 9);
    assert!(!r.get(11, 0));
}

#[test]
fn flood_through_corridor_reaches_other_room() {
    let rooms = two_rooms();
    let steps = single(24, 8, 1, 1).flood_series_to_limit(&rooms);
    let last = steps.last().cloned().unwrap_or_default();
    assert_eq!(last, rooms);
}

#[test]
fn spill_fills_requested_volume() {
    let mut rng = seeded(7);
    let rooms = two_rooms();
    let mut r = single(24, 8, 2, 2);
    r.spill(&rooms, 50, &mut rng);
    assert_eq!(r.size(), 50);
    assert_subset(&r, &rooms);
}

// ── Sampling ────────────────────────────────────────────────────

#[test]
fn scatter_points_are_box_separated() {
    let mut rng = seeded(8);
    let r = Region::filled(64, 64);
    let pts = r.random_scatter(&mut rng, 2, None);
    for (i, a) in pts.iter().enumerate() {
        for b in &pts[i + 1..] {
            assert!(a.chebyshev(*b) > 2);
        }
    }
}

#[test]
fn blue_selection_repeats_exactly() {
    let mut a = Region::filled(90, 70);
    let mut b = a.clone();
    a.separated_region_blue(0.1, None);
    b.separated_region_blue(0.1, None);
    assert_eq!(a, b);
    assert!(a.size() <= 630);
}

#[test]
fn poisson_on_rooms() {
    let mut rng = seeded(9);
    let disk = PoissonDisk::builder().min_distance(3.0).build().unwrap();
    let mut rooms = two_rooms();
    let original = rooms.clone();
    rooms.poisson_disk(&disk, &mut rng);
    assert!(rooms.size() >= 2);
    assert_subset(&rooms, &original);
}

// ── Transforms and text ─────────────────────────────────────────

#[test]
fn transforms_keep_padding_clear() {
    let mut rng = seeded(10);
    let mut r = Region::random_fraction(&mut rng, 0.3, 33, 97);
    r.translate(3, -40);
    assert_padding_clear(&r);
    r.zoom(10, 30);
    assert_padding_clear(&r);
    r.flip(true, true);
    assert_padding_clear(&r);
    r.rotate(1);
    assert_eq!((r.width(), r.height()), (97, 33));
    assert_padding_clear(&r);
}

#[test]
fn numeric_text_round_trip() {
    let mut r = Region::new(5, 70);
    r.insert_point(Point::new(4, 69));
    let s = r.serialize_to_string();
    assert_eq!(Region::deserialize_from_string(&s).unwrap(), r);
    assert!(Region::deserialize_from_string("5,70,1").is_err());
}
