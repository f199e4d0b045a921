//! End-to-end use of the facade: carve a level, place things in it and
//! ship it as a string.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use swath::prelude::*;

fn cave(seed: u64) -> Region {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut map = Region::random_fraction(&mut rng, 0.6, 96, 64);
    map.retract().expand_n(2).retract();
    map
}

#[test]
fn spawn_points_stay_on_floor() {
    let map = cave(11);
    let mut rng = ChaCha8Rng::seed_from_u64(12);
    let disk = PoissonDisk::builder().min_distance(5.0).build().unwrap();
    let spawns = disk.sample(&map, &mut rng);
    assert!(!spawns.is_empty());
    for p in &spawns {
        assert!(map.contains(*p));
    }
    let loot = map.separated_blue(0.02, Some(10));
    assert!(loot.len() <= 10);
    assert!(loot.iter().all(|p| map.contains(*p)));
}

#[test]
fn level_survives_both_string_forms() {
    let map = cave(13);
    assert_eq!(decompress(&to_compressed_string(&map)).unwrap(), map);
    assert_eq!(
        Region::deserialize_from_string(&map.serialize_to_string()).unwrap(),
        map
    );
}

#[test]
fn bad_input_reports_errors() {
    assert!(matches!(
        Region::deserialize_from_string("3,3"),
        Err(RegionError::MalformedSerialization { .. })
    ));
    assert!(matches!(decompress("nope"), Err(CodecError::InvalidHeader { .. })));
}
