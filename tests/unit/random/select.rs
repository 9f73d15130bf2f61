use super::*;
use crate::random::seed::Seed;

#[test]
fn empty_options_are_a_defect_and_consume_nothing() {
    let mut rng = SeededRng::new(Seed::new(0.3));
    let empty: [u8; 0] = [];
    let err = pick(&empty, &mut rng, "bytes").unwrap_err();
    assert!(matches!(err, ForgeError::EmptySelection("bytes")));
    assert_eq!(rng.draws(), 0);
}

#[test]
fn pick_matches_floor_of_draw_times_len() {
    let options = ["a", "b", "c", "d", "e"];
    let mut rng = SeededRng::new(Seed::new(0.42));
    let mut shadow = rng.clone();
    for _ in 0..64 {
        let want = (shadow.next_f64() * options.len() as f64).floor() as usize;
        assert_eq!(*pick(&options, &mut rng, "letters").unwrap(), options[want]);
    }
    assert_eq!(rng.draws(), 64);
}

#[test]
fn single_option_always_selected() {
    let mut rng = SeededRng::new(Seed::new(0.9));
    for _ in 0..8 {
        assert_eq!(*pick(&[7u32], &mut rng, "one").unwrap(), 7);
    }
}

#[test]
fn every_option_reachable() {
    let options = [0usize, 1, 2, 3];
    let mut seen = [false; 4];
    let mut rng = SeededRng::new(Seed::new(0.5));
    for _ in 0..500 {
        seen[*pick(&options, &mut rng, "quad").unwrap()] = true;
    }
    assert!(seen.iter().all(|s| *s));
}
