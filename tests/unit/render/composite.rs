use super::*;

fn approx(a: PremulF32, b: PremulF32) -> bool {
    a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-5)
}

#[test]
fn over_opaque_source_replaces_destination() {
    let d = [0.2, 0.3, 0.4, 1.0];
    let s = [1.0, 0.0, 0.0, 1.0];
    assert!(approx(over(d, s), s));
}

#[test]
fn over_transparent_source_keeps_destination() {
    let d = [0.2, 0.3, 0.4, 1.0];
    assert!(approx(over(d, [0.0; 4]), d));
}

#[test]
fn additive_brightens_and_saturates() {
    let d = [0.5, 0.5, 0.5, 1.0];
    let s = [0.1, 0.4, 0.8, 0.8];
    let out = additive(d, s);
    assert!(approx(out, [0.6, 0.9, 1.0, 1.0]));
    for c in 0..3 {
        assert!(out[c] >= d[c]);
    }
}

#[test]
fn screen_never_darkens_opaque_destination() {
    let d = [0.3, 0.6, 0.9, 1.0];
    let s = [0.5, 0.5, 0.5, 1.0];
    let out = screen(d, s);
    for c in 0..3 {
        assert!(out[c] >= d[c] - 1e-6);
    }
    assert!((out[0] - (0.5 + 0.3 - 0.15)).abs() < 1e-5);
}

#[test]
fn soft_light_with_mid_grey_is_identity() {
    let d = [0.2, 0.5, 0.8, 1.0];
    let s = [0.5, 0.5, 0.5, 1.0];
    assert!(approx(soft_light(d, s), d));
}

#[test]
fn separable_modes_onto_transparent_act_like_over() {
    let s = [0.4, 0.2, 0.1, 0.5];
    assert!(approx(screen([0.0; 4], s), s));
    assert!(approx(soft_light([0.0; 4], s), s));
}

#[test]
fn composite_in_place_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    let src = vec![0u8; 4];
    assert!(composite_in_place(&mut dst, &src, CompositeMode::Normal).is_err());
}

#[test]
fn composite_in_place_skips_transparent_source_pixels() {
    let mut dst = vec![10u8, 20, 30, 255, 10, 20, 30, 255];
    let src = vec![0u8, 0, 0, 0, 255, 255, 255, 255];
    composite_in_place(&mut dst, &src, CompositeMode::Additive).unwrap();
    assert_eq!(&dst[..4], &[10, 20, 30, 255]);
    assert_eq!(&dst[4..], &[255, 255, 255, 255]);
}
