use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    let c = Canvas::new(720, 346).unwrap();
    assert_eq!(c.min_side(), 346.0);
    assert_eq!(c.center(), Point::new(360.0, 173.0));
}

#[test]
fn premul_scales_color_by_alpha() {
    let c = Rgba::new(1.0, 0.5, 0.0, 0.5);
    assert_eq!(c.premul(), [0.5, 0.25, 0.0, 0.5]);
    assert_eq!(Rgba::TRANSPARENT.premul(), [0.0; 4]);
}

#[test]
fn lerp_hits_endpoints_and_clamps_t() {
    let a = Rgba::new(0.0, 0.0, 0.0, 1.0);
    let b = Rgba::new(1.0, 1.0, 1.0, 1.0);
    assert_eq!(a.lerp(b, 0.0), a);
    assert_eq!(a.lerp(b, 1.0), b);
    assert_eq!(a.lerp(b, 7.0), b);
    assert_eq!(a.lerp(b, 0.5).r, 0.5);
}

#[test]
fn rgba8_roundtrip_is_exact_for_byte_values() {
    let c = Rgba::from_rgba8(12, 200, 255, 128);
    assert_eq!(c.to_rgba8(), [12, 200, 255, 128]);
}
