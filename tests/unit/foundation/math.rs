use super::*;

#[test]
fn fnv_is_order_sensitive() {
    let mut a = Fnv1a64::new_default();
    a.write_u64(1);
    a.write_u64(2);
    let mut b = Fnv1a64::new_default();
    b.write_u64(2);
    b.write_u64(1);
    assert_ne!(a.finish(), b.finish());
    assert_ne!(Fnv1a64::new_default().finish(), a.finish());
}

#[test]
fn mix64_spreads_adjacent_inputs() {
    assert_ne!(mix64(1), mix64(2));
    assert_eq!(mix64(0), 0);
}

#[test]
fn unit_byte_conversions_clamp() {
    assert_eq!(unit_to_u8(-1.0), 0);
    assert_eq!(unit_to_u8(2.0), 255);
    assert_eq!(unit_to_u8(u8_to_unit(77)), 77);
}
