use super::*;

fn fitted(w: u32, h: u32, scale: f64) -> Surface {
    let mut s = Surface::new(scale).unwrap();
    s.fit(Canvas::new(w, h).unwrap()).unwrap();
    s
}

#[test]
fn fit_scales_backing_buffer_and_resets_transform() {
    let s = fitted(720, 346, 2.0);
    assert_eq!(s.pixel_size(), (1440, 692));
    assert_eq!(s.data().len(), 1440 * 692 * 4);
    assert_eq!(s.transform(), Affine::scale(2.0));
    assert_eq!(s.canvas(), Some(Canvas::new(720, 346).unwrap()));
}

#[test]
fn fractional_scale_rounds_physical_size() {
    let s = fitted(721, 346, 1.5);
    assert_eq!(s.pixel_size(), (1082, 519));
}

#[test]
fn refit_clears_previous_pixels() {
    let mut s = fitted(4, 4, 1.0);
    s.fill_region(Rect::new(0.0, 0.0, 4.0, 4.0), CompositeMode::Normal, |_| {
        [1.0, 1.0, 1.0, 1.0]
    });
    assert!(s.data().iter().all(|b| *b == 255));
    s.fit(Canvas::new(4, 4).unwrap()).unwrap();
    assert!(s.data().iter().all(|b| *b == 0));
}

#[test]
fn device_scale_validation() {
    assert!(Surface::new(0.0).is_err());
    assert!(Surface::new(-1.0).is_err());
    assert!(Surface::new(f64::NAN).is_err());
    assert!(Surface::new(MAX_DEVICE_SCALE + 0.5).is_err());
    let mut s = Surface::new(1.0).unwrap();
    assert!(s.set_device_scale(3.0).is_ok());
    assert_eq!(s.device_scale(), 3.0);
}

#[test]
fn painting_before_fit_is_reported() {
    let s = Surface::new(1.0).unwrap();
    assert!(s.require_canvas().is_err());
}

#[test]
fn fill_region_samples_pixel_centres_in_logical_units() {
    let mut s = fitted(4, 3, 2.0);
    // logical row y in [1, 2) covers physical rows 2 and 3
    s.fill_region(Rect::new(0.0, 1.0, 4.0, 2.0), CompositeMode::Normal, |_| {
        [0.0, 0.0, 0.0, 1.0]
    });
    let (w, _) = s.pixel_size();
    let alpha_at = |x: u32, y: u32| s.data()[((y * w + x) * 4 + 3) as usize];
    assert_eq!(alpha_at(0, 1), 0);
    assert_eq!(alpha_at(0, 2), 255);
    assert_eq!(alpha_at(7, 3), 255);
    assert_eq!(alpha_at(0, 4), 0);
}

#[test]
fn fill_region_clips_to_surface() {
    let mut s = fitted(2, 2, 1.0);
    s.fill_region(Rect::new(-10.0, -10.0, 10.0, 10.0), CompositeMode::Additive, |_| {
        [0.5, 0.5, 0.5, 0.5]
    });
    assert!(s.data().chunks_exact(4).all(|px| px == [128, 128, 128, 128]));
}

#[test]
fn composite_coverage_tints_by_mask_alpha() {
    let mut s = fitted(2, 1, 1.0);
    let mask = vec![255u8, 255, 255, 255, 0, 0, 0, 0];
    s.composite_coverage(&mask, CompositeMode::Normal, |p| {
        assert!(p.x < 1.0);
        [1.0, 0.0, 0.0, 1.0]
    })
    .unwrap();
    assert_eq!(&s.data()[..4], &[255, 0, 0, 255]);
    assert_eq!(&s.data()[4..], &[0, 0, 0, 0]);
}

#[test]
fn frame_unpremultiplies_for_export() {
    let frame = FrameRGBA {
        width: 1,
        height: 2,
        data: vec![64, 32, 0, 128, 0, 0, 0, 0],
        premultiplied: true,
    };
    assert_eq!(frame.to_straight_rgba(), vec![128, 64, 0, 128, 0, 0, 0, 0]);
}
