use super::*;
use crate::random::seed::SequenceSeeds;

const MS: Duration = Duration::from_millis(1);

fn forge() -> Forge {
    let cfg = ForgeConfig {
        load_system_fonts: false,
        ..ForgeConfig::default()
    };
    Forge::with_font_book(cfg, FontBook::empty(), SequenceSeeds::new(7)).unwrap()
}

#[test]
fn startup_holds_default_name_and_drawn_seed() {
    let f = forge();
    assert_eq!(f.last_used().name, DEFAULT_NAME);
    assert_eq!(f.last_used().seed, SequenceSeeds::new(7).next_seed());
    assert!(f.last_render().is_none());
    assert_eq!(f.resize_debounce(), 180 * MS);
}

#[test]
fn export_and_frame_before_render_fail() {
    let f = forge();
    assert!(matches!(f.export(), Err(ForgeError::NothingRendered)));
    assert!(matches!(f.frame(), Err(ForgeError::NothingRendered)));
}

#[test]
fn blank_names_use_fallback() {
    let mut f = forge();
    for name in ["", "   ", "\t\n"] {
        let state = f.forge(name, Seed::new(0.42)).unwrap();
        assert_eq!(state.name, FALLBACK_NAME);
        assert_eq!(f.last_used().name, FALLBACK_NAME);
    }
    assert_eq!(f.export().unwrap().file_name(), "anonymous.png");
}

#[test]
fn forge_then_export_names_file_after_subject() {
    let mut f = forge();
    let state = f.forge("Nova", Seed::new(0.42)).unwrap();
    assert_eq!(
        f.last_used(),
        &LastUsed {
            name: "Nova".to_owned(),
            seed: Seed::new(0.42)
        }
    );
    let img = f.export().unwrap();
    assert_eq!(img.file_name(), "nova.png");
    assert_eq!(img.state(), &state);
    let decoded = image::load_from_memory(img.png_bytes()).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (720, 346));

    f.forge("Ada Lovelace!!", Seed::new(0.1)).unwrap();
    assert_eq!(f.export().unwrap().file_name(), "ada-lovelace.png");
}

#[test]
fn shuffle_keeps_name_and_draws_new_seed() {
    let mut f = forge();
    f.forge("Nova", Seed::new(0.42)).unwrap();
    let state = f.shuffle().unwrap();
    assert_eq!(state.name, "Nova");
    assert_ne!(state.seed, Seed::new(0.42));
    assert_eq!(f.last_used().seed, state.seed);

    let again = f.shuffle().unwrap();
    assert_ne!(again.seed, state.seed);
}

#[test]
fn forge_new_draws_seed_from_source() {
    let mut f = forge();
    let mut seeds = SequenceSeeds::new(7);
    seeds.next_seed();
    let expected = seeds.next_seed();
    let state = f.forge_new("Vega").unwrap();
    assert_eq!(state.seed, expected);
}

#[test]
fn same_pair_renders_same_pixels() {
    let mut a = forge();
    let mut b = forge();
    a.forge("Nova", Seed::new(0.42)).unwrap();
    b.forge("Nova", Seed::new(0.42)).unwrap();
    assert_eq!(a.frame().unwrap(), b.frame().unwrap());
}

#[test]
fn resize_burst_renders_once_with_stored_pair() {
    let mut f = forge();
    let t0 = Instant::now();
    let before = f.forge("Nova", Seed::new(0.42)).unwrap();

    f.request_resize(1.5, t0).unwrap();
    f.request_resize(2.0, t0 + 60 * MS).unwrap();
    f.request_resize(2.0, t0 + 120 * MS).unwrap();

    let mut renders = Vec::new();
    let mut t = t0;
    while t <= t0 + 1000 * MS {
        if let Some(state) = f.poll_resize(t).unwrap() {
            renders.push(state);
        }
        t += 10 * MS;
    }

    assert_eq!(renders.len(), 1);
    let after = &renders[0];
    assert_eq!(after.name, before.name);
    assert_eq!(after.seed, before.seed);
    assert_eq!(after.palette, before.palette);
    assert_eq!(after.font, before.font);
    assert_eq!(after.device_scale, 2.0);
    assert_eq!((after.width_px, after.height_px), (1440, 692));
    assert_eq!(f.last_used().seed, Seed::new(0.42));
    assert_eq!(f.device_scale(), 2.0);
}

#[test]
fn resize_waits_for_quiet_interval() {
    let mut f = forge();
    let t0 = Instant::now();
    f.forge("Nova", Seed::new(0.42)).unwrap();
    f.request_resize(2.0, t0).unwrap();
    assert_eq!(f.time_until_resize(t0 + 30 * MS), Some(150 * MS));
    assert!(f.poll_resize(t0 + 179 * MS).unwrap().is_none());
    assert!(f.poll_resize(t0 + 180 * MS).unwrap().is_some());
    assert_eq!(f.time_until_resize(t0 + 200 * MS), None);
}

#[test]
fn resize_before_any_forge_renders_startup_pair() {
    let mut f = forge();
    let t0 = Instant::now();
    f.request_resize(1.0, t0).unwrap();
    let state = f.poll_resize(t0 + 180 * MS).unwrap().unwrap();
    assert_eq!(state.name, DEFAULT_NAME);
    assert_eq!(state.seed, SequenceSeeds::new(7).next_seed());
}

#[test]
fn invalid_resize_is_rejected_without_arming() {
    let mut f = forge();
    let t0 = Instant::now();
    assert!(f.request_resize(0.0, t0).is_err());
    assert!(f.request_resize(f64::NAN, t0).is_err());
    assert_eq!(f.time_until_resize(t0), None);
}

#[test]
fn cancelled_resize_never_fires() {
    let mut f = forge();
    let t0 = Instant::now();
    f.request_resize(2.0, t0).unwrap();
    assert!(f.cancel_resize());
    assert!(f.poll_resize(t0 + 1000 * MS).unwrap().is_none());
    assert!(!f.cancel_resize());
}

#[test]
fn failed_render_keeps_last_pair_and_clears_rendered() {
    let mut f = forge();
    f.forge("Nova", Seed::new(0.42)).unwrap();

    let err = f
        .commit(
            "Vega".to_owned(),
            Seed::new(0.9),
            Err(ForgeError::validation("surface lost")),
        )
        .unwrap_err();
    assert!(matches!(err, ForgeError::Validation(_)));
    assert_eq!(
        f.last_used(),
        &LastUsed {
            name: "Nova".to_owned(),
            seed: Seed::new(0.42)
        }
    );
    assert!(f.last_render().is_none());
    assert!(matches!(f.export(), Err(ForgeError::NothingRendered)));
    assert!(matches!(f.frame(), Err(ForgeError::NothingRendered)));

    let state = f.shuffle().unwrap();
    assert_eq!(state.name, "Nova");
    assert_eq!(f.last_render(), Some(&state));
}
