use super::*;
use crate::random::seed::Seed;
use crate::render::pipeline::RenderStats;

fn state() -> RenderState {
    RenderState {
        name: "Nova".to_owned(),
        seed: Seed::new(0.42),
        palette: "aurora",
        font: "anton",
        width: 2,
        height: 1,
        device_scale: 1.0,
        width_px: 2,
        height_px: 1,
        stats: RenderStats::default(),
    }
}

fn frame() -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data: vec![128, 64, 0, 128, 10, 20, 30, 255],
        premultiplied: true,
    }
}

#[test]
fn base_name_sanitization() {
    assert_eq!(export_base_name("Ada Lovelace!!"), "ada-lovelace");
    assert_eq!(export_base_name("Nova"), "nova");
    assert_eq!(export_base_name("  --Grace   Hopper__ 1906 "), "grace-hopper-1906");
    assert_eq!(export_base_name("R2D2"), "r2d2");
    assert_eq!(export_base_name("Élodie"), "lodie");
}

#[test]
fn base_name_falls_back_when_empty() {
    assert_eq!(export_base_name(""), DEFAULT_EXPORT_BASE);
    assert_eq!(export_base_name("!!! ???"), DEFAULT_EXPORT_BASE);
    assert_eq!(export_base_name("東京"), DEFAULT_EXPORT_BASE);
}

#[test]
fn png_is_straight_alpha() {
    let png = encode_png(&frame()).unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (2, 1));
    assert_eq!(decoded.get_pixel(1, 0).0, [10, 20, 30, 255]);
    let px = decoded.get_pixel(0, 0).0;
    assert_eq!(px[3], 128);
    assert!(px[0] >= 254);
}

#[test]
fn png_rejects_mismatched_buffer() {
    let mut f = frame();
    f.data.pop();
    assert!(matches!(encode_png(&f), Err(ForgeError::Export(_))));
}

#[test]
fn file_names_and_suffixes() {
    let img = ExportedImage::new("nova".to_owned(), vec![1, 2, 3], state());
    assert_eq!(img.file_name(), "nova.png");
    assert_eq!(img.base_name(), "nova");
    let img = img.with_suffix("@2x");
    assert_eq!(img.file_name(), "nova@2x.png");
    assert_eq!(img.png_bytes(), &[1, 2, 3]);
}

#[test]
fn manifest_serializes_render_state() {
    let img = ExportedImage::new("nova".to_owned(), Vec::new(), state());
    let v = serde_json::to_value(img.manifest()).unwrap();
    assert_eq!(v["file"], "nova.png");
    assert_eq!(v["render"]["name"], "Nova");
    assert_eq!(v["render"]["seed"], 0.42);
    assert_eq!(v["render"]["palette"], "aurora");
    assert_eq!(v["render"]["font"], "anton");
    assert_eq!(v["render"]["stats"]["glyphs_painted"], false);
}

#[test]
fn writes_image_and_manifest() {
    let dir = std::env::temp_dir().join(format!("nameforge_export_{}", std::process::id()));
    let png = encode_png(&frame()).unwrap();
    let img = ExportedImage::new("nova".to_owned(), png.clone(), state()).with_suffix("-2");
    let path = img.write_to_dir(&dir).unwrap();
    assert_eq!(path, dir.join("nova-2.png"));
    assert_eq!(std::fs::read(&path).unwrap(), png);
    let manifest = img.write_manifest_to_dir(&dir).unwrap();
    assert_eq!(manifest, dir.join("nova-2.json"));
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&manifest).unwrap()).unwrap();
    assert_eq!(json["file"], "nova-2.png");
    let _ = std::fs::remove_dir_all(&dir);
}
