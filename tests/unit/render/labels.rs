use super::*;

#[test]
fn key_quantizes_font_size() {
    let a = LabelKey::new("Earth", 12.0, Rgba8::rgb(1, 2, 3));
    let b = LabelKey::new("Earth", 12.001, Rgba8::rgb(1, 2, 3));
    assert_eq!(a, b);
    assert_eq!(a.size_px(), 12.0);
}

#[test]
fn svg_escapes_text_and_sizes_box() {
    let key = LabelKey::new("A&B <x>", 10.0, Rgba8::rgb(255, 0, 0));
    let (svg, w, h) = label_svg(&key);
    assert!(svg.contains("A&amp;B &lt;x&gt;"));
    assert!(svg.contains(r##"fill="#ff0000""##));
    assert!((14..=15).contains(&h));
    assert!(w > 40);
}

#[test]
fn rasterized_sprite_matches_svg_box() {
    let key = LabelKey::new("Mars", 12.0, Rgba8::rgb(255, 255, 255));
    let (_, w, h) = label_svg(&key);
    let sprite = rasterize_label(&key).unwrap();
    assert_eq!((sprite.width, sprite.height), (w, h));
    assert_eq!(sprite.rgba8_premul.len(), (w * h * 4) as usize);
}
