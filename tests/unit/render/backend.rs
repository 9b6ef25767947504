use super::*;

fn frame(data: Vec<u8>, premultiplied: bool) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data,
        premultiplied,
    }
}

#[test]
fn pixel_unpremultiplies_partial_alpha() {
    let f = frame(vec![64, 32, 0, 128, 10, 20, 30, 255], true);
    assert_eq!(f.pixel(0, 0), Some([128, 64, 0, 128]));
    assert_eq!(f.pixel(1, 0), Some([10, 20, 30, 255]));
    assert_eq!(f.pixel(2, 0), None);
    assert_eq!(f.pixel(0, 1), None);
}

#[test]
fn straight_copy_matches_pixels() {
    let f = frame(vec![64, 32, 0, 128, 0, 0, 0, 0], true);
    assert_eq!(f.to_straight_rgba8(), vec![128, 64, 0, 128, 0, 0, 0, 0]);

    let straight = frame(vec![1, 2, 3, 4, 5, 6, 7, 8], false);
    assert_eq!(straight.to_straight_rgba8(), straight.data);
}

#[test]
fn create_backend_builds_cpu_with_worker_support() {
    let backend = create_backend(BackendKind::Cpu).unwrap();
    assert!(backend.supports_cpu_workers());
}
