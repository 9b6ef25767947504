use super::*;
use crate::foundation::core::Canvas;

fn small_opts() -> GenerateOpts {
    GenerateOpts {
        fps: 4,
        seconds: 1.0,
        canvas: Canvas {
            width: 40,
            height: 40,
        },
        encoder_speed: 30,
        ..GenerateOpts::default()
    }
}

#[test]
fn ensure_generates_only_when_missing() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(dir.path().join("static").join("orbits.gif"), small_opts());

    assert!(!store.exists());
    assert_eq!(store.ensure().unwrap(), Ensured::Generated);
    assert!(store.exists());
    assert!(std::fs::metadata(store.path()).unwrap().len() > 0);

    assert_eq!(store.ensure().unwrap(), Ensured::AlreadyPresent);
}

#[test]
fn ensure_keeps_existing_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orbits.gif");
    std::fs::write(&path, b"cached").unwrap();

    let store = ArtifactStore::new(&path, small_opts());
    assert_eq!(store.ensure().unwrap(), Ensured::AlreadyPresent);
    assert_eq!(store.read_bytes().unwrap(), b"cached");
}

#[test]
fn regenerate_always_overwrites() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("orbits.gif");
    std::fs::write(&path, b"stale").unwrap();

    let store = ArtifactStore::new(&path, small_opts());
    store.regenerate().unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"GIF89a"));
}

#[test]
fn deleted_artifact_is_recreated_on_read() {
    let dir = tempfile::tempdir().unwrap();
    let store = ArtifactStore::new(dir.path().join("orbits.gif"), small_opts());
    store.ensure().unwrap();
    std::fs::remove_file(store.path()).unwrap();

    let bytes = store.read_bytes().unwrap();
    assert!(bytes.starts_with(b"GIF89a"));
    assert!(store.exists());
}

#[test]
fn concurrent_regenerations_leave_a_valid_gif() {
    let dir = tempfile::tempdir().unwrap();
    let store = std::sync::Arc::new(ArtifactStore::new(
        dir.path().join("orbits.gif"),
        small_opts(),
    ));

    let handles: Vec<_> = (0..3)
        .map(|_| {
            let store = store.clone();
            std::thread::spawn(move || store.regenerate())
        })
        .collect();
    for h in handles {
        h.join().unwrap().unwrap();
    }

    let bytes = std::fs::read(store.path()).unwrap();
    assert!(bytes.starts_with(b"GIF89a"));
}

#[test]
fn unwritable_location_fails() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not_a_dir");
    std::fs::write(&blocker, b"file").unwrap();

    let store = ArtifactStore::new(blocker.join("orbits.gif"), small_opts());
    assert!(store.regenerate().is_err());
    assert!(!store.exists());
}
