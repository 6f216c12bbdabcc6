use super::*;

#[test]
fn temp_dir_sink_writes_and_returns_file_locator() {
    let dir = tempfile::tempdir().unwrap();
    let sink = TempDirSink::in_dir(dir.path());

    let locator = sink.persist(b"payload", "png").unwrap();
    assert!(locator.starts_with("file://"), "{locator}");
    assert!(locator.ends_with(".png"), "{locator}");

    let path = locator.strip_prefix("file://").unwrap();
    assert_eq!(std::fs::read(path).unwrap(), b"payload");
}

#[test]
fn temp_dir_sink_locators_are_unique() {
    let dir = tempfile::tempdir().unwrap();
    let sink = TempDirSink::in_dir(dir.path());
    let a = sink.persist(b"a", "jpeg").unwrap();
    let b = sink.persist(b"b", "jpeg").unwrap();
    assert_ne!(a, b);
}

#[test]
fn in_memory_sink_captures_artifacts() {
    let sink = InMemorySink::new();
    let locator = sink.persist(b"bytes", "jpeg").unwrap();
    assert_eq!(locator, "mem://0.jpeg");

    let artifacts = sink.artifacts();
    assert_eq!(artifacts.len(), 1);
    assert_eq!(artifacts[0].locator, locator);
    assert_eq!(artifacts[0].extension, "jpeg");
    assert_eq!(artifacts[0].bytes, b"bytes");
}
