use gc_fs::{Error, NormalizedPath, io, load_config};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_config_reads_existing_file() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("router1.cfg");
    fs::write(&file_path, "hostname router1\n").unwrap();

    let text = load_config(&NormalizedPath::new(&file_path)).unwrap();
    assert_eq!(text, "hostname router1\n");
}

#[test]
fn test_load_config_missing_file_is_file_not_found() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("ams").join("router1.cfg"));

    let err = load_config(&path).unwrap_err();
    match err {
        Error::FileNotFound { path: missing } => {
            assert!(missing.to_string_lossy().ends_with("ams/router1.cfg"));
        }
        other => panic!("expected FileNotFound, got {other:?}"),
    }
}

#[test]
fn test_load_config_directory_is_file_not_found() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path());

    assert!(matches!(load_config(&path), Err(Error::FileNotFound { .. })));
}

#[test]
fn test_write_atomic_creates_parents() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("a").join("b").join("record.json"));

    io::write_atomic(&path, b"{}").unwrap();

    assert_eq!(fs::read_to_string(path.to_native()).unwrap(), "{}");
}

#[test]
fn test_write_text_overwrites_and_leaves_no_temp_files() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("record.json");
    fs::write(&file_path, "original").unwrap();

    let path = NormalizedPath::new(&file_path);
    io::write_text(&path, "updated").unwrap();

    assert_eq!(fs::read_to_string(&file_path).unwrap(), "updated");
    let leftovers: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty());
}
