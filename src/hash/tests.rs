//! Unit tests for build-input fingerprinting.

use std::{fs, path::Path};

use super::hash::{fingerprint, hash_files, hash_files_with_ext, hash_strings};
use crate::config::config::Config;

fn project(root: &Path) -> Config {
    fs::write(root.join("a.go"), "package a").unwrap();
    fs::write(root.join("b.txt"), "notes").unwrap();
    fs::write(root.join("Makefile"), "all:").unwrap();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub/c.go"), "package c").unwrap();

    Config::default().with_project_path(root)
}

fn stream(config: &Config, files: &[&Path], ext: Option<&str>) -> String {
    let mut sink = Vec::new();
    match ext {
        Some(ext) => hash_files_with_ext(&mut sink, files, ext, config).unwrap(),
        None => hash_files(&mut sink, files, config).unwrap(),
    }
    String::from_utf8(sink).unwrap()
}

#[test]
fn test_hash_single_file_record() {
    let dir = tempfile::tempdir().unwrap();
    let config = project(dir.path());

    let out = stream(&config, &[&dir.path().join("a.go")], None);

    assert_eq!(out, "file a.go\npackage a9 bytes\n");
}

#[test]
fn test_hash_expands_directories_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let config = project(dir.path());

    let out = stream(&config, &[dir.path()], None);

    assert_eq!(
        out,
        "file Makefile\nall:4 bytes\n\
         file a.go\npackage a9 bytes\n\
         file b.txt\nnotes5 bytes\n\
         file sub/c.go\npackage c9 bytes\n"
    );
}

#[test]
fn test_hash_with_extension_filter() {
    let dir = tempfile::tempdir().unwrap();
    let config = project(dir.path());

    let with_dot = stream(&config, &[dir.path()], Some(".go"));
    let without_dot = stream(&config, &[dir.path()], Some("go"));

    assert_eq!(with_dot, "file a.go\npackage a9 bytes\nfile sub/c.go\npackage c9 bytes\n");
    assert_eq!(with_dot, without_dot);
}

#[test]
fn test_hash_skips_relative_paths() {
    let dir = tempfile::tempdir().unwrap();
    let config = project(dir.path());

    let out = stream(&config, &[Path::new("lib:export"), Path::new("a.go")], None);

    assert_eq!(out, "");
}

#[test]
fn test_hash_skips_build_out() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir(root.join("build_out")).unwrap();
    fs::write(root.join("build_out/bin"), "binary").unwrap();
    fs::write(root.join("main.c"), "int main;").unwrap();
    let config = Config::default().with_project_path(root);

    let out = stream(&config, &[root], None);

    assert_eq!(out, "file main.c\nint main;9 bytes\n");
}

#[test]
fn test_hash_skips_relative_build_out() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir(root.join("out")).unwrap();
    fs::write(root.join("out/bin"), "binary").unwrap();
    fs::write(root.join("main.c"), "int main;").unwrap();
    let config = Config::parse("BUILD_OUT = out/")
        .unwrap()
        .with_project_path(root);

    let out = stream(&config, &[root], None);

    assert_eq!(out, "file main.c\nint main;9 bytes\n");
}

#[test]
fn test_hash_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::default().with_project_path(dir.path());
    let mut sink = Vec::new();

    let error = hash_files(&mut sink, &[dir.path().join("missing.c")], &config).unwrap_err();

    assert_eq!(error.get_error_name(), "Io");
}

#[test]
fn test_fingerprint_tracks_content() {
    let dir = tempfile::tempdir().unwrap();
    let config = project(dir.path());

    let first = fingerprint(&[dir.path()], None, &config).unwrap();
    let again = fingerprint(&[dir.path()], None, &config).unwrap();
    assert_eq!(first.len(), 64);
    assert_eq!(first, again);

    fs::write(dir.path().join("b.txt"), "changed").unwrap();
    let changed = fingerprint(&[dir.path()], None, &config).unwrap();
    assert_ne!(first, changed);

    // b.txt is not part of the .go fingerprint
    let go_only = fingerprint(&[dir.path()], Some("go"), &config).unwrap();
    fs::write(dir.path().join("b.txt"), "changed again").unwrap();
    assert_eq!(go_only, fingerprint(&[dir.path()], Some("go"), &config).unwrap());
}

#[test]
fn test_hash_strings() {
    let mut sink = Vec::new();
    hash_strings(&mut sink, &["go", "build", "-o"]).unwrap();

    assert_eq!(sink, b"gobuild-o");
}

struct ClosedSink;

impl std::io::Write for ClosedSink {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_hash_strings_reports_io_error() {
    let error = hash_strings(&mut ClosedSink, &["go"]).unwrap_err();

    assert_eq!(error.get_error_name(), "Io");
    assert_eq!(error.to_string(), "<strings>: closed");
}
