//! Unit tests for config resolution.

use std::{collections::HashMap, fs, path::PathBuf};

use super::config::{find_project_root, Config, DEFAULT_SECTION};

const SAMPLE: &str = "
; comment
CC = gcc
BUILD_OUT = /tmp/out

[linux]
CC = clang-linux

[macos]
CC = clang-macos

[windows]
CC = cl
";

fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_parse_sections() {
    let config = Config::parse(SAMPLE).unwrap();

    assert_eq!(config.section_value(DEFAULT_SECTION, "CC"), Some("gcc"));
    assert_eq!(config.section_value("linux", "CC"), Some("clang-linux"));
    assert_eq!(config.section_value("windows", "CC"), Some("cl"));
    assert_eq!(config.section_value("linux", "BUILD_OUT"), None);
}

#[test]
fn test_environment_takes_precedence() {
    let config = Config::parse(SAMPLE).unwrap();

    assert_eq!(
        config.lookup("CC", env_of(&[("CC", "tcc")])),
        Some("tcc".to_string())
    );
}

#[test]
fn test_os_section_before_default() {
    let config = Config::parse(SAMPLE).unwrap();
    let expected = match std::env::consts::OS {
        "linux" => "clang-linux",
        "macos" => "clang-macos",
        "windows" => "cl",
        _ => "gcc",
    };

    assert_eq!(config.lookup("CC", env_of(&[])), Some(expected.to_string()));
}

#[test]
fn test_empty_environment_value_falls_through() {
    let config = Config::parse("GOPATH = /go").unwrap();

    assert_eq!(
        config.lookup("GOPATH", env_of(&[("GOPATH", "")])),
        Some("/go".to_string())
    );
}

#[test]
fn test_missing_everywhere() {
    let config = Config::parse(SAMPLE).unwrap();

    assert_eq!(config.lookup("NOPE", env_of(&[])), None);
}

#[test]
fn test_malformed_line() {
    let error = Config::parse("A = 1\n[linux\n").unwrap_err();

    assert_eq!(error.get_error_name(), "MalformedConfig");
    assert_eq!(error.get_position().line, 2);
}

#[test]
fn test_build_out() {
    let config = Config::parse("").unwrap().with_project_path("/work/project");
    assert_eq!(
        config.build_out_with(env_of(&[])),
        PathBuf::from("/work/project/build_out")
    );
    assert_eq!(
        config.build_out_with(env_of(&[("BUILD_OUT", "/elsewhere")])),
        PathBuf::from("/elsewhere")
    );

    let config = Config::parse(SAMPLE).unwrap();
    assert_eq!(config.build_out_with(env_of(&[])), PathBuf::from("/tmp/out"));
}

#[test]
fn test_relative_build_out_is_inside_project() {
    let config = Config::parse("").unwrap().with_project_path("/work/project");

    assert_eq!(
        config.build_out_with(env_of(&[("BUILD_OUT", "out/")])),
        PathBuf::from("/work/project/out")
    );
}

#[test]
fn test_rel_path() {
    let config = Config::default().with_project_path("/work/project");

    assert_eq!(
        config.rel_path("/work/project/src/BUILD"),
        Some(PathBuf::from("src/BUILD"))
    );
    assert_eq!(config.rel_path("/other/BUILD"), None);
}

#[test]
fn test_load_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load(dir.path()).unwrap();

    assert_eq!(config.project_path(), dir.path());
    assert_eq!(config.lookup("CC", env_of(&[])), None);
}

#[test]
fn test_discover_uses_git_root() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::create_dir(root.join(".git")).unwrap();
    fs::create_dir_all(root.join("src/lib")).unwrap();
    fs::write(root.join(".build"), "CC = gcc\n").unwrap();

    assert_eq!(
        find_project_root(&root.join("src/lib")),
        Some(root.to_path_buf())
    );

    let config = Config::discover(root.join("src/lib")).unwrap();
    assert_eq!(config.project_path(), root);
    assert_eq!(config.lookup("CC", env_of(&[])), Some("gcc".to_string()));
}
