//! Failure isolation: per-candidate failures are logged once and skipped

use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};

use stepscan::error::ResolutionError;
use stepscan::{DirectoryResolver, NamePattern, ProviderResolver};
use tempfile::TempDir;

use crate::common::logs::capture;
use crate::common::manifest::{manifest, ManifestLoader};
use crate::common::write_file;

fn resolver(root: &std::path::Path) -> DirectoryResolver<ManifestLoader> {
    DirectoryResolver::new(root)
        .pattern(NamePattern::new(r".*Steps\.unit").unwrap())
        .loader(ManifestLoader::default())
}

#[test]
fn test_unmarked_unit_is_skipped_silently() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "HelperSteps.unit", &manifest("app::HelperSteps", &[], "default"));
    write_file(root, "OtherSteps.unit", &manifest("app::OtherSteps", &["fixtures"], "none"));

    let (result, logs) = capture(|| resolver(root).resolve().unwrap());

    assert!(result.is_empty());
    assert!(logs.warnings_and_errors().is_empty(), "{:?}", logs.entries());
}

#[test]
fn test_load_failure_is_logged_once_and_pass_continues() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "ABrokenSteps.unit", "\u{7f}ELF but not really");
    write_file(root, "BGoodSteps.unit", &manifest("app::BGoodSteps", &["steps"], "default"));

    let (result, logs) = capture(|| resolver(root).resolve().unwrap());

    assert_eq!(result.names(), vec!["app::BGoodSteps"]);
    let errors = logs.errors();
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert_eq!(errors[0].message, "failed to load unit");
    assert!(errors[0]
        .field("candidate")
        .is_some_and(|c| c.ends_with("ABrokenSteps.unit")));
}

#[test]
fn test_missing_constructor_is_logged_once() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "NoCtorSteps.unit", &manifest("app::NoCtorSteps", &["steps"], "none"));

    let (result, logs) = capture(|| resolver(root).resolve().unwrap());

    assert!(result.is_empty());
    let errors = logs.errors();
    assert_eq!(errors.len(), 1, "{errors:?}");
    assert_eq!(errors[0].message, "failed to instantiate step provider");
    assert_eq!(errors[0].field("name"), Some("app::NoCtorSteps"));
    assert!(errors[0]
        .field("error")
        .is_some_and(|e| e.contains("no zero-argument constructor")));
}

#[test]
fn test_failing_and_panicking_constructors_are_isolated() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "AFailSteps.unit", &manifest("app::AFailSteps", &["steps"], "failing"));
    write_file(root, "BPanicSteps.unit", &manifest("app::BPanicSteps", &["steps"], "panicking"));
    write_file(root, "COkSteps.unit", &manifest("app::COkSteps", &["steps"], "default"));

    let (result, logs) = capture(|| resolver(root).resolve().unwrap());

    assert_eq!(result.names(), vec!["app::COkSteps"]);
    let failed: Vec<_> = logs
        .errors()
        .iter()
        .filter_map(|e| e.field("name").map(str::to_string))
        .collect();
    assert_eq!(failed, vec!["app::AFailSteps", "app::BPanicSteps"]);
}

#[test]
fn test_real_library_loader_reports_corrupt_file() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, &format!("{DLL_PREFIX}corrupt_steps{DLL_SUFFIX}"), "not a library");

    let (result, logs) = capture(|| DirectoryResolver::new(root).resolve().unwrap());

    assert!(result.is_empty());
    assert_eq!(logs.errors().len(), 1);
}

#[test]
fn test_missing_root_is_fatal() {
    let err = resolver(std::path::Path::new("/nonexistent/compiled/steps"))
        .resolve()
        .unwrap_err();
    assert!(matches!(err, ResolutionError::RootNotFound { .. }));
}

#[test]
fn test_file_root_is_fatal() {
    let temp_dir = TempDir::new().unwrap();
    write_file(temp_dir.path(), "FooSteps.unit", "");

    let err = resolver(&temp_dir.path().join("FooSteps.unit"))
        .resolve()
        .unwrap_err();
    assert!(matches!(err, ResolutionError::RootNotDirectory { .. }));
}
