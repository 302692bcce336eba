//! Directory traversal and name matching

use std::env::consts::{DLL_PREFIX, DLL_SUFFIX};

use pretty_assertions::assert_eq;
use stepscan::discovery::{NamingConvention, UnitKind};
use stepscan::{DirectoryResolver, NamePattern, ProviderResolver, RecursionPolicy};
use tempfile::TempDir;

use crate::common::manifest::{manifest, ManifestLoader};
use crate::common::write_file;

fn lib(stem: &str) -> String {
    format!("{DLL_PREFIX}{stem}{DLL_SUFFIX}")
}

fn steps_pattern() -> NamePattern {
    NamePattern::new(r".*Steps\.unit").unwrap()
}

#[test]
fn test_direct_ignores_nested_units() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "TopSteps.unit", &manifest("app::TopSteps", &["steps"], "default"));
    write_file(
        root,
        "nested/NestedSteps.unit",
        &manifest("app::nested::NestedSteps", &["steps"], "default"),
    );

    let result = DirectoryResolver::new(root)
        .pattern(steps_pattern())
        .loader(ManifestLoader::default())
        .resolve()
        .unwrap();

    assert_eq!(result.names(), vec!["app::TopSteps"]);
}

#[test]
fn test_recursive_includes_nested_units() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "TopSteps.unit", &manifest("app::TopSteps", &["steps"], "default"));
    write_file(
        root,
        "a/b/DeepSteps.unit",
        &manifest("app::a::b::DeepSteps", &["steps"], "default"),
    );

    let result = DirectoryResolver::new(root)
        .pattern(steps_pattern())
        .recursion(RecursionPolicy::Recursive)
        .loader(ManifestLoader::default())
        .resolve()
        .unwrap();

    // Entries sort by file name within each directory: "TopSteps.unit" < "a".
    assert_eq!(result.names(), vec!["app::TopSteps", "app::a::b::DeepSteps"]);
}

#[test]
fn test_pattern_never_applies_to_directory_names() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(
        root,
        "DirSteps.unit/Inner.unit",
        &manifest("app::Inner", &["steps"], "default"),
    );
    write_file(
        root,
        "plain/InnerSteps.unit",
        &manifest("app::plain::InnerSteps", &["steps"], "default"),
    );

    let loader = ManifestLoader::default();
    let result = DirectoryResolver::new(root)
        .pattern(steps_pattern())
        .recursion(RecursionPolicy::Recursive)
        .loader(&loader)
        .resolve()
        .unwrap();

    assert_eq!(result.names(), vec!["app::plain::InnerSteps"]);
    assert_eq!(loader.loaded(), vec!["InnerSteps.unit"]);
}

#[test]
fn test_default_pattern_uses_library_file_names() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, &lib("cart_steps"), &manifest("shop::CartSteps", &["steps"], "default"));
    write_file(root, &lib("cart"), &manifest("shop::Cart", &["steps"], "default"));
    write_file(root, "cart_steps.txt", &manifest("shop::Notes", &["steps"], "default"));

    let result = DirectoryResolver::new(root)
        .loader(ManifestLoader::default())
        .resolve()
        .unwrap();

    assert_eq!(result.names(), vec!["shop::CartSteps"]);
}

#[test]
fn test_runner_convention() {
    struct LoginStory;

    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(
        root,
        &lib("login_story_steps"),
        &manifest("app::LoginStorySteps", &["steps"], "default"),
    );
    write_file(
        root,
        &lib("login_story_admin_steps"),
        &manifest("app::LoginStoryAdminSteps", &["steps"], "default"),
    );
    write_file(
        root,
        &lib("checkout_story_steps"),
        &manifest("app::CheckoutStorySteps", &["steps"], "default"),
    );

    let prefixed = DirectoryResolver::new(root)
        .pattern(NamePattern::for_runner_type::<LoginStory>(
            NamingConvention::Prefixed,
            UnitKind::SharedLibrary,
        ))
        .loader(ManifestLoader::default())
        .resolve()
        .unwrap();
    assert_eq!(
        prefixed.names(),
        vec!["app::LoginStoryAdminSteps", "app::LoginStorySteps"]
    );

    let exact = DirectoryResolver::new(root)
        .pattern(NamePattern::for_runner_type::<LoginStory>(
            NamingConvention::Exact,
            UnitKind::SharedLibrary,
        ))
        .loader(ManifestLoader::default())
        .resolve()
        .unwrap();
    assert_eq!(exact.names(), vec!["app::LoginStorySteps"]);
}

#[cfg(unix)]
#[test]
fn test_symlinked_library_loads_once_but_yields_each_candidate() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write_file(root, "ASteps.unit", &manifest("app::ASteps", &["steps"], "default"));
    std::os::unix::fs::symlink(root.join("ASteps.unit"), root.join("BSteps.unit")).unwrap();

    let loader = ManifestLoader::default();
    let result = DirectoryResolver::new(root)
        .pattern(steps_pattern())
        .loader(&loader)
        .resolve()
        .unwrap();

    assert_eq!(loader.loaded(), vec!["ASteps.unit"]);
    assert_eq!(result.names(), vec!["app::ASteps", "app::ASteps"]);
}
