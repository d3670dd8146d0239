// tests/layout.rs

mod common;

use std::path::Path;

use common::builders::ProjectConfigBuilder;
use shapebuild::fs::mock::MockFileSystem;
use shapebuild::layout::{discover_apps, resolve};
use shapebuild::types::{Area, ProjectType};

const ROOT: &str = "/proj";

#[test]
fn generic_layout_sees_src_test_and_types() {
    let config = ProjectConfigBuilder::new(ProjectType::Generic).build();
    let fs = MockFileSystem::new();
    fs.add_file("/proj/src/index.ts");
    fs.add_dir("/proj/test");
    fs.add_dir("/proj/types");

    let presence = resolve(&config, Path::new(ROOT), &fs);

    assert_eq!(presence.areas().collect::<Vec<_>>(), vec![Area::Src, Area::Test, Area::Types]);
    assert!(!presence.dist_exists());
    assert!(!presence.package_exists());
}

#[test]
fn missing_directories_are_not_an_error() {
    let config = ProjectConfigBuilder::new(ProjectType::DesktopShell).build();
    let fs = MockFileSystem::new();

    let presence = resolve(&config, Path::new(ROOT), &fs);

    assert_eq!(presence.areas().count(), 0);
    assert!(!presence.has_source(ProjectType::DesktopShell));
}

#[test]
fn areas_of_other_project_types_are_ignored() {
    let config = ProjectConfigBuilder::new(ProjectType::Generic).build();
    let fs = MockFileSystem::new();
    fs.add_dir("/proj/src.render/app.one");

    let presence = resolve(&config, Path::new(ROOT), &fs);

    assert!(!presence.has(Area::SrcRender));
    assert!(presence.apps_of(Area::SrcRender).is_empty());
}

#[test]
fn desktop_shell_discovers_bundled_apps() {
    let config = ProjectConfigBuilder::new(ProjectType::DesktopShell).build();
    let fs = MockFileSystem::new();
    fs.add_dir("/proj/src.main");
    fs.add_dir("/proj/src.render/app.two");
    fs.add_dir("/proj/src.render/app.one");
    fs.add_dir("/proj/src.render/shared");
    fs.add_file("/proj/src.render/app.readme");
    fs.add_dir("/proj/.dist");
    fs.add_dir("/proj/.package");

    let presence = resolve(&config, Path::new(ROOT), &fs);

    assert!(presence.has(Area::SrcMain));
    assert!(presence.has(Area::SrcRender));
    assert_eq!(presence.apps_of(Area::SrcRender), ["app.one", "app.two"]);
    assert!(presence.apps_of(Area::SrcMain).is_empty());
    assert!(presence.dist_exists());
    assert!(presence.package_exists());
}

#[test]
fn configured_paths_are_probed() {
    let config = ProjectConfigBuilder::new(ProjectType::WebClientServer)
        .path("src_client", "web/client")
        .path("src_server", "web/server")
        .build();
    let fs = MockFileSystem::new();
    fs.add_dir("/proj/web/client/app.web");
    fs.add_dir("/proj/src.server");

    let presence = resolve(&config, Path::new(ROOT), &fs);

    assert!(presence.has(Area::SrcClient));
    assert!(!presence.has(Area::SrcServer));
    assert_eq!(presence.apps_of(Area::SrcClient), ["app.web"]);
    assert_eq!(presence.source_areas(ProjectType::WebClientServer), vec![Area::SrcClient]);
}

#[test]
fn discover_apps_on_missing_dir_is_empty() {
    let fs = MockFileSystem::new();
    assert!(discover_apps(&fs, Path::new("/nowhere")).is_empty());
}
