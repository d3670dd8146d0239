// tests/catalog_rules.rs

mod common;

use shapebuild::catalog::{Action, Rule, RunRequest, TargetId, rules_for};
use shapebuild::layout::LayoutPresence;
use shapebuild::types::{Area, ProjectType};

fn rule<'a>(rules: &'a [Rule], name: &str) -> &'a Rule {
    rules
        .iter()
        .find(|r| r.name() == name)
        .unwrap_or_else(|| panic!("no rule named {name}"))
}

fn dep_names(rule: &Rule) -> Vec<String> {
    rule.depends_on.iter().map(|d| d.name()).collect()
}

#[test]
fn target_names_render_from_typed_ids() {
    assert_eq!(TargetId::Lint(Area::SrcMain).name(), "compile:src:main:lint");
    assert_eq!(TargetId::Ts(Area::Test).name(), "compile:test:ts");
    assert_eq!(
        TargetId::WebpackApp(Area::SrcRender, "app.one".into()).name(),
        "compile:src:render:app.one:webpack"
    );
    assert_eq!(TargetId::Webpack(Area::SrcClient).name(), "compile:src:client:webpack");
    assert_eq!(TargetId::CleanArea(Area::Src).name(), "clean:src");
    assert_eq!(TargetId::PackageArchive.name(), "package:archive");
}

#[test]
fn clean_aggregates_present_areas_and_always_dist() {
    let presence = LayoutPresence::from_areas([Area::Src, Area::Test, Area::Types]);
    let rules = rules_for(ProjectType::Generic, &presence, false);

    assert_eq!(dep_names(rule(&rules, "clean")), vec!["clean:src", "clean:test", "clean:dist"]);
    assert!(rules.iter().all(|r| r.name() != "clean:types"));

    let empty = rules_for(ProjectType::Generic, &LayoutPresence::default(), false);
    assert_eq!(dep_names(rule(&empty, "clean")), vec!["clean:dist"]);
}

#[test]
fn compile_area_runs_lint_then_ts() {
    let presence = LayoutPresence::from_areas([Area::Src]);
    let rules = rules_for(ProjectType::Generic, &presence, false);

    assert_eq!(dep_names(rule(&rules, "compile:src")), vec!["compile:src:lint", "compile:src:ts"]);
    assert_eq!(dep_names(rule(&rules, "compile:src:ts")), vec!["compile:src:lint"]);
    assert!(dep_names(rule(&rules, "compile:src:lint")).is_empty());
    assert_eq!(rule(&rules, "compile:src:ts").action, Some(Action::Compile(Area::Src)));
    assert_eq!(rule(&rules, "compile:src").action, None);
}

#[test]
fn lint_waits_for_clean_only_when_clean_is_implied() {
    let presence = LayoutPresence::from_areas([Area::Src, Area::Test]);

    let implied = rules_for(ProjectType::Generic, &presence, true);
    assert_eq!(dep_names(rule(&implied, "compile:src:lint")), vec!["clean:src"]);
    assert_eq!(dep_names(rule(&implied, "compile:test:lint")), vec!["clean:test"]);
    assert_eq!(dep_names(rule(&implied, "dist")), vec!["clean", "compile"]);

    let plain = rules_for(ProjectType::Generic, &presence, false);
    assert!(dep_names(rule(&plain, "compile:src:lint")).is_empty());
    assert_eq!(dep_names(rule(&plain, "dist")), vec!["compile"]);
}

#[test]
fn dist_never_depends_on_test() {
    for project_type in ProjectType::ALL {
        let presence = LayoutPresence::from_areas(Area::ALL);
        for clean in [false, true] {
            let rules = rules_for(project_type, &presence, clean);
            assert!(!dep_names(rule(&rules, "dist")).contains(&"test".to_string()));
        }
    }
}

#[test]
fn test_compile_follows_source_compile() {
    let presence = LayoutPresence::from_areas([Area::SrcMain, Area::SrcRender, Area::Test]);
    let rules = rules_for(ProjectType::DesktopShell, &presence, false);

    assert_eq!(
        dep_names(rule(&rules, "compile:test:ts")),
        vec!["compile:test:lint", "compile:src:main:ts", "compile:src:render:ts"]
    );
    assert_eq!(dep_names(rule(&rules, "test")), vec!["compile:test"]);
    assert_eq!(
        dep_names(rule(&rules, "compile")),
        vec!["compile:src:main", "compile:src:render", "compile:test"]
    );
}

#[test]
fn test_target_exists_without_test_area() {
    let rules = rules_for(ProjectType::Generic, &LayoutPresence::default(), false);
    let test = rule(&rules, "test");
    assert!(test.depends_on.is_empty());
    assert_eq!(test.action, Some(Action::RunTests));
}

#[test]
fn bundled_area_fans_out_per_app() {
    let presence = LayoutPresence::from_areas([Area::SrcMain, Area::SrcRender])
        .with_apps(Area::SrcRender, vec!["app.one".into(), "app.two".into()]);
    let rules = rules_for(ProjectType::DesktopShell, &presence, false);

    assert_eq!(
        dep_names(rule(&rules, "compile:src:render:webpack")),
        vec!["compile:src:render:app.one:webpack", "compile:src:render:app.two:webpack"]
    );
    for app in ["app.one", "app.two"] {
        let r = rule(&rules, &format!("compile:src:render:{app}:webpack"));
        assert_eq!(dep_names(r), vec!["compile:src:render:ts"]);
        assert_eq!(
            r.action,
            Some(Action::Bundle {
                area: Area::SrcRender,
                app: app.to_string()
            })
        );
    }
    assert_eq!(
        dep_names(rule(&rules, "compile:src:render")),
        vec!["compile:src:render:lint", "compile:src:render:ts", "compile:src:render:webpack"]
    );
    // The main process area is not bundled.
    assert!(rules.iter().all(|r| r.name() != "compile:src:main:webpack"));
}

#[test]
fn two_area_types_get_group_targets() {
    let presence = LayoutPresence::from_areas([Area::SrcClient, Area::SrcServer]);
    let rules = rules_for(ProjectType::WebClientServer, &presence, false);

    assert_eq!(dep_names(rule(&rules, "compile:src")), vec!["compile:src:client", "compile:src:server"]);
    assert_eq!(
        dep_names(rule(&rules, "compile:src:lint")),
        vec!["compile:src:client:lint", "compile:src:server:lint"]
    );
    assert_eq!(
        dep_names(rule(&rules, "compile:src:ts")),
        vec!["compile:src:client:ts", "compile:src:client:webpack", "compile:src:server:ts"]
    );
}

#[test]
fn absent_area_of_two_area_type_gets_no_targets() {
    let presence = LayoutPresence::from_areas([Area::SrcServer]);
    let rules = rules_for(ProjectType::WebClientServer, &presence, false);

    assert!(rules.iter().all(|r| !r.name().contains("client")));
    assert_eq!(dep_names(rule(&rules, "compile")), vec!["compile:src:server"]);
}

#[test]
fn package_publish_and_default_hang_off_dist() {
    let rules = rules_for(ProjectType::Generic, &LayoutPresence::default(), false);

    assert_eq!(dep_names(rule(&rules, "package")), vec!["package:install", "package:archive"]);
    assert_eq!(dep_names(rule(&rules, "package:install")), vec!["dist"]);
    assert_eq!(dep_names(rule(&rules, "package:archive")), vec!["dist", "package:install"]);
    assert_eq!(dep_names(rule(&rules, "publish")), vec!["dist"]);
    assert_eq!(dep_names(rule(&rules, "default")), vec!["dist"]);
}

#[test]
fn run_request_defaults_and_clean_implication() {
    let empty = RunRequest::new(vec![]);
    assert_eq!(empty.targets(), ["default".to_string()]);
    assert!(empty.implies_clean());

    let dist: RunRequest = ["dist"].into_iter().collect();
    assert!(!dist.implies_clean());

    let publish: RunRequest = ["test", "publish"].into_iter().collect();
    assert!(publish.implies_clean());
}
