// src/catalog/rules.rs

//! The rule table: project type x layout presence -> targets and edges.

use crate::catalog::target::{Action, Rule, TargetId};
use crate::layout::LayoutPresence;
use crate::types::{Area, ProjectType};

/// Produce the full, ordered rule set for a project.
///
/// `clean_implied` comes from the run request (see
/// [`RunRequest::implies_clean`](crate::catalog::RunRequest::implies_clean)).
/// When it is set, `dist` depends on `clean` and every area's lint step
/// waits for that area's clean step. `dist` never depends on `test`.
pub fn rules_for(
    project_type: ProjectType,
    presence: &LayoutPresence,
    clean_implied: bool,
) -> Vec<Rule> {
    let sources = presence.source_areas(project_type);
    let has_test = presence.has(Area::Test);
    let mut rules = Vec::new();

    // clean
    {
        let mut deps: Vec<TargetId> = sources.iter().map(|a| TargetId::CleanArea(*a)).collect();
        if has_test {
            deps.push(TargetId::CleanArea(Area::Test));
        }
        deps.push(TargetId::CleanDist);
        rules.push(Rule::aggregate(TargetId::Clean, deps));

        for area in sources.iter().copied() {
            rules.push(Rule::leaf(
                TargetId::CleanArea(area),
                vec![],
                Action::CleanArea(area),
            ));
        }
        if has_test {
            rules.push(Rule::leaf(
                TargetId::CleanArea(Area::Test),
                vec![],
                Action::CleanArea(Area::Test),
            ));
        }
        rules.push(Rule::leaf(TargetId::CleanDist, vec![], Action::CleanDist));
    }

    // compile:<area> for every present source area
    for area in sources.iter().copied() {
        push_area_compile(&mut rules, area, presence, clean_implied, &[]);
    }

    // compile:test, which also needs every source area compiled first
    if has_test {
        let src_ts: Vec<TargetId> = sources.iter().map(|a| TargetId::Ts(*a)).collect();
        push_area_compile(&mut rules, Area::Test, presence, clean_implied, &src_ts);
    }

    // group aliases for two-area project types
    if project_type != ProjectType::Generic && !sources.is_empty() {
        rules.push(Rule::aggregate(
            TargetId::SrcGroup,
            sources.iter().map(|a| TargetId::CompileArea(*a)).collect(),
        ));
        rules.push(Rule::aggregate(
            TargetId::SrcLintGroup,
            sources.iter().map(|a| TargetId::Lint(*a)).collect(),
        ));
        let mut ts_deps = Vec::new();
        for area in sources.iter().copied() {
            ts_deps.push(TargetId::Ts(area));
            if area.is_bundled() {
                ts_deps.push(TargetId::Webpack(area));
            }
        }
        rules.push(Rule::aggregate(TargetId::SrcTsGroup, ts_deps));
    }

    // compile
    {
        let mut deps: Vec<TargetId> = sources.iter().map(|a| TargetId::CompileArea(*a)).collect();
        if has_test {
            deps.push(TargetId::CompileArea(Area::Test));
        }
        rules.push(Rule::aggregate(TargetId::Compile, deps));
    }

    // test: present even without a test area; the action then succeeds
    // trivially.
    {
        let deps = if has_test {
            vec![TargetId::CompileArea(Area::Test)]
        } else {
            vec![]
        };
        rules.push(Rule::leaf(TargetId::Test, deps, Action::RunTests));
    }

    // dist
    {
        let mut deps = Vec::new();
        if clean_implied {
            deps.push(TargetId::Clean);
        }
        deps.push(TargetId::Compile);
        rules.push(Rule::leaf(TargetId::Dist, deps, Action::Dist));
    }

    // package
    rules.push(Rule::leaf(
        TargetId::PackageInstall,
        vec![TargetId::Dist],
        Action::PackageInstall,
    ));
    rules.push(Rule::leaf(
        TargetId::PackageArchive,
        vec![TargetId::Dist, TargetId::PackageInstall],
        Action::PackageArchive,
    ));
    rules.push(Rule::aggregate(
        TargetId::Package,
        vec![TargetId::PackageInstall, TargetId::PackageArchive],
    ));

    rules.push(Rule::leaf(
        TargetId::Publish,
        vec![TargetId::Dist],
        Action::Publish,
    ));

    rules.push(Rule::aggregate(TargetId::Default, vec![TargetId::Dist]));

    rules
}

/// Push `compile:<area>`, its lint and compile steps and, for bundled areas,
/// one bundle step per sub-application plus their aggregator.
fn push_area_compile(
    rules: &mut Vec<Rule>,
    area: Area,
    presence: &LayoutPresence,
    clean_implied: bool,
    extra_ts_deps: &[TargetId],
) {
    let lint_deps = if clean_implied {
        vec![TargetId::CleanArea(area)]
    } else {
        vec![]
    };
    rules.push(Rule::leaf(TargetId::Lint(area), lint_deps, Action::Lint(area)));

    let mut ts_deps = vec![TargetId::Lint(area)];
    ts_deps.extend_from_slice(extra_ts_deps);
    rules.push(Rule::leaf(TargetId::Ts(area), ts_deps, Action::Compile(area)));

    let mut area_deps = vec![TargetId::Lint(area), TargetId::Ts(area)];

    if area.is_bundled() {
        let mut app_ids = Vec::new();
        for app in presence.apps_of(area) {
            let id = TargetId::WebpackApp(area, app.clone());
            rules.push(Rule::leaf(
                id.clone(),
                vec![TargetId::Ts(area)],
                Action::Bundle {
                    area,
                    app: app.clone(),
                },
            ));
            app_ids.push(id);
        }
        rules.push(Rule::aggregate(TargetId::Webpack(area), app_ids));
        area_deps.push(TargetId::Webpack(area));
    }

    rules.push(Rule::aggregate(TargetId::CompileArea(area), area_deps));
}
