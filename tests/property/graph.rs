use proptest::prelude::*;

use super::{build_graph, project_strategy, request_strategy};

proptest! {
    #[test]
    fn graph_holds_only_requested_targets_and_their_ancestors(
        (project_type, presence) in project_strategy(),
        targets in request_strategy(),
    ) {
        let (request, graph) = build_graph(project_type, &presence, &targets);

        for node in graph.nodes() {
            let reachable = request
                .targets()
                .iter()
                .any(|r| *r == node.name || graph.depends_transitively(r, &node.name));
            prop_assert!(reachable, "{} is not needed by {:?}", node.name, request.targets());

            for dep in &node.deps {
                prop_assert!(graph.contains(dep), "{} depends on missing {}", node.name, dep);
                prop_assert!(!graph.depends_transitively(dep, &node.name), "cycle through {}", node.name);
            }
        }
    }

    #[test]
    fn dist_needs_compile_but_never_test(
        (project_type, presence) in project_strategy(),
        targets in request_strategy(),
    ) {
        let (_, graph) = build_graph(project_type, &presence, &targets);

        if graph.contains("dist") {
            prop_assert!(graph.depends_transitively("dist", "compile"));
            prop_assert!(!graph.depends_transitively("dist", "test"));
        }
    }

    #[test]
    fn clean_only_runs_when_implied(
        (project_type, presence) in project_strategy(),
        targets in request_strategy(),
    ) {
        let (request, graph) = build_graph(project_type, &presence, &targets);

        prop_assert_eq!(graph.contains("clean"), request.implies_clean());
        if request.implies_clean() && graph.contains("dist") {
            prop_assert!(graph.depends_transitively("dist", "clean"));
        }
    }

    #[test]
    fn each_bundled_app_gets_one_bundle_node(
        (project_type, presence) in project_strategy(),
    ) {
        let (_, graph) = build_graph(project_type, &presence, &["compile"]);

        for area in presence.source_areas(project_type) {
            if !area.is_bundled() {
                continue;
            }
            for app in presence.apps_of(area) {
                let name = format!("compile:{area}:{app}:webpack");
                prop_assert!(graph.contains(&name), "missing {}", name);
                prop_assert_eq!(graph.dependencies_of(&name), [format!("compile:{area}:ts")]);
            }
        }
    }
}
