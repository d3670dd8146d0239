// tests/actions_parsing.rs

mod common;

use std::error::Error;

use serde_json::json;
use shapebuild::actions::bundle::{OverrideKeys, first_bundler_error, override_keys};
use shapebuild::actions::dist::parse_properties;
use shapebuild::actions::lint::parse_lint_report;
use shapebuild::actions::package::archive_names;
use shapebuild::actions::provenance::{archive_package_name, archive_version};
use shapebuild::types::LintSeverity;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn lint_report_lines_are_parsed() -> TestResult {
    let report = "\
ERROR: (quotemark) src/a.ts[3, 9]: \" should be '
WARNING: src/lib/b.ts[12, 1]: Missing semicolon
some unrelated banner line
";
    let violations = parse_lint_report(report)?;

    assert_eq!(violations.len(), 2);
    let first = &violations[0];
    assert_eq!(first.severity, LintSeverity::Error);
    assert_eq!(first.rule.as_deref(), Some("quotemark"));
    assert_eq!(first.file, "src/a.ts");
    assert_eq!((first.line, first.column), (3, 9));
    assert_eq!(first.message, "\" should be '");

    let second = &violations[1];
    assert_eq!(second.severity, LintSeverity::Warning);
    assert_eq!(second.rule, None);
    assert_eq!(second.file, "src/lib/b.ts");
    assert_eq!(second.line, 12);
    Ok(())
}

#[test]
fn clean_lint_report_has_no_violations() -> TestResult {
    assert!(parse_lint_report("")?.is_empty());
    assert!(parse_lint_report("Done in 2s\n")?.is_empty());
    Ok(())
}

#[test]
fn warnings_sort_below_errors() {
    assert!(LintSeverity::Warning < LintSeverity::Error);
}

#[test]
fn override_keys_detect_top_level_settings() -> TestResult {
    let both = r#"
module.exports = {
    entry: './src.render/app.one/main.js',
    "output": { filename: 'one.js' },
};
"#;
    assert_eq!(override_keys(both)?, OverrideKeys { entry: true, output: true });

    let neither = "module.exports = { devtool: false };\n";
    assert_eq!(override_keys(neither)?, OverrideKeys::default());

    let entry_only = "module.exports = {\n  'entry': './x.js'\n};\n";
    assert_eq!(override_keys(entry_only)?, OverrideKeys { entry: true, output: false });
    Ok(())
}

#[test]
fn first_bundler_error_takes_following_line() {
    let output = "\
Hash: 1234
WARNING in ./src.render/app.one/index.js
size limit exceeded
ERROR in ./src.render/app.one/index.js

Module not found: Error: Can't resolve './missing'
ERROR in ./other.js
";
    assert_eq!(
        first_bundler_error(output).as_deref(),
        Some("ERROR in ./src.render/app.one/index.js Module not found: Error: Can't resolve './missing'")
    );
    assert_eq!(first_bundler_error("all good\n"), None);
}

#[test]
fn properties_parse_both_separators_and_skip_comments() {
    let props = parse_properties(
        "# header\n! also a comment\nversion.major=2\nversion.minor : 7\n\nname = demo app\n",
    );

    assert_eq!(props.get("version.major").map(String::as_str), Some("2"));
    assert_eq!(props.get("version.minor").map(String::as_str), Some("7"));
    assert_eq!(props.get("name").map(String::as_str), Some("demo app"));
    assert_eq!(props.len(), 3);
}

#[test]
fn archive_version_per_provenance() {
    let jenkins = json!({
        "version": "1.2.3",
        "build": { "system": "jenkins", "id": 57 },
        "subversion": { "revision": 1024 },
    });
    assert_eq!(archive_version(&jenkins), "1.2.3-r1024-b57");

    let gitlab_branch = json!({
        "version": "1.2.3",
        "build": { "system": "gitlab", "id": 99, "branch": "feature-x", "commit": "0123456789abcdef" },
    });
    assert_eq!(archive_version(&gitlab_branch), "1.2.3-b99-feature-x-01234567");

    let gitlab_tag = json!({
        "version": "1.2.3",
        "build": { "system": "gitlab", "id": 99, "isTag": true, "commit": "0123456789abcdef" },
    });
    assert_eq!(archive_version(&gitlab_tag), "1.2.3");

    assert_eq!(archive_version(&json!({ "version": "0.1.0-dev20261016120000" })), "0.1.0-dev20261016120000");
}

#[test]
fn archive_names_strip_scope() -> TestResult {
    assert_eq!(archive_package_name(&json!({ "name": "@acme/tool" })).as_deref(), Some("acme-tool"));
    assert_eq!(archive_package_name(&json!({ "name": "plain" })).as_deref(), Some("plain"));
    assert_eq!(archive_package_name(&json!({})), None);

    let (dist, config) = archive_names(&json!({ "name": "@acme/tool", "version": "3.0.0" }))?;
    assert_eq!(dist, "acme-tool-3.0.0.tar.gz");
    assert_eq!(config, "acme-tool-3.0.0-config.tar.gz");

    assert!(archive_names(&json!({ "version": "3.0.0" })).is_err());
    Ok(())
}
