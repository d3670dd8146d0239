// src/actions/lint.rs

//! `compile:<area>:lint`: run the linter over an area's TypeScript sources
//! and fail on violations at or above the configured severity.

use regex::Regex;
use tracing::{info, warn};

use crate::actions::ActionContext;
use crate::actions::templates::{self, Template};
use crate::errors::{ActionError, ActionResult};
use crate::exec::ToolInvocation;
use crate::fs::{FileMatcher, matching_files};
use crate::types::{Area, LintSeverity};

/// One violation parsed from the linter's `verbose` report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintViolation {
    pub severity: LintSeverity,
    pub rule: Option<String>,
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub message: String,
}

/// Parse a `verbose` formatted report:
///
/// ```text
/// ERROR: (quotemark) src/a.ts[3, 9]: " should be '
/// WARNING: src/b.ts[1, 1]: something
/// ```
///
/// Lines that don't look like a violation are ignored.
pub fn parse_lint_report(report: &str) -> Result<Vec<LintViolation>, ActionError> {
    let re = match Regex::new(r"^(ERROR|WARNING):\s+(?:\(([^)]+)\)\s+)?(.+?)\[(\d+),\s*(\d+)\]:\s*(.*)$") {
        Ok(re) => re,
        Err(err) => return Err(ActionError::Other(err.into())),
    };

    let mut violations = Vec::new();
    for line in report.lines() {
        let Some(caps) = re.captures(line.trim()) else {
            continue;
        };
        let severity = if &caps[1] == "ERROR" {
            LintSeverity::Error
        } else {
            LintSeverity::Warning
        };
        violations.push(LintViolation {
            severity,
            rule: caps.get(2).map(|m| m.as_str().to_string()),
            file: caps[3].trim().to_string(),
            line: caps[4].parse().unwrap_or(0),
            column: caps[5].parse().unwrap_or(0),
            message: caps[6].to_string(),
        });
    }
    Ok(violations)
}

pub async fn lint_area(ctx: &ActionContext, area: Area) -> ActionResult {
    let config_file = templates::ensure(ctx.work_dir(), Template::LinterConfig)?;

    let area_dir = ctx.area_dir(area);
    let matcher = FileMatcher::new(&["**/*.ts"], &["**/*.d.ts"])?;
    let files = matching_files(&area_dir, &matcher)?;
    if files.is_empty() {
        info!(area = %area, "no sources to lint");
        return Ok(());
    }

    let rel_files = files.iter().map(|f| {
        f.strip_prefix(ctx.work_dir())
            .unwrap_or(f)
            .to_string_lossy()
            .into_owned()
    });

    let output = ToolInvocation::new(&ctx.config.tools.linter, ctx.work_dir())
        .with_node_bin(ctx.work_dir())
        .arg("--config")
        .arg(config_file.to_string_lossy())
        .arg("--format")
        .arg(&ctx.config.lint.formatter)
        .args(rel_files)
        .run()
        .await?;

    let report = format!("{}\n{}", output.stdout, output.stderr);
    let violations = parse_lint_report(&report)?;
    let threshold = ctx.config.lint.severity;

    for v in violations.iter().filter(|v| v.severity < threshold) {
        warn!(file = %v.file, line = v.line, "lint: {}", v.message);
    }

    let failing: Vec<&LintViolation> = violations.iter().filter(|v| v.severity >= threshold).collect();
    if !failing.is_empty() {
        let report = failing
            .iter()
            .map(|v| format!("{}[{}, {}]: {}", v.file, v.line, v.column, v.message))
            .collect::<Vec<_>>()
            .join("\n");
        return Err(ActionError::LintViolations {
            count: failing.len(),
            severity: threshold.to_string(),
            report,
        });
    }

    // A failing exit with no parsable violation is a tool problem.
    output.into_result()?;
    Ok(())
}
