// src/actions/bundle.rs

//! `compile:<area>:<app>:webpack`: bundle one sub-application.

use std::fs;

use regex::Regex;
use tracing::{info, warn};

use crate::actions::ActionContext;
use crate::actions::templates::{self, Template};
use crate::errors::{ActionError, ActionResult};
use crate::exec::ToolInvocation;
use crate::types::Area;

/// Which bundler settings an app's override file provides itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverrideKeys {
    pub entry: bool,
    pub output: bool,
}

/// Detect top-level `entry:` / `output:` keys in an override file.
pub fn override_keys(source: &str) -> Result<OverrideKeys, ActionError> {
    let key = |name: &str| -> Result<bool, ActionError> {
        let re = Regex::new(&format!(r#"(?m)^\s*["']?{name}["']?\s*:"#)).map_err(|e| ActionError::Other(e.into()))?;
        Ok(re.is_match(source))
    };
    Ok(OverrideKeys {
        entry: key("entry")?,
        output: key("output")?,
    })
}

/// First error the bundler printed, with the line that follows it.
pub fn first_bundler_error(output: &str) -> Option<String> {
    let mut lines = output.lines();
    while let Some(line) = lines.next() {
        if line.trim_start().starts_with("ERROR in") {
            let next = lines.find(|l| !l.trim().is_empty()).unwrap_or("");
            return Some(format!("{} {}", line.trim(), next.trim()).trim_end().to_string());
        }
    }
    None
}

pub async fn bundle_app(ctx: &ActionContext, area: Area, app: &str) -> ActionResult {
    let base = templates::ensure(ctx.work_dir(), Template::BundlerConfig(ctx.config.project_type))?;

    let area_path = ctx.config.area_path(area);
    let override_file = ctx.area_dir(area).join(format!("{app}-webpack.js"));
    let source = fs::read_to_string(&override_file).map_err(|err| ActionError::Bundle {
        app: app.to_string(),
        message: format!("could not load {}: {err}", override_file.display()),
    })?;
    let keys = override_keys(&source)?;

    let mode = ctx.build_mode();
    let mut tool = ToolInvocation::new(&ctx.config.tools.bundler, ctx.work_dir())
        .with_node_bin(ctx.work_dir())
        .arg("--config")
        .arg(base.to_string_lossy())
        .arg("--config")
        .arg(override_file.to_string_lossy())
        .arg("--merge")
        .arg("--mode")
        .arg(mode.as_str())
        .arg(if mode.is_production() {
            "--optimization-minimize"
        } else {
            "--no-optimization-minimize"
        });

    let app_dir = format!("./{area_path}/{app}");
    if !keys.entry {
        tool = tool.arg("--entry").arg(format!("{app_dir}/index.js"));
    }
    if !keys.output {
        tool = tool
            .arg("--output-path")
            .arg(app_dir.clone())
            .arg("--output-filename")
            .arg(format!("{app}.js"));
    }

    info!(area = %area, app = %app, "bundling");
    let output = tool.run().await?;
    let combined = format!("{}\n{}", output.stdout, output.stderr);

    for line in combined.lines().filter(|l| l.trim_start().starts_with("WARNING in")) {
        warn!(app = %app, "bundler: {}", line.trim());
    }

    if let Some(message) = first_bundler_error(&combined) {
        return Err(ActionError::Bundle {
            app: app.to_string(),
            message,
        });
    }

    output.into_result()?;
    Ok(())
}
