// src/actions/publish.rs

use tracing::info;

use crate::actions::ActionContext;
use crate::errors::ActionResult;
use crate::exec::ToolInvocation;

/// Publish the dist directory with the package manager.
pub async fn publish(ctx: &ActionContext) -> ActionResult {
    let output = ToolInvocation::new(&ctx.config.tools.package_manager, ctx.dist_dir())
        .with_node_bin(ctx.work_dir())
        .arg("publish")
        .run()
        .await?
        .into_result()?;
    info!("published: {}", output.stdout.trim());
    Ok(())
}
