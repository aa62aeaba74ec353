//! Bulk import of the whole catalogue.

use anyhow::Result;
use serde_json::json;

use super::ImportArgs;
use crate::context::Context;

/// Run the import command.
pub async fn run(_args: ImportArgs, ctx: &Context) -> Result<()> {
    let service = ctx.service()?;

    let spinner = ctx.output.spinner("Importing products...");
    let result = service.import_all().await;
    spinner.finish_and_clear();
    let count = result?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "imported": count }));
    } else if count == 0 {
        ctx.output.warn("Product source is empty; nothing imported");
    } else {
        ctx.output.success(&format!(
            "Imported {} product(s) into '{}'",
            count, ctx.config.engine.index
        ));
    }
    Ok(())
}
