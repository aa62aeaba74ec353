//! Remove products from the index.

use anyhow::Result;
use dialoguer::Confirm;
use serde_json::json;

use super::DeleteArgs;
use crate::context::Context;

/// Run the delete command.
pub async fn run(args: DeleteArgs, ctx: &Context) -> Result<()> {
    let ids = args.ids;

    if !args.yes {
        let listed = ids.iter().map(|id| format!("#{}", id)).collect::<Vec<_>>().join(", ");
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Remove {} from index '{}'?",
                listed, ctx.config.engine.index
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            ctx.output.info("Delete cancelled");
            return Ok(());
        }
    }

    let service = ctx.service()?;
    let spinner = ctx.output.spinner("Deleting...");
    let result = match ids.as_slice() {
        [id] => service.delete(*id).await.map(|_| 1),
        _ => service.delete_batch(&ids).await,
    };
    spinner.finish_and_clear();
    let count = result?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "deleted": count }));
    } else {
        ctx.output.success(&format!("Deleted {} product(s)", count));
    }
    Ok(())
}
