//! Index a single product.

use anyhow::Result;

use super::CreateArgs;
use crate::context::Context;
use crate::output::product_line;

/// Run the create command.
pub async fn run(args: CreateArgs, ctx: &Context) -> Result<()> {
    let service = ctx.service()?;

    let spinner = ctx.output.spinner(&format!("Indexing product #{}...", args.id));
    let result = service.create(args.id).await;
    spinner.finish_and_clear();
    let product = result?;

    if ctx.output.is_json() {
        ctx.output.json(&product);
    } else {
        ctx.output.success(&format!("Indexed {}", product_line(&product)));
    }
    Ok(())
}
