//! Similar-product recommendations.

use anyhow::Result;

use super::search::page_request;
use super::RecommendArgs;
use crate::context::Context;

/// Run the recommend command.
pub async fn run(args: RecommendArgs, ctx: &Context) -> Result<()> {
    let service = ctx.service()?;
    let page = page_request(args.page, ctx);

    if args.show_query {
        let query = service.recommendation_query(args.id, page).await?;
        ctx.output.json(&query);
        return Ok(());
    }

    let spinner = ctx.output.spinner(&format!("Finding products like #{}...", args.id));
    let result = service.recommend(args.id, page).await;
    spinner.finish_and_clear();

    let page = result?;
    if !ctx.output.is_json() {
        ctx.output.info(&format!("Recommendations for product #{}", args.id));
    }
    ctx.output.page(&page);
    Ok(())
}

