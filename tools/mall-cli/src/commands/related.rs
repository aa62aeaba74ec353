//! Brand, category and attribute suggestions.

use anyhow::Result;
use mall_search::search::build_related_facets;

use super::RelatedArgs;
use crate::context::Context;

/// Run the related command.
pub async fn run(args: RelatedArgs, ctx: &Context) -> Result<()> {
    if args.show_query {
        ctx.output.json(&build_related_facets(&args.keyword));
        return Ok(());
    }

    let service = ctx.service()?;
    let spinner = ctx.output.spinner("Collecting related filters...");
    let result = service.search_related(&args.keyword).await;
    spinner.finish_and_clear();

    let related = result?;
    if related.is_empty() && !ctx.output.is_json() {
        ctx.output.info("No related brands, categories or attributes");
        return Ok(());
    }
    ctx.output.related(&related);
    Ok(())
}
