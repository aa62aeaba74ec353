//! Keyword and filtered search.

use anyhow::Result;
use mall_search::search::{build_simple_search, PageRequest, SearchRequest};

use super::{PageArgs, SearchArgs, SearchCommand};
use crate::context::Context;

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    match args.command {
        SearchCommand::Simple {
            keyword,
            page,
            show_query,
        } => simple(&keyword, page, show_query, ctx).await,
        SearchCommand::Query {
            keyword,
            brand_id,
            category_id,
            sort,
            page,
            show_query,
        } => {
            let mut request = SearchRequest::new()
                .with_keyword(keyword)
                .with_sort_code(sort.unwrap_or(ctx.config.search.default_sort));
            request.page = page_request(page, ctx);
            if let Some(id) = brand_id {
                request = request.with_brand(id);
            }
            if let Some(id) = category_id {
                request = request.with_category(id);
            }
            query(&request, show_query, ctx).await
        }
    }
}

/// Resolve paging flags against the configured defaults.
pub fn page_request(args: PageArgs, ctx: &Context) -> PageRequest {
    PageRequest::new(
        args.page.unwrap_or(1),
        args.size.unwrap_or(ctx.config.search.default_page_size),
    )
}

async fn simple(keyword: &str, page: PageArgs, show_query: bool, ctx: &Context) -> Result<()> {
    let page = page_request(page, ctx);

    if show_query {
        page.validate()?;
        ctx.output.json(&build_simple_search(keyword, page));
        return Ok(());
    }

    let service = ctx.service()?;
    let spinner = ctx.output.spinner(&format!("Searching for '{}'...", keyword));
    let result = service.search_simple(keyword, page).await;
    spinner.finish_and_clear();

    ctx.output.page(&result?);
    Ok(())
}

async fn query(request: &SearchRequest, show_query: bool, ctx: &Context) -> Result<()> {
    if show_query {
        request.page.validate()?;
        ctx.output.json(&request.to_query());
        return Ok(());
    }

    let service = ctx.service()?;
    let spinner = ctx.output.spinner("Searching...");
    let result = service.search(request).await;
    spinner.finish_and_clear();

    let page = result?;
    if !ctx.output.is_json() {
        ctx.output.info(&format!("Sorted by {}", request.sort.display_name()));
    }
    ctx.output.page(&page);
    Ok(())
}
