use serde::Serialize;
use storefront_core::{ListView, Product};

use super::{CommandResult, Session};

#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    #[arg(long, help = "Case-insensitive title search")]
    pub search: Option<String>,
    #[arg(long, help = "Exact category name, or `all`")]
    pub category: Option<String>,
    #[arg(long, default_value_t = 1, help = "1-based page number")]
    pub page: usize,
}

#[derive(Debug, Serialize)]
pub struct PageSummary<'a> {
    pub search: &'a str,
    pub category: &'a str,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub filtered_count: usize,
    pub has_next_page: bool,
    pub categories: &'a [String],
    pub products: &'a [Product],
}

impl<'a> PageSummary<'a> {
    pub fn of(view: &'a ListView) -> Self {
        Self {
            search: &view.filter().search_text,
            category: view.filter().category.as_str(),
            page: view.current_page(),
            page_size: view.page_size(),
            total_pages: view.total_pages(),
            filtered_count: view.filtered_count(),
            has_next_page: view.has_next_page(),
            categories: view.categories(),
            products: view.visible_products(),
        }
    }
}

pub fn run(session: &Session, args: ListArgs) -> CommandResult {
    let mut view = match session.loaded_list_view("list") {
        Ok(view) => view,
        Err(result) => return result,
    };

    if let Some(search) = args.search {
        view.set_search_text(search);
    }
    if let Some(category) = args.category {
        view.set_category(&category);
    }
    if args.page > 1 {
        view.go_to_page(args.page);
    }

    let summary = PageSummary::of(&view);
    CommandResult::success_with(
        "list",
        format!(
            "page {} of {} ({} matching products)",
            summary.page, summary.total_pages, summary.filtered_count
        ),
        &summary,
    )
}
