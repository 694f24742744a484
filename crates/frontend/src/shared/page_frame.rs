//! Root wrapper for every page rendered inside a tab.
//!
//! The root element gets `id="{entity}--{category}"` and
//! `data-page-category`, so a page found in the DOM inspector leads straight
//! to its `domain/aNNN_*` directory.

use leptos::prelude::*;

pub const PAGE_CAT_LIST: &str = "list";
pub const PAGE_CAT_DETAIL: &str = "detail";
pub const PAGE_CAT_WIZARD: &str = "wizard";
pub const PAGE_CAT_SYSTEM: &str = "system";

pub fn page_id(entity: &str, category: &str) -> String {
    format!("{entity}--{category}")
}

#[component]
pub fn PageFrame(
    #[prop(into)] page_id: String,
    category: &'static str,
    children: Children,
) -> impl IntoView {
    let class = match category {
        PAGE_CAT_DETAIL => "page page--detail",
        PAGE_CAT_WIZARD => "page page--wizard",
        _ => "page",
    };

    view! {
        <div id=page_id class=class data-page-category=category>
            {children()}
        </div>
    }
}

/// Title row of a list page; children go to the action area
#[component]
pub fn PageHeader(
    #[prop(into)] title: String,
    #[prop(optional, into)] subtitle: MaybeProp<String>,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="page__header">
            <div class="page__header-text">
                <h1 class="page__title">{title}</h1>
                {move || subtitle.get().map(|s| view! { <div class="page__subtitle">{s}</div> })}
            </div>
            <div class="page__header-actions">{children()}</div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_id_format() {
        assert_eq!(page_id("a001_product", PAGE_CAT_LIST), "a001_product--list");
    }
}
