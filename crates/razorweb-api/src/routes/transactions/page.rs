//! Transactions page rendering
//!
//! - page_transactions: query form, name search and table container
//! - render_table: the swappable table fragment
//! - render_error_banner: dismissable banner shown above the table

use crate::AppState;
use razorweb_core::{Column, SortDirection, TablePage, TableQuery};
use razorweb_utils::escape_html;

const TARGET: &str = "#transactions-content";

/// URL of the table partial for a page, size and sort
pub fn list_url(page: usize, limit: usize, sort: Option<(Column, SortDirection)>) -> String {
    let mut url = format!("/transactions/list?page={}&limit={}", page, limit);
    if let Some((column, direction)) = sort {
        url.push_str(&format!("&sort={}&dir={}", column, direction));
    }
    url
}

fn header_cell(page: &TablePage, column: Column) -> String {
    let active = page.sort.filter(|(sorted, _)| *sorted == column).map(|(_, dir)| dir);
    let next_direction = active.map(|dir| dir.toggled()).unwrap_or_default();
    let indicator = match active {
        Some(SortDirection::Asc) => " ▲",
        Some(SortDirection::Desc) => " ▼",
        None => "",
    };
    let reorder = if column.is_reorderable() { " data-reorderable='true'" } else { "" };

    let label = if column.is_sortable() {
        format!(
            "<a href='#' hx-get='{}' hx-target='{}' class='hover:underline'>{}{}</a>",
            list_url(1, page.per_page, Some((column, next_direction))),
            TARGET,
            column.header(),
            indicator
        )
    } else {
        column.header().to_string()
    };

    format!(
        "<th class='sticky top-0 bg-gray-200 font-bold text-left px-3 py-2 whitespace-nowrap' style='min-width: {}' data-column='{}'{}>{}</th>",
        column.width(),
        column.id(),
        reorder,
        label
    )
}

fn page_button(label: &str, target_page: usize, page: &TablePage, enabled: bool) -> String {
    if enabled {
        format!(
            "<button hx-get='{}' hx-target='{}' class='px-3 py-1 border rounded hover:bg-gray-50'>{}</button>",
            list_url(target_page, page.per_page, page.sort),
            TARGET,
            label
        )
    } else {
        format!("<button class='px-3 py-1 border rounded text-gray-300' disabled>{}</button>", label)
    }
}

fn controls(page: &TablePage, page_size_options: &[usize]) -> String {
    let hidden_sort = page
        .sort
        .map(|(column, direction)| {
            format!(
                "<input type='hidden' name='sort' value='{}'><input type='hidden' name='dir' value='{}'>",
                column, direction
            )
        })
        .unwrap_or_default();

    let options: String = page_size_options
        .iter()
        .map(|size| {
            let selected = if *size == page.per_page { " selected" } else { "" };
            format!("<option value='{}'{}>{}</option>", size, selected, size)
        })
        .collect();

    format!(
        "<form id='table-controls' hx-get='/transactions/list' hx-target='{}' hx-trigger='change' class='flex items-center gap-2 mb-3 text-sm'>{}<label class='text-gray-600'>Rows per page</label><select name='limit' class='px-2 py-1 border rounded bg-white'>{}</select></form>",
        TARGET, hidden_sort, options
    )
}

fn pagination(page: &TablePage) -> String {
    let has_prev = page.page > 1;
    let has_next = page.page < page.total_pages;
    format!(
        "<div class='flex items-center justify-between mt-4 text-sm'><span class='text-gray-600'>Showing {}–{} of {}</span><div class='flex gap-1'>{}{}<span class='px-3 py-1'>Page {} of {}</span>{}{}</div></div>",
        page.first_row(),
        page.last_row(),
        page.total,
        page_button("First", 1, page, has_prev),
        page_button("Prev", page.page.saturating_sub(1).max(1), page, has_prev),
        page.page,
        page.total_pages,
        page_button("Next", page.page + 1, page, has_next),
        page_button("Last", page.total_pages, page, has_next),
    )
}

fn summary_list(page: &TablePage) -> String {
    let items: String = page
        .summaries
        .iter()
        .map(|s| {
            format!(
                "<li>ID: {}, Amount: {}, Status: {}</li>",
                escape_html(&s.id),
                escape_html(&s.amount),
                escape_html(&s.status)
            )
        })
        .collect();
    format!("<ul class='mt-6 text-sm text-gray-700 space-y-1'>{}</ul>", items)
}

/// Table fragment swapped into the transactions container
pub fn render_table(page: &TablePage, page_size_options: &[usize], has_fetched: bool) -> String {
    if !has_fetched {
        return "<p class='text-gray-500 text-center py-8'>Choose a date range and press Fetch.</p>".to_string();
    }

    let headers: String = page.columns.iter().map(|c| header_cell(page, *c)).collect();

    let body: String = if page.rows.is_empty() {
        format!(
            "<tr><td colspan='{}' class='px-3 py-8 text-center text-gray-500'>No transactions</td></tr>",
            page.columns.len()
        )
    } else {
        page.rows
            .iter()
            .map(|row| {
                let cells: String = row
                    .cells
                    .iter()
                    .map(|cell| format!("<td class='px-3 py-2 whitespace-nowrap'>{}</td>", escape_html(cell)))
                    .collect();
                format!(
                    "<tr data-key='{}' class='odd:bg-white even:bg-gray-50 hover:bg-indigo-50'>{}</tr>",
                    escape_html(&row.key),
                    cells
                )
            })
            .collect()
    };

    format!(
        "{}<div class='overflow-x-auto max-h-[70vh] border rounded-lg'><table class='min-w-full text-sm'><thead><tr>{}</tr></thead><tbody>{}</tbody></table></div>{}{}",
        controls(page, page_size_options),
        headers,
        body,
        pagination(page),
        summary_list(page)
    )
}

/// Dismissable banner describing a failed fetch
pub fn render_error_banner(message: &str, suggestions: &[String]) -> String {
    let hints: String = suggestions
        .iter()
        .map(|s| format!("<li>{}</li>", escape_html(s)))
        .collect();
    format!(
        "<div role='alert' class='mb-4 p-4 rounded-lg border border-red-200 bg-red-50 text-red-700 flex justify-between gap-4'><div><p class='font-medium'>{}</p><ul class='text-sm list-disc ml-5'>{}</ul></div><button type='button' onclick='this.closest(\"[role=alert]\").remove()' class='text-red-400 hover:text-red-600'>✕</button></div>",
        escape_html(message),
        hints
    )
}

/// Transactions page - query form, search box and the current table
pub async fn page_transactions(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let store = &state.store;
    let config = &state.config;
    let (from, to) = store.dates();
    let query = store.query();

    let page = store.table(&TableQuery {
        page: 1,
        per_page: store.page_size(None),
        sort: None,
    });
    let table = render_table(&page, &config.table.page_size_options, store.has_fetched());

    let inner_content = format!(
        r#"<div class='flex items-center justify-between mb-4'>
            <h2 class='text-2xl font-bold'>{}</h2>
        </div>
        <form hx-post='/transactions/fetch' hx-target='{target}' hx-indicator='#fetch-indicator'
            class='flex flex-wrap items-end gap-3 mb-4 p-3 bg-white rounded-lg border shadow-sm'>
            <label class='text-sm text-gray-600'>From
                <input type='date' name='from' value='{}' class='block px-2 py-1.5 border rounded-lg'>
            </label>
            <label class='text-sm text-gray-600'>To
                <input type='date' name='to' value='{}' class='block px-2 py-1.5 border rounded-lg'>
            </label>
            <button type='submit' class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Fetch</button>
            <span id='fetch-indicator' class='htmx-indicator text-sm text-gray-500'>Loading...</span>
        </form>
        <div class='flex items-center gap-2 mb-4'>
            <input type='search' name='q' value='{}' placeholder='Search by name...'
                hx-get='/transactions/filter' hx-trigger='keyup changed delay:300ms, search' hx-target='{target}'
                hx-include="[name='limit'],[name='sort'],[name='dir']"
                class='px-4 py-2 border rounded-lg w-64'>
            <a href='/transactions/export' class='px-4 py-2 bg-gray-100 text-gray-700 rounded-lg hover:bg-gray-200'>Download CSV</a>
        </div>
        <div id='transactions-content' class='bg-white rounded-xl shadow-sm p-6'>{}</div>"#,
        escape_html(&config.display.title),
        escape_html(&from),
        escape_html(&to),
        escape_html(&query),
        table,
        target = TARGET,
    );

    axum::response::Html(crate::page_response(&headers, config, "Transactions", "/transactions", &inner_content))
}
