//! Settings page rendering - read-only view of the loaded configuration

use crate::AppState;
use razorweb_utils::escape_html;

fn setting(label: &str, value: &str) -> String {
    format!(
        "<div><p class='text-sm text-gray-500'>{}</p><p class='font-medium break-all'>{}</p></div>",
        label,
        escape_html(value)
    )
}

fn section(title: &str, items: &[String]) -> String {
    format!(
        "<div class='bg-white rounded-xl shadow-sm p-6 mb-6'><h3 class='text-lg font-semibold mb-4'>{}</h3><div class='grid grid-cols-2 gap-4'>{}</div></div>",
        title,
        items.join("")
    )
}

pub async fn page_settings(
    state: axum::extract::State<AppState>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let config = &state.config;

    let page_sizes: Vec<String> = config.table.page_size_options.iter().map(|n| n.to_string()).collect();
    let timeout = config
        .gateway
        .timeout_secs
        .map(|secs| format!("{} s", secs))
        .unwrap_or_else(|| "none".to_string());

    let inner_content = [
        "<div class='mb-6'><h2 class='text-2xl font-bold'>Settings</h2></div>".to_string(),
        section("Server", &[
            setting("Host", &config.server.host),
            setting("Port", &config.server.port.to_string()),
        ]),
        section("Transaction endpoint", &[
            setting("Endpoint", &config.gateway.endpoint),
            setting("Timeout", &timeout),
        ]),
        section("Table", &[
            setting("Records per page", &config.table.records_per_page.to_string()),
            setting("Page sizes", &page_sizes.join(", ")),
            setting("Numeric sort", if config.table.numeric_sort { "on" } else { "off" }),
        ]),
        section("Display", &[
            setting("Currency symbol", &config.display.currency_symbol),
            setting("UTC offset (minutes)", &config.display.utc_offset_minutes.to_string()),
            setting("Date format", &config.display.datetime_format),
        ]),
        section("Export", &[
            setting("Delimiter", &config.export.delimiter),
            setting("Quote fields", if config.export.quote_fields { "on" } else { "off" }),
            setting("Filename prefix", &config.export.filename_prefix),
        ]),
    ]
    .concat();

    axum::response::Html(crate::page_response(&headers, config, "Settings", "/settings", &inner_content))
}
