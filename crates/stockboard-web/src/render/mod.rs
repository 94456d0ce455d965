//! HTML rendering of a [`RenderPlan`].
//!
//! The page is a two-column layout: a sidebar holding the form and the
//! sidebar elements, and a main column holding the main elements in order.
//! All text that can originate from a request is passed through [`escape`].

pub mod chart;

use stockboard_core::dashboard::{END_LABEL, START_LABEL, TICKER_LABEL};
use stockboard_core::{format_date, CloseRow, Element, FormState, RenderPlan};

const STYLE: &str = "\
body{margin:0;font-family:system-ui,sans-serif;display:flex;min-height:100vh;color:#262730}\
aside{width:300px;padding:1.5rem;background:#f0f2f6}\
main{flex:1;padding:1.5rem 3rem}\
label{display:block;margin-top:.75rem;font-size:.9rem}\
input{width:100%;box-sizing:border-box;padding:.4rem}\
button{margin-top:1rem;padding:.4rem 1rem}\
table{border-collapse:collapse}\
td,th{padding:.25rem .75rem;border-bottom:1px solid #ddd;text-align:right}\
.alert{padding:.75rem 1rem;border-radius:.4rem;margin:.75rem 0}\
.error{background:#ffe4e4;color:#7d1a1a}\
.warning{background:#fff6d5;color:#6b4e00}\
.chart{width:100%;max-width:720px;height:auto}";

/// Render the full dashboard page.
pub fn page(plan: &RenderPlan) -> String {
    let mut html = String::with_capacity(16 * 1024);
    html.push_str("<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">");
    html.push_str(&format!(
        "<title>{} - stockboard</title><style>{STYLE}</style></head><body>",
        escape(&plan.form.ticker)
    ));

    html.push_str("<aside>");
    let mut sidebar = plan.sidebar.iter();
    // The header sits above the form; everything after it goes below.
    if let Some(header) = sidebar.next() {
        html.push_str(&element(header));
    }
    html.push_str(&form(&plan.form));
    for item in sidebar {
        html.push_str(&element(item));
    }
    html.push_str("</aside><main>");
    for item in &plan.main {
        html.push_str(&element(item));
    }
    html.push_str("</main></body></html>");
    html
}

fn form(form: &FormState) -> String {
    format!(
        concat!(
            r#"<form method="get" action="/">"#,
            r#"<label for="ticker">{ticker_label}</label>"#,
            r#"<input id="ticker" name="ticker" type="text" value="{ticker}">"#,
            r#"<label for="start">{start_label}</label>"#,
            r#"<input id="start" name="start" type="date" value="{start}">"#,
            r#"<label for="end">{end_label}</label>"#,
            r#"<input id="end" name="end" type="date" value="{end}">"#,
            r#"<button type="submit">Apply</button>"#,
            "</form>"
        ),
        ticker_label = escape(TICKER_LABEL),
        ticker = escape(&form.ticker),
        start_label = START_LABEL,
        start = format_date(form.start),
        end_label = END_LABEL,
        end = format_date(form.end),
    )
}

fn element(element: &Element) -> String {
    match element {
        Element::Title { text } => format!("<h1>{}</h1>", escape(text)),
        Element::Header { text } => format!("<h2>{}</h2>", escape(text)),
        Element::Subheader { text } => format!("<h3>{}</h3>", escape(text)),
        Element::CloseTable { symbol, rows } => close_table(symbol, rows),
        Element::LineChart { series } => chart::line_svg(series),
        Element::BarChart { series } => chart::bar_svg(series),
        Element::Error { text } => {
            format!(r#"<div class="alert error" role="alert">{}</div>"#, escape(text))
        }
        Element::Warning { text } => {
            format!(r#"<div class="alert warning" role="status">{}</div>"#, escape(text))
        }
        Element::Markdown { text } => format!("<p>{}</p>", inline_markdown(text)),
        Element::Divider => String::from("<hr>"),
    }
}

fn close_table(symbol: &str, rows: &[CloseRow]) -> String {
    let mut html = format!(
        "<table><thead><tr><th>Date</th><th>{}</th></tr></thead><tbody>",
        escape(symbol)
    );
    for row in rows {
        html.push_str(&format!(
            "<tr><td>{}</td><td>{:.2}</td></tr>",
            format_date(row.date),
            row.close
        ));
    }
    html.push_str("</tbody></table>");
    html
}

/// Escape text for use in HTML content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape `text`, then turn `**bold**` and `` `code` `` spans into tags.
///
/// Only paired markers are converted; a trailing unmatched marker is kept.
fn inline_markdown(text: &str) -> String {
    let escaped = escape(text);
    let bolded = wrap_pairs(&escaped, "**", "strong");
    wrap_pairs(&bolded, "`", "code")
}

fn wrap_pairs(text: &str, marker: &str, tag: &str) -> String {
    let parts: Vec<&str> = text.split(marker).collect();
    let mut out = String::with_capacity(text.len());
    for (i, part) in parts.iter().enumerate() {
        if i == 0 {
            out.push_str(part);
        } else if i % 2 == 1 && i + 1 < parts.len() {
            out.push_str(&format!("<{tag}>{part}</{tag}>"));
        } else if i % 2 == 1 {
            out.push_str(marker);
            out.push_str(part);
        } else {
            out.push_str(part);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockboard_core::dashboard::FOOTER_MARKDOWN;
    use stockboard_core::PlanStatus;
    use time::macros::date;

    fn plan(ticker: &str, main: Vec<Element>) -> RenderPlan {
        RenderPlan {
            form: FormState {
                ticker: ticker.to_owned(),
                start: date!(2023 - 01 - 01),
                end: date!(2023 - 06 - 01),
            },
            sidebar: vec![
                Element::Header {
                    text: String::from("Stock data settings"),
                },
                Element::Divider,
                Element::Markdown {
                    text: FOOTER_MARKDOWN.to_owned(),
                },
            ],
            main,
            status: PlanStatus::Rendered,
        }
    }

    #[test]
    fn escape_covers_html_metacharacters() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn ticker_is_escaped_everywhere() {
        let hostile = "<SCRIPT>ALERT(1)</SCRIPT>";
        let html = page(&plan(
            hostile,
            vec![Element::Warning {
                text: format!("No stock data found for '{hostile}'."),
            }],
        ));

        assert!(!html.contains("<SCRIPT>"));
        assert!(html.contains("&lt;SCRIPT&gt;ALERT(1)&lt;/SCRIPT&gt;"));
    }

    #[test]
    fn form_echoes_resolved_values() {
        let html = page(&plan("AAPL", Vec::new()));

        assert!(html.contains(r#"name="ticker" type="text" value="AAPL""#));
        assert!(html.contains(r#"name="start" type="date" value="2023-01-01""#));
        assert!(html.contains(r#"name="end" type="date" value="2023-06-01""#));
    }

    #[test]
    fn form_sits_between_header_and_footer() {
        let html = page(&plan("AAPL", Vec::new()));

        let header = html.find("<h2>").expect("header");
        let form = html.find("<form").expect("form");
        let footer = html.find("<hr>").expect("divider");
        assert!(header < form && form < footer);
    }

    #[test]
    fn footer_markdown_renders_bold_and_code() {
        let html = inline_markdown(FOOTER_MARKDOWN);

        assert!(html.starts_with("<strong>Note:</strong>"));
        assert!(html.contains("<code>.KS</code>"));
        assert!(html.contains("<code>.KQ</code>"));
    }

    #[test]
    fn unmatched_marker_is_kept() {
        assert_eq!(inline_markdown("a `b"), "a `b");
        assert_eq!(inline_markdown("**x** y **"), "<strong>x</strong> y **");
    }

    #[test]
    fn close_table_lists_rows_in_order() {
        let html = element(&Element::CloseTable {
            symbol: String::from("AAPL"),
            rows: vec![
                CloseRow {
                    date: date!(2023 - 05 - 30),
                    close: 177.3,
                },
                CloseRow {
                    date: date!(2023 - 05 - 31),
                    close: 177.25,
                },
            ],
        });

        let first = html.find("2023-05-30").expect("first row");
        let second = html.find("2023-05-31").expect("second row");
        assert!(first < second);
        assert!(html.contains("<td>177.30</td>"));
        assert_eq!(html.matches("<tr>").count(), 3);
    }

    #[test]
    fn alerts_carry_their_class() {
        let error = element(&Element::Error {
            text: String::from("boom"),
        });
        assert!(error.contains(r#"class="alert error""#));
    }
}
