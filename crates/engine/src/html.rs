//! Standalone HTML digest of issues.

use std::fmt::Write;

use chrono::Datelike;
use comicvine_types::Issue;
use comicvine_util::{escape_html, format_cover_date, strip_html_tags, truncate_with_ellipsis};
use serde::Serialize;

const FALLBACK_COVER: &str = "https://comicvine.gamespot.com/a/uploads/original/0/40/1017179-noimage.png";
const DESCRIPTION_CHARS: usize = 150;

const STYLESHEET: &str = "\
body{margin:0;font-family:Arial,Helvetica,sans-serif;background:#f4f4f4;color:#222}
.header{background:#0282f9;color:#fff;padding:20px;text-align:center}
.header h1{margin:0}
.subheader{background:#fff;border-bottom:1px solid #ddd;padding:8px 20px;text-align:center}
.comics{display:grid;grid-template-columns:repeat(auto-fill,minmax(220px,1fr));gap:20px;padding:20px;max-width:1200px;margin:0 auto}
.card{background:#fff;border-radius:8px;box-shadow:0 2px 6px rgba(0,0,0,.15);overflow:hidden}
.card:hover{box-shadow:0 4px 12px rgba(0,0,0,.25)}
.cover{height:300px;background:#eee;display:flex;align-items:center;justify-content:center}
.cover img{max-height:100%;max-width:100%;object-fit:contain}
.info{padding:12px}
.title{font-weight:bold;font-size:16px;margin-bottom:6px}
.issue{color:#0282f9;margin-bottom:4px}
.date{color:#666;font-size:13px;margin-bottom:6px}
.description{font-size:13px;line-height:1.4}
.empty{text-align:center;padding:50px;color:#666}
.footer{text-align:center;padding:20px;color:#666;font-size:12px}
";

/// Rendered digest plus the counts reported alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComicsDigest {
    pub html: String,
    pub count: usize,
    pub total: u64,
    pub message: String,
}

/// Renders `issues` as a complete HTML document titled `title`.
///
/// All upstream text is escaped. Descriptions have their markup stripped and
/// are cut to 150 characters.
pub fn render_comics_html(issues: &[Issue], title: &str) -> String {
    let title = escape_html(title);
    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n\
         <title>{title}</title>\n<style>\n{STYLESHEET}</style>\n</head>\n<body>\n\
         <div class=\"header\"><h1>{title}</h1></div>\n\
         <div class=\"subheader\"><p>Showing {} issues</p></div>\n<div class=\"comics\">\n",
        issues.len()
    );

    if issues.is_empty() {
        html.push_str(
            "<div class=\"empty\"><h2>No issues found</h2><p>Try adjusting your search parameters</p></div>\n",
        );
    }
    for issue in issues {
        push_card(&mut html, issue);
    }

    let _ = write!(
        html,
        "</div>\n<div class=\"footer\"><p>Data provided by Comic Vine. &copy; {} DC Comics</p></div>\n</body>\n</html>\n",
        chrono::Utc::now().year()
    );
    html
}

fn push_card(html: &mut String, issue: &Issue) {
    let title = escape_html(issue.display_title().unwrap_or("Unknown Title"));
    let cover = issue
        .image
        .as_ref()
        .and_then(|image| image.best_cover_url())
        .map(escape_html)
        .unwrap_or_default();
    let number = issue
        .issue_number
        .as_deref()
        .filter(|number| !number.is_empty())
        .map(escape_html)
        .unwrap_or_else(|| "N/A".to_string());

    let _ = write!(
        html,
        "<div class=\"card\">\n<div class=\"cover\"><img src=\"{cover}\" alt=\"{title}\" \
         onerror=\"this.src='{FALLBACK_COVER}';\"></div>\n<div class=\"info\">\n\
         <div class=\"title\">{title}</div>\n<div class=\"issue\">Issue {number}</div>\n"
    );
    if let Some(date) = issue.cover_date.as_deref().and_then(format_cover_date) {
        let _ = writeln!(html, "<div class=\"date\">Cover Date: {date}</div>");
    }
    let description = issue
        .deck
        .as_deref()
        .filter(|text| !text.is_empty())
        .or(issue.description.as_deref())
        .map(strip_html_tags)
        .unwrap_or_default();
    if !description.trim().is_empty() {
        let _ = writeln!(
            html,
            "<div class=\"description\">{}</div>",
            escape_html(&truncate_with_ellipsis(&description, DESCRIPTION_CHARS))
        );
    }
    html.push_str("</div>\n</div>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn issue(value: serde_json::Value) -> Issue {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn empty_list_renders_the_empty_state() {
        let html = render_comics_html(&[], "DC Comics Issues");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("Showing 0 issues"));
        assert!(html.contains("No issues found"));
        assert!(html.contains("Try adjusting your search parameters"));
    }

    #[test]
    fn card_uses_volume_name_and_formatted_date() {
        let issues = [issue(json!({
            "id": 1,
            "issue_number": "1",
            "cover_date": "1939-05-01",
            "volume": { "id": 2, "name": "Detective Comics" },
            "image": { "medium_url": "https://example.com/m.jpg", "super_url": "" }
        }))];
        let html = render_comics_html(&issues, "Golden Age");
        assert!(html.contains("<div class=\"title\">Detective Comics</div>"));
        assert!(html.contains("Issue 1"));
        assert!(html.contains("Cover Date: May 1, 1939"));
        assert!(html.contains("src=\"https://example.com/m.jpg\""));
        assert!(html.contains(FALLBACK_COVER));
    }

    #[test]
    fn escapes_text_and_truncates_descriptions() {
        let long = format!("<p>{}</p>", "a".repeat(200));
        let issues = [issue(json!({ "id": 1, "name": "<script>alert('x')</script>", "description": long }))];
        let html = render_comics_html(&issues, "Tom & Jerry");
        assert!(html.contains("<h1>Tom &amp; Jerry</h1>"));
        assert!(html.contains("&lt;script&gt;alert(&#039;x&#039;)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains(&format!("{}...", "a".repeat(150))));
        assert!(html.contains("Issue N/A"));
    }

    #[test]
    fn untitled_issue_falls_back_to_placeholder() {
        let html = render_comics_html(&[issue(json!({ "id": 5 }))], "t");
        assert!(html.contains("Unknown Title"));
        assert!(!html.contains("Cover Date"));
    }
}
