use crate::models::MessageRow;

const STYLE: &str = "\
body{font-family:system-ui,-apple-system,Segoe UI,Roboto,Arial,sans-serif;margin:0;background:#f6f7f9}
header{position:sticky;top:0;background:#fff;border-bottom:1px solid #e3e6ea;padding:12px 16px}
h1{font-size:18px;margin:0}
.meta{color:#666;font-size:12px;margin-top:4px}
.wrap{max-width:960px;margin:0 auto;padding:16px}
.msg{margin:10px 0;display:flex}
.role{width:120px;flex:0 0 120px;color:#555;font-weight:600}
.bubble{flex:1;background:#fff;border:1px solid #e3e6ea;border-radius:8px;padding:10px;white-space:pre-wrap}
.assistant .bubble{background:#f0f7ff;border-color:#cfe3ff}
.time{color:#888;font-size:11px;margin-bottom:6px}
footer{color:#888;font-size:12px;text-align:center;padding:12px}";

/// Escapes text for use in HTML element content and quoted attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            c => escaped.push(c),
        }
    }
    escaped
}

/// Renders one conversation as a standalone HTML document
///
/// Every value taken from the rows is escaped. Rows are rendered in the order given.
pub fn render_html(rows: &[MessageRow], title: &str, conversation_id: &str) -> String {
    let title = escape_html(title);
    let id = escape_html(conversation_id);
    let heading = if title.is_empty() { "Conversation" } else { title.as_str() };

    let mut lines = vec![
        "<!doctype html>".to_string(),
        "<meta charset=\"utf-8\">".to_string(),
        format!("<title>{} — {}</title>", title, id),
        format!("<style>{}</style>", STYLE),
        "<header>".to_string(),
        format!("  <h1>{}</h1>", heading),
        format!("  <div class=\"meta\">ID: {}</div>", id),
        "</header>".to_string(),
        "<div class=\"wrap\">".to_string(),
    ];

    for row in rows {
        let role = row.role.to_lowercase();
        let class = match role.as_str() {
            "user" => "user",
            "assistant" => "assistant",
            _ => "other",
        };
        lines.push(format!("  <div class=\"msg {}\">", class));
        lines.push(format!("    <div class=\"role\">{}</div>", escape_html(&role)));
        lines.push("    <div class=\"bubble\">".to_string());
        if !row.time.is_empty() {
            lines.push(format!("      <div class=\"time\">{}</div>", escape_html(&row.time)));
        }
        lines.push(format!("      {}", escape_html(&row.text)));
        lines.push("    </div>".to_string());
        lines.push("  </div>".to_string());
    }

    lines.push("</div>".to_string());
    lines.push("<footer>Generated from messages.csv (UTF-8)</footer>".to_string());
    lines.join("\n")
}
