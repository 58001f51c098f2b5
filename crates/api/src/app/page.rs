//! The stock-count form.
//!
//! Server-rendered, no scripts. Every catalog item gets a numeric input named
//! by its item key, so the submitted body maps straight back onto the catalog.

use std::fmt::Write;

use shiftstock_inventory::{Catalog, EMPLOYEE_FIELD};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    fn css_class(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

/// One-shot message shown above the form after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    kind: NoticeKind,
    message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> NoticeKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

const STYLE: &str = r#"
    body { background: #eef2f7; font-family: 'Segoe UI', sans-serif; }
    .container { max-width: 650px; margin: 50px auto; background: #fff; padding: 2rem;
                 border-radius: 10px; box-shadow: 0 4px 20px rgba(0,0,0,0.1); }
    h1 { color: #b71c1c; margin-bottom: 0.5rem; }
    h2 { color: #1f3a93; margin-top: 2rem; border-bottom: 2px solid #1f3a93; padding-bottom: 0.2rem; }
    label { display: block; margin-top: 1rem; font-weight: 600; color: #333; }
    .unit { font-size: 0.9rem; color: #666; margin-left: 0.4rem; }
    input { width: 100%; padding: 0.6rem; margin-top: 0.3rem; border: 1px solid #ccc; border-radius: 5px; }
    input:focus { border-color: #1f3a93; outline: none; }
    button { margin-top: 2.5rem; padding: 0.8rem; width: 100%; background: #b71c1c; color: #fff;
             border: none; border-radius: 5px; font-size: 1rem; cursor: pointer; }
    button:hover { background: #8e0000; }
    .notice { padding: 1rem; border-radius: 6px; margin-bottom: 1rem; }
    .success { background: #e8f5e9; color: #2e7d32; }
    .error { background: #ffebee; color: #c62828; }
    .timestamp { text-align: right; margin-top: 1.5rem; color: #555; font-size: 0.9rem; }
"#;

/// Render the full form page.
pub fn render_form(title: &str, catalog: &Catalog, notice: Option<&Notice>, generated_at: &str) -> String {
    let title = escape(title);
    let mut html = String::with_capacity(8 * 1024);

    // Writing into a String cannot fail.
    let _ = write!(
        html,
        "<!doctype html>\n<html>\n<head>\n  <meta charset=\"utf-8\">\n  \
         <title>{title} Stock Report</title>\n  <style>{STYLE}</style>\n</head>\n<body>\n  \
         <div class=\"container\">\n    <h1>{title}</h1>\n    <h2>End-of-Shift Stock Report</h2>\n"
    );

    if let Some(n) = notice {
        let _ = writeln!(
            html,
            "    <div class=\"notice {}\">{}</div>",
            n.kind().css_class(),
            escape(n.message())
        );
    }

    let _ = write!(
        html,
        "    <form method=\"POST\">\n      <label for=\"{EMPLOYEE_FIELD}\">Employee Name</label>\n      \
         <input type=\"text\" id=\"{EMPLOYEE_FIELD}\" name=\"{EMPLOYEE_FIELD}\" required>\n"
    );

    for section in catalog.sections() {
        let _ = writeln!(html, "      <h2>{} Inventory</h2>", escape(section.name()));
        for entry in section.entries() {
            let key = escape(entry.key().as_str());
            let _ = write!(
                html,
                "      <label for=\"{key}\">{}<span class=\"unit\">({})</span></label>\n      \
                 <input type=\"number\" id=\"{key}\" name=\"{key}\" min=\"0\" step=\"1\" required>\n",
                escape(entry.name()),
                escape(entry.unit()),
            );
        }
    }

    let _ = write!(
        html,
        "      <button type=\"submit\">Send Report &amp; Alert</button>\n    </form>\n    \
         <div class=\"timestamp\">Generated: {}</div>\n  </div>\n</body>\n</html>\n",
        escape(generated_at)
    );

    html
}

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiftstock_inventory::{CatalogEntry, Section};

    fn catalog() -> Catalog {
        let bar = Section::new(
            "Bar",
            vec![
                CatalogEntry::new("Black & White", "pcs", 2).unwrap(),
                CatalogEntry::new("Gilbey's", "pcs", 1).unwrap(),
            ],
        )
        .unwrap();
        Catalog::new(vec![bar]).unwrap()
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape(r#"<a href="x">Tom & 'Jerry'</a>"#), "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn form_has_one_input_per_item_named_by_key() {
        let html = render_form("Test Centre", &catalog(), None, "2024-03-09 22:05");

        assert!(html.contains("<h2>Bar Inventory</h2>"));
        assert!(html.contains(r#"name="employee""#));
        assert!(html.contains(r#"name="black_&amp;_white""#));
        assert!(html.contains(r#"name="gilbey&#39;s""#));
        assert!(html.contains("Generated: 2024-03-09 22:05"));
        assert!(!html.contains("class=\"notice"));
    }

    #[test]
    fn notice_is_rendered_escaped_with_its_kind() {
        let notice = Notice::error("Error: invalid quantity for Milk: \"<two>\"");
        let html = render_form("Test Centre", &catalog(), Some(&notice), "2024-03-09 22:05");

        assert!(html.contains(
            "<div class=\"notice error\">Error: invalid quantity for Milk: &quot;&lt;two&gt;&quot;</div>"
        ));
    }
}
