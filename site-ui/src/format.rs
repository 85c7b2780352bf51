//! Bot reply formatting
//!
//! Turns the plain text returned by the chat API into the small subset of
//! markup the widget displays: bold spans, paragraphs, line breaks and links.
//! The input is escaped before any substitution, so markup sent by the server
//! is always shown as text.

use std::sync::OnceLock;

use regex::Regex;

const PARAGRAPH_BREAK: &str = r#"</p><p class="mt-3">"#;
const LINK_CLASS: &str = "text-primary underline hover:text-primary/80";

struct Patterns {
    bullet: Regex,
    bold_stars: Regex,
    bold_underscores: Regex,
    url: Regex,
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(|| Patterns {
        bullet: Regex::new(r"(?m)^\s*[*-]\s+").unwrap(),
        bold_stars: Regex::new(r"\*\*(.*?)\*\*").unwrap(),
        bold_underscores: Regex::new(r"__(.*?)__").unwrap(),
        url: Regex::new(r"(https?://[^\s<]+)").unwrap(),
    })
}

/// Escape the HTML metacharacters in `input`
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render a bot reply to safe HTML.
///
/// Steps run in a fixed order, each on the output of the previous one:
/// escape, strip bullet markers, bold, paragraph and line breaks, wrap in a
/// paragraph, link bare URLs.
pub fn render_reply(raw: &str) -> String {
    let p = patterns();

    let text = escape_html(raw);
    let text = p.bullet.replace_all(&text, "");
    let text = p.bold_stars.replace_all(&text, "<strong>${1}</strong>");
    let text = p.bold_underscores.replace_all(&text, "<strong>${1}</strong>");
    let text = text.replace("\n\n", PARAGRAPH_BREAK).replace('\n', "<br>");

    let text = if text.starts_with("<p") {
        text
    } else {
        format!("<p>{text}</p>")
    };

    let link = format!(r#"<a href="${{1}}" target="_blank" rel="noopener noreferrer" class="{LINK_CLASS}">${{1}}</a>"#);
    p.url.replace_all(&text, link.as_str()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_before_anything_else() {
        let html = render_reply("<img src=x>");
        assert!(!html.contains("<img"));
        assert_eq!(html, "<p>&lt;img src=x&gt;</p>");
    }

    #[test]
    fn script_tags_stay_inert() {
        let html = render_reply("<script>alert('x')</script>");
        assert!(!html.contains("<script"));
        assert!(html.contains("&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt;"));
    }

    #[test]
    fn bold_spans_become_strong() {
        assert_eq!(render_reply("**bold**"), "<p><strong>bold</strong></p>");
        assert_eq!(render_reply("__bold__"), "<p><strong>bold</strong></p>");

        let html = render_reply("We offer **web** and **mobile** apps");
        assert_eq!(
            html,
            "<p>We offer <strong>web</strong> and <strong>mobile</strong> apps</p>"
        );
        assert!(!html.contains('*'));
    }

    #[test]
    fn double_newline_splits_paragraphs() {
        let html = render_reply("line1\n\nline2");
        assert_eq!(html, r#"<p>line1</p><p class="mt-3">line2</p>"#);
        assert_eq!(html.matches("<p").count(), 2);
    }

    #[test]
    fn single_newline_is_a_line_break() {
        let html = render_reply("line1\nline2");
        assert_eq!(html, "<p>line1<br>line2</p>");
        assert_eq!(html.matches("<p").count(), 1);
    }

    #[test]
    fn bullets_are_flattened() {
        let html = render_reply("Services:\n* Web design\n- SEO");
        assert_eq!(html, "<p>Services:<br>Web design<br>SEO</p>");
        assert!(!html.contains("<li>"));
    }

    #[test]
    fn bullet_with_bold_label() {
        let html = render_reply("* **Pricing:** from $500");
        assert_eq!(html, "<p><strong>Pricing:</strong> from $500</p>");
    }

    #[test]
    fn bare_urls_open_in_new_tab() {
        let html = render_reply("Visit https://example.com/contact for details");
        assert!(html.contains(
            r#"<a href="https://example.com/contact" target="_blank" rel="noopener noreferrer""#
        ));
        assert!(html.contains(">https://example.com/contact</a> for details"));
    }

    #[test]
    fn url_stops_at_inserted_markup() {
        let html = render_reply("https://example.com\nnext");
        assert!(html.contains(r#"href="https://example.com""#));
        assert!(html.contains("</a><br>next"));
    }

    #[test]
    fn quotes_in_urls_cannot_break_the_attribute() {
        let html = render_reply(r#"https://x.test/"onmouseover="alert(1)"#);
        assert!(!html.contains(r#""onmouseover"#));
        assert!(html.contains("&quot;onmouseover="));
    }

    #[test]
    fn escape_html_handles_all_metacharacters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#x27;s&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }
}
