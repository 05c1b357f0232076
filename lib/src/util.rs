use once_cell::sync::Lazy;
use regex::Regex;

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Converts heading text into a URL fragment identifier.
///
/// Markup tags are stripped (their inner text is kept), the text is
/// lowercased, and every character that isn't an ASCII alphanumeric,
/// whitespace, or a hyphen is removed. Each remaining run of whitespace
/// and hyphens becomes a single `-`, and leading and trailing hyphens are
/// dropped. Text with no alphanumerics yields an empty slug.
pub fn slugify(text: &str) -> String {
    let text = TAG.replace_all(text, "");
    let mut output = String::with_capacity(text.len());

    let mut need_dash = false;
    for ch in text.chars().flat_map(char::to_lowercase) {
        match ch {
            'a'..='z' | '0'..='9' => {
                if need_dash {
                    output.push('-');
                    need_dash = false;
                }

                output.push(ch);
            }
            '-' => need_dash = !output.is_empty(),
            c if c.is_whitespace() => need_dash = !output.is_empty(),
            _ => {}
        }
    }

    output
}

/// Escapes `&`, `<`, and `>` for inclusion in element content. `&` is
/// handled in the same pass as the others, so the entities produced for
/// `<` and `>` are never escaped again.
pub fn escape_text(text: &str) -> String {
    escape(text, false)
}

/// Like [`escape_text()`], but also escapes `"` for use inside a
/// double-quoted attribute value.
pub fn escape_attr(value: &str) -> String {
    escape(value, true)
}

fn escape(input: &str, quotes: bool) -> String {
    let mut output = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' if quotes => output.push_str("&quot;"),
            c => output.push(c),
        }
    }

    output
}
