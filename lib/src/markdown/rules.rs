use std::borrow::Cow;
use std::fmt::Write;

use once_cell::sync::Lazy;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, LinkType, Tag, TagEnd};
use regex::Regex;

use crate::markdown::Plugin;
use crate::util::{escape_attr, escape_text, slugify};

/// A heading, with its inner content already rendered.
#[derive(Debug, Clone, Copy)]
pub struct Heading<'a> {
    /// Nesting depth, 1 through 6.
    pub depth: usize,
    /// The heading's text content, including any raw inline HTML.
    pub text: &'a str,
    /// The rendered inner HTML.
    pub html: &'a str,
}

#[derive(Debug, Clone, Copy)]
pub struct CodeBlock<'a> {
    pub lang: Option<&'a str>,
    /// The unescaped code, without the newline that ends the final line.
    pub code: &'a str,
}

#[derive(Debug, Clone, Copy)]
pub struct Link<'a> {
    pub href: &'a str,
    pub title: Option<&'a str>,
    /// The rendered link text.
    pub html: &'a str,
}

/// Rendering overrides for headings, code blocks, and links.
///
/// Each method is a pure function of its argument. The defaults render
/// what `pulldown-cmark` would; implementations override what they need.
pub trait Rules: Send + Sync {
    fn heading(&self, heading: &Heading<'_>) -> String {
        let Heading { depth, html, .. } = heading;
        format!("<h{depth}>{html}</h{depth}>\n")
    }

    fn code_block(&self, block: &CodeBlock<'_>) -> String {
        let code = escape_text(block.code);
        let newline = if block.code.is_empty() { "" } else { "\n" };
        match block.lang {
            Some(lang) => format!(
                "<pre><code class=\"language-{}\">{code}{newline}</code></pre>\n",
                escape_attr(lang)
            ),
            None => format!("<pre><code>{code}{newline}</code></pre>\n"),
        }
    }

    fn link(&self, link: &Link<'_>) -> String {
        let mut a = format!("<a href=\"{}\"", escape_attr(link.href));
        if let Some(title) = link.title {
            let _ = write!(a, " title=\"{}\"", escape_attr(title));
        }

        let _ = write!(a, ">{}</a>", link.html);
        a
    }
}

impl<R: Rules + ?Sized> Rules for &R {
    fn heading(&self, heading: &Heading<'_>) -> String {
        R::heading(self, heading)
    }

    fn code_block(&self, block: &CodeBlock<'_>) -> String {
        R::code_block(self, block)
    }

    fn link(&self, link: &Link<'_>) -> String {
        R::link(self, link)
    }
}

static SECTION_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\.?/?([0-9]{2})-[A-Za-z0-9_-]+\.md$").unwrap());

static APPENDIX_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\.?/?appendix-([a-d])-[A-Za-z0-9_-]+\.md$").unwrap());

/// Rewrites a link to a sibling specification file into an in-page anchor.
///
/// `NN-name.md` becomes `#section-NN` and `appendix-X-name.md`, for `X` in
/// `a` through `d`, becomes `#appendix-X`; either may be prefixed with `./`.
/// The whole href must match. Anything else is returned unchanged.
///
/// ```rust
/// use folio::markdown::resolve_href;
///
/// assert_eq!(resolve_href("./06-matching.md"), "#section-06");
/// assert_eq!(resolve_href("appendix-b-expression-grammar.md"), "#appendix-b");
/// assert_eq!(resolve_href("https://example.com/06-matching.md"), "https://example.com/06-matching.md");
/// ```
pub fn resolve_href(href: &str) -> Cow<'_, str> {
    if let Some(caps) = SECTION_REF.captures(href) {
        return Cow::Owned(format!("#section-{}", &caps[1]));
    }

    if let Some(caps) = APPENDIX_REF.captures(href) {
        return Cow::Owned(format!("#appendix-{}", &caps[1]));
    }

    Cow::Borrowed(href)
}

/// The rules used for specification documents: anchored headings,
/// `data-lang` code blocks, and cross-document links resolved to anchors.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpecRules;

impl Rules for SpecRules {
    fn heading(&self, heading: &Heading<'_>) -> String {
        let Heading { depth, text, html } = *heading;
        let slug = slugify(text);
        let anchor = if depth <= 3 {
            format!(r##"<a class="anchor" href="#{slug}" aria-hidden="true">#</a>"##)
        } else {
            String::new()
        };

        format!("<h{depth} id=\"{slug}\">{anchor}{html}</h{depth}>\n")
    }

    fn code_block(&self, block: &CodeBlock<'_>) -> String {
        let lang = block.lang
            .map(|lang| format!(" data-lang=\"{}\"", escape_attr(lang)))
            .unwrap_or_default();

        format!("<pre{lang}><code>{}</code></pre>\n", escape_text(block.code))
    }

    fn link(&self, link: &Link<'_>) -> String {
        let href = resolve_href(link.href);
        let title = link.title
            .map(|title| format!(" title=\"{}\"", escape_attr(title)))
            .unwrap_or_default();

        format!("<a href=\"{}\"{title}>{}</a>", escape_attr(&href), link.html)
    }
}

/// A [`Plugin`] that renders headings, code blocks, and links with `R`.
#[derive(Debug, Default, Clone)]
pub struct WithRules<R> {
    rules: R,
}

impl<R: Rules> WithRules<R> {
    pub fn new(rules: R) -> Self {
        Self { rules }
    }
}

impl<R: Rules> Plugin for WithRules<R> {
    fn remap<'a, I>(&'a mut self, events: I) -> impl Iterator<Item = Event<'a>> + 'a
        where I: Iterator<Item = Event<'a>> + 'a
    {
        RuleIterator { rules: &self.rules, inner: events }
    }
}

struct RuleIterator<'r, R, I> {
    rules: &'r R,
    inner: I,
}

impl<'a, R: Rules, I: Iterator<Item = Event<'a>>> RuleIterator<'_, R, I> {
    /// Consumes events up to and including the first `end`, returning the
    /// ones before it.
    fn take_until(&mut self, end: impl Fn(&Event<'a>) -> bool) -> Vec<Event<'a>> {
        let mut events = vec![];
        for event in self.inner.by_ref() {
            if end(&event) {
                break;
            }

            events.push(event);
        }

        events
    }

    fn render(&self, events: Vec<Event<'a>>) -> String {
        let mut output = String::new();
        let inner = RuleIterator { rules: self.rules, inner: events.into_iter() };
        html::push_html(&mut output, inner);
        output
    }

    fn heading(&mut self, depth: usize) -> Event<'a> {
        let events = self.take_until(|e| matches!(e, Event::End(TagEnd::Heading(_))));

        let mut text = String::new();
        for event in &events {
            match event {
                Event::Text(s) | Event::Code(s) | Event::InlineHtml(s) | Event::Html(s) => {
                    text.push_str(s)
                }
                Event::SoftBreak | Event::HardBreak => text.push(' '),
                _ => {}
            }
        }

        let html = self.render(events);
        let heading = Heading { depth, text: &text, html: &html };
        Event::Html(self.rules.heading(&heading).into())
    }

    fn code_block(&mut self, kind: CodeBlockKind<'a>) -> Event<'a> {
        let lang = match &kind {
            CodeBlockKind::Fenced(info) => info.split_whitespace().next(),
            CodeBlockKind::Indented => None,
        };

        let mut code = String::new();
        for event in self.take_until(|e| matches!(e, Event::End(TagEnd::CodeBlock))) {
            if let Event::Text(text) = event {
                code.push_str(&text);
            }
        }

        if code.ends_with('\n') {
            code.pop();
        }

        let block = CodeBlock { lang, code: &code };
        Event::Html(self.rules.code_block(&block).into())
    }

    fn link(&mut self, link_type: LinkType, dest_url: CowStr<'a>, title: CowStr<'a>) -> Event<'a> {
        let events = self.take_until(|e| matches!(e, Event::End(TagEnd::Link)));
        let html = self.render(events);

        let href: Cow<'_, str> = match link_type {
            LinkType::Email => Cow::Owned(format!("mailto:{}", &*dest_url)),
            _ => Cow::Borrowed(&*dest_url),
        };

        let title = (!title.is_empty()).then_some(&*title);
        let link = Link { href: &href, title, html: &html };
        Event::InlineHtml(self.rules.link(&link).into())
    }
}

impl<'a, R: Rules, I: Iterator<Item = Event<'a>>> Iterator for RuleIterator<'_, R, I> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let event = match self.inner.next()? {
            Event::Start(Tag::Heading { level, .. }) => self.heading(level as usize),
            Event::Start(Tag::CodeBlock(kind)) => self.code_block(kind),
            Event::Start(Tag::Link { link_type, dest_url, title, .. }) => {
                self.link(link_type, dest_url, title)
            }
            event => event,
        };

        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use crate::markdown::*;

    static_assertions::assert_impl_all!(SpecRules: Send, Sync, Copy);

    fn render(input: &str) -> String {
        Markdown::from(input).plugin(WithRules::new(SpecRules)).run().unwrap()
    }

    fn link_href(markdown_href: &str) -> String {
        let html = render(&format!("[x]({markdown_href})"));
        let start = html.find("href=\"").unwrap() + "href=\"".len();
        let end = start + html[start..].find('"').unwrap();
        html[start..end].to_string()
    }

    #[test]
    fn shallow_headings_get_anchor_links() {
        assert_eq!(
            render("## Field Types\n"),
            "<h2 id=\"field-types\"><a class=\"anchor\" href=\"#field-types\" \
                aria-hidden=\"true\">#</a>Field Types</h2>\n"
        );

        for depth in 1..=3 {
            let html = render(&format!("{} Depth\n", "#".repeat(depth)));
            assert!(html.starts_with(&format!("<h{depth} id=\"depth\"><a class=\"anchor\"")));
        }
    }

    #[test]
    fn deep_headings_only_get_ids() {
        assert_eq!(render("#### Edge Cases\n"), "<h4 id=\"edge-cases\">Edge Cases</h4>\n");
        assert_eq!(render("###### Six\n"), "<h6 id=\"six\">Six</h6>\n");
    }

    #[test]
    fn heading_slug_ignores_inline_markup() {
        assert_eq!(
            render("### The `type` *field*\n"),
            "<h3 id=\"the-type-field\"><a class=\"anchor\" href=\"#the-type-field\" \
                aria-hidden=\"true\">#</a>The <code>type</code> <em>field</em></h3>\n"
        );

        let html = render("#### A <span>B</span> C\n");
        assert!(html.starts_with("<h4 id=\"a-b-c\">"), "{html}");
    }

    #[test]
    fn setext_and_empty_headings() {
        assert!(render("Setext Title\n===\n").starts_with("<h1 id=\"setext-title\">"));
        assert_eq!(render("#### !!!\n"), "<h4 id=\"\">!!!</h4>\n");
    }

    #[test]
    fn code_blocks_carry_language() {
        assert_eq!(
            render("```rust\nfn main() {}\n```\n"),
            "<pre data-lang=\"rust\"><code>fn main() {}</code></pre>\n"
        );

        assert_eq!(
            render("```yaml title=\"x\"\na: 1\n```\n"),
            "<pre data-lang=\"yaml\"><code>a: 1</code></pre>\n"
        );
    }

    #[test]
    fn code_blocks_without_language_omit_attribute() {
        assert_eq!(render("```\nplain\n```\n"), "<pre><code>plain</code></pre>\n");
        assert_eq!(render("    indented\n"), "<pre><code>indented</code></pre>\n");
        assert!(!render("```\nx\n```\n").contains("data-lang"));
    }

    #[test]
    fn code_block_escaping() {
        let html = render("```\nif a < b && c > d { \"&amp;\" }\n```\n");
        assert_eq!(
            html,
            "<pre><code>if a &lt; b &amp;&amp; c &gt; d { \"&amp;amp;\" }</code></pre>\n"
        );

        let body = &html["<pre><code>".len()..html.len() - "</code></pre>\n".len()];
        assert!(!body.contains('<') && !body.contains('>'));
        assert!(body.split('&').skip(1).all(|s| {
            s.starts_with("amp;") || s.starts_with("lt;") || s.starts_with("gt;")
        }));
    }

    #[test]
    fn code_block_keeps_interior_newlines() {
        assert_eq!(
            render("```sh\na\n\nb\n```\n"),
            "<pre data-lang=\"sh\"><code>a\n\nb</code></pre>\n"
        );
    }

    #[test]
    fn section_and_appendix_links_resolve() {
        assert_eq!(link_href("./06-matching.md"), "#section-06");
        assert_eq!(link_href("06-matching.md"), "#section-06");
        assert_eq!(link_href("/13-caching.md"), "#section-13");
        assert_eq!(link_href("appendix-b-expression-grammar.md"), "#appendix-b");
        assert_eq!(link_href("./appendix-d-compatibility.md"), "#appendix-d");
    }

    #[test]
    fn other_links_pass_through() {
        assert_eq!(link_href("https://example.com/06-matching.md"), "https://example.com/06-matching.md");
        assert_eq!(link_href("./6-matching.md"), "./6-matching.md");
        assert_eq!(link_href("./06-matching.md#rules"), "./06-matching.md#rules");
        assert_eq!(link_href("../06-matching.md"), "../06-matching.md");
        assert_eq!(link_href("appendix-e-extra.md"), "appendix-e-extra.md");
        assert_eq!(link_href("#section-02"), "#section-02");
    }

    #[test]
    fn link_titles_only_when_given() {
        assert_eq!(
            render("[Types](./05-types.md \"Type system\")\n"),
            "<p><a href=\"#section-05\" title=\"Type system\">Types</a></p>\n"
        );

        assert_eq!(
            render("[Types](./05-types.md)\n"),
            "<p><a href=\"#section-05\">Types</a></p>\n"
        );
    }

    #[test]
    fn links_inside_headings_resolve() {
        let html = render("## See [Links](08-links.md)\n");
        assert!(html.contains("id=\"see-links\""), "{html}");
        assert!(html.contains("<a href=\"#section-08\">Links</a></h2>"), "{html}");
    }

    #[test]
    fn link_text_keeps_markup() {
        assert_eq!(
            render("[**bold** `code`](https://mdbase.dev)\n"),
            "<p><a href=\"https://mdbase.dev\"><strong>bold</strong> <code>code</code></a></p>\n"
        );
    }

    #[test]
    fn autolinks() {
        assert_eq!(
            render("<https://mdbase.dev>\n"),
            "<p><a href=\"https://mdbase.dev\">https://mdbase.dev</a></p>\n"
        );

        assert_eq!(
            render("<dev@mdbase.dev>\n"),
            "<p><a href=\"mailto:dev@mdbase.dev\">dev@mdbase.dev</a></p>\n"
        );
    }

    #[test]
    fn rendering_is_deterministic() {
        let input = "# Overview\n\nSee [matching](./06-matching.md).\n\n```js\nx < y\n```\n\n\
            #### Notes\n\n| a | b |\n|---|---|\n| 1 | 2 |\n";

        assert_eq!(render(input), render(input));
    }

    #[test]
    fn default_rules_render_like_pulldown() {
        struct Plain;
        impl Rules for Plain {}

        let input = "## Title\n\n```rust\nlet x = 1;\n```\n\n[a](./01-terminology.md \"t\")\n";
        let html = Markdown::from(input).plugin(WithRules::new(Plain)).run().unwrap();
        let expected = Markdown::from(input).run().unwrap();
        assert_eq!(html, expected);
    }
}
