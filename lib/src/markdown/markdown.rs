use pulldown_cmark::{html, Options, Parser};

use crate::error::Result;
use crate::markdown::Plugin;

/// A markdown-to-HTML conversion over a chain of [`Plugin`]s.
///
/// ```rust
/// use folio::markdown::{Markdown, FrontMatter, WithRules, SpecRules};
///
/// let html = Markdown::from("---\ntitle: x\n---\nSee [types](./05-types.md).\n")
///     .plugin(FrontMatter::strip())
///     .plugin(WithRules::new(SpecRules))
///     .run()
///     .unwrap();
///
/// assert_eq!(html, "<p>See <a href=\"#section-05\">types</a>.</p>\n");
/// ```
#[derive(Debug, Clone)]
pub struct Markdown<'i, P = ()> {
    input: &'i str,
    options: Options,
    plugins: P,
}

impl<'i> Markdown<'i, ()> {
    pub fn from(input: &'i str) -> Self {
        Self { input, options: Markdown::default_options(), plugins: () }
    }

    /// Tables, footnotes, strikethrough, and task lists. Smart punctuation,
    /// heading attributes, and metadata blocks are left off: headings take
    /// their ids from the rules and metadata is stripped by [`FrontMatter`].
    ///
    /// [`FrontMatter`]: crate::markdown::FrontMatter
    pub fn default_options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
    }
}

impl<'i, P> Markdown<'i, P> {
    pub fn plugin<T: Plugin>(self, plugin: T) -> Markdown<'i, (P, T)> {
        Markdown {
            input: self.input,
            options: self.options,
            plugins: (self.plugins, plugin),
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }
}

impl<P: Plugin> Markdown<'_, P> {
    pub fn run(mut self) -> Result<String> {
        let input = self.plugins.preprocess(self.input)?;
        let parser = Parser::new_ext(&input, self.options);

        let mut output = String::with_capacity(input.len() + input.len() / 2);
        html::push_html(&mut output, self.plugins.remap(parser));
        Ok(output)
    }
}
