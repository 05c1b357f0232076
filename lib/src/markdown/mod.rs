mod markdown;
mod frontmatter;
mod rules;

pub use markdown::*;
pub use frontmatter::*;
pub use rules::*;

use std::borrow::Cow;

use pulldown_cmark::Event;

use crate::error::Result;

/// A stage in a [`Markdown`] pipeline.
///
/// `preprocess` sees the raw source text before parsing; `remap` sees the
/// parser's event stream and may rewrite it. Both default to the identity.
pub trait Plugin {
    #[inline(always)]
    fn preprocess<'a>(&self, input: &'a str) -> Result<Cow<'a, str>> {
        Ok(Cow::Borrowed(input))
    }

    #[inline(always)]
    fn remap<'a, I>(&'a mut self, events: I) -> impl Iterator<Item = Event<'a>> + 'a
        where I: Iterator<Item = Event<'a>> + 'a
    {
        events
    }
}

impl Plugin for () { }

/// Runs `A` and then `B`: `B` preprocesses `A`'s output and remaps `A`'s
/// events.
impl<A: Plugin, B: Plugin> Plugin for (A, B) {
    fn preprocess<'a>(&self, input: &'a str) -> Result<Cow<'a, str>> {
        match self.0.preprocess(input)? {
            Cow::Borrowed(input) => self.1.preprocess(input),
            Cow::Owned(input) => Ok(Cow::Owned(self.1.preprocess(&input)?.into_owned())),
        }
    }

    fn remap<'a, I>(&'a mut self, events: I) -> impl Iterator<Item = Event<'a>> + 'a
        where I: Iterator<Item = Event<'a>> + 'a
    {
        let (first, second) = self;
        second.remap(first.remap(events))
    }
}
