use std::borrow::Cow;

use crate::error::Result;
use crate::markdown::Plugin;

const OPEN: &str = "---\n";
const CLOSE: &str = "\n---\n";

/// Removes a leading `---`-delimited metadata block.
#[derive(Debug, Default, Clone, Copy)]
pub struct FrontMatter;

impl FrontMatter {
    pub fn strip() -> Self {
        FrontMatter
    }
}

/// Returns `input` without its metadata block.
///
/// The block must start at the very first byte with a `---` line and ends at
/// the first following `---` line. Without a closed block at the start,
/// `input` is returned as is.
///
/// ```rust
/// use folio::markdown::strip_front_matter;
///
/// assert_eq!(strip_front_matter("---\nid: 1\n---\n# Hi\n"), "# Hi\n");
/// assert_eq!(strip_front_matter("---\nid: 1\n# Hi\n"), "---\nid: 1\n# Hi\n");
/// ```
pub fn strip_front_matter(input: &str) -> &str {
    let Some(rest) = input.strip_prefix(OPEN) else {
        return input;
    };

    match memchr::memmem::find(rest.as_bytes(), CLOSE.as_bytes()) {
        Some(i) => &rest[i + CLOSE.len()..],
        None => input,
    }
}

impl Plugin for FrontMatter {
    fn preprocess<'a>(&self, input: &'a str) -> Result<Cow<'a, str>> {
        Ok(Cow::Borrowed(strip_front_matter(input)))
    }
}

#[cfg(test)]
mod tests {
    use super::strip_front_matter;

    #[test]
    fn strips_leading_block() {
        let input = "---\ntitle: Matching\nid: 6\n---\n# Matching\n\nBody.\n";
        assert_eq!(strip_front_matter(input), "# Matching\n\nBody.\n");
    }

    #[test]
    fn stops_at_first_closing_line() {
        let input = "---\na: 1\n---\nfirst\n---\nsecond\n";
        assert_eq!(strip_front_matter(input), "first\n---\nsecond\n");
    }

    #[test]
    fn empty_block_with_blank_line() {
        assert_eq!(strip_front_matter("---\n\n---\nbody"), "body");
    }

    #[test]
    fn adjacent_delimiters_are_not_a_block() {
        assert_eq!(strip_front_matter("---\n---\nbody"), "---\n---\nbody");
    }

    #[test]
    fn untouched_without_leading_block() {
        let inputs = [
            "# Title\n\n---\nkey: value\n---\nmore\n",
            " ---\na: 1\n---\nbody\n",
            "----\na: 1\n---\nbody\n",
            "---\nunterminated: true\n# Body\n",
            "---\na: 1\n---",
            "",
        ];

        for input in inputs {
            assert_eq!(strip_front_matter(input), input);
        }
    }
}
