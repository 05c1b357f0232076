#![doc = svgbobdoc::transform!(
//! Assembles an ordered set of markdown documents into one HTML page.
//!
//! # Overview
//!
//! Folio renders a specification written as many markdown files, one per
//! section, into a single navigable page. Sources are listed, in order, in a
//! [`Manifest`]. Every source is rendered with the same [`Rules`]:
//!
//!   * Headings get an `id` derived from their text by [`util::slugify()`],
//!     and headings up to depth 3 a `#` self-link.
//!   * Code blocks keep their language as a `data-lang` attribute.
//!   * Links to sibling sources (`./06-matching.md`, `appendix-b-grammar.md`)
//!     become links to the sections' anchors (`#section-06`, `#appendix-b`).
//!
//! Data flows in one direction:
//!
//! ```svgbob
//!                     +----------+
//!                     | Manifest |
//!                     +----+-----+
//!                          |
//!            +-------------+-------------+
//!            |                           |
//!            v                           v
//!  +------------------+        +--------------------+
//!  | assemble()       |        | navigation()       |
//!  |  strip metadata  |        |  group headers     |
//!  |  render w/ Rules |        |  sidebar links     |
//!  +--------+---------+        +---------+----------+
//!           |                            |
//!           +-------------+--------------+
//!                         |
//!                         v
//!               +--------------------+
//!               | Template           |      +--------+
//!               |  {{SIDEBAR_LINKS}} +----->| output |
//!               |  {{SPEC_CONTENT}}  |      +--------+
//!               +--------------------+
//! ```
//!
//! ## Building
//!
//! A [`Site`] ties a [`Layout`] of directories to a manifest. A build:
//!
//! 1. Creates the output directory.
//! 2. Copies the static assets directory into it.
//! 3. Copies the pass-through page templates unchanged.
//! 4. Renders every manifest entry whose source exists and the navigation,
//!    substitutes both into the spec page template, and writes it.
//!
//! Missing sources are skipped with a warning; a missing template or assets
//! directory fails the build.
)]

#[macro_use]
pub mod error;
pub mod util;
pub mod markdown;
pub mod manifest;
pub mod assemble;
pub mod navigation;
pub mod page;
pub mod assets;
pub mod builder;

pub use builder::{BuildReport, Layout, Site};
pub use manifest::{Entry, Manifest};
pub use markdown::{Rules, SpecRules};
