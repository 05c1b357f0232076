use folio::{Entry, Manifest};

const APPENDICES: &str = "Appendices";

/// The mdbase specification, in reading order.
pub fn mdbase() -> Manifest {
    Manifest::new_unchecked(vec![
        Entry::new("00-overview.md", "00", "Overview", "section-00"),
        Entry::new("01-terminology.md", "01", "Terminology", "section-01"),
        Entry::new("02-collection-layout.md", "02", "Collection Layout", "section-02"),
        Entry::new("03-frontmatter.md", "03", "Frontmatter", "section-03"),
        Entry::new("04-configuration.md", "04", "Configuration", "section-04"),
        Entry::new("05-types.md", "05", "Types", "section-05"),
        Entry::new("06-matching.md", "06", "Matching", "section-06"),
        Entry::new("07-field-types.md", "07", "Field Types", "section-07"),
        Entry::new("08-links.md", "08", "Links", "section-08"),
        Entry::new("09-validation.md", "09", "Validation", "section-09"),
        Entry::new("10-querying.md", "10", "Querying", "section-10"),
        Entry::new("11-expressions.md", "11", "Expressions", "section-11"),
        Entry::new("12-operations.md", "12", "Operations", "section-12"),
        Entry::new("13-caching.md", "13", "Caching", "section-13"),
        Entry::new("14-conformance.md", "14", "Conformance", "section-14"),
        Entry::new("15-watching.md", "15", "Watching", "section-15"),
        Entry::new("appendix-a-examples.md", "A", "Examples", "appendix-a").grouped(APPENDICES),
        Entry::new("appendix-b-expression-grammar.md", "B", "Expression Grammar", "appendix-b")
            .grouped(APPENDICES),
        Entry::new("appendix-c-error-codes.md", "C", "Error Codes", "appendix-c").grouped(APPENDICES),
        Entry::new("appendix-d-compatibility.md", "D", "Compatibility", "appendix-d").grouped(APPENDICES),
    ])
}
