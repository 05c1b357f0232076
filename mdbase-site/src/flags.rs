use std::path::PathBuf;

xflags::xflags! {
    /// Builds the mdbase.dev site from the specification sources.
    cmd mdbase-site {
        /// Project root holding the specification sources. Defaults to `.`.
        optional root: PathBuf
        /// Site configuration file. Defaults to `ROOT/site/site.toml`.
        optional -c, --config path: PathBuf
        /// Output directory, overriding the configured one.
        optional -o, --output path: PathBuf
        /// Log per-file progress.
        optional -v, --verbose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> xflags::Result<MdbaseSite> {
        MdbaseSite::from_vec(args.iter().map(Into::into).collect())
    }

    #[test]
    fn defaults() {
        let flags = parse(&[]).unwrap();
        assert_eq!(flags.root, None);
        assert_eq!(flags.config, None);
        assert_eq!(flags.output, None);
        assert!(!flags.verbose);
    }

    #[test]
    fn all_flags() {
        let flags = parse(&["spec", "--config", "site.toml", "-o", "public", "-v"]).unwrap();
        assert_eq!(flags.root, Some(PathBuf::from("spec")));
        assert_eq!(flags.config, Some(PathBuf::from("site.toml")));
        assert_eq!(flags.output, Some(PathBuf::from("public")));
        assert!(flags.verbose);
    }

    #[test]
    fn unknown_flag() {
        assert!(parse(&["--watch"]).is_err());
    }
}
