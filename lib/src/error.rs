use std::{fmt, io};
use std::panic::Location;
use std::error::Error as StdError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A build failure: one or more details, each with optional key/value
/// context, and the chain of errors that led to it.
#[derive(Debug)]
pub struct Error {
    detail: Vec<Box<dyn ErrorDetail>>,
    prev: Option<Box<Error>>,
    location: &'static Location<'static>,
}

pub trait ErrorDetail: fmt::Display + fmt::Debug + Send + Sync {
    fn context(&self) -> Vec<(Option<String>, String)> { vec![] }
}

impl Error {
    /// Places `self` at the end of `other`'s chain of causes and returns
    /// `other`, so the most recent context is displayed first.
    pub fn chain(self, mut other: Error) -> Self {
        fn attach(error: Error, behind: &mut Error) {
            match behind.prev.as_mut() {
                Some(prev) => attach(error, prev),
                None => behind.prev = Some(Box::new(error)),
            }
        }

        attach(self, &mut other);
        other
    }

    /// The message of the outermost detail.
    pub fn message(&self) -> String {
        self.detail.first()
            .map(|detail| detail.to_string())
            .unwrap_or_default()
    }

    /// Iterates over this error and every error it was chained onto.
    pub fn causes(&self) -> impl Iterator<Item = &Error> {
        std::iter::successors(Some(self), |e| e.prev.as_deref())
    }
}

impl ErrorDetail for &(dyn StdError + Send + Sync) {
    fn context(&self) -> Vec<(Option<String>, String)> {
        let mut ctxt = vec![];
        let mut error = self.source();
        while let Some(e) = error {
            ctxt.push((None, e.to_string()));
            error = e.source();
        }

        ctxt
    }
}

macro_rules! impl_error_detail_with_std_error {
    ($($T:ty),* $(,)?) => {
        $(
            impl $crate::error::ErrorDetail for $T {
                fn context(&self) -> Vec<(Option<String>, String)> {
                    let error: &(dyn std::error::Error + Send + Sync) = self;
                    error.context()
                }
            }
        )*
    }
}

impl_error_detail_with_std_error!(io::Error, toml::de::Error, jwalk::Error);

impl ErrorDetail for String { }
impl ErrorDetail for &'static str { }

impl<T: ErrorDetail + 'static> From<T> for Error {
    #[track_caller]
    fn from(detail: T) -> Self {
        Error {
            prev: None,
            detail: vec![Box::new(detail)],
            location: Location::caller(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[derive(Copy, Clone)] struct Indent(usize);

        impl fmt::Display for Indent {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                for _ in 0..(self.0 * 4) { write!(f, " ")? }
                Ok(())
            }
        }

        struct Nested<'a>(Indent, &'a Error);

        impl fmt::Display for Nested<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let Nested(indent, e) = self;
                let indent_line = format!("\n{indent}");

                for detail in &e.detail {
                    writeln!(f, "{indent}{}", detail.to_string().replace('\n', &indent_line))?;
                    for (key, value) in detail.context() {
                        let value = value.replace('\n', &indent_line);
                        match key {
                            Some(key) => writeln!(f, "{indent}{key}: {value}")?,
                            None => writeln!(f, "{indent}{value}")?,
                        }
                    }

                    if std::env::var_os("RUST_BACKTRACE").is_some() {
                        writeln!(f, "{indent}[{}]", e.location)?;
                    }
                }

                if let Some(prev) = &e.prev {
                    Nested(Indent(indent.0 + 1), prev).fmt(f)?;
                }

                Ok(())
            }
        }

        Nested(Indent(0), self).fmt(f)
    }
}

/// A free-form error message with key/value parameters, built by [`error!`].
#[derive(Debug)]
pub struct Message {
    pub message: String,
    pub parameters: Vec<(Option<String>, String)>,
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.message.fmt(f)
    }
}

impl ErrorDetail for Message {
    fn context(&self) -> Vec<(Option<String>, String)> {
        self.parameters.clone()
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! err {
    ($($token:tt)*) => (Err($crate::error!($($token)*)));
}

/// Builds an [`Error`](crate::error::Error) from a message and an optional
/// list of `"key" => value` or bare `value` context parameters.
///
/// ```rust
/// let path = "templates/spec.html";
/// let error = folio::error!("failed to read template", "path" => path);
/// assert_eq!(error.message(), "failed to read template");
/// ```
#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($msg:expr, $($rest:tt)*) => (
        $crate::error::Error::from($crate::error::Message {
            message: $msg.to_string(),
            parameters: {
                #[allow(unused_mut)]
                let mut v: Vec<(Option<String>, String)> = Vec::new();
                $crate::error!(@param v $($rest)*);
                v
            },
        })
    );

    ($msg:expr) => ( $crate::error!($msg,) );

    (@param $v:ident $key:expr => $value:expr, $($rest:tt)*) => {
        $crate::error!(@param $v $key => $value);
        $crate::error!(@param $v $($rest)*);
    };

    (@param $v:ident $key:expr => $value:expr) => {
        $v.push((Some($key.to_string()), $value.to_string()));
    };

    (@param $v:ident $value:expr, $($rest:tt)*) => {
        $crate::error!(@param $v $value);
        $crate::error!(@param $v $($rest)*);
    };

    (@param $v:ident $value:expr) => {
        $v.push((None, $value.to_string()));
    };

    (@param $v:ident $(,)?) => { };
}

pub trait Chainable<T> {
    fn chain(self, other: impl Into<Error>) -> Result<T>;

    fn chain_with<F, E>(self, f: F) -> Result<T>
        where F: FnOnce() -> E, E: Into<Error>;
}

impl<T, E: Into<Error>> Chainable<T> for Result<T, E> {
    #[track_caller]
    fn chain(self, other: impl Into<Error>) -> Result<T> {
        self.map_err(|e| e.into().chain(other.into()))
    }

    #[track_caller]
    fn chain_with<F, Err>(self, f: F) -> Result<T>
        where F: FnOnce() -> Err, Err: Into<Error>,
    {
        self.map_err(|e| e.into().chain(f().into()))
    }
}
