use std::{fmt, io};
use std::panic::Location;
use std::error::Error as StdError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// An error with one or more details and, optionally, the error that caused
/// it. Displayed as an indented chain, innermost cause last.
#[derive(Debug)]
pub struct Error {
    details: Vec<Box<dyn ErrorDetail>>,
    cause: Option<Box<Error>>,
    location: &'static Location<'static>,
}

/// A displayable error fragment with optional `key: value` context lines.
pub trait ErrorDetail: fmt::Display + fmt::Debug + Send + Sync {
    fn context(&self) -> Vec<(Option<String>, String)> { vec![] }
}

impl Error {
    #[track_caller]
    pub fn from_std<E>(error: E) -> Self
        where E: StdError + Send + Sync + 'static
    {
        Error::from(Box::new(error) as Box<dyn StdError + Send + Sync>)
    }

    /// Makes `self` the innermost cause of `outer` and returns `outer`.
    pub fn chain(self, mut outer: Error) -> Self {
        fn attach(error: Error, behind: &mut Error) {
            match behind.cause.as_mut() {
                Some(cause) => attach(error, cause),
                None => behind.cause = Some(Box::new(error)),
            }
        }

        attach(self, &mut outer);
        outer
    }

    /// The first detail's message.
    pub fn message(&self) -> String {
        self.details.first()
            .map(|d| d.to_string())
            .unwrap_or_default()
    }

    pub fn cause(&self) -> Option<&Error> {
        self.cause.as_deref()
    }
}

impl ErrorDetail for &(dyn StdError + Send + Sync) {
    fn context(&self) -> Vec<(Option<String>, String)> {
        let mut sources = vec![];
        let mut source = self.source();
        while let Some(e) = source {
            sources.push((None, e.to_string()));
            source = e.source();
        }

        sources
    }
}

impl ErrorDetail for Box<dyn StdError + Send + Sync> {
    fn context(&self) -> Vec<(Option<String>, String)> {
        let error: &(dyn StdError + Send + Sync) = &**self;
        error.context()
    }
}

macro_rules! impl_error_detail_with_std_error {
    ($T:ty) => {
        impl $crate::error::ErrorDetail for $T {
            fn context(&self) -> Vec<(Option<String>, String)> {
                let error: &(dyn std::error::Error + Send + Sync) = self;
                error.context()
            }
        }
    }
}

impl_error_detail_with_std_error!(io::Error);
impl_error_detail_with_std_error!(toml::de::Error);
impl_error_detail_with_std_error!(minijinja::Error);

impl ErrorDetail for String { }
impl ErrorDetail for &str { }

impl Clone for Error {
    fn clone(&self) -> Self {
        Error {
            details: self.details.iter()
                .map(|detail| Box::new(Message::from(&**detail)) as Box<dyn ErrorDetail>)
                .collect(),
            cause: self.cause.clone(),
            location: self.location,
        }
    }
}

impl<T: ErrorDetail + 'static> From<T> for Error {
    #[track_caller]
    fn from(detail: T) -> Self {
        Error {
            details: vec![Box::new(detail)],
            cause: None,
            location: Location::caller(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn write_level(f: &mut fmt::Formatter<'_>, error: &Error, depth: usize) -> fmt::Result {
            let indent = " ".repeat(depth * 4);
            let newline = format!("\n{indent}");
            for detail in &error.details {
                writeln!(f, "{indent}{}", format!("{detail:#}").replace('\n', &newline))?;
                for (key, value) in detail.context() {
                    let value = value.replace('\n', &newline);
                    match key {
                        Some(key) => writeln!(f, "{indent}{key}: {value}")?,
                        None => writeln!(f, "{indent}{value}")?,
                    }
                }

                if std::env::var_os("RUST_BACKTRACE").is_some() {
                    writeln!(f, "{indent}[{}]", error.location)?;
                }
            }

            match &error.cause {
                Some(cause) => write_level(f, cause, depth + 1),
                None => Ok(()),
            }
        }

        write_level(f, self, 0)
    }
}

/// A free-form error detail, built by the `error!` macro.
#[derive(Debug)]
pub struct Message {
    pub message: String,
    pub parameters: Vec<(Option<String>, String)>,
}

impl From<&dyn ErrorDetail> for Message {
    #[inline]
    fn from(detail: &dyn ErrorDetail) -> Self {
        Message {
            message: detail.to_string(),
            parameters: detail.context()
        }
    }
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

/// Builds an [`Error`](crate::error::Error) from a message followed by
/// context entries, each either `value` or `key => value`.
#[doc(hidden)]
#[macro_export]
macro_rules! error {
    ($msg:expr $(, $($rest:tt)*)?) => (
        $crate::error::Error::from($crate::error::Message {
            message: $msg.to_string(),
            parameters: {
                #[allow(unused_mut)]
                let mut v: Vec<(Option<String>, String)> = Vec::new();
                $($crate::error!(@param v $($rest)*);)?
                v
            },
        })
    );

    (@param $v:ident $key:expr => $value:expr $(, $($rest:tt)*)?) => {
        $v.push((Some($key.to_string()), $value.to_string()));
        $($crate::error!(@param $v $($rest)*);)?
    };

    (@param $v:ident $value:expr $(, $($rest:tt)*)?) => {
        $v.push((None, $value.to_string()));
        $($crate::error!(@param $v $($rest)*);)?
    };

    (@param $v:ident) => { };
}

pub trait Chainable<T> {
    /// On error, wraps the error as the cause of `outer`.
    fn chain(self, outer: impl Into<Error>) -> Result<T>;

    fn chain_with<F, E>(self, f: F) -> Result<T>
        where F: FnOnce() -> E, E: Into<Error>;
}

impl<T, E: Into<Error>> Chainable<T> for Result<T, E> {
    #[track_caller]
    fn chain(self, outer: impl Into<Error>) -> Result<T> {
        self.map_err(|e| e.into().chain(outer.into()))
    }

    #[track_caller]
    fn chain_with<F, Err>(self, f: F) -> Result<T>
        where F: FnOnce() -> Err, Err: Into<Error>,
    {
        self.map_err(|e| e.into().chain(f().into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_macro_collects_context() {
        let e = error!("failed to render page", "path" => "index.md", "template error");
        let rendered = e.to_string();
        assert!(rendered.starts_with("failed to render page\npath: index.md\ntemplate error\n"));
    }

    #[test]
    fn chain_nests_the_cause() {
        let inner: Result<()> = Err(io::Error::new(io::ErrorKind::NotFound, "gone").into());
        let e = inner.chain(error!("failed to import file")).unwrap_err();
        assert_eq!(e.message(), "failed to import file");
        assert_eq!(e.cause().map(|c| c.message()).as_deref(), Some("gone"));
        assert!(e.to_string().lines().any(|line| line == "    gone"));
    }

    #[test]
    fn chain_appends_to_existing_cause() {
        let first = error!("first");
        let second = first.chain(error!("second"));
        let third = second.chain(error!("third"));
        let order: Vec<_> = std::iter::successors(Some(&third), |e| e.cause())
            .map(|e| e.message())
            .collect();

        assert_eq!(order, ["third", "second", "first"]);
    }
}
