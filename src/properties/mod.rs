//! Typed reads from `key=value` property files.
//!
//! A [`PropertyReader`] parses its source once. If loading fails, the reader
//! is still usable: every read returns the load failure, so callers handle
//! a missing file and a missing key through the same [`Outcome`] chain.
//!
//! # Format
//!
//! - one `key=value` or `key: value` pair per line; the first `=` or `:` separates
//! - keys and values are trimmed
//! - blank lines and lines starting with `#` or `!` are ignored
//! - a line without a separator defines a key with an empty value
//! - a repeated key keeps its last value
//!
//! # Examples
//!
//! ```rust
//! use fncore::control::Outcome;
//! use fncore::properties::PropertyReader;
//!
//! let reader = PropertyReader::from_contents("host = localhost\nport: 8080\nweights=1.5, 2.5\n");
//!
//! let address = reader
//!     .read_as_string("host")
//!     .flat_map(|host| reader.read_as_int("port").map(|port| format!("{host}:{port}")));
//! assert_eq!(address, Outcome::success("localhost:8080".to_string()));
//!
//! let weights = reader.read_as_list_of_double("weights").map(|weights| weights.to_vec());
//! assert_eq!(weights, Outcome::success(vec![1.5, 2.5]));
//!
//! assert!(reader.read_as_string("user").is_failure());
//! ```

mod error;

pub use error::PropertyError;

use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::control::{Failure, Outcome, capture};
use crate::persistent::{PersistentList, traverse};

const LIST_SEPARATOR: &str = ",";

/// Reads typed values from a parsed property source.
#[derive(Debug, Clone)]
pub struct PropertyReader {
    properties: Outcome<HashMap<String, String>>,
}

impl PropertyReader {
    /// Loads and parses the file at `path`.
    ///
    /// A file that cannot be read yields a reader whose every read fails
    /// with a [`PropertyError`] as the cause.
    pub fn from_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => {
                let reader = Self::from_contents(&contents);
                tracing::debug!(path = %path.display(), "loaded property file");
                reader
            }
            Err(source) => {
                let error = PropertyError::io(path, source);
                tracing::warn!(path = %path.display(), error = %error, "failed to load property file");
                Self {
                    properties: Outcome::from_error(error),
                }
            }
        }
    }

    /// Parses properties from text already in memory.
    #[must_use]
    pub fn from_contents(contents: &str) -> Self {
        Self {
            properties: Outcome::Success(parse(contents)),
        }
    }

    /// Reads the raw value of `name`.
    ///
    /// A missing key is a failure with the message ``"Property `name` not found"``.
    pub fn read_as_string(&self, name: &str) -> Outcome<String> {
        self.properties.as_ref().flat_map(|properties| {
            Outcome::from_nullable_or(
                properties.get(name).cloned(),
                format!("Property `{name}` not found"),
            )
        })
    }

    /// Reads `name` as a signed integer.
    pub fn read_as_int(&self, name: &str) -> Outcome<i64> {
        self.parse_value(name, "Int")
    }

    /// Reads `name` with the type's [`FromStr`] implementation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::net::Ipv4Addr;
    ///
    /// use fncore::control::Outcome;
    /// use fncore::properties::PropertyReader;
    ///
    /// let reader = PropertyReader::from_contents("bind=127.0.0.1");
    /// assert_eq!(reader.read_as::<Ipv4Addr>("bind"), Outcome::success(Ipv4Addr::LOCALHOST));
    /// ```
    pub fn read_as<T>(&self, name: &str) -> Outcome<T>
    where
        T: FromStr,
        T::Err: Error + Send + Sync + 'static,
    {
        self.parse_value(name, std::any::type_name::<T>())
    }

    fn parse_value<T>(&self, name: &str, type_name: &str) -> Outcome<T>
    where
        T: FromStr,
        T::Err: Error + Send + Sync + 'static,
    {
        self.read_as_string(name).flat_map(|text| {
            Outcome::try_of(|| text.parse::<T>()).map_failure(format!(
                "Invalid value while parsing property `{name}` to {type_name}: `{text}`"
            ))
        })
    }

    /// Reads a comma-separated value, parsing each trimmed item with `parse`.
    ///
    /// The first item that fails to parse fails the whole read.
    pub fn read_as_list<T, E, F>(&self, name: &str, mut parse: F) -> Outcome<PersistentList<T>>
    where
        E: Error + Send + Sync + 'static,
        F: FnMut(&str) -> Result<T, E>,
    {
        self.read_as_string(name).flat_map(|text| {
            let items = PersistentList::from_separated(&text, LIST_SEPARATOR);
            traverse(&items, |item| Outcome::try_of(|| parse(item.trim()))).map_failure(format!(
                "Invalid value while parsing property `{name}` to List: `{text}`"
            ))
        })
    }

    /// Reads a comma-separated list of integers.
    pub fn read_as_list_of_int(&self, name: &str) -> Outcome<PersistentList<i64>> {
        self.read_as_list(name, str::parse::<i64>)
    }

    /// Reads a comma-separated list of floating point numbers.
    pub fn read_as_list_of_double(&self, name: &str) -> Outcome<PersistentList<f64>> {
        self.read_as_list(name, str::parse::<f64>)
    }

    /// Reads a comma-separated list of `true`/`false` values.
    pub fn read_as_list_of_bool(&self, name: &str) -> Outcome<PersistentList<bool>> {
        self.read_as_list(name, str::parse::<bool>)
    }

    /// Reads `name` and converts it with `function`.
    ///
    /// A failure returned by `function` is passed through; a panic inside it
    /// becomes a failure naming the value and the property.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fncore::control::Outcome;
    /// use fncore::properties::PropertyReader;
    ///
    /// #[derive(Debug, PartialEq)]
    /// enum Mode {
    ///     Serial,
    ///     Parallel,
    /// }
    ///
    /// let reader = PropertyReader::from_contents("mode=PARALLEL");
    /// let mode = reader.read_as_type("mode", |text| match text {
    ///     "SERIAL" => Outcome::success(Mode::Serial),
    ///     "PARALLEL" => Outcome::success(Mode::Parallel),
    ///     other => Outcome::failure(format!("unknown mode `{other}`")),
    /// });
    /// assert_eq!(mode, Outcome::success(Mode::Parallel));
    /// ```
    pub fn read_as_type<T, F>(&self, name: &str, function: F) -> Outcome<T>
    where
        F: FnOnce(&str) -> Outcome<T>,
    {
        self.read_as_string(name).flat_map(|text| match capture(|| function(&text)) {
            Ok(outcome) => outcome,
            Err(panic) => Outcome::Failure(
                Failure::illegal_state(format!(
                    "Invalid value `{text}` while parsing property `{name}`"
                ))
                .with_cause(panic),
            ),
        })
    }
}

fn parse(contents: &str) -> HashMap<String, String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(['#', '!']))
        .map(|line| match line.split_once(['=', ':']) {
            Some((key, value)) => (key.trim().to_owned(), value.trim().to_owned()),
            None => (line.to_owned(), String::new()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("name=value", "value")]
    #[case("name = value ", "value")]
    #[case("name: value", "value")]
    #[case("name=a=b", "a=b")]
    #[case("name:a=b", "a=b")]
    #[case("name", "")]
    fn test_separator_handling(#[case] line: &str, #[case] expected: &str) {
        let reader = PropertyReader::from_contents(line);
        assert_eq!(reader.read_as_string("name"), Outcome::success(expected.to_string()));
    }

    #[rstest]
    fn test_comments_and_blank_lines_are_ignored() {
        let properties = parse("# comment\n! other comment\n\n  \nkey=value\n");
        assert_eq!(properties.len(), 1);
        assert_eq!(properties.get("key").map(String::as_str), Some("value"));
    }

    #[rstest]
    fn test_last_duplicate_wins() {
        let reader = PropertyReader::from_contents("key=first\nkey=second");
        assert_eq!(reader.read_as_string("key"), Outcome::success("second".to_string()));
    }

    #[rstest]
    fn test_missing_key_message() {
        let reader = PropertyReader::from_contents("");
        assert_eq!(
            reader.read_as_string("host"),
            Outcome::failure_with(Failure::null_reference("Property `host` not found"))
        );
    }

    #[rstest]
    fn test_invalid_int_names_property_and_value() {
        let reader = PropertyReader::from_contents("port=eighty");
        let Outcome::Failure(failure) = reader.read_as_int("port") else {
            panic!("expected a failure");
        };
        assert_eq!(
            failure.message(),
            "Invalid value while parsing property `port` to Int: `eighty`"
        );
    }

    #[rstest]
    fn test_list_with_bad_item_fails() {
        let reader = PropertyReader::from_contents("list=1, two, 3");
        assert!(reader.read_as_list_of_int("list").is_failure());
    }

    #[rstest]
    fn test_list_of_bool() {
        let reader = PropertyReader::from_contents("flags=true, false");
        assert_eq!(
            reader.read_as_list_of_bool("flags").map(|flags| flags.to_vec()),
            Outcome::success(vec![true, false])
        );
    }

    #[rstest]
    fn test_read_as_type_panic_is_reported() {
        let reader = PropertyReader::from_contents("level=high");
        let outcome: Outcome<u8> = reader.read_as_type("level", |_| panic!("unparseable"));
        let Outcome::Failure(failure) = outcome else {
            panic!("expected a failure");
        };
        assert_eq!(failure.message(), "Invalid value `high` while parsing property `level`");
        assert_eq!(failure.messages()[1], "unparseable");
    }
}
