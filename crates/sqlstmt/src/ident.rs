//! SQL identifier quoting.
//!
//! These helpers are plain string utilities. The statement builders never call
//! them: callers quote names themselves before handing them to a builder.
//!
//! - Words are split on single spaces.
//! - `*` and a non-leading `AS` stay bare.
//! - Dotted names are quoted segment by segment.
//!
//! # Example
//! ```ignore
//! use sqlstmt::{quote_column, QuoteStyle};
//!
//! assert_eq!(
//!     quote_column("users.id AS userId", QuoteStyle::Backtick),
//!     "`users`.`id` AS `userId`"
//! );
//! ```

/// Identifier quote characters of a SQL dialect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum QuoteStyle {
    /// `"name"` (ANSI, SQLite, Postgres).
    #[default]
    DoubleQuote,
    /// `` `name` `` (MySQL family).
    Backtick,
    /// `[name]` (SQL Server).
    Brackets,
    /// Leave names unquoted.
    None,
    Custom { open: String, close: String },
}

impl QuoteStyle {
    /// Opening and closing quote strings.
    pub fn delimiters(&self) -> (&str, &str) {
        match self {
            QuoteStyle::DoubleQuote => ("\"", "\""),
            QuoteStyle::Backtick => ("`", "`"),
            QuoteStyle::Brackets => ("[", "]"),
            QuoteStyle::None => ("", ""),
            QuoteStyle::Custom { open, close } => (open.as_str(), close.as_str()),
        }
    }

    /// Quote `name` with this style. See [`quote_identifier`].
    pub fn quote(&self, name: &str) -> String {
        let (open, close) = self.delimiters();
        quote_identifier(name, open, Some(close))
    }
}

/// Quote every word of `name`, segment by segment.
///
/// `close` defaults to `open`; an empty `open` leaves words untouched.
/// Existing quotes are not stripped, see [`quote_column`] for that.
pub fn quote_identifier(name: &str, open: &str, close: Option<&str>) -> String {
    let close = close.unwrap_or(open);
    let separator = format!("{close}.{open}");

    name.split(' ')
        .enumerate()
        .map(|(i, word)| {
            if word == "*" {
                "*".to_string()
            } else if i > 0 && word.eq_ignore_ascii_case("AS") {
                "AS".to_string()
            } else {
                format!("{open}{}{close}", word.replace('.', &separator))
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Quote a column expression, normalizing an implicit alias.
///
/// `password pass` and ``password `pass` `` both become
/// `` `password` AS `pass` `` with [`QuoteStyle::Backtick`].
pub fn quote_column(expr: &str, style: QuoteStyle) -> String {
    let (open, close) = style.delimiters();
    let words: Vec<String> = expr
        .split_whitespace()
        .map(|word| strip_quotes(word, open, close))
        .collect();

    let parts: Vec<String> = match words.as_slice() {
        [column, alias] => vec![
            quote_segments(column, open, close),
            "AS".to_string(),
            quote_segments(alias, open, close),
        ],
        _ => words
            .iter()
            .enumerate()
            .map(|(i, word)| {
                if i > 0 && word.eq_ignore_ascii_case("AS") {
                    "AS".to_string()
                } else {
                    quote_segments(word, open, close)
                }
            })
            .collect(),
    };

    parts.join(" ")
}

/// Quote the column part of ORDER BY items, keeping `ASC`/`DESC` bare.
///
/// `"age DESC, name"` becomes `"\"age\" DESC, \"name\""` with the default style.
pub fn quote_order_by(clause: &str, style: QuoteStyle) -> String {
    let (open, close) = style.delimiters();

    clause
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| {
            let mut words = item.split_whitespace();
            let column = words.next().unwrap_or_default();
            let mut out = quote_segments(&strip_quotes(column, open, close), open, close);
            for word in words {
                out.push(' ');
                if word.eq_ignore_ascii_case("ASC") || word.eq_ignore_ascii_case("DESC") {
                    out.push_str(&word.to_ascii_uppercase());
                } else {
                    out.push_str(word);
                }
            }
            out
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn quote_segments(word: &str, open: &str, close: &str) -> String {
    if word == "*" {
        return "*".to_string();
    }
    word.split('.')
        .map(|segment| {
            if segment == "*" {
                "*".to_string()
            } else {
                format!("{open}{segment}{close}")
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

fn strip_quotes(word: &str, open: &str, close: &str) -> String {
    let mut out = word.to_string();
    for quote in [open, close] {
        if !quote.is_empty() {
            out = out.replace(quote, "");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_identifier_default() {
        assert_eq!(
            quote_identifier("users.name AS username", "\"", None),
            r#""users"."name" AS "username""#
        );
    }

    #[test]
    fn quote_identifier_backtick_implicit_alias() {
        assert_eq!(
            quote_identifier("users.name username", "`", None),
            "`users`.`name` `username`"
        );
    }

    #[test]
    fn quote_identifier_empty_quote() {
        assert_eq!(
            quote_identifier("users.name AS username", "", None),
            "users.name AS username"
        );
    }

    #[test]
    fn quote_identifier_brackets() {
        assert_eq!(
            QuoteStyle::Brackets.quote("users.name as username"),
            "[users].[name] AS [username]"
        );
    }

    #[test]
    fn quote_identifier_star_and_leading_as() {
        assert_eq!(quote_identifier("*", "\"", None), "*");
        assert_eq!(quote_identifier("as x", "\"", None), r#""as" "x""#);
    }

    #[test]
    fn custom_style() {
        let style = QuoteStyle::Custom {
            open: "<".into(),
            close: ">".into(),
        };
        assert_eq!(style.quote("a.b"), "<a>.<b>");
    }

    #[test]
    fn quote_column_cases() {
        let cases = [
            ("name", "`name`"),
            ("project.created", "`project`.`created`"),
            ("updated AS updateDate", "`updated` AS `updateDate`"),
            ("users.id AS userId", "`users`.`id` AS `userId`"),
            ("password `pass`", "`password` AS `pass`"),
        ];
        for (input, expected) in cases {
            assert_eq!(quote_column(input, QuoteStyle::Backtick), expected, "input: {input}");
        }
    }

    #[test]
    fn quote_column_keeps_star() {
        assert_eq!(quote_column("users.*", QuoteStyle::DoubleQuote), r#""users".*"#);
    }

    #[test]
    fn quote_order_by_cases() {
        assert_eq!(quote_order_by("age DESC", QuoteStyle::DoubleQuote), r#""age" DESC"#);
        assert_eq!(
            quote_order_by("users.age desc, name", QuoteStyle::Backtick),
            "`users`.`age` DESC, `name`"
        );
        assert_eq!(quote_order_by("age", QuoteStyle::None), "age");
    }
}
