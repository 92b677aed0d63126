//! Parsing for delimiter-encoded scalar fields.
//!
//! Several response fields pack multiple logical values into a single
//! string joined by one reserved separator character. The format has no
//! escaping mechanism: a legitimate value is assumed never to contain the
//! separator. That is a limitation of the wire format, not something this
//! module tries to repair.

/// Split a delimiter-encoded field into its ordered values.
///
/// Values come back verbatim: no trimming, no de-duplication. Callers
/// normalize downstream where needed (see
/// [`CategoryTable::resolve`](super::CategoryTable::resolve)).
///
/// An empty input yields a single empty value, never an empty vector. A
/// record with no known entries still occupies its column with one blank
/// chip instead of silently dropping the column content.
#[must_use]
pub fn parse_delimited(raw: &str, delimiter: char) -> Vec<String> {
    raw.split(delimiter).map(str::to_string).collect()
}

/// Turn a raw category token into its display form.
///
/// Underscores become spaces, so `data_processing` renders as
/// `data processing`. The transform is display-only and happens after
/// bucket resolution; lookups always see the raw token.
#[must_use]
pub fn display_label(token: &str) -> String {
    token.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_yields_one_empty_value() {
        assert_eq!(parse_delimited("", '|'), vec![String::new()]);
    }

    #[test]
    fn test_order_preserved() {
        assert_eq!(parse_delimited("go|rust|python", '|'), vec!["go", "rust", "python"]);
    }

    #[test]
    fn test_values_returned_verbatim() {
        // No trimming, no de-duplication
        assert_eq!(parse_delimited(" rust | rust ", '|'), vec![" rust ", " rust "]);
    }

    #[test]
    fn test_trailing_delimiter_yields_trailing_empty_value() {
        assert_eq!(parse_delimited("a|", '|'), vec!["a", ""]);
    }

    #[test]
    fn test_display_label_replaces_underscores() {
        assert_eq!(display_label("data_processing"), "data processing");
        assert_eq!(display_label("rust"), "rust");
        assert_eq!(display_label(""), "");
    }
}
