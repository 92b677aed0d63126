use palette::Srgb;
use std::collections::HashMap;
use std::sync::LazyLock;

/// A stable display bucket that raw category tokens resolve to.
///
/// Buckets are a small fixed set of color groups. Tokens the tables do not
/// recognize fall into [`Bucket::Neutral`], which renders without color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    Blue,
    Cyan,
    Green,
    Magenta,
    Orange,
    Purple,
    Red,
    Teal,
    Yellow,
    Neutral,
}

impl Bucket {
    /// The RGB color used when rendering tokens in this bucket, or `None`
    /// for the neutral bucket.
    #[must_use]
    pub const fn color(self) -> Option<Srgb<u8>> {
        match self {
            Self::Blue => Some(Srgb::new(59, 130, 246)),
            Self::Cyan => Some(Srgb::new(34, 211, 238)),
            Self::Green => Some(Srgb::new(34, 197, 94)),
            Self::Magenta => Some(Srgb::new(217, 70, 239)),
            Self::Orange => Some(Srgb::new(249, 115, 22)),
            Self::Purple => Some(Srgb::new(168, 85, 247)),
            Self::Red => Some(Srgb::new(239, 68, 68)),
            Self::Teal => Some(Srgb::new(20, 184, 166)),
            Self::Yellow => Some(Srgb::new(234, 179, 8)),
            Self::Neutral => None,
        }
    }
}

/// An immutable mapping from normalized category tokens to display buckets.
///
/// The tables are known, non-exhaustive allow-lists: new languages and tags
/// appear in responses over time, so lookups must tolerate open-ended input
/// and never fail. Tables are passed into call sites explicitly rather than
/// consulted through shared mutable state.
#[derive(Debug)]
pub struct CategoryTable {
    entries: HashMap<&'static str, Bucket>,
}

impl CategoryTable {
    fn new(entries: &[(&'static str, Bucket)]) -> Self {
        Self {
            entries: entries.iter().copied().collect(),
        }
    }

    /// Resolve a raw token to its display bucket.
    ///
    /// The token is trimmed and lower-cased before lookup; the display
    /// transform ([`display_label`](super::display_label)) never affects
    /// resolution. Unknown tokens resolve to [`Bucket::Neutral`].
    #[must_use]
    pub fn resolve(&self, token: &str) -> Bucket {
        let normalized = token.trim().to_lowercase();
        self.entries.get(normalized.as_str()).copied().unwrap_or(Bucket::Neutral)
    }
}

/// The bucket table for programming-language tokens.
#[must_use]
pub fn language_table() -> &'static CategoryTable {
    static TABLE: LazyLock<CategoryTable> = LazyLock::new(|| {
        CategoryTable::new(&[
            ("c", Bucket::Teal),
            ("c#", Bucket::Purple),
            ("c++", Bucket::Magenta),
            ("css", Bucket::Blue),
            ("dart", Bucket::Cyan),
            ("elixir", Bucket::Magenta),
            ("go", Bucket::Cyan),
            ("haskell", Bucket::Purple),
            ("html", Bucket::Orange),
            ("java", Bucket::Red),
            ("javascript", Bucket::Yellow),
            ("julia", Bucket::Green),
            ("kotlin", Bucket::Purple),
            ("lua", Bucket::Blue),
            ("objective-c", Bucket::Teal),
            ("perl", Bucket::Purple),
            ("php", Bucket::Purple),
            ("python", Bucket::Blue),
            ("r", Bucket::Blue),
            ("ruby", Bucket::Red),
            ("rust", Bucket::Orange),
            ("scala", Bucket::Red),
            ("shell", Bucket::Green),
            ("solidity", Bucket::Teal),
            ("sql", Bucket::Teal),
            ("swift", Bucket::Orange),
            ("typescript", Bucket::Blue),
            ("zig", Bucket::Yellow),
        ])
    });
    &TABLE
}

/// The bucket table for project-type tags. Its key space is disjoint from
/// the language table's.
#[must_use]
pub fn project_type_table() -> &'static CategoryTable {
    static TABLE: LazyLock<CategoryTable> = LazyLock::new(|| {
        CategoryTable::new(&[
            ("backend", Bucket::Teal),
            ("blockchain", Bucket::Yellow),
            ("cloud", Bucket::Cyan),
            ("data_processing", Bucket::Purple),
            ("data_science", Bucket::Purple),
            ("database", Bucket::Teal),
            ("dev_ops", Bucket::Green),
            ("developer_tools", Bucket::Green),
            ("embedded", Bucket::Orange),
            ("frontend", Bucket::Cyan),
            ("game_development", Bucket::Red),
            ("infrastructure", Bucket::Green),
            ("machine_learning", Bucket::Magenta),
            ("mobile", Bucket::Orange),
            ("networking", Bucket::Blue),
            ("security", Bucket::Red),
            ("web_development", Bucket::Blue),
        ])
    });
    &TABLE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_is_case_and_whitespace_insensitive() {
        let table = language_table();
        let expected = table.resolve("rust");
        assert_eq!(table.resolve("RUST"), expected);
        assert_eq!(table.resolve(" rust "), expected);
        assert_eq!(table.resolve("Rust"), expected);
    }

    #[test]
    fn test_unknown_token_resolves_to_neutral() {
        assert_eq!(language_table().resolve("cobol"), Bucket::Neutral);
        assert_eq!(project_type_table().resolve("underwater_basket_weaving"), Bucket::Neutral);
        assert_eq!(language_table().resolve(""), Bucket::Neutral);
    }

    #[test]
    fn test_tables_have_disjoint_key_spaces() {
        // A language token must miss the project-type table and vice versa
        assert_eq!(project_type_table().resolve("rust"), Bucket::Neutral);
        assert_eq!(language_table().resolve("data_processing"), Bucket::Neutral);
    }

    #[test]
    fn test_display_transform_does_not_affect_lookup() {
        use super::super::display_label;

        let table = project_type_table();
        assert_ne!(table.resolve("data_processing"), Bucket::Neutral);
        // The space-separated display form is not a table key
        assert_eq!(table.resolve(&display_label("data_processing")), Bucket::Neutral);
    }

    #[test]
    fn test_neutral_bucket_has_no_color() {
        assert!(Bucket::Neutral.color().is_none());
        assert!(Bucket::Purple.color().is_some());
    }
}
