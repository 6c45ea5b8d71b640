//! Category vocabularies and the canonical feature schema
//!
//! Everything here is a fixed constant: the classifier was trained against
//! exactly these columns in exactly this order, and the serving path must
//! reproduce them bit-for-bit. Indicator blocks are alphabetical within
//! each field, matching the pinned training schema.

use std::sync::OnceLock;

/// Numeric input columns, in canonical order.
pub const NUMERIC_FEATURES: [&str; 7] = [
    "budget",
    "gross",
    "duration",
    "num_critic_for_reviews",
    "num_user_for_reviews",
    "num_voted_users",
    "title_year",
];

/// The full genre vocabulary. Independent of what any given batch contains.
pub const GENRES: [&str; 26] = [
    "Action",
    "Adventure",
    "Animation",
    "Biography",
    "Comedy",
    "Crime",
    "Documentary",
    "Drama",
    "Family",
    "Fantasy",
    "Film-Noir",
    "Game-Show",
    "History",
    "Horror",
    "Music",
    "Musical",
    "Mystery",
    "News",
    "Reality-TV",
    "Romance",
    "Sci-Fi",
    "Short",
    "Sport",
    "Thriller",
    "War",
    "Western",
];

/// Language allow-list. Anything else collapses to "Other".
pub const LANGUAGES: [&str; 6] = ["English", "French", "Hindi", "Mandarin", "Other", "Spanish"];

/// Country allow-list. Anything else collapses to "Other".
pub const COUNTRIES: [&str; 12] = [
    "Australia",
    "Canada",
    "China",
    "France",
    "Germany",
    "India",
    "Italy",
    "Japan",
    "Other",
    "Spain",
    "UK",
    "USA",
];

/// Coarse content-rating groups.
pub const RATING_GROUPS: [&str; 6] = ["Adult", "Explicit", "Kids", "Other", "Teen", "Young"];

/// Historical/alias country names folded into their canonical equivalents
/// before the allow-list filter. "Soviet Union" maps to "Russia", which is
/// not in the allow-list and therefore ends up as "Other".
pub const COUNTRY_ALIASES: [(&str, &str); 5] = [
    ("West Germany", "Germany"),
    ("Soviet Union", "Russia"),
    ("Hong Kong", "China"),
    ("Official site", "Other"),
    ("New Line", "Other"),
];

/// Raw content ratings remapped into coarse groups. Ratings absent from
/// this table pass through unchanged; their one-hot column is then dropped
/// by reconciliation, leaving all canonical rating indicators at zero.
pub const RATING_TO_GROUP: [(&str, &str); 18] = [
    ("G", "Kids"),
    ("TV-Y", "Kids"),
    ("TV-Y7", "Kids"),
    ("TV-G", "Kids"),
    ("Approved", "Kids"),
    ("Passed", "Kids"),
    ("PG", "Young"),
    ("TV-PG", "Young"),
    ("GP", "Young"),
    ("M", "Young"),
    ("PG-13", "Teen"),
    ("TV-14", "Teen"),
    ("R", "Adult"),
    ("TV-MA", "Adult"),
    ("NC-17", "Explicit"),
    ("X", "Explicit"),
    ("Not Rated", "Other"),
    ("Unrated", "Other"),
];

/// Width of the canonical feature vector:
/// 7 numeric + color + 26 genres + 6 languages + 12 countries + 6 ratings.
pub const FEATURE_COUNT: usize = 58;

/// Label column name in processed datasets.
pub const LABEL_COLUMN: &str = "is_good";

/// The canonical, ordered list of the 58 feature columns.
pub fn canonical_columns() -> &'static [String] {
    static COLUMNS: OnceLock<Vec<String>> = OnceLock::new();
    COLUMNS.get_or_init(|| {
        let mut cols = Vec::with_capacity(FEATURE_COUNT);
        cols.extend(NUMERIC_FEATURES.iter().map(|c| (*c).to_string()));
        cols.push("color".to_string());
        cols.extend(GENRES.iter().map(|g| format!("genre_{g}")));
        cols.extend(LANGUAGES.iter().map(|l| format!("language_{l}")));
        cols.extend(COUNTRIES.iter().map(|c| format!("country_{c}")));
        cols.extend(RATING_GROUPS.iter().map(|r| format!("content_rating_{r}")));
        cols
    })
}

/// Position of a column in the canonical schema, if it belongs to it.
pub fn column_index(name: &str) -> Option<usize> {
    canonical_columns().iter().position(|c| c == name)
}

/// Apply the alias table, then collapse anything outside the allow-list.
pub fn normalize_country(raw: &str) -> &str {
    let fixed = COUNTRY_ALIASES
        .iter()
        .find(|(from, _)| *from == raw)
        .map_or(raw, |(_, to)| *to);
    if COUNTRIES.contains(&fixed) {
        fixed
    } else {
        "Other"
    }
}

/// Collapse anything outside the language allow-list.
pub fn normalize_language(raw: &str) -> &str {
    if LANGUAGES.contains(&raw) {
        raw
    } else {
        "Other"
    }
}

/// Remap a raw rating into its coarse group. Unknown ratings pass through
/// unchanged (see DESIGN.md: preserved, not "fixed").
pub fn rating_group(raw: &str) -> &str {
    RATING_TO_GROUP
        .iter()
        .find(|(from, _)| *from == raw)
        .map_or(raw, |(_, to)| *to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_width() {
        assert_eq!(canonical_columns().len(), FEATURE_COUNT);
        assert_eq!(
            FEATURE_COUNT,
            NUMERIC_FEATURES.len()
                + 1
                + GENRES.len()
                + LANGUAGES.len()
                + COUNTRIES.len()
                + RATING_GROUPS.len()
        );
    }

    #[test]
    fn test_canonical_order() {
        let cols = canonical_columns();
        assert_eq!(cols[0], "budget");
        assert_eq!(cols[6], "title_year");
        assert_eq!(cols[7], "color");
        assert_eq!(cols[8], "genre_Action");
        assert_eq!(cols[33], "genre_Western");
        assert_eq!(cols[34], "language_English");
        assert_eq!(cols[40], "country_Australia");
        assert_eq!(cols[52], "content_rating_Adult");
        assert_eq!(cols[57], "content_rating_Young");
    }

    #[test]
    fn test_indicator_blocks_alphabetical() {
        for block in [
            &GENRES[..],
            &LANGUAGES[..],
            &COUNTRIES[..],
            &RATING_GROUPS[..],
        ] {
            let mut sorted = block.to_vec();
            sorted.sort_unstable();
            assert_eq!(block, sorted.as_slice());
        }
    }

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("budget"), Some(0));
        assert_eq!(column_index("content_rating_Young"), Some(57));
        assert_eq!(column_index("genre_Jazz"), None);
        assert_eq!(column_index("imdb_score"), None);
    }

    #[test]
    fn test_normalize_country_allowed() {
        assert_eq!(normalize_country("USA"), "USA");
        assert_eq!(normalize_country("Japan"), "Japan");
    }

    #[test]
    fn test_normalize_country_alias() {
        assert_eq!(normalize_country("Hong Kong"), "China");
        assert_eq!(normalize_country("West Germany"), "Germany");
        assert_eq!(normalize_country("New Line"), "Other");
        // "Russia" is not in the allow-list, so the alias collapses further.
        assert_eq!(normalize_country("Soviet Union"), "Other");
    }

    #[test]
    fn test_normalize_country_unknown() {
        assert_eq!(normalize_country("Narnia"), "Other");
        assert_eq!(normalize_country(""), "Other");
    }

    #[test]
    fn test_normalize_language() {
        assert_eq!(normalize_language("English"), "English");
        assert_eq!(normalize_language("Mandarin"), "Mandarin");
        assert_eq!(normalize_language("Swedish"), "Other");
    }

    #[test]
    fn test_rating_group_mapped() {
        assert_eq!(rating_group("PG-13"), "Teen");
        assert_eq!(rating_group("G"), "Kids");
        assert_eq!(rating_group("X"), "Explicit");
        assert_eq!(rating_group("Unrated"), "Other");
    }

    #[test]
    fn test_rating_group_pass_through() {
        // Unrecognized ratings are deliberately left unchanged.
        assert_eq!(rating_group("TV-Special"), "TV-Special");
        assert_eq!(rating_group(""), "");
    }
}
