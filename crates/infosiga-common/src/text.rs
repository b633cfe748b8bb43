//! Text normalization for category and municipality matching.
//!
//! Source vintages disagree on accents and case (`SÃO PAULO`, `SAO PAULO`,
//! `São Paulo`), so lookups compare folded keys instead of raw strings.

/// Replaces accented Latin letters with their unaccented base letter.
///
/// Covers the Latin-1 range, which is everything a Windows-1252 source can
/// carry. Other characters are returned unchanged.
pub fn fold_diacritics(value: &str) -> String {
    value.chars().map(fold_char).collect()
}

fn fold_char(ch: char) -> char {
    match ch {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'Á' | 'À' | 'Â' | 'Ã' | 'Ä' | 'Å' => 'A',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'É' | 'È' | 'Ê' | 'Ë' => 'E',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'Í' | 'Ì' | 'Î' | 'Ï' => 'I',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'Ó' | 'Ò' | 'Ô' | 'Õ' | 'Ö' => 'O',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'Ú' | 'Ù' | 'Û' | 'Ü' => 'U',
        'ç' => 'c',
        'Ç' => 'C',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ý' | 'ÿ' => 'y',
        'Ý' => 'Y',
        other => other,
    }
}

/// Builds the comparison key for a category or municipality name.
///
/// Trims, removes diacritics, uppercases, treats `-` and `_` as spaces and
/// collapses runs of whitespace.
///
/// # Examples
///
/// ```
/// use infosiga_common::fold_key;
///
/// assert_eq!(fold_key("  São  Paulo "), "SAO PAULO");
/// assert_eq!(fold_key("CONCESSIONÁRIA-ANTT"), "CONCESSIONARIA ANTT");
/// ```
pub fn fold_key(value: &str) -> String {
    let folded = fold_diacritics(value).to_uppercase();
    folded
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Converts text to sentence case: first letter upper, the rest lower.
///
/// # Examples
///
/// ```
/// use infosiga_common::sentence_case;
///
/// assert_eq!(sentence_case("VERDE ESCURO"), "Verde escuro");
/// assert_eq!(sentence_case("  BRANCA"), "Branca");
/// ```
pub fn sentence_case(value: &str) -> String {
    let lower = value.trim().to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Keeps only ASCII digits (`"35.503-08"` becomes `"3550308"`).
pub fn digits_only(value: &str) -> String {
    value.chars().filter(char::is_ascii_digit).collect()
}
