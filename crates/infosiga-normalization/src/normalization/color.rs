//! Vehicle colour cleanup.

use infosiga_common::{fold_key, sentence_case};

const NOT_INFORMED: &[&str] = &[
    "NAO INFORMADO",
    "NAO INFORMADA",
    "NAO DISPONIVEL",
    "NAO IDENTIFICADO",
    "NAO IDENTIFICADA",
    "SEM INFORMACAO",
    "INDEFINIDA",
    "INDEFINIDO",
];

/// Returns the colour in sentence case, or `None` for blank and
/// not-informed spellings.
pub fn normalize_color(raw: Option<&str>) -> Option<String> {
    let raw = raw.map(str::trim).filter(|value| !value.is_empty())?;
    let key = fold_key(raw);
    if NOT_INFORMED.contains(&key.as_str()) {
        return None;
    }
    Some(sentence_case(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_case_colors() {
        assert_eq!(normalize_color(Some("VERDE ESCURO")), Some("Verde escuro".to_string()));
        assert_eq!(normalize_color(Some(" prata ")), Some("Prata".to_string()));
    }

    #[test]
    fn test_not_informed_is_null() {
        assert_eq!(normalize_color(Some("NÃO INFORMADA")), None);
        assert_eq!(normalize_color(Some("nao identificado")), None);
        assert_eq!(normalize_color(Some("Sem Informação")), None);
        assert_eq!(normalize_color(Some("")), None);
        assert_eq!(normalize_color(None), None);
    }
}
