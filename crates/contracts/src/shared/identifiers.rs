//! Client-side identifier derivation.
//!
//! Business keys are built on the client from human-entered names. The
//! backend owns uniqueness; the time-based suffix only makes collisions
//! unlikely within one editing session.

use std::fmt;

/// Map accented Latin letters to their plain ASCII base letter.
fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'ä' | 'â' | 'ã' | 'å' => 'a',
        'Á' | 'À' | 'Ä' | 'Â' | 'Ã' | 'Å' => 'A',
        'é' | 'è' | 'ë' | 'ê' => 'e',
        'É' | 'È' | 'Ë' | 'Ê' => 'E',
        'í' | 'ì' | 'ï' | 'î' => 'i',
        'Í' | 'Ì' | 'Ï' | 'Î' => 'I',
        'ó' | 'ò' | 'ö' | 'ô' | 'õ' => 'o',
        'Ó' | 'Ò' | 'Ö' | 'Ô' | 'Õ' => 'O',
        'ú' | 'ù' | 'ü' | 'û' => 'u',
        'Ú' | 'Ù' | 'Ü' | 'Û' => 'U',
        'ñ' => 'n',
        'Ñ' => 'N',
        'ç' => 'c',
        'Ç' => 'C',
        'ý' | 'ÿ' => 'y',
        'Ý' => 'Y',
        other => other,
    }
}

/// Uppercase ASCII slug: diacritics folded, every run of other characters
/// collapsed into a single `sep`, no leading or trailing separator.
pub fn slugify(input: &str, sep: char) -> String {
    let mut out = String::with_capacity(input.len());
    let mut pending_sep = false;

    for c in input.chars().map(fold_diacritic) {
        if c.is_ascii_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push(sep);
            }
            pending_sep = false;
            out.push(c.to_ascii_uppercase());
        } else {
            pending_sep = true;
        }
    }
    out
}

/// Suffix fixed once per editing session, so regenerating a SKU while the
/// user types only changes the name part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSuffix(String);

impl SessionSuffix {
    pub fn new() -> Self {
        Self::from_millis(chrono::Utc::now().timestamp_millis())
    }

    pub fn from_millis(millis: i64) -> Self {
        Self(to_base36(millis.unsigned_abs()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionSuffix {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionSuffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    String::from_utf8_lossy(&buf).into_owned()
}

/// `SLUG-SUFFIX`, or empty while the name has no usable characters.
pub fn product_sku(name: &str, suffix: &SessionSuffix) -> String {
    let slug = slugify(name, '-');
    if slug.is_empty() {
        return String::new();
    }
    format!("{}-{}", slug, suffix)
}

/// `SKUID-SLUG`; falls back to whichever part is non-empty.
pub fn presentation_id(skuid: &str, name: &str) -> String {
    let skuid = skuid.trim();
    let slug = slugify(name, '-');
    match (skuid.is_empty(), slug.is_empty()) {
        (false, false) => format!("{}-{}", skuid, slug),
        (false, true) => skuid.to_string(),
        (true, _) => slug,
    }
}

/// `CAT_` followed by the underscore-joined slug of the name.
pub fn category_id(name: &str) -> String {
    let slug = slugify(name, '_');
    if slug.is_empty() {
        return String::new();
    }
    format!("CAT_{}", slug)
}

pub fn price_item_id(list_id: &str, presentation_id: &str) -> String {
    format!("{}-{}", list_id.trim(), presentation_id.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_folds_and_collapses() {
        assert_eq!(slugify("Taladro Inalámbrico", '-'), "TALADRO-INALAMBRICO");
        assert_eq!(slugify("  --Caja  de   20 pzas!! ", '-'), "CAJA-DE-20-PZAS");
        assert_eq!(slugify("Ñandú / Pingüino", '_'), "NANDU_PINGUINO");
        assert_eq!(slugify("¡¿?!", '-'), "");
    }

    #[test]
    fn test_slugify_is_idempotent() {
        for input in ["Taladro Inalámbrico", "a--b__c", "  x  "] {
            let once = slugify(input, '-');
            assert_eq!(slugify(&once, '-'), once);
        }
    }

    #[test]
    fn test_presentation_id() {
        let id = presentation_id("TALADRO-INALAMBRICO-LX1", "Caja con 2 baterías");
        assert_eq!(id, "TALADRO-INALAMBRICO-LX1-CAJA-CON-2-BATERIAS");
        assert!(!id.contains("--"));
        assert!(!id.ends_with('-'));
        assert_eq!(presentation_id("SKU1", "   "), "SKU1");
    }

    #[test]
    fn test_sku_keeps_session_suffix() {
        let suffix = SessionSuffix::from_millis(1_700_000_000_000);
        let first = product_sku("Taladro", &suffix);
        let second = product_sku("Taladro Inalámbrico", &suffix);
        assert_eq!(first, format!("TALADRO-{}", suffix));
        assert_eq!(second, format!("TALADRO-INALAMBRICO-{}", suffix));
        assert!(first.ends_with(suffix.as_str()) && second.ends_with(suffix.as_str()));
        assert_eq!(product_sku("", &suffix), "");
    }

    #[test]
    fn test_base36_suffix() {
        assert_eq!(SessionSuffix::from_millis(0).as_str(), "0");
        assert_eq!(SessionSuffix::from_millis(35).as_str(), "Z");
        assert_eq!(SessionSuffix::from_millis(36).as_str(), "10");
    }

    #[test]
    fn test_category_id_is_deterministic() {
        assert_eq!(category_id("Herramientas eléctricas"), "CAT_HERRAMIENTAS_ELECTRICAS");
        assert_eq!(category_id("Herramientas eléctricas"), category_id("herramientas  ELÉCTRICAS"));
        assert_eq!(category_id(""), "");
    }

    #[test]
    fn test_price_item_id() {
        assert_eq!(price_item_id("LISTA-2024 ", "SKU1-CAJA"), "LISTA-2024-SKU1-CAJA");
    }
}
