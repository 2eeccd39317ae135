//! Slug generation
//!
//! Deterministic, idempotent derivation of URL-safe catalog slugs:
//! lowercase, strip Latin diacritics, collapse everything else to
//! hyphens, trim leading/trailing hyphens.

/// Fold a lowercased character to its ASCII base letter.
///
/// Covers the Latin-1 accents that show up in catalog names; anything
/// outside the table is treated as a separator by `slugify`.
fn fold_diacritic(c: char) -> Option<char> {
    let folded = match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        'ý' | 'ÿ' => 'y',
        _ => return None,
    };
    Some(folded)
}

/// Derive a URL-safe slug from a display name
///
/// Idempotent: `slugify(slugify(s)) == slugify(s)`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars().flat_map(|c| c.to_lowercase()) {
        let base = fold_diacritic(c).unwrap_or(c);
        if base.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(base);
        } else {
            // Runs of non-alphanumerics collapse into a single hyphen
            pending_hyphen = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Tienda Ejemplo"), "tienda-ejemplo");
        assert_eq!(slugify("Mi  Tienda   Online"), "mi-tienda-online");
    }

    #[test]
    fn strips_diacritics() {
        assert_eq!(slugify("Catálogo"), "catalogo");
        assert_eq!(slugify("Café Ñandú"), "cafe-nandu");
        assert_eq!(slugify("Ñoño & Cía."), "nono-cia");
    }

    #[test]
    fn trims_edge_hyphens() {
        assert_eq!(slugify("  ¡Ofertas!  "), "ofertas");
        assert_eq!(slugify("---a---b---"), "a-b");
    }

    #[test]
    fn idempotent() {
        for name in ["Tienda Ejemplo", "Café Ñandú", "a--b", "¡Hola!"] {
            let once = slugify(name);
            assert_eq!(slugify(&once), once);
        }
    }

    #[test]
    fn unmappable_input_yields_empty() {
        assert_eq!(slugify("¡¿!?"), "");
        assert_eq!(slugify(""), "");
    }
}
