//! Code → display label rendering.
//!
//! Rendering never fails: an unknown code comes back as the bare code,
//! which is still a usable last-resort label downstream.

use crate::catalog::Catalog;
use crate::resolver::Lang;

/// Render a localized label for `code`, formatted as `"Name (CODE)"`.
///
/// If the localized name already carries the code in parenthesized form
/// (upstream data sometimes embeds it), the name is returned unmodified
/// so the code is never stamped twice.
pub fn render_label(catalog: &Catalog, code: &str, lang: Lang) -> String {
    let code = code.trim().to_uppercase();
    let Some(record) = catalog.get(&code) else {
        return code;
    };

    let name = record.localized_name(lang.tag());
    let stamp = format!("({})", code);
    if name.to_uppercase().contains(&stamp) {
        return name.to_string();
    }
    format!("{} {}", name, stamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::embedded().unwrap()
    }

    #[test]
    fn test_render_ru() {
        assert_eq!(render_label(&catalog(), "TAS", Lang::Ru), "Ташкент (TAS)");
    }

    #[test]
    fn test_render_uz() {
        assert_eq!(render_label(&catalog(), "TAS", Lang::Uz), "Toshkent (TAS)");
    }

    #[test]
    fn test_render_lowercase_code() {
        assert_eq!(render_label(&catalog(), " tas ", Lang::Ru), "Ташкент (TAS)");
    }

    #[test]
    fn test_render_unknown_code_is_bare() {
        assert_eq!(render_label(&catalog(), "zzz", Lang::Ru), "ZZZ");
    }

    #[test]
    fn test_no_double_stamp() {
        let json = r#"[{
            "code": "TAS",
            "name": "Ташкент (tas)",
            "name_translations": {"ru": "Ташкент (tas)", "uz": "Toshkent (TAS)"}
        }]"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(render_label(&catalog, "TAS", Lang::Ru), "Ташкент (tas)");
        assert_eq!(render_label(&catalog, "TAS", Lang::Uz), "Toshkent (TAS)");
    }

    #[test]
    fn test_every_record_renders_code_exactly_once() {
        let catalog = catalog();
        for record in catalog.records() {
            for lang in [Lang::Ru, Lang::Uz] {
                let label = render_label(&catalog, &record.code, lang);
                let stamp = format!("({})", record.code);
                assert_eq!(
                    label.to_uppercase().matches(&stamp).count(),
                    1,
                    "label '{}' for {}",
                    label,
                    record.code
                );
            }
        }
    }
}
