//! Placement directive expansion.
//!
//! Page content may carry `[form id="3"]` directives; each one is replaced
//! by the rendered public fragment of that form. Unknown ids degrade to a
//! plain paragraph instead of failing the whole page.

use regex::Regex;

use crate::render::render_form;
use crate::schema::FieldSpec;

/// Replace every `[form id="N"]` directive in `content`.
///
/// `lookup` resolves a form id to its field list and returns `None` for
/// forms that do not exist.
pub fn expand_placements<F>(content: &str, lookup: F) -> String
where
    F: Fn(i64) -> Option<Vec<FieldSpec>>,
{
    // The pattern is a compile-time constant.
    let directive = Regex::new(r#"\[form\s+id="?(\d+)"?\s*\]"#).unwrap();

    directive
        .replace_all(content, |caps: &regex::Captures<'_>| {
            let id: i64 = match caps[1].parse() {
                Ok(id) if id > 0 => id,
                _ => return "<p>Invalid form ID</p>".to_string(),
            };
            match lookup(id) {
                Some(fields) => render_form(id, &fields),
                None => "<p>Form not found</p>".to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldKind;

    fn one_field() -> Vec<FieldSpec> {
        vec![FieldSpec {
            id: "name".into(),
            label: "Name".into(),
            required: false,
            kind: FieldKind::Text { placeholder: None },
        }]
    }

    #[test]
    fn test_directive_is_replaced_in_place() {
        let out = expand_placements("before [form id=\"3\"] after", |id| {
            (id == 3).then(one_field)
        });
        assert!(out.starts_with("before "));
        assert!(out.ends_with(" after"));
        assert!(out.contains("data-form-id=\"3\""));
    }

    #[test]
    fn test_unquoted_id_accepted() {
        let out = expand_placements("[form id=3]", |_| Some(one_field()));
        assert!(out.contains("data-form-id=\"3\""));
    }

    #[test]
    fn test_unknown_form_degrades_to_paragraph() {
        let out = expand_placements("[form id=\"9\"]", |_| None);
        assert_eq!(out, "<p>Form not found</p>");
    }

    #[test]
    fn test_zero_id_is_invalid() {
        let out = expand_placements("[form id=\"0\"]", |_| Some(one_field()));
        assert_eq!(out, "<p>Invalid form ID</p>");
    }

    #[test]
    fn test_unrelated_content_untouched() {
        let content = "no directives [here] at all";
        assert_eq!(expand_placements(content, |_| None), content);
    }
}
