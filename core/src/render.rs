//! Server-side HTML renderer for public form pages.
//!
//! Produces one self-contained fragment per form: a wrapper carrying the
//! form id, one block per field switched on the field kind, a submit
//! button and a message container. Every piece of user-supplied text
//! (labels, options, placeholders) is escaped before interpolation.

use crate::sanitize::{escape_attr, escape_html};
use crate::schema::{FieldKind, FieldSpec};

/// Render a form's public HTML fragment.
pub fn render_form(form_id: i64, fields: &[FieldSpec]) -> String {
    let mut html = format!(
        "<div class=\"form-widget\" data-form-id=\"{}\">\n<div class=\"form-fields\">\n",
        form_id
    );

    for field in fields {
        render_field(&mut html, field);
    }

    html.push_str(
        "<div class=\"form-actions\">\n\
         <button type=\"button\" class=\"submit-btn\">Submit</button>\n\
         </div>\n\
         <div class=\"form-message\" style=\"display:none;\"></div>\n",
    );
    html.push_str("</div>\n</div>\n");
    html
}

fn render_field(html: &mut String, field: &FieldSpec) {
    let field_type = field.kind.field_type();
    let element_id = format!("field-{}", escape_attr(&field.id));
    let name = escape_attr(&field.id);
    let required = if field.required { " required" } else { "" };

    html.push_str(&format!(
        "<div class=\"form-field\" data-field-type=\"{}\">\n",
        field_type.as_str()
    ));
    html.push_str(&format!("<label for=\"{}\">{}", element_id, escape_html(&field.label)));
    if field.required {
        html.push_str(" <span class=\"required\">*</span>");
    }
    html.push_str("</label>\n");

    match &field.kind {
        FieldKind::Text { placeholder } | FieldKind::Email { placeholder } => {
            html.push_str(&format!(
                "<input type=\"{}\" id=\"{}\" name=\"{}\" placeholder=\"{}\"{} />\n",
                field_type.as_str(),
                element_id,
                name,
                escape_attr(placeholder.as_deref().unwrap_or("")),
                required,
            ));
        }
        FieldKind::Textarea { placeholder } => {
            html.push_str(&format!(
                "<textarea id=\"{}\" name=\"{}\" placeholder=\"{}\"{}></textarea>\n",
                element_id,
                name,
                escape_attr(placeholder.as_deref().unwrap_or("")),
                required,
            ));
        }
        FieldKind::Select { options } => {
            html.push_str(&format!(
                "<select id=\"{}\" name=\"{}\"{}>\n",
                element_id, name, required
            ));
            html.push_str("<option value=\"\">Select an option</option>\n");
            for option in options {
                html.push_str(&format!(
                    "<option value=\"{}\">{}</option>\n",
                    escape_attr(option),
                    escape_html(option)
                ));
            }
            html.push_str("</select>\n");
        }
        FieldKind::Radio { options } => {
            // One control per option sharing the field id as group name.
            for (index, option) in options.iter().enumerate() {
                let option_id = format!("{}-{}", element_id, index);
                html.push_str(&format!(
                    "<div class=\"radio-option\">\n\
                     <input type=\"radio\" id=\"{}\" name=\"{}\" value=\"{}\"{} />\n\
                     <label for=\"{}\">{}</label>\n\
                     </div>\n",
                    option_id,
                    name,
                    escape_attr(option),
                    required,
                    option_id,
                    escape_html(option),
                ));
            }
        }
        FieldKind::Checkbox { options } => {
            // Array-style name so every checked box posts under the field id.
            for (index, option) in options.iter().enumerate() {
                let option_id = format!("{}-{}", element_id, index);
                html.push_str(&format!(
                    "<div class=\"checkbox-option\">\n\
                     <input type=\"checkbox\" id=\"{}\" name=\"{}[]\" value=\"{}\" />\n\
                     <label for=\"{}\">{}</label>\n\
                     </div>\n",
                    option_id,
                    name,
                    escape_attr(option),
                    option_id,
                    escape_html(option),
                ));
            }
        }
    }

    html.push_str("</div>\n");
}
