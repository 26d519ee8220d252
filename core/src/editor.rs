//! Editor state machine for the form-design client.
//!
//! Three views: the form list, the field editor and the read-only
//! preview. Every transition is a method; illegal moves (previewing an
//! empty draft, field edits outside the editor view) return an error
//! instead of silently landing in a bad state.

use thiserror::Error;

use crate::client::{ApiClient, ClientError, FormDataPayload, FormPayload};
use crate::schema::{FieldKind, FieldSpec, FieldType, FormDefinition, FormSummary};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    List,
    Editor,
    Preview,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

#[derive(Error, Debug, PartialEq)]
pub enum EditorError {
    #[error("Please enter a form name")]
    EmptyName,

    #[error("Please add at least one field")]
    NoFields,

    #[error("action not available in the current view")]
    WrongView,

    #[error("no field at index {0}")]
    NoSuchField(usize),
}

#[derive(Error, Debug)]
pub enum SaveError {
    #[error(transparent)]
    Invalid(#[from] EditorError),

    #[error(transparent)]
    Api(#[from] ClientError),
}

/// The in-progress form being edited. `form_id` is `None` for a new form.
#[derive(Clone, Debug, Default)]
pub struct Draft {
    pub form_id: Option<i64>,
    pub name: String,
    pub fields: Vec<FieldSpec>,
}

pub struct EditorApp {
    view: View,
    pub forms: Vec<FormSummary>,
    pub draft: Draft,
    next_field_seq: u64,
}

impl Default for EditorApp {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorApp {
    pub fn new() -> Self {
        Self {
            view: View::List,
            forms: Vec::new(),
            draft: Draft::default(),
            next_field_seq: 0,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    // ---- list view ----

    /// Refresh the list view from the server.
    pub async fn load_forms(&mut self, client: &ApiClient) -> Result<(), ClientError> {
        self.forms = client.list_forms().await?;
        Ok(())
    }

    /// Start a fresh draft and enter the editor.
    pub fn create_new(&mut self) -> Result<(), EditorError> {
        self.require_view(View::List)?;
        self.draft = Draft {
            form_id: None,
            name: "New Form".into(),
            fields: Vec::new(),
        };
        self.view = View::Editor;
        Ok(())
    }

    /// Enter the editor with a loaded definition.
    pub fn open_editor(&mut self, definition: FormDefinition) -> Result<(), EditorError> {
        self.require_view(View::List)?;
        self.draft = Draft {
            form_id: Some(definition.id),
            name: definition.name,
            fields: definition.form_data.fields,
        };
        self.view = View::Editor;
        Ok(())
    }

    /// Fetch the full definition, then enter the editor.
    pub async fn edit(&mut self, client: &ApiClient, id: i64) -> Result<(), SaveError> {
        self.require_view(View::List)?;
        let definition = client.get_form(id).await?;
        self.open_editor(definition)?;
        Ok(())
    }

    pub async fn delete_form(&mut self, client: &ApiClient, id: i64) -> Result<(), SaveError> {
        self.require_view(View::List)?;
        client.delete_form(id).await?;
        self.forms.retain(|f| f.id != id);
        Ok(())
    }

    // ---- editor view ----

    /// Append a palette default for the given kind.
    pub fn add_field(&mut self, field_type: FieldType) -> Result<&FieldSpec, EditorError> {
        self.require_view(View::Editor)?;
        self.next_field_seq += 1;
        let field = FieldSpec {
            id: format!("field_{}", self.next_field_seq),
            label: format!("New {} field", field_type.as_str()),
            required: false,
            kind: FieldKind::default_for(field_type),
        };
        self.draft.fields.push(field);
        Ok(self.draft.fields.last().unwrap())
    }

    pub fn update_field(
        &mut self,
        index: usize,
        update: impl FnOnce(&mut FieldSpec),
    ) -> Result<(), EditorError> {
        self.require_view(View::Editor)?;
        let field = self
            .draft
            .fields
            .get_mut(index)
            .ok_or(EditorError::NoSuchField(index))?;
        update(field);
        Ok(())
    }

    pub fn remove_field(&mut self, index: usize) -> Result<(), EditorError> {
        self.require_view(View::Editor)?;
        if index >= self.draft.fields.len() {
            return Err(EditorError::NoSuchField(index));
        }
        self.draft.fields.remove(index);
        Ok(())
    }

    /// Swap the field with its neighbour. A move past either end is a no-op.
    pub fn move_field(&mut self, index: usize, direction: Direction) -> Result<(), EditorError> {
        self.require_view(View::Editor)?;
        if index >= self.draft.fields.len() {
            return Err(EditorError::NoSuchField(index));
        }
        let target = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => (index + 1 < self.draft.fields.len()).then_some(index + 1),
        };
        if let Some(target) = target {
            self.draft.fields.swap(index, target);
        }
        Ok(())
    }

    /// Enter preview. An empty draft has nothing to preview.
    pub fn preview(&mut self) -> Result<(), EditorError> {
        self.require_view(View::Editor)?;
        if self.draft.fields.is_empty() {
            return Err(EditorError::NoFields);
        }
        self.view = View::Preview;
        Ok(())
    }

    pub fn back_to_editor(&mut self) -> Result<(), EditorError> {
        self.require_view(View::Preview)?;
        self.view = View::Editor;
        Ok(())
    }

    pub fn back_to_list(&mut self) -> Result<(), EditorError> {
        self.require_view(View::Editor)?;
        self.view = View::List;
        Ok(())
    }

    /// The save preconditions; violations never reach the network.
    pub fn validate_for_save(&self) -> Result<(), EditorError> {
        if self.draft.name.trim().is_empty() {
            return Err(EditorError::EmptyName);
        }
        if self.draft.fields.is_empty() {
            return Err(EditorError::NoFields);
        }
        Ok(())
    }

    /// Persist the draft (create or update) and return to the list view.
    pub async fn save(&mut self, client: &ApiClient) -> Result<i64, SaveError> {
        self.require_view(View::Editor)?;
        self.validate_for_save()?;

        let payload = FormPayload {
            name: self.draft.name.clone(),
            form_data: FormDataPayload {
                fields: self.draft.fields.clone(),
            },
        };

        let saved = match self.draft.form_id {
            Some(id) => client.update_form(id, &payload).await?,
            None => client.create_form(&payload).await?,
        };

        self.view = View::List;
        Ok(saved.id)
    }

    fn require_view(&self, expected: View) -> Result<(), EditorError> {
        if self.view == expected {
            Ok(())
        } else {
            Err(EditorError::WrongView)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor_with_fields(count: usize) -> EditorApp {
        let mut app = EditorApp::new();
        app.create_new().unwrap();
        for _ in 0..count {
            app.add_field(FieldType::Text).unwrap();
        }
        app
    }

    #[test]
    fn test_create_new_enters_editor_with_defaults() {
        let mut app = EditorApp::new();
        app.create_new().unwrap();
        assert_eq!(app.view(), View::Editor);
        assert_eq!(app.draft.name, "New Form");
        assert!(app.draft.fields.is_empty());
        assert!(app.draft.form_id.is_none());
    }

    #[test]
    fn test_add_field_palette_defaults() {
        let mut app = editor_with_fields(0);
        let field = app.add_field(FieldType::Radio).unwrap().clone();
        assert_eq!(field.label, "New radio field");
        assert_eq!(field.kind.options().unwrap(), ["Option 1", "Option 2"]);
        assert!(!field.required);

        let second = app.add_field(FieldType::Text).unwrap();
        assert_ne!(second.id, field.id);
    }

    #[test]
    fn test_preview_requires_at_least_one_field() {
        let mut app = editor_with_fields(0);
        assert_eq!(app.preview(), Err(EditorError::NoFields));
        assert_eq!(app.view(), View::Editor);

        app.add_field(FieldType::Text).unwrap();
        app.preview().unwrap();
        assert_eq!(app.view(), View::Preview);
        app.back_to_editor().unwrap();
        assert_eq!(app.view(), View::Editor);
    }

    #[test]
    fn test_field_edits_rejected_outside_editor() {
        let mut app = EditorApp::new();
        assert_eq!(app.add_field(FieldType::Text), Err(EditorError::WrongView));
        assert_eq!(app.move_field(0, Direction::Up), Err(EditorError::WrongView));
    }

    #[test]
    fn test_move_field_swaps_adjacent_and_blocks_at_ends() {
        let mut app = editor_with_fields(3);
        let ids: Vec<String> = app.draft.fields.iter().map(|f| f.id.clone()).collect();

        app.move_field(0, Direction::Up).unwrap();
        assert_eq!(app.draft.fields[0].id, ids[0]); // blocked at the top

        app.move_field(2, Direction::Down).unwrap();
        assert_eq!(app.draft.fields[2].id, ids[2]); // blocked at the bottom

        app.move_field(1, Direction::Up).unwrap();
        assert_eq!(app.draft.fields[0].id, ids[1]);
        assert_eq!(app.draft.fields[1].id, ids[0]);
    }

    #[test]
    fn test_remove_and_update_field() {
        let mut app = editor_with_fields(2);
        app.update_field(0, |f| f.label = "Renamed".into()).unwrap();
        assert_eq!(app.draft.fields[0].label, "Renamed");

        app.remove_field(0).unwrap();
        assert_eq!(app.draft.fields.len(), 1);
        assert_eq!(app.remove_field(5), Err(EditorError::NoSuchField(5)));
    }

    #[test]
    fn test_validate_for_save() {
        let mut app = editor_with_fields(0);
        assert_eq!(app.validate_for_save(), Err(EditorError::NoFields));

        app.add_field(FieldType::Text).unwrap();
        app.draft.name = "   ".into();
        assert_eq!(app.validate_for_save(), Err(EditorError::EmptyName));

        app.draft.name = "Contact".into();
        assert!(app.validate_for_save().is_ok());
    }

    #[tokio::test]
    async fn test_delete_rejected_outside_list_view() {
        // Unroutable address: reaching the network would fail loudly.
        let client = ApiClient::new("http://127.0.0.1:1");
        let mut app = editor_with_fields(1);
        match app.delete_form(&client, 1).await {
            Err(SaveError::Invalid(EditorError::WrongView)) => {}
            other => panic!("expected view rejection, got {:?}", other.map(|_| ())),
        }
        assert_eq!(app.view(), View::Editor);
    }

    #[tokio::test]
    async fn test_save_with_empty_draft_makes_no_network_call() {
        // A client pointed at an unroutable address: any request would fail
        // loudly, so an Invalid result proves nothing was sent.
        let client = ApiClient::new("http://127.0.0.1:1");
        let mut app = editor_with_fields(0);
        match app.save(&client).await {
            Err(SaveError::Invalid(EditorError::NoFields)) => {}
            other => panic!("expected validation rejection, got {:?}", other.map(|_| ())),
        }
        assert_eq!(app.view(), View::Editor);
    }
}
