// Cell dispatcher: resolves a column's variant editor and renders one cell
// in display or edit mode.

use crate::editors::{CellDisplay, Draft, InputAffordance};
use crate::grid::{CommitState, EditSession};
use crate::state::InteractionFlags;
use crate::validation::ValidationError;
use crate::{CellAddress, CellValue, CellVariant, ColumnConfig, RowKey};
use serde::Serialize;

/// Everything the dispatcher needs for one cell
#[derive(Debug, Clone)]
pub struct CellContext<'a> {
    pub address: CellAddress,
    pub row_key: RowKey,
    pub column: &'a ColumnConfig,
    pub value: CellValue,
    pub flags: InteractionFlags,
    /// Active edit session, used when it belongs to this cell
    pub session: Option<&'a EditSession>,
    pub commit_state: Option<CommitState>,
}

/// Output of one dispatch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedCell {
    pub address: CellAddress,
    pub row_key: RowKey,
    pub variant: CellVariant,
    #[serde(skip)]
    pub flags: InteractionFlags,
    pub value: CellValue,
    pub body: CellBody,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_state: Option<CommitState>,
}

impl RenderedCell {
    pub fn is_editing(&self) -> bool {
        matches!(self.body, CellBody::Editor(_))
    }

    /// Plain text shown for the cell
    pub fn text(&self) -> String {
        match &self.body {
            CellBody::Display(display) => display.to_text(),
            CellBody::Editor(view) => match &view.draft {
                Draft::Text(text) => text.clone(),
                Draft::Check(state) => state.glyph().to_string(),
                Draft::Choice(choice) => choice.clone().unwrap_or_default(),
                Draft::Choices(choices) => choices.join(", "),
                Draft::File(file) => file.as_ref().map(|f| f.name.clone()).unwrap_or_default(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum CellBody {
    Display(CellDisplay),
    Editor(EditorView),
}

/// Edit-mode rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditorView {
    pub affordance: InputAffordance,
    pub draft: Draft,
    /// Remaining characters when the column has a length limit
    pub remaining: Option<i64>,
    /// Last rejected confirm, shown until the next input
    #[serde(skip)]
    pub issue: Option<ValidationError>,
}

/// Render one cell. Never fails: unknown variants were already resolved to
/// short-text when the column was configured.
pub fn dispatch(ctx: CellContext<'_>) -> RenderedCell {
    let editor = ctx.column.editor();

    let body = if ctx.flags.is_editing {
        let (draft, issue) = match ctx.session.filter(|s| s.address == ctx.address) {
            Some(session) => (session.draft.clone(), session.issue.clone()),
            None => (editor.draft(&ctx.value), None),
        };
        CellBody::Editor(EditorView {
            affordance: editor.affordance(),
            remaining: editor.remaining(&draft),
            draft,
            issue,
        })
    } else {
        CellBody::Display(editor.display(&ctx.value))
    };

    RenderedCell {
        address: ctx.address,
        row_key: ctx.row_key,
        variant: editor.variant(),
        flags: ctx.flags,
        value: ctx.value,
        body,
        commit_state: ctx.commit_state,
    }
}

/// Render a cell straight from a raw source value
pub fn dispatch_raw(
    address: CellAddress,
    row_key: RowKey,
    raw: &serde_json::Value,
    column: &ColumnConfig,
    flags: InteractionFlags,
) -> RenderedCell {
    dispatch(CellContext {
        address,
        row_key,
        column,
        value: column.editor().coerce(raw),
        flags,
        session: None,
        commit_state: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editors::{NumberEditor, TextEditor};
    use crate::{CheckState, VariantConfig};
    use serde_json::json;

    fn editing() -> InteractionFlags {
        InteractionFlags {
            is_focused: true,
            is_editing: true,
            is_selected: false,
        }
    }

    #[test]
    fn test_display_mode() {
        let column = ColumnConfig::new("n", VariantConfig::Number(NumberEditor::default()));
        let cell = dispatch_raw(
            CellAddress::new(0, "n"),
            RowKey::new(),
            &json!(1234),
            &column,
            InteractionFlags::default(),
        );

        assert_eq!(cell.variant, CellVariant::Number);
        assert_eq!(cell.body, CellBody::Display(CellDisplay::Number("1,234".into())));
        assert!(!cell.is_editing());
    }

    #[test]
    fn test_edit_mode_without_session_seeds_draft() {
        let column = ColumnConfig::new("t", VariantConfig::ShortText(TextEditor::short(Some(5))));
        let cell = dispatch_raw(
            CellAddress::new(0, "t"),
            RowKey::new(),
            &json!("abc"),
            &column,
            editing(),
        );

        match cell.body {
            CellBody::Editor(view) => {
                assert_eq!(view.draft, Draft::Text("abc".into()));
                assert_eq!(view.remaining, Some(2));
                assert_eq!(view.issue, None);
            }
            other => panic!("expected editor, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_variant_renders_as_text() {
        let column: ColumnConfig =
            serde_json::from_value(json!({"id": "x", "variant": "hologram"})).unwrap();
        let cell = dispatch_raw(
            CellAddress::new(2, "x"),
            RowKey::new(),
            &json!(true),
            &column,
            InteractionFlags::default(),
        );

        assert_eq!(cell.variant, CellVariant::ShortText);
        assert_eq!(cell.text(), "true");
    }

    #[test]
    fn test_checkbox_glyph() {
        let column: ColumnConfig =
            serde_json::from_value(json!({"id": "done", "variant": "checkbox"})).unwrap();
        let cell = dispatch_raw(
            CellAddress::new(0, "done"),
            RowKey::new(),
            &json!(true),
            &column,
            InteractionFlags::default(),
        );
        assert_eq!(cell.body, CellBody::Display(CellDisplay::Check(CheckState::Checked)));
    }
}
