use crate::editors::{name_from_url, CellDisplay, Draft, EditInput, InputAffordance};
use crate::editors::{CheckboxEditor, DateEditor, FileEditor, MultiSelectEditor, NumberEditor, SelectEditor, TextEditor};
use crate::validation::{ValidatedConfig, ValidationSeverity};
use crate::{
    CellAddress, CellBody, CellVariant, ColumnConfig, CommitMode, CommitOutcome, CommitReceipt,
    CommitState, Direction, EventType, FileRef, Grid, GridConfig, MemoryTable, RenderedCell,
    SelectionUpdate, VariantConfig,
};
use anyhow::{Context, Result};
use egui::{Color32, RichText, Sense, Stroke};
use serde_json::json;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Main application state
pub struct DataGridApp {
    grid: Grid,

    /// Rows shown by the grid
    table: MemoryTable,

    /// Config file (if loaded)
    config_path: Option<PathBuf>,

    /// Status message
    status_message: String,

    /// Highest config issue per column
    column_issues: HashMap<String, ValidationSeverity>,

    show_validation_panel: bool,
    show_event_log: bool,
    deferred_commits: bool,

    /// Corner of the last plain click, for shift-click ranges
    selection_anchor: Option<CellAddress>,
}

/// Interaction collected while drawing, applied after the frame's layout
#[derive(Debug, Clone)]
enum UiAction {
    Click {
        address: CellAddress,
        shift: bool,
        toggle: bool,
    },
    Activate(CellAddress),
    Input(EditInput),
    Confirm,
    Cancel,
}

impl Default for DataGridApp {
    fn default() -> Self {
        Self::new()
    }
}

impl DataGridApp {
    /// App with the built-in sample grid
    pub fn new() -> Self {
        let mut app = Self::with_data(demo_config(), demo_table());
        app.status_message = "Welcome! Click to focus, double-click or Enter to edit.".to_string();
        app
    }

    pub fn with_data(config: GridConfig, table: MemoryTable) -> Self {
        let column_issues = config.columns_with_issues(&config.validate());
        let mut grid = Grid::new(config);
        grid.sync_view(&table);

        Self {
            grid,
            table,
            config_path: None,
            status_message: String::new(),
            column_issues,
            show_validation_panel: false,
            show_event_log: false,
            deferred_commits: false,
            selection_anchor: None,
        }
    }

    /// Load a grid config and show it over the sample rows
    pub fn from_config_file(path: &Path) -> Result<Self> {
        let config = GridConfig::load(path)?;
        let mut app = Self::with_data(config, demo_table());
        app.config_path = Some(path.to_path_buf());
        app.status_message = format!("Loaded config from {}", path.display());
        Ok(app)
    }

    /// Load a grid config and a JSON array of rows
    pub fn from_files(config_path: &Path, data_path: &Path) -> Result<Self> {
        let config = GridConfig::load(config_path)?;
        let text = std::fs::read_to_string(data_path)
            .with_context(|| format!("Failed to read data file: {}", data_path.display()))?;
        let rows: serde_json::Value = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse data from: {}", data_path.display()))?;
        let table = MemoryTable::from_json(&rows)?;

        let mut app = Self::with_data(config, table);
        app.config_path = Some(config_path.to_path_buf());
        app.status_message = format!("Loaded {} rows", app.table.len());
        Ok(app)
    }

    fn save_config(&mut self) {
        match &self.config_path {
            Some(path) => match self.grid.config().save(path) {
                Ok(()) => self.status_message = "✓ Config saved".to_string(),
                Err(e) => self.status_message = format!("❌ Save failed: {:#}", e),
            },
            None => {
                self.status_message = "⚠ No config file loaded".to_string();
            }
        }
    }

    fn delete_selected_rows(&mut self) {
        let mut rows: Vec<usize> = self
            .grid
            .state()
            .selected_addresses()
            .into_iter()
            .map(|address| address.row_index)
            .collect();
        if let Some(focused) = self.grid.state().get_focus() {
            if rows.is_empty() {
                rows.push(focused.row_index);
            }
        }
        rows.sort_unstable();
        rows.dedup();
        if rows.is_empty() {
            self.status_message = "⚠ No rows selected".to_string();
            return;
        }

        let keys: Vec<_> = rows
            .iter()
            .filter_map(|&row| self.grid.view().key_at(row))
            .collect();
        self.grid.rows_removed(&rows);
        let removed = self.table.remove_rows(&keys);
        self.grid.sync_view(&self.table);
        self.selection_anchor = None;
        self.status_message = format!("✓ Deleted {} row(s)", removed);
    }

    fn flush_commits(&mut self) {
        let settled = self.table.flush();
        let failed = settled.iter().filter(|(_, _, result)| result.is_err()).count();
        for (row_key, column_id, result) in settled.iter().cloned() {
            self.grid.settle_commit(row_key, &column_id, result);
        }
        self.status_message = if failed > 0 {
            format!("❌ {} of {} commits failed", failed, settled.len())
        } else {
            format!("✓ {} commits stored", settled.len())
        };
    }

    /// Keyboard shortcuts, applied before the frame is drawn
    fn handle_keys(&mut self, ctx: &egui::Context) {
        let editing = self.grid.session().map(|s| s.address.clone());
        let multiline = editing
            .as_ref()
            .and_then(|address| self.grid.column(&address.column_id))
            .is_some_and(|column| column.cell_variant() == CellVariant::LongText);

        let (enter, ctrl_enter, escape) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Enter),
                i.key_pressed(egui::Key::Enter) && i.modifiers.command,
                i.key_pressed(egui::Key::Escape),
            )
        });

        if editing.is_some() {
            if escape {
                self.apply(UiAction::Cancel);
            } else if ctrl_enter || (enter && !multiline) {
                self.apply(UiAction::Confirm);
            }
            return;
        }

        if enter {
            if let Some(focused) = self.grid.state().get_focus().cloned() {
                self.apply(UiAction::Activate(focused));
            }
            return;
        }
        if escape {
            self.grid.select(SelectionUpdate::Clear);
            return;
        }
        if ctx.wants_keyboard_input() {
            return;
        }

        let direction = ctx.input(|i| {
            if i.key_pressed(egui::Key::ArrowUp) {
                Some(Direction::Up)
            } else if i.key_pressed(egui::Key::ArrowDown) {
                Some(Direction::Down)
            } else if i.key_pressed(egui::Key::ArrowLeft) {
                Some(Direction::Left)
            } else if i.key_pressed(egui::Key::ArrowRight) {
                Some(Direction::Right)
            } else {
                None
            }
        });
        if let Some(direction) = direction {
            if let Some(address) = self.grid.move_focus(direction) {
                self.grid.select(SelectionUpdate::Single(address.clone()));
                self.selection_anchor = Some(address);
            }
        }
    }

    fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::Click {
                address,
                shift,
                toggle,
            } => {
                if shift {
                    let anchor = self
                        .selection_anchor
                        .clone()
                        .unwrap_or_else(|| address.clone());
                    self.grid.select(SelectionUpdate::Range {
                        anchor,
                        head: address.clone(),
                    });
                } else if toggle {
                    self.grid.select(SelectionUpdate::Toggle(address.clone()));
                } else {
                    self.grid.select(SelectionUpdate::Single(address.clone()));
                    self.selection_anchor = Some(address.clone());
                }
                self.grid.focus(Some(address));
            }
            UiAction::Activate(address) => {
                if let Err(e) = self.grid.activate(&self.table, address) {
                    self.status_message = format!("⚠ {}", e);
                }
            }
            UiAction::Input(input) => {
                self.grid.input(input);
            }
            UiAction::Confirm => {
                self.status_message = match self.grid.confirm(&mut self.table) {
                    CommitOutcome::Committed { receipt, .. } => match receipt {
                        CommitReceipt::Accepted => "✓ Value saved".to_string(),
                        CommitReceipt::Pending => "⏳ Value pending".to_string(),
                        CommitReceipt::Rejected(message) => format!("❌ Commit rejected: {}", message),
                    },
                    CommitOutcome::Unchanged => "No changes".to_string(),
                    CommitOutcome::Rejected(e) => format!("❌ {}", e),
                    CommitOutcome::NotEditing => String::new(),
                };
            }
            UiAction::Cancel => {
                if self.grid.cancel().is_some() {
                    self.status_message = "Editing cancelled".to_string();
                }
            }
        }
    }

    /// Render the entire UI
    fn render_ui(&mut self, ctx: &egui::Context) {
        self.grid.sync_view(&self.table);
        self.handle_keys(ctx);

        // Top menu bar
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Save config").clicked() {
                        self.save_config();
                        ui.close_menu();
                    }
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Data", |ui| {
                    let columns: Vec<(String, String)> = self
                        .grid
                        .columns()
                        .iter()
                        .map(|c| (c.id.clone(), c.title.clone()))
                        .collect();
                    ui.menu_button("Sort by", |ui| {
                        for (id, title) in &columns {
                            if ui.button(format!("{} ⏶", title)).clicked() {
                                self.table.sort_by(id.clone(), true);
                                ui.close_menu();
                            }
                            if ui.button(format!("{} ⏷", title)).clicked() {
                                self.table.sort_by(id.clone(), false);
                                ui.close_menu();
                            }
                        }
                    });
                    if ui.button("Clear sort").clicked() {
                        self.table.clear_sort();
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("🗑 Delete selected rows").clicked() {
                        self.delete_selected_rows();
                        ui.close_menu();
                    }
                    if ui.button("Reset view").clicked() {
                        self.grid.reset_view();
                        self.selection_anchor = None;
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.checkbox(&mut self.deferred_commits, "Deferred commits").changed() {
                        if self.deferred_commits {
                            self.table.set_commit_mode(CommitMode::Deferred);
                            self.status_message = "Commits are queued until flushed".to_string();
                        } else {
                            self.table.set_commit_mode(CommitMode::Immediate);
                            self.flush_commits();
                        }
                    }
                    let queued = self.table.queued().len();
                    if ui
                        .add_enabled(queued > 0, egui::Button::new(format!("Flush pending ({})", queued)))
                        .clicked()
                    {
                        self.flush_commits();
                        ui.close_menu();
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_validation_panel, "Show Validation Panel");
                    ui.checkbox(&mut self.show_event_log, "Show Event Log");
                });
            });
        });

        // Status bar
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(&self.status_message);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let selected = self.grid.state().selection().len();
                    ui.label(format!("{} rows · {} selected", self.grid.row_count(), selected));
                });
            });
        });

        if self.show_validation_panel {
            egui::TopBottomPanel::bottom("validation_panel")
                .default_height(160.0)
                .show(ctx, |ui| {
                    self.render_validation_panel(ui);
                });
        }

        if self.show_event_log {
            egui::SidePanel::right("event_log")
                .default_width(280.0)
                .show(ctx, |ui| {
                    self.render_event_log(ui);
                });
        }

        // Central panel (grid)
        egui::CentralPanel::default().show(ctx, |ui| {
            let rows = self.grid.render(&self.table);
            let mut actions = Vec::new();
            let mut hidden_column = None;

            egui::ScrollArea::both().show(ui, |ui| {
                egui::Grid::new("data_grid")
                    .striped(true)
                    .min_col_width(90.0)
                    .spacing([12.0, 6.0])
                    .show(ui, |ui| {
                        for column in self.grid.columns() {
                            if draw_header(ui, column, self.column_issues.get(&column.id)) {
                                hidden_column = Some(column.id.clone());
                            }
                        }
                        ui.end_row();

                        for row in &rows {
                            for cell in row {
                                draw_cell(ui, cell, &mut actions);
                            }
                            ui.end_row();
                        }
                    });
            });

            for action in actions {
                self.apply(action);
            }
            if let Some(column_id) = hidden_column {
                self.grid.column_removed(&column_id);
                self.status_message = format!("Column '{}' hidden", column_id);
            }
        });
    }

    fn render_validation_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Config Validation");
        ui.separator();

        let result = self.grid.config().validate();
        let error_count = result.errors().len();
        let warning_count = result.warnings().len();
        let info_count = result.info().len();

        ui.horizontal(|ui| {
            if error_count > 0 {
                ui.colored_label(Color32::RED, format!("❌ {} Errors", error_count));
            }
            if warning_count > 0 {
                ui.colored_label(
                    Color32::from_rgb(255, 165, 0),
                    format!("⚠ {} Warnings", warning_count),
                );
            }
            if info_count > 0 {
                ui.colored_label(Color32::LIGHT_BLUE, format!("ℹ {} Info", info_count));
            }
            if error_count == 0 && warning_count == 0 {
                ui.colored_label(Color32::GREEN, "✓ All checks passed");
            }
        });

        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            for issue in &result.issues {
                let (icon, color) = severity_style(issue.severity);
                ui.horizontal(|ui| {
                    ui.colored_label(color, icon);
                    ui.label(&issue.message);
                });
            }
        });
    }

    fn render_event_log(&self, ui: &mut egui::Ui) {
        ui.heading("Events");
        ui.separator();

        egui::ScrollArea::vertical()
            .stick_to_bottom(true)
            .show(ui, |ui| {
                let events = self.grid.events();
                let start = events.len().saturating_sub(200);
                for event in &events[start..] {
                    let text = match &event.event {
                        EventType::FocusChanged { to, .. } => match to {
                            Some(address) => format!("focus {}", address),
                            None => "focus cleared".to_string(),
                        },
                        EventType::EditStarted { address } => format!("edit {}", address),
                        EventType::EditEnded { address, reason } => {
                            format!("end edit {} ({:?})", address, reason)
                        }
                        EventType::ValueCommitted { address, .. } => format!("commit {}", address),
                        EventType::ValidationFailed { address, message } => {
                            format!("invalid {}: {}", address, message)
                        }
                        EventType::CommitSettled { column_id, error, .. } => match error {
                            Some(error) => format!("failed {}: {}", column_id, error),
                            None => format!("stored {}", column_id),
                        },
                        EventType::SelectionChanged { cell_count } => {
                            format!("selected {} cell(s)", cell_count)
                        }
                        EventType::RowsPruned { rows } => format!("pruned rows {:?}", rows),
                        EventType::ColumnPruned { column_id } => format!("pruned {}", column_id),
                        EventType::ViewReset => "view reset".to_string(),
                    };
                    ui.label(
                        RichText::new(format!("{} {}", event.timestamp.format("%H:%M:%S"), text))
                            .small()
                            .monospace(),
                    );
                }
            });
    }
}

fn severity_style(severity: ValidationSeverity) -> (&'static str, Color32) {
    match severity {
        ValidationSeverity::Error => ("❌", Color32::RED),
        ValidationSeverity::Warning => ("⚠", Color32::from_rgb(255, 165, 0)),
        ValidationSeverity::Info => ("ℹ", Color32::LIGHT_BLUE),
    }
}

/// Column header. Returns true when the user asked to hide the column.
fn draw_header(ui: &mut egui::Ui, column: &ColumnConfig, issue: Option<&ValidationSeverity>) -> bool {
    let mut title = RichText::new(&column.title).strong();
    if column.required {
        title = RichText::new(format!("{} *", column.title)).strong();
    }

    let mut hide = false;
    ui.horizontal(|ui| {
        let response = ui
            .add(egui::Label::new(title).sense(Sense::click()))
            .on_hover_text(format!("{} ({})", column.id, column.cell_variant()));
        response.context_menu(|ui| {
            if ui.button("Hide column").clicked() {
                hide = true;
                ui.close_menu();
            }
        });
        if let Some(severity) = issue {
            let (icon, color) = severity_style(*severity);
            ui.colored_label(color, icon);
        }
    });
    hide
}

fn display_text(display: &CellDisplay) -> RichText {
    match display {
        CellDisplay::Empty => RichText::new(""),
        CellDisplay::Link { label, .. } => RichText::new(label)
            .color(Color32::from_rgb(90, 160, 255))
            .underline(),
        CellDisplay::Number(number) => RichText::new(number).monospace(),
        CellDisplay::Tags(tags) => RichText::new(
            tags.iter()
                .map(|tag| format!("[{}]", tag))
                .collect::<Vec<_>>()
                .join(" "),
        ),
        CellDisplay::File { name, .. } => RichText::new(format!("📎 {}", name)),
        other => RichText::new(other.to_text()),
    }
}

fn draw_cell(ui: &mut egui::Ui, cell: &RenderedCell, actions: &mut Vec<UiAction>) {
    let response = match &cell.body {
        CellBody::Display(display) => {
            let mut text = display_text(display);
            match &cell.commit_state {
                Some(CommitState::Pending) => text = text.italics(),
                Some(CommitState::Failed(_)) => text = text.color(Color32::RED),
                None => {}
            }

            let mut response = ui.add(egui::SelectableLabel::new(cell.flags.is_selected, text));
            match display {
                CellDisplay::Link { href, .. } => response = response.on_hover_text(href),
                CellDisplay::File { href: Some(href), .. } => {
                    response = response.on_hover_text(href)
                }
                _ => {}
            }
            if let Some(CommitState::Failed(message)) = &cell.commit_state {
                response = response.on_hover_text(format!("⚠ {}", message));
            }

            if response.double_clicked() {
                actions.push(UiAction::Activate(cell.address.clone()));
            } else if response.clicked() {
                let (shift, toggle) = ui.input(|i| (i.modifiers.shift, i.modifiers.command));
                actions.push(UiAction::Click {
                    address: cell.address.clone(),
                    shift,
                    toggle,
                });
            }
            response
        }
        CellBody::Editor(view) => {
            ui.vertical(|ui| {
                draw_editor(ui, &cell.address, &view.affordance, &view.draft, actions);
                ui.horizontal(|ui| {
                    if ui.small_button("✓").clicked() {
                        actions.push(UiAction::Confirm);
                    }
                    if ui.small_button("✕").clicked() {
                        actions.push(UiAction::Cancel);
                    }
                    if let Some(remaining) = view.remaining {
                        let color = if remaining < 0 { Color32::RED } else { Color32::GRAY };
                        ui.label(RichText::new(remaining.to_string()).small().color(color));
                    }
                });
                if let Some(issue) = &view.issue {
                    ui.label(RichText::new(issue.to_string()).small().color(Color32::RED));
                }
            })
            .response
        }
    };

    if cell.flags.is_focused {
        ui.painter()
            .rect_stroke(response.rect.expand(2.0), 2.0, Stroke::new(2.0, Color32::LIGHT_BLUE));
    }
}

fn draw_editor(
    ui: &mut egui::Ui,
    address: &CellAddress,
    affordance: &InputAffordance,
    draft: &Draft,
    actions: &mut Vec<UiAction>,
) {
    match (affordance, draft) {
        (InputAffordance::Toggle { .. }, Draft::Check(state)) => {
            if ui.button(state.glyph()).clicked() {
                actions.push(UiAction::Input(EditInput::Toggle));
            }
        }
        (InputAffordance::Choice { options }, Draft::Choice(current)) => {
            egui::ComboBox::from_id_salt(("choice", address.row_index, &address.column_id))
                .selected_text(current.clone().unwrap_or_default())
                .show_ui(ui, |ui| {
                    if ui.selectable_label(current.is_none(), "(none)").clicked() {
                        actions.push(UiAction::Input(EditInput::Choose(None)));
                    }
                    for option in options {
                        let selected = current.as_ref() == Some(option);
                        if ui.selectable_label(selected, option).clicked() {
                            actions.push(UiAction::Input(EditInput::Choose(Some(option.clone()))));
                        }
                    }
                });
        }
        (InputAffordance::MultiChoice { options, .. }, Draft::Choices(chosen)) => {
            ui.horizontal_wrapped(|ui| {
                for option in options {
                    if ui.selectable_label(chosen.contains(option), option).clicked() {
                        actions.push(UiAction::Input(EditInput::ToggleChoice(option.clone())));
                    }
                }
            });
        }
        (InputAffordance::FilePicker { accept }, Draft::File(file)) => {
            let mut buffer = file
                .as_ref()
                .map(|f| f.url.clone().unwrap_or_else(|| f.name.clone()))
                .unwrap_or_default();
            let hint = if accept.is_empty() {
                "file name or link".to_string()
            } else {
                accept.join(", ")
            };
            let response = ui.add(egui::TextEdit::singleline(&mut buffer).hint_text(hint));
            request_focus_once(&response);
            if response.changed() {
                actions.push(UiAction::Input(EditInput::AttachFile(file_from_input(&buffer))));
            }
        }
        (affordance, Draft::Text(text)) => {
            let mut buffer = text.clone();
            let response = match affordance {
                InputAffordance::Text { multiline: true, .. } => ui.add(
                    egui::TextEdit::multiline(&mut buffer)
                        .desired_rows(3)
                        .hint_text("Ctrl+Enter to save"),
                ),
                InputAffordance::DatePicker { format } => {
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut buffer).hint_text(format!("YYYY-MM-DD or {}", format)),
                    );
                    if ui.small_button("Today").clicked() {
                        let today = chrono::Local::now().date_naive();
                        actions.push(UiAction::Input(EditInput::PickDate(today)));
                    }
                    response
                }
                InputAffordance::Url => {
                    ui.add(egui::TextEdit::singleline(&mut buffer).hint_text("https://"))
                }
                _ => ui.add(egui::TextEdit::singleline(&mut buffer)),
            };
            request_focus_once(&response);
            if response.changed() {
                actions.push(UiAction::Input(EditInput::Text(buffer)));
            }
        }
        (affordance, draft) => {
            tracing::debug!(?affordance, ?draft, "no editor widget for draft");
            ui.label(RichText::new("unsupported").color(Color32::GRAY));
        }
    }
}

/// File reference typed into the picker: a link or a bare name
fn file_from_input(input: &str) -> Option<FileRef> {
    match input.trim() {
        "" => None,
        link if link.contains("://") => Some(FileRef::new(name_from_url(link)).with_url(link)),
        name => Some(FileRef::new(name)),
    }
}

fn request_focus_once(response: &egui::Response) {
    if !response.has_focus() && !response.lost_focus() {
        response.request_focus();
    }
}

impl eframe::App for DataGridApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_ui(ctx);
    }
}

// ========== Sample Data ==========

/// Column layout used by the demo binaries
pub fn demo_config() -> GridConfig {
    GridConfig::new(vec![
        ColumnConfig::new("task", VariantConfig::ShortText(TextEditor::short(Some(40))))
            .with_title("Task")
            .required(),
        ColumnConfig::new("notes", VariantConfig::LongText(TextEditor::long(Some(280))))
            .with_title("Notes"),
        ColumnConfig::new(
            "estimate",
            VariantConfig::Number(NumberEditor {
                min: Some(0.0),
                max: Some(1000.0),
                decimals: Some(1),
            }),
        )
        .with_title("Estimate (h)"),
        ColumnConfig::new("link", VariantConfig::Url(crate::editors::UrlEditor)).with_title("Link"),
        ColumnConfig::new("done", VariantConfig::Checkbox(CheckboxEditor::default()))
            .with_title("Done"),
        ColumnConfig::new(
            "status",
            VariantConfig::Select(SelectEditor::new(vec![
                "Todo".into(),
                "Doing".into(),
                "Review".into(),
                "Done".into(),
            ])),
        )
        .with_title("Status"),
        ColumnConfig::new(
            "labels",
            VariantConfig::MultiSelect(MultiSelectEditor {
                options: vec!["bug".into(), "feature".into(), "docs".into(), "infra".into()],
                max_selected: Some(3),
            }),
        )
        .with_title("Labels"),
        ColumnConfig::new("due", VariantConfig::Date(DateEditor::new(None))).with_title("Due"),
        ColumnConfig::new(
            "attachment",
            VariantConfig::File(FileEditor::new(vec!["pdf".into(), "image/*".into()])),
        )
        .with_title("Attachment"),
    ])
}

/// Rows used by the demo binaries
pub fn demo_table() -> MemoryTable {
    let mut table = MemoryTable::new();
    table.push_row([
        ("task", json!("Write release notes")),
        ("notes", json!("Cover the new date picker")),
        ("estimate", json!(2.5)),
        ("link", json!("https://example.com/releases")),
        ("done", json!(false)),
        ("status", json!("Doing")),
        ("labels", json!(["docs"])),
        ("due", json!("2024-06-14")),
        ("attachment", json!({ "name": "draft.pdf" })),
    ]);
    table.push_row([
        ("task", json!("Fix crash on empty view")),
        ("estimate", json!("4")),
        ("done", json!(true)),
        ("status", json!("Review")),
        ("labels", json!(["bug", "infra"])),
        ("due", json!("06/20/2024")),
    ]);
    table.push_row([
        ("task", json!("Migrate CI runners")),
        ("notes", json!("Blocked on quota increase")),
        ("estimate", json!("n/a")),
        ("link", json!("ci.example.com/runners")),
        ("status", json!("Todo")),
        ("labels", json!("infra, feature")),
        ("attachment", json!("https://files.example.com/quota.png")),
    ]);
    table.push_row([
        ("task", json!("Design onboarding flow")),
        ("estimate", json!(12)),
        ("done", json!("yes")),
        ("status", json!("Done")),
        ("labels", json!(["feature"])),
        ("due", json!("2024-05-02T09:00:00Z")),
    ]);
    table
}
