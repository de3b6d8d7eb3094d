//! Main TUI application state and logic

use crate::inspector::{BatchOutcome, InspectResult};
use crate::ui::panes::{
    render_detail_pane, render_status_bar, render_variables_pane, VariablesRenderData,
    VariablesScrollState,
};
use crate::ui::tree::{RowKind, VariablesTree};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::debug;
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout},
};
use std::io;
use std::time::Duration;

/// Rows moved by PageUp/PageDown
const PAGE_STEP: usize = 10;

/// What the selected line is, detached from the tree borrow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Selection {
    Value { expanded: bool, has_children: bool },
    Placeholder,
}

/// The main application state
pub struct App {
    /// Bindings and their materialized children
    pub tree: VariablesTree,

    /// Shown in the variables pane title (usually the input file)
    pub title: String,

    /// Index into the visible rows
    pub selected: usize,

    pub variables_scroll: VariablesScrollState,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    pub fn new(tree: VariablesTree, title: String) -> Self {
        let status_message = format!("{} binding(s) loaded", tree.roots().len());
        App {
            tree,
            title,
            selected: 0,
            variables_scroll: VariablesScrollState { offset: 0 },
            should_quit: false,
            status_message,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        let rows = self.tree.visible_rows();
        let config = self.tree.config();

        render_variables_pane(
            frame,
            columns[0],
            VariablesRenderData {
                title: &self.title,
                rows: &rows,
                selected: self.selected,
                config,
            },
            true,
            &mut self.variables_scroll,
        );

        render_detail_pane(frame, columns[1], rows.get(self.selected), config);

        render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.selected,
            rows.len(),
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::PageUp => self.move_selection(-(PAGE_STEP as isize)),
            KeyCode::PageDown => self.move_selection(PAGE_STEP as isize),
            KeyCode::Home => self.selected = 0,
            KeyCode::End => self.selected = self.row_count().saturating_sub(1),
            KeyCode::Right => match self.selection() {
                Some((path, Selection::Value { expanded: false, has_children: true })) => {
                    self.expand(&path);
                }
                Some((_, Selection::Value { expanded: true, .. })) => self.move_selection(1),
                Some((path, Selection::Placeholder)) => self.load_more(&path),
                _ => {}
            },
            KeyCode::Left => match self.selection() {
                Some((path, Selection::Value { expanded: true, .. })) => self.collapse(&path),
                Some((path, Selection::Value { .. })) => {
                    if let Some((_, parent)) = path.split_last() {
                        self.select_path(parent);
                    }
                }
                Some((path, Selection::Placeholder)) => self.select_path(&path),
                None => {}
            },
            KeyCode::Enter => match self.selection() {
                Some((path, Selection::Value { expanded: true, .. })) => self.collapse(&path),
                Some((path, Selection::Value { has_children: true, .. })) => self.expand(&path),
                Some((_, Selection::Value { .. })) => {
                    self.status_message = "Value has no children".to_string();
                }
                Some((path, Selection::Placeholder)) => self.load_more(&path),
                None => {}
            },
            KeyCode::Char('f') | KeyCode::Char('F') => {
                if let Some((path, Selection::Value { .. })) = self.selection() {
                    self.status_message = if self.tree.toggle_full_value(&path) {
                        "Showing full value".to_string()
                    } else if self.tree.row(&path).is_some_and(|row| {
                        row.node.presentation(self.tree.config()).is_truncated()
                    }) {
                        "Showing truncated value".to_string()
                    } else {
                        "Value is shown in full".to_string()
                    };
                }
            }
            _ => {}
        }
    }

    fn row_count(&self) -> usize {
        self.tree.visible_rows().len()
    }

    fn selection(&self) -> Option<(Vec<usize>, Selection)> {
        let rows = self.tree.visible_rows();
        let row = rows.get(self.selected)?;
        let selection = match row.kind {
            RowKind::Value(tree_row) => Selection::Value {
                expanded: tree_row.expanded,
                has_children: tree_row.node.has_children(),
            },
            RowKind::More(_) | RowKind::Error(_) => Selection::Placeholder,
        };
        Some((row.path.clone(), selection))
    }

    fn move_selection(&mut self, delta: isize) {
        let last = self.row_count().saturating_sub(1);
        self.selected = self.selected.saturating_add_signed(delta).min(last);
    }

    /// Select the value row at `path`
    fn select_path(&mut self, path: &[usize]) {
        let position = self
            .tree
            .visible_rows()
            .iter()
            .position(|row| row.path == path && matches!(row.kind, RowKind::Value(_)));
        if let Some(position) = position {
            self.selected = position;
        }
    }

    fn label_of(&self, path: &[usize]) -> String {
        self.tree
            .row(path)
            .map(|row| row.label.clone())
            .unwrap_or_default()
    }

    fn expand(&mut self, path: &[usize]) {
        debug!("expanding row {:?}", path);
        let result = self.tree.expand(path);
        self.report_batch(path, result);
    }

    fn load_more(&mut self, path: &[usize]) {
        debug!("loading next batch for row {:?}", path);
        let result = self.tree.load_more(path);
        self.report_batch(path, result);
    }

    fn collapse(&mut self, path: &[usize]) {
        if self.tree.collapse(path) {
            self.status_message = format!("Collapsed {}", self.label_of(path));
            self.select_path(path);
        }
    }

    fn report_batch(&mut self, path: &[usize], result: InspectResult<Option<BatchOutcome>>) {
        let label = self.label_of(path);
        self.status_message = match result {
            Ok(Some(BatchOutcome::MoreRemain(remaining))) => {
                format!("Loaded children of {}; {} more", label, remaining)
            }
            Ok(Some(BatchOutcome::Exhausted)) => format!("Loaded all children of {}", label),
            Ok(None) => "Nothing to load".to_string(),
            Err(err) => format!("Error: {}", err),
        };
        let last = self.row_count().saturating_sub(1);
        self.selected = self.selected.min(last);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspector::InspectorConfig;
    use crate::reader::read_bindings;
    use crossterm::event::KeyModifiers;

    fn app(source: &str, batch: usize) -> App {
        let config = InspectorConfig::new(batch, 40).unwrap();
        let tree = VariablesTree::new(read_bindings(source).unwrap(), config);
        App::new(tree, "test".to_string())
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_right_expands_and_enter_loads_more() {
        let mut app = app("L = [1,2,3].", 2);

        press(&mut app, KeyCode::Right);
        assert_eq!(app.row_count(), 4);
        assert_eq!(app.status_message, "Loaded children of L; 1 more");

        press(&mut app, KeyCode::End);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.row_count(), 4);
        assert_eq!(app.status_message, "Loaded all children of L");
    }

    #[test]
    fn test_left_on_child_selects_parent_then_collapses() {
        let mut app = app("T = {a, b}.", 10);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.selected, 1);

        press(&mut app, KeyCode::Left);
        assert_eq!(app.selected, 0);

        press(&mut app, KeyCode::Left);
        assert_eq!(app.row_count(), 1);
        assert_eq!(app.status_message, "Collapsed T");
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut app = app("A = 1.\nB = 2.", 10);
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.selected, 1);
        press(&mut app, KeyCode::PageUp);
        assert_eq!(app.selected, 0);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.status_message, "Value has no children");
    }

    #[test]
    fn test_quit() {
        let mut app = app("A = 1.", 10);
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
