//! Variables pane rendering
//!
//! Draws the flattened variables tree: one line per value row, with the
//! expansion marker, icon glyph, label, display string and a right-aligned
//! type label, plus the "N more items" and failed-batch placeholders.
//! Presentations are recomputed for every visible row on every paint.

use crate::inspector::presenter::truncate_display;
use crate::inspector::InspectorConfig;
use crate::ui::theme::{icon_glyph, DEFAULT_THEME};
use crate::ui::tree::{RowKind, VisibleRow};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Scroll state for the variables pane
pub struct VariablesScrollState {
    pub offset: usize,
}

/// Data needed to render the variables pane
pub struct VariablesRenderData<'a> {
    pub title: &'a str,
    pub rows: &'a [VisibleRow<'a>],
    pub selected: usize,
    pub config: &'a InspectorConfig,
}

/// Render the variables pane
pub fn render_variables_pane(
    frame: &mut Frame,
    area: Rect,
    data: VariablesRenderData,
    is_focused: bool,
    scroll_state: &mut VariablesScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" Variables: {} ", data.title))
        .borders(Borders::ALL)
        .border_style(border_style);

    if data.rows.is_empty() {
        let list = List::new(vec![
            ListItem::new("(no bindings)").style(Style::default().fg(DEFAULT_THEME.comment))
        ])
        .block(block);
        frame.render_widget(list, area);
        return;
    }

    let content_width = area.width.saturating_sub(2) as usize; // borders only
    let visible_height = area.height.saturating_sub(2).max(1) as usize;

    // Keep the selection inside the window
    if data.selected < scroll_state.offset {
        scroll_state.offset = data.selected;
    } else if data.selected >= scroll_state.offset + visible_height {
        scroll_state.offset = data.selected + 1 - visible_height;
    }
    let max_scroll = data.rows.len().saturating_sub(visible_height);
    scroll_state.offset = scroll_state.offset.min(max_scroll);

    let items: Vec<ListItem> = data
        .rows
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, row)| {
            let line = row_line(row, data.config, content_width);
            let item = ListItem::new(line);
            if idx == data.selected {
                item.style(Style::default().bg(DEFAULT_THEME.current_line_bg))
            } else {
                item
            }
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

/// Map keys render as terms, so their labels get the same cap as values
fn row_label(label: &str, config: &InspectorConfig) -> String {
    truncate_display(label, config.max_value_length()).unwrap_or_else(|| label.to_string())
}

fn row_line(row: &VisibleRow, config: &InspectorConfig, content_width: usize) -> Line<'static> {
    let indent = "  ".repeat(row.depth);

    match row.kind {
        RowKind::More(remaining) => Line::from(vec![
            Span::raw(indent),
            Span::styled(
                format!("  … {} more item{}", remaining, if remaining == 1 { "" } else { "s" }),
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::ITALIC),
            ),
        ]),
        RowKind::Error(message) => Line::from(vec![
            Span::raw(indent),
            Span::styled(
                format!("  ✗ {}", message),
                Style::default().fg(DEFAULT_THEME.error),
            ),
        ]),
        RowKind::Value(tree_row) => {
            let presentation = tree_row.node.presentation(config);
            let marker = match (tree_row.node.has_children(), tree_row.expanded) {
                (false, _) => "  ",
                (true, false) => "▸ ",
                (true, true) => "▾ ",
            };
            let glyph = icon_glyph(presentation.icon);
            let type_str = presentation.type_label.unwrap_or_default();
            let label = row_label(&tree_row.label, config);

            // Calculate padding for right-alignment of the type label
            let left_width = indent.chars().count()
                + 2 // marker
                + glyph.chars().count()
                + 1
                + label.chars().count()
                + 3 // " = "
                + presentation.value.chars().count();
            let padding = content_width.saturating_sub(left_width + type_str.chars().count() + 1);

            let mut spans = vec![
                Span::raw(indent),
                Span::styled(marker, Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(
                    glyph,
                    Style::default().fg(DEFAULT_THEME.icon_color(presentation.icon)),
                ),
                Span::raw(" "),
                Span::styled(
                    label,
                    Style::default()
                        .fg(DEFAULT_THEME.fg)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" = ", Style::default().fg(DEFAULT_THEME.comment)),
                Span::styled(
                    presentation.value,
                    Style::default().fg(DEFAULT_THEME.icon_color(presentation.icon)),
                ),
            ];

            if !type_str.is_empty() {
                spans.push(Span::raw(" ".repeat(padding + 1)));
                spans.push(Span::styled(
                    type_str,
                    Style::default().fg(DEFAULT_THEME.type_name),
                ));
            }

            Line::from(spans)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspector::PaginatedValueNode;
    use crate::term::RemoteValue;
    use crate::ui::tree::TreeRow;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_long_key_label_is_truncated() {
        let config = InspectorConfig::new(10, 20).unwrap();
        let key = format!("<<\"{}\">>", "k".repeat(50));
        let row = TreeRow::new(key.clone(), PaginatedValueNode::new(RemoteValue::Integer(1)));
        let visible = VisibleRow {
            path: vec![0],
            depth: 0,
            kind: RowKind::Value(&row),
        };

        let text = line_text(&row_line(&visible, &config, 200));
        let expected = format!("{}...", &key[..17]);
        assert!(text.contains(&format!("{} = 1", expected)), "{}", text);
        assert!(!text.contains(&key));
        // The row keeps the full label for the detail pane
        assert_eq!(row.label, key);
    }

    #[test]
    fn test_short_label_is_unchanged() {
        let config = InspectorConfig::default();
        assert_eq!(row_label("name", &config), "name");
    }
}
