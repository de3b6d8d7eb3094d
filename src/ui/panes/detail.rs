//! Detail pane rendering
//!
//! Shows the selected row's presentation in full: icon class, type label,
//! child count and pagination state, and the display string. When the display
//! string is truncated the pane offers the full value, and shows it once the
//! user asked for it.

use crate::inspector::{Icon, InspectorConfig, PaginationState};
use crate::ui::theme::{icon_glyph, DEFAULT_THEME};
use crate::ui::tree::{RowKind, VisibleRow};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn icon_name(icon: Icon) -> &'static str {
    match icon {
        Icon::PrimitiveValue => "primitive",
        Icon::Array => "array",
        Icon::Value => "value",
    }
}

fn state_name(state: PaginationState) -> &'static str {
    match state {
        PaginationState::Fresh => "fresh",
        PaginationState::PartiallyExpanded => "partially expanded",
        PaginationState::FullyExpanded => "fully expanded",
    }
}

fn field<'a>(name: &'a str, value: String) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("{:<10}", name), Style::default().fg(DEFAULT_THEME.comment)),
        Span::styled(value, Style::default().fg(DEFAULT_THEME.fg)),
    ])
}

/// Render the detail pane for the selected row
pub fn render_detail_pane(
    frame: &mut Frame,
    area: Rect,
    selected: Option<&VisibleRow>,
    config: &InspectorConfig,
) {
    let block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let lines = match selected.map(|row| row.kind) {
        None => vec![Line::styled(
            "(nothing selected)",
            Style::default().fg(DEFAULT_THEME.comment),
        )],
        Some(RowKind::More(remaining)) => vec![Line::styled(
            format!("{} more children; press Enter to load the next batch", remaining),
            Style::default().fg(DEFAULT_THEME.secondary),
        )],
        Some(RowKind::Error(message)) => vec![
            Line::styled(
                "Loading children failed",
                Style::default()
                    .fg(DEFAULT_THEME.error)
                    .add_modifier(Modifier::BOLD),
            ),
            Line::styled(message.to_string(), Style::default().fg(DEFAULT_THEME.error)),
            Line::styled(
                "Press Enter to retry",
                Style::default().fg(DEFAULT_THEME.comment),
            ),
        ],
        Some(RowKind::Value(row)) => {
            let presentation = row.node.presentation(config);
            let mut lines = vec![
                Line::from(vec![
                    Span::styled(
                        format!("{} ", icon_glyph(presentation.icon)),
                        Style::default().fg(DEFAULT_THEME.icon_color(presentation.icon)),
                    ),
                    Span::styled(
                        row.label.clone(),
                        Style::default()
                            .fg(DEFAULT_THEME.primary)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]),
                field("kind", icon_name(presentation.icon).to_string()),
                field(
                    "type",
                    presentation
                        .type_label
                        .clone()
                        .unwrap_or_else(|| row.node.value().type_name().to_string()),
                ),
            ];

            if row.node.has_children() {
                lines.push(field("children", row.node.children_count().to_string()));
                let state = if row.expanded {
                    format!(
                        "{} ({} of {} loaded)",
                        state_name(row.node.state()),
                        row.node.next_child_index(),
                        row.node.children_count()
                    )
                } else {
                    "collapsed".to_string()
                };
                lines.push(field("state", state));
            }

            lines.push(Line::raw(""));
            if presentation.is_truncated() && !row.show_full_value {
                lines.push(Line::styled(
                    presentation.value.clone(),
                    Style::default().fg(DEFAULT_THEME.fg),
                ));
                lines.push(Line::styled(
                    format!(
                        "Truncated to {} characters; press f to show the full value",
                        config.max_value_length()
                    ),
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::ITALIC),
                ));
            } else {
                lines.push(Line::styled(
                    presentation.full_value().to_string(),
                    Style::default().fg(DEFAULT_THEME.fg),
                ));
                if presentation.is_truncated() {
                    lines.push(Line::styled(
                        "Full value; press f to hide",
                        Style::default().fg(DEFAULT_THEME.success),
                    ));
                }
            }
            lines
        }
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
