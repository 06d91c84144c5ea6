/*!
 * Terminal rendering
 *
 * Draws the tree pane, the selected files pane, the help bar and any open
 * dialog. Holds no state of its own beyond the widgets' scroll positions
 * kept in [`App`].
 */

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;
use strum::IntoEnumIterator;

use crate::app::{App, ExportChoice, Modal};
use crate::types::{Expansion, Focus, NodeKind};
use crate::writer::relative_label;

const ACCENT: Color = Color::Blue;

const HELP: &str = "Keys: h/j/k/l navigate  |  Space toggle selection  |  [ and ] change focus  |  d remove (right)  |  e open/copy  |  q quit";

/// Draw the whole screen
pub fn draw(frame: &mut Frame, app: &mut App) {
    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(" File Gather ");
    let inner = outer.inner(frame.area());
    frame.render_widget(outer, frame.area());

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(3, 5),
            Constraint::Length(1),
            Constraint::Ratio(2, 5),
        ])
        .split(rows[0]);

    draw_tree(frame, app, panes[0]);
    frame.render_widget(
        Block::default().style(Style::default().bg(ACCENT)),
        panes[1],
    );
    draw_selection(frame, app, panes[2]);
    frame.render_widget(
        Paragraph::new(HELP).style(Style::default().bg(ACCENT).fg(Color::White)),
        rows[1],
    );

    match app.modal() {
        Some(Modal::ExportChoice(choice)) => draw_choice(frame, *choice),
        Some(Modal::Notice(notice)) => {
            let color = if notice.is_error { Color::Red } else { ACCENT };
            draw_dialog(frame, &notice.message, Line::from(" OK ").centered(), color);
        }
        None => {}
    }
}

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title)
}

fn draw_tree(frame: &mut Frame, app: &mut App, area: Rect) {
    let navigator = &app.navigator;
    let tree = navigator.tree();
    let rows = tree.visible();

    let items: Vec<ListItem> = rows
        .iter()
        .map(|&(id, depth)| {
            let node = tree.node(id);
            let indent = "  ".repeat(depth);
            let line = match node.kind {
                NodeKind::Directory => {
                    let marker = match node.expansion {
                        Expansion::Expanded(_) => "▾",
                        Expansion::Collapsed(_) | Expansion::Unloaded => "▸",
                    };
                    let (label, color) = if node.parent.is_none() {
                        (node.name.clone(), Color::Yellow)
                    } else {
                        (format!("[DIR] {}", node.name), Color::Green)
                    };
                    Line::from(vec![
                        Span::raw(format!("{}{} ", indent, marker)),
                        Span::styled(label, Style::default().fg(color)),
                    ])
                }
                NodeKind::File => {
                    let check = if navigator.selection().contains(&node.path) {
                        "[x]"
                    } else {
                        "[ ]"
                    };
                    Line::from(format!("{}  {} {}", indent, check, node.name))
                }
            };
            ListItem::new(line)
        })
        .collect();

    let cursor = rows.iter().position(|&(id, _)| id == navigator.cursor());
    app.tree_state.select(cursor);

    let list = List::new(items)
        .block(pane_block(" Tree ", navigator.focus() == Focus::Tree))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_stateful_widget(list, area, &mut app.tree_state);
}

fn draw_selection(frame: &mut Frame, app: &mut App, area: Rect) {
    let navigator = &app.navigator;
    let selection = navigator.selection();
    let base = &navigator.tree().node(navigator.tree().root()).path;

    let items: Vec<ListItem> = selection
        .ordered_paths()
        .map(|path| ListItem::new(relative_label(base, path)))
        .collect();

    let focused = navigator.focus() == Focus::List;
    app.list_state
        .select((!selection.is_empty()).then_some(navigator.list_cursor()));

    let title = format!(" Selected files ({}) ", selection.len());
    let mut list = List::new(items).block(pane_block(&title, focused));
    if focused {
        list = list.highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    }
    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn draw_choice(frame: &mut Frame, highlighted: ExportChoice) {
    let buttons: Vec<Span> = ExportChoice::iter()
        .map(|choice| {
            let style = if choice == highlighted {
                Style::default().bg(ACCENT).fg(Color::White)
            } else {
                Style::default()
            };
            Span::styled(format!(" {} ", choice), style)
        })
        .flat_map(|span| [span, Span::raw("  ")])
        .collect();

    draw_dialog(
        frame,
        "Open selected files in an editor or copy combined content to clipboard?",
        Line::from(buttons).centered(),
        ACCENT,
    );
}

fn draw_dialog(frame: &mut Frame, message: &str, buttons: Line, color: Color) {
    let area = centered_rect(60, 9, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);
    frame.render_widget(
        Paragraph::new(message)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false }),
        parts[0],
    );
    frame.render_widget(Paragraph::new(buttons), parts[1]);
}

/// Rectangle of `percent_x` width and `height` rows centered in `area`
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let width = area.width * percent_x / 100;
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
