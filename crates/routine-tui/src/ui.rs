use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};
use routine_core::filter::PLACEHOLDER_MESSAGE;
use routine_core::{ChatRole, Visibility};

use crate::app::{App, FocusPane, InputMode, StatusKind};

/// Splits on `**` so that every odd segment is rendered bold
fn parse_markdown_line(text: &str) -> Line<'static> {
    let segments: Vec<&str> = text.split("**").collect();

    // An unmatched marker leaves the text as typed
    if segments.len() % 2 == 0 {
        return Line::from(text.to_string());
    }

    let spans: Vec<Span<'static>> = segments
        .iter()
        .enumerate()
        .filter(|(_, s)| !s.is_empty())
        .map(|(i, s)| {
            if i % 2 == 1 {
                Span::styled(s.to_string(), Style::default().add_modifier(Modifier::BOLD))
            } else {
                Span::raw(s.to_string())
            }
        })
        .collect();
    Line::from(spans)
}

fn border_color(focused: bool) -> Color {
    if focused {
        Color::Cyan
    } else {
        Color::DarkGray
    }
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, filter bar, body, footer
    let [header_area, filter_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    let [left_area, right_area] = Layout::horizontal([
        Constraint::Percentage(55),
        Constraint::Percentage(45),
    ])
    .areas(body_area);

    let [products_area, caption_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(5),
    ])
    .areas(left_area);

    let tray_height = (app.tray_products.len().clamp(1, 6) + 2) as u16;
    let [tray_area, chat_area, input_area] = Layout::vertical([
        Constraint::Length(tray_height),
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(right_area);

    // Store areas for mouse hit-testing
    app.products_area = Some(products_area);
    app.tray_area = Some(tray_area);
    app.chat_area = Some(chat_area);
    app.input_area = Some(input_area);

    render_header(app, frame, header_area);
    render_filter_bar(app, frame, filter_area);
    render_products(app, frame, products_area);
    render_caption(app, frame, caption_area);
    render_tray(app, frame, tray_area);
    render_chat(app, frame, chat_area);
    render_chat_input(app, frame, input_area);
    render_footer(app, frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let selected = app.selection.len();
    let selection_indicator = if selected > 0 {
        format!(" [{} selected]", selected)
    } else {
        String::new()
    };

    let title = Line::from(vec![
        Span::styled(
            " Routine Advisor ",
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ),
        Span::styled(selection_indicator, Style::default().fg(Color::White)),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_filter_bar(app: &App, frame: &mut Frame, area: Rect) {
    let [category_area, keyword_area] = Layout::horizontal([
        Constraint::Length(34),
        Constraint::Min(0),
    ])
    .areas(area);

    let category_focused = app.focus == FocusPane::Category;
    let category_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(category_focused)))
        .title(" Category ");
    let category = Paragraph::new(Line::from(vec![
        Span::styled("< ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.criteria.category.label(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(" >", Style::default().fg(Color::DarkGray)),
    ]))
    .block(category_block);
    frame.render_widget(category, category_area);

    let keyword_focused = app.focus == FocusPane::Keyword;
    let keyword_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(keyword_focused)))
        .title(" Search by name or brand ");
    let keyword = Paragraph::new(app.criteria.keyword.as_str()).block(keyword_block);
    frame.render_widget(keyword, keyword_area);

    if keyword_focused && app.input_mode == InputMode::Editing {
        set_input_cursor(frame, keyword_area, &app.criteria.keyword, app.keyword_cursor);
    }
}

fn render_products(app: &mut App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == FocusPane::Products;
    let title = match &app.visibility {
        Visibility::Placeholder => " Products ".to_string(),
        Visibility::Products(products) => format!(" Products ({}) ", products.len()),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(focused)))
        .title(title);

    let products = match &app.visibility {
        Visibility::Placeholder => {
            let placeholder = Paragraph::new(Span::styled(
                PLACEHOLDER_MESSAGE,
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ))
            .block(block)
            .wrap(Wrap { trim: true });
            frame.render_widget(placeholder, area);
            return;
        }
        Visibility::Products(products) if products.is_empty() => {
            let empty = Paragraph::new(Span::styled(
                "No products match your filters",
                Style::default().fg(Color::DarkGray),
            ))
            .block(block);
            frame.render_widget(empty, area);
            return;
        }
        Visibility::Products(products) => products,
    };

    let items: Vec<ListItem> = products
        .iter()
        .enumerate()
        .map(|(i, product)| {
            let selected = app.selection.contains(product.id);
            let marker = if selected { "[x] " } else { "[ ] " };
            let name_style = if selected {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let mut style = Style::default();
            if app.hovered_product == Some(i) {
                style = style.bg(Color::Rgb(40, 40, 40));
            }

            ListItem::new(Line::from(vec![
                Span::styled(marker, name_style),
                Span::styled(product.name.clone(), name_style),
                Span::styled(format!("  {}", product.brand), Style::default().fg(Color::Gray)),
            ]))
            .style(style)
        })
        .collect();

    let highlight = if focused {
        Style::default().bg(Color::Blue).fg(Color::White)
    } else {
        Style::default()
    };
    let list = List::new(items)
        .block(block)
        .highlight_style(highlight)
        .highlight_symbol(if focused { "> " } else { "  " });

    frame.render_stateful_widget(list, area, &mut app.product_state);
}

fn render_caption(app: &App, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Description ");

    let text = match app.caption() {
        Some(description) => Text::from(description.to_string()),
        None => Text::from(Span::styled(
            "Hover or highlight a product to read about it",
            Style::default().fg(Color::DarkGray),
        )),
    };

    let caption = Paragraph::new(text).block(block).wrap(Wrap { trim: true });
    frame.render_widget(caption, area);
}

fn render_tray(app: &mut App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == FocusPane::Tray;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { Color::Cyan } else { Color::Magenta }))
        .title(format!(" My Selection ({}) ", app.tray_products.len()));

    if app.tray_products.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "Select products to build a routine",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .tray_products
        .iter()
        .map(|product| {
            ListItem::new(Line::from(vec![
                Span::raw(format!(" {} ", product.name)),
                Span::styled("x", Style::default().fg(Color::Red)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::Magenta)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.tray_state);
}

fn render_chat(app: &mut App, frame: &mut Frame, area: Rect) {
    // Inner size for scroll calculations
    app.chat_height = area.height.saturating_sub(2);
    app.chat_width = area.width.saturating_sub(2);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(app.focus == FocusPane::Chat)))
        .title(" Beauty Advisor ");

    let mut lines: Vec<Line> = Vec::new();
    for msg in app.conversation.visible_messages() {
        match msg.role {
            ChatRole::User => {
                lines.push(Line::from(Span::styled(
                    "You:",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )));
                for line in msg.display_text().lines() {
                    lines.push(Line::from(line.to_string()));
                }
            }
            ChatRole::Assistant => {
                lines.push(Line::from(Span::styled(
                    "Advisor:",
                    Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
                )));
                for line in msg.display_text().lines() {
                    lines.push(parse_markdown_line(line));
                }
            }
            ChatRole::System => continue,
        }
        lines.push(Line::default());
    }

    if app.thinking_visible() {
        lines.push(Line::from(Span::styled(
            "Advisor:",
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )));
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat((app.animation_frame as usize) + 1);
        lines.push(Line::from(Span::styled(
            format!("Thinking{}", dots),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    let chat = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: true })
        .scroll((app.chat_scroll, 0));

    frame.render_widget(chat, area);
}

fn render_chat_input(app: &App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == FocusPane::Chat;
    let awaiting = app.conversation.is_awaiting();

    let (title, color) = if awaiting {
        (" Waiting for reply (Ctrl+X to cancel) ", Color::DarkGray)
    } else if focused && app.input_mode == InputMode::Editing {
        (" Message (Enter to send) ", Color::Yellow)
    } else {
        (" Message ", border_color(focused))
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title);

    // Horizontal scroll to keep the cursor visible
    let inner_width = area.width.saturating_sub(2) as usize;
    let scroll_offset = if inner_width > 0 && app.chat_cursor >= inner_width {
        app.chat_cursor - inner_width + 1
    } else {
        0
    };
    let visible_text: String = app
        .chat_input
        .chars()
        .skip(scroll_offset)
        .take(inner_width)
        .collect();

    let input = Paragraph::new(visible_text)
        .style(Style::default().fg(if awaiting { Color::DarkGray } else { Color::Cyan }))
        .block(block);
    frame.render_widget(input, area);

    if focused && app.input_mode == InputMode::Editing {
        let x = area.x + 1 + (app.chat_cursor - scroll_offset) as u16;
        frame.set_cursor_position((x.min(area.x + area.width.saturating_sub(2)), area.y + 1));
    }
}

fn set_input_cursor(frame: &mut Frame, area: Rect, text: &str, cursor: usize) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let column = cursor.min(text.chars().count()).min(inner_width.saturating_sub(1));
    frame.set_cursor_position((area.x + 1 + column as u16, area.y + 1));
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default().bg(Color::Blue).fg(Color::White),
        InputMode::Editing => Style::default().bg(Color::Yellow).fg(Color::Black),
    };
    let mode_text = match app.input_mode {
        InputMode::Normal => " NORMAL ",
        InputMode::Editing => " EDIT ",
    };

    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let mut spans = vec![Span::styled(mode_text, mode_style)];

    if let Some(status) = &app.status {
        let style = match status.kind {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        };
        spans.push(Span::styled(format!(" {} ", status.text), style));
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
        return;
    }

    let pane_hints: &[(&str, &str)] = match (app.focus, app.input_mode) {
        (FocusPane::Keyword, InputMode::Editing) => &[("Enter", "results"), ("Esc", "done")],
        (FocusPane::Chat, InputMode::Editing) => {
            &[("Enter", "send"), ("Up/Down", "scroll"), ("Esc", "done")]
        }
        (FocusPane::Category, _) => &[("h/l", "category")],
        (FocusPane::Products, _) => &[("j/k", "nav"), ("Space", "select")],
        (FocusPane::Tray, _) => &[("j/k", "nav"), ("d", "remove"), ("O", "prune missing")],
        (_, InputMode::Normal) => &[("i", "edit")],
    };

    for (key, label) in pane_hints {
        spans.push(Span::styled(format!(" {} ", key), key_style));
        spans.push(Span::styled(format!(" {} ", label), label_style));
    }
    for (key, label) in [("Tab", "focus"), ("^R", "routine"), ("^C", "quit")] {
        spans.push(Span::styled(format!(" {} ", key), key_style));
        spans.push(Span::styled(format!(" {} ", label), label_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
