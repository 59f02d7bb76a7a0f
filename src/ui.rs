use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap,
    },
    Frame,
};

use crate::app::{App, ChatRole, InputMode, StatusKind};
use crate::page;

/// Rows reserved for the console panel (border, transcript, input, status).
const CONSOLE_HEIGHT: u16 = 9;

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    let [header_area, nav_area, body_area, console_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(CONSOLE_HEIGHT),
        Constraint::Length(1),
    ])
    .areas(area);

    // The page document scrolls inside the body area; remember its height
    // for scroll math and clamp in case a resize shrank the window.
    app.viewport_height = body_area.height;
    app.scroll = app.scroll.min(app.max_scroll());

    render_header(app, frame, header_area);
    render_nav(app, frame, nav_area);
    render_page(app, frame, body_area);
    render_console(app, frame, console_area);
    render_footer(app, frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let theme = app.theme;

    let title = Line::from(vec![
        Span::styled(" Vex ", theme.heading()),
        Span::styled("assistant console", Style::default().fg(theme.fg())),
        Span::raw("  "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(theme.muted()),
        ),
        Span::raw("  "),
        Span::styled(format!("[{}]", theme.name()), Style::default().fg(theme.muted())),
    ]);

    frame.render_widget(Paragraph::new(title).style(Style::default().bg(theme.bg())), area);
}

fn render_nav(app: &App, frame: &mut Frame, area: Rect) {
    let theme = app.theme;
    let mut spans = vec![Span::raw(" ")];

    for (idx, section) in page::sections().iter().enumerate() {
        let style = if idx == app.active_section {
            theme.nav_active()
        } else {
            theme.nav_inactive()
        };
        spans.push(Span::styled(format!(" {}:{} ", idx + 1, section.title), style));
        spans.push(Span::raw(" "));
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.bg())),
        area,
    );
}

fn render_page(app: &App, frame: &mut Frame, area: Rect) {
    let theme = app.theme;
    let mut lines: Vec<Line> = Vec::new();

    for section in page::sections() {
        lines.push(Line::from(Span::styled(section.title, theme.heading())));
        for text in section.lines {
            lines.push(Line::from(Span::styled(*text, Style::default().fg(theme.fg()))));
        }
        lines.push(Line::default());
    }

    let page = Paragraph::new(Text::from(lines))
        .style(theme.body())
        .scroll((app.scroll, 0));
    frame.render_widget(page, area);

    let mut scrollbar_state =
        ScrollbarState::new(page::total_lines() as usize).position(app.scroll as usize);
    frame.render_stateful_widget(
        Scrollbar::new(ScrollbarOrientation::VerticalRight),
        area,
        &mut scrollbar_state,
    );
}

fn render_console(app: &App, frame: &mut Frame, area: Rect) {
    let theme = app.theme;

    let border_style = if app.input_mode == InputMode::Editing {
        Style::default().fg(theme.accent())
    } else {
        Style::default().fg(theme.muted())
    };

    let block = Block::default()
        .title(" Console ")
        .borders(Borders::ALL)
        .border_style(border_style)
        .style(Style::default().bg(theme.bg()));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [transcript_area, input_area, status_area] = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    // Transcript: most recent exchanges, one line each
    let visible = transcript_area.height as usize;
    let start = app.transcript.len().saturating_sub(visible);
    let lines: Vec<Line> = app.transcript[start..]
        .iter()
        .map(|msg| {
            let (label, label_style) = match msg.role {
                ChatRole::You => ("You: ", Style::default().fg(theme.fg()).add_modifier(Modifier::BOLD)),
                ChatRole::Vex => ("Vex: ", theme.heading()),
            };
            let content_style = if msg.is_error {
                Style::default().fg(theme.error())
            } else {
                Style::default().fg(theme.fg())
            };
            Line::from(vec![
                Span::styled(label, label_style),
                Span::styled(msg.content.clone(), content_style),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(Text::from(lines)), transcript_area);

    // Input line
    let prompt_style = if app.busy {
        Style::default().fg(theme.muted())
    } else {
        Style::default().fg(theme.accent())
    };
    let input = Line::from(vec![
        Span::styled("> ", prompt_style),
        Span::styled(app.command_input.clone(), Style::default().fg(theme.fg())),
    ]);
    frame.render_widget(Paragraph::new(input), input_area);

    if app.input_mode == InputMode::Editing {
        let cursor_x = input_area.x + 2 + app.command_cursor as u16;
        frame.set_cursor_position((cursor_x.min(input_area.right().saturating_sub(1)), input_area.y));
    }

    // Status line: recolors with the theme accent, errors in red
    let (text, style) = match app.status.kind {
        StatusKind::Info => (app.status.text.clone(), Style::default().fg(theme.muted())),
        StatusKind::Busy => (app.thinking_text(), Style::default().fg(theme.accent())),
        StatusKind::Reply => (app.status.text.clone(), Style::default().fg(theme.accent())),
        StatusKind::Error => (app.status.text.clone(), Style::default().fg(theme.error())),
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(text, style))).wrap(Wrap { trim: false }),
        status_area,
    );
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let theme = app.theme;
    let key_style = Style::default().bg(theme.muted()).fg(theme.bg());
    let label_style = Style::default().fg(theme.fg());

    let hints = match app.input_mode {
        InputMode::Normal => vec![
            Span::styled(" i ", key_style),
            Span::styled(" command ", label_style),
            Span::styled(" Tab ", key_style),
            Span::styled(" sections ", label_style),
            Span::styled(" t ", key_style),
            Span::styled(" theme ", label_style),
            Span::styled(" L ", key_style),
            Span::styled(" launch ", label_style),
            Span::styled(" q ", key_style),
            Span::styled(" quit ", label_style),
        ],
        InputMode::Editing => vec![
            Span::styled(" Enter ", key_style),
            Span::styled(" send ", label_style),
            Span::styled(" Esc ", key_style),
            Span::styled(" done ", label_style),
        ],
    };

    frame.render_widget(
        Paragraph::new(Line::from(hints)).style(Style::default().bg(theme.bg())),
        area,
    );
}
