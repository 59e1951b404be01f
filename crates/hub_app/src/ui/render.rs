use hub_core::{
    AppViewModel, DashboardBody, DashboardView, GroupSection, LoginView, NoticeKind, PostCard,
    ScreenView, SelectionView,
};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::notify::Toast;

const ACCENT: Color = Color::Rgb(255, 69, 0);

pub fn draw(frame: &mut Frame, view: &AppViewModel, toasts: &[Toast]) {
    let toast_height = u16::try_from(toasts.len()).unwrap_or(u16::MAX).saturating_mul(2);
    let [header, body, toast_area, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(toast_height),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    draw_header(frame, header, view);
    match &view.screen {
        ScreenView::Login(login) => draw_login(frame, body, login),
        ScreenView::Selection(selection) => draw_selection(frame, body, selection),
        ScreenView::Dashboard(dashboard) => draw_dashboard(frame, body, dashboard),
    }
    draw_toasts(frame, toast_area, toasts);
    draw_footer(frame, footer, view);
}

fn draw_header(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let title = match view.screen {
        ScreenView::Login(_) => "Reddit Summarize Hub",
        ScreenView::Selection(_) => "Select Subreddits",
        ScreenView::Dashboard(_) => "Reddit Summaries",
    };
    let mut spans = vec![Span::styled(
        title,
        Style::new().fg(ACCENT).add_modifier(Modifier::BOLD),
    )];
    if let Some(name) = &view.signed_in_as {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("u/{name}"),
            Style::new().fg(Color::DarkGray),
        ));
    }
    if view.logout_pending {
        spans.push(Span::styled(
            "  Signing out...",
            Style::new().fg(Color::Yellow),
        ));
    }
    let header = Paragraph::new(Line::from(spans)).block(Block::new().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn draw_login(frame: &mut Frame, area: Rect, view: &LoginView) {
    let mut lines = vec![
        Line::raw(""),
        Line::raw("Get AI-powered summaries of your favorite subreddits"),
        Line::raw(""),
        Line::styled(
            "[Enter] Login with Reddit",
            Style::new().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Line::styled(
            "We'll open Reddit in your browser for secure authentication",
            Style::new().fg(Color::DarkGray),
        ),
        Line::raw(""),
        Line::raw("[c] Continue once you have signed in"),
    ];
    if view.checking {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Checking your session...",
            Style::new().fg(Color::Yellow),
        ));
    }
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        area,
    );
}

fn draw_selection(frame: &mut Frame, area: Rect, view: &SelectionView) {
    let mut lines = vec![
        Line::raw("Choose which subreddits you'd like to summarize"),
        Line::raw(""),
    ];
    for slot in &view.slots {
        let focused = slot.index == view.focus;
        let marker = if focused { "> " } else { "  " };
        let value_style = if focused {
            Style::new().add_modifier(Modifier::BOLD)
        } else {
            Style::new()
        };
        let mut spans = vec![
            Span::raw(marker),
            Span::styled(format!("{}: ", slot.label), Style::new().fg(Color::DarkGray)),
            Span::styled("r/", Style::new().fg(Color::DarkGray)),
            Span::styled(slot.value.clone(), value_style),
        ];
        if focused {
            spans.push(Span::styled("_", Style::new().add_modifier(Modifier::SLOW_BLINK)));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::raw(""));
    let button = if view.submitting {
        Line::styled("Fetching Summaries...", Style::new().fg(Color::Yellow))
    } else {
        Line::styled(
            "[Enter] Fetch Summaries",
            Style::new().fg(ACCENT).add_modifier(Modifier::BOLD),
        )
    };
    lines.push(button);
    frame.render_widget(Paragraph::new(lines), area);
}

fn draw_dashboard(frame: &mut Frame, area: Rect, view: &DashboardView) {
    match &view.body {
        DashboardBody::Loading => {
            let loading = Paragraph::new("Loading your summaries...").alignment(Alignment::Center);
            frame.render_widget(loading, area);
        }
        DashboardBody::Empty => {
            let lines = vec![
                Line::raw("No summaries available"),
                Line::raw(""),
                Line::styled("[b] Select Subreddits", Style::new().fg(ACCENT)),
            ];
            frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
        }
        DashboardBody::Groups(sections) => {
            let width = usize::from(area.width.max(20));
            let (lines, selected) = dashboard_lines(sections, width);
            let scroll = scroll_offset(selected, usize::from(area.height));
            frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), area);
        }
    }
}

/// Lines for every section and the line range of the selected card.
fn dashboard_lines(
    sections: &[GroupSection],
    width: usize,
) -> (Vec<Line<'static>>, Option<(usize, usize)>) {
    let mut lines = Vec::new();
    let mut selected = None;
    for section in sections {
        lines.push(Line::styled(
            section.heading.clone(),
            Style::new().fg(ACCENT).add_modifier(Modifier::BOLD),
        ));
        if let Some(error) = &section.error {
            lines.push(Line::styled(
                format!("  Could not summarize: {error}"),
                Style::new().fg(Color::Red),
            ));
        }
        for card in &section.posts {
            let start = lines.len();
            push_card(&mut lines, card, width);
            if card.selected {
                selected = Some((start, lines.len()));
            }
        }
        lines.push(Line::raw(""));
    }
    (lines, selected)
}

fn push_card(lines: &mut Vec<Line<'static>>, card: &PostCard, width: usize) {
    let title_style = if card.selected {
        Style::new().fg(Color::Black).bg(ACCENT).add_modifier(Modifier::BOLD)
    } else {
        Style::new().add_modifier(Modifier::BOLD)
    };
    let marker = if card.selected { "> " } else { "  " };
    for (i, row) in wrap_words(&card.title, width.saturating_sub(2))
        .into_iter()
        .enumerate()
    {
        let lead = if i == 0 { marker } else { "  " };
        lines.push(Line::from(vec![
            Span::raw(lead),
            Span::styled(row, title_style),
        ]));
    }
    lines.push(Line::styled(
        format!(
            "    score {}  ·  {} comments  ·  {}",
            card.score, card.comments, card.author
        ),
        Style::new().fg(Color::DarkGray),
    ));
    for row in wrap_words(&card.summary, width.saturating_sub(4)) {
        lines.push(Line::raw(format!("    {row}")));
    }
    if card.selected {
        let link_style = Style::new().fg(Color::Cyan);
        lines.push(Line::styled("    [Enter] View Post", link_style));
        for row in wrap_words(&card.url, width.saturating_sub(4)) {
            lines.push(Line::styled(format!("    {row}"), link_style));
        }
    }
    lines.push(Line::raw(""));
}

/// Greedy word wrap on character counts. Words longer than `width` are split.
fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    let mut row = String::new();
    for word in text.split_whitespace() {
        let chars: Vec<char> = word.chars().collect();
        if chars.len() > width {
            if !row.is_empty() {
                rows.push(std::mem::take(&mut row));
            }
            let mut chunks = chars.chunks(width).peekable();
            while let Some(chunk) = chunks.next() {
                let piece: String = chunk.iter().collect();
                if chunks.peek().is_some() {
                    rows.push(piece);
                } else {
                    row = piece;
                }
            }
            continue;
        }
        let needed = if row.is_empty() {
            chars.len()
        } else {
            row.chars().count() + 1 + chars.len()
        };
        if needed > width && !row.is_empty() {
            rows.push(std::mem::take(&mut row));
        }
        if !row.is_empty() {
            row.push(' ');
        }
        row.push_str(word);
    }
    if !row.is_empty() {
        rows.push(row);
    }
    rows
}

/// Smallest scroll that keeps the selected card on screen.
fn scroll_offset(selected: Option<(usize, usize)>, height: usize) -> u16 {
    let Some((start, end)) = selected else {
        return 0;
    };
    let offset = if end > height {
        (end - height).min(start)
    } else {
        0
    };
    u16::try_from(offset).unwrap_or(u16::MAX)
}

fn draw_toasts(frame: &mut Frame, area: Rect, toasts: &[Toast]) {
    if toasts.is_empty() {
        return;
    }
    let mut lines = Vec::with_capacity(toasts.len() * 2);
    for toast in toasts {
        let color = match toast.kind {
            NoticeKind::Success => Color::Green,
            NoticeKind::Failure => Color::Red,
        };
        lines.push(Line::styled(
            toast.message.title.clone(),
            Style::new().fg(color).add_modifier(Modifier::BOLD),
        ));
        lines.push(Line::raw(format!("  {}", toast.message.description)));
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
}

fn draw_footer(frame: &mut Frame, area: Rect, view: &AppViewModel) {
    let hints = match &view.screen {
        ScreenView::Login(_) => "Enter/l login · c continue · q quit",
        ScreenView::Selection(_) => {
            "type to edit · ↑/↓ focus · Ctrl-N add · Ctrl-D remove · Enter fetch · Ctrl-O dashboard · Ctrl-L sign out · Esc quit"
        }
        ScreenView::Dashboard(_) => {
            "↑/↓ move · Enter open · b Back to Selection · L sign out · q quit"
        }
    };
    frame.render_widget(
        Paragraph::new(hints).style(Style::new().fg(Color::DarkGray)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use hub_core::{
        update, AppState, Msg, NoticeMessage, Post, Route, SubredditGroup,
    };
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;

    fn render(view: &AppViewModel, toasts: &[Toast], width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| draw(frame, view, toasts)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn post(id: &str, title: &str) -> Post {
        Post {
            id: id.to_string(),
            title: title.to_string(),
            summary: "Short summary of the thread.".to_string(),
            score: 1234,
            comments: 56,
            url: format!("https://reddit.com/{id}"),
            author: "gopher".to_string(),
            subreddit: "golang".to_string(),
        }
    }

    fn dashboard_with(groups: Vec<SubredditGroup>) -> AppViewModel {
        let (state, effects) = update(AppState::new(), Msg::Navigate(Route::Dashboard));
        let activation = match effects.as_slice() {
            [hub_core::Effect::LoadSummaries { activation }] => *activation,
            other => panic!("expected a load effect, got {other:?}"),
        };
        let (state, _) = update(
            state,
            Msg::SummariesLoaded {
                activation,
                result: Ok(groups),
            },
        );
        state.view()
    }

    #[test]
    fn loading_dashboard_shows_only_the_indicator() {
        let (state, _) = update(AppState::new(), Msg::Navigate(Route::Dashboard));
        let screen = render(&state.view(), &[], 80, 20);
        assert!(screen.contains("Loading your summaries..."));
        assert!(!screen.contains("No summaries available"));
    }

    #[test]
    fn empty_dashboard_offers_a_way_back() {
        let screen = render(&dashboard_with(Vec::new()), &[], 80, 20);
        assert!(screen.contains("No summaries available"));
        assert!(screen.contains("Select Subreddits"));
    }

    #[test]
    fn group_renders_heading_and_card_fields() {
        let view = dashboard_with(vec![SubredditGroup {
            subreddit: "golang".to_string(),
            posts: vec![post("p1", "Generics in practice")],
            error: None,
        }]);
        let screen = render(&view, &[], 100, 24);
        assert!(screen.contains("r/golang"));
        assert!(screen.contains("Generics in practice"));
        assert!(screen.contains("score 1,234"));
        assert!(screen.contains("56 comments"));
        assert!(screen.contains("by u/gopher"));
        assert!(screen.contains("Short summary of the thread."));
    }

    #[test]
    fn selected_card_stays_visible_when_scrolled() {
        let posts = (0..12)
            .map(|i| post(&format!("p{i}"), &format!("Post number {i}")))
            .collect();
        let (state, effects) = update(AppState::new(), Msg::Navigate(Route::Dashboard));
        let activation = match effects.as_slice() {
            [hub_core::Effect::LoadSummaries { activation }] => *activation,
            other => panic!("expected a load effect, got {other:?}"),
        };
        let (mut state, _) = update(
            state,
            Msg::SummariesLoaded {
                activation,
                result: Ok(vec![SubredditGroup {
                    subreddit: "golang".to_string(),
                    posts,
                    error: None,
                }]),
            },
        );
        for _ in 0..11 {
            state = update(state, Msg::CursorMoved(hub_core::Step::Next)).0;
        }
        let screen = render(&state.view(), &[], 80, 20);
        assert!(screen.contains("Post number 11"));
        assert!(!screen.contains("Post number 0 "));
    }

    #[test]
    fn submitting_selection_shows_progress_label() {
        let (state, _) = update(AppState::new(), Msg::Navigate(Route::Selection));
        let (state, _) = update(
            state,
            Msg::SlotEdited {
                index: 0,
                value: "rust".to_string(),
            },
        );
        let idle = render(&state.view(), &[], 120, 20);
        assert!(idle.contains("Fetch Summaries"));
        assert!(idle.contains("Subreddit 1: r/rust"));

        let (state, _) = update(state, Msg::SubmitClicked);
        let busy = render(&state.view(), &[], 120, 20);
        assert!(busy.contains("Fetching Summaries..."));
    }

    #[test]
    fn toasts_are_drawn_above_the_footer() {
        let toast = Toast {
            kind: NoticeKind::Failure,
            message: NoticeMessage::new("Error loading summaries", "Please try again later."),
            shown_at: Instant::now(),
        };
        let screen = render(&AppState::new().view(), &[toast], 80, 20);
        assert!(screen.contains("Error loading summaries"));
        assert!(screen.contains("Please try again later."));
    }

    #[test]
    fn wrap_words_respects_width() {
        assert_eq!(
            wrap_words("one two three four", 9),
            vec!["one two", "three", "four"]
        );
        assert_eq!(wrap_words("", 10), Vec::<String>::new());
        assert_eq!(
            wrap_words("see https://x.io/abcdef", 8),
            vec!["see", "https://", "x.io/abc", "def"]
        );
    }

    #[test]
    fn narrow_dashboard_wraps_long_titles_and_links() {
        let mut long = post("p1", "An unusually long title that cannot fit on one row");
        long.url = "https://reddit.com/r/golang/comments/abcdefghijklmnop".to_string();
        let view = dashboard_with(vec![SubredditGroup {
            subreddit: "golang".to_string(),
            posts: vec![long],
            error: None,
        }]);
        let screen = render(&view, &[], 30, 30);
        assert!(screen.contains("An unusually long title"));
        assert!(screen.contains("cannot fit on one row"));
        assert!(screen.contains("https://reddit.com/r/golan"));
        assert!(screen.contains("g/comments/abcdefghijklmno"));
    }
}
