use std::time::{Duration, Instant};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, Paragraph, Sparkline, Tabs, Wrap},
};

use helpme_core::content::{
    ACTIVE_CHATS, BOTTLE_MESSAGES, INTERESTS, LIBRARY_PEOPLE, MAX_INTERESTS, MAX_QUESTION_CHARS,
    PHILOSOPHY_PAGES, SOLVED_QUESTIONS, TOPIC_TAGS, WAITING_QUESTIONS,
};
use helpme_core::{
    derive_avatar, Action, AvatarSize, ProfileTab, Screen, ScreenState, Sender, TrustLevel,
};

use crate::app::{App, AskFocus, InputMode, SettingsRow};
use crate::avatar::{shape_symbol, AvatarWidget};
use crate::theme::{self, Theme};

/// Wrap text to fit within a given width, returning multiple lines.
/// Breaks on whitespace only.
fn wrap_text_to_width(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if current_len == 0 {
            current = word.to_string();
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_string();
            current_len = word_len;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Row and column of char index `cursor` within the lines that
/// `wrap_text_to_width` produces for `text`. `width` must be non-zero.
fn wrapped_cursor(text: &str, cursor: usize, width: usize) -> (usize, usize) {
    let mut words = Vec::new();
    let mut start = None;
    for (i, ch) in text.chars().enumerate() {
        match (ch.is_whitespace(), start) {
            (false, None) => start = Some(i),
            (true, Some(s)) => {
                words.push((s, i - s));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        words.push((s, text.chars().count() - s));
    }

    let mut row = 0;
    let mut line_len = 0;
    // End of the last word before the cursor, with its row and end column
    let mut previous = None;
    for (start, len) in words {
        if cursor < start {
            break;
        }
        let col = if line_len == 0 {
            0
        } else if line_len + 1 + len <= width {
            line_len + 1
        } else {
            row += 1;
            0
        };
        line_len = col + len;
        if cursor <= start + len {
            return (row, (col + cursor - start).min(width - 1));
        }
        previous = Some((start + len, row, line_len));
    }

    match previous {
        Some((end, row, col)) => (row, (col + cursor - end).min(width - 1)),
        None => (0, 0),
    }
}

/// Cut `text` to `width` characters, marking the cut with an ellipsis
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

fn trust_dots(level: TrustLevel) -> String {
    level
        .dots()
        .iter()
        .map(|filled| if *filled { "●" } else { "○" })
        .collect()
}

fn format_countdown(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// A `width` x `height` rect centered in `area`
fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    Rect::new(
        area.x + (area.width.saturating_sub(width)) / 2,
        area.y + (area.height.saturating_sub(height)) / 2,
        width,
        height,
    )
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let theme = Theme::new(app.router.state().settings.dark_mode);
    let area = frame.area();
    frame.render_widget(Block::default().style(theme.base()), area);

    // Main layout: header, body, status, footer
    let [header_area, body_area, status_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, &theme, frame, header_area);

    match app.screen() {
        Screen::Welcome => render_welcome(app, &theme, frame, body_area),
        Screen::Philosophy => render_philosophy(app, &theme, frame, body_area),
        Screen::ProfileSetup => render_profile_setup(app, &theme, frame, body_area),
        Screen::Home => render_home(app, &theme, frame, body_area),
        Screen::AskHelp => render_ask_help(app, &theme, frame, body_area),
        Screen::GiveHelp => render_give_help(app, &theme, frame, body_area),
        Screen::Waiting => render_waiting(app, &theme, frame, body_area),
        Screen::Chat => render_chat(app, &theme, frame, body_area),
        Screen::UserProfile => render_user_profile(app, &theme, frame, body_area),
        Screen::HumanLibrary => render_library(app, &theme, frame, body_area),
        Screen::Settings => render_settings(app, &theme, frame, body_area),
    }

    render_status(app, frame, status_area);
    render_footer(app, &theme, frame, footer_area);

    // Overlays, lowest first
    if app.bottle_open {
        render_bottle(app, &theme, frame, area);
    }
    if app.router.state().overlays.questions_visible() {
        render_questions(app, &theme, frame, area);
    }
    if app.router.state().overlays.level_up_visible() {
        render_level_up(app, &theme, frame, area);
    }
}

fn render_header(app: &App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let mut spans = vec![
        Span::styled(" Help Me ", theme.accent()),
        Span::styled(format!("· {} ", app.screen().title()), Style::default().fg(theme.fg)),
    ];
    if app.screen() == Screen::Chat {
        spans.push(Span::styled(
            trust_dots(app.router.state().trust_level),
            Style::default().fg(theme::SUNRISE),
        ));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        format!("v{}", env!("CARGO_PKG_VERSION")),
        theme.muted(),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_status(app: &App, frame: &mut Frame, area: Rect) {
    if let Some(status) = &app.status {
        let line = Line::from(Span::styled(
            format!(" {} ", status),
            Style::default().fg(theme::CORAL),
        ));
        frame.render_widget(Paragraph::new(line), area);
    }
}

/// Key and label for an action offered on `screen`
fn action_hint(screen: Screen, action: Action) -> Option<(&'static str, &'static str)> {
    let hint = match action {
        Action::Advance => ("Enter", "devam"),
        Action::Back if screen == Screen::Philosophy => ("←", "geri"),
        Action::Back => ("Esc", "geri"),
        Action::CompleteProfile => ("Enter", "tamamla"),
        Action::AskHelp => ("a", "yardım iste"),
        Action::GiveHelp => ("g", "yardım et"),
        Action::OpenProfile => ("p", "profil"),
        Action::OpenSettings => ("s", "ayarlar"),
        Action::OpenLibrary => ("l", "kütüphane"),
        Action::OpenQuestions => ("s", "36 soru"),
        Action::SendQuestion => ("Enter", "gönder"),
        Action::SelectQuestion => ("Enter", "yanıtla"),
        Action::RespondToBottle if screen == Screen::Home => ("b", "şişe"),
        Action::SelectPerson => ("Enter", "sohbet"),
        Action::SendMessage => ("i", "yaz"),
        Action::ToggleNotifications | Action::ToggleDarkMode => ("Enter", "değiştir"),
        // Covered by the list's Enter, or by the overlay footers
        Action::RespondToBottle
        | Action::NextCard
        | Action::PreviousCard
        | Action::CloseQuestions
        | Action::DismissLevelUp => return None,
    };
    Some(hint)
}

fn footer_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    let state = app.router.state();
    if state.overlays.level_up_visible() {
        return vec![("Enter", "devam")];
    }
    if state.overlays.questions_visible() {
        return vec![("←/→", "kart"), ("Esc", "kapat")];
    }
    if app.bottle_open {
        return vec![("Enter", "yanıtla"), ("Esc", "kapat")];
    }

    let screen = app.screen();
    if app.input_mode == InputMode::Editing {
        let mut hints = vec![("Enter", "gönder"), ("Esc", "bitir")];
        if screen == Screen::AskHelp {
            hints.push(("Tab", "konular"));
        }
        return hints;
    }

    let mut hints = Vec::new();
    match screen {
        Screen::ProfileSetup => hints.extend([("j/k", "gezin"), ("Space", "seç")]),
        Screen::GiveHelp | Screen::HumanLibrary | Screen::Settings => hints.push(("j/k", "gezin")),
        Screen::AskHelp => hints.extend([("←/→", "konu"), ("Space", "seç"), ("Tab", "yaz")]),
        Screen::UserProfile => hints.push(("Tab", "sekme")),
        _ => {}
    }
    for action in screen.actions() {
        if let Some(hint) = action_hint(screen, *action) {
            if !hints.contains(&hint) {
                hints.push(hint);
            }
        }
    }
    if screen != Screen::AskHelp {
        hints.push(("q", "çık"));
    }
    hints
}

fn render_footer(app: &App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let mode_style = match app.input_mode {
        InputMode::Normal => theme.highlight(),
        InputMode::Editing => Style::default().bg(theme::SUNRISE).fg(theme::INK),
    };
    let mode_text = match app.input_mode {
        InputMode::Normal => format!(" {} ", app.screen().as_str().to_uppercase()),
        InputMode::Editing => " YAZ ".to_string(),
    };

    let key_style = Style::default().bg(theme.muted).fg(theme.bg);
    let label_style = Style::default().fg(theme.fg);

    let mut spans = vec![Span::styled(mode_text, mode_style), Span::raw(" ")];
    for (key, label) in footer_hints(app) {
        spans.push(Span::styled(format!(" {} ", key), key_style));
        spans.push(Span::styled(format!(" {} ", label), label_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_welcome(app: &App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let [_, avatar_area, text_area, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(8),
        Constraint::Length(4),
        Constraint::Fill(1),
    ])
    .areas(area);

    let user = app.router.state().user;
    let avatar = AvatarWidget::new(user.avatar(TrustLevel::new(TrustLevel::MAX)), AvatarSize::Large);
    let avatar_rect = avatar.area_in(avatar_area);
    frame.render_widget(avatar, avatar_rect);

    let text = Text::from(vec![
        Line::from(Span::styled("Help Me", theme.accent())),
        Line::from(Span::styled("Yavaş Sosyal Ağ", theme.muted())),
        Line::default(),
        Line::from(Span::styled("Başlamak için Enter", theme.muted())),
    ]);
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), text_area);
}

fn render_philosophy(app: &App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let page = match app.router.state().screen {
        ScreenState::Philosophy { page } => page,
        _ => 0,
    };

    let [_, text_area, dots_area, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);

    let lines: Vec<Line> = wrap_text_to_width(PHILOSOPHY_PAGES[page], text_area.width as usize)
        .into_iter()
        .map(|line| Line::from(Span::styled(line, Style::default().fg(theme.fg).bold())))
        .collect();
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), text_area);

    let dots: Vec<Span> = (0..PHILOSOPHY_PAGES.len())
        .map(|i| {
            if i == page {
                Span::styled("● ", theme.accent())
            } else {
                Span::styled("○ ", theme.muted())
            }
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(dots)).alignment(Alignment::Center),
        dots_area,
    );
}

fn render_profile_setup(app: &mut App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let [intro_area, list_area] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).areas(area);

    let intro = Text::from(vec![
        Line::from(Span::styled("Senin anonim profilin", theme.accent())),
        Line::from(Span::styled("Hangi konularda yardım edebilirsin?", Style::default().fg(theme.fg))),
        Line::from(Span::styled(
            format!(
                "{}/{} seçildi",
                app.interests.len(),
                app.interests.cap().unwrap_or(MAX_INTERESTS)
            ),
            theme.muted(),
        )),
    ]);
    frame.render_widget(Paragraph::new(intro), intro_area);

    let items: Vec<ListItem> = INTERESTS
        .iter()
        .map(|interest| {
            let picked = app.interests.contains(interest);
            let mark = if picked { "[x] " } else { "[ ] " };
            let style = if picked {
                Style::default().fg(theme::SEAWEED).add_modifier(Modifier::BOLD)
            } else if app.interests.is_enabled(interest) {
                Style::default().fg(theme.fg)
            } else {
                theme.muted()
            };
            ListItem::new(format!("{}{}", mark, interest)).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border(true))
                .title(" İlgi Alanları "),
        )
        .highlight_style(theme.highlight())
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, list_area, &mut app.interest_state);
}

fn render_home(app: &App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let [greeting_area, bottle_area, buttons_area, nav_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(5),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    let [avatar_area, greeting_text_area] =
        Layout::horizontal([Constraint::Length(8), Constraint::Min(0)]).areas(greeting_area);
    let state = app.router.state();
    let avatar = AvatarWidget::new(state.user.avatar(TrustLevel::new(TrustLevel::MAX)), AvatarSize::Small);
    let avatar_rect = avatar.area_in(avatar_area);
    frame.render_widget(avatar, avatar_rect);

    let greeting = Text::from(vec![
        Line::from(Span::styled(state.profile.display_name(), theme.accent())),
        Line::from(Span::styled("Sahil sakin... Yardım iste veya et", theme.muted())),
    ]);
    frame.render_widget(Paragraph::new(greeting), greeting_text_area);

    let bottle = &BOTTLE_MESSAGES[app.shore_bottle];
    let bottle_text = Text::from(vec![
        Line::from(Span::styled(
            format!("{} · {} · {}", bottle.tags.join(", "), bottle.time_ago, bottle.distance),
            theme.muted(),
        )),
        Line::default(),
        Line::from(Span::styled(
            truncate(bottle.text, bottle_area.width.saturating_sub(4) as usize),
            Style::default().fg(theme.fg).italic(),
        )),
        Line::default(),
        Line::from(Span::styled("[b] şişeyi aç", theme.accent())),
    ]);
    frame.render_widget(
        Paragraph::new(bottle_text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border(false))
                .title(" Kıyıya bir şişe vurdu "),
        ),
        bottle_area,
    );

    let [ask_area, give_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).areas(buttons_area);
    for (rect, label) in [(ask_area, "[a] Yardım İste"), (give_area, "[g] Yardım Et")] {
        frame.render_widget(
            Paragraph::new(Span::styled(label, theme.accent()))
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(theme.border(true))),
            rect,
        );
    }

    let nav = Line::from(vec![
        Span::styled("[l] ", theme.accent()),
        Span::styled("İnsan Kütüphanesi   ", Style::default().fg(theme.fg)),
        Span::styled("[s] ", theme.accent()),
        Span::styled("36 Soru   ", Style::default().fg(theme.fg)),
        Span::styled("[p] ", theme.accent()),
        Span::styled("Profil", Style::default().fg(theme.fg)),
    ]);
    frame.render_widget(Paragraph::new(nav).alignment(Alignment::Center), nav_area);
}

fn render_ask_help(app: &App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let [prompt_area, question_area, tags_area, send_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(Span::styled("Neye yardım lazım?", theme.accent())),
        prompt_area,
    );

    let editing = app.input_mode == InputMode::Editing && app.ask_focus == AskFocus::Question;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border(editing))
        .title(format!(" Soru {}/{} ", app.question.char_count(), MAX_QUESTION_CHARS));
    let inner = block.inner(question_area);
    let lines: Vec<Line> = wrap_text_to_width(app.question.value(), inner.width as usize)
        .into_iter()
        .map(Line::from)
        .collect();
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().fg(theme.fg)).block(block),
        question_area,
    );
    if editing && inner.width > 0 && inner.height > 0 {
        let (row, col) =
            wrapped_cursor(app.question.value(), app.question.cursor(), inner.width as usize);
        let row = (row as u16).min(inner.height - 1);
        frame.set_cursor_position((inner.x + col as u16, inner.y + row));
    }

    let tags_focused = app.ask_focus == AskFocus::Tags && app.input_mode == InputMode::Normal;
    let mut spans = Vec::new();
    for (i, tag) in TOPIC_TAGS.iter().enumerate() {
        let mut style = if app.topic_tags.contains(tag) {
            Style::default().bg(theme.accent).fg(theme::FOAM).bold()
        } else {
            Style::default().fg(theme.fg)
        };
        if tags_focused && i == app.tag_cursor {
            style = style.add_modifier(Modifier::UNDERLINED | Modifier::REVERSED);
        }
        spans.push(Span::styled(format!(" {} ", tag), style));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(
        Paragraph::new(Line::from(spans)).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border(tags_focused))
                .title(" Konular "),
        ),
        tags_area,
    );

    let send_style = if app.can_send_question() {
        theme.highlight()
    } else {
        theme.muted()
    };
    frame.render_widget(
        Paragraph::new(Span::styled(" Gönder ", send_style)).alignment(Alignment::Right),
        send_area,
    );
}

fn render_give_help(app: &mut App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let width = area.width.saturating_sub(6) as usize;
    let mut items: Vec<ListItem> = WAITING_QUESTIONS
        .iter()
        .map(|question| {
            let avatar = derive_avatar(question.seed, 0);
            ListItem::new(Text::from(vec![
                Line::from(vec![
                    Span::styled(format!("{} ", shape_symbol(avatar.shape)), theme.muted()),
                    Span::styled(question.tags.join(", "), theme.accent()),
                    Span::styled(
                        format!(" · {} · {}", question.time_ago, question.distance),
                        theme.muted(),
                    ),
                ]),
                Line::from(Span::styled(
                    truncate(question.text, width),
                    Style::default().fg(theme.fg),
                )),
            ]))
        })
        .collect();

    items.extend(BOTTLE_MESSAGES.iter().map(|bottle| {
        ListItem::new(Text::from(vec![
            Line::from(vec![
                Span::styled("~ şişe ", Style::default().fg(theme::SUNRISE)),
                Span::styled(bottle.tags.join(", "), theme.accent()),
                Span::styled(
                    format!(" · {} · {}", bottle.time_ago, bottle.distance),
                    theme.muted(),
                ),
            ]),
            Line::from(Span::styled(
                truncate(bottle.text, width),
                Style::default().fg(theme.fg).italic(),
            )),
        ]))
    }));

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border(true))
                .title(" Bekleyen sorular ve şişeler "),
        )
        .highlight_style(theme.highlight())
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut app.give_state);
}

fn render_waiting(app: &App, theme: &Theme, frame: &mut Frame, area: Rect) {
    const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

    let request = match &app.router.state().screen {
        ScreenState::Waiting { request, .. } => Some(request),
        _ => None,
    };
    let remaining = app
        .router
        .estimated_wait(Instant::now())
        .unwrap_or_default();

    let mut lines = vec![
        Line::from(Span::styled(
            SPINNER[app.animation_frame as usize % SPINNER.len()],
            theme.accent(),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Sana yardım edebilecek birini arıyoruz",
            Style::default().fg(theme.fg),
        )),
        Line::from(Span::styled(
            format!("Tahmini bekleme {}", format_countdown(remaining)),
            theme.muted(),
        )),
        Line::default(),
    ];
    if let Some(request) = request {
        lines.push(Line::from(Span::styled(
            truncate(&request.question, area.width.saturating_sub(4) as usize),
            Style::default().fg(theme.fg).italic(),
        )));
        lines.push(Line::from(Span::styled(request.tags.join(", "), theme.accent())));
    }

    let [_, body, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(lines.len() as u16),
        Constraint::Fill(1),
    ])
    .areas(area);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), body);
}

fn render_chat(app: &App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let state = app.router.state();
    let Some(chat) = state.chat() else { return };

    let [header_area, messages_area, typing_area, input_area] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(3),
    ])
    .areas(area);

    let [avatar_area, title_area] =
        Layout::horizontal([Constraint::Length(8), Constraint::Min(0)]).areas(header_area);
    let avatar = AvatarWidget::new(state.partner.avatar(state.trust_level), AvatarSize::Small);
    let avatar_rect = avatar.area_in(avatar_area);
    frame.render_widget(avatar, avatar_rect);

    let title = Text::from(vec![
        Line::from(vec![
            Span::styled(state.trust_level.partner_name(state.partner.seed), theme.accent()),
            Span::raw(" "),
            Span::styled(trust_dots(state.trust_level), Style::default().fg(theme::SUNRISE)),
        ]),
        Line::from(Span::styled(chat.origin().subtitle(), theme.muted())),
    ]);
    frame.render_widget(Paragraph::new(title), title_area);

    // Bubbles are wrapped to two thirds of the width; ours sit on the right
    let bubble_width = (messages_area.width as usize * 2 / 3).max(10);
    let mut lines: Vec<Line> = Vec::new();
    for message in chat.messages() {
        let (alignment, style) = match message.sender {
            Sender::Me => (Alignment::Right, Style::default().fg(theme.accent)),
            Sender::Partner => (Alignment::Left, Style::default().fg(theme.fg)),
        };
        for wrapped in wrap_text_to_width(&message.text, bubble_width) {
            lines.push(Line::from(Span::styled(wrapped, style)).alignment(alignment));
        }
        lines.push(Line::default());
    }
    let scroll = lines.len().saturating_sub(messages_area.height as usize) as u16;
    frame.render_widget(Paragraph::new(lines).scroll((scroll, 0)), messages_area);

    if chat.is_partner_typing() {
        let dots = ".".repeat(app.animation_frame as usize % 3 + 1);
        frame.render_widget(
            Paragraph::new(Span::styled(format!("yazıyor{}", dots), theme.muted())),
            typing_area,
        );
    }

    let editing = app.input_mode == InputMode::Editing;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border(editing))
        .title(" Mesaj ");
    let inner = block.inner(input_area);
    frame.render_widget(
        Paragraph::new(app.message.value().to_string())
            .style(Style::default().fg(theme.fg))
            .block(block),
        input_area,
    );
    if editing && inner.width > 0 {
        let col = (app.message.cursor() as u16).min(inner.width - 1);
        frame.set_cursor_position((inner.x + col, inner.y));
    }
}

fn render_user_profile(app: &App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let state = app.router.state();
    let profile = &state.profile;

    let [top_area, tabs_area, content_area] = Layout::vertical([
        Constraint::Length(8),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(area);
    let [avatar_area, details_area] =
        Layout::horizontal([Constraint::Length(18), Constraint::Min(0)]).areas(top_area);

    let avatar = AvatarWidget::new(
        profile.identity.avatar(TrustLevel::new(TrustLevel::MAX)),
        AvatarSize::Large,
    );
    let avatar_rect = avatar.area_in(avatar_area);
    frame.render_widget(avatar, avatar_rect);

    let [name_area, stats_area, rank_label_area, rank_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Length(1),
        Constraint::Min(1),
    ])
    .areas(details_area);
    frame.render_widget(
        Paragraph::new(Span::styled(profile.display_name(), theme.accent())),
        name_area,
    );
    let stats = Line::from(vec![
        Span::styled(profile.helped_count.to_string(), Style::default().fg(theme.fg).bold()),
        Span::styled(" Yardım Edilen   ", theme.muted()),
        Span::styled(profile.received_count.to_string(), Style::default().fg(theme.fg).bold()),
        Span::styled(" Yardım Alınan", theme.muted()),
    ]);
    frame.render_widget(Paragraph::new(stats), stats_area);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("Yardım Ruhu ", theme.muted()),
            Span::styled(profile.help_rank.to_string(), theme.accent()),
        ])),
        rank_label_area,
    );
    let bars: Vec<u64> = profile.help_rank_bars().iter().map(|b| *b as u64).collect();
    frame.render_widget(
        Sparkline::default()
            .data(&bars)
            .max(100)
            .style(Style::default().fg(theme.accent)),
        rank_area,
    );

    let titles: Vec<&str> = ProfileTab::all().iter().map(|tab| tab.display_name()).collect();
    let selected = ProfileTab::all()
        .iter()
        .position(|tab| *tab == app.profile_tab)
        .unwrap_or(0);
    frame.render_widget(
        Tabs::new(titles)
            .select(selected)
            .style(theme.muted())
            .highlight_style(theme.accent()),
        tabs_area,
    );

    let lines: Vec<Line> = match app.profile_tab {
        ProfileTab::ActiveChats => ACTIVE_CHATS
            .iter()
            .map(|chat| {
                let avatar = derive_avatar(chat.seed(), 0);
                Line::from(vec![
                    Span::styled(format!("{} ", shape_symbol(avatar.shape)), theme.muted()),
                    Span::styled(chat.preview, Style::default().fg(theme.fg)),
                    Span::styled(format!("  {}", chat.last_message), theme.muted()),
                ])
            })
            .collect(),
        ProfileTab::Solved => SOLVED_QUESTIONS
            .iter()
            .map(|solved| {
                Line::from(vec![
                    Span::styled(format!("{} ", solved.topic), theme.accent()),
                    Span::styled(solved.title, Style::default().fg(theme.fg)),
                    Span::styled(format!("  {}", solved.status), Style::default().fg(theme::SEAWEED)),
                ])
            })
            .collect(),
        ProfileTab::Interests if state.interests.is_empty() => {
            vec![Line::from(Span::styled("Henüz ilgi alanı yok", theme.muted()))]
        }
        ProfileTab::Interests => vec![Line::from(
            state
                .interests
                .iter()
                .flat_map(|interest| {
                    [
                        Span::styled(format!(" {} ", interest), theme.accent().reversed()),
                        Span::raw(" "),
                    ]
                })
                .collect::<Vec<_>>(),
        )],
    };
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(theme.border(false)),
        ),
        content_area,
    );
}

fn render_library(app: &mut App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let [intro_area, list_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(area);
    frame.render_widget(
        Paragraph::new(Text::from(vec![
            Line::from(Span::styled("İnsan Kütüphanesi", theme.accent())),
            Line::from(Span::styled("Her insan bir kitaptır", theme.muted())),
        ])),
        intro_area,
    );

    let width = list_area.width.saturating_sub(6) as usize;
    let items: Vec<ListItem> = LIBRARY_PEOPLE
        .iter()
        .map(|person| {
            let avatar = derive_avatar(person.seed, 0);
            let (availability, availability_style) = if person.available {
                ("Müsait", Style::default().fg(theme::SEAWEED))
            } else {
                ("Meşgul", theme.muted())
            };
            let name_style = if person.available {
                Style::default().fg(theme.fg).bold()
            } else {
                theme.muted()
            };
            ListItem::new(Text::from(vec![
                Line::from(vec![
                    Span::styled(format!("{} ", shape_symbol(avatar.shape)), theme.muted()),
                    Span::styled(person.expertise, name_style),
                    Span::raw("  "),
                    Span::styled(availability, availability_style),
                ]),
                Line::from(Span::styled(truncate(person.bio, width), theme.muted())),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border(true)),
        )
        .highlight_style(theme.highlight())
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, list_area, &mut app.library_state);
}

fn render_settings(app: &mut App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let settings = app.router.state().settings.clone();
    let on_off = |on: bool| if on { "Açık" } else { "Kapalı" };

    let items: Vec<ListItem> = SettingsRow::all()
        .iter()
        .map(|row| {
            let value = match row {
                SettingsRow::Notifications => on_off(settings.notifications).to_string(),
                SettingsRow::DarkMode => on_off(settings.dark_mode).to_string(),
                SettingsRow::Language => settings.translation_language.to_string(),
                SettingsRow::PolygonId => "Yakında".to_string(),
            };
            let value_style = match row {
                SettingsRow::PolygonId => theme.muted(),
                _ => theme.accent(),
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<16}", row.label()), Style::default().fg(theme.fg)),
                Span::styled(value, value_style),
            ]))
        })
        .collect();

    let [list_area, about_area] =
        Layout::vertical([Constraint::Length(6), Constraint::Min(0)]).areas(area);
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border(true))
                .title(" Ayarlar "),
        )
        .highlight_style(theme.highlight())
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, list_area, &mut app.settings_state);

    let about = Text::from(vec![
        Line::from(Span::styled(
            format!("Anonim ID #{}", app.router.state().user.seed),
            theme.muted(),
        )),
        Line::from(Span::styled(
            format!("Help Me v{} · Yavaş Sosyal Ağ", env!("CARGO_PKG_VERSION")),
            theme.muted(),
        )),
    ]);
    frame.render_widget(Paragraph::new(about), about_area);
}

fn render_bottle(app: &App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let bottle = &BOTTLE_MESSAGES[app.shore_bottle];
    let popup_area = centered(60, 12, area);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::SUNRISE))
        .title(" Şişedeki mesaj ");
    let inner = block.inner(popup_area);
    frame.render_widget(block.style(theme.base()), popup_area);

    let mut lines = vec![Line::from(Span::styled(
        format!("{} · {}", bottle.time_ago, bottle.distance),
        theme.muted(),
    ))];
    lines.push(Line::default());
    lines.extend(
        wrap_text_to_width(bottle.text, inner.width as usize)
            .into_iter()
            .map(|line| Line::from(Span::styled(line, Style::default().fg(theme.fg).italic()))),
    );
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(bottle.tags.join(", "), theme.accent())));
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_questions(app: &App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let Some(deck) = app.router.state().overlays.questions else { return };
    let card = deck.card();
    let popup_area = centered(64, 14, area);

    frame.render_widget(Clear, popup_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border(true))
        .title(" 36 Soru ");
    let inner = block.inner(popup_area);
    frame.render_widget(block.style(theme.base()), popup_area);

    let [category_area, question_area, progress_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(Span::styled(card.category.display_name(), theme.accent())),
        category_area,
    );
    let lines: Vec<Line> = wrap_text_to_width(card.question, question_area.width as usize)
        .into_iter()
        .map(|line| Line::from(Span::styled(line, Style::default().fg(theme.fg))))
        .collect();
    frame.render_widget(Paragraph::new(lines), question_area);

    frame.render_widget(
        Gauge::default()
            .ratio(deck.progress())
            .label(format!("{}/{}", deck.index() + 1, helpme_core::content::CONNECTION_CARDS.len()))
            .gauge_style(Style::default().fg(theme.accent).bg(theme.bg)),
        progress_area,
    );
}

fn render_level_up(app: &App, theme: &Theme, frame: &mut Frame, area: Rect) {
    let state = app.router.state();
    let Some(level) = state.overlays.level_up else { return };
    let popup_area = centered(52, 16, area);

    frame.render_widget(Clear, popup_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::SUNRISE))
        .title(format!(" Seviye {} ", level.value()));
    let inner = block.inner(popup_area);
    frame.render_widget(block.style(theme.base()), popup_area);

    let [avatar_area, text_area] =
        Layout::vertical([Constraint::Length(5), Constraint::Min(0)]).areas(inner);
    let avatar = AvatarWidget::new(state.partner.avatar(level), AvatarSize::Medium);
    let avatar_rect = avatar.area_in(avatar_area);
    frame.render_widget(avatar, avatar_rect);

    let mut lines = Vec::new();
    if let Some(milestone) = level.milestone() {
        lines.push(Line::from(Span::styled(milestone.title, theme.accent())));
        lines.push(Line::from(Span::styled(
            milestone.message,
            Style::default().fg(theme.fg).italic(),
        )));
        lines.push(Line::default());
        for wrapped in wrap_text_to_width(milestone.description, text_area.width as usize) {
            lines.push(Line::from(Span::styled(wrapped, theme.muted())));
        }
    }
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        trust_dots(level),
        Style::default().fg(theme::SUNRISE),
    )));
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), text_area);
}
