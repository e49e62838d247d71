use std::time::Instant;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use helpme_core::{Screen, Transition};

use crate::app::{App, AskFocus, InputMode};
use crate::tui::AppEvent;

pub fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize => {}
        AppEvent::Tick => app.tick(Instant::now()),
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // Overlays take the keyboard while they are up
    let overlays = &app.router.state().overlays;
    let (level_up, questions) = (overlays.level_up_visible(), overlays.questions_visible());
    if level_up {
        handle_level_up(app, key);
        return;
    }
    if questions {
        handle_questions(app, key);
        return;
    }
    if app.bottle_open {
        handle_bottle(app, key);
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

fn handle_level_up(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
        app.dispatch(Transition::DismissLevelUp);
    }
}

fn handle_questions(app: &mut App, key: KeyEvent) {
    let transition = match key.code {
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Enter => Transition::NextCard,
        KeyCode::Char('h') | KeyCode::Left => Transition::PreviousCard,
        KeyCode::Esc | KeyCode::Char('q') => Transition::CloseQuestions,
        _ => return,
    };
    app.dispatch(transition);
}

fn handle_bottle(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.respond_to_shore_bottle(),
        KeyCode::Esc | KeyCode::Char('q') => app.close_bottle(),
        _ => {}
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('q') && app.screen() != Screen::AskHelp {
        app.should_quit = true;
        return;
    }

    match app.screen() {
        Screen::Welcome => handle_welcome(app, key),
        Screen::Philosophy => handle_philosophy(app, key),
        Screen::ProfileSetup => handle_profile_setup(app, key),
        Screen::Home => handle_home(app, key),
        Screen::AskHelp => handle_ask_help_normal(app, key),
        Screen::GiveHelp | Screen::HumanLibrary | Screen::Settings => handle_list(app, key),
        // Nothing to do but wait for the match
        Screen::Waiting => {}
        Screen::Chat => handle_chat_normal(app, key),
        Screen::UserProfile => handle_user_profile(app, key),
    }
}

fn handle_welcome(app: &mut App, key: KeyEvent) {
    if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('l') | KeyCode::Right) {
        app.dispatch(Transition::Advance);
    }
}

fn handle_philosophy(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('l') | KeyCode::Right => {
            app.dispatch(Transition::Advance);
        }
        KeyCode::Char('h') | KeyCode::Left | KeyCode::Backspace => {
            app.dispatch(Transition::Back);
        }
        _ => {}
    }
}

fn handle_profile_setup(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.list_down(),
        KeyCode::Char('k') | KeyCode::Up => app.list_up(),
        KeyCode::Char(' ') | KeyCode::Char('x') => app.toggle_interest(),
        KeyCode::Enter => app.complete_profile(),
        _ => {}
    }
}

fn handle_home(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('a') => {
            app.dispatch(Transition::AskHelp);
        }
        KeyCode::Char('g') => {
            app.dispatch(Transition::GiveHelp);
        }
        KeyCode::Char('p') => {
            app.dispatch(Transition::OpenProfile);
        }
        KeyCode::Char('b') => app.open_bottle(),
        KeyCode::Char('l') => {
            app.dispatch(Transition::OpenLibrary);
        }
        KeyCode::Char('s') => {
            app.dispatch(Transition::OpenQuestions);
        }
        _ => {}
    }
}

fn handle_ask_help_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.dispatch(Transition::Back);
        }
        KeyCode::Tab | KeyCode::Char('i') => {
            app.ask_focus = AskFocus::Question;
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Char('h') | KeyCode::Left => app.tag_left(),
        KeyCode::Char('l') | KeyCode::Right => app.tag_right(),
        KeyCode::Char(' ') | KeyCode::Char('x') => app.toggle_topic(),
        KeyCode::Enter => app.send_question(),
        _ => {}
    }
}

fn handle_list(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.list_down(),
        KeyCode::Char('k') | KeyCode::Up => app.list_up(),
        KeyCode::Enter | KeyCode::Char(' ') => match app.screen() {
            Screen::GiveHelp => app.give_help_select(),
            Screen::HumanLibrary => app.library_select(),
            Screen::Settings => app.activate_setting(),
            _ => {}
        },
        KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left | KeyCode::Backspace => {
            app.dispatch(Transition::Back);
        }
        _ => {}
    }
}

fn handle_chat_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('i') | KeyCode::Enter => app.input_mode = InputMode::Editing,
        KeyCode::Esc | KeyCode::Char('h') | KeyCode::Left | KeyCode::Backspace => {
            app.dispatch(Transition::Back);
        }
        _ => {}
    }
}

fn handle_user_profile(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Tab | KeyCode::Char('l') | KeyCode::Right => {
            app.profile_tab = app.profile_tab.next();
        }
        KeyCode::BackTab | KeyCode::Char('h') | KeyCode::Left => {
            app.profile_tab = app.profile_tab.previous();
        }
        KeyCode::Char('s') => {
            app.dispatch(Transition::OpenSettings);
        }
        KeyCode::Esc | KeyCode::Backspace => {
            app.dispatch(Transition::Back);
        }
        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    match app.screen() {
        Screen::AskHelp => handle_ask_help_editing(app, key),
        Screen::Chat => handle_chat_editing(app, key),
        _ => app.input_mode = InputMode::Normal,
    }
}

fn handle_ask_help_editing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Tab => {
            app.ask_focus = AskFocus::Tags;
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Enter => app.send_question(),
        KeyCode::Backspace => app.question.backspace(),
        KeyCode::Left => app.question.left(),
        KeyCode::Right => app.question.right(),
        KeyCode::Char(c) => app.question.insert(c),
        _ => {}
    }
}

fn handle_chat_editing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Enter => app.send_message(),
        KeyCode::Backspace => app.message.backspace(),
        KeyCode::Left => app.message.left(),
        KeyCode::Right => app.message.right(),
        KeyCode::Char(c) => app.message.insert(c),
        _ => {}
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollDown => app.list_down(),
        MouseEventKind::ScrollUp => app.list_up(),
        _ => {}
    }
}
