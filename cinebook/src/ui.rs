//! Top-level view: picks the screen and routes input to it

use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{Frame, layout::Rect};
use tui_dispatch::EventKind;

use crate::action::Action;
use crate::components::{Component, MovieDetailView, MovieDetailViewProps, MovieList, MovieListProps};
use crate::state::{AppState, Screen};

#[derive(Default)]
pub struct CinebookUi {
    list: MovieList,
    detail: MovieDetailView,
}

impl CinebookUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        match state.screen {
            Screen::MovieList => self.list.render(
                frame,
                area,
                MovieListProps {
                    state,
                    is_focused: true,
                },
            ),
            Screen::MovieDetail => self.detail.render(
                frame,
                area,
                MovieDetailViewProps {
                    state,
                    is_focused: true,
                },
            ),
        }
    }

    pub fn map_event(&mut self, event: &EventKind, state: &AppState) -> Vec<Action> {
        match event {
            EventKind::Resize(width, height) => vec![Action::UiTerminalResize(*width, *height)],
            // Some terminals also report releases and repeats
            EventKind::Key(key) if key.kind != KeyEventKind::Press => vec![],
            EventKind::Key(key)
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    && key.code == KeyCode::Char('c') =>
            {
                vec![Action::Quit]
            }
            EventKind::Key(_) => match state.screen {
                Screen::MovieList => self.list.handle_event(
                    event,
                    MovieListProps {
                        state,
                        is_focused: true,
                    },
                ),
                Screen::MovieDetail => self.detail.handle_event(
                    event,
                    MovieDetailViewProps {
                        state,
                        is_focused: true,
                    },
                ),
            },
            EventKind::Mouse(_) | EventKind::Scroll { .. } | EventKind::Tick => vec![],
        }
    }
}
