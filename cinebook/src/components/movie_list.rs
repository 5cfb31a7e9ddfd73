//! Now-playing list

use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

use tui_dispatch::EventKind;

use super::{Component, HelpBar, HelpBarProps, SPINNERS};
use crate::action::Action;
use crate::state::AppState;

pub struct MovieListProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct MovieList;

impl Component for MovieList {
    type Props<'a> = MovieListProps<'a>;

    fn handle_event<'p>(&mut self, event: &EventKind, props: Self::Props<'p>) -> Vec<Action>
    where
        'p: 'p,
    {
        if !props.is_focused {
            return vec![];
        }
        let state = props.state;

        let EventKind::Key(key) = event else {
            return vec![];
        };
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                let next = state.movie_cursor + 1;
                if next < state.movies.len() {
                    vec![Action::MoviesHighlight(next)]
                } else {
                    vec![]
                }
            }
            KeyCode::Char('k') | KeyCode::Up => match state.movie_cursor.checked_sub(1) {
                Some(prev) => vec![Action::MoviesHighlight(prev)],
                None => vec![],
            },
            KeyCode::Enter => state
                .selected_movie()
                .map(|movie| Action::MovieOpen(movie.id))
                .into_iter()
                .collect(),
            KeyCode::Char('r') => vec![Action::MoviesFetch],
            KeyCode::Char('q') | KeyCode::Esc => vec![Action::Quit],
            _ => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: MovieListProps<'_>) {
        let state = props.state;

        let spinner = if state.movies_loading {
            format!(" {} ", SPINNERS[(state.tick_count as usize / 2) % SPINNERS.len()])
        } else {
            String::new()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(format!(" 🎬 Now Playing{spinner}"))
            .title_style(Style::default().fg(Color::Cyan).bold())
            .title_alignment(Alignment::Center);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let [body, help] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        if let Some(error) = &state.movies_error {
            let text = vec![
                Line::from(Span::styled(
                    format!("Could not load movies: {error}"),
                    Style::default().fg(Color::Red),
                )),
                Line::from(Span::styled(
                    "Press r to retry",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), body);
        } else if state.movies.is_empty() {
            let text = if state.movies_loading {
                "Loading movies..."
            } else {
                "No movies playing"
            };
            frame.render_widget(
                Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray)),
                body,
            );
        } else {
            let items: Vec<ListItem> = state
                .movies
                .iter()
                .map(|movie| {
                    let year = movie.release_date.get(..4).unwrap_or("");
                    ListItem::new(Line::from(vec![
                        Span::raw(movie.title.clone()),
                        Span::styled(format!("  {year}"), Style::default().fg(Color::DarkGray)),
                        Span::styled(
                            format!("  ★ {:.1}", movie.vote_average),
                            Style::default().fg(Color::Yellow),
                        ),
                    ]))
                })
                .collect();
            let list = List::new(items)
                .highlight_symbol("▶ ")
                .highlight_style(Style::default().add_modifier(Modifier::BOLD).fg(Color::Cyan));
            let mut list_state = ListState::default().with_selected(Some(state.movie_cursor));
            frame.render_stateful_widget(list, body, &mut list_state);
        }

        HelpBar.render(
            frame,
            help,
            HelpBarProps {
                screen: state.screen,
                focus: state.focus,
                has_error: state.movies_error.is_some(),
            },
        );
    }
}
