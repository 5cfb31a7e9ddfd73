//! Movie detail page with the booking section

use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use cinebook_core::{BookingFlow, MovieDetails};
use tui_dispatch::EventKind;

use super::{
    BookingPanel, BookingPanelProps, Component, HelpBar, HelpBarProps, SPINNERS, ScreeningBar,
    ScreeningBarProps, SeatMap, SeatMapProps,
};
use crate::action::Action;
use crate::state::{AppState, BookingFocus};

pub struct MovieDetailViewProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct MovieDetailView {
    screening: ScreeningBar,
    seats: SeatMap,
    panel: BookingPanel,
}

fn header_lines(movie: &MovieDetails) -> Vec<Line<'static>> {
    let mut facts = Vec::new();
    if let Some(year) = movie.release_date.get(..4) {
        facts.push(year.to_string());
    }
    if let Some(runtime) = movie.runtime {
        facts.push(format!("{runtime} min"));
    }
    if !movie.original_language.is_empty() {
        facts.push(movie.original_language.to_uppercase());
    }
    facts.push(format!("★ {:.1}", movie.vote_average));

    vec![
        Line::from(Span::styled(movie.title.clone(), Style::default().bold())),
        Line::from(Span::styled(
            facts.join(" · "),
            Style::default().fg(Color::DarkGray),
        )),
    ]
}

impl MovieDetailView {
    fn screening_props<'a>(state: &'a AppState, booking: &'a BookingFlow) -> ScreeningBarProps<'a> {
        ScreeningBarProps {
            booking,
            focus: state.focus,
            date_cursor: state.date_cursor,
            time_cursor: state.time_cursor,
            is_focused: state.focus != BookingFocus::Seats,
        }
    }

    fn seat_props<'a>(state: &'a AppState, booking: &'a BookingFlow) -> SeatMapProps<'a> {
        SeatMapProps {
            booking,
            cursor: state.seat_cursor,
            warning: state.seats_warning.as_deref(),
            is_focused: state.focus == BookingFocus::Seats,
        }
    }

    fn render_booking(&mut self, frame: &mut Frame, area: Rect, state: &AppState, booking: &BookingFlow) {
        let map_height = booking.grid().rows() + 5;
        let [screening, _, seats, panel] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(map_height),
            Constraint::Min(3),
        ])
        .areas(area);

        self.screening
            .render(frame, screening, Self::screening_props(state, booking));
        self.seats.render(frame, seats, Self::seat_props(state, booking));
        self.panel.render(
            frame,
            panel,
            BookingPanelProps {
                booking,
                notice: state.notice.as_ref(),
                tick_count: state.tick_count,
            },
        );
    }
}

impl Component for MovieDetailView {
    type Props<'a> = MovieDetailViewProps<'a>;

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
            KeyCode::Esc if state.notice.is_some() => return vec![Action::NoticeDismiss],
            KeyCode::Esc => return vec![Action::MovieClose],
            KeyCode::Char('q') => return vec![Action::Quit],
            KeyCode::Char('r') if state.detail_error.is_some() => {
                return state.open_movie.map(Action::MovieOpen).into_iter().collect();
            }
            _ => {}
        }

        let Some(booking) = &state.booking else {
            return vec![];
        };
        match key.code {
            KeyCode::Tab => vec![Action::FocusNext],
            KeyCode::BackTab => vec![Action::FocusPrev],
            KeyCode::Char('c') => vec![Action::SelectionClear],
            KeyCode::Char('b') => vec![Action::BookingSubmit],
            _ if state.focus == BookingFocus::Seats => self
                .seats
                .handle_event(event, Self::seat_props(state, booking)),
            _ => self
                .screening
                .handle_event(event, Self::screening_props(state, booking)),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: MovieDetailViewProps<'_>) {
        let state = props.state;

        let spinner = if state.is_busy() {
            format!(" {} ", SPINNERS[(state.tick_count as usize / 2) % SPINNERS.len()])
        } else {
            String::new()
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(format!(" 🎟 Book Tickets{spinner}"))
            .title_style(Style::default().fg(Color::Cyan).bold())
            .title_alignment(Alignment::Center);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let [body, help] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);
        HelpBar.render(
            frame,
            help,
            HelpBarProps {
                screen: state.screen,
                focus: state.focus,
                has_error: state.detail_error.is_some(),
            },
        );

        let (Some(movie), Some(booking)) = (&state.detail, &state.booking) else {
            let text = match &state.detail_error {
                Some(error) => vec![
                    Line::from(Span::styled(
                        format!("Could not load movie: {error}"),
                        Style::default().fg(Color::Red),
                    )),
                    Line::from(Span::styled(
                        "Press r to retry",
                        Style::default().fg(Color::DarkGray),
                    )),
                ],
                None => vec![Line::from(Span::styled(
                    "Loading movie...",
                    Style::default().fg(Color::DarkGray),
                ))],
            };
            frame.render_widget(
                Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .wrap(Wrap { trim: true }),
                body,
            );
            return;
        };

        let [header, overview, booking_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(4),
            Constraint::Min(1),
        ])
        .areas(body);

        frame.render_widget(Paragraph::new(header_lines(movie)), header);
        frame.render_widget(
            Paragraph::new(movie.overview.as_str())
                .style(Style::default().fg(Color::Gray))
                .wrap(Wrap { trim: true }),
            overview,
        );
        self.render_booking(frame, booking_area, state, booking);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::press;
    use crate::reducer::reducer;
    use crate::state::Notice;
    use tui_dispatch::testing::{ActionAssertions, ActionAssertionsEq};

    fn opened() -> AppState {
        let mut state = AppState::default();
        reducer(&mut state, Action::MovieOpen(550));
        reducer(
            &mut state,
            Action::MovieDidLoad(MovieDetails {
                id: 550,
                title: "Fight Club".into(),
                overview: "Mischief.".into(),
                poster_path: None,
                release_date: "1999-10-15".into(),
                vote_average: 8.4,
                runtime: Some(139),
                original_language: "en".into(),
            }),
        );
        state
    }

    fn handle(state: &AppState, k: &str) -> Vec<Action> {
        MovieDetailView::default().handle_event(
            &press(k),
            MovieDetailViewProps {
                state,
                is_focused: true,
            },
        )
    }

    #[test]
    fn test_esc_goes_back() {
        let state = opened();
        handle(&state, "esc").assert_first(Action::MovieClose);
    }

    #[test]
    fn test_esc_dismisses_notice_first() {
        let mut state = opened();
        state.notice = Some(Notice::warning("Please select a screening date"));
        handle(&state, "esc").assert_first(Action::NoticeDismiss);
    }

    #[test]
    fn test_booking_keys() {
        let state = opened();
        handle(&state, "tab").assert_first(Action::FocusNext);
        handle(&state, "shift+tab").assert_first(Action::FocusPrev);
        handle(&state, "c").assert_first(Action::SelectionClear);
        handle(&state, "b").assert_first(Action::BookingSubmit);
    }

    #[test]
    fn test_arrows_route_by_focus() {
        let mut state = opened();
        handle(&state, "right").assert_first(Action::ScreeningDateHighlight(1));

        state.focus = BookingFocus::Seats;
        handle(&state, "right").assert_first(Action::SeatHighlight(crate::state::SeatCursor {
            row: 0,
            col: 1,
        }));
    }

    #[test]
    fn test_r_retries_failed_detail_load() {
        let mut state = AppState::default();
        reducer(&mut state, Action::MovieOpen(550));
        reducer(&mut state, Action::MovieDidError("500".into()));

        handle(&state, "r").assert_first(Action::MovieOpen(550));
    }

    #[test]
    fn test_r_does_nothing_once_loaded() {
        let state = opened();
        handle(&state, "r").assert_empty();
    }

    #[test]
    fn test_booking_keys_ignored_while_loading() {
        let mut state = AppState::default();
        reducer(&mut state, Action::MovieOpen(550));

        handle(&state, "b").assert_empty();
        handle(&state, "esc").assert_first(Action::MovieClose);
    }
}
