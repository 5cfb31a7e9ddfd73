//! Date and showtime pickers

use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use cinebook_core::{BookingFlow, Showtime};
use tui_dispatch::EventKind;

use super::Component;
use crate::action::Action;
use crate::state::BookingFocus;

pub struct ScreeningBarProps<'a> {
    pub booking: &'a BookingFlow,
    pub focus: BookingFocus,
    pub date_cursor: usize,
    pub time_cursor: usize,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct ScreeningBar;

impl ScreeningBar {
    fn move_cursor(cursor: usize, len: usize, forward: bool) -> Option<usize> {
        if forward {
            (cursor + 1 < len).then_some(cursor + 1)
        } else {
            cursor.checked_sub(1)
        }
    }
}

impl Component for ScreeningBar {
    type Props<'a> = ScreeningBarProps<'a>;

    fn handle_event<'p>(&mut self, event: &EventKind, props: Self::Props<'p>) -> Vec<Action>
    where
        'p: 'p,
    {
        if !props.is_focused {
            return vec![];
        }
        let EventKind::Key(key) = event else {
            return vec![];
        };
        let dates = props.booking.screening().dates();

        match (props.focus, key.code) {
            (BookingFocus::Dates, KeyCode::Left | KeyCode::Char('h')) => {
                Self::move_cursor(props.date_cursor, dates.len(), false)
                    .map(Action::ScreeningDateHighlight)
                    .into_iter()
                    .collect()
            }
            (BookingFocus::Dates, KeyCode::Right | KeyCode::Char('l')) => {
                Self::move_cursor(props.date_cursor, dates.len(), true)
                    .map(Action::ScreeningDateHighlight)
                    .into_iter()
                    .collect()
            }
            (BookingFocus::Dates, KeyCode::Enter | KeyCode::Char(' ')) => dates
                .get(props.date_cursor)
                .map(|date| Action::ScreeningDateSelect(*date))
                .into_iter()
                .collect(),
            (BookingFocus::Times, KeyCode::Left | KeyCode::Char('h')) => {
                Self::move_cursor(props.time_cursor, Showtime::ALL.len(), false)
                    .map(Action::ScreeningTimeHighlight)
                    .into_iter()
                    .collect()
            }
            (BookingFocus::Times, KeyCode::Right | KeyCode::Char('l')) => {
                Self::move_cursor(props.time_cursor, Showtime::ALL.len(), true)
                    .map(Action::ScreeningTimeHighlight)
                    .into_iter()
                    .collect()
            }
            (BookingFocus::Times, KeyCode::Enter | KeyCode::Char(' ')) => Showtime::ALL
                .get(props.time_cursor)
                .map(|time| Action::ScreeningTimeSelect(*time))
                .into_iter()
                .collect(),
            _ => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: ScreeningBarProps<'_>) {
        let chooser = props.booking.screening();
        let label = |text: &'static str, focused: bool| {
            let style = if focused {
                Style::default().fg(Color::Cyan).bold()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Span::styled(text, style)
        };
        let option = |text: String, chosen: bool, under_cursor: bool| {
            let mut style = if chosen {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            };
            if under_cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            let text = if chosen {
                format!("[{text}]")
            } else {
                format!(" {text} ")
            };
            Span::styled(text, style)
        };

        let dates_focused = props.is_focused && props.focus == BookingFocus::Dates;
        let mut dates = vec![label("Date  ", dates_focused)];
        for (i, date) in chooser.dates().iter().enumerate() {
            dates.push(option(
                date.format("%a %d").to_string(),
                chooser.date() == Some(*date),
                dates_focused && i == props.date_cursor,
            ));
            dates.push(Span::raw(" "));
        }

        let times_focused = props.is_focused && props.focus == BookingFocus::Times;
        let mut times = vec![label("Time  ", times_focused)];
        for (i, time) in Showtime::ALL.iter().enumerate() {
            times.push(option(
                time.to_string(),
                chooser.time() == Some(*time),
                times_focused && i == props.time_cursor,
            ));
            times.push(Span::raw(" "));
        }

        frame.render_widget(
            Paragraph::new(vec![Line::from(dates), Line::from(times)]),
            area,
        );
    }
}
