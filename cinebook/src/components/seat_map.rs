//! Auditorium seat map
//!
//! Available seats show their column number, selected seats `**` and
//! booked seats `XX`. The grid cursor is drawn reversed while focused.

use crossterm::event::KeyCode;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};

use cinebook_core::{BookingFlow, SeatStatus};
use tui_dispatch::EventKind;

use super::Component;
use crate::action::Action;
use crate::state::SeatCursor;

pub const SELECTED_GLYPH: &str = "**";
pub const BOOKED_GLYPH: &str = "XX";

pub struct SeatMapProps<'a> {
    pub booking: &'a BookingFlow,
    pub cursor: SeatCursor,
    pub warning: Option<&'a str>,
    pub is_focused: bool,
}

#[derive(Default)]
pub struct SeatMap;

fn seat_style(status: SeatStatus) -> Style {
    match status {
        SeatStatus::Available => Style::default().fg(Color::Green),
        SeatStatus::Selected => Style::default().fg(Color::Black).bg(Color::Yellow).bold(),
        SeatStatus::Booked => Style::default().fg(Color::DarkGray),
    }
}

impl Component for SeatMap {
    type Props<'a> = SeatMapProps<'a>;

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
        let grid = props.booking.grid();
        let SeatCursor { row, col } = props.cursor;

        let moved = match key.code {
            KeyCode::Up | KeyCode::Char('k') => row.checked_sub(1).map(|row| SeatCursor { row, col }),
            KeyCode::Down | KeyCode::Char('j') => {
                (row + 1 < grid.rows()).then_some(SeatCursor { row: row + 1, col })
            }
            KeyCode::Left | KeyCode::Char('h') => col.checked_sub(1).map(|col| SeatCursor { row, col }),
            KeyCode::Right | KeyCode::Char('l') => {
                (col + 1 < grid.seats_per_row()).then_some(SeatCursor { row, col: col + 1 })
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                return grid
                    .seat_at(row, col)
                    .map(Action::SeatToggle)
                    .into_iter()
                    .collect();
            }
            _ => None,
        };
        moved.map(Action::SeatHighlight).into_iter().collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: SeatMapProps<'_>) {
        let booking = props.booking;
        let grid = booking.grid();
        let chooser = booking.screening();

        if chooser.time().is_none() {
            frame.render_widget(
                Paragraph::new("Choose a date and showtime to see available seats")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::DarkGray)),
                area,
            );
            return;
        }

        let width = usize::from(grid.seats_per_row()) * 3 + 2;
        let mut lines = vec![
            Line::from(Span::styled(
                format!("{:^width$}", "SCREEN"),
                Style::default().fg(Color::Gray).add_modifier(Modifier::UNDERLINED),
            ))
            .centered(),
            Line::default(),
        ];

        for row in 0..grid.rows() {
            let mut spans = Vec::with_capacity(usize::from(grid.seats_per_row()) * 2 + 1);
            for (col, seat) in grid.row(row).enumerate() {
                if col == 0 {
                    spans.push(Span::styled(
                        format!("{} ", seat.row_letter()),
                        Style::default().fg(Color::Cyan),
                    ));
                }
                let status = booking.status(&seat);
                let text = match status {
                    SeatStatus::Available => format!("{:>2}", seat.col()),
                    SeatStatus::Selected => SELECTED_GLYPH.to_string(),
                    SeatStatus::Booked => BOOKED_GLYPH.to_string(),
                };
                let mut style = seat_style(status);
                if props.is_focused && props.cursor == (SeatCursor { row, col: col as u16 }) {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                spans.push(Span::styled(text, style));
                spans.push(Span::raw(" "));
            }
            lines.push(Line::from(spans).centered());
        }

        lines.push(Line::default());
        let loading = if chooser.is_loading() {
            Span::styled("  updating...", Style::default().fg(Color::DarkGray))
        } else {
            Span::raw("")
        };
        lines.push(
            Line::from(vec![
                Span::styled(" 1", seat_style(SeatStatus::Available)),
                Span::raw(" available  "),
                Span::styled(SELECTED_GLYPH, seat_style(SeatStatus::Selected)),
                Span::raw(" selected  "),
                Span::styled(BOOKED_GLYPH, seat_style(SeatStatus::Booked)),
                Span::raw(" booked"),
                loading,
            ])
            .centered(),
        );
        if let Some(warning) = props.warning {
            lines.push(Line::from(Span::styled(warning, Style::default().fg(Color::Yellow))).centered());
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}
