//! Selection summary, price and submit state

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};

use cinebook_core::{BookingFlow, BookingPhase};
use tui_dispatch::EventKind;

use super::{Component, SPINNERS};
use crate::action::Action;
use crate::state::{Notice, NoticeKind};

pub struct BookingPanelProps<'a> {
    pub booking: &'a BookingFlow,
    pub notice: Option<&'a Notice>,
    pub tick_count: u32,
}

#[derive(Default)]
pub struct BookingPanel;

fn notice_style(kind: NoticeKind) -> Style {
    match kind {
        NoticeKind::Info => Style::default().fg(Color::Green),
        NoticeKind::Warning => Style::default().fg(Color::Yellow),
        NoticeKind::Error => Style::default().fg(Color::Red).bold(),
    }
}

impl Component for BookingPanel {
    type Props<'a> = BookingPanelProps<'a>;

    fn handle_event<'p>(&mut self, _event: &EventKind, _props: Self::Props<'p>) -> Vec<Action>
    where
        'p: 'p,
    {
        vec![]
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: BookingPanelProps<'_>) {
        let booking = props.booking;
        let selected = booking.selected();

        let seats = if selected.is_empty() {
            "none".to_string()
        } else {
            selected
                .iter()
                .map(|seat| seat.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };

        let action = match booking.phase() {
            BookingPhase::Submitting => {
                let spinner = SPINNERS[(props.tick_count as usize / 2) % SPINNERS.len()];
                Span::styled(
                    format!("{spinner} Booking..."),
                    Style::default().fg(Color::Cyan),
                )
            }
            BookingPhase::ReadyToSubmit => Span::styled(
                format!(
                    "[ Book {} seat{} (b) ]",
                    selected.len(),
                    if selected.len() == 1 { "" } else { "s" }
                ),
                Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
            ),
            _ => Span::styled("[ Book seats (b) ]", Style::default().fg(Color::DarkGray)),
        };

        let mut lines = vec![
            Line::from(vec![
                Span::styled("Selected  ", Style::default().fg(Color::DarkGray)),
                Span::raw(seats),
            ]),
            Line::from(vec![
                Span::styled("Total     ", Style::default().fg(Color::DarkGray)),
                Span::styled(format!("${}", booking.price()), Style::default().bold()),
                Span::raw("    "),
                action,
            ]),
        ];
        if let Some(notice) = props.notice {
            lines.push(Line::from(Span::styled(
                notice.text.clone(),
                notice_style(notice.kind),
            )));
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
    }
}
