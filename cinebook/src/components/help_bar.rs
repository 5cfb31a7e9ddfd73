//! Key hints for the current screen and focus

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::EventKind;

use super::Component;
use crate::action::Action;
use crate::state::{BookingFocus, Screen};

pub struct HelpBar;

pub struct HelpBarProps {
    pub screen: Screen,
    pub focus: BookingFocus,
    /// The current page failed to load and offers a retry
    pub has_error: bool,
}

impl HelpBar {
    fn hints(props: &HelpBarProps) -> &'static [(&'static str, &'static str)] {
        match (props.screen, props.focus) {
            (Screen::MovieList, _) => &[
                ("j/k", "move"),
                ("enter", "open"),
                ("r", "reload"),
                ("q", "quit"),
            ],
            (Screen::MovieDetail, _) if props.has_error => {
                &[("r", "retry"), ("esc", "back"), ("q", "quit")]
            }
            (Screen::MovieDetail, BookingFocus::Seats) => &[
                ("tab", "focus"),
                ("arrows", "move"),
                ("space", "toggle"),
                ("c", "clear"),
                ("b", "book"),
                ("esc", "back"),
            ],
            (Screen::MovieDetail, _) => &[
                ("tab", "focus"),
                ("←/→", "move"),
                ("enter", "choose"),
                ("b", "book"),
                ("esc", "back"),
            ],
        }
    }
}

impl Component for HelpBar {
    type Props<'a> = HelpBarProps;

    fn handle_event<'p>(&mut self, _event: &EventKind, _props: Self::Props<'p>) -> Vec<Action>
    where
        'p: 'p,
    {
        vec![]
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let mut spans = Vec::new();
        for (key, label) in Self::hints(&props) {
            spans.push(Span::styled(
                format!(" {key}"),
                Style::default().fg(Color::Cyan).bold(),
            ));
            spans.push(Span::styled(
                format!(" {label} "),
                Style::default().fg(Color::DarkGray),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans).centered()), area);
    }
}
