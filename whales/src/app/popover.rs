use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Style, Stylize},
    widgets::{Block, Borders, Clear, Padding, Row, Table},
    Frame,
};

/// Overlays shown above the counter.
#[derive(Debug)]
pub enum Popover {
    /// Show a table of keyboard shortcuts
    Help,
}

impl Popover {
    /// Render the popover centered over the body area.
    pub fn render(&self, frame: &mut Frame<'_>, body_area: Rect) {
        match self {
            Popover::Help => {
                let popup_vert = Layout::vertical([Constraint::Length(5)]).flex(Flex::Center);
                let popup_horiz =
                    Layout::horizontal([Constraint::Percentage(50)]).flex(Flex::Center);

                let [popup_area] = popup_vert.areas(body_area);
                let [popup_area] = popup_horiz.areas(popup_area);

                let popup = Table::new(
                    [
                        Row::new(vec!["? / F1", "Display this help"]),
                        Row::new(vec!["w / space / enter", "One more whale"]),
                        Row::new(vec!["q / escape", "Quit"]),
                    ],
                    [Constraint::Max(18), Constraint::Fill(1)],
                )
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .title("Keyboard Shortcuts")
                        .padding(Padding::horizontal(1))
                        .border_style(Style::new().blue()),
                );

                frame.render_widget(Clear, popup_area);
                frame.render_widget(popup, popup_area);
            }
        }
    }
}
