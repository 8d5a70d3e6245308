use crossterm::event::KeyEvent;
use whales_core::calendar;

/// Things that can happen to this app
#[derive(Debug)]
pub enum Action {
    /// The user did something on the keyboard
    Key(KeyEvent),

    /// Something bad happened; display it to the user
    Problem(String),

    /// A calendar query finished, successfully or not
    FetchedCalendar(calendar::Result<calendar::Resp>),
}
