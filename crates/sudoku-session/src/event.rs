/// Input events delivered by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Screen became visible; load (or create) the current game and start
    /// the timer
    Start,
    /// Screen is going away (app backgrounded or destroyed); persist
    /// progress and cancel outstanding work
    Stop,
    /// Player entered a digit for the focused tile
    InputDigit(u8),
    /// Player focused a tile
    TileFocused { x: u8, y: u8 },
    /// Player asked for a new game
    NewGameRequested,
}
