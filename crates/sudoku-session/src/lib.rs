//! Game session orchestration.
//!
//! The presentation layer feeds [`GameEvent`]s into a
//! [`SessionController`] and reads the resulting [`SessionView`]; a host
//! loop drives the 1-second timer by calling
//! [`SessionController::tick`]. Everything visual stays on the other side
//! of that interface.

mod event;
mod session;
mod view;

pub use event::GameEvent;
pub use session::{SessionAction, SessionController};
pub use view::{format_time, ScreenState, SessionView, TileState};
