//! Terminal presentation: setup, the frame loop, and widgets.
pub mod event_loop;
pub mod terminal;
pub mod theme;
pub mod ui;
pub mod view;
pub mod widgets;

pub use event_loop::{EventLoop, Outcome};
