pub mod calendar_view;
pub mod terminal;
pub mod text;
pub mod theme;

pub use calendar_view::*;
pub use terminal::*;
pub use text::*;
pub use theme::*;
