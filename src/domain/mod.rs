pub mod calendar_date;
pub mod carousel;
pub mod clock;
pub mod controller;
pub mod grid;
pub mod labels;
pub mod resume;
pub mod slider;
pub mod view_month;

pub use calendar_date::*;
pub use carousel::*;
pub use clock::*;
pub use controller::*;
pub use grid::*;
pub use labels::{Labels, Locale};
pub use resume::*;
pub use slider::*;
pub use view_month::*;
