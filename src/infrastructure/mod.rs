pub mod extractor;
pub mod filesystem;
pub mod logging;
pub mod repository;

pub use extractor::*;
pub use filesystem::*;
pub use logging::*;
pub use repository::*;
