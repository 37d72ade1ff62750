//! Server-rendered HTML pages.

mod education;
mod layout;
mod map;
mod prevention;
mod report;

pub use education::education;
pub use map::{MapPresenter, map};
pub use prevention::prevention;
pub use report::report;
