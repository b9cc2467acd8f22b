//! Catalog handlers: spaces, slides and their page images.

mod delete_slide;
mod slides;
mod spaces;

pub use delete_slide::{DeleteSlideCommand, DeleteSlideHandler, DeleteSlideResult};
pub use slides::{CreateSlideCommand, SlideHandler, UploadSlideCommand};
pub use spaces::SpaceHandler;
