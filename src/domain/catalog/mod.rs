//! Catalog module - spaces, slide decks and their page images.

mod slide;
mod slide_image;
mod space;

pub use slide::{Slide, SlidePatch};
pub use slide_image::{sort_by_order, SlideImage};
pub use space::{Space, SpacePatch};
