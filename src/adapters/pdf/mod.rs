//! PDF Rasterizer Adapters.
//!
//! - `PdftoppmRasterizer` - renders pages with poppler's `pdftoppm`
//! - `StaticRasterizer` - returns preset pages (tests)

mod pdftoppm;
mod static_pages;

pub use pdftoppm::PdftoppmRasterizer;
pub use static_pages::StaticRasterizer;
