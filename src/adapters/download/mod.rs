//! File Downloader Adapters.
//!
//! - `HttpDownloader` - fetches over HTTP with reqwest
//! - `StaticDownloader` - writes fixed bytes (tests)

mod http_downloader;
mod static_downloader;

pub use http_downloader::HttpDownloader;
pub use static_downloader::StaticDownloader;
