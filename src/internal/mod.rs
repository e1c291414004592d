pub mod downloader;
pub mod progress;
pub mod render;
pub mod states;
