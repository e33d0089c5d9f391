pub mod demo;
pub mod jobs;
pub mod render;
