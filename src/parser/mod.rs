pub mod extract;
pub mod loader;
pub mod patterns;
pub mod tags;

pub use extract::Extractor;
pub use loader::load_lines;
