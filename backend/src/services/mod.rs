pub mod assets;
pub mod matrices;
pub mod templates;
