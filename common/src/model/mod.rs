pub mod asset;
pub mod combination;
pub mod field;
pub mod field_value;
pub mod payload;
pub mod template;
pub mod variation;
