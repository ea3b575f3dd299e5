pub mod jobs;
pub mod matrix;
pub mod model;
pub mod notify;
pub mod requests;
