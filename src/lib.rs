pub mod animation;
pub mod error;
pub mod model;
pub mod model_data;
pub mod reader;
pub mod runtime;
pub mod shared_types;
