pub mod directory_dto;

pub use directory_dto::*;
