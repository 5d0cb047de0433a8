pub mod auth;
pub mod categories;
pub mod directory;
pub mod links;
pub mod pages;
