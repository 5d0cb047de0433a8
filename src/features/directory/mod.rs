//! The public link directory.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/directory` | Optional | Categories with the links visible to the requester |

pub mod dtos;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod visibility;

pub use services::DirectoryService;
