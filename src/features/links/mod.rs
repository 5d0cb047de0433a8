//! Link administration.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/admin/links` | Staff | List with category/visibility filters and search |
//! | POST | `/api/admin/links` | Staff | Create link |
//! | PUT | `/api/admin/links/bulk` | Staff | Edit order, category, visibility and icon of many links |
//! | GET | `/api/admin/links/{id}` | Staff | Get link |
//! | PUT | `/api/admin/links/{id}` | Staff | Update link |
//! | DELETE | `/api/admin/links/{id}` | Staff | Delete link |

pub mod dtos;
pub mod handlers;
pub mod icon;
pub mod models;
pub mod routes;
pub mod services;

pub use services::LinkService;
