//! Link category administration.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | GET | `/api/admin/categories` | Staff | List categories (paginated, name search) |
//! | POST | `/api/admin/categories` | Staff | Create category |
//! | PUT | `/api/admin/categories/bulk` | Staff | Edit order and color of many categories |
//! | GET | `/api/admin/categories/{id}` | Staff | Get category |
//! | PUT | `/api/admin/categories/{id}` | Staff | Update category |
//! | DELETE | `/api/admin/categories/{id}` | Staff | Delete category and its links |

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use services::CategoryService;
