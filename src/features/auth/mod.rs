//! Username/password authentication with signed, revocable session tokens.
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Auth | Description |
//! |--------|----------|------|-------------|
//! | POST | `/api/auth/login` | None | Check credentials, set session cookie, return token |
//! | POST | `/api/auth/logout` | Optional | Revoke the user's sessions, clear session cookie |
//! | GET | `/api/auth/me` | User | Current session user |

pub mod dtos;
pub mod guards;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod services;
pub mod session;

pub use services::AuthService;
pub use session::SessionManager;
