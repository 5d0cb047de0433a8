//! Server-rendered pages.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/` | Directory filtered for the requester |
//! | GET | `/login/` | Login form |
//! | POST | `/login/` | Form login, redirects to `/` |
//! | GET, POST | `/logout/` | Clear session, redirects to `/` |

use std::sync::Arc;

use crate::features::auth::AuthService;
use crate::features::directory::DirectoryService;
use crate::shared::templates::PageRenderer;

pub mod flash;
pub mod handlers;
pub mod routes;

pub struct PagesState {
    pub directory: Arc<DirectoryService>,
    pub auth: Arc<AuthService>,
    pub renderer: Arc<PageRenderer>,
}
