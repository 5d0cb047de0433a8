//! One-shot messages carried across a redirect in a cookie.
//!
//! The cookie holds a fixed code, never user input; the text is built when
//! the next page renders.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Serialize;

use crate::features::auth::model::Viewer;
use crate::shared::constants::FLASH_COOKIE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashCode {
    Welcome,
    LoggedOut,
}

impl FlashCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashCode::Welcome => "welcome",
            FlashCode::LoggedOut => "logged_out",
        }
    }

    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "welcome" => Some(FlashCode::Welcome),
            "logged_out" => Some(FlashCode::LoggedOut),
            _ => None,
        }
    }
}

/// Message ready for the template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flash {
    pub level: &'static str,
    pub text: String,
}

impl Flash {
    fn from_code(code: FlashCode, viewer: &Viewer) -> Self {
        match code {
            FlashCode::Welcome => Flash {
                level: "success",
                text: match viewer.user() {
                    Some(user) => format!("Welcome back, {}!", user.username),
                    None => "Welcome back!".to_string(),
                },
            },
            FlashCode::LoggedOut => Flash {
                level: "success",
                text: "You have been logged out.".to_string(),
            },
        }
    }
}

pub fn flash_cookie(code: FlashCode) -> Cookie<'static> {
    Cookie::build((FLASH_COOKIE, code.as_str()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Read and clear the pending message, if any
pub fn take_flash(jar: CookieJar, viewer: &Viewer) -> (CookieJar, Option<Flash>) {
    let Some(code) = jar.get(FLASH_COOKIE).map(|c| c.value().to_string()) else {
        return (jar, None);
    };

    let flash = FlashCode::parse(&code).map(|code| Flash::from_code(code, viewer));
    let jar = jar.remove(Cookie::build(FLASH_COOKIE).path("/"));

    (jar, flash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::regular_user;

    #[test]
    fn test_codes_round_trip() {
        for code in [FlashCode::Welcome, FlashCode::LoggedOut] {
            assert_eq!(FlashCode::parse(code.as_str()), Some(code));
        }
        assert_eq!(FlashCode::parse("<script>"), None);
    }

    #[test]
    fn test_welcome_uses_viewer_name() {
        let viewer = Viewer::Authenticated(regular_user());
        let flash = Flash::from_code(FlashCode::Welcome, &viewer);
        assert_eq!(flash.text, format!("Welcome back, {}!", regular_user().username));
        assert_eq!(flash.level, "success");
    }

    #[test]
    fn test_every_code_has_a_styled_level() {
        for code in [FlashCode::Welcome, FlashCode::LoggedOut] {
            let flash = Flash::from_code(code, &Viewer::Anonymous);
            assert_eq!(flash.level, "success", "{code:?}");
        }
    }

    #[test]
    fn test_take_flash_consumes_cookie() {
        let jar = CookieJar::new().add(flash_cookie(FlashCode::LoggedOut));
        let (jar, flash) = take_flash(jar, &Viewer::Anonymous);

        assert_eq!(flash.unwrap().text, "You have been logged out.");
        assert!(jar.get(FLASH_COOKIE).is_none());
    }

    #[test]
    fn test_take_flash_without_cookie() {
        let (_, flash) = take_flash(CookieJar::new(), &Viewer::Anonymous);
        assert!(flash.is_none());
    }
}
