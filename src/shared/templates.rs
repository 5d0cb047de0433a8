//! HTML page rendering with minijinja.
//!
//! Page templates live in `templates/pages/` and are embedded at compile time.
//! Template names end in `.html`, so minijinja auto-escapes every
//! interpolated value.

use minijinja::{context, Environment, Value};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

use crate::core::config::SiteConfig;
use crate::core::error::AppError;

pub const PUBLIC_PAGE: &str = "public_page.html";
pub const LOGIN_PAGE: &str = "login.html";

const TEMPLATES: [(&str, &str); 3] = [
    ("base.html", include_str!("../../templates/pages/base.html")),
    (
        PUBLIC_PAGE,
        include_str!("../../templates/pages/public_page.html"),
    ),
    (LOGIN_PAGE, include_str!("../../templates/pages/login.html")),
];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to compile template '{name}': {reason}")]
    CompileError { name: String, reason: String },

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

impl From<TemplateError> for AppError {
    fn from(e: TemplateError) -> Self {
        AppError::Internal(e.to_string())
    }
}

/// Renders pages with the site configuration available as `site`.
pub struct PageRenderer {
    env: Environment<'static>,
    site: Arc<SiteConfig>,
}

impl PageRenderer {
    pub fn new(site: Arc<SiteConfig>) -> Result<Self, TemplateError> {
        let mut env = Environment::new();

        for (name, source) in TEMPLATES {
            env.add_template(name, source)
                .map_err(|e| TemplateError::CompileError {
                    name: name.to_string(),
                    reason: e.to_string(),
                })?;
            tracing::debug!("Loaded template: {}", name);
        }

        Ok(Self { env, site })
    }

    pub fn site(&self) -> &SiteConfig {
        &self.site
    }

    /// Render `template_name` with the fields of `page` plus `site`.
    pub fn render<P: Serialize>(&self, template_name: &str, page: &P) -> Result<String, TemplateError> {
        let template = self
            .env
            .get_template(template_name)
            .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

        let ctx = context! {
            site => self.site.as_ref(),
            ..Value::from_serialize(page)
        };

        template
            .render(ctx)
            .map_err(|e| TemplateError::RenderError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn renderer() -> PageRenderer {
        let site = SiteConfig {
            title: "Team Links".to_string(),
            subtitle: "Everything we use".to_string(),
            navbar_brand: "TL".to_string(),
            footer_text: "Maintained by ops".to_string(),
            meta_description: "Shared bookmarks".to_string(),
            meta_keywords: "links,bookmarks".to_string(),
            show_empty_categories: false,
        };
        PageRenderer::new(Arc::new(site)).unwrap()
    }

    #[test]
    fn test_all_templates_compile() {
        let renderer = renderer();
        for (name, _) in TEMPLATES {
            assert!(renderer.env.get_template(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_public_page_renders_site_strings_and_links() {
        let page = json!({
            "viewer": null,
            "flash": null,
            "categories": [{
                "id": "00000000-0000-0000-0000-000000000001",
                "name": "Tools",
                "description": "Daily drivers",
                "color": "#112233FF",
                "display_order": 0,
                "links": [{
                    "id": "00000000-0000-0000-0000-000000000002",
                    "title": "Source",
                    "url": "https://git.example.com",
                    "description": null,
                    "icon_class": "fab fa-github",
                    "authenticated_only": false
                }]
            }]
        });

        let html = renderer().render(PUBLIC_PAGE, &page).unwrap();
        assert!(html.contains("Team Links"));
        assert!(html.contains("Everything we use"));
        assert!(html.contains("Maintained by ops"));
        assert!(html.contains("content=\"Shared bookmarks\""));
        assert!(html.contains("Source"));
        assert!(html.contains("git.example.com"));
        assert!(html.contains("<i class=\"fab fa-github\""));
        assert!(html.contains("href=\"/login/\""));
    }

    #[test]
    fn test_public_page_hides_empty_categories_by_default() {
        let page = json!({
            "viewer": null,
            "flash": null,
            "categories": [{
                "id": "00000000-0000-0000-0000-000000000001",
                "name": "Private Stuff",
                "description": null,
                "color": "#FFFFFFFF",
                "display_order": 0,
                "links": []
            }]
        });

        let html = renderer().render(PUBLIC_PAGE, &page).unwrap();
        assert!(!html.contains("Private Stuff"));
    }

    #[test]
    fn test_values_are_escaped() {
        let page = json!({
            "viewer": null,
            "flash": null,
            "categories": [{
                "id": "00000000-0000-0000-0000-000000000001",
                "name": "<script>alert(1)</script>",
                "description": null,
                "color": "#FFFFFFFF",
                "display_order": 0,
                "links": [{
                    "id": "00000000-0000-0000-0000-000000000002",
                    "title": "x",
                    "url": "https://example.com/?a=\"b\"",
                    "description": null,
                    "icon_class": "fas fa-link",
                    "authenticated_only": false
                }]
            }]
        });

        let html = renderer().render(PUBLIC_PAGE, &page).unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("a=\"b\""));
    }

    #[test]
    fn test_login_page_shows_error() {
        let page = json!({
            "viewer": null,
            "flash": null,
            "error": "Invalid username or password.",
            "username": "bob"
        });

        let html = renderer().render(LOGIN_PAGE, &page).unwrap();
        assert!(html.contains("Invalid username or password."));
        assert!(html.contains("value=\"bob\""));
        assert!(html.contains("action=\"/login/\""));
    }

    #[test]
    fn test_unknown_template() {
        let err = renderer().render("missing.html", &json!({})).unwrap_err();
        assert!(matches!(err, TemplateError::NotFound(_)));
    }
}
