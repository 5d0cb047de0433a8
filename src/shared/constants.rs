/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// DIRECTORY DEFAULTS
// =============================================================================

/// Icon shown for links that have no icon configured
pub const DEFAULT_ICON_CLASS: &str = "fas fa-link";

/// Maximum stored length of a normalized icon class
pub const MAX_ICON_CLASS_LEN: usize = 100;

/// Category color used when none is given (opaque white, `#RRGGBBAA`)
pub const DEFAULT_CATEGORY_COLOR: &str = "#FFFFFFFF";

// =============================================================================
// COOKIES
// =============================================================================

pub const SESSION_COOKIE: &str = "linkshelf_session";

/// One-shot message shown on the next rendered page
pub const FLASH_COOKIE: &str = "linkshelf_flash";
