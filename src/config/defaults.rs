//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// Common Defaults
// ============================================================================

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn url() -> Option<String> {
        None
    }

    pub fn author() -> String {
        "<YOUR_NAME>".into()
    }

    pub fn email() -> String {
        "user@noreply.inkpress".into()
    }

    pub fn language() -> String {
        "en-US".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn content() -> PathBuf {
        "content".into()
    }

    pub fn output() -> PathBuf {
        "public".into()
    }

    pub fn assets() -> PathBuf {
        "assets".into()
    }

    pub mod rss {
        use std::path::PathBuf;

        pub fn path() -> PathBuf {
            "feed.xml".into()
        }
    }

    pub mod sitemap {
        use std::path::PathBuf;

        pub fn path() -> PathBuf {
            "sitemap.xml".into()
        }
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        4477
    }
}

// ============================================================================
// [theme] Section Defaults
// ============================================================================

pub mod theme {
    use crate::theme::Theme;
    use std::path::PathBuf;

    pub fn default_mode() -> Theme {
        Theme::System
    }

    pub fn store() -> PathBuf {
        ".inkpress/theme.json".into()
    }
}

// ============================================================================
// [og] Section Defaults
// ============================================================================

pub mod og {
    use std::path::PathBuf;

    pub fn font() -> PathBuf {
        "assets/fonts/og.ttf".into()
    }

    pub fn background() -> Option<PathBuf> {
        None
    }

    pub fn output() -> PathBuf {
        "og".into()
    }
}

// ============================================================================
// [analytics] Section Defaults
// ============================================================================

pub mod analytics {
    pub fn src() -> String {
        String::new()
    }

    pub fn site_id() -> Option<String> {
        None
    }
}
