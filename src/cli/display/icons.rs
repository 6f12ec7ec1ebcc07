//! Status icons for CLI output

pub struct StatusIcon;

impl StatusIcon {
    pub const SUCCESS: &'static str = "✓";

    /// Rendered but not sent to the hub
    pub const PENDING: &'static str = "⏳";

    pub const FILE: &'static str = "📄";

    pub fn get_apply_icon(applied: bool) -> &'static str {
        if applied {
            Self::SUCCESS
        } else {
            Self::PENDING
        }
    }

    pub fn get_status_text(applied: bool) -> &'static str {
        if applied {
            "Applied"
        } else {
            "Rendered"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_apply_icon() {
        assert_eq!(StatusIcon::get_apply_icon(true), StatusIcon::SUCCESS);
        assert_eq!(StatusIcon::get_apply_icon(false), StatusIcon::PENDING);
    }

    #[test]
    fn test_get_status_text() {
        assert_eq!(StatusIcon::get_status_text(true), "Applied");
        assert_eq!(StatusIcon::get_status_text(false), "Rendered");
    }
}
