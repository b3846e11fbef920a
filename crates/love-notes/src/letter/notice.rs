use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// Short-lived message for the user after a copy or export attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    pub fn copied() -> Self {
        Self::new(NoticeKind::Success, "💖 Letter text copied to clipboard! 💖")
    }

    pub fn copy_failed() -> Self {
        Self::new(NoticeKind::Error, "💔 Failed to copy. Please try manually. 💔")
    }

    pub fn export_started(format_label: &str) -> Self {
        Self::new(
            NoticeKind::Info,
            format!("⏳ Generating {format_label}... Please wait! ⏳"),
        )
    }

    pub fn exported(file_name: &str) -> Self {
        Self::new(
            NoticeKind::Success,
            format!("💌 '{file_name}' has been downloaded! 💌"),
        )
    }

    pub fn export_failed(format_label: &str) -> Self {
        Self::new(
            NoticeKind::Error,
            format!("💔 Failed to generate {format_label}. Please try again. 💔"),
        )
    }

    pub fn is_error(&self) -> bool {
        self.kind == NoticeKind::Error
    }
}
