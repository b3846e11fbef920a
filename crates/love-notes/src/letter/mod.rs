//! Plain-text love letter composition.
//!
//! The text produced here is what gets copied to the clipboard. Image export
//! works from the same resolved [`LetterView`] rather than the joined text.

mod budget;
pub mod export;
mod notice;
mod svg;

pub use budget::{BudgetLevel, CharBudget, BODY_SOFT_LIMIT};
pub use export::{
    export_file_name, ExportError, ImageFormat, LetterExport, LetterExporter, LetterRenderer,
    RenderedImage,
};
pub use notice::{Notice, NoticeKind};
pub use svg::SvgLetterRenderer;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

pub const RECIPIENT_PLACEHOLDER: &str = "My Dearest [Recipient],";
pub const SENDER_PLACEHOLDER: &str = "[Your Name]";
pub const CLOSING: &str = "With all my love,";

/// Long-form US date, e.g. "October 16, 2026".
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Caller-supplied date, trimmed, or `today` in long form when blank.
pub fn resolve_date(raw: Option<&str>, today: NaiveDate) -> String {
    match raw.map(str::trim) {
        Some(date) if !date.is_empty() => date.to_string(),
        _ => format_long_date(today),
    }
}

fn recipient_line(recipient: &str) -> &str {
    match recipient.trim() {
        "" => RECIPIENT_PLACEHOLDER,
        trimmed => trimmed,
    }
}

fn signature(sender: &str) -> &str {
    match sender.trim() {
        "" => SENDER_PLACEHOLDER,
        trimmed => trimmed,
    }
}

/// Joins the four letter fields into the canonical text layout.
///
/// ```text
/// {date}
///
/// {recipient or placeholder}
///
/// {body}
/// With all my love,
/// {sender or placeholder}
/// ```
///
/// The body is copied verbatim, including leading/trailing whitespace.
/// `resolved_date` is also used as-is: pass it through [`resolve_date`] (or
/// use [`LetterFields::render_on`]) to get the blank-means-today default.
pub fn render(resolved_date: &str, recipient: &str, sender: &str, body: &str) -> String {
    format!(
        "{resolved_date}\n\n{}\n\n{body}\n{CLOSING}\n{}",
        recipient_line(recipient),
        signature(sender)
    )
}

/// Form snapshot as submitted by the user. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LetterFields {
    pub recipient: String,
    pub sender: String,
    pub date: Option<String>,
    pub body: String,
}

/// Display-ready letter after defaults and placeholders are applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LetterView {
    pub date: String,
    pub recipient_line: String,
    pub body: String,
    pub closing: &'static str,
    pub signature: String,
}

impl LetterView {
    pub fn text(&self) -> String {
        format!(
            "{}\n\n{}\n\n{}\n{}\n{}",
            self.date, self.recipient_line, self.body, self.closing, self.signature
        )
    }
}

impl LetterFields {
    pub fn view_on(&self, today: NaiveDate) -> LetterView {
        LetterView {
            date: resolve_date(self.date.as_deref(), today),
            recipient_line: recipient_line(&self.recipient).to_string(),
            body: self.body.clone(),
            closing: CLOSING,
            signature: signature(&self.sender).to_string(),
        }
    }

    pub fn render_on(&self, today: NaiveDate) -> String {
        let date = resolve_date(self.date.as_deref(), today);
        render(&date, &self.recipient, &self.sender, &self.body)
    }

    /// Renders with today's local date as the fallback.
    pub fn render(&self) -> String {
        self.render_on(Local::now().date_naive())
    }

    pub fn char_budget(&self) -> CharBudget {
        CharBudget::measure(&self.body)
    }
}
