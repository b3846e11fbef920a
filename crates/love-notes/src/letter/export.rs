//! Image export of a letter through a pluggable renderer.

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};

use super::{LetterFields, LetterView, Notice};

/// Used when the recipient field is blank.
pub const FALLBACK_FILE_STEM: &str = "my_love_letter";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Svg => "svg",
        }
    }

    pub fn mime(self) -> mime::Mime {
        match self {
            ImageFormat::Png => mime::IMAGE_PNG,
            ImageFormat::Svg => mime::IMAGE_SVG,
        }
    }

    /// Upper-case name used in user-facing notices.
    pub fn label(self) -> &'static str {
        match self {
            ImageFormat::Png => "PNG",
            ImageFormat::Svg => "SVG",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub format: ImageFormat,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("letter renderer failed to produce {format:?}: {reason}")]
    Render { format: ImageFormat, reason: String },
    #[error("letter renderer returned an empty {0:?} image")]
    EmptyImage(ImageFormat),
}

impl ExportError {
    /// Format the failed export was meant to produce.
    pub fn format(&self) -> ImageFormat {
        match self {
            ExportError::Render { format, .. } | ExportError::EmptyImage(format) => *format,
        }
    }
}

/// Rasterizes the styled letter fields into an image.
#[async_trait]
pub trait LetterRenderer: Send + Sync + Debug {
    fn format(&self) -> ImageFormat;

    async fn render(&self, view: &LetterView) -> Result<RenderedImage, ExportError>;
}

/// `{recipient}.{ext}`, or the fallback stem when the recipient is blank.
///
/// Path separators, quotes and control characters become `_` so the name is
/// safe in a download header and on disk.
pub fn export_file_name(recipient: &str, format: ImageFormat) -> String {
    let stem: String = match recipient.trim() {
        "" => FALLBACK_FILE_STEM.to_string(),
        trimmed => trimmed
            .chars()
            .map(|c| match c {
                '/' | '\\' | '"' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect(),
    };
    format!("{stem}.{}", format.extension())
}

/// Finished export ready to be downloaded or written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetterExport {
    pub file_name: String,
    pub image: RenderedImage,
}

impl LetterExport {
    pub fn notice(&self) -> Notice {
        Notice::exported(&self.file_name)
    }
}

#[derive(Debug, Clone)]
pub struct LetterExporter {
    renderer: Arc<dyn LetterRenderer>,
}

impl LetterExporter {
    pub fn new(renderer: Arc<dyn LetterRenderer>) -> Self {
        Self { renderer }
    }

    pub fn format(&self) -> ImageFormat {
        self.renderer.format()
    }

    /// Renders the letter once. Failures are returned to the caller as-is;
    /// nothing is retried.
    pub async fn export(
        &self,
        fields: &LetterFields,
        today: NaiveDate,
    ) -> Result<LetterExport, ExportError> {
        let view = fields.view_on(today);
        let format = self.renderer.format();
        info!(format = format.label(), "rendering letter image");

        match self.renderer.render(&view).await {
            Ok(image) if image.bytes.is_empty() => {
                warn!(format = format.label(), "renderer returned no bytes");
                Err(ExportError::EmptyImage(image.format))
            }
            Ok(image) => {
                let file_name = export_file_name(&fields.recipient, image.format);
                info!(%file_name, bytes = image.bytes.len(), "letter image rendered");
                Ok(LetterExport { file_name, image })
            }
            Err(err) => {
                warn!(error = %err, "letter image rendering failed");
                Err(err)
            }
        }
    }
}
