//! Check inputs: an uploaded passport file and a captured webcam frame.
//!
//! Both types hold image bytes that can run to megabytes, so their `Debug`
//! output reports sizes only. Events and actions carrying them are logged with
//! `?` formatting throughout the crate.

use base64::engine::general_purpose::STANDARD as BASE64_ENGINE;
use super::error::{CheckerError, Result};
use base64::Engine as _;
use std::fmt;

/// Prefix of the data URIs produced by [`CapturedImage::from_jpeg`].
const JPEG_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// A passport image selected from disk.
#[derive(Clone, PartialEq, Eq)]
pub struct FileInput {
    /// File name without directories, sent as the multipart filename.
    pub name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl FileInput {
    #[must_use]
    pub const fn new(name: String, bytes: Vec<u8>) -> Self {
        Self { name, bytes }
    }

    /// Rebuilds a file sent across the worker boundary as base64.
    ///
    /// # Errors
    ///
    /// Returns [`CheckerError::Decode`] if `encoded` is not valid base64.
    pub fn from_base64(name: String, encoded: &str) -> Result<Self> {
        let bytes = BASE64_ENGINE
            .decode(encoded)
            .map_err(|e| CheckerError::Decode(format!("file payload for {name}: {e}")))?;
        Ok(Self { name, bytes })
    }

    /// Guesses the MIME type from the file extension.
    ///
    /// ```
    /// use sanction_check::domain::FileInput;
    ///
    /// let file = FileInput::new("passport.JPG".into(), vec![0xff, 0xd8]);
    /// assert_eq!(file.content_type(), "image/jpeg");
    /// ```
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        let extension = self
            .name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "gif" => "image/gif",
            "bmp" => "image/bmp",
            "webp" => "image/webp",
            "tif" | "tiff" => "image/tiff",
            _ => "application/octet-stream",
        }
    }
}

impl fmt::Debug for FileInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileInput")
            .field("name", &self.name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// A still frame taken from the webcam, kept as a data URI.
#[derive(Clone, PartialEq, Eq)]
pub struct CapturedImage {
    data_uri: String,
}

impl CapturedImage {
    /// Wraps an existing data URI (or bare base64 string).
    #[must_use]
    pub const fn from_data_uri(data_uri: String) -> Self {
        Self { data_uri }
    }

    /// Encodes a JPEG frame as a `data:image/jpeg;base64,...` URI.
    #[must_use]
    pub fn from_jpeg(frame: &[u8]) -> Self {
        let mut data_uri = String::with_capacity(JPEG_DATA_URI_PREFIX.len() + frame.len() * 4 / 3 + 4);
        data_uri.push_str(JPEG_DATA_URI_PREFIX);
        BASE64_ENGINE.encode_string(frame, &mut data_uri);
        Self { data_uri }
    }

    #[must_use]
    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    /// Returns only the base64 payload, with the `data:...;base64,` prefix
    /// stripped.
    ///
    /// ```
    /// use sanction_check::domain::CapturedImage;
    ///
    /// let image = CapturedImage::from_data_uri("data:image/jpeg;base64,QUJD".into());
    /// assert_eq!(image.payload(), "QUJD");
    ///
    /// let bare = CapturedImage::from_data_uri("QUJD".into());
    /// assert_eq!(bare.payload(), "QUJD");
    /// ```
    #[must_use]
    pub fn payload(&self) -> &str {
        match self.data_uri.split_once(',') {
            Some((scheme, payload)) if scheme.starts_with("data:") => payload,
            _ => &self.data_uri,
        }
    }

    /// Size of the decoded image in bytes, estimated from the payload length.
    #[must_use]
    pub fn approx_len(&self) -> usize {
        self.payload().len() / 4 * 3
    }
}

impl fmt::Debug for CapturedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapturedImage")
            .field("payload_len", &self.payload().len())
            .finish()
    }
}
