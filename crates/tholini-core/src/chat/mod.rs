//! Chat assistant client.
//!
//! One submission is one multipart POST carrying an optional `message` text
//! field and an optional `image` file field. There is no retry and no
//! de-duplication; concurrent submissions are independent requests.

use std::path::Path;
use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ChatError;
use crate::storage::ChatConfig;

/// File name the image part is always uploaded under.
pub const IMAGE_FILE_NAME: &str = "image.jpg";

/// Image bytes to upload alongside (or instead of) a message.
#[derive(Debug, Clone)]
pub struct ImageAttachment {
    pub bytes: Vec<u8>,
    pub mime: String,
}

impl ImageAttachment {
    pub fn new(bytes: Vec<u8>, mime: impl Into<String>) -> Self {
        Self { bytes, mime: mime.into() }
    }

    /// Read an image file, guessing its MIME type from the extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let mime = match ext.as_deref() {
            Some("png") => "image/png",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            _ => "image/jpeg",
        };
        Ok(Self::new(bytes, mime))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    pub message: Option<String>,
    pub image: Option<ImageAttachment>,
}

impl ChatRequest {
    /// Build a request; an empty message counts as no message.
    pub fn new(message: Option<String>, image: Option<ImageAttachment>) -> Self {
        Self {
            message: message.filter(|m| !m.is_empty()),
            image,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.message.is_none() && self.image.is_none()
    }
}

/// Successful assistant answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatReply {
    pub response: String,
    /// Server-side path of the uploaded image, when the service reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseBody {
    status: String,
    #[serde(default)]
    response: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "imagePath")]
    image_path: Option<String>,
}

pub struct ChatClient {
    http: Client,
    endpoint: Url,
}

impl ChatClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ChatError> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| ChatError::InvalidRequest(format!("bad endpoint '{endpoint}': {e}")))?;
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { http, endpoint })
    }

    pub fn from_config(config: &ChatConfig) -> Result<Self, ChatError> {
        Self::new(&config.endpoint, Duration::from_secs(config.timeout_secs))
    }

    /// Submit one message and/or image.
    ///
    /// # Errors
    /// [`ChatError::EmptyRequest`] before any network traffic when there is
    /// nothing to send; otherwise transport, HTTP status, decoding, or
    /// service-reported failures.
    pub async fn send(&self, request: ChatRequest) -> Result<ChatReply, ChatError> {
        if request.is_empty() {
            return Err(ChatError::EmptyRequest);
        }

        let mut form = Form::new();
        if let Some(message) = request.message {
            form = form.text("message", message);
        }
        if let Some(image) = request.image {
            let part = Part::bytes(image.bytes)
                .file_name(IMAGE_FILE_NAME)
                .mime_str(&image.mime)
                .map_err(|e| ChatError::InvalidRequest(e.to_string()))?;
            form = form.part("image", part);
        }

        tracing::debug!(endpoint = %self.endpoint, "sending chat request");
        let resp = self
            .http
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(ChatError::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        parse_reply(&text)
    }
}

fn parse_reply(text: &str) -> Result<ChatReply, ChatError> {
    let body: ChatResponseBody =
        serde_json::from_str(text).map_err(|e| ChatError::InvalidResponse(e.to_string()))?;

    if body.status != "success" {
        return Err(ChatError::Rejected(
            body.message.unwrap_or_else(|| "An error occurred".to_string()),
        ));
    }

    let response = body
        .response
        .ok_or_else(|| ChatError::InvalidResponse("success without a response field".into()))?;
    Ok(ChatReply {
        response,
        image_path: body.image_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_success_with_image_path() {
        let raw = r#"{"status":"success","response":"Hi","imagePath":"uploads/a.jpg"}"#;
        let reply = parse_reply(raw).unwrap();
        assert_eq!(reply.response, "Hi");
        assert_eq!(reply.image_path.as_deref(), Some("uploads/a.jpg"));
    }

    #[test]
    fn parse_error_uses_message_or_fallback() {
        let err = parse_reply(r#"{"status":"error","message":"Model offline"}"#).unwrap_err();
        assert_eq!(err.to_string(), "Model offline");

        let err = parse_reply(r#"{"status":"error"}"#).unwrap_err();
        assert_eq!(err.to_string(), "An error occurred");
    }

    #[test]
    fn parse_rejects_non_json() {
        assert!(matches!(parse_reply("<html>"), Err(ChatError::InvalidResponse(_))));
    }

    #[test]
    fn empty_message_is_dropped() {
        assert!(ChatRequest::new(Some(String::new()), None).is_empty());
        assert!(!ChatRequest::new(Some("hello".into()), None).is_empty());
    }

    #[test]
    fn mime_guessed_from_extension() {
        let dir = tempfile::TempDir::new().unwrap();
        let png = dir.path().join("face.PNG");
        std::fs::write(&png, b"png").unwrap();
        assert_eq!(ImageAttachment::from_path(&png).unwrap().mime, "image/png");

        let other = dir.path().join("face.heic");
        std::fs::write(&other, b"heic").unwrap();
        assert_eq!(ImageAttachment::from_path(&other).unwrap().mime, "image/jpeg");
    }

    #[test]
    fn rejects_bad_endpoint() {
        assert!(matches!(
            ChatClient::new("not a url", Duration::from_secs(1)),
            Err(ChatError::InvalidRequest(_))
        ));
    }
}
