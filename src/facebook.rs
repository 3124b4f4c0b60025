use serde::Deserialize;
use tracing::{error, info, info_span, warn};

use crate::config::FacebookConfig;
use crate::error::ScheduleError;
use crate::images::ImageBlob;
use crate::publish::Publisher;

const MULTIPART_BOUNDARY: &str = "titans-schedule-upload-7d1f0c";

#[derive(Debug, Deserialize)]
struct GraphId {
    id: String,
}

/// Graph API client for one Facebook page.
#[derive(Debug, Clone)]
pub struct Facebook {
    config: FacebookConfig,
}

impl Facebook {
    /// Create a client posting to the configured page.
    pub fn new(config: FacebookConfig) -> Self {
        Self { config }
    }

    pub fn feed_url(&self) -> String {
        format!("{}/{}/feed", self.config.graph_url, self.config.page_id)
    }

    pub fn photos_url(&self) -> String {
        format!("{}/{}/photos", self.config.graph_url, self.config.page_id)
    }

    pub fn post_url(&self, post_id: &str) -> String {
        format!("{}/{}", self.config.graph_url, post_id)
    }

    /// Upload one image as an unpublished photo and return its media id.
    fn upload_photo(&self, image: &ImageBlob) -> Result<String, ScheduleError> {
        let body = multipart_body(
            &[("access_token", self.config.access_token.as_str()), ("published", "false")],
            ("source", image.file_name.as_str(), "image/png", image.bytes.as_slice()),
        );
        let response = {
            let _span = info_span!("facebook_photo_upload", file = %image.file_name).entered();
            ureq::post(&self.photos_url())
                .header("Content-Type", format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"))
                .send(&body[..])?
        };
        let mut body_reader = response.into_body();
        let photo: GraphId = body_reader.read_json()?;
        Ok(photo.id)
    }
}

impl Publisher for Facebook {
    fn publish_text(&self, body: &str) -> Result<String, ScheduleError> {
        let result = {
            let _span = info_span!("facebook_feed_post", bytes = body.len()).entered();
            ureq::post(&self.feed_url()).send_form([
                ("message", body),
                ("access_token", self.config.access_token.as_str()),
                ("published", "true"),
            ])
        };
        match result {
            Ok(response) => {
                info!(status = response.status().as_u16(), "Posted message to Facebook page");
                let mut body_reader = response.into_body();
                let post: GraphId = body_reader.read_json()?;
                Ok(post.id)
            }
            Err(e) => {
                error!(error = %e, "Failed to post to Facebook page");
                Err(e.into())
            }
        }
    }

    fn attach_images(&self, post_id: &str, images: &[ImageBlob]) -> Result<(), ScheduleError> {
        let mut media_ids = Vec::with_capacity(images.len());
        for image in images {
            match self.upload_photo(image) {
                Ok(id) => media_ids.push(id),
                Err(e) => warn!(file = %image.file_name, error = %e, "Photo upload failed; skipping"),
            }
        }
        if media_ids.is_empty() {
            return Err(ScheduleError::Publish(format!("none of {} images could be uploaded", images.len())));
        }

        let attached_media: Vec<serde_json::Value> = media_ids
            .iter()
            .map(|id| serde_json::json!({ "media_fbid": id }))
            .collect();
        let payload = serde_json::json!({
            "attached_media": attached_media,
            "access_token": self.config.access_token,
        });
        match ureq::post(&self.post_url(post_id)).send_json(payload) {
            Ok(response) => {
                info!(status = response.status().as_u16(), count = media_ids.len(), "Attached images to post");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, post_id = %post_id, "Failed to attach images");
                Err(e.into())
            }
        }
    }
}

/// A multipart/form-data body with plain text fields followed by one file part.
pub fn multipart_body(fields: &[(&str, &str)], file: (&str, &str, &str, &[u8])) -> Vec<u8> {
    let (field, file_name, content_type, bytes) = file;
    let mut body = Vec::with_capacity(bytes.len() + 512);
    for (name, value) in fields {
        body.extend_from_slice(
            format!("--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n").as_bytes(),
        );
    }
    body.extend_from_slice(
        format!(
            "--{MULTIPART_BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{MULTIPART_BOUNDARY}--\r\n").as_bytes());
    body
}
