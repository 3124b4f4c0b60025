use std::path::Path;

use tracing::info;

use crate::error::ScheduleError;
use crate::images::{ImageBlob, SPONSOR_IMAGE_SIZE, load_sponsor_images};

/// A page that accepts a text post and images attached to it.
pub trait Publisher {
    /// Publish `body` and return the new post's id.
    fn publish_text(&self, body: &str) -> Result<String, ScheduleError>;

    fn attach_images(&self, post_id: &str, images: &[ImageBlob]) -> Result<(), ScheduleError>;
}

/// Publish the composed body, then attach every sponsor image found in `sponsor_dir`.
pub fn publish_schedule<P: Publisher + ?Sized>(publisher: &P, body: &str, sponsor_dir: &Path) -> Result<String, ScheduleError> {
    let post_id = publisher.publish_text(body)?;
    info!(post_id = %post_id, "Schedule published");

    let images = load_sponsor_images(sponsor_dir, SPONSOR_IMAGE_SIZE);
    if images.is_empty() {
        info!("No sponsor images to attach");
        return Ok(post_id);
    }
    publisher.attach_images(&post_id, &images)?;
    info!(post_id = %post_id, count = images.len(), "Sponsor images attached");
    Ok(post_id)
}
