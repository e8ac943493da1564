use crate::error::AppError;
use crate::storage::client::StorageClient;

/// Storage prefix for story cover images.
pub const COVER_PREFIX: &str = "story-covers/";

/// Public route under which stored covers are served.
pub const IMAGE_ROUTE: &str = "/api/v1/image/";

/// Cover content types accepted from the admin form. SVG is excluded since
/// it can carry script and covers are served from the site's own origin.
pub const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/png", "image/jpeg", "image/gif", "image/webp"];

/// An image file received from the admin form.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Replace anything but alphanumerics, `.` and `-` with `_`.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect()
}

/// Storage key and public URL for a cover uploaded at `timestamp_millis`.
pub fn cover_location(file_name: &str, timestamp_millis: i64) -> (String, String) {
    let object_name = format!("{}-{}", timestamp_millis, sanitize_file_name(file_name));
    (
        format!("{COVER_PREFIX}{object_name}"),
        format!("{IMAGE_ROUTE}{object_name}"),
    )
}

/// Infer an image content type from the file extension.
pub fn content_type_for(file_name: &str) -> &'static str {
    let lower = file_name.to_lowercase();
    if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        "image/jpeg"
    } else if lower.ends_with(".gif") {
        "image/gif"
    } else if lower.ends_with(".webp") {
        "image/webp"
    } else {
        "application/octet-stream"
    }
}

/// Store a cover image and return its public URL.
///
/// Only PNG, JPEG, GIF and WebP uploads are accepted, and the file name
/// must carry a matching extension.
pub async fn store_cover_image(
    storage: &dyn StorageClient,
    image: UploadedImage,
) -> Result<String, AppError> {
    let content_type = image.content_type.trim().to_ascii_lowercase();
    if !ALLOWED_IMAGE_TYPES.contains(&content_type.as_str()) {
        return Err(AppError::BadRequest("Only image files are allowed".into()));
    }
    if content_type_for(&image.file_name) != content_type {
        return Err(AppError::BadRequest(
            "Image file name does not match its type".into(),
        ));
    }

    let (key, url) = cover_location(&image.file_name, chrono::Utc::now().timestamp_millis());

    storage.put_object(&key, image.data, &content_type).await?;

    tracing::info!("Stored cover image at '{}'", key);
    Ok(url)
}

/// Axum handler for `GET /api/v1/image/{filename}`.
///
/// Serves a cover image from S3 storage. Browsers are told not to sniff the
/// body and not to run anything in it.
pub async fn serve_image_handler(
    axum::extract::State(state): axum::extract::State<crate::app::AppState>,
    axum::extract::Path(filename): axum::extract::Path<String>,
) -> Result<axum::response::Response, AppError> {
    use axum::response::IntoResponse;

    let key = format!("{COVER_PREFIX}{}", sanitize_file_name(&filename));

    let data = state
        .storage_client
        .get_object(&key)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".into()))?;

    Ok((
        [
            (axum::http::header::CONTENT_TYPE, content_type_for(&filename)),
            (axum::http::header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
            (
                axum::http::header::CONTENT_SECURITY_POLICY,
                "default-src 'none'; sandbox",
            ),
        ],
        data,
    )
        .into_response())
}
