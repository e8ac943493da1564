use axum::extract::Multipart;
use axum_extra::extract::CookieJar;

use crate::api::upload::{store_cover_image, UploadedImage};
use crate::db::story_repository::StoryRepository;
use crate::error::AppError;
use crate::models::content::{AgeGroup, NewStory, StoryCreated};
use crate::storage::client::StorageClient;

/// Raw fields of the admin "add story" form.
#[derive(Debug, Default)]
pub struct NewStoryForm {
    pub title: String,
    pub description: String,
    pub age_group: String,
    pub content: String,
    pub cover_image: Option<UploadedImage>,
}

impl NewStoryForm {
    /// Read the multipart body. An empty file part counts as no cover.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Multipart error: {e}")))?
        {
            let name = field.name().unwrap_or("").to_string();

            if name == "cover_image" {
                let file_name = field.file_name().unwrap_or("cover.bin").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Failed to read file: {e}")))?;

                if !data.is_empty() {
                    form.cover_image = Some(UploadedImage {
                        file_name,
                        content_type,
                        data: data.to_vec(),
                    });
                }
                continue;
            }

            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read field '{name}': {e}")))?;

            match name.as_str() {
                "title" => form.title = value,
                "description" => form.description = value,
                "age_group" => form.age_group = value,
                "content" => form.content = value,
                _ => {}
            }
        }

        Ok(form)
    }
}

/// Validate a submitted story, upload its cover and insert it.
pub async fn process_new_story(
    repo: &dyn StoryRepository,
    storage: &dyn StorageClient,
    form: NewStoryForm,
) -> Result<StoryCreated, AppError> {
    let required = [&form.title, &form.description, &form.age_group, &form.content];
    if required.iter().any(|v| v.trim().is_empty()) {
        return Err(AppError::BadRequest("Please fill all required fields".into()));
    }

    let age_group = AgeGroup::parse(&form.age_group)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown age group '{}'", form.age_group)))?;

    let cover_image_url = match form.cover_image {
        Some(image) => Some(store_cover_image(storage, image).await?),
        None => None,
    };

    let story = NewStory {
        title: form.title.trim().to_string(),
        description: form.description.trim().to_string(),
        age_group,
        content: form.content,
        cover_image_url: cover_image_url.clone(),
    };

    let id = repo.insert(story).await?;
    tracing::info!("Admin added story '{}' for ages {}", id, age_group);

    Ok(StoryCreated {
        message: "Story added successfully!".to_string(),
        id,
        cover_image_url,
    })
}

/// Axum handler for `POST /api/v1/admin/stories`.
pub async fn create_story_handler(
    axum::extract::State(state): axum::extract::State<crate::app::AppState>,
    jar: CookieJar,
    multipart: Multipart,
) -> Result<axum::Json<StoryCreated>, AppError> {
    state.admin_auth.require(&jar)?;

    let form = NewStoryForm::from_multipart(multipart).await?;
    let created =
        process_new_story(state.story_repo.as_ref(), state.storage_client.as_ref(), form).await?;

    Ok(axum::Json(created))
}
