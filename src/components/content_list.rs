use leptos::prelude::*;

use crate::models::content::{AgeGroup, Poem, Story, Video, DEFAULT_LIST_LIMIT};

/// Server function to list stories, newest first.
#[server(ListStories, "/api")]
pub async fn list_stories(
    age_group: Option<String>,
    limit: Option<i64>,
) -> Result<Vec<Story>, ServerFnError> {
    let state = expect_context::<crate::app::AppState>();
    let query = crate::api::content::ListParams { age_group, limit }
        .into_query()
        .map_err(|e| e.into_server_error())?;

    state
        .story_repo
        .list(&query)
        .await
        .map_err(|e| e.into_server_error())
}

/// Server function to list code stories, optionally for one programming language.
#[server(ListCodeStories, "/api")]
pub async fn list_code_stories(lang: Option<String>) -> Result<Vec<Story>, ServerFnError> {
    let state = expect_context::<crate::app::AppState>();
    let params = crate::api::content::CodeStoryParams { lang };

    state
        .story_repo
        .list_code_stories(params.language())
        .await
        .map_err(|e| e.into_server_error())
}

/// Server function to list videos, newest first.
#[server(ListVideos, "/api")]
pub async fn list_videos(
    age_group: Option<String>,
    limit: Option<i64>,
) -> Result<Vec<Video>, ServerFnError> {
    let state = expect_context::<crate::app::AppState>();
    let query = crate::api::content::ListParams { age_group, limit }
        .into_query()
        .map_err(|e| e.into_server_error())?;

    state
        .video_repo
        .list(&query)
        .await
        .map_err(|e| e.into_server_error())
}

/// Server function to list poems, newest first.
#[server(ListPoems, "/api")]
pub async fn list_poems(limit: Option<i64>) -> Result<Vec<Poem>, ServerFnError> {
    let state = expect_context::<crate::app::AppState>();
    state
        .poem_repo
        .list(crate::api::content::clamp_limit(limit))
        .await
        .map_err(|e| e.into_server_error())
}

fn age_param(age_group: Option<AgeGroup>) -> Option<String> {
    age_group.map(|group| group.as_str().to_string())
}

/// A titled grid of story cards.
#[component]
pub fn StorySection(
    #[prop(into)] title: String,
    #[prop(optional)] age_group: Option<AgeGroup>,
    #[prop(default = DEFAULT_LIST_LIMIT)] limit: i64,
) -> impl IntoView {
    let stories = Resource::new(
        move || (age_group, limit),
        |(age_group, limit)| list_stories(age_param(age_group), Some(limit)),
    );

    view! {
        <section class="content-section">
            <h2 class="section-title">{title}</h2>
            <Suspense fallback=|| view! { <p class="loading">"Loading stories..."</p> }>
                {move || stories.get().map(|result| match result {
                    Ok(stories) if stories.is_empty() => {
                        view! { <p class="empty">"No stories here yet."</p> }.into_any()
                    }
                    Ok(stories) => view! {
                        <div class="card-grid">
                            {stories.into_iter().map(|story| view! { <StoryCard story=story /> }).collect_view()}
                        </div>
                    }.into_any(),
                    Err(e) => view! {
                        <p class="error">{format!("Error loading stories: {e}")}</p>
                    }.into_any(),
                })}
            </Suspense>
        </section>
    }
}

/// Filter values and labels for the code stories page.
pub const PROGRAMMING_LANGUAGES: [(&str, &str); 10] = [
    ("html", "HTML"),
    ("css", "CSS"),
    ("javascript", "JavaScript"),
    ("python", "Python"),
    ("java", "Java"),
    ("csharp", "C#"),
    ("cpp", "C++"),
    ("typescript", "TypeScript"),
    ("ruby", "Ruby"),
    ("scratch", "Scratch"),
];

/// Code stories, filtered by the `lang` query parameter.
#[component]
pub fn CodeStorySection(#[prop(into)] language: Signal<Option<String>>) -> impl IntoView {
    let stories = Resource::new(move || language.get(), list_code_stories);

    let chip = move |value: Option<&'static str>, label: &'static str| {
        let href = match value {
            Some(value) => format!("/code-stories?lang={value}"),
            None => "/code-stories".to_string(),
        };
        let active = move || {
            language.get().as_deref().map(str::to_lowercase).as_deref() == value
        };
        view! { <a href=href class="chip" class:active=active>{label}</a> }
    };

    view! {
        <section class="content-section">
            <h1 class="section-title">"Code Tutorials"</h1>
            <nav class="chip-row">
                {chip(None, "All Stories")}
                {PROGRAMMING_LANGUAGES
                    .into_iter()
                    .map(|(value, label)| chip(Some(value), label))
                    .collect_view()}
            </nav>
            <Suspense fallback=|| view! { <p class="loading">"Loading code stories..."</p> }>
                {move || stories.get().map(|result| match result {
                    Ok(stories) if stories.is_empty() => {
                        view! { <p class="empty">"No code stories for this language yet."</p> }.into_any()
                    }
                    Ok(stories) => view! {
                        <div class="card-grid">
                            {stories.into_iter().map(|story| view! { <StoryCard story=story /> }).collect_view()}
                        </div>
                    }.into_any(),
                    Err(e) => view! {
                        <p class="error">{format!("Error loading code stories: {e}")}</p>
                    }.into_any(),
                })}
            </Suspense>
        </section>
    }
}

#[component]
fn StoryCard(story: Story) -> impl IntoView {
    let href = format!("/story/{}", story.id);
    let cover = story.cover_image_url.clone();
    let code_language = story.programming_language.clone().filter(|_| story.is_code_story);

    view! {
        <a href=href class="card story-card">
            {cover.map(|src| view! { <img class="card-cover" src=src alt="" /> })}
            <div class="card-body">
                <h3 class="card-title">{story.title}</h3>
                <p class="card-description">{story.description}</p>
                <span class="badge">{format!("Ages {}", story.age_group)}</span>
                {code_language.map(|lang| view! { <span class="badge code-badge">{lang}</span> })}
            </div>
        </a>
    }
}

/// A titled grid of video cards.
#[component]
pub fn VideoSection(
    #[prop(into)] title: String,
    #[prop(optional)] age_group: Option<AgeGroup>,
    #[prop(default = DEFAULT_LIST_LIMIT)] limit: i64,
) -> impl IntoView {
    let videos = Resource::new(
        move || (age_group, limit),
        |(age_group, limit)| list_videos(age_param(age_group), Some(limit)),
    );

    view! {
        <section class="content-section">
            <h2 class="section-title">{title}</h2>
            <Suspense fallback=|| view! { <p class="loading">"Loading videos..."</p> }>
                {move || videos.get().map(|result| match result {
                    Ok(videos) if videos.is_empty() => {
                        view! { <p class="empty">"No videos here yet."</p> }.into_any()
                    }
                    Ok(videos) => view! {
                        <div class="card-grid">
                            {videos.into_iter().map(|video| view! { <VideoCard video=video /> }).collect_view()}
                        </div>
                    }.into_any(),
                    Err(e) => view! {
                        <p class="error">{format!("Error loading videos: {e}")}</p>
                    }.into_any(),
                })}
            </Suspense>
        </section>
    }
}

#[component]
fn VideoCard(video: Video) -> impl IntoView {
    let href = format!("/video/{}", video.id);

    view! {
        <a href=href class="card video-card">
            {video.thumbnail_url.map(|src| view! { <img class="card-cover" src=src alt="" /> })}
            <div class="card-body">
                <h3 class="card-title">{video.title}</h3>
                <p class="card-description">{video.description}</p>
            </div>
        </a>
    }
}

/// The list of poems.
#[component]
pub fn PoemList(#[prop(default = DEFAULT_LIST_LIMIT)] limit: i64) -> impl IntoView {
    let poems = Resource::new(move || limit, |limit| list_poems(Some(limit)));

    view! {
        <Suspense fallback=|| view! { <p class="loading">"Loading poems..."</p> }>
            {move || poems.get().map(|result| match result {
                Ok(poems) if poems.is_empty() => {
                    view! { <p class="empty">"No poems yet."</p> }.into_any()
                }
                Ok(poems) => view! {
                    <ul class="poem-list">
                        {poems.into_iter().map(|poem| view! {
                            <li>
                                <a href=format!("/poem/{}", poem.id)>{poem.title}</a>
                                <p class="card-description">{poem.description}</p>
                            </li>
                        }).collect_view()}
                    </ul>
                }.into_any(),
                Err(e) => view! {
                    <p class="error">{format!("Error loading poems: {e}")}</p>
                }.into_any(),
            })}
        </Suspense>
    }
}
