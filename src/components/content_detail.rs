use leptos::prelude::*;

use crate::models::content::{AgeGroup, Poem, Story, Video, DEFAULT_LANGUAGE};
use crate::rendering::markdown::render_markdown;
use crate::rendering::video::video_embed_url;

#[server(GetStory, "/api")]
pub async fn get_story(id: String) -> Result<Story, ServerFnError> {
    let state = expect_context::<crate::app::AppState>();
    crate::api::content::fetch_story(state.story_repo.as_ref(), &id)
        .await
        .map_err(|e| e.into_server_error())
}

#[server(GetVideo, "/api")]
pub async fn get_video(id: String) -> Result<Video, ServerFnError> {
    let state = expect_context::<crate::app::AppState>();
    crate::api::content::fetch_video(state.video_repo.as_ref(), &id)
        .await
        .map_err(|e| e.into_server_error())
}

#[server(GetPoem, "/api")]
pub async fn get_poem(id: String) -> Result<Poem, ServerFnError> {
    let state = expect_context::<crate::app::AppState>();
    crate::api::content::fetch_poem(state.poem_repo.as_ref(), &id)
        .await
        .map_err(|e| e.into_server_error())
}

fn age_label(age_group: &str) -> String {
    match AgeGroup::parse(age_group) {
        Some(group) => format!("{} ({} years)", group.audience(), group),
        None if age_group.is_empty() => "All ages".to_string(),
        None => age_group.to_string(),
    }
}

/// Full story page: cover, metadata and the Markdown body, readable in any
/// translated language.
#[component]
pub fn StoryView(#[prop(into)] id: Signal<String>) -> impl IntoView {
    let story = Resource::new(move || id.get(), get_story);
    let language = RwSignal::new(DEFAULT_LANGUAGE.to_string());

    view! {
        <Suspense fallback=|| view! { <p class="loading">"Loading story..."</p> }>
            {move || story.get().map(|result| match result {
                Ok(story) => {
                    let languages = story.languages();
                    let cover = story.cover_image_url.clone();
                    let cover_alt = story.title.clone();
                    let age = age_label(&story.age_group);
                    let code_language = story.programming_language.clone();
                    let text = Memo::new(move |_| story.localized(&language.get()));

                    view! {
                        <article class="story-detail">
                            <div class="story-toolbar">
                                <a href="/stories" class="back-link">"Back to stories"</a>
                                <select
                                    class="language-select"
                                    on:change=move |ev| language.set(event_target_value(&ev))
                                >
                                    {languages.into_iter().map(|lang| {
                                        let selected = lang == language.get_untracked();
                                        view! { <option value=lang.clone() selected=selected>{lang.clone()}</option> }
                                    }).collect_view()}
                                </select>
                            </div>
                            {move || (!text.get().translated).then(|| view! {
                                <p class="notice">
                                    "This story is not available in the selected language yet. Showing English."
                                </p>
                            })}
                            {cover.map(|src| view! {
                                <img class="story-cover" src=src alt=cover_alt />
                            })}
                            <h1>{move || text.get().title}</h1>
                            <p class="badge">{age}</p>
                            {code_language.map(|lang| view! { <p class="badge code-badge">{lang}</p> })}
                            <p class="lead">{move || text.get().description}</p>
                            {move || {
                                let body = render_markdown(&text.get().content);
                                view! { <div class="story-content" inner_html=body></div> }
                            }}
                        </article>
                    }.into_any()
                }
                Err(e) => view! { <p class="error">{e.to_string()}</p> }.into_any(),
            })}
        </Suspense>
    }
}

/// Video page with an embedded player.
#[component]
pub fn VideoView(#[prop(into)] id: Signal<String>) -> impl IntoView {
    let video = Resource::new(move || id.get(), get_video);

    view! {
        <Suspense fallback=|| view! { <p class="loading">"Loading video..."</p> }>
            {move || video.get().map(|result| match result {
                Ok(video) => {
                    let player = match video_embed_url(&video.video_url) {
                        Some(embed) => view! {
                            <div class="video-frame">
                                <iframe
                                    src=embed
                                    title=video.title.clone()
                                    allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture"
                                    allowfullscreen=true
                                ></iframe>
                            </div>
                        }.into_any(),
                        None => view! {
                            <p class="error">"This video can't be played."</p>
                        }.into_any(),
                    };
                    view! {
                        <article class="video-detail">
                            <a href="/videos" class="back-link">"Back to videos"</a>
                            <h1>{video.title}</h1>
                            {player}
                            <p class="badge">{age_label(&video.age_group)}</p>
                            <p>{video.description}</p>
                        </article>
                    }.into_any()
                }
                Err(e) => view! { <p class="error">{e.to_string()}</p> }.into_any(),
            })}
        </Suspense>
    }
}

#[component]
pub fn PoemView(#[prop(into)] id: Signal<String>) -> impl IntoView {
    let poem = Resource::new(move || id.get(), get_poem);

    view! {
        <Suspense fallback=|| view! { <p class="loading">"Loading poem..."</p> }>
            {move || poem.get().map(|result| match result {
                Ok(poem) => {
                    let body = render_markdown(&poem.content);
                    view! {
                        <article class="poem-detail">
                            <a href="/poems" class="back-link">"Back to poems"</a>
                            <h1>{poem.title}</h1>
                            <p class="lead">{poem.description}</p>
                            <div class="poem-content" inner_html=body></div>
                        </article>
                    }.into_any()
                }
                Err(e) => view! { <p class="error">{e.to_string()}</p> }.into_any(),
            })}
        </Suspense>
    }
}
