use leptos::prelude::*;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::components::*;
use leptos_router::hooks::{use_params_map, use_query_map};
use leptos_router::path;

use crate::components::admin_form::AdminDashboard;
use crate::components::content_detail::{PoemView, StoryView, VideoView};
use crate::components::content_list::{CodeStorySection, PoemList, StorySection, VideoSection};
use crate::components::search_bar::SearchBar;
use crate::models::content::AgeGroup;

/// Shared server state, provided to Axum handlers and to server functions
/// through Leptos context.
#[cfg(feature = "ssr")]
#[derive(Clone)]
pub struct AppState {
    pub story_repo: std::sync::Arc<dyn crate::db::story_repository::StoryRepository>,
    pub video_repo: std::sync::Arc<dyn crate::db::video_repository::VideoRepository>,
    pub poem_repo: std::sync::Arc<dyn crate::db::poem_repository::PoemRepository>,
    pub storage_client: std::sync::Arc<dyn crate::storage::client::StorageClient>,
    pub admin_auth: std::sync::Arc<crate::auth::admin::AdminAuth>,
    pub leptos_options: LeptosOptions,
}

#[cfg(feature = "ssr")]
impl axum::extract::FromRef<AppState> for LeptosOptions {
    fn from_ref(state: &AppState) -> Self {
        state.leptos_options.clone()
    }
}

/// HTML document wrapping the app for server rendering.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone() />
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/kidzone.css"/>
        <Title text="KidZone - Stories, Videos and Poems for Kids"/>

        <Router>
            <nav class="top-nav">
                <a href="/" class="logo">"KidZone"</a>
                <a href="/popular">"Popular"</a>
                <a href="/stories">"Stories"</a>
                <a href="/code-stories">"Code Stories"</a>
                <a href="/videos">"Videos"</a>
                <a href="/poems">"Poems"</a>
                <SearchBar />
            </nav>
            <main>
                <Routes fallback=|| view! { <p>"Page not found."</p> }.into_view()>
                    <Route path=path!("/") view=HomePage/>
                    <Route path=path!("/popular") view=PopularPage/>
                    <Route path=path!("/stories") view=StoriesPage/>
                    <Route path=path!("/stories/:age_group") view=StoriesPage/>
                    <Route path=path!("/story/:id") view=StoryPage/>
                    <Route path=path!("/code-stories") view=CodeStoriesPage/>
                    <Route path=path!("/videos") view=VideosPage/>
                    <Route path=path!("/video/:id") view=VideoPage/>
                    <Route path=path!("/poems") view=PoemsPage/>
                    <Route path=path!("/poem/:id") view=PoemPage/>
                    <Route path=path!("/admin-dashboard") view=AdminDashboard/>
                </Routes>
            </main>
        </Router>
    }
}

#[component]
fn HomePage() -> impl IntoView {
    view! {
        <header class="hero">
            <h1>"Welcome to KidZone"</h1>
            <p>"Stories, videos and poems for curious young minds."</p>
        </header>
        <StorySection title="Stories for Toddlers" age_group=AgeGroup::Toddlers limit=4 />
        <StorySection title="Stories for Preschoolers" age_group=AgeGroup::Preschoolers limit=4 />
        <VideoSection title="Featured Videos" limit=4 />
    }
}

#[component]
fn PopularPage() -> impl IntoView {
    view! { <StorySection title="Popular Stories" /> }
}

/// All four age sections, or a single one when the route names an age group.
#[component]
fn StoriesPage() -> impl IntoView {
    let params = use_params_map();
    let age_param = Memo::new(move |_| params.get().get("age_group"));

    move || match age_param.get() {
        None => AgeGroup::ALL
            .into_iter()
            .map(|group| view! {
                <StorySection title=format!("{} ({} years)", group.audience(), group) age_group=group />
            })
            .collect_view()
            .into_any(),
        Some(raw) => match AgeGroup::parse(&raw) {
            Some(group) => view! {
                <StorySection title=format!("Stories for {}", group.audience()) age_group=group />
            }
            .into_any(),
            None => view! { <p class="error">{format!("Unknown age group '{raw}'")}</p> }.into_any(),
        },
    }
}

/// Code tutorials, optionally narrowed with `?lang=`.
#[component]
fn CodeStoriesPage() -> impl IntoView {
    let query = use_query_map();
    let language = Signal::derive(move || query.get().get("lang"));

    view! { <CodeStorySection language=language /> }
}

#[component]
fn VideosPage() -> impl IntoView {
    AgeGroup::ALL
        .into_iter()
        .map(|group| view! {
            <VideoSection title=format!("Videos for {}", group.audience()) age_group=group />
        })
        .collect_view()
}

#[component]
fn PoemsPage() -> impl IntoView {
    view! {
        <h1>"Poems"</h1>
        <PoemList />
    }
}

fn id_param() -> Signal<String> {
    let params = use_params_map();
    Signal::derive(move || params.get().get("id").unwrap_or_default())
}

#[component]
fn StoryPage() -> impl IntoView {
    view! { <StoryView id=id_param() /> }
}

#[component]
fn VideoPage() -> impl IntoView {
    view! { <VideoView id=id_param() /> }
}

#[component]
fn PoemPage() -> impl IntoView {
    view! { <PoemView id=id_param() /> }
}
