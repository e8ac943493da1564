pub mod app;
pub mod error;
pub mod models {
    pub mod content;
    pub mod search;
}
pub mod search {
    pub mod fanout;
    pub mod matching;
    pub mod ranking;
    pub mod sequence;
}
pub mod db {
    #[cfg(feature = "ssr")]
    pub mod models;
    pub mod poem_repository;
    pub mod story_repository;
    pub mod video_repository;
}
pub mod storage {
    pub mod client;
}
pub mod rendering {
    pub mod markdown;
    pub mod video;
}
pub mod components {
    pub mod admin_form;
    pub mod content_detail;
    pub mod content_list;
    pub mod search_bar;
}
#[cfg(feature = "ssr")]
pub mod auth;
#[cfg(feature = "ssr")]
pub mod config;
#[cfg(feature = "ssr")]
pub mod api {
    pub mod admin;
    pub mod content;
    pub mod errors;
    pub mod routes;
    pub mod search;
    pub mod upload;
}

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(app::App);
}
