use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::models::search::{MatchResult, SearchOutcome};
use crate::search::ranking::{group_by_type, ResultSection};
use crate::search::sequence::SearchSequencer;

/// Server function running a search across all collections.
#[server(SearchContent, "/api")]
pub async fn search_content(query: String) -> Result<SearchOutcome, ServerFnError> {
    let state = expect_context::<crate::app::AppState>();
    crate::api::search::process_search(&state, &query)
        .await
        .map_err(|e| e.into_server_error())
}

/// What the result panel shows.
#[derive(Debug, Clone, PartialEq)]
enum SearchPanel {
    Closed,
    Searching,
    Done(SearchOutcome),
}

/// Header search box with the grouped result dropdown.
#[component]
pub fn SearchBar() -> impl IntoView {
    let (query, set_query) = signal(String::new());
    let (panel, set_panel) = signal(SearchPanel::Closed);
    let sequencer = SearchSequencer::new();

    let on_submit = {
        let sequencer = sequencer.clone();
        move |ev: SubmitEvent| {
            ev.prevent_default();

            let raw = query.get_untracked();
            if raw.trim().is_empty() {
                return;
            }

            let ticket = sequencer.begin();
            set_panel.set(SearchPanel::Searching);

            let sequencer = sequencer.clone();
            leptos::task::spawn_local(async move {
                let outcome = search_content(raw).await.unwrap_or_else(|e| {
                    leptos::logging::error!("Search request failed: {e}");
                    SearchOutcome::failed()
                });

                // A newer submission, a clear or a close supersedes this one.
                if sequencer.is_current(ticket) {
                    set_panel.set(SearchPanel::Done(outcome));
                }
            });
        }
    };

    let close = move || {
        sequencer.invalidate();
        set_panel.set(SearchPanel::Closed);
    };
    let close = StoredValue::new(close);

    view! {
        <div class="search-container">
            <form class="search-form" on:submit=on_submit>
                <input
                    type="search"
                    placeholder="Search stories, videos, poems..."
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        if value.is_empty() {
                            close.with_value(|close| close());
                        }
                        set_query.set(value);
                    }
                    prop:value=query
                />
                <button type="submit">"Search"</button>
            </form>
            {move || match panel.get() {
                SearchPanel::Closed => None,
                SearchPanel::Searching => Some(view! {
                    <div class="search-results">
                        <p class="loading">"Searching..."</p>
                    </div>
                }.into_any()),
                SearchPanel::Done(outcome) => Some(view! {
                    <div class="search-results">
                        <button class="search-close" on:click=move |_| close.with_value(|close| close())>
                            "Close"
                        </button>
                        <SearchResults outcome=outcome />
                    </div>
                }.into_any()),
            }}
        </div>
    }
}

#[component]
fn SearchResults(outcome: SearchOutcome) -> impl IntoView {
    match outcome {
        SearchOutcome::Failed { message } => {
            view! { <p class="error">{message}</p> }.into_any()
        }
        SearchOutcome::Matches { results } if results.is_empty() => {
            view! { <p class="empty">"No results found."</p> }.into_any()
        }
        SearchOutcome::Matches { results } => {
            let sections = group_by_type(results);
            view! {
                <div class="search-sections">
                    {sections.into_iter().map(|section| view! { <ResultGroup section=section /> }).collect_view()}
                </div>
            }.into_any()
        }
    }
}

#[component]
fn ResultGroup(section: ResultSection) -> impl IntoView {
    let title = section.title();

    view! {
        <section class="search-section">
            <h3>{title}</h3>
            <ul>
                {section.results.into_iter().map(|result| view! { <ResultEntry result=result /> }).collect_view()}
            </ul>
        </section>
    }
}

#[component]
fn ResultEntry(result: MatchResult) -> impl IntoView {
    let href = result.detail_path();
    let label = result.match_field.label();
    let image = result.item.image_url().map(str::to_string);
    let title = result.item.title().to_string();
    let age_group = result.item.age_group().to_string();

    view! {
        <li class="search-result">
            <a href=href>
                {image.map(|src| view! { <img class="search-thumb" src=src alt="" /> })}
                <span class="search-title">{title}</span>
            </a>
            <span class="match-label">{label}</span>
            {(!age_group.is_empty()).then(|| view! {
                <span class="badge">{format!("Ages {age_group}")}</span>
            })}
        </li>
    }
}
