use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use crate::models::content::AgeGroup;

/// Whether the caller holds a live admin session.
#[server(IsAdmin, "/api")]
pub async fn is_admin() -> Result<bool, ServerFnError> {
    let state = expect_context::<crate::app::AppState>();
    let jar: axum_extra::extract::CookieJar = leptos_axum::extract().await?;
    Ok(state.admin_auth.has_session(&jar))
}

#[server(AdminLogin, "/api")]
pub async fn admin_login(password: String) -> Result<(), ServerFnError> {
    use axum::http::{header, HeaderValue};

    let state = expect_context::<crate::app::AppState>();
    let token = state.admin_auth.login(&password).map_err(|e| {
        tracing::warn!("Rejected admin login attempt");
        e.into_server_error()
    })?;

    let cookie = crate::auth::admin::session_cookie(token).to_string();
    let response = expect_context::<leptos_axum::ResponseOptions>();
    response.insert_header(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie).map_err(|e| ServerFnError::new(e.to_string()))?,
    );

    tracing::info!("Admin logged in");
    Ok(())
}

#[server(AdminLogout, "/api")]
pub async fn admin_logout() -> Result<(), ServerFnError> {
    use axum::http::{header, HeaderValue};
    use axum_extra::extract::cookie::Cookie;
    use crate::auth::admin::SESSION_COOKIE;

    let state = expect_context::<crate::app::AppState>();
    let jar: axum_extra::extract::CookieJar = leptos_axum::extract().await?;
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.admin_auth.logout(cookie.value());
    }

    let removal = Cookie::build((SESSION_COOKIE, "")).path("/").removal().build();
    let response = expect_context::<leptos_axum::ResponseOptions>();
    response.insert_header(
        header::SET_COOKIE,
        HeaderValue::from_str(&removal.to_string())
            .map_err(|e| ServerFnError::new(e.to_string()))?,
    );
    Ok(())
}

/// Admin dashboard: login form, or the story form once logged in.
#[component]
pub fn AdminDashboard() -> impl IntoView {
    let login = ServerAction::<AdminLogin>::new();
    let logout = ServerAction::<AdminLogout>::new();
    let status = Resource::new(
        move || (login.version().get(), logout.version().get()),
        |_| is_admin(),
    );

    view! {
        <div class="admin-dashboard">
            <h1>"Admin Dashboard"</h1>
            <Suspense fallback=|| view! { <p class="loading">"Checking session..."</p> }>
                {move || status.get().map(|result| match result {
                    Ok(true) => view! {
                        <ActionForm action=logout>
                            <button type="submit" class="btn">"Log out"</button>
                        </ActionForm>
                        <NewStoryForm />
                    }.into_any(),
                    Ok(false) => view! { <LoginForm action=login /> }.into_any(),
                    Err(e) => view! { <p class="error">{e.to_string()}</p> }.into_any(),
                })}
            </Suspense>
        </div>
    }
}

#[component]
fn LoginForm(action: ServerAction<AdminLogin>) -> impl IntoView {
    let error = move || match action.value().get() {
        Some(Err(e)) => Some(e.to_string()),
        _ => None,
    };

    view! {
        <ActionForm action=action attr:class="login-form">
            <label>
                "Password"
                <input type="password" name="password" required=true />
            </label>
            <button type="submit" class="btn">"Log in"</button>
        </ActionForm>
        {move || error().map(|msg| view! { <p class="error">{msg}</p> })}
    }
}

#[component]
fn NewStoryForm() -> impl IntoView {
    let (status, set_status) = signal(None::<Result<String, String>>);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();

        #[cfg(feature = "hydrate")]
        {
            use wasm_bindgen::JsCast;

            let Some(form) = ev
                .target()
                .and_then(|target| target.dyn_into::<web_sys::HtmlFormElement>().ok())
            else {
                return;
            };
            let Ok(data) = web_sys::FormData::new_with_form(&form) else {
                return;
            };

            leptos::task::spawn_local(async move {
                let result = submit_story(data).await;
                if result.is_ok() {
                    form.reset();
                }
                set_status.set(Some(result));
            });
        }

        #[cfg(not(feature = "hydrate"))]
        set_status.set(None);
    };

    view! {
        <form class="story-form" on:submit=on_submit>
            <h2>"Add a Story"</h2>
            <label>"Title" <input type="text" name="title" required=true /></label>
            <label>"Description" <textarea name="description" required=true></textarea></label>
            <label>
                "Age group"
                <select name="age_group" required=true>
                    {AgeGroup::ALL.into_iter().map(|group| view! {
                        <option value=group.as_str()>
                            {format!("{} ({} years)", group.audience(), group)}
                        </option>
                    }).collect_view()}
                </select>
            </label>
            <label>"Story (Markdown)" <textarea name="content" rows="12" required=true></textarea></label>
            <label>"Cover image" <input type="file" name="cover_image" accept="image/png,image/jpeg,image/gif,image/webp" /></label>
            <button type="submit" class="btn">"Add Story"</button>
            {move || status.get().map(|result| match result {
                Ok(msg) => view! { <p class="success">{msg}</p> }.into_any(),
                Err(msg) => view! { <p class="error">{msg}</p> }.into_any(),
            })}
        </form>
    }
}

/// Post the story form as multipart to the admin API.
#[cfg(feature = "hydrate")]
async fn submit_story(data: web_sys::FormData) -> Result<String, String> {
    use crate::models::content::StoryCreated;

    let response = gloo_net::http::Request::post("/api/v1/admin/stories")
        .body(data)
        .map_err(|e| e.to_string())?
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.ok() {
        let created: StoryCreated = response.json().await.map_err(|e| e.to_string())?;
        Ok(created.message)
    } else {
        let body: serde_json::Value = response.json().await.unwrap_or_default();
        Err(body["error"]
            .as_str()
            .unwrap_or("Failed to add story")
            .to_string())
    }
}
