use std::sync::Arc;

use axum::{
    extract::{Form, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::{
    AppState,
    controller::{LISTING_URL, Mode, RegistrationController, SubmitOutcome},
    error::AppResult,
    form::FormValues,
    templates,
};

pub async fn index() -> Redirect {
    Redirect::to(LISTING_URL)
}

pub async fn list(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let movies = state.movies.list().await?;
    Ok(Html(templates::listing_page(&movies)))
}

pub async fn new_form(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let ctl = RegistrationController::init(state.movies.clone(), None).await?;
    Ok(Html(templates::form_page(&ctl)))
}

pub async fn edit_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> AppResult<Html<String>> {
    let ctl = RegistrationController::init(state.movies.clone(), Some(id)).await?;
    Ok(Html(templates::form_page(&ctl)))
}

pub async fn create(
    State(state): State<Arc<AppState>>,
    Form(values): Form<FormValues>,
) -> Response {
    submit(&state, Mode::Create, FormValues::default(), values).await
}

/// The loaded record is not kept between requests, so the posted values are
/// also the reset point; the "clear" link reloads the stored record instead.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Form(values): Form<FormValues>,
) -> Response {
    submit(&state, Mode::Edit(id), values.clone(), values).await
}

async fn submit(
    state: &AppState,
    mode: Mode,
    initial: FormValues,
    values: FormValues,
) -> Response {
    let mut ctl = RegistrationController::resume(state.movies.clone(), mode, initial, values);

    let status = match ctl.submit().await {
        SubmitOutcome::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SubmitOutcome::Created | SubmitOutcome::Updated => StatusCode::OK,
        SubmitOutcome::Failed(_) => StatusCode::BAD_GATEWAY,
    };

    (status, Html(templates::form_page(&ctl))).into_response()
}
