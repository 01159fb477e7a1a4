// Copyright 2025 The flashdeck contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::Form;
use axum::extract::Path;
use axum::extract::State;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use serde::Deserialize;

use crate::app::ResetToken;
use crate::app::StartOutcome;
use crate::session::Mode;
use crate::types::confidence::Confidence;
use crate::web::state::ServerState;
use crate::web::view::reset_confirm_page;

#[derive(Deserialize)]
pub struct StartForm {
    mode: Mode,
}

/// Start a session over a deck. An empty review queue bounces back to the
/// mode page with a notice; nothing changes.
pub async fn start_session(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Form(form): Form<StartForm>,
) -> Redirect {
    let mut app = state.mutable.lock().unwrap();
    if !app.select_deck(&id) {
        return Redirect::to("/");
    }
    match app.start_session(form.mode) {
        StartOutcome::Started => Redirect::to("/session"),
        StartOutcome::NothingToStudy => {
            log::debug!("review queue for {id} is empty, session not started");
            Redirect::to(&format!("/deck/{id}?notice=empty"))
        }
        StartOutcome::NoDeckSelected => Redirect::to("/"),
    }
}

#[derive(Debug, Deserialize)]
enum Action {
    Flip,
    Prev,
    Next,
    Again,
    Hard,
    Good,
    Easy,
    Shuffle,
    StudyAgain,
    ReviewMistakes,
    Home,
}

#[derive(Deserialize)]
pub struct ActionForm {
    action: Action,
}

/// Drive the session state machine. Every action redirects back to the
/// session page except leaving for home.
pub async fn session_action(
    State(state): State<ServerState>,
    Form(form): Form<ActionForm>,
) -> Redirect {
    let mut app = state.mutable.lock().unwrap();
    match form.action {
        Action::Flip => app.flip(),
        Action::Prev => app.prev(),
        Action::Next => app.next(),
        Action::Again => app.rate(Confidence::Again),
        Action::Hard => app.rate(Confidence::Hard),
        Action::Good => app.rate(Confidence::Good),
        Action::Easy => app.rate(Confidence::Easy),
        Action::Shuffle => app.shuffle_now(),
        Action::StudyAgain => {
            // Restarting in review mode can come up empty once everything
            // is mastered; bounce to the mode page like a fresh start.
            if app.study_again() == StartOutcome::NothingToStudy {
                if let Some(session) = app.session() {
                    let id = session.deck_id();
                    log::debug!("review queue for {id} is empty, session not restarted");
                    return Redirect::to(&format!("/deck/{id}?notice=empty"));
                }
            }
        }
        Action::ReviewMistakes => {
            app.review_mistakes();
        }
        Action::Home => {
            app.go_home();
            return Redirect::to("/");
        }
    }
    Redirect::to("/session")
}

#[derive(Deserialize)]
pub struct ResetForm {
    #[serde(default)]
    token: Option<u64>,
}

/// Two-step reset. Without a token, render the confirmation page carrying
/// a fresh one; with a token, perform the reset only when it matches.
pub async fn reset(State(state): State<ServerState>, Form(form): Form<ResetForm>) -> Response {
    let mut app = state.mutable.lock().unwrap();
    match form.token {
        None => {
            let token = app.request_reset();
            let html = reset_confirm_page(app.store.theme(), token);
            Html(html.into_string()).into_response()
        }
        Some(value) => {
            if let Err(e) = app.confirm_reset(ResetToken::new(value)) {
                log::error!("{e}");
            }
            Redirect::to("/").into_response()
        }
    }
}

pub async fn toggle_theme(State(state): State<ServerState>) -> Redirect {
    let mut app = state.mutable.lock().unwrap();
    app.toggle_theme();
    Redirect::to("/")
}
