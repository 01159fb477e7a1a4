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

use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use maud::Markup;
use maud::html;
use serde::Deserialize;

use crate::app::App;
use crate::app::ResetToken;
use crate::session::Session;
use crate::stats::deck_progress;
use crate::stats::global_stats;
use crate::types::theme::Theme;
use crate::web::state::ServerState;
use crate::web::template::page_template;

#[derive(Deserialize)]
pub struct HomeQuery {
    category: Option<String>,
}

/// Deck selection: the catalog with category filters, per-deck progress,
/// global stats, and the reset button.
pub async fn home(
    State(state): State<ServerState>,
    Query(query): Query<HomeQuery>,
) -> (StatusCode, Html<String>) {
    let app = state.mutable.lock().unwrap();
    let stats = global_stats(&app.catalog, &app.store);
    let filter = query.category.as_deref();
    let theme_icon = match app.store.theme() {
        Theme::Light => "Dark mode",
        Theme::Dark => "Light mode",
    };
    let body = html! {
        div.home {
            header {
                h1 { "flashdeck" }
                form action="/theme" method="post" {
                    button.ghost type="submit" { (theme_icon) }
                }
            }
            section.stats {
                div.stat { span.value { (stats.total_cards) } span.label { "cards" } }
                div.stat { span.value { (stats.cards_studied) } span.label { "studied" } }
                div.stat { span.value { (stats.cards_mastered) } span.label { "mastered" } }
                div.stat { span.value { (stats.sessions) } span.label { "sessions" } }
                div.overall {
                    div.progress-track {
                        div.progress-fill style=(format!("width: {}%", stats.percentage)) {}
                    }
                }
            }
            nav.filters {
                a.filter.active[filter.is_none()] href="/" { "All" }
                @for category in app.catalog.categories() {
                    a.filter.active[filter == Some(category)]
                        href={"/?category=" (category)} { (category) }
                }
            }
            section.decks {
                @for deck in &app.catalog.decks {
                    @if filter.is_none() || filter == Some(deck.category.as_str()) {
                        @let progress = deck_progress(&app.store, &deck.id, deck.cards.len());
                        a.deck-card href={"/deck/" (deck.id)} {
                            div.deck-icon { (deck.icon) }
                            h3 { (deck.title) }
                            p { (deck.description) }
                            div.deck-meta {
                                span { (deck.cards.len()) " cards" }
                                div.progress-track {
                                    div.progress-fill style=(format!("width: {}%", progress.percentage)) {}
                                }
                                span { (progress.percentage) "%" }
                            }
                        }
                    }
                }
            }
            form action="/reset" method="post" {
                button.danger type="submit" { "Reset all progress" }
            }
        }
    };
    let html = page_template(app.store.theme(), body);
    (StatusCode::OK, Html(html.into_string()))
}

#[derive(Deserialize)]
pub struct DeckQuery {
    notice: Option<String>,
}

/// Mode selection for one deck. Selecting the deck is part of the request.
pub async fn deck_page(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<DeckQuery>,
) -> Response {
    let mut app = state.mutable.lock().unwrap();
    if !app.select_deck(&id) {
        return Redirect::to("/").into_response();
    }
    let Some(deck) = app.current_deck() else {
        return Redirect::to("/").into_response();
    };
    let progress = deck_progress(&app.store, &deck.id, deck.cards.len());
    let body = html! {
        div.mode-selection {
            header {
                a.ghost href="/" { "Back" }
                h1 { (deck.icon) " " (deck.title) }
            }
            p.description { (deck.description) }
            @if query.notice.is_some() {
                p.notice { "No cards to review! All cards are mastered." }
            }
            section.stats {
                div.stat { span.value { (deck.cards.len()) } span.label { "total" } }
                div.stat { span.value { (progress.new) } span.label { "new" } }
                div.stat { span.value { (progress.learning) } span.label { "learning" } }
                div.stat { span.value { (progress.mastered) } span.label { "mastered" } }
            }
            section.modes {
                form action={"/deck/" (deck.id)} method="post" {
                    button.mode name="mode" value="study" type="submit" {
                        h3 { "Study" }
                        p { "Go through the deck in order." }
                    }
                    button.mode name="mode" value="shuffle" type="submit" {
                        h3 { "Shuffle" }
                        p { "Go through the deck in random order." }
                    }
                    button.mode name="mode" value="review" type="submit" {
                        h3 { "Review" }
                        p { "Only cards you have not mastered yet." }
                    }
                }
            }
        }
    };
    let html = page_template(app.store.theme(), body);
    (StatusCode::OK, Html(html.into_string())).into_response()
}

/// The study view while a session is in progress, or the completion
/// summary. Without a session, back to the deck list.
pub async fn session_page(State(state): State<ServerState>) -> Response {
    let app = state.mutable.lock().unwrap();
    let Some(session) = app.session() else {
        return Redirect::to("/").into_response();
    };
    let body = if session.is_complete() {
        completion_view(session)
    } else {
        study_view(&app, session)
    };
    let html = page_template(app.store.theme(), body);
    (StatusCode::OK, Html(html.into_string())).into_response()
}

fn study_view(app: &App, session: &Session) -> Markup {
    let card = session.current_card();
    let deck_title = app
        .catalog
        .deck(session.deck_id())
        .map(|deck| deck.title.as_str())
        .unwrap_or("");
    let category = card.category.as_deref().unwrap_or(deck_title);
    let percent = (session.position() * 100) / session.queue_len();
    html! {
        div.study {
            header {
                form action="/session" method="post" {
                    button.ghost name="action" value="Home" type="submit" { "Back" }
                }
                span.counter { (session.position() + 1) " / " (session.queue_len()) }
                form action="/session" method="post" {
                    button.ghost name="action" value="Shuffle" type="submit" { "Shuffle" }
                }
            }
            div.progress-track {
                div.progress-fill style=(format!("width: {percent}%")) {}
            }
            form action="/session" method="post" {
                button.flashcard.flipped[session.is_flipped()] name="action" value="Flip" type="submit" {
                    span.category { (category) }
                    div.question { (card.question) }
                    @if session.is_flipped() {
                        div.answer { (card.answer) }
                        @if let Some(details) = &card.details {
                            div.details { (details) }
                        }
                    }
                }
            }
            form.nav action="/session" method="post" {
                button name="action" value="Prev" type="submit" disabled[session.position() == 0] { "Previous" }
                button name="action" value="Next" type="submit" { "Next" }
            }
            form.confidence action="/session" method="post" {
                button.again name="action" value="Again" type="submit" { "Again (1)" }
                button.hard name="action" value="Hard" type="submit" { "Hard (2)" }
                button.good name="action" value="Good" type="submit" { "Good (3)" }
                button.easy name="action" value="Easy" type="submit" { "Easy (4)" }
            }
        }
    }
}

fn completion_view(session: &Session) -> Markup {
    let stats = session.stats();
    html! {
        div.complete {
            h1 { "Session complete" }
            p.mode { "Mode: " (session.mode().as_str()) }
            section.stats {
                div.stat { span.value { (stats.total) } span.label { "rated" } }
                div.stat { span.value { (stats.easy) } span.label { "easy" } }
                div.stat { span.value { (stats.good) } span.label { "good" } }
                div.stat { span.value { (stats.hard) } span.label { "hard" } }
                div.stat { span.value { (stats.again) } span.label { "again" } }
            }
            form.actions action="/session" method="post" {
                button name="action" value="StudyAgain" type="submit" { "Study again" }
                button name="action" value="ReviewMistakes" type="submit"
                    disabled[stats.mistakes.is_empty()] { "Review mistakes" }
                button name="action" value="Home" type="submit" { "Back to decks" }
            }
        }
    }
}

/// Confirmation page for reset-all, carrying the one-shot token.
pub fn reset_confirm_page(theme: Theme, token: ResetToken) -> Markup {
    let body = html! {
        div.reset-confirm {
            h1 { "Reset all progress?" }
            p { "Are you sure? Every card goes back to new. This cannot be undone." }
            form action="/reset" method="post" {
                input type="hidden" name="token" value=(token.into_inner());
                button.danger type="submit" { "Yes, reset everything" }
            }
            a.ghost href="/" { "Cancel" }
        }
    };
    page_template(theme, body)
}
