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

use std::path::PathBuf;
use std::time::Duration;

use axum::Router;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::time::sleep;

use crate::app::App;
use crate::catalog::Catalog;
use crate::error::Fallible;
use crate::error::fail;
use crate::store::Store;
use crate::web::post::reset;
use crate::web::post::session_action;
use crate::web::post::start_session;
use crate::web::post::toggle_theme;
use crate::web::state::ServerState;
use crate::web::view::deck_page;
use crate::web::view::home;
use crate::web::view::session_page;

pub async fn start_server(directory: PathBuf, port: u16, open_browser: bool) -> Fallible<()> {
    if !directory.exists() {
        return fail("directory does not exist.");
    }
    let directory = directory.canonicalize()?;

    let catalog = Catalog::load(&directory).await?;
    if catalog.decks.is_empty() {
        return fail("no decks could be loaded.");
    }
    let store = Store::open(&directory);
    let state = ServerState::new(App::new(catalog, store));

    let app = Router::new();
    let app = app.route("/", get(home));
    let app = app.route("/deck/{id}", get(deck_page));
    let app = app.route("/deck/{id}", post(start_session));
    let app = app.route("/session", get(session_page));
    let app = app.route("/session", post(session_action));
    let app = app.route("/reset", post(reset));
    let app = app.route("/theme", post(toggle_theme));
    let app = app.route("/script.js", get(script));
    let app = app.route("/style.css", get(stylesheet));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);
    let bind = format!("127.0.0.1:{port}");

    if open_browser {
        // Open the browser once the socket accepts connections.
        let url = format!("http://{bind}/");
        let probe = bind.clone();
        tokio::spawn(async move {
            loop {
                if let Ok(stream) = TcpStream::connect(&probe).await {
                    drop(stream);
                    break;
                }
                sleep(Duration::from_millis(1)).await;
            }
            let _ = open::that(url);
        });
    }

    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(&bind).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn script() -> (StatusCode, [(HeaderName, &'static str); 1], &'static str) {
    (
        StatusCode::OK,
        [(CONTENT_TYPE, "text/javascript")],
        include_str!("script.js"),
    )
}

async fn stylesheet() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, "public, max-age=604800, immutable"),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}
