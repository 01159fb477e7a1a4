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

mod post;
pub mod server;
mod state;
mod template;
mod view;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use tokio::net::TcpStream;
    use tokio::spawn;
    use tokio::time::sleep;

    use crate::error::Fallible;
    use crate::helper::create_tmp_copy_of_test_directory;
    use crate::web::server::start_server;

    #[tokio::test]
    async fn test_start_server_on_non_existent_directory() -> Fallible<()> {
        let directory = PathBuf::from("./derpherp");
        let result = start_server(directory, 8000, false).await;
        assert!(result.is_err());
        let err = result.err().unwrap();
        assert_eq!(err.to_string(), "error: directory does not exist.");
        Ok(())
    }

    async fn spawn_test_server() -> Fallible<String> {
        let directory = create_tmp_copy_of_test_directory()?;
        let port = portpicker::pick_unused_port().unwrap();
        spawn(async move { start_server(PathBuf::from(directory), port, false).await });
        let bind = format!("127.0.0.1:{port}");
        loop {
            if let Ok(stream) = TcpStream::connect(&bind).await {
                drop(stream);
                break;
            }
            sleep(Duration::from_millis(1)).await;
        }
        Ok(format!("http://{bind}"))
    }

    #[tokio::test]
    async fn test_static_assets_and_not_found() -> Fallible<()> {
        let base = spawn_test_server().await?;

        let response = reqwest::get(format!("{base}/style.css")).await?;
        assert!(response.status().is_success());
        assert_eq!(response.headers().get("content-type").unwrap(), "text/css");

        let response = reqwest::get(format!("{base}/script.js")).await?;
        assert!(response.status().is_success());
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/javascript"
        );

        let response = reqwest::get(format!("{base}/herp-derp")).await?;
        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    async fn test_e2e_study_session() -> Fallible<()> {
        let base = spawn_test_server().await?;
        let client = reqwest::Client::new();

        // The catalog shows both fixture decks, in descriptor order, with
        // one filter link per category.
        let html = reqwest::get(format!("{base}/")).await?.text().await?;
        let first = html.find("Software Engineering Basics").unwrap();
        let second = html.find("Testing").unwrap();
        assert!(first < second);
        assert!(html.contains("?category=process"));
        assert!(html.contains("?category=testing"));

        // Filtering by category hides the other deck.
        let html = reqwest::get(format!("{base}/?category=process"))
            .await?
            .text()
            .await?;
        assert!(html.contains("<h3>Software Engineering Basics</h3>"));
        assert!(!html.contains("<h3>Testing</h3>"));

        // Mode selection for one deck.
        let html = reqwest::get(format!("{base}/deck/se-basics"))
            .await?
            .text()
            .await?;
        assert!(html.contains("Shuffle"));
        assert!(html.contains("Review"));

        // Start a study session: the first card's question shows.
        let html = client
            .post(format!("{base}/deck/se-basics"))
            .form(&[("mode", "study")])
            .send()
            .await?
            .text()
            .await?;
        assert!(html.contains("What does WBS stand for?"));
        assert!(!html.contains("Work breakdown structure."));
        assert!(html.contains("1 / 3"));

        // Flip: the answer shows.
        let html = client
            .post(format!("{base}/session"))
            .form(&[("action", "Flip")])
            .send()
            .await?
            .text()
            .await?;
        assert!(html.contains("Work breakdown structure."));

        // Rate good, easy: positions advance.
        let html = client
            .post(format!("{base}/session"))
            .form(&[("action", "Good")])
            .send()
            .await?
            .text()
            .await?;
        assert!(html.contains("What is a user story?"));
        assert!(html.contains("2 / 3"));
        let html = client
            .post(format!("{base}/session"))
            .form(&[("action", "Easy")])
            .send()
            .await?
            .text()
            .await?;
        assert!(html.contains("What is technical debt?"));

        // Rating the last card completes the session.
        let html = client
            .post(format!("{base}/session"))
            .form(&[("action", "Again")])
            .send()
            .await?
            .text()
            .await?;
        assert!(html.contains("Session complete"));

        // The mistake replay queues exactly the card rated again.
        let html = client
            .post(format!("{base}/session"))
            .form(&[("action", "ReviewMistakes")])
            .send()
            .await?
            .text()
            .await?;
        assert!(html.contains("What is technical debt?"));
        assert!(html.contains("1 / 1"));

        // Leaving for home lands back on the catalog.
        let html = client
            .post(format!("{base}/session"))
            .form(&[("action", "Home")])
            .send()
            .await?
            .text()
            .await?;
        assert!(html.contains("Software Engineering Basics"));
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_review_shows_notice() -> Fallible<()> {
        let base = spawn_test_server().await?;
        let client = reqwest::Client::new();

        // Master the whole testing deck.
        client
            .post(format!("{base}/deck/testing"))
            .form(&[("mode", "study")])
            .send()
            .await?;
        for _ in 0..2 {
            client
                .post(format!("{base}/session"))
                .form(&[("action", "Easy")])
                .send()
                .await?;
        }

        // Review mode bounces back with the notice.
        let html = client
            .post(format!("{base}/deck/testing"))
            .form(&[("mode", "review")])
            .send()
            .await?
            .text()
            .await?;
        assert!(html.contains("No cards to review!"));
        Ok(())
    }

    #[tokio::test]
    async fn test_study_again_after_mastering_everything() -> Fallible<()> {
        let base = spawn_test_server().await?;
        let client = reqwest::Client::new();

        // Master the whole testing deck in review mode.
        client
            .post(format!("{base}/deck/testing"))
            .form(&[("mode", "review")])
            .send()
            .await?;
        for _ in 0..2 {
            client
                .post(format!("{base}/session"))
                .form(&[("action", "Easy")])
                .send()
                .await?;
        }

        // Studying again has nothing left; back to the mode page with
        // the notice instead of the completion summary.
        let html = client
            .post(format!("{base}/session"))
            .form(&[("action", "StudyAgain")])
            .send()
            .await?
            .text()
            .await?;
        assert!(html.contains("No cards to review!"));
        assert!(!html.contains("Session complete"));
        Ok(())
    }

    #[tokio::test]
    async fn test_theme_toggle() -> Fallible<()> {
        let base = spawn_test_server().await?;
        let client = reqwest::Client::new();

        let html = reqwest::get(format!("{base}/")).await?.text().await?;
        assert!(html.contains("data-theme=\"light\""));
        let html = client
            .post(format!("{base}/theme"))
            .send()
            .await?
            .text()
            .await?;
        assert!(html.contains("data-theme=\"dark\""));
        Ok(())
    }

    #[tokio::test]
    async fn test_reset_is_a_two_step_command() -> Fallible<()> {
        let base = spawn_test_server().await?;
        let client = reqwest::Client::new();

        // The first post renders a confirmation page with a token.
        let html = client
            .post(format!("{base}/reset"))
            .form(&Vec::<(String, String)>::new())
            .send()
            .await?
            .text()
            .await?;
        assert!(html.contains("Are you sure?"));
        let token = html
            .split("name=\"token\" value=\"")
            .nth(1)
            .unwrap()
            .split('"')
            .next()
            .unwrap()
            .to_string();

        // The second post with the token performs the reset.
        let response = client
            .post(format!("{base}/reset"))
            .form(&[("token", token.as_str())])
            .send()
            .await?;
        assert!(response.status().is_success());
        Ok(())
    }
}
