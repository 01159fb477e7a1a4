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

use clap::Parser;

use crate::catalog::Catalog;
use crate::error::Fallible;
use crate::error::fail;
use crate::stats::global_stats;
use crate::store::Store;
use crate::web::server::start_server;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Serve the study UI and open it in the browser.
    Serve {
        /// Optional path to the deck directory.
        directory: Option<String>,
        /// Port to bind the local server to.
        #[arg(long, default_value_t = 8000)]
        port: u16,
    },
    /// Print study statistics as JSON.
    Stats {
        /// Optional path to the deck directory.
        directory: Option<String>,
    },
    /// Check that every configured deck loads.
    Check {
        /// Optional path to the deck directory.
        directory: Option<String>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Serve { directory, port } => {
            let directory = resolve(directory)?;
            start_server(directory, port, true).await
        }
        Command::Stats { directory } => {
            let directory = resolve(directory)?;
            let catalog = Catalog::load(&directory).await?;
            let store = Store::open(&directory);
            let stats = global_stats(&catalog, &store);
            println!("{}", serde_json::to_string_pretty(&stats)?);
            Ok(())
        }
        Command::Check { directory } => {
            let directory = resolve(directory)?;
            let catalog = Catalog::load(&directory).await?;
            for id in &catalog.failed {
                eprintln!("could not load deck: {id}");
            }
            if catalog.failed.is_empty() {
                println!("All {} decks loaded.", catalog.decks.len());
                Ok(())
            } else {
                fail("some decks failed to load.")
            }
        }
    }
}

fn resolve(directory: Option<String>) -> Fallible<PathBuf> {
    match directory {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => Ok(std::env::current_dir()?),
    }
}
