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

use std::sync::Arc;
use std::sync::Mutex;

use crate::app::App;

/// Shared handler state. Every request runs to completion under the one
/// lock, so reads and writes within a user action never interleave.
#[derive(Clone)]
pub struct ServerState {
    pub mutable: Arc<Mutex<App>>,
}

impl ServerState {
    pub fn new(app: App) -> Self {
        Self {
            mutable: Arc::new(Mutex::new(app)),
        }
    }
}
