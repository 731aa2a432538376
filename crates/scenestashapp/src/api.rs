//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer: one entry point for every
//! scenestash operation, whatever the UI.
//!
//! It dispatches to `commands/*.rs` and returns `Result<CmdResult>`. It holds no
//! business logic, does no I/O of its own, and makes no presentation decisions.
//!
//! ## Generic Over Both Seams
//!
//! `SceneStashApi<C: ScriptsApi, B: StashBackend>`:
//! - Production: `SceneStashApi<HttpClient, FsBackend>`
//! - Testing: any fake client with a `MemBackend`
//!
//! The stash is owned here for the lifetime of the session; the facade is the only
//! writer.

use crate::client::ScriptsApi;
use crate::commands::{self, CmdResult};
use crate::error::Result;
use crate::model::{ListQuery, ScriptFormData};
use crate::stash::{StashBackend, StashChange, StashStore, SubscriptionId};

pub struct SceneStashApi<C: ScriptsApi, B: StashBackend> {
    client: C,
    stash: StashStore<B>,
}

impl<C: ScriptsApi, B: StashBackend> SceneStashApi<C, B> {
    pub fn new(client: C, stash: StashStore<B>) -> Self {
        Self { client, stash }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn stash(&self) -> &StashStore<B> {
        &self.stash
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StashChange, &[String]) + 'static,
    {
        self.stash.subscribe(listener)
    }

    pub fn take_load_warning(&mut self) -> Option<String> {
        self.stash.take_load_warning()
    }

    pub async fn list_scripts(&self, query: &ListQuery) -> Result<CmdResult> {
        commands::scripts::list(&self.client, &self.stash, query).await
    }

    pub async fn show_script(&self, id: &str) -> Result<CmdResult> {
        commands::scripts::show(&self.client, &self.stash, id).await
    }

    pub async fn create_script(&self, form: &ScriptFormData) -> Result<CmdResult> {
        commands::scripts::create(&self.client, form).await
    }

    pub async fn update_script(&self, id: &str, form: &ScriptFormData) -> Result<CmdResult> {
        commands::scripts::update(&self.client, id, form).await
    }

    pub async fn delete_script(&mut self, id: &str) -> Result<CmdResult> {
        commands::scripts::delete(&self.client, &mut self.stash, id).await
    }

    pub async fn draw_random(&self, count: u32, exclude_stashed: bool) -> Result<CmdResult> {
        commands::random::draw(&self.client, &self.stash, count, exclude_stashed).await
    }

    pub async fn list_stash(&self) -> Result<CmdResult> {
        commands::stash::list(&self.client, &self.stash).await
    }

    pub async fn stash_script(&mut self, id: &str, verify: bool) -> Result<CmdResult> {
        commands::stash::add(&self.client, &mut self.stash, id, verify).await
    }

    pub fn unstash_script(&mut self, id: &str) -> Result<CmdResult> {
        commands::stash::remove(&mut self.stash, id)
    }

    pub fn clear_stash(&mut self) -> Result<CmdResult> {
        commands::stash::clear(&mut self.stash)
    }

    pub async fn prune_stash(&mut self) -> Result<CmdResult> {
        commands::stash::prune(&self.client, &mut self.stash).await
    }
}
