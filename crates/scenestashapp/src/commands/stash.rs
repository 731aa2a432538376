use crate::client::ScriptsApi;
use crate::commands::{describe, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ScriptSnip;
use crate::stash::{StashBackend, StashStore};
use std::collections::HashMap;

/// Stashed scripts resolved against the server, in stash order.
///
/// IDs the server no longer knows are reported as a warning, not dropped from the
/// stash; see [`prune`].
pub async fn list<C, B>(client: &C, stash: &StashStore<B>) -> Result<CmdResult>
where
    C: ScriptsApi + ?Sized,
    B: StashBackend,
{
    let mut result = CmdResult::default().with_stash(stash);
    if stash.is_empty() {
        result.add_message(CmdMessage::info("Your stash is empty."));
        return Ok(result);
    }

    let (found, missing) = resolve(client, stash.ids()).await?;
    if !missing.is_empty() {
        result.add_message(CmdMessage::warning(format!(
            "{} stashed script(s) no longer exist: {}",
            missing.len(),
            missing.join(", ")
        )));
    }
    Ok(result.with_scripts(found))
}

/// Stash `id`. With `verify`, the script is fetched first so unknown ids are refused.
pub async fn add<C, B>(
    client: &C,
    stash: &mut StashStore<B>,
    id: &str,
    verify: bool,
) -> Result<CmdResult>
where
    C: ScriptsApi + ?Sized,
    B: StashBackend,
{
    let label = if verify {
        describe(&client.get_script(id).await?)
    } else {
        id.to_string()
    };

    let mut result = CmdResult::default();
    if stash.add(id)? {
        result.add_message(CmdMessage::success(format!("Stashed {}", label)));
    } else {
        result.add_message(CmdMessage::info(format!("{} is already stashed", label)));
    }
    Ok(result.with_stash(stash))
}

pub fn remove<B: StashBackend>(stash: &mut StashStore<B>, id: &str) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    if stash.remove(id)? {
        result.add_message(CmdMessage::success(format!("Removed {} from stash", id)));
    } else {
        result.add_message(CmdMessage::info(format!("{} was not stashed", id)));
    }
    Ok(result.with_stash(stash))
}

pub fn clear<B: StashBackend>(stash: &mut StashStore<B>) -> Result<CmdResult> {
    let count = stash.len();
    stash.clear()?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Cleared {} stashed script(s)",
        count
    )));
    Ok(result.with_stash(stash))
}

/// Drop stashed ids the server no longer knows about.
pub async fn prune<C, B>(client: &C, stash: &mut StashStore<B>) -> Result<CmdResult>
where
    C: ScriptsApi + ?Sized,
    B: StashBackend,
{
    let ids = stash.ids().to_vec();
    let (_, missing) = resolve(client, &ids).await?;

    let mut result = CmdResult::default();
    for id in &missing {
        stash.remove(id)?;
    }
    if missing.is_empty() {
        result.add_message(CmdMessage::info("Nothing to prune."));
    } else {
        result.add_message(CmdMessage::success(format!(
            "Pruned {} missing script(s): {}",
            missing.len(),
            missing.join(", ")
        )));
    }
    Ok(result.with_stash(stash))
}

/// Batch-fetch `ids` and split into (found in `ids` order, missing ids).
async fn resolve<C>(client: &C, ids: &[String]) -> Result<(Vec<ScriptSnip>, Vec<String>)>
where
    C: ScriptsApi + ?Sized,
{
    let fetched = client.get_scripts_by_ids(ids).await?;
    let mut by_id: HashMap<String, ScriptSnip> =
        fetched.into_iter().map(|s| (s.id.clone(), s)).collect();

    let mut found = Vec::new();
    let mut missing = Vec::new();
    for id in ids {
        match by_id.remove(id) {
            Some(script) => found.push(script),
            None => missing.push(id.clone()),
        }
    }
    Ok((found, missing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake::{script, FakeApi};
    use crate::commands::MessageLevel;
    use crate::stash::mem_backend::MemBackend;

    fn api() -> FakeApi {
        FakeApi::with_scripts(vec![
            script("a", "Alpha"),
            script("b", "Bravo"),
            script("c", "Charlie"),
        ])
    }

    #[tokio::test]
    async fn empty_stash_makes_no_call() {
        let api = api();
        let stash = StashStore::open(MemBackend::new()).unwrap();

        let result = list(&api, &stash).await.unwrap();
        assert!(result.scripts.is_empty());
        assert_eq!(result.messages[0].content, "Your stash is empty.");
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn list_keeps_stash_order() {
        let api = api();
        let mut stash = StashStore::open(MemBackend::new()).unwrap();
        for id in ["c", "a"] {
            stash.add(id).unwrap();
        }

        let result = list(&api, &stash).await.unwrap();
        let ids: Vec<&str> = result.scripts.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
        assert_eq!(api.calls(), vec!["batch [c,a]"]);
    }

    #[tokio::test]
    async fn list_warns_about_missing() {
        let api = api();
        let mut stash = StashStore::open(MemBackend::new()).unwrap();
        stash.add("a").unwrap();
        stash.add("gone").unwrap();

        let result = list(&api, &stash).await.unwrap();
        assert_eq!(result.scripts.len(), 1);
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert!(result.messages[0].content.contains("gone"));
        // Reporting only.
        assert!(stash.is_stashed("gone"));
    }

    #[tokio::test]
    async fn add_verified_uses_title() {
        let api = api();
        let mut stash = StashStore::open(MemBackend::new()).unwrap();

        let result = add(&api, &mut stash, "b", true).await.unwrap();
        assert_eq!(result.messages[0].content, "Stashed \"Bravo\" (b)");
        assert_eq!(result.stashed_ids, vec!["b"]);

        let again = add(&api, &mut stash, "b", true).await.unwrap();
        assert_eq!(again.messages[0].level, MessageLevel::Info);
        assert_eq!(stash.len(), 1);
    }

    #[tokio::test]
    async fn add_verified_refuses_unknown() {
        let api = api();
        let mut stash = StashStore::open(MemBackend::new()).unwrap();

        assert!(add(&api, &mut stash, "nope", true).await.is_err());
        assert!(stash.is_empty());
    }

    #[tokio::test]
    async fn add_unverified_skips_server() {
        let api = api();
        let mut stash = StashStore::open(MemBackend::new()).unwrap();

        add(&api, &mut stash, "offline-id", false).await.unwrap();
        assert!(stash.is_stashed("offline-id"));
        assert!(api.calls().is_empty());
    }

    #[test]
    fn remove_and_clear() {
        let mut stash = StashStore::open(MemBackend::new()).unwrap();
        stash.add("a").unwrap();
        stash.add("b").unwrap();

        let removed = remove(&mut stash, "a").unwrap();
        assert_eq!(removed.messages[0].level, MessageLevel::Success);
        let absent = remove(&mut stash, "a").unwrap();
        assert_eq!(absent.messages[0].content, "a was not stashed");

        let cleared = clear(&mut stash).unwrap();
        assert_eq!(cleared.messages[0].content, "Cleared 1 stashed script(s)");
        assert!(stash.is_empty());
    }

    #[tokio::test]
    async fn prune_drops_missing_only() {
        let api = api();
        let mut stash = StashStore::open(MemBackend::new()).unwrap();
        for id in ["gone-1", "a", "gone-2"] {
            stash.add(id).unwrap();
        }

        let result = prune(&api, &mut stash).await.unwrap();
        assert_eq!(stash.ids(), &["a"]);
        assert!(result.messages[0].content.contains("gone-1, gone-2"));
    }
}
