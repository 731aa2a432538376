use crate::client::ScriptsApi;
use crate::commands::{describe, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{ListQuery, ScriptFormData};
use crate::stash::{StashBackend, StashStore};

pub async fn list<C, B>(client: &C, stash: &StashStore<B>, query: &ListQuery) -> Result<CmdResult>
where
    C: ScriptsApi + ?Sized,
    B: StashBackend,
{
    let page = client.list_scripts(query).await?;
    let mut result = CmdResult::default()
        .with_scripts(page.data)
        .with_pagination(page.pagination)
        .with_stash(stash);

    if result.scripts.is_empty() {
        let message = match query.search.as_deref().filter(|t| !t.is_empty()) {
            Some(term) => format!("No scripts match \"{}\".", term),
            None => "No scripts found.".to_string(),
        };
        result.add_message(CmdMessage::info(message));
    }
    Ok(result)
}

pub async fn show<C, B>(client: &C, stash: &StashStore<B>, id: &str) -> Result<CmdResult>
where
    C: ScriptsApi + ?Sized,
    B: StashBackend,
{
    let script = client.get_script(id).await?;
    Ok(CmdResult::default()
        .with_scripts(vec![script])
        .with_stash(stash))
}

pub async fn create<C>(client: &C, form: &ScriptFormData) -> Result<CmdResult>
where
    C: ScriptsApi + ?Sized,
{
    let created = client.create_script(form).await?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Script created: {}",
        describe(&created)
    )));
    Ok(result.with_scripts(vec![created]))
}

pub async fn update<C>(client: &C, id: &str, form: &ScriptFormData) -> Result<CmdResult>
where
    C: ScriptsApi + ?Sized,
{
    let updated = client.update_script(id, form).await?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Script updated: {}",
        describe(&updated)
    )));
    Ok(result.with_scripts(vec![updated]))
}

/// Delete on the server, then drop the id from the stash so it doesn't dangle.
///
/// Once the server has deleted the script the command succeeds; a stash write that
/// fails afterwards is reported as a warning.
pub async fn delete<C, B>(client: &C, stash: &mut StashStore<B>, id: &str) -> Result<CmdResult>
where
    C: ScriptsApi + ?Sized,
    B: StashBackend,
{
    client.delete_script(id).await?;
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Script deleted: {}", id)));

    if stash.is_stashed(id) {
        match stash.remove(id) {
            Ok(_) => result.add_message(CmdMessage::info("Removed from your stash.")),
            Err(e) => {
                tracing::warn!(id, error = %e, "deleted script left in stash");
                result.add_message(CmdMessage::warning(format!(
                    "Could not remove {} from your stash: {}",
                    id, e
                )));
            }
        }
    }
    Ok(result.with_stash(stash))
}
