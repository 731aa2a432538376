use crate::client::ScriptsApi;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, SceneError};
use crate::stash::{StashBackend, StashStore};

/// Draw `count` random scripts.
///
/// A single draw with nothing to exclude uses the cache-busted single-script endpoint;
/// everything else goes through the multi-script endpoint. With `exclude_stashed`,
/// scripts already in the stash are left out.
pub async fn draw<C, B>(
    client: &C,
    stash: &StashStore<B>,
    count: u32,
    exclude_stashed: bool,
) -> Result<CmdResult>
where
    C: ScriptsApi + ?Sized,
    B: StashBackend,
{
    if count == 0 {
        return Err(SceneError::InvalidInput("Count must be at least 1".to_string()));
    }

    let scripts = if count == 1 && !exclude_stashed {
        vec![client.get_random_script().await?]
    } else {
        let exclude: &[String] = if exclude_stashed { stash.ids() } else { &[] };
        client.get_random_scripts(count, exclude).await?
    };

    let mut result = CmdResult::default();
    if scripts.is_empty() {
        result.add_message(CmdMessage::info("No scripts to draw from."));
    } else if (scripts.len() as u32) < count {
        result.add_message(CmdMessage::warning(format!(
            "Only {} of {} requested scripts available.",
            scripts.len(),
            count
        )));
    }
    Ok(result.with_scripts(scripts).with_stash(stash))
}
