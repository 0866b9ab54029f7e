use dtl_client::{Profile, Session};

use crate::render;

pub(crate) async fn show(session: &Session) -> anyhow::Result<()> {
    let profile = Profile::load(session).await?;
    render::profile(&profile);
    Ok(())
}
