pub mod apply;
pub mod init;
pub mod menus;
pub mod outline;
pub mod publish;
pub mod style;

pub use apply::{apply, ApplyArgs};
pub use init::{init, InitArgs};
pub use menus::{menus, MenusArgs};
pub use outline::{outline, OutlineArgs};
pub use publish::{publish, PublishArgs};
pub use style::{style, StyleArgs};

use crate::config::Config;
use anyhow::Result;
use tessera_editor::{DesignerSession, FileLayoutHost, SessionOptions};
use tracing::debug;

/// Open a screen using the project config in `cwd`
pub(crate) fn open_session(cwd: &str, screen: &str) -> Result<DesignerSession<FileLayoutHost>> {
    let config = Config::load(cwd)?;
    let host = FileLayoutHost::new(config.get_layout_dir(cwd));
    debug!(screen, layout_dir = %host.root().display(), theme = %config.theme, "Opening session");
    let options = SessionOptions {
        context: config.resolve_context()?,
        undo_levels: config.undo_levels,
    };
    Ok(DesignerSession::open(host, screen, options)?)
}
