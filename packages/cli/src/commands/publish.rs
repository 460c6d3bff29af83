use super::open_session;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use tracing::{info, warn};

#[derive(Debug, Args)]
pub struct PublishArgs {
    /// Screen id
    pub screen: String,
}

pub fn publish(args: PublishArgs, cwd: &str) -> Result<()> {
    let mut session = open_session(cwd, &args.screen)?;

    if session.publish()? {
        info!(screen = %args.screen, version = session.document().version, "Published screen");
        println!("{} Published '{}'", "✅".green(), args.screen.bright_white());
    } else {
        warn!(screen = %args.screen, "Nothing to publish");
        println!(
            "{} '{}' has no draft to publish",
            "⚠️".yellow(),
            args.screen.bright_white()
        );
    }
    Ok(())
}
