// Entrypoint for the business card.
// - Keeps `main` small: build the config and collaborators, show the card
//   and hand over to the menu loop.
// - Exit status 0 when the user leaves, 1 when an action aborted the
//   session or the terminal failed.

use std::process::ExitCode;

use devcard::actions::{Menu, Session};
use devcard::config::CardConfig;
use devcard::console::Console;
use devcard::fetch::HttpFetcher;
use devcard::opener::SystemOpener;
use devcard::ui::{run_session, show_card, DialoguerPrompt};

fn main() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or("DEVCARD_LOG", "warn")).init();

    let config = CardConfig::load()?;
    let mut console = Console::stdout(&config.pacing);
    let menu = Menu::standard_styled(console.color());
    let fetcher = HttpFetcher::new()?;
    let mut session = Session {
        config: &config,
        console: &mut console,
        opener: &SystemOpener,
        fetcher: &fetcher,
        workdir: std::env::current_dir()?,
    };

    show_card(&mut session)?;

    // Blocks until the user exits or an action fails.
    let outcome = run_session(&menu, &mut DialoguerPrompt::new(), &mut session)?;
    Ok(ExitCode::from(outcome.exit_code()))
}
