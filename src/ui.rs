// UI layer: the greeting screen and the interactive menu loop.
// The loop is synchronous: one selection, one action, then the prompt is
// shown again.

use anyhow::{ensure, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::Select;

use crate::actions::{perform, Menu, MenuChoice, Session};
use crate::card::{banner_lines, render_card, TIP};
use crate::config::FailurePolicy;
use crate::console::Tone;
use crate::error::ActionError;

pub const PROMPT: &str = "What would you like to do?";
pub const FAREWELL: &str = "👋 Goodbye! Have a great day.";

/// Where menu selections come from.
pub trait ChoiceSource {
    /// Block until the user picks one of `menu`'s entries.
    fn select(&mut self, menu: &Menu) -> Result<MenuChoice>;
}

/// Keyboard-driven selection list on the terminal.
///
/// `Select::interact()` is driven with the arrow keys and Enter.
pub struct DialoguerPrompt {
    theme: ColorfulTheme,
}

impl DialoguerPrompt {
    pub fn new() -> Self {
        DialoguerPrompt {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Default for DialoguerPrompt {
    fn default() -> Self {
        Self::new()
    }
}

impl ChoiceSource for DialoguerPrompt {
    fn select(&mut self, menu: &Menu) -> Result<MenuChoice> {
        let items = menu.labels();
        let index = Select::with_theme(&self.theme)
            .with_prompt(PROMPT)
            .items(&items)
            .default(0)
            .interact()?;
        menu.choice_at(index)
            .ok_or_else(|| anyhow::anyhow!("selection {index} is outside the menu"))
    }
}

/// How a session ended.
#[derive(Debug)]
pub enum SessionOutcome {
    /// The user chose to exit.
    Exited,
    /// An action failed and the session was stopped.
    Aborted(ActionError),
}

impl SessionOutcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            SessionOutcome::Exited => 0,
            SessionOutcome::Aborted(_) => 1,
        }
    }
}

/// Clear the screen, type the banner, then print the card and the tip.
pub fn show_card(session: &mut Session<'_>) -> std::io::Result<()> {
    let profile = &session.config.profile;
    let console = &mut *session.console;
    console.clear_screen()?;
    for line in banner_lines(profile) {
        console.type_line(Tone::Accent, &line)?;
    }
    let columns = if console.is_live() {
        crossterm::terminal::size().ok().map(|(cols, _)| cols)
    } else {
        None
    };
    console.block(&render_card(profile, console.color(), columns))?;
    console.line(Tone::Tip, TIP)?;
    console.blank()
}

/// Main interactive loop. Runs until the exit entry is chosen, or until an
/// action fails while the failure policy is `Abort`.
pub fn run_session(
    menu: &Menu,
    prompt: &mut dyn ChoiceSource,
    session: &mut Session<'_>,
) -> Result<SessionOutcome> {
    loop {
        let choice = prompt.select(menu)?;
        ensure!(menu.offers(choice), "{choice} is not offered by this menu");
        log::debug!("selected {choice}");

        let Some(action) = choice.action(session.config) else {
            session.console.line(Tone::Muted, FAREWELL)?;
            return Ok(SessionOutcome::Exited);
        };

        if let Err(err) = perform(&action, session) {
            match session.config.on_failure {
                FailurePolicy::Abort => {
                    log::error!("{choice} failed, ending session: {err}");
                    return Ok(SessionOutcome::Aborted(err));
                }
                FailurePolicy::Continue => {
                    log::warn!("{choice} failed, back to the menu: {err}");
                    session.console.blank()?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::MenuEntry;
    use crate::config::CardConfig;
    use crate::test_support::{files_in, quiet_console, FakeFetcher, RecordingOpener, ScriptedChoices};
    use reqwest::StatusCode;

    #[test]
    fn exit_ends_session_without_running_anything() {
        let dir = tempfile::tempdir().unwrap();
        let config = CardConfig::default();
        let (mut console, buf) = quiet_console();
        let opener = RecordingOpener::default();
        let fetcher = FakeFetcher::serving(b"pdf");
        let mut session = Session {
            config: &config,
            console: &mut console,
            opener: &opener,
            fetcher: &fetcher,
            workdir: dir.path().to_path_buf(),
        };
        let mut prompt = ScriptedChoices::new(&[MenuChoice::Exit]);

        let outcome = run_session(&Menu::standard(), &mut prompt, &mut session).unwrap();

        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(prompt.prompts, 1);
        assert!(opener.opened().is_empty());
        assert!(fetcher.requests.borrow().is_empty());
        assert!(files_in(dir.path()).is_empty());
        assert_eq!(buf.contents(), format!("{FAREWELL}\n"));
    }

    #[test]
    fn email_then_exit_succeeds_then_says_goodbye() {
        let dir = tempfile::tempdir().unwrap();
        let config = CardConfig::default();
        let (mut console, buf) = quiet_console();
        let opener = RecordingOpener::default();
        let fetcher = FakeFetcher::serving(b"pdf");
        let mut session = Session {
            config: &config,
            console: &mut console,
            opener: &opener,
            fetcher: &fetcher,
            workdir: dir.path().to_path_buf(),
        };
        let mut prompt = ScriptedChoices::new(&[MenuChoice::SendEmail, MenuChoice::Exit]);

        let outcome = run_session(&Menu::standard(), &mut prompt, &mut session).unwrap();

        assert!(matches!(outcome, SessionOutcome::Exited));
        assert_eq!(outcome.exit_code(), 0);
        let out = buf.contents();
        let success = out.find("Check your inbox").unwrap();
        let farewell = out.find(FAREWELL).unwrap();
        assert!(success < farewell);
    }

    #[test]
    fn failed_download_aborts_with_status_one() {
        let dir = tempfile::tempdir().unwrap();
        let config = CardConfig::default();
        let (mut console, buf) = quiet_console();
        let opener = RecordingOpener::default();
        let fetcher = FakeFetcher::status(StatusCode::INTERNAL_SERVER_ERROR);
        let mut session = Session {
            config: &config,
            console: &mut console,
            opener: &opener,
            fetcher: &fetcher,
            workdir: dir.path().to_path_buf(),
        };
        // Exit is never read: the session stops at the failure.
        let mut prompt = ScriptedChoices::new(&[MenuChoice::ViewResume, MenuChoice::Exit]);

        let outcome = run_session(&Menu::standard(), &mut prompt, &mut session).unwrap();

        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(prompt.prompts, 1);
        assert!(files_in(dir.path()).is_empty());
        let out = buf.contents();
        assert!(out.contains("✖ Failed to download resume."));
        assert!(out.contains("500"));
        assert!(!out.contains(FAREWELL));
    }

    #[test]
    fn continue_policy_returns_to_the_menu() {
        let dir = tempfile::tempdir().unwrap();
        let config = CardConfig {
            on_failure: FailurePolicy::Continue,
            ..CardConfig::default()
        };
        let (mut console, buf) = quiet_console();
        let opener = RecordingOpener::default();
        let fetcher = FakeFetcher::status(StatusCode::SERVICE_UNAVAILABLE);
        let mut session = Session {
            config: &config,
            console: &mut console,
            opener: &opener,
            fetcher: &fetcher,
            workdir: dir.path().to_path_buf(),
        };
        let mut prompt = ScriptedChoices::new(&[
            MenuChoice::ViewResume,
            MenuChoice::ViewGithub,
            MenuChoice::Exit,
        ]);

        let outcome = run_session(&Menu::standard(), &mut prompt, &mut session).unwrap();

        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(prompt.prompts, 3);
        assert_eq!(opener.opened(), vec!["https://github.com/lohitkolluri"]);
        assert!(buf.contents().contains(FAREWELL));
    }

    #[test]
    fn choice_missing_from_menu_is_an_error() {
        let config = CardConfig::default();
        let (mut console, _buf) = quiet_console();
        let opener = RecordingOpener::default();
        let fetcher = FakeFetcher::serving(b"");
        let mut session = Session {
            config: &config,
            console: &mut console,
            opener: &opener,
            fetcher: &fetcher,
            workdir: std::path::PathBuf::from("."),
        };
        let menu = Menu::new(vec![MenuEntry {
            label: "Exit".into(),
            choice: MenuChoice::Exit,
        }])
        .unwrap();
        let mut prompt = ScriptedChoices::new(&[MenuChoice::ViewGithub]);

        let err = run_session(&menu, &mut prompt, &mut session).unwrap_err();

        assert!(err.to_string().contains("viewGithub"));
        assert!(opener.opened().is_empty());
    }

    #[test]
    fn greeting_screen_shows_banner_card_and_tip() {
        let config = CardConfig::default();
        let (mut console, buf) = quiet_console();
        let opener = RecordingOpener::default();
        let fetcher = FakeFetcher::serving(b"");
        let mut session = Session {
            config: &config,
            console: &mut console,
            opener: &opener,
            fetcher: &fetcher,
            workdir: std::path::PathBuf::from("."),
        };

        show_card(&mut session).unwrap();

        let out = buf.contents();
        assert!(out.starts_with("👋 Hi there, I'm Lohit Kolluri"));
        assert!(out.contains('╭'));
        assert!(out.contains(TIP));
    }
}
