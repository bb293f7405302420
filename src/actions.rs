// Menu choices and what each of them does.
//
// `MenuChoice` is a closed set and `MenuChoice::action` maps it with an
// exhaustive match, so a choice without an action does not compile.

use std::fmt;
use std::path::PathBuf;

use crossterm::style::{style, Color, Stylize};

use crate::config::CardConfig;
use crate::console::{Console, Tone};
use crate::error::{ActionError, MenuError};
use crate::fetch::Fetcher;
use crate::opener::UrlOpener;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuChoice {
    SendEmail,
    ViewResume,
    ScheduleMeeting,
    VisitPortfolio,
    ViewGithub,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::SendEmail,
        MenuChoice::ViewResume,
        MenuChoice::ScheduleMeeting,
        MenuChoice::VisitPortfolio,
        MenuChoice::ViewGithub,
        MenuChoice::Exit,
    ];

    pub fn label(self) -> String {
        let (lead, keyword, _) = self.label_parts();
        format!("{lead}{keyword}")
    }

    /// Label with the keyword coloured, as shown on a colour terminal.
    pub fn styled_label(self) -> String {
        let (lead, keyword, color) = self.label_parts();
        if self.is_exit() {
            return format!("{}", style(format!("{lead}{keyword}")).with(color));
        }
        format!("{lead}{}", style(keyword).with(color).bold())
    }

    fn label_parts(self) -> (&'static str, &'static str, Color) {
        match self {
            MenuChoice::SendEmail => ("📧  Send me an ", "Email", Color::Green),
            MenuChoice::ViewResume => ("📥  Download my ", "Resume", Color::Magenta),
            MenuChoice::ScheduleMeeting => ("📅  Schedule a ", "Meeting", Color::Red),
            MenuChoice::VisitPortfolio => ("🌐  Visit my ", "Portfolio", Color::Cyan),
            MenuChoice::ViewGithub => ("🐙  View my ", "GitHub", Color::Blue),
            MenuChoice::Exit => ("🚪  ", "Exit", Color::Grey),
        }
    }

    pub fn is_exit(self) -> bool {
        self == MenuChoice::Exit
    }

    /// The action behind this choice, or `None` for the exit sentinel.
    pub fn action(self, config: &CardConfig) -> Option<Action> {
        let links = &config.links;
        let profile = &config.profile;
        let action = match self {
            MenuChoice::SendEmail => Action::Open {
                target: links.email.clone(),
                progress: "Opening your mail client...",
                success: "📧 Check your inbox, I'll get back to you soon!",
            },
            MenuChoice::ViewResume => Action::Download {
                url: links.resume_url.clone(),
                file_name: config.resume_file_name.clone(),
                progress: "Preparing to download resume...",
                success: "📄 Enjoy the read, let me know what you think!",
            },
            MenuChoice::ScheduleMeeting => Action::Open {
                target: links.meeting_url.clone(),
                progress: "Opening the scheduling page...",
                success: "📅 Meeting scheduled! Looking forward to chatting.",
            },
            MenuChoice::VisitPortfolio => Action::Open {
                target: profile.website.clone(),
                progress: "Opening my portfolio...",
                success: "🌐 Thanks for stopping by!",
            },
            MenuChoice::ViewGithub => Action::Open {
                target: profile.github_url(),
                progress: "Opening my GitHub profile...",
                success: "🐙 Stars and pull requests are always welcome!",
            },
            MenuChoice::Exit => return None,
        };
        Some(action)
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MenuChoice::SendEmail => "sendEmail",
            MenuChoice::ViewResume => "viewResume",
            MenuChoice::ScheduleMeeting => "scheduleMeeting",
            MenuChoice::VisitPortfolio => "visitPortfolio",
            MenuChoice::ViewGithub => "viewGithub",
            MenuChoice::Exit => "exit",
        };
        f.write_str(name)
    }
}

/// A single external effect plus the text shown around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Open a URL (web page or `mailto:`) with the default application.
    Open {
        target: String,
        progress: &'static str,
        success: &'static str,
    },
    /// Download a file into the working directory, then open it.
    Download {
        url: String,
        file_name: String,
        progress: &'static str,
        success: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    pub choice: MenuChoice,
}

/// Ordered, validated list of menu entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    entries: Vec<MenuEntry>,
}

impl Menu {
    /// Fails when there are no entries, no exit entry, or a choice is
    /// offered twice.
    pub fn new(entries: Vec<MenuEntry>) -> Result<Self, MenuError> {
        if entries.is_empty() {
            return Err(MenuError::Empty);
        }
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i].iter().any(|e| e.choice == entry.choice) {
                return Err(MenuError::Duplicate(entry.choice));
            }
        }
        if !entries.iter().any(|e| e.choice.is_exit()) {
            return Err(MenuError::MissingExit);
        }
        Ok(Menu { entries })
    }

    /// Every choice, in declaration order, with its plain label.
    pub fn standard() -> Self {
        Self::standard_styled(false)
    }

    /// Every choice, in declaration order. With `color` the keyword of each
    /// label is coloured.
    pub fn standard_styled(color: bool) -> Self {
        Menu {
            entries: MenuChoice::ALL
                .iter()
                .map(|&choice| MenuEntry {
                    label: if color {
                        choice.styled_label()
                    } else {
                        choice.label()
                    },
                    choice,
                })
                .collect(),
        }
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn labels(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.label.as_str()).collect()
    }

    pub fn choice_at(&self, index: usize) -> Option<MenuChoice> {
        self.entries.get(index).map(|e| e.choice)
    }

    pub fn offers(&self, choice: MenuChoice) -> bool {
        self.entries.iter().any(|e| e.choice == choice)
    }
}

/// Everything a handler needs. Built once in `main` and borrowed by the
/// session for its whole lifetime.
pub struct Session<'a> {
    pub config: &'a CardConfig,
    pub console: &'a mut Console,
    pub opener: &'a dyn UrlOpener,
    pub fetcher: &'a dyn Fetcher,
    /// Directory downloads are written to.
    pub workdir: PathBuf,
}

/// Run one action: spinner, effect, then a success or failure report.
/// Failures are reported here and returned to the caller.
pub fn perform(action: &Action, session: &mut Session<'_>) -> Result<(), ActionError> {
    match action {
        Action::Open {
            target,
            progress,
            success,
        } => {
            let bar = session.console.start(progress);
            session.console.pause(session.config.pacing.step_delay());
            match session.opener.open(target) {
                Ok(()) => {
                    session.console.succeed(bar, &format!("Opened {target}"))?;
                    session.console.type_line(Tone::Success, success)?;
                    session.console.blank()?;
                    Ok(())
                }
                Err(err) => report_failure(session.console, bar, "Could not open the link.", err),
            }
        }
        Action::Download {
            url,
            file_name,
            progress,
            success,
        } => {
            let bar = session.console.start(progress);
            session.console.pause(session.config.pacing.step_delay());
            let dest = session.workdir.join(file_name);
            let bytes = match session.fetcher.fetch_to(url, &dest) {
                Ok(bytes) => bytes,
                Err(err) => {
                    return report_failure(session.console, bar, "Failed to download resume.", err)
                }
            };
            log::debug!("downloaded {bytes} bytes from {url}");
            session
                .console
                .succeed(bar, "Resume downloaded successfully!")?;
            session.console.line(
                Tone::Success,
                &format!("📥 Resume saved at: {}", dest.display()),
            )?;

            // The file is complete at this point; only opening it can fail.
            let bar = session.console.start("Opening resume...");
            let target = dest.to_string_lossy();
            match session.opener.open(&target) {
                Ok(()) => {
                    session.console.succeed(bar, &format!("Opened {target}"))?;
                    session.console.type_line(Tone::Highlight, success)?;
                    session.console.blank()?;
                    Ok(())
                }
                Err(err) => {
                    report_failure(session.console, bar, "Could not open the saved resume.", err)
                }
            }
        }
    }
}

fn report_failure(
    console: &mut Console,
    bar: crate::console::Progress,
    headline: &str,
    err: ActionError,
) -> Result<(), ActionError> {
    log::warn!("action failed: {err}");
    console.fail(bar, headline)?;
    console.line(Tone::Failure, &format!("Error: {err}"))?;
    Err(err)
}
