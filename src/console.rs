// Console output for the card: plain and coloured lines, typed-out
// messages, and a spinner for in-flight actions. Everything goes through
// one writer and one `Pacer`, so tests can capture the output and run
// the animations without sleeping.

use std::io::{self, IsTerminal, Write};
use std::thread;
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{execute, queue};
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::Pacing;

/// Source of the artificial delays used for animation.
pub trait Pacer {
    fn pause(&self, duration: Duration);
}

/// Really sleeps.
pub struct SleepPacer;

impl Pacer for SleepPacer {
    fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            thread::sleep(duration);
        }
    }
}

/// Never waits. Used when output is not a terminal, and in tests.
pub struct NoPacer;

impl Pacer for NoPacer {
    fn pause(&self, _duration: Duration) {}
}

/// Colour role of a line of output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Accent,
    Success,
    Failure,
    Highlight,
    Tip,
    Muted,
}

impl Tone {
    fn color(self) -> Option<Color> {
        match self {
            Tone::Plain => None,
            Tone::Accent => Some(Color::Cyan),
            Tone::Success => Some(Color::Green),
            Tone::Failure => Some(Color::Red),
            Tone::Highlight => Some(Color::Magenta),
            Tone::Tip => Some(Color::Yellow),
            Tone::Muted => Some(Color::Grey),
        }
    }
}

/// A running progress indicator. Finish it with `Console::succeed` or
/// `Console::fail`.
pub struct Progress {
    bar: ProgressBar,
}

pub struct Console {
    out: Box<dyn Write>,
    pacer: Box<dyn Pacer>,
    char_delay: Duration,
    color: bool,
    live: bool,
}

impl Console {
    /// Console on stdout. Colours, spinners, screen clearing and delays are
    /// only used when stdout is a terminal.
    pub fn stdout(pacing: &Pacing) -> Self {
        let live = io::stdout().is_terminal();
        let pacer: Box<dyn Pacer> = if live {
            Box::new(SleepPacer)
        } else {
            Box::new(NoPacer)
        };
        Console {
            out: Box::new(io::stdout()),
            pacer,
            char_delay: pacing.char_delay(),
            color: live,
            live,
        }
    }

    /// Plain console over any writer, with no colour and no spinner drawing.
    pub fn new(out: Box<dyn Write>, pacer: Box<dyn Pacer>, char_delay: Duration) -> Self {
        Console {
            out,
            pacer,
            char_delay,
            color: false,
            live: false,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn color(&self) -> bool {
        self.color
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn pause(&self, duration: Duration) {
        self.pacer.pause(duration);
    }

    pub fn clear_screen(&mut self) -> io::Result<()> {
        if self.live {
            execute!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }
        Ok(())
    }

    /// Write a pre-rendered block as is.
    pub fn block(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            self.out.write_all(b"\n")?;
        }
        self.out.flush()
    }

    pub fn blank(&mut self) -> io::Result<()> {
        self.out.write_all(b"\n")?;
        self.out.flush()
    }

    pub fn line(&mut self, tone: Tone, text: &str) -> io::Result<()> {
        self.set_tone(tone)?;
        queue!(self.out, Print(text))?;
        self.reset_tone(tone)?;
        queue!(self.out, Print("\n"))?;
        self.out.flush()
    }

    /// Write `text` one character at a time, pausing between characters.
    pub fn type_line(&mut self, tone: Tone, text: &str) -> io::Result<()> {
        self.set_tone(tone)?;
        for ch in text.chars() {
            queue!(self.out, Print(ch))?;
            self.out.flush()?;
            self.pacer.pause(self.char_delay);
        }
        self.reset_tone(tone)?;
        queue!(self.out, Print("\n"))?;
        self.out.flush()
    }

    /// Start a spinner showing `message`. The spinner is only drawn on a
    /// live terminal; the outcome line is always written to the console.
    pub fn start(&mut self, message: &str) -> Progress {
        let bar = if self.live {
            let bar = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
                bar.set_style(style);
            }
            bar.enable_steady_tick(Duration::from_millis(80));
            bar
        } else {
            ProgressBar::hidden()
        };
        bar.set_message(message.to_string());
        log::debug!("progress started: {message}");
        Progress { bar }
    }

    pub fn succeed(&mut self, progress: Progress, message: &str) -> io::Result<()> {
        progress.bar.finish_and_clear();
        self.line(Tone::Success, &format!("✔ {message}"))
    }

    pub fn fail(&mut self, progress: Progress, message: &str) -> io::Result<()> {
        progress.bar.finish_and_clear();
        self.line(Tone::Failure, &format!("✖ {message}"))
    }

    fn set_tone(&mut self, tone: Tone) -> io::Result<()> {
        if let (true, Some(color)) = (self.color, tone.color()) {
            queue!(self.out, SetForegroundColor(color))?;
        }
        Ok(())
    }

    fn reset_tone(&mut self, tone: Tone) -> io::Result<()> {
        if self.color && tone.color().is_some() {
            queue!(self.out, ResetColor)?;
        }
        Ok(())
    }
}
