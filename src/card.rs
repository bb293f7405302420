// Renders the greeting banner and the boxed profile card.
//
// Lines are built from styled spans and measured in terminal columns
// before any colour codes are added, so the border lines up whether or not
// the output is coloured.

use std::fmt::Write as _;

use crossterm::style::{style, Attribute, Color, Stylize};
use unicode_width::UnicodeWidthStr;

use crate::config::{Profile, GITHUB_BASE, LINKEDIN_BASE};

const BORDER: Color = Color::Green;
const BACKGROUND: Color = Color::Rgb { r: 0x33, g: 0x33, b: 0x33 };
/// Columns of padding left and right of the text inside the box.
const PAD_X: usize = 3;
/// Rows of padding above and below the text.
const PAD_Y: usize = 1;

#[derive(Debug, Clone, Default)]
struct Span {
    text: String,
    fg: Option<Color>,
    attrs: Vec<Attribute>,
}

impl Span {
    fn new(text: impl Into<String>) -> Self {
        Span {
            text: text.into(),
            ..Span::default()
        }
    }

    fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    fn bold(mut self) -> Self {
        self.attrs.push(Attribute::Bold);
        self
    }

    fn italic(mut self) -> Self {
        self.attrs.push(Attribute::Italic);
        self
    }

    fn render(&self, out: &mut String, bg: Option<Color>) {
        if self.fg.is_none() && self.attrs.is_empty() && bg.is_none() {
            out.push_str(&self.text);
            return;
        }
        let mut styled = style(self.text.as_str());
        if let Some(fg) = self.fg {
            styled = styled.with(fg);
        }
        if let Some(bg) = bg {
            styled = styled.on(bg);
        }
        for attr in &self.attrs {
            styled = styled.attribute(*attr);
        }
        let _ = write!(out, "{styled}");
    }
}

type Line = Vec<Span>;

fn width(line: &[Span]) -> usize {
    line.iter().map(|s| s.text.width()).sum()
}

fn labelled(label: &str, value: Vec<Span>) -> Line {
    let mut line = vec![Span::new(format!("{label}:")).fg(Color::White).bold(), Span::new("  ")];
    line.extend(value);
    line
}

fn card_lines(profile: &Profile) -> Vec<Line> {
    let mut lines = vec![
        vec![Span::new(&profile.name).fg(Color::Green).bold()],
        vec![],
        labelled(
            "Education",
            vec![
                Span::new(&profile.role).fg(Color::White),
                Span::new(" "),
                Span::new(&profile.organization)
                    .fg(Color::Rgb { r: 0x2b, g: 0x82, b: 0xb2 })
                    .bold(),
            ],
        ),
        vec![],
        labelled(
            "GitHub",
            vec![
                Span::new(GITHUB_BASE).fg(Color::Grey),
                Span::new(&profile.github_user).fg(Color::Green),
            ],
        ),
        labelled(
            "LinkedIn",
            vec![
                Span::new(LINKEDIN_BASE).fg(Color::Grey),
                Span::new(&profile.linkedin_user).fg(Color::Blue),
            ],
        ),
        labelled("Website", vec![Span::new(&profile.website).fg(Color::Cyan)]),
        vec![],
    ];

    let (cmd, rest) = profile
        .card_command
        .split_once(' ')
        .unwrap_or((profile.card_command.as_str(), ""));
    let mut command = vec![Span::new(cmd).fg(Color::Red)];
    if !rest.is_empty() {
        command.push(Span::new(format!(" {rest}")).fg(Color::White));
    }
    lines.push(labelled("Business Card", command));

    if !profile.taglines.is_empty() {
        lines.push(vec![]);
        lines.extend(
            profile
                .taglines
                .iter()
                .map(|t| vec![Span::new(t).italic()]),
        );
    }
    lines
}

/// Render the profile card inside a rounded box.
///
/// With `color` the text, border and background are styled. With
/// `columns` the box is centred in a terminal of that width.
pub fn render_card(profile: &Profile, color: bool, columns: Option<u16>) -> String {
    let lines = card_lines(profile);
    let inner = lines.iter().map(|l| width(l)).max().unwrap_or(0) + 2 * PAD_X;
    let box_width = inner + 2;
    let indent = match columns {
        Some(cols) if usize::from(cols) > box_width => (usize::from(cols) - box_width) / 2,
        _ => 1,
    };
    let margin = " ".repeat(indent);
    let bg = color.then_some(BACKGROUND);

    let border = |out: &mut String, text: String| {
        if color {
            let _ = write!(out, "{}", style(text).with(BORDER));
        } else {
            out.push_str(&text);
        }
    };

    let mut out = String::from("\n");
    out.push_str(&margin);
    border(&mut out, format!("╭{}╮", "─".repeat(inner)));
    out.push('\n');

    let padding_row = vec![Span::new("")];
    let rows = std::iter::repeat(&padding_row)
        .take(PAD_Y)
        .chain(lines.iter())
        .chain(std::iter::repeat(&padding_row).take(PAD_Y));
    for line in rows {
        out.push_str(&margin);
        border(&mut out, "│".to_string());
        let fill = inner - PAD_X - width(line);
        Span::new(" ".repeat(PAD_X)).render(&mut out, bg);
        for span in line {
            if color {
                span.render(&mut out, bg);
            } else {
                out.push_str(&span.text);
            }
        }
        Span::new(" ".repeat(fill)).render(&mut out, bg);
        border(&mut out, "│".to_string());
        out.push('\n');
    }

    out.push_str(&margin);
    border(&mut out, format!("╰{}╯", "─".repeat(inner)));
    out.push_str("\n\n");
    out
}

/// Lines typed out before the card appears.
pub fn banner_lines(profile: &Profile) -> Vec<String> {
    vec![
        format!("👋 Hi there, I'm {} ({})", profile.name, profile.handle),
        "Welcome to my digital business card.".to_string(),
    ]
}

pub const TIP: &str = "💡 Tip: You can cmd/ctrl + click on the links to open them directly.";
