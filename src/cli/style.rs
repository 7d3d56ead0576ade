//! Terminal styling for itercr output
//!
//! Every colored string goes through [`Stylize`], so one palette covers the
//! wizard, `submit`, `history` and the progress lines. Whether color is
//! emitted is decided per stream by `owo-colors` (`NO_COLOR`, `CLICOLOR`,
//! `CLICOLOR_FORCE`, TTY).
//!
//! - iteration and review ids, branches, the API URL: `accent`
//! - the "Submitted" line after both creates succeed: `success`
//! - non-fatal submission problems and rejected wizard steps: `warn`
//! - project lines, timestamps, workspace path, dry-run notes: `muted`
//! - section headings and iteration names: `emphasis`
//!
//! The `serve` command never styles anything; its stdout is JSON.

use indicatif::ProgressStyle;
use std::fmt::{self, Display};
use std::sync::OnceLock;

pub use owo_colors::Stream;
use owo_colors::{OwoColorize, Style};

const ACCENT: Style = Style::new().cyan();
const SUCCESS: Style = Style::new().green();
const ERROR: Style = Style::new().red();
const WARN: Style = Style::new().yellow();
const MUTED: Style = Style::new().dimmed();
const EMPHASIS: Style = Style::new().bold();

/// Text paired with its style and the stream it will be printed to
#[derive(Clone, Debug)]
pub struct Styled<T> {
    value: T,
    style: Style,
    stream: Stream,
}

impl<T> Styled<T> {
    const fn new(value: T, style: Style, stream: Stream) -> Self {
        Self {
            value,
            style,
            stream,
        }
    }
}

impl<T: Display> Display for Styled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self
            .value
            .if_supports_color(self.stream, |v| v.style(self.style));
        write!(f, "{rendered}")
    }
}

/// Palette methods, available on anything printable
pub trait Stylize: Display {
    /// Identifiers the user may want to copy
    fn accent(&self) -> Styled<&Self> {
        Styled::new(self, ACCENT, Stream::Stdout)
    }

    /// Outcome of a finished submission
    fn success(&self) -> Styled<&Self> {
        Styled::new(self, SUCCESS, Stream::Stdout)
    }

    /// Problems reported on stderr while the command carries on
    fn warn(&self) -> Styled<&Self> {
        Styled::new(self, WARN, Stream::Stderr)
    }

    /// Context around the main value
    fn muted(&self) -> Styled<&Self> {
        Styled::new(self, MUTED, Stream::Stdout)
    }

    /// Headings
    fn emphasis(&self) -> Styled<&Self> {
        Styled::new(self, EMPHASIS, Stream::Stdout)
    }
}

impl<T: Display + ?Sized> Stylize for T {}

/// Marks a created iteration or review
pub const CHECK: &str = "✓";

/// Marks a warning line
pub const CROSS: &str = "✗";

/// Joins an iteration to its review, a project to its branch
pub const ARROW: &str = "→";

/// Prefix for summary and history rows
pub const BULLET: &str = "○";

/// [`CHECK`] in green
#[inline]
pub const fn check() -> Styled<&'static str> {
    Styled::new(CHECK, SUCCESS, Stream::Stdout)
}

/// [`CROSS`] in red, for stderr lines
#[inline]
pub const fn cross() -> Styled<&'static str> {
    Styled::new(CROSS, ERROR, Stream::Stderr)
}

/// [`ARROW`] in cyan
#[inline]
pub const fn arrow() -> Styled<&'static str> {
    Styled::new(ARROW, ACCENT, Stream::Stdout)
}

/// [`BULLET`], dimmed
#[inline]
pub const fn bullet() -> Styled<&'static str> {
    Styled::new(BULLET, MUTED, Stream::Stdout)
}

/// Render `url` as an OSC 8 link where the terminal supports it
///
/// Used for the repository URL in the wizard summary.
pub fn hyperlink_url(stream: Stream, url: &str) -> String {
    let target = match stream {
        Stream::Stdout => supports_hyperlinks::Stream::Stdout,
        Stream::Stderr => supports_hyperlinks::Stream::Stderr,
    };
    if supports_hyperlinks::on(target) {
        terminal_link::Link::new(url, url).to_string()
    } else {
        url.to_string()
    }
}

/// Spinner shown while a submission phase is running
pub fn spinner_style() -> ProgressStyle {
    static STYLE: OnceLock<ProgressStyle> = OnceLock::new();
    STYLE
        .get_or_init(|| {
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .expect("hardcoded spinner template is valid")
                .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
        })
        .clone()
}

