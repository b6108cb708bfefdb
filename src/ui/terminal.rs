use is_terminal::IsTerminal;

/// ANSI decoration for console output. Plain text when color is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub color: bool,
}

impl Palette {
    /// Color only on a terminal stderr without `NO_COLOR` or `TERM=dumb`
    pub fn detect() -> Self {
        detect_impl(|key| std::env::var(key).ok(), std::io::stderr().is_terminal())
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("\x1b[{}m{}\x1b[0m", code, text)
        } else {
            text.to_string()
        }
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint("1", text)
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint("2", text)
    }

    pub fn red(&self, text: &str) -> String {
        self.paint("31", text)
    }

    pub fn green(&self, text: &str) -> String {
        self.paint("32", text)
    }

    pub fn yellow(&self, text: &str) -> String {
        self.paint("33", text)
    }
}

fn detect_impl(get_env: impl Fn(&str) -> Option<String>, is_tty: bool) -> Palette {
    let term_is_dumb = get_env("TERM").is_some_and(|t| t.eq_ignore_ascii_case("dumb"));
    let no_color = get_env("NO_COLOR").is_some() || get_env("SKEIN_NO_COLOR").is_some();
    Palette {
        color: is_tty && !term_is_dumb && !no_color,
    }
}
