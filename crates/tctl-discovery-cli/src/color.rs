//! Color enablement policy and status-token coloring (§4.7, §9).
//!
//! Color state is captured per-writer as a small value type rather than
//! a process-global, so tests can construct plain renderers without
//! touching the environment (§9 design note).

use owo_colors::OwoColorize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Colorizer {
    enabled: bool,
}

impl Colorizer {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// `FORCE_COLOR=1` wins outright; otherwise `NO_COLOR` (any value) or
    /// `TERM=dumb` disables color; otherwise `stdout_is_tty` decides
    /// (§4.7 "Color enablement").
    pub fn from_env(stdout_is_tty: bool) -> Self {
        let enabled = if std::env::var("FORCE_COLOR").as_deref() == Ok("1") {
            true
        } else if std::env::var_os("NO_COLOR").is_some() || std::env::var("TERM").as_deref() == Ok("dumb")
        {
            false
        } else {
            stdout_is_tty
        };
        Self::new(enabled)
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn plain(&self, text: &str) -> String {
        text.to_string()
    }

    pub fn section_header(&self, text: &str) -> String {
        if self.enabled {
            format!("{}", text.bold())
        } else {
            text.to_string()
        }
    }

    pub fn info(&self, text: &str) -> String {
        if self.enabled {
            format!("{}", text.cyan())
        } else {
            text.to_string()
        }
    }

    pub fn warning(&self, text: &str) -> String {
        if self.enabled {
            format!("{}", text.yellow())
        } else {
            text.to_string()
        }
    }

    /// `Success/RUNNING → green`, `Failed/Error → red`,
    /// `TimedOut/Syncing → yellow`, anything else unstyled (§4.7).
    pub fn status_token(&self, raw: &str) -> String {
        if !self.enabled {
            return raw.to_string();
        }
        match raw.to_ascii_lowercase().as_str() {
            "success" | "running" => format!("{}", raw.green()),
            "failed" | "error" => format!("{}", raw.red()),
            "timedout" | "syncing" => format!("{}", raw.yellow()),
            _ => raw.to_string(),
        }
    }

    /// Numeric "discovered" counts: green when `>0`, yellow otherwise.
    pub fn discovered_count(&self, n: u64) -> String {
        let text = n.to_string();
        if !self.enabled {
            return text;
        }
        if n > 0 {
            format!("{}", text.green())
        } else {
            format!("{}", text.yellow())
        }
    }

    /// Numeric "failed" counts: red when `>0`, unstyled otherwise.
    pub fn failed_count(&self, n: u64) -> String {
        let text = n.to_string();
        if !self.enabled || n == 0 {
            return text;
        }
        format!("{}", text.red())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn force_color_wins_over_everything() {
        std::env::set_var("FORCE_COLOR", "1");
        std::env::set_var("NO_COLOR", "1");
        assert!(Colorizer::from_env(false).enabled());
        std::env::remove_var("FORCE_COLOR");
        std::env::remove_var("NO_COLOR");
    }

    #[test]
    fn no_color_disables_even_on_a_tty() {
        std::env::remove_var("FORCE_COLOR");
        std::env::set_var("NO_COLOR", "1");
        assert!(!Colorizer::from_env(true).enabled());
        std::env::remove_var("NO_COLOR");
    }

    #[test]
    fn plain_passthrough_when_disabled() {
        let c = Colorizer::new(false);
        assert_eq!(c.status_token("Failed"), "Failed");
        assert_eq!(c.discovered_count(5), "5");
    }
}
