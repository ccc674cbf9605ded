use crate::developer::StoryStatus;
use crate::risk::RiskLevel;
use colored::*;
use std::env;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,   // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "always" => Some(Self::Always),
            "never" => Some(Self::Never),
            _ => None,
        }
    }

    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattingConfig {
    pub color: ColorMode,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
        }
    }
}

impl FormattingConfig {
    pub fn new(color: ColorMode) -> Self {
        Self { color }
    }

    /// Honor NO_COLOR, CLICOLOR and CLICOLOR_FORCE.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        // https://no-color.org
        if env::var("NO_COLOR").is_ok() {
            config.color = ColorMode::Never;
        }

        if let Ok(val) = env::var("CLICOLOR") {
            if val == "0" {
                config.color = ColorMode::Never;
            }
        }

        if let Ok(val) = env::var("CLICOLOR_FORCE") {
            if val == "1" {
                config.color = ColorMode::Always;
            }
        }

        config
    }

    pub fn plain() -> Self {
        Self {
            color: ColorMode::Never,
        }
    }

    /// Apply a config-file color preference unless the environment forced one.
    pub fn with_preference(self, use_color: Option<bool>) -> Self {
        match (self.color, use_color) {
            (ColorMode::Auto, Some(true)) => Self::new(ColorMode::Always),
            (ColorMode::Auto, Some(false)) => Self::new(ColorMode::Never),
            _ => self,
        }
    }
}

pub trait OutputFormatter {
    fn header(&self, text: &str) -> String;
    fn bold(&self, text: &str) -> String;
    fn dim(&self, text: &str) -> String;
    fn risk(&self, level: RiskLevel) -> String;
    fn status(&self, status: StoryStatus) -> String;
}

pub struct ColoredFormatter;

impl OutputFormatter for ColoredFormatter {
    fn header(&self, text: &str) -> String {
        text.blue().bold().to_string()
    }

    fn bold(&self, text: &str) -> String {
        text.bold().to_string()
    }

    fn dim(&self, text: &str) -> String {
        text.dimmed().to_string()
    }

    fn risk(&self, level: RiskLevel) -> String {
        match level {
            RiskLevel::High => level.as_str().red().bold().to_string(),
            RiskLevel::Medium => level.as_str().yellow().to_string(),
            RiskLevel::Low => level.as_str().green().to_string(),
        }
    }

    fn status(&self, status: StoryStatus) -> String {
        match status {
            StoryStatus::Blocked => status.as_str().red().bold().to_string(),
            StoryStatus::Warning => status.as_str().yellow().to_string(),
            StoryStatus::Safe => status.as_str().green().to_string(),
        }
    }
}

pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn header(&self, text: &str) -> String {
        text.to_string()
    }

    fn bold(&self, text: &str) -> String {
        text.to_string()
    }

    fn dim(&self, text: &str) -> String {
        text.to_string()
    }

    fn risk(&self, level: RiskLevel) -> String {
        level.as_str().to_string()
    }

    fn status(&self, status: StoryStatus) -> String {
        status.as_str().to_string()
    }
}

pub fn formatter_for(config: FormattingConfig) -> Box<dyn OutputFormatter> {
    if config.color.should_use_color() {
        colored::control::set_override(true);
        Box::new(ColoredFormatter)
    } else {
        Box::new(PlainFormatter)
    }
}

fn detect_color_support() -> bool {
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    std::io::stdout().is_terminal()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_mode_parses_case_insensitively() {
        assert_eq!(ColorMode::parse("ALWAYS"), Some(ColorMode::Always));
        assert_eq!(ColorMode::parse("never"), Some(ColorMode::Never));
        assert_eq!(ColorMode::parse("sometimes"), None);
    }

    #[test]
    fn plain_formatter_prints_bare_labels() {
        let f = PlainFormatter;
        assert_eq!(f.risk(RiskLevel::High), "HIGH");
        assert_eq!(f.status(StoryStatus::Warning), "WARNING");
        assert_eq!(f.header("Summary"), "Summary");
    }

    #[test]
    fn config_preference_only_overrides_auto() {
        let auto = FormattingConfig::default();
        assert_eq!(auto.with_preference(Some(false)).color, ColorMode::Never);
        let forced = FormattingConfig::new(ColorMode::Always);
        assert_eq!(forced.with_preference(Some(false)).color, ColorMode::Always);
        assert_eq!(auto.with_preference(None).color, ColorMode::Auto);
    }
}
