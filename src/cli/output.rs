use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// Unknown names fall back to text.
    pub fn from_name(name: &str) -> Self {
        match name {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub format: OutputFormat,
    pub pretty: bool,
    pub use_color: bool,
}

/// Resolve colour from the `--no-color` flag and the config `color` setting
/// (`auto`, `always`, `never`). `auto` honours NO_COLOR and requires a TTY.
pub fn detect_color(color_flag: bool, setting: &str) -> bool {
    if !color_flag {
        return false;
    }
    match setting {
        "always" => true,
        "never" => false,
        _ => std::env::var("NO_COLOR").is_err() && std::io::stdout().is_terminal(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_name() {
        assert_eq!(OutputFormat::from_name("json"), OutputFormat::Json);
        assert_eq!(OutputFormat::from_name("text"), OutputFormat::Text);
        assert_eq!(OutputFormat::from_name("yaml"), OutputFormat::Text);
    }

    #[test]
    fn no_color_flag_wins() {
        assert!(!detect_color(false, "always"));
    }

    #[test]
    fn explicit_settings() {
        assert!(detect_color(true, "always"));
        assert!(!detect_color(true, "never"));
    }
}
