//! Command-line argument parsing for the streamchat binary.

/// Options for an interactive chat session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Endpoint overriding the configured one
    pub endpoint: Option<String>,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Run the interactive chat (default)
    Run(RunOptions),
    /// Arguments could not be parsed
    Invalid(String),
}

/// Parse command-line arguments and return the appropriate command.
///
/// # Arguments
///
/// * `args` - Iterator of command-line arguments (typically `std::env::args()`)
///
/// # Examples
///
/// ```
/// use streamchat::cli::args::{parse_args, CliCommand, RunOptions};
///
/// let args = vec!["streamchat".to_string(), "--url".to_string(), "http://h/chat".to_string()];
/// assert_eq!(
///     parse_args(args.into_iter()),
///     CliCommand::Run(RunOptions { endpoint: Some("http://h/chat".to_string()) })
/// );
/// ```
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let mut options = RunOptions::default();
    // Skip the program name
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return CliCommand::Version,
            "--help" | "-h" => return CliCommand::Help,
            "--url" | "-u" => match args.next() {
                Some(url) => options.endpoint = Some(url),
                None => return CliCommand::Invalid(format!("{} requires a value", arg)),
            },
            other => {
                if let Some(url) = other.strip_prefix("--url=") {
                    options.endpoint = Some(url.to_string());
                } else {
                    return CliCommand::Invalid(format!("unknown argument '{}'", other));
                }
            }
        }
    }

    CliCommand::Run(options)
}

/// Usage text printed for `--help`.
pub fn usage() -> String {
    format!(
        "streamchat {}\n\n\
         Usage: streamchat [--url <endpoint>]\n\n\
         Type a message and press Enter. Sending while a reply is streaming\n\
         replaces it. Ctrl-D waits for the current reply and exits; Ctrl-C exits.\n\n\
         Options:\n  \
         -u, --url <endpoint>  chat endpoint (env STREAMCHAT_URL)\n  \
         -V, --version         print version\n  \
         -h, --help            print this help\n",
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliCommand {
        let mut all = vec!["streamchat".to_string()];
        all.extend(args.iter().map(|a| a.to_string()));
        parse_args(all.into_iter())
    }

    #[test]
    fn test_parse_version_flag() {
        assert_eq!(parse(&["--version"]), CliCommand::Version);
        assert_eq!(parse(&["-V"]), CliCommand::Version);
    }

    #[test]
    fn test_parse_help_flag() {
        assert_eq!(parse(&["-h"]), CliCommand::Help);
    }

    #[test]
    fn test_parse_no_args() {
        assert_eq!(parse(&[]), CliCommand::Run(RunOptions::default()));
    }

    #[test]
    fn test_parse_url_forms() {
        let expected = CliCommand::Run(RunOptions {
            endpoint: Some("http://h:1/chat".to_string()),
        });
        assert_eq!(parse(&["--url", "http://h:1/chat"]), expected);
        assert_eq!(parse(&["-u", "http://h:1/chat"]), expected);
        assert_eq!(parse(&["--url=http://h:1/chat"]), expected);
    }

    #[test]
    fn test_parse_url_missing_value() {
        assert!(matches!(parse(&["--url"]), CliCommand::Invalid(_)));
    }

    #[test]
    fn test_parse_unknown_flag() {
        assert!(matches!(parse(&["--unknown"]), CliCommand::Invalid(_)));
    }

    #[test]
    fn test_usage_mentions_url_flag() {
        assert!(usage().contains("--url"));
    }
}
