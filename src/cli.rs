//! Command line parsing
//!
//! `static-web-page [--config <path>] [serve | invoke [event.json]]`

use crate::config::DEFAULT_CONFIG_PATH;

pub const USAGE: &str = "Usage: static-web-page [--config <path>] [serve | invoke [event.json]]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the local invocation host
    Serve,
    /// Invoke the function once; `None` sends a null event
    Invoke { event_file: Option<String> },
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub config_path: String,
    pub command: Command,
}

impl Args {
    /// Parse arguments, excluding the program name
    pub fn parse<I>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config_path = DEFAULT_CONFIG_PATH.to_string();
        let mut positional = Vec::new();
        let mut iter = args.into_iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-c" | "--config" => {
                    config_path = iter
                        .next()
                        .ok_or_else(|| format!("{arg} requires a path\n{USAGE}"))?;
                }
                "-h" | "--help" => {
                    return Ok(Self {
                        config_path,
                        command: Command::Help,
                    })
                }
                flag if flag.starts_with('-') => {
                    return Err(format!("Unknown option '{flag}'\n{USAGE}"));
                }
                _ => positional.push(arg),
            }
        }

        let mut positional = positional.into_iter();
        let command = match positional.next().as_deref() {
            None | Some("serve") => Command::Serve,
            Some("invoke") => Command::Invoke {
                event_file: positional.next(),
            },
            Some(other) => return Err(format!("Unknown command '{other}'\n{USAGE}")),
        };
        if let Some(extra) = positional.next() {
            return Err(format!("Unexpected argument '{extra}'\n{USAGE}"));
        }

        Ok(Self {
            config_path,
            command,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, String> {
        Args::parse(args.iter().map(ToString::to_string))
    }

    #[test]
    fn test_default_is_serve() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.command, Command::Serve);
        assert_eq!(args.config_path, DEFAULT_CONFIG_PATH);
    }

    #[test]
    fn test_invoke_with_and_without_event() {
        assert_eq!(
            parse(&["invoke"]).unwrap().command,
            Command::Invoke { event_file: None }
        );
        assert_eq!(
            parse(&["--config", "prod.toml", "invoke", "event.json"]).unwrap(),
            Args {
                config_path: "prod.toml".to_string(),
                command: Command::Invoke {
                    event_file: Some("event.json".to_string())
                },
            }
        );
    }

    #[test]
    fn test_errors() {
        assert!(parse(&["--config"]).is_err());
        assert!(parse(&["--verbose"]).is_err());
        assert!(parse(&["deploy"]).is_err());
        assert!(parse(&["invoke", "a.json", "b.json"]).is_err());
    }

    #[test]
    fn test_help() {
        assert_eq!(parse(&["serve", "-h"]).unwrap().command, Command::Help);
    }
}
