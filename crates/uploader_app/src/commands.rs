use std::path::PathBuf;

use thiserror::Error;
use uploader_core::FileId;

pub const HELP: &str = "\
Commands:
  add <path>    stage a file (video files expected)
  remove <id>   drop a staged file
  list          show staged files
  upload        send the first staged file
  clear         empty the staging list
  help          show this text
  quit          exit (waits for a running upload)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(PathBuf),
    Remove(FileId),
    List,
    Upload,
    Clear,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command {0:?}; type `help` for a list")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("{0:?} is not a file id")]
    InvalidId(String),
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "add" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("add"));
            }
            Command::Add(PathBuf::from(rest))
        }
        "remove" | "rm" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("remove"));
            }
            let id = rest
                .trim_start_matches('#')
                .parse()
                .map_err(|_| CommandError::InvalidId(rest.to_string()))?;
            Command::Remove(id)
        }
        "list" | "ls" => Command::List,
        "upload" | "next" => Command::Upload,
        "clear" => Command::Clear,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(
            parse_command("add  clips/My Video.mp4 ").unwrap(),
            Some(Command::Add(PathBuf::from("clips/My Video.mp4")))
        );
        assert_eq!(parse_command("remove 3").unwrap(), Some(Command::Remove(3)));
        assert_eq!(parse_command("rm #12").unwrap(), Some(Command::Remove(12)));
        assert_eq!(parse_command("UPLOAD").unwrap(), Some(Command::Upload));
        assert_eq!(parse_command("   ").unwrap(), None);
    }

    #[test]
    fn reports_bad_input() {
        assert_eq!(
            parse_command("add"),
            Err(CommandError::MissingArgument("add"))
        );
        assert_eq!(
            parse_command("remove abc"),
            Err(CommandError::InvalidId("abc".to_string()))
        );
        assert_eq!(
            parse_command("launch"),
            Err(CommandError::Unknown("launch".to_string()))
        );
    }
}
