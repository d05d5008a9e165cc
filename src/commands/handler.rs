//! Command Parsing and Execution
//!
//! This module turns the parser's raw token sequences into typed commands
//! and executes them against the storage engine.
//!
//! ## Supported Commands
//!
//! - `SET key value` - exactly three tokens
//! - `GET key` - exactly two tokens
//! - `DEL key` - exactly two tokens
//!
//! Command names are matched case-insensitively; keys and values are taken
//! verbatim and may contain any byte. An unknown name or a wrong token
//! count produces an error reply and leaves the connection open.

use crate::protocol::Reply;
use crate::storage::StorageEngine;
use bytes::Bytes;
use thiserror::Error;

/// A fully validated client command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Store a value under a key.
    Set { key: Bytes, value: Bytes },

    /// Read the value of a key.
    Get { key: Bytes },

    /// Remove a key.
    Del { key: Bytes },
}

/// Why a token sequence did not form a valid command.
///
/// The `Display` text is sent to the client verbatim inside an error reply,
/// so every message carries the `ERR` prefix.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The request array had no elements
    #[error("ERR empty command")]
    Empty,

    /// The command name was not valid UTF-8
    #[error("ERR invalid command name")]
    InvalidName,

    /// The command name is not one of SET/GET/DEL
    #[error("ERR unknown command '{0}'")]
    Unknown(String),

    /// Right command, wrong number of tokens
    #[error("ERR wrong number of arguments for '{0}' command")]
    WrongArity(&'static str),
}

impl Command {
    /// Builds a command from the tokens of one parsed request.
    ///
    /// # Example
    ///
    /// ```
    /// use emberkv::commands::Command;
    /// use bytes::Bytes;
    ///
    /// let tokens = vec![Bytes::from("get"), Bytes::from("name")];
    /// let command = Command::from_tokens(tokens).unwrap();
    /// assert_eq!(command, Command::Get { key: Bytes::from("name") });
    /// ```
    pub fn from_tokens(tokens: Vec<Bytes>) -> Result<Command, CommandError> {
        let mut tokens = tokens.into_iter();
        let name = tokens.next().ok_or(CommandError::Empty)?;
        let name = std::str::from_utf8(&name)
            .map_err(|_| CommandError::InvalidName)?
            .to_uppercase();

        let args: Vec<Bytes> = tokens.collect();
        match name.as_str() {
            "SET" => match <[Bytes; 2]>::try_from(args) {
                Ok([key, value]) => Ok(Command::Set { key, value }),
                Err(_) => Err(CommandError::WrongArity("SET")),
            },
            "GET" => match <[Bytes; 1]>::try_from(args) {
                Ok([key]) => Ok(Command::Get { key }),
                Err(_) => Err(CommandError::WrongArity("GET")),
            },
            "DEL" => match <[Bytes; 1]>::try_from(args) {
                Ok([key]) => Ok(Command::Del { key }),
                Err(_) => Err(CommandError::WrongArity("DEL")),
            },
            _ => Err(CommandError::Unknown(name)),
        }
    }
}

/// Executes commands against the storage engine.
///
/// Owned by the storage service task; nothing else touches the engine.
pub struct CommandHandler {
    engine: StorageEngine,
}

impl CommandHandler {
    /// Creates a handler around an engine that has already been recovered.
    pub fn new(engine: StorageEngine) -> Self {
        Self { engine }
    }

    /// Executes one command and produces its reply.
    pub fn execute(&mut self, command: Command) -> Reply {
        match command {
            Command::Set { key, value } => {
                self.engine.set(key, value);
                Reply::Ok
            }
            Command::Get { key } => match self.engine.get(&key) {
                Some(value) => Reply::Bulk(value),
                None => Reply::NullBulk,
            },
            Command::Del { key } => {
                let existed = self.engine.del(&key);
                Reply::Integer(i64::from(existed))
            }
        }
    }

    /// The engine, for inspection after a sequence of commands.
    pub fn engine(&self) -> &StorageEngine {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aof::MemoryAof;

    fn b(s: &str) -> Bytes {
        Bytes::copy_from_slice(s.as_bytes())
    }

    fn tokens(parts: &[&str]) -> Vec<Bytes> {
        parts.iter().map(|p| b(p)).collect()
    }

    fn handler() -> CommandHandler {
        CommandHandler::new(StorageEngine::new(4, Box::new(MemoryAof::new())))
    }

    #[test]
    fn test_from_tokens_set() {
        let command = Command::from_tokens(tokens(&["SET", "name", "alice"])).unwrap();
        assert_eq!(
            command,
            Command::Set { key: b("name"), value: b("alice") }
        );
    }

    #[test]
    fn test_from_tokens_is_case_insensitive() {
        assert!(matches!(
            Command::from_tokens(tokens(&["set", "k", "v"])),
            Ok(Command::Set { .. })
        ));
        assert!(matches!(
            Command::from_tokens(tokens(&["GeT", "k"])),
            Ok(Command::Get { .. })
        ));
        assert!(matches!(
            Command::from_tokens(tokens(&["del", "k"])),
            Ok(Command::Del { .. })
        ));
    }

    #[test]
    fn test_from_tokens_keys_stay_case_sensitive() {
        let command = Command::from_tokens(tokens(&["GET", "Name"])).unwrap();
        assert_eq!(command, Command::Get { key: b("Name") });
    }

    #[test]
    fn test_from_tokens_empty() {
        assert_eq!(Command::from_tokens(vec![]), Err(CommandError::Empty));
    }

    #[test]
    fn test_from_tokens_unknown_command() {
        assert_eq!(
            Command::from_tokens(tokens(&["PING"])),
            Err(CommandError::Unknown("PING".to_string()))
        );
    }

    #[test]
    fn test_from_tokens_arity_is_exact() {
        assert_eq!(
            Command::from_tokens(tokens(&["SET", "k"])),
            Err(CommandError::WrongArity("SET"))
        );
        assert_eq!(
            Command::from_tokens(tokens(&["SET", "k", "v", "extra"])),
            Err(CommandError::WrongArity("SET"))
        );
        assert_eq!(
            Command::from_tokens(tokens(&["GET"])),
            Err(CommandError::WrongArity("GET"))
        );
        assert_eq!(
            Command::from_tokens(tokens(&["DEL", "k", "extra"])),
            Err(CommandError::WrongArity("DEL"))
        );
    }

    #[test]
    fn test_error_messages_carry_err_prefix() {
        let err = Command::from_tokens(tokens(&["FOO"])).unwrap_err();
        assert_eq!(err.to_string(), "ERR unknown command 'FOO'");

        let err = Command::from_tokens(tokens(&["GET"])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "ERR wrong number of arguments for 'GET' command"
        );
    }

    #[test]
    fn test_execute_set_get_del_cycle() {
        let mut handler = handler();

        let reply = handler.execute(Command::Set { key: b("name"), value: b("alice") });
        assert_eq!(reply, Reply::Ok);

        let reply = handler.execute(Command::Get { key: b("name") });
        assert_eq!(reply, Reply::Bulk(b("alice")));

        let reply = handler.execute(Command::Get { key: b("missing") });
        assert_eq!(reply, Reply::NullBulk);

        let reply = handler.execute(Command::Del { key: b("name") });
        assert_eq!(reply, Reply::Integer(1));

        let reply = handler.execute(Command::Del { key: b("name") });
        assert_eq!(reply, Reply::Integer(0));
    }
}
