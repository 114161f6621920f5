//! Interactive shell.
//!
//! Reads one command per line and runs it against a session owned by the
//! loop. Errors are reported and the loop keeps going; only `exit`/`quit`
//! or end of input stop it.

use std::io::{self, IsTerminal};
use std::net::IpAddr;

use dialoguer::Input;
use nuage_api::Session;
use secrecy::SecretString;

use crate::cli::GlobalOpts;
use crate::config::ConnSettings;
use crate::error::CliError;
use crate::logging::{self, LogHandle};
use crate::output;

use super::entities;
use super::grammar::{self, Request};
use super::util::prompt_err;
use super::{connect, report};

const PROMPT: &str = "nuage";

const HELP: &str = "\
Entity commands:
  GET <collection>                       list a whole collection
  GET <collection> <ID>                  show one entity
  GET <collection> <ID> <children>       list an entity's children
  CREATE <entity> <name> [args...]       create an entity (see `nuage create --help`)
  DELETE <entity> <ID>                   delete an entity
Connection:
  setconn                                set VSD address and login
  makeconn                               log in with the current settings
  displayconn                            show the current connection
Other:
  debuglevel [debug|info]                change log verbosity
  help                                   show this text
  exit, quit                             leave the shell";

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Entity(Request),
    SetConn,
    MakeConn,
    DisplayConn,
    /// `true` for debug, `false` for info.
    DebugLevel(bool),
    Help,
    Exit,
    Empty,
}

/// Parse one line. Verbs are case-insensitive; arguments are not.
pub fn parse_line(line: &str) -> Result<ShellCommand, CliError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((verb, args)) = words.split_first() else {
        return Ok(ShellCommand::Empty);
    };

    let cmd = match verb.to_ascii_lowercase().as_str() {
        "get" => ShellCommand::Entity(grammar::parse_get(args)?),
        "create" => ShellCommand::Entity(grammar::parse_create(args)?),
        "delete" => ShellCommand::Entity(grammar::parse_delete(args)?),
        "setconn" => ShellCommand::SetConn,
        "makeconn" => ShellCommand::MakeConn,
        "displayconn" => ShellCommand::DisplayConn,
        "debuglevel" => ShellCommand::DebugLevel(
            args.first()
                .is_some_and(|level| level.eq_ignore_ascii_case("debug")),
        ),
        "help" | "?" => ShellCommand::Help,
        "exit" | "quit" => ShellCommand::Exit,
        other => {
            return Err(CliError::usage(
                format!("unknown command '{other}'"),
                "type `help` for the list of commands",
            ));
        }
    };
    Ok(cmd)
}

/// Shell state: connection settings, the session once connected, and
/// rendering options.
struct Shell<'a> {
    settings: ConnSettings,
    session: Option<Session>,
    global: &'a GlobalOpts,
    log: LogHandle,
    interactive: bool,
}

impl Shell<'_> {
    async fn handle(&mut self, cmd: ShellCommand) -> Result<(), CliError> {
        match cmd {
            ShellCommand::Entity(request) => {
                let session = self.session.as_ref().ok_or(CliError::NotConnected)?;
                let outcome = entities::execute(session, request, self.global.output).await?;
                report(outcome, self.global);
            }
            ShellCommand::SetConn => self.set_conn()?,
            ShellCommand::MakeConn => {
                // A failed login leaves the previous session in place.
                self.session = Some(connect(&self.settings).await?);
                if !self.global.quiet {
                    eprintln!("{}", self.status("Connected"));
                }
            }
            ShellCommand::DisplayConn => println!("{}", self.describe()),
            ShellCommand::DebugLevel(debug) => {
                let directive = if debug { "debug" } else { "info" };
                logging::set_level(&self.log, directive).map_err(|e| CliError::Validation {
                    field: "debuglevel".into(),
                    reason: e.to_string(),
                })?;
                eprintln!("{}", self.status(&format!("Log level set to {directive}")));
            }
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Exit | ShellCommand::Empty => {}
        }
        Ok(())
    }

    fn status(&self, message: &str) -> String {
        output::success(message, output::should_color(self.global.color))
    }

    fn describe(&self) -> String {
        if let Some(session) = &self.session {
            return session.to_string();
        }
        let endpoint = self
            .settings
            .base_url()
            .map_or_else(|_| String::new(), |url| url.to_string());
        format!(
            "Endpoint URL: [{endpoint}]\nAPI version:  [{}]\nNot connected",
            self.settings.api_version
        )
    }

    /// Prompt for address and login. Empty answers keep the current value.
    fn set_conn(&mut self) -> Result<(), CliError> {
        if !self.interactive {
            return Err(CliError::Validation {
                field: "setconn".into(),
                reason: "needs an interactive terminal; use a profile or --endpoint instead"
                    .into(),
            });
        }

        let ip: String = Input::new()
            .with_prompt("VSD IP address")
            .with_initial_text(self.settings.endpoint.clone().unwrap_or_default())
            .allow_empty(true)
            .validate_with(|input: &String| -> Result<(), String> {
                if input.is_empty() || input.parse::<IpAddr>().is_ok() {
                    Ok(())
                } else {
                    Err(format!("'{input}' is not an IP address"))
                }
            })
            .interact_text()
            .map_err(prompt_err)?;

        let organization = ask("Organization", self.settings.organization.as_deref())?;
        let username = ask("Username", self.settings.username.as_deref())?;
        let password = rpassword::prompt_password("Password: ").map_err(prompt_err)?;

        if !ip.is_empty() {
            self.settings.endpoint = Some(ip);
        }
        if !organization.is_empty() {
            self.settings.organization = Some(organization);
        }
        if !username.is_empty() {
            self.settings.username = Some(username);
        }
        if !password.is_empty() {
            self.settings.password = Some(SecretString::from(password));
        }

        // The old session points at the old settings.
        self.session = None;
        tracing::debug!(endpoint = ?self.settings.endpoint, "connection settings updated");
        eprintln!("Settings updated; run `makeconn` to log in.");
        Ok(())
    }

    fn prompt(&self) -> String {
        let label = match self.session.as_ref().and_then(Session::credential) {
            Some(c) => format!("{PROMPT} [{}@{}]", c.user_name, c.enterprise_name),
            None => PROMPT.to_owned(),
        };
        output::prompt(&label, output::should_color(self.global.color))
    }
}

fn ask(label: &str, current: Option<&str>) -> Result<String, CliError> {
    Input::new()
        .with_prompt(label)
        .with_initial_text(current.unwrap_or_default())
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)
}

/// Where shell lines come from.
enum Lines {
    Terminal,
    Piped(io::Lines<io::StdinLock<'static>>),
}

impl Lines {
    /// Next line, or `None` at end of input. An unreadable piped line is
    /// returned as an error and the following lines stay available.
    fn next(&mut self, prompt: &str) -> Option<Result<String, CliError>> {
        match self {
            // A failed prompt (closed terminal, Ctrl-D) ends the session.
            Self::Terminal => Input::<String>::new()
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .inspect_err(|e| tracing::debug!(error = %e, "prompt closed"))
                .ok()
                .map(Ok),
            Self::Piped(lines) => lines.next().map(|line| line.map_err(CliError::from)),
        }
    }
}

pub async fn run(global: &GlobalOpts, log: LogHandle) -> Result<(), CliError> {
    let interactive = io::stdin().is_terminal();
    let mut shell = Shell {
        settings: ConnSettings::resolve(global)?,
        session: None,
        global,
        log,
        interactive,
    };
    let mut lines = if interactive {
        eprintln!("nuage shell. Type `help` for commands, `exit` to leave.");
        Lines::Terminal
    } else {
        Lines::Piped(io::stdin().lines())
    };

    while let Some(line) = lines.next(&shell.prompt()) {
        let result = match line.and_then(|line| parse_line(&line)) {
            Ok(ShellCommand::Exit) => break,
            Ok(cmd) => shell.handle(cmd).await,
            Err(e) => Err(e),
        };
        if let Err(err) = result {
            eprintln!("{:?}", miette::Report::new(err));
        }
    }
    Ok(())
}
