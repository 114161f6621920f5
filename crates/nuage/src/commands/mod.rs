//! Command dispatch: bridges CLI args -> entity requests -> output formatting.

pub mod config_cmd;
pub mod entities;
pub mod grammar;
pub mod shell;
pub mod util;

use nuage_api::Session;

use crate::cli::{Command, GlobalOpts};
use crate::config::ConnSettings;
use crate::error::CliError;
use crate::output;

use self::entities::Outcome;
use self::grammar::Request;

/// Build a session from `settings` and log in.
pub async fn connect(settings: &ConnSettings) -> Result<Session, CliError> {
    let mut session = Session::new(&settings.session_config()?)?;
    let (organization, username, password) = settings.login()?;
    let credential = session.authenticate(organization, username, password).await?;
    tracing::info!(
        user = %credential.user_name,
        enterprise = %credential.enterprise_name,
        "connected"
    );
    Ok(session)
}

/// Dispatch a controller-bound one-shot command.
pub async fn dispatch(cmd: Command, global: &GlobalOpts) -> Result<(), CliError> {
    let request = match &cmd {
        Command::Get(args) => {
            let mut words = vec![args.collection.as_str()];
            words.extend(args.id.as_deref());
            words.extend(args.children.as_deref());
            grammar::parse_get(&words)?
        }
        Command::Create(args) => {
            let words: Vec<&str> = std::iter::once(args.entity.as_str())
                .chain(args.args.iter().map(String::as_str))
                .collect();
            grammar::parse_create(&words)?
        }
        Command::Delete(args) => grammar::parse_delete(&[args.entity.as_str(), args.id.as_str()])?,
        // Shell, Config and Completions are handled before dispatch
        Command::Shell | Command::Config(_) | Command::Completions(_) => unreachable!(),
    };

    if let Request::Delete { kind, id } = &request {
        let prompt = format!("Delete {kind} {id}? Children are removed with it.");
        if !util::confirm(&prompt, &format!("{kind} {id}"), global.yes)? {
            return Ok(());
        }
    }

    let settings = ConnSettings::resolve(global)?;
    let session = connect(&settings).await?;
    report(entities::execute(&session, request, global.output).await?, global);
    Ok(())
}

/// Print a request's outcome: rendered data to stdout, status to stderr.
pub fn report(outcome: Outcome, global: &GlobalOpts) {
    match outcome {
        Outcome::Rendered(text) => output::print_output(&text, global.quiet),
        Outcome::Deleted { kind, id } if !global.quiet => {
            let color = output::should_color(global.color);
            eprintln!("{}", output::success(&format!("{kind} {id} deleted"), color));
        }
        Outcome::Deleted { .. } => {}
    }
}
