use crate::commands::{run_letter_export, run_letter_text, run_score, LetterArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use love_notes::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Love Notes",
    about = "Score name pairs and compose love letters from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Compute the love score for two names
    Score(ScoreArgs),
    /// Compose a love letter
    Letter {
        #[command(subcommand)]
        command: LetterCommand,
    },
}

#[derive(Subcommand, Debug)]
enum LetterCommand {
    /// Print the plain-text letter, as it would be copied to the clipboard
    Text(LetterArgs),
    /// Render the letter to an image file
    Export(LetterArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Letter {
            command: LetterCommand::Text(args),
        } => run_letter_text(args),
        Command::Letter {
            command: LetterCommand::Export(args),
        } => run_letter_export(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["love-notes"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_letter_export_flags() {
        let cli = Cli::try_parse_from([
            "love-notes",
            "letter",
            "export",
            "--to",
            "Sam",
            "--body",
            "Hi",
            "--today",
            "2026-02-14",
            "--out-dir",
            "/tmp",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Letter {
                command: LetterCommand::Export(args),
            }) => {
                assert_eq!(args.to.as_deref(), Some("Sam"));
                assert_eq!(args.out_dir.as_deref(), Some(std::path::Path::new("/tmp")));
                assert!(args.today.is_some());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn score_requires_two_names() {
        assert!(Cli::try_parse_from(["love-notes", "score", "Alice"]).is_err());
        assert!(Cli::try_parse_from(["love-notes", "score", "Alice", "Bob"]).is_ok());
    }
}
