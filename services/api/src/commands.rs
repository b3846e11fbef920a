use crate::infra::{default_exporter, parse_date};
use chrono::{Local, NaiveDate};
use clap::Args;
use love_notes::config::AppConfig;
use love_notes::error::AppError;
use love_notes::letter::{BudgetLevel, LetterFields, Notice};
use love_notes::score::ScoreReading;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// First name
    pub(crate) name_a: String,
    /// Second name
    pub(crate) name_b: String,
}

#[derive(Args, Debug, Default)]
pub(crate) struct LetterArgs {
    /// Recipient shown in the greeting line
    #[arg(long)]
    pub(crate) to: Option<String>,
    /// Sender shown under the closing
    #[arg(long)]
    pub(crate) from: Option<String>,
    /// Free-form date line. Defaults to today in long form.
    #[arg(long)]
    pub(crate) date: Option<String>,
    /// Letter body
    #[arg(long, conflicts_with = "body_file")]
    pub(crate) body: Option<String>,
    /// Read the letter body from a file
    #[arg(long)]
    pub(crate) body_file: Option<PathBuf>,
    /// Override "today" (YYYY-MM-DD) when the date line is defaulted
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Directory for exported images (defaults to APP_EXPORT_DIR)
    #[arg(long)]
    pub(crate) out_dir: Option<PathBuf>,
}

impl LetterArgs {
    fn fields(&self) -> Result<LetterFields, AppError> {
        let body = match (&self.body, &self.body_file) {
            (Some(body), _) => body.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)?,
            (None, None) => String::new(),
        };

        Ok(LetterFields {
            recipient: self.to.clone().unwrap_or_default(),
            sender: self.from.clone().unwrap_or_default(),
            date: self.date.clone(),
            body,
        })
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let reading = ScoreReading::for_names(&args.name_a, &args.name_b)?;
    println!("{}", reading.headline());
    Ok(())
}

pub(crate) fn run_letter_text(args: LetterArgs) -> Result<(), AppError> {
    let fields = args.fields()?;
    let budget = fields.char_budget();

    let text = match args.today {
        Some(today) => fields.render_on(today),
        None => fields.render(),
    };
    println!("{text}");
    if budget.level != BudgetLevel::Normal {
        eprintln!("body length {} ({:?})", budget.counter(), budget.level);
    }
    Ok(())
}

pub(crate) async fn run_letter_export(args: LetterArgs) -> Result<(), AppError> {
    let output_dir = match &args.out_dir {
        Some(dir) => dir.clone(),
        None => AppConfig::load()?.export.output_dir,
    };
    let fields = args.fields()?;
    let exporter = default_exporter();

    println!("{}", Notice::export_started(exporter.format().label()).text);
    let export = match exporter.export(&fields, args.today()).await {
        Ok(export) => export,
        Err(err) => {
            eprintln!("{}", Notice::export_failed(err.format().label()).text);
            return Err(err.into());
        }
    };

    let path = output_dir.join(&export.file_name);
    tokio::fs::write(&path, &export.image.bytes).await?;
    println!("{}", export.notice().text);
    println!("{}", path.display());
    Ok(())
}
