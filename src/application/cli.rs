use crate::application::{Config, ExtractOverrides, FolioApp, extract_resume};
use crate::domain::{SystemClock, ViewMonth};
use crate::infrastructure::{FileSystemRepository, init_logging, resume_or_fallback};
use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "A terminal portfolio page with a month calendar")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive calendar (default)
    Calendar {
        /// Month to open (YYYY-MM format, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Print a month grid to stdout
    Month {
        /// Month to print (YYYY-MM format, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Print the resume document
    Resume {
        /// Resume JSON file (defaults to $FOLIO_RESUME or <data dir>/resume.json)
        #[arg(short, long)]
        path: Option<PathBuf>,
    },
    /// Build the resume JSON from the plain text of a resume
    Extract {
        /// Resume text, e.g. copied out of the PDF
        #[arg(short, long)]
        input: PathBuf,
        /// Output file (defaults to $FOLIO_RESUME or <data dir>/resume.json)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Subtitle shown under the name
        #[arg(long)]
        subtitle: Option<String>,
        /// GitHub profile URL
        #[arg(long)]
        github: Option<String>,
    },
}

fn parse_month(month: Option<String>) -> anyhow::Result<Option<ViewMonth>> {
    month
        .map(|value| value.parse::<ViewMonth>())
        .transpose()
        .context("Invalid --month")
}

impl Cli {
    pub fn run() -> anyhow::Result<()> {
        let cli = Self::parse();
        let config = Config::from_env()?;
        let _logger = init_logging(&config.log_dir)?;

        match cli.command {
            Some(Commands::Calendar { month }) => {
                let month = parse_month(month)?;
                FolioApp::new(config).run_tui(month)?;
            }
            Some(Commands::Month { month }) => {
                let month = parse_month(month)?;
                let app = FolioApp::new(config);
                app.print_month(Box::new(SystemClock), month, std::io::stdout().lock())?;
            }
            Some(Commands::Resume { path }) => {
                let app = match path {
                    Some(path) => {
                        let resume = resume_or_fallback(&FileSystemRepository::new(path));
                        FolioApp::with_resume(config, resume)
                    }
                    None => FolioApp::new(config),
                };
                app.print_resume(&mut std::io::stdout().lock())?;
            }
            Some(Commands::Extract {
                input,
                out,
                subtitle,
                github,
            }) => {
                let out = out.unwrap_or_else(|| config.resume_path.clone());
                let resume = extract_resume(&input, &out, ExtractOverrides { subtitle, github })?;
                println!(
                    "Wrote {} ({} projects) to {}",
                    resume.name,
                    resume.projects.len(),
                    out.display()
                );
            }
            None => {
                // Default: start the calendar on the current month
                FolioApp::new(config).run_tui(None)?;
            }
        }

        Ok(())
    }
}
