#![warn(clippy::pedantic)]

use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use trainweek_domain::{
    EquipmentInventory, Feedback, Prompts, ScannerData, Service, TrainingWeek, UserProfile,
};
use trainweek_storage::{
    FileStorage, load_config, load_program_references, load_week_templates, read_json,
};

mod logger;

#[derive(Parser)]
#[command(
    name = "trainweek",
    about = "Assemble the inputs of a weekly training plan",
    long_about = "Filter the exercise catalog for a user, select the week template and render the prompt of the plan generation"
)]
struct Args {
    /// Exercise catalog (CSV with header row, or JSON array of rows)
    #[arg(long)]
    catalog: PathBuf,

    /// Configuration (YAML)
    #[arg(long)]
    config: PathBuf,

    /// Week templates (JSON), the built-in templates are used otherwise
    #[arg(long)]
    week_templates: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, short = 'v')]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the eligible exercises per day type
    Exercises {
        #[arg(long)]
        skill: String,
        #[arg(long)]
        equipment: Vec<String>,
        #[arg(long)]
        days: u8,
    },
    /// Print the week skeleton and the day type rotation
    Week {
        #[arg(long)]
        days: u8,
    },
    /// Print the prompt of the first week, or of the next week if feedback is given
    Prompt {
        /// User profile (JSON)
        #[arg(long)]
        user: PathBuf,
        /// Body scanner analysis (JSON)
        #[arg(long, conflicts_with = "feedback")]
        scanner: Option<PathBuf>,
        /// Feedback on the previous week (easy, normal or hard)
        #[arg(long, requires = "previous")]
        feedback: Option<String>,
        /// Plan of the previous week (JSON)
        #[arg(long, requires = "feedback")]
        previous: Option<PathBuf>,
        /// Directory of example programs (*.txt), overrides the configuration
        #[arg(long)]
        examples_dir: Option<PathBuf>,
        /// Expert recommendations (text), overrides the configuration
        #[arg(long)]
        recommendations: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init(if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    })?;

    let service = Service::new(
        FileStorage::new(&args.catalog),
        load_config(&args.config)?,
        load_week_templates(args.week_templates.as_deref())?,
    )?;

    match args.command {
        Command::Exercises {
            skill,
            equipment,
            days,
        } => {
            let (_, eligible) =
                service.eligible_exercises(&skill, &EquipmentInventory::new(&equipment), days)?;
            println!("{}", service.config().exercises_formatter.format(&eligible));
        }
        Command::Week { days } => {
            let week = service.week_template(days)?;
            println!("{}", serde_json::to_string_pretty(&week.skeleton)?);
            println!(
                "{}",
                week.day_types
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" -> ")
            );
        }
        Command::Prompt {
            user,
            scanner,
            feedback,
            previous,
            examples_dir,
            recommendations,
        } => {
            let profile: UserProfile = read_json(&user)?;
            let context = service.plan_context(profile, Local::now().date_naive())?;
            let mut assistant = service.config().assistant.clone();
            if examples_dir.is_some() {
                assistant.training_program_examples_dir = examples_dir;
            }
            if recommendations.is_some() {
                assistant.recommendations_path = recommendations;
            }
            let references = load_program_references(&assistant)?;
            let prompts = Prompts::new(service.config()).with_references(&references);
            let prompt = match (feedback, previous) {
                (Some(feedback), Some(previous)) => {
                    let previous: TrainingWeek = read_json(&previous)?;
                    prompts.next_week(&context, Feedback::parse(&feedback)?, &previous)?
                }
                _ => {
                    let scanner = scanner
                        .map(|path| read_json::<ScannerData>(&path))
                        .transpose()?;
                    prompts.first_week(&context, scanner.as_ref())?
                }
            };
            println!("{prompt}");
        }
    }

    Ok(())
}
