// ABOUTME: MacroLens CLI - runs the nutrition engine over JSON documents
// ABOUTME: Computes targets, rescales nutrients, normalizes database records, summarizes logs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 MacroLens
//!
//! Usage:
//! ```bash
//! # Daily targets for a profile
//! macrolens-cli targets --gender male --age 30 --height-cm 180 --weight-kg 80 \
//!     --activity moderate --goal lose_weight
//!
//! # Same profile in imperial units
//! macrolens-cli targets --gender male --age 30 --height-ft 5 --height-in 11 --weight-lb 176 \
//!     --goal lose_weight --diet keto
//!
//! # Rescale a nutrient profile from 150g to 200g
//! macrolens-cli scale --input rice.json --from 150g --to 200g
//!
//! # Normalize a food-database search response read from stdin
//! macrolens-cli normalize --input - < search.json
//!
//! # Summarize a JSON array of food logs
//! macrolens-cli summary --input logs.json --period week --protein-goal 120
//! ```
//!
//! All output is JSON on stdout; logs go to stderr.

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use macrolens::commands;
use macrolens::errors::AppResult;
use macrolens::intelligence::{convert_height_to_cm, convert_lbs_to_kg, ProgressPeriod};
use macrolens::logging::LoggingConfig;
use macrolens::models::{
    ActivityLevel, BodyProfile, DailyGoals, DietaryPreference, Gender, GoalProfile,
    HealthCondition, PrimaryGoal,
};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::{self, AsyncReadExt, AsyncWriteExt};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "macrolens-cli",
    about = "MacroLens nutrition engine CLI",
    long_about = "Runs the MacroLens nutrition engine over JSON documents and prints JSON results."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Compute daily calorie and macro targets
    Targets(TargetArgs),

    /// Rescale a nutrient profile between two quantities
    Scale {
        /// JSON nutrient profile file, or "-" for stdin
        #[arg(long, default_value = "-")]
        input: PathBuf,

        /// Quantity the profile describes, e.g. "150g"
        #[arg(long)]
        from: String,

        /// Target quantity, e.g. "200g"
        #[arg(long)]
        to: String,
    },

    /// Normalize a food-database record or search response to per-100 g values
    Normalize {
        /// JSON file, or "-" for stdin
        #[arg(long, default_value = "-")]
        input: PathBuf,
    },

    /// Summarize a JSON array of food logs over a period
    Summary {
        /// JSON file, or "-" for stdin
        #[arg(long, default_value = "-")]
        input: PathBuf,

        /// today, week, last15, month or all
        #[arg(long, default_value = "week")]
        period: ProgressPeriod,

        /// Daily protein goal (g) the insights compare against
        #[arg(long)]
        protein_goal: Option<u32>,
    },
}

#[derive(Args)]
struct TargetArgs {
    /// male, female or other
    #[arg(long)]
    gender: Gender,

    /// Age in whole years
    #[arg(long)]
    age: u32,

    /// Height in centimetres
    #[arg(long, required_unless_present = "height_ft", conflicts_with = "height_ft")]
    height_cm: Option<f64>,

    /// Height in feet (with --height-in)
    #[arg(long)]
    height_ft: Option<f64>,

    /// Additional inches
    #[arg(long, default_value_t = 0.0, requires = "height_ft")]
    height_in: f64,

    /// Current weight in kilograms
    #[arg(long, required_unless_present = "weight_lb", conflicts_with = "weight_lb")]
    weight_kg: Option<f64>,

    /// Current weight in pounds
    #[arg(long)]
    weight_lb: Option<f64>,

    /// Target weight in kilograms
    #[arg(long)]
    target_weight_kg: Option<f64>,

    /// sedentary, light, moderate, active or veryActive
    #[arg(long, default_value = "moderate")]
    activity: ActivityLevel,

    /// Primary goal (repeatable)
    #[arg(long = "goal", required = true)]
    goals: Vec<PrimaryGoal>,

    /// Health condition (repeatable)
    #[arg(long = "condition")]
    conditions: Vec<HealthCondition>,

    /// Dietary preference (repeatable)
    #[arg(long = "diet")]
    diets: Vec<DietaryPreference>,
}

impl TargetArgs {
    fn height_cm(&self) -> f64 {
        self.height_ft.map_or_else(
            || self.height_cm.unwrap_or_default(),
            |feet| convert_height_to_cm(feet, self.height_in),
        )
    }

    fn weight_kg(&self) -> f64 {
        self.weight_lb
            .map_or_else(|| self.weight_kg.unwrap_or_default(), convert_lbs_to_kg)
    }

    fn profiles(&self) -> AppResult<(BodyProfile, GoalProfile)> {
        let body = BodyProfile::new(
            self.gender,
            self.age,
            self.height_cm(),
            self.weight_kg(),
            self.target_weight_kg,
        )?;
        let goals = GoalProfile::new(
            self.activity,
            self.goals.iter().copied(),
            self.conditions.iter().copied(),
            self.diets.iter().copied(),
        )?;
        Ok((body, goals))
    }
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "debug".to_owned();
    }
    if let Err(e) = logging.init() {
        eprintln!("Logging already initialized: {e}");
    }

    let output: Value = match cli.command {
        Command::Targets(args) => {
            let (body, goals) = args.profiles()?;
            commands::targets(&body, &goals)?
        }
        Command::Scale { input, from, to } => {
            commands::scale(&read_input(&input).await?, &from, &to)?
        }
        Command::Normalize { input } => commands::normalize(&read_input(&input).await?)?,
        Command::Summary {
            input,
            period,
            protein_goal,
        } => {
            let mut goals = DailyGoals::default();
            if let Some(protein) = protein_goal {
                goals.protein = protein;
            }
            commands::summarize(&read_input(&input).await?, period, &goals, Utc::now())?
        }
    };
    let output = serde_json::to_string_pretty(&output)?;

    let mut stdout = io::stdout();
    stdout.write_all(output.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await?;
    Ok(())
}

/// Read a file, or stdin when the path is "-"
async fn read_input(path: &Path) -> AppResult<String> {
    let input = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).await?;
        buffer
    } else {
        fs::read_to_string(path).await?
    };
    debug!(path = %path.display(), bytes = input.len(), "Read input");
    Ok(input)
}
