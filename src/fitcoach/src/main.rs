#[macro_use]
extern crate log;

mod args;

use std::fmt::Display;

use anyhow::anyhow;
use args::{ExerciseArg, TemplateArg};
use chrono::{Local, NaiveDate};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use dotenv::dotenv;
use fitcoach_db::DatabaseHandler;
use fitcoach_types::{ClientUpdate, NewClient, NewProgram, NewSession, NewWeightLog};
use serde::Serialize;

#[derive(Parser)]
pub struct FitcoachCli {
    #[arg(env, long)]
    pub database_url: String,
    /// Print analytics as JSON
    #[arg(long, global = true)]
    pub json: bool,
    #[clap(subcommand)]
    pub subcommand: FitcoachCommand,
}

#[derive(Subcommand)]
pub enum FitcoachCommand {
    ///
    /// Register a client, their start weight becomes the first weight log
    ///
    AddClient {
        name: String,
        #[arg(long)]
        age: i32,
        /// Height in cm
        #[arg(long)]
        height: f64,
        /// Weight in kg
        #[arg(long)]
        start_weight: f64,
        #[arg(long, default_value = "")]
        goal: String,
        #[arg(long, default_value = "")]
        injuries: String,
        /// Defaults to today
        #[arg(long)]
        start_date: Option<NaiveDate>,
    },
    ///
    /// List clients ordered by name
    ///
    ListClients {
        #[arg(long)]
        search: Option<String>,
    },
    ///
    /// Print profile, weight and session statistics of a client
    ///
    ShowClient { id: i32 },
    ///
    /// Change client fields, only the given ones are touched
    ///
    UpdateClient {
        id: i32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        age: Option<i32>,
        #[arg(long)]
        height: Option<f64>,
        #[arg(long)]
        start_weight: Option<f64>,
        #[arg(long)]
        goal: Option<String>,
        #[arg(long)]
        injuries: Option<String>,
        #[arg(long)]
        start_date: Option<NaiveDate>,
    },
    ///
    /// Delete a client with all sessions, weight logs and programs
    ///
    DeleteClient { id: i32 },
    ///
    /// Log a workout session
    ///
    LogSession {
        client_id: i32,
        /// Defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        notes: String,
        /// name:weight:reps[:rir], repeat for every set
        #[arg(long = "exercise", required = true)]
        exercises: Vec<ExerciseArg>,
    },
    ///
    /// List sessions of a client, newest first
    ///
    ListSessions {
        client_id: i32,
        #[arg(long)]
        limit: Option<u64>,
    },
    ///
    /// Delete a session and its exercises
    ///
    DeleteSession { id: i32 },
    ///
    /// Log bodyweight in kg
    ///
    LogWeight {
        client_id: i32,
        weight: f64,
        /// Defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    ///
    /// Print all weight logs of a client, oldest first
    ///
    WeightHistory { client_id: i32 },
    ///
    /// Create a training program
    ///
    AddProgram {
        client_id: i32,
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// name:sets:reps, repeat for every exercise
        #[arg(long = "template")]
        templates: Vec<TemplateArg>,
    },
    ///
    /// List programs of a client
    ///
    ListPrograms { client_id: i32 },
    ///
    /// Delete a program
    ///
    DeleteProgram { id: i32 },
    ///
    /// Print session statistics of a client
    ///
    Stats { client_id: i32 },
    ///
    /// Print volume trends of exercises over the latest sessions
    ///
    Progress { client_id: i32 },
    ///
    /// Print bodyweight trend
    ///
    WeightTrend { client_id: i32 },
    ///
    /// Generate shell completions
    ///
    Completions { shell: Shell },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(error) = dotenv() {
        println!("{}", error);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("sqlx::query", log::LevelFilter::Off)
        .filter_module("sea_orm_migration::migrator", log::LevelFilter::Off)
        .init();

    let cli = FitcoachCli::parse();
    if let FitcoachCommand::Completions { shell } = cli.subcommand {
        let mut command = FitcoachCli::command();
        let name = command.get_name().to_string();
        clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
        return Ok(());
    }

    let db_handler = DatabaseHandler::new(cli.database_url).await?;
    let today = Local::now().date_naive();
    let json = cli.json;

    match cli.subcommand {
        FitcoachCommand::AddClient {
            name,
            age,
            height,
            start_weight,
            goal,
            injuries,
            start_date,
        } => {
            let client = db_handler
                .register_client(NewClient {
                    name,
                    age,
                    height,
                    start_weight,
                    goal,
                    injuries,
                    start_date: start_date.unwrap_or(today),
                })
                .await?;
            println!("Added client #{} {}", client.id, client.name);
            Ok(())
        }
        FitcoachCommand::ListClients { search } => {
            let clients = match search {
                Some(query) => db_handler.search_clients(&query).await?,
                None => db_handler.list_clients().await?,
            };

            for client in clients {
                println!(
                    "#{}  {}  ({} days)",
                    client.id,
                    client.name,
                    client.days_since_start(today)
                );
            }
            Ok(())
        }
        FitcoachCommand::ShowClient { id } => {
            let overview = db_handler
                .client_overview(id, today)
                .await?
                .ok_or_else(|| anyhow!("Client #{id} not found"))?;
            let stats = db_handler.client_stats(id).await?;

            if json {
                let value = serde_json::json!({ "overview": overview, "stats": stats });
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{}\n{}", overview, stats);
            }
            Ok(())
        }
        FitcoachCommand::UpdateClient {
            id,
            name,
            age,
            height,
            start_weight,
            goal,
            injuries,
            start_date,
        } => {
            let client = db_handler
                .update_client(id, ClientUpdate {
                    name,
                    age,
                    height,
                    start_weight,
                    goal,
                    injuries,
                    start_date,
                })
                .await?;
            println!("Updated client #{} {}", client.id, client.name);
            Ok(())
        }
        FitcoachCommand::DeleteClient { id } => {
            db_handler.delete_client(id).await?;
            println!("Deleted client #{id}");
            Ok(())
        }
        FitcoachCommand::LogSession {
            client_id,
            date,
            notes,
            exercises,
        } => {
            let session = NewSession {
                client_id,
                date: date.unwrap_or(today),
                notes,
            };
            let sets = exercises.into_iter().map(|ExerciseArg(set)| set).collect();

            let (session, sets) = db_handler.log_session(session, sets).await?;
            println!(
                "Logged session #{} on {} with {} exercises",
                session.id,
                session.date,
                sets.len()
            );
            Ok(())
        }
        FitcoachCommand::ListSessions { client_id, limit } => {
            for session in db_handler.client_sessions(client_id, limit).await? {
                println!("#{}  {}  {}", session.id, session.date, session.notes);
                for set in db_handler.session_exercises(session.id).await? {
                    println!(
                        "    {}  {}kg x {}  rir {}",
                        set.name, set.weight, set.reps, set.rir
                    );
                }
            }
            Ok(())
        }
        FitcoachCommand::DeleteSession { id } => {
            db_handler.delete_session(id).await?;
            println!("Deleted session #{id}");
            Ok(())
        }
        FitcoachCommand::LogWeight {
            client_id,
            weight,
            date,
        } => {
            let log = db_handler
                .add_weight_log(NewWeightLog {
                    client_id,
                    weight,
                    date: date.unwrap_or(today),
                })
                .await?;
            println!("Logged {}kg on {}", log.weight, log.date);
            Ok(())
        }
        FitcoachCommand::WeightHistory { client_id } => {
            for log in db_handler.weight_history(client_id).await? {
                println!("#{}  {}  {}kg", log.id, log.date, log.weight);
            }
            Ok(())
        }
        FitcoachCommand::AddProgram {
            client_id,
            name,
            description,
            templates,
        } => {
            let program = db_handler
                .create_program(NewProgram {
                    client_id,
                    name,
                    description,
                    exercises: templates.into_iter().map(|TemplateArg(t)| t).collect(),
                })
                .await?;
            println!("Added program #{} {}", program.id, program.name);
            Ok(())
        }
        FitcoachCommand::ListPrograms { client_id } => {
            for program in db_handler.client_programs(client_id).await? {
                println!("#{}  {}  {}", program.id, program.name, program.description);
                for template in program.exercises {
                    println!(
                        "    {}  {}x{}",
                        template.name, template.target_sets, template.target_reps
                    );
                }
            }
            Ok(())
        }
        FitcoachCommand::DeleteProgram { id } => {
            db_handler.delete_program(id).await?;
            println!("Deleted program #{id}");
            Ok(())
        }
        FitcoachCommand::Stats { client_id } => {
            let stats = db_handler.client_stats(client_id).await?;
            print_report(json, &stats)
        }
        FitcoachCommand::Progress { client_id } => {
            let progress = db_handler.analyze_exercise_progress(client_id).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&progress)?);
            } else if progress.is_empty() {
                println!("Not enough sessions to analyze progress");
            } else {
                for exercise in progress {
                    println!("{}\n", exercise);
                }
            }
            Ok(())
        }
        FitcoachCommand::WeightTrend { client_id } => {
            match db_handler.analyze_weight_trend(client_id).await? {
                Some(trend) => print_report(json, &trend),
                None => {
                    info!("Client #{client_id} needs at least two weight logs for a trend");
                    Ok(())
                }
            }
        }
        FitcoachCommand::Completions { .. } => Ok(()),
    }
}

fn print_report<T>(json: bool, report: &T) -> anyhow::Result<()>
where
    T: Serialize + Display,
{
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}
