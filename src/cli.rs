use std::path::Path;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use inquire::Text;
use log::info;

use milongaBoard::calendar::WeekWindow;
use milongaBoard::clients::openai_client::OpenAIGenerator;
use milongaBoard::config::Settings;
use milongaBoard::models::event::EventKind;
use milongaBoard::service::event_service::{EventDirectory, EventFilter};
use milongaBoard::service::generator::Media;
use milongaBoard::service::playground::{DjService, PhotoStyleService, QuizService};
use milongaBoard::service::render::render_week;

#[derive(Parser)]
#[command(about = "Milongas, classes and workshops of the local tango scene")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Week grid holding DATE (today when omitted)
    Week {
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long)]
        region: Option<String>,
        #[arg(long = "kind")]
        kinds: Vec<EventKind>,
    },
    /// Every week grid touching a month
    Month {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        #[arg(long)]
        region: Option<String>,
    },
    /// Upcoming events
    Events {
        #[arg(long)]
        region: Option<String>,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Orchestra suggestions for a mood
    Dj { mood: Option<String> },
    Quiz {
        #[arg(long)]
        topic: String,
        #[arg(long, default_value_t = 5)]
        count: usize,
    },
    Stylize {
        #[arg(long)]
        image: String,
        #[arg(long)]
        style: String,
    },
}

pub async fn cli(settings: Settings, directory: EventDirectory) {
    // Fine to panic here
    let cli = Cli::parse();
    if let Err(e) = run_command(cli.command, &settings, &directory).await {
        println!("{}", e);
    }
}

async fn run_command(
    command: Commands,
    settings: &Settings,
    directory: &EventDirectory,
) -> Result<(), Box<dyn std::error::Error>> {
    let today = Utc::now().with_timezone(&settings.timezone).date_naive();
    match command {
        Commands::Week { date, region, kinds } => {
            let filter = EventFilter {
                region,
                kinds,
                ..Default::default()
            };
            let week = WeekWindow::containing(date.unwrap_or(today))?;
            let view = directory.week_view(&filter, week)?;
            print!("{}", render_week(&view, settings.language, settings.visible_tracks));
        }
        Commands::Month { year, month, region } => {
            let filter = EventFilter {
                region,
                ..Default::default()
            };
            for view in directory.month_view(&filter, year, month)? {
                println!("{}", render_week(&view, settings.language, settings.visible_tracks));
            }
        }
        Commands::Events { region, limit } => {
            let filter = EventFilter {
                region,
                ..Default::default()
            };
            for event in directory
                .upcoming(today, usize::MAX)
                .into_iter()
                .filter(|event| filter.matches(event))
                .take(limit)
            {
                let dates = if event.is_single_day() {
                    event.start_date.to_string()
                } else {
                    format!("{} .. {}", event.start_date, event.end_date)
                };
                println!(
                    "{:<24}  {:<9} {} @ {} ({})",
                    dates,
                    event.kind.as_str(),
                    event.title,
                    event.venue,
                    event.region
                );
            }
        }
        Commands::Dj { mood } => {
            let mood = match mood {
                Some(mood) => mood,
                None => specify_mood()?,
            };
            let generator = generator(settings)?;
            let upcoming = directory.upcoming(today, 5);
            let recommendation = DjService::recommend(&generator, &mood, &upcoming).await;
            println!("{}", serde_json::to_string_pretty(&recommendation)?);
        }
        Commands::Quiz { topic, count } => {
            let generator = generator(settings)?;
            let questions = QuizService::generate(&generator, &topic, count).await?;
            for (n, question) in questions.iter().enumerate() {
                println!("{}. {}", n + 1, question.question);
                for (idx, option) in question.options.iter().enumerate() {
                    let marker = if idx == question.answer { "*" } else { " " };
                    println!("   {} {}", marker, option);
                }
            }
        }
        Commands::Stylize { image, style } => {
            let media = read_media(&image)?;
            let generator = generator(settings)?;
            println!("{}", PhotoStyleService::stylize(&generator, media, &style).await?);
        }
    }
    Ok(())
}

fn generator(settings: &Settings) -> Result<OpenAIGenerator, Box<dyn std::error::Error>> {
    let api_key = settings
        .openai_api_key
        .clone()
        .ok_or("OPENAI_API_KEY must be set for playground commands")?;
    Ok(OpenAIGenerator::new(api_key, settings.openai_model.clone()))
}

fn read_media(path: &str) -> Result<Media, Box<dyn std::error::Error>> {
    let mime_type = match Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        _ => return Err(format!("unsupported image type: {}", path).into()),
    };
    let bytes = std::fs::read(path)?;
    info!("event=image_loaded path={} bytes={}", path, bytes.len());
    Ok(Media {
        mime_type: mime_type.to_string(),
        bytes,
    })
}

fn specify_mood() -> Result<String, Box<dyn std::error::Error>> {
    Ok(Text::new("How is the pista feeling tonight?").prompt()?)
}
