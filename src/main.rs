use std::io::Write;
use std::path::PathBuf;

mod config;
mod error;
mod meals;
mod predict;
mod selection;
mod state;
mod workflow;

use meals::Mealtime;
use selection::PendingSelection;
use state::AppState;
use workflow::Workflow;

const USAGE: &str = "\
mealsnap - photograph food, get nutrition estimates, keep a meal log

Usage:
  mealsnap log <image-path> [--name NAME] [--mealtime breakfast|lunch|dinner|snack] [--yes]
  mealsnap list

Environment:
  APP_ENV        production requires API_BASE_URL; anything else targets
                 the local development inference service
  API_BASE_URL   inference endpoint base URL
  MEAL_LOG_PATH  meal log location (defaults under the user data dir)
";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter =
        std::env::var("RUST_LOG").unwrap_or_else(|_| "mealsnap=debug,reqwest=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("log") => {
            let opts = LogOptions::parse(args)?;
            run_log(opts).await
        }
        Some("list") => run_list().await,
        _ => {
            eprint!("{USAGE}");
            std::process::exit(2);
        }
    }
}

struct LogOptions {
    image: PathBuf,
    name: String,
    mealtime: Option<Mealtime>,
    assume_yes: bool,
}

impl LogOptions {
    fn parse(mut args: impl Iterator<Item = String>) -> anyhow::Result<Self> {
        let mut image = None;
        let mut name = String::new();
        let mut mealtime = None;
        let mut assume_yes = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--name" => {
                    name = args
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--name requires a value"))?;
                }
                "--mealtime" => {
                    let raw = args
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--mealtime requires a value"))?;
                    mealtime = Some(raw.parse::<Mealtime>()?);
                }
                "--yes" => assume_yes = true,
                flag if flag.starts_with("--") => anyhow::bail!("unknown flag {flag}"),
                path => {
                    anyhow::ensure!(image.is_none(), "only one image path is accepted");
                    image = Some(PathBuf::from(path));
                }
            }
        }

        Ok(Self {
            image: image.ok_or_else(|| anyhow::anyhow!("an image path is required"))?,
            name,
            mealtime,
            assume_yes,
        })
    }
}

async fn run_log(opts: LogOptions) -> anyhow::Result<()> {
    let state = AppState::init()?;
    let mut wf = Workflow::new();

    wf.select(PendingSelection::open(&opts.image)?)?;

    let payload = wf.begin_submit()?;
    println!("Analyzing {}...", payload.file_name);
    match state.client.predict(&payload).await {
        Ok(resp) => {
            let result = predict::present(&resp, &opts.name, opts.mealtime, &payload.preview_url);
            wf.complete(result);
        }
        Err(e) => {
            wf.fail(payload, &e);
            eprintln!("{e}");
            std::process::exit(1);
        }
    }

    if let Workflow::Result(result) = &wf {
        print_result(result);
        if !opts.assume_yes && !prompt_confirmation()? {
            wf.reset();
            println!("Discarded.");
            return Ok(());
        }
    }

    if let Some(result) = wf.confirm() {
        let meal = meals::append(state.meals.as_ref(), &result, opts.mealtime).await?;
        println!(
            "Logged {} ({} kcal) to {}.",
            meal.food_name,
            meal.calories,
            state.config.meal_log_path.display()
        );
        println!("Review your log with `mealsnap list`.");
    }
    Ok(())
}

fn print_result(result: &predict::AnalysisResult) {
    println!("\nAnalysis Results");
    println!("  Food Name:     {}", result.food_name);
    if result.shows_detected_line() {
        println!("  Detected Food: {}", result.detected_food);
    }
    let per_piece = if result.calories.is_piecewise() {
        " (per piece)"
    } else {
        ""
    };
    println!(
        "  Calories:      {} kcal{per_piece}",
        result.calories.displayed()
    );
    println!("  Protein:       {}", result.protein);
    println!("  Carbohydrates: {}", result.carbs);
    println!("  Fats:          {}", result.fats);
    if let Some(mealtime) = result.mealtime {
        println!("  Meal:          {}", mealtime.label());
    }
    println!();
}

fn prompt_confirmation() -> anyhow::Result<bool> {
    print!("Log this meal? [y/N] ");
    std::io::stdout().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

async fn run_list() -> anyhow::Result<()> {
    let state = AppState::init()?;
    let logged = meals::list(state.meals.as_ref()).await;
    if logged.is_empty() {
        println!("No meals logged yet.");
        return Ok(());
    }

    let format = time::macros::format_description!("[year]-[month]-[day] [hour]:[minute]");
    for meal in logged {
        let when = time::OffsetDateTime::from_unix_timestamp_nanos(meal.timestamp as i128 * 1_000_000)
            .ok()
            .and_then(|t| t.format(&format).ok())
            .unwrap_or_else(|| "unknown time".into());
        let mealtime = meal.mealtime.map(|m| m.label()).unwrap_or("-");
        println!(
            "{when}  {:<10} {:>5} kcal  {} (protein {}, carbs {}, fats {})",
            mealtime, meal.calories, meal.food_name, meal.protein, meal.carbs, meal.fats
        );
    }
    Ok(())
}
