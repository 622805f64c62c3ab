use std::io::Write;

use anyhow::Result;
use cityweather_core::{AppError, Config, ConfigError};
use cityweather_i18n::Language;
use cityweather_ui::{LanguageChange, ResultPanel, Session, SessionError, SubmitOutcome, ViewState};
use tokio::io::{AsyncBufReadExt, BufReader};

const USAGE: &str = "\
Usage: cityweather [--lang <code>] [--city <name>]

Without --city, reads commands from stdin:
  <city>         look up the weather for a city
  :lang <code>   switch the interface language
  :langs         list supported languages
  :quit          exit";

struct Args {
    lang: Option<String>,
    city: Option<String>,
}

fn parse_args() -> Result<Option<Args>> {
    let mut args = pico_args::Arguments::from_env();

    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let parsed = Args {
        lang: args.opt_value_from_str("--lang")?,
        city: args.opt_value_from_str("--city")?,
    };

    let rest = args.finish();
    if !rest.is_empty() {
        anyhow::bail!("Unexpected arguments: {:?}", rest);
    }

    Ok(Some(parsed))
}

#[tokio::main]
async fn main() -> Result<()> {
    let Some(args) = parse_args()? else {
        println!("{}", USAGE);
        return Ok(());
    };

    cityweather_core::init()?;

    let (config, _validation) = Config::load_validated().map_err(|e| {
        tracing::error!("Failed to load configuration: {:#}", e);
        AppError::Config(ConfigError::Invalid(e.to_string()))
    })?;
    let session = match Session::from_config(&config) {
        Ok(session) => session,
        Err(e) => {
            tracing::error!("Failed to create session: {}", e);
            anyhow::bail!(e.user_message());
        }
    };

    let started = match args.lang.as_deref() {
        Some(code) => session.change_language(code).await,
        None => session.start().await,
    };
    if let Err(e) = started {
        // The built-in English text stays in place
        report_session_error(e);
    }

    tracing::info!("cityweather started ({})", session.language());

    if let Some(city) = args.city {
        let outcome = session.submit(&city).await;
        print_view(&session.view());
        if matches!(outcome, SubmitOutcome::Failed(_) | SubmitOutcome::Rejected) {
            std::process::exit(1);
        }
        return Ok(());
    }

    print_view(&session.view());
    run_interactive(&session).await
}

async fn run_interactive(session: &Session) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt(session)?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        match line.split_once(char::is_whitespace).unwrap_or((line, "")) {
            (":quit", _) | (":q", _) => break,
            (":langs", _) => {
                let loaded = session.loader().cached_languages();
                for language in Language::ALL {
                    let marker = if language == session.language() { "*" } else { " " };
                    let note = if loaded.contains(&language) { " (loaded)" } else { "" };
                    println!(
                        "{} {:<3} {}{}",
                        marker,
                        language.code(),
                        language.display_name(),
                        note
                    );
                }
            }
            (":lang", code) => match session.change_language(code.trim()).await {
                Ok(LanguageChange::Applied { fell_back: true, language, .. }) => {
                    println!("(language {:?} unavailable, using {})", code.trim(), language);
                    print_view(&session.view());
                }
                Ok(_) => print_view(&session.view()),
                Err(e) => report_session_error(e),
            },
            _ => {
                if session.submit(line).await != SubmitOutcome::Ignored {
                    print_view(&session.view());
                }
            }
        }
    }

    tracing::info!("cityweather shutting down");
    Ok(())
}

fn prompt(session: &Session) -> Result<()> {
    let view = session.view();
    print!("[{}] {}> ", view.interface.selected, view.interface.placeholder);
    std::io::stdout().flush()?;
    Ok(())
}

fn report_session_error(e: SessionError) {
    tracing::error!("{}", e);
    eprintln!("{}", AppError::from(e).user_message());
}

fn print_view(view: &ViewState) {
    let interface = &view.interface;
    println!("== {} ({}, {}) ==", interface.title, interface.selected, interface.direction);

    match &view.panel {
        ResultPanel::Hidden => {}
        ResultPanel::Error(message) => println!("{}", message),
        ResultPanel::Weather(weather) => {
            println!("{}", weather.city);
            println!("  {}  {}", weather.temperature, weather.description);
            println!("  {}", weather.humidity);
            println!("  updated {}", weather.updated_at);
            println!("  {} ({}x{})", weather.icon.url, weather.icon.width, weather.icon.height);
        }
    }

    if let Some(src) = view.map.src.as_deref().filter(|_| view.map.visible) {
        println!("  map: {}", src);
    }
}
