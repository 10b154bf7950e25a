use std::{
    io::{self, Write},
    sync::Arc,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use weather_lookup_core::{
    Config, QueryState, RequestStatus, WeatherController, present::render_view, provider::provider_from_config,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-lookup", version, about = "Current weather for a city")]
pub struct Cli {
    /// City to search at startup instead of the configured default.
    #[arg(long, global = true)]
    pub city: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and default city.
    Configure,

    /// Search once and print the result.
    Show {
        /// City name; falls back to `--city` or the configured default.
        #[arg(value_name = "CITY")]
        name: Option<String>,
    },

    /// Search at startup, then keep prompting for cities (default).
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Interactive) {
            Command::Configure => configure(),
            Command::Show { name } => {
                let config = Config::load_with_env()?;
                let start = name.or(self.city);
                let controller = controller_from_config(&config, start)?;
                print_search(&controller, controller.search_current(), &mut io::stdout()).await?;
                Ok(())
            }
            Command::Interactive => {
                let config = Config::load_with_env()?;
                let controller = controller_from_config(&config, self.city)?;
                interactive(&controller).await
            }
        }
    }
}

fn controller_from_config(config: &Config, city: Option<String>) -> anyhow::Result<WeatherController> {
    let lookup = provider_from_config(config)?;
    let query = QueryState::new(city.unwrap_or_else(|| config.default_city().to_owned()));
    Ok(WeatherController::new(Arc::from(lookup), query))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let city = Text::new("Default city:")
        .with_default(config.default_city())
        .prompt()
        .context("Failed to read default city")?;

    config.api_key = Some(api_key.trim().to_owned());
    config.default_city = Some(city);

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}

async fn interactive(controller: &WeatherController) -> anyhow::Result<()> {
    print_search(controller, controller.run_startup(), &mut io::stdout()).await?;
    println!();

    loop {
        let initial = controller.query();
        let answer = tokio::task::spawn_blocking(move || {
            Text::new("City:")
                .with_initial_value(&initial)
                .with_help_message("Enter to search, Esc to quit")
                .prompt()
        })
        .await
        .context("Prompt task failed")?;

        match answer {
            Ok(text) => {
                controller.set_query(text);
                print_search(controller, controller.search_current(), &mut io::stdout()).await?;
                println!();
            }
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read city"),
        }
    }

    Ok(())
}

/// Drive `search`, writing the loading line and then the settled view to `out`.
async fn print_search<F, W>(controller: &WeatherController, search: F, out: &mut W) -> io::Result<()>
where
    F: Future<Output = RequestStatus>,
    W: Write,
{
    let mut view = controller.subscribe();
    tokio::pin!(search);

    loop {
        tokio::select! {
            biased;

            Ok(()) = view.changed() => {
                let current = view.borrow_and_update().clone();
                if current.status.is_loading() {
                    writeln!(out, "{}", render_view(&current))?;
                }
            }
            _ = &mut search => break,
        }
    }

    writeln!(out, "{}", render_view(&controller.view()))
}
