use anyhow::Context;
use clap::{Parser, Subcommand};
use forecast_core::{
    City, CityDropdown, Config, DropdownOptions, dropdown::PLACEHOLDER, lookup_from_config,
};
use inquire::{Password, PasswordDisplayMode, Select, Text};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "City search for the forecast app")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key.
    Configure,

    /// Look up cities matching a query once and print them.
    Find {
        /// City name or prefix, at least two characters.
        query: String,

        /// Print the raw city records as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Search interactively and pick a city.
    Search {
        /// Print the picked city as its raw JSON record.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Find { query, json } => find(query, json).await,
            Command::Search { json } => search(json).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn find(query: String, json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let lookup = lookup_from_config(&config)?;

    let mut dropdown = CityDropdown::with_options(lookup, |_| {}, DropdownOptions::from(&config));
    dropdown.on_toggle();
    dropdown.on_input_change(query).await;

    if json {
        println!("{}", serde_json::to_string_pretty(dropdown.matches())?);
    } else {
        print!("{}", dropdown.view());
    }

    Ok(())
}

async fn search(json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let lookup = lookup_from_config(&config)?;

    let mut dropdown = CityDropdown::with_options(
        lookup,
        move |city| print_selection(&city, json),
        DropdownOptions::from(&config),
    );

    loop {
        // Focusing the input opens the list again after a pick.
        if !dropdown.is_open() {
            dropdown.on_toggle();
        }

        let Some(text) = Text::new("City:")
            .with_placeholder(PLACEHOLDER)
            .with_initial_value(dropdown.query())
            .prompt_skippable()
            .context("Failed to read search input")?
        else {
            break;
        };

        dropdown.on_input_change(text).await;
        print!("{}", dropdown.view());

        if dropdown.matches().is_empty() {
            continue;
        }

        let labels: Vec<String> = dropdown.matches().iter().map(City::label).collect();
        let choice = Select::new("Pick a city:", labels)
            .raw_prompt_skippable()
            .context("Failed to read city choice")?;

        if let Some(choice) = choice {
            dropdown.select_match(choice.index);
        }
    }

    Ok(())
}

fn print_selection(city: &City, json: bool) {
    if !json {
        println!("Selected {} (id {})", city.label(), city.id);
        return;
    }

    match serde_json::to_string_pretty(city) {
        Ok(raw) => println!("{raw}"),
        Err(err) => tracing::error!(error = %err, "Failed to serialize selected city"),
    }
}
