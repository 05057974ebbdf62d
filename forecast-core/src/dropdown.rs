//! The city-search dropdown as a view-model.
//!
//! State changes arrive as [`Message`]s. Typing may produce a [`PendingLookup`]
//! that the driver runs (inline or spawned) and feeds back as
//! [`Message::LookupFinished`]. Nothing cancels an in-flight lookup, so with
//! default options whichever lookup resolves last decides the match list, even
//! if it was issued first. Set [`DropdownOptions::discard_stale_responses`] to
//! drop results that were overtaken by newer input.

use std::{fmt, sync::Arc};

use crate::{
    config::Config,
    error::LookupError,
    lookup::{CityLookup, MIN_QUERY_CHARS},
    model::City,
};

pub const PLACEHOLDER: &str = "Enter a city name";
pub const NO_CITIES_FOUND: &str = "No cities found";

/// Called once per user selection with the chosen city.
pub type SelectCallback = Box<dyn FnMut(City) + Send>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DropdownOptions {
    pub discard_stale_responses: bool,
}

impl From<&Config> for DropdownOptions {
    fn from(config: &Config) -> Self {
        Self {
            discard_stale_responses: config.discard_stale_responses,
        }
    }
}

#[derive(Debug)]
pub enum Message {
    InputChanged(String),
    Toggle,
    CitySelected(City),
    LookupFinished {
        seq: u64,
        query: String,
        result: Result<Vec<City>, LookupError>,
    },
}

/// A lookup issued by the dropdown but not yet run.
#[derive(Debug)]
pub struct PendingLookup {
    seq: u64,
    query: String,
    lookup: Arc<dyn CityLookup>,
}

impl PendingLookup {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub async fn run(self) -> Message {
        let result = self.lookup.find(&self.query).await;
        Message::LookupFinished {
            seq: self.seq,
            query: self.query,
            result,
        }
    }
}

pub struct CityDropdown {
    lookup: Arc<dyn CityLookup>,
    on_city_select: SelectCallback,
    options: DropdownOptions,

    is_open: bool,
    query: String,
    matches: Vec<City>,

    // Bumped whenever a lookup is issued or the match list is reset.
    generation: u64,
}

impl fmt::Debug for CityDropdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CityDropdown")
            .field("lookup", &self.lookup)
            .field("options", &self.options)
            .field("is_open", &self.is_open)
            .field("query", &self.query)
            .field("matches", &self.matches.len())
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl CityDropdown {
    pub fn new(
        lookup: Arc<dyn CityLookup>,
        on_city_select: impl FnMut(City) + Send + 'static,
    ) -> Self {
        Self::with_options(lookup, on_city_select, DropdownOptions::default())
    }

    pub fn with_options(
        lookup: Arc<dyn CityLookup>,
        on_city_select: impl FnMut(City) + Send + 'static,
        options: DropdownOptions,
    ) -> Self {
        Self {
            lookup,
            on_city_select: Box::new(on_city_select),
            options,
            is_open: false,
            query: String::new(),
            matches: Vec::new(),
            generation: 0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self) -> &[City] {
        &self.matches
    }

    pub fn update(&mut self, message: Message) -> Option<PendingLookup> {
        match message {
            Message::InputChanged(text) => self.input_changed(text),
            Message::Toggle => {
                self.on_toggle();
                None
            }
            Message::CitySelected(city) => {
                self.on_city_select(city);
                None
            }
            Message::LookupFinished { seq, query, result } => {
                self.lookup_finished(seq, &query, result);
                None
            }
        }
    }

    /// Store `text` and, when it is long enough, search for it and apply the
    /// result before returning. Lookup failures only empty the match list.
    pub async fn on_input_change(&mut self, text: impl Into<String>) {
        if let Some(pending) = self.update(Message::InputChanged(text.into())) {
            let finished = pending.run().await;
            self.update(finished);
        }
    }

    pub fn on_toggle(&mut self) {
        self.is_open = !self.is_open;
        self.clear_matches();
    }

    pub fn on_city_select(&mut self, city: City) {
        tracing::debug!(id = city.id, name = %city.name, "City selected");
        (self.on_city_select)(city);

        self.is_open = false;
        self.query.clear();
        self.clear_matches();
    }

    /// Select the match at `index`. Returns `false` if there is no such row.
    pub fn select_match(&mut self, index: usize) -> bool {
        match self.matches.get(index).cloned() {
            Some(city) => {
                self.on_city_select(city);
                true
            }
            None => false,
        }
    }

    pub fn view(&self) -> DropdownView {
        let list = self.is_open.then(|| {
            if self.matches.is_empty() {
                ListView::Empty
            } else {
                ListView::Rows(
                    self.matches
                        .iter()
                        .map(|city| Row {
                            id: city.id,
                            label: city.label(),
                        })
                        .collect(),
                )
            }
        });

        DropdownView {
            input: self.query.clone(),
            list,
        }
    }

    fn input_changed(&mut self, text: String) -> Option<PendingLookup> {
        self.query = text;

        if self.query.chars().count() < MIN_QUERY_CHARS {
            self.clear_matches();
            return None;
        }

        self.generation += 1;
        Some(PendingLookup {
            seq: self.generation,
            query: self.query.clone(),
            lookup: Arc::clone(&self.lookup),
        })
    }

    fn lookup_finished(&mut self, seq: u64, query: &str, result: Result<Vec<City>, LookupError>) {
        if self.options.discard_stale_responses && seq != self.generation {
            tracing::debug!(
                seq,
                latest = self.generation,
                query,
                "Dropping stale city search result"
            );
            return;
        }

        match result {
            Ok(cities) => self.matches = cities,
            Err(err) => {
                tracing::error!(query, error = %err, "Error fetching cities");
                self.matches.clear();
            }
        }
    }

    fn clear_matches(&mut self) {
        self.matches.clear();
        self.generation += 1;
    }
}

/// Snapshot of what the dropdown shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownView {
    pub input: String,
    /// `None` while the dropdown is closed.
    pub list: Option<ListView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    Rows(Vec<Row>),
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: u64,
    pub label: String,
}

impl fmt::Display for DropdownView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.input.is_empty() {
            writeln!(f, "[ {PLACEHOLDER} ]")?;
        } else {
            writeln!(f, "[ {} ]", self.input)?;
        }

        match &self.list {
            None => Ok(()),
            Some(ListView::Empty) => writeln!(f, "  {NO_CITIES_FOUND}"),
            Some(ListView::Rows(rows)) => {
                for (i, row) in rows.iter().enumerate() {
                    writeln!(f, "  {:>2}. {}", i + 1, row.label)?;
                }
                Ok(())
            }
        }
    }
}
