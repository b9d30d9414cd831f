use crate::{
    export::Exporter,
    models::{default_quotes, CategoryFilter, Quote, ALL_CATEGORIES},
    storage::{KeyValueStore, QUOTES_KEY, SELECTED_CATEGORY_KEY},
    Error, Result,
};
use rand::{seq::SliceRandom, Rng};
use tracing::{debug, info};

/// Message shown when `add` is called with a blank field
pub const MISSING_FIELDS_MESSAGE: &str = "Please enter both a quote and a category.";

/// The quote collection plus the persisted category selection
///
/// Every mutating operation ends with a save of the full sequence, so the
/// backend always mirrors memory once a call returns `Ok`. Queries never
/// touch the backend.
pub struct QuoteStore {
    quotes: Vec<Quote>,
    selected: CategoryFilter,
    backend: Box<dyn KeyValueStore>,
}

impl QuoteStore {
    /// Build a store around `backend` with an explicit starting list
    ///
    /// The list isn't written out until the first mutation or `save()`.
    pub fn new(backend: Box<dyn KeyValueStore>, initial: Vec<Quote>) -> Self {
        Self {
            quotes: initial,
            selected: CategoryFilter::All,
            backend,
        }
    }

    /// Restore the previous session's quotes and selection
    ///
    /// When nothing was ever saved the store starts empty, or with the
    /// built-in quotes if `seed_defaults` is set.
    pub fn load(backend: Box<dyn KeyValueStore>, seed_defaults: bool) -> Result<Self> {
        let quotes = match backend.get(QUOTES_KEY)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None if seed_defaults => default_quotes(),
            None => Vec::new(),
        };

        let selected = backend
            .get(SELECTED_CATEGORY_KEY)?
            .map(|label| CategoryFilter::from_label(&label))
            .unwrap_or_default();

        debug!("Loaded {} quotes, filter '{}'", quotes.len(), selected);

        Ok(Self {
            quotes,
            selected,
            backend,
        })
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Write the full sequence to the backend
    pub fn save(&mut self) -> Result<()> {
        let raw = serde_json::to_string(&self.quotes)?;
        self.backend.set(QUOTES_KEY, &raw)
    }

    /// Append a quote after trimming both fields
    ///
    /// # Errors
    /// `Error::Validation` when either field is blank; the store is untouched.
    pub fn add(&mut self, text: &str, category: &str) -> Result<Quote> {
        let text = text.trim();
        let category = category.trim();

        if text.is_empty() || category.is_empty() {
            return Err(Error::Validation(MISSING_FIELDS_MESSAGE.to_string()));
        }

        let quote = Quote::new(text, category);
        self.quotes.push(quote.clone());
        self.save()?;

        info!("Added quote to '{}' ({} total)", quote.category, self.quotes.len());
        Ok(quote)
    }

    /// Append records exactly as given (no trimming, no blank check)
    pub fn import_batch(&mut self, batch: Vec<Quote>) -> Result<usize> {
        let count = batch.len();
        self.quotes.extend(batch);
        self.save()?;

        info!("Imported {} quotes ({} total)", count, self.quotes.len());
        Ok(count)
    }

    /// Pretty-printed JSON of the whole store
    pub fn export_snapshot(&self) -> Result<String> {
        Exporter::to_json(&self.quotes)
    }

    pub fn filtered_view(&self, filter: &CategoryFilter) -> Vec<&Quote> {
        self.quotes.iter().filter(|q| filter.matches(q)).collect()
    }

    /// Categories in order of first appearance, without the wildcard
    pub fn distinct_categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for quote in &self.quotes {
            if !seen.contains(&quote.category.as_str()) {
                seen.push(&quote.category);
            }
        }
        seen
    }

    /// What a category picker should offer: the wildcard, then every category
    pub fn category_options(&self) -> Vec<&str> {
        let mut options = vec![ALL_CATEGORIES];
        options.extend(self.distinct_categories());
        options
    }

    pub fn selected_category(&self) -> &CategoryFilter {
        &self.selected
    }

    /// Remember the active filter across sessions
    pub fn select_category(&mut self, filter: CategoryFilter) -> Result<()> {
        self.backend.set(SELECTED_CATEGORY_KEY, filter.label())?;
        self.selected = filter;
        Ok(())
    }

    /// Random quote under the currently selected filter
    pub fn random_quote(&self) -> Option<&Quote> {
        pick_random(&self.filtered_view(&self.selected))
    }
}

/// Uniform pick from `view`; `None` means "no quotes available"
pub fn pick_random<'a>(view: &[&'a Quote]) -> Option<&'a Quote> {
    pick_random_with(view, &mut rand::thread_rng())
}

/// Same as [`pick_random`] with a caller-supplied RNG
pub fn pick_random_with<'a, R: Rng + ?Sized>(view: &[&'a Quote], rng: &mut R) -> Option<&'a Quote> {
    view.choose(rng).copied()
}
