use meridian_core::{Currency, Symbol};

/// First hop of a shortest path: the symbol to trade next and the total
/// hop count of the path it starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathStep {
    pub symbol: Symbol,
    pub length: usize,
}

impl PathStep {
    pub fn new(symbol: Symbol, length: usize) -> Self {
        Self { symbol, length }
    }

    /// Currency reached by trading `symbol` while holding `from`
    pub fn next_currency(&self, from: &Currency) -> Option<&Currency> {
        self.symbol.counter_currency(from)
    }
}

/// Immutable all-pairs next-hop table
///
/// Currencies are indexed in sorted order; `steps` is a dense
/// `n * n` arena addressed by `source * n + target`. The diagonal is always
/// empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradingPaths {
    currencies: Vec<Currency>,
    steps: Vec<Option<PathStep>>,
}

impl TradingPaths {
    pub(crate) fn from_parts(currencies: Vec<Currency>, steps: Vec<Option<PathStep>>) -> Self {
        debug_assert_eq!(steps.len(), currencies.len() * currencies.len());
        Self { currencies, steps }
    }

    pub fn empty() -> Self {
        Self {
            currencies: Vec::new(),
            steps: Vec::new(),
        }
    }

    fn index_of(&self, currency: &Currency) -> Option<usize> {
        self.currencies.binary_search(currency).ok()
    }

    /// Next hop from `source` toward `target`, `None` when unreachable
    pub fn next_step(&self, source: &Currency, target: &Currency) -> Option<&PathStep> {
        let i = self.index_of(source)?;
        let j = self.index_of(target)?;
        self.steps[i * self.currencies.len() + j].as_ref()
    }

    /// Hop count of the shortest path, `None` when unreachable or equal
    pub fn path_length(&self, source: &Currency, target: &Currency) -> Option<usize> {
        self.next_step(source, target).map(|step| step.length)
    }

    pub fn currencies(&self) -> &[Currency] {
        &self.currencies
    }

    pub fn currency_count(&self) -> usize {
        self.currencies.len()
    }
}
