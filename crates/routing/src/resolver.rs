use std::collections::BTreeSet;
use std::time::Instant;

use meridian_core::{Currency, Symbol};

use crate::{PathStep, TradingPaths};

/// All-pairs shortest paths over the currency graph (Floyd-Warshall)
///
/// Every symbol is an undirected edge of length 1. When several symbols
/// connect the same pair the first one wins, and paths are only replaced
/// by strictly shorter ones, so the output is deterministic for a given
/// symbol order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestPathsResolver;

impl ShortestPathsResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, symbols: &[Symbol]) -> TradingPaths {
        let started = Instant::now();

        let currencies: Vec<Currency> = symbols
            .iter()
            .flat_map(|s| [s.base.clone(), s.quote.clone()])
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let n = currencies.len();
        let index = |c: &Currency| currencies.binary_search(c).ok();

        let mut steps: Vec<Option<PathStep>> = vec![None; n * n];
        for symbol in symbols {
            let (Some(b), Some(q)) = (index(&symbol.base), index(&symbol.quote)) else {
                continue;
            };
            if b == q {
                continue;
            }
            for (i, j) in [(b, q), (q, b)] {
                let slot = &mut steps[i * n + j];
                if slot.is_none() {
                    *slot = Some(PathStep::new(symbol.clone(), 1));
                }
            }
        }

        for k in 0..n {
            for i in 0..n {
                if i == k {
                    continue;
                }
                let Some((first_hop, to_k)) = steps[i * n + k]
                    .as_ref()
                    .map(|step| (step.symbol.clone(), step.length))
                else {
                    continue;
                };
                for j in 0..n {
                    if j == i || j == k {
                        continue;
                    }
                    let Some(from_k) = steps[k * n + j].as_ref().map(|step| step.length) else {
                        continue;
                    };
                    let through_k = to_k + from_k;
                    let slot = &mut steps[i * n + j];
                    let shorter = slot.as_ref().is_none_or(|current| through_k < current.length);
                    if shorter {
                        *slot = Some(PathStep::new(first_hop.clone(), through_k));
                    }
                }
            }
        }

        log::debug!(
            "[Resolver] Resolved paths for {} currencies from {} symbols in {:?}",
            n,
            symbols.len(),
            started.elapsed()
        );
        TradingPaths::from_parts(currencies, steps)
    }
}
