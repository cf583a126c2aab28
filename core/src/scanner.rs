// core/src/scanner.rs
//
// Inkrementell kandidat-skanner ("finn alternative datoer"). Kooperativ:
// scorer kandidatpoolen i bolker med et injisert yield-punkt mellom hver
// bolk, holder bare de beste K underveis og publiserer delresultater
// strupet til sink-callbacken. Avbrytbar via token og tidsfrist.
//
// Tilstandsmaskin: idle -> building-pool -> scoring -> (aborted | completed)
// -> merged -> published. Re-trigger er kallerens ansvar: kanseller forrige
// token FØR ny skann startes – to løkker skal aldri dele ett token.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;

use crate::score::score_candidate;
use crate::thresholds::thresholds_for;
use crate::types::{ActivityType, DailyObservation, ScoredCandidate};

/// Kandidater forkastes når temperaturen ligger mer enn dette UNDER
/// aktivitetens minimum ...
pub const TEMP_PREFILTER_BELOW_C: f64 = 15.0;
/// ... eller mer enn dette OVER maksimum.
pub const TEMP_PREFILTER_ABOVE_C: f64 = 10.0;

/// Delt avbruddsflagg. Klones billig; settes av eier, tidsfrist eller
/// unmount-analogen i verten.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Horisont fremover fra `today` for poolbygging.
    pub search_range_days: i64,
    pub pool_cap: usize,
    /// Maks antall beholdte kandidater (beste K).
    pub top_k: usize,
    pub batch_initial: usize,
    pub batch_min: usize,
    pub batch_max: usize,
    /// Additiv vekst når en bolk er raskere enn nedre budsjettgrense.
    pub batch_grow: usize,
    pub frame_budget_lo: Duration,
    pub frame_budget_hi: Duration,
    /// Minste avstand mellom delpubliseringer.
    pub publish_interval: Duration,
    /// Total tidsfrist; overskridelse setter token.
    pub deadline: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            search_range_days: 90,
            pool_cap: 150,
            top_k: 40,
            batch_initial: 16,
            batch_min: 8,
            batch_max: 64,
            batch_grow: 8,
            frame_budget_lo: Duration::from_millis(6),
            frame_budget_hi: Duration::from_millis(18),
            publish_interval: Duration::from_millis(40),
            deadline: Duration::from_millis(2500),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScanInputs<'a> {
    pub days: &'a [DailyObservation],
    /// Eksternt foreslåtte alternativer (f.eks. fra backend). Scores og
    /// flettes inn etter fullført skann, dedup på dato.
    pub external: &'a [DailyObservation],
    pub activity: ActivityType,
    pub today: NaiveDate,
    pub config: ScanConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    Completed,
    Aborted,
}

#[derive(Debug, Clone)]
pub struct ScanReport {
    pub outcome: ScanOutcome,
    pub pool_size: usize,
    pub scored: usize,
    /// Ved Completed: endelig sortert topp-K. Ved Aborted: siste
    /// publiserte delresultat (kan være tomt).
    pub best: Vec<ScoredCandidate>,
}

/// Bygg kandidatpoolen: fremoverskuende horisont, grov temperatur-siling
/// mot aktivitetsbåndet, hard grense på antall.
pub fn build_candidate_pool(
    days: &[DailyObservation],
    activity: ActivityType,
    today: NaiveDate,
    config: &ScanConfig,
) -> Vec<DailyObservation> {
    let thr = thresholds_for(activity);
    let horizon_end = today + chrono::Duration::days(config.search_range_days);

    let mut pool: Vec<DailyObservation> = days
        .iter()
        .filter(|d| d.date >= today && d.date <= horizon_end)
        .cloned()
        .collect();

    // Tom horisont => fall tilbake til hele datasettet.
    if pool.is_empty() {
        pool = days.to_vec();
    }

    pool.retain(|d| {
        d.temperature_c >= thr.min_temp_c - TEMP_PREFILTER_BELOW_C
            && d.temperature_c <= thr.max_temp_c + TEMP_PREFILTER_ABOVE_C
    });

    pool.truncate(config.pool_cap);
    pool
}

/// Adaptiv bolkstørrelse: voks additivt under budsjett, halver over,
/// klem til [min, max].
fn adapt_batch(current: usize, elapsed: Duration, config: &ScanConfig) -> usize {
    let next = if elapsed < config.frame_budget_lo {
        current + config.batch_grow
    } else if elapsed > config.frame_budget_hi {
        current / 2
    } else {
        current
    };
    next.clamp(config.batch_min, config.batch_max)
}

/// Behold maks K: ved overflyt, lineært søk etter dårligste og kast den.
/// Lineært er greit på denne skalaen – ingen prioritetskø.
fn retain_best(retained: &mut Vec<ScoredCandidate>, candidate: ScoredCandidate, top_k: usize) {
    if retained.len() < top_k {
        retained.push(candidate);
        return;
    }
    let mut worst_idx = 0;
    for (i, c) in retained.iter().enumerate() {
        if c.safety_score < retained[worst_idx].safety_score {
            worst_idx = i;
        }
    }
    if candidate.safety_score > retained[worst_idx].safety_score {
        retained[worst_idx] = candidate;
    }
}

/// Synkende score; lik score brytes på dato (tidligst først) for
/// deterministisk rekkefølge.
fn sort_candidates(candidates: &mut [ScoredCandidate]) {
    candidates.sort_by(|a, b| {
        b.safety_score
            .partial_cmp(&a.safety_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.day.date.cmp(&b.day.date))
    });
}

/// Kjør skannet. `yield_point` kalles mellom bolker (verten henger seg på
/// sin frame-scheduler der); `publish` får sorterte delresultater, strupet
/// til publish_interval, og alltid én gang til slutt ved fullført skann.
/// Etter avbrudd skjer ingen flere publiseringer.
pub fn scan_alternatives(
    inputs: &ScanInputs<'_>,
    token: &CancelToken,
    mut yield_point: impl FnMut(),
    mut publish: impl FnMut(&[ScoredCandidate]),
) -> ScanReport {
    let config = &inputs.config;
    let thr = thresholds_for(inputs.activity);

    let pool = build_candidate_pool(inputs.days, inputs.activity, inputs.today, config);
    let pool_size = pool.len();

    let started = Instant::now();
    let mut retained: Vec<ScoredCandidate> = Vec::with_capacity(config.top_k.min(pool_size));
    let mut published: Vec<ScoredCandidate> = Vec::new();
    let mut batch_size = config.batch_initial.clamp(config.batch_min, config.batch_max);
    let mut last_publish: Option<Instant> = None;
    let mut scored = 0usize;
    let mut idx = 0usize;
    let mut aborted = false;

    while idx < pool.len() {
        // Sjekk ved bolkgrensen: tidsfrist hever tokenet, tokenet stopper alt.
        if started.elapsed() >= config.deadline {
            token.cancel();
        }
        if token.is_cancelled() {
            aborted = true;
            break;
        }

        let batch_started = Instant::now();
        let end = (idx + batch_size).min(pool.len());
        for day in &pool[idx..end] {
            retain_best(&mut retained, score_candidate(day, &thr), config.top_k);
            scored += 1;
        }
        idx = end;
        batch_size = adapt_batch(batch_size, batch_started.elapsed(), config);

        // Strupet delpublisering; siste bolk dekkes av sluttpubliseringen.
        let due = last_publish.map_or(true, |t| t.elapsed() >= config.publish_interval);
        if due && idx < pool.len() && !token.is_cancelled() {
            let mut snapshot = retained.clone();
            sort_candidates(&mut snapshot);
            publish(&snapshot);
            published = snapshot;
            last_publish = Some(Instant::now());
        }

        yield_point();
    }

    if aborted {
        // Siste publiserte delresultat blir stående som endelig.
        return ScanReport {
            outcome: ScanOutcome::Aborted,
            pool_size,
            scored,
            best: published,
        };
    }

    // Flett inn eksterne forslag – dedup på dato, pool-versjonen vinner.
    for ext in inputs.external {
        if retained.iter().any(|c| c.day.date == ext.date) {
            continue;
        }
        retain_best(&mut retained, score_candidate(ext, &thr), config.top_k);
        scored += 1;
    }

    sort_candidates(&mut retained);
    retained.truncate(config.top_k);
    publish(&retained);

    ScanReport {
        outcome: ScanOutcome::Completed,
        pool_size,
        scored,
        best: retained,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> ScanConfig {
        ScanConfig::default()
    }

    #[test]
    fn test_adapt_batch_grows_and_shrinks() {
        let c = cfg();
        // raskere enn nedre grense -> vokser additivt
        assert_eq!(adapt_batch(16, Duration::from_millis(1), &c), 24);
        // tregere enn øvre grense -> halveres
        assert_eq!(adapt_batch(64, Duration::from_millis(30), &c), 32);
        // innenfor budsjett -> uendret
        assert_eq!(adapt_batch(16, Duration::from_millis(10), &c), 16);
        // klemmes til [min, max]
        assert_eq!(adapt_batch(8, Duration::from_millis(30), &c), 8);
        assert_eq!(adapt_batch(64, Duration::from_millis(1), &c), 64);
    }
}
