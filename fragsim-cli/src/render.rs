//! Console rendering of per-tick heap state and the final report.

use std::fmt::Write as _;

use fragsim_core::{Presenter, RunOutcome, SimConfig, TickSnapshot};

fn join_semicolon<I: IntoIterator<Item = usize>>(values: I) -> String {
    let mut out = String::new();
    for (i, v) in values.into_iter().enumerate() {
        if i > 0 {
            out.push(';');
        }
        let _ = write!(out, "{v}");
    }
    out
}

/// Presenter that prints the arena row, the chunk table, and the live
/// tags after every tick.
#[derive(Debug, Default)]
pub struct ConsolePresenter;

impl Presenter for ConsolePresenter {
    fn on_tick(&mut self, snapshot: &TickSnapshot<'_>) {
        let arena: String = snapshot.cells.iter().map(ToString::to_string).collect();
        let tags: String = snapshot
            .live_tags
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(";");

        println!();
        println!("{}t={}", snapshot.action.marker(), snapshot.tick);
        println!("*{arena}");
        println!();
        println!(
            "chunk_starts={}",
            join_semicolon(snapshot.chunks.iter().map(|c| c.start))
        );
        println!(
            "chunk_sizes={}",
            join_semicolon(snapshot.chunks.iter().map(|c| c.size))
        );
        println!("live_tags={tags}");
    }
}

/// Print the validated configuration before the run starts.
pub fn print_config(config: &SimConfig) {
    println!("Configuration:");
    match config.epochs {
        Some(epochs) => println!("  Epochs:            {epochs}"),
        None => println!("  Epochs:            unlimited"),
    }
    println!("  Max request size:  {}", config.max_request);
    println!("  Heap size:         {}", config.heap_size);
    println!("  Free probability:  {:.5}", config.free_prob);
    println!("  Seed mode:         {:?}", config.seed);
}

/// Print the final report after the run halts.
pub fn print_report(outcome: &RunOutcome) {
    let report = &outcome.report;

    println!();
    println!("Run halted: {:?} after {} ticks", outcome.halt, outcome.ticks);
    println!("Execution statistics:");
    println!("  Total sum of allocations:   {}", report.sum_allocations);
    println!("  Number of allocations:      {}", report.num_allocations);
    println!("  Total sum of frees:         {}", report.sum_frees);
    println!("  Number of frees:            {}", report.num_frees);
    match report.free_tail_start {
        Some(tail) => println!("  Free tail starts at:        {tail}"),
        None => println!("  Free tail starts at:        n/a (no free chunks)"),
    }
    match report.active_area_free_slots {
        Some(slots) => println!("  Free slots in active area:  {slots}"),
        None => println!("  Free slots in active area:  n/a"),
    }
    match report.percent_free_in_active_area {
        Some(pct) => println!("  Free fraction, active area: {pct:.5}"),
        None => println!("  Free fraction, active area: n/a"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semicolon_join() {
        assert_eq!(join_semicolon([4, 0, 12]), "4;0;12");
        assert_eq!(join_semicolon([]), "");
        assert_eq!(join_semicolon([7]), "7");
    }
}
