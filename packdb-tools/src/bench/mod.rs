//! A tool used to measure page operation latency.

use std::{fmt, time::Instant};

use clap::{Parser, ValueEnum};
use hdrhistogram::Histogram;
use log::{debug, info};
use packdb::{Options, Page};
use rand::{rngs::SmallRng, seq::SliceRandom, RngCore, SeedableRng};

use crate::Result;

#[derive(Parser, Debug, Clone)]
#[clap(about = "Start bench testing")]
pub(crate) struct Args {
    /// Sets the page capacity in bytes
    #[arg(long, default_value_t = 8 << 10)]
    capacity: usize,

    /// Sets the record size in bytes
    #[arg(long, default_value_t = 64)]
    record_size: usize,

    /// Number of times to fill and drain the page
    #[arg(short, long, default_value_t = 1000)]
    rounds: u64,

    /// Order in which records are deleted
    #[arg(long, default_value_t = DeleteOrder::Random)]
    delete_order: DeleteOrder,

    /// Base seed for random.
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

#[derive(ValueEnum, Clone, Debug, Copy)]
enum DeleteOrder {
    /// Delete records in insertion order.
    First,
    /// Delete records in reverse insertion order, so no record is moved.
    Last,
    /// Delete records in a random order.
    Random,
}

impl fmt::Display for DeleteOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeleteOrder::First => "first",
            DeleteOrder::Last => "last",
            DeleteOrder::Random => "random",
        })
    }
}

struct Recorder {
    name: &'static str,
    hist: Histogram<u64>,
}

impl Recorder {
    fn new(name: &'static str) -> Result<Self> {
        Ok(Self {
            name,
            hist: Histogram::new(3)?,
        })
    }

    fn record(&mut self, start: Instant) {
        self.hist.saturating_record(start.elapsed().as_nanos() as u64);
    }

    fn report(&self) {
        info!(
            "{:<8} count: {}, mean: {:.1}ns, p50: {}ns, p99: {}ns, max: {}ns",
            self.name,
            self.hist.len(),
            self.hist.mean(),
            self.hist.value_at_quantile(0.5),
            self.hist.value_at_quantile(0.99),
            self.hist.max(),
        );
    }
}

pub(crate) fn run(args: Args) -> Result<()> {
    let mut options = Options::default();
    options.capacity = args.capacity;
    options.record_size = args.record_size;
    let mut page = Page::open(options)?;
    debug!("Bench {page:?} with {} slots", page.max_slots());

    let mut rng = SmallRng::seed_from_u64(args.seed);
    let mut add = Recorder::new("add")?;
    let mut read = Recorder::new("read")?;
    let mut update = Recorder::new("update")?;
    let mut delete = Recorder::new("delete")?;

    let mut records = Vec::with_capacity(page.max_slots());
    for _ in 0..args.rounds {
        records.clear();
        while !page.is_full() {
            let mut record = vec![0u8; args.record_size];
            rng.fill_bytes(&mut record);
            let start = Instant::now();
            page.add_record(&record)?;
            add.record(start);
            records.push(record);
        }

        for slot in 0..page.len() {
            let start = Instant::now();
            let record = page.read_record(slot);
            read.record(start);
            debug_assert!(record.is_some());
        }

        for record in records.iter_mut() {
            let mut new = vec![0u8; args.record_size];
            rng.fill_bytes(&mut new);
            let start = Instant::now();
            page.update_record(record.as_slice(), &new)?;
            update.record(start);
            *record = new;
        }

        match args.delete_order {
            DeleteOrder::First => {}
            DeleteOrder::Last => records.reverse(),
            DeleteOrder::Random => records.shuffle(&mut rng),
        }
        for record in &records {
            let start = Instant::now();
            page.delete_record(record)?;
            delete.record(start);
        }
    }

    info!(
        "Bench {} rounds, delete order {}, {}",
        args.rounds,
        args.delete_order,
        page.stats()
    );
    for recorder in [&add, &read, &update, &delete] {
        recorder.report();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bench_all_orders() {
        for delete_order in [DeleteOrder::First, DeleteOrder::Last, DeleteOrder::Random] {
            let args = Args {
                capacity: 1024,
                record_size: 32,
                rounds: 10,
                delete_order,
                seed: 1,
            };
            run(args).unwrap();
        }
    }

    #[test]
    fn delete_orders_have_help() {
        for order in DeleteOrder::value_variants() {
            let value = order.to_possible_value().unwrap();
            assert!(value.get_help().is_some(), "{order} has no help");
        }
    }
}
