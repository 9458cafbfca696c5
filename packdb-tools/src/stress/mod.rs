//! A tool used to perform stress testing.
//!
//! Random operations run against a page and a plain vector that models it.
//! Every result and the final page content must agree with the model.

use clap::Parser;
use log::{debug, info, trace};
use packdb::{Error as PageError, Options, Page};
use rand::{
    rngs::{OsRng, SmallRng},
    Rng, RngCore, SeedableRng,
};

use crate::{Error, Result};

#[derive(Parser, Debug, Clone)]
#[clap(about = "Start stress testing")]
pub(crate) struct Args {
    /// Sets the page capacity in bytes
    #[clap(long, default_value_t = 8 << 10)]
    capacity: usize,

    /// Sets the record size in bytes
    #[clap(long, default_value_t = 16)]
    record_size: usize,

    /// Number of operations to run
    #[clap(short, long, default_value_t = 1_000_000)]
    num: u64,

    /// Number of distinct record contents, small values produce duplicates
    #[clap(long, default_value_t = 64)]
    distinct: u32,

    /// Sets the random seed
    #[clap(long)]
    seed: Option<u64>,

    /// Percentage of adds among the mutating operations
    #[clap(long, default_value_t = 50)]
    add_percent: u32,

    /// Percentage of reads among all operations
    #[clap(long, default_value_t = 30)]
    read_percent: u32,
}

struct Checker {
    args: Args,
    page: Page,
    model: Vec<Vec<u8>>,
    rng: SmallRng,
    op: u64,
}

impl Checker {
    fn new(args: Args, seed: u64) -> Result<Self> {
        let mut options = Options::default();
        options.capacity = args.capacity;
        options.record_size = args.record_size;
        let page = Page::open(options)?;
        debug!("Open {page:?} with {} slots", page.max_slots());
        Ok(Self {
            args,
            page,
            model: Vec::new(),
            rng: SmallRng::seed_from_u64(seed),
            op: 0,
        })
    }

    fn gen_record(&mut self) -> Vec<u8> {
        let v = self.rng.gen_range(0..self.args.distinct.max(1));
        let mut record = vec![0u8; self.args.record_size];
        for (i, b) in v.to_le_bytes().iter().enumerate() {
            if let Some(dst) = record.get_mut(i) {
                *dst = *b;
            }
        }
        record
    }

    fn step(&mut self) -> Result<()> {
        if self.rng.gen_range(0..100) < self.args.read_percent {
            return self.read();
        }
        match self.rng.gen_range(0..100) {
            n if n < self.args.add_percent => self.add(),
            n if n % 2 == 0 => self.delete(),
            _ => self.update(),
        }
    }

    fn add(&mut self) -> Result<()> {
        let record = self.gen_record();
        let result = self.page.add_record(&record);
        let expect = if self.model.len() < self.page.max_slots() {
            Ok(self.model.len())
        } else {
            Err(PageError::NoSpace)
        };
        self.check("add", &result, &expect)?;
        if result.is_ok() {
            self.model.push(record);
        }
        Ok(())
    }

    fn delete(&mut self) -> Result<()> {
        let record = self.gen_record();
        let result = self.page.delete_record(&record);
        let expect = if self.model.is_empty() {
            Err(PageError::NoRecords)
        } else {
            self.position(&record).ok_or(PageError::RecordNotFound)
        };
        self.check("delete", &result, &expect)?;
        if let Ok(slot) = expect {
            self.model.swap_remove(slot);
        }
        Ok(())
    }

    fn update(&mut self) -> Result<()> {
        let old = self.gen_record();
        let new = self.gen_record();
        let result = self.page.update_record(&old, &new);
        let slot = self.position(&old);
        let expect = slot.map(|_| ()).ok_or(PageError::RecordNotFound);
        self.check("update", &result, &expect)?;
        if let Some(slot) = slot {
            self.model[slot] = new;
        }
        Ok(())
    }

    fn read(&mut self) -> Result<()> {
        let slot = self.rng.gen_range(0..=self.model.len());
        let result = self.page.read_record(slot).map(|r| r.into_vec());
        let expect = self.model.get(slot).cloned();
        self.check("read", &result, &expect)
    }

    fn position(&self, record: &[u8]) -> Option<usize> {
        self.model.iter().position(|r| r == record)
    }

    fn check<T>(&self, name: &str, result: &T, expect: &T) -> Result<()>
    where
        T: PartialEq + std::fmt::Debug,
    {
        trace!("{name} #{}: {result:?}", self.op);
        if result != expect {
            return Err(Error::Mismatch {
                op: self.op,
                msg: format!("{name} returned {result:?}, expected {expect:?}"),
            });
        }
        if self.page.len() != self.model.len() {
            return Err(Error::Mismatch {
                op: self.op,
                msg: format!(
                    "page holds {} records, expected {}",
                    self.page.len(),
                    self.model.len()
                ),
            });
        }
        Ok(())
    }

    fn verify(&self) -> Result<()> {
        if !self.page.iter().eq(self.model.iter().map(Vec::as_slice)) {
            return Err(Error::Mismatch {
                op: self.op,
                msg: "page content differs from the model".to_owned(),
            });
        }
        Ok(())
    }
}

pub(crate) fn run(args: Args) -> Result<()> {
    let seed = args.seed.unwrap_or_else(|| OsRng.next_u64());
    info!("Start stress testing with seed {seed}");

    let num = args.num;
    let mut checker = Checker::new(args, seed)?;
    for op in 0..num {
        checker.op = op;
        checker.step()?;
    }
    checker.verify()?;

    info!(
        "Finish {num} operations, {} records left, {}",
        checker.page.len(),
        checker.page.stats()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(seed: u64) -> Args {
        Args {
            capacity: 1024,
            record_size: 8,
            num: 20_000,
            distinct: 16,
            seed: Some(seed),
            add_percent: 60,
            read_percent: 20,
        }
    }

    #[test]
    fn stress_small_page() {
        for seed in 0..4 {
            run(args(seed)).unwrap();
        }
    }

    #[test]
    fn tiny_records() {
        let mut args = args(7);
        args.record_size = 1;
        args.distinct = 300;
        run(args).unwrap();
    }
}
