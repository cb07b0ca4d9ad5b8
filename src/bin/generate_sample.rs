use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use tfidf_features::data::model::{Table, Value};
use tfidf_features::data::writer::{ensure_parent_dir, save_table};
use tfidf_features::pipeline::{TEST_INPUT, TRAIN_INPUT};
use tfidf_features::LogContext;

/// Write a small synthetic interim dataset and parameter file.
#[derive(Parser, Debug)]
#[command(name = "generate_sample")]
struct Args {
    /// Project root that receives params.yaml and data/interim/
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Total number of documents across both splits
    #[arg(long, default_value_t = 200)]
    rows: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

const HAM_WORDS: &[&str] = &[
    "meeting", "lunch", "tomorrow", "project", "family", "weekend", "call", "home",
    "thanks", "dinner", "report", "later",
];
const SPAM_WORDS: &[&str] = &[
    "free", "winner", "prize", "claim", "urgent", "cash", "offer", "credit", "click",
    "reward", "limited", "bonus",
];
const SHARED_WORDS: &[&str] = &["today", "please", "now", "your", "the", "message"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a>(&mut self, words: &[&'a str]) -> &'a str {
        words[self.below(words.len())]
    }
}

fn generate_document(rng: &mut SimpleRng, target: i64) -> String {
    let topic = if target == 1 { SPAM_WORDS } else { HAM_WORDS };
    let len = 4 + rng.below(8);
    (0..len)
        .map(|_| {
            if rng.below(3) == 0 {
                rng.pick(SHARED_WORDS)
            } else {
                rng.pick(topic)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn generate_split(rng: &mut SimpleRng, rows: usize) -> Result<Table> {
    let data = (0..rows)
        .map(|_| {
            let target = (rng.below(2)) as i64;
            // Roughly one document in twenty is blank
            let text = if rng.below(20) == 0 {
                String::new()
            } else {
                generate_document(rng, target)
            };
            vec![Value::Text(text), Value::Integer(target)]
        })
        .collect();
    Table::new(vec!["text".into(), "target".into()], data).map_err(anyhow::Error::msg)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let log = LogContext::detached();

    let mut rng = SimpleRng::new(args.seed);
    let n_test = (args.rows / 5).max(1);
    let n_train = args.rows.saturating_sub(n_test).max(1);

    let interim = args.out_dir.join("data").join("interim");
    let train = generate_split(&mut rng, n_train)?;
    let test = generate_split(&mut rng, n_test)?;
    save_table(&train, &interim.join(TRAIN_INPUT), &log).context("writing train split")?;
    save_table(&test, &interim.join(TEST_INPUT), &log).context("writing test split")?;

    let params_path = args.out_dir.join("params.yaml");
    ensure_parent_dir(&params_path)?;
    fs::write(&params_path, "feature_engineering:\n  max_features: 50\n")
        .with_context(|| format!("writing {}", params_path.display()))?;

    println!(
        "Wrote {n_train} train and {n_test} test documents to {}",
        interim.display()
    );
    Ok(())
}
