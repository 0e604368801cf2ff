//! Solves a random exact cover instance and prints the chosen rows.
//!
//! Usage: `random_cover [seed] [rows] [cols] [density]`
//! (defaults: entropy seed, 1000 rows, 40 columns, density 0.2).

use dlx::combinatorial::{random_rows, ExactCoverSearch, SparseMatrix};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::process;
use std::str::FromStr;

fn arg<T: FromStr>(args: &[String], index: usize, name: &str) -> Option<T> {
    let raw = args.get(index)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            eprintln!("invalid {}: {}", name, raw);
            process::exit(2);
        }
    }
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let seed: Option<u64> = arg(&args, 1, "seed");
    let rows: usize = arg(&args, 2, "rows").unwrap_or(1000);
    let cols: usize = arg(&args, 3, "cols").unwrap_or(40);
    let density: f64 = arg(&args, 4, "density").unwrap_or(0.2);

    let mut rng = match seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    };

    let instance = match random_rows(&mut rng, rows, cols, density) {
        Ok(instance) => instance,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(2);
        }
    };
    let matrix = match SparseMatrix::new(&instance, cols) {
        Ok(matrix) => matrix,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(2);
        }
    };

    let mut search = ExactCoverSearch::new(matrix);
    let found = search.solve();
    let stats = search.stats();
    if found {
        for &r in search.solution() {
            println!("{:?}", instance[r]);
        }
    } else {
        println!("no exact cover");
    }
    println!(
        "{} search nodes, {} updates, depth {}",
        stats.nodes, stats.updates, stats.max_depth
    );
}
