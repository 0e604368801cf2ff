//! Random exact cover instances, for benchmarks, demos and stress tests.
//!
//! # Example
//! ```
//! use dlx::cs::combinatorial::random_instance::random_rows;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let mut rng = ChaCha20Rng::seed_from_u64(1);
//! let rows = random_rows(&mut rng, 1000, 40, 0.2).unwrap();
//! assert_eq!(rows.len(), 1000);
//! assert!(rows.iter().flatten().all(|&c| c < 40));
//! ```

use crate::cs::error::{Error, Result};
use rand::seq::SliceRandom;
use rand::Rng;

fn check_density(density: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&density) {
        return Err(Error::InvalidInput(format!(
            "density must lie in [0, 1], got {}",
            density
        )));
    }
    Ok(())
}

/// Generates `rows` rows over `cols` columns, setting each cell independently
/// with probability `density`. Columns within a row are ascending.
///
/// # Errors
///
/// [`Error::InvalidInput`] if `density` is outside `[0, 1]` or NaN.
pub fn random_rows<R: Rng + ?Sized>(
    rng: &mut R,
    rows: usize,
    cols: usize,
    density: f64,
) -> Result<Vec<Vec<usize>>> {
    check_density(density)?;
    let mut result = Vec::with_capacity(rows);
    for _ in 0..rows {
        let mut row = Vec::new();
        for c in 0..cols {
            if rng.gen_bool(density) {
                row.push(c);
            }
        }
        result.push(row);
    }
    Ok(result)
}

/// Like [`random_rows`], but also hides a random partition of the columns among
/// the rows so the instance is guaranteed to have an exact cover.
///
/// The planted rows split the columns into parts of between 1 and
/// `max(1, round(cols * density))` columns each, appended after the noise rows
/// and then shuffled in with them.
///
/// Returns the rows and the indices of the planted partition rows.
///
/// # Errors
///
/// [`Error::InvalidInput`] if `density` is outside `[0, 1]` or NaN.
pub fn random_rows_with_cover<R: Rng + ?Sized>(
    rng: &mut R,
    rows: usize,
    cols: usize,
    density: f64,
) -> Result<(Vec<Vec<usize>>, Vec<usize>)> {
    let noise = random_rows(rng, rows, cols, density)?;

    let mut columns: Vec<usize> = (0..cols).collect();
    columns.shuffle(rng);
    let max_part = ((cols as f64 * density).round() as usize).max(1);

    let mut tagged: Vec<(bool, Vec<usize>)> =
        noise.into_iter().map(|row| (false, row)).collect();
    let mut rest = &columns[..];
    while !rest.is_empty() {
        let take = rng.gen_range(1..=max_part.min(rest.len()));
        let mut part = rest[..take].to_vec();
        part.sort_unstable();
        tagged.push((true, part));
        rest = &rest[take..];
    }
    tagged.shuffle(rng);

    let planted = tagged
        .iter()
        .enumerate()
        .filter(|(_, (is_planted, _))| *is_planted)
        .map(|(i, _)| i)
        .collect();
    let rows = tagged.into_iter().map(|(_, row)| row).collect();
    Ok((rows, planted))
}
