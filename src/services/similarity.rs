use ndarray::{Array2, ArrayView1};

/// Pairwise cosine similarity between the rows of a count matrix
///
/// Dot products are accumulated exactly in integer arithmetic over the
/// non-zero entries of each column, so the result is bit-for-bit symmetric
/// and reproducible. Rows with no counts score 0.0 against everything,
/// themselves included. Non-zero rows have exactly 1.0 on the diagonal.
pub fn cosine_similarity(counts: &Array2<u32>) -> Array2<f64> {
    let n_rows = counts.nrows();

    // postings[column] = rows with a non-zero count in that column
    let mut postings: Vec<Vec<(usize, u64)>> = vec![Vec::new(); counts.ncols()];
    for (row, values) in counts.rows().into_iter().enumerate() {
        for (column, &count) in values.iter().enumerate() {
            if count > 0 {
                postings[column].push((row, u64::from(count)));
            }
        }
    }

    let norms: Vec<f64> = counts.rows().into_iter().map(l2_norm).collect();

    let mut similarity = Array2::<f64>::zeros((n_rows, n_rows));
    let mut dots = vec![0u64; n_rows];
    for (i, values) in counts.rows().into_iter().enumerate() {
        if norms[i] == 0.0 {
            continue;
        }
        similarity[[i, i]] = 1.0;

        dots.iter_mut().for_each(|d| *d = 0);
        for (column, &ci) in values.iter().enumerate() {
            if ci == 0 {
                continue;
            }
            for &(j, cj) in postings[column].iter().filter(|(j, _)| *j > i) {
                dots[j] += u64::from(ci) * cj;
            }
        }

        for j in (i + 1)..n_rows {
            if dots[j] == 0 {
                continue;
            }
            // rounding can push identical rows just past the diagonal's 1.0
            let score = (dots[j] as f64 / (norms[i] * norms[j])).min(1.0);
            similarity[[i, j]] = score;
            similarity[[j, i]] = score;
        }
    }

    similarity
}

fn l2_norm(row: ArrayView1<'_, u32>) -> f64 {
    let sum_sq: u64 = row.iter().map(|&c| u64::from(c) * u64::from(c)).sum();
    (sum_sq as f64).sqrt()
}
