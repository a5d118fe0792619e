//! Bucket arithmetic over a resolved symbol sequence: per-symbol frequency
//! counts and their prefix-sum transform into bucket-start offsets.

/// Counts occurrences of each letter code in `seq`.
pub fn frequency(seq: &[u8], sigma: usize) -> Vec<usize> {
    let mut counts = vec![0usize; sigma];
    for &c in seq {
        counts[c as usize] += 1;
    }
    counts
}

/// Prefix-sum transform: `C[0] = 0`, `C[c + 1] = C[c] + counts[c]`.
///
/// The result has one extra trailing slot so every bucket, including the
/// last, can be addressed as `[C[c], C[c + 1])`; `C[sigma]` is the sequence
/// length.
pub fn bucket_start(counts: &[usize]) -> Vec<usize> {
    let mut c = Vec::with_capacity(counts.len() + 1);
    let mut total = 0usize;
    c.push(0);
    for &count in counts {
        total += count;
        c.push(total);
    }
    c
}

/// Frequency and bucket starts in one call.
pub fn buckets(seq: &[u8], sigma: usize) -> Vec<usize> {
    bucket_start(&frequency(seq, sigma))
}
