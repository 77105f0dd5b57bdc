use crate::error::{BatchError, Result};

/// Split `items` into exactly `parts` contiguous chunks.
///
/// Every chunk gets `len / parts` items and the first `len % parts` chunks
/// take one extra, so earlier chunks absorb the remainder. Concatenating the
/// chunks in order gives back `items`. With fewer items than parts the
/// trailing chunks are empty.
pub fn split_even<T: Clone>(items: &[T], parts: usize) -> Result<Vec<Vec<T>>> {
    if parts == 0 {
        return Err(BatchError::Config("cannot split work across 0 workers".into()));
    }
    let base = items.len() / parts;
    let extra = items.len() % parts;

    let mut out = Vec::with_capacity(parts);
    let mut start = 0;
    for i in 0..parts {
        let len = base + usize::from(i < extra);
        out.push(items[start..start + len].to_vec());
        start += len;
    }
    Ok(out)
}
