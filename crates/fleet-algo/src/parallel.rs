//! Chunked fills over dense coefficient buffers.
//!
//! With the `parallel` feature the chunks are filled on the rayon pool,
//! otherwise sequentially. Each chunk is written independently.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Split `data` into consecutive chunks of `width` and call `fill(i, chunk)`
/// for each. `width` must be non-zero.
pub fn fill_chunks<F>(data: &mut [f64], width: usize, fill: F)
where
    F: Fn(usize, &mut [f64]) + Send + Sync,
{
    debug_assert!(width > 0);

    #[cfg(feature = "parallel")]
    {
        data.par_chunks_mut(width)
            .enumerate()
            .for_each(|(i, chunk)| fill(i, chunk));
    }

    #[cfg(not(feature = "parallel"))]
    {
        data.chunks_mut(width)
            .enumerate()
            .for_each(|(i, chunk)| fill(i, chunk));
    }
}

/// Run two independent closures, concurrently when `parallel` is enabled.
pub fn join<A, B, RA, RB>(a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    #[cfg(feature = "parallel")]
    {
        rayon::join(a, b)
    }

    #[cfg(not(feature = "parallel"))]
    {
        (a(), b())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_chunks_visits_every_chunk_once() {
        let mut data = vec![0.0; 12];
        fill_chunks(&mut data, 4, |i, chunk| {
            for (j, slot) in chunk.iter_mut().enumerate() {
                *slot = (i * 10 + j) as f64;
            }
        });
        assert_eq!(data[0], 0.0);
        assert_eq!(data[5], 11.0);
        assert_eq!(data[11], 23.0);
    }

    #[test]
    fn test_join_returns_both_results() {
        let (a, b) = join(|| 2 + 2, || "four");
        assert_eq!(a, 4);
        assert_eq!(b, "four");
    }
}
