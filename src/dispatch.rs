//! Chunked parallel-for over a half-open index range, used to fan face
//! processing out across hardware threads.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Run `f(i)` for every `i` in `[start, end)`, split into `worker_count`
/// chunks (or `1`, sequentially, if `worker_count` is `Some(1)` or the
/// range is empty). `worker_count: None` uses `num_cpus::get()`.
///
/// Guarantees: every index is visited exactly once; there's no ordering
/// guarantee across workers; if any call to `f` panics, that panic is
/// caught, all workers finish their own chunks, and the first panic
/// payload is resumed in the caller — so a failure aborts the draw instead
/// of silently completing a partial frame.
pub fn parallel_for<F>(start: usize, end: usize, worker_count: Option<usize>, f: F)
where
    F: Fn(usize) + Send + Sync,
{
    if end <= start {
        return;
    }

    let workers = worker_count.unwrap_or_else(num_cpus::get).max(1);
    log::debug!("parallel_for: {} items across {} workers", end - start, workers);

    if workers == 1 {
        for i in start..end {
            f(i);
        }
        return;
    }

    let chunk_len = ((end - start) + workers - 1) / workers;
    let next = AtomicUsize::new(start);
    let first_panic: Mutex<Option<Box<dyn std::any::Any + Send>>> = Mutex::new(None);

    std::thread::scope(|scope| {
        for _ in 0..workers {
            let next = &next;
            let first_panic = &first_panic;
            let f = &f;
            scope.spawn(move || loop {
                let chunk_start = next.fetch_add(chunk_len, Ordering::Relaxed);
                if chunk_start >= end {
                    break;
                }
                let chunk_end = (chunk_start + chunk_len).min(end);
                for i in chunk_start..chunk_end {
                    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| f(i)));
                    if let Err(payload) = result {
                        let mut slot = first_panic.lock().expect("panic registry poisoned");
                        if slot.is_none() {
                            *slot = Some(payload);
                        }
                        return;
                    }
                }
            });
        }
    });

    if let Some(payload) = first_panic.into_inner().expect("panic registry poisoned") {
        std::panic::resume_unwind(payload);
    }
}
