//! Fork-join execution of matcher work.

use std::thread;

/// Run `task` on `nthreads` scoped workers and collect their buffers.
///
/// Worker `t` receives its index and is expected to stride its strategy's
/// outer iteration space (`t`, `t + nthreads`, ...). Shared inputs are
/// borrowed read-only for the duration of the scope, so nothing a worker
/// can reach is mutated while it runs; each worker exclusively owns its
/// output buffer. All workers run to completion and the only suspension
/// point is the final join. Buffers are returned unmerged, in worker order.
pub(crate) fn fork_join<R, F>(nthreads: usize, task: F) -> Vec<Vec<R>>
where
    R: Send,
    F: Fn(usize) -> Vec<R> + Sync,
{
    assert!(nthreads > 0, "fork_join requires at least one worker");

    let task = &task;
    thread::scope(|scope| {
        let workers: Vec<_> = (0..nthreads)
            .map(|t| scope.spawn(move || task(t)))
            .collect();

        workers
            .into_iter()
            .map(|w| w.join().expect("worker thread panicked"))
            .collect()
    })
}
