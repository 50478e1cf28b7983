use core::time::Duration;

use voxell_timer::Timer;

/// Runs `f` once and returns its result together with the wall-clock time it took.
pub fn time_fn<A>(f: impl FnMut() -> A) -> (A, Duration) {
    let mut timer = Timer::new(f);
    let res = timer.exec();
    (res, timer.get_elapsed().unwrap_or_default())
}
