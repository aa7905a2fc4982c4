use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use crate::app::Msg;

/// Background thread posting [`Msg::Tick`] once per period until dropped.
///
/// Every tick carries the generation it was started with, so ticks still in flight after a
/// restart can be told apart from the current game's.
#[derive(Debug)]
pub struct Ticker {
    generation: u64,
    stop: Arc<AtomicBool>,
}

impl Ticker {
    pub fn spawn(generation: u64, period: Duration, tx: Sender<Msg>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let stopped = Arc::clone(&stop);

        thread::spawn(move || {
            loop {
                thread::sleep(period);
                if stopped.load(Ordering::Relaxed) || tx.send(Msg::Tick(generation)).is_err() {
                    break;
                }
            }
            log::trace!("Ticker {} finished", generation);
        });
        log::debug!("Ticker {} started", generation);

        Self { generation, stop }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    #[test]
    fn posts_ticks_with_its_generation() {
        let (tx, rx) = mpsc::channel();
        let ticker = Ticker::spawn(7, Duration::from_millis(1), tx);

        assert_eq!(rx.recv_timeout(Duration::from_secs(5)), Ok(Msg::Tick(7)));
        assert_eq!(ticker.generation(), 7);
    }

    #[test]
    fn stops_after_drop() {
        let (tx, rx) = mpsc::channel();
        drop(Ticker::spawn(1, Duration::from_millis(50), tx));

        // the thread exits and drops its sender, at most one tick slips through
        let leftover = rx.iter().count();
        assert!(leftover <= 1);
    }
}
