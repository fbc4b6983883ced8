use crate::models::Banner;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Time each banner stays on screen before the next one is shown
pub const ROTATION_INTERVAL: Duration = Duration::from_millis(5000);

/// Cyclic selection over the banners fetched for one display location
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BannerCarousel {
    banners: Vec<Banner>,
    current: usize,
}

impl BannerCarousel {
    pub fn new(banners: Vec<Banner>) -> Self {
        Self { banners, current: 0 }
    }

    /// Swap in freshly fetched banners and start over at the first one
    pub fn replace(&mut self, banners: Vec<Banner>) {
        self.banners = banners;
        self.current = 0;
    }

    /// Advance to the next banner, wrapping around. No-op for one banner or less.
    pub fn tick(&mut self) -> bool {
        if !self.rotates() {
            return false;
        }
        self.current = (self.current + 1) % self.banners.len();
        true
    }

    /// Jump straight to the banner at `index`
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.banners.len() {
            return false;
        }
        self.current = index;
        true
    }

    pub fn current(&self) -> Option<&Banner> {
        self.banners.get(self.current)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn banners(&self) -> &[Banner] {
        &self.banners
    }

    pub fn len(&self) -> usize {
        self.banners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.banners.is_empty()
    }

    /// Only lists with more than one banner rotate
    pub fn rotates(&self) -> bool {
        self.banners.len() > 1
    }

    /// One flag per banner, `true` for the one on screen. Empty when there is nothing to rotate.
    pub fn indicators(&self) -> Vec<bool> {
        if !self.rotates() {
            return Vec::new();
        }
        (0..self.banners.len()).map(|i| i == self.current).collect()
    }
}

/// Owns the periodic task that advances a [`BannerCarousel`].
///
/// The task runs only while the carousel has more than one banner and is
/// aborted when the rotation is stopped or dropped. Manual selection does
/// not touch the timer: ticks stay on the schedule set when rotation
/// started.
pub struct BannerRotation {
    state: Arc<Mutex<BannerCarousel>>,
    index_tx: Arc<watch::Sender<usize>>,
    period: Duration,
    task: Option<JoinHandle<()>>,
}

impl BannerRotation {
    /// Start rotating with the default five second period. Must be called inside a tokio runtime.
    pub fn start(banners: Vec<Banner>) -> Self {
        Self::with_period(banners, ROTATION_INTERVAL)
    }

    pub fn with_period(banners: Vec<Banner>, period: Duration) -> Self {
        let (index_tx, _) = watch::channel(0);
        let mut rotation = Self {
            state: Arc::new(Mutex::new(BannerCarousel::new(banners))),
            index_tx: Arc::new(index_tx),
            period,
            task: None,
        };
        rotation.spawn_timer();
        rotation
    }

    /// Replace the banner list: index goes back to 0 and the timer restarts
    pub fn replace(&mut self, banners: Vec<Banner>) {
        self.stop();
        self.lock().replace(banners);
        self.index_tx.send_replace(0);
        self.spawn_timer();
    }

    /// Manually pick a banner; the timer keeps its phase
    pub fn select(&self, index: usize) -> bool {
        let selected = self.lock().select(index);
        if selected {
            debug!("Banner {} selected manually", index);
            self.index_tx.send_replace(index);
        }
        selected
    }

    pub fn current_index(&self) -> usize {
        self.lock().current_index()
    }

    pub fn current(&self) -> Option<Banner> {
        self.lock().current().cloned()
    }

    /// Copy of the carousel as it is right now
    pub fn snapshot(&self) -> BannerCarousel {
        self.lock().clone()
    }

    /// Receives the current index every time it changes
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.index_tx.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Cancel the timer. Safe to call more than once.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            debug!("Banner rotation timer cancelled");
        }
    }

    fn lock(&self) -> MutexGuard<'_, BannerCarousel> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn spawn_timer(&mut self) {
        let count = self.lock().len();
        if count <= 1 {
            debug!("{} banner(s), rotation timer not started", count);
            return;
        }

        info!("Rotating {} banners every {:?}", count, self.period);
        let state = Arc::clone(&self.state);
        let index_tx = Arc::clone(&self.index_tx);
        let period = self.period;

        self.task = Some(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let index = {
                    let mut carousel = state.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                    carousel.tick();
                    carousel.current_index()
                };
                index_tx.send_replace(index);
            }
        }));
    }
}

impl Drop for BannerRotation {
    fn drop(&mut self) {
        self.stop();
    }
}
