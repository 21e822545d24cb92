//! # Slideshow
//!
//! [`Slideshow`] is the carousel index; [`SlideshowTimer`] advances it on a
//! fixed period in a background task.

use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slideshow {
    images: Vec<String>,
    current: usize,
}

impl Slideshow {
    pub fn new(images: Vec<String>) -> Self {
        Self { images, current: 0 }
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    pub fn index(&self) -> usize {
        self.current
    }

    /// The image on screen; `None` when there are no images.
    pub fn current(&self) -> Option<&str> {
        self.images.get(self.current).map(String::as_str)
    }

    pub fn next(&mut self) {
        if !self.images.is_empty() {
            self.current = (self.current + 1) % self.images.len();
        }
    }

    pub fn prev(&mut self) {
        if !self.images.is_empty() {
            self.current = (self.current + self.images.len() - 1) % self.images.len();
        }
    }
}

/// Advances a slideshow once per period until stopped or dropped.
pub struct SlideshowTimer {
    task: JoinHandle<()>,
    state: watch::Receiver<Slideshow>,
}

impl SlideshowTimer {
    pub fn start(slideshow: Slideshow, period: Duration) -> Self {
        let (publisher, state) = watch::channel(slideshow.clone());
        let task = tokio::spawn(async move {
            let mut slideshow = slideshow;
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                slideshow.next();
                debug!(index = slideshow.index(), "Slideshow advanced");
                if publisher.send(slideshow.clone()).is_err() {
                    break;
                }
            }
        });
        Self { task, state }
    }

    pub fn current(&self) -> Slideshow {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Slideshow> {
        self.state.clone()
    }

    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for SlideshowTimer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    fn images(count: usize) -> Vec<String> {
        (1..=count).map(|i| format!("images/image{}.jpg", i)).collect()
    }

    #[test]
    fn next_and_prev_wrap_around() {
        let mut slideshow = Slideshow::new(images(3));
        slideshow.prev();
        assert_eq!(slideshow.current(), Some("images/image3.jpg"));
        slideshow.next();
        slideshow.next();
        assert_eq!(slideshow.index(), 1);
    }

    #[test]
    fn empty_slideshow_has_no_current_image() {
        let mut slideshow = Slideshow::new(Vec::new());
        slideshow.next();
        slideshow.prev();
        assert_eq!(slideshow.current(), None);
        assert_eq!(slideshow.index(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn timer_advances_once_per_period() {
        let started = Instant::now();
        let timer = SlideshowTimer::start(Slideshow::new(images(5)), Duration::from_millis(3000));
        let mut state = timer.subscribe();

        state.changed().await.unwrap();
        assert_eq!(state.borrow_and_update().index(), 1);
        assert_eq!(started.elapsed(), Duration::from_millis(3000));

        state.changed().await.unwrap();
        assert_eq!(state.borrow_and_update().index(), 2);
        assert_eq!(started.elapsed(), Duration::from_millis(6000));
    }

    #[tokio::test(start_paused = true)]
    async fn stopped_timer_no_longer_advances() {
        let timer = SlideshowTimer::start(Slideshow::new(images(5)), Duration::from_millis(3000));
        let mut state = timer.subscribe();

        timer.stop();

        assert!(state.changed().await.is_err());
        assert_eq!(timer.current().index(), 0);
    }
}
