//! Console rendering of lifecycle events.
//!
//! Subscribes to the engine's event bus and translates events into console
//! lines plus an `indicatif` progress bar. The bar is created on `Init` once
//! the playlist size is known; its position follows the rotation and wraps
//! with it.

use std::sync::{Arc, Mutex};

use indicatif::{ProgressBar, ProgressStyle};
use zapper_engine::{EventBus, LifecycleEvent};

pub struct ConsoleReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    pub fn attach(self: &Arc<Self>, bus: &EventBus) {
        let reporter = Arc::clone(self);
        bus.subscribe(move |event| reporter.handle(event));
    }

    fn handle(&self, event: &LifecycleEvent) {
        match event {
            LifecycleEvent::DownloadStart { url } => {
                println!("Downloading playlist... {url}");
            }
            LifecycleEvent::DownloadEnd { success: true } => {
                println!("Playlist successfully downloaded.");
            }
            LifecycleEvent::DownloadEnd { success: false } => {
                println!("Playlist download error!");
            }
            LifecycleEvent::Init { total } => {
                println!("{total} items found in playlist.");
                let bar = ProgressBar::new(*total as u64);
                bar.set_style(
                    ProgressStyle::with_template(
                        "{pos}/{len} [{bar:40}] {percent}% {elapsed_precise}",
                    )
                    .unwrap()
                    .progress_chars("= "),
                );
                *self.bar.lock().unwrap() = Some(bar);
            }
            LifecycleEvent::Progress {
                current,
                channel_title,
                ..
            } => {
                if let Some(bar) = self.bar.lock().unwrap().as_ref() {
                    bar.println(format!("Reading {channel_title}"));
                    bar.set_position((current + 1) as u64);
                }
            }
        }
    }
}
