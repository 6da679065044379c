use indicatif::{ProgressBar, ProgressState, ProgressStyle};
use pocketscan::engine::progress::{LigandStatus, Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// Drives an `indicatif` bar on stderr from core progress events.
///
/// One handler can serve several proteins in a row: each `LigandsStart`
/// resets the bar.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
    unbound: Arc<Mutex<usize>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let pb = ProgressBar::new(0)
            .with_style(Self::spinner_style())
            .with_message("Initializing...");
        pb.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        pb.finish_and_clear();

        Self {
            pb: Arc::new(Mutex::new(pb)),
            unbound: Arc::new(Mutex::new(0)),
        }
    }

    /// Starts a spinner for work that emits no events of its own, such as
    /// downloading or parsing.
    pub fn start_phase(&self, message: impl Into<String>) {
        let Ok(pb) = self.pb.lock() else {
            return;
        };
        pb.reset();
        pb.set_length(0);
        pb.set_style(Self::spinner_style());
        pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
        pb.set_message(message.into());
    }

    pub fn finish(&self) {
        if let Ok(pb) = self.pb.lock() {
            pb.disable_steady_tick();
            pb.finish_and_clear();
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();
        let unbound_clone = self.unbound.clone();

        Box::new(move |progress: Progress| {
            let Ok(pb) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::IndexBuilt { atom_count } => {
                    pb.set_message(format!("Indexed {atom_count} atoms"));
                }
                Progress::LigandsStart { total } => {
                    pb.disable_steady_tick();
                    pb.reset();
                    pb.set_length(total);
                    pb.set_position(0);
                    pb.set_style(Self::bar_style());
                    pb.set_message("Ligands");
                    if let Ok(mut unbound) = unbound_clone.lock() {
                        *unbound = 0;
                    }
                }
                Progress::LigandDone { status, .. } => {
                    if status != LigandStatus::Bound {
                        if let Ok(mut unbound) = unbound_clone.lock() {
                            *unbound += 1;
                            pb.set_message(format!("Ligands ({} without pocket)", *unbound));
                        }
                    }
                    pb.inc(1);
                }
                Progress::LigandsFinish => {
                    if pb.position() < pb.length().unwrap_or(0) {
                        pb.set_position(pb.length().unwrap_or(0));
                    }
                    pb.finish();
                }
                Progress::Message(msg) => {
                    if !pb.is_finished() {
                        pb.println(format!("  {msg}"));
                    } else {
                        pb.set_message(msg);
                    }
                }
            }
        })
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}")
            .expect("Failed to create spinner style template")
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<28} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .expect("Failed to create bar style template")
            .with_key(
                "eta",
                |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                    let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
                },
            )
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn handler_initializes_in_a_clean_state() {
        let handler = CliProgressHandler::new();
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.length(), Some(0));
        assert!(pb.is_finished());
    }

    #[test]
    fn ligand_events_drive_the_bar() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        callback(Progress::IndexBuilt { atom_count: 1500 });
        assert_eq!(handler.pb.lock().unwrap().message(), "Indexed 1500 atoms");

        callback(Progress::LigandsStart { total: 3 });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.length(), Some(3));
            assert_eq!(pb.position(), 0);
        }

        callback(Progress::LigandDone {
            index: 0,
            status: LigandStatus::Bound,
        });
        callback(Progress::LigandDone {
            index: 2,
            status: LigandStatus::Unbound,
        });
        {
            let pb = handler.pb.lock().unwrap();
            assert_eq!(pb.position(), 2);
            assert_eq!(pb.message(), "Ligands (1 without pocket)");
        }

        callback(Progress::LigandsFinish);
        let pb = handler.pb.lock().unwrap();
        assert!(pb.is_finished());
        assert_eq!(pb.position(), 3);
    }

    #[test]
    fn new_protein_resets_the_counters() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        callback(Progress::LigandsStart { total: 1 });
        callback(Progress::LigandDone {
            index: 0,
            status: LigandStatus::Invalid,
        });
        callback(Progress::LigandsFinish);
        callback(Progress::LigandsStart { total: 5 });

        assert_eq!(*handler.unbound.lock().unwrap(), 0);
        let pb = handler.pb.lock().unwrap();
        assert_eq!(pb.length(), Some(5));
        assert_eq!(pb.message(), "Ligands");
    }

    #[test]
    fn callback_is_thread_safe() {
        let handler = CliProgressHandler::new();
        let callback = handler.get_callback();

        thread::spawn(move || {
            callback(Progress::LigandsStart { total: 1 });
            callback(Progress::LigandDone {
                index: 0,
                status: LigandStatus::Bound,
            });
            callback(Progress::LigandsFinish);
        })
        .join()
        .unwrap();

        let pb = handler.pb.lock().unwrap();
        assert!(pb.is_finished());
        assert_eq!(pb.position(), 1);
    }
}
