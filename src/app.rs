use crate::cli::Arguments;
use crate::stopwatch::{format_elapsed, Stopwatch};
use slint::{ModelRc, SharedString, TimerMode, VecModel};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

slint::slint! {
import { Button } from "std-widgets.slint";

export component MainWindow inherits Window {
        in property <string> elapsed: "00:00:00.000";
        in property <bool> running;
        in property <bool> resettable;
        in property <[string]> laps;
        in property <string> best;

        callback toggle();
        callback reset();
        callback lap();

        preferred-width: 480px;
        preferred-height: 640px;

        icon: @image-url("assets/watch.png");
        title: @tr("Stopwatch");
        background: #121212;

        Image {
            source: @image-url("assets/watch.png");
            width: 80%;
            height: self.width;
            opacity: 0.6;
            x: (parent.width - self.width) / 2;
            y: (parent.height - self.height) / 2;
        }

        VerticalLayout {
            alignment: center;
            padding: 20px;
            spacing: 15px;

            Text {
                text: elapsed;
                color: white;
                font-size: 42px;
                horizontal-alignment: center;
            }

            HorizontalLayout {
                alignment: center;
                spacing: 15px;

                Button {
                    text: running ? @tr("Stop") : @tr("Start");
                    clicked => { toggle(); }
                }

                Button {
                    text: @tr("Reset");
                    enabled: resettable;
                    clicked => { reset(); }
                }

                Button {
                    text: @tr("Lap");
                    enabled: running;
                    clicked => { lap(); }
                }
            }

            Text {
                text: @tr("Laps");
                color: lightgrey;
                font-size: 20px;
                horizontal-alignment: center;
            }

            if laps.length == 0 : Text {
                text: @tr("No laps recorded yet.");
                color: lightgrey;
                horizontal-alignment: center;
            }

            for line in laps : Text {
                text: line;
                color: lightgrey;
                horizontal-alignment: center;
            }

            if best != "" : Text {
                text: @tr("Best Time");
                color: lightgreen;
                font-size: 20px;
                horizontal-alignment: center;
            }

            if best != "" : Text {
                text: best;
                color: lightgreen;
                horizontal-alignment: center;
            }
        }
}
}

pub struct Window {
    main_window: MainWindow,
    ticker: Rc<slint::Timer>,
}

impl Window {
    pub fn new(arguments: &Arguments) -> anyhow::Result<Self> {
        let main_window = MainWindow::new()?;
        let stopwatch = Rc::new(RefCell::new(Stopwatch::default()));
        let ticker = Rc::new(slint::Timer::default());
        let tick = Duration::from_millis(arguments.tick_ms);

        main_window.on_toggle({
            let window = main_window.as_weak();
            let state = stopwatch.clone();
            let ticker = ticker.clone();

            move || {
                let now = Instant::now();
                let mut stopwatch = state.borrow_mut();

                if stopwatch.is_running() {
                    stopwatch.stop(now);
                    ticker.stop();
                    tracing::debug!(elapsed = ?stopwatch.elapsed(now), "stopped the stopwatch");
                } else {
                    stopwatch.start(now);
                    // At most one pending tick at a time.
                    ticker.stop();
                    ticker.start(TimerMode::Repeated, tick, {
                        let window = window.clone();
                        let state = state.clone();

                        move || {
                            if let Some(window) = window.upgrade() {
                                sync_elapsed(&window, &state.borrow(), Instant::now());
                            }
                        }
                    });
                    tracing::debug!("started the stopwatch");
                }

                if let Some(window) = window.upgrade() {
                    sync(&window, &stopwatch, now);
                }
            }
        });

        main_window.on_reset({
            let window = main_window.as_weak();
            let state = stopwatch.clone();
            let ticker = ticker.clone();

            move || {
                let mut stopwatch = state.borrow_mut();

                stopwatch.reset();
                ticker.stop();
                tracing::debug!("reset the stopwatch");

                if let Some(window) = window.upgrade() {
                    sync(&window, &stopwatch, Instant::now());
                }
            }
        });

        main_window.on_lap({
            let window = main_window.as_weak();
            let state = stopwatch.clone();

            move || {
                let now = Instant::now();
                let mut stopwatch = state.borrow_mut();

                stopwatch.record_lap(now);
                tracing::debug!(laps = stopwatch.laps().len(), "recorded a lap");

                if let Some(window) = window.upgrade() {
                    sync(&window, &stopwatch, now);
                }
            }
        });

        sync(&main_window, &stopwatch.borrow(), Instant::now());

        Ok(Self {
            main_window,
            ticker,
        })
    }

    pub fn run(&self) -> anyhow::Result<()> {
        self.main_window.run()?;
        Ok(())
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        // No tick may outlive the window; stopping twice is a no-op.
        self.ticker.stop();
    }
}

fn sync(window: &MainWindow, stopwatch: &Stopwatch, now: Instant) {
    let laps: Vec<SharedString> = stopwatch
        .laps()
        .iter()
        .enumerate()
        .map(|(index, lap)| slint::format!("Lap {}: {}", index + 1, format_elapsed(*lap)))
        .collect();

    window.set_running(stopwatch.is_running());
    window.set_laps(ModelRc::new(VecModel::from(laps)));
    window.set_best(match stopwatch.best() {
        Some(best) => SharedString::from(format_elapsed(best)),
        None => SharedString::default(),
    });

    sync_elapsed(window, stopwatch, now);
}

fn sync_elapsed(window: &MainWindow, stopwatch: &Stopwatch, now: Instant) {
    let elapsed = stopwatch.elapsed(now);

    window.set_elapsed(SharedString::from(format_elapsed(elapsed)));
    window.set_resettable(!elapsed.is_zero());
}
