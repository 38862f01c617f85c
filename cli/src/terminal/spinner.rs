use std::io::Write;
use std::sync::Mutex;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

const TIP_DURATION: Duration = Duration::from_secs(3);
const TIPS: &[&str] = &[
    "ZMap needs root (or CAP_NET_RAW) to send raw packets",
    "Use --dry-run to print probes instead of sending them",
    "Lower --rate if your upstream drops probes",
];

/// The spinner log lines must be printed above, if one is running.
static ACTIVE: Mutex<Option<ProgressBar>> = Mutex::new(None);

pub struct SpinnerHandle {
    spinner: ProgressBar,
    // Dropping the sender stops the tip thread.
    _tx: Option<Sender<()>>,
}

impl SpinnerHandle {
    pub fn finish(self) {
        self.spinner.finish_and_clear();
        if let Ok(mut active) = ACTIVE.lock() {
            *active = None;
        }
    }
}

/// Starts a spinner showing `message`, alternating with tips. Hidden when quiet.
pub fn start(q_level: u8, message: &str) -> SpinnerHandle {
    if q_level > 0 {
        return SpinnerHandle {
            spinner: ProgressBar::hidden(),
            _tx: None,
        };
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ]));
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    if let Ok(mut active) = ACTIVE.lock() {
        *active = Some(pb.clone());
    }

    let (tx, rx) = mpsc::channel::<()>();
    let pb_clone = pb.clone();
    let message = message.to_string();

    thread::spawn(move || {
        let mut tip_index = 0;
        loop {
            match rx.recv_timeout(TIP_DURATION) {
                Err(RecvTimeoutError::Timeout) if !pb_clone.is_finished() => {
                    // Every other slot shows the scan message again.
                    if tip_index % 2 == 0 {
                        let tip = TIPS[(tip_index / 2) % TIPS.len()];
                        pb_clone.set_message(format!("{}", tip.italic().white()));
                    } else {
                        pb_clone.set_message(message.clone());
                    }
                    tip_index += 1;
                }
                _ => break,
            }
        }
    });

    SpinnerHandle {
        spinner: pb,
        _tx: Some(tx),
    }
}

/// Log writer that keeps output from tearing through a running spinner.
pub struct SpinnerWriter;

impl Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let active = ACTIVE.lock().ok().and_then(|guard| guard.clone());
        match active {
            Some(pb) => {
                let msg = String::from_utf8_lossy(buf);
                pb.println(msg.trim_end());
                Ok(buf.len())
            }
            None => std::io::stdout().write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        std::io::stdout().flush()
    }
}
