//! Terminal progress indicator.
//!
//! Cosmetic only: logs go to the configured subscriber, the spinner goes to
//! stdout so an operator watching the terminal sees the run is alive. It is
//! cancelled unconditionally when the pipeline finishes, success or not.

use std::io::Write;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Spinner frames.
const FRAMES: [char; 4] = ['|', '/', '-', '\\'];

/// Spinner speed.
const TICK: Duration = Duration::from_millis(100);

/// Spawn the spinner task. Cancel the token to stop it.
pub fn spawn_ticker(cancel: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(TICK);
        let mut frame = 0usize;

        loop {
            tokio::select! {
                () = cancel.cancelled() => {
                    println!("\rProcessing complete!          ");
                    break;
                }
                _ = interval.tick() => {
                    print!("\rProcessing... {}", FRAMES[frame % FRAMES.len()]);
                    let _ = std::io::stdout().flush();
                    frame += 1;
                }
            }
        }
    })
}
