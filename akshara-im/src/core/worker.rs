//! Off-thread engine execution for one session
//!
//! Jobs carry a sequence number; the owning thread waits for the matching
//! result before submitting the next event, so at most one translation is
//! in flight and results are applied in arrival order.

use std::sync::Arc;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use super::engine::{CompositionEngine, EngineEvent, EngineOutcome};
use super::state::InputState;

struct Job {
    seq: u64,
    state: InputState,
    event: EngineEvent,
}

struct Done {
    seq: u64,
    outcome: EngineOutcome,
}

/// Runs engine operations for one session on a dedicated thread.
pub struct SessionWorker {
    job_tx: Option<mpsc::Sender<Job>>,
    done_rx: mpsc::Receiver<Done>,
    next_seq: u64,
    handle: Option<JoinHandle<()>>,
}

impl SessionWorker {
    /// Spawn a worker computing with `engine`.
    pub fn spawn(engine: Arc<CompositionEngine>) -> std::io::Result<Self> {
        Self::spawn_with(move |state, event| engine.dispatch(state, event))
    }

    fn spawn_with<F>(handler: F) -> std::io::Result<Self>
    where
        F: Fn(&InputState, &EngineEvent) -> EngineOutcome + Send + 'static,
    {
        let (job_tx, job_rx) = mpsc::channel::<Job>();
        let (done_tx, done_rx) = mpsc::channel::<Done>();
        let handle = thread::Builder::new()
            .name("akshara-session".into())
            .spawn(move || {
                while let Ok(job) = job_rx.recv() {
                    let outcome = handler(&job.state, &job.event);
                    if done_tx
                        .send(Done {
                            seq: job.seq,
                            outcome,
                        })
                        .is_err()
                    {
                        break;
                    }
                }
                debug!("session worker exiting");
            })?;

        Ok(Self {
            job_tx: Some(job_tx),
            done_rx,
            next_seq: 0,
            handle: Some(handle),
        })
    }

    /// Compute `event` against `state` and wait for the result.
    ///
    /// Returns `None` when the worker is gone or answers out of sequence;
    /// the caller keeps its state unchanged.
    pub fn process(&mut self, state: &InputState, event: EngineEvent) -> Option<EngineOutcome> {
        let seq = self.next_seq;
        self.next_seq += 1;

        let job = Job {
            seq,
            state: state.clone(),
            event,
        };
        let Some(tx) = self.job_tx.as_ref() else {
            warn!("session worker already shut down, dropping job {}", seq);
            return None;
        };
        if tx.send(job).is_err() {
            warn!("session worker is gone, dropping job {}", seq);
            return None;
        }

        loop {
            match self.done_rx.recv() {
                Ok(done) if done.seq == seq => return Some(done.outcome),
                Ok(done) if done.seq < seq => {
                    debug!("discarding stale result {} (waiting for {})", done.seq, seq);
                }
                Ok(done) => {
                    warn!("result {} arrived while waiting for {}", done.seq, seq);
                    return None;
                }
                Err(_) => {
                    warn!("session worker stopped before answering job {}", seq);
                    return None;
                }
            }
        }
    }
}

impl Drop for SessionWorker {
    fn drop(&mut self) {
        // Closing the job channel ends the worker loop
        self.job_tx.take();
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            warn!("session worker panicked");
        }
    }
}
