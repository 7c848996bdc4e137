//! Background synthesis worker.
//!
//! Runs generation on a dedicated thread so the caller never blocks on
//! synthesis, and communicates through asynchronous messages. Every
//! message carries its job id; the receiving side drops anything tagged
//! with a stale id, which is what makes superseding a running job safe.
//!
//! One worker runs at most one job at a time. Cancellation is cooperative:
//! a shared atomic flag polled once per synthesized column, so latency is
//! bounded by one column's worth of work rather than one sample's.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::{mpsc, Arc};
use std::thread::JoinHandle;

use serde::{Deserialize, Serialize};
use sonopix_spec::{ConversionParams, GrayscaleImage};

use crate::engine::EngineTuning;
use crate::generate::generate;
use crate::wav::WavResult;

/// Lifecycle states of a synthesis job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Accepted but not yet started.
    Queued,
    /// Currently synthesizing.
    Running,
    /// Finished; the result was delivered.
    Completed,
    /// Cancelled cooperatively; no result was delivered.
    Cancelled,
    /// Failed; an error was delivered instead of a result.
    Failed,
}

/// Requests sent to the worker thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// Start a generation job.
    Generate {
        /// Id assigned by the submitting side.
        job_id: u64,
        /// Input image, read-only for the duration of the job.
        image: GrayscaleImage,
        /// Sanitized conversion parameters.
        params: ConversionParams,
    },
    /// Request cooperative cancellation of a queued job.
    Cancel {
        /// Id of the job to cancel.
        job_id: u64,
    },
    /// Stop the worker thread.
    Shutdown,
}

/// Responses emitted by the worker thread, all tagged with their job id.
///
/// For any id, `Result` or `Error` is the final message; progress values
/// are monotonically non-decreasing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// Progress update in [0,100].
    Progress {
        /// Job the update belongs to.
        job_id: u64,
        /// Completion percentage.
        percent: f32,
    },
    /// Successful completion; carries the encoded WAV.
    Result {
        /// Job the result belongs to.
        job_id: u64,
        /// Encoded container.
        wav: WavResult,
    },
    /// Terminal failure (including cooperative cancellation).
    Error {
        /// Job the error belongs to.
        job_id: u64,
        /// Wire code: CANCELLED, GENERATION_FAILED, INVALID_INPUT, or UNKNOWN.
        code: String,
        /// Human-readable message.
        message: String,
    },
}

impl Response {
    fn job_id(&self) -> u64 {
        match self {
            Response::Progress { job_id, .. }
            | Response::Result { job_id, .. }
            | Response::Error { job_id, .. } => *job_id,
        }
    }
}

/// Terminal outcome of a job as seen by the submitting side.
#[derive(Debug)]
pub enum JobOutcome {
    /// The job finished and produced a WAV container.
    Completed(WavResult),
    /// The job was cancelled before finishing.
    Cancelled,
    /// The job failed with the given wire code and message.
    Failed {
        /// Wire code.
        code: String,
        /// Human-readable message.
        message: String,
    },
}

impl JobOutcome {
    /// The job status this outcome corresponds to.
    pub fn status(&self) -> JobStatus {
        match self {
            JobOutcome::Completed(_) => JobStatus::Completed,
            JobOutcome::Cancelled => JobStatus::Cancelled,
            JobOutcome::Failed { .. } => JobStatus::Failed,
        }
    }
}

/// State shared between the handle and the worker thread.
///
/// `current_job` doubles as the stale-suppression key: a job whose id no
/// longer matches it treats itself as cancelled at the next poll.
/// Cancellation is keyed by job id rather than a bare flag, so a cancel
/// issued before its job even starts is not lost and a cancel for a
/// finished job cannot bleed into the next one (ids never repeat).
#[derive(Debug, Default)]
struct Shared {
    /// Id of the job whose cancellation was requested; 0 means none.
    cancel_job: AtomicU64,
    current_job: AtomicU64,
}

impl Shared {
    fn superseded_or_cancelled(&self, job_id: u64) -> bool {
        self.cancel_job.load(Ordering::SeqCst) == job_id
            || self.current_job.load(Ordering::SeqCst) != job_id
    }

    fn request_cancel(&self, job_id: u64) {
        if self.current_job.load(Ordering::SeqCst) == job_id {
            self.cancel_job.store(job_id, Ordering::SeqCst);
        }
    }
}

/// Handle to a background synthesis worker thread.
///
/// Dropping the handle shuts the worker down and joins it.
#[derive(Debug)]
pub struct SynthWorker {
    requests: Sender<Request>,
    responses: Receiver<Response>,
    shared: Arc<Shared>,
    next_job: u64,
    thread: Option<JoinHandle<()>>,
}

impl SynthWorker {
    /// Spawns a worker with default engine tuning.
    pub fn spawn() -> Self {
        Self::spawn_with_tuning(EngineTuning::default())
    }

    /// Spawns a worker with explicit engine tuning.
    pub fn spawn_with_tuning(tuning: EngineTuning) -> Self {
        let (req_tx, req_rx) = mpsc::channel::<Request>();
        let (resp_tx, resp_rx) = mpsc::channel::<Response>();
        let shared = Arc::new(Shared::default());

        let thread_shared = Arc::clone(&shared);
        let thread = std::thread::spawn(move || {
            worker_loop(req_rx, resp_tx, thread_shared, tuning);
        });

        Self {
            requests: req_tx,
            responses: resp_rx,
            shared,
            next_job: 0,
            thread: Some(thread),
        }
    }

    /// Submits a generation job and returns its id.
    ///
    /// Params are sanitized here, so the worker never sees inconsistent
    /// values. If a job is still running it is superseded: its id stops
    /// being current (so its remaining messages are dropped) and it
    /// observes the change at its next cancellation poll.
    pub fn submit(&mut self, image: GrayscaleImage, params: &ConversionParams) -> u64 {
        self.next_job += 1;
        let job_id = self.next_job;
        self.shared.current_job.store(job_id, Ordering::SeqCst);

        let request = Request::Generate {
            job_id,
            image,
            params: params.sanitize(),
        };
        // A send failure means the worker thread is gone; wait() will
        // surface that as an UNKNOWN error.
        let _ = self.requests.send(request);
        job_id
    }

    /// Requests cooperative cancellation of `job_id`.
    ///
    /// No-op when the job is not the current one (it either finished or
    /// was already superseded).
    pub fn cancel(&self, job_id: u64) {
        self.shared.request_cancel(job_id);
    }

    /// Blocks until `job_id` reaches a terminal state, dropping messages
    /// that belong to other (stale) jobs.
    pub fn wait(&self, job_id: u64) -> JobOutcome {
        self.wait_with_progress(job_id, |_| {})
    }

    /// Like [`SynthWorker::wait`], forwarding progress updates for
    /// `job_id` to `on_progress`.
    pub fn wait_with_progress<F>(&self, job_id: u64, mut on_progress: F) -> JobOutcome
    where
        F: FnMut(f32),
    {
        loop {
            let response = match self.responses.recv() {
                Ok(response) => response,
                Err(_) => {
                    return JobOutcome::Failed {
                        code: "UNKNOWN".to_string(),
                        message: "worker thread terminated unexpectedly".to_string(),
                    }
                }
            };
            // Stale-result suppression: only the awaited id gets through.
            if response.job_id() != job_id {
                continue;
            }
            match response {
                Response::Progress { percent, .. } => on_progress(percent),
                Response::Result { wav, .. } => return JobOutcome::Completed(wav),
                Response::Error { code, message, .. } => {
                    if code == "CANCELLED" {
                        return JobOutcome::Cancelled;
                    }
                    return JobOutcome::Failed { code, message };
                }
            }
        }
    }
}

impl Drop for SynthWorker {
    fn drop(&mut self) {
        let _ = self.requests.send(Request::Shutdown);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn worker_loop(
    requests: Receiver<Request>,
    responses: Sender<Response>,
    shared: Arc<Shared>,
    tuning: EngineTuning,
) {
    while let Ok(request) = requests.recv() {
        match request {
            Request::Generate {
                job_id,
                image,
                params,
            } => {
                if shared.current_job.load(Ordering::SeqCst) != job_id {
                    // Superseded while still queued; never started.
                    let _ = responses.send(Response::Error {
                        job_id,
                        code: "CANCELLED".to_string(),
                        message: "job superseded before it started".to_string(),
                    });
                    continue;
                }

                let progress_tx = responses.clone();
                let result = generate(
                    &image,
                    &params,
                    &tuning,
                    |percent| {
                        let _ = progress_tx.send(Response::Progress { job_id, percent });
                    },
                    || shared.superseded_or_cancelled(job_id),
                );

                let response = match result {
                    Ok(generated) => Response::Result {
                        job_id,
                        wav: generated.wav,
                    },
                    Err(err) => Response::Error {
                        job_id,
                        code: err.code().to_string(),
                        message: err.to_string(),
                    },
                };
                let _ = responses.send(response);
            }
            Request::Cancel { job_id } => shared.request_cancel(job_id),
            Request::Shutdown => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonopix_spec::{BrightnessCurve, FrequencyScale};

    fn quick_params() -> ConversionParams {
        ConversionParams {
            duration_seconds: 1.0,
            min_frequency_hz: 100.0,
            max_frequency_hz: 1000.0,
            frequency_scale: FrequencyScale::Linear,
            sample_rate_hz: 22050,
            brightness_curve: BrightnessCurve::Linear,
            invert_image: false,
            smoothing: 0.0,
        }
    }

    fn small_image() -> GrayscaleImage {
        GrayscaleImage::new(8, 8, vec![0.5; 64]).unwrap()
    }

    fn slow_image() -> GrayscaleImage {
        // Enough columns and rows that a job spans many cancel polls.
        GrayscaleImage::new(400, 200, vec![0.5; 80_000]).unwrap()
    }

    #[test]
    fn test_job_completes_and_delivers_result() {
        let mut worker = SynthWorker::spawn();
        let job = worker.submit(small_image(), &quick_params());
        match worker.wait(job) {
            JobOutcome::Completed(wav) => {
                assert_eq!(wav.sample_rate, 22050);
                assert_eq!(wav.num_samples, 22050);
            }
            other => panic!("expected completion, got {other:?}"),
        }
    }

    #[test]
    fn test_job_ids_are_unique_and_increasing() {
        let mut worker = SynthWorker::spawn();
        let a = worker.submit(small_image(), &quick_params());
        let b = worker.submit(small_image(), &quick_params());
        assert!(b > a);
    }

    #[test]
    fn test_progress_is_monotonic() {
        let mut worker = SynthWorker::spawn();
        let job = worker.submit(small_image(), &quick_params());
        let mut reports: Vec<f32> = Vec::new();
        let outcome = worker.wait_with_progress(job, |p| reports.push(p));
        assert_eq!(outcome.status(), JobStatus::Completed);
        assert!(reports.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_cancellation_suppresses_result() {
        let mut worker = SynthWorker::spawn();
        let params = ConversionParams {
            duration_seconds: 30.0,
            ..quick_params()
        };
        let job = worker.submit(slow_image(), &params);
        worker.cancel(job);
        assert_eq!(worker.wait(job).status(), JobStatus::Cancelled);
    }

    #[test]
    fn test_invalid_input_fails_job() {
        let mut worker = SynthWorker::spawn();
        let bad = GrayscaleImage {
            width: 4,
            height: 4,
            pixels: vec![0.0; 3],
        };
        let job = worker.submit(bad, &quick_params());
        match worker.wait(job) {
            JobOutcome::Failed { code, .. } => assert_eq!(code, "INVALID_INPUT"),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_superseding_job_never_leaks_messages() {
        let mut worker = SynthWorker::spawn();
        let params = ConversionParams {
            duration_seconds: 30.0,
            ..quick_params()
        };
        let stale = worker.submit(slow_image(), &params);
        let current = worker.submit(small_image(), &quick_params());
        assert_ne!(stale, current);

        // Waiting on the new job must only ever observe its own messages;
        // the superseded job's error and progress are filtered out.
        match worker.wait(current) {
            JobOutcome::Completed(wav) => assert_eq!(wav.sample_rate, 22050),
            other => panic!("expected completion of superseding job, got {other:?}"),
        }
    }

    #[test]
    fn test_failure_does_not_poison_next_job() {
        let mut worker = SynthWorker::spawn();
        let bad = GrayscaleImage {
            width: 2,
            height: 2,
            pixels: vec![0.0; 5],
        };
        let failed = worker.submit(bad, &quick_params());
        assert_eq!(worker.wait(failed).status(), JobStatus::Failed);

        let job = worker.submit(small_image(), &quick_params());
        assert_eq!(worker.wait(job).status(), JobStatus::Completed);
    }

    #[test]
    fn test_cancel_of_stale_id_is_ignored() {
        let mut worker = SynthWorker::spawn();
        let old = worker.submit(small_image(), &quick_params());
        assert_eq!(worker.wait(old).status(), JobStatus::Completed);

        let job = worker.submit(small_image(), &quick_params());
        worker.cancel(old); // must not cancel the current job
        assert_eq!(worker.wait(job).status(), JobStatus::Completed);
    }

    #[test]
    fn test_request_protocol_serializes() {
        let request = Request::Cancel { job_id: 7 };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"cancel\""));
        let back: Request = serde_json::from_str(&json).unwrap();
        assert!(matches!(back, Request::Cancel { job_id: 7 }));
    }
}
