// bitshrink-core/tests/common/mod.rs
//
// Shared fixtures and fake ffprobe/ffmpeg adapters for integration tests.
// The fakes are thread-safe so they can be driven by the batch coordinator.

#![allow(dead_code)]

use bitshrink_core::external::EncodeParams;
use bitshrink_core::{CoreConfig, CoreError, CoreResult, FfmpegSpawner, FfprobeExecutor, MediaMetrics, RunContext};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tempfile::{TempDir, tempdir};

/// A prepared run context over temporary input/output/log directories.
pub struct Fixture {
    _root: TempDir,
    pub ctx: RunContext,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

pub fn fixture() -> Fixture {
    fixture_with_jobs(3)
}

pub fn fixture_with_jobs(jobs: usize) -> Fixture {
    let root = tempdir().expect("create temp root");
    let input_dir = root.path().join("input");
    let output_dir = root.path().join("output");
    fs::create_dir_all(&input_dir).expect("create input dir");

    let config = CoreConfig {
        input_dir: input_dir.clone(),
        output_dir: output_dir.clone(),
        log_dir: root.path().join("log"),
        max_concurrent_encodes: jobs,
        ..Default::default()
    };
    let ctx = RunContext::new(config).expect("valid config");
    ctx.prepare().expect("prepare directories");

    Fixture {
        _root: root,
        ctx,
        input_dir,
        output_dir,
    }
}

/// Creates a dummy file at `relative` under `dir`, creating parents.
pub fn create_dummy_file(dir: &Path, relative: &str) -> PathBuf {
    let path = dir.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(&path, b"dummy content").expect("write dummy file");
    path
}

pub const HD_METRICS: MediaMetrics = MediaMetrics {
    bitrate: 10_000_000,
    width: 1920,
    height: 1080,
};

// ============================================================================
// FAKE FFPROBE
// ============================================================================

#[derive(Clone)]
pub struct FakeFfprobe {
    default: MediaMetrics,
    per_file: HashMap<PathBuf, MediaMetrics>,
    failing: HashSet<PathBuf>,
    calls: Arc<AtomicUsize>,
}

impl FakeFfprobe {
    pub fn new(default: MediaMetrics) -> Self {
        Self {
            default,
            per_file: HashMap::new(),
            failing: HashSet::new(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_metrics(mut self, path: &Path, metrics: MediaMetrics) -> Self {
        self.per_file.insert(path.to_path_buf(), metrics);
        self
    }

    pub fn with_failure(mut self, path: &Path) -> Self {
        self.failing.insert(path.to_path_buf());
        self
    }

    /// Number of probe queries issued.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn lookup(&self, input_path: &Path) -> CoreResult<MediaMetrics> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(input_path) {
            return Err(CoreError::Probe {
                path: input_path.to_path_buf(),
                message: "no video stream found".to_string(),
            });
        }
        Ok(*self.per_file.get(input_path).unwrap_or(&self.default))
    }
}

impl FfprobeExecutor for FakeFfprobe {
    fn probe_bitrate(&self, input_path: &Path) -> CoreResult<u64> {
        self.lookup(input_path).map(|m| m.bitrate)
    }

    fn probe_dimensions(&self, input_path: &Path) -> CoreResult<(u32, u32)> {
        self.lookup(input_path).map(|m| (m.width, m.height))
    }
}

// ============================================================================
// FAKE FFMPEG
// ============================================================================

#[derive(Default)]
struct FakeFfmpegState {
    calls: Mutex<Vec<EncodeParams>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

/// Records encode calls and writes a small output file for each one.
/// Failing inputs leave a partial output behind, like an interrupted encode.
#[derive(Clone, Default)]
pub struct FakeFfmpeg {
    state: Arc<FakeFfmpegState>,
    failing: HashSet<PathBuf>,
    delay: Duration,
}

pub const FAKE_ENCODER_ERROR: &str = "Error initializing output stream 0:0 -- Conversion failed!";

impl FakeFfmpeg {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failure(mut self, path: &Path) -> Self {
        self.failing.insert(path.to_path_buf());
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Vec<EncodeParams> {
        self.state.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.calls.lock().unwrap().len()
    }

    pub fn max_in_flight(&self) -> usize {
        self.state.max_in_flight.load(Ordering::SeqCst)
    }
}

impl FfmpegSpawner for FakeFfmpeg {
    fn encode(&self, params: &EncodeParams) -> CoreResult<()> {
        self.state.calls.lock().unwrap().push(params.clone());

        let now = self.state.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.max_in_flight.fetch_max(now, Ordering::SeqCst);
        thread::sleep(self.delay);

        let failing = self.failing.contains(&params.input_path);
        let contents: &[u8] = if failing { b"part" } else { b"encoded" };
        let written = fs::write(&params.output_path, contents);

        self.state.in_flight.fetch_sub(1, Ordering::SeqCst);
        written?;

        if failing {
            return Err(CoreError::Encode {
                path: params.input_path.clone(),
                message: FAKE_ENCODER_ERROR.to_string(),
            });
        }
        Ok(())
    }
}
