use std::collections::HashMap;
use std::fmt::Write as _;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct StageTiming {
    pub name: String,
    pub duration: Duration,
}

/// Wall time per pipeline stage, in execution order.
#[derive(Debug, Default)]
pub struct PipelineTimings {
    stages: Vec<StageTiming>,
    totals: HashMap<String, Duration>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_stage(&mut self, name: impl Into<String>, duration: Duration) {
        let name = name.into();
        *self.totals.entry(name.clone()).or_insert(Duration::ZERO) += duration;
        self.stages.push(StageTiming { name, duration });
    }

    pub fn total_duration(&self) -> Duration {
        self.stages.iter().map(|s| s.duration).sum()
    }

    /// Summed duration of every run of the named stage.
    pub fn get_stage(&self, name: &str) -> Option<Duration> {
        self.totals.get(name).copied()
    }

    pub fn stages(&self) -> &[StageTiming] {
        &self.stages
    }

    /// Table of stage durations with their share of the total.
    pub fn summary(&self) -> String {
        let total = self.total_duration().as_secs_f64();
        let mut out = String::new();
        let _ = writeln!(out, "{:-<60}", "");
        for stage in &self.stages {
            let seconds = stage.duration.as_secs_f64();
            let percentage = if total > 0.0 { seconds / total * 100.0 } else { 0.0 };
            let _ = writeln!(out, "{:<30} {:>12.3}ms ({:>5.1}%)", stage.name, seconds * 1000.0, percentage);
        }
        let _ = writeln!(out, "{:-<60}", "");
        let _ = write!(out, "{:<30} {:>12.3}ms", "Total", total * 1000.0);
        out
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            name: name.into(),
        }
    }

    pub fn stop(self) -> (String, Duration) {
        (self.name, self.start.elapsed())
    }

    /// Stops the timer and appends it to `timings`.
    pub fn record(self, timings: &mut PipelineTimings) {
        let (name, duration) = self.stop();
        timings.add_stage(name, duration);
    }
}
