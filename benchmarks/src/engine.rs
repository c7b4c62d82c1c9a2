//! Simulation Engine - tick-by-tick execution
//!
//! Drives a [`SchedulerFramework`] over a [`Workload`]. Each tick:
//!
//! 1. Build the snapshot of arrived, unfinished jobs in arrival order
//! 2. Ask the framework for a decision (only if the snapshot is non-empty)
//! 3. Charge one tick of execution to the selected job
//! 4. Retire jobs that reached their total time
//!
//! The running pid reported to the policy is the job that ran last tick,
//! unless it finished or went off to I/O.

use crate::results::{JobOutcome, RunReport};
use crate::workload::{JobSpec, Workload, WorkloadError};
use alloc::vec::Vec;
use simsched_execution::scheduler::SchedulerFramework;
use simsched_execution::{Pid, ProcessDescriptor, Tick};

/// Execution state of one job
#[derive(Debug)]
struct JobState<'w> {
    spec: &'w JobSpec,
    executed: Tick,
    /// Offset of the last I/O burst already served
    io_served: Option<Tick>,
}

impl JobState<'_> {
    fn is_arrived(&self, now: Tick) -> bool {
        self.spec.arrival <= now
    }

    fn is_finished(&self) -> bool {
        self.executed >= self.spec.total_time
    }

    fn is_active(&self, now: Tick) -> bool {
        self.is_arrived(now) && !self.is_finished()
    }

    fn on_io(&self) -> bool {
        self.spec.io_ticks.contains(&self.executed) && self.io_served != Some(self.executed)
    }

    fn descriptor(&self) -> ProcessDescriptor {
        ProcessDescriptor::new(self.spec.pid)
            .on_io(self.on_io())
            .executed(self.executed)
    }
}

/// A simulation in progress
#[derive(Debug)]
pub struct Simulation<'w> {
    workload: &'w Workload,
    /// Jobs in arrival order, ties in workload order
    jobs: Vec<JobState<'w>>,
    now: Tick,
    current: Option<Pid>,
    report: RunReport,
}

impl<'w> Simulation<'w> {
    /// Prepare a run of `workload` for the framework's policy
    pub fn new(workload: &'w Workload, framework: &SchedulerFramework) -> Result<Self, WorkloadError> {
        workload.validate()?;

        let mut jobs: Vec<JobState<'w>> = workload
            .jobs()
            .iter()
            .map(|spec| JobState { spec, executed: 0, io_served: None })
            .collect();
        jobs.sort_by_key(|job| job.spec.arrival);

        let mut report = RunReport::new(framework.policy_name());
        for job in &jobs {
            report.jobs.insert(job.spec.pid, JobOutcome::pending(job.spec.arrival));
        }

        Ok(Self {
            workload,
            jobs,
            now: 0,
            current: None,
            report,
        })
    }

    /// Run a workload to completion or until `max_ticks` have elapsed
    ///
    /// The framework is reset first, so its counters cover this run only.
    pub fn run(
        framework: &mut SchedulerFramework,
        workload: &'w Workload,
        max_ticks: Tick,
    ) -> Result<RunReport, WorkloadError> {
        framework.reset();
        let mut sim = Self::new(workload, framework)?;

        while !sim.is_finished() && sim.now < max_ticks {
            sim.step(framework);
        }

        if !sim.is_finished() {
            log::warn!("[sim] {} stopped at tick limit {} with work left", framework.policy_name(), max_ticks);
        }
        Ok(sim.into_report(framework))
    }

    /// Current tick
    pub fn now(&self) -> Tick {
        self.now
    }

    /// Process reported as running to the next decision
    pub fn current(&self) -> Option<Pid> {
        self.current
    }

    /// Check if every job has finished
    pub fn is_finished(&self) -> bool {
        self.jobs.iter().all(JobState::is_finished)
    }

    /// Active processes this tick, in arrival order
    pub fn snapshot(&self) -> Vec<ProcessDescriptor> {
        self.jobs
            .iter()
            .filter(|job| job.is_active(self.now))
            .map(JobState::descriptor)
            .collect()
    }

    /// Simulate one tick and return the process that ran
    pub fn step(&mut self, framework: &mut SchedulerFramework) -> Option<Pid> {
        let now = self.now;
        let snapshot = self.snapshot();

        let selected = if snapshot.is_empty() {
            None
        } else {
            framework.decide(&snapshot, now, self.current, self.workload)
        };

        let ran = selected.and_then(|pid| self.accept(&snapshot, pid));
        match ran {
            Some(pid) => self.charge(pid),
            None => {
                self.report.idle_ticks += 1;
                self.current = None;
            }
        }

        // A blocked job spends exactly this tick on I/O
        for process in snapshot.iter().filter(|p| p.on_io) {
            if let Some(job) = self.jobs.iter_mut().find(|job| job.spec.pid == process.pid) {
                job.io_served = Some(process.executed_time);
            }
        }

        self.now += 1;
        ran
    }

    /// Check that a selection names a runnable process
    fn accept(&mut self, snapshot: &[ProcessDescriptor], pid: Pid) -> Option<Pid> {
        match snapshot.iter().find(|p| p.pid == pid) {
            Some(process) if process.is_idle() => Some(pid),
            Some(_) => {
                log::warn!("[sim] t={} policy selected pid {} during its I/O", self.now, pid);
                self.report.rejected_selections += 1;
                None
            }
            None => {
                log::warn!("[sim] t={} policy selected inactive pid {}", self.now, pid);
                self.report.rejected_selections += 1;
                None
            }
        }
    }

    fn charge(&mut self, pid: Pid) {
        let now = self.now;
        let Some(job) = self.jobs.iter_mut().find(|job| job.spec.pid == pid) else {
            return;
        };
        job.executed += 1;

        let finished = job.is_finished();
        let blocks_next = !finished && job.on_io();
        if let Some(outcome) = self.report.jobs.get_mut(&pid) {
            outcome.first_run.get_or_insert(now);
            if finished {
                outcome.completion = Some(now + 1);
                log::debug!("[sim] t={} pid {} finished", now, pid);
            }
        }

        self.current = if finished || blocks_next { None } else { Some(pid) };
    }

    /// Finish the run and collect the framework's counters
    pub fn into_report(mut self, framework: &SchedulerFramework) -> RunReport {
        let metrics = framework.metrics();
        self.report.total_ticks = self.now;
        self.report.context_switches = metrics.context_switches();
        self.report.preemptions = metrics.preemptions();
        self.report
    }
}
