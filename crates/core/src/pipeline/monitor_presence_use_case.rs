use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::presence::domain::debouncer::{OutputCommand, PresenceDebouncer};
use crate::presence::domain::output_sink::OutputSink;
use crate::presence::domain::presence_source::PresenceSource;

/// Counters reported when the monitoring loop ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MonitorReport {
    pub frames: usize,
    pub commands: usize,
}

/// Synchronous control loop: sample → debounce → drive the output.
///
/// Owns the engine and both collaborators; runs single-threaded with the
/// current time passed explicitly into every engine update. The loop ends
/// on end of stream, on the external stop flag, or on the first
/// collaborator error (which leaves the engine's last committed state
/// intact). A loop that ends with the output asserted drives one final
/// `Deactivate` through the sink before returning.
pub struct MonitorPresenceUseCase {
    source: Box<dyn PresenceSource>,
    sink: Box<dyn OutputSink>,
    engine: PresenceDebouncer,
    clock: Box<dyn Fn() -> Instant + Send>,
    stop: Arc<AtomicBool>,
    last_command: Option<OutputCommand>,
}

impl MonitorPresenceUseCase {
    pub fn new(
        source: Box<dyn PresenceSource>,
        sink: Box<dyn OutputSink>,
        engine: PresenceDebouncer,
        stop: Arc<AtomicBool>,
    ) -> Self {
        Self::with_clock(source, sink, engine, stop, Box::new(Instant::now))
    }

    /// Injectable clock so tests can simulate arbitrary time sequences.
    pub fn with_clock(
        source: Box<dyn PresenceSource>,
        sink: Box<dyn OutputSink>,
        engine: PresenceDebouncer,
        stop: Arc<AtomicBool>,
        clock: Box<dyn Fn() -> Instant + Send>,
    ) -> Self {
        Self {
            source,
            sink,
            engine,
            clock,
            stop,
            last_command: None,
        }
    }

    pub fn execute(&mut self) -> Result<MonitorReport, Box<dyn std::error::Error>> {
        let mut report = MonitorReport::default();

        while !self.stop.load(Ordering::Relaxed) {
            let Some(detected) = self.source.next_sample()? else {
                break;
            };
            report.frames += 1;

            let now = (self.clock)();
            if let Some(command) = self.engine.update(detected, now) {
                self.sink.apply(command)?;
                report.commands += 1;
                if self.last_command != Some(command) {
                    log::info!("presence {:?} after {} frame(s)", command, report.frames);
                    self.last_command = Some(command);
                }
            }
        }

        // Shutdown path: the indicator must not stay asserted after the
        // loop ends (stop flag or end of stream).
        if self.last_command == Some(OutputCommand::Activate) {
            self.sink.apply(OutputCommand::Deactivate)?;
            self.last_command = Some(OutputCommand::Deactivate);
            log::info!("presence Deactivate at shutdown");
        }

        Ok(report)
    }

    pub fn engine(&self) -> &PresenceDebouncer {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    // --- Stubs ---

    struct ScriptedSource {
        samples: Vec<bool>,
        next: usize,
    }

    impl ScriptedSource {
        fn new(samples: Vec<bool>) -> Self {
            Self { samples, next: 0 }
        }
    }

    impl PresenceSource for ScriptedSource {
        fn next_sample(&mut self) -> Result<Option<bool>, Box<dyn std::error::Error>> {
            let sample = self.samples.get(self.next).copied();
            self.next += 1;
            Ok(sample)
        }
    }

    struct FailingSource {
        before_failure: usize,
    }

    impl PresenceSource for FailingSource {
        fn next_sample(&mut self) -> Result<Option<bool>, Box<dyn std::error::Error>> {
            if self.before_failure == 0 {
                return Err("camera unplugged".into());
            }
            self.before_failure -= 1;
            Ok(Some(true))
        }
    }

    struct RecordingSink {
        commands: Arc<Mutex<Vec<OutputCommand>>>,
    }

    impl RecordingSink {
        fn new() -> (Self, Arc<Mutex<Vec<OutputCommand>>>) {
            let commands = Arc::new(Mutex::new(Vec::new()));
            (
                Self {
                    commands: commands.clone(),
                },
                commands,
            )
        }
    }

    impl OutputSink for RecordingSink {
        fn apply(&mut self, command: OutputCommand) -> Result<(), Box<dyn std::error::Error>> {
            self.commands.lock().unwrap().push(command);
            Ok(())
        }
    }

    // --- Helpers ---

    /// Clock that advances one second per call.
    fn stepping_clock() -> Box<dyn Fn() -> Instant + Send> {
        let base = Instant::now();
        let calls = Arc::new(Mutex::new(0u32));
        Box::new(move || {
            let mut calls = calls.lock().unwrap();
            let now = base + Duration::from_secs(u64::from(*calls));
            *calls += 1;
            now
        })
    }

    fn engine(threshold: u32, dwell_secs: u64) -> PresenceDebouncer {
        PresenceDebouncer::new(threshold, Duration::from_secs(dwell_secs)).unwrap()
    }

    // --- Tests ---

    #[test]
    fn test_activation_and_deactivation_reach_sink() {
        // threshold 2, dwell 2s, one sample per simulated second:
        // engagement on the 3rd positive, activation once dwell elapses,
        // one deactivation after 3 trailing negatives.
        let samples = vec![
            true, true, true, true, true, true, true, false, false, false,
        ];
        let (sink, commands) = RecordingSink::new();
        let mut use_case = MonitorPresenceUseCase::with_clock(
            Box::new(ScriptedSource::new(samples)),
            Box::new(sink),
            engine(2, 2),
            Arc::new(AtomicBool::new(false)),
            stepping_clock(),
        );

        let report = use_case.execute().unwrap();

        // Engaged at t=2; dwell crossed for frames at t=5 and t=6.
        let commands = commands.lock().unwrap();
        assert_eq!(
            *commands,
            vec![
                OutputCommand::Activate,
                OutputCommand::Activate,
                OutputCommand::Deactivate,
            ]
        );
        assert_eq!(report.frames, 10);
        assert_eq!(report.commands, 3);
    }

    #[test]
    fn test_end_of_stream_terminates_cleanly() {
        let (sink, commands) = RecordingSink::new();
        let mut use_case = MonitorPresenceUseCase::with_clock(
            Box::new(ScriptedSource::new(vec![true, false])),
            Box::new(sink),
            engine(5, 5),
            Arc::new(AtomicBool::new(false)),
            stepping_clock(),
        );

        let report = use_case.execute().unwrap();
        assert_eq!(
            report,
            MonitorReport {
                frames: 2,
                commands: 0
            }
        );
        assert!(commands.lock().unwrap().is_empty());
    }

    #[test]
    fn test_stop_flag_halts_before_sampling() {
        let (sink, _commands) = RecordingSink::new();
        let mut use_case = MonitorPresenceUseCase::with_clock(
            Box::new(ScriptedSource::new(vec![true; 100])),
            Box::new(sink),
            engine(1, 1),
            Arc::new(AtomicBool::new(true)),
            stepping_clock(),
        );

        let report = use_case.execute().unwrap();
        assert_eq!(report.frames, 0);
    }

    #[test]
    fn test_shutdown_deactivates_after_activation() {
        // Stream ends while the output is asserted: the sink must see a
        // final OFF level before the loop returns.
        let (sink, commands) = RecordingSink::new();
        let mut use_case = MonitorPresenceUseCase::with_clock(
            Box::new(ScriptedSource::new(vec![true; 5])),
            Box::new(sink),
            engine(1, 1),
            Arc::new(AtomicBool::new(false)),
            stepping_clock(),
        );

        let report = use_case.execute().unwrap();

        let commands = commands.lock().unwrap();
        assert_eq!(
            *commands,
            vec![
                OutputCommand::Activate,
                OutputCommand::Activate,
                OutputCommand::Deactivate,
            ]
        );
        // The shutdown write is cleanup, not a loop command.
        assert_eq!(report.commands, 2);
    }

    #[test]
    fn test_stop_after_activation_turns_output_off() {
        // Sink that raises the stop flag once the output goes high, the
        // way an interrupt arrives mid-activation.
        struct StopOnActivate {
            commands: Arc<Mutex<Vec<OutputCommand>>>,
            stop: Arc<AtomicBool>,
        }

        impl OutputSink for StopOnActivate {
            fn apply(&mut self, command: OutputCommand) -> Result<(), Box<dyn std::error::Error>> {
                self.commands.lock().unwrap().push(command);
                if command == OutputCommand::Activate {
                    self.stop.store(true, Ordering::Relaxed);
                }
                Ok(())
            }
        }

        let stop = Arc::new(AtomicBool::new(false));
        let commands = Arc::new(Mutex::new(Vec::new()));
        let mut use_case = MonitorPresenceUseCase::with_clock(
            Box::new(ScriptedSource::new(vec![true; 100])),
            Box::new(StopOnActivate {
                commands: commands.clone(),
                stop: stop.clone(),
            }),
            engine(1, 1),
            stop,
            stepping_clock(),
        );

        use_case.execute().unwrap();

        let commands = commands.lock().unwrap();
        assert_eq!(
            *commands,
            vec![OutputCommand::Activate, OutputCommand::Deactivate]
        );
    }

    #[test]
    fn test_no_shutdown_write_when_never_activated() {
        let (sink, commands) = RecordingSink::new();
        let mut use_case = MonitorPresenceUseCase::with_clock(
            Box::new(ScriptedSource::new(vec![true, true, true])),
            Box::new(sink),
            engine(5, 5),
            Arc::new(AtomicBool::new(false)),
            stepping_clock(),
        );

        use_case.execute().unwrap();
        assert!(commands.lock().unwrap().is_empty());
    }

    #[test]
    fn test_source_error_propagates_and_keeps_state() {
        let (sink, _commands) = RecordingSink::new();
        let mut use_case = MonitorPresenceUseCase::with_clock(
            Box::new(FailingSource { before_failure: 3 }),
            Box::new(sink),
            engine(2, 60),
            Arc::new(AtomicBool::new(false)),
            stepping_clock(),
        );

        let err = use_case.execute().unwrap_err();
        assert!(err.to_string().contains("camera unplugged"));
        // Three positives were committed before the failure.
        assert!(use_case.engine().is_engaged());
    }

    #[test]
    fn test_sink_error_propagates() {
        struct FailingSink;
        impl OutputSink for FailingSink {
            fn apply(&mut self, _: OutputCommand) -> Result<(), Box<dyn std::error::Error>> {
                Err("gpio fault".into())
            }
        }

        let mut use_case = MonitorPresenceUseCase::with_clock(
            Box::new(ScriptedSource::new(vec![true; 20])),
            Box::new(FailingSink),
            engine(1, 1),
            Arc::new(AtomicBool::new(false)),
            stepping_clock(),
        );

        assert!(use_case.execute().is_err());
    }
}
