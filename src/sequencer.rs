use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::batches;
use crate::error::{Error, Result};
use crate::general::clock::Clock;
use crate::general::report::Reporter;
use crate::message::{Batch, Destination, Message, ScheduledStep, Session};
use crate::remote::osc_sender::Transport;

pub enum Mode {
    /// Play every scripted batch once, in order.
    Scripted,
    Continuous(Session),
}

#[derive(Clone, Debug, PartialEq)]
pub struct BatchReport {
    pub name: &'static str,
    pub sent: usize,
    pub elapsed: Duration,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSummary {
    pub batches: Vec<BatchReport>,
    pub sent: usize,
}

impl RunSummary {
    fn push(&mut self, report: BatchReport) {
        self.sent += report.sent;
        self.batches.push(report);
    }
}

/// Plays scheduled OSC messages against a transport, one at a time.
/// The first failure ends the run; nothing is retried.
pub struct Sequencer<T, C> {
    destination: Destination,
    transport: T,
    clock: C,
    rng: StdRng,
    reporter: Reporter,
}

impl<T: Transport, C: Clock> Sequencer<T, C> {
    pub fn new(
        destination: Destination,
        transport: T,
        clock: C,
        rng: StdRng,
        reporter: Reporter,
    ) -> Self {
        Sequencer { destination, transport, clock, rng, reporter }
    }

    pub fn run(&mut self, mode: Mode) -> Result<RunSummary> {
        match mode {
            Mode::Scripted => self.run_scripted(),
            Mode::Continuous(session) => {
                let mut summary = RunSummary::default();
                summary.push(self.run_continuous(&session)?);
                Ok(summary)
            }
        }
    }

    /// Send the step's message, then block for its delay.
    pub fn send_step(&mut self, step: &ScheduledStep) -> Result<()> {
        step.message.validate()?;
        self.transport.send(&step.message)?;
        self.clock.sleep(step.delay);
        Ok(())
    }

    pub fn play_batch(&mut self, index: usize, batch: &Batch) -> Result<BatchReport> {
        self.reporter.batch_start(index, batch.name);
        let start = self.clock.now();
        let mut sent = 0;
        for step in &batch.steps {
            self.send_step(step)?;
            sent += 1;
        }
        let elapsed = self.clock.now() - start;
        if batch.timed {
            self.reporter.sent_in(sent, elapsed);
        }
        Ok(BatchReport { name: batch.name, sent, elapsed })
    }

    pub fn run_scripted(&mut self) -> Result<RunSummary> {
        self.reporter.sending_to(&self.destination);
        let mut summary = RunSummary::default();
        for (i, batch) in batches::scripted(&mut self.rng).iter().enumerate() {
            summary.push(self.play_batch(i + 1, batch)?);
        }
        self.reporter.all_completed();
        Ok(summary)
    }

    /// Random address, random value in [0, 1), pause; repeat until the
    /// session duration has elapsed.
    pub fn run_continuous(&mut self, session: &Session) -> Result<BatchReport> {
        if session.addresses.is_empty() {
            return Err(Error::Config("continuous session needs at least one address".to_string()));
        }
        self.reporter.continuous_start(&self.destination, session.duration);

        let start = self.clock.now();
        let mut sent = 0;
        while self.clock.now() - start < session.duration {
            let address = match session.addresses.choose(&mut self.rng) {
                Some(address) => address.clone(),
                None => break,
            };
            let value = batches::unit_value(&mut self.rng);
            let step = ScheduledStep::new(Message::new(address, vec![value]), session.interval);
            self.send_step(&step)?;
            sent += 1;
        }
        let elapsed = self.clock.now() - start;

        self.reporter.sent_in(sent, elapsed);
        Ok(BatchReport { name: "Continuous session", sent, elapsed })
    }

    #[cfg(test)]
    pub fn into_transport(self) -> T {
        self.transport
    }
}
