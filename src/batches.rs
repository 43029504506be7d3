//! The hand-authored scenarios played in scripted mode, in playback order.

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::message::{Batch, Message, ScheduledStep, Value};

/// C major triad plus the octave.
pub const CHORD_PITCHES: [i32; 4] = [60, 64, 67, 72];
pub const NOTE_ON_VELOCITY: i32 = 100;
pub const RAMP_BASE_FREQUENCY: f32 = 220.0;
pub const RAMP_STEPS: usize = 10;
pub const BURST_COUNT: usize = 100;
pub const BURST_INTERVAL: Duration = Duration::from_millis(10);
pub const BLOB_LEN: usize = 16;
pub const STRESS_COUNT: usize = 50;

pub const PATTERN_ADDRESSES: [&str; 6] = [
    "/instruments/piano/note",
    "/instruments/drums/kick",
    "/instruments/bass/note",
    "/mixer/channel1/volume",
    "/mixer/channel2/pan",
    "/master/volume",
];

pub const STRESS_ADDRESSES: [&str; 9] = [
    "/synth/freq",
    "/synth/amp",
    "/effects/reverb",
    "/midi/note",
    "/transport/bpm",
    "/test/random",
    "/mixer/volume",
    "/filter/cutoff",
    "/lfo/rate",
];

pub const CONTINUOUS_ADDRESSES: [&str; 6] = [
    "/synth/freq",
    "/synth/amp",
    "/effects/reverb",
    "/midi/note",
    "/transport/bpm",
    "/test/continuous",
];

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

/// Steps sent back to back, with `pause` after the last one only.
fn burst(messages: Vec<Message>, pause: Duration) -> Vec<ScheduledStep> {
    let last = messages.len().saturating_sub(1);
    messages
        .into_iter()
        .enumerate()
        .map(|(i, msg)| ScheduledStep::new(msg, if i == last { pause } else { Duration::ZERO }))
        .collect()
}

/// Uniform value in [0, 1).
pub fn unit_value(rng: &mut impl Rng) -> Value {
    Value::Float(rng.gen_range(0.0f32..1.0))
}

/// Frequency of chromatic step `step` above `base`.
pub fn chromatic_frequency(base: f32, step: usize) -> f32 {
    base * 2f32.powf(step as f32 / 12.0)
}

pub fn simple_messages() -> Batch {
    Batch::new(
        "Simple messages",
        burst(
            vec![
                Message::single("/test/int", 42i32),
                Message::single("/test/float", 3.14159f32),
                Message::single("/test/string", "hello world"),
                Message::new("/test/mixed", vec![440i32.into(), 0.5f32.into(), "note".into()]),
            ],
            ms(100),
        ),
    )
}

pub fn synth_control() -> Batch {
    Batch::new(
        "Synthesizer control",
        burst(
            vec![
                Message::single("/synth/freq", 440.0f32),
                Message::single("/synth/amp", 0.8f32),
                Message::new("/synth/filter", vec![2000.0f32.into(), 0.5f32.into()]),
                Message::new(
                    "/synth/envelope",
                    vec![0.01f32.into(), 0.3f32.into(), 0.7f32.into(), 1.2f32.into()],
                ),
            ],
            ms(100),
        ),
    )
}

pub fn effects_control() -> Batch {
    Batch::new(
        "Effects control",
        burst(
            vec![
                Message::single("/effects/reverb/room", 0.3f32),
                Message::single("/effects/reverb/damp", 0.5f32),
                Message::single("/effects/delay/time", 0.25f32),
                Message::single("/effects/delay/feedback", 0.4f32),
                Message::single("/effects/chorus/rate", 2.0f32),
                Message::single("/effects/chorus/depth", 0.3f32),
            ],
            ms(100),
        ),
    )
}

/// Note-on for every chord pitch, then note-off (velocity 0) for each.
pub fn midi_chord() -> Batch {
    let note = |addr: &str, pitch: i32, velocity: i32| {
        ScheduledStep::new(Message::new(addr, vec![pitch.into(), velocity.into()]), ms(100))
    };
    let steps = CHORD_PITCHES
        .iter()
        .map(|&p| note("/midi/note_on", p, NOTE_ON_VELOCITY))
        .chain(CHORD_PITCHES.iter().map(|&p| note("/midi/note_off", p, 0)))
        .collect();
    Batch::new("MIDI-style messages", steps)
}

pub fn transport_control() -> Batch {
    Batch::new(
        "Transport control",
        vec![
            ScheduledStep::new(Message::new("/transport/play", vec![]), ms(500)),
            ScheduledStep::new(Message::single("/transport/bpm", 120i32), ms(500)),
            ScheduledStep::new(Message::new("/transport/stop", vec![]), ms(100)),
        ],
    )
}

pub fn chromatic_ramp() -> Batch {
    let steps = (0..RAMP_STEPS)
        .map(|i| {
            let freq = chromatic_frequency(RAMP_BASE_FREQUENCY, i);
            ScheduledStep::new(
                Message::new("/sequence/step", vec![(i as i32).into(), freq.into()]),
                ms(50),
            )
        })
        .collect();
    Batch::new("Message sequence", steps)
}

/// Sine samples at ~100 messages per second, timed for throughput.
pub fn high_frequency() -> Batch {
    let steps = (0..BURST_COUNT)
        .map(|i| {
            let value = (i as f32 * 0.1).sin();
            ScheduledStep::new(
                Message::new("/highfreq/data", vec![(i as i32).into(), value.into()]),
                BURST_INTERVAL,
            )
        })
        .collect();
    Batch::new("High-frequency messages", steps).timed()
}

pub fn address_patterns(rng: &mut impl Rng) -> Batch {
    let steps = PATTERN_ADDRESSES
        .iter()
        .map(|&addr| ScheduledStep::new(Message::new(addr, vec![unit_value(rng)]), ms(50)))
        .collect();
    Batch::new("Address patterns", steps)
}

pub fn blob_data(rng: &mut impl Rng) -> Batch {
    let mut blob = vec![0u8; BLOB_LEN];
    rng.fill(&mut blob[..]);
    Batch::new(
        "Blob data",
        vec![ScheduledStep::new(Message::single("/data/blob", blob), ms(100))],
    )
}

pub fn random_stress(rng: &mut impl Rng) -> Batch {
    let steps = (0..STRESS_COUNT)
        .map(|_| {
            let addr = *STRESS_ADDRESSES
                .choose(rng)
                .unwrap_or(&STRESS_ADDRESSES[0]);
            ScheduledStep::new(Message::new(addr, vec![unit_value(rng)]), ms(20))
        })
        .collect();
    Batch::new("Random message stress test", steps)
}

/// All scripted batches in playback order.
pub fn scripted(rng: &mut impl Rng) -> Vec<Batch> {
    vec![
        simple_messages(),
        synth_control(),
        effects_control(),
        midi_chord(),
        transport_control(),
        chromatic_ramp(),
        high_frequency(),
        address_patterns(rng),
        blob_data(rng),
        random_stress(rng),
    ]
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn args(step: &ScheduledStep) -> &[Value] {
        &step.message.args
    }

    #[test]
    fn scripted_step_counts() {
        let counts: Vec<usize> = scripted(&mut rng()).iter().map(|b| b.steps.len()).collect();
        assert_eq!(counts, vec![4, 4, 6, 8, 3, 10, 100, 6, 1, 50]);
        assert_eq!(counts.iter().sum::<usize>(), 192);
    }

    #[test]
    fn every_scripted_address_is_valid() {
        for batch in scripted(&mut rng()) {
            for step in &batch.steps {
                step.message.validate().unwrap();
            }
        }
    }

    #[test]
    fn only_the_burst_is_timed() {
        let timed: Vec<&str> = scripted(&mut rng())
            .iter()
            .filter(|b| b.timed)
            .map(|b| b.name)
            .collect();
        assert_eq!(timed, vec!["High-frequency messages"]);
    }

    #[test]
    fn midi_chord_on_then_off() {
        let batch = midi_chord();
        assert_eq!(batch.steps.len(), 8);
        let (on, off) = batch.steps.split_at(4);
        for (step, &pitch) in on.iter().zip(CHORD_PITCHES.iter()) {
            assert_eq!(step.message.address, "/midi/note_on");
            assert_eq!(args(step), &[Value::Int(pitch), Value::Int(100)]);
        }
        for (step, &pitch) in off.iter().zip(CHORD_PITCHES.iter()) {
            assert_eq!(step.message.address, "/midi/note_off");
            assert_eq!(args(step), &[Value::Int(pitch), Value::Int(0)]);
        }
        assert_eq!(CHORD_PITCHES, [60, 64, 67, 72]);
    }

    #[test]
    fn chromatic_ramp_ascends_by_semitones() {
        let batch = chromatic_ramp();
        assert_eq!(batch.steps.len(), 10);
        let mut previous = 0.0f32;
        for (i, step) in batch.steps.iter().enumerate() {
            let expected = 220.0 * 2f32.powf(i as f32 / 12.0);
            match args(step) {
                [Value::Int(index), Value::Float(freq)] => {
                    assert_eq!(*index, i as i32);
                    assert!((freq - expected).abs() < 1e-3);
                    assert!(*freq > previous);
                    previous = *freq;
                }
                other => panic!("unexpected args {:?}", other),
            }
        }
        assert!((chromatic_frequency(220.0, 12) - 440.0).abs() < 1e-3);
    }

    #[test]
    fn transport_has_empty_play_and_stop() {
        let batch = transport_control();
        assert!(args(&batch.steps[0]).is_empty());
        assert_eq!(args(&batch.steps[1]), &[Value::Int(120)]);
        assert!(args(&batch.steps[2]).is_empty());
        assert_eq!(batch.steps[0].delay, Duration::from_millis(500));
    }

    #[test]
    fn bursts_pause_only_after_last_step() {
        let batch = effects_control();
        let delays: Vec<Duration> = batch.steps.iter().map(|s| s.delay).collect();
        assert_eq!(&delays[..5], &[Duration::ZERO; 5]);
        assert_eq!(delays[5], Duration::from_millis(100));
    }

    #[test]
    fn blob_is_sixteen_bytes() {
        let batch = blob_data(&mut rng());
        assert_eq!(batch.steps.len(), 1);
        match args(&batch.steps[0]) {
            [Value::Blob(bytes)] => assert_eq!(bytes.len(), 16),
            other => panic!("unexpected args {:?}", other),
        }
    }

    #[test]
    fn random_values_stay_in_unit_range() {
        let mut rng = rng();
        let batches = [address_patterns(&mut rng), random_stress(&mut rng)];
        for step in batches.iter().flat_map(|b| b.steps.iter()) {
            match args(step) {
                [Value::Float(v)] => assert!((0.0..1.0).contains(v)),
                other => panic!("unexpected args {:?}", other),
            }
        }
    }

    #[test]
    fn stress_addresses_come_from_pool() {
        let batch = random_stress(&mut rng());
        assert_eq!(batch.steps.len(), 50);
        for step in &batch.steps {
            assert!(STRESS_ADDRESSES.contains(&step.message.address.as_str()));
        }
    }

    #[test]
    fn high_frequency_carries_sine_samples() {
        let batch = high_frequency();
        match args(&batch.steps[10]) {
            [Value::Int(10), Value::Float(v)] => assert!((v - 1.0f32.sin()).abs() < 1e-6),
            other => panic!("unexpected args {:?}", other),
        }
        assert!(batch.steps.iter().all(|s| s.delay == BURST_INTERVAL));
    }
}
