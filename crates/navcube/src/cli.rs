use std::path::PathBuf;
use std::time::Duration;

use eyre::{Context, Result, bail, ensure, eyre};
use itertools::Itertools;
use navcube_core::{
    Destination, Face, Move, Orientation, Placement, Scramble, format_moves, generate_scramble,
    invert, parse_moves,
};
use navcube_prefs::Preferences;
use navcube_view::{Completion, CubeEvent, CubeSimulation};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use serde::Serialize;

/// Upper bound on simulated frames before giving up on a run.
const MAX_FRAMES: usize = 10_000_000;

/// Navigation cube command-line interface
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    #[command(subcommand)]
    pub subcommand: Subcommand,

    /// Preferences file to layer over the defaults.
    #[arg(long, global = true, value_name = "FILE")]
    pub prefs: Option<PathBuf>,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Generate a scramble.
    Scramble {
        /// Number of moves (default from preferences).
        #[arg(short, long)]
        length: Option<usize>,
        /// Seed for a reproducible scramble.
        #[arg(short, long)]
        seed: Option<u64>,
        /// Print the scramble and its seed as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print the sequence that undoes some moves.
    Invert {
        /// Moves such as `R U' F2`.
        #[arg(required = true)]
        moves: Vec<String>,
    },
    /// Animate moves with a fixed frame clock and print where every cubie ends
    /// up.
    Play {
        /// Moves such as `R U' F2`.
        #[arg(required = true)]
        moves: Vec<String>,
        /// Simulated frames per second.
        #[arg(long, default_value_t = 60.0)]
        fps: f32,
        /// Print cubie placements as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Click a sticker and print the events of the resulting animation.
    Select {
        /// Face symbol (`U`, `D`, `L`, `R`, `F`, `B`) or destination label.
        #[arg(value_parser = parse_face)]
        face: Face,
        /// Seed for the scramble.
        #[arg(short, long)]
        seed: Option<u64>,
        /// Simulated frames per second.
        #[arg(long, default_value_t = 60.0)]
        fps: f32,
        /// Print events as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Play the intro animation and print its events.
    Intro {
        /// Seed for the scramble.
        #[arg(short, long)]
        seed: Option<u64>,
        /// Simulated frames per second.
        #[arg(long, default_value_t = 60.0)]
        fps: f32,
        /// Print events as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Check that random scrambles followed by their inverse restore the cube.
    Verify {
        /// Number of scrambles to try.
        #[arg(short, long, default_value_t = 100)]
        trials: usize,
        /// Longest scramble to try.
        #[arg(long, default_value_t = 25)]
        max_length: usize,
        /// Seed for the trials.
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Print the effective preferences as YAML.
    Prefs,
}

pub(crate) fn exec(subcommand: Subcommand, prefs: Preferences) -> Result<()> {
    match subcommand {
        Subcommand::Scramble { length, seed, json } => {
            let length = length.unwrap_or(prefs.animation.scramble_length);
            let scramble = match seed {
                Some(seed) => Scramble::new_seeded(length, seed),
                None => Scramble::new(length),
            };
            if json {
                write_json_output(&scramble)
            } else {
                println!("{}", format_moves(&scramble.moves));
                Ok(())
            }
        }

        Subcommand::Invert { moves } => {
            let moves = parse_move_args(&moves)?;
            println!("{}", format_moves(&invert(&moves)));
            Ok(())
        }

        Subcommand::Play { moves, fps, json } => {
            let moves = parse_move_args(&moves)?;
            let frame = frame_duration(fps)?;
            let mut sim = CubeSimulation::new(prefs);
            let drain = sim.enqueue_moves_and_drain(&moves);
            let frames = run_until_resolved(&mut sim, &drain, frame)?;
            if let Some(Err(e)) = drain.result() {
                bail!("error playing moves: {e}");
            }

            let placements = sim
                .registry()
                .placements()
                .map_err(|e| eyre!("cube is not on the lattice: {e}"))?;
            if json {
                return write_json_output(&PlayReport {
                    moves,
                    frames,
                    solved: sim.registry().is_solved(),
                    placements,
                });
            }

            println!("{} moves in {frames} frames", moves.len());
            let displaced = placements
                .iter()
                .filter(|p| {
                    p.home != p.point || p.orientation != Orientation::IDENTITY.images()
                })
                .collect_vec();
            if displaced.is_empty() {
                println!("solved");
            } else {
                println!("{} cubies displaced:", displaced.len());
                for p in displaced {
                    println!(
                        "  {} {:?} -> {:?} facing {}",
                        p.cubie,
                        p.home,
                        p.point,
                        p.orientation.iter().join(""),
                    );
                }
            }
            Ok(())
        }

        Subcommand::Select {
            face,
            seed,
            fps,
            json,
        } => {
            let frame = frame_duration(fps)?;
            let mut sim = seeded_simulation(prefs, seed);
            ensure!(sim.select_face(face), "selection of {face} was ignored");
            let events = run_choreography(&mut sim, frame)?;
            print_events(&events, json)
        }

        Subcommand::Intro { seed, fps, json } => {
            let frame = frame_duration(fps)?;
            let mut sim = seeded_simulation(prefs, seed);
            ensure!(sim.play_intro(), "intro was ignored");
            let events = run_choreography(&mut sim, frame)?;
            print_events(&events, json)
        }

        Subcommand::Verify {
            trials,
            max_length,
            seed,
        } => {
            ensure!(max_length > 0, "max length must be positive");
            let seed = seed.unwrap_or_else(|| rand::rng().random());
            log::info!("verifying {trials} trials with seed {seed}");
            let mut rng = ChaCha12Rng::seed_from_u64(seed);
            let frame = frame_duration(60.0)?;
            let mut sim = CubeSimulation::new(prefs);

            let mut failures = 0;
            for trial in 0..trials {
                let length = rng.random_range(1..=max_length);
                let scramble = generate_scramble(length, &mut rng);
                let mut moves = scramble.clone();
                moves.extend(invert(&scramble));

                let drain = sim.enqueue_moves_and_drain(&moves);
                run_until_resolved(&mut sim, &drain, frame)?;
                let restored = drain.result() == Some(Ok(()))
                    && sim.registry().is_solved()
                    && sim.registry().is_lattice_aligned();
                if !restored {
                    failures += 1;
                    println!("trial {trial} failed: {}", format_moves(&scramble));
                    sim.rebuild_registry();
                }
            }

            println!("{} of {trials} trials restored the cube", trials - failures);
            ensure!(failures == 0, "{failures} trials failed");
            Ok(())
        }

        Subcommand::Prefs => {
            let yaml = prefs
                .to_yaml_string()
                .context("error serializing preferences")?;
            print!("{yaml}");
            Ok(())
        }
    }
}

#[derive(Serialize, Debug)]
struct PlayReport {
    moves: Vec<Move>,
    frames: usize,
    solved: bool,
    placements: Vec<Placement>,
}

#[derive(Serialize, Debug)]
struct EventRecord {
    /// Simulated time in seconds.
    time: f32,
    event: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    destination: Option<Destination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scramble: Option<Scramble>,
}
impl EventRecord {
    fn new(time: f32, event: &CubeEvent) -> Self {
        let mut destination = None;
        let mut scramble = None;
        let event = match event {
            CubeEvent::Started(c) => format!("started {c:?}"),
            CubeEvent::Scrambled(s) => {
                scramble = Some(s.clone());
                format!("scrambled {}", format_moves(&s.moves))
            }
            CubeEvent::Solved => "solved".to_owned(),
            CubeEvent::Reveal(d) => {
                destination = Some(*d);
                format!("reveal {d}")
            }
            CubeEvent::NavigateHome => {
                destination = Some(Destination::Home);
                "navigate home".to_owned()
            }
            CubeEvent::Finished(c) => format!("finished {c:?}"),
            CubeEvent::Aborted(c, e) => format!("aborted {c:?}: {e}"),
        };
        Self {
            time,
            event,
            destination,
            scramble,
        }
    }
}

fn parse_face(s: &str) -> Result<Face, String> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next())
        && let Some(face) = Face::from_symbol(c.to_ascii_uppercase())
    {
        return Ok(face);
    }
    Destination::ALL
        .into_iter()
        .find(|d| d.label().eq_ignore_ascii_case(s))
        .map(Destination::face)
        .ok_or_else(|| format!("expected a face symbol or destination label, got {s:?}"))
}

/// Accepts moves either as separate arguments or as one quoted string.
fn parse_move_args(args: &[String]) -> Result<Vec<Move>> {
    parse_moves(&args.join(" ")).context("invalid move")
}

fn frame_duration(fps: f32) -> Result<Duration> {
    ensure!(fps > 0.0 && fps.is_finite(), "fps must be positive");
    Ok(Duration::from_secs_f32(1.0 / fps))
}

fn seeded_simulation(prefs: Preferences, seed: Option<u64>) -> CubeSimulation {
    let sim = CubeSimulation::new(prefs);
    match seed {
        Some(seed) => sim.with_seed(seed),
        None => sim,
    }
}

/// Steps `sim` until `completion` resolves. Returns the number of frames.
fn run_until_resolved(
    sim: &mut CubeSimulation,
    completion: &Completion,
    frame: Duration,
) -> Result<usize> {
    for frames in 0..MAX_FRAMES {
        if completion.is_resolved() {
            return Ok(frames);
        }
        sim.step(frame);
    }
    bail!("moves did not finish after {MAX_FRAMES} frames")
}

/// Steps `sim` until it is idle, collecting every event with the simulated
/// time it was emitted at.
fn run_choreography(sim: &mut CubeSimulation, frame: Duration) -> Result<Vec<EventRecord>> {
    let mut records = sim
        .drain_events()
        .iter()
        .map(|e| EventRecord::new(0.0, e))
        .collect_vec();
    for frames in 1..=MAX_FRAMES {
        sim.step(frame);
        let time = frame.as_secs_f32() * frames as f32;
        records.extend(sim.drain_events().iter().map(|e| EventRecord::new(time, e)));
        if sim.is_idle() {
            return Ok(records);
        }
    }
    bail!("animation did not finish after {MAX_FRAMES} frames")
}

fn print_events(records: &[EventRecord], json: bool) -> Result<()> {
    if json {
        return write_json_output(&records);
    }
    for record in records {
        println!("{:>8.3}s  {}", record.time, record.event);
    }
    Ok(())
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}
