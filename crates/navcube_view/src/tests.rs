use navcube_core::{
    Axis, CubieRegistry, Destination, Face, LAYER_SIZE, LatticePoint, ParseMoveError, Rgb, Sign,
    generate_scramble, invert,
};
use navcube_prefs::{FaceColors, PointerKind, Preferences};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;
use web_time::Duration;

use crate::*;

const FRAME: Duration = Duration::from_micros(16_667);

fn sim() -> CubeSimulation {
    CubeSimulation::new(Preferences::default()).with_seed(0x5eed)
}

fn run_until_idle(sim: &mut CubeSimulation) {
    for _ in 0..100_000 {
        sim.step(FRAME);
        if sim.is_idle() {
            return;
        }
    }
    panic!("simulation never became idle");
}

fn run_until_resolved(sim: &mut CubeSimulation, completion: &Completion) {
    for _ in 0..100_000 {
        if completion.is_resolved() {
            return;
        }
        sim.step(FRAME);
    }
    panic!("completion never resolved");
}

fn assert_every_layer_has_nine(sim: &CubeSimulation) {
    for axis in Axis::iter() {
        for layer in Sign::ALL {
            let selection = sim.registry().select_layer(axis, layer);
            assert_eq!(LAYER_SIZE, selection.map(|s| s.cubies.len()).unwrap_or(0));
        }
    }
}

#[test]
fn test_scramble_then_inverse_restores_cube() {
    let mut rng = ChaCha12Rng::seed_from_u64(12345);
    let mut sim = sim();
    for _ in 0..100 {
        let length = rng.random_range(1..=25);
        let scramble = generate_scramble(length, &mut rng);

        let drain = sim.enqueue_moves_and_drain(&scramble);
        run_until_resolved(&mut sim, &drain);
        assert_eq!(Some(Ok(())), drain.result());
        assert!(sim.registry().is_lattice_aligned());
        assert_every_layer_has_nine(&sim);

        let drain = sim.enqueue_moves_and_drain(&invert(&scramble));
        run_until_resolved(&mut sim, &drain);
        assert_eq!(Some(Ok(())), drain.result());
        assert!(sim.registry().is_solved(), "not solved after {scramble:?}");
        assert!(sim.registry().is_lattice_aligned());
    }
}

#[test]
fn test_invalid_tokens_leave_state_untouched() {
    let mut sim = sim();
    assert_eq!(
        Err(MoveError::Parse(ParseMoveError::UnknownFace('X'))),
        sim.apply_move("X", Duration::ZERO).map(|_| ()),
    );
    assert_eq!(
        Err(MoveError::Parse(ParseMoveError::BadSuffix("3".to_owned()))),
        sim.enqueue_and_drain(&["R", "U3", "F"]).map(|_| ()),
    );
    assert!(sim.mechanism().queue().is_empty());
    assert_eq!(0, sim.mechanism().queue().drains_started());
    sim.step(FRAME);
    assert!(sim.registry().is_solved());
}

#[test]
fn test_zero_duration_move_snaps_on_next_tick() {
    let mut sim = sim();
    let done = sim.apply_move("F'", Duration::ZERO).unwrap();
    assert!(!done.is_resolved());
    sim.step(FRAME);
    assert_eq!(Some(Ok(())), done.result());
    assert!(sim.registry().is_lattice_aligned());
    assert!(!sim.registry().is_solved());
}

#[test]
fn test_render_transform_follows_pivot() {
    let mut sim = sim();
    let corner = LatticePoint([Sign::Pos, Sign::Pos, Sign::Pos]);
    let id = sim.registry().cubie_at(corner).unwrap();
    let start = sim.render_transform(id).unwrap();
    sim.apply_move("R", Duration::from_millis(120)).unwrap();
    sim.step(Duration::from_millis(60));
    let midway = sim.render_transform(id).unwrap();
    assert_ne!(start, midway);
    // The registry itself is untouched until the move snaps.
    assert_eq!(&start, sim.registry().get(id).unwrap().transform());
}

#[test]
fn test_select_face_plays_scramble_and_solve() {
    let mut sim = sim();
    assert!(sim.select_face(Face::F));
    run_until_idle(&mut sim);

    let scramble = sim.last_scramble().cloned().unwrap();
    assert_eq!(18, scramble.len());
    let choreography = Choreography::ScrambleAndSolve(Destination::Ideate);
    assert_eq!(
        vec![
            CubeEvent::Started(choreography),
            CubeEvent::Scrambled(scramble),
            CubeEvent::Solved,
            CubeEvent::Reveal(Destination::Ideate),
            CubeEvent::Finished(choreography),
        ],
        sim.drain_events(),
    );
    assert!(sim.registry().is_solved());
    assert!(sim.registry().is_lattice_aligned());
    assert_eq!(3.5, sim.label_scale());
    assert!(!sim.is_busy());
}

#[test]
fn test_second_selection_while_busy_is_ignored() {
    let mut sim = sim();
    assert!(sim.select_face(Face::R));
    sim.step(FRAME);
    assert_eq!(1, sim.mechanism().queue().drains_started());
    assert_eq!(17, sim.mechanism().queue().len());

    assert!(!sim.select_face(Face::U));
    assert!(!sim.select_face(Face::B));
    assert!(!sim.play_intro());
    sim.step(FRAME);
    assert_eq!(1, sim.mechanism().queue().drains_started());
    assert!(sim.mechanism().queue().len() <= 18);

    run_until_idle(&mut sim);
    let events = sim.drain_events();
    let reveals: Vec<&CubeEvent> = events
        .iter()
        .filter(|e| matches!(e, CubeEvent::Reveal(_)))
        .collect();
    assert_eq!(vec![&CubeEvent::Reveal(Destination::Prototype)], reveals);
    assert!(!events.contains(&CubeEvent::NavigateHome));
    // One drain for the scramble and one for the solve.
    assert_eq!(2, sim.mechanism().queue().drains_started());

    // Idle again, so the next selection is accepted.
    assert!(sim.select_face(Face::U));
}

#[test]
fn test_labels_shrink_during_scramble() {
    let mut sim = sim();
    sim.select_face(Face::L);

    for _ in 0..60 {
        sim.step(FRAME);
    }
    let scale = sim.label_scale();
    assert!(scale < 3.5 && scale > 1.0, "scale is {scale}");

    let mut smallest = scale;
    let mut scale_before_solved = None;
    for _ in 0..100_000 {
        let before = sim.label_scale();
        sim.step(FRAME);
        smallest = smallest.min(sim.label_scale());
        if sim.drain_events().contains(&CubeEvent::Solved) {
            scale_before_solved = Some(before);
        }
        if sim.is_idle() {
            break;
        }
    }
    assert_eq!(1.0, smallest);
    // Labels stay small until the solve has finished.
    assert_eq!(Some(1.0), scale_before_solved);
    assert_eq!(3.5, sim.label_scale());
}

#[test]
fn test_home_navigates_without_scramble() {
    let mut sim = sim();
    assert!(sim.select_face(Face::B));
    assert_eq!(vec![CubeEvent::NavigateHome], sim.drain_events());
    assert!(!sim.is_busy());
    sim.step(FRAME);
    assert!(sim.mechanism().is_idle());
    assert!(sim.last_scramble().is_none());
}

#[test]
fn test_intro_resets_and_shows_off() {
    let mut sim = sim();
    let active = sim.apply_move("R", Duration::from_millis(120)).unwrap();
    let waiting = sim.apply_move("U", Duration::from_millis(120)).unwrap();
    sim.step(FRAME);

    assert!(sim.play_intro());
    sim.step(FRAME);
    assert_eq!(Some(Ok(())), active.result());
    assert_eq!(Some(Err(MoveError::Discarded)), waiting.result());
    assert!(sim.registry().is_solved());
    assert_eq!(3.5, sim.label_scale());

    run_until_idle(&mut sim);
    let scramble = sim.last_scramble().cloned().unwrap();
    assert_eq!(22, scramble.len());
    assert_eq!(
        vec![
            CubeEvent::Started(Choreography::Intro),
            CubeEvent::Scrambled(scramble),
            CubeEvent::Solved,
            CubeEvent::Finished(Choreography::Intro),
        ],
        sim.drain_events(),
    );
    assert!(sim.registry().is_solved());
    assert_eq!(3.5, sim.label_scale());
}

#[test]
fn test_seeded_choreographies_repeat() {
    let mut a = sim();
    let mut b = sim();
    a.select_face(Face::D);
    b.select_face(Face::D);
    a.step(FRAME);
    b.step(FRAME);
    assert_eq!(a.last_scramble(), b.last_scramble());
}

#[test]
fn test_click_sticker_follows_moves() {
    let mut sim = sim();
    let edge = LatticePoint([Sign::Pos, Sign::Pos, Sign::Zero]);
    assert_eq!(Some(Face::U), sim.sticker_at(edge, Face::U));
    assert_eq!(None, sim.sticker_at(LatticePoint::CORE, Face::U));
    assert_eq!(None, sim.sticker_at(edge, Face::F));

    // R carries the front sticker of the front-right edge to the top.
    sim.apply_move("R", Duration::ZERO).unwrap();
    sim.step(FRAME);
    assert_eq!(Some(Face::F), sim.sticker_at(edge, Face::U));

    assert!(!sim.click_sticker(LatticePoint::CORE, Face::U));
    assert!(sim.click_sticker(edge, Face::U));
    sim.step(FRAME);
    assert_eq!(
        Some(Choreography::ScrambleAndSolve(Destination::Ideate)),
        sim.drain_events().iter().find_map(|e| match e {
            CubeEvent::Started(c) => Some(*c),
            _ => None,
        }),
    );
}

#[test]
fn test_drag_suppresses_selection() {
    let mut sim = sim();
    sim.pointer_down(PointerKind::Mouse, [0.0, 0.0]);
    assert!(sim.pointer_move([30.0, 0.0]));
    assert!(!sim.select_face(Face::F));
    assert_eq!(PointerRelease::DragEnd, sim.pointer_up([30.0, 0.0]));

    sim.pointer_down(PointerKind::Mouse, [0.0, 0.0]);
    assert_eq!(PointerRelease::Click([1.0, 1.0]), sim.pointer_up([1.0, 1.0]));
    assert!(sim.select_face(Face::F));
}

#[test]
fn test_hard_reset_applies_new_gap() {
    let mut sim = sim();
    sim.apply_move("B2", Duration::ZERO).unwrap();
    sim.step(FRAME);
    assert!(!sim.registry().is_solved());

    let mut prefs = sim.prefs().clone();
    prefs.lattice_gap = 1.1;
    sim.set_prefs(prefs);
    sim.rebuild_registry();
    assert_eq!(1.1, sim.registry().lattice().gap);
    assert!(sim.registry().is_solved());
    assert!(sim.registry().is_lattice_aligned());
}

#[test]
fn test_hard_reset_with_new_gap_discards_waiting_moves() {
    let mut sim = sim();
    let active = sim.apply_move("R", Duration::from_millis(120)).unwrap();
    let waiting = sim.apply_move("U", Duration::from_millis(120)).unwrap();
    let drain = sim.enqueue_and_drain(&["F"]).unwrap();
    sim.step(FRAME);

    let mut prefs = sim.prefs().clone();
    prefs.lattice_gap = 1.1;
    sim.set_prefs(prefs);
    sim.rebuild_registry();

    assert_eq!(Some(Ok(())), active.result());
    assert_eq!(Some(Err(MoveError::Discarded)), waiting.result());
    assert_eq!(Some(Err(MoveError::Discarded)), drain.result());
    assert!(sim.mechanism().is_idle());
    assert_eq!(1.1, sim.registry().lattice().gap);
    assert!(sim.registry().is_solved());
}

#[test]
fn test_hard_reset_cancels_choreography() {
    let mut sim = sim();
    assert!(sim.select_face(Face::F));
    for _ in 0..10 {
        sim.step(FRAME);
    }
    assert!(sim.is_busy());
    assert!(!sim.registry().is_solved());
    sim.drain_events();

    let mut prefs = sim.prefs().clone();
    prefs.lattice_gap = 1.1;
    sim.set_prefs(prefs);
    sim.rebuild_registry();

    let choreography = Choreography::ScrambleAndSolve(Destination::Ideate);
    assert_eq!(
        vec![CubeEvent::Aborted(choreography, MoveError::Discarded)],
        sim.drain_events(),
    );
    assert!(!sim.is_busy());
    assert!(sim.mechanism().is_idle());
    assert_eq!(3.5, sim.label_scale());
    assert_eq!(1.1, sim.registry().lattice().gap);
    assert!(sim.registry().is_solved());
    assert_every_layer_has_nine(&sim);

    // Nothing from the cancelled run leaks into later frames.
    sim.step(FRAME);
    assert_eq!(Vec::<CubeEvent>::new(), sim.drain_events());

    assert!(sim.select_face(Face::F));
    run_until_idle(&mut sim);
    let events = sim.drain_events();
    assert!(events.contains(&CubeEvent::Reveal(Destination::Ideate)));
    assert!(sim.registry().is_solved());
    assert!(sim.registry().is_lattice_aligned());
}

#[test]
fn test_no_auto_rotate_during_choreography() {
    let mut sim = sim();
    assert!(sim.select_face(Face::R));
    // Past the inactivity delay, but well before the solve finishes.
    for _ in 0..180 {
        sim.step(FRAME);
    }
    assert!(sim.is_busy());
    assert!(!sim.world().is_auto_rotating());
    assert_eq!(0.0, sim.world().yaw());

    run_until_idle(&mut sim);
    for _ in 0..150 {
        sim.step(FRAME);
    }
    assert!(sim.world().is_auto_rotating());
}

#[test]
fn test_realtime_steps_start_auto_rotate() {
    let mut prefs = Preferences::default();
    prefs.interaction.inactivity_delay = 0.2;
    let mut sim = CubeSimulation::new(prefs);
    for _ in 0..12 {
        assert!(sim.step_realtime());
        std::thread::sleep(std::time::Duration::from_millis(40));
    }
    assert!(sim.world().is_auto_rotating());
}

#[derive(Debug, Default)]
struct RecordingScene {
    rebuilt: Vec<FaceColors>,
    recolored: Vec<FaceColors>,
}
impl Scene for RecordingScene {
    fn rebuilt(&mut self, _registry: &CubieRegistry, colors: &FaceColors) {
        self.rebuilt.push(colors.clone());
    }
    fn recolored(&mut self, colors: &FaceColors) {
        self.recolored.push(colors.clone());
    }
}

#[test]
fn test_scene_receives_face_colors() {
    let mut prefs = Preferences::default();
    prefs.colors.u = Rgb::from_u32(0x123456);
    let mut sim = CubeSimulation::with_scene(prefs.clone(), RecordingScene::default());
    assert_eq!(vec![prefs.colors.clone()], sim.scene().rebuilt);
    assert_eq!(Rgb::from_u32(0x123456), sim.mechanism().colors().get(Face::U));

    // Unchanged colors are not repainted.
    sim.set_prefs(prefs.clone());
    assert!(sim.scene().recolored.is_empty());

    prefs.colors.f = Rgb::from_u32(0xabcdef);
    sim.set_prefs(prefs.clone());
    assert_eq!(vec![prefs.colors.clone()], sim.scene().recolored);

    sim.rebuild_registry();
    assert_eq!(2, sim.scene().rebuilt.len());
    assert_eq!(Rgb::from_u32(0xabcdef), sim.scene().rebuilt[1].f);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn proptest_queue_restores_after_inverse(seed in any::<u64>(), length in 1_usize..=25) {
        let mut rng = ChaCha12Rng::seed_from_u64(seed);
        let scramble = generate_scramble(length, &mut rng);
        let mut moves = scramble.clone();
        moves.extend(invert(&scramble));

        let mut sim = sim();
        let drain = sim.enqueue_moves_and_drain(&moves);
        run_until_resolved(&mut sim, &drain);
        prop_assert_eq!(Some(Ok(())), drain.result());
        prop_assert!(sim.registry().is_solved());
        prop_assert!(sim.registry().is_lattice_aligned());
    }
}
