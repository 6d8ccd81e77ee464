//! End-to-end checks of the Mercury level through the scene runner:
//! the full jump cycle, the exact launch impulse, and world determinism.

use planetaria_core::input::Key;
use planetaria_core::test_helpers::{release_all, set_key, test_engine};
use planetaria_core::{Scene, SceneRunner};
use planetaria_mercury::config::WorldConfig;
use planetaria_mercury::{MercuryConfig, MercuryScene, PlayerState};

const DT: f32 = 1.0 / 60.0;

fn small_config(seed: u32) -> MercuryConfig {
    MercuryConfig {
        world: WorldConfig {
            width: 640.0,
            height: 640.0,
            seed,
            ..WorldConfig::default()
        },
        ..MercuryConfig::default()
    }
}

fn runner(seed: u32) -> SceneRunner<MercuryScene> {
    let config = small_config(seed);
    let engine = test_engine(config.world.width, config.world.height);
    SceneRunner::new(engine, MercuryScene::new(config)).expect("scene setup")
}

fn settle(runner: &mut SceneRunner<MercuryScene>) {
    runner.run(180, DT);
    assert_eq!(player_state(runner), PlayerState::Idle);
}

fn player_state(runner: &SceneRunner<MercuryScene>) -> PlayerState {
    runner.scene.player().expect("player built").state()
}

#[test]
fn jump_cycle_walks_through_all_six_states() {
    let mut r = runner(42);
    settle(&mut r);

    set_key(&mut r.engine, Key::D, true);
    r.run(10, DT);
    assert_eq!(player_state(&r), PlayerState::Walking);
    release_all(&mut r.engine);
    r.run(2, DT);
    assert_eq!(player_state(&r), PlayerState::Idle);

    // Jump held for a single frame, then released: the launch timer and
    // impulse must not depend on the key staying down.
    set_key(&mut r.engine, Key::Space, true);
    let mut seen = vec![player_state(&r)];
    for i in 0..240 {
        r.frame(DT);
        if i == 0 {
            release_all(&mut r.engine);
        }
        if seen.last() != Some(&player_state(&r)) {
            seen.push(player_state(&r));
        }
    }

    assert_eq!(
        seen,
        vec![
            PlayerState::Idle,
            PlayerState::JumpLaunch,
            PlayerState::Rising,
            PlayerState::Falling,
            PlayerState::Landing,
            PlayerState::Idle,
        ]
    );
}

#[test]
fn launch_impulse_is_exactly_the_configured_velocity() {
    let mut r = runner(42);
    settle(&mut r);
    let jump_velocity = small_config(42).player.jump_velocity;

    set_key(&mut r.engine, Key::Space, true);
    // Drive runner phases by hand so the velocity can be observed on the
    // elapse frame between the player update and the physics step, before
    // gravity integrates into it.
    for _ in 0..30 {
        r.engine.scheduler.tick(DT);
        r.scene.update(&mut r.engine, DT);
        if player_state(&r) == PlayerState::Rising {
            let body = r.scene.player().unwrap().body();
            assert_eq!(r.engine.physics.body(body).vy, -jump_velocity);
            return;
        }
        r.engine.physics.step(DT);
    }
    panic!("jump never launched");
}

#[test]
fn same_seed_runs_are_identical() {
    let mut a = runner(7);
    let mut b = runner(7);

    for i in 0..240 {
        // Identical scripted input on both runs.
        let walking = (60..150).contains(&i);
        set_key(&mut a.engine, Key::D, walking);
        set_key(&mut b.engine, Key::D, walking);
        set_key(&mut a.engine, Key::Space, i == 170);
        set_key(&mut b.engine, Key::Space, i == 170);
        a.frame(DT);
        b.frame(DT);
    }

    let body_a = a.scene.player().unwrap().body();
    let body_b = b.scene.player().unwrap().body();
    assert_eq!(
        (a.engine.physics.body(body_a).x, a.engine.physics.body(body_a).y),
        (b.engine.physics.body(body_b).x, b.engine.physics.body(body_b).y)
    );
    assert_eq!(player_state(&a), player_state(&b));
    assert_eq!(
        a.scene.terrain().unwrap().heights(),
        b.scene.terrain().unwrap().heights()
    );
}

#[test]
fn different_seeds_produce_different_terrain() {
    let a = runner(1);
    let b = runner(2);
    assert_ne!(
        a.scene.terrain().unwrap().heights(),
        b.scene.terrain().unwrap().heights()
    );
}
