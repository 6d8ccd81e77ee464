//! Runs the Mercury level headlessly with scripted input, logging player
//! state transitions. Useful for eyeballing determinism and tuning without
//! a renderer: the same seed and script always produce the same log.

use planetaria_core::input::Key;
use planetaria_core::{Engine, SceneRunner};
use planetaria_mercury::{MercuryConfig, MercuryScene, PlayerState};
use tracing_subscriber::EnvFilter;

const DT: f32 = 1.0 / 60.0;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let frames = std::env::args()
        .find_map(|a| a.strip_prefix("--frames=").map(String::from))
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(600);

    let seed = std::env::args()
        .find_map(|a| a.strip_prefix("--seed=").map(String::from))
        .and_then(|v| v.parse::<u32>().ok());

    let mut config = MercuryConfig::load();
    if let Some(seed) = seed {
        config.world.seed = seed;
    }

    let engine = Engine::new(config.world.width, config.world.height);
    let mut runner = SceneRunner::new(engine, MercuryScene::new(config))
        .unwrap_or_else(|e| panic!("Failed to build Mercury scene: {e}"));

    let mut last_state: Option<PlayerState> = None;
    for frame in 0..frames {
        script_input(&mut runner, frame);
        runner.frame(DT);

        let player = runner.scene.player().expect("scene created with a player");
        let state = player.state();
        if last_state != Some(state) {
            let body = runner.engine.physics.body(player.body());
            tracing::info!(frame, ?state, x = body.x, y = body.y, "state change");
            last_state = Some(state);
        }
    }

    let player = runner.scene.player().expect("scene created with a player");
    let body = runner.engine.physics.body(player.body());
    tracing::info!(
        frames,
        x = body.x,
        y = body.y,
        state = ?player.state(),
        camera_x = runner.engine.camera.x,
        camera_y = runner.engine.camera.y,
        "run complete"
    );
}

/// Scripted input: settle, walk right, jump, walk left, jump again.
fn script_input(runner: &mut SceneRunner<MercuryScene>, frame: usize) {
    let kb = runner
        .engine
        .keyboard_mut()
        .expect("sim engine always has a keyboard");
    kb.release_all();
    match frame {
        120..240 => kb.set_down(Key::D, true),
        240 => kb.set_down(Key::Space, true),
        300..420 => kb.set_down(Key::A, true),
        420 => kb.set_down(Key::Space, true),
        _ => {},
    }
}
