//! Pipe Runner headless driver
//!
//! Runs the game layer against a recording renderer with a simple autopilot.
//! Usage: `pipe-runner [tuning.json] [frames]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use pipe_runner::renderer::{DrawList, TextureId};
    use pipe_runner::sim::SessionPhase;
    use pipe_runner::{GameLayer, InputEvent, Key, Layer, LevelTextures, Tuning};

    env_logger::init();
    log::info!("Pipe Runner (headless) starting...");

    let mut args = std::env::args().skip(1);
    let tuning = match args.next() {
        Some(path) => match std::fs::read_to_string(&path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()))
        {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Could not load tuning from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };
    let frames: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(3_600);

    let textures = LevelTextures {
        player: TextureId(1),
        obstacle: TextureId(2),
    };
    let mut renderer = DrawList::new();
    let mut layer = GameLayer::new(&tuning, textures, 1280, 720);
    let mut lifting = false;
    let mut advances = 0u32;

    for _ in 0..frames {
        if layer.session().phase() == SessionPhase::Paused && lifting {
            // Release so the next press is a fresh start edge
            layer.handle_input(&InputEvent::KeyUp(Key::Space));
            lifting = false;
        }

        let want_lift = autopilot(&layer);
        if want_lift != lifting {
            let event = if want_lift {
                InputEvent::KeyDown(Key::Space)
            } else {
                InputEvent::KeyUp(Key::Space)
            };
            layer.handle_input(&event);
            lifting = want_lift;
        }

        layer.update(16.0);
        layer.render(&mut renderer);
        if layer.last_report().advanced {
            advances += 1;
        }
    }

    let session = layer.session();
    println!(
        "{} frames: {} pairs passed, {} crashes, player at x={:.2}",
        renderer.frames_submitted(),
        advances,
        session.crashes(),
        session.player.position.x
    );
    layer.teardown(&mut renderer);
}

/// Lift when the body is heading below the center of the next gap
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(layer: &pipe_runner::GameLayer) -> bool {
    use pipe_runner::sim::SessionPhase;

    let session = layer.session();
    if session.phase() == SessionPhase::Paused {
        return true;
    }
    let player = &session.player;
    let target = session
        .obstacles
        .pairs()
        .find(|(bottom, _)| bottom.position.x + bottom.scale.x > player.position.x)
        .map(|(bottom, top)| (bottom.position.y + top.position.y) / 2.0)
        .unwrap_or(0.0);
    player.position.y + player.velocity.y * 150.0 < target
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The host engine embeds the library directly on the web
}
