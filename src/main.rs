use std::f32::consts::FRAC_PI_2;

use log::{info, warn};
use softrender::prelude::*;

const DEFAULT_MESH: &str = "assets/vehicle.obj";
const DEFAULT_DIFFUSE: &str = "assets/vehicle_diffuse.png";
const DEFAULT_NORMAL: &str = "assets/vehicle_normal.png";
const DEFAULT_SPECULAR: &str = "assets/vehicle_specular.png";
const DEFAULT_GLOSS: &str = "assets/vehicle_gloss.png";

/// Mesh and texture paths, from the command line or the bundled defaults.
///
/// Usage: softrender [mesh.obj [diffuse.png normal.png specular.png gloss.png]]
struct Args {
    mesh: String,
    diffuse: String,
    normal: String,
    specular: String,
    gloss: String,
}

impl Args {
    fn parse() -> Self {
        let mut args = std::env::args().skip(1);
        Self {
            mesh: args.next().unwrap_or_else(|| DEFAULT_MESH.to_string()),
            diffuse: args.next().unwrap_or_else(|| DEFAULT_DIFFUSE.to_string()),
            normal: args.next().unwrap_or_else(|| DEFAULT_NORMAL.to_string()),
            specular: args.next().unwrap_or_else(|| DEFAULT_SPECULAR.to_string()),
            gloss: args.next().unwrap_or_else(|| DEFAULT_GLOSS.to_string()),
        }
    }
}

fn load_scene(engine: &mut Engine, args: &Args) -> Result<(), String> {
    let mut mesh = Mesh::from_obj(&args.mesh).map_err(|e| e.to_string())?;
    // Face the camera and move out in front of it
    mesh.world_matrix = Mat4::translation(0.0, 0.0, 50.0) * Mat4::rotation_y(-FRAC_PI_2);
    info!("loaded {} ({} vertices)", args.mesh, mesh.vertices.len());
    engine.add_mesh(mesh);

    match MaterialSet::from_files(&args.diffuse, &args.normal, &args.specular, &args.gloss) {
        Ok(materials) => engine.set_materials(materials),
        Err(e) => warn!("texture maps unavailable ({e}), using a neutral material"),
    }
    Ok(())
}

fn main() -> Result<(), String> {
    env_logger::init();
    let args = Args::parse();

    let mut window = Window::new(
        "softrender",
        softrender::window::WINDOW_WIDTH,
        softrender::window::WINDOW_HEIGHT,
    )?;
    let mut engine = Engine::new(window.width(), window.height());
    load_scene(&mut engine, &args)?;

    let mut config = RenderConfig {
        rotating: true,
        ..Default::default()
    };
    let mut limiter = FrameLimiter::new(&window);
    let mut snapshot_count = 0u32;

    loop {
        let (event, input) = window.poll_input();
        match event {
            WindowEvent::Quit => break,
            WindowEvent::Resize(w, h) => {
                window.resize(w, h)?;
                engine.resize(w, h);
            }
            WindowEvent::None => {}
        }

        config = config.apply_toggles(&input.toggles);
        if input.toggles.snapshot {
            snapshot_count += 1;
            let path = format!("snapshot_{snapshot_count}.png");
            match engine.save_snapshot(&path) {
                Ok(()) => info!("saved {path}"),
                Err(e) => warn!("snapshot failed: {e}"),
            }
        }

        let delta_ms = limiter.wait_and_get_delta(&window);
        engine.update(&input, delta_ms as f32 / 1000.0, &config);
        engine.render(&config);

        window.present(engine.frame_bytes())?;
    }

    Ok(())
}
