use clap::{Parser, Subcommand};
use glam::DVec2;
use rubik_common::FACE_COLORS;
use rubik_input::InputEvent;
use rubik_kernel::{ColorScheme, CubeAssembly, SPACING};
use rubik_render::{
    CubeScene, DebugTextRenderer, FrameLoop, Lighting, NormalMode, ScriptedEvents, ViewParams,
};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rubik-cli", about = "CLI tool for the cube viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, assembly and face-color table
    Info,
    /// Dump the 27 cubelet instances
    Scene {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
        /// Use face-correct coloring
        #[arg(long)]
        face_correct: bool,
        /// Light each face by its own geometric normal
        #[arg(long)]
        face_normals: bool,
    },
    /// Run the frame loop headless over a scripted drag
    Simulate {
        /// Press position, "X,Y"
        #[arg(long, value_parser = parse_point, default_value = "100,100")]
        from: DVec2,
        /// Release position, "X,Y"
        #[arg(long, value_parser = parse_point, default_value = "110,130")]
        to: DVec2,
        /// Pause between frames in milliseconds
        #[arg(long, default_value = "10")]
        frame_ms: u64,
        /// Print the last frame
        #[arg(long)]
        dump: bool,
    },
}

fn parse_point(s: &str) -> Result<DVec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x {x:?}: {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y {y:?}: {e}"))?;
    Ok(DVec2::new(x, y))
}

fn scheme(face_correct: bool) -> ColorScheme {
    if face_correct {
        ColorScheme::FaceCorrect
    } else {
        ColorScheme::Positional
    }
}

fn lighting(face_normals: bool) -> Lighting {
    let normals = if face_normals {
        NormalMode::PerFace
    } else {
        NormalMode::Constant
    };
    Lighting::default().with_normals(normals)
}

/// Press, move, release, quit: one batch per frame.
fn drag_script(from: DVec2, to: DVec2) -> ScriptedEvents {
    ScriptedEvents::new([
        vec![InputEvent::ButtonPressed(from)],
        vec![InputEvent::CursorMoved(to)],
        vec![InputEvent::ButtonReleased],
        vec![InputEvent::Quit],
    ])
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            let cube = CubeAssembly::new();
            println!("rubik-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", rubik_render::crate_info());
            println!("cubelets: {} (spacing {SPACING})", cube.len());
            println!("face colors:");
            for (face, color) in FACE_COLORS {
                println!("  {} {:?} {}", face.letter(), face, color);
            }
        }
        Commands::Scene {
            json,
            face_correct,
            face_normals,
        } => {
            let scene = CubeScene::new(&CubeAssembly::new(), scheme(face_correct));
            if json {
                println!("{}", serde_json::to_string_pretty(&scene)?);
            } else {
                let mut frame_loop = FrameLoop::new(scene, ViewParams::default())
                    .with_lighting(lighting(face_normals));
                let mut renderer = DebugTextRenderer::new();
                if let Some(text) = frame_loop.draw(&mut renderer) {
                    print!("{text}");
                }
            }
        }
        Commands::Simulate {
            from,
            to,
            frame_ms,
            dump,
        } => {
            let scene = CubeScene::new(&CubeAssembly::new(), ColorScheme::Positional);
            let mut frame_loop = FrameLoop::new(scene, ViewParams::default())
                .with_frame_interval(Duration::from_millis(frame_ms));
            let mut renderer = DebugTextRenderer::new();
            let mut events = drag_script(from, to);

            tracing::info!("simulating drag from {from} to {to}");
            let last = frame_loop.run(&mut renderer, &mut events);

            println!("frames drawn: {}", frame_loop.frames_drawn());
            println!("final rotation: {}", frame_loop.rotation());
            if dump {
                if let Some(text) = last {
                    print!("{text}");
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rubik_common::Rotation;

    #[test]
    fn parse_point_accepts_pairs() {
        assert_eq!(parse_point("110,130"), Ok(DVec2::new(110.0, 130.0)));
        assert_eq!(parse_point(" -4.5 , 2 "), Ok(DVec2::new(-4.5, 2.0)));
        assert!(parse_point("12").is_err());
        assert!(parse_point("a,b").is_err());
    }

    #[test]
    fn scripted_drag_rotates() {
        let scene = CubeScene::new(&CubeAssembly::new(), ColorScheme::Positional);
        let mut frame_loop =
            FrameLoop::new(scene, ViewParams::default()).with_frame_interval(Duration::ZERO);
        let mut renderer = DebugTextRenderer::new();
        let mut events = drag_script(DVec2::new(100.0, 100.0), DVec2::new(110.0, 130.0));

        let last = frame_loop.run(&mut renderer, &mut events);

        assert_eq!(frame_loop.frames_drawn(), 4);
        assert_eq!(frame_loop.rotation(), Rotation::new(15.0, 5.0));
        assert!(last.unwrap().contains("x=15.0deg y=5.0deg"));
    }

    #[test]
    fn scene_text_reports_normal_mode() {
        let scene = CubeScene::new(&CubeAssembly::new(), scheme(false));
        let mut frame_loop =
            FrameLoop::new(scene, ViewParams::default()).with_lighting(lighting(true));
        let text = frame_loop.draw(&mut DebugTextRenderer::new()).unwrap();
        assert!(text.contains("normals=PerFace"));
    }

    #[test]
    fn cli_parses_simulate_defaults() {
        let cli = Cli::try_parse_from(["rubik-cli", "simulate"]).unwrap();
        match cli.command {
            Commands::Simulate { from, to, frame_ms, dump } => {
                assert_eq!(from, DVec2::new(100.0, 100.0));
                assert_eq!(to, DVec2::new(110.0, 130.0));
                assert_eq!(frame_ms, 10);
                assert!(!dump);
            }
            _ => panic!("expected simulate"),
        }
    }
}
