use std::fs::File;
use std::io::{self, Write, stdout};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{cursor, event, execute, terminal};
use env_logger::{Builder, Env, Target};
use log::{info, warn};

use flappy_term::audio::{Audio, Silent, Speaker};
use flappy_term::render::PixelBuf;
use flappy_term::{Flow, Session, config, input};

#[derive(Parser, Debug)]
#[command(name = "flappy-term")]
#[command(about = "Flappy Bird in your terminal. Click or press space to flap.", long_about = None)]
struct Args {
    /// Seed for pipe placement (random when omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Disable all sound
    #[arg(long, default_value_t = false)]
    mute: bool,

    /// Background music volume, 0.0 to 1.0
    #[arg(long, default_value_t = 0.0)]
    music_volume: f32,

    /// Write logs to this file (filter with FLAPPY_LOG, default "info")
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let mut audio = open_audio(&args);
    audio.set_music_volume(args.music_volume.clamp(0.0, 1.0));
    audio.start_music();

    let seed = args.seed.unwrap_or_else(rand::random);
    info!("starting with seed {seed}");

    let mut out = stdout();
    enter(&mut out).context("failed to set up the terminal")?;
    let result = run(&mut out, Session::new(seed), audio.as_mut());
    // Always try to restore terminal state.
    let restored = leave(&mut out).context("failed to restore the terminal");
    result.and(restored)
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let env = Env::new().filter("FLAPPY_LOG");
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            Builder::from_env(env.default_filter_or("info"))
                .target(Target::Pipe(Box::new(file)))
                .init();
        }
        // Stderr shares the screen with the game, so stay quiet unless asked.
        None => Builder::from_env(env.default_filter_or("off")).init(),
    }
    Ok(())
}

fn open_audio(args: &Args) -> Box<dyn Audio> {
    if args.mute {
        return Box::new(Silent);
    }
    match Speaker::new() {
        Ok(speaker) => Box::new(speaker),
        Err(e) => {
            warn!("{e}; continuing without sound");
            Box::new(Silent)
        }
    }
}

fn enter(out: &mut impl Write) -> io::Result<()> {
    terminal::enable_raw_mode()?;
    execute!(
        out,
        terminal::EnterAlternateScreen,
        terminal::SetTitle("Flappy Bird"),
        cursor::Hide,
        terminal::DisableLineWrap,
        event::EnableMouseCapture,
    )
}

fn leave(out: &mut impl Write) -> io::Result<()> {
    execute!(
        out,
        event::DisableMouseCapture,
        terminal::LeaveAlternateScreen,
        cursor::Show,
        terminal::EnableLineWrap,
    )?;
    terminal::disable_raw_mode()
}

fn run(out: &mut impl Write, mut session: Session, audio: &mut dyn Audio) -> Result<()> {
    let (mut cols, mut rows) = terminal::size()?;
    let mut buf = PixelBuf::for_terminal(cols, rows);
    let frame_dur = config::tick_duration();

    loop {
        let frame_start = Instant::now();

        // Input
        let polled = input::drain(cols, rows)?;
        if let Some((c, r)) = polled.resized {
            (cols, rows) = (c, r);
            buf.resize(c as usize, r as usize * 2);
        }

        // Update
        if session.tick(&polled.events, audio) == Flow::Quit {
            info!("quit after {} ticks", session.ticks());
            return Ok(());
        }

        // Render
        buf.draw_scene(&session.visuals());
        buf.render(out)?;

        // Frame pacing
        let elapsed = frame_start.elapsed();
        if elapsed < frame_dur {
            std::thread::sleep(frame_dur - elapsed);
        }
    }
}
