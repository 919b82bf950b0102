use clap::Parser;
use console::Term;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tetris_engine::{Game, Scheduler, SchedulerConfig, SessionReport, BOARD_HEIGHT};
use tetris_term::{wait_for_restart, AnsiTermStyle, PlainTermStyle, TermRenderer, TermStyle};

/// tetris-term - falling-block puzzle game in the terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Milliseconds between two gravity drops
    #[arg(short, long, default_value_t = 500)]
    gravity_ms: u64,

    /// Milliseconds between two gravity deadline checks
    #[arg(short, long, default_value_t = 50)]
    poll_ms: u64,

    /// Draw without ANSI colours
    #[arg(long)]
    plain: bool,

    /// Seed for a reproducible piece sequence
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log level, logs are written to stderr
    #[arg(short, long, default_value = "warn")]
    log_level: tracing::Level,
}

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(args.log_level)
        .init();

    let config = SchedulerConfig::new()
        .with_gravity_interval_ms(args.gravity_ms)
        .with_gravity_poll_ms(args.poll_ms);
    config.validate()?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    // Keyboard reads on its own terminal handle, rendering on another
    let commands = tetris_term::spawn_key_reader(Term::stdout())?;
    let render_term = Term::stdout();
    render_term.hide_cursor()?;

    let result = if args.plain {
        play(&render_term, PlainTermStyle, &config, &mut rng, &commands).await
    } else {
        play(&render_term, AnsiTermStyle, &config, &mut rng, &commands).await
    };

    render_term.move_cursor_to(0, BOARD_HEIGHT + 3)?;
    render_term.show_cursor()?;
    if let Ok(Some(report)) = &result {
        println!("{}", report);
    }
    result.map(|_| ())
}

/// Play sessions until the player declines a restart; returns the last report
async fn play<S>(
    term: &Term,
    style: S,
    config: &SchedulerConfig,
    rng: &mut StdRng,
    commands: &flume::Receiver<tetris_engine::Command>,
) -> anyhow::Result<Option<SessionReport>>
where
    S: TermStyle + Clone + Send + 'static,
{
    let mut last_report = None;
    loop {
        term.clear_screen()?;
        let game = Game::new(StdRng::from_rng(rng));
        let renderer = TermRenderer::new(term.clone(), style.clone());
        let scheduler = Scheduler::new(config.clone(), game, renderer)?;

        let report = scheduler.run(commands.clone()).await?;
        tracing::info!("Game over: {}", report);
        last_report = Some(report);

        if !wait_for_restart(commands).await {
            break;
        }
    }
    Ok(last_report)
}
