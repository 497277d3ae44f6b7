use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};
use vl_app::{load_scenario, AppError, AppResult, LabService, RuleExplainer, Scenario};
use vl_circuit::CircuitOutputs;
use vl_core::config::{BulbType, Connection, LedColor};
use vl_core::constants::TICK_PERIOD_SECONDS;
use vl_core::Configuration;
use vl_quiz::{builtin_pool, MistakeStore, QuizRound, DEFAULT_ROUND_SIZE};
use vl_sim::DrainScheduler;

#[derive(Parser)]
#[command(name = "vl-cli")]
#[command(about = "VoltLab CLI - Educational electrical circuit simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a circuit and print its readouts
    Eval {
        #[command(flatten)]
        circuit: CircuitArgs,
        /// Emit the full state as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run the battery drain process for a while
    Run {
        #[command(flatten)]
        circuit: CircuitArgs,
        /// Accelerated seconds to simulate
        #[arg(long, default_value_t = 60)]
        seconds: u64,
        /// Drive the drain from a wall-clock timer instead of stepping
        #[arg(long)]
        real_time: bool,
    },
    /// Explain the current circuit in plain words
    Explain {
        #[command(flatten)]
        circuit: CircuitArgs,
    },
    /// Show the formula card with the circuit's live numbers
    Formulas {
        #[command(flatten)]
        circuit: CircuitArgs,
    },
    /// Take a quiz round; misses land in the mistake book
    Quiz {
        /// Questions per round
        #[arg(long, default_value_t = DEFAULT_ROUND_SIZE)]
        count: usize,
        /// Mistake book file
        #[arg(long, default_value = "mistake_book.json")]
        book: PathBuf,
        /// Fix the shuffle for a reproducible round
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Review or edit the mistake book
    Mistakes {
        /// Mistake book file
        #[arg(long, default_value = "mistake_book.json")]
        book: PathBuf,
        #[command(subcommand)]
        command: MistakeCommands,
    },
}

#[derive(Subcommand)]
enum MistakeCommands {
    /// List every recorded miss
    List,
    /// Remove one question after you have mastered it
    Resolve {
        /// Question id (shown by `mistakes list`)
        id: u32,
    },
    /// Empty the book
    Clear,
}

/// Circuit setup shared by the read-only commands. A scenario file is the
/// base when given; flags override it. Without a scenario the switch starts
/// closed, since an open circuit has nothing to show.
#[derive(Args)]
struct CircuitArgs {
    /// Path to a scenario YAML file
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// Number of battery cells (1-10)
    #[arg(long)]
    batteries: Option<u8>,
    /// Number of bulbs (1-10)
    #[arg(long)]
    bulbs: Option<u8>,
    /// Wire the batteries in parallel
    #[arg(long)]
    parallel_batteries: bool,
    /// Wire the bulbs in parallel
    #[arg(long)]
    parallel_bulbs: bool,
    /// Use LED bulbs instead of filament bulbs
    #[arg(long)]
    led: bool,
    /// LED color: red, yellow, green, blue or white
    #[arg(long)]
    led_color: Option<String>,
    /// LED forward voltage (1.8, 2.2 or 3.2)
    #[arg(long)]
    forward_voltage: Option<f64>,
    /// Enable the transformer with this output ratio (0.5, 1, 1.5 or 2)
    #[arg(long)]
    transformer: Option<f64>,
    /// Leave the switch open
    #[arg(long)]
    open: bool,
    /// Starting battery charge percent
    #[arg(long)]
    charge: Option<f64>,
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Eval { circuit, json } => cmd_eval(&circuit, json),
        Commands::Run {
            circuit,
            seconds,
            real_time,
        } => {
            if real_time {
                cmd_run_real_time(&circuit, seconds)
            } else {
                cmd_run(&circuit, seconds)
            }
        }
        Commands::Explain { circuit } => cmd_explain(&circuit),
        Commands::Formulas { circuit } => cmd_formulas(&circuit),
        Commands::Quiz { count, book, seed } => cmd_quiz(count, &book, seed),
        Commands::Mistakes { book, command } => match command {
            MistakeCommands::List => cmd_mistakes_list(&book),
            MistakeCommands::Resolve { id } => cmd_mistakes_resolve(&book, id),
            MistakeCommands::Clear => cmd_mistakes_clear(&book),
        },
    }
}

fn build_service(args: &CircuitArgs) -> AppResult<LabService> {
    let mut scenario = match &args.scenario {
        Some(path) => load_scenario(path)?,
        None => {
            let mut scenario = Scenario::default();
            scenario.config.is_open = false;
            scenario
        }
    };

    let config = &mut scenario.config;
    if let Some(n) = args.batteries {
        config.battery_count = n;
    }
    if let Some(n) = args.bulbs {
        config.bulb_count = n;
    }
    if args.parallel_batteries {
        config.battery_connection = Connection::Parallel;
    }
    if args.parallel_bulbs {
        config.bulb_connection = Connection::Parallel;
    }
    if args.led || args.led_color.is_some() {
        config.bulb_type = BulbType::Led;
    }
    if let Some(color) = &args.led_color {
        config.led_color = parse_led_color(color)?;
        config.forward_voltage_v = config.led_color.default_forward_voltage();
    }
    if let Some(vf) = args.forward_voltage {
        config.forward_voltage_v = vf;
    }
    if let Some(ratio) = args.transformer {
        config.transformer_enabled = true;
        config.transformer_ratio = ratio;
    }
    if args.open {
        config.is_open = true;
    }
    if let Some(charge) = args.charge {
        scenario.charge_percent = charge;
    }

    scenario.validate()?;
    LabService::from_scenario(&scenario)
}

fn parse_led_color(name: &str) -> AppResult<LedColor> {
    match name.to_ascii_lowercase().as_str() {
        "red" => Ok(LedColor::Red),
        "yellow" => Ok(LedColor::Yellow),
        "green" => Ok(LedColor::Green),
        "blue" => Ok(LedColor::Blue),
        "white" => Ok(LedColor::White),
        other => Err(AppError::Scenario(format!(
            "unknown LED color '{}' (expected red, yellow, green, blue or white)",
            other
        ))),
    }
}

#[derive(Serialize)]
struct EvalReport<'a> {
    config: &'a Configuration,
    charge_percent: f64,
    outputs: &'a CircuitOutputs,
    power_factor: f64,
}

fn cmd_eval(args: &CircuitArgs, json: bool) -> AppResult<()> {
    let lab = build_service(args)?;

    if json {
        let report = EvalReport {
            config: lab.config(),
            charge_percent: lab.charge_percent(),
            outputs: lab.outputs(),
            power_factor: lab.power_factor(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_state(&lab);
    println!("\nTip: {}", lab.observation_tip());
    Ok(())
}

fn print_state(lab: &LabService) {
    let config = lab.config();
    let out = lab.outputs();
    let bulb_kind = match config.bulb_type {
        BulbType::Regular => "filament",
        BulbType::Led => "LED",
    };

    println!("Circuit state:");
    println!(
        "  Switch:       {}",
        if config.is_open { "open" } else { "closed" }
    );
    println!(
        "  Batteries:    {} x {}",
        config.battery_count,
        connection_label(config.battery_connection)
    );
    println!(
        "  Bulbs:        {} x {} ({})",
        config.bulb_count,
        connection_label(config.bulb_connection),
        bulb_kind
    );
    if config.transformer_enabled {
        println!("  Transformer:  {:.1}x", config.transformer_ratio);
    }
    if config.bulb_type == BulbType::Led {
        println!(
            "  LED:          {:?}, Vf = {:.1} V",
            config.led_color, config.forward_voltage_v
        );
    }
    println!("  Voltage:      {:.2} V", out.total_voltage_v);
    println!("  Per bulb:     {:.2} V", out.v_per_bulb_v);
    println!("  Draw:         {:.1} mA", out.total_current_ma);
    println!("  Brightness:   {:.1} %", out.brightness_pct);
    println!("  Charge:       {:.1} %", lab.charge_percent());
    println!("  Energy use:   {:.1}x baseline", lab.power_factor());
    if out.expected_minutes.is_finite() && out.expected_minutes > 0.0 {
        println!("  Runtime left: {:.0} min", out.expected_minutes);
    }
    if out.is_burned_out {
        println!("  ! BURNED OUT");
    }
    if out.is_drained {
        println!("  ! DRAINED");
    }
}

fn connection_label(connection: Connection) -> &'static str {
    match connection {
        Connection::Series => "series",
        Connection::Parallel => "parallel",
    }
}

fn cmd_run(args: &CircuitArgs, seconds: u64) -> AppResult<()> {
    let mut lab = build_service(args)?;
    println!(
        "Simulating {} accelerated seconds (charge {:.1}%)...",
        seconds,
        lab.charge_percent()
    );

    let mut elapsed = 0;
    for _ in 0..seconds {
        if !lab.tick() {
            break;
        }
        elapsed += 1;
        if elapsed % 10 == 0 || elapsed == seconds {
            println!(
                "  t={:>4}s  charge={:>6.2}%  brightness={:>5.1}%  draw={:>6.1} mA  left={:>5.0} min",
                elapsed,
                lab.charge_percent(),
                lab.outputs().brightness_pct,
                lab.outputs().total_current_ma,
                lab.outputs().expected_minutes
            );
        }
    }

    if elapsed < seconds {
        println!("✓ Drain went idle after {} s", elapsed);
    } else {
        println!("✓ Simulated {} s", elapsed);
    }
    print_state(&lab);
    println!("\nTip: {}", lab.observation_tip());
    Ok(())
}

fn cmd_run_real_time(args: &CircuitArgs, seconds: u64) -> AppResult<()> {
    let mut lab = build_service(args)?;
    println!(
        "Running in real time for up to {} s (Ctrl-C to stop)...",
        seconds
    );

    let (tx, rx) = mpsc::channel();
    let mut scheduler = DrainScheduler::new(Duration::from_secs_f64(TICK_PERIOD_SECONDS));
    scheduler.rearm(lab.drain_rate(), tx);

    let started = Instant::now();
    while started.elapsed() < Duration::from_secs(seconds) {
        match rx.recv_timeout(Duration::from_millis(200)) {
            Ok(tick) => {
                lab.session_mut().apply_drain(tick.percent);
                print!(
                    "\r  charge={:>6.2}%  brightness={:>5.1}%  draw={:>6.1} mA   ",
                    lab.charge_percent(),
                    lab.outputs().brightness_pct,
                    lab.outputs().total_current_ma
                );
                let _ = io::stdout().flush();
                if lab.drain_rate().is_none() {
                    break;
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }
    scheduler.disarm();
    println!();

    print_state(&lab);
    println!("\nTip: {}", lab.observation_tip());
    Ok(())
}

fn cmd_explain(args: &CircuitArgs) -> AppResult<()> {
    let mut lab = build_service(args)?;
    print_state(&lab);
    let text = lab.ask_explanation(&RuleExplainer).to_string();
    println!("\n{}", text);
    Ok(())
}

fn cmd_formulas(args: &CircuitArgs) -> AppResult<()> {
    let lab = build_service(args)?;
    let config = lab.config();
    let out = lab.outputs();

    let resistance = match config.bulb_connection {
        Connection::Series => 15.0 * config.bulb_count as f64,
        Connection::Parallel => 15.0 / config.bulb_count as f64,
    };
    let watts = out.total_voltage_v * (out.total_current_ma / 1000.0);

    println!("Formula card:");
    println!("\nOhm's law: I = V / R");
    println!(
        "  {:.1} V / {:.1} Ω = {:.0} mA",
        out.total_voltage_v, resistance, out.total_current_ma
    );
    println!("  Higher voltage or lower resistance means more current.");

    println!("\nPower: P = V × I");
    println!(
        "  {:.1} V × {:.3} A = {:.2} W",
        out.total_voltage_v,
        out.total_current_ma / 1000.0,
        watts
    );
    println!("  Power is how fast energy is spent; it sets the brightness.");

    println!("\nSource side:");
    match config.battery_connection {
        Connection::Series => println!(
            "  1.5 V × {} cells = {:.1} V",
            config.battery_count,
            1.5 * config.battery_count as f64
        ),
        Connection::Parallel => {
            println!("  1.5 V (parallel cells hold the voltage, they last longer)")
        }
    }

    println!("\nLoad side:");
    match config.bulb_connection {
        Connection::Series => println!(
            "  15 Ω × {} bulbs = {:.1} Ω",
            config.bulb_count, resistance
        ),
        Connection::Parallel => println!(
            "  15 Ω / {} bulbs = {:.1} Ω",
            config.bulb_count, resistance
        ),
    }

    println!("\nWhy does a 2x transformer drain 4x faster?");
    println!("  P = V² / R. Double the voltage and the square makes it four");
    println!("  times the power. Boosted voltage is paid for exponentially.");
    Ok(())
}

fn cmd_quiz(count: usize, book_path: &std::path::Path, seed: Option<u64>) -> AppResult<()> {
    let pool = builtin_pool();
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut round = QuizRound::draw(&pool, count, &mut rng)?;

    let store = MistakeStore::new(book_path);
    let mut book = store.load()?;

    println!("Quiz time! {} questions. Good luck.", round.len());
    loop {
        let Some(question) = round.current_question().cloned() else {
            break;
        };
        println!(
            "\n{}/{} [{}] {}",
            round.position() + 1,
            round.len(),
            question.topic,
            question.prompt
        );
        for (i, option) in question.options.iter().enumerate() {
            println!("  {}) {}", i + 1, option);
        }

        let choice = prompt_choice(question.options.len())?;
        let outcome = round.answer(choice)?;
        if outcome.correct {
            println!("✓ Correct! {}", outcome.explanation);
        } else {
            println!(
                "✗ Not quite. The answer is {}) {}.",
                outcome.correct_answer + 1,
                question.options[outcome.correct_answer]
            );
            println!("  {}", outcome.explanation);
            book.record(&outcome.question);
        }

        if !round.advance() {
            break;
        }
    }

    let summary = round.summary();
    println!("\nScore: {}/{}", summary.score, summary.total);
    println!("{}", summary.verdict);

    store.save(&book)?;
    if !book.is_empty() {
        println!(
            "Mistake book: {} entries ({})",
            book.len(),
            store.path().display()
        );
    }
    Ok(())
}

fn prompt_choice(options: usize) -> AppResult<usize> {
    let stdin = io::stdin();
    loop {
        print!("Your answer (1-{}): ", options);
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed").into());
        }
        match line.trim().parse::<usize>() {
            Ok(n) if (1..=options).contains(&n) => return Ok(n - 1),
            _ => println!("Please enter a number between 1 and {}.", options),
        }
    }
}

fn cmd_mistakes_list(book_path: &std::path::Path) -> AppResult<()> {
    let store = MistakeStore::new(book_path);
    let book = store.load()?;

    if book.is_empty() {
        println!("The mistake book is empty. Nice!");
        return Ok(());
    }

    println!("Mistake book ({} entries):", book.len());
    for entry in book.entries() {
        println!(
            "  #{:<3} [{}] {} (missed {}x, first {})",
            entry.question.id,
            entry.question.topic,
            entry.question.prompt,
            entry.times_missed,
            entry.first_missed_at
        );
        println!(
            "       Answer: {}",
            entry.question.options[entry.question.answer]
        );
    }
    Ok(())
}

fn cmd_mistakes_resolve(book_path: &std::path::Path, id: u32) -> AppResult<()> {
    let store = MistakeStore::new(book_path);
    let mut book = store.load()?;

    if book.resolve(id) {
        store.save(&book)?;
        println!("✓ Question #{} mastered and removed", id);
    } else {
        println!("No entry with id {} in the book", id);
    }
    Ok(())
}

fn cmd_mistakes_clear(book_path: &std::path::Path) -> AppResult<()> {
    let store = MistakeStore::new(book_path);
    let mut book = store.load()?;
    let removed = book.len();
    book.clear();
    store.save(&book)?;
    println!("✓ Cleared {} entries", removed);
    Ok(())
}
