use mealy::{prelude::*, random::generate_random_mealy_with};

use tracing::{debug, info, trace};
use tracing_subscriber::{filter, prelude::*};

use clap::{value_parser, Arg, ArgMatches, Command};

fn cli() -> clap::Command {
    let seed = Arg::new("seed")
        .long("seed")
        .value_parser(value_parser!(u64))
        .help("seed for the random number generator");

    Command::new("mealy-cmp")
    .about("Generate Mealy machines and check them for equivalence")
    .subcommand_required(true)
    .arg(
        Arg::new("verbosity")
        .short('v')
        .long("verbosity")
        .num_args(0..=1)
        .require_equals(true)
        .value_parser(["info", "debug", "trace"])
        .default_missing_value("info")
    )
    .subcommand(
        Command::new("generate")
        .about("draws a random machine over the inputs {a, b} and the outputs {0, 1}")
        .arg(Arg::new("prefix").long("prefix").default_value("q"))
        .arg(
            Arg::new("size")
            .long("size")
            .value_parser(value_parser!(usize))
            .default_value("3")
        )
        .arg(seed.clone())
        .arg(
            Arg::new("format")
            .long("format")
            .value_parser(["table", "dot", "mermaid", "json", "png"])
            .default_value("table")
        )
        .arg(
            Arg::new("output")
            .short('o')
            .long("output")
            .required_if_eq("format", "png")
            .help("file the rendered image is written to, only used with --format=png")
        )
    )
    .subcommand(
        Command::new("compare")
        .about("compares two machines, which are either read from JSON files or drawn at random")
        .arg(Arg::new("left").long("left").requires("right"))
        .arg(Arg::new("right").long("right").requires("left"))
        .arg(
            Arg::new("left-size")
            .long("left-size")
            .value_parser(value_parser!(usize))
            .default_value("3")
            .conflicts_with("left")
        )
        .arg(
            Arg::new("right-size")
            .long("right-size")
            .value_parser(value_parser!(usize))
            .default_value("2")
            .conflicts_with("right")
        )
        .arg(seed)
    )
}

fn setup_logging(matches: &ArgMatches) {
    let level = match matches
        .try_get_one::<String>("verbosity")
        .ok()
        .flatten()
        .map(|m| m.as_str())
    {
        Some("trace") => filter::LevelFilter::TRACE,
        Some("debug") => filter::LevelFilter::DEBUG,
        Some("info") => filter::LevelFilter::INFO,
        _ => filter::LevelFilter::WARN,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

fn rng(matches: &ArgMatches) -> fastrand::Rng {
    match matches.get_one::<u64>("seed") {
        Some(seed) => {
            debug!("seeding random number generator with {seed}");
            fastrand::Rng::with_seed(*seed)
        }
        None => fastrand::Rng::new(),
    }
}

fn read_machine(path: &str) -> Result<Machine, Box<dyn std::error::Error>> {
    debug!("reading machine from {path}");
    let json = std::fs::read_to_string(path)?;
    Ok(Machine::from_json(&json)?)
}

fn format_word(word: &[Symbol]) -> String {
    if word.is_empty() {
        "ε".to_string()
    } else {
        word.iter().map(Symbol::label).collect::<Vec<_>>().join(" ")
    }
}

fn compare(left: &Machine, right: &Machine) -> Result<(), Box<dyn std::error::Error>> {
    println!("First machine:\n{}", left.transition_table(true));
    println!("Second machine:\n{}", right.transition_table(true));

    let start = std::time::Instant::now();
    let product = left.product(right)?;
    println!("Product:\n{}", product.transition_table(true));
    let trimmed = product.trim()?;
    println!("Trimmed product:\n{}", trimmed.transition_table(true));
    info!(
        "product and trimming took {}µs",
        start.elapsed().as_micros()
    );

    match left.separating_word(right)? {
        None => println!("The machines are equivalent."),
        Some(word) => {
            println!("The machines are not equivalent.");
            println!(
                "On input {} the first machine emits {:?} and the second emits {:?}.",
                format_word(&word),
                left.output_of(&word)?.map(|o| o.to_string()),
                right.output_of(&word)?.map(|o| o.to_string()),
            );
        }
    }
    Ok(())
}

pub fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = cli().get_matches();

    setup_logging(&matches);

    match matches.subcommand() {
        Some(("generate", sub_matches)) => {
            let prefix = sub_matches
                .get_one::<String>("prefix")
                .map_or("q", |p| p.as_str());
            let size = sub_matches.get_one::<usize>("size").copied().unwrap_or(3);
            let machine = generate_random_mealy_with(&mut rng(sub_matches), prefix, size);
            debug!("generated machine with {} states", machine.size());

            match sub_matches.get_one::<String>("format").map(|f| f.as_str()) {
                Some("dot") => println!("{}", machine.dot_representation()),
                Some("mermaid") => println!("{}", machine.mermaid_representation()),
                Some("json") => println!("{}", machine.to_json_pretty()?),
                Some("png") => {
                    let output = sub_matches
                        .get_one::<String>("output")
                        .ok_or("--output is required for --format=png")?;
                    machine.render_to_file_name(output)?;
                    info!("rendered machine to {output}");
                }
                _ => println!("{}", machine.transition_table(true)),
            }
        }
        Some(("compare", sub_matches)) => {
            let (left, right) = match (
                sub_matches.get_one::<String>("left"),
                sub_matches.get_one::<String>("right"),
            ) {
                (Some(left), Some(right)) => (read_machine(left)?, read_machine(right)?),
                _ => {
                    let mut rng = rng(sub_matches);
                    let left_size = sub_matches.get_one::<usize>("left-size").copied().unwrap_or(3);
                    let right_size = sub_matches.get_one::<usize>("right-size").copied().unwrap_or(2);
                    (
                        generate_random_mealy_with(&mut rng, "q", left_size),
                        generate_random_mealy_with(&mut rng, "S", right_size),
                    )
                }
            };
            compare(&left, &right)?;
        }
        _ => unreachable!(),
    }
    Ok(())
}
