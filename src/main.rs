// vim: set ai et ts=4 sts=4 sw=4:
use std::fs;
use std::io;
use std::process;
use clap::{App, Arg, ArgMatches};
use log::LevelFilter;

use crossword::{Crossword, Solver, Error};
use crossword::util::is_a_tty;

fn setup_logging(verbosity: u64) -> Result<(), log::SetLoggerError> {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{}][{}] {}", record.level(), record.target(), message))
        })
        .level(level)
        .chain(io::stderr())
        .apply()
}

fn run(args: &ArgMatches) -> Result<(), Error> {
    let structure = match args.value_of("structure") {
        Some(path) => path,
        None       => return Err(Error::Structure("no structure file given".to_string())),
    };
    let crossword = Crossword::from_files(structure, args.value_of("words"))?;

    let mut solver = Solver::new(&crossword);
    let assignment = match solver.solve() {
        Some(x) => x,
        None    => {
            println!("No solution.");
            return Ok(());
        }
    };

    let emit_color = !args.is_present("no-color") && is_a_tty(io::stdout());
    print!("{}", crossword.render(&assignment, emit_color));

    if let Some(output) = args.value_of("output") {
        fs::write(output, crossword.render(&assignment, false))?;
        log::info!("wrote solution to {}", output);
    }
    Ok(())
}

fn main() {
    let args = App::new("crossword")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Fills a crossword grid with words from a word list")
        .arg(Arg::with_name("structure")
                 .help("Grid structure: one line per row, '_' for fillable squares (or a .yaml puzzle)")
                 .required(true)
                 .index(1))
        .arg(Arg::with_name("words")
                 .help("Word list, one word per line")
                 .index(2))
        .arg(Arg::with_name("output")
                 .short("o")
                 .long("output")
                 .takes_value(true)
                 .help("Also write the filled grid to this file"))
        .arg(Arg::with_name("verbose")
                 .short("v")
                 .long("verbose")
                 .multiple(true)
                 .help("Log more detail (repeat for debug and trace output)"))
        .arg(Arg::with_name("no-color")
                 .long("no-color")
                 .help("Never colour the output"))
        .get_matches();

    if let Err(e) = setup_logging(args.occurrences_of("verbose")) {
        eprintln!("could not set up logging: {}", e);
    }

    if let Err(e) = run(&args) {
        log::error!("{}", e);
        process::exit(1);
    }
}
