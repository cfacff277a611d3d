use MechGraph::Utils::load_from_file::LoadData;
use MechGraph::Utils::logger::init_logger;
use MechGraph::errors::MechGraphResult;
use MechGraph::settings::{DEFAULT_CONFIG_FILE, MechGraphSettings};
use log::{error, warn};
use std::env;
use std::process::ExitCode;

fn show_usage() {
    println!(
        "\x1b[34m\n MechGraph: lowest-barrier reaction pathways in Chemkin mechanisms\n\x1b[0m"
    );
    println!("\x1b[33musage: MechGraph <mechanism.inp | graph.json> <target> <start> [start...]\x1b[0m");
    println!(
        "\x1b[36msettings are read from '{}' if it exists\x1b[0m",
        DEFAULT_CONFIG_FILE
    );
}

fn run(file: &str, target: &str, start: &[String]) -> MechGraphResult<()> {
    let settings = MechGraphSettings::load_or_default(DEFAULT_CONFIG_FILE);
    init_logger(&settings)?;
    let search = LoadData::new(file.to_string()).load_search_graph(&settings)?;
    for label in start.iter().map(String::as_str).chain([target]) {
        if let Err(e) = search.graph().require_node(label) {
            warn!("{}", e);
        }
    }
    let result = search.shortest_path(start.to_vec(), target);
    result.pretty_print();
    Ok(())
}

pub fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    if args.len() < 4 {
        show_usage();
        return ExitCode::FAILURE;
    }
    match run(&args[1], &args[2], &args[3..]) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
