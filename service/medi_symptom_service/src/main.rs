use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use medi_symptom_service::report::render_text;
use medi_symptom_service::{router, CheckError, SymptomChecker, SymptomRequest, DEFAULT_TOPK};

#[derive(Debug, Parser)]
#[command(
    name = "medi-symptom",
    version,
    about = "Symptom-to-disease classifier with severity triage",
    long_about = "medi-symptom ranks likely diseases for a list of symptoms using a trained\n\
        MLP pipeline and assigns a Red/Amber/Green triage level from symptom severity.\n\n\
        EXAMPLES:\n\
        \n  medi-symptom serve --port 8001                     Run the HTTP API\n\
        \n  medi-symptom predict --symptoms 'itching, skin rash'  Predict from the shell\n\
        \n  medi-symptom --artifacts /srv/medi symptoms          List known symptoms"
)]
struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Directory holding data/processed and models
    #[arg(long, env = "MEDI_SYMPTOM_ARTIFACTS", default_value = ".", global = true)]
    artifacts: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the prediction API over HTTP
    Serve(ServeArgs),
    /// Predict diseases for a comma-separated symptom list
    Predict(PredictArgs),
    /// List the symptom vocabulary
    Symptoms,
    /// List the disease labels
    Labels,
}

#[derive(Debug, Args)]
struct ServeArgs {
    #[arg(long, env = "MEDI_SYMPTOM_HOST", default_value = "0.0.0.0")]
    host: String,

    #[arg(long, env = "MEDI_SYMPTOM_PORT", default_value_t = 8001)]
    port: u16,
}

#[derive(Debug, Args)]
struct PredictArgs {
    /// Comma-separated symptoms, e.g. 'itching, skin_rash, nodal_skin_eruptions'
    #[arg(long)]
    symptoms: String,

    #[arg(long, default_value_t = DEFAULT_TOPK)]
    topk: usize,

    /// Print the JSON response body instead of text
    #[arg(long)]
    json: bool,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    // RUST_LOG, when set, overrides the -v level
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

fn load_checker(cli: &Cli) -> Result<SymptomChecker, i32> {
    SymptomChecker::load(&cli.artifacts).map_err(|e| {
        eprintln!(
            "error: failed to load artifacts from {}: {e}",
            cli.artifacts.display()
        );
        2
    })
}

fn run_serve(checker: SymptomChecker, args: &ServeArgs) -> i32 {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to start runtime: {e}");
            return 2;
        }
    };

    let app = router(Arc::new(checker));
    let result: std::io::Result<()> = runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind((args.host.as_str(), args.port)).await?;
        println!(
            "medi-symptom listening on http://{}",
            listener.local_addr()?
        );
        axum::serve(listener, app).await
    });

    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("error: server stopped: {e}");
            2
        }
    }
}

fn run_predict(checker: &SymptomChecker, args: &PredictArgs) -> i32 {
    let request = SymptomRequest::from_list(&args.symptoms, args.topk);
    match checker.check(&request) {
        Ok(response) if args.json => match serde_json::to_string_pretty(&response) {
            Ok(s) => {
                println!("{s}");
                0
            }
            Err(e) => {
                eprintln!("error: {e}");
                2
            }
        },
        Ok(response) => {
            print!("{}", render_text(&response));
            0
        }
        Err(CheckError::NoKnownSymptoms { unknown }) => {
            eprintln!(
                "error: none of the symptoms are known: {}",
                unknown.join(", ")
            );
            1
        }
        Err(e @ CheckError::InvalidRequest(_)) => {
            eprintln!("error: {e}");
            1
        }
        Err(e) => {
            eprintln!("error: {e}");
            2
        }
    }
}

fn run_cli_from<I, T>(args: I) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() { 2 } else { 0 };
        }
    };
    init_logging(cli.verbose);

    let checker = match load_checker(&cli) {
        Ok(c) => c,
        Err(rc) => return rc,
    };

    match &cli.command {
        Command::Serve(args) => run_serve(checker, args),
        Command::Predict(args) => run_predict(&checker, args),
        Command::Symptoms => {
            for key in checker.vocabulary().keys() {
                println!("{key}");
            }
            0
        }
        Command::Labels => {
            for label in checker.labels().as_slice() {
                println!("{label}");
            }
            0
        }
    }
}

fn main() {
    std::process::exit(run_cli_from(std::env::args_os()));
}
