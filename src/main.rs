//! dcx CLI - open a shell in a fresh container

use clap::Parser;
use tracing::{debug, warn};

use dcx::cli::{Args, USAGE};
use dcx::{
    format_plan, CliRuntime, DcxError, DryRunPlan, DryRunRuntime, HostContext, Intent, Session,
};

fn main() {
    let args = Args::parse();

    if let Err(e) = dcx::logging::init_logging(args.verbose) {
        eprintln!("Warning: {:#}", e);
    }

    match run(args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            report(&e);
            std::process::exit(1);
        }
    }
}

fn run(args: Args) -> dcx::Result<i32> {
    let Some(intent) = Intent::from_args(&args.args) else {
        print!("{}", USAGE);
        return Ok(0);
    };
    debug!(?intent, "resolved invocation");

    let host = HostContext::resolve()?;

    if args.dry_run {
        let mut session = Session::new(DryRunRuntime::new(&args.runtime), intent, host.clone());
        session.run()?;
        let plan = DryRunPlan {
            intent: session.intent().clone(),
            host,
            invocations: session.into_runtime().invocations().to_vec(),
        };
        println!("{}", format_plan(&plan, &args.output_format()));
        return Ok(0);
    }

    // The shell in the container handles Ctrl+C; dcx has to survive it to clean up.
    if let Err(e) = ctrlc::set_handler(|| {}) {
        warn!("failed to set Ctrl+C handler: {}", e);
    }

    let mut session = Session::new(CliRuntime::new(args.runtime), intent, host);
    let outcome = session.run()?;
    debug!(?outcome, "session finished");
    Ok(outcome.exit_code)
}

fn report(e: &DcxError) {
    eprintln!("Error: {}", e);
    if let Some(output) = e.runtime_output() {
        eprintln!("Runtime output: {}", output);
    }
    if let Some(hint) = e.hint() {
        eprintln!("{}", hint);
    }
}
