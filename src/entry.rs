use std::process::ExitCode;

use clap::Parser;

use overload::{
    app::{print_summary, run_load_test},
    args::LoadArgs,
    error::AppResult,
    logger::init_logging,
    shutdown::shutdown_channel,
    shutdown_handlers::setup_signal_shutdown_handler,
};

pub(crate) fn run() -> ExitCode {
    let args = LoadArgs::parse();
    init_logging(args.verbose, args.no_color);

    match run_with_args(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run_with_args(args: &LoadArgs) -> AppResult<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let summary = runtime.block_on(async {
        let (signal_tx, signal_rx) = shutdown_channel();
        let signal_handle = setup_signal_shutdown_handler(&signal_tx);
        let result = run_load_test(args, Some(signal_rx)).await;
        signal_handle.abort();
        result
    })?;

    print_summary(&summary, args.output_format)
}
