// Copyright (c) UnnamedOrange. Licensed under the MIT License.
// See the LICENSE file in the repository root for full license text.

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use log::{error, info};
use md2texi::cli::CliArgs;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };
            if let Err(print_err) = err.print() {
                error!("cannot print usage: {print_err}");
                return ExitCode::FAILURE;
            }
            return ExitCode::from(code);
        }
    };

    let Some(input) = args.input.as_deref() else {
        return match CliArgs::command().print_help() {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                error!("cannot print usage: {err}");
                ExitCode::FAILURE
            }
        };
    };

    match md2texi::run(&args, input) {
        Ok(output) => {
            info!("wrote {}", output.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
