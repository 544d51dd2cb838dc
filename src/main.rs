// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Routeview CLI entrypoint.
//!
//! Opens the terminal map with a plan file (or the built-in demo). `--routes` replays a solver
//! response, both at startup and whenever routes are recalculated.

use std::error::Error;
use std::fs::{self, File};
use std::path::Path;

use routeview::solver::{decode_response, ReplaySolver};
use routeview::store::{load_plan_file, PlanFolder, PLAN_FILE_SUFFIX};
use routeview::style::MapStyle;
use routeview::tui::{self, TuiOptions};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<plan-file>] [--routes <response.json>] [--style <style.json>] [--store <dir>] [--log-file <file>]\n  {program} --plan <plan-file> [...]\n  {program} --demo [--style <style.json>] [--store <dir>] [--log-file <file>]\n\nWithout a plan file the map starts empty; click to add locations.\n--routes replays a saved solver response (also used when pressing `c`).\n--store selects the folder `s` saves plans into.\n--log-file writes logs (filter from RUST_LOG, default `warn`) to the given file."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    plan: Option<String>,
    routes: Option<String>,
    style: Option<String>,
    store: Option<String>,
    log_file: Option<String>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    fn set_once(slot: &mut Option<String>, value: Option<String>) -> Result<(), ()> {
        if slot.is_some() {
            return Err(());
        }
        *slot = Some(value.ok_or(())?);
        Ok(())
    }

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--plan" => set_once(&mut options.plan, args.next())?,
            "--routes" => set_once(&mut options.routes, args.next())?,
            "--style" => set_once(&mut options.style, args.next())?,
            "--store" => set_once(&mut options.store, args.next())?,
            "--log-file" => set_once(&mut options.log_file, args.next())?,
            _ if arg.starts_with('-') => return Err(()),
            _ => set_once(&mut options.plan, Some(arg))?,
        }
    }

    if options.demo && (options.plan.is_some() || options.routes.is_some()) {
        return Err(());
    }

    Ok(options)
}

fn init_logging(path: &str) -> Result<(), Box<dyn Error>> {
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()?;
    Ok(())
}

/// `berlin.plan.json` saves back as `berlin`.
fn plan_name_from_path(path: &str) -> String {
    let file_name = Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = file_name
        .strip_suffix(PLAN_FILE_SUFFIX)
        .or_else(|| file_name.strip_suffix(".json"))
        .unwrap_or(&file_name);
    if stem.is_empty() {
        "untitled".to_owned()
    } else {
        stem.to_owned()
    }
}

fn build_tui_options(options: CliOptions) -> Result<TuiOptions, Box<dyn Error>> {
    let mut tui_options = if options.demo {
        tui::demo_options()
    } else {
        match &options.plan {
            Some(path) => {
                let mut tui_options = TuiOptions::new(load_plan_file(Path::new(path))?);
                tui_options.plan_name = plan_name_from_path(path);
                tui_options
            }
            None => TuiOptions::new(Default::default()),
        }
    };

    if let Some(path) = &options.routes {
        let outcome = decode_response(&fs::read_to_string(path)?)?;
        log::info!("replaying {} route(s) from {path}", outcome.routes.len());
        tui_options.outcome = Some(outcome);
        tui_options.solver = Some(Box::new(ReplaySolver::new(path)));
    }
    if let Some(path) = &options.style {
        tui_options.style = MapStyle::load(Path::new(path))?;
    }
    if let Some(dir) = options.store {
        tui_options.store = Some(PlanFolder::new(dir));
    }

    Ok(tui_options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "routeview".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        if let Some(path) = &options.log_file {
            init_logging(path)?;
        }

        let tui_options = build_tui_options(options)?;
        tui::run(tui_options)
    })();

    if let Err(err) = result {
        eprintln!("routeview: {err}");
        std::process::exit(1);
    }
}
