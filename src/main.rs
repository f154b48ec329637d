// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Icefloe-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Icefloe and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Icefloe CLI entrypoint.
//!
//! Runs the interactive TUI against a chart file (or the built-in demo
//! chart) and a backend explanation server reachable at
//! `<server>/api/explain`.

use std::error::Error;
use std::sync::mpsc;

use icefloe::client::{ExplainClient, DEFAULT_SERVER_URL};
use icefloe::panel::{FetchOutcome, PanelConfig};
use icefloe::{store, tui};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} <chart.json> [--server <url>] [--chart-name <name>] [--panel-breakpoint <cols>]\n  {program} --demo [--server <url>] [--panel-breakpoint <cols>]\n\nExplanations are fetched from `<server>/api/explain` (default {DEFAULT_SERVER_URL}).\n\n--chart-name overrides the name used in explanation requests and cache keys\n(default: the chart file's own name).\n--panel-breakpoint sets the terminal width in columns below which the panel\noverlays the chart (default {}).\n--demo uses a built-in demo chart and cannot be combined with a chart file.",
        tui::NARROW_TERMINAL_COLS
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    demo: bool,
    chart_file: Option<String>,
    server_url: Option<String>,
    chart_name: Option<String>,
    panel_breakpoint: Option<u16>,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--demo" => {
                if options.demo {
                    return Err(());
                }
                options.demo = true;
            }
            "--server" => {
                if options.server_url.is_some() {
                    return Err(());
                }
                let url = args.next().ok_or(())?;
                options.server_url = Some(url);
            }
            "--chart-name" => {
                if options.chart_name.is_some() {
                    return Err(());
                }
                let name = args.next().ok_or(())?;
                options.chart_name = Some(name);
            }
            "--panel-breakpoint" => {
                if options.panel_breakpoint.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let cols: u16 = raw.parse().map_err(|_| ())?;
                options.panel_breakpoint = Some(cols);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.chart_file.is_some() {
                    return Err(());
                }
                options.chart_file = Some(arg);
            }
        }
    }

    if options.demo && options.chart_file.is_some() {
        return Err(());
    }

    if !options.demo && options.chart_file.is_none() {
        return Err(());
    }

    Ok(options)
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "icefloe".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        let _ = icefloe::telemetry::init_default_tracing();

        let chart = match options.chart_file {
            Some(path) => store::load_chart(path)?,
            None => tui::demo_chart(),
        };

        let server_url = options
            .server_url
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_owned());
        let chart_name = options
            .chart_name
            .unwrap_or_else(|| chart.name().to_owned());
        let breakpoint = options
            .panel_breakpoint
            .unwrap_or(tui::NARROW_TERMINAL_COLS);
        let config = PanelConfig::new(chart_name)
            .with_server_url(server_url.clone())
            .with_narrow_breakpoint(breakpoint);

        let client = ExplainClient::new(server_url);
        let (outcome_tx, outcome_rx) = mpsc::channel();

        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;

        runtime.block_on(async move {
            let handle = tokio::runtime::Handle::current();
            let tui_join = tokio::task::spawn_blocking(move || {
                tui::run_with_chart(chart, config, outcome_rx, move |request| {
                    let client = client.clone();
                    let tx = outcome_tx.clone();
                    handle.spawn(async move {
                        let result =
                            client.explain(&request.chart_name, &request.entry_text).await;
                        let _ = tx.send(FetchOutcome {
                            request_id: request.request_id,
                            entry_text: request.entry_text,
                            force_refresh: request.force_refresh,
                            result,
                        });
                    });
                })
                .map_err(|err| err.to_string())
            })
            .await;

            let tui_result = tui_join.map_err(|err| -> Box<dyn Error> { Box::new(err) })?;
            tui_result.map_err(|err| {
                Box::new(std::io::Error::new(std::io::ErrorKind::Other, err)) as Box<dyn Error>
            })?;
            Ok::<(), Box<dyn Error>>(())
        })?;

        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("icefloe: {err}");
        std::process::exit(1);
    }
}
