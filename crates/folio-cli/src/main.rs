// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod logging;
mod replay;

use anyhow::{Context, Result, anyhow, bail};
use config::Config;
use folio_app::{ContactFields, SectionId, SectionTracker, compose};
use folio_web::{
    Page, PageConfig, PageEvent, StaticLayout, ThreadScheduler, VirtualScheduler,
    layout::DEMO_VIEWPORT_HEIGHT, run_page,
};
use replay::{StdoutNavigator, parse_script, write_updates};
use std::env;
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use tracing::{info, warn};

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `folio --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;
    logging::init_logging(&config.log_config()?)?;

    let page_config = config.page_config()?;
    let layout = build_layout(&options)?;
    if options.check_only {
        let page = Page::new(
            page_config,
            layout,
            StdoutNavigator,
            VirtualScheduler::new(),
        );
        info!(
            config = %options.config_path.display(),
            recipient = %page.config().recipient,
            sections = page.tracker().sections().len(),
            "config ok"
        );
        return Ok(());
    }

    match options.mode {
        None => {
            print_help();
            Ok(())
        }
        Some(Mode::Validate) => {
            let fields = read_fields(io::stdin().lock())?;
            println!("{}", serde_json::to_string(&fields.validate())?);
            Ok(())
        }
        Some(Mode::Mailto) => {
            let fields = read_fields(io::stdin().lock())?;
            let errors = fields.validate();
            if errors.is_empty() {
                let uri = compose(config.recipient(), &fields).context("compose mailto URI")?;
                println!("{uri}");
            } else {
                println!("{}", serde_json::to_string(&errors)?);
            }
            Ok(())
        }
        Some(Mode::Track(scroll_y)) => {
            println!("{}", track(&page_config, layout, scroll_y).as_str());
            Ok(())
        }
        Some(Mode::Replay(path)) => {
            let script = fs::read_to_string(&path)
                .with_context(|| format!("read replay script {}", path.display()))?;
            let steps = parse_script(&script)
                .with_context(|| format!("in replay script {}", path.display()))?;
            let mut page = Page::new(
                page_config,
                layout,
                StdoutNavigator,
                VirtualScheduler::new(),
            );
            replay::replay(steps, &mut page, &mut io::stdout().lock())
        }
        Some(Mode::Live) => live(page_config, layout),
    }
}

fn build_layout(options: &CliOptions) -> Result<StaticLayout> {
    let viewport = options.viewport.unwrap_or(DEMO_VIEWPORT_HEIGHT);
    match &options.layout {
        Some(heights) => StaticLayout::from_heights(heights, viewport),
        None if options.viewport.is_some() => {
            let mut layout = StaticLayout::demo();
            layout.set_viewport_height(viewport);
            Ok(layout)
        }
        None => Ok(StaticLayout::demo()),
    }
}

fn track(config: &PageConfig, mut layout: StaticLayout, scroll_y: f64) -> SectionId {
    layout.set_scroll_y(scroll_y);
    let tracker = SectionTracker::new(config.header_offset, config.strategy);
    tracker.resolve(&layout, tracker.first())
}

fn read_fields<R: Read>(mut reader: R) -> Result<ContactFields> {
    let mut raw = String::new();
    reader
        .read_to_string(&mut raw)
        .context("read contact fields from stdin")?;
    serde_json::from_str(&raw)
        .context("parse contact fields; expected a JSON object with name, email, subject and message")
}

fn live(config: PageConfig, layout: StaticLayout) -> Result<()> {
    let (tx, rx) = mpsc::channel();
    // Detached: a blocked stdin read must not hold up shutdown.
    thread::spawn(move || {
        for (idx, line) in io::stdin().lock().lines().enumerate() {
            let Ok(line) = line else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<PageEvent>(&line) {
                Ok(event) => {
                    if tx.send(event).is_err() {
                        break;
                    }
                }
                Err(error) => warn!(line = idx + 1, "skipping unreadable event: {error}"),
            }
        }
    });

    let mut page = Page::new(config, layout, StdoutNavigator, ThreadScheduler::new());
    run_page(&mut page, &rx, |update| {
        let mut stdout = io::stdout().lock();
        write_updates(&mut stdout, std::slice::from_ref(update))?;
        stdout.flush().context("flush stdout")
    })
}

#[derive(Debug, Clone, PartialEq)]
enum Mode {
    Validate,
    Mailto,
    Track(f64),
    Replay(PathBuf),
    Live,
}

impl Mode {
    const fn flag(&self) -> &'static str {
        match self {
            Self::Validate => "--validate",
            Self::Mailto => "--mailto",
            Self::Track(_) => "--track",
            Self::Replay(_) => "--replay",
            Self::Live => "--live",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
    mode: Option<Mode>,
    layout: Option<Vec<f64>>,
    viewport: Option<f64>,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_example: false,
        check_only: false,
        show_help: false,
        mode: None,
        layout: None,
        viewport: None,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--validate" => set_mode(&mut options, Mode::Validate)?,
            "--mailto" => set_mode(&mut options, Mode::Mailto)?,
            "--live" => set_mode(&mut options, Mode::Live)?,
            "--track" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--track requires a scroll position"))?;
                let scroll_y = parse_length("--track", value.as_ref())?;
                set_mode(&mut options, Mode::Track(scroll_y))?;
            }
            "--replay" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--replay requires a script path"))?;
                set_mode(&mut options, Mode::Replay(PathBuf::from(value.as_ref())))?;
            }
            "--layout" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--layout requires comma-separated section heights"))?;
                let heights = value
                    .as_ref()
                    .split(',')
                    .map(|height| parse_length("--layout", height.trim()))
                    .collect::<Result<Vec<_>>>()?;
                options.layout = Some(heights);
            }
            "--viewport" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow!("--viewport requires a height"))?;
                options.viewport = Some(parse_length("--viewport", value.as_ref())?);
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn set_mode(options: &mut CliOptions, mode: Mode) -> Result<()> {
    if let Some(previous) = &options.mode {
        bail!(
            "{} cannot be combined with {}; pick one",
            mode.flag(),
            previous.flag()
        );
    }
    options.mode = Some(mode);
    Ok(())
}

fn parse_length(flag: &str, raw: &str) -> Result<f64> {
    let value: f64 = raw
        .parse()
        .with_context(|| format!("{flag} expects a number, got {raw:?}"))?;
    if !value.is_finite() || value < 0.0 {
        bail!("{flag} expects a non-negative number, got {raw:?}");
    }
    Ok(value)
}

fn print_help() {
    println!("folio");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-example-config   Print a config template");
    println!("  --check                  Validate config and build a page");
    println!("  --validate               Read contact fields (JSON) on stdin, print errors");
    println!("  --mailto                 Read contact fields (JSON) on stdin, print mailto URI");
    println!("  --track <scroll_y>       Print the section highlighted at a scroll position");
    println!("  --replay <file>          Run a JSON-lines event script on a virtual clock");
    println!("  --live                   Read page events from stdin on the wall clock");
    println!("  --layout <h1,h2,...>     Section heights in page order (default: demo page)");
    println!("  --viewport <height>      Viewport height (default: {DEMO_VIEWPORT_HEIGHT})");
    println!("  --help                   Show this help");
}
