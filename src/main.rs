//! `cmc-terminal`: prints the CoinMarketCap listings table to the console.
//!
//! Reads `CMC_API_KEY` (and the other `CMC_*` settings) from the environment
//! or a `.env` file. Set `RUST_LOG=cmc_terminal=debug` for request logs.

use clap::Parser;
use cmc_terminal::prelude::*;
use futures_util::StreamExt;
use std::io::Write;
use std::time::Duration;
use tabled::builder::Builder;
use tabled::settings::Style;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of top-ranked assets to fetch (1-5000).
    #[clap(long, default_value_t = 100)]
    limit: u32,

    /// Conversion currency (USD, EUR, CNY, ...).
    #[clap(long, default_value = "USD")]
    currency: String,

    /// Rows per page.
    #[clap(long, default_value_t = 20)]
    page_size: usize,

    /// 1-based page number; out-of-range pages are clamped.
    #[clap(long, default_value_t = 1)]
    page: usize,

    /// Case-insensitive filter on name or symbol.
    #[clap(long, default_value = "")]
    search: String,

    /// Column key to sort by, e.g. `USD_price` or `cmc_rank`.
    #[clap(long)]
    sort: Option<String>,

    /// Sort high to low.
    #[clap(long)]
    desc: bool,

    /// Extra column keys to show, comma separated.
    #[clap(long, value_delimiter = ',')]
    columns: Vec<String>,

    /// Abbreviate market cap and volume (`$1.23B`).
    #[clap(long)]
    humanize: bool,

    /// Show the detail panel for this symbol.
    #[clap(long)]
    detail: Option<String>,

    /// Print every available column key and exit.
    #[clap(long)]
    list_columns: bool,

    /// Keep refreshing every N seconds until Ctrl-C.
    #[clap(long)]
    watch: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), TerminalError> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let client = CmcClientBuilder::from_env()?.build()?;

    let options = TerminalOptions {
        limit: args.limit,
        currency: Currency::new(&args.currency)?,
        page_size: args.page_size,
        format: FormatOptions {
            magnitude: if args.humanize {
                MagnitudeStyle::Humanized
            } else {
                MagnitudeStyle::Grouped
            },
        },
        refresh_interval: Duration::from_secs(args.watch.unwrap_or(30).max(1)),
    };
    let mut terminal = Terminal::new(client.clone(), options)?;
    apply_view(&mut terminal, &args);

    if args.list_columns {
        let snapshot = client.listings().get(terminal.key()).await?;
        print_columns(&snapshot);
        return Ok(());
    }

    match args.watch {
        Some(_) => watch(&mut terminal).await,
        None => {
            let frame = terminal.tick().await;
            print_frame(&frame);
            if !frame.has_data() {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}

fn apply_view(terminal: &mut Terminal, args: &Args) {
    let view = terminal.view_mut();
    view.set_search(args.search.trim());
    if let Some(key) = &args.sort {
        let direction = if args.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        view.set_sort(Some(SortSpec::new(key, direction)));
    }
    for key in &args.columns {
        view.toggle_extra_column(key.trim());
    }
    view.select_symbol(args.detail.clone());
    // Clamped against the real page count at render time.
    view.page_index = args.page.saturating_sub(1);
}

async fn watch(terminal: &mut Terminal) {
    let mut countdown = terminal.refresh_timer().clone();
    let mut frames = terminal.frames();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    loop {
        tokio::select! {
            frame = frames.next() => match frame {
                Some(frame) => {
                    countdown.mark();
                    print!("\x1b[2J\x1b[H");
                    print_frame(&frame);
                }
                None => break,
            },
            _ = ticker.tick() => {
                print!(
                    "\rNext refresh in {}s (Ctrl-C to quit) ",
                    countdown.countdown_secs()
                );
                let _ = std::io::stdout().flush();
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    println!();
}

// ─── Output ──────────────────────────────────────────────────────────────────

fn paint(cell: &Cell) -> String {
    match cell.tone {
        Tone::Positive => format!("\x1b[32m{}\x1b[0m", cell.text),
        Tone::Negative => format!("\x1b[31m{}\x1b[0m", cell.text),
        Tone::Neutral => cell.text.clone(),
    }
}

fn print_frame(frame: &Frame) {
    for notice in &frame.notices {
        let tag = match notice.severity {
            Severity::Error => "\x1b[31merror\x1b[0m",
            Severity::EmptyResultWarning => "\x1b[33mwarning\x1b[0m",
        };
        println!("{}: {}", tag, notice.message);
    }

    if !frame.metrics.is_empty() {
        let line: Vec<String> = frame
            .metrics
            .iter()
            .map(|m| match &m.delta {
                Some(delta) => format!("{}: {} ({})", m.label, m.value, delta),
                None => format!("{}: {}", m.label, m.value),
            })
            .collect();
        println!("{}", line.join("  |  "));
    }

    if let Some(table) = &frame.table {
        let mut builder = Builder::default();
        builder.push_record(table.labels());
        for row in &table.rows {
            builder.push_record(row.cells.iter().map(paint));
        }
        let mut rendered = builder.build();
        rendered.with(Style::rounded());
        println!("{}", rendered);
        println!(
            "{}{}",
            table.page,
            if frame.stale { " | stale data" } else { "" }
        );
    }

    if let Some(detail) = &frame.detail {
        println!();
        println!("{} ({})", detail.name, detail.symbol);
        println!("  Price:      {} {}", detail.price, paint(&detail.change_24h));
        println!("  Market cap: {}", detail.market_cap);
        println!("{}", detail.raw_json);
    }

    if let Some(status) = &frame.status {
        println!("{}", status);
    }
}

fn print_columns(snapshot: &Snapshot) {
    let mut builder = Builder::default();
    builder.push_record(["Key", "Label", "Shown"]);
    for column in snapshot.schema.columns() {
        let shown = match column.role {
            ColumnRole::Preferred => "default",
            ColumnRole::Extra => "--columns",
        };
        builder.push_record([column.key.as_str(), column.label.as_str(), shown]);
    }
    let mut rendered = builder.build();
    rendered.with(Style::rounded());
    println!("{}", rendered);
}
