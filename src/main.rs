//! CLI for datlens: inspect and patch opaque binary data files.

#![cfg(feature = "cli")]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use datlens::config::AnalysisConfig;
use datlens::{log_error, logging, util, Session};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "datlens")]
#[command(about = "Inspect, search and patch opaque binary data files", long_about = None)]
struct Args {
    /// Path to the data file
    path: PathBuf,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// JSON config file overriding the analysis defaults
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Size, entropy, text/binary guess and header overview
    Info,
    /// Decode the fixed-size header
    Header,
    /// Walk the section table
    Sections,
    /// Hex dump a range of the file
    Hexdump {
        /// Start offset (decimal or 0x hex)
        #[arg(long, default_value = "0", value_parser = offset_arg)]
        offset: usize,
        /// Number of bytes to dump (default: to end of file)
        #[arg(long, value_parser = offset_arg)]
        length: Option<usize>,
        /// Bytes per line
        #[arg(long)]
        width: Option<usize>,
    },
    /// Extract printable ASCII runs
    Strings {
        /// Minimum run length
        #[arg(long)]
        min_length: Option<usize>,
    },
    /// Find the first occurrence of each keyword with surrounding context
    Keywords {
        #[arg(required = true)]
        keywords: Vec<String>,
    },
    /// Most frequent bytes and n-grams
    Patterns {
        /// N-gram width in bytes
        #[arg(long)]
        width: Option<usize>,
        /// Number of n-grams to report
        #[arg(long)]
        top: Option<usize>,
    },
    /// Heuristic array header candidates
    Arrays {
        /// Print at most this many candidates
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Overwrite one byte and save the result
    Patch {
        /// Offset of the byte (decimal or 0x hex)
        #[arg(value_parser = offset_arg)]
        offset: usize,
        /// New value, 0-255 (decimal or 0x hex)
        value: String,
        /// Write to this path instead of overwriting the input
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn offset_arg(s: &str) -> std::result::Result<usize, String> {
    util::parse_offset(s).map_err(|e| e.to_string())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.log_json {
        logging::init_tracing_json();
    } else {
        logging::init_tracing();
    }

    let config = match &args.config {
        Some(path) => AnalysisConfig::from_json_file(path).map_err(|e| log_error!(e))?,
        None => AnalysisConfig::default(),
    };

    let mut session = Session::open_with_config(&args.path, config)
        .map_err(|e| log_error!(e, "failed to open image"))?;
    run(&mut session, &args)?;
    session.close();
    Ok(())
}

fn run(session: &mut Session, args: &Args) -> Result<()> {
    match &args.command {
        Command::Info => info(session, args.json),
        Command::Header => header(session, args.json),
        Command::Sections => sections(session, args.json),
        Command::Hexdump {
            offset,
            length,
            width,
        } => {
            let width = width.unwrap_or(session.config().hexdump.bytes_per_line);
            let length = length.unwrap_or(usize::MAX);
            let dump = session.hex_dump_range(*offset, length, width);
            if args.json {
                print_json(&serde_json::json!({
                    "offset": offset,
                    "bytes_per_line": width,
                    "lines": dump.lines().collect::<Vec<_>>(),
                }))
            } else {
                print!("{}", dump);
                Ok(())
            }
        }
        Command::Strings { min_length } => {
            let min = min_length.unwrap_or(session.config().strings.min_length);
            let found = session.find_strings(min);
            if args.json {
                return print_json(&found);
            }
            for s in &found {
                println!("{:08X}  {}", s.offset, s.text);
            }
            Ok(())
        }
        Command::Keywords { keywords } => {
            let found = session.find_keywords(keywords.as_slice());
            if args.json {
                return print_json(&found);
            }
            for kw in keywords {
                match found.get(kw) {
                    Some(m) => {
                        println!("{:?} at 0x{:08X}", kw, m.offset);
                        println!("  context 0x{:08X}: {}", m.context_start, m.context_hex());
                    }
                    None => println!("{:?} not found", kw),
                }
            }
            Ok(())
        }
        Command::Patterns { width, top } => patterns(session, *width, *top, args.json),
        Command::Arrays { limit } => {
            let mut found = session.find_array_candidates();
            let total = found.len();
            if let Some(limit) = limit {
                found.truncate(*limit);
            }
            if args.json {
                return print_json(&found);
            }
            println!("{} candidate(s)", total);
            for c in &found {
                println!(
                    "0x{:08X}  count={:<4} size={:<4} span={}",
                    c.offset,
                    c.count,
                    c.size,
                    c.span()
                );
            }
            Ok(())
        }
        Command::Patch {
            offset,
            value,
            output,
        } => {
            let value = util::parse_byte(value).map_err(|e| log_error!(e))?;
            let old = session.store().byte_at(*offset);
            session
                .patch_byte(*offset, value)
                .map_err(|e| log_error!(e, "patch rejected"))?;
            session
                .save(output.as_deref())
                .map_err(|e| log_error!(e, "save failed"))?;
            let target = output.as_ref().unwrap_or(&args.path);
            if args.json {
                return print_json(&serde_json::json!({
                    "offset": offset,
                    "old": old,
                    "new": value,
                    "saved_to": target.display().to_string(),
                }));
            }
            println!(
                "0x{:08X}: 0x{:02X} -> 0x{:02X}, saved to {}",
                offset,
                old.unwrap_or_default(),
                value,
                target.display()
            );
            Ok(())
        }
    }
}

fn info(session: &Session, json: bool) -> Result<()> {
    let summary = session.summarize();
    if json {
        return print_json(&summary);
    }
    println!("Path:      {}", summary.path);
    println!("Size:      {} bytes", summary.file_size);
    println!("Mapped:    {}", if summary.mapped { "yes" } else { "no" });
    println!("Type:      {}", if summary.is_text { "text" } else { "binary" });
    println!("Entropy:   {:.4} bits/byte", summary.entropy);
    println!("Strings:   {}", summary.string_count);
    if let Some(h) = &summary.header {
        println!("Magic:     {}", h.magic);
        println!("Version:   {}", h.version);
    }
    match summary.section_count {
        Some(n) => println!("Sections:  {}", n),
        None => println!("Sections:  (table does not decode)"),
    }
    println!("Top bytes:");
    for b in &summary.top_bytes {
        println!("  0x{:02X}  {}", b.byte, b.count);
    }
    Ok(())
}

fn header(session: &Session, json: bool) -> Result<()> {
    let header = session
        .read_header()
        .map_err(|e| log_error!(e))
        .context("reading header")?;
    if json {
        return print_json(&header);
    }
    println!("Magic:      {}", header.magic);
    println!("Raw magic:  {}", hex::encode(header.raw_magic));
    println!("Version:    {}", header.version);
    let size_note = if header.declared_size_matches(session.len()) {
        ""
    } else {
        " (differs from actual size)"
    };
    println!("File size:  {}{}", header.file_size, size_note);
    match header.timestamp_utc() {
        Some(ts) => println!("Timestamp:  {} ({})", header.timestamp, ts.to_rfc3339()),
        None => println!("Timestamp:  {}", header.timestamp),
    }
    Ok(())
}

fn sections(session: &Session, json: bool) -> Result<()> {
    let sections = session
        .read_sections()
        .map_err(|e| log_error!(e))
        .context("walking section table")?;
    if json {
        return print_json(&sections);
    }
    println!("{} section(s)", sections.len());
    for (i, s) in sections.iter().enumerate() {
        println!(
            "  [{:>3}] kind=0x{:08X} size={:<10} payload=0x{:08X}",
            i, s.kind, s.size, s.payload_offset
        );
    }
    Ok(())
}

fn patterns(session: &Session, width: Option<usize>, top: Option<usize>, json: bool) -> Result<()> {
    let cfg = &session.config().patterns;
    let width = width.unwrap_or(cfg.ngram_width);
    let top = top.unwrap_or(cfg.top_k);
    let bytes = session.byte_frequencies().most_common(cfg.top_bytes);
    let ngrams = session.top_ngrams(width, top);
    if json {
        return print_json(&serde_json::json!({
            "top_bytes": bytes,
            "ngram_width": width,
            "top_ngrams": ngrams,
        }));
    }
    println!("Top bytes:");
    for b in &bytes {
        println!("  0x{:02X}  {}", b.byte, b.count);
    }
    println!("Top {}-grams:", width);
    for n in &ngrams {
        println!("  {}  {} (first at 0x{:08X})", n.pattern_hex(), n.count, n.first_offset);
    }
    Ok(())
}
