use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use u_timetable::config::TimetableConfig;
use u_timetable::dispatching::SectionOrdering;
use u_timetable::io::{read_roster_workbook, write_timetable_xlsx, DEFAULT_EXPORT_FILE};
use u_timetable::pipeline::{run, TimetableRun};
use u_timetable::scheduler::{ConflictPolicy, SlotOrdering};
use u_timetable::sections::{DedupPolicy, PartitionPolicy};

#[derive(Parser)]
#[command(author, version, about = "Greedy course timetable generator", long_about = None)]
struct Args {
    /// Roster workbook, one sheet per course
    roster: PathBuf,

    /// Output workbook
    #[arg(short, long, default_value = DEFAULT_EXPORT_FILE)]
    output: PathBuf,

    /// JSON configuration file; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Candidate ordering: front-load or spread
    #[arg(long)]
    slot_ordering: Option<SlotOrdering>,

    /// Section ordering: natural, largest-first or most-shared
    #[arg(long)]
    section_ordering: Option<SectionOrdering>,

    /// Roster dedup policy: preserve or unique
    #[arg(long)]
    dedup: Option<DedupPolicy>,

    /// Partition policy: per-course or program-halves
    #[arg(long)]
    partition: Option<PartitionPolicy>,

    /// Use the block conflict model with this many blocks
    #[arg(long)]
    blocks: Option<u32>,

    /// Seed for block assignment
    #[arg(long, default_value = "42")]
    seed: u64,

    /// Number of timetable rows to print
    #[arg(long, default_value = "10")]
    preview: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let book = read_roster_workbook(&args.roster)
        .with_context(|| format!("reading rosters from {}", args.roster.display()))?;
    if book.is_empty() {
        warn!("no courses found in roster workbook");
    }

    let result = run(&book, &config);
    if let Err(errors) = result.validate(&config) {
        for e in &errors {
            warn!(kind = ?e.kind, "{}", e.message);
        }
        anyhow::bail!("timetable failed validation with {} issue(s)", errors.len());
    }

    print_summary(&result, args.preview);

    write_timetable_xlsx(
        &args.output,
        &result.timetable,
        &result.plan.summaries,
        &result.report,
    )
    .with_context(|| format!("writing {}", args.output.display()))?;
    info!(output = %args.output.display(), "done");
    Ok(())
}

fn load_config(args: &Args) -> Result<TimetableConfig> {
    let mut config = match &args.config {
        Some(path) => TimetableConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => TimetableConfig::default(),
    };

    if let Some(ordering) = args.slot_ordering {
        config.slot_ordering = ordering;
    }
    if let Some(ordering) = args.section_ordering {
        config.section_ordering = ordering;
    }
    if let Some(dedup) = args.dedup {
        config.dedup = dedup;
    }
    if let Some(partition) = args.partition {
        config.partition = partition;
    }
    if let Some(num_blocks) = args.blocks {
        config.conflicts = ConflictPolicy::Block {
            num_blocks,
            seed: args.seed,
        };
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn print_summary(result: &TimetableRun, preview: usize) {
    let report = &result.report;
    println!("Scheduling summary");
    println!("  Sections:           {}", result.plan.sections.len());
    println!("  Required sessions:  {}", report.required_sessions);
    println!("  Scheduled sessions: {}", report.scheduled_sessions);
    println!("  Completion rate:    {:.2}%", report.completion_rate);
    if !report.is_complete() {
        println!(
            "  Capacity constraints prevented full scheduling ({} sessions unplaced)",
            report.missing_sessions()
        );
    }

    println!();
    println!("{:<20} {:>10} {:>10}", "Course", "Enrollment", "Sections");
    for c in &result.plan.summaries {
        println!("{:<20} {:>10} {:>10}", c.course, c.enrollment, c.sections_created);
    }

    if preview > 0 && !result.timetable.is_empty() {
        println!();
        println!("{:<16} {:>4} {:>4} {:>4} {:>4}", "Section", "Week", "Day", "Slot", "Room");
        for s in result.timetable.sessions.iter().take(preview) {
            println!(
                "{:<16} {:>4} {:>4} {:>4} {:>4}",
                s.section_id, s.week, s.day, s.slot, s.room
            );
        }
    }
}
