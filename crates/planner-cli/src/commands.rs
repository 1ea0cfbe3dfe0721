//! Command handlers for CLI subcommands.

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use planner_models::{EmployeeId, LeaveRecord, ProjectRequest, SchedulingOutcome, TimeBlock};
use planner_persistence::FileStore;
use planner_scheduler::{MeetingOutcome, MeetingRequest, Planner, SchedulerConfig};

use crate::cli::{Commands, OutputFormat};

/// Result type for command operations.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Execute a CLI command against the file store in `state_dir`.
pub async fn execute(command: Commands, state_dir: &Path) -> Result<()> {
    let store = Arc::new(FileStore::new(state_dir));
    let planner = Planner::from_store(store.clone(), SchedulerConfig::from_env());

    match command {
        Commands::Schedule { request, format } => cmd_schedule(&planner, &request, format).await,
        Commands::Meeting {
            title,
            date,
            start,
            end,
            participants,
            created_by,
            format,
        } => {
            let request = MeetingRequest::new(
                title,
                date,
                start,
                end,
                participants.into_iter().map(EmployeeId::from).collect(),
                created_by,
            );
            cmd_meeting(&planner, &request, format).await
        }
        Commands::FreeSlot {
            employee,
            date,
            hours,
        } => cmd_free_slot(&planner, &employee.into(), date, hours).await,
        Commands::CommonSlot {
            employees,
            date,
            hours,
        } => {
            let employees: Vec<EmployeeId> = employees.into_iter().map(EmployeeId::from).collect();
            cmd_common_slot(&planner, &employees, date, hours).await
        }
        Commands::NextDay {
            employee,
            from,
            hours,
            horizon,
        } => cmd_next_day(&planner, &employee.into(), from, hours, horizon).await,
        Commands::Leave {
            employee,
            start,
            end,
            pending,
        } => cmd_leave(&store, employee.into(), start, end, pending).await,
        Commands::Blocks { employee, format } => cmd_blocks(&store, &employee.into(), format),
    }
}

async fn cmd_schedule(planner: &Planner, path: &Path, format: OutputFormat) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
    let request: ProjectRequest = serde_json::from_str(&content)
        .map_err(|e| format!("Invalid project request {}: {}", path.display(), e))?;

    info!(project = %request.name, phases = request.phases.len(), "scheduling project");
    let outcome = planner.create_project_and_schedule(&request).await;

    match format {
        OutputFormat::Text => print_outcome(&request.name, &outcome),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
    }

    if outcome.success {
        Ok(())
    } else {
        Err(outcome.errors.join("; ").into())
    }
}

fn print_outcome(name: &str, outcome: &SchedulingOutcome) {
    match &outcome.project_id {
        Some(id) => println!("Project '{}' ({})", name, id),
        None => println!("Project '{}' was not created", name),
    }
    println!("  Blocks placed: {}", outcome.blocks_placed);
    for warning in &outcome.warnings {
        println!("  Warning: {}", warning);
    }
    for error in &outcome.errors {
        println!("  Error: {}", error);
    }
}

async fn cmd_meeting(
    planner: &Planner,
    request: &MeetingRequest,
    format: OutputFormat,
) -> Result<()> {
    let outcome = planner.schedule_meeting(request).await?;

    match format {
        OutputFormat::Text => print_meeting(request, &outcome),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
    }
    Ok(())
}

fn print_meeting(request: &MeetingRequest, outcome: &MeetingOutcome) {
    println!(
        "Meeting '{}' on {} {:02}:00-{:02}:00",
        request.title, request.date, request.start_hour, request.end_hour
    );
    for block in &outcome.placed {
        println!("  Booked: {}", block.employee_id);
    }
    for employee in &outcome.conflicts {
        println!("  Conflict: {}", employee);
    }
    for (employee, error) in &outcome.failed {
        println!("  Failed: {} ({})", employee, error);
    }
}

async fn cmd_free_slot(
    planner: &Planner,
    employee: &EmployeeId,
    date: NaiveDate,
    hours: u8,
) -> Result<()> {
    match planner.slot_finder().first_free_slot(employee, date, hours).await {
        Some(slot) => println!("{} {}", date, slot),
        None => println!("No free {}h slot for {} on {}", hours, employee, date),
    }
    Ok(())
}

async fn cmd_common_slot(
    planner: &Planner,
    employees: &[EmployeeId],
    date: NaiveDate,
    hours: u8,
) -> Result<()> {
    match planner
        .slot_finder()
        .first_common_free_slot(employees, date, hours)
        .await
    {
        Some(slot) => println!("{} {}", date, slot),
        None => println!("No common {}h slot on {}", hours, date),
    }
    Ok(())
}

async fn cmd_next_day(
    planner: &Planner,
    employee: &EmployeeId,
    from: NaiveDate,
    hours: u8,
    horizon: Option<u32>,
) -> Result<()> {
    let horizon = horizon.unwrap_or(planner.config().fallback_horizon_days);
    match planner
        .slot_finder()
        .next_available_business_day(employee, from, hours, horizon)
        .await
    {
        Some((date, slot)) => println!("{} {}", date, slot),
        None => println!(
            "No business day with a free {}h slot for {} within {} days of {}",
            hours, employee, horizon, from
        ),
    }
    Ok(())
}

async fn cmd_leave(
    store: &FileStore,
    employee: EmployeeId,
    start: NaiveDate,
    end: NaiveDate,
    pending: bool,
) -> Result<()> {
    if end < start {
        return Err(format!("Leave ends ({}) before it starts ({})", end, start).into());
    }
    let record = if pending {
        LeaveRecord::new(employee, start, end)
    } else {
        LeaveRecord::approved(employee, start, end)
    };
    let record = store.record_leave(record).await?;
    println!(
        "Recorded {:?} leave for {} from {} to {} ({})",
        record.status, record.employee_id, record.start, record.end, record.id
    );
    Ok(())
}

fn cmd_blocks(store: &FileStore, employee: &EmployeeId, format: OutputFormat) -> Result<()> {
    let blocks = store.list_blocks(employee)?;

    match format {
        OutputFormat::Text => {
            if blocks.is_empty() {
                println!("No blocks for {}.", employee);
                return Ok(());
            }
            for block in &blocks {
                println!("{}", format_block(block));
            }
            println!("\n{} block(s)", blocks.len());
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&blocks)?),
    }
    Ok(())
}

fn format_block(block: &TimeBlock) -> String {
    let lock = if block.hard_lock { " [locked]" } else { "" };
    format!(
        "{} {} {:<20} {:<20} {:?}{}",
        block.date(),
        block.slot(),
        truncate(&block.title, 20),
        block.category,
        block.status,
        lock
    )
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
