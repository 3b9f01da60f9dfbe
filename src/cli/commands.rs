//! One function per subcommand, all funnelled through [`execute`]

use super::{Command, Console};
use crate::core::dispatch::LogProgress;
use crate::core::report::OutcomeReport;
use crate::core::table::{Table, read_grid_path};
use crate::core::transport::Transport;
use crate::utils::error::Result;
use crate::workflows::attendance::{self, AttendanceOptions};
use crate::workflows::copy_dates::{self, DateOffset};
use crate::workflows::{BulkContext, ImportPlan, columns, comments, rubric_export, rubric_import};
use std::io::{BufRead, Write};
use tracing::info;

/// Run `command`; `Ok(false)` means it finished with failed requests
pub async fn execute<T, R, W>(
    ctx: &BulkContext<T>,
    command: Command,
    console: &mut Console<R, W>,
) -> Result<bool>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    match command {
        Command::ImportComments { course, file } => {
            let table = Table::from_path(&file)?;
            let plan = comments::plan_comment_import(ctx, course, &table)?;
            run_import(ctx, &plan, console).await
        }
        Command::ImportRubric {
            course,
            assignment,
            file,
        } => {
            let table = Table::from_path(&file)?;
            let plan = rubric_import::plan_rubric_import(ctx, course, assignment, &table).await?;
            run_import(ctx, &plan, console).await
        }
        Command::ExportRubric { course, assignment } => {
            let summary = rubric_export::export_rubric_scores(ctx, course, assignment).await?;
            if summary.missing_users > 0 {
                console.say(&format!(
                    "WARNING: {} submissions belong to users no longer enrolled in the course.",
                    summary.missing_users
                ))?;
            }
            console.say(&format!(
                "Exported {} rows to {}",
                summary.rows,
                summary.path.display()
            ))?;
            Ok(true)
        }
        Command::ImportAttendance {
            course,
            file,
            group,
            name,
            points,
            min_minutes,
            overwrite,
        } => {
            let grid = read_grid_path(&file)?;
            let options = AttendanceOptions {
                assignment_name: name,
                points,
                group_id: group,
                min_minutes,
                overwrite,
            };
            let plan = attendance::plan_attendance_import(ctx, course, &grid, &options).await?;
            console.notices(&plan.notices)?;
            console.confirm(&plan.confirmation)?;
            let report = attendance::execute_attendance_import(
                ctx,
                plan,
                &mut LogProgress::new("attendance"),
            )
            .await?;
            finish(console, &report)
        }
        Command::CopyDates {
            course,
            source,
            dest,
            offset,
            unit,
        } => {
            let offset = DateOffset::new(offset, unit);
            let plan = copy_dates::plan_copy_dates(ctx, course, source, dest, offset).await?;
            console.confirm(&plan.confirmation)?;
            let message = copy_dates::execute_copy_dates(ctx, plan).await?;
            console.say(&message)?;
            Ok(true)
        }
        Command::AddColumn { course, title } => {
            let column = columns::add_column(ctx, course, &title).await?;
            console.say(&format!("Added column \"{}\".", column.title))?;
            Ok(true)
        }
        Command::RemoveColumn { course, title } => {
            console.confirm(&format!(
                "You are about to delete the column \"{}\" and everything in it. This cannot be undone. Are you sure you wish to proceed?",
                title.trim()
            ))?;
            let column = columns::remove_column(ctx, course, &title).await?;
            console.say(&format!("Removed column \"{}\".", column.title))?;
            Ok(true)
        }
    }
}

async fn run_import<T, R, W>(
    ctx: &BulkContext<T>,
    plan: &ImportPlan,
    console: &mut Console<R, W>,
) -> Result<bool>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    console.notices(&plan.notices)?;
    console.confirm(&plan.confirmation)?;
    let report = ctx
        .execute(plan, &mut LogProgress::new(plan.noun.clone()))
        .await?;
    finish(console, &report)
}

fn finish<R: BufRead, W: Write>(console: &mut Console<R, W>, report: &OutcomeReport) -> Result<bool> {
    info!(
        attempted = report.attempted,
        failed = report.failed,
        "Import finished"
    );
    console.say(&report.message)?;
    Ok(report.is_success())
}
