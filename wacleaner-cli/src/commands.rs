use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{Local, TimeZone};
use color_eyre::Result;
use colored::Colorize;
use dialoguer::Confirm;
use wacleaner_core::{
    Category, DateRange, DeleteReport, Deleter, DetailsState, FileEntry, Filesystem, Lister,
    StdFilesystem, SubView, SweepError, find_category, format_count, format_size,
    resolve_categories,
};

use crate::config::Settings;
use crate::runner::{load_listings, run_delete};

/// What to show or clean inside a category
pub struct Target {
    pub category: String,
    pub view: SubView,
    pub range: Option<DateRange>,
}

/// Which files of the listed sub-view to delete
pub enum Pick {
    All,
    Files(Vec<PathBuf>),
}

fn lookup(settings: &Settings, name: &str) -> Result<Category> {
    let categories = resolve_categories(&settings.home);
    let category = find_category(&categories, name)
        .cloned()
        .ok_or_else(|| SweepError::UnknownCategory(name.to_string()))?;
    Ok(category)
}

/// Build the details state for `target` and list its sub-views
fn open(
    settings: &Settings,
    target: &Target,
    fs: Arc<dyn Filesystem>,
) -> Result<(DetailsState, Lister)> {
    let category = lookup(settings, &target.category)?;
    if !category.has_view(target.view) {
        return Err(color_eyre::eyre::eyre!(
            "{} has no {} folder",
            category.name,
            target.view.label()
        ));
    }

    let lister = Lister::new(fs, settings.listing.clone());
    let mut state = DetailsState::new(category);
    state.set_sort(settings.criteria);
    state.switch_view(target.view);
    let requests = state.set_date_range(target.range);

    for (view, error) in load_listings(&mut state, &lister, requests) {
        if error.is_permission_denied() {
            eprintln!(
                "{} {} folder is not readable: {}",
                "warning:".yellow().bold(),
                view.label(),
                error
            );
        } else {
            log::warn!("Listing {} failed: {}", view.label(), error);
        }
    }

    Ok((state, lister))
}

fn format_modified(modified_ms: i64) -> String {
    Local
        .timestamp_millis_opt(modified_ms)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn print_entries(entries: &[FileEntry]) {
    for entry in entries {
        println!(
            "{}  {:>10}  {:<8}  {}",
            format_modified(entry.modified_ms).dimmed(),
            format_size(entry.size),
            entry.kind.label(),
            entry.name
        );
    }
}

fn print_summary(count: usize, bytes: u64) {
    println!(
        "{} file{}, {}",
        format_count(count as u64),
        if count == 1 { "" } else { "s" },
        format_size(bytes).bold()
    );
}

/// `wacleaner categories`
pub fn categories(settings: &Settings) -> Result<()> {
    let fs = StdFilesystem;
    println!("{} {}", "Home:".bold(), settings.home.display());

    for mut category in resolve_categories(&settings.home) {
        category.refresh_size(&fs);
        let views: Vec<&str> = category.sub_views().iter().map(|v| v.label()).collect();
        println!(
            "{:<16}{:>10}  {:<24}{}",
            category.name.bold(),
            category.size_label.green(),
            views.join("/"),
            category.path.display().to_string().dimmed()
        );
    }

    Ok(())
}

/// `wacleaner list`
pub fn list(settings: &Settings, target: &Target) -> Result<()> {
    let (state, _) = open(settings, target, Arc::new(StdFilesystem))?;

    if state.visible().is_empty() {
        println!("Nothing to clean");
        return Ok(());
    }

    print_entries(state.visible());
    print_summary(state.visible().len(), state.total_size());
    Ok(())
}

/// Resolve a `--file` argument against the listing: full path or bare file name
fn resolve_pick(visible: &[FileEntry], wanted: &Path) -> Option<PathBuf> {
    visible
        .iter()
        .find(|e| e.path == wanted || Path::new(&e.name) == wanted)
        .map(|e| e.path.clone())
}

/// `wacleaner clean`. Returns false when some files could not be deleted.
pub fn clean(
    settings: &Settings,
    target: &Target,
    pick: &Pick,
    assume_yes: bool,
) -> Result<bool> {
    let fs: Arc<dyn Filesystem> = Arc::new(StdFilesystem);
    let (mut state, lister) = open(settings, target, Arc::clone(&fs))?;

    match pick {
        Pick::All => state.select_all(),
        Pick::Files(files) => {
            for wanted in files {
                match resolve_pick(state.visible(), wanted) {
                    Some(path) if !state.selection().contains_path(&path) => {
                        state.toggle(&path);
                    }
                    Some(_) => {}
                    None => eprintln!(
                        "{} {} is not listed in {}",
                        "warning:".yellow().bold(),
                        wanted.display(),
                        target.view.label()
                    ),
                }
            }
        }
    }

    let selected = state.selected_entries();
    if selected.is_empty() {
        println!("Select files to clean up!");
        return Ok(true);
    }

    let bytes: u64 = selected.iter().map(|e| e.size).sum();
    println!("{}", "The following files will be deleted:".bold());
    print_entries(&selected);
    print_summary(selected.len(), bytes);

    if !assume_yes {
        let confirmed = Confirm::new()
            .with_prompt("Delete these files?")
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Cancelled");
            return Ok(true);
        }
    }

    let batch = state.begin_delete()?;
    let deleter = Deleter::new(fs, settings.delete.clone());
    let report = run_delete(&mut state, &lister, deleter, batch, true);
    print_report(&report);

    Ok(report.is_clean())
}

fn print_report(report: &DeleteReport) {
    println!(
        "{} {} ({} file{})",
        "Freed:".green().bold(),
        format_size(report.bytes_freed),
        format_count(report.deleted.len() as u64),
        if report.deleted.len() == 1 { "" } else { "s" }
    );

    for (path, error) in &report.failures {
        eprintln!("  {} {} ({})", "✗".red(), path.display(), error);
    }
    if let Some(summary) = report.failure_summary() {
        eprintln!("{} {}", "error:".red().bold(), summary);
    }
    if report.permission_denied {
        eprintln!(
            "{} some files are write-protected; grant storage access and retry",
            "warning:".yellow().bold()
        );
    }
}
