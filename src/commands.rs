use crate::model::{Category, Task, TaskIndex};
use crate::stats::{CategoryStats, Stats};
use crate::storage::{init_project_store, locate_store, StoreLocation, TaskStore};
use crate::ui;
use crate::view::TaskView;
use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;

const BAR_WIDTH: usize = 20;

pub fn init() -> Result<()> {
    let location = init_project_store()?;
    println!("Initialized task store at {}", location.path.display());
    Ok(())
}

pub fn list(store_path: Option<PathBuf>, category: Option<String>) -> Result<()> {
    let filter = category
        .as_deref()
        .map(str::parse::<Category>)
        .transpose()?;
    let location = resolve(store_path)?;
    let tasks = TaskStore::open(&location).load();
    print!("{}", format_task_list(&tasks, filter));
    Ok(())
}

pub fn add(store_path: Option<PathBuf>, text: String, category: String) -> Result<()> {
    let category: Category = category.parse()?;
    let task = Task::new(&text, category)?;
    let location = resolve(store_path)?;
    let index = TaskStore::open(&location).append(task)?;
    println!("Added task {} ({})", index + 1, category);
    Ok(())
}

pub fn done(store_path: Option<PathBuf>, position: usize, undo: bool) -> Result<()> {
    let index = to_index(position)?;
    let location = resolve(store_path)?;
    TaskStore::open(&location)
        .set_completed(index, !undo)
        .with_context(|| format!("updating task {}", position))?;
    if undo {
        println!("Reopened task {}", position);
    } else {
        println!("Completed task {}", position);
    }
    Ok(())
}

pub fn edit(store_path: Option<PathBuf>, position: usize, text: String) -> Result<()> {
    let index = to_index(position)?;
    let location = resolve(store_path)?;
    TaskStore::open(&location)
        .update_text(index, &text)
        .with_context(|| format!("editing task {}", position))?;
    println!("Updated task {}", position);
    Ok(())
}

pub fn remove(store_path: Option<PathBuf>, position: usize) -> Result<()> {
    let index = to_index(position)?;
    let location = resolve(store_path)?;
    let removed = TaskStore::open(&location)
        .remove(index)
        .with_context(|| format!("deleting task {}", position))?;
    println!("Deleted task {}: {}", position, removed.text);
    Ok(())
}

pub fn stats(store_path: Option<PathBuf>) -> Result<()> {
    let location = resolve(store_path)?;
    let tasks = TaskStore::open(&location).load();
    print!("{}", format_stats(&Stats::compute(&tasks)));
    Ok(())
}

pub fn tui(store_path: Option<PathBuf>, verbose: u8) -> Result<()> {
    let location = resolve(store_path)?;
    let _guard = crate::logging::init_file(verbose, &location.path)?;
    let store = TaskStore::open(&location);
    let view = TaskView::load(&store);
    ui::run(store, view, location)
}

pub fn resolve(store_path: Option<PathBuf>) -> Result<StoreLocation> {
    let cwd = env::current_dir()?;
    locate_store(store_path, &cwd)
}

fn to_index(position: usize) -> Result<TaskIndex> {
    if position == 0 {
        bail!("task positions start at 1");
    }
    Ok(position - 1)
}

fn format_task_list(tasks: &[Task], filter: Option<Category>) -> String {
    let mut out = String::new();
    let mut shown = 0;
    for (index, task) in tasks.iter().enumerate() {
        if filter.is_some_and(|c| c != task.category) {
            continue;
        }
        shown += 1;
        out.push_str(&format!(
            "{:>3}. [{}] {} ({})\n",
            index + 1,
            if task.completed { "x" } else { " " },
            task.text,
            task.category
        ));
    }
    if shown == 0 {
        out.push_str("(no tasks)\n");
    }
    out
}

fn format_stats(stats: &Stats) -> String {
    stats
        .iter()
        .map(|(category, stat)| {
            format!(
                "{:<9}{:>9}  {}  {:>4}\n",
                category.label(),
                stat.count_label(),
                text_bar(&stat),
                stat.percent_label()
            )
        })
        .collect()
}

fn text_bar(stat: &CategoryStats) -> String {
    let filled = (stat.percent() as usize * BAR_WIDTH + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}
