use crate::model::{check_index, clean_text, Task, TaskError, TaskIndex};
use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use std::env;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

const PROJECT_DIR: &str = ".tasktally";
const STORE_FILE: &str = "tasks.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreScope {
    Explicit,
    Project,
    Global,
}

impl StoreScope {
    pub fn label(&self) -> &'static str {
        match self {
            StoreScope::Explicit => "explicit",
            StoreScope::Project => "project",
            StoreScope::Global => "global",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoreLocation {
    pub path: PathBuf,
    pub scope: StoreScope,
}

pub trait Slot {
    fn read(&self) -> Result<Option<String>>;
    fn write(&mut self, data: &str) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileSlot {
    path: PathBuf,
}

impl FileSlot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSlot { path: path.into() }
    }
}

impl Slot for FileSlot {
    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).with_context(|| format!("reading {:?}", self.path)),
        }
    }

    fn write(&mut self, data: &str) -> Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).with_context(|| format!("creating {:?}", dir))?;
        let mut temp =
            NamedTempFile::new_in(&dir).with_context(|| format!("creating temp file in {:?}", dir))?;
        temp.write_all(data.as_bytes())?;
        temp.flush()?;
        temp.persist(&self.path)
            .map_err(|err| anyhow!("failed to persist {}: {}", self.path.display(), err))?;
        Ok(())
    }
}

#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    pub data: Option<String>,
    pub fail_writes: bool,
}

#[cfg(test)]
impl Slot for MemorySlot {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.data.clone())
    }

    fn write(&mut self, data: &str) -> Result<()> {
        if self.fail_writes {
            return Err(anyhow!("storage unavailable"));
        }
        self.data = Some(data.to_string());
        Ok(())
    }
}

#[derive(Debug)]
pub struct TaskStore<S: Slot = FileSlot> {
    slot: S,
}

impl<S: Slot> TaskStore<S> {
    pub fn new(slot: S) -> Self {
        TaskStore { slot }
    }

    #[cfg(test)]
    pub fn slot(&self) -> &S {
        &self.slot
    }

    #[cfg(test)]
    pub fn slot_mut(&mut self) -> &mut S {
        &mut self.slot
    }

    pub fn load(&self) -> Vec<Task> {
        match self.read_tasks() {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(error = %err, "task slot unusable, starting empty");
                Vec::new()
            }
        }
    }

    // Mutations go through here so they never replace a slot they could not read.
    fn read_tasks(&self) -> Result<Vec<Task>> {
        let Some(raw) = self.slot.read()? else {
            debug!("task slot absent, starting empty");
            return Ok(Vec::new());
        };
        let tasks = serde_json::from_str::<Vec<Task>>(&raw)
            .map_err(|err| TaskError::MalformedStore(err.to_string()))?;
        debug!(count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    pub fn save(&mut self, tasks: &[Task]) -> Result<()> {
        let serialized = serde_json::to_string(tasks).context("serializing tasks")?;
        self.slot.write(&serialized).context("saving tasks")?;
        debug!(count = tasks.len(), "saved tasks");
        Ok(())
    }

    pub fn append(&mut self, task: Task) -> Result<TaskIndex> {
        let mut tasks = self.read_tasks()?;
        info!(category = %task.category, "appending task");
        tasks.push(task);
        self.save(&tasks)?;
        Ok(tasks.len() - 1)
    }

    pub fn set_completed(&mut self, index: TaskIndex, value: bool) -> Result<()> {
        let mut tasks = self.read_tasks()?;
        check_index(&tasks, index)?;
        tasks[index].completed = value;
        info!(index, completed = value, "setting completion");
        self.save(&tasks)
    }

    pub fn update_text(&mut self, index: TaskIndex, text: &str) -> Result<()> {
        let text = clean_text(text)?;
        let mut tasks = self.read_tasks()?;
        check_index(&tasks, index)?;
        tasks[index].text = text;
        info!(index, "updating task text");
        self.save(&tasks)
    }

    pub fn remove(&mut self, index: TaskIndex) -> Result<Task> {
        let mut tasks = self.read_tasks()?;
        check_index(&tasks, index)?;
        let removed = tasks.remove(index);
        info!(index, "removing task");
        self.save(&tasks)?;
        Ok(removed)
    }
}

impl TaskStore<FileSlot> {
    pub fn open(location: &StoreLocation) -> Self {
        TaskStore::new(FileSlot::new(location.path.clone()))
    }
}

pub fn init_project_store() -> Result<StoreLocation> {
    let cwd = env::current_dir()?;
    let path = cwd.join(PROJECT_DIR).join(STORE_FILE);
    let location = StoreLocation {
        path,
        scope: StoreScope::Project,
    };
    if !location.path.exists() {
        TaskStore::open(&location).save(&[])?;
        info!(path = %location.path.display(), "initialized project store");
    }
    Ok(location)
}

pub fn locate_store(explicit: Option<PathBuf>, start: &Path) -> Result<StoreLocation> {
    if let Some(path) = explicit {
        return Ok(StoreLocation {
            path,
            scope: StoreScope::Explicit,
        });
    }
    if let Some(project_path) = find_project_store(start) {
        return Ok(StoreLocation {
            path: project_path,
            scope: StoreScope::Project,
        });
    }
    Ok(StoreLocation {
        path: global_store_path()?,
        scope: StoreScope::Global,
    })
}

fn find_project_store(start: &Path) -> Option<PathBuf> {
    let mut dir = Some(start);
    while let Some(current) = dir {
        let candidate = current.join(PROJECT_DIR).join(STORE_FILE);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = current.parent();
    }
    None
}

fn global_store_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "tasktally").context("locating data directory")?;
    Ok(dirs.data_dir().join(STORE_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use tempfile::tempdir;

    fn memory_store() -> TaskStore<MemorySlot> {
        TaskStore::new(MemorySlot::default())
    }

    fn task(text: &str, category: Category) -> Task {
        Task::new(text, category).unwrap()
    }

    #[test]
    fn absent_or_malformed_slot_loads_empty() {
        let mut store = memory_store();
        assert!(store.load().is_empty());
        store.slot_mut().data = Some("{not json".into());
        assert!(store.load().is_empty());
        store.slot_mut().data = Some("null".into());
        assert!(store.load().is_empty());
    }

    #[test]
    fn save_of_load_is_byte_identical() {
        let raw = r#"[{"text":"a","category":"work","completed":false},{"text":"b","category":"health","completed":true}]"#;
        let mut store = TaskStore::new(MemorySlot {
            data: Some(raw.into()),
            fail_writes: false,
        });
        let tasks = store.load();
        store.save(&tasks).unwrap();
        assert_eq!(store.slot().data.as_deref(), Some(raw));
    }

    #[test]
    fn append_keeps_insertion_order() {
        let mut store = memory_store();
        assert_eq!(store.append(task("Buy milk", Category::Personal)).unwrap(), 0);
        assert_eq!(store.append(task("Report", Category::Work)).unwrap(), 1);
        let tasks = store.load();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].text, "Buy milk");
        assert!(!tasks[0].completed);
        assert_eq!(tasks[1].category, Category::Work);
    }

    #[test]
    fn field_updates_persist() {
        let mut store = memory_store();
        store.append(task("Buy milk", Category::Personal)).unwrap();
        store.set_completed(0, true).unwrap();
        store.update_text(0, " Buy oat milk ").unwrap();
        let tasks = store.load();
        assert!(tasks[0].completed);
        assert_eq!(tasks[0].text, "Buy oat milk");
    }

    #[test]
    fn empty_edit_leaves_text_unchanged() {
        let mut store = memory_store();
        store.append(task("Buy milk", Category::Personal)).unwrap();
        let err = store.update_text(0, "  ").unwrap_err();
        assert_eq!(err.downcast_ref::<TaskError>(), Some(&TaskError::EmptyText));
        assert_eq!(store.load()[0].text, "Buy milk");
    }

    #[test]
    fn remove_shifts_later_tasks_down() {
        let mut store = memory_store();
        for name in ["a", "b", "c"] {
            store.append(task(name, Category::School)).unwrap();
        }
        let removed = store.remove(1).unwrap();
        assert_eq!(removed.text, "b");
        let texts: Vec<_> = store.load().into_iter().map(|t| t.text).collect();
        assert_eq!(texts, ["a", "c"]);
    }

    #[test]
    fn out_of_range_index_is_a_recoverable_noop() {
        let mut store = memory_store();
        store.append(task("only", Category::Work)).unwrap();
        let before = store.slot().data.clone();
        for err in [
            store.set_completed(3, true).unwrap_err(),
            store.update_text(1, "x").unwrap_err(),
            store.remove(5).map(|_| ()).unwrap_err(),
        ] {
            assert!(matches!(
                err.downcast_ref::<TaskError>(),
                Some(TaskError::IndexOutOfRange { len: 1, .. })
            ));
        }
        assert_eq!(store.slot().data, before);
    }

    #[test]
    fn write_failures_propagate() {
        let mut store = TaskStore::new(MemorySlot {
            data: None,
            fail_writes: true,
        });
        assert!(store.append(task("x", Category::Work)).is_err());
        assert!(store.load().is_empty());
    }

    #[test]
    fn malformed_slot_is_never_overwritten() {
        let raw = r#"[{"text":"keep","category":"work","completed":false},{"text":"x","category":"chores","completed":false}]"#;
        let mut store = TaskStore::new(MemorySlot {
            data: Some(raw.into()),
            fail_writes: false,
        });
        assert!(store.load().is_empty());

        let err = store.append(task("new", Category::Personal)).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<TaskError>(),
            Some(TaskError::MalformedStore(msg)) if msg.contains("chores")
        ));
        assert!(store.set_completed(0, true).is_err());
        assert!(store.remove(0).is_err());
        assert_eq!(store.slot().data.as_deref(), Some(raw));
    }

    #[test]
    fn file_slot_round_trips_and_creates_parents() {
        let temp = tempdir().expect("tempdir");
        let location = StoreLocation {
            path: temp.path().join("nested/dir/tasks.json"),
            scope: StoreScope::Explicit,
        };
        let mut store = TaskStore::open(&location);
        assert!(store.load().is_empty());
        store.append(task("Stretch", Category::Health)).unwrap();
        let raw = fs::read_to_string(&location.path).unwrap();
        assert_eq!(
            raw,
            r#"[{"text":"Stretch","category":"health","completed":false}]"#
        );
        assert_eq!(TaskStore::open(&location).load().len(), 1);
    }

    #[test]
    fn locate_prefers_explicit_then_nearest_project() {
        let temp = tempdir().expect("tempdir");
        let project = temp.path().join(PROJECT_DIR);
        fs::create_dir_all(&project).unwrap();
        fs::write(project.join(STORE_FILE), "[]").unwrap();
        let nested = temp.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();

        let found = locate_store(None, &nested).unwrap();
        assert_eq!(found.scope, StoreScope::Project);
        assert_eq!(found.path, project.join(STORE_FILE));

        let explicit = locate_store(Some(temp.path().join("x.json")), &nested).unwrap();
        assert_eq!(explicit.scope, StoreScope::Explicit);
    }
}
