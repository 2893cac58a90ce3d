use crate::model::{Category, Task, TaskIndex};
use crate::stats::Stats;
use crate::storage::{Slot, TaskStore};
use anyhow::Result;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub index: TaskIndex,
    pub text: String,
    pub category: Category,
    pub completed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    Empty,
    Populated,
}

#[derive(Debug, Clone)]
pub struct TaskView {
    rows: Vec<Row>,
    mode: ListMode,
    stats: Stats,
}

impl Default for TaskView {
    fn default() -> Self {
        TaskView {
            rows: Vec::new(),
            mode: ListMode::Empty,
            stats: Stats::default(),
        }
    }
}

impl TaskView {
    pub fn load<S: Slot>(store: &TaskStore<S>) -> Self {
        let mut view = TaskView::default();
        view.rebuild_list(store);
        view
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn mode(&self) -> ListMode {
        self.mode
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn render_row(&mut self, task: &Task, index: TaskIndex) {
        self.rows.push(Row {
            index,
            text: task.text.clone(),
            category: task.category,
            completed: task.completed,
        });
    }

    pub fn rebuild_list<S: Slot>(&mut self, store: &TaskStore<S>) {
        self.rows.clear();
        let tasks = store.load();
        for (index, task) in tasks.iter().enumerate() {
            self.render_row(task, index);
        }
        debug!(rows = self.rows.len(), "rebuilt task list");
        self.toggle_empty_state(store);
        self.compute_stats(store);
    }

    pub fn toggle_empty_state<S: Slot>(&mut self, store: &TaskStore<S>) {
        self.mode = if store.load().is_empty() {
            ListMode::Empty
        } else {
            ListMode::Populated
        };
    }

    pub fn compute_stats<S: Slot>(&mut self, store: &TaskStore<S>) {
        self.stats = Stats::compute(&store.load());
    }

    pub fn add<S: Slot>(&mut self, store: &mut TaskStore<S>, task: Task) -> Result<TaskIndex> {
        let index = store.append(task.clone())?;
        self.render_row(&task, index);
        self.toggle_empty_state(store);
        self.compute_stats(store);
        Ok(index)
    }

    pub fn set_completed<S: Slot>(
        &mut self,
        store: &mut TaskStore<S>,
        index: TaskIndex,
        value: bool,
    ) -> Result<()> {
        store.set_completed(index, value)?;
        if let Some(row) = self.rows.iter_mut().find(|r| r.index == index) {
            row.completed = value;
        }
        self.compute_stats(store);
        Ok(())
    }

    pub fn delete<S: Slot>(&mut self, store: &mut TaskStore<S>, index: TaskIndex) -> Result<Task> {
        let removed = store.remove(index)?;
        // Later rows are now off by one until the rebuild.
        self.rows.retain(|r| r.index != index);
        self.rebuild_list(store);
        Ok(removed)
    }

    pub fn edit<S: Slot>(
        &mut self,
        store: &mut TaskStore<S>,
        index: TaskIndex,
        text: &str,
    ) -> Result<bool> {
        if text.trim().is_empty() {
            return Ok(false);
        }
        store.update_text(index, text)?;
        self.rebuild_list(store);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySlot;

    fn store_with(tasks: &[(&str, Category, bool)]) -> TaskStore<MemorySlot> {
        let mut store = TaskStore::new(MemorySlot::default());
        let tasks: Vec<Task> = tasks
            .iter()
            .map(|(text, category, completed)| Task {
                text: text.to_string(),
                category: *category,
                completed: *completed,
            })
            .collect();
        store.save(&tasks).unwrap();
        store
    }

    fn assert_aligned(view: &TaskView, store: &TaskStore<MemorySlot>) {
        let tasks = store.load();
        assert_eq!(view.rows().len(), tasks.len());
        for (pos, (row, task)) in view.rows().iter().zip(&tasks).enumerate() {
            assert_eq!(row.index, pos);
            assert_eq!(row.text, task.text);
            assert_eq!(row.completed, task.completed);
        }
    }

    #[test]
    fn empty_store_shows_empty_state() {
        let store = store_with(&[]);
        let view = TaskView::load(&store);
        assert_eq!(view.mode(), ListMode::Empty);
        assert!(view.rows().is_empty());
    }

    #[test]
    fn add_toggle_delete_lifecycle() {
        let mut store = store_with(&[]);
        let mut view = TaskView::load(&store);

        let task = Task::new("Buy milk", Category::Personal).unwrap();
        assert_eq!(view.add(&mut store, task).unwrap(), 0);
        assert_eq!(view.mode(), ListMode::Populated);
        assert_eq!(store.load().len(), 1);
        assert!(!store.load()[0].completed);
        let personal = view.stats().get(Category::Personal);
        assert_eq!(personal.count_label(), "1 tasks");
        assert_eq!(personal.percent(), 0);

        view.set_completed(&mut store, 0, true).unwrap();
        assert!(store.load()[0].completed);
        assert!(view.rows()[0].completed);
        assert_eq!(view.stats().get(Category::Personal).percent(), 100);

        view.delete(&mut store, 0).unwrap();
        assert!(store.load().is_empty());
        assert_eq!(view.mode(), ListMode::Empty);
        assert_eq!(view.stats().get(Category::Personal).total, 0);
    }

    #[test]
    fn delete_realigns_remaining_rows() {
        let mut store = store_with(&[
            ("a", Category::Work, false),
            ("b", Category::School, true),
            ("c", Category::Health, false),
            ("d", Category::Work, true),
        ]);
        let mut view = TaskView::load(&store);
        view.delete(&mut store, 1).unwrap();
        assert_aligned(&view, &store);
        assert_eq!(view.rows()[1].text, "c");
        assert_eq!(view.rows()[2].index, 2);
    }

    #[test]
    fn toggle_patches_without_reordering() {
        let mut store = store_with(&[("a", Category::Work, false), ("b", Category::Work, false)]);
        let mut view = TaskView::load(&store);
        view.set_completed(&mut store, 1, true).unwrap();
        assert_aligned(&view, &store);
        assert_eq!(view.stats().get(Category::Work).percent_label(), "50%");
    }

    #[test]
    fn blank_edit_is_a_noop() {
        let mut store = store_with(&[("Buy milk", Category::Personal, false)]);
        let mut view = TaskView::load(&store);
        assert!(!view.edit(&mut store, 0, "").unwrap());
        assert!(!view.edit(&mut store, 0, "   ").unwrap());
        assert_eq!(store.load()[0].text, "Buy milk");
        assert!(view.edit(&mut store, 0, "Buy bread").unwrap());
        assert_eq!(view.rows()[0].text, "Buy bread");
    }

    #[test]
    fn stale_index_leaves_view_untouched() {
        let mut store = store_with(&[("a", Category::Work, false)]);
        let mut view = TaskView::load(&store);
        assert!(view.set_completed(&mut store, 4, true).is_err());
        assert!(view.delete(&mut store, 4).is_err());
        assert!(view.edit(&mut store, 4, "x").is_err());
        assert_aligned(&view, &store);
    }

    #[test]
    fn stats_match_mixed_collection() {
        let store = store_with(&[
            ("a", Category::Work, false),
            ("b", Category::Work, true),
            ("c", Category::Personal, true),
        ]);
        let view = TaskView::load(&store);
        let stats = view.stats();
        assert_eq!(stats.get(Category::Work).count_label(), "2 tasks");
        assert_eq!(stats.get(Category::Work).percent(), 50);
        assert_eq!(stats.get(Category::Personal).percent(), 100);
        assert_eq!(stats.get(Category::School).percent_label(), "0%");
        assert_eq!(stats.get(Category::Health).percent_label(), "0%");
    }
}
