use crate::model::{Category, Task};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryStats {
    pub total: usize,
    pub done: usize,
}

impl CategoryStats {
    pub fn percent(&self) -> u16 {
        if self.total == 0 {
            return 0;
        }
        let done = self.done.min(self.total);
        ((done * 200 + self.total) / (self.total * 2)) as u16
    }

    pub fn count_label(&self) -> String {
        format!("{} tasks", self.total)
    }

    pub fn percent_label(&self) -> String {
        format!("{}%", self.percent())
    }

    pub fn fill_ratio(&self) -> f64 {
        f64::from(self.percent()) / 100.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    by_category: [CategoryStats; 4],
}

impl Stats {
    pub fn compute(tasks: &[Task]) -> Self {
        let mut stats = Stats::default();
        for task in tasks {
            let entry = &mut stats.by_category[task.category.position()];
            entry.total += 1;
            if task.completed {
                entry.done += 1;
            }
        }
        stats
    }

    pub fn get(&self, category: Category) -> CategoryStats {
        self.by_category[category.position()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, CategoryStats)> + '_ {
        Category::ALL.iter().map(move |c| (*c, self.get(*c)))
    }
}
