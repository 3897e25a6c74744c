//! Task Aggregation
//!
//! Category grouping and overall progress for the board.

use std::collections::HashMap;

use crate::models::Task;

/// Tasks sharing one category name
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
    pub name: String,
    pub color: String,
    pub tasks: Vec<Task>,
}

/// Tasks partitioned by category, in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoardGroups {
    pub categories: Vec<CategoryGroup>,
    pub uncategorized: Vec<Task>,
}

impl BoardGroups {
    /// Number of tasks across all buckets
    pub fn len(&self) -> usize {
        self.categories.iter().map(|g| g.tasks.len()).sum::<usize>() + self.uncategorized.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Header figures for the progress bar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardSummary {
    pub total: usize,
    pub completed: usize,
    pub overall_progress: u8,
}

/// Mean progress rounded to the nearest integer, halves rounding up.
/// An empty list is 0%.
pub fn compute_overall_progress(tasks: &[Task]) -> u8 {
    if tasks.is_empty() {
        return 0;
    }
    let total: u64 = tasks.iter().map(|t| u64::from(t.progress)).sum();
    let count = tasks.len() as u64;
    // Integer form of floor(total / count + 0.5)
    ((total * 2 + count) / (count * 2)) as u8
}

/// Partition tasks by category name, keeping first-seen category order and
/// the original relative order of tasks inside each bucket.
pub fn group_by_category(tasks: &[Task]) -> BoardGroups {
    let mut groups = BoardGroups::default();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for task in tasks {
        let Some((name, category)) = task
            .category
            .as_ref()
            .and_then(|c| c.group_name().map(|name| (name, c)))
        else {
            groups.uncategorized.push(task.clone());
            continue;
        };
        let slot = *index.entry(name).or_insert_with(|| {
            groups.categories.push(CategoryGroup {
                name: name.to_string(),
                color: category.display_color().to_string(),
                tasks: Vec::new(),
            });
            groups.categories.len() - 1
        });
        groups.categories[slot].tasks.push(task.clone());
    }

    groups
}

pub fn summarize(tasks: &[Task]) -> BoardSummary {
    BoardSummary {
        total: tasks.len(),
        completed: tasks.iter().filter(|t| t.is_completed()).count(),
        overall_progress: compute_overall_progress(tasks),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{Category, RecordId};

    pub(crate) fn make_task(id: i64, progress: u8, category: Option<(&str, &str)>) -> Task {
        Task {
            id: RecordId::Number(id),
            title: format!("Task {}", id),
            due_date: "2024-06-01".to_string(),
            estimated_time: "1h".to_string(),
            progress,
            category: category.map(|(name, color)| Category {
                id: None,
                name: Some(name.to_string()),
                color: Some(color.to_string()),
            }),
        }
    }

    #[test]
    fn test_overall_progress_empty() {
        assert_eq!(compute_overall_progress(&[]), 0);
    }

    #[test]
    fn test_overall_progress_rounds_mean() {
        let tasks = vec![make_task(1, 50, None), make_task(2, 100, Some(("Work", "#f00")))];
        assert_eq!(compute_overall_progress(&tasks), 75);

        // 33.33 -> 33
        let tasks = vec![make_task(1, 0, None), make_task(2, 0, None), make_task(3, 100, None)];
        assert_eq!(compute_overall_progress(&tasks), 33);

        // 66.67 -> 67
        let tasks = vec![make_task(1, 100, None), make_task(2, 100, None), make_task(3, 0, None)];
        assert_eq!(compute_overall_progress(&tasks), 67);

        // 0.5 rounds up
        let tasks = vec![make_task(1, 1, None), make_task(2, 0, None)];
        assert_eq!(compute_overall_progress(&tasks), 1);
    }

    #[test]
    fn test_overall_progress_stays_in_range() {
        let all_done: Vec<Task> = (0..9).map(|i| make_task(i, 100, None)).collect();
        assert_eq!(compute_overall_progress(&all_done), 100);
    }

    #[test]
    fn test_group_by_category_scenario() {
        let tasks = vec![make_task(1, 50, None), make_task(2, 100, Some(("Work", "#f00")))];
        let groups = group_by_category(&tasks);

        assert_eq!(groups.categories.len(), 1);
        assert_eq!(groups.categories[0].name, "Work");
        assert_eq!(groups.categories[0].color, "#f00");
        assert_eq!(groups.categories[0].tasks[0].id, RecordId::Number(2));
        assert_eq!(groups.uncategorized.len(), 1);
        assert_eq!(groups.uncategorized[0].id, RecordId::Number(1));
    }

    #[test]
    fn test_group_by_category_is_partition_in_first_seen_order() {
        let tasks = vec![
            make_task(1, 0, Some(("Home", "#0f0"))),
            make_task(2, 10, Some(("Work", "#f00"))),
            make_task(3, 20, None),
            make_task(4, 30, Some(("Home", "#00f"))),
            make_task(5, 40, Some(("", "#123"))),
            make_task(6, 50, Some(("Work", "#f00"))),
        ];
        let groups = group_by_category(&tasks);

        assert_eq!(groups.len(), tasks.len());
        let names: Vec<&str> = groups.categories.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["Home", "Work"]);

        // First-seen color wins, relative order kept
        assert_eq!(groups.categories[0].color, "#0f0");
        let home_ids: Vec<_> = groups.categories[0].tasks.iter().map(|t| t.id.clone()).collect();
        assert_eq!(home_ids, vec![RecordId::Number(1), RecordId::Number(4)]);

        let loose: Vec<_> = groups.uncategorized.iter().map(|t| t.id.clone()).collect();
        assert_eq!(loose, vec![RecordId::Number(3), RecordId::Number(5)]);

        // Same input, same grouping
        assert_eq!(group_by_category(&tasks), groups);
    }

    #[test]
    fn test_summarize() {
        let tasks = vec![make_task(1, 100, None), make_task(2, 20, None)];
        let summary = summarize(&tasks);
        assert_eq!(summary.total, 2);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.overall_progress, 60);
    }
}
