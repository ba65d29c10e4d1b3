use super::grouping::{TaskGroup, group_by_tag};
use crate::todo::{TagColorMap, Task};

/// Favorite tasks from the whole list, grouped by tag in list order.
/// Completed favorites stay where they are.
pub fn favorite_groups<'a>(tasks: &'a [Task], colors: &TagColorMap) -> Vec<TaskGroup<'a>> {
    group_by_tag(tasks.iter().filter(|t| t.is_favorite), colors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use pretty_assertions::assert_eq;

    fn task(id: i64, tag: Option<&str>, favorite: bool, completed: bool) -> Task {
        // Due dates far apart so no single period would contain them all
        let due = NaiveDate::from_ymd_opt(2020 + id as i32, 1, 1);
        let mut t = Task::new(id, format!("t{}", id), due, tag, id, Utc::now());
        t.is_favorite = favorite;
        t.completed = completed;
        t
    }

    #[test]
    fn test_favorites_across_all_periods() {
        let tasks = vec![
            task(1, Some("work"), true, true),
            task(2, None, true, false),
            task(3, Some("work"), false, false),
            task(4, Some("work"), true, false),
            task(5, Some("home"), true, false),
        ];
        let groups = favorite_groups(&tasks, &TagColorMap::new());

        let summary: Vec<(String, Vec<i64>)> = groups
            .iter()
            .map(|g| (g.key.to_string(), g.tasks.iter().map(|t| t.id).collect()))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("work".to_string(), vec![1, 4]),
                ("home".to_string(), vec![5]),
                ("(untagged)".to_string(), vec![2]),
            ]
        );
    }

    #[test]
    fn test_no_favorites() {
        let tasks = vec![task(1, None, false, false)];
        assert!(favorite_groups(&tasks, &TagColorMap::new()).is_empty());
    }
}
