use std::collections::HashMap;

use crate::todo::tag::resolve_group_color;
use crate::todo::{GroupKey, PaletteColor, TagColorMap, Task};

/// Tasks sharing a tag, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskGroup<'a> {
    pub key: GroupKey,
    pub color: &'static PaletteColor,
    pub tasks: Vec<&'a Task>,
}

impl TaskGroup<'_> {
    pub fn tag(&self) -> Option<&str> {
        self.key.tag()
    }

    pub fn is_untagged(&self) -> bool {
        self.key == GroupKey::Untagged
    }
}

/// Group tasks by tag, keeping input order inside each group.
///
/// Tagged groups come out in order of first appearance; the untagged group
/// is always last and is omitted when no task lacks a tag.
pub fn group_by_tag<'a, I>(tasks: I, colors: &TagColorMap) -> Vec<TaskGroup<'a>>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut tagged: Vec<TaskGroup<'a>> = Vec::new();
    let mut untagged: Vec<&'a Task> = Vec::new();

    for task in tasks {
        let key = task.group_key();
        if key == GroupKey::Untagged {
            untagged.push(task);
            continue;
        }
        match index.get(&key) {
            Some(&i) => tagged[i].tasks.push(task),
            None => {
                index.insert(key.clone(), tagged.len());
                tagged.push(TaskGroup {
                    color: resolve_group_color(colors, &key),
                    key,
                    tasks: vec![task],
                });
            }
        }
    }

    if !untagged.is_empty() {
        tagged.push(TaskGroup {
            key: GroupKey::Untagged,
            color: PaletteColor::fallback(),
            tasks: untagged,
        });
    }
    tagged
}

/// Open tasks first, completed after, each side in its incoming order.
pub fn partition_by_completion<'a>(tasks: Vec<&'a Task>) -> Vec<&'a Task> {
    let (mut open, done): (Vec<&Task>, Vec<&Task>) = tasks.into_iter().partition(|t| !t.completed);
    open.extend(done);
    open
}

/// Group by tag, then move completed tasks to the end of every group.
pub fn group_and_sort<'a, I>(tasks: I, colors: &TagColorMap) -> Vec<TaskGroup<'a>>
where
    I: IntoIterator<Item = &'a Task>,
{
    group_by_tag(tasks, colors)
        .into_iter()
        .map(|group| TaskGroup {
            tasks: partition_by_completion(group.tasks),
            ..group
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn task(id: i64, text: &str, tag: Option<&str>, completed: bool) -> Task {
        let mut t = Task::new(id, text, None, tag, id, Utc::now());
        t.completed = completed;
        t
    }

    fn texts<'a>(group: &TaskGroup<'a>) -> Vec<&'a str> {
        group.tasks.iter().map(|&t| t.text.as_str()).collect()
    }

    #[test]
    fn test_completed_sink_within_group() {
        let tasks = vec![
            task(1, "A", Some("x"), false),
            task(2, "B", Some("x"), true),
            task(3, "C", Some("x"), false),
        ];
        let groups = group_and_sort(&tasks, &TagColorMap::new());

        assert_eq!(groups.len(), 1);
        assert_eq!(texts(&groups[0]), vec!["A", "C", "B"]);
    }

    #[test]
    fn test_untagged_group_is_last() {
        let tasks = vec![
            task(1, "loose", None, false),
            task(2, "report", Some("work"), false),
            task(3, "dishes", Some("home"), false),
            task(4, "email", Some("work"), false),
        ];
        let groups = group_and_sort(&tasks, &TagColorMap::new());
        let keys: Vec<String> = groups.iter().map(|g| g.key.to_string()).collect();

        assert_eq!(keys, vec!["work", "home", "(untagged)"]);
        assert_eq!(texts(&groups[0]), vec!["report", "email"]);
        assert!(groups[2].is_untagged());
    }

    #[test]
    fn test_empty_untagged_group_omitted() {
        let tasks = vec![task(1, "report", Some("work"), false)];
        let groups = group_and_sort(&tasks, &TagColorMap::new());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].tag(), Some("work"));
    }

    #[test]
    fn test_no_tasks_no_groups() {
        let tasks: Vec<Task> = Vec::new();
        assert!(group_and_sort(&tasks, &TagColorMap::new()).is_empty());
    }

    #[test]
    fn test_group_colors() {
        let tasks = vec![
            task(1, "report", Some("work"), false),
            task(2, "loose", None, false),
        ];
        let mut colors = TagColorMap::new();
        colors.insert("work".to_string(), "purple".to_string());

        let groups = group_by_tag(&tasks, &colors);
        assert_eq!(groups[0].color.value, "purple");
        assert_eq!(groups[1].color.value, "default");
    }

    #[test]
    fn test_group_by_tag_keeps_completed_in_place() {
        let tasks = vec![
            task(1, "A", Some("x"), true),
            task(2, "B", Some("x"), false),
        ];
        let groups = group_by_tag(&tasks, &TagColorMap::new());
        assert_eq!(texts(&groups[0]), vec!["A", "B"]);
    }

    fn arb_tasks() -> impl Strategy<Value = Vec<Task>> {
        proptest::collection::vec(
            (proptest::option::of(0u8..3), any::<bool>()),
            0..40,
        )
        .prop_map(|specs| {
            specs
                .into_iter()
                .enumerate()
                .map(|(i, (tag, completed))| {
                    let tag = tag.map(|n| format!("tag{}", n));
                    task(i as i64, &format!("t{}", i), tag.as_deref(), completed)
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_grouping_is_stable_partition(tasks in arb_tasks()) {
            let groups = group_and_sort(&tasks, &TagColorMap::new());

            let total: usize = groups.iter().map(|g| g.tasks.len()).sum();
            prop_assert_eq!(total, tasks.len());

            for group in &groups {
                prop_assert!(!group.tasks.is_empty());

                // Completed tasks never precede open ones
                let first_done = group.tasks.iter().position(|t| t.completed);
                if let Some(i) = first_done {
                    prop_assert!(group.tasks[i..].iter().all(|t| t.completed));
                }

                // Equal-status tasks keep their input order (ids are input positions)
                for status in [false, true] {
                    let ids: Vec<i64> = group
                        .tasks
                        .iter()
                        .filter(|t| t.completed == status)
                        .map(|t| t.id)
                        .collect();
                    let mut sorted = ids.clone();
                    sorted.sort();
                    prop_assert_eq!(ids, sorted);
                }
            }
        }
    }
}
