use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::model::Task;
use crate::util::priority_rank;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum SortKey {
    /// Manual list order
    #[default]
    Order,
    Due,
    Priority,
}

pub fn sort_tasks(view: &mut [&Task], key: SortKey, desc: bool) {
    view.sort_by(|a, b| {
        let ord = compare_tasks(a, b, key);
        if desc { ord.reverse() } else { ord }
    });
}

fn compare_tasks(a: &Task, b: &Task, key: SortKey) -> Ordering {
    match key {
        SortKey::Order => a.order.cmp(&b.order),
        SortKey::Due => a
            .due_at
            .cmp(&b.due_at)
            .then_with(|| compare_priority(a, b))
            .then_with(|| a.order.cmp(&b.order)),
        SortKey::Priority => compare_priority(a, b)
            .then_with(|| a.due_at.cmp(&b.due_at))
            .then_with(|| a.order.cmp(&b.order)),
    }
}

fn compare_priority(a: &Task, b: &Task) -> Ordering {
    priority_rank(a.priority).cmp(&priority_rank(b.priority))
}
