/// Per-category completion statistics
///
/// Stats are derived on every dashboard render from two counts per
/// category; nothing is stored.
///
/// # Example
///
/// ```
/// use planner_shared::stats::completion_percent;
///
/// assert_eq!(completion_percent(1, 3), 33);
/// assert_eq!(completion_percent(0, 0), 0);
/// ```

use std::collections::BTreeMap;

use serde::Serialize;
use sqlx::SqlitePool;

use crate::models::task::Task;

/// Categories that get a stats bucket
pub const CATEGORIES: [&str; 3] = ["Daily", "Weekly", "Monthly"];

/// Completion figures for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CategoryStat {
    pub total: i64,
    pub complete: i64,
    pub percent: i64,
}

impl CategoryStat {
    pub fn new(complete: i64, total: i64) -> Self {
        Self {
            total,
            complete,
            percent: completion_percent(complete, total),
        }
    }
}

/// `complete * 100 / total`, truncated toward zero; `0` for an empty category
pub fn completion_percent(complete: i64, total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    complete * 100 / total
}

/// Stats for every tracked category, keyed by category name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryStats(BTreeMap<&'static str, CategoryStat>);

impl CategoryStats {
    /// Computes stats for all of `owner_id`'s tasks
    ///
    /// Tasks filed under a category outside [`CATEGORIES`] are ignored.
    pub async fn for_owner(pool: &SqlitePool, owner_id: i64) -> Result<Self, sqlx::Error> {
        let mut stats = BTreeMap::new();

        for category in CATEGORIES {
            let total = Task::count(pool, owner_id, category, None).await?;
            let complete = Task::count(pool, owner_id, category, Some(true)).await?;
            stats.insert(category, CategoryStat::new(complete, total));
        }

        Ok(Self(stats))
    }

    pub fn get(&self, category: &str) -> Option<&CategoryStat> {
        self.0.get(category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &CategoryStat)> {
        self.0.iter().map(|(category, stat)| (*category, stat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_category_is_zero() {
        assert_eq!(completion_percent(0, 0), 0);
    }

    #[test]
    fn test_percent_truncates() {
        assert_eq!(completion_percent(1, 3), 33);
        assert_eq!(completion_percent(2, 3), 66);
        assert_eq!(completion_percent(1, 7), 14);
    }

    #[test]
    fn test_percent_bounds() {
        assert_eq!(completion_percent(0, 5), 0);
        assert_eq!(completion_percent(5, 5), 100);
    }

    #[test]
    fn test_category_stat_new() {
        let stat = CategoryStat::new(1, 4);
        assert_eq!(stat.total, 4);
        assert_eq!(stat.complete, 1);
        assert_eq!(stat.percent, 25);
    }

    #[test]
    fn test_stats_serialize_as_map() {
        let mut map = BTreeMap::new();
        map.insert("Daily", CategoryStat::new(1, 1));
        let stats = CategoryStats(map);

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["Daily"]["percent"], 100);
    }
}
