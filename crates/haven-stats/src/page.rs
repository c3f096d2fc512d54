//! Leaderboard pagination and rank computation.

use haven_core::defaults;

/// Common query parameters for leaderboard pages.
#[derive(Debug, Clone, Default)]
pub struct LeaderboardQuery {
    /// Page size; clamped to the configured maximum.
    pub limit: Option<usize>,
    /// Entries to skip.
    pub offset: Option<usize>,
    /// User whose 1-indexed rank over the full ordering is wanted.
    pub for_user: Option<String>,
}

impl LeaderboardQuery {
    pub(crate) fn limit(&self) -> usize {
        self.limit
            .unwrap_or(defaults::DEFAULT_LEADERBOARD_LIMIT)
            .min(defaults::MAX_LEADERBOARD_LIMIT)
    }

    pub(crate) fn offset(&self) -> usize {
        self.offset.unwrap_or(0)
    }
}

/// Slice `sorted` into a page and locate `for_user` in the full ordering.
///
/// The rank is the 1-indexed position over the whole sorted list, not the
/// page.
pub(crate) fn paginate<T>(
    sorted: Vec<T>,
    query: &LeaderboardQuery,
    id_of: impl Fn(&T) -> &str,
) -> (Vec<T>, Option<usize>, usize) {
    let rank = query.for_user.as_deref().and_then(|user| {
        sorted
            .iter()
            .position(|entry| id_of(entry) == user)
            .map(|pos| pos + 1)
    });
    let total = sorted.len();

    let page = sorted
        .into_iter()
        .skip(query.offset())
        .take(query.limit())
        .collect();
    (page, rank, total)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(limit: usize, offset: usize, user: Option<&str>) -> LeaderboardQuery {
        LeaderboardQuery {
            limit: Some(limit),
            offset: Some(offset),
            for_user: user.map(String::from),
        }
    }

    #[test]
    fn rank_is_over_full_ordering_not_the_page() {
        let sorted = vec!["a", "b", "c", "d"];
        let (page, rank, total) = paginate(sorted, &query(2, 2, Some("d")), |e| e);
        assert_eq!(page, vec!["c", "d"]);
        assert_eq!(rank, Some(4));
        assert_eq!(total, 4);
    }

    #[test]
    fn missing_user_has_no_rank() {
        let (_, rank, _) = paginate(vec!["a"], &query(10, 0, Some("zz")), |e| e);
        assert_eq!(rank, None);
    }

    #[test]
    fn limit_is_capped() {
        let q = LeaderboardQuery {
            limit: Some(10_000),
            ..Default::default()
        };
        assert_eq!(q.limit(), defaults::MAX_LEADERBOARD_LIMIT);
    }
}
