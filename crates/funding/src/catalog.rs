//! Pure campaign catalog helpers: which campaigns are fundable, text and
//! category filtering, and the dashboard's top pick.

use crate::Campaign;

/// Retains active campaigns and orders them most recently started first.
///
/// Campaigns without a start date sort last. This is the shape the browse
/// view renders straight from a catalog fetch.
#[must_use]
pub fn fundable(mut campaigns: Vec<Campaign>) -> Vec<Campaign> {
    campaigns.retain(Campaign::is_active);
    campaigns.sort_by(|a, b| b.start_date.cmp(&a.start_date));
    campaigns
}

/// Case-insensitive catalog filter.
///
/// `query` matches if the title, description, or category contains it;
/// `category` of `"All"` passes everything, otherwise the campaign category
/// must match exactly (ignoring case). Both predicates are ANDed. Returns
/// indices into `campaigns` so the caller's selection state can keep
/// pointing at the unfiltered cache.
#[must_use]
pub fn filter(campaigns: &[Campaign], query: &str, category: &str) -> Vec<usize> {
    let query = query.to_lowercase();
    let all_categories = category.eq_ignore_ascii_case("All");

    campaigns
        .iter()
        .enumerate()
        .filter(|(_, c)| {
            let matches_query = query.is_empty()
                || c.title.to_lowercase().contains(&query)
                || c.description.to_lowercase().contains(&query)
                || c.category
                    .as_deref()
                    .is_some_and(|cat| cat.to_lowercase().contains(&query));

            let matches_category = all_categories
                || c.category
                    .as_deref()
                    .is_some_and(|cat| cat.eq_ignore_ascii_case(category));

            matches_query && matches_category
        })
        .map(|(index, _)| index)
        .collect()
}

/// The campaign with the highest collected total, for the dashboard card.
#[must_use]
pub fn top_by_collected(campaigns: &[Campaign]) -> Option<&Campaign> {
    campaigns.iter().max_by_key(|c| c.collected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Money;
    use chrono::NaiveDate;

    fn campaign(id: i64, title: &str, category: &str, status: &str, start: &str) -> Campaign {
        Campaign {
            id,
            title: title.to_string(),
            description: format!("{title} description"),
            category: Some(category.to_string()),
            goal: Money::new(1000_00),
            collected: Money::new(id * 100_00),
            status: status.to_string(),
            start_date: NaiveDate::parse_from_str(start, "%Y-%m-%d").ok(),
            end_date: None,
        }
    }

    #[test]
    fn fundable_keeps_active_newest_first() {
        let campaigns = vec![
            campaign(1, "Old Drive", "Charity", "Active", "2024-01-01"),
            campaign(2, "Closed Drive", "Charity", "Closed", "2024-06-01"),
            campaign(3, "New Drive", "Charity", "Active", "2024-09-01"),
        ];

        let listed = fundable(campaigns);
        let ids: Vec<i64> = listed.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn fundable_sorts_missing_start_dates_last() {
        let mut undated = campaign(1, "Undated", "Charity", "Active", "bad");
        undated.start_date = None;
        let campaigns = vec![
            undated,
            campaign(2, "Dated", "Charity", "Active", "2024-01-01"),
        ];

        let listed = fundable(campaigns);
        let ids: Vec<i64> = listed.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn filter_matches_any_text_field() {
        let campaigns = vec![
            campaign(1, "Clean Water", "Charity", "Active", "2024-01-01"),
            campaign(2, "Robotics Lab", "Startup", "Active", "2024-02-01"),
        ];

        assert_eq!(filter(&campaigns, "water", "All"), vec![0]);
        assert_eq!(filter(&campaigns, "ROBOTICS", "All"), vec![1]);
        // Category text participates in the query match too.
        assert_eq!(filter(&campaigns, "charity", "All"), vec![0]);
        assert_eq!(filter(&campaigns, "", "All"), vec![0, 1]);
    }

    #[test]
    fn filter_ands_query_and_category() {
        let campaigns = vec![
            campaign(1, "Clean Water", "Charity", "Active", "2024-01-01"),
            campaign(2, "Water Robotics", "Startup", "Active", "2024-02-01"),
        ];

        assert_eq!(filter(&campaigns, "water", "Startup"), vec![1]);
        assert_eq!(filter(&campaigns, "water", "charity"), vec![0]);
        assert!(filter(&campaigns, "clean", "Startup").is_empty());
    }

    #[test]
    fn filter_skips_uncategorized_unless_all() {
        let mut uncategorized = campaign(1, "Misc Drive", "x", "Active", "2024-01-01");
        uncategorized.category = None;
        let campaigns = vec![uncategorized];

        assert_eq!(filter(&campaigns, "", "All"), vec![0]);
        assert!(filter(&campaigns, "", "Charity").is_empty());
    }

    #[test]
    fn top_by_collected_picks_the_max() {
        let campaigns = vec![
            campaign(1, "Small", "Charity", "Active", "2024-01-01"),
            campaign(3, "Big", "Charity", "Active", "2024-02-01"),
            campaign(2, "Mid", "Charity", "Active", "2024-03-01"),
        ];

        assert_eq!(top_by_collected(&campaigns).map(|c| c.id), Some(3));
        assert!(top_by_collected(&[]).is_none());
    }
}
