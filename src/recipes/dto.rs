use serde::Deserialize;

use crate::recipes::services::SortBy;

#[derive(Debug, Default, Deserialize)]
pub struct SortQuery {
    #[serde(default)]
    pub criteria: String,
    #[serde(default)]
    pub order: String,
}

impl SortQuery {
    pub fn sort_by(&self) -> SortBy {
        SortBy::from(self.criteria.as_str())
    }

    /// Ascending unless `order` is `desc` or `descending`.
    pub fn ascending(&self) -> bool {
        !matches!(
            self.order.to_ascii_lowercase().as_str(),
            "desc" | "descending"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_title_ascending() {
        let q = SortQuery::default();
        assert_eq!(q.sort_by(), SortBy::Title);
        assert!(q.ascending());
    }

    #[test]
    fn reads_descending_aliases() {
        for order in ["desc", "DESC", "descending"] {
            let q = SortQuery {
                criteria: "cookTime".into(),
                order: order.into(),
            };
            assert!(!q.ascending());
            assert_eq!(q.sort_by(), SortBy::CookTime);
        }
        let q = SortQuery {
            criteria: String::new(),
            order: "asc".into(),
        };
        assert!(q.ascending());
    }
}
