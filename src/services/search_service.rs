// src/services/search_service.rs

// Busca por palavra-chave: contém (substring), sem diferenciar maiúsculas.
// Sem ranking, sem tokenização. O limite é só de exibição.

use crate::models::{
    inventory::InventoryItem,
    search::{SearchPage, UsageMatch},
};

pub const DEFAULT_DISPLAY_LIMIT: usize = 10;

#[derive(Debug, Default)]
pub struct SearchResults<'a> {
    pub items: Vec<&'a InventoryItem>,
    pub usages: Vec<(&'a InventoryItem, usize)>,
}

impl SearchResults<'_> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.usages.is_empty()
    }

    pub fn page(&self, limit: usize) -> SearchPage {
        SearchPage {
            items: self.items.iter().take(limit).map(|i| (*i).clone()).collect(),
            more_items: self.items.len().saturating_sub(limit),
            usages: self
                .usages
                .iter()
                .take(limit)
                .map(|(item, idx)| UsageMatch {
                    item_id: item.id.clone(),
                    item_code: item.item_code.clone(),
                    description: item.description.clone(),
                    usage: item.usage[*idx].clone(),
                })
                .collect(),
            more_usages: self.usages.len().saturating_sub(limit),
        }
    }
}

/// O chamador deve barrar consultas vazias antes de chamar.
pub fn search<'a>(items: &'a [InventoryItem], query: &str) -> SearchResults<'a> {
    let needle = query.trim().to_lowercase();
    let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);

    let mut results = SearchResults::default();
    for item in items {
        if contains(&item.item_code)
            || contains(&item.description)
            || contains(&item.pr_number)
            || contains(&item.project_id)
        {
            results.items.push(item);
        }

        for (idx, usage) in item.usage.iter().enumerate() {
            if contains(&usage.project_id) || contains(&usage.issued_to) || contains(&usage.date) {
                results.usages.push((item, idx));
            }
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::dashboard_service::fixtures::{item, usage};

    fn inventory() -> Vec<InventoryItem> {
        let mut beam = item("1", "TIS-FAB-576", "PR-576-001", "BM-200");
        beam.usage = vec![usage("u1", "TIS-FAB-577", 2, "Carlos Mendes")];
        vec![
            beam,
            item("2", "TIS-FAB-576", "PR-576-002", "PL-10"),
            item("3", "YARD", "PR-9", "CH-75"),
        ]
    }

    #[test]
    fn finds_item_by_code_fragment() {
        let items = inventory();
        let results = search(&items, "200");

        assert_eq!(results.items.len(), 1);
        assert_eq!(results.items[0].item_code, "BM-200");
    }

    #[test]
    fn match_is_case_insensitive_across_fields() {
        let items = inventory();
        assert_eq!(search(&items, "tis-fab").items.len(), 2);
        assert_eq!(search(&items, "steel ch").items.len(), 1);
        assert_eq!(search(&items, "pr-9").items.len(), 1);
    }

    #[test]
    fn usage_matches_recipient_project_and_raw_date() {
        let items = inventory();

        let by_name = search(&items, "carlos");
        assert_eq!(by_name.usages.len(), 1);
        assert!(by_name.items.is_empty());

        assert_eq!(search(&items, "577").usages.len(), 1);
        assert_eq!(search(&items, "2024-03-05").usages.len(), 1);
    }

    #[test]
    fn page_caps_display_and_counts_the_rest() {
        let items: Vec<InventoryItem> =
            (0..13).map(|i| item(&i.to_string(), "P", "PR", &format!("BM-{i}"))).collect();

        let page = search(&items, "bm").page(DEFAULT_DISPLAY_LIMIT);
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.more_items, 3);
        assert_eq!(page.more_usages, 0);
    }

    #[test]
    fn nothing_found_is_empty() {
        let items = inventory();
        assert!(search(&items, "zzz").is_empty());
    }
}
