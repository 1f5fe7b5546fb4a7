//! Case-insensitive free-text filtering over already loaded collections.

use crate::domain::entities::{
    BookRecord, CourseRecord, EventRecord, FatwaRecord, GraduateRecord, InboxMessageRecord,
    MediaRecord, PostRecord, ScholarRecord,
};

/// Records that expose text fields to the list filter.
pub trait Searchable {
    /// Text fields the query is matched against; absent optional fields are skipped.
    fn search_fields(&self) -> Vec<&str>;

    fn matches_query(&self, needle_lower: &str) -> bool {
        self.search_fields()
            .into_iter()
            .any(|field| field.to_lowercase().contains(needle_lower))
    }
}

/// Items containing `query` in any searchable field, in source order.
///
/// An empty or whitespace-only query returns the whole collection.
pub fn filter_by_query<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| item.matches_query(&needle))
        .collect()
}

/// Owned variant of [`filter_by_query`] for callers that hand the result on.
pub fn retain_matching<T: Searchable>(items: Vec<T>, query: Option<&str>) -> Vec<T> {
    let needle = query.unwrap_or_default().trim().to_lowercase();
    if needle.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| item.matches_query(&needle))
        .collect()
}

fn push_opt<'a>(fields: &mut Vec<&'a str>, value: &'a Option<String>) {
    if let Some(value) = value.as_deref() {
        fields.push(value);
    }
}

impl Searchable for EventRecord {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        push_opt(&mut fields, &self.location);
        fields
    }
}

impl Searchable for CourseRecord {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        push_opt(&mut fields, &self.instructor_name);
        push_opt(&mut fields, &self.category);
        fields
    }
}

impl Searchable for BookRecord {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        push_opt(&mut fields, &self.author);
        fields
    }
}

impl Searchable for ScholarRecord {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        push_opt(&mut fields, &self.title);
        fields
    }
}

impl Searchable for GraduateRecord {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        push_opt(&mut fields, &self.program);
        fields
    }
}

impl Searchable for PostRecord {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        push_opt(&mut fields, &self.excerpt);
        fields
    }
}

impl Searchable for FatwaRecord {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str()];
        push_opt(&mut fields, &self.question_text);
        fields
    }
}

impl Searchable for MediaRecord {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = Vec::with_capacity(2);
        push_opt(&mut fields, &self.title);
        push_opt(&mut fields, &self.description);
        fields
    }
}

impl Searchable for InboxMessageRecord {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str()];
        push_opt(&mut fields, &self.email);
        push_opt(&mut fields, &self.subject);
        fields.push(self.message.as_str());
        fields
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;
    use uuid::Uuid;

    use super::*;

    fn event(title: &str, location: Option<&str>) -> EventRecord {
        let stamp = datetime!(2026-05-01 09:00 UTC);
        EventRecord {
            id: Uuid::new_v4(),
            title: title.into(),
            location: location.map(Into::into),
            summary: None,
            starts_at: stamp,
            ends_at: None,
            is_public: true,
            created_at: stamp,
            updated_at: stamp,
        }
    }

    fn events() -> Vec<EventRecord> {
        vec![
            event("Quran Competition", Some("Main Hall")),
            event("Parents Meeting", None),
            event("Annual Graduation", Some("Quran Centre")),
        ]
    }

    #[test]
    fn empty_or_blank_query_returns_everything_in_order() {
        let items = events();
        for query in ["", "   "] {
            let found = filter_by_query(&items, query);
            let titles: Vec<_> = found.iter().map(|e| e.title.as_str()).collect();
            assert_eq!(
                titles,
                ["Quran Competition", "Parents Meeting", "Annual Graduation"]
            );
        }
    }

    #[test]
    fn matches_any_field_case_insensitively() {
        let items = events();
        let found = filter_by_query(&items, "QURAN");
        let titles: Vec<_> = found.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, ["Quran Competition", "Annual Graduation"]);
    }

    #[test]
    fn result_is_subset_containing_query() {
        let items = events();
        let query = "hall";
        let found = filter_by_query(&items, query);
        assert!(found.len() <= items.len());
        for item in found {
            assert!(
                item.search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(query))
            );
        }
    }

    #[test]
    fn missing_optional_fields_are_skipped() {
        let items = events();
        assert!(filter_by_query(&items, "centre").len() == 1);
        assert!(filter_by_query(&items, "nowhere").is_empty());
    }

    #[test]
    fn retain_matching_keeps_owned_items() {
        let kept = retain_matching(events(), Some("meeting"));
        assert_eq!(kept.len(), 1);
        assert_eq!(retain_matching(events(), None).len(), 3);
    }
}
