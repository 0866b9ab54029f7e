use crate::models::Topic;

/// Keep exactly the topics whose category name matches `category`,
/// ignoring case. Topics without a category never match.
pub fn filter_by_category(topics: Vec<Topic>, category: &str) -> Vec<Topic> {
    topics
        .into_iter()
        .filter(|topic| topic.in_category(category))
        .collect()
}

/// `"1 user"` or `"N users"`
pub fn favorite_label(count: u32) -> String {
    if count == 1 {
        "1 user".to_string()
    } else {
        format!("{count} users")
    }
}
