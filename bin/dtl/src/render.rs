use dtl_client::Profile;
use dtl_model::{Category, Topic, favorite_label};

pub(crate) fn topic_card(topic: &Topic, position: Option<(usize, usize)>, favorite: bool) {
    println!();
    match topic.category_name() {
        Some(category) => println!("{} • {category}", topic.title),
        None => println!("{}", topic.title),
    }
    if let Some(author) = &topic.created_by {
        println!("by {}", author.name);
    }
    println!();
    println!("{}", topic.content);
    println!();

    let mut footer = format!(
        "{} favorited this topic",
        favorite_label(topic.favorite_count)
    );
    if favorite {
        footer.push_str(" [favorited]");
    }
    if let Some((current, total)) = position {
        footer.push_str(&format!("  ({current}/{total})"));
    }
    println!("{footer}");
}

pub(crate) fn topic_line(topic: &Topic) {
    match topic.category_name() {
        Some(category) => println!("{:<26} {}  [{category}]", topic.id, topic.title),
        None => println!("{:<26} {}", topic.id, topic.title),
    }
}

pub(crate) fn topic_list(topics: &[Topic], empty: &str) {
    if topics.is_empty() {
        println!("{empty}");
    }
    for topic in topics {
        topic_line(topic);
    }
}

pub(crate) fn category_list(categories: &[Category]) {
    if categories.is_empty() {
        println!("No categories found.");
    }
    for category in categories {
        if category.description.is_empty() {
            println!("{:<26} {}", category.id, category.name);
        } else {
            println!(
                "{:<26} {}: {}",
                category.id, category.name, category.description
            );
        }
    }
}

pub(crate) fn profile(profile: &Profile) {
    let user = &profile.user;
    let never = || "Never".to_string();

    println!("{}", user.name);
    println!("  Email:               {}", user.email);
    println!(
        "  Last read:           {}",
        user.last_read_date.map_or_else(never, |t| t.format_long())
    );
    println!("  Topics read today:   {}", user.daily_read_count);
    println!(
        "  Last favorite added: {}",
        user.last_favorite_added.map_or_else(never, |t| t.format_long())
    );
    println!();
    println!("Favorite topics");

    if profile.favorites.is_empty() {
        println!("  You haven't favorited any topics yet.");
    }
    for topic in &profile.favorites {
        println!(
            "  {:<26} {}  (favorited by {})",
            topic.id,
            topic.title,
            favorite_label(topic.favorite_count)
        );
    }
}
