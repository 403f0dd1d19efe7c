//! Pure filtering and search helpers backing the list screens
//!
//! All list screens filter in-process over full result sets delivered by
//! the document store; these helpers keep that logic out of the HTTP
//! handlers and under test.

use hubgate_domain::{BlogPost, BlogStatus, ContactMessage, Profile, SortOrder};

/// Case-insensitive roster search across full name, email, and
/// organization. An empty term matches everything.
#[must_use]
pub fn roster_matches(profile: &Profile, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    profile.full_name.to_lowercase().contains(&term)
        || profile.email.to_lowercase().contains(&term)
        || profile.organization.to_lowercase().contains(&term)
}

/// Case-insensitive message search across sender name, email, and company
#[must_use]
pub fn message_matches(message: &ContactMessage, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    message.name.to_lowercase().contains(&term)
        || message.email.to_lowercase().contains(&term)
        || message.company.to_lowercase().contains(&term)
}

/// Filter messages by search term and an any-of service filter.
///
/// An empty `services` slice disables the service filter; otherwise a
/// message passes when it shares at least one service with the filter.
#[must_use]
pub fn filter_messages<'a>(
    messages: &'a [ContactMessage],
    term: &str,
    services: &[String],
) -> Vec<&'a ContactMessage> {
    messages
        .iter()
        .filter(|msg| message_matches(msg, term))
        .filter(|msg| {
            services.is_empty() || services.iter().any(|s| msg.service_interest.contains(s))
        })
        .collect()
}

/// Sort messages by timestamp in the requested direction
pub fn sort_messages(messages: &mut [ContactMessage], order: SortOrder) {
    match order {
        SortOrder::Asc => messages.sort_by_key(|m| m.timestamp),
        SortOrder::Desc => messages.sort_by_key(|m| std::cmp::Reverse(m.timestamp)),
    }
}

/// Case-insensitive blog search across title and category
#[must_use]
pub fn blog_matches(post: &BlogPost, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    post.title.to_lowercase().contains(&term) || post.category.to_lowercase().contains(&term)
}

/// Posts in `status` matching the search term, preserving input order
#[must_use]
pub fn partition_blogs<'a>(
    posts: &'a [BlogPost],
    status: BlogStatus,
    term: &str,
) -> Vec<&'a BlogPost> {
    posts.iter().filter(|p| p.status == status && blog_matches(p, term)).collect()
}

/// Split a comma-separated tag string into trimmed, non-empty tags
#[must_use]
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|t| !t.is_empty()).map(String::from).collect()
}
