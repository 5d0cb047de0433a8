//! Which links a viewer may see.

use crate::features::categories::models::Category;
use crate::features::links::models::Link;

/// A category with its links, both in display order
#[derive(Debug, Clone)]
pub struct DirectoryCategory {
    pub category: Category,
    pub links: Vec<Link>,
}

/// Drop `authenticated_only` links for anonymous viewers.
///
/// Category order and link order are kept as given. A category left without
/// links stays in the result with an empty list.
pub fn visible_links(
    categories: Vec<DirectoryCategory>,
    is_authenticated: bool,
) -> Vec<DirectoryCategory> {
    if is_authenticated {
        return categories;
    }

    categories
        .into_iter()
        .map(|mut entry| {
            entry.links.retain(|link| !link.authenticated_only);
            entry
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    pub(crate) fn category(name: &str, display_order: i32) -> Category {
        Category {
            id: Uuid::new_v4(),
            name: name.to_string(),
            description: None,
            display_order,
            color: "#FFFFFFFF".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    pub(crate) fn link(category: &Category, title: &str, authenticated_only: bool) -> Link {
        Link {
            id: Uuid::new_v4(),
            category_id: category.id,
            title: title.to_string(),
            url: format!("https://{}.example.com", title.to_lowercase()),
            description: None,
            icon_class: "fas fa-link".to_string(),
            display_order: 0,
            authenticated_only,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn titles(entry: &DirectoryCategory) -> Vec<&str> {
        entry.links.iter().map(|l| l.title.as_str()).collect()
    }

    fn sample() -> Vec<DirectoryCategory> {
        let a = category("A", 0);
        let b = category("B", 1);
        vec![
            DirectoryCategory {
                links: vec![link(&a, "Public", false), link(&a, "Private", true)],
                category: a,
            },
            DirectoryCategory {
                links: vec![
                    link(&b, "Wiki", true),
                    link(&b, "Status", false),
                    link(&b, "Chat", false),
                ],
                category: b,
            },
        ]
    }

    #[test]
    fn test_anonymous_sees_only_public_links() {
        let visible = visible_links(sample(), false);
        assert_eq!(titles(&visible[0]), vec!["Public"]);
        assert_eq!(titles(&visible[1]), vec!["Status", "Chat"]);
    }

    #[test]
    fn test_authenticated_sees_everything_in_order() {
        let visible = visible_links(sample(), true);
        assert_eq!(titles(&visible[0]), vec!["Public", "Private"]);
        assert_eq!(titles(&visible[1]), vec!["Wiki", "Status", "Chat"]);
    }

    #[test]
    fn test_category_order_is_preserved() {
        // input deliberately not sorted by display_order
        let mut input = sample();
        input.reverse();
        let names: Vec<String> = visible_links(input, false)
            .into_iter()
            .map(|c| c.category.name)
            .collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_emptied_category_is_kept() {
        let c = category("Members", 0);
        let input = vec![DirectoryCategory {
            links: vec![link(&c, "Vault", true)],
            category: c,
        }];

        let visible = visible_links(input, false);
        assert_eq!(visible.len(), 1);
        assert!(visible[0].links.is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(visible_links(Vec::new(), false).is_empty());
    }
}
