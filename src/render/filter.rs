use crate::models::{Member, User};

/// Anything a list view can search by name and email
pub trait Searchable {
    fn search_fields(&self) -> [&str; 2];
}

impl Searchable for User {
    fn search_fields(&self) -> [&str; 2] {
        [&self.nome, &self.email]
    }
}

impl Searchable for Member {
    fn search_fields(&self) -> [&str; 2] {
        [&self.nome, &self.email]
    }
}

/// Case-insensitive substring match over the full cached list.
///
/// A blank query keeps every item. Applying the same query twice yields the
/// same result.
pub fn filter_items<'a, T: Searchable>(items: &'a [T], query: &str) -> Vec<&'a T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items.iter().collect();
    }
    items
        .iter()
        .filter(|item| {
            item.search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, nome: &str, email: &str) -> User {
        User {
            id: id.to_string(),
            nome: nome.to_string(),
            email: email.to_string(),
            plano: None,
            criado_em: None,
            is_admin: false,
            movimentacoes: vec![],
        }
    }

    fn users() -> Vec<User> {
        vec![
            user("1", "Ana Souza", "ana@clarify.com"),
            user("2", "Bruno Lima", "bruno@exemplo.org"),
            user("3", "Carla Dias", "carla@clarify.com"),
        ]
    }

    #[test]
    fn matches_name_or_email_in_any_case() {
        let users = users();
        let ids = |q: &str| -> Vec<String> {
            filter_items(&users, q).iter().map(|u| u.id.clone()).collect()
        };

        assert_eq!(ids("souza"), vec!["1"]);
        assert_eq!(ids("SOUZA"), vec!["1"]);
        assert_eq!(ids("Clarify.COM"), vec!["1", "3"]);
        assert_eq!(ids("exemplo"), vec!["2"]);
        assert!(ids("zzz").is_empty());
    }

    #[test]
    fn blank_query_keeps_everything() {
        let users = users();
        assert_eq!(filter_items(&users, "").len(), 3);
        assert_eq!(filter_items(&users, "   ").len(), 3);
    }

    #[test]
    fn filtering_is_idempotent() {
        let users = users();
        let once: Vec<User> = filter_items(&users, "ar").into_iter().cloned().collect();
        let twice: Vec<User> = filter_items(&once, "ar").into_iter().cloned().collect();
        let ids = |v: &[User]| v.iter().map(|u| u.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&once), ids(&twice));
        assert_eq!(ids(&once), vec!["1", "3"]);
    }
}
