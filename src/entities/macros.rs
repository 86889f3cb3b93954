//! Macros for reducing boilerplate when defining entities
//!
//! These macros generate the repetitive trait implementations needed
//! for each stored record type.

/// Implement [`Entity`](crate::core::entity::Entity) for a struct that has
/// an `updated_at` field
///
/// Also adds a `touch()` helper that bumps `updated_at`.
///
/// # Example
///
/// ```rust,ignore
/// pub struct Category {
///     pub id: Uuid,
///     pub user_id: Uuid,
///     pub name: String,
///     pub created_at: DateTime<Utc>,
///     pub updated_at: DateTime<Utc>,
/// }
///
/// impl_entity!(Category, "category");
/// ```
#[macro_export]
macro_rules! impl_entity {
    ($type:ident, $singular:expr) => {
        impl $crate::core::entity::Entity for $type {
            fn resource_name_singular() -> &'static str {
                $singular
            }
        }

        impl $type {
            /// Update the updated_at timestamp to now
            pub fn touch(&mut self) {
                self.updated_at = ::chrono::Utc::now();
            }
        }
    };
}

/// Implement [`OwnedResource`](crate::core::access::OwnedResource) from an
/// owner field
///
/// Use `optional` when the owner column is nullable.
///
/// ```rust,ignore
/// impl_owned_resource!(Category, user_id);
/// impl_owned_resource!(VocabEntry, optional created_by_user_id);
/// ```
#[macro_export]
macro_rules! impl_owned_resource {
    ($type:ident, optional $field:ident) => {
        impl $crate::core::access::OwnedResource for $type {
            fn owner_id(&self) -> Option<::uuid::Uuid> {
                self.$field
            }
        }
    };
    ($type:ident, $field:ident) => {
        impl $crate::core::access::OwnedResource for $type {
            fn owner_id(&self) -> Option<::uuid::Uuid> {
                Some(self.$field)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::access::OwnedResource;
    use crate::core::entity::Entity;
    use chrono::{DateTime, Utc};
    use uuid::Uuid;

    #[derive(Debug, Clone)]
    struct Deck {
        id: Uuid,
        owner: Uuid,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    }

    impl_entity!(Deck, "deck");
    impl_owned_resource!(Deck, owner);

    #[derive(Debug, Clone)]
    struct Card {
        id: Uuid,
        author: Option<Uuid>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    }

    impl_entity!(Card, "card");
    impl_owned_resource!(Card, optional author);

    fn deck() -> Deck {
        let now = Utc::now();
        Deck {
            id: Uuid::new_v4(),
            owner: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_generated_entity_impl() {
        let d = deck();
        assert_eq!(Deck::resource_name_singular(), "deck");
        assert!(!d.id.is_nil());
    }

    #[test]
    fn test_touch_advances_updated_at() {
        let mut d = deck();
        let before = d.updated_at;
        std::thread::sleep(std::time::Duration::from_millis(2));
        d.touch();
        assert!(d.updated_at > before);
        assert_eq!(d.created_at, before);
    }

    #[test]
    fn test_owner_field_mapping() {
        let d = deck();
        assert_eq!(d.owner_id(), Some(d.owner));

        let now = Utc::now();
        let orphan = Card {
            id: Uuid::new_v4(),
            author: None,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(orphan.owner_id(), None);
        assert_eq!(Card::resource_name_singular(), "card");
    }
}
