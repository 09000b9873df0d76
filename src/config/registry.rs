//! Entity registry: which tables each endpoint may touch and which fields it may write.

use crate::error::AppError;

/// Column whitelisted for writes. `sql_type` is used to cast bound parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub sql_type: &'static str,
}

const fn field(name: &'static str, sql_type: &'static str) -> FieldDef {
    FieldDef { name, sql_type }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrderBy {
    pub column: &'static str,
    pub direction: SortDirection,
}

const BY_ID: OrderBy = OrderBy {
    column: "id",
    direction: SortDirection::Asc,
};

/// Operations an entity can be reached through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// Admin list and get-by-id.
    Read,
    Create,
    Update,
    /// Unauthenticated list on the public API.
    PublicList,
}

/// Who a listing is for. Public listings apply `public_requires`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListScope {
    Admin,
    Public,
}

#[derive(Debug, PartialEq, Eq)]
pub struct EntityDef {
    /// Value of the `entity` query parameter.
    pub name: &'static str,
    pub table: &'static str,
    pub fields: &'static [FieldDef],
    pub order_by: OrderBy,
    pub operations: &'static [Operation],
    /// Column that must be non-null for a row to appear in public listings.
    pub public_requires: Option<&'static str>,
}

impl EntityDef {
    pub fn allows(&self, op: Operation) -> bool {
        self.operations.contains(&op)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Columns every table has besides its whitelist.
pub const SYSTEM_COLUMNS: &[&str] = &["id", "created_at", "updated_at"];

use self::Operation::{Create, PublicList, Read, Update};

pub static ENTITIES: &[EntityDef] = &[
    EntityDef {
        name: "teachers",
        table: "teachers",
        fields: &[
            field("name", "text"),
            field("photo_url", "text"),
            field("description", "text"),
            field("specialization", "text"),
            field("experience", "text"),
            field("sort_order", "integer"),
        ],
        order_by: BY_ID,
        operations: &[Read, Create, Update, PublicList],
        public_requires: Some("name"),
    },
    EntityDef {
        name: "schedule",
        table: "schedule",
        fields: &[
            field("time", "text"),
            field("title", "text"),
            field("description", "text"),
            field("teacher_id", "integer"),
            field("sort_order", "integer"),
        ],
        order_by: BY_ID,
        operations: &[Read, Create, Update, PublicList],
        public_requires: None,
    },
    EntityDef {
        name: "calendar",
        table: "calendar_events",
        fields: &[
            field("date", "date"),
            field("title", "text"),
            field("description", "text"),
            field("event_type", "text"),
            field("sort_order", "integer"),
        ],
        order_by: BY_ID,
        operations: &[Read, Create, Update],
        public_requires: None,
    },
    EntityDef {
        name: "contacts",
        table: "contacts",
        fields: &[
            field("type", "text"),
            field("value", "text"),
            field("icon", "text"),
            field("label", "text"),
            field("sort_order", "integer"),
        ],
        order_by: BY_ID,
        operations: &[Read, Create, Update, PublicList],
        public_requires: None,
    },
    EntityDef {
        name: "reviews",
        table: "reviews",
        fields: &[
            field("author_name", "text"),
            field("author_photo", "text"),
            field("rating", "integer"),
            field("review_text", "text"),
            field("date", "text"),
            field("is_published", "boolean"),
            field("sort_order", "integer"),
        ],
        order_by: BY_ID,
        operations: &[Read, Create, Update, PublicList],
        public_requires: None,
    },
    EntityDef {
        name: "results",
        table: "results",
        fields: &[
            field("title", "text"),
            field("description", "text"),
            field("image_url", "text"),
            field("metric_value", "numeric"),
            field("metric_label", "text"),
            field("sort_order", "integer"),
        ],
        order_by: BY_ID,
        operations: &[Read, Create, Update],
        public_requires: None,
    },
    EntityDef {
        name: "bookings",
        table: "student_bookings",
        fields: &[
            field("student_name", "text"),
            field("student_phone", "text"),
            field("student_email", "text"),
            field("selected_teacher", "text"),
            field("selected_subject", "text"),
            field("selected_time", "text"),
            field("status", "text"),
        ],
        order_by: OrderBy {
            column: "created_at",
            direction: SortDirection::Desc,
        },
        operations: &[Read, Create, Update],
        public_requires: None,
    },
    EntityDef {
        name: "notifications",
        table: "notification_settings",
        fields: &[
            field("notification_type", "text"),
            field("is_enabled", "boolean"),
            field("value", "text"),
        ],
        order_by: OrderBy {
            column: "notification_type",
            direction: SortDirection::Asc,
        },
        operations: &[Read, Update],
        public_requires: None,
    },
];

/// Table holding admin credentials. Not reachable through the entity API.
pub const ADMINS_TABLE: &str = "admins";

/// Table the booking endpoint inserts into.
pub const BOOKINGS_TABLE: &str = "student_bookings";

/// Resolve an entity name for one operation. Names outside that operation's set are unknown.
pub fn lookup(name: &str, op: Operation) -> Result<&'static EntityDef, AppError> {
    ENTITIES
        .iter()
        .find(|e| e.name == name && e.allows(op))
        .ok_or_else(|| AppError::UnknownEntity(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names_for(op: Operation) -> Vec<&'static str> {
        ENTITIES.iter().filter(|e| e.allows(op)).map(|e| e.name).collect()
    }

    #[test]
    fn admin_read_covers_every_entity() {
        assert_eq!(
            names_for(Read),
            vec!["teachers", "schedule", "calendar", "contacts", "reviews", "results", "bookings", "notifications"]
        );
    }

    #[test]
    fn notifications_are_updatable_but_not_creatable() {
        assert!(lookup("notifications", Update).is_ok());
        assert!(matches!(
            lookup("notifications", Create),
            Err(AppError::UnknownEntity(name)) if name == "notifications"
        ));
    }

    #[test]
    fn public_list_excludes_private_tables() {
        assert_eq!(names_for(PublicList), vec!["teachers", "schedule", "contacts", "reviews"]);
        assert!(lookup("bookings", PublicList).is_err());
        assert!(lookup("calendar", PublicList).is_err());
    }

    #[test]
    fn unknown_and_empty_names_fail() {
        assert!(matches!(lookup("widgets", Read), Err(AppError::UnknownEntity(_))));
        assert!(matches!(lookup("", Read), Err(AppError::UnknownEntity(_))));
    }

    #[test]
    fn calendar_maps_to_calendar_events() {
        let e = lookup("calendar", Read).unwrap();
        assert_eq!(e.table, "calendar_events");
        assert_eq!(e.field("date").map(|f| f.sql_type), Some("date"));
    }

    #[test]
    fn only_public_teachers_require_a_name() {
        let with_filter: Vec<_> = ENTITIES
            .iter()
            .filter_map(|e| e.public_requires.map(|c| (e.name, c)))
            .collect();
        assert_eq!(with_filter, vec![("teachers", "name")]);
    }

    #[test]
    fn booking_and_settings_orderings() {
        let bookings = lookup("bookings", Read).unwrap();
        assert_eq!(bookings.order_by.column, "created_at");
        assert_eq!(bookings.order_by.direction, SortDirection::Desc);
        let settings = lookup("notifications", Read).unwrap();
        assert_eq!(settings.order_by.column, "notification_type");
        assert_eq!(settings.order_by.direction.as_sql(), "ASC");
    }
}
