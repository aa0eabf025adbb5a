pub mod export;
pub mod goal_ops;
pub mod journal_ops;
pub mod mood_ops;
pub mod note_ops;
pub mod stats;
pub mod timeline_ops;
pub mod todo_ops;

/// Outcome of an operation addressed by id.
///
/// Unknown ids are not an error anywhere in the data layer: the operation is
/// a no-op and the caller decides whether that matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<T = ()> {
    Found(T),
    NotFound,
}

impl<T> Lookup<T> {
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(v) => Some(v),
            Lookup::NotFound => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Lookup::Found(v) => Lookup::Found(f(v)),
            Lookup::NotFound => Lookup::NotFound,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Lookup::Found(v),
            None => Lookup::NotFound,
        }
    }
}

/// Generate a short opaque id (8 hex chars) not already taken.
pub fn new_id(taken: impl Fn(&str) -> bool) -> String {
    loop {
        let id = uuid::Uuid::new_v4().simple().to_string()[..8].to_string();
        if !taken(&id) {
            return id;
        }
    }
}

/// Remove every record with the given id, reporting whether any was removed
pub(crate) fn remove_by_id<T>(items: &mut Vec<T>, id: &str, id_of: impl Fn(&T) -> &str) -> Lookup {
    let before = items.len();
    items.retain(|item| id_of(item) != id);
    if items.len() < before {
        Lookup::Found(())
    } else {
        Lookup::NotFound
    }
}
