use core_executor::Database;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}
