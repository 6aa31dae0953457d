pub mod history;
pub mod lifecycle;

pub use history::AppointmentHistoryStore;
pub use lifecycle::AppointmentLifecycleService;
