mod habits;
mod notifications;
mod trash;
mod workout_detail;
mod workouts;

pub use habits::HabitsView;
pub use notifications::NotificationsView;
pub use trash::TrashView;
pub use workout_detail::WorkoutDetailView;
pub use workouts::WorkoutsView;
