pub mod habit;
pub mod mood;
pub mod record;
pub mod task;
pub mod user;

pub use habit::Habit;
pub use mood::{MoodEntry, MoodLabel};
pub use record::{Category, Identified, Placement, Record};
pub use task::{Priority, Task};
pub use user::IdentityUser;
