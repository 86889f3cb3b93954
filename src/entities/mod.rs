//! Stored records and their request bodies

pub mod category;
pub mod language;
pub mod macros;
pub mod progress;
pub mod user;
pub mod vocab_category;
pub mod vocab_entry;

pub use category::{Category, CreateCategory, UpdateCategory};
pub use language::Language;
pub use progress::{RecordReview, UserVocabProgress};
pub use user::{AuthPayload, LoginUser, RegisterUser, UpdateUser, User};
pub use vocab_category::VocabCategory;
pub use vocab_entry::{CreateVocabEntry, UpdateVocabEntry, VocabEntry};
