pub mod draw;
pub mod outcome;
pub mod pick;
pub mod ticket;

pub use draw::{Draw, StoredDraw};
pub use outcome::OutcomeRecord;
pub use pick::{join_values, parse_values, PickKind};
pub use ticket::{validate_name, Ticket};
