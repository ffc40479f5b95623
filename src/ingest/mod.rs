pub mod decode;
pub mod loader;

pub use decode::{decode_text, default_encodings};
pub use loader::{load_dataset, parse_amount, parse_date, ExtractLoader};
