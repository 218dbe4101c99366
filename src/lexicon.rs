//! Static lexical tables.
//!
//! All tables are immutable and built once on first use. Every lookup is
//! total: an unknown key yields `None` or an empty collection.

pub mod acronyms;
pub mod gematria;
pub mod ocr;
pub mod phonetic;
pub mod roots;
pub mod stop_words;
pub mod synonyms;

pub use acronyms::{acronym_expansions, looks_like_acronym};
pub use gematria::{calculate_gematria, convert_number_to_hebrew, letter_value};
pub use ocr::ocr_variants;
pub use phonetic::{phonetic_key, sounds_alike};
pub use roots::{RootCategory, RootEntry, all_roots, root_entry, root_for_form};
pub use stop_words::is_stop_word;
pub use synonyms::synonyms_for;
