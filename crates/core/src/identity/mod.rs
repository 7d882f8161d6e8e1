//! Identifier generation for learner accounts: usernames and matricula codes.

pub mod lookup;
pub mod matricula;
pub mod normalize;
pub mod username;

pub use lookup::{MatriculaCounter, UsernameLookup};
pub use matricula::{generate_matricula, MatriculaGenerator};
pub use normalize::{extract_consonants, normalize, split_full_name, NameParts};
pub use username::{generate_username, UsernameGenerator};
