pub mod flavour;
pub mod genealogy;
pub mod io;
pub mod jet;
