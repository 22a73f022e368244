pub mod department;
pub mod visit;
