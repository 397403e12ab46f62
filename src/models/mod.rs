mod produit;

pub use produit::*;
