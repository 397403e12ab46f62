pub mod produit_queries;
